//! Submission validation
//!
//! Checks an untyped JSON payload against the contact schema. Every field is
//! evaluated, so a failing payload reports all of its problems in one
//! [`ValidationReport`] instead of stopping at the first.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::model::NewContactSubmission;

/// Path used for findings that concern the payload as a whole
pub const ROOT_PATH: &str = "";

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Machine-readable finding code
    pub code: String,
    /// Human-readable reason
    pub message: String,
    /// Field the finding applies to (empty for the payload root)
    pub path: String,
}

impl ValidationFinding {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: path.into(),
        }
    }

    /// Check if this finding concerns the payload root
    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} at \"{}\"", self.message, self.path)
        }
    }
}

/// All findings produced by a failed validation
///
/// The display form joins every finding into one message, e.g.
/// `Validation error: Name must be at least 2 characters at "name"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn new(findings: Vec<ValidationFinding>) -> Self {
        Self { findings }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Findings for a given field
    pub fn for_field<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationFinding> {
        self.findings.iter().filter(move |f| f.path == path)
    }

    /// Check if any finding applies to a given field
    pub fn has_field(&self, path: &str) -> bool {
        self.for_field(path).next().is_some()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error")?;
        for (index, finding) in self.findings.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{}{}", separator, finding)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// A constraint applied to a string value that passed the type check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldConstraint {
    /// Minimum length in characters
    MinLength { min: usize, message: String },
    /// Email address syntax
    Email { message: String },
}

impl FieldConstraint {
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        FieldConstraint::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        FieldConstraint::Email {
            message: message.into(),
        }
    }

    fn check(&self, path: &str, value: &str) -> Option<ValidationFinding> {
        match self {
            FieldConstraint::MinLength { min, message } => {
                (value.chars().count() < *min).then(|| ValidationFinding::new("TOO_SMALL", message, path))
            }
            FieldConstraint::Email { message } => (!is_standard_email(value))
                .then(|| ValidationFinding::new("INVALID_EMAIL", message, path)),
        }
    }
}

/// Email syntax check
///
/// On top of `validator`'s check, the local part may not start, end or
/// contain consecutive dots, and the domain must be dotted with an
/// alphabetic top-level label of at least two characters.
pub fn is_standard_email(value: &str) -> bool {
    if !validator::validate_email(value) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    let local_ok = !local.starts_with('.') && !local.ends_with('.') && !local.contains("..");
    let labels_ok = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    let tld_ok = domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    local_ok && labels_ok && tld_ok
}

/// Rules for one string field of the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    /// Whether the field must be present (and non-null)
    pub required: bool,
    /// Constraints checked in order; all of them are evaluated
    pub constraints: Vec<FieldConstraint>,
}

impl FieldRules {
    pub fn required() -> Self {
        Self {
            required: true,
            constraints: Vec::new(),
        }
    }

    /// Optional and nullable
    pub fn optional() -> Self {
        Self {
            required: false,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Check a field value, recording findings
    ///
    /// Returns the accepted string, or `None` when the field is absent or
    /// rejected.
    pub fn check(
        &self,
        path: &str,
        value: Option<&Value>,
        findings: &mut Vec<ValidationFinding>,
    ) -> Option<String> {
        let value = match value {
            None | Some(Value::Null) if !self.required => return None,
            None => {
                findings.push(ValidationFinding::new("REQUIRED", "Required", path));
                return None;
            }
            Some(value) => value,
        };

        let Value::String(text) = value else {
            findings.push(ValidationFinding::new(
                "INVALID_TYPE",
                format!("Expected string, received {}", json_type_name(value)),
                path,
            ));
            return None;
        };

        let before = findings.len();
        findings.extend(self.constraints.iter().filter_map(|c| c.check(path, text)));

        (findings.len() == before).then(|| text.clone())
    }
}

/// Typed schema for inbound contact submissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSchema {
    pub name: FieldRules,
    pub email: FieldRules,
    pub company: FieldRules,
    pub message: FieldRules,
}

impl Default for ContactSchema {
    fn default() -> Self {
        Self {
            name: FieldRules::required().with_constraint(FieldConstraint::min_length(
                2,
                "Name must be at least 2 characters",
            )),
            email: FieldRules::required()
                .with_constraint(FieldConstraint::email("Please enter a valid email address")),
            company: FieldRules::optional(),
            message: FieldRules::required().with_constraint(FieldConstraint::min_length(
                10,
                "Message must be at least 10 characters",
            )),
        }
    }
}

impl ContactSchema {
    /// Validate a payload
    ///
    /// Fields outside the schema (including caller-supplied `id` or
    /// `createdAt`) are ignored.
    pub fn validate(&self, payload: &Value) -> Result<NewContactSubmission, ValidationReport> {
        let Some(object) = payload.as_object() else {
            return Err(ValidationReport::new(vec![ValidationFinding::new(
                "INVALID_TYPE",
                format!("Expected object, received {}", json_type_name(payload)),
                ROOT_PATH,
            )]));
        };

        self.validate_object(object)
    }

    fn validate_object(
        &self,
        object: &Map<String, Value>,
    ) -> Result<NewContactSubmission, ValidationReport> {
        let mut findings = Vec::new();

        let name = self.name.check("name", object.get("name"), &mut findings);
        let email = self.email.check("email", object.get("email"), &mut findings);
        let company = self.company.check("company", object.get("company"), &mut findings);
        let message = self.message.check("message", object.get("message"), &mut findings);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if findings.is_empty() => {
                Ok(NewContactSubmission {
                    name,
                    email,
                    company,
                    message,
                })
            }
            _ => Err(ValidationReport::new(findings)),
        }
    }
}

/// Validate a payload against the default contact schema
pub fn validate_submission(payload: &Value) -> Result<NewContactSubmission, ValidationReport> {
    ContactSchema::default().validate(payload)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
