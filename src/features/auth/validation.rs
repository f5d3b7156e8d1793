//! Declarative form validation. Each form describes its fields as a static
//! [`Schema`]; the schema is evaluated before any store call, and every failing
//! field gets exactly one message (the first rule it breaks).

use regex::Regex;
use std::collections::BTreeMap;

/// Constraint attached to a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Value must contain something other than whitespace.
    Required,
    /// Trimmed value must look like `local@domain.tld`.
    Email,
    /// Trimmed value must have at least this many characters.
    MinLength(usize),
    /// Value must equal the value of the named field.
    SameAs(&'static str),
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
}

/// Read access to a form buffer by field name.
pub trait FormValues {
    fn value(&self, field: &str) -> &str;
}

/// Field-level validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: &'static str, message: String) {
        self.0.insert(field, message);
    }
}

impl Schema {
    /// Returns every field error, or `Ok` when the form can be submitted.
    pub fn validate(&self, form: &impl FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        for field in self.fields {
            let value = form.value(field.name);
            if let Some(message) = field
                .rules
                .iter()
                .find_map(|rule| check(*rule, field.label, value, form))
            {
                errors.insert(field.name, message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check(rule: Rule, label: &str, value: &str, form: &impl FormValues) -> Option<String> {
    match rule {
        Rule::Required if value.trim().is_empty() => Some(format!("{label} is required.")),
        Rule::Email if !valid_email(value.trim()) => {
            Some("Enter a valid email address.".to_string())
        }
        Rule::MinLength(min) if value.trim().chars().count() < min => {
            Some(format!("{label} must be at least {min} characters."))
        }
        Rule::SameAs(other) if value != form.value(other) => {
            Some(format!("{label} does not match."))
        }
        _ => None,
    }
}

/// Basic email format check on trimmed input.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}
