//! Declarative input validation and sanitization.
//!
//! Request bodies arrive as untyped JSON and pass through a per-endpoint
//! rule set before any business logic runs. Sanitizers (trim, HTML-escape,
//! email case-folding) are applied first, to a copy of the payload, then the
//! rules; every field is checked independently and all field failures are
//! collected into a single rejection. The normalized payload contains only
//! the declared fields, so downstream code never sees unvalidated input.

use serde_json::{Map, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Character-class requirements for the password strength rule.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub lowercase: usize,
    pub uppercase: usize,
    pub digits: usize,
    pub symbols: usize,
}

impl PasswordPolicy {
    /// One of each character class over at least eight characters.
    pub const DEFAULT: Self = Self {
        min_length: 8,
        lowercase: 1,
        uppercase: 1,
        digits: 1,
        symbols: 1,
    };
}

/// A single validation rule. Rules for a field compose conjunctively; the
/// first failing rule is reported for that field.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    IsString,
    NotEmpty,
    IsEmail,
    Length { min: usize, max: usize },
    StrongPassword(PasswordPolicy),
    IsArray,
    IsInt,
}

/// Rule set for one named field of a payload.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub optional: bool,
    pub rules: &'static [Rule],
}

impl FieldRules {
    pub const fn required(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            optional: false,
            rules,
        }
    }

    pub const fn optional(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            optional: true,
            rules,
        }
    }
}

/// One rejected field: its name and the reason, as sent back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub champ: String,
    pub message: String,
}

/// Every field failure from one validation pass.
#[derive(Debug, Clone, Error)]
#[error("{} field(s) rejected", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn single(champ: &str, message: &str) -> Self {
        Self(vec![FieldError {
            champ: champ.to_string(),
            message: message.to_string(),
        }])
    }
}

/// Validates `payload` against `rules`, returning the normalized payload.
///
/// The input is never mutated; sanitization happens on a copy. Fields absent
/// from the rule set are dropped from the result.
pub fn validate(payload: &Value, rules: &[FieldRules]) -> Result<Value, ValidationErrors> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);

    let mut normalized = Map::new();
    let mut errors = Vec::new();

    for field_rules in rules {
        let raw = fields.get(field_rules.field).filter(|v| !v.is_null());
        let Some(raw) = raw else {
            if !field_rules.optional {
                errors.push(FieldError {
                    champ: field_rules.field.to_string(),
                    message: "est requis".to_string(),
                });
            }
            continue;
        };

        let value = sanitize_value(raw, field_rules.rules);
        match apply_rules(&value, field_rules.rules) {
            Ok(()) => {
                normalized.insert(
                    field_rules.field.to_string(),
                    finalize(value, field_rules.rules),
                );
            }
            Err(message) => errors.push(FieldError {
                champ: field_rules.field.to_string(),
                message,
            }),
        }
    }

    if errors.is_empty() {
        Ok(Value::Object(normalized))
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Sanitizes a path identifier: trimmed, escaped, and non-empty.
pub fn sanitize_id(raw: &str) -> Result<String, ValidationErrors> {
    let id = escape(raw.trim());
    if id.is_empty() {
        return Err(ValidationErrors::single("id", "est requis"));
    }
    Ok(id)
}

/// HTML-escapes characters that are unsafe for downstream storage.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim and escape string values; email fields are additionally lowercased.
/// String elements of arrays get the same treatment, other values pass
/// through untouched.
fn sanitize_value(value: &Value, rules: &[Rule]) -> Value {
    match value {
        Value::String(s) => {
            let mut s = escape(s.trim());
            if rules.iter().any(|r| matches!(r, Rule::IsEmail)) {
                s = s.to_lowercase();
            }
            Value::String(s)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Value::String(escape(s.trim())),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

fn apply_rules(value: &Value, rules: &[Rule]) -> Result<(), String> {
    for rule in rules {
        check_rule(rule, value)?;
    }
    Ok(())
}

fn check_rule(rule: &Rule, value: &Value) -> Result<(), String> {
    match rule {
        Rule::IsString => {
            if !value.is_string() {
                return Err("doit être une chaîne de caractères".to_string());
            }
        }
        Rule::NotEmpty => {
            let non_empty = match value {
                Value::String(s) => !s.is_empty(),
                Value::Array(items) => !items.is_empty(),
                _ => false,
            };
            if !non_empty {
                return Err("ne doit pas être vide".to_string());
            }
        }
        Rule::IsEmail => {
            let valid = value.as_str().is_some_and(|s| s.validate_email());
            if !valid {
                return Err("doit être un courriel valide".to_string());
            }
        }
        Rule::Length { min, max } => {
            let within = value
                .as_str()
                .is_some_and(|s| (*min..=*max).contains(&s.chars().count()));
            if !within {
                return Err(format!("doit contenir entre {min} et {max} caractères"));
            }
        }
        Rule::StrongPassword(policy) => {
            let strong = value.as_str().is_some_and(|s| is_strong(s, policy));
            if !strong {
                return Err(
                    "doit contenir minuscule, majuscule, chiffre et symbole".to_string(),
                );
            }
        }
        Rule::IsArray => {
            if !value.is_array() {
                return Err("doit être un tableau".to_string());
            }
        }
        Rule::IsInt => {
            let is_int = match value {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                Value::String(s) => s.parse::<i64>().is_ok(),
                _ => false,
            };
            if !is_int {
                return Err("doit être un nombre entier".to_string());
            }
        }
    }
    Ok(())
}

fn is_strong(s: &str, policy: &PasswordPolicy) -> bool {
    let lowercase = s.chars().filter(|c| c.is_lowercase()).count();
    let uppercase = s.chars().filter(|c| c.is_uppercase()).count();
    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    let symbols = s
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();

    s.chars().count() >= policy.min_length
        && lowercase >= policy.lowercase
        && uppercase >= policy.uppercase
        && digits >= policy.digits
        && symbols >= policy.symbols
}

/// Converts integer-rule string values into JSON numbers so typed payload
/// structs can deserialize them directly (query parameters arrive as text).
fn finalize(value: Value, rules: &[Rule]) -> Value {
    if rules.iter().any(|r| matches!(r, Rule::IsInt)) {
        if let Value::String(s) = &value {
            if let Ok(n) = s.parse::<i64>() {
                return Value::Number(n.into());
            }
        }
    }
    value
}
