//! Raw user input for every screen that submits data, validated before any
//! request is built.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::{DocumentNumber, PhoneNumber};

pub mod appointment;
pub mod auth;
pub mod history;
pub mod pet;
pub mod species;
pub mod user;

/// First error message per field, keyed by the form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless the field already has one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in errors.field_errors() {
            if let Some(error) = errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        fields
    }
}

#[derive(Debug, Error, PartialEq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(FieldErrors),

    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        FormError::Validation(errors.into())
    }
}

impl FormError {
    pub fn invalid(field: &'static str, message: &'static str) -> Self {
        FormError::Invalid { field, message }
    }

    /// Errors keyed by field, ready to show next to the inputs.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Validation(fields) => fields.clone(),
            FormError::Invalid { field, message } => {
                let mut fields = FieldErrors::new();
                fields.insert(*field, *message);
                fields
            }
        }
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub(crate) fn valid_document(value: &str) -> Result<(), ValidationError> {
    DocumentNumber::new(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("document"))
}

pub(crate) fn valid_phone(value: &str) -> Result<(), ValidationError> {
    PhoneNumber::new(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("phone"))
}

/// Parses `YYYY-MM-DD`.
pub(crate) fn parse_date(
    value: &str,
    field: &'static str,
    message: &'static str,
) -> Result<chrono::NaiveDate, FormError> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| FormError::invalid(field, message))
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub(crate) fn parse_time(
    value: &str,
    field: &'static str,
    message: &'static str,
) -> Result<chrono::NaiveTime, FormError> {
    let value = value.trim();
    chrono::NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| FormError::invalid(field, message))
}
