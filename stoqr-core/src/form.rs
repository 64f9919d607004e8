//! Create-item form state and validation

use std::fmt;

use thiserror::Error;

use crate::item::NewItem;

/// Form inputs in tab order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormField {
    #[default]
    Name,
    Desired,
    Actual,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Desired, FormField::Actual];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Desired => "Desired",
            FormField::Actual => "Actual",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::Desired,
            FormField::Desired => FormField::Actual,
            FormField::Actual => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Name => FormField::Actual,
            FormField::Desired => FormField::Name,
            FormField::Actual => FormField::Desired,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the form cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    EmptyName,

    #[error("{field} must be a whole number of 0 or more, got '{value}'")]
    InvalidCount { field: FormField, value: String },
}

impl FormError {
    /// The input to focus so the user can fix it
    pub fn field(&self) -> FormField {
        match self {
            FormError::EmptyName => FormField::Name,
            FormError::InvalidCount { field, .. } => *field,
        }
    }
}

/// Raw text of the create form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub name: String,
    pub desired: String,
    pub actual: String,
    pub focus: FormField,
    pub error: Option<FormError>,
}

impl CreateForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Desired => &self.desired,
            FormField::Actual => &self.actual,
        }
    }

    /// Replace one input's text. Clears a stale error.
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Desired => self.desired = value,
            FormField::Actual => self.actual = value,
        }
        self.error = None;
    }

    /// Build the create payload. Empty counts default to 0.
    pub fn validate(&self) -> Result<NewItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        let desired = parse_count(FormField::Desired, &self.desired)?;
        let actual = parse_count(FormField::Actual, &self.actual)?;

        Ok(NewItem::new(name, desired, actual))
    }
}

fn parse_count(field: FormField, raw: &str) -> Result<u32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>().map_err(|_| FormError::InvalidCount {
        field,
        value: raw.to_string(),
    })
}
