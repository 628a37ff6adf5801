//! Form input capability and an in-memory form.

use std::collections::HashMap;

/// Field identifiers used by the patient pages.
pub mod fields {
    pub const NAME: &str = "nome";
    pub const BIRTH_DATE: &str = "data_nascimento";
    /// Gender field on the create page
    pub const GENDER: &str = "genero";
    /// Gender field on the update page
    pub const SEX: &str = "sexo";
    pub const HEIGHT: &str = "altura";
    pub const WEIGHT: &str = "peso";
    pub const PATIENT_ID: &str = "id_paciente";
}

/// Read access to the form that triggered an operation.
pub trait FormReader {
    /// Current value of `field`, or `None` when the form has no such field.
    fn read(&self, field: &str) -> Option<String>;

    /// Clears every field back to empty.
    fn reset(&mut self);
}

/// A form held in memory, keyed by field identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }
}

impl FormReader for FormState {
    fn read(&self, field: &str) -> Option<String> {
        self.values.get(field).cloned()
    }

    fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }
}
