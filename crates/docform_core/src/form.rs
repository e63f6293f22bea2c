//! Collaborator contracts for the page hosting the form.
//!
//! # Responsibility
//! - Describe how core reads and writes form fields by stable id.
//! - Describe the optional preview regions core may reveal.
//! - Provide in-memory implementations for DOM-less callers and tests.
//!
//! # Invariants
//! - File-typed fields expose no text value to core and are never written.

use std::collections::BTreeMap;

/// Input type of one form field, as far as persistence cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    File,
}

/// Form fields addressable by stable string id.
pub trait FormFields {
    /// Ids of all fields currently on the form.
    fn field_ids(&self) -> Vec<String>;
    /// Returns `None` when no field has this id.
    fn field_kind(&self, field_id: &str) -> Option<FieldKind>;
    fn value(&self, field_id: &str) -> Option<String>;
    /// Sets a field value. Unknown ids are ignored.
    fn set_value(&mut self, field_id: &str, value: &str);
}

/// Display surface with optional regions, e.g. `signaturePreview`.
pub trait PreviewSurface {
    /// Makes `region` visible with `markup` as its content.
    ///
    /// Pages without the region ignore the call.
    fn show(&mut self, region: &str, markup: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldEntry {
    kind: FieldKind,
    value: String,
}

/// Form model held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryForm {
    fields: BTreeMap<String, FieldEntry>,
}

impl InMemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a text field.
    pub fn with_text(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_field(field_id, FieldKind::Text, value);
        self
    }

    /// Adds (or replaces) a file field; `value` mimics the picked file name.
    pub fn with_file(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_field(field_id, FieldKind::File, value);
        self
    }

    pub fn add_field(
        &mut self,
        field_id: impl Into<String>,
        kind: FieldKind,
        value: impl Into<String>,
    ) {
        self.fields.insert(
            field_id.into(),
            FieldEntry {
                kind,
                value: value.into(),
            },
        );
    }
}

impl FormFields for InMemoryForm {
    fn field_ids(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn field_kind(&self, field_id: &str) -> Option<FieldKind> {
        self.fields.get(field_id).map(|entry| entry.kind)
    }

    fn value(&self, field_id: &str) -> Option<String> {
        self.fields.get(field_id).map(|entry| entry.value.clone())
    }

    fn set_value(&mut self, field_id: &str, value: &str) {
        if let Some(entry) = self.fields.get_mut(field_id) {
            entry.value = value.to_string();
        }
    }
}

/// Preview surface that records the last markup per region.
#[derive(Debug, Clone, Default)]
pub struct RecordingPreview {
    regions: BTreeMap<String, String>,
}

impl RecordingPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last markup shown in `region`, if it was ever revealed.
    pub fn markup(&self, region: &str) -> Option<&str> {
        self.regions.get(region).map(String::as_str)
    }

    pub fn is_visible(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }
}

impl PreviewSurface for RecordingPreview {
    fn show(&mut self, region: &str, markup: &str) {
        self.regions.insert(region.to_string(), markup.to_string());
    }
}
