//! Hidden-field materialization and form encoding.
//!
//! At submission time each controller clears its previously generated fields
//! and emits fresh ones into a shared [`HiddenFieldSet`]. The set preserves
//! emission order so repeated field names arrive at the backend as
//! index-aligned arrays, exactly as a browser would post them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use url::form_urlencoded;

/// Field name the backend reads the selected ingredient ids from.
pub const INGREDIENT_IDS_FIELD: &str = "ingredient_ids";
/// Field name carrying the ordered burger ids of an order.
pub const ITEM_BURGER_IDS_FIELD: &str = "item_burger_ids";
/// Field name carrying the quantities parallel to [`ITEM_BURGER_IDS_FIELD`].
pub const ITEM_QUANTITIES_FIELD: &str = "item_quantities";

/// One generated hidden field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Ordered collection of hidden fields backing a form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenFieldSet {
    fields: Vec<HiddenField>,
}

impl HiddenFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All fields in emission order.
    pub fn fields(&self) -> &[HiddenField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop every field carrying one of the given names. Controllers call
    /// this before re-emitting so stale fields from an earlier submission
    /// attempt never linger.
    pub fn clear_named(&mut self, names: &[&str]) {
        self.fields.retain(|field| !names.contains(&field.name.as_str()));
    }

    /// Append a field at the end of the emission order.
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.fields.push(HiddenField {
            name: name.to_owned(),
            value: value.into(),
        });
    }

    /// Values of every field with the given name, in emission order.
    pub fn values_of(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.name == name)
            .map(|field| field.value.as_str())
            .collect()
    }

    /// Encode the set as an `application/x-www-form-urlencoded` body,
    /// preserving field order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for field in &self.fields {
            serializer.append_pair(&field.name, &field.value);
        }
        serializer.finish()
    }
}

/// Writes encoded submission bodies to disk. Stands in for the browser's
/// form post; the receiving backend stays an external collaborator.
#[derive(Debug, Clone)]
pub struct SubmissionWriter {
    output_dir: PathBuf,
}

impl SubmissionWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist the encoded body under `output_dir`, creating it as needed.
    /// Returns the written path.
    pub fn write(&self, file_stem: &str, fields: &HiddenFieldSet) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create submission directory {}",
                self.output_dir.display()
            )
        })?;
        let path = self.output_dir.join(format!("{file_stem}.urlencoded"));
        fs::write(&path, fields.encode())
            .with_context(|| format!("failed to write submission body to {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_preserves_emission_order() {
        let mut fields = HiddenFieldSet::new();
        fields.push(ITEM_BURGER_IDS_FIELD, "1");
        fields.push(ITEM_QUANTITIES_FIELD, "2");
        fields.push(ITEM_BURGER_IDS_FIELD, "2");
        fields.push(ITEM_QUANTITIES_FIELD, "1");

        assert_eq!(
            fields.encode(),
            "item_burger_ids=1&item_quantities=2&item_burger_ids=2&item_quantities=1"
        );
    }

    #[test]
    fn clear_named_removes_only_matching_fields() {
        let mut fields = HiddenFieldSet::new();
        fields.push(INGREDIENT_IDS_FIELD, "5");
        fields.push(ITEM_BURGER_IDS_FIELD, "1");
        fields.clear_named(&[INGREDIENT_IDS_FIELD]);

        assert!(fields.values_of(INGREDIENT_IDS_FIELD).is_empty());
        assert_eq!(fields.values_of(ITEM_BURGER_IDS_FIELD), vec!["1"]);
    }

    #[test]
    fn encode_escapes_reserved_characters() {
        let mut fields = HiddenFieldSet::new();
        fields.push(INGREDIENT_IDS_FIELD, "a b&c");
        assert_eq!(fields.encode(), "ingredient_ids=a+b%26c");
    }

    #[test]
    fn writer_persists_encoded_body() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SubmissionWriter::new(dir.path().join("out"));

        let mut fields = HiddenFieldSet::new();
        fields.push(INGREDIENT_IDS_FIELD, "5");
        let path = writer.write("burger-test", &fields).unwrap();

        let body = std::fs::read_to_string(path).unwrap();
        assert_eq!(body, "ingredient_ids=5");
    }
}
