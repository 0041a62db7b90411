//! Managing the ordered ingredient selection of a burger form.

use crate::app::submit::{HiddenFieldSet, INGREDIENT_IDS_FIELD};
use crate::domain::model::{EntryKey, SelectedIngredient};

/// A selected ingredient paired with its stable row key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub key: EntryKey,
    pub ingredient: SelectedIngredient,
}

/// Tracks the ordered, possibly-repeating ingredient list of one burger form.
///
/// Insertion order is both the display order and the submission order.
/// Duplicates are allowed; selecting the same ingredient twice yields two
/// independent rows with distinct keys.
#[derive(Debug, Default, Clone)]
pub struct IngredientSelector {
    rows: Vec<IngredientRow>,
    next_key: u64,
}

impl IngredientSelector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector seeded with a pre-existing selection (edit mode).
    pub fn with_initial(initial: Vec<SelectedIngredient>) -> Self {
        let mut selector = Self::new();
        for ingredient in initial {
            selector.push_row(ingredient);
        }
        selector
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[IngredientRow] {
        &self.rows
    }

    /// Append an ingredient at the end of the list. No validation beyond
    /// what the available-ingredient controls already guarantee.
    pub fn add(&mut self, id: impl Into<String>, name: impl Into<String>) -> EntryKey {
        self.push_row(SelectedIngredient {
            id: id.into(),
            name: name.into(),
        })
    }

    /// Remove the entry at `position` in the current order.
    pub fn remove_at(&mut self, position: usize) -> Option<SelectedIngredient> {
        if position >= self.rows.len() {
            tracing::debug!(position, len = self.rows.len(), "ignoring out-of-range removal");
            return None;
        }
        Some(self.rows.remove(position).ingredient)
    }

    /// Remove the entry carrying `key`, resolving its index at action time.
    /// Returns `false` when the key no longer exists.
    pub fn remove(&mut self, key: EntryKey) -> bool {
        match self.position_of(key) {
            Some(position) => self.remove_at(position).is_some(),
            None => false,
        }
    }

    /// Live index of the row carrying `key`, if still present.
    pub fn position_of(&self, key: EntryKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }

    /// Materialize the selection into hidden fields: previously generated
    /// `ingredient_ids` fields are cleared, then one is emitted per entry in
    /// display order.
    pub fn prepare_submission(&self, fields: &mut HiddenFieldSet) {
        fields.clear_named(&[INGREDIENT_IDS_FIELD]);
        for row in &self.rows {
            fields.push(INGREDIENT_IDS_FIELD, row.ingredient.id.clone());
        }
    }

    fn push_row(&mut self, ingredient: SelectedIngredient) -> EntryKey {
        let key = EntryKey::new(self.next_key);
        self.next_key += 1;
        self.rows.push(IngredientRow { key, ingredient });
        key
    }
}
