//! Managing the line items of an order form.

use crate::app::submit::{HiddenFieldSet, ITEM_BURGER_IDS_FIELD, ITEM_QUANTITIES_FIELD};
use crate::domain::errors::FormError;
use crate::domain::model::{BurgerCatalog, EntryKey, OrderLine};

/// An order line paired with its stable row key.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub key: EntryKey,
    pub line: OrderLine,
}

/// Outcome of a successful add: either a brand new line or a merge into an
/// existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Appended(EntryKey),
    Merged { key: EntryKey, quantity: u32 },
}

impl AddOutcome {
    pub fn key(&self) -> EntryKey {
        match *self {
            AddOutcome::Appended(key) => key,
            AddOutcome::Merged { key, .. } => key,
        }
    }
}

/// Result of an in-place quantity edit. A rejected edit reports the stored
/// quantity so the display can revert; state is never mutated on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityEdit {
    Applied { quantity: u32 },
    Reverted { quantity: u32 },
}

/// Display-ready view of one line, with name and price resolved through the
/// live catalog and falling back to the values stored on the line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub key: EntryKey,
    pub burger_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Tracks the ordered line items of one order form.
///
/// Adding a burger already present merges quantities instead of creating a
/// second line; that merge is the only duplicate prevention. Every stored
/// line holds `quantity >= 1`.
#[derive(Debug, Default, Clone)]
pub struct OrderEditor {
    catalog: BurgerCatalog,
    rows: Vec<OrderRow>,
    next_key: u64,
}

impl OrderEditor {
    /// Create an editor over the given catalog with no lines.
    pub fn new(catalog: BurgerCatalog) -> Self {
        Self {
            catalog,
            rows: Vec::new(),
            next_key: 0,
        }
    }

    /// Create an editor seeded with pre-existing lines (edit mode). Seed
    /// lines with a quantity below 1 are dropped rather than stored.
    pub fn with_initial(catalog: BurgerCatalog, initial: Vec<OrderLine>) -> Self {
        let mut editor = Self::new(catalog);
        for line in initial {
            if line.quantity < 1 {
                tracing::warn!(burger_id = %line.burger_id, "dropping bootstrap line with zero quantity");
                continue;
            }
            editor.push_row(line);
        }
        editor
    }

    pub fn catalog(&self) -> &BurgerCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[OrderRow] {
        &self.rows
    }

    /// Live index of the row carrying `key`, if still present.
    pub fn position_of(&self, key: EntryKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }

    /// Add `quantity` of the burger identified by `burger_id`.
    ///
    /// Rejects empty ids and quantities below 1, and ids missing from the
    /// catalog; the list is left untouched in both cases. When a line for
    /// the id already exists the quantities merge, saturating at `u32::MAX`.
    pub fn add_item(&mut self, burger_id: &str, quantity: u32) -> Result<AddOutcome, FormError> {
        if burger_id.is_empty() || quantity < 1 {
            return Err(FormError::InvalidAddRequest);
        }
        let burger = self
            .catalog
            .lookup(burger_id)
            .ok_or_else(|| FormError::UnknownBurger(burger_id.to_owned()))?;

        if let Some(row) = self.rows.iter_mut().find(|row| row.line.burger_id == burger_id) {
            // Saturate rather than overflow when merging absurd quantities.
            row.line.quantity = row.line.quantity.saturating_add(quantity);
            return Ok(AddOutcome::Merged {
                key: row.key,
                quantity: row.line.quantity,
            });
        }

        let line = OrderLine {
            burger_id: burger.id.clone(),
            burger_name: burger.name.clone(),
            quantity,
            unit_price: burger.price,
        };
        let key = self.push_row(line);
        Ok(AddOutcome::Appended(key))
    }

    /// Set the quantity of the line at `position`. Quantities below 1 and
    /// out-of-bounds positions leave state unchanged; the returned value
    /// carries the quantity the display should show afterwards.
    pub fn update_quantity(&mut self, position: usize, new_quantity: u32) -> Option<QuantityEdit> {
        let row = self.rows.get_mut(position)?;
        if new_quantity >= 1 {
            row.line.quantity = new_quantity;
            Some(QuantityEdit::Applied {
                quantity: new_quantity,
            })
        } else {
            tracing::debug!(position, new_quantity, "reverting invalid quantity edit");
            Some(QuantityEdit::Reverted {
                quantity: row.line.quantity,
            })
        }
    }

    /// Remove the line at `position` in the current order.
    pub fn remove_at(&mut self, position: usize) -> Option<OrderLine> {
        if position >= self.rows.len() {
            tracing::debug!(position, len = self.rows.len(), "ignoring out-of-range removal");
            return None;
        }
        Some(self.rows.remove(position).line)
    }

    /// Remove the line carrying `key`, resolving its index at action time.
    pub fn remove(&mut self, key: EntryKey) -> bool {
        match self.position_of(key) {
            Some(position) => self.remove_at(position).is_some(),
            None => false,
        }
    }

    /// Display views for every line, in display order. Name and price come
    /// from the live catalog when the entry is still resolvable, otherwise
    /// from the values stored on the line.
    pub fn line_views(&self) -> Vec<LineView> {
        self.rows
            .iter()
            .map(|row| {
                let (name, unit_price) = match self.catalog.lookup(&row.line.burger_id) {
                    Some(burger) => (burger.name.clone(), burger.price),
                    None => (row.line.burger_name.clone(), row.line.unit_price),
                };
                LineView {
                    key: row.key,
                    burger_id: row.line.burger_id.clone(),
                    quantity: row.line.quantity,
                    subtotal: row.line.quantity as f64 * unit_price,
                    name,
                    unit_price,
                }
            })
            .collect()
    }

    /// Sum of all line subtotals as currently displayed.
    pub fn order_total(&self) -> f64 {
        self.line_views().iter().map(|view| view.subtotal).sum()
    }

    /// Materialize the lines into hidden fields: previous
    /// `item_burger_ids`/`item_quantities` fields are cleared, then both are
    /// emitted per line so the two arrays stay index-aligned.
    pub fn prepare_submission(&self, fields: &mut HiddenFieldSet) {
        fields.clear_named(&[ITEM_BURGER_IDS_FIELD, ITEM_QUANTITIES_FIELD]);
        for row in &self.rows {
            fields.push(ITEM_BURGER_IDS_FIELD, row.line.burger_id.clone());
            fields.push(ITEM_QUANTITIES_FIELD, row.line.quantity.to_string());
        }
    }

    fn push_row(&mut self, line: OrderLine) -> EntryKey {
        let key = EntryKey::new(self.next_key);
        self.next_key += 1;
        self.rows.push(OrderRow { key, line });
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::model::BurgerOption;

    fn catalog() -> BurgerCatalog {
        BurgerCatalog::new(vec![
            BurgerOption {
                id: "1".into(),
                name: "Classic".into(),
                price: 3.5,
            },
            BurgerOption {
                id: "2".into(),
                name: "Double".into(),
                price: 5.25,
            },
        ])
    }

    #[test]
    fn add_item_appends_with_resolved_name_and_price() {
        let mut editor = OrderEditor::new(catalog());
        let outcome = editor.add_item("1", 2).unwrap();

        assert!(matches!(outcome, AddOutcome::Appended(_)));
        let row = &editor.rows()[0];
        assert_eq!(row.line.burger_name, "Classic");
        assert_eq!(row.line.quantity, 2);
        assert!((row.line.unit_price - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn add_item_merges_quantity_for_existing_burger() {
        let mut editor = OrderEditor::new(catalog());
        editor.add_item("1", 2).unwrap();
        let outcome = editor.add_item("1", 1).unwrap();

        assert!(matches!(outcome, AddOutcome::Merged { quantity: 3, .. }));
        assert_eq!(editor.len(), 1);
        let view = &editor.line_views()[0];
        assert_eq!(view.quantity, 3);
        assert_eq!(format!("{:.2}", view.subtotal), "10.50");
    }

    #[test]
    fn add_item_merge_saturates_at_the_quantity_ceiling() {
        let mut editor = OrderEditor::new(catalog());
        editor.add_item("1", u32::MAX).unwrap();
        let outcome = editor.add_item("1", 1).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Merged {
                key: editor.rows()[0].key,
                quantity: u32::MAX,
            }
        );
        assert_eq!(editor.rows()[0].line.quantity, u32::MAX);
    }

    #[test]
    fn add_item_rejects_missing_selection_and_zero_quantity() {
        let mut editor = OrderEditor::new(catalog());
        assert_eq!(editor.add_item("", 1), Err(FormError::InvalidAddRequest));
        assert_eq!(editor.add_item("1", 0), Err(FormError::InvalidAddRequest));
        assert!(editor.is_empty());
    }

    #[test]
    fn add_item_rejects_unknown_burger() {
        let mut editor = OrderEditor::new(catalog());
        assert_eq!(
            editor.add_item("9", 1),
            Err(FormError::UnknownBurger("9".into()))
        );
        assert!(editor.is_empty());
    }

    #[test]
    fn update_quantity_applies_valid_edit_and_recomputes_subtotal() {
        let mut editor = OrderEditor::new(catalog());
        editor.add_item("2", 1).unwrap();

        let edit = editor.update_quantity(0, 4).unwrap();
        assert_eq!(edit, QuantityEdit::Applied { quantity: 4 });
        assert_eq!(format!("{:.2}", editor.line_views()[0].subtotal), "21.00");
    }

    #[test]
    fn update_quantity_reverts_zero_without_mutating() {
        let mut editor = OrderEditor::new(catalog());
        editor.add_item("1", 2).unwrap();

        let edit = editor.update_quantity(0, 0).unwrap();
        assert_eq!(edit, QuantityEdit::Reverted { quantity: 2 });
        assert_eq!(editor.rows()[0].line.quantity, 2);
    }

    #[test]
    fn update_quantity_out_of_bounds_is_a_no_op() {
        let mut editor = OrderEditor::new(catalog());
        editor.add_item("1", 2).unwrap();
        assert!(editor.update_quantity(3, 5).is_none());
        assert_eq!(editor.rows()[0].line.quantity, 2);
    }

    #[test]
    fn remove_by_key_survives_reordering() {
        let mut editor = OrderEditor::new(catalog());
        let first = editor.add_item("1", 1).unwrap().key();
        let second = editor.add_item("2", 1).unwrap().key();

        assert!(editor.remove(first));
        assert_eq!(editor.position_of(second), Some(0));
        assert!(editor.remove(second));
        assert!(!editor.remove(second));
    }

    #[test]
    fn line_views_fall_back_to_stored_values_when_catalog_entry_is_gone() {
        let stale = OrderLine {
            burger_id: "99".into(),
            burger_name: "Retired Special".into(),
            quantity: 2,
            unit_price: 4.0,
        };
        let editor = OrderEditor::with_initial(catalog(), vec![stale]);

        let view = &editor.line_views()[0];
        assert_eq!(view.name, "Retired Special");
        assert_eq!(format!("{:.2}", view.subtotal), "8.00");
    }

    #[test]
    fn with_initial_drops_zero_quantity_lines() {
        let bad = OrderLine {
            burger_id: "1".into(),
            burger_name: "Classic".into(),
            quantity: 0,
            unit_price: 3.5,
        };
        let editor = OrderEditor::with_initial(catalog(), vec![bad]);
        assert!(editor.is_empty());
    }

    #[test]
    fn prepare_submission_emits_index_aligned_parallel_arrays() {
        let mut editor = OrderEditor::new(catalog());
        editor.add_item("1", 2).unwrap();
        editor.add_item("2", 1).unwrap();

        let mut fields = HiddenFieldSet::new();
        editor.prepare_submission(&mut fields);

        assert_eq!(fields.values_of(ITEM_BURGER_IDS_FIELD), vec!["1", "2"]);
        assert_eq!(fields.values_of(ITEM_QUANTITIES_FIELD), vec!["2", "1"]);
    }

    #[test]
    fn order_total_sums_displayed_subtotals() {
        let mut editor = OrderEditor::new(catalog());
        editor.add_item("1", 2).unwrap();
        editor.add_item("2", 1).unwrap();
        assert_eq!(format!("{:.2}", editor.order_total()), "12.25");
    }
}
