//! Domain models for ingredient selections, order lines, and catalogs.

use serde::{Deserialize, Serialize};

/// Opaque identity for a rendered row, stable across re-renders.
///
/// Mutations are addressed through these keys with the live index resolved at
/// action time, so a row captured by the UI can never go stale against the
/// underlying list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(u64);

impl EntryKey {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// One chosen ingredient on the burger form. Duplicates are permitted; the
/// same ingredient selected twice produces two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedIngredient {
    pub id: String,
    pub name: String,
}

/// One line of an order: a burger plus how many of it.
///
/// `burger_name` and `unit_price` are resolved from the catalog when the line
/// is created and kept on the line so it still renders after the catalog
/// entry disappears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub burger_id: String,
    pub burger_name: String,
    pub quantity: u32,
    #[serde(rename = "price")]
    pub unit_price: f64,
}

/// An "available ingredient" control offered by the embedding environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientOption {
    pub id: String,
    pub name: String,
}

/// A burger offered for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurgerOption {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Lookup over the burgers available for ordering, preserving the order the
/// embedding environment listed them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BurgerCatalog {
    entries: Vec<BurgerOption>,
}

impl BurgerCatalog {
    pub fn new(entries: Vec<BurgerOption>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BurgerOption] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Resolve a burger by id. Linear scan; catalogs are page-sized.
    pub fn lookup(&self, burger_id: &str) -> Option<&BurgerOption> {
        self.entries.iter().find(|entry| entry.id == burger_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_finds_by_id() {
        let catalog = BurgerCatalog::new(vec![
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
        ]);
        assert_eq!(catalog.lookup("2").map(|b| b.name.as_str()), Some("Double"));
        assert!(catalog.lookup("9").is_none());
    }

    #[test]
    fn order_line_serde_uses_price_field_name() {
        let line = OrderLine {
            burger_id: "1".into(),
            burger_name: "Classic".into(),
            quantity: 2,
            unit_price: 3.5,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["price"], serde_json::json!(3.5));
        assert!(json.get("unit_price").is_none());
    }
}
