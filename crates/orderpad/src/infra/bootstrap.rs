//! Bootstrap payload supplied by the embedding environment.
//!
//! The catalogs and optional edit-mode lists the host used to inject as
//! ambient page data arrive here as one explicit JSON document, handed to the
//! controllers at construction time.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::model::{BurgerCatalog, BurgerOption, IngredientOption, OrderLine, SelectedIngredient};

/// Everything the forms need before the first render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bootstrap {
    /// Available-ingredient controls for the burger form.
    #[serde(default)]
    pub available_ingredients: Vec<IngredientOption>,
    /// Burger catalog for the order form.
    #[serde(default)]
    pub available_burgers: Vec<BurgerOption>,
    /// Pre-existing ingredient selection (edit mode).
    #[serde(default)]
    pub initial_ingredients: Vec<SelectedIngredient>,
    /// Pre-existing order lines (edit mode).
    #[serde(default)]
    pub initial_order_items: Vec<OrderLine>,
}

impl Bootstrap {
    /// Load a payload from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read bootstrap payload at {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("invalid bootstrap payload in {}", path.display()))
    }

    /// Catalog view over the available burgers.
    pub fn burger_catalog(&self) -> BurgerCatalog {
        BurgerCatalog::new(self.available_burgers.clone())
    }

    /// Built-in payload used when no file is supplied, so the binary is
    /// usable out of the box.
    pub fn sample() -> Self {
        Self {
            available_ingredients: vec![
                ingredient("1", "Beef Patty"),
                ingredient("2", "Cheddar"),
                ingredient("3", "Lettuce"),
                ingredient("4", "Tomato"),
                ingredient("5", "Onion"),
                ingredient("6", "Pickles"),
                ingredient("7", "Bacon"),
            ],
            available_burgers: vec![
                burger("1", "Classic", 3.5),
                burger("2", "Double Stack", 5.25),
                burger("3", "Smoky BBQ", 4.75),
                burger("4", "Garden Veggie", 4.1),
            ],
            initial_ingredients: Vec::new(),
            initial_order_items: Vec::new(),
        }
    }
}

fn ingredient(id: &str, name: &str) -> IngredientOption {
    IngredientOption {
        id: id.to_owned(),
        name: name.to_owned(),
    }
}

fn burger(id: &str, name: &str, price: f64) -> BurgerOption {
    BurgerOption {
        id: id.to_owned(),
        name: name.to_owned(),
        price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn load_parses_full_payload() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{
                "available_ingredients": [{{"id": "1", "name": "Lettuce"}}],
                "available_burgers": [{{"id": "1", "name": "Classic", "price": 3.5}}],
                "initial_ingredients": [{{"id": "1", "name": "Lettuce"}}],
                "initial_order_items": [
                    {{"burger_id": "1", "burger_name": "Classic", "quantity": 2, "price": 3.5}}
                ]
            }}"#
        )?;

        let bootstrap = Bootstrap::load(file.path())?;
        assert_eq!(bootstrap.available_ingredients.len(), 1);
        assert_eq!(bootstrap.initial_order_items[0].quantity, 2);
        assert!((bootstrap.initial_order_items[0].unit_price - 3.5).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn load_defaults_missing_sections_to_empty() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{{}}")?;

        let bootstrap = Bootstrap::load(file.path())?;
        assert!(bootstrap.available_ingredients.is_empty());
        assert!(bootstrap.initial_order_items.is_empty());
        Ok(())
    }

    #[test]
    fn load_rejects_malformed_payloads() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "not json")?;
        assert!(Bootstrap::load(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn sample_payload_has_catalogs() {
        let bootstrap = Bootstrap::sample();
        assert!(!bootstrap.available_ingredients.is_empty());
        assert!(bootstrap.burger_catalog().lookup("1").is_some());
    }
}
