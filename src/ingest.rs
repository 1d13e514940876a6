//! Catalog ingestion: loads raw scraped product dumps and normalizes
//! them into [`Product`] records.
//!
//! Each store exports a JSON array of loosely structured product objects.
//! Records missing a name or url, or carrying a negative price, are
//! skipped with a warning rather than aborting the whole load.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use shelfmatch_core::{Catalog, Nutrition, Product, Quantity};
use tracing::{info, warn};

/// One raw product object as the store dumps export it. Everything
/// beyond name, url and price is optional.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub name: String,
    pub url: String,
    /// Absent for some scraped records; an unpriced product is invalid
    /// and gets skipped, never defaulted.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub producer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub storage_conditions: Option<String>,
    /// Piece count, for products sold by unit.
    #[serde(default)]
    pub pieces: Option<u32>,
    /// Net weight in grams.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Net volume in millilitres.
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
}

/// What a catalog load did: how many records survived normalization.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    pub catalog: Catalog,
    pub loaded: usize,
    pub skipped: usize,
}

/// Load one store's JSON dump and normalize it into catalog records.
///
/// Records that fail validation are dropped individually; an unreadable
/// or malformed file fails the whole load.
pub fn load_catalog(path: &Path, catalog: Catalog) -> anyhow::Result<(Vec<Product>, IngestReport)> {
    let content = fs::read_to_string(path)?;
    let raw: Vec<RawProduct> = serde_json::from_str(&content)?;
    let total = raw.len();

    let mut products = Vec::with_capacity(total);
    for record in raw {
        match normalize(record, catalog) {
            Ok(product) => products.push(product),
            Err(err) => {
                warn!(%catalog, %err, "skipping invalid product record");
            }
        }
    }

    let report = IngestReport {
        catalog,
        loaded: products.len(),
        skipped: total - products.len(),
    };
    info!(
        %catalog,
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "catalog loaded"
    );
    Ok((products, report))
}

fn normalize(raw: RawProduct, catalog: Catalog) -> anyhow::Result<Product> {
    let price = raw
        .price
        .ok_or_else(|| anyhow::anyhow!("product {:?} has no price", raw.name))?;
    let mut product = Product::new(raw.name, raw.url, price, catalog)?;
    product.producer = raw.producer;
    product.description = raw.description;
    product.storage_conditions = raw.storage_conditions;
    product.nutrition = raw.nutrition;

    // a dump may carry several quantity hints; pieces win, then weight
    if let Some(pieces) = raw.pieces {
        product.set_quantity(Quantity::Pieces(pieces))?;
    } else if let Some(weight) = raw.weight {
        product.set_quantity(Quantity::Weight(weight))?;
    } else if let Some(volume) = raw.volume {
        product.set_quantity(Quantity::Volume(volume))?;
    }
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dump(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_valid_records_and_skips_broken_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(
            &dir,
            "store_a.json",
            r#"[
                {"name": "Mléko polotučné 1l", "url": "http://a/1", "price": 24.9, "volume": 1000.0},
                {"name": "", "url": "http://a/2", "price": 10.0},
                {"name": "Jablka Gala", "url": "http://a/3", "price": -5.0}
            ]"#,
        );

        let (products, report) = load_catalog(&path, Catalog::A).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(products[0].name(), "Mléko polotučné 1l");
        assert_eq!(products[0].quantity(), Some(Quantity::Volume(1000.0)));
    }

    #[test]
    fn unpriced_records_are_skipped_not_defaulted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(
            &dir,
            "store_a.json",
            r#"[
                {"name": "Mleko bez ceny", "url": "http://a/1"},
                {"name": "Mleko", "url": "http://a/2", "price": 19.9}
            ]"#,
        );

        let (products, report) = load_catalog(&path, Catalog::A).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(products[0].name(), "Mleko");
        assert!(products.iter().all(|p| p.price() > 0.0));
    }

    #[test]
    fn pieces_take_precedence_over_weight() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(
            &dir,
            "store_b.json",
            r#"[{"name": "Rohlík", "url": "http://b/1", "price": 2.5, "pieces": 10, "weight": 430.0}]"#,
        );

        let (products, _) = load_catalog(&path, Catalog::B).unwrap();
        assert_eq!(products[0].quantity(), Some(Quantity::Pieces(10)));
    }

    #[test]
    fn malformed_json_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(&dir, "broken.json", "{not json");
        assert!(load_catalog(&path, Catalog::C).is_err());
    }

    #[test]
    fn optional_fields_survive_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dump(
            &dir,
            "store_c.json",
            r#"[{
                "name": "Jogurt bílý",
                "url": "http://c/1",
                "price": 12.9,
                "producer": "Madeta",
                "storage_conditions": "do 8 °C",
                "nutrition": {"energy_kj": 270.0, "protein": 4.1}
            }]"#,
        );

        let (products, _) = load_catalog(&path, Catalog::C).unwrap();
        let product = &products[0];
        assert_eq!(product.producer.as_deref(), Some("Madeta"));
        let nutrition = product.nutrition.as_ref().unwrap();
        assert_eq!(nutrition.energy_kj, Some(270.0));
        assert_eq!(nutrition.protein, Some(4.1));
        assert!(nutrition.fat.is_none());
    }
}
