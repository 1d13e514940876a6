use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Maximum length of a [`Product::file_key`] in characters.
///
/// Keys are plain ASCII after stripping, so this is also a byte cap.
pub const FILE_KEY_MAX_LEN: usize = 64;

/// Source catalog tag - one per scraped store.
///
/// The ordering `A < B < C` is fixed and is used as the deterministic
/// tie-break whenever two catalogs have the same record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Catalog {
    A,
    B,
    C,
}

impl Catalog {
    /// All catalog tags in their fixed ordering.
    pub const ALL: [Catalog; 3] = [Catalog::A, Catalog::B, Catalog::C];
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Catalog::A => write!(f, "A"),
            Catalog::B => write!(f, "B"),
            Catalog::C => write!(f, "C"),
        }
    }
}

/// Unit classification of a product, set at most once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Piece count, e.g. "6 eggs".
    Pieces(u32),
    /// Net weight in grams.
    Weight(f64),
    /// Volume in millilitres.
    Volume(f64),
}

/// Nutrition facts per 100 g / 100 ml, carried through for downstream
/// consumers only - never consulted by the matching engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_kj: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_kcal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

/// A normalized product record - the common shape all three stores are
/// mapped into.
///
/// `name`, `url`, `price` and `catalog` are immutable after construction.
/// The optional descriptive fields can be filled in afterwards by the
/// adapter layer; none of them participate in matching.
///
/// `name_tokens` is derived exactly once at construction and is the single
/// source of truth for tokenization, shared by the catalog index and the
/// substring-overlap metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    name: String,
    url: String,
    price: f64,
    catalog: Catalog,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,

    #[serde(skip)]
    name_tokens: Vec<String>,
    #[serde(skip)]
    file_key: String,
}

impl Product {
    /// Create a validated product record.
    ///
    /// Fails when `name` or `url` is empty or `price` is negative; these
    /// invariants are relied upon by every downstream component.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        price: f64,
        catalog: Catalog,
    ) -> Result<Self> {
        let name = name.into();
        let url = url.into();

        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if url.is_empty() {
            return Err(Error::EmptyUrl(name));
        }
        if price < 0.0 {
            return Err(Error::NegativePrice { name, price });
        }

        let name_tokens = tokenize(&name);
        let file_key = file_key(&name);

        Ok(Self {
            name,
            url,
            price,
            catalog,
            producer: None,
            description: None,
            storage_conditions: None,
            quantity: None,
            nutrition: None,
            name_tokens,
            file_key,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// Lower-cased whitespace-split tokens of `name`, computed once at
    /// construction.
    #[inline]
    pub fn name_tokens(&self) -> &[String] {
        &self.name_tokens
    }

    /// Sanitized, diacritic-stripped, length-capped form of `name`, used
    /// only to identify output artifacts.
    #[inline]
    pub fn file_key(&self) -> &str {
        &self.file_key
    }

    #[inline]
    pub fn quantity(&self) -> Option<Quantity> {
        self.quantity
    }

    /// Set the unit classification. A record carries at most one quantity;
    /// a second call is an adapter bug and is rejected.
    pub fn set_quantity(&mut self, quantity: Quantity) -> Result<()> {
        if self.quantity.is_some() {
            return Err(Error::QuantitySetTwice(self.name.clone()));
        }
        self.quantity = Some(quantity);
        Ok(())
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.name, self.catalog, self.url)
    }
}

/// Split a product name into lower-cased whitespace-delimited tokens.
///
/// No stemming and no punctuation stripping beyond the whitespace split;
/// the raw scraped names are compared as-is.
pub fn tokenize(name: &str) -> Vec<String> {
    name.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Derive a file-system-safe artifact key from a product name.
///
/// Decomposes the name (NFD), drops combining marks and anything else that
/// is not ASCII alphanumeric, collapses whitespace runs into single
/// underscores and caps the length at [`FILE_KEY_MAX_LEN`].
fn file_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.nfd() {
        for lc in ch.to_lowercase() {
            if lc.is_ascii_alphanumeric() {
                out.push(lc);
            } else if lc.is_whitespace() && !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out.truncate(FILE_KEY_MAX_LEN);
    if out.is_empty() {
        out.push_str("product");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_validates_invariants() {
        assert!(matches!(
            Product::new("", "http://a/1", 1.0, Catalog::A),
            Err(Error::EmptyName)
        ));
        assert!(matches!(
            Product::new("Mleko", "", 1.0, Catalog::A),
            Err(Error::EmptyUrl(_))
        ));
        assert!(matches!(
            Product::new("Mleko", "http://a/1", -0.5, Catalog::A),
            Err(Error::NegativePrice { .. })
        ));
        assert!(Product::new("Mleko", "http://a/1", 0.0, Catalog::A).is_ok());
    }

    #[test]
    fn tokens_are_lowercased_and_whitespace_split() {
        let p = Product::new("Jablka  Gala 1kg", "http://a/1", 29.9, Catalog::A).unwrap();
        assert_eq!(p.name_tokens(), &["jablka", "gala", "1kg"]);
    }

    #[test]
    fn tokenizer_keeps_punctuation() {
        assert_eq!(tokenize("Coca-Cola 0,5l"), vec!["coca-cola", "0,5l"]);
    }

    #[test]
    fn quantity_can_only_be_set_once() {
        let mut p = Product::new("Vejce", "http://a/2", 49.9, Catalog::B).unwrap();
        p.set_quantity(Quantity::Pieces(6)).unwrap();
        assert!(matches!(
            p.set_quantity(Quantity::Weight(360.0)),
            Err(Error::QuantitySetTwice(_))
        ));
        assert_eq!(p.quantity(), Some(Quantity::Pieces(6)));
    }

    #[test]
    fn file_key_strips_diacritics_and_caps_length() {
        let p = Product::new("Mléko polotučné 1,5%", "http://a/3", 19.9, Catalog::A).unwrap();
        assert_eq!(p.file_key(), "mleko_polotucne_15");

        let long_name = "a".repeat(200);
        let p = Product::new(long_name, "http://a/4", 1.0, Catalog::A).unwrap();
        assert_eq!(p.file_key().len(), FILE_KEY_MAX_LEN);
    }

    #[test]
    fn file_key_never_empty() {
        let p = Product::new("???", "http://a/5", 1.0, Catalog::A).unwrap();
        assert_eq!(p.file_key(), "product");
    }

    #[test]
    fn catalog_ordering_is_fixed() {
        assert!(Catalog::A < Catalog::B);
        assert!(Catalog::B < Catalog::C);
    }
}
