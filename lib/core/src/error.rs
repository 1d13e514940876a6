use thiserror::Error;

use crate::product::Catalog;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("product name cannot be empty")]
    EmptyName,

    #[error("product url cannot be empty (product {0:?})")]
    EmptyUrl(String),

    #[error("price cannot be negative: {price} (product {name:?})")]
    NegativePrice { name: String, price: f64 },

    #[error("quantity has already been set for product {0:?}")]
    QuantitySetTwice(String),

    #[error("product {name:?} is tagged {actual} but was supplied for catalog {expected}")]
    CatalogMismatch {
        name: String,
        expected: Catalog,
        actual: Catalog,
    },
}
