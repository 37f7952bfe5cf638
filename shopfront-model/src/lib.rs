//! Display payload and catalogue records shared across the storefront crates.
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod item;

pub use catalog::{Banner, Category, Product};
pub use error::{ModelError, Result as ModelResult};
pub use item::Item;
