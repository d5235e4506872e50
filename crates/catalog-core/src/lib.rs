//! Shared types for the catalog chart crates.
//!
//! Holds the normalized record model, the renderer-independent figure
//! description, the error type, CLI settings and number formatting helpers.

pub mod error;
pub mod figure;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{CatalogError, Result};
