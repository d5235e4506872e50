//! Data layer for the catalog charts.
//!
//! Loads and normalizes the catalog CSV, counts keys and tags, and turns the
//! counts into the named chart views.

pub mod analysis;
pub mod frequency;
pub mod reader;
pub mod views;

pub use catalog_core as core;
