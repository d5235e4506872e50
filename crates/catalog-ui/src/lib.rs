//! Terminal UI layer for catalog charts.
//!
//! Provides themes, the header and share bar components, figure rendering,
//! and the gallery event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod figure_view;
pub mod themes;

pub use catalog_core as core;
