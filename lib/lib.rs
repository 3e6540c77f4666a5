//! gitiles-browse shared library.

/// Navigation state and background fetch dispatch.
pub mod browser;
pub mod service;
pub mod view;
