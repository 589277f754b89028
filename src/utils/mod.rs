//! Shared utilities for the gallery engine

pub mod error;

pub use error::{ArtgridError, Result};
