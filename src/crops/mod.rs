//! Crop registry operations that sit on top of the repository rows.
pub mod analytics;
pub mod bulk;
pub mod export;
