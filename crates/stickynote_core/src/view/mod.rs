//! Framework-independent view projections.

pub mod render;
