//! Request and response models

pub mod predict;
pub mod status;

pub use predict::*;
pub use status::*;
