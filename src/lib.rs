pub mod orbit;
pub mod render;

// Host page: products, selection owner, settings
pub mod catalog;
pub mod config;
pub mod showcase;

#[cfg(feature = "icons")]
pub mod icons;
