pub mod context;
pub mod host;
pub mod presets;
pub mod section;
pub mod smooth;
pub mod spy;
