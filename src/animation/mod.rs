pub mod anchor;
pub mod ease;
pub mod property;
pub mod step;
pub mod timeline;
