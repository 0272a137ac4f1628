pub mod config;
pub mod form;
pub mod model;
pub mod relay;
