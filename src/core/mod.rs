pub mod builder;
pub mod config;
pub mod constants;
pub mod coords;
pub mod dashboard;
pub mod geo;
pub mod map;
pub mod registry;
pub mod viewport;
