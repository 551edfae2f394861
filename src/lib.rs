pub mod config;
pub mod definition;
pub mod demo;
pub mod host;
pub mod logging;
pub mod menu;
pub mod picker;
