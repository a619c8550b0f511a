pub mod admin;
pub mod config;
pub mod model;
pub mod output;
pub mod scoring;
pub mod snapshot;
pub mod store;
pub mod tui;
