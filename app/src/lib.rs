/// Crafty application core
///
/// Crafty is a social app for sharing DIY reuse ideas for packaging
/// materials: makers post a description, the materials involved and an
/// optional photo; everyone else browses the feed, searches posts by
/// material tags, and can point the camera at an item to get its material
/// category suggested.
///
/// # Modules
///
/// - `app`: wiring of clients, services and screens
/// - `config`: configuration management
/// - `db`: store seams and repositories over the remote document collection
/// - `detect`: object-detection adapter and material suggestions
/// - `error`: error types and handling
/// - `models`: typed records with the remote-document parsing boundary
/// - `screens`: per-screen interaction state and orchestration
/// - `search`: material-tag search/filter engine
/// - `services`: business logic layer
/// - `telemetry`: tracing setup for app shells
pub mod app;
pub mod config;
pub mod db;
pub mod detect;
pub mod error;
pub mod models;
pub mod screens;
pub mod search;
pub mod services;
pub mod telemetry;

pub use app::Crafty;
pub use config::Config;
pub use error::{AppError, Result};
