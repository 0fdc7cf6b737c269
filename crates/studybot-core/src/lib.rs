//! Core library for the Study Bot admin dashboard.
//!
//! This crate holds everything the dashboard front-ends share:
//!
//! - `api`: HTTP client for the bot's `/api/stats` and `/api/broadcast` endpoints
//! - `models`: wire types for those endpoints
//! - `charts`: chart specifications and the one-chart-per-canvas registry
//! - `dashboard`: the dashboard session, its view model and poll timer
//! - `locale`: user-facing strings (Arabic and English)
//! - `config`: on-disk configuration with environment overrides

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod locale;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use dashboard::DashboardSession;
pub use locale::Locale;
