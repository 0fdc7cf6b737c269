//! REST API client module for the Study Bot web backend.
//!
//! This module provides the `ApiClient` for the two endpoints the admin
//! dashboard talks to:
//!
//! - `GET /api/stats` for the aggregated usage statistics
//! - `POST /api/broadcast` for sending one message to every bot user

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
