//! # msgboard-core
//!
//! Core logic for the msgboard message dashboard.
//!
//! This crate provides:
//! - Date normalization and ordering for server-supplied date strings
//! - The filter coordinator that drives the message list
//! - An HTTP client for the message API
//! - The dashboard state record and its view projections
//! - Month grids for the full date picker

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod date;
mod error;
pub mod filter;

pub use api::{
    ApiClient, Catalog, DatabaseConfig, Message, RepairReport, RequestObserver, TracingObserver,
};
pub use config::ClientConfig;
pub use dashboard::{Connection, Dashboard, Dialog, Effect, Notice};
pub use date::{DateFormatter, DateToken, Normalized};
pub use error::{Error, Result};
pub use filter::{FetchPhase, FetchTicket, Selection, StalePolicy, TypeFilter};
