//! # CodeScope Client
//!
//! reqwest-backed implementation of the analysis service seam, plus the
//! configuration that points it at a server.

pub mod config;
pub mod http;

pub use config::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS, SERVER_URL_ENV};
pub use http::HttpAnalysisService;
