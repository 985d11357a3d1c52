//! # arxiv-papers
//!
//! Finds arXiv papers by a list of people, per subject category and
//! submission window, and exports them to CSV.
//!
//! ## Modules
//!
//! - [`models`] - People, category queries, run configuration and papers
//! - [`query`] - arXiv search query construction
//! - [`arxiv`] - Rate-limited arXiv API client
//! - [`parser`] - Feed entry to paper conversion
//! - [`pipeline`] - Runs all queries and deduplicates the results
//! - [`config`] - TOML configuration loading
//! - [`export`] - CSV output
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use arxiv_papers::{arxiv::{ArxivClient, ClientOptions}, config, models::Configuration, pipeline};
//! use chrono::NaiveDate;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let queries = config::load_category_queries(Path::new("config.toml"))?;
//!     let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default();
//!     let end = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap_or_default();
//!     let client = ArxivClient::new(ClientOptions::default())?;
//!     let papers = pipeline::arxiv_papers(&client, &Configuration::new(queries, start, end)).await?;
//!     println!("Found {} papers", papers.len());
//!     Ok(())
//! }
//! ```

pub mod arxiv;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod query;

pub use error::{PapersError, Result};
