//! Carteira - personal finance reports from the command line
//!
//! This library turns the JSON payloads of a personal-finance REST backend
//! into statements, budget and goal progress, category rankings and monthly
//! summaries, formatted in Mozambican Portuguese with meticais by default.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: Wire record types and their conversion into models
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, goals)
//! - `reports`: Pure aggregation (grouping, progress, ranking, summaries)
//! - `display`: Currency formatting and terminal views
//! - `export`: JSON, YAML and CSV writers
//! - `storage`: Session cache and payload loading
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use carteira_cli::config::{paths::CarteiraPaths, settings::Settings};
//!
//! let paths = CarteiraPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{CarteiraError, CarteiraResult};
