//! SB Account Importer
//!
//! Reads savings-bank ("SB") account rows from an Excel workbook and
//! reconciles them into Postgres: one user and one account per row,
//! idempotent on re-run.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `import`: Row gating and reconciliation.
//! - `models`: Candidate records and batch defaults.
//! - `normalize`: Cell-cleaning helpers.
//! - `sheet`: Workbook extraction and column layout.
//! - `store`: Persistence capability and Postgres implementation.

pub mod config;
pub mod db;
pub mod errors;
pub mod import;
pub mod models;
pub mod normalize;
pub mod sheet;
pub mod store;
