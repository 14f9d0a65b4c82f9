//! Database module: row models and SQL repositories.
//!
//! - `model`: rows exactly as stored, plus the links column codec.
//! - `repo`: SQL-only functions that map rows into the embedded read models
//!   from `crate::model`.
//!
//! External modules import from `portfolio_api::db`; the repository API is
//! re-exported here.

pub mod model;
pub mod repo;

pub use repo::*;
