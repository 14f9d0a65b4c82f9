//! Personal portfolio data API: skills, projects and a profile stored in
//! SQLite, served as JSON over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;
pub mod validate;
