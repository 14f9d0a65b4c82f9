//! Row models returned by repository queries.
//!
//! These mirror the table layout exactly (links stay as their stored JSON text).
//! Conversion into the embedded read models in `crate::model` happens in `repo`.

use crate::model::Links;
use anyhow::{Context, Result};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub links: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub education: String,
    pub links: String,
}

pub(crate) fn decode_links(raw: &str) -> Result<Links> {
    if raw.trim().is_empty() {
        return Ok(Links::new());
    }
    serde_json::from_str(raw).with_context(|| format!("invalid links column: {raw}"))
}

pub(crate) fn encode_links(links: &Links) -> Result<String> {
    serde_json::to_string(links).context("failed to encode links")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_column_decodes_to_empty_map() {
        assert!(decode_links("").unwrap().is_empty());
        assert!(decode_links("{}").unwrap().is_empty());
    }

    #[test]
    fn non_string_values_are_rejected() {
        assert!(decode_links(r#"{"github": 1}"#).is_err());
    }
}
