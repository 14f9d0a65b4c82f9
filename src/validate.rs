//! Field-level validation run before any write reaches the store.
//!
//! Every check appends to a `ValidationErrors` map instead of returning early,
//! so callers get all failing fields at once.

use crate::model::{NewProfile, NewProject, ProfileFields};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const SKILL_NAME_MAX: usize = 80;
pub const PROJECT_TITLE_MAX: usize = 200;
pub const PROFILE_NAME_MAX: usize = 150;
pub const EMAIL_MAX: usize = 254;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_EMAIL: &str = "Enter a valid email address.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email regex compiles")
});

/// Per-field error messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Non-blank text of at most `max` characters.
fn check_text(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, MSG_BLANK);
    } else if value.chars().count() > max {
        errors.add(field, too_long(max));
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", MSG_BLANK);
        return;
    }
    if email.chars().count() > EMAIL_MAX {
        errors.add("email", too_long(EMAIL_MAX));
    }
    if !is_valid_email(email) {
        errors.add("email", MSG_EMAIL);
    }
}

pub fn check_skill_name(errors: &mut ValidationErrors, name: &str) {
    check_text(errors, "name", name, SKILL_NAME_MAX);
}

pub fn check_new_project(errors: &mut ValidationErrors, project: &NewProject) {
    check_text(errors, "title", &project.title, PROJECT_TITLE_MAX);
}

pub fn check_profile_fields(errors: &mut ValidationErrors, fields: &ProfileFields) {
    check_text(errors, "name", &fields.name, PROFILE_NAME_MAX);
    check_email(errors, &fields.email);
}

pub fn check_new_profile(errors: &mut ValidationErrors, profile: &NewProfile) {
    check_text(errors, "name", &profile.name, PROFILE_NAME_MAX);
    check_email(errors, &profile.email);
}
