//! Operations shared by the HTTP handlers and the admin binary.
//!
//! Writes are validated in full (format, length, uniqueness, referenced ids)
//! before the store is touched.

use crate::error::{AppError, AppResult};
use crate::model::{
    NewProfile, NewProject, Profile, ProfileFields, ProfileUpdate, Project, SearchResults, Skill,
    SkillUsage,
};
use crate::store::PortfolioStore;
use crate::validate::{self, ValidationErrors, MSG_REQUIRED};
use tracing::{debug, info, instrument, warn};

pub const TOP_SKILLS_LIMIT: i64 = 20;

/// How a profile body is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `PATCH`: absent fields keep their stored value.
    Partial,
    /// `PUT`: `name` and `email` are required, other absent fields reset to defaults.
    Replace,
}

fn missing(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

#[instrument(skip(store))]
pub async fn create_skill(store: &dyn PortfolioStore, name: &str) -> AppResult<Skill> {
    let name = name.trim();
    let mut errors = ValidationErrors::new();
    validate::check_skill_name(&mut errors, name);
    if errors.is_empty() && store.skill_by_name(name).await?.is_some() {
        errors.add("name", "skill with this name already exists.");
    }
    errors.into_result()?;

    let skill = store.create_skill(name).await?;
    info!(id = skill.id, name = %skill.name, "skill created");
    Ok(skill)
}

#[instrument(skip_all)]
pub async fn create_project(store: &dyn PortfolioStore, mut project: NewProject) -> AppResult<Project> {
    project.title = project.title.trim().to_string();
    let mut errors = ValidationErrors::new();
    validate::check_new_project(&mut errors, &project);
    for skill_id in &project.skill_ids {
        if store.skill(*skill_id).await?.is_none() {
            errors.add("skills", missing(*skill_id));
        }
    }
    errors.into_result()?;

    let created = store.create_project(&project).await?;
    info!(id = created.id, title = %created.title, "project created");
    Ok(created)
}

#[instrument(skip_all)]
pub async fn create_profile(store: &dyn PortfolioStore, mut profile: NewProfile) -> AppResult<Profile> {
    profile.name = profile.name.trim().to_string();
    profile.email = profile.email.trim().to_string();
    profile.education = profile.education.trim().to_string();

    let mut errors = ValidationErrors::new();
    validate::check_new_profile(&mut errors, &profile);
    if !errors.has("email") && store.email_taken(&profile.email, None).await? {
        errors.add("email", "profile with this email already exists.");
    }
    for skill_id in &profile.skill_ids {
        if store.skill(*skill_id).await?.is_none() {
            errors.add("skills", missing(*skill_id));
        }
    }
    for project_id in &profile.project_ids {
        if store.project(*project_id).await?.is_none() {
            errors.add("projects", missing(*project_id));
        }
    }
    errors.into_result()?;

    let created = store.create_profile(&profile).await?;
    info!(id = created.id, email = %created.email, "profile created");
    Ok(created)
}

/// Merge `update` into the stored profile, validate the result and persist it.
#[instrument(skip(store, update))]
pub async fn update_profile(
    store: &dyn PortfolioStore,
    id: i64,
    update: ProfileUpdate,
    mode: UpdateMode,
) -> AppResult<Profile> {
    let current = store.profile(id).await?.ok_or(AppError::NotFound)?;
    let mut errors = ValidationErrors::new();

    if mode == UpdateMode::Replace {
        if update.name.is_none() {
            errors.add("name", MSG_REQUIRED);
        }
        if update.email.is_none() {
            errors.add("email", MSG_REQUIRED);
        }
    }

    let trimmed = |v: String| v.trim().to_string();
    let fields = match mode {
        UpdateMode::Partial => ProfileFields {
            name: update.name.map(trimmed).unwrap_or(current.name),
            email: update.email.map(trimmed).unwrap_or(current.email),
            education: update.education.map(trimmed).unwrap_or(current.education),
            links: update.links.unwrap_or(current.links),
        },
        UpdateMode::Replace => ProfileFields {
            name: update.name.map(trimmed).unwrap_or_default(),
            email: update.email.map(trimmed).unwrap_or_default(),
            education: update.education.map(trimmed).unwrap_or_default(),
            links: update.links.unwrap_or_default(),
        },
    };

    // Required-field errors already cover absent values.
    let mut format_errors = ValidationErrors::new();
    validate::check_profile_fields(&mut format_errors, &fields);
    for field in ["name", "email"] {
        if !errors.has(field) {
            for message in format_errors.messages(field) {
                errors.add(field, message.clone());
            }
        }
    }
    if !errors.has("email") && store.email_taken(&fields.email, Some(id)).await? {
        errors.add("email", "profile with this email already exists.");
    }
    errors.into_result()?;

    if !store.update_profile(id, &fields).await? {
        return Err(AppError::NotFound);
    }
    info!(id, ?mode, "profile updated");
    store.profile(id).await?.ok_or(AppError::NotFound)
}

/// Resolve the profile served at `/profile/`.
///
/// A configured id wins. Without one, exactly one profile must exist.
#[instrument(skip(store))]
pub async fn default_profile(
    store: &dyn PortfolioStore,
    configured: Option<i64>,
) -> AppResult<Profile> {
    if let Some(id) = configured {
        return store.profile(id).await?.ok_or(AppError::NotFound);
    }
    let ids = store.profile_ids(2).await?;
    match ids.as_slice() {
        [only] => store.profile(*only).await?.ok_or(AppError::NotFound),
        [] => {
            debug!("no profile stored");
            Err(AppError::NotFound)
        }
        _ => {
            warn!("several profiles stored and no default configured");
            Err(AppError::NotFound)
        }
    }
}

/// Projects tagged with `skill`, compared as given apart from ASCII case. An
/// empty filter lists everything.
pub async fn projects(store: &dyn PortfolioStore, skill: Option<&str>) -> AppResult<Vec<Project>> {
    let skill = skill.filter(|s| !s.is_empty());
    if let Some(skill) = skill {
        debug!(skill, "filter projects by skill");
    }
    Ok(store.projects(skill).await?)
}

pub async fn top_skills(store: &dyn PortfolioStore) -> AppResult<Vec<SkillUsage>> {
    Ok(store.top_skills(TOP_SKILLS_LIMIT).await?)
}

/// Case-insensitive substring search. A blank query never reaches the store.
#[instrument(skip(store))]
pub async fn search(store: &dyn PortfolioStore, query: Option<&str>) -> AppResult<SearchResults> {
    let needle = query.map(str::trim).unwrap_or_default();
    if needle.is_empty() {
        return Ok(SearchResults::default());
    }
    let projects = store.search_projects(needle).await?;
    let profiles = store.search_profiles(needle).await?;
    debug!(
        projects = projects.len(),
        profiles = profiles.len(),
        "search finished"
    );
    Ok(SearchResults { projects, profiles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::Links;
    use crate::store::SqliteStore;

    async fn setup_store() -> SqliteStore {
        let pool = db::init_pool("sqlite::memory:").await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    async fn sample_profile(store: &SqliteStore, email: &str) -> Profile {
        create_profile(
            store,
            NewProfile {
                name: "You".into(),
                email: email.into(),
                education: "B.Tech".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_skill_is_a_validation_error() {
        let store = setup_store().await;
        create_skill(&store, "python").await.unwrap();
        let err = create_skill(&store, "python").await.unwrap_err();
        match err {
            AppError::Validation(errors) => assert!(errors.has("name")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn project_with_unknown_skill_is_rejected() {
        let store = setup_store().await;
        let err = create_project(
            &store,
            NewProject {
                title: " ".into(),
                skill_ids: vec![42],
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.has("title"));
                assert_eq!(errors.messages("skills"), ["Invalid pk \"42\" - object does not exist."]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.projects(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let store = setup_store().await;
        let before = sample_profile(&store, "you@example.com").await;
        let after = update_profile(
            &store,
            before.id,
            ProfileUpdate {
                education: Some("M.S.".into()),
                ..Default::default()
            },
            UpdateMode::Partial,
        )
        .await
        .unwrap();
        assert_eq!(after.education, "M.S.");
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.links, before.links);
    }

    #[tokio::test]
    async fn replace_requires_name_and_email() {
        let store = setup_store().await;
        let profile = sample_profile(&store, "you@example.com").await;
        let err = update_profile(
            &store,
            profile.id,
            ProfileUpdate {
                education: Some("M.S.".into()),
                ..Default::default()
            },
            UpdateMode::Replace,
        )
        .await
        .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.messages("name"), [MSG_REQUIRED]);
                assert_eq!(errors.messages("email"), [MSG_REQUIRED]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn replace_resets_absent_optional_fields() {
        let store = setup_store().await;
        let mut links = Links::new();
        links.insert("github".into(), "https://github.com/you".into());
        let profile = create_profile(
            &store,
            NewProfile {
                name: "You".into(),
                email: "you@example.com".into(),
                education: "B.Tech".into(),
                links,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let replaced = update_profile(
            &store,
            profile.id,
            ProfileUpdate {
                name: Some("Me".into()),
                email: Some("me@example.com".into()),
                ..Default::default()
            },
            UpdateMode::Replace,
        )
        .await
        .unwrap();
        assert_eq!(replaced.education, "");
        assert!(replaced.links.is_empty());
    }

    #[tokio::test]
    async fn email_must_stay_unique() {
        let store = setup_store().await;
        sample_profile(&store, "a@example.com").await;
        let second = sample_profile(&store, "b@example.com").await;

        let err = update_profile(
            &store,
            second.id,
            ProfileUpdate {
                email: Some("a@example.com".into()),
                name: Some("".into()),
                ..Default::default()
            },
            UpdateMode::Partial,
        )
        .await
        .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.messages("email"), ["profile with this email already exists."]);
                assert!(errors.has("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Re-saving its own email is fine.
        update_profile(
            &store,
            second.id,
            ProfileUpdate {
                email: Some("b@example.com".into()),
                ..Default::default()
            },
            UpdateMode::Partial,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn unknown_profile_is_not_found() {
        let store = setup_store().await;
        let err = update_profile(&store, 7, ProfileUpdate::default(), UpdateMode::Partial)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn default_profile_policy() {
        let store = setup_store().await;
        assert!(matches!(
            default_profile(&store, None).await,
            Err(AppError::NotFound)
        ));

        let first = sample_profile(&store, "a@example.com").await;
        assert_eq!(default_profile(&store, None).await.unwrap().id, first.id);

        let second = sample_profile(&store, "b@example.com").await;
        assert!(matches!(
            default_profile(&store, None).await,
            Err(AppError::NotFound)
        ));
        assert_eq!(
            default_profile(&store, Some(second.id)).await.unwrap().id,
            second.id
        );
        assert!(matches!(
            default_profile(&store, Some(second.id + 10)).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn blank_search_is_empty() {
        let store = setup_store().await;
        sample_profile(&store, "a@example.com").await;
        assert_eq!(search(&store, None).await.unwrap(), SearchResults::default());
        assert_eq!(search(&store, Some("   ")).await.unwrap(), SearchResults::default());
    }
}
