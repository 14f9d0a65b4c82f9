use super::AppState;
use crate::error::{AppError, AppResult};
use crate::model::{Profile, ProfileUpdate, Project, SearchResults, SkillUsage};
use crate::service::{self, UpdateMode};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json};
use tracing::debug;

/// Query string as ordered pairs, so repeated keys never reject the request.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Value of the last occurrence of `key`.
fn last_param(query: QueryPairs, key: &str) -> AppResult<Option<String>> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(pairs.into_iter().rev().find(|(k, _)| k == key).map(|(_, v)| v))
}

/// Non-integer ids can never match a row, so they are reported as misses.
fn profile_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!(%rejection, "unparsable profile id");
            Err(AppError::NotFound)
        }
    }
}

fn update_body(body: Result<Json<ProfileUpdate>, JsonRejection>) -> AppResult<ProfileUpdate> {
    body.map(|Json(update)| update)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Liveness check
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn default_profile(State(state): State<AppState>) -> AppResult<Json<Profile>> {
    let profile = service::default_profile(state.store.as_ref(), state.default_profile_id).await?;
    Ok(Json(profile))
}

pub async fn get_profile(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Profile>> {
    let id = profile_id(path)?;
    let profile = state.store.profile(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(profile))
}

pub async fn patch_profile(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> AppResult<Json<Profile>> {
    let id = profile_id(path)?;
    let update = update_body(body)?;
    let profile =
        service::update_profile(state.store.as_ref(), id, update, UpdateMode::Partial).await?;
    Ok(Json(profile))
}

pub async fn put_profile(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> AppResult<Json<Profile>> {
    let id = profile_id(path)?;
    let update = update_body(body)?;
    let profile =
        service::update_profile(state.store.as_ref(), id, update, UpdateMode::Replace).await?;
    Ok(Json(profile))
}

pub async fn list_projects(
    State(state): State<AppState>,
    query: QueryPairs,
) -> AppResult<Json<Vec<Project>>> {
    let skill = last_param(query, "skill")?;
    let projects = service::projects(state.store.as_ref(), skill.as_deref()).await?;
    Ok(Json(projects))
}

pub async fn top_skills(State(state): State<AppState>) -> AppResult<Json<Vec<SkillUsage>>> {
    Ok(Json(service::top_skills(state.store.as_ref()).await?))
}

pub async fn search(
    State(state): State<AppState>,
    query: QueryPairs,
) -> AppResult<Json<SearchResults>> {
    let q = last_param(query, "q")?;
    let results = service::search(state.store.as_ref(), q.as_deref()).await?;
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
        Ok(Query(
            raw.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn repeated_keys_resolve_to_the_last_value() {
        let query = pairs(&[("skill", "a"), ("q", "x"), ("skill", "b")]);
        assert_eq!(last_param(query, "skill").unwrap().as_deref(), Some("b"));
        assert_eq!(last_param(pairs(&[("q", "x")]), "skill").unwrap(), None);
    }
}
