use super::model::{decode_links, encode_links, ProfileRow, ProjectRow};
use crate::model::{NewProfile, NewProject, Profile, ProfileFields, Project, Skill, SkillUsage};
use anyhow::{Context, Result};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use tracing::instrument;

pub type Pool = SqlitePool;
type SkillTuple = (i64, String);

pub async fn init_pool(database_url: &str) -> Result<Pool> {
    let normalized = prepare_sqlite_url(database_url);
    let in_memory = normalized.starts_with("sqlite::memory");
    let mut options = SqliteConnectOptions::from_str(&normalized)
        .with_context(|| format!("invalid database url: {normalized}"))?
        .create_if_missing(true)
        .foreign_keys(true);
    // Every connection to `:memory:` is a separate database, so keep exactly one.
    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?
    } else {
        // Enable WAL and stricter durability.
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);
        SqlitePoolOptions::new().connect_with(options).await?
    };
    Ok(pool)
}

/// If using a file-backed SQLite URL, expand a leading `~/` and ensure the parent
/// directory exists. Leaves in-memory URLs untouched. Returns possibly-updated URL.
fn prepare_sqlite_url(url: &str) -> String {
    if !url.starts_with("sqlite:") || url.starts_with("sqlite::memory") {
        return url.to_string();
    }

    let rest = &url["sqlite:".len()..];
    let path_with_query = rest.strip_prefix("//").unwrap_or(rest);

    let (path_part, query_part) = match path_with_query.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path_with_query, None),
    };

    if path_part.is_empty() {
        return url.to_string();
    }

    let expanded_path = match (path_part.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => format!("{}/{}", home.trim_end_matches('/'), rest),
        _ => path_part.to_string(),
    };

    if let Some(parent) = std::path::Path::new(&expanded_path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    let mut rebuilt = String::from("sqlite://");
    rebuilt.push_str(&expanded_path);
    if let Some(q) = query_part {
        rebuilt.push('?');
        rebuilt.push_str(q);
    }
    rebuilt
}

pub async fn run_migrations(pool: &Pool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// `LIKE` pattern matching `needle` anywhere, with `\`, `%` and `_` escaped so
/// they match literally. Pair with `ESCAPE '\'`. Case is folded by SQLite on
/// both sides of the comparison, never here.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn skill_from_tuple((id, name): SkillTuple) -> Skill {
    Skill { id, name }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

#[instrument(skip_all)]
pub async fn insert_skill(pool: &Pool, name: &str) -> Result<Skill> {
    let mut tx = pool.begin().await?;
    let skill = insert_skill_tx(&mut tx, name).await?;
    tx.commit().await?;
    Ok(skill)
}

pub(crate) async fn insert_skill_tx(tx: &mut Transaction<'_, Sqlite>, name: &str) -> Result<Skill> {
    let id: i64 = sqlx::query_scalar("INSERT INTO skills (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .with_context(|| format!("failed to insert skill {name}"))?;
    Ok(Skill {
        id,
        name: name.to_string(),
    })
}

#[instrument(skip_all)]
pub async fn get_skill(pool: &Pool, id: i64) -> Result<Option<Skill>> {
    let row: Option<SkillTuple> = sqlx::query_as("SELECT id, name FROM skills WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(skill_from_tuple))
}

#[instrument(skip_all)]
pub async fn find_skill_by_name(pool: &Pool, name: &str) -> Result<Option<Skill>> {
    let row: Option<SkillTuple> = sqlx::query_as("SELECT id, name FROM skills WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(skill_from_tuple))
}

#[instrument(skip_all)]
pub async fn list_skills(pool: &Pool) -> Result<Vec<Skill>> {
    let rows: Vec<SkillTuple> = sqlx::query_as("SELECT id, name FROM skills ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(skill_from_tuple).collect())
}

/// Skills ranked by the number of projects referencing them. Ties keep
/// insertion order.
#[instrument(skip_all)]
pub async fn top_skills(pool: &Pool, limit: i64) -> Result<Vec<SkillUsage>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT s.name, COUNT(ps.project_id) AS cnt \
         FROM skills s \
         LEFT JOIN project_skills ps ON ps.skill_id = s.id \
         GROUP BY s.id \
         ORDER BY cnt DESC, s.id ASC \
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(name, count)| SkillUsage { name, count })
        .collect())
}

#[instrument(skip_all)]
pub async fn delete_skill(pool: &Pool, id: i64) -> Result<bool> {
    let res = sqlx::query("DELETE FROM skills WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() > 0)
}

async fn skills_for_project(pool: &Pool, project_id: i64) -> Result<Vec<Skill>> {
    let rows: Vec<SkillTuple> = sqlx::query_as(
        "SELECT s.id, s.name FROM skills s \
         JOIN project_skills ps ON ps.skill_id = s.id \
         WHERE ps.project_id = ? ORDER BY s.id",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(skill_from_tuple).collect())
}

async fn skills_for_profile(pool: &Pool, profile_id: i64) -> Result<Vec<Skill>> {
    let rows: Vec<SkillTuple> = sqlx::query_as(
        "SELECT s.id, s.name FROM skills s \
         JOIN profile_skills ps ON ps.skill_id = s.id \
         WHERE ps.profile_id = ? ORDER BY s.id",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(skill_from_tuple).collect())
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

async fn hydrate_project(pool: &Pool, row: ProjectRow) -> Result<Project> {
    let skills = skills_for_project(pool, row.id).await?;
    Ok(Project {
        id: row.id,
        title: row.title,
        description: row.description,
        links: decode_links(&row.links)
            .with_context(|| format!("project {} has unreadable links", row.id))?,
        skills,
    })
}

async fn hydrate_projects(pool: &Pool, rows: Vec<ProjectRow>) -> Result<Vec<Project>> {
    let mut projects = Vec::with_capacity(rows.len());
    for row in rows {
        projects.push(hydrate_project(pool, row).await?);
    }
    Ok(projects)
}

#[instrument(skip_all)]
pub async fn insert_project(pool: &Pool, project: &NewProject) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let id = insert_project_tx(&mut tx, project).await?;
    tx.commit().await?;
    Ok(id)
}

pub(crate) async fn insert_project_tx(
    tx: &mut Transaction<'_, Sqlite>,
    project: &NewProject,
) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO projects (title, description, links) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(encode_links(&project.links)?)
    .fetch_one(&mut **tx)
    .await
    .with_context(|| format!("failed to insert project {}", project.title))?;
    for skill_id in &project.skill_ids {
        sqlx::query("INSERT OR IGNORE INTO project_skills (project_id, skill_id) VALUES (?, ?)")
            .bind(id)
            .bind(skill_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(id)
}

#[instrument(skip_all)]
pub async fn get_project(pool: &Pool, id: i64) -> Result<Option<Project>> {
    let row: Option<ProjectRow> =
        sqlx::query_as("SELECT id, title, description, links FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    match row {
        Some(row) => Ok(Some(hydrate_project(pool, row).await?)),
        None => Ok(None),
    }
}

/// All projects, or only those tagged with a skill whose name equals `skill`
/// ignoring case.
#[instrument(skip_all)]
pub async fn list_projects(pool: &Pool, skill: Option<&str>) -> Result<Vec<Project>> {
    let rows: Vec<ProjectRow> = match skill {
        Some(name) => {
            sqlx::query_as(
                "SELECT DISTINCT p.id, p.title, p.description, p.links \
                 FROM projects p \
                 JOIN project_skills ps ON ps.project_id = p.id \
                 JOIN skills s ON s.id = ps.skill_id \
                 WHERE LOWER(s.name) = LOWER(?) \
                 ORDER BY p.id",
            )
            .bind(name)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as("SELECT id, title, description, links FROM projects ORDER BY id")
                .fetch_all(pool)
                .await?
        }
    };
    hydrate_projects(pool, rows).await
}

#[instrument(skip_all)]
pub async fn search_projects(pool: &Pool, needle: &str) -> Result<Vec<Project>> {
    let pattern = contains_pattern(needle);
    let rows: Vec<ProjectRow> = sqlx::query_as(
        "SELECT DISTINCT p.id, p.title, p.description, p.links \
         FROM projects p \
         LEFT JOIN project_skills ps ON ps.project_id = p.id \
         LEFT JOIN skills s ON s.id = ps.skill_id \
         WHERE LOWER(p.title) LIKE LOWER(?) ESCAPE '\\' \
            OR LOWER(p.description) LIKE LOWER(?) ESCAPE '\\' \
            OR LOWER(s.name) LIKE LOWER(?) ESCAPE '\\' \
         ORDER BY p.id",
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;
    hydrate_projects(pool, rows).await
}

#[instrument(skip_all)]
pub async fn link_project_skill(pool: &Pool, project_id: i64, skill_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO project_skills (project_id, skill_id) VALUES (?, ?)")
        .bind(project_id)
        .bind(skill_id)
        .execute(pool)
        .await
        .context("failed to link project and skill")?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn delete_project(pool: &Pool, id: i64) -> Result<bool> {
    let res = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() > 0)
}

async fn projects_for_profile(pool: &Pool, profile_id: i64) -> Result<Vec<Project>> {
    let rows: Vec<ProjectRow> = sqlx::query_as(
        "SELECT p.id, p.title, p.description, p.links FROM projects p \
         JOIN profile_projects pp ON pp.project_id = p.id \
         WHERE pp.profile_id = ? ORDER BY p.id",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;
    hydrate_projects(pool, rows).await
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

async fn hydrate_profile(pool: &Pool, row: ProfileRow) -> Result<Profile> {
    let skills = skills_for_profile(pool, row.id).await?;
    let projects = projects_for_profile(pool, row.id).await?;
    Ok(Profile {
        id: row.id,
        name: row.name,
        email: row.email,
        education: row.education,
        skills,
        projects,
        links: decode_links(&row.links)
            .with_context(|| format!("profile {} has unreadable links", row.id))?,
    })
}

async fn hydrate_profiles(pool: &Pool, rows: Vec<ProfileRow>) -> Result<Vec<Profile>> {
    let mut profiles = Vec::with_capacity(rows.len());
    for row in rows {
        profiles.push(hydrate_profile(pool, row).await?);
    }
    Ok(profiles)
}

#[instrument(skip_all)]
pub async fn insert_profile(pool: &Pool, profile: &NewProfile) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let id = insert_profile_tx(&mut tx, profile).await?;
    tx.commit().await?;
    Ok(id)
}

pub(crate) async fn insert_profile_tx(
    tx: &mut Transaction<'_, Sqlite>,
    profile: &NewProfile,
) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO profiles (name, email, education, links) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.education)
    .bind(encode_links(&profile.links)?)
    .fetch_one(&mut **tx)
    .await
    .with_context(|| format!("failed to insert profile {}", profile.email))?;
    for skill_id in &profile.skill_ids {
        sqlx::query("INSERT OR IGNORE INTO profile_skills (profile_id, skill_id) VALUES (?, ?)")
            .bind(id)
            .bind(skill_id)
            .execute(&mut **tx)
            .await?;
    }
    for project_id in &profile.project_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO profile_projects (profile_id, project_id) VALUES (?, ?)",
        )
        .bind(id)
        .bind(project_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(id)
}

#[instrument(skip_all)]
pub async fn get_profile(pool: &Pool, id: i64) -> Result<Option<Profile>> {
    let row: Option<ProfileRow> = sqlx::query_as(
        "SELECT id, name, email, education, links FROM profiles WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    match row {
        Some(row) => Ok(Some(hydrate_profile(pool, row).await?)),
        None => Ok(None),
    }
}

#[instrument(skip_all)]
pub async fn list_profiles(pool: &Pool) -> Result<Vec<Profile>> {
    let rows: Vec<ProfileRow> =
        sqlx::query_as("SELECT id, name, email, education, links FROM profiles ORDER BY id")
            .fetch_all(pool)
            .await?;
    hydrate_profiles(pool, rows).await
}

/// Up to `limit` profile ids in storage order.
#[instrument(skip_all)]
pub async fn list_profile_ids(pool: &Pool, limit: i64) -> Result<Vec<i64>> {
    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM profiles ORDER BY id LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

#[instrument(skip_all)]
pub async fn search_profiles(pool: &Pool, needle: &str) -> Result<Vec<Profile>> {
    let pattern = contains_pattern(needle);
    let rows: Vec<ProfileRow> = sqlx::query_as(
        "SELECT DISTINCT p.id, p.name, p.email, p.education, p.links \
         FROM profiles p \
         LEFT JOIN profile_skills ps ON ps.profile_id = p.id \
         LEFT JOIN skills s ON s.id = ps.skill_id \
         WHERE LOWER(p.name) LIKE LOWER(?) ESCAPE '\\' \
            OR LOWER(p.education) LIKE LOWER(?) ESCAPE '\\' \
            OR LOWER(s.name) LIKE LOWER(?) ESCAPE '\\' \
         ORDER BY p.id",
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;
    hydrate_profiles(pool, rows).await
}

/// Overwrite the scalar columns of a profile. Returns `false` if the id is unknown.
#[instrument(skip_all)]
pub async fn update_profile(pool: &Pool, id: i64, fields: &ProfileFields) -> Result<bool> {
    let res = sqlx::query(
        "UPDATE profiles SET name = ?, email = ?, education = ?, links = ? WHERE id = ?",
    )
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.education)
    .bind(encode_links(&fields.links)?)
    .bind(id)
    .execute(pool)
    .await
    .with_context(|| format!("failed to update profile {id}"))?;
    Ok(res.rows_affected() > 0)
}

/// Whether another profile (other than `exclude_id`) already uses `email`.
#[instrument(skip_all)]
pub async fn email_taken(pool: &Pool, email: &str, exclude_id: Option<i64>) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE email = ? AND id IS NOT ?")
            .bind(email)
            .bind(exclude_id)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

#[instrument(skip_all)]
pub async fn link_profile_skill(pool: &Pool, profile_id: i64, skill_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO profile_skills (profile_id, skill_id) VALUES (?, ?)")
        .bind(profile_id)
        .bind(skill_id)
        .execute(pool)
        .await
        .context("failed to link profile and skill")?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn link_profile_project(pool: &Pool, profile_id: i64, project_id: i64) -> Result<()> {
    sqlx::query(
        "INSERT OR IGNORE INTO profile_projects (profile_id, project_id) VALUES (?, ?)",
    )
    .bind(profile_id)
    .bind(project_id)
    .execute(pool)
    .await
    .context("failed to link profile and project")?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn delete_profile(pool: &Pool, id: i64) -> Result<bool> {
    let res = sqlx::query("DELETE FROM profiles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Remove every record and association, and restart id sequences.
pub(crate) async fn clear_all_tx(tx: &mut Transaction<'_, Sqlite>) -> Result<()> {
    for table in [
        "profile_projects",
        "profile_skills",
        "project_skills",
        "profiles",
        "projects",
        "skills",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut **tx)
            .await
            .with_context(|| format!("failed to clear {table}"))?;
    }
    sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('skills', 'projects', 'profiles')")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Links;

    async fn setup_pool() -> Pool {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Py"), "%Py%");
        assert_eq!(contains_pattern("École"), "%École%");
        assert_eq!(contains_pattern("100%_x\\"), "%100\\%\\_x\\\\%");
    }

    #[test]
    fn memory_urls_pass_through() {
        assert_eq!(prepare_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(prepare_sqlite_url("postgres://x"), "postgres://x");
    }

    #[tokio::test]
    async fn associations_are_sets() {
        let pool = setup_pool().await;
        let python = insert_skill(&pool, "python").await.unwrap();
        let pid = insert_project(
            &pool,
            &NewProject {
                title: "X".into(),
                skill_ids: vec![python.id, python.id],
                ..Default::default()
            },
        )
        .await
        .unwrap();
        link_project_skill(&pool, pid, python.id).await.unwrap();

        let project = get_project(&pool, pid).await.unwrap().unwrap();
        assert_eq!(project.skills, vec![python]);
    }

    #[tokio::test]
    async fn deleting_skill_unlinks_it() {
        let pool = setup_pool().await;
        let python = insert_skill(&pool, "python").await.unwrap();
        let rust = insert_skill(&pool, "rust").await.unwrap();
        let pid = insert_project(
            &pool,
            &NewProject {
                title: "X".into(),
                skill_ids: vec![python.id, rust.id],
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let profile_id = insert_profile(
            &pool,
            &NewProfile {
                name: "You".into(),
                email: "you@example.com".into(),
                skill_ids: vec![python.id],
                project_ids: vec![pid],
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(delete_skill(&pool, python.id).await.unwrap());
        assert!(!delete_skill(&pool, python.id).await.unwrap());

        let project = get_project(&pool, pid).await.unwrap().unwrap();
        assert_eq!(project.skills, vec![rust.clone()]);
        let profile = get_profile(&pool, profile_id).await.unwrap().unwrap();
        assert!(profile.skills.is_empty());
        assert_eq!(profile.projects[0].skills, vec![rust]);
    }

    #[tokio::test]
    async fn update_and_email_lookup() {
        let pool = setup_pool().await;
        let id = insert_profile(
            &pool,
            &NewProfile {
                name: "You".into(),
                email: "you@example.com".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(email_taken(&pool, "you@example.com", None).await.unwrap());
        assert!(!email_taken(&pool, "you@example.com", Some(id)).await.unwrap());

        let mut links = Links::new();
        links.insert("github".into(), "https://github.com/you".into());
        let fields = ProfileFields {
            name: "Me".into(),
            email: "me@example.com".into(),
            education: "M.S.".into(),
            links: links.clone(),
        };
        assert!(update_profile(&pool, id, &fields).await.unwrap());
        assert!(!update_profile(&pool, id + 1, &fields).await.unwrap());

        let profile = get_profile(&pool, id).await.unwrap().unwrap();
        assert_eq!(profile.email, "me@example.com");
        assert_eq!(profile.links, links);
    }

    #[tokio::test]
    async fn search_and_filter_fold_non_ascii_text_consistently() {
        let pool = setup_pool().await;
        let nandu = insert_skill(&pool, "Ñandú").await.unwrap();
        insert_project(
            &pool,
            &NewProject {
                title: "Café".into(),
                skill_ids: vec![nandu.id],
                ..Default::default()
            },
        )
        .await
        .unwrap();
        insert_profile(
            &pool,
            &NewProfile {
                name: "You".into(),
                email: "you@example.com".into(),
                education: "École Polytechnique".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        for needle in ["École", "ÉCOLE", "polytechnique"] {
            assert_eq!(search_profiles(&pool, needle).await.unwrap().len(), 1, "{needle}");
        }
        for needle in ["Café", "CAFé", "Ñandú", "ÑANDú"] {
            assert_eq!(search_projects(&pool, needle).await.unwrap().len(), 1, "{needle}");
        }
        for skill in ["Ñandú", "ÑANDú"] {
            assert_eq!(list_projects(&pool, Some(skill)).await.unwrap().len(), 1, "{skill}");
        }
    }

    #[tokio::test]
    async fn clear_all_restarts_ids() {
        let pool = setup_pool().await;
        insert_skill(&pool, "python").await.unwrap();
        insert_skill(&pool, "rust").await.unwrap();

        let mut tx = pool.begin().await.unwrap();
        clear_all_tx(&mut tx).await.unwrap();
        tx.commit().await.unwrap();

        assert!(list_skills(&pool).await.unwrap().is_empty());
        let again = insert_skill(&pool, "python").await.unwrap();
        assert_eq!(again.id, 1);
    }
}
