//! Storage seam used by the HTTP layer and the admin tooling.
//!
//! Handlers only ever see `dyn PortfolioStore`; `SqliteStore` is the production
//! implementation backed by the repository functions in `crate::db`.

use crate::db::{self, Pool};
use crate::model::{
    NewProfile, NewProject, Profile, ProfileFields, Project, Skill, SkillUsage,
};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn create_skill(&self, name: &str) -> Result<Skill>;
    async fn skill_by_name(&self, name: &str) -> Result<Option<Skill>>;
    async fn skill(&self, id: i64) -> Result<Option<Skill>>;
    async fn skills(&self) -> Result<Vec<Skill>>;
    async fn top_skills(&self, limit: i64) -> Result<Vec<SkillUsage>>;
    async fn delete_skill(&self, id: i64) -> Result<bool>;

    async fn create_project(&self, project: &NewProject) -> Result<Project>;
    async fn project(&self, id: i64) -> Result<Option<Project>>;
    async fn projects(&self, skill: Option<&str>) -> Result<Vec<Project>>;
    async fn search_projects(&self, needle: &str) -> Result<Vec<Project>>;
    async fn tag_project(&self, project_id: i64, skill_id: i64) -> Result<()>;
    async fn delete_project(&self, id: i64) -> Result<bool>;

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile>;
    async fn profile(&self, id: i64) -> Result<Option<Profile>>;
    async fn profiles(&self) -> Result<Vec<Profile>>;
    async fn profile_ids(&self, limit: i64) -> Result<Vec<i64>>;
    async fn search_profiles(&self, needle: &str) -> Result<Vec<Profile>>;
    async fn update_profile(&self, id: i64, fields: &ProfileFields) -> Result<bool>;
    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn add_profile_skill(&self, profile_id: i64, skill_id: i64) -> Result<()>;
    async fn add_profile_project(&self, profile_id: i64, project_id: i64) -> Result<()>;
    async fn delete_profile(&self, id: i64) -> Result<bool>;
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Pool,
}

impl SqliteStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

#[async_trait]
impl PortfolioStore for SqliteStore {
    async fn create_skill(&self, name: &str) -> Result<Skill> {
        db::insert_skill(&self.pool, name).await
    }

    async fn skill_by_name(&self, name: &str) -> Result<Option<Skill>> {
        db::find_skill_by_name(&self.pool, name).await
    }

    async fn skill(&self, id: i64) -> Result<Option<Skill>> {
        db::get_skill(&self.pool, id).await
    }

    async fn skills(&self) -> Result<Vec<Skill>> {
        db::list_skills(&self.pool).await
    }

    async fn top_skills(&self, limit: i64) -> Result<Vec<SkillUsage>> {
        db::top_skills(&self.pool, limit).await
    }

    async fn delete_skill(&self, id: i64) -> Result<bool> {
        db::delete_skill(&self.pool, id).await
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project> {
        let id = db::insert_project(&self.pool, project).await?;
        db::get_project(&self.pool, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("project {id} vanished after insert"))
    }

    async fn project(&self, id: i64) -> Result<Option<Project>> {
        db::get_project(&self.pool, id).await
    }

    async fn projects(&self, skill: Option<&str>) -> Result<Vec<Project>> {
        db::list_projects(&self.pool, skill).await
    }

    async fn search_projects(&self, needle: &str) -> Result<Vec<Project>> {
        db::search_projects(&self.pool, needle).await
    }

    async fn tag_project(&self, project_id: i64, skill_id: i64) -> Result<()> {
        db::link_project_skill(&self.pool, project_id, skill_id).await
    }

    async fn delete_project(&self, id: i64) -> Result<bool> {
        db::delete_project(&self.pool, id).await
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile> {
        let id = db::insert_profile(&self.pool, profile).await?;
        db::get_profile(&self.pool, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("profile {id} vanished after insert"))
    }

    async fn profile(&self, id: i64) -> Result<Option<Profile>> {
        db::get_profile(&self.pool, id).await
    }

    async fn profiles(&self) -> Result<Vec<Profile>> {
        db::list_profiles(&self.pool).await
    }

    async fn profile_ids(&self, limit: i64) -> Result<Vec<i64>> {
        db::list_profile_ids(&self.pool, limit).await
    }

    async fn search_profiles(&self, needle: &str) -> Result<Vec<Profile>> {
        db::search_profiles(&self.pool, needle).await
    }

    async fn update_profile(&self, id: i64, fields: &ProfileFields) -> Result<bool> {
        db::update_profile(&self.pool, id, fields).await
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        db::email_taken(&self.pool, email, exclude_id).await
    }

    async fn add_profile_skill(&self, profile_id: i64, skill_id: i64) -> Result<()> {
        db::link_profile_skill(&self.pool, profile_id, skill_id).await
    }

    async fn add_profile_project(&self, profile_id: i64, project_id: i64) -> Result<()> {
        db::link_profile_project(&self.pool, profile_id, project_id).await
    }

    async fn delete_profile(&self, id: i64) -> Result<bool> {
        db::delete_profile(&self.pool, id).await
    }
}
