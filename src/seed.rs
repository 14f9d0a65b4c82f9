//! Sample data for local development.

use crate::db::{self, Pool};
use crate::model::{Links, NewProfile, NewProject};
use anyhow::Result;
use tracing::{info, instrument};

const SKILLS: [&str; 3] = ["python", "django", "react"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub skills: usize,
    pub projects: usize,
    pub profile_id: i64,
}

fn links(pairs: &[(&str, &str)]) -> Links {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Wipe every table, then insert the sample skills, two projects and one
/// profile linked to all of them. Runs in a single transaction.
#[instrument(skip_all)]
pub async fn seed(pool: &Pool) -> Result<SeedSummary> {
    let mut tx = pool.begin().await?;
    db::repo::clear_all_tx(&mut tx).await?;

    let mut skills = Vec::with_capacity(SKILLS.len());
    for name in SKILLS {
        skills.push(db::repo::insert_skill_tx(&mut tx, name).await?);
    }
    let [python, django, react] = [skills[0].id, skills[1].id, skills[2].id];

    let portfolio = db::repo::insert_project_tx(
        &mut tx,
        &NewProject {
            title: "Personal Portfolio".into(),
            description: "Portfolio site".into(),
            links: links(&[("github", "https://github.com/you/portfolio")]),
            skill_ids: vec![python, react],
        },
    )
    .await?;
    let votechain = db::repo::insert_project_tx(
        &mut tx,
        &NewProject {
            title: "VoteChain".into(),
            description: "Decentralized voting POC".into(),
            links: links(&[("github", "https://github.com/you/votechain")]),
            skill_ids: vec![python, django],
        },
    )
    .await?;

    let profile_id = db::repo::insert_profile_tx(
        &mut tx,
        &NewProfile {
            name: "Your Name".into(),
            email: "you@example.com".into(),
            education: "B.Tech CSE".into(),
            links: links(&[
                ("github", "https://github.com/you"),
                ("linkedin", "https://linkedin.com/in/you"),
            ]),
            skill_ids: skills.iter().map(|s| s.id).collect(),
            project_ids: vec![portfolio, votechain],
        },
    )
    .await?;

    tx.commit().await?;
    let summary = SeedSummary {
        skills: skills.len(),
        projects: 2,
        profile_id,
    };
    info!(?summary, "database seeded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_pool() -> Pool {
        let pool = db::init_pool("sqlite::memory:").await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn seeding_twice_yields_the_same_data() {
        let pool = setup_pool().await;
        db::insert_skill(&pool, "leftover").await.unwrap();

        let first = seed(&pool).await.unwrap();
        let second = seed(&pool).await.unwrap();
        assert_eq!(first, second);

        let skills = db::list_skills(&pool).await.unwrap();
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, SKILLS);

        let profiles = db::list_profiles(&pool).await.unwrap();
        assert_eq!(profiles.len(), 1);
        let profile = &profiles[0];
        assert_eq!(profile.skills, skills);
        assert_eq!(profile.projects.len(), 2);
        assert_eq!(profile.links.len(), 2);
    }
}
