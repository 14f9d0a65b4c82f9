use anyhow::{anyhow, bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use portfolio_api::config;
use portfolio_api::db;
use portfolio_api::error::AppError;
use portfolio_api::model::{Links, NewProfile, NewProject, Skill};
use portfolio_api::service;
use portfolio_api::store::{PortfolioStore, SqliteStore};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Manage skills, projects and profiles stored by the portfolio API"
)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Skill records
    #[command(subcommand)]
    Skill(SkillCmd),
    /// Project records
    #[command(subcommand)]
    Project(ProjectCmd),
    /// Profile records
    #[command(subcommand)]
    Profile(ProfileCmd),
}

#[derive(Debug, Subcommand)]
enum SkillCmd {
    Add { name: String },
    List,
    /// Delete a skill and detach it from every project and profile
    Rm { id: i64 },
}

#[derive(Debug, ClapArgs)]
struct ProjectAdd {
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    /// `key=url`, repeatable
    #[arg(long = "link", value_parser = parse_link)]
    links: Vec<(String, String)>,
    /// Skill name, repeatable
    #[arg(long = "skill")]
    skills: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum ProjectCmd {
    Add(ProjectAdd),
    List,
    Rm { id: i64 },
    /// Attach a skill (by name) to a project
    Tag { project_id: i64, skill: String },
}

#[derive(Debug, ClapArgs)]
struct ProfileAdd {
    name: String,
    email: String,
    #[arg(long, default_value = "")]
    education: String,
    /// `key=url`, repeatable
    #[arg(long = "link", value_parser = parse_link)]
    links: Vec<(String, String)>,
}

#[derive(Debug, Subcommand)]
enum ProfileCmd {
    Add(ProfileAdd),
    List,
    Rm { id: i64 },
    /// Attach a skill (by name) to a profile
    Skill { profile_id: i64, skill: String },
    /// Attach a project to a profile
    Project { profile_id: i64, project_id: i64 },
}

fn parse_link(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() && !v.trim().is_empty() => {
            Ok((k.trim().to_string(), v.trim().to_string()))
        }
        _ => Err(format!("expected key=url, got {raw:?}")),
    }
}

/// Turn validation failures into a readable CLI error.
fn report(err: AppError) -> anyhow::Error {
    match err {
        AppError::Validation(errors) => anyhow!("validation failed: {errors}"),
        AppError::NotFound => anyhow!("not found"),
        AppError::BadRequest(detail) => anyhow!(detail),
        AppError::Internal(err) => err,
    }
}

async fn skill_named(store: &dyn PortfolioStore, name: &str) -> Result<Skill> {
    store
        .skill_by_name(name)
        .await?
        .with_context(|| format!("no skill named {name:?}"))
}

async fn run_skill(store: &SqliteStore, cmd: SkillCmd) -> Result<()> {
    match cmd {
        SkillCmd::Add { name } => {
            let skill = service::create_skill(store, &name).await.map_err(report)?;
            println!("{}\t{}", skill.id, skill.name);
        }
        SkillCmd::List => {
            for skill in store.skills().await? {
                println!("{}\t{}", skill.id, skill.name);
            }
        }
        SkillCmd::Rm { id } => {
            if !store.delete_skill(id).await? {
                bail!("skill {id} not found");
            }
        }
    }
    Ok(())
}

async fn run_project(store: &SqliteStore, cmd: ProjectCmd) -> Result<()> {
    match cmd {
        ProjectCmd::Add(add) => {
            let mut skill_ids = Vec::with_capacity(add.skills.len());
            for name in &add.skills {
                skill_ids.push(skill_named(store, name).await?.id);
            }
            let project = service::create_project(
                store,
                NewProject {
                    title: add.title,
                    description: add.description,
                    links: add.links.into_iter().collect::<Links>(),
                    skill_ids,
                },
            )
            .await
            .map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        ProjectCmd::List => {
            for project in store.projects(None).await? {
                let skills: Vec<_> = project.skills.iter().map(|s| s.name.as_str()).collect();
                println!("{}\t{}\t[{}]", project.id, project.title, skills.join(", "));
            }
        }
        ProjectCmd::Rm { id } => {
            if !store.delete_project(id).await? {
                bail!("project {id} not found");
            }
        }
        ProjectCmd::Tag { project_id, skill } => {
            if store.project(project_id).await?.is_none() {
                bail!("project {project_id} not found");
            }
            let skill = skill_named(store, &skill).await?;
            store.tag_project(project_id, skill.id).await?;
        }
    }
    Ok(())
}

async fn run_profile(store: &SqliteStore, cmd: ProfileCmd) -> Result<()> {
    match cmd {
        ProfileCmd::Add(add) => {
            let profile = service::create_profile(
                store,
                NewProfile {
                    name: add.name,
                    email: add.email,
                    education: add.education,
                    links: add.links.into_iter().collect::<Links>(),
                    ..Default::default()
                },
            )
            .await
            .map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileCmd::List => {
            for profile in store.profiles().await? {
                println!("{}\t{}\t{}", profile.id, profile.name, profile.email);
            }
        }
        ProfileCmd::Rm { id } => {
            if !store.delete_profile(id).await? {
                bail!("profile {id} not found");
            }
        }
        ProfileCmd::Skill { profile_id, skill } => {
            if store.profile(profile_id).await?.is_none() {
                bail!("profile {profile_id} not found");
            }
            let skill = skill_named(store, &skill).await?;
            store.add_profile_skill(profile_id, skill.id).await?;
        }
        ProfileCmd::Project {
            profile_id,
            project_id,
        } => {
            if store.profile(profile_id).await?.is_none() {
                bail!("profile {profile_id} not found");
            }
            if store.project(project_id).await?.is_none() {
                bail!("project {project_id} not found");
            }
            store.add_profile_project(profile_id, project_id).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;
    cfg.ensure_dirs()?;

    let pool = db::init_pool(&cfg.database_url()).await?;
    db::run_migrations(&pool).await?;
    let store = SqliteStore::new(pool);

    match args.command {
        Command::Skill(cmd) => run_skill(&store, cmd).await,
        Command::Project(cmd) => run_project(&store, cmd).await,
        Command::Profile(cmd) => run_profile(&store, cmd).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_parsing() {
        assert_eq!(
            parse_link("github=https://github.com/you").unwrap(),
            ("github".to_string(), "https://github.com/you".to_string())
        );
        assert!(parse_link("github").is_err());
        assert!(parse_link("=https://x").is_err());
    }

    #[test]
    fn cli_parses_nested_subcommands() {
        let args = Args::try_parse_from([
            "portfolio_admin",
            "project",
            "add",
            "VoteChain",
            "--skill",
            "python",
            "--link",
            "github=https://github.com/you/votechain",
        ])
        .unwrap();
        match args.command {
            Command::Project(ProjectCmd::Add(add)) => {
                assert_eq!(add.title, "VoteChain");
                assert_eq!(add.skills, vec!["python"]);
                assert_eq!(add.links.len(), 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
