//! CourseDesk command-line client
//!
//! # Usage
//!
//! ```bash
//! # Print a course's curriculum outline
//! coursedesk show <COURSE_ID>
//!
//! # List coupons with their current status
//! coursedesk coupons <COURSE_ID>
//!
//! # Apply a JSON script of curriculum actions and save
//! coursedesk apply <COURSE_ID> edits.json
//!
//! # Preview the result without saving
//! coursedesk apply <COURSE_ID> edits.json --dry-run
//!
//! # Write a default config file
//! coursedesk init-config
//! ```
//!
//! # Environment Variables
//!
//! - `COURSEDESK_API_URL`: Override the API base URL from the config file
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use coursedesk_core::client::{CourseApi, HttpCourseApi};
use coursedesk_core::config::{default_config_path, ClientConfig};
use coursedesk_core::editor::CurriculumEditor;
use coursedesk_core::operations::CurriculumAction;
use coursedesk_core::services::CouponService;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.coursedesk/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the curriculum of a course
    Show { course_id: String },

    /// List a course's coupons and their status
    Coupons { course_id: String },

    /// Apply a JSON array of curriculum actions, then save
    Apply {
        course_id: String,

        /// Script file containing the actions
        script: PathBuf,

        /// Print the resulting curriculum without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::InitConfig { force } = cli.command {
        return init_config(cli.config, force).await;
    }

    let config = ClientConfig::load(cli.config.as_deref()).await?;
    tracing::debug!("Using course API at {}", config.base_url);
    let api: Arc<dyn CourseApi> = Arc::new(HttpCourseApi::new(&config)?);

    match cli.command {
        Command::Show { course_id } => {
            let editor = CurriculumEditor::open(api, &course_id).await?;
            println!("{}", render::curriculum(editor.curriculum()));
        }
        Command::Coupons { course_id } => {
            let coupons = CouponService::new(api).list(&course_id).await?;
            println!("{}", render::coupons(&coupons, chrono::Utc::now()));
        }
        Command::Apply {
            course_id,
            script,
            dry_run,
        } => apply_script(api, &course_id, &script, dry_run).await?,
        Command::InitConfig { .. } => {}
    }

    Ok(())
}

async fn apply_script(
    api: Arc<dyn CourseApi>,
    course_id: &str,
    script: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(script)
        .await
        .with_context(|| format!("Failed to read script {:?}", script))?;
    let actions: Vec<CurriculumAction> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse script {:?}", script))?;

    let mut editor = CurriculumEditor::open(api, course_id).await?;
    for (index, action) in actions.into_iter().enumerate() {
        let name = action.name();
        editor
            .dispatch(action)
            .with_context(|| format!("Action {} ({}) was rejected", index + 1, name))?;
    }

    println!("{}", render::curriculum(editor.curriculum()));

    if dry_run {
        tracing::info!("Dry run, nothing saved");
        editor.cancel();
        return Ok(());
    }

    if !editor.has_unsaved_changes() {
        tracing::info!("Script produced no changes, nothing to save");
        return Ok(());
    }

    editor.save().await?;
    tracing::info!("Saved curriculum for course {}", course_id);
    Ok(())
}

async fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!("Config already exists at {:?} (use --force to overwrite)", path);
    }

    ClientConfig::default().save_to(&path).await?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
