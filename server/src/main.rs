use std::path::PathBuf;
use std::sync::Arc;

use adventure::{BatchOperation, CreateProgressData, PlayerProgress, UpdateProgressData, Variables};
use anyhow::Context;
use clap::{Parser, Subcommand};
use questweave_server::persistence::{Database, SqliteStore};
use questweave_server::{config, Authoring};

#[derive(Parser)]
#[command(name = "questweave-server", about = "Apply edits to Questweave adventures")]
struct Cli {
    /// SQLite database file. Defaults to questweave.db in the data directory.
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a JSON batch of edit operations and print the result.
    Apply {
        #[arg(long)]
        user: String,
        batch: PathBuf,
    },
    /// Delete a scene, moving its players to another scene.
    DeleteScene {
        #[arg(long)]
        user: String,
        scene: String,
        redirect: String,
    },
    /// Show, move or reset a player's progress in an adventure.
    ///
    /// With no flags the current progress is printed. `--scene` and
    /// `--variables` start or move the player; `--reset` drops the row.
    Progress {
        #[arg(long)]
        user: String,
        adventure: String,
        #[arg(long)]
        scene: Option<String>,
        /// JSON object merged into the stored variables.
        #[arg(long)]
        variables: Option<String>,
        #[arg(long, conflicts_with_all = ["scene", "variables"])]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with span durations
    use tracing_subscriber::fmt::format::FmtSpan;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db_path = cli
        .database
        .unwrap_or_else(|| config::database_path(&config::get_data_dir()));
    tracing::info!("Using database: {}", db_path.display());

    let db = Database::open(&db_path)
        .await
        .with_context(|| format!("opening {}", db_path.display()))?;
    let authoring = Authoring::new(Arc::new(SqliteStore::from_database(&db)));

    match cli.command {
        Command::Apply { user, batch } => {
            let text = std::fs::read_to_string(&batch)
                .with_context(|| format!("reading {}", batch.display()))?;
            let operations: Vec<BatchOperation> =
                serde_json::from_str(&text).context("parsing batch operations")?;

            let result = authoring.batches().execute(&user, operations).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                std::process::exit(1);
            }
        }
        Command::DeleteScene {
            user,
            scene,
            redirect,
        } => {
            match authoring.delete_scene(&user, &scene, &redirect).await {
                Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                Err(e) if e.is_invariant_violation() => {
                    eprintln!("Refused: {e}");
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Progress {
            user,
            adventure,
            scene,
            variables,
            reset,
        } => {
            let variables = variables
                .map(|text| serde_json::from_str::<Variables>(&text))
                .transpose()
                .context("parsing --variables as a JSON object")?;
            let progress = if reset {
                let removed = authoring.delete_progress(&user, &adventure).await?;
                tracing::info!(%user, %adventure, removed, "Reset progress");
                None
            } else if scene.is_none() && variables.is_none() {
                authoring.get_progress(&user, &adventure).await?
            } else {
                Some(move_player(&authoring, &user, adventure, scene, variables).await?)
            };
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
    }

    db.close().await;
    Ok(())
}

/// Update the player's row, or start one when they have none yet.
async fn move_player(
    authoring: &Authoring<SqliteStore>,
    user: &str,
    adventure: String,
    scene: Option<String>,
    variables: Option<Variables>,
) -> anyhow::Result<PlayerProgress> {
    let update = UpdateProgressData {
        current_scene_id: scene.clone(),
        variables: variables.clone(),
    };
    if let Some(moved) = authoring.update_progress(user, &adventure, update).await? {
        return Ok(moved);
    }
    let Some(scene) = scene else {
        anyhow::bail!("no progress in {adventure} yet; pass --scene to start");
    };
    let data = CreateProgressData {
        adventure_id: adventure,
        current_scene_id: scene,
        variables: variables.unwrap_or_default(),
    };
    Ok(authoring.create_progress(user, data).await?)
}
