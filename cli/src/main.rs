use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::filter::EnvFilter;
use whoall_cli::{commands, readline, refresh, watch};
use whoall_core::app_state::AppState;

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();

    let state = Arc::new(RwLock::new(AppState::new()));

    // Start the log directory watcher and the periodic snapshot refresh
    if let Some(handle) = watch::init_watcher(Arc::clone(&state)).await {
        state.write().await.watcher_task = Some(handle);
    }
    let refresh_handle = refresh::spawn(Arc::clone(&state)).await;
    state.write().await.refresh_task = Some(refresh_handle);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

/// Initialize logging, writing to WHOALL_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("WHOALL_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(version, about = "whoall roster console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the current snapshot
    Search {
        #[arg(long)]
        level_start: Option<String>,
        #[arg(long)]
        level_end: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        race: Option<String>,
        #[arg(long)]
        guild: Option<String>,
        #[arg(long)]
        zone: Option<String>,
        #[arg(long)]
        lfg: bool,
    },
    /// Re-sort the last results; repeating a column flips direction
    Sort { column: String },
    /// Fetch the published snapshot now
    Refresh,
    /// Backfill a whole log file into the roster
    ParseFile {
        #[arg(short, long)]
        path: String,
    },
    /// Archive the current snapshot
    Save,
    /// List archived snapshots
    Snapshots,
    /// Replace the live snapshot with an archived one
    LoadSnapshot { name: String },
    /// Generate /who sweep macro buttons
    Sweep {
        #[arg(long, default_value_t = 1)]
        start: u32,
        #[arg(long, default_value_t = 50)]
        end: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Config,
    SetUrl { url: String },
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
    Stats,
    Exit,
}

async fn respond(line: &str, state: Arc<RwLock<AppState>>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "whoall".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Search {
            level_start,
            level_end,
            class,
            name,
            race,
            guild,
            zone,
            lfg,
        }) => {
            let spec = commands::build_filter_spec(
                level_start.as_deref(),
                level_end.as_deref(),
                class,
                name,
                race,
                guild,
                zone,
                lfg,
            );
            commands::search(spec, Arc::clone(&state)).await;
        }
        Some(Commands::Sort { column }) => commands::sort(&column, Arc::clone(&state)).await?,
        Some(Commands::Refresh) => commands::refresh_now(Arc::clone(&state)).await,
        Some(Commands::ParseFile { path }) => commands::parse_file(&path, Arc::clone(&state)).await,
        Some(Commands::Save) => commands::save(Arc::clone(&state)).await,
        Some(Commands::Snapshots) => commands::list_snapshots(Arc::clone(&state)).await,
        Some(Commands::LoadSnapshot { name }) => {
            commands::load_snapshot(&name, Arc::clone(&state)).await;
        }
        Some(Commands::Sweep { start, end, page }) => commands::sweep(start, end, page),
        Some(Commands::Config) => commands::show_settings(Arc::clone(&state)).await,
        Some(Commands::SetUrl { url }) => commands::set_url(&url, Arc::clone(&state)).await,
        Some(Commands::SetDirectory { path }) => {
            commands::set_directory(&path, Arc::clone(&state)).await;
        }
        Some(Commands::Stats) => commands::show_stats(state).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
