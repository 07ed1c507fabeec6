use std::sync::Arc;

use chrono::{Duration, Local};
use tokio::sync::RwLock;
use whoall_core::app_state::AppState;
use whoall_core::game_data::generate_sweep;
use whoall_core::query::{FilterSpec, LevelRange, SortColumn, SortSpec};
use whoall_core::roster::PlayerRecord;
use whoall_core::who_log;
use whoall_types::formatting::{format_last_seen, format_level, format_lfg};

/// Build a FilterSpec from raw form input. Blank fields impose no
/// constraint; a partial or non-numeric level range is dropped entirely.
pub fn build_filter_spec(
    level_start: Option<&str>,
    level_end: Option<&str>,
    class: Option<String>,
    name: Option<String>,
    race: Option<String>,
    guild: Option<String>,
    zone: Option<String>,
    lfg: bool,
) -> FilterSpec {
    let non_blank = |field: Option<String>| field.filter(|s| !s.trim().is_empty());

    FilterSpec {
        level_range: LevelRange::from_input(
            level_start.unwrap_or_default(),
            level_end.unwrap_or_default(),
        ),
        class: non_blank(class),
        name: non_blank(name),
        race: non_blank(race),
        guild: non_blank(guild),
        zone: non_blank(zone),
        lfg,
    }
}

pub async fn search(spec: FilterSpec, state: Arc<RwLock<AppState>>) {
    let mut guard = state.write().await;
    let s = &mut *guard;

    // Read the snapshot reference exactly once for this query.
    let snapshot = s.store.current();
    let results = s.engine.filter(&snapshot, &spec);

    print_table(&results, s.engine.active_sort());
    println!("Number of rows: {}", results.len());

    s.results = results;
}

pub async fn sort(column: &str, state: Arc<RwLock<AppState>>) -> Result<(), String> {
    let column: SortColumn = column.parse()?;

    let mut guard = state.write().await;
    let s = &mut *guard;

    if s.results.is_empty() {
        println!("Nothing to sort - run a search first");
        return Ok(());
    }

    let sorted = s.engine.sort(&s.results, column);
    print_table(&sorted, s.engine.active_sort());
    println!("Number of rows: {}", sorted.len());
    s.results = sorted;
    Ok(())
}

pub async fn refresh_now(state: Arc<RwLock<AppState>>) {
    let url = state.read().await.config.snapshot_url.clone();
    let client = reqwest::Client::new();

    match crate::refresh::fetch_snapshot(&client, &url).await {
        Ok(snapshot) => {
            println!(
                "Fetched {} players (data from {})",
                snapshot.len(),
                snapshot.retrieved_at.format("%Y-%m-%d %H:%M:%S")
            );
            state.write().await.store.replace(snapshot);
        }
        Err(e) => println!("Refresh failed: {e}"),
    }
}

pub async fn parse_file(path: &str, state: Arc<RwLock<AppState>>) {
    let mut guard = state.write().await;
    let s = &mut *guard;

    let resolved = s.set_active_file(path);
    let entries = match who_log::parse_log_file(&resolved) {
        Ok(entries) => entries,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let sightings = entries.len();
    for entry in entries {
        s.builder.apply(entry);
    }

    let now = Local::now().naive_local();
    let window = Duration::minutes(s.config.active_window_mins);
    let snapshot = s.builder.snapshot(now, window);
    let active = snapshot.len();
    s.store.replace(snapshot);

    // Tail reads pick up from here instead of re-reading the backfill.
    if let Err(e) = s.session.skip_to_end() {
        tracing::warn!(error = %e, "failed to position tail session");
    }

    println!(
        "Parsed {}: {} sightings, {} players in roster ({} active)",
        resolved.display(),
        sightings,
        s.builder.len(),
        active
    );
}

pub async fn save(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    let snapshot = s.store.current();
    if snapshot.is_empty() {
        println!("Current snapshot is empty - nothing to archive");
        return;
    }

    match s.archive().save(&snapshot) {
        Ok(name) => println!("Archived as '{name}'"),
        Err(e) => println!("{e}"),
    }
}

pub async fn list_snapshots(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    let names = s.archive().manifest();
    if names.is_empty() {
        println!("No archived snapshots in {}", s.archive().dir().display());
        return;
    }
    for name in names {
        println!("{name}");
    }
}

pub async fn load_snapshot(name: &str, state: Arc<RwLock<AppState>>) {
    let mut guard = state.write().await;
    let s = &mut *guard;

    match s.archive().load(name) {
        Ok(snapshot) => {
            println!("Loaded '{}' ({} players)", name, snapshot.len());
            s.store.replace(snapshot);
        }
        Err(e) => println!("{e}"),
    }
}

pub fn sweep(start: u32, end: u32, page: u32) {
    for line in generate_sweep(start, end, page) {
        println!("{line}");
    }
}

pub async fn show_settings(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    println!("log_directory: {}", s.config.log_directory);
    println!("snapshot_url: {}", s.config.snapshot_url);
    println!("refresh_interval_secs: {}", s.config.refresh_interval_secs);
    println!("active_window_mins: {}", s.config.active_window_mins);
    println!("archive_dir: {}", s.config.archive_dir().display());
}

pub async fn set_url(url: &str, state: Arc<RwLock<AppState>>) {
    let mut s = state.write().await;
    s.config.snapshot_url = url.to_string();
    if let Err(e) = s.config.store() {
        tracing::warn!(error = %e, "failed to persist config");
    }
    println!("Snapshot URL set to {url}");
}

pub async fn set_directory(path: &str, state: Arc<RwLock<AppState>>) {
    let mut s = state.write().await;
    s.config.log_directory = path.to_string();
    if let Err(e) = s.config.store() {
        tracing::warn!(error = %e, "failed to persist config");
    }
    println!("Log directory set to {path}");
}

pub async fn show_stats(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    let snapshot = s.store.current();

    println!("Snapshot: {} players", snapshot.len());
    if !snapshot.is_empty() {
        println!(
            "Retrieved: {}",
            snapshot.retrieved_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!("Roster builder: {} players", s.builder.len());
    println!("Last results: {} rows", s.results.len());
    match s.engine.active_sort() {
        Some(sort) => println!("Active sort: {} {}", sort.column, sort.direction.arrow()),
        None => println!("Active sort: none"),
    }
    if let Some(file) = &s.session.active_file {
        println!("Tailing: {}", file.display());
    }
}

pub fn exit() {
    println!("Exiting whoall");
}

fn print_table(records: &[PlayerRecord], active_sort: Option<SortSpec>) {
    let header = |column: SortColumn| -> String {
        match active_sort {
            Some(sort) if sort.column == column => {
                format!("{} {}", column.label(), sort.direction.arrow())
            }
            _ => column.label().to_string(),
        }
    };

    println!(
        "{:<7} {:<14} {:<16} {:<10} {:<20} {:<14} {:<5} {}",
        header(SortColumn::Level),
        header(SortColumn::Class),
        header(SortColumn::Name),
        header(SortColumn::Race),
        header(SortColumn::Guild),
        header(SortColumn::Zone),
        header(SortColumn::Lfg),
        header(SortColumn::LastUpdated),
    );

    let now = Local::now().naive_local();
    for record in records {
        let seen_secs = (now - record.last_updated).num_seconds();
        println!(
            "{:<7} {:<14} {:<16} {:<10} {:<20} {:<14} {:<5} {}",
            format_level(record.level),
            record.class_name,
            record.name,
            record.race,
            record.guild,
            record.zone,
            format_lfg(record.lfg),
            format_last_seen(seen_secs),
        );
    }
}
