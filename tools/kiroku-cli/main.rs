use ahash::AHashMap;
use clap::{Parser, Subcommand, ValueEnum};
use kiroku::checkin::{CheckinSession, ScreenView};
use kiroku::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Inspect, validate and run declarative tracker flows and check-in screens
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an engine settings JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in trackers and their save actions
    Trackers {
        /// Also print each tracker's flow as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a flow or check-in definition for configuration problems
    Validate {
        #[arg(value_enum)]
        kind: DefinitionKind,
        file: PathBuf,
    },
    /// Drive a built-in tracker flow with one answer object per step and save it
    Run {
        tracker: Tracker,
        answers: PathBuf,
    },
    /// Print the stored logs of a tracker, newest first
    Logs { tracker: Tracker },
    /// Apply answers to a check-in screen and print the visible sections
    Checkin { screen: PathBuf, answers: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DefinitionKind {
    Flow,
    Checkin,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = EngineConfig::load(cli.config.as_deref())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load settings: {}", e)));

    match cli.command {
        Command::Trackers { json } => list_trackers(json),
        Command::Validate { kind, file } => validate(kind, &file, &settings),
        Command::Run { tracker, answers } => run_tracker(tracker, &answers, &settings),
        Command::Logs { tracker } => print_logs(tracker, &settings),
        Command::Checkin { screen, answers } => run_checkin(&screen, &answers),
    }
}

fn list_trackers(json: bool) {
    for tracker in Tracker::ALL {
        println!("{:<12} {}", tracker.name(), tracker.save_action());
        if json {
            print_json(&tracker.flow_json());
        }
    }
}

fn validate(kind: DefinitionKind, file: &Path, settings: &EngineConfig) {
    let json = read_file(file);
    let problems = match kind {
        DefinitionKind::Flow => {
            let flow = FlowConfig::<Map<String, Value>>::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            if let Err(e) = flow.validate_strict(!settings.strict_config) {
                exit_with_error(&e.to_string());
            }
            flow.validate()
        }
        DefinitionKind::Checkin => {
            let screen = CheckinScreen::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            screen.validate()
        }
    };

    if problems.is_empty() {
        println!("{}: OK", file.display());
    } else {
        println!("{}: OK with {} warning(s)", file.display(), problems.len());
        for problem in problems {
            println!("  - {}", problem);
        }
    }
}

fn open_stores(settings: &EngineConfig) -> TrackerStores {
    let storage = FileStorage::new(&settings.storage_dir).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to open storage: {}", e))
    });
    TrackerStores::open(Arc::new(storage))
}

fn run_tracker(tracker: Tracker, answers: &Path, settings: &EngineConfig) {
    let raw: Vec<Value> = serde_json::from_str(&read_file(answers))
        .unwrap_or_else(|e| exit_with_error(&format!("Answers must be a JSON array of objects: {}", e)));
    let patches: Vec<FormPatch> = raw
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            FormPatch::from_json(value).unwrap_or_else(|e| {
                exit_with_error(&format!("Answers for step {}: {}", i + 1, e))
            })
        })
        .collect();

    let stores = open_stores(settings);
    let mut completed = false;
    let walked = tracker
        .run_scripted(&patches, &stores, &mut || completed = true)
        .unwrap_or_else(|e| exit_with_error(&format!("Running the {} flow failed: {}", tracker, e)));

    println!("Walked {} step(s) of the {} flow.", walked, tracker);
    if completed {
        println!("Saved to {}", settings.storage_dir.display());
    }
}

fn print_logs(tracker: Tracker, settings: &EngineConfig) {
    let stores = open_stores(settings);
    match tracker {
        Tracker::Migraine => print_json(&stores.migraine.logs()),
        Tracker::Mood => print_json(&stores.mood.logs()),
        Tracker::Arthritis => print_json(&stores.arthritis.logs()),
        Tracker::Orthostatic => print_json(&stores.orthostatic.logs()),
        Tracker::Skin => print_json(&stores.skin.logs()),
        Tracker::Respiratory => print_json(&stores.respiratory.logs()),
        Tracker::Congestion => print_json(&stores.congestion.logs()),
        Tracker::Gi => print_json(&stores.gi.logs()),
    }
}

fn run_checkin(screen_path: &Path, answers_path: &Path) {
    let screen = CheckinScreen::from_json(&read_file(screen_path))
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let answers: AHashMap<String, AnswerValue> = serde_json::from_str(&read_file(answers_path))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse answers JSON: {}", e)));

    let session = CheckinSession::with_initial_values(&screen, answers)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    print_screen(&session.render());

    let missing = session.missing_required();
    if !missing.is_empty() {
        println!("\nUnanswered required components: {}", missing.join(", "));
    }
}

fn print_screen(view: &ScreenView<'_>) {
    println!("{}", view.title.unwrap_or("Check-in"));
    for section in &view.sections {
        println!("\n[{}] {}", section.index, section.title.unwrap_or("(untitled)"));
        for component in &section.components {
            match &component.placeholder {
                Some(notice) => println!("  {}: {}", component.id, notice),
                None => println!(
                    "  {} ({}): {}",
                    component.id,
                    component.kind.name(),
                    component.value
                ),
            }
        }
    }
    println!("\n{}{}", view.submit_label, if view.can_skip { " / Skip" } else { "" });
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    })
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
