use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use fate_sync::config::Config;
use fate_sync::features::FaceRecord;
use fate_sync::history::{HistoryEntry, HistoryState};
use fate_sync::narrative::Narrative;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_INPUT: i32 = 5;
const EXIT_STORAGE: i32 = 6;
const EXIT_INTERNAL: i32 = 7;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score two faces from detector output files
    Score {
        /// Detector output (JSON) for the first person
        face1: PathBuf,
        /// Detector output (JSON) for the second person
        face2: PathBuf,
        /// Request a generated reading (also enabled by narrative.enabled)
        #[arg(long)]
        narrate: bool,
        /// Do not save the result to history
        #[arg(long)]
        no_save: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse saved results (lists them if no action is given)
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List saved results, newest first
    List,
    /// Show one saved result
    Show {
        /// Result id or unique id prefix
        id: String,
    },
    /// Delete one saved result
    Delete {
        /// Result id or unique id prefix
        id: String,
    },
    /// Delete all saved results
    Clear,
}

#[derive(Parser, Debug)]
#[command(name = "fate-sync")]
#[command(about = "Facial compatibility scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fate-sync/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // rustls 0.23+ needs a process-wide crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
    }

    let cli = Cli::parse();
    fate_sync::logging::init(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let config = match fate_sync::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = fate_sync::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let history_path = fate_sync::history::resolve_history_path(config.history.path.as_deref());

    let code = match cli.command {
        Commands::Score {
            face1,
            face2,
            narrate,
            no_save,
            json,
        } => {
            let options = ScoreOptions {
                narrate: narrate || config.narrative.enabled,
                save: !no_save && config.history.enabled,
                json,
            };
            run_score(&config, &history_path, &face1, &face2, options).await
        }
        Commands::History { action } => {
            run_history(&history_path, action.unwrap_or(HistoryAction::List))
        }
    };

    std::process::exit(code);
}

struct ScoreOptions {
    narrate: bool,
    save: bool,
    json: bool,
}

async fn run_score(
    config: &Config,
    history_path: &Path,
    face1_path: &Path,
    face2_path: &Path,
    options: ScoreOptions,
) -> i32 {
    let mut faces: Vec<FaceRecord> = Vec::with_capacity(2);
    for path in [face1_path, face2_path] {
        match fate_sync::features::load_detection(path) {
            Ok(record) => faces.push(record),
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                return EXIT_INPUT;
            }
        }
    }

    let result = fate_sync::score(&faces[0].to_feature_set(), &faces[1].to_feature_set());
    tracing::debug!(
        overall = result.overall_score,
        label = %result.label,
        "scored faces"
    );

    let narrative = if options.narrate {
        let narrative = match fate_sync::narrative::client_from_config(&config.narrative) {
            Ok(client) => {
                fate_sync::narrative::narrate(
                    &client,
                    &result,
                    &[&faces[0], &faces[1]],
                    &config.language,
                )
                .await
            }
            Err(e) => {
                tracing::warn!(error = %e, "narrative unavailable, using fallback");
                Narrative::fallback()
            }
        };
        Some(narrative)
    } else {
        None
    };

    let mut code = EXIT_SUCCESS;
    let mut saved_id = None;
    if options.save {
        let entry = HistoryEntry::from_result(&result, narrative.as_ref().map(|n| n.text.clone()));
        let id = entry.id.clone();
        match save_entry(history_path, entry, config.history.max_entries) {
            Ok(()) => saved_id = Some(id),
            Err(e) => {
                eprintln!("Failed to save result: {:#}", e);
                code = EXIT_STORAGE;
            }
        }
    }

    if options.json {
        match fate_sync::output::format_json(&result, narrative.as_ref(), saved_id.as_deref()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{:#}", e);
                return EXIT_INTERNAL;
            }
        }
    } else {
        let use_colors = fate_sync::output::should_use_colors();
        println!(
            "{}",
            fate_sync::output::format_result(&result, narrative.as_ref(), use_colors)
        );
    }

    code
}

fn save_entry(path: &Path, entry: HistoryEntry, max_entries: usize) -> anyhow::Result<()> {
    let mut state = fate_sync::history::load_history(path)?;
    state.insert(entry);
    state.prune(max_entries);
    fate_sync::history::save_history(path, &state)?;
    tracing::debug!(path = %path.display(), entries = state.len(), "history saved");
    Ok(())
}

fn run_history(history_path: &Path, action: HistoryAction) -> i32 {
    let mut state: HistoryState = match fate_sync::history::load_history(history_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("History error: {:#}", e);
            return EXIT_STORAGE;
        }
    };
    let use_colors = fate_sync::output::should_use_colors();

    match action {
        HistoryAction::List => {
            let entries = state.list();
            println!(
                "{}",
                fate_sync::output::format_history_table(&entries, use_colors)
            );
            EXIT_SUCCESS
        }
        HistoryAction::Show { id } => match state.get(&id) {
            Some(entry) => {
                println!(
                    "{}",
                    fate_sync::output::format_history_detail(entry, use_colors)
                );
                EXIT_SUCCESS
            }
            None => {
                eprintln!("No saved result matches '{}'", id);
                EXIT_INPUT
            }
        },
        HistoryAction::Delete { id } => {
            if !state.delete(&id) {
                eprintln!("No saved result matches '{}'", id);
                return EXIT_INPUT;
            }
            persist(history_path, &state, &format!("Deleted {}", id))
        }
        HistoryAction::Clear => {
            let count = state.len();
            state.clear();
            persist(
                history_path,
                &state,
                &format!("Cleared {} saved result(s)", count),
            )
        }
    }
}

fn persist(history_path: &Path, state: &HistoryState, message: &str) -> i32 {
    match fate_sync::history::save_history(history_path, state) {
        Ok(()) => {
            println!("{}", message);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to save history: {:#}", e);
            EXIT_STORAGE
        }
    }
}
