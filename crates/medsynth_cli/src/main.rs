use clap::{Parser, Subcommand};
use medsynth_core::{MedsynthConfig, Profession, Topic};
use medsynth_store::JsonFileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "medsynth", author, version, about = "Synthetic patient data generator", long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "medsynth.toml")]
    config: PathBuf,

    /// Data directory (overrides config and MEDSYNTH_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Master seed (overrides config and MEDSYNTH_SEED)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a cohort and write it to the data directory
    Generate {
        /// Number of patient identities
        #[arg(long)]
        patients: Option<usize>,
        /// Leading patients that also get vitals, reports, comments and a timeline
        #[arg(long)]
        detailed: Option<usize>,
    },
    /// Stream live vital readings for a patient
    Live {
        #[arg(default_value = "P001")]
        patient: String,
        /// Milliseconds between readings
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Seconds to run; 0 runs until Ctrl-C
        #[arg(long)]
        duration_secs: Option<u64>,
    },
    /// Read or append professional comments
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },
    /// Show a patient's condition timeline
    Timeline {
        patient: String,
        /// Keep only these conditions (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,
        /// Print the widget projection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Make sure patient and vitals data exist, generating what is missing
    Ensure,
}

#[derive(Subcommand, Debug)]
enum CommentAction {
    /// Append a comment to a patient's log
    Add {
        patient: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "Doctor")]
        profession: Profession,
        #[arg(long, default_value = "test results")]
        topic: Topic,
        text: String,
    },
    /// List a patient's comments, newest first
    List { patient: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = MedsynthConfig::load_or_default(&args.config);
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(seed) = args.seed {
        config.generation.seed = Some(seed);
    }

    let store = JsonFileStore::new(&config.storage.data_dir).with_legacy_csv(config.storage.export_legacy_csv);
    let now = chrono::Local::now().naive_local();

    match args.command {
        Command::Generate { patients, detailed } => {
            if let Some(n) = patients {
                config.generation.patients = n;
            }
            if let Some(n) = detailed {
                config.generation.detailed_patients = n;
            }
            commands::generate(&config, &store, now).await
        }
        Command::Live {
            patient,
            interval_ms,
            duration_secs,
        } => {
            if let Some(ms) = interval_ms {
                config.live.interval_ms = ms;
            }
            if let Some(secs) = duration_secs {
                config.live.duration_secs = secs;
            }
            commands::live(&config, &patient).await
        }
        Command::Comment { action } => match action {
            CommentAction::Add {
                patient,
                author,
                profession,
                topic,
                text,
            } => commands::add_comment(&store, &patient, author, profession, topic, text, now).await,
            CommentAction::List { patient } => commands::list_comments(&store, &patient).await,
        },
        Command::Timeline {
            patient,
            conditions,
            json,
        } => commands::timeline(&store, &patient, &conditions, json).await,
        Command::Ensure => commands::ensure(&config, &store, now).await,
    }
}
