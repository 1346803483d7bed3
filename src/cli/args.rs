//! Command line argument parsing for the Parley CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parley - intent classification chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "parley")]
#[command(about = "Train and query an intent-classification chatbot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ParleyArgs {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "json", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ParleyArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbose + 1 }
    }

    /// Default log filter for the effective verbosity. `RUST_LOG` wins
    /// over this when set.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model bundle from an intents catalog
    Train(TrainArgs),

    /// Answer a single utterance
    Ask(AskArgs),

    /// Answer utterances read line by line from stdin
    Chat(ChatArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Intents catalog (JSON)
    #[arg(short, long, value_name = "INTENTS_FILE")]
    pub intents: PathBuf,

    /// Where to write the model bundle
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Random seed, overriding the config file
    #[arg(long, env = "PARLEY_SEED")]
    pub seed: Option<u64>,
}

/// Arguments shared by the inference commands
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Intents catalog (JSON)
    #[arg(short, long, value_name = "INTENTS_FILE")]
    pub intents: PathBuf,

    /// Trained model bundle (required by the neural classifier)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Classifier to use
    #[arg(long, default_value = "neural")]
    pub classifier: ClassifierKind,

    /// Random seed for response selection, overriding the config file
    #[arg(long, env = "PARLEY_SEED")]
    pub seed: Option<u64>,

    /// Include ranked predictions in the output
    #[arg(long)]
    pub predictions: bool,
}

/// Arguments for answering one utterance
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// The utterance; multiple words are joined with spaces
    #[arg(value_name = "QUERY", trailing_var_arg = true)]
    pub query: Vec<String>,
}

impl AskArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for the line-serving mode
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Classifier implementations selectable from the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Bag-of-words neural network from a trained bundle
    Neural,
    /// Keyword matching on the catalog
    Keyword,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document per result
    Json,
    /// Human-readable text
    Human,
}
