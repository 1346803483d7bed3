//! Command implementations for the Parley CLI.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::analysis::analyzer::{Analyzer, EnglishAnalyzer};
use crate::catalog::IntentCatalog;
use crate::chat::{ChatEngine, ChatResponse};
use crate::cli::args::{AskArgs, ChatArgs, ClassifierKind, Command, EngineArgs, ParleyArgs, TrainArgs};
use crate::cli::output::{CommandFailure, TrainingResult, output_result, write_result};
use crate::config::ParleyConfig;
use crate::error::{ParleyError, Result};
use crate::ml::intent_classifier::{self, IntentTrainer};

/// Execute a CLI command.
///
/// Inference commands report their own failures as structured output, so an
/// `Err` from here means the process should exit with a failure status.
pub fn execute_command(args: ParleyArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Ask(ask_args) => ask(ask_args, &args),
        Command::Chat(chat_args) => chat(chat_args, &args),
    }
}

fn load_config(path: Option<&std::path::Path>, seed: Option<u64>) -> Result<ParleyConfig> {
    let config = match path {
        Some(path) => ParleyConfig::load(path)?,
        None => ParleyConfig::default(),
    };
    Ok(match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

/// Train a model bundle and save it, reporting failures as an error object.
fn train(args: &TrainArgs, cli_args: &ParleyArgs) -> Result<()> {
    let result = run_training(args).inspect_err(|err| {
        if let Err(write_err) = output_result(&CommandFailure::from(err), cli_args) {
            tracing::error!(error = %write_err, "failed to write training failure");
        }
    })?;
    output_result(&result, cli_args)
}

fn run_training(args: &TrainArgs) -> Result<TrainingResult> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let catalog = IntentCatalog::load(&args.intents)?;
    let analyzer: Arc<dyn Analyzer> = Arc::new(EnglishAnalyzer::new()?);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let trainer = IntentTrainer::new(analyzer, config.classifier.clone());
    let outcome = trainer.train(&catalog, &mut rng)?;
    outcome.bundle.save(&args.model)?;

    Ok(TrainingResult {
        model_path: args.model.display().to_string(),
        report: outcome.report,
    })
}

/// Load everything an inference command needs.
fn build_engine(args: &EngineArgs) -> Result<ChatEngine> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let catalog = Arc::new(IntentCatalog::load(&args.intents)?);
    let analyzer: Arc<dyn Analyzer> = Arc::new(EnglishAnalyzer::new()?);

    let engine = match args.classifier {
        ClassifierKind::Neural => {
            let model = args.model.as_ref().ok_or_else(|| {
                ParleyError::model_load("the neural classifier requires --model")
            })?;
            let bundle = intent_classifier::load_bundle(model)?;
            ChatEngine::neural(bundle, catalog, analyzer, &config)
        }
        ClassifierKind::Keyword => ChatEngine::keyword(catalog, analyzer, &config)?,
    };

    tracing::info!(classifier = engine.classifier_name(), "chat engine ready");
    Ok(engine)
}

/// Build the engine or emit the startup failure payload.
fn start_engine(args: &EngineArgs, cli_args: &ParleyArgs) -> Result<ChatEngine> {
    build_engine(args).inspect_err(|err| {
        tracing::error!(error = %err, "failed to start");
        if let Err(write_err) = output_result(&ChatResponse::startup_failure(err), cli_args) {
            tracing::error!(error = %write_err, "failed to write startup failure");
        }
    })
}

/// Answer a single utterance.
fn ask(args: &AskArgs, cli_args: &ParleyArgs) -> Result<()> {
    let engine = start_engine(&args.engine, cli_args)?;
    let response = engine.respond(&args.query_text(), args.engine.predictions);
    output_result(&response, cli_args)
}

/// Answer one utterance per stdin line until end of input.
fn chat(args: &ChatArgs, cli_args: &ParleyArgs) -> Result<()> {
    let engine = start_engine(&args.engine, cli_args)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let served = serve_lines(
        &engine,
        stdin.lock(),
        &mut stdout.lock(),
        args.engine.predictions,
        cli_args,
    )?;

    tracing::info!(served, "input closed");
    Ok(())
}

/// Write one response per input line. A line that is not valid UTF-8 gets an
/// error response; only read and write failures end the loop.
fn serve_lines<R: BufRead, W: Write>(
    engine: &ChatEngine,
    input: R,
    out: &mut W,
    include_predictions: bool,
    cli_args: &ParleyArgs,
) -> Result<usize> {
    let mut served = 0usize;
    for raw in input.split(b'\n') {
        let mut raw = raw?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }

        let response = match String::from_utf8(raw) {
            Ok(line) => engine.respond(&line, include_predictions),
            Err(err) => {
                tracing::warn!(line = served + 1, "skipping input that is not valid UTF-8");
                let err = ParleyError::Io(io::Error::new(io::ErrorKind::InvalidData, err));
                ChatResponse::request_failure(&err)
            }
        };
        write_result(out, &response, cli_args)?;
        served += 1;
    }
    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    const INTENTS: &str = r#"{
        "intents": [
            {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"],
             "keywords": ["hi", "hello"]},
            {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Goodbye!"]}
        ]
    }"#;

    fn write_intents(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("intents.json");
        std::fs::write(&path, INTENTS).unwrap();
        path
    }

    fn parse(argv: &[&str]) -> ParleyArgs {
        ParleyArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_train_writes_bundle() {
        let dir = TempDir::new().unwrap();
        let intents = write_intents(dir.path());
        let model = dir.path().join("model.bin");

        let args = parse(&[
            "parley",
            "-q",
            "train",
            "-i",
            intents.to_str().unwrap(),
            "-m",
            model.to_str().unwrap(),
            "--seed",
            "3",
        ]);
        execute_command(args).unwrap();

        assert!(model.exists());
        assert!(intent_classifier::load_bundle(&model).is_ok());
    }

    #[test]
    fn test_neural_engine_requires_model() {
        let dir = TempDir::new().unwrap();
        let intents = write_intents(dir.path());

        let args = parse(&["parley", "chat", "-i", intents.to_str().unwrap()]);
        let Command::Chat(chat_args) = &args.command else {
            panic!("expected chat command");
        };

        let err = build_engine(&chat_args.engine).unwrap_err();
        assert!(matches!(err, ParleyError::ModelLoad(_)));
    }

    #[test]
    fn test_keyword_engine_from_args() {
        let dir = TempDir::new().unwrap();
        let intents = write_intents(dir.path());

        let args = parse(&[
            "parley",
            "chat",
            "-i",
            intents.to_str().unwrap(),
            "--classifier",
            "keyword",
            "--seed",
            "1",
        ]);
        let Command::Chat(chat_args) = &args.command else {
            panic!("expected chat command");
        };

        let engine = build_engine(&chat_args.engine).unwrap();
        assert_eq!(engine.classifier_name(), "keyword");
        assert_eq!(engine.respond("hello", false).intent, "greeting");
    }

    #[test]
    fn test_chat_survives_invalid_utf8_line() {
        let dir = TempDir::new().unwrap();
        let intents = write_intents(dir.path());
        let args = parse(&[
            "parley",
            "chat",
            "-i",
            intents.to_str().unwrap(),
            "--classifier",
            "keyword",
            "--seed",
            "1",
        ]);
        let Command::Chat(chat_args) = &args.command else {
            panic!("expected chat command");
        };
        let engine = build_engine(&chat_args.engine).unwrap();

        let input: &[u8] = b"hello\r\n\xff\xfe bad\nbye\n";
        let mut out = Vec::new();
        let served = serve_lines(&engine, input, &mut out, false, &args).unwrap();

        assert_eq!(served, 3);
        let lines: Vec<ChatResponse> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].intent, "greeting");
        assert_eq!(lines[1].error.as_ref().unwrap().code, "io_error");
        assert!(lines[2].error.is_none());
    }

    #[test]
    fn test_train_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let model = dir.path().join("model.bin");

        let args = parse(&[
            "parley",
            "-q",
            "train",
            "-i",
            missing.to_str().unwrap(),
            "-m",
            model.to_str().unwrap(),
        ]);
        let Command::Train(train_args) = &args.command else {
            panic!("expected train command");
        };

        let err = run_training(train_args).unwrap_err();
        assert!(matches!(err, ParleyError::CatalogLoad(_)));
        assert!(!model.exists());
    }

    #[test]
    fn test_missing_catalog() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");

        let args = parse(&[
            "parley",
            "chat",
            "-i",
            missing.to_str().unwrap(),
            "--classifier",
            "keyword",
        ]);
        let Command::Chat(chat_args) = &args.command else {
            panic!("expected chat command");
        };

        let err = build_engine(&chat_args.engine).unwrap_err();
        assert!(matches!(err, ParleyError::CatalogLoad(_)));
    }
}
