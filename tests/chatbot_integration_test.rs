//! End-to-end tests: train on a catalog, persist the bundle, answer queries.

use std::sync::Arc;

use parley::analysis::analyzer::{Analyzer, EnglishAnalyzer};
use parley::catalog::{IntentCatalog, IntentDefinition};
use parley::chat::{ChatEngine, UNKNOWN_INTENT};
use parley::config::ParleyConfig;
use parley::error::{ParleyError, Result};
use parley::ml::bundle::ModelBundle;
use parley::ml::encoder::BagOfWordsEncoder;
use parley::ml::intent_classifier::{
    IntentClassifier, IntentRanker, IntentTrainer, NeuralIntentClassifier,
};
use parley::ml::mlp::MlpConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn two_intent_catalog() -> IntentCatalog {
    IntentCatalog::new(vec![
        IntentDefinition::new(
            "greeting",
            strings(&["hi", "hello"]),
            strings(&["Hello!", "Hi, how can I help?"]),
        ),
        IntentDefinition::new(
            "vawc_filing",
            strings(&["how to file vawc", "where do i file a complaint"]),
            strings(&[
                "Go to the barangay VAW desk.",
                "Use the Emergency button on the VAWC page.",
            ]),
        ),
    ])
    .unwrap()
}

fn analyzer() -> Arc<dyn Analyzer> {
    Arc::new(EnglishAnalyzer::new().unwrap())
}

fn train(catalog: &IntentCatalog, seed: u64) -> Result<ModelBundle> {
    let trainer = IntentTrainer::new(analyzer(), MlpConfig::default());
    Ok(trainer
        .train(catalog, &mut StdRng::seed_from_u64(seed))?
        .bundle)
}

#[test]
fn test_vawc_query_ranks_above_greeting() {
    let catalog = two_intent_catalog();
    let bundle = Arc::new(train(&catalog, 42).unwrap());
    let classifier = NeuralIntentClassifier::new(bundle, analyzer(), IntentRanker::default());

    let distribution = classifier
        .distribution("how do i file a vawc complaint")
        .unwrap();
    // Labels are sorted: greeting, vawc_filing.
    assert!(distribution[1] > distribution[0]);

    let ranked = classifier.classify("how do i file a vawc complaint").unwrap();
    assert_eq!(ranked.top().unwrap().tag, "vawc_filing");
}

#[test]
fn test_end_to_end_response() {
    let catalog = Arc::new(two_intent_catalog());
    let bundle = Arc::new(train(&catalog, 7).unwrap());
    let config = ParleyConfig::default().with_seed(11);
    let engine = ChatEngine::neural(bundle, catalog.clone(), analyzer(), &config);

    let response = engine.respond("how do i file a vawc complaint", true);

    assert_eq!(response.intent, "vawc_filing");
    assert!(
        catalog
            .get("vawc_filing")
            .unwrap()
            .responses
            .contains(&response.response)
    );
    let predictions = response.predictions.unwrap();
    assert!(predictions.windows(2).all(|w| w[0].probability >= w[1].probability));
    assert!(predictions.iter().all(|c| c.probability > 0.25));

    let greeting = engine.respond("hello", false);
    assert_eq!(greeting.intent, "greeting");
}

#[test]
fn test_bundle_round_trip_preserves_predictions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.bin");
    let catalog = two_intent_catalog();
    let bundle = train(&catalog, 3).unwrap();

    bundle.save(&path).unwrap();
    let reloaded = ModelBundle::load(&path).unwrap();

    let encoder = BagOfWordsEncoder::new();
    let tokens = analyzer().normalize("where do i file vawc").unwrap();
    let query = encoder.encode(&tokens, bundle.vocabulary());

    assert_eq!(reloaded.vocabulary(), bundle.vocabulary());
    assert_eq!(reloaded.labels(), bundle.labels());
    assert_eq!(reloaded.predict(&query).unwrap(), bundle.predict(&query).unwrap());
    assert_eq!(reloaded.metadata(), bundle.metadata());
}

#[test]
fn test_same_seed_same_bundle() {
    let catalog = two_intent_catalog();

    let a = train(&catalog, 99).unwrap();
    let b = train(&catalog, 99).unwrap();

    assert_eq!(a.state(), b.state());
}

#[test]
fn test_out_of_vocabulary_query_degrades_gracefully() {
    let catalog = Arc::new(two_intent_catalog());
    let bundle = Arc::new(train(&catalog, 5).unwrap());
    let engine = ChatEngine::neural(
        bundle,
        catalog,
        analyzer(),
        &ParleyConfig::default().with_seed(1),
    );

    let response = engine.respond("quantum chromodynamics lecture", false);

    assert!(response.error.is_none());
    assert!(!response.response.is_empty());
}

#[test]
fn test_empty_query() {
    let catalog = Arc::new(two_intent_catalog());
    let engine = ChatEngine::keyword(catalog, analyzer(), &ParleyConfig::default()).unwrap();

    let response = engine.respond("", false);

    assert_eq!(response.response, "No query provided.");
    assert_eq!(response.intent, UNKNOWN_INTENT);
}

#[test]
fn test_missing_bundle_is_model_load_error() {
    let dir = TempDir::new().unwrap();

    let err = ModelBundle::load(dir.path().join("absent.bin")).unwrap_err();

    assert!(matches!(err, ParleyError::ModelLoad(_)));
}

#[test]
fn test_sample_catalog_trains() {
    let catalog = IntentCatalog::load(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/intents.json"),
    )
    .unwrap();
    let bundle = Arc::new(train(&catalog, 42).unwrap());
    let classifier = NeuralIntentClassifier::new(bundle, analyzer(), IntentRanker::default());

    let ranked = classifier.classify("How do I file a VAWC report?").unwrap();
    assert_eq!(ranked.top().unwrap().tag, "vawc_filing");

    let ranked = classifier.classify("Goodbye!").unwrap();
    assert_eq!(ranked.top().unwrap().tag, "farewell");
}
