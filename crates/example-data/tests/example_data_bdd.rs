//! Behavioural tests for the example-data crate.
//!
//! These tests validate the crate's behaviour against Gherkin scenarios
//! covering fixture loading, file I/O, and deterministic generation.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use camino::Utf8PathBuf;
use example_data::{
    FixtureError, GeneratorConfig, SeedLedger, TransactionTypeSeed, generate_example_ledger,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Fixture with a transaction pointing at a project that does not exist.
const DANGLING_FIXTURE_JSON: &str = r#"{
    "version": 1,
    "projects": [],
    "transactions": [{
        "id": "1",
        "projectId": "404",
        "projectTitle": "Ghost",
        "amount": 100,
        "type": "investment",
        "status": "completed",
        "date": "2025-03-12T10:30:00Z",
        "from": "Jean Martin",
        "to": "Alice Dupont"
    }]
}"#;

/// Test world holding fixture inputs and results.
#[derive(Default, ScenarioState)]
struct World {
    json_input: Slot<String>,
    fixture_path: Slot<Utf8PathBuf>,
    temp_dir: Slot<Arc<TempDir>>,
    config: Slot<GeneratorConfig>,
    expected: Slot<SeedLedger>,
    load_result: Slot<Result<SeedLedger, FixtureError>>,
    generated: Slot<SeedLedger>,
    second_generation: Slot<SeedLedger>,
}

impl World {
    fn load_result(&self) -> Result<SeedLedger, FixtureError> {
        self.load_result.get().expect("load result should be set")
    }

    fn ledger(&self) -> SeedLedger {
        self.load_result().expect("ledger should load")
    }

    fn config(&self) -> GeneratorConfig {
        self.config.get().expect("generator config should be set")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("the bundled marketplace fixture")]
fn the_bundled_marketplace_fixture(world: &World) {
    let ledger = SeedLedger::embedded().expect("bundled fixture");
    world
        .json_input
        .set(ledger.to_json().expect("serialise bundled fixture"));
}

#[given("a generated ledger written to a temporary file")]
fn a_generated_ledger_written_to_a_temporary_file(world: &World) {
    let ledger = generate_example_ledger(&GeneratorConfig::default()).expect("generated");
    let dir = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("ledger.json")).expect("utf-8 path");
    std::fs::write(&path, ledger.to_json().expect("serialise")).expect("write fixture");

    world.fixture_path.set(path);
    world.temp_dir.set(Arc::new(dir));
    world.expected.set(ledger);
}

#[given("a fixture path that does not exist")]
fn a_fixture_path_that_does_not_exist(world: &World) {
    let dir = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.json")).expect("utf-8 path");
    world.fixture_path.set(path);
    world.temp_dir.set(Arc::new(dir));
}

#[given("a generator configuration with seed {seed:u64}")]
fn a_generator_configuration_with_seed(world: &World, seed: u64) {
    world.config.set(GeneratorConfig {
        seed,
        ..GeneratorConfig::default()
    });
}

#[given("malformed fixture JSON")]
fn malformed_fixture_json(world: &World) {
    world.json_input.set("{ not json".to_owned());
}

#[given("fixture JSON with a dangling project reference")]
fn fixture_json_with_a_dangling_project_reference(world: &World) {
    world.json_input.set(DANGLING_FIXTURE_JSON.to_owned());
}

// ============================================================================
// When steps
// ============================================================================

#[when("the fixture is loaded")]
fn the_fixture_is_loaded(world: &World) {
    let json = world.json_input.get().expect("JSON input should be set");
    world.load_result.set(SeedLedger::from_json(&json));
}

#[when("the fixture file is loaded")]
fn the_fixture_file_is_loaded(world: &World) {
    let path = world.fixture_path.get().expect("fixture path should be set");
    world.load_result.set(SeedLedger::from_file(&path));
}

#[when("the ledger is generated")]
fn the_ledger_is_generated(world: &World) {
    let ledger = generate_example_ledger(&world.config()).expect("generation succeeds");
    world.generated.set(ledger);
}

#[when("the ledger is generated twice")]
fn the_ledger_is_generated_twice(world: &World) {
    let config = world.config();
    let first = generate_example_ledger(&config).expect("first generation");
    let second = generate_example_ledger(&config).expect("second generation");

    world.generated.set(first);
    world.second_generation.set(second);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("loading succeeds")]
fn loading_succeeds(world: &World) {
    let result = world.load_result();
    assert!(result.is_ok(), "Expected loading to succeed: {result:?}");
}

#[then("the ledger holds {projects:usize} projects and {transactions:usize} transactions")]
fn the_ledger_holds_counts(world: &World, projects: usize, transactions: usize) {
    let ledger = world.ledger();
    assert_eq!(ledger.projects().len(), projects);
    assert_eq!(ledger.transactions().len(), transactions);
}

#[then("the loaded ledger equals the generated ledger")]
fn the_loaded_ledger_equals_the_generated_ledger(world: &World) {
    let expected = world.expected.get().expect("expected ledger should be set");
    assert_eq!(world.ledger(), expected);
}

#[then("both generations produce identical ledgers")]
fn both_generations_produce_identical_ledgers(world: &World) {
    let first = world.generated.get().expect("first generation should be set");
    let second = world
        .second_generation
        .get()
        .expect("second generation should be set");

    assert_eq!(first, second, "Generations should be deterministic");
}

#[then("every project total equals the sum of its investments")]
fn every_project_total_equals_the_sum_of_its_investments(world: &World) {
    let ledger = world.generated.get().expect("ledger should be generated");
    for project in ledger.projects() {
        let invested: Decimal = ledger
            .transactions()
            .iter()
            .filter(|t| t.project_id == project.id && t.kind == TransactionTypeSeed::Investment)
            .map(|t| t.amount)
            .sum();
        assert_eq!(project.investment, Some(invested), "project {}", project.id);
    }
}

#[then("loading fails with a parse error")]
fn loading_fails_with_a_parse_error(world: &World) {
    match world.load_result() {
        Err(FixtureError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {other:?}"),
    }
}

#[then("loading fails with an unknown project error")]
fn loading_fails_with_an_unknown_project_error(world: &World) {
    match world.load_result() {
        Err(FixtureError::UnknownProject { project_id, .. }) => assert_eq!(project_id, "404"),
        other => panic!("Expected UnknownProject, got: {other:?}"),
    }
}

#[then("loading fails with an I/O error")]
fn loading_fails_with_an_io_error(world: &World) {
    match world.load_result() {
        Err(FixtureError::IoError { path, .. }) => assert!(path.as_str().ends_with("missing.json")),
        other => panic!("Expected IoError, got: {other:?}"),
    }
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Bundled fixture loads successfully"
)]
fn bundled_fixture_loads_successfully(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Fixture file round-trips through disk"
)]
fn fixture_file_round_trips_through_disk(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Deterministic generation produces identical ledgers"
)]
fn deterministic_generation_produces_identical_ledgers(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Generated ledgers reconcile project totals"
)]
fn generated_ledgers_reconcile_project_totals(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Malformed JSON fails loading"
)]
fn malformed_json_fails_loading(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Transactions must reference known projects"
)]
fn transactions_must_reference_known_projects(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Missing fixture file reports an I/O error"
)]
fn missing_fixture_file_reports_an_io_error(world: World) {
    let _ = world;
}
