//! Scenario tests for the reward chart.

use std::fs;

use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;

use crate::config::Config;
use crate::models::{ChartMode, HistoryEvent, RewardChart};
use crate::store::{ChartStore, Repository};
use crate::{run, Cli, Commands};

/// Test fixture for scenario tests.
struct TestFixture {
    repo: Repository,
    config: Config,
    _temp_dir: TempDir,
}

impl TestFixture {
    fn new(mode: ChartMode) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("beloningskartan");

        let config = Config {
            data_dir: data_dir.clone(),
            export_dir: None,
            mode,
            log_level: "warn".to_string(),
        };
        let repo = Repository::new(ChartStore::open(&data_dir, mode));

        TestFixture {
            repo,
            config,
            _temp_dir: temp_dir,
        }
    }

    /// Parse a command line and run it against this fixture.
    fn exec(&self, args: &[&str]) -> Result<crate::commands::Reply, crate::errors::AppError> {
        let argv = std::iter::once("beloningskartan").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).expect("Failed to parse command line");
        run(&self.repo, &self.config, cli.command.unwrap_or(Commands::Show))
    }

    fn chart_file(&self) -> Value {
        let path = self.config.data_dir.join(self.config.mode.file_name());
        serde_json::from_str(&fs::read_to_string(path).expect("chart file missing")).unwrap()
    }
}

#[test]
fn test_new_toy_scenario() {
    let fixture = TestFixture::new(ChartMode::Ledger);

    fixture.exec(&["add", "New toy", "--target", "10"]).unwrap();
    fixture.exec(&["award", "amazing"]).unwrap();
    let reply = fixture.exec(&["award", "amazing"]).unwrap();
    assert_eq!(reply.status.as_deref(), Some("Added 5 stars! Total: 10"));
    assert!(reply.view.contains("New toy  10/10"));
    assert_eq!(reply.data["goals"][0]["reached"], true);

    let reply = fixture.exec(&["claim", "1"]).unwrap();
    assert_eq!(reply.data["stars"], 0);
    assert!(reply.data["goals"].as_array().unwrap().is_empty());

    let chart = fixture.repo.chart();
    assert_eq!(chart.stars, 0);
    assert!(chart.goals.is_empty());
    assert_eq!(chart.history.len(), 3);
    assert!(matches!(chart.history[0], HistoryEvent::Award { stars: 5, total: 5, .. }));
    assert!(matches!(chart.history[1], HistoryEvent::Award { stars: 5, total: 10, .. }));
    assert!(matches!(
        &chart.history[2],
        HistoryEvent::Claim { claimed, cost: 10, .. } if claimed == "New toy"
    ));
}

#[test]
fn test_fresh_stores_return_defaults() {
    let ledger = TestFixture::new(ChartMode::Ledger);
    assert_eq!(ledger.repo.chart(), RewardChart::empty(ChartMode::Ledger));

    let progress = TestFixture::new(ChartMode::Progress);
    assert_eq!(
        progress.repo.chart(),
        RewardChart::default_for(ChartMode::Progress)
    );

    // reading never creates the file
    assert!(!ledger.config.data_dir.exists());
}

#[test]
fn test_each_mutation_is_persisted() {
    let fixture = TestFixture::new(ChartMode::Ledger);

    fixture.repo.add_goal("Cinema", 4).unwrap();
    assert_eq!(fixture.chart_file()["goals"][0]["target"], 4);

    fixture.repo.add_stars(3).unwrap();
    assert_eq!(fixture.chart_file()["stars"], 3);
    assert_eq!(fixture.chart_file()["goals"][0]["progress"], 3);

    fixture.repo.remove_goal(0).unwrap();
    assert!(fixture.chart_file()["goals"].as_array().unwrap().is_empty());
}

#[test]
fn test_noops_do_not_write() {
    let fixture = TestFixture::new(ChartMode::Ledger);
    let path = fixture.config.data_dir.join("rewards.json");

    let change = fixture.repo.add_goal("  ", 10).unwrap();
    assert!(change.outcome.is_none());
    assert!(!path.exists());

    let change = fixture.repo.claim(3).unwrap();
    assert!(change.outcome.is_none());
    assert!(!path.exists());
}

#[test]
fn test_add_goal_count_grows_by_one() {
    let fixture = TestFixture::new(ChartMode::Progress);
    let names = ["Swim", "", "Bake", " \t ", "Paint"];
    let mut expected = fixture.repo.chart().goals.len();

    for name in names {
        fixture.repo.add_goal(name, 5).unwrap();
        if !name.trim().is_empty() {
            expected += 1;
        }
        assert_eq!(fixture.repo.chart().goals.len(), expected);
    }
}

#[test]
fn test_reset_after_stars_round_trips() {
    let fixture = TestFixture::new(ChartMode::Progress);

    fixture.exec(&["star", "1", "4"]).unwrap();
    fixture.exec(&["progress", "4", "2"]).unwrap();
    assert_eq!(fixture.repo.chart().goals[0].progress, 4);

    let reply = fixture.exec(&["reset"]).unwrap();
    assert_eq!(reply.status.as_deref(), Some("Reset 4 goals"));

    let chart = fixture.repo.chart();
    assert!(chart.goals.iter().all(|g| g.progress == 0));

    // load(save(S)) == S
    let store = ChartStore::open(&fixture.config.data_dir, ChartMode::Progress);
    store.save(&chart).unwrap();
    assert_eq!(store.load(), chart);
}

#[test]
fn test_remove_keeps_relative_order() {
    let fixture = TestFixture::new(ChartMode::Progress);
    fixture.exec(&["remove", "2"]).unwrap();

    let names: Vec<String> = fixture
        .repo
        .chart()
        .goals
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["Brush teeth", "Tidy room", "Read a book"]);
}

#[test]
fn test_claim_with_too_few_stars_floors_at_zero() {
    let fixture = TestFixture::new(ChartMode::Ledger);
    fixture.repo.add_goal("Bike", 50).unwrap();
    fixture.repo.add_stars(7).unwrap();

    let change = fixture.repo.claim(0).unwrap();
    assert_eq!(change.outcome.unwrap().stars_left, 0);
    assert_eq!(fixture.repo.chart().stars, 0);
}

#[test]
fn test_mode_mismatch_is_an_error() {
    let fixture = TestFixture::new(ChartMode::Progress);
    let err = fixture.exec(&["claim", "1"]).unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED");
    assert_eq!(err.exit_code(), crate::errors::EXIT_USER_ERROR);
}

#[test]
fn test_modes_use_separate_files() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = Repository::new(ChartStore::open(temp_dir.path(), ChartMode::Ledger));
    let progress = Repository::new(ChartStore::open(temp_dir.path(), ChartMode::Progress));

    ledger.add_stars(2).unwrap();
    progress.reset_all().unwrap();

    assert!(temp_dir.path().join("rewards.json").exists());
    assert!(temp_dir.path().join("goals.json").exists());
    assert_eq!(ledger.chart().stars, 2);
    assert_eq!(progress.chart().goals.len(), 4);
}

#[test]
fn test_export_ledger_history() {
    let fixture = TestFixture::new(ChartMode::Ledger);
    fixture.repo.add_goal("Cinema", 3).unwrap();
    fixture.repo.add_stars(3).unwrap();
    fixture.repo.claim(0).unwrap();

    let reply = fixture.exec(&["export"]).unwrap();
    assert_eq!(reply.data["records"], 2);

    let json_path = reply.data["jsonPath"].as_str().unwrap();
    let records: Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(records[0]["details"], "+3 stars");
    assert_eq!(records[1]["details"], "Claimed: Cinema");
    assert_eq!(records[1]["result"], "-3 stars");

    let csv_path = reply.data["csvPath"].as_str().unwrap();
    assert!(csv_path.ends_with(".csv"));
    assert!(fs::read_to_string(csv_path)
        .unwrap()
        .starts_with("date,details,result"));
}

#[test]
fn test_cli_parsing() {
    let cli = Cli::try_parse_from(["beloningskartan", "--mode", "progress", "--json"]).unwrap();
    assert_eq!(cli.mode, Some(ChartMode::Progress));
    assert!(cli.json);
    assert!(cli.command.is_none());

    // globals are accepted after the subcommand too
    let cli = Cli::try_parse_from(["beloningskartan", "award", "great", "--mode", "ledger"]).unwrap();
    assert_eq!(cli.mode, Some(ChartMode::Ledger));
    assert!(matches!(cli.command, Some(Commands::Award(_))));

    assert!(Cli::try_parse_from(["beloningskartan", "--mode", "stickers"]).is_err());
    assert!(Cli::try_parse_from(["beloningskartan", "add", "Toy", "--target", "0"]).is_err());
    assert!(Cli::try_parse_from(["beloningskartan", "add", "Toy", "--target", "101"]).is_err());
}
