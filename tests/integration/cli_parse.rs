use clap::Parser;
use tempfile::TempDir;
use zwotag::config::ZwotagConfig;
use zwotag::tooling::cli::{Cli, CliContext, Commands};

use crate::integration::support::{read_file, workout, write_file};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["zwotag", "tag", "./workouts"],
        vec!["zwotag", "tag", "./workouts", "--in-place"],
        vec!["zwotag", "tag", "./workouts", "--output", "./out", "--dry-run"],
        vec!["zwotag", "tag", "./workouts", "--format", "json"],
        vec!["zwotag", "groups", "./workouts"],
        vec!["zwotag", "--log-level", "debug", "groups", "./workouts"],
        vec!["zwotag", "config"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_missing_root() {
    assert!(Cli::try_parse_from(["zwotag", "tag"]).is_err());
    assert!(Cli::try_parse_from(["zwotag", "groups"]).is_err());
}

#[test]
fn tag_command_reports_json() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("w");
    write_file(&input, "A/B/x.zwo", &workout("X", "x."));

    let cli = Cli::try_parse_from([
        "zwotag",
        "tag",
        input.to_str().unwrap(),
        "--in-place",
        "--format",
        "json",
    ])
    .unwrap();
    let context = CliContext::with_config(ZwotagConfig::default());
    let output = context.execute(&cli.command).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["files"][0]["tag"], "[1-1]");
    assert_eq!(value["files"][0]["status"], "tagged");
    assert_eq!(read_file(&input, "A/B/x.zwo"), workout("X [1-1]", "A/B\nx."));
}

#[test]
fn tag_command_dry_run_text() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("w");
    write_file(&input, "A/x.zwo", &workout("X", "x."));

    let context = CliContext::with_config(ZwotagConfig::default());
    let output = context
        .execute(&Commands::Tag {
            root: input.clone(),
            in_place: false,
            output: None,
            dry_run: true,
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.contains("Dry run"));
    assert!(output.contains("Processed 1 groups, 1 files."));
    assert!(!temp.path().join("w_tagged").exists());
}

#[test]
fn tag_command_rejects_missing_root() {
    let temp = TempDir::new().unwrap();
    let context = CliContext::with_config(ZwotagConfig::default());
    let result = context.execute(&Commands::Tag {
        root: temp.path().join("absent"),
        in_place: true,
        output: None,
        dry_run: false,
        format: "text".to_string(),
    });
    assert!(result.is_err());
}
