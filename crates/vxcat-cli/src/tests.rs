use std::path::PathBuf;

use super::*;

#[test]
fn parses_inspect_command() {
    let cli = Cli::try_parse_from(["vxcat", "inspect", "SFP+ 10G SR 300m"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Inspect { ref title } if title == "SFP+ 10G SR 300m"
    ));
}

#[test]
fn parses_enrich_command() {
    let cli = Cli::try_parse_from(["vxcat", "enrich", "--input", "in.csv", "--output", "out.csv"])
        .expect("expected valid cli args");

    let Commands::Enrich { input, output } = cli.command else {
        panic!("expected enrich command");
    };
    assert_eq!(input, PathBuf::from("in.csv"));
    assert_eq!(output, PathBuf::from("out.csv"));
}

#[test]
fn consolidate_defaults() {
    let cli = Cli::try_parse_from([
        "vxcat",
        "consolidate",
        "--input",
        "in.csv",
        "--output",
        "out.csv",
    ])
    .expect("expected valid cli args");

    let Commands::Consolidate {
        exclude,
        keep_zero_prices,
        dry_run,
        ..
    } = cli.command
    else {
        panic!("expected consolidate command");
    };
    assert!(exclude.is_empty());
    assert!(!keep_zero_prices);
    assert!(!dry_run);
}

#[test]
fn consolidate_accepts_repeated_exclusions_and_flags() {
    let cli = Cli::try_parse_from([
        "vxcat",
        "consolidate",
        "--input",
        "in.csv",
        "--output",
        "out.csv",
        "--exclude",
        "(?i)bundle",
        "--exclude",
        "^Test",
        "--keep-zero-prices",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    let Commands::Consolidate {
        exclude,
        keep_zero_prices,
        dry_run,
        ..
    } = cli.command
    else {
        panic!("expected consolidate command");
    };
    assert_eq!(exclude, ["(?i)bundle", "^Test"]);
    assert!(keep_zero_prices);
    assert!(dry_run);
}

#[test]
fn consolidate_requires_output() {
    let result = Cli::try_parse_from(["vxcat", "consolidate", "--input", "in.csv"]);
    assert!(result.is_err());
}

#[test]
fn parses_pairs_with_limit() {
    let cli = Cli::try_parse_from(["vxcat", "pairs", "--input", "in.csv", "--limit", "5"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Pairs { limit: Some(5), .. }));
}

#[test]
fn pairs_limit_must_be_a_number() {
    let result = Cli::try_parse_from(["vxcat", "pairs", "--input", "in.csv", "--limit", "all"]);
    assert!(result.is_err());
}

#[test]
fn parses_generate_with_base() {
    let cli = Cli::try_parse_from([
        "vxcat",
        "generate",
        "--families",
        "families.yaml",
        "--output",
        "generated.csv",
        "--base",
        "export.csv",
    ])
    .expect("expected valid cli args");

    let Commands::Generate {
        families, base, ..
    } = cli.command
    else {
        panic!("expected generate command");
    };
    assert_eq!(families, PathBuf::from("families.yaml"));
    assert_eq!(base, Some(PathBuf::from("export.csv")));
}

#[test]
fn generate_base_is_optional() {
    let cli = Cli::try_parse_from([
        "vxcat",
        "generate",
        "--families",
        "families.yaml",
        "--output",
        "generated.csv",
    ])
    .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Generate { base: None, .. }));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["vxcat"]).is_err());
}
