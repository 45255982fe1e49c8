//! Tests for status, checksum, completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;
use std::path::Path;

#[test]
fn cli_parse_status() {
    match parse(&["mfetch", "status"]) {
        CliCommand::Status { source, json } => {
            assert!(!json);
            assert!(source.dir.is_none());
        }
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_status_json_with_dir() {
    match parse(&["mfetch", "status", "--json", "--dir", "models"]) {
        CliCommand::Status { source, json } => {
            assert!(json);
            assert_eq!(source.dir.as_deref(), Some(Path::new("models")));
        }
        _ => panic!("expected Status --json"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["mfetch", "checksum", "/tmp/a.model"]) {
        CliCommand::Checksum { path } => assert_eq!(path, Path::new("/tmp/a.model")),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_checksum_requires_path() {
    assert!(Cli::try_parse_from(["mfetch", "checksum"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["mfetch", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}
