//! Integration tests for logger behavior.

use nu_enrollment::logger::{current_level, set_level, set_level_from_str, Level};
use nu_enrollment::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("DEBUG"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    assert_eq!(current_level(), Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_and_stamps_lines() {
    use nu_enrollment::logger::{close_file_logging, init_file_logging};
    use std::fs;
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs").join("run.log");

    assert!(init_file_logging(&path));
    error!("disk is full");
    close_file_logging();

    let content = fs::read_to_string(&path).unwrap();
    let line = content
        .lines()
        .find(|l| l.contains("disk is full"))
        .expect("logged line present");
    assert!(line.ends_with("Z [ERROR] disk is full"));
    assert!(line.starts_with(|c: char| c.is_ascii_digit()));
}
