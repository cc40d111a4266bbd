use std::fs;
use std::path::Path;

use cooee::cli::logging::LogTarget;
use cooee::config::{ConfigLoader, CooeeConfig, LoggingConfig};
use cooee::io::paths::CooeePaths;
use cooee::CooeeError;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn platform_paths(dir: &Path) -> CooeePaths {
    CooeePaths {
        config_dir: dir.to_path_buf(),
        data_dir: dir.to_path_buf(),
    }
}

#[test]
fn test_defaults_when_nothing_found() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_search_dirs(dir.path(), Some(&platform_paths(dir.path())))
        .load()
        .unwrap();
    assert_eq!(config, CooeeConfig::default());
    assert_eq!(config.providers.numbers_delay_ms, 400);
    assert_eq!(config.providers.pay_delay_ms, 900);
    assert_eq!(config.ui.tick_rate_ms, 50);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_unrelated_config_yaml_in_working_dir_is_ignored() {
    let local = TempDir::new().unwrap();
    let platform = TempDir::new().unwrap();
    fs::write(local.path().join("config.yaml"), "database:\n  url: postgres://x\n").unwrap();
    fs::write(platform.path().join("cooee.yaml"), "ui:\n  tick_rate_ms: 0\n").unwrap();

    let config = ConfigLoader::new()
        .with_search_dirs(local.path(), Some(&platform_paths(platform.path())))
        .load()
        .unwrap();
    assert_eq!(config, CooeeConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cooee.yaml"),
        "providers:\n  pay_delay_ms: 10\n  seed: 99\nlogging:\n  level: debug\n",
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_search_dirs(dir.path(), None)
        .load()
        .unwrap();
    assert_eq!(config.providers.pay_delay_ms, 10);
    assert_eq!(config.providers.seed, Some(99));
    assert_eq!(config.providers.countries_delay_ms, 300);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.ui.tick_rate_ms, 50);
}

#[test]
fn test_local_file_wins_over_platform_file() {
    let local = TempDir::new().unwrap();
    let platform = TempDir::new().unwrap();
    let platform_dirs = platform_paths(platform.path());
    fs::write(local.path().join("cooee.yaml"), "ui:\n  tick_rate_ms: 20\n").unwrap();
    fs::write(platform_dirs.config_file(), "ui:\n  tick_rate_ms: 80\n").unwrap();

    let config = ConfigLoader::new()
        .with_search_dirs(local.path(), Some(&platform_dirs))
        .load()
        .unwrap();
    assert_eq!(config.ui.tick_rate_ms, 20);

    let empty = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_search_dirs(empty.path(), Some(&platform_dirs))
        .load()
        .unwrap();
    assert_eq!(config.ui.tick_rate_ms, 80);
}

#[test]
fn test_explicit_path_overrides_search() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cooee.yaml"), "ui:\n  tick_rate_ms: 20\n").unwrap();
    let explicit = dir.path().join("other.yaml");
    fs::write(&explicit, "providers:\n  failure_rate: 0.25\n").unwrap();

    let config = ConfigLoader::new()
        .with_search_dirs(dir.path(), None)
        .with_explicit_path(Some(explicit))
        .load()
        .unwrap();
    assert_eq!(config.providers.failure_rate, 0.25);
    assert_eq!(config.ui.tick_rate_ms, 50);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .with_explicit_path(Some(dir.path().join("nope.yaml")))
        .load()
        .unwrap_err();
    assert!(matches!(err, CooeeError::Config(_)));
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    for (name, body) in [
        ("rate.yaml", "providers:\n  failure_rate: -0.1\n"),
        ("tick.yaml", "ui:\n  tick_rate_ms: 0\n"),
        ("unknown.yaml", "providers:\n  latency: 5\n"),
    ] {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        let result = ConfigLoader::new().with_explicit_path(Some(path)).load();
        assert!(
            matches!(result, Err(CooeeError::Config(_))),
            "{} should be rejected",
            name
        );
    }
}

#[test]
fn test_project_paths() {
    let dir = TempDir::new().unwrap();
    let paths = CooeePaths::for_project(dir.path());

    assert_eq!(paths.config_file(), dir.path().join(".cooee").join("config.yaml"));
    assert_eq!(paths.log_file(), dir.path().join(".cooee").join("cooee.log"));
}

#[test]
fn test_log_target_per_command() {
    let logging = LoggingConfig {
        level: "info".into(),
        file: Some("/tmp/cooee-test.log".into()),
    };
    assert_eq!(LogTarget::for_command(false, &logging), LogTarget::Stderr);
    assert_eq!(
        LogTarget::for_command(true, &logging),
        LogTarget::File("/tmp/cooee-test.log".into())
    );
}
