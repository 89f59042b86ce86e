#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use metricsink_server::config::{self, StorageMode};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
storage:
  dirr: "/tmp" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
    assert!(err.to_string().contains("invalid yaml"));
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.server.listen, "0.0.0.0:5000");
    assert_eq!(cfg.storage.mode, StorageMode::Normal);
    assert_eq!(cfg.storage.db_path().to_str(), Some("/data/wa.sqlite"));
    assert_eq!(cfg.log.level, "info");
}

#[test]
fn rejects_bad_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nserver:\n  listen: \"nowhere\"\n",
        "version: 1\nlog:\n  level: loud\n",
        "version: 1\nstorage:\n  dir: \"\"\n",
        "version: 1\nstorage:\n  mode: staging\n",
    ] {
        assert!(config::load_from_str(bad).is_err(), "{bad}");
    }
}

#[test]
fn testing_mode_selects_alternate_table() {
    let cfg = config::load_from_str("version: 1\nstorage:\n  mode: testing\n").unwrap();
    assert_eq!(cfg.storage.mode.table_name(), "testing_table_metrics");
    assert_eq!(StorageMode::Normal.table_name(), "metrics");
}

#[test]
fn env_overrides_apply_on_top_of_file() {
    let mut cfg = config::load_from_str("version: 1\nlog:\n  level: warn\n").unwrap();
    let env: HashMap<&str, &str> = [
        ("LOGLEVEL", "DEBUG"),
        ("SQLITE_DB_PATH", "/var/lib/metricsink"),
        ("METRICSINK_ENV", "testing"),
    ]
    .into_iter()
    .collect();

    cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
    cfg.validate().unwrap();

    assert_eq!(cfg.log.level, "debug");
    assert_eq!(cfg.storage.db_path().to_str(), Some("/var/lib/metricsink/wa.sqlite"));
    assert_eq!(cfg.storage.mode, StorageMode::Testing);
}

#[test]
fn unrelated_env_leaves_defaults() {
    let mut cfg = config::load_from_str("version: 1\n").unwrap();
    cfg.apply_overrides(|k| (k == "METRICSINK_ENV").then(|| "production".to_string()));
    assert_eq!(cfg.storage.mode, StorageMode::Normal);
}
