//! CLI integration tests

use std::process::Command;

fn soundboard_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_soundboard"))
}

fn isolated_bin(dir: &std::path::Path) -> Command {
    let mut cmd = soundboard_bin();
    cmd.env("HOME", dir).env("XDG_CONFIG_HOME", dir);
    cmd
}

#[test]
fn help_output() {
    let output = soundboard_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("soundboard"));
    assert!(stdout.contains("--database"));
    assert!(stdout.contains("--recordings-dir"));
    assert!(stdout.contains("config"));
}

#[test]
fn version_output() {
    let output = soundboard_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("soundboard"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated_bin(dir.path())
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("soundboard"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();

    let set = isolated_bin(dir.path())
        .args(["config", "set", "database_path", "/data/board.sqlite"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success());

    let get = isolated_bin(dir.path())
        .args(["config", "get", "database_path"])
        .output()
        .expect("Failed to execute command");
    assert!(get.status.success());
    let stdout = String::from_utf8_lossy(&get.stdout);
    assert!(stdout.contains("/data/board.sqlite"));
}

#[test]
fn config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated_bin(dir.path())
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();

    let first = isolated_bin(dir.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let second = isolated_bin(dir.path())
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(!second.status.success());
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(
        stderr.contains("exists"),
        "Expected error about existing config, got: {}",
        stderr
    );
}
