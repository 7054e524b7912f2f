use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Application home with `claude` installed at a temporary directory
struct Env {
    _tmp: TempDir,
    home: PathBuf,
    local: PathBuf,
}

impl Env {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let local = tmp.path().join("claude");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&local).unwrap();

        let mappings = serde_json::json!({
            "claude": {
                "installed": true,
                "config_directory": "~/.claude",
                "custom_config_directory": local.display().to_string(),
            }
        });
        fs::write(
            home.join("mappings.json"),
            serde_json::to_string_pretty(&mappings).unwrap(),
        )
        .unwrap();

        Self {
            _tmp: tmp,
            home,
            local,
        }
    }

    fn empty() -> Self {
        let env = Self::new();
        fs::remove_file(env.home.join("mappings.json")).unwrap();
        env
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("aisync").unwrap();
        cmd.env("AISYNC_HOME", &self.home).env_remove("RUST_LOG");
        cmd
    }

    fn mirror(&self) -> PathBuf {
        self.home.join("repo").join("claude")
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("aisync").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "AI Coding-Assistant Configuration Sync",
        ))
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("pull"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("diff"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_version_output() {
    let mut cmd = Command::cargo_bin("aisync").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_config_command() {
    let env = Env::new();
    env.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(env.home.display().to_string()))
        .stdout(predicate::str::contains("max_backups = 10"))
        .stdout(predicate::str::contains("Installed tools: claude"));
}

#[test]
fn test_push_copies_to_mirror() {
    let env = Env::new();
    write(&env.local.join("settings.json"), "{\"theme\": \"dark\"}");
    write(&env.local.join("CLAUDE.md"), "# rules");

    env.cmd()
        .args(["push", "--only", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claude (local -> mirror)"))
        .stdout(predicate::str::contains("+ settings.json"))
        .stdout(predicate::str::contains("added: 2"));

    assert_eq!(
        fs::read_to_string(env.mirror().join("CLAUDE.md")).unwrap(),
        "# rules"
    );
}

#[test]
fn test_push_detects_current_tool() {
    let env = Env::new();
    write(&env.local.join("settings.json"), "{}");

    env.cmd()
        .env("CLAUDE_HOME", "1")
        .arg("push")
        .assert()
        .success()
        .stdout(predicate::str::contains("claude (local -> mirror)"));
}

#[test]
fn test_push_dry_run_writes_nothing() {
    let env = Env::new();
    write(&env.local.join("settings.json"), "{}");

    env.cmd()
        .args(["--dry-run", "push", "--only", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry run] claude"))
        .stdout(predicate::str::contains("+ settings.json"));

    assert!(!env.mirror().exists());
}

#[test]
fn test_push_withholds_secrets() {
    let env = Env::new();
    write(&env.local.join("settings.json"), "password=supersecret1\n");

    env.cmd()
        .args(["push", "--only", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains("possible secrets: password"))
        .stdout(predicate::str::contains("passw...et1"))
        .stderr(predicate::str::contains("--force"));

    assert!(!env.mirror().join("settings.json").exists());

    env.cmd()
        .args(["push", "--only", "claude", "--force"])
        .assert()
        .success();

    assert!(env.mirror().join("settings.json").exists());
}

#[test]
fn test_push_uninstalled_tool_fails() {
    let env = Env::new();

    env.cmd()
        .args(["push", "--only", "cursor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn test_all_without_scan_fails() {
    let env = Env::empty();

    env.cmd()
        .args(["push", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("aisync scan"));
}

#[test]
fn test_pull_overwrites_with_yes() {
    let env = Env::new();
    write(&env.local.join("settings.json"), "local");
    write(&env.mirror().join("settings.json"), "remote");

    env.cmd()
        .args(["pull", "--only", "claude", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("will be overwritten"))
        .stdout(predicate::str::contains("~ settings.json"))
        .stdout(predicate::str::contains("backup: "));

    assert_eq!(
        fs::read_to_string(env.local.join("settings.json")).unwrap(),
        "remote"
    );

    env.cmd()
        .args(["backup", "list", "--tool", "claude"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pre-pull"));
}

#[test]
fn test_pull_without_mirror_fails() {
    let env = Env::new();

    env.cmd()
        .args(["pull", "--only", "claude", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mirror directory"));
}

#[test]
fn test_status_json() {
    let env = Env::new();
    write(&env.local.join("settings.json"), "local");
    write(&env.local.join("CLAUDE.md"), "same");
    write(&env.mirror().join("settings.json"), "remote");
    write(&env.mirror().join("CLAUDE.md"), "same");

    let output = env
        .cmd()
        .args(["status", "--only", "claude", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let statuses: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(statuses[0]["tool"], "claude");
    assert_eq!(statuses[0]["state"], "out_of_sync");
    assert_eq!(statuses[0]["differences"].as_array().unwrap().len(), 1);
    assert_eq!(statuses[0]["differences"][0]["path"], "settings.json");
}

#[test]
fn test_diff_shows_changes() {
    let env = Env::new();
    write(&env.local.join("CLAUDE.md"), "line one\nlocal line\n");
    write(&env.mirror().join("CLAUDE.md"), "line one\nremote line\n");

    env.cmd()
        .args(["diff", "--only", "claude", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) differ"))
        .stdout(predicate::str::contains("CLAUDE.md (+1 -1)"))
        .stdout(predicate::str::contains("-local line"))
        .stdout(predicate::str::contains("+remote line"));
}

#[test]
fn test_scan_dry_run_does_not_save() {
    let env = Env::empty();

    env.cmd()
        .args(["--dry-run", "scan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude Code"))
        .stdout(predicate::str::contains("mappings not saved"));

    assert!(!env.home.join("mappings.json").exists());
}

#[test]
fn test_tools_lifecycle() {
    let env = Env::new();
    let definition = env.home.join("aider.toml");
    fs::write(
        &definition,
        "name = \"aider\"\ndisplay_name = \"Aider\"\nconfig_directory = \"~/.aider\"\nsync_paths = [\"conf.yml\"]\n",
    )
    .unwrap();

    env.cmd()
        .args(["tools", "add"])
        .arg(&definition)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered aider"));

    env.cmd()
        .args(["tools", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aider"))
        .stdout(predicate::str::contains("custom"))
        .stdout(predicate::str::contains("built-in"));

    env.cmd()
        .args(["tools", "show", "aider"])
        .assert()
        .success()
        .stdout(predicate::str::contains("conf.yml"));

    env.cmd()
        .args(["tools", "remove", "aider"])
        .assert()
        .success();

    env.cmd()
        .args(["tools", "show", "aider"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool"));
}

#[test]
fn test_builtin_tools_cannot_be_removed() {
    let env = Env::new();

    env.cmd()
        .args(["tools", "remove", "claude"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("built-in"));
}

#[test]
fn test_backup_create_and_restore() {
    let env = Env::new();
    write(&env.local.join("settings.json"), "original");

    let output = env
        .cmd()
        .args(["backup", "create", "claude"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout
        .split_whitespace()
        .nth(2)
        .unwrap()
        .to_string();
    assert!(id.ends_with("_manual"));

    write(&env.local.join("settings.json"), "changed");

    env.cmd()
        .args(["backup", "restore", "claude", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Previous state saved as"));

    assert_eq!(
        fs::read_to_string(env.local.join("settings.json")).unwrap(),
        "original"
    );

    env.cmd()
        .args(["backup", "restore", "claude", "missing-id", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_migrate_instructions_between_tools() {
    let env = Env::new();
    let gemini = env.home.parent().unwrap().join("gemini");
    fs::create_dir_all(&gemini).unwrap();
    let mappings = serde_json::json!({
        "claude": {
            "installed": true,
            "config_directory": "~/.claude",
            "custom_config_directory": env.local.display().to_string(),
        },
        "gemini": {
            "installed": true,
            "config_directory": "~/.gemini",
            "custom_config_directory": gemini.display().to_string(),
        }
    });
    fs::write(
        env.home.join("mappings.json"),
        serde_json::to_string_pretty(&mappings).unwrap(),
    )
    .unwrap();
    write(&env.local.join("CLAUDE.md"), "Always ask Claude.\n");
    write(&gemini.join("settings.json"), "{\"keep\": true}");

    env.cmd()
        .args(["--dry-run", "migrate", "claude", "gemini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[settings] skipped: source_missing"))
        .stdout(predicate::str::contains("Would migrate 1 file(s)"));
    assert!(!gemini.join("GEMINI.md").exists());

    env.cmd()
        .args(["migrate", "claude", "gemini", "--kind", "instructions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated 1 file(s)"));
    assert_eq!(
        fs::read_to_string(gemini.join("GEMINI.md")).unwrap(),
        "Always ask Gemini CLI.\n"
    );
    assert_eq!(
        fs::read_to_string(gemini.join("settings.json")).unwrap(),
        "{\"keep\": true}"
    );

    env.cmd()
        .args(["migrate", "claude", "claude"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid migration"));
}
