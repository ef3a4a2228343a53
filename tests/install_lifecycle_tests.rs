//! Install, status and uninstall through the binary

mod common;

use predicates::prelude::*;

const MARKER: &str = "# Added by TimesheetBot installer";
const EXPORT: &str = r#"export PATH="$HOME/.local/bin:$PATH""#;
const PROFILES: [&str; 4] = [".zshrc", ".zprofile", ".bash_profile", ".bashrc"];

#[test]
fn test_install_creates_layout() {
    let home = common::TestHome::new();
    let (_release, source) = common::create_release();

    home.cmd()
        .args(["install", "--source"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed ~/Applications/tsbot"))
        .stdout(predicate::str::contains("Restart your terminal"));

    assert!(home.join("Applications/tsbot/tsbot").is_file());
    assert!(home.join("Applications/tsbot/install-receipt.json").is_file());
    assert_eq!(
        std::fs::read_link(home.join(".local/bin/tsbot")).unwrap(),
        home.join("Applications/tsbot/tsbot")
    );
    for profile in PROFILES {
        let content = home.read_file(profile);
        assert_eq!(content, format!("\n{MARKER}\n{EXPORT}\n"), "{profile}");
    }
    assert!(!home.join(".tsbot").exists());
}

#[test]
fn test_install_twice_adds_path_once() {
    let home = common::TestHome::new();
    let (_release, source) = common::create_release();
    home.write_file(".bashrc", "alias ll='ls -l'");

    for _ in 0..2 {
        home.cmd()
            .args(["install", "--source"])
            .arg(&source)
            .assert()
            .success();
    }

    let bashrc = home.read_file(".bashrc");
    assert_eq!(bashrc.matches(EXPORT).count(), 1);
    assert!(bashrc.starts_with("alias ll='ls -l'\n\n"));
}

#[test]
fn test_install_no_restart_hint_when_on_path() {
    let home = common::TestHome::new();
    let (_release, source) = common::create_release();
    let path_var = format!("{}:/usr/bin:/bin", home.join(".local/bin").display());

    home.cmd()
        .env("PATH", path_var)
        .args(["install", "--source"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restart your terminal").not());
}

#[test]
fn test_install_missing_executable_fails() {
    let home = common::TestHome::new();
    let release = tempfile::TempDir::new().unwrap();
    common::write_file(release.path(), "tsbot/_internal/base_library.zip", "pyz");

    home.cmd()
        .args(["install", "--source"])
        .arg(release.path().join("tsbot"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Executable 'tsbot' not found"));

    assert!(!home.join("Applications/tsbot").exists());
    assert!(!home.join(".zshrc").exists());
}

#[test]
fn test_install_missing_source_fails() {
    let home = common::TestHome::new();

    home.cmd()
        .args(["install", "--source"])
        .arg(home.join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_install_profile_failure_exits_nonzero_but_installs() {
    let home = common::TestHome::new();
    let (_release, source) = common::create_release();
    // .zshrc as a directory cannot be appended to
    std::fs::create_dir_all(home.join(".zshrc")).unwrap();

    home.cmd()
        .args(["install", "--source"])
        .arg(&source)
        .assert()
        .failure()
        .stdout(predicate::str::contains("PATH: added to ~/.zprofile"))
        .stdout(predicate::str::contains("already configured").not())
        .stderr(predicate::str::contains("1 shell profile(s)"))
        .stderr(predicate::str::contains(".zshrc"));

    assert!(home.join("Applications/tsbot/tsbot").is_file());
    assert!(home.read_file(".bashrc").contains(EXPORT));
}

#[test]
fn test_uninstall_nothing_installed_succeeds() {
    let home = common::TestHome::new();

    home.cmd()
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to uninstall."));
}

#[test]
fn test_full_lifecycle() {
    let home = common::TestHome::new();
    let (_release, source) = common::create_release();
    home.write_file(".zshrc", "export EDITOR=vim\n");

    home.cmd()
        .args(["install", "--source"])
        .arg(&source)
        .assert()
        .success();
    // The agent creates its own data and cache on first run
    home.write_file(".tsbot/profile.json", "{}");
    home.write_file(".cache/timesheetbot/napta_storage.json", "{}");

    home.cmd()
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""installed": true"#))
        .stdout(predicate::str::contains(r#""tree_intact": true"#));

    home.cmd()
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed ~/Applications/tsbot"))
        .stdout(predicate::str::contains("Removed ~/.tsbot"))
        .stdout(predicate::str::contains("Removed PATH entry from ~/.zshrc"));

    assert!(!home.join("Applications/tsbot").exists());
    assert!(std::fs::symlink_metadata(home.join(".local/bin/tsbot")).is_err());
    assert!(!home.join(".tsbot").exists());
    assert!(!home.join(".cache/timesheetbot").exists());
    assert!(home.join(".local/bin").is_dir());
    for profile in PROFILES {
        let content = home.read_file(profile);
        assert!(!content.contains(MARKER), "{profile}");
        assert!(!content.contains(EXPORT), "{profile}");
    }
    assert_eq!(home.read_file(".zshrc"), "export EDITOR=vim\n\n");

    home.cmd()
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""installed": false"#));
}

#[test]
fn test_uninstall_keep_cache() {
    let home = common::TestHome::new();
    home.write_file(".cache/timesheetbot/napta_storage.json", "{}");
    home.write_file(".tsbot/profile.json", "{}");

    home.cmd()
        .args(["uninstall", "--keep-cache"])
        .assert()
        .success();

    assert!(!home.join(".tsbot").exists());
    assert!(home.join(".cache/timesheetbot/napta_storage.json").exists());
}

#[test]
fn test_home_flag_overrides_env() {
    let home = common::TestHome::new();
    let other = common::TestHome::new();
    let (_release, source) = common::create_release();

    home.cmd()
        .arg("--home")
        .arg(&other.path)
        .args(["install", "--source"])
        .arg(&source)
        .assert()
        .success();

    assert!(other.join("Applications/tsbot/tsbot").is_file());
    assert!(!home.join("Applications").exists());
}

#[test]
fn test_status_human_readable() {
    let home = common::TestHome::new();

    home.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Application"))
        .stdout(predicate::str::contains("~/Applications/tsbot"))
        .stdout(predicate::str::contains("Shell profiles"))
        .stdout(predicate::str::contains("Nothing installed."));
}
