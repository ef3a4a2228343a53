//! Common test utilities for tsbot-setup integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Packager stand-in speaking the PyInstaller command line
///
/// Writes `<distpath>/<name>/<name>` plus a library file. When
/// `FAKE_PACKAGER_LEAK` is set, that relative path is also created under
/// `_internal/`, simulating a module the exclusion list failed to keep out.
/// `FAKE_PACKAGER_BUNDLE` is appended to the executable, the way module names
/// sit in the archive table of contents of a real build.
const FAKE_PACKAGER: &str = r#"#!/bin/sh
name=""
dist=""
while [ $# -gt 0 ]; do
    case "$1" in
        --name) name="$2"; shift 2 ;;
        --distpath) dist="$2"; shift 2 ;;
        --workpath|--specpath|--exclude-module|--add-data) shift 2 ;;
        *) shift ;;
    esac
done
mkdir -p "$dist/$name/_internal"
printf '#!/bin/sh\necho tsbot\n' > "$dist/$name/$name"
printf 'pyz' > "$dist/$name/_internal/base_library.zip"
if [ -n "${FAKE_PACKAGER_BUNDLE:-}" ]; then
    printf '%s\n' "$FAKE_PACKAGER_BUNDLE" >> "$dist/$name/$name"
fi
if [ -n "${FAKE_PACKAGER_LEAK:-}" ]; then
    mkdir -p "$(dirname "$dist/$name/_internal/$FAKE_PACKAGER_LEAK")"
    : > "$dist/$name/_internal/$FAKE_PACKAGER_LEAK"
fi
"#;

/// A temp directory acting as `$HOME`
pub struct TestHome {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestHome {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// `tsbot-setup` with HOME pointing at this directory and a clean environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tsbot-setup").expect("binary not built");
        cmd.env("HOME", &self.path)
            .env("PATH", "/usr/bin:/bin")
            .env_remove("RUST_LOG")
            .env_remove("TSBOT_PACKAGER")
            .env_remove("FAKE_PACKAGER_LEAK")
            .env_remove("FAKE_PACKAGER_BUNDLE");
        cmd
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.path.join(rel)
    }

    /// Write a file below the home directory
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.path, rel, content)
    }

    pub fn read_file(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).expect("Failed to read file")
    }
}

/// Write `content` to `root/rel`, creating parent directories
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// An unpacked release: `<temp>/tsbot/tsbot` plus library files
pub fn create_release() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let source = temp.path().join("tsbot");
    write_file(&source, "tsbot", "#!/bin/sh\necho tsbot\n");
    write_file(&source, "_internal/base_library.zip", "pyz");
    write_file(&source, "_internal/timesheetbot_agent/config/holidays.json", "{}");
    (temp, source)
}

/// An agent project root with the files the default catalog references
pub fn create_project() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_file(temp.path(), "timesheetbot_agent/cli.py", "print('tsbot')\n");
    write_file(temp.path(), "timesheetbot_agent/config/holidays.json", "{}");
    write_file(temp.path(), "scripts/install.sh", "#!/bin/sh\n");
    write_file(temp.path(), "scripts/uninstall.sh", "#!/bin/sh\n");
    write_file(temp.path(), "README.md", "# TimesheetBot\n");
    temp
}

/// Write the fake packager script into `dir` and return its path
#[cfg(unix)]
pub fn install_fake_packager(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = write_file(dir, "fake-pyinstaller", FAKE_PACKAGER);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake packager executable");
    path
}
