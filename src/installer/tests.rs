//! Installer tests

#![allow(clippy::expect_used)]

use std::fs;

use super::*;
use crate::config::InstallLayout;
use crate::test_fixtures::{create_home, create_source_tree, write_file};

fn request<'a>(source: &'a Path, layout: &'a InstallLayout) -> InstallRequest<'a> {
    InstallRequest {
        source_tree: source,
        install_root: &layout.install_root,
        command_name: &layout.command_name,
        bin_dir: &layout.bin_dir,
        data_dir: &layout.data_dir,
    }
}

#[test]
fn test_install_creates_tree_link_and_receipt() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");

    let outcome = install(&request(&source, &layout)).unwrap();
    let app = &outcome.application;

    assert_eq!(app.install_root, layout.install_root);
    assert_eq!(app.executable, layout.installed_executable());
    assert_eq!(app.command_link, layout.command_link());
    assert_eq!(app.data_dir, layout.data_dir);
    assert_eq!(outcome.files_copied, 3);

    assert!(layout.install_root.join("_internal/base_library.zip").is_file());
    assert!(app.link_is_valid());
    assert!(InstallReceipt::read(&layout.install_root).unwrap().is_some());
}

#[test]
fn test_install_does_not_create_data_dir() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");

    install(&request(&source, &layout)).unwrap();

    assert!(!layout.data_dir.exists());
}

#[cfg(unix)]
#[test]
fn test_install_marks_executable() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");

    install(&request(&source, &layout)).unwrap();

    assert_eq!(
        crate::test_fixtures::mode_of(&layout.installed_executable()),
        0o755
    );
}

#[test]
fn test_install_twice_is_identical() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");

    install(&request(&source, &layout)).unwrap();
    let first_hash = hash::hash_directory(&layout.install_root, &[]).unwrap();
    let first_link = fs::read_link(layout.command_link()).unwrap();

    install(&request(&source, &layout)).unwrap();
    let second_hash = hash::hash_directory(&layout.install_root, &[]).unwrap();
    let second_link = fs::read_link(layout.command_link()).unwrap();

    assert_eq!(first_hash, second_hash);
    assert_eq!(first_link, second_link);
}

#[test]
fn test_install_removes_stale_files() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");
    write_file(&layout.install_root, "leftover-from-old-version.txt", "old");

    install(&request(&source, &layout)).unwrap();

    assert!(!layout.install_root.join("leftover-from-old-version.txt").exists());
}

#[test]
fn test_install_replaces_existing_link() {
    let (home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");
    let elsewhere = write_file(home.path(), "old/tsbot", "old");
    fs::create_dir_all(&layout.bin_dir).unwrap();
    file_ops::create_symlink(&elsewhere, &layout.command_link()).unwrap();

    install(&request(&source, &layout)).unwrap();

    assert_eq!(
        fs::read_link(layout.command_link()).unwrap(),
        layout.installed_executable()
    );
}

#[test]
fn test_install_replaces_dangling_link() {
    let (home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");
    fs::create_dir_all(&layout.bin_dir).unwrap();
    file_ops::create_symlink(&home.path().join("gone"), &layout.command_link()).unwrap();

    let outcome = install(&request(&source, &layout)).unwrap();

    assert!(outcome.application.link_is_valid());
}

#[test]
fn test_install_refuses_directory_in_place_of_link() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");
    fs::create_dir_all(layout.command_link()).unwrap();

    let result = install(&request(&source, &layout));

    assert!(matches!(result, Err(SetupError::SymlinkFailed { .. })));
}

#[test]
fn test_install_missing_executable_touches_nothing() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("other-name");
    write_file(&layout.install_root, "keep.txt", "previous install");

    let result = install(&request(&source, &layout));

    assert!(matches!(result, Err(SetupError::ExecutableMissing { .. })));
    assert!(layout.install_root.join("keep.txt").exists());
    assert!(!layout.command_link().exists());
}

#[test]
fn test_install_missing_source_tree() {
    let (home, layout) = create_home();
    let missing = home.path().join("no-such-dist");

    let result = install(&request(&missing, &layout));

    assert!(matches!(result, Err(SetupError::FileNotFound { .. })));
}

#[test]
fn test_install_rejects_source_inside_install_root() {
    let (_home, layout) = create_home();
    let source = layout.install_root.join("payload");
    write_file(&source, "tsbot", "#!/bin/sh\n");

    let result = install(&request(&source, &layout));

    assert!(matches!(result, Err(SetupError::ConfigInvalid { .. })));
    assert!(source.join("tsbot").exists());
}

#[test]
fn test_receipt_hash_matches_tree() {
    let (_home, layout) = create_home();
    let (_dist, source) = create_source_tree("tsbot");

    install(&request(&source, &layout)).unwrap();

    let receipt = InstallReceipt::read(&layout.install_root).unwrap().unwrap();
    let actual = hash::hash_directory(&layout.install_root, &[receipt::RECEIPT_FILE]).unwrap();
    assert!(hash::verify_hash(&receipt.tree_hash, &actual));
    assert_eq!(receipt.command, "tsbot");
}
