//! Command helper utilities

use std::path::{Path, PathBuf};

use console::Style;

use crate::config::InstallLayout;
use crate::error::Result;

/// Resolve the install layout from the optional `--home` value
pub fn resolve_layout(home: Option<PathBuf>) -> Result<InstallLayout> {
    let layout = InstallLayout::resolve(home)?;
    tracing::debug!(home = %layout.home.display(), "install layout resolved");
    Ok(layout)
}

/// Render a path with the home directory shortened to `~`
pub fn display_path(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Check or cross mark for a yes/no state
pub fn mark(ok: bool) -> String {
    if ok {
        Style::new().green().apply_to("✓").to_string()
    } else {
        Style::new().dim().apply_to("✗").to_string()
    }
}

/// Print offending paths of a failed integrity check, one per line
pub fn print_violations(tree: &str, matches: &[PathBuf]) {
    eprintln!(
        "{} {} forbidden path(s) in {}:",
        Style::new().red().bold().apply_to("Integrity check failed:"),
        matches.len(),
        tree
    );
    for path in matches {
        eprintln!("  {}", Style::new().red().apply_to(path.display()));
    }
}
