//! Status command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::StatusArgs;
use crate::error::Result;
use crate::operations::status::LinkState;
use crate::operations::{InstallStatus, StatusOperation};

use super::helpers::{display_path, mark, resolve_layout};

/// Run status command
pub fn run(home: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let layout = resolve_layout(home)?;
    let status = StatusOperation::new(&layout).execute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_status(&status, &layout.home);
    }
    Ok(())
}

fn print_status(status: &InstallStatus, home: &std::path::Path) {
    let bold = Style::new().bold();

    println!("{}", bold.apply_to("Application"));
    println!(
        "  {} {}",
        mark(status.installed && status.executable_ok),
        display_path(&status.install_root, home)
    );
    if let Some(receipt) = &status.receipt {
        println!(
            "    installed by tsbot-setup {} from {}",
            receipt.installer_version,
            receipt.source_tree.display()
        );
    }
    match status.tree_intact {
        Some(true) => println!("    tree matches install receipt"),
        Some(false) => println!(
            "    {}",
            Style::new().yellow().apply_to("tree modified since install")
        ),
        None => {}
    }

    println!("{}", bold.apply_to("Command"));
    let link = display_path(&status.command_link, home);
    match &status.link {
        LinkState::Missing => println!("  {} {link}", mark(false)),
        LinkState::Valid => println!("  {} {link}", mark(true)),
        LinkState::Dangling(target) => println!(
            "  {} {link} -> {} (dangling)",
            mark(false),
            target.display()
        ),
        LinkState::Foreign(target) => println!(
            "  {} {link} -> {} (not managed by tsbot-setup)",
            mark(false),
            target.display()
        ),
    }

    println!("{}", bold.apply_to("Data"));
    println!("  {} {}", mark(status.data_present), display_path(&status.data_dir, home));
    println!("  {} {}", mark(status.cache_present), display_path(&status.cache_dir, home));

    println!("{}", bold.apply_to("Shell profiles"));
    for profile in &status.profiles {
        println!("  {} {}", mark(profile.has_export), display_path(&profile.path, home));
    }

    if status.is_clean() {
        println!();
        println!("Nothing installed.");
    }
}
