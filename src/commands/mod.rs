//! Command implementations for the tsbot-setup CLI

pub mod build;
pub mod completions;
pub mod helpers;
pub mod install;
pub mod status;
pub mod uninstall;
pub mod variants;
pub mod verify;
pub mod version;
