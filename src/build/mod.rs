//! Build variants of the frozen agent
//!
//! - [`packager`]: the external packaging tool behind the [`Packager`] trait
//! - [`assembler`]: per-variant packaging plus auxiliary files
//! - [`integrity`]: forbidden-module scan of an assembled tree
//! - [`manifest`]: BLAKE3 record of a verified tree
//! - [`pipeline`]: assemble, verify and record, failing closed

pub mod assembler;
pub mod integrity;
pub mod manifest;
pub mod packager;
pub mod pipeline;

pub use assembler::BuildContext;
pub use manifest::BuildManifest;
pub use packager::{CommandPackager, Packager};
pub use pipeline::{BuildOutcome, build_all};
