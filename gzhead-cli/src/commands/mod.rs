//! Command implementations for the gzhead CLI.

pub mod edit;
pub mod info;

pub use edit::{EditOptions, cmd_edit};
pub use info::cmd_info;
