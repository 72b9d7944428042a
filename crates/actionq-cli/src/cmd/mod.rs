pub mod action;
pub mod config;
pub mod init;
pub mod list;
pub mod policy;
pub mod sweep;

use actionq_core::config::Config;
use actionq_core::project::{self, ProjectQueue};
use anyhow::Context;
use std::path::Path;

/// Load the project config and open its queue.
pub(crate) fn open(root: &Path) -> anyhow::Result<(Config, ProjectQueue)> {
    project::open(root).with_context(|| format!("failed to open queue in {}", root.display()))
}
