use super::open;
use crate::output::{print_actions, print_json};
use clap::ValueEnum;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFilter {
    /// Pending records that need an operator decision
    Pending,
    /// Approved records waiting for an executor
    Approved,
    /// Pending auto-level records
    Auto,
    /// Pending notify-level records awaiting acknowledgment
    Notify,
    /// Everything in the queue
    All,
}

pub fn run(root: &Path, filter: ListFilter, json: bool) -> anyhow::Result<()> {
    let (_, queue) = open(root)?;
    let actions = match filter {
        ListFilter::Pending => queue.list_pending_approvals()?,
        ListFilter::Approved => queue.list_approved()?,
        ListFilter::Auto => queue.list_pending_auto()?,
        ListFilter::Notify => queue.list_notifications()?,
        ListFilter::All => queue.list_all()?,
    };
    if json {
        return print_json(&actions);
    }
    if actions.is_empty() {
        println!("no actions ({})", filter_name(filter));
        return Ok(());
    }
    print_actions(&actions);
    Ok(())
}

pub fn history(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, queue) = open(root)?;
    let actions = queue.history()?;
    if json {
        return print_json(&actions);
    }
    if actions.is_empty() {
        println!("no executed actions yet");
        return Ok(());
    }
    print_actions(&actions);
    Ok(())
}

fn filter_name(filter: ListFilter) -> &'static str {
    match filter {
        ListFilter::Pending => "pending",
        ListFilter::Approved => "approved",
        ListFilter::Auto => "auto",
        ListFilter::Notify => "notify",
        ListFilter::All => "all",
    }
}
