use super::open;
use crate::output::print_json;
use actionq_core::retention::RetentionPolicy;
use std::path::Path;

pub fn run(root: &Path, max_age_days: Option<u32>, json: bool) -> anyhow::Result<()> {
    let (config, queue) = open(root)?;
    let policy = match max_age_days {
        Some(days) => RetentionPolicy::days(days),
        None => config.retention.policy(),
    };
    let report = queue.sweep(&policy)?;
    if json {
        return print_json(&report);
    }
    if report.total() == 0 {
        println!("nothing to sweep");
    } else {
        println!(
            "swept {} actions: {} duplicates, {} stale resolved, {} expired notices",
            report.total(),
            report.duplicates,
            report.stale_resolved,
            report.expired_notices
        );
    }
    Ok(())
}
