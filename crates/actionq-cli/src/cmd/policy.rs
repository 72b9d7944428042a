use crate::output::{print_json, print_table};
use actionq_core::policy;
use actionq_core::AutonomyLevel;

pub fn run(json: bool) -> anyhow::Result<()> {
    let rows = policy::table();
    if json {
        let value: serde_json::Map<String, serde_json::Value> = rows
            .iter()
            .map(|(kind, level)| (kind.to_string(), serde_json::Value::from(level.as_str())))
            .collect();
        return print_json(&value);
    }
    print_table(
        &["TYPE", "LEVEL"],
        rows.iter()
            .map(|(kind, level)| vec![kind.to_string(), level.to_string()])
            .collect(),
    );
    println!();
    println!("unlisted types: {}", AutonomyLevel::Notify);
    Ok(())
}
