//! Single-record commands: submit, show, and the lifecycle transitions.
//!
//! Transitions on an unknown or wrong-state id report "not found" and exit
//! successfully; an operator clicking twice is not an error.

use super::open;
use crate::output::print_json;
use actionq_core::ActionRecord;
use anyhow::Context;
use std::path::Path;

pub fn submit(
    root: &Path,
    kind: &str,
    title: &str,
    details: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let details: serde_json::Value = match details {
        Some(raw) => serde_json::from_str(raw).context("--details must be valid JSON")?,
        None => serde_json::json!({}),
    };
    let (_, queue) = open(root)?;
    let submitted = queue.enqueue(kind, title, details)?;

    if json {
        return print_json(&submitted);
    }
    let action = &submitted.record;
    if submitted.inserted {
        println!("queued {} [{}] {}", action.id, action.level, action.title);
    } else {
        println!(
            "duplicate of {} ({}), nothing queued",
            action.id, action.status
        );
    }
    Ok(())
}

pub fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_, queue) = open(root)?;
    let Some(action) = queue.get(id)? else {
        return not_found(id, json);
    };
    if json {
        return print_json(&action);
    }
    println!("ID:       {}", action.id);
    println!("Type:     {}", action.kind);
    println!("Level:    {}", action.level);
    println!("Status:   {}", action.status);
    println!("Title:    {}", action.title);
    println!("Created:  {}", action.created.format("%Y-%m-%d %H:%M UTC"));
    let stamps = [
        ("Approved", action.approved_at),
        ("Rejected", action.rejected_at),
        ("Executed", action.executed_at),
    ];
    for (label, ts) in stamps {
        if let Some(ts) = ts {
            println!("{label}: {}", ts.format("%Y-%m-%d %H:%M UTC"));
        }
    }
    if let Some(result) = &action.result {
        println!("Result:   {result}");
    }
    if action.details.as_object().is_some_and(|o| !o.is_empty()) {
        println!("Details:");
        println!("{}", serde_json::to_string_pretty(&action.details)?);
    }
    Ok(())
}

pub fn approve(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_, queue) = open(root)?;
    report(queue.approve(id)?, id, "approved", json)
}

pub fn reject(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_, queue) = open(root)?;
    report(queue.reject(id)?, id, "rejected", json)
}

pub fn execute(root: &Path, id: &str, result: Option<&str>, json: bool) -> anyhow::Result<()> {
    let (_, queue) = open(root)?;
    report(queue.mark_executed(id, result)?, id, "executed", json)
}

pub fn dismiss(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_, queue) = open(root)?;
    report(queue.dismiss(id)?, id, "dismissed", json)
}

fn report(outcome: Option<ActionRecord>, id: &str, verb: &str, json: bool) -> anyhow::Result<()> {
    let Some(action) = outcome else {
        return not_found(id, json);
    };
    if json {
        print_json(&action)
    } else {
        println!("{verb} {}: {}", action.id, action.title);
        Ok(())
    }
}

fn not_found(id: &str, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&serde_json::json!({ "id": id, "found": false }))
    } else {
        println!("not found: no actionable record with id '{id}'");
        Ok(())
    }
}
