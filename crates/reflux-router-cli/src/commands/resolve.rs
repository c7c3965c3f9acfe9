use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use reflux_router::{RouteDefinition, RouteTable};
use serde_json::Value;

use super::{build_router, load_table};
use crate::transcript::Transcript;

pub fn execute(table_path: &Path, path: &str) -> Result<()> {
    let table = load_table(table_path)?;
    let report = resolve(&table, path)?;

    println!("{} {}", "Resolving".green().bold(), report.path.cyan());
    println!();
    match report.kind {
        MatchKind::Exact => println!("Exact match"),
        MatchKind::Patterns(count) => println!("{count} pattern match(es)"),
        MatchKind::None => println!("{}", "No match".yellow()),
    }
    for effect in &report.effects {
        println!("  {effect}");
    }
    println!();
    println!("Title: {}", report.title.as_deref().unwrap_or("-").bold());

    Ok(())
}

#[derive(Debug, PartialEq)]
pub enum MatchKind {
    Exact,
    Patterns(usize),
    None,
}

#[derive(Debug, PartialEq)]
pub struct Report {
    /// Canonical path after default-route substitution
    pub path: String,
    pub kind: MatchKind,
    pub effects: Vec<String>,
    pub title: Option<String>,
}

/// Resolves `path` against the table without applying effects
pub fn resolve(table: &RouteTable, path: &str) -> Result<Report> {
    let transcript = Transcript::default();
    let router = build_router(table, &transcript, false)?
        .with_default_route(&table.routing.default_route);

    let canonical = router.target_path(path);
    let resolution = router.resolve(path);
    let kind = match (resolution.exact, resolution.patterns.len()) {
        (Some(_), _) => MatchKind::Exact,
        (None, 0) => MatchKind::None,
        (None, count) => MatchKind::Patterns(count),
    };
    let effects = resolution.definitions().map(describe_effect).collect();

    Ok(Report {
        kind,
        effects,
        title: resolution.title(),
        path: canonical,
    })
}

fn describe_effect(definition: &RouteDefinition<Value>) -> String {
    match definition {
        RouteDefinition::Action { args, .. } => format!("action with {} arg(s)", args.len()),
        RouteDefinition::State { state, .. } => format!("state {state}"),
    }
}
