pub mod navigate;
pub mod resolve;
pub mod routes;

use std::path::Path;

use anyhow::{Context, Result};
use reflux_router::{RouteTable, Router};

use crate::transcript::Transcript;

/// Load a route table from disk
pub fn load_table(path: &Path) -> Result<RouteTable> {
    let table = RouteTable::from_file(path)
        .with_context(|| format!("Failed to load route table {}", path.display()))?;
    tracing::debug!(
        "Loaded {} route entries from {}",
        table.routes.len(),
        path.display()
    );
    Ok(table)
}

/// Router with every table entry registered; actions record into `transcript`
pub fn build_router(
    table: &RouteTable,
    transcript: &Transcript,
    record_history: bool,
) -> Result<Router> {
    let mut router = transcript.router(record_history);
    table
        .register(&mut router, |name| Some(transcript.action(name)))
        .context("Failed to register route table")?;
    Ok(router)
}
