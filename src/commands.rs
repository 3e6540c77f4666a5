//! Implementations of the CLI subcommands.

use std::io::Write as _;
use std::sync::Arc;

use gitiles::{Gitiles, GitilesError, TreeAddr};
use gitiles_browse::browser::{Browser, NavigationOutcome};
use gitiles_browse::service::TreeService;
use gitiles_browse::view::View;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::warn;

use crate::app_config::ConfigError;
use crate::term::{TerminalView, format_entry};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Gitiles(#[from] GitilesError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open {addr}: {message}")]
    Navigation { addr: TreeAddr, message: String },
}

pub async fn ls(client: &Gitiles, addr: &TreeAddr) -> Result<(), CommandError> {
    let tree = client.tree(addr).await?;
    let mut out = std::io::stdout().lock();
    for entry in &tree.entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}

pub async fn cat(client: &Gitiles, addr: &TreeAddr) -> Result<(), CommandError> {
    let bytes = client.blob_bytes(addr).await?;
    std::io::stdout().lock().write_all(&bytes)?;
    Ok(())
}

pub async fn log(
    client: &Gitiles,
    addr: &TreeAddr,
    start: Option<&str>,
) -> Result<(), CommandError> {
    let log = client.log(addr, start).await?;
    let mut out = std::io::stdout().lock();
    for commit in &log.log {
        let subject = commit.message.lines().next().unwrap_or_default();
        writeln!(
            out,
            "{} {} <{}> {}",
            commit.commit, commit.author.name, commit.author.email, subject
        )?;
    }
    if let Some(next) = &log.next {
        writeln!(out, "next: {next}")?;
    }
    Ok(())
}

pub async fn blame(client: &Gitiles, addr: &TreeAddr) -> Result<(), CommandError> {
    let blame = client.blame(addr).await?;
    let mut out = std::io::stdout().lock();
    for region in &blame.regions {
        let last = region.start + region.count.saturating_sub(1);
        writeln!(
            out,
            "{}-{} {} {} ({})",
            region.start, last, region.commit, region.author.name, region.path
        )?;
    }
    Ok(())
}

pub async fn projects(client: &Gitiles) -> Result<(), CommandError> {
    let projects = client.projects().await?;
    let mut out = std::io::stdout().lock();
    for project in projects.values() {
        match &project.description {
            Some(description) => writeln!(out, "{}\t{description}", project.name)?,
            None => writeln!(out, "{}", project.name)?,
        }
    }
    Ok(())
}

/// Show the starting listing. Failing to do so fails the command.
async fn open_start<S: TreeService, V: View>(
    browser: &Browser<S, V>,
    addr: TreeAddr,
) -> Result<(), CommandError> {
    let message = match browser.open_tree(addr.clone()).finished().await {
        NavigationOutcome::Applied => return Ok(()),
        NavigationOutcome::Failed(message) => message,
        NavigationOutcome::Superseded | NavigationOutcome::Aborted => {
            "navigation did not complete".to_owned()
        }
    };
    Err(CommandError::Navigation { addr, message })
}

/// Interactive browsing: each stdin line names an entry of the current listing to follow.
pub async fn browse(client: Gitiles, addr: TreeAddr) -> Result<(), CommandError> {
    let browser = Browser::new(Arc::new(client), Arc::new(TerminalView), addr.clone());
    open_start(&browser, addr).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let name = line.trim();
        match name {
            "" => continue,
            "q" | "quit" => break,
            _ => {}
        }
        match browser.select(name) {
            Some(navigation) => {
                navigation.finished().await;
            }
            None => warn!(name, "no such file or directory to open"),
        }
    }
    Ok(())
}
