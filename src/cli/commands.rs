//! One-shot subcommands.
//!
//! These drive the same [`Synchronizer`] as the interactive UI but wait for
//! every request to settle, turning a failed request into a process error.

use anyhow::{Result, bail};
use filmshelf::view::html::render_html;
use filmshelf::{
    Confirmation, Filter, Listing, MovieDraft, RecordId, SyncUpdate, Synchronizer, project,
};
use std::io::{self, BufRead, Write};

/// Apply completions as they arrive, handing each to `report` before the
/// next one is awaited. Output for a finished step is written even when a
/// later step (usually the follow-up reload) fails.
async fn settle(
    sync: &mut Synchronizer,
    mut report: impl FnMut(&SyncUpdate) -> io::Result<()>,
) -> Result<()> {
    while let Some(update) = sync.next().await {
        report(&update)?;
        if let SyncUpdate::Failed(op) = update {
            bail!("{} request failed; see the log for details", op);
        }
    }
    Ok(())
}

async fn load(sync: &mut Synchronizer, query: Option<&str>) -> Result<Listing> {
    sync.load_all();
    settle(sync, |_| Ok(())).await?;
    Ok(project(sync.cache(), &Filter::new(query.unwrap_or(""))))
}

pub async fn list(sync: &mut Synchronizer, query: Option<&str>, out: &mut impl Write) -> Result<()> {
    let listing = load(sync, query).await?;
    write_table(&listing, out)?;
    Ok(())
}

pub async fn export(
    sync: &mut Synchronizer,
    query: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let listing = load(sync, query).await?;
    out.write_all(render_html(&listing).as_bytes())?;
    Ok(())
}

pub async fn add(
    sync: &mut Synchronizer,
    title: &str,
    genre: &str,
    year: &str,
    out: &mut impl Write,
) -> Result<()> {
    sync.create(title, genre, year)?;
    settle(sync, |update| match update {
        SyncUpdate::Created(record) => {
            writeln!(out, "Added \"{}\" with id {}", record.title, record.id)
        }
        _ => Ok(()),
    })
    .await
}

/// `id` is sent exactly as typed.
pub async fn edit(
    sync: &mut Synchronizer,
    id: &str,
    title: &str,
    genre: &str,
    year: &str,
    out: &mut impl Write,
) -> Result<()> {
    let draft = MovieDraft::parse(title, genre, year)?;
    sync.update(RecordId::from(id), draft);
    settle(sync, |update| match update {
        SyncUpdate::Updated(record) => writeln!(out, "Updated {}", record.id),
        _ => Ok(()),
    })
    .await
}

/// `id` is sent exactly as typed.
pub async fn remove(
    sync: &mut Synchronizer,
    id: &str,
    yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let confirmation = if yes {
        Confirmation::Accepted
    } else {
        write!(out, "Delete record {}? [y/N] ", id)?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes").into()
    };

    if confirmation == Confirmation::Declined {
        writeln!(out, "Aborted.")?;
        return Ok(());
    }

    sync.delete(RecordId::from(id), confirmation);
    settle(sync, |update| match update {
        SyncUpdate::Deleted(deleted) => writeln!(out, "Deleted {}", deleted),
        _ => Ok(()),
    })
    .await
}

pub fn write_table(listing: &Listing, out: &mut impl Write) -> io::Result<()> {
    let rows = match listing {
        Listing::Placeholder(message) => return writeln!(out, "{}", message),
        Listing::Rows(rows) => rows,
    };

    let ids: Vec<String> = rows.iter().map(|r| r.id.to_string()).collect();
    let id_width = ids.iter().map(|s| s.chars().count()).max().unwrap_or(0).max(2);
    let title_width = rows
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    writeln!(
        out,
        "{:<id_width$}  {:<title_width$}  {:<4}  GENRE",
        "ID", "TITLE", "YEAR"
    )?;
    for (row, id) in rows.iter().zip(&ids) {
        writeln!(
            out,
            "{:<id_width$}  {:<title_width$}  {:<4}  {}",
            id, row.title, row.year, row.genre
        )?;
    }
    Ok(())
}
