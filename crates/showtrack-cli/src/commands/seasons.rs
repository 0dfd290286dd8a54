use std::collections::HashSet;
use std::path::Path;

use showtrack_core::seasons::{diff, render, LayoutDirection, ListChange, RenderOptions, SeasonRow};
use showtrack_core::SeasonListItem;

use crate::error::CliError;

pub fn load_season_items(path: &Path) -> Result<Vec<SeasonListItem>, CliError> {
    let raw = std::fs::read_to_string(path)?;
    let items = serde_json::from_str::<Vec<SeasonListItem>>(&raw)?;
    validate_season_items(&items)?;
    Ok(items)
}

/// Row identity is the season id, so ids must be unique within a list.
pub fn validate_season_items(items: &[SeasonListItem]) -> Result<(), CliError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(CliError::InvalidSeasons(format!(
                "duplicate season id {}",
                item.id()
            )));
        }
        if !item.stats.is_consistent() {
            tracing::warn!(season = %item.id(), "Season counts exceed the episode total");
        }
    }
    Ok(())
}

pub fn format_season_lines(rows: &[SeasonRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No seasons.".to_string()];
    }

    rows.iter()
        .map(|row| {
            let marker = match (row.show_skipped, row.show_collected) {
                (true, true) => " [skipped, collected]",
                (true, false) => " [skipped]",
                (false, true) => " [collected]",
                (false, false) => "",
            };
            let summary = if row.dimmed {
                format!("({})", row.summary)
            } else {
                row.summary.clone()
            };
            format!(
                "{:<10} {:>9}  {}{}",
                row.title, row.progress_text, summary, marker
            )
        })
        .collect()
}

pub fn format_change_line(change: &ListChange) -> String {
    match change {
        ListChange::Remove { id, index } => format!("remove season {id} at {index}"),
        ListChange::Insert { id, index } => format!("insert season {id} at {index}"),
        ListChange::Move { id, from, to } => format!("move season {id} from {from} to {to}"),
        ListChange::Update { id, index } => format!("update season {id} at {index}"),
    }
}

pub fn run_seasons_show(
    path: &Path,
    direction: LayoutDirection,
    as_json: bool,
) -> Result<(), CliError> {
    let items = load_season_items(path)?;
    let rows = render(&items, RenderOptions { direction });

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for line in format_season_lines(&rows) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn run_seasons_diff(old_path: &Path, new_path: &Path, as_json: bool) -> Result<(), CliError> {
    let old = load_season_items(old_path)?;
    let new = load_season_items(new_path)?;
    let changes = diff(&old, &new);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
        return Ok(());
    }

    if changes.is_empty() {
        println!("No changes.");
        return Ok(());
    }
    for change in &changes {
        println!("{}", format_change_line(change));
    }
    Ok(())
}
