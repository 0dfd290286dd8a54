//! Season list presentation.
//!
//! Everything here is a pure function of a [`SeasonListItem`] snapshot, so rows
//! can be recomputed independently and in any order.

mod diff;

use serde::{Deserialize, Serialize};

use crate::models::{SeasonId, SeasonListItem, SeasonStats};

pub use diff::{dedup_by_id, diff, same_content, same_item, ListChange, SeasonList};

/// Separator between the parts of a season summary.
pub const SUMMARY_DELIMITER: &str = " · ";

const ALL_WATCHED: &str = "All watched";

/// Reading direction of the hosting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub direction: LayoutDirection,
}

/// Display values for one season row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRow {
    pub id: SeasonId,
    pub title: String,
    /// Progress bar maximum (episode total)
    pub progress_max: u32,
    /// Progress bar value (watched episodes)
    pub progress: u32,
    pub progress_fraction: f64,
    pub progress_text: String,
    pub summary: String,
    /// Nothing left to watch right now, summary is drawn dimmed
    pub dimmed: bool,
    pub show_skipped: bool,
    pub show_collected: bool,
}

pub fn season_title(number: u32) -> String {
    if number == 0 {
        "Specials".to_string()
    } else {
        format!("Season {number}")
    }
}

/// Watched out of total, mirrored for right-to-left layouts.
pub fn progress_text(stats: &SeasonStats, direction: LayoutDirection) -> String {
    match direction {
        LayoutDirection::Ltr => format!("{}/{}", stats.watched(), stats.total),
        LayoutDirection::Rtl => format!("{}/{}", stats.total, stats.watched()),
    }
}

/// Build the status line of a season.
///
/// Parts appear in a fixed order and zero counts are left out. "All watched"
/// leads the line when nothing watchable is left and at least one episode
/// has been watched.
pub fn summary(stats: &SeasonStats) -> String {
    let released = stats.not_watched_released;
    let to_be_released = stats.not_watched_to_be_released;
    let no_release = stats.not_watched_no_release;

    let mut parts = Vec::new();
    if stats.watchable_remaining() > 0 {
        if released > 0 {
            parts.push(format!("{released} remaining"));
        }
    } else if to_be_released.saturating_add(no_release) != stats.total {
        parts.push(ALL_WATCHED.to_string());
    }
    if no_release > 0 {
        parts.push(format!("{no_release} without release date"));
    }
    if to_be_released > 0 {
        parts.push(format!("{to_be_released} not released"));
    }
    if stats.skipped > 0 {
        parts.push(format!("{} skipped", stats.skipped));
    }
    if stats.collected > 0 {
        parts.push(format!("{} collected", stats.collected));
    }

    parts.join(SUMMARY_DELIMITER)
}

pub fn render_row(item: &SeasonListItem, options: RenderOptions) -> SeasonRow {
    let stats = &item.stats;
    SeasonRow {
        id: item.id(),
        title: season_title(item.season.number),
        progress_max: stats.total,
        progress: stats.watched(),
        progress_fraction: stats.progress_fraction(),
        progress_text: progress_text(stats, options.direction),
        summary: summary(stats),
        dimmed: stats.watchable_remaining() == 0,
        show_skipped: stats.skipped > 0,
        show_collected: stats.collected > 0,
    }
}

pub fn render(items: &[SeasonListItem], options: RenderOptions) -> Vec<SeasonRow> {
    items.iter().map(|item| render_row(item, options)).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Season;

    fn item(id: i64, number: u32, stats: SeasonStats) -> SeasonListItem {
        SeasonListItem {
            season: Season {
                id: SeasonId(id),
                number,
            },
            stats,
        }
    }

    #[test]
    fn summary_for_fully_watched_season_with_extras() {
        let stats = SeasonStats {
            total: 10,
            skipped: 2,
            collected: 1,
            ..SeasonStats::default()
        };
        assert_eq!(summary(&stats), "All watched · 2 skipped · 1 collected");
    }

    #[test]
    fn summary_lists_parts_in_fixed_order() {
        let stats = SeasonStats {
            total: 20,
            not_watched_released: 3,
            not_watched_to_be_released: 2,
            not_watched_no_release: 1,
            skipped: 4,
            collected: 5,
        };
        assert_eq!(
            summary(&stats),
            "3 remaining · 1 without release date · 2 not released · 4 skipped · 5 collected"
        );
    }

    #[test]
    fn summary_without_released_episodes_skips_remaining_part() {
        let stats = SeasonStats {
            total: 5,
            not_watched_no_release: 2,
            ..SeasonStats::default()
        };
        assert_eq!(summary(&stats), "2 without release date");
    }

    #[test]
    fn summary_marks_watched_part_of_airing_season() {
        let stats = SeasonStats {
            total: 8,
            not_watched_to_be_released: 3,
            ..SeasonStats::default()
        };
        assert_eq!(summary(&stats), "All watched · 3 not released");
    }

    #[test]
    fn summary_is_empty_when_nothing_watched_or_released() {
        let upcoming = SeasonStats {
            total: 6,
            not_watched_to_be_released: 6,
            ..SeasonStats::default()
        };
        assert_eq!(summary(&upcoming), "6 not released");
        assert_eq!(summary(&SeasonStats::default()), "");
    }

    #[test]
    fn render_row_fills_display_values() {
        let row = render_row(
            &item(
                7,
                2,
                SeasonStats {
                    total: 10,
                    not_watched_released: 4,
                    collected: 3,
                    ..SeasonStats::default()
                },
            ),
            RenderOptions::default(),
        );

        assert_eq!(
            row,
            SeasonRow {
                id: SeasonId(7),
                title: "Season 2".to_string(),
                progress_max: 10,
                progress: 6,
                progress_fraction: 0.6,
                progress_text: "6/10".to_string(),
                summary: "4 remaining · 3 collected".to_string(),
                dimmed: false,
                show_skipped: false,
                show_collected: true,
            }
        );
    }

    #[test]
    fn render_mirrors_progress_text_for_rtl() {
        let rows = render(
            &[item(
                1,
                0,
                SeasonStats {
                    total: 4,
                    not_watched_released: 1,
                    ..SeasonStats::default()
                },
            )],
            RenderOptions {
                direction: LayoutDirection::Rtl,
            },
        );
        assert_eq!(rows[0].title, "Specials");
        assert_eq!(rows[0].progress_text, "4/3");
    }

    #[test]
    fn rows_are_dimmed_when_nothing_is_watchable() {
        let row = render_row(
            &item(
                3,
                1,
                SeasonStats {
                    total: 2,
                    not_watched_to_be_released: 1,
                    ..SeasonStats::default()
                },
            ),
            RenderOptions::default(),
        );
        assert!(row.dimmed);
    }
}
