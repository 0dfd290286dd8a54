//! Season and episode statistics models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable database row id of a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonId(pub i64);

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A season of a show. Number 0 holds specials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub number: u32,
}

/// Watch and collection counts aggregated over the episodes of a season.
///
/// `total` is expected to be at least the sum of the three not-watched
/// counts; the remainder is watched. Accessors saturate instead of
/// underflowing when a snapshot breaks that rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonStats {
    pub total: u32,
    pub not_watched_released: u32,
    pub not_watched_to_be_released: u32,
    pub not_watched_no_release: u32,
    pub skipped: u32,
    pub collected: u32,
}

impl SeasonStats {
    pub const fn not_watched(&self) -> u32 {
        self.not_watched_released
            .saturating_add(self.not_watched_to_be_released)
            .saturating_add(self.not_watched_no_release)
    }

    pub const fn watched(&self) -> u32 {
        self.total.saturating_sub(self.not_watched())
    }

    /// Episodes that can be watched right now or have no release date.
    pub const fn watchable_remaining(&self) -> u32 {
        self.not_watched_released
            .saturating_add(self.not_watched_no_release)
    }

    /// Share of watched episodes, in `[0, 1]`. Zero for an empty season.
    pub fn progress_fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (f64::from(self.watched()) / f64::from(self.total)).clamp(0.0, 1.0)
    }

    pub const fn is_consistent(&self) -> bool {
        self.not_watched() <= self.total
    }
}

/// A row of the season list: identity plus the stats snapshot to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonListItem {
    pub season: Season,
    #[serde(default)]
    pub stats: SeasonStats,
}

impl SeasonListItem {
    pub const fn id(&self) -> SeasonId {
        self.season.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: u32, released: u32, to_be_released: u32, no_release: u32) -> SeasonStats {
        SeasonStats {
            total,
            not_watched_released: released,
            not_watched_to_be_released: to_be_released,
            not_watched_no_release: no_release,
            ..SeasonStats::default()
        }
    }

    #[test]
    fn progress_is_complete_when_nothing_left() {
        let stats = stats(12, 0, 0, 0);
        assert!((stats.progress_fraction() - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.watched(), 12);
    }

    #[test]
    fn progress_counts_every_not_watched_kind() {
        let stats = stats(10, 2, 1, 2);
        assert_eq!(stats.watched(), 5);
        assert!((stats.progress_fraction() - 0.5).abs() < f64::EPSILON);
        assert_eq!(stats.watchable_remaining(), 4);
    }

    #[test]
    fn progress_stays_in_range_for_odd_snapshots() {
        assert!(stats(0, 0, 0, 0).progress_fraction().abs() < f64::EPSILON);

        let broken = stats(3, 5, 0, 0);
        assert!(!broken.is_consistent());
        assert_eq!(broken.watched(), 0);
        assert!(broken.progress_fraction().abs() < f64::EPSILON);
    }

    #[test]
    fn stats_deserialize_with_missing_fields() {
        let stats: SeasonStats = serde_json::from_str(r#"{"total": 4, "skipped": 1}"#).unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.not_watched(), 0);
    }
}
