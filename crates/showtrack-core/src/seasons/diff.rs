//! Identity-based diffing of season lists.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{SeasonId, SeasonListItem};

use super::{render, RenderOptions, SeasonRow};

/// Two rows describe the same season.
pub fn same_item(old: &SeasonListItem, new: &SeasonListItem) -> bool {
    old.season.id == new.season.id
}

/// Two rows for the same season show identical content.
pub fn same_content(old: &SeasonListItem, new: &SeasonListItem) -> bool {
    old == new
}

/// A single list edit. Applying a diff's changes in order to the old list
/// yields the new one; indices refer to the list as it is at that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListChange {
    Remove { id: SeasonId, index: usize },
    Insert { id: SeasonId, index: usize },
    Move { id: SeasonId, from: usize, to: usize },
    /// Same season, new content: refresh the row in place.
    Update { id: SeasonId, index: usize },
}

/// Keep the first row of every season id.
pub fn dedup_by_id(items: &[SeasonListItem]) -> Vec<SeasonListItem> {
    let mut seen = HashSet::new();
    let unique: Vec<SeasonListItem> = items
        .iter()
        .filter(|item| seen.insert(item.id()))
        .copied()
        .collect();
    if unique.len() != items.len() {
        tracing::warn!(
            dropped = items.len() - unique.len(),
            "Dropped season rows with duplicate ids"
        );
    }
    unique
}

/// Compute the edits turning `old` into `new`. Only the first row of each
/// season id counts; later duplicates are ignored in both lists.
pub fn diff(old: &[SeasonListItem], new: &[SeasonListItem]) -> Vec<ListChange> {
    let old = dedup_by_id(old);
    let new = dedup_by_id(new);
    let new_ids: HashMap<SeasonId, usize> = new
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id(), index))
        .collect();
    let old_by_id: HashMap<SeasonId, &SeasonListItem> =
        old.iter().map(|item| (item.id(), item)).collect();

    let mut changes = Vec::new();

    // Back to front so earlier indices stay valid.
    for (index, item) in old.iter().enumerate().rev() {
        if !new_ids.contains_key(&item.id()) {
            changes.push(ListChange::Remove {
                id: item.id(),
                index,
            });
        }
    }

    let mut working: Vec<SeasonId> = old
        .iter()
        .map(SeasonListItem::id)
        .filter(|id| new_ids.contains_key(id))
        .collect();

    for (target, item) in new.iter().enumerate() {
        let id = item.id();
        let Some(previous) = old_by_id.get(&id) else {
            working.insert(target, id);
            changes.push(ListChange::Insert { id, index: target });
            continue;
        };

        if let Some(current) = working.iter().position(|candidate| *candidate == id) {
            if current != target {
                working.remove(current);
                working.insert(target, id);
                changes.push(ListChange::Move {
                    id,
                    from: current,
                    to: target,
                });
            }
        }

        if !same_content(previous, item) {
            changes.push(ListChange::Update { id, index: target });
        }
    }

    changes
}

/// The season list currently shown by a host.
#[derive(Debug, Clone, Default)]
pub struct SeasonList {
    items: Vec<SeasonListItem>,
}

impl SeasonList {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[SeasonListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the list and return the edits the host has to apply. Rows
    /// repeating a season id are dropped.
    pub fn submit(&mut self, items: Vec<SeasonListItem>) -> Vec<ListChange> {
        let items = dedup_by_id(&items);
        let changes = diff(&self.items, &items);
        tracing::debug!(
            changes = changes.len(),
            seasons = items.len(),
            "Submitted season list"
        );
        self.items = items;
        changes
    }

    pub fn render(&self, options: RenderOptions) -> Vec<SeasonRow> {
        render(&self.items, options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Season, SeasonStats};

    fn item(id: i64, total: u32, released: u32) -> SeasonListItem {
        SeasonListItem {
            season: Season {
                id: SeasonId(id),
                number: u32::try_from(id).unwrap(),
            },
            stats: SeasonStats {
                total,
                not_watched_released: released,
                ..SeasonStats::default()
            },
        }
    }

    fn apply(old: &[SeasonListItem], new: &[SeasonListItem], changes: &[ListChange]) -> Vec<i64> {
        let by_id: HashMap<SeasonId, &SeasonListItem> =
            new.iter().map(|item| (item.id(), item)).collect();
        let mut ids: Vec<SeasonId> = old.iter().map(SeasonListItem::id).collect();
        for change in changes {
            match *change {
                ListChange::Remove { index, .. } => {
                    ids.remove(index);
                }
                ListChange::Insert { id, index } => {
                    assert!(by_id.contains_key(&id));
                    ids.insert(index, id);
                }
                ListChange::Move { id, from, to } => {
                    assert_eq!(ids.remove(from), id);
                    ids.insert(to, id);
                }
                ListChange::Update { id, index } => assert_eq!(ids[index], id),
            }
        }
        ids.into_iter().map(|id| id.0).collect()
    }

    #[test]
    fn same_season_with_new_stats_is_an_in_place_update() {
        let old = item(1, 10, 4);
        let new = item(1, 10, 3);
        assert!(same_item(&old, &new));
        assert!(!same_content(&old, &new));

        let changes = diff(&[old], &[new]);
        assert_eq!(
            changes,
            vec![ListChange::Update {
                id: SeasonId(1),
                index: 0
            }]
        );
    }

    #[test]
    fn unchanged_list_produces_no_changes() {
        let items = vec![item(1, 10, 0), item(2, 8, 8)];
        assert!(diff(&items, &items).is_empty());
    }

    #[test]
    fn inserts_removes_and_moves_rebuild_new_order() {
        let old = vec![item(1, 10, 0), item(2, 8, 8), item(3, 5, 5), item(4, 1, 1)];
        let new = vec![item(3, 5, 4), item(5, 2, 2), item(1, 10, 0), item(2, 8, 8)];

        let changes = diff(&old, &new);
        assert!(changes.contains(&ListChange::Remove {
            id: SeasonId(4),
            index: 3
        }));
        assert!(changes.contains(&ListChange::Insert {
            id: SeasonId(5),
            index: 1
        }));
        assert!(changes.contains(&ListChange::Update {
            id: SeasonId(3),
            index: 0
        }));
        assert_eq!(apply(&old, &new, &changes), vec![3, 5, 1, 2]);
    }

    #[test]
    fn season_list_tracks_submitted_items() {
        let mut list = SeasonList::new();
        let first = list.submit(vec![item(1, 2, 1), item(2, 3, 3)]);
        assert_eq!(first.len(), 2);
        assert_eq!(list.len(), 2);

        let second = list.submit(vec![item(2, 3, 3)]);
        assert_eq!(
            second,
            vec![ListChange::Remove {
                id: SeasonId(1),
                index: 0
            }]
        );
        assert_eq!(list.render(RenderOptions::default())[0].title, "Season 2");
    }

    #[test]
    fn repeated_season_ids_keep_the_first_row() {
        let mut list = SeasonList::new();
        let _ = list.submit(vec![item(1, 2, 1)]);

        let changes = list.submit(vec![item(1, 2, 1), item(1, 5, 5), item(2, 3, 3)]);
        assert_eq!(
            changes,
            vec![ListChange::Insert {
                id: SeasonId(2),
                index: 1
            }]
        );
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0], item(1, 2, 1));
    }
}
