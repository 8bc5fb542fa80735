use std::collections::HashMap;

use egui::Vec2;

use crate::board::{Board, GroupId, TabId};

/// Structural problems with a board. An empty list means every invariant holds:
/// groups are non-empty, the selected tab belongs to its group, and each tab lives in exactly one
/// group's strip and has a tab record.
pub fn board_integrity_issues(board: &Board) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();
    let mut owner_of: HashMap<&TabId, &GroupId> = HashMap::new();

    for (key, group) in &board.groups {
        if *key != group.id {
            issues.push(format!(
                "integrity: group stored under {key} has id {}",
                group.id
            ));
        }

        if group.tab_ids.is_empty() {
            issues.push(format!("integrity: group {key} has no tabs"));
        } else if !group.contains_tab(&group.selected_tab_id) {
            issues.push(format!(
                "integrity: group {key} selects {} which is not in {:?}",
                group.selected_tab_id, group.tab_ids
            ));
        }

        for tab_id in &group.tab_ids {
            if let Some(prev) = owner_of.insert(tab_id, key) {
                if prev == key {
                    issues.push(format!("integrity: group {key} lists {tab_id} twice"));
                } else {
                    issues.push(format!(
                        "integrity: tab {tab_id} is in both {prev} and {key}"
                    ));
                }
            }
            if !board.tabs.contains_key(tab_id) {
                issues.push(format!(
                    "integrity: group {key} references missing tab {tab_id}"
                ));
            }
        }
    }

    issues
}

/// Groups that stick out of a container of `container_size`.
pub fn bounds_issues(board: &Board, container_size: Vec2) -> Vec<String> {
    board
        .groups
        .values()
        .filter_map(|group| {
            let rect = group.rect();
            let inside = rect.min.x >= 0.0
                && rect.min.y >= 0.0
                && rect.max.x <= container_size.x
                && rect.max.y <= container_size.y;
            (!inside).then(|| {
                format!(
                    "bounds: group {} at {rect:?} exceeds container {container_size:?}",
                    group.id
                )
            })
        })
        .collect()
}
