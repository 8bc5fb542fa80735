use egui::{Pos2, Vec2};

use crate::board::{Board, Group, GroupId, TabId};

/// Discrete, persisted layout mutations.
///
/// The interaction engine dispatches at most one of these per gesture (on release); hosts may also
/// dispatch them directly through [`crate::BoardInteraction::dispatch`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BoardAction {
    UpdateGroupPosition {
        group_id: GroupId,
        position: Pos2,
    },
    UpdateGroupSize {
        group_id: GroupId,
        position: Pos2,
        size: Vec2,
    },
    /// Toggle between the group's own geometry and the full container.
    UpdateGroupFullScreen {
        group_id: GroupId,
        container_size: Vec2,
    },
    UpdateGroupTabOrder {
        group_id: GroupId,
        tab_ids: Vec<TabId>,
    },
    /// Move `tab_id` out of `group_id` into a brand new group at the given geometry.
    DivideGroup {
        group_id: GroupId,
        tab_id: TabId,
        position: Pos2,
        size: Vec2,
    },
    /// Move `tab_id` from `source_group_id` into `target_group_id`, whose strip becomes
    /// `target_tab_ids`.
    CombineGroups {
        source_group_id: GroupId,
        target_group_id: GroupId,
        tab_id: TabId,
        target_tab_ids: Vec<TabId>,
    },
    SelectTab {
        group_id: GroupId,
        tab_id: TabId,
    },
}

impl BoardAction {
    /// The group the action is addressed to (the source group for a combine).
    pub fn group_id(&self) -> &GroupId {
        match self {
            Self::UpdateGroupPosition { group_id, .. }
            | Self::UpdateGroupSize { group_id, .. }
            | Self::UpdateGroupFullScreen { group_id, .. }
            | Self::UpdateGroupTabOrder { group_id, .. }
            | Self::DivideGroup { group_id, .. }
            | Self::SelectTab { group_id, .. } => group_id,
            Self::CombineGroups {
                source_group_id, ..
            } => source_group_id,
        }
    }
}

/// Pure board reducer: `(state, action) -> state`.
///
/// Actions that reference missing groups or tabs return the state unchanged.
pub fn reduce_board(mut state: Board, action: &BoardAction) -> Board {
    state.apply(action);
    state
}

impl Board {
    /// Apply `action` in place. Returns `false` (and leaves the board untouched) when the action
    /// is malformed or refers to something that no longer exists.
    ///
    /// Every branch validates before it mutates, so an action is never partially applied.
    pub fn apply(&mut self, action: &BoardAction) -> bool {
        match action {
            BoardAction::UpdateGroupPosition { group_id, position } => {
                let Some(group) = self.groups.get_mut(group_id) else {
                    return false;
                };
                if group.position != *position {
                    group.position = *position;
                    group.is_full_screen = false;
                }
                true
            }

            BoardAction::UpdateGroupSize {
                group_id,
                position,
                size,
            } => {
                let Some(group) = self.groups.get_mut(group_id) else {
                    return false;
                };
                // Only a real geometry change leaves full-screen.
                if group.position != *position || group.size != *size {
                    group.position = *position;
                    group.size = *size;
                    group.is_full_screen = false;
                }
                true
            }

            BoardAction::UpdateGroupFullScreen {
                group_id,
                container_size,
            } => {
                let Some(group) = self.groups.get_mut(group_id) else {
                    return false;
                };
                if group.is_full_screen {
                    group.position = group.prev_position;
                    group.size = group.prev_size;
                    group.is_full_screen = false;
                } else {
                    group.prev_position = group.position;
                    group.prev_size = group.size;
                    group.position = Pos2::ZERO;
                    group.size = *container_size;
                    group.is_full_screen = true;
                }
                true
            }

            BoardAction::UpdateGroupTabOrder { group_id, tab_ids } => {
                let Some(group) = self.groups.get_mut(group_id) else {
                    return false;
                };
                if !is_permutation(&group.tab_ids, tab_ids) {
                    log::debug!("tab order for {group_id} is not a permutation of its tabs, ignored");
                    return false;
                }
                group.tab_ids.clone_from(tab_ids);
                true
            }

            BoardAction::DivideGroup {
                group_id,
                tab_id,
                position,
                size,
            } => {
                if !self
                    .groups
                    .get(group_id)
                    .is_some_and(|group| group.contains_tab(tab_id))
                {
                    return false;
                }

                self.remove_tab_from_group(group_id, tab_id);

                let new_group_id = self.allocate_group_id();
                if let Some(tab) = self.tabs.get_mut(tab_id) {
                    tab.group_id = new_group_id.clone();
                }
                self.groups.insert(
                    new_group_id.clone(),
                    Group {
                        id: new_group_id,
                        tab_ids: vec![tab_id.clone()],
                        selected_tab_id: tab_id.clone(),
                        position: *position,
                        size: *size,
                        prev_position: *position,
                        prev_size: *size,
                        is_full_screen: false,
                    },
                );
                true
            }

            BoardAction::CombineGroups {
                source_group_id,
                target_group_id,
                tab_id,
                target_tab_ids,
            } => {
                if source_group_id == target_group_id {
                    return false;
                }
                let Some(target) = self.groups.get(target_group_id) else {
                    return false;
                };
                if !self
                    .groups
                    .get(source_group_id)
                    .is_some_and(|group| group.contains_tab(tab_id))
                {
                    return false;
                }

                let mut expected = target.tab_ids.clone();
                expected.push(tab_id.clone());
                let final_order = if is_permutation(&expected, target_tab_ids) {
                    target_tab_ids.clone()
                } else {
                    log::debug!(
                        "combine order for {target_group_id} does not match its tabs, appending {tab_id}"
                    );
                    expected
                };

                self.remove_tab_from_group(source_group_id, tab_id);

                if let Some(tab) = self.tabs.get_mut(tab_id) {
                    tab.group_id = target_group_id.clone();
                }
                if let Some(target) = self.groups.get_mut(target_group_id) {
                    target.tab_ids = final_order;
                    target.selected_tab_id = tab_id.clone();
                }
                true
            }

            BoardAction::SelectTab { group_id, tab_id } => {
                let Some(group) = self.groups.get_mut(group_id) else {
                    return false;
                };
                if !group.contains_tab(tab_id) {
                    return false;
                }
                group.selected_tab_id = tab_id.clone();
                true
            }
        }
    }

    /// Drop `tab_id` from the group's strip, deleting the group if that was its last tab.
    /// The first remaining tab becomes selected.
    fn remove_tab_from_group(&mut self, group_id: &GroupId, tab_id: &TabId) {
        let Some(group) = self.groups.get_mut(group_id) else {
            return;
        };
        group.tab_ids.retain(|id| id != tab_id);
        match group.tab_ids.first() {
            Some(first) => group.selected_tab_id = first.clone(),
            None => {
                self.groups.remove(group_id);
            }
        }
    }
}

fn is_permutation(current: &[TabId], proposed: &[TabId]) -> bool {
    if current.len() != proposed.len() {
        return false;
    }
    let mut a: Vec<&TabId> = current.iter().collect();
    let mut b: Vec<&TabId> = proposed.iter().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[cfg(test)]
mod tests {
    use egui::{Rect, pos2, vec2};

    use super::*;
    use crate::board_builder::BoardBuilder;
    use crate::integrity::board_integrity_issues;

    fn ids(names: &[&str]) -> Vec<TabId> {
        names.iter().map(|&n| TabId::from(n)).collect()
    }

    fn board() -> Board {
        BoardBuilder::new()
            .group(
                "g1",
                Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0)),
                [("a", "A"), ("b", "B"), ("c", "C")],
            )
            .group(
                "g2",
                Rect::from_min_size(pos2(500.0, 0.0), vec2(400.0, 300.0)),
                [("x", "X"), ("y", "Y")],
            )
            .build()
    }

    fn assert_ok(board: &Board) {
        let issues = board_integrity_issues(board);
        assert!(issues.is_empty(), "{}", issues.join("\n"));
    }

    #[test]
    fn position_and_size_updates_are_idempotent() {
        let g1 = GroupId::from("g1");
        let action = BoardAction::UpdateGroupSize {
            group_id: g1.clone(),
            position: pos2(10.0, 20.0),
            size: vec2(350.0, 320.0),
        };
        let once = reduce_board(board(), &action);
        let twice = reduce_board(once.clone(), &action);
        assert_eq!(once, twice);

        let group = once.group(&g1).expect("g1");
        assert_eq!(group.rect(), Rect::from_min_size(pos2(10.0, 20.0), vec2(350.0, 320.0)));

        let moved = reduce_board(
            once,
            &BoardAction::UpdateGroupPosition {
                group_id: g1.clone(),
                position: pos2(40.0, 0.0),
            },
        );
        let group = moved.group(&g1).expect("g1");
        assert_eq!(group.position, pos2(40.0, 0.0));
        assert_eq!(group.size, vec2(350.0, 320.0), "a move keeps the size");
    }

    #[test]
    fn full_screen_toggles_back_to_previous_geometry() {
        let g1 = GroupId::from("g1");
        let toggle = BoardAction::UpdateGroupFullScreen {
            group_id: g1.clone(),
            container_size: vec2(1200.0, 800.0),
        };

        let full = reduce_board(board(), &toggle);
        let group = full.group(&g1).expect("g1");
        assert!(group.is_full_screen);
        assert_eq!(group.rect(), Rect::from_min_size(pos2(0.0, 0.0), vec2(1200.0, 800.0)));

        let restored = reduce_board(full, &toggle);
        assert_eq!(restored, board());
    }

    #[test]
    fn moving_a_full_screen_group_leaves_full_screen() {
        let g1 = GroupId::from("g1");
        let mut state = board();
        state.apply(&BoardAction::UpdateGroupFullScreen {
            group_id: g1.clone(),
            container_size: vec2(1200.0, 800.0),
        });
        state.apply(&BoardAction::UpdateGroupPosition {
            group_id: g1.clone(),
            position: pos2(20.0, 10.0),
        });
        assert!(!state.group(&g1).expect("g1").is_full_screen);

        // The next toggle enters full-screen again instead of restoring.
        state.apply(&BoardAction::UpdateGroupFullScreen {
            group_id: g1.clone(),
            container_size: vec2(1000.0, 700.0),
        });
        let group = state.group(&g1).expect("g1");
        assert!(group.is_full_screen);
        assert_eq!(group.size, vec2(1000.0, 700.0));
    }

    #[test]
    fn unchanged_geometry_keeps_full_screen() {
        let g1 = GroupId::from("g1");
        let toggle = BoardAction::UpdateGroupFullScreen {
            group_id: g1.clone(),
            container_size: vec2(1200.0, 800.0),
        };
        let full = reduce_board(board(), &toggle);

        let same_position = BoardAction::UpdateGroupPosition {
            group_id: g1.clone(),
            position: pos2(0.0, 0.0),
        };
        let same_size = BoardAction::UpdateGroupSize {
            group_id: g1.clone(),
            position: pos2(0.0, 0.0),
            size: vec2(1200.0, 800.0),
        };
        let state = reduce_board(reduce_board(full.clone(), &same_position), &same_size);
        assert_eq!(state, full);

        // So the next toggle still restores.
        assert_eq!(reduce_board(state, &toggle), board());
    }

    #[test]
    fn tab_order_must_be_a_permutation() {
        let g1 = GroupId::from("g1");
        let reordered = reduce_board(
            board(),
            &BoardAction::UpdateGroupTabOrder {
                group_id: g1.clone(),
                tab_ids: ids(&["b", "c", "a"]),
            },
        );
        assert_eq!(reordered.group(&g1).expect("g1").tab_ids, ids(&["b", "c", "a"]));

        let mut state = board();
        for bad in [ids(&["a", "b"]), ids(&["a", "b", "x"]), ids(&["a", "a", "b"])] {
            let changed = state.apply(&BoardAction::UpdateGroupTabOrder {
                group_id: g1.clone(),
                tab_ids: bad.clone(),
            });
            assert!(!changed, "{bad:?} accepted");
        }
        assert_eq!(state, board());
    }

    #[test]
    fn divide_moves_tab_into_a_new_group() {
        let state = reduce_board(
            board(),
            &BoardAction::DivideGroup {
                group_id: GroupId::from("g1"),
                tab_id: TabId::from("a"),
                position: pos2(100.0, 400.0),
                size: vec2(400.0, 300.0),
            },
        );
        assert_ok(&state);
        assert_eq!(state.len(), 3);

        let g1 = state.group(&GroupId::from("g1")).expect("g1");
        assert_eq!(g1.tab_ids, ids(&["b", "c"]));
        assert_eq!(g1.selected_tab_id, TabId::from("b"));

        let new_id = state.group_of_tab(&TabId::from("a")).expect("a placed").clone();
        let new_group = state.group(&new_id).expect("new group");
        assert_eq!(new_group.tab_ids, ids(&["a"]));
        assert_eq!(new_group.selected_tab_id, TabId::from("a"));
        assert_eq!(new_group.position, pos2(100.0, 400.0));
        assert_eq!(state.tab(&TabId::from("a")).map(|t| &t.group_id), Some(&new_id));
    }

    #[test]
    fn dividing_the_only_tab_replaces_the_group() {
        let state = reduce_board(
            board(),
            &BoardAction::DivideGroup {
                group_id: GroupId::from("g2"),
                tab_id: TabId::from("x"),
                position: pos2(0.0, 400.0),
                size: vec2(300.0, 300.0),
            },
        );
        let state = reduce_board(
            state,
            &BoardAction::DivideGroup {
                group_id: GroupId::from("g2"),
                tab_id: TabId::from("y"),
                position: pos2(600.0, 400.0),
                size: vec2(300.0, 300.0),
            },
        );
        assert_ok(&state);
        assert!(state.group(&GroupId::from("g2")).is_none(), "emptied group is removed");
        assert_eq!(state.len(), 3);
        assert_ne!(
            state.group_of_tab(&TabId::from("x")),
            state.group_of_tab(&TabId::from("y")),
            "fresh ids never collide"
        );
    }

    #[test]
    fn combine_inserts_at_the_given_order_and_selects_the_tab() {
        let state = reduce_board(
            board(),
            &BoardAction::CombineGroups {
                source_group_id: GroupId::from("g1"),
                target_group_id: GroupId::from("g2"),
                tab_id: TabId::from("b"),
                target_tab_ids: ids(&["x", "b", "y"]),
            },
        );
        assert_ok(&state);

        let g1 = state.group(&GroupId::from("g1")).expect("g1");
        let g2 = state.group(&GroupId::from("g2")).expect("g2");
        assert_eq!(g1.tab_ids, ids(&["a", "c"]));
        assert_eq!(g2.tab_ids, ids(&["x", "b", "y"]));
        assert_eq!(g2.selected_tab_id, TabId::from("b"));
        assert_eq!(
            state.tab(&TabId::from("b")).map(|t| t.group_id.clone()),
            Some(GroupId::from("g2"))
        );
    }

    #[test]
    fn combine_with_a_bad_order_appends() {
        let state = reduce_board(
            board(),
            &BoardAction::CombineGroups {
                source_group_id: GroupId::from("g1"),
                target_group_id: GroupId::from("g2"),
                tab_id: TabId::from("a"),
                target_tab_ids: ids(&["x", "a"]),
            },
        );
        assert_ok(&state);
        assert_eq!(
            state.group(&GroupId::from("g2")).expect("g2").tab_ids,
            ids(&["x", "y", "a"])
        );
    }

    #[test]
    fn combining_the_last_tab_removes_the_source() {
        let state = reduce_board(
            board(),
            &BoardAction::DivideGroup {
                group_id: GroupId::from("g1"),
                tab_id: TabId::from("c"),
                position: pos2(0.0, 400.0),
                size: vec2(300.0, 300.0),
            },
        );
        let lone = state.group_of_tab(&TabId::from("c")).expect("c").clone();
        let state = reduce_board(
            state,
            &BoardAction::CombineGroups {
                source_group_id: lone.clone(),
                target_group_id: GroupId::from("g2"),
                tab_id: TabId::from("c"),
                target_tab_ids: ids(&["c", "x", "y"]),
            },
        );
        assert_ok(&state);
        assert!(state.group(&lone).is_none());
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn two_small_groups_divide_and_combine() {
        let two = || {
            BoardBuilder::new()
                .group(
                    "A",
                    Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 300.0)),
                    [("a", "a"), ("b", "b")],
                )
                .group(
                    "B",
                    Rect::from_min_size(pos2(400.0, 0.0), vec2(300.0, 300.0)),
                    [("c", "c")],
                )
                .build()
        };

        let divided = reduce_board(
            two(),
            &BoardAction::DivideGroup {
                group_id: GroupId::from("A"),
                tab_id: TabId::from("b"),
                position: pos2(10.0, 10.0),
                size: vec2(300.0, 300.0),
            },
        );
        let a = divided.group(&GroupId::from("A")).expect("A");
        assert_eq!((a.tab_ids.clone(), a.selected_tab_id.clone()), (ids(&["a"]), TabId::from("a")));
        let new_id = divided.group_of_tab(&TabId::from("b")).expect("b");
        let new_group = divided.group(new_id).expect("new group");
        assert_eq!(
            new_group.rect(),
            Rect::from_min_size(pos2(10.0, 10.0), vec2(300.0, 300.0))
        );

        let combined = reduce_board(
            two(),
            &BoardAction::CombineGroups {
                source_group_id: GroupId::from("A"),
                target_group_id: GroupId::from("B"),
                tab_id: TabId::from("b"),
                target_tab_ids: ids(&["c", "b"]),
            },
        );
        let a = combined.group(&GroupId::from("A")).expect("A");
        let b = combined.group(&GroupId::from("B")).expect("B");
        assert_eq!(a.tab_ids, ids(&["a"]));
        assert_eq!(b.tab_ids, ids(&["c", "b"]));
        assert_eq!(b.selected_tab_id, TabId::from("b"));
    }

    #[test]
    fn unknown_ids_and_self_combine_are_no_ops() {
        let unknown = GroupId::from("nope");
        let actions = [
            BoardAction::UpdateGroupPosition {
                group_id: unknown.clone(),
                position: pos2(1.0, 1.0),
            },
            BoardAction::UpdateGroupFullScreen {
                group_id: unknown.clone(),
                container_size: vec2(100.0, 100.0),
            },
            BoardAction::DivideGroup {
                group_id: GroupId::from("g1"),
                tab_id: TabId::from("x"),
                position: pos2(0.0, 0.0),
                size: vec2(300.0, 300.0),
            },
            BoardAction::CombineGroups {
                source_group_id: GroupId::from("g1"),
                target_group_id: GroupId::from("g1"),
                tab_id: TabId::from("a"),
                target_tab_ids: ids(&["a", "b", "c"]),
            },
            BoardAction::CombineGroups {
                source_group_id: GroupId::from("g1"),
                target_group_id: unknown,
                tab_id: TabId::from("a"),
                target_tab_ids: ids(&["a"]),
            },
            BoardAction::SelectTab {
                group_id: GroupId::from("g1"),
                tab_id: TabId::from("x"),
            },
        ];

        for action in &actions {
            let mut state = board();
            assert!(!state.apply(action), "{action:?} applied");
            assert_eq!(state, board(), "{action:?} changed the board");
        }
    }

    #[test]
    fn select_tab_changes_only_the_selection() {
        let state = reduce_board(
            board(),
            &BoardAction::SelectTab {
                group_id: GroupId::from("g1"),
                tab_id: TabId::from("c"),
            },
        );
        let g1 = state.group(&GroupId::from("g1")).expect("g1");
        assert_eq!(g1.selected_tab_id, TabId::from("c"));
        assert_eq!(g1.tab_ids, ids(&["a", "b", "c"]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn actions_serialize_as_tagged_variants() {
        let action = BoardAction::SelectTab {
            group_id: GroupId::from("g1"),
            tab_id: TabId::from("c"),
        };
        let json = serde_json::to_string(&action).expect("serialize");
        assert_eq!(json, r#"{"SelectTab":{"group_id":"g1","tab_id":"c"}}"#);
        let back: BoardAction = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, action);
    }
}
