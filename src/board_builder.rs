use egui::Rect;

use crate::board::{Board, Group, GroupId, Tab, TabId};

/// A small convenience builder for the initial [`Board`] a host hands to
/// [`crate::BoardInteraction::new`].
///
/// The builder keeps the board well-formed: groups without tabs are skipped, a tab id can only
/// live in one group, and the selected tab always belongs to its group.
///
/// ```
/// use egui::{Rect, pos2, vec2};
/// use egui_board::BoardBuilder;
///
/// let board = BoardBuilder::new()
///     .group("editor", Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0)), [
///         ("main.rs", "main.rs"),
///         ("lib.rs", "lib.rs"),
///     ])
///     .group("terminal", Rect::from_min_size(pos2(400.0, 0.0), vec2(300.0, 300.0)), [
///         ("shell", "Shell"),
///     ])
///     .build();
///
/// assert_eq!(board.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct BoardBuilder {
    board: Board,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Add a group with its tabs in strip order. The first tab is selected.
    #[must_use]
    pub fn group<G, T, N>(
        self,
        group_id: G,
        rect: Rect,
        tabs: impl IntoIterator<Item = (T, N)>,
    ) -> Self
    where
        G: Into<GroupId>,
        T: Into<TabId>,
        N: Into<String>,
    {
        self.group_with_selected(group_id, rect, tabs, None::<TabId>)
    }

    /// Like [`Self::group`], but selects `selected` if it is one of the group's tabs.
    #[must_use]
    pub fn group_with_selected<G, T, N>(
        mut self,
        group_id: G,
        rect: Rect,
        tabs: impl IntoIterator<Item = (T, N)>,
        selected: Option<impl Into<TabId>>,
    ) -> Self
    where
        G: Into<GroupId>,
        T: Into<TabId>,
        N: Into<String>,
    {
        let group_id = group_id.into();
        if self.board.groups.contains_key(&group_id) {
            log::warn!("board builder: duplicate group {group_id}, skipped");
            return self;
        }

        let mut tab_ids: Vec<TabId> = Vec::new();
        for (tab_id, name) in tabs {
            let tab_id = tab_id.into();
            if self.board.tabs.contains_key(&tab_id) || tab_ids.contains(&tab_id) {
                log::warn!("board builder: tab {tab_id} already placed, skipped in {group_id}");
                continue;
            }
            self.board.tabs.insert(
                tab_id.clone(),
                Tab {
                    id: tab_id.clone(),
                    group_id: group_id.clone(),
                    name: name.into(),
                },
            );
            tab_ids.push(tab_id);
        }

        let Some(first) = tab_ids.first().cloned() else {
            log::warn!("board builder: group {group_id} has no tabs, skipped");
            return self;
        };

        let selected_tab_id = selected
            .map(Into::into)
            .filter(|selected| tab_ids.contains(selected))
            .unwrap_or(first);

        self.board.groups.insert(
            group_id.clone(),
            Group {
                id: group_id,
                tab_ids,
                selected_tab_id,
                position: rect.min,
                size: rect.size(),
                prev_position: rect.min,
                prev_size: rect.size(),
                is_full_screen: false,
            },
        );
        self
    }

    pub fn build(self) -> Board {
        self.board
    }
}

#[cfg(test)]
mod tests {
    use egui::{pos2, vec2};

    use super::*;

    fn rect() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(300.0, 300.0))
    }

    #[test]
    fn skips_empty_groups_and_duplicate_tabs() {
        let board = BoardBuilder::new()
            .group("a", rect(), [("t1", "One"), ("t2", "Two")])
            .group("b", rect(), [("t2", "Again")])
            .group("c", rect(), Vec::<(&str, &str)>::new())
            .build();

        assert_eq!(board.len(), 1, "only group a has unique tabs");
        let a = board.group(&GroupId::from("a")).expect("group a");
        assert_eq!(a.tab_ids, vec![TabId::from("t1"), TabId::from("t2")]);
        assert_eq!(a.selected_tab_id, TabId::from("t1"));
        assert_eq!(board.tab(&TabId::from("t2")).map(|t| t.name.as_str()), Some("Two"));
    }

    #[test]
    fn foreign_selection_falls_back_to_first_tab() {
        let board = BoardBuilder::new()
            .group_with_selected("a", rect(), [("t1", "One"), ("t2", "Two")], Some("t2"))
            .group_with_selected("b", rect(), [("t3", "Three")], Some("t1"))
            .build();

        let a = board.group(&GroupId::from("a")).expect("group a");
        let b = board.group(&GroupId::from("b")).expect("group b");
        assert_eq!(a.selected_tab_id, TabId::from("t2"));
        assert_eq!(b.selected_tab_id, TabId::from("t3"));
        assert_eq!(a.position, pos2(10.0, 20.0));
        assert_eq!(a.prev_size, vec2(300.0, 300.0));
    }
}
