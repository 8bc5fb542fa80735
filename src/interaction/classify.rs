use egui::Rect;

use crate::board::GroupId;

use super::geometry::is_adjacent;
use super::types::TabMoveStatus;

/// Outcome of classifying a tab drag on one pointer move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabMoveClass {
    Default,
    Combine(GroupId),
    Divided,
}

impl TabMoveClass {
    pub fn status(&self) -> TabMoveStatus {
        match self {
            Self::Default => TabMoveStatus::Default,
            Self::Combine(_) => TabMoveStatus::Combine,
            Self::Divided => TabMoveStatus::Divided,
        }
    }
}

/// Decide whether a dragged tab is still over its own header, over some other group's header, or
/// over none.
///
/// `other_headers` should be ordered topmost first: the first adjacent header wins.
pub fn classify_tab_move<'a>(
    tab_rect: Rect,
    origin_header: Rect,
    other_headers: impl IntoIterator<Item = (&'a GroupId, Rect)>,
    dist: f32,
) -> TabMoveClass {
    if is_adjacent(tab_rect, origin_header, dist) {
        return TabMoveClass::Default;
    }

    other_headers
        .into_iter()
        .find(|(_, header)| is_adjacent(tab_rect, *header, dist))
        .map_or(TabMoveClass::Divided, |(group_id, _)| {
            TabMoveClass::Combine(group_id.clone())
        })
}
