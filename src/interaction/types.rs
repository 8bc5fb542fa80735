use std::collections::BTreeMap;

use egui::{Pos2, Rect, Vec2};

use crate::board::{GroupId, TabId};

use super::strip::TabStrip;

/// Which edge or corner of a group a resize handle sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ResizeDirection {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    pub fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    pub fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }
}

/// What a pointer-down landed on. Produced by the render layer (or by
/// [`super::BoardInteraction::hit_test`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    ResizeHandle {
        group_id: GroupId,
        direction: ResizeDirection,
    },
    Tab {
        group_id: GroupId,
        tab_id: TabId,
    },
    /// The header strip outside of any tab.
    GroupHeader { group_id: GroupId },
    /// The content area below the header.
    GroupBody { group_id: GroupId },
}

impl HitTarget {
    pub fn group_id(&self) -> &GroupId {
        match self {
            Self::ResizeHandle { group_id, .. }
            | Self::Tab { group_id, .. }
            | Self::GroupHeader { group_id }
            | Self::GroupBody { group_id } => group_id,
        }
    }
}

/// Where a dragged tab currently is relative to the group headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TabMoveStatus {
    /// Still over its own group's header: a reorder.
    #[default]
    Default,
    /// Over another group's header: a merge into that group.
    Combine,
    /// Over no header: pulled free to become a new group.
    Divided,
}

/// Single-slot displacement of a tab that makes room for the dragged one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TranslateStatus {
    #[default]
    Default,
    Left,
    Right,
}

impl TranslateStatus {
    /// Horizontal displacement for a tab of width `tab_width`.
    pub fn offset(self, tab_width: f32) -> f32 {
        match self {
            Self::Default => 0.0,
            Self::Left => -tab_width,
            Self::Right => tab_width,
        }
    }

    /// Shift one slot to the left. Toggles instead of accumulating.
    pub fn shifted_left(self) -> Self {
        match self {
            Self::Default => Self::Left,
            Self::Left | Self::Right => Self::Default,
        }
    }

    /// Shift one slot to the right. Toggles instead of accumulating.
    pub fn shifted_right(self) -> Self {
        match self {
            Self::Default => Self::Right,
            Self::Left | Self::Right => Self::Default,
        }
    }
}

#[derive(Clone, Debug)]
pub(super) struct ResizeDrag {
    pub(super) group_id: GroupId,
    pub(super) direction: ResizeDirection,
    /// Container-local pointer position the next delta is measured from.
    pub(super) anchor: Pos2,
}

#[derive(Clone, Debug)]
pub(super) struct GroupDrag {
    pub(super) group_id: GroupId,
    /// Pointer position relative to the group's top-left corner at pointer-down.
    pub(super) grab_offset: Vec2,
    pub(super) anchor: Pos2,
}

#[derive(Clone, Debug)]
pub(super) struct TabDrag {
    pub(super) tab_id: TabId,
    pub(super) origin: GroupId,

    /// Free-floating rect of the dragged tab, container-local.
    pub(super) rect: Rect,
    pub(super) last_pointer: Pos2,

    pub(super) status: TabMoveStatus,

    /// Slot the dragged tab would land in, in whichever strip it currently belongs to.
    pub(super) idx: usize,

    /// Left its origin strip and not (yet) in any other one.
    pub(super) is_divided: bool,
    /// Currently a member of `combine_group`'s strip.
    pub(super) is_combine: bool,
    pub(super) combine_group: Option<GroupId>,
    pub(super) prev_combine_group: Option<GroupId>,

    /// Reflow state of every strip this gesture has touched (origin and merge targets).
    pub(super) strips: BTreeMap<GroupId, TabStrip>,
}

#[derive(Clone, Debug)]
pub(super) enum ActiveGesture {
    Resize(ResizeDrag),
    TabMove(TabDrag),
    GroupMove(GroupDrag),
}

impl ActiveGesture {
    pub(super) fn kind(&self) -> &'static str {
        match self {
            Self::Resize(_) => "resize",
            Self::TabMove(_) => "tab_move",
            Self::GroupMove(_) => "group_move",
        }
    }

    pub(super) fn group_id(&self) -> &GroupId {
        match self {
            Self::Resize(drag) => &drag.group_id,
            Self::TabMove(drag) => &drag.origin,
            Self::GroupMove(drag) => &drag.group_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_toggles_instead_of_accumulating() {
        let s = TranslateStatus::Default.shifted_left();
        assert_eq!(s, TranslateStatus::Left);
        assert_eq!(s.shifted_left(), TranslateStatus::Default);
        assert_eq!(s.shifted_right(), TranslateStatus::Default);
        assert_eq!(TranslateStatus::Right.offset(80.0), 80.0);
    }

    #[test]
    fn corner_directions_move_two_edges() {
        assert!(ResizeDirection::TopLeft.moves_top() && ResizeDirection::TopLeft.moves_left());
        assert!(!ResizeDirection::TopLeft.moves_bottom());
        assert!(ResizeDirection::BottomRight.moves_bottom());
        assert!(ResizeDirection::BottomRight.moves_right());
        assert!(!ResizeDirection::Right.moves_top());
    }
}
