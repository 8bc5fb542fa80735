use egui::{Pos2, Rect, Vec2};

use crate::board::GroupId;

/// Highlighted tab slot while a tab is being reordered or merged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TabIndicator {
    pub group_id: GroupId,
    pub tab_idx: usize,
}

/// Highlighted drop zone for a group (or a tab about to become one).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct GroupIndicator {
    pub position: Pos2,
    pub size: Vec2,
}

impl GroupIndicator {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }
}

/// Transient, UI-only drag highlight. Never part of the [`crate::Board`], and always empty while no
/// gesture is in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Indicator {
    pub tab: Option<TabIndicator>,
    pub group: Option<GroupIndicator>,
}

impl Indicator {
    pub fn is_empty(&self) -> bool {
        self.tab.is_none() && self.group.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum IndicatorAction {
    SetTabIndicator(Option<TabIndicator>),
    SetGroupIndicator(Option<GroupIndicator>),
    Reset,
}

/// Pure indicator reducer: `(state, action) -> state`.
pub fn reduce_indicator(mut state: Indicator, action: &IndicatorAction) -> Indicator {
    match action {
        IndicatorAction::SetTabIndicator(tab) => state.tab.clone_from(tab),
        IndicatorAction::SetGroupIndicator(group) => state.group = *group,
        IndicatorAction::Reset => state = Indicator::default(),
    }
    state
}

#[cfg(test)]
mod tests {
    use egui::{pos2, vec2};

    use super::*;

    #[test]
    fn slices_are_independent_and_reset_clears_both() {
        let state = reduce_indicator(
            Indicator::default(),
            &IndicatorAction::SetTabIndicator(Some(TabIndicator {
                group_id: GroupId::from("g"),
                tab_idx: 2,
            })),
        );
        let state = reduce_indicator(
            state,
            &IndicatorAction::SetGroupIndicator(Some(GroupIndicator {
                position: pos2(0.0, 0.0),
                size: vec2(400.0, 300.0),
            })),
        );
        assert_eq!(state.tab.as_ref().map(|t| t.tab_idx), Some(2));
        assert!(state.group.is_some(), "group slice must survive a tab update");

        let state = reduce_indicator(state, &IndicatorAction::SetTabIndicator(None));
        assert!(state.tab.is_none());
        assert!(state.group.is_some());

        let state = reduce_indicator(state, &IndicatorAction::Reset);
        assert!(state.is_empty());
    }
}
