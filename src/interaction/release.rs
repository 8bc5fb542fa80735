use egui::Rect;

use crate::indicator::IndicatorAction;
use crate::reducer::BoardAction;

use super::BoardInteraction;
use super::types::{ActiveGesture, TabDrag, TabMoveStatus};

impl BoardInteraction {
    /// End the gesture in flight and commit its outcome.
    ///
    /// Returns the committed action, or `None` if nothing was in flight or the outcome left the
    /// board unchanged. The indicator is always cleared.
    pub fn on_pointer_release(&mut self, container: Rect) -> Option<BoardAction> {
        let gesture = self.gesture.take()?;

        let action = self.release_action(&gesture);
        self.dispatch_indicator(IndicatorAction::Reset);

        let committed = action.and_then(|action| self.commit(action, Some(container.size())));
        // Drop whatever transient geometry the gesture left behind.
        self.sync_live_from_board();

        let outcome = match &committed {
            Some(action) => format!("{action:?}"),
            None => "no-op".to_owned(),
        };
        let line = self.session.finish("RELEASE", &outcome);
        self.debug_log_event(line);
        match &committed {
            Some(action) => log::trace!(
                "released {} on {}, committed to {}",
                gesture.kind(),
                gesture.group_id(),
                action.group_id()
            ),
            None => log::trace!("released {} on {}", gesture.kind(), gesture.group_id()),
        }

        committed
    }

    /// The board action a gesture ends in, read off the live state before the indicator is reset.
    fn release_action(&self, gesture: &ActiveGesture) -> Option<BoardAction> {
        match gesture {
            ActiveGesture::Resize(drag) => {
                let rect = self.live.get(&drag.group_id)?;
                Some(BoardAction::UpdateGroupSize {
                    group_id: drag.group_id.clone(),
                    position: rect.min,
                    size: rect.size(),
                })
            }

            ActiveGesture::GroupMove(drag) => match &self.indicator.group {
                Some(snap) => Some(BoardAction::UpdateGroupSize {
                    group_id: drag.group_id.clone(),
                    position: snap.position,
                    size: snap.size,
                }),
                None => {
                    let rect = self.live.get(&drag.group_id)?;
                    Some(BoardAction::UpdateGroupPosition {
                        group_id: drag.group_id.clone(),
                        position: rect.min,
                    })
                }
            },

            ActiveGesture::TabMove(drag) => self.tab_release_action(drag),
        }
    }

    fn tab_release_action(&self, drag: &TabDrag) -> Option<BoardAction> {
        match drag.status {
            TabMoveStatus::Default => {
                let strip = drag.strips.get(&drag.origin)?;
                Some(BoardAction::UpdateGroupTabOrder {
                    group_id: drag.origin.clone(),
                    tab_ids: strip.ordered_with(&drag.tab_id, drag.idx),
                })
            }

            TabMoveStatus::Combine => {
                let target = drag.combine_group.as_ref()?;
                let strip = drag.strips.get(target)?;
                Some(BoardAction::CombineGroups {
                    source_group_id: drag.origin.clone(),
                    target_group_id: target.clone(),
                    tab_id: drag.tab_id.clone(),
                    target_tab_ids: strip.ordered_with(&drag.tab_id, drag.idx),
                })
            }

            TabMoveStatus::Divided => {
                let preview = self.indicator.group.as_ref()?;
                Some(BoardAction::DivideGroup {
                    group_id: drag.origin.clone(),
                    tab_id: drag.tab_id.clone(),
                    position: preview.position,
                    size: preview.size,
                })
            }
        }
    }
}
