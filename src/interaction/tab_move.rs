//! Per-move handling of a tab drag: reorder within the origin, merge into another group, or pull
//! free into a new group.

use egui::{Pos2, Rect, Vec2};

use crate::board::GroupId;
use crate::indicator::TabIndicator;

use super::BoardInteraction;
use super::classify::{TabMoveClass, classify_tab_move};
use super::geometry::{divided_indicator, header_rect, slot_under};
use super::strip::TabStrip;
use super::types::TabDrag;

impl BoardInteraction {
    pub(super) fn move_tab(
        &mut self,
        mut drag: TabDrag,
        pointer: Pos2,
        container_size: Vec2,
    ) -> TabDrag {
        let Some(origin_rect) = self.live.get(&drag.origin).copied() else {
            return drag;
        };
        let tab_height = self.options.tab_size.y;

        drag.rect = drag.rect.translate(pointer - drag.last_pointer);
        drag.last_pointer = pointer;

        let origin_header = header_rect(origin_rect, tab_height);
        let others = self
            .z_order
            .iter()
            .rev()
            .filter(|id| **id != drag.origin)
            .filter_map(|id| {
                let rect = self.live.get(id)?;
                Some((id, header_rect(*rect, tab_height)))
            });
        let class = classify_tab_move(
            drag.rect,
            origin_header,
            others,
            self.options.adjacency_threshold,
        );

        if class.status() != drag.status {
            log::trace!(
                "tab {} status {:?} -> {:?}",
                drag.tab_id,
                drag.status,
                class.status()
            );
        }
        drag.status = class.status();

        match class {
            TabMoveClass::Default => self.tab_over_origin(&mut drag, origin_header),
            TabMoveClass::Combine(target) => self.tab_over_other(&mut drag, target),
            TabMoveClass::Divided => {
                self.tab_over_nothing(&mut drag, pointer, container_size, origin_rect.size());
            }
        }
        drag
    }

    fn tab_over_origin(&mut self, drag: &mut TabDrag, origin_header: Rect) {
        let Some(count) = self.board.group(&drag.origin).map(|g| g.tab_ids.len()) else {
            return;
        };
        self.set_group_indicator(None);
        self.bring_to_front(&drag.origin);

        if drag.is_combine || drag.is_divided {
            // Coming back: leave the merge target (if any) and rejoin the origin strip.
            if drag.is_combine {
                if let Some(combine) = drag.combine_group.take() {
                    if let Some(strip) = drag.strips.get_mut(&combine) {
                        strip.leave(drag.idx);
                    }
                }
                drag.prev_combine_group = None;
            }
            drag.is_combine = false;
            drag.is_divided = false;

            if let Some(strip) = drag.strips.get_mut(&drag.origin) {
                drag.idx = strip.join(drag.rect.right(), origin_header, self.options.tab_size);
            }
            self.set_tab_indicator(Some(TabIndicator {
                group_id: drag.origin.clone(),
                tab_idx: drag.idx,
            }));
            return;
        }

        let left = drag.rect.left() - origin_header.left();
        let new_idx = slot_under(left, self.options.tab_width()).min(count.saturating_sub(1));
        if new_idx == drag.idx {
            return;
        }
        if let Some(strip) = drag.strips.get_mut(&drag.origin) {
            strip.reorder(drag.idx, new_idx);
        }
        drag.idx = new_idx;
        self.set_tab_indicator(Some(TabIndicator {
            group_id: drag.origin.clone(),
            tab_idx: new_idx,
        }));
    }

    fn tab_over_other(&mut self, drag: &mut TabDrag, target: GroupId) {
        let Some(target_rect) = self.live.get(&target).copied() else {
            return;
        };
        let Some(target_group) = self.board.group(&target) else {
            return;
        };
        let count = target_group.tab_ids.len();
        if !drag.strips.contains_key(&target) {
            let strip = TabStrip::new(&target_group.tab_ids, &drag.tab_id);
            drag.strips.insert(target.clone(), strip);
        }

        self.set_group_indicator(None);
        let tab_size = self.options.tab_size;
        let target_header = header_rect(target_rect, tab_size.y);
        drag.combine_group = Some(target.clone());

        if drag.prev_combine_group.as_ref() == Some(&target) {
            // Still over the same target: reorder inside it. One extra slot at the end.
            let left = drag.rect.left() - target_header.left();
            let new_idx = slot_under(left, self.options.tab_width()).min(count);
            if new_idx == drag.idx {
                return;
            }
            if let Some(strip) = drag.strips.get_mut(&target) {
                strip.reorder(drag.idx, new_idx);
            }
            drag.idx = new_idx;
            self.set_tab_indicator(Some(TabIndicator {
                group_id: target,
                tab_idx: new_idx,
            }));
            return;
        }

        match drag.prev_combine_group.take() {
            Some(prev) => {
                if let Some(strip) = drag.strips.get_mut(&prev) {
                    strip.leave(drag.idx);
                }
            }
            None => {
                drag.is_combine = true;
                if drag.is_divided {
                    drag.is_divided = false;
                } else if let Some(strip) = drag.strips.get_mut(&drag.origin) {
                    strip.leave(drag.idx);
                }
            }
        }

        if let Some(strip) = drag.strips.get_mut(&target) {
            drag.idx = strip.join(drag.rect.right(), target_header, tab_size);
        }
        drag.prev_combine_group = Some(target.clone());
        self.bring_to_front(&target);
        self.set_tab_indicator(Some(TabIndicator {
            group_id: target,
            tab_idx: drag.idx,
        }));
    }

    fn tab_over_nothing(
        &mut self,
        drag: &mut TabDrag,
        pointer: Pos2,
        container_size: Vec2,
        origin_size: Vec2,
    ) {
        self.set_tab_indicator(None);
        let preview = divided_indicator(
            container_size,
            pointer,
            origin_size,
            self.options.edge_snap_band,
        );
        self.set_group_indicator(Some(preview));

        if let Some(combine) = drag.combine_group.take() {
            if let Some(strip) = drag.strips.get_mut(&combine) {
                strip.leave(drag.idx);
            }
            drag.prev_combine_group = None;
            drag.is_combine = false;
            drag.is_divided = true;
        }

        if !drag.is_divided {
            if let Some(strip) = drag.strips.get_mut(&drag.origin) {
                strip.leave(drag.idx);
            }
            drag.is_divided = true;
        }
    }
}
