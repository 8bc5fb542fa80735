//! Tab-strip reflow while a tab is dragged across it.
//!
//! Every tab other than the dragged one keeps its committed slot (`base`) and is displaced by at
//! most one slot ([`TranslateStatus`]) to make room. `idx` is where the tab would land if the
//! gesture were released now.

use egui::{Rect, Vec2};
use itertools::Itertools as _;

use crate::board::TabId;

use super::geometry::tab_slot_rect;
use super::types::TranslateStatus;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TabSlot {
    pub(crate) tab_id: TabId,
    pub(crate) base: usize,
    pub(crate) idx: usize,
    pub(crate) translate: TranslateStatus,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TabStrip {
    slots: Vec<TabSlot>,
}

impl TabStrip {
    /// Strip in committed order, leaving out the dragged tab (if it is one of `tab_ids`).
    pub(crate) fn new(tab_ids: &[TabId], dragged: &TabId) -> Self {
        let slots = tab_ids
            .iter()
            .enumerate()
            .filter(|(_, id)| *id != dragged)
            .map(|(base, id)| TabSlot {
                tab_id: id.clone(),
                base,
                idx: base,
                translate: TranslateStatus::Default,
            })
            .collect();
        Self { slots }
    }

    pub(crate) fn slot(&self, tab_id: &TabId) -> Option<&TabSlot> {
        self.slots.iter().find(|slot| &slot.tab_id == tab_id)
    }

    /// Current on-screen rect of a tab, displacement included.
    pub(crate) fn slot_rect(slot: &TabSlot, header: Rect, tab_size: Vec2) -> Rect {
        tab_slot_rect(header, slot.base, tab_size)
            .translate(Vec2::new(slot.translate.offset(tab_size.x), 0.0))
    }

    /// The dragged tab moves from slot `from` to slot `to`: every tab in between steps one slot
    /// towards `from`.
    pub(crate) fn reorder(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        if from > to {
            for i in (to..from).rev() {
                if let Some(slot) = self.slots.iter_mut().find(|slot| slot.idx == i) {
                    slot.idx = i + 1;
                    slot.translate = slot.translate.shifted_right();
                }
            }
        } else {
            for i in (from + 1)..=to {
                if let Some(slot) = self.slots.iter_mut().find(|slot| slot.idx == i) {
                    slot.idx = i - 1;
                    slot.translate = slot.translate.shifted_left();
                }
            }
        }
    }

    /// The dragged tab, sitting in slot `leaving_idx`, leaves this strip: everything after it
    /// closes the gap.
    pub(crate) fn leave(&mut self, leaving_idx: usize) {
        for slot in &mut self.slots {
            if slot.idx > leaving_idx {
                slot.idx -= 1;
                slot.translate = slot.translate.shifted_left();
            }
        }
    }

    /// The dragged tab (right edge at `dragged_right`) enters this strip. Tabs whose right edge is
    /// further right make room; returns the slot the dragged tab takes.
    pub(crate) fn join(&mut self, dragged_right: f32, header: Rect, tab_size: Vec2) -> usize {
        let mut new_idx = 0;
        for slot in &mut self.slots {
            let right = Self::slot_rect(slot, header, tab_size).right();
            if right > dragged_right {
                slot.idx += 1;
                slot.translate = slot.translate.shifted_right();
            } else {
                new_idx += 1;
            }
        }
        new_idx
    }

    /// Final order with the dragged tab placed at `dragged_idx`.
    pub(crate) fn ordered_with(&self, dragged: &TabId, dragged_idx: usize) -> Vec<TabId> {
        self.slots
            .iter()
            .map(|slot| (slot.idx, slot.base, &slot.tab_id))
            .chain(std::iter::once((dragged_idx, usize::MAX, dragged)))
            .sorted_by_key(|&(idx, base, _)| (idx, base))
            .map(|(_, _, id)| id.clone())
            .collect()
    }
}
