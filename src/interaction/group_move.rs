use egui::{Pos2, Rect, Vec2};

use super::BoardInteraction;
use super::geometry::{boundary_positions, edge_snap_indicator};
use super::types::GroupDrag;

impl BoardInteraction {
    /// Drag a group by its header, kept inside the container. A pointer on a container edge shows
    /// the half-container snap zone.
    pub(super) fn move_group(
        &mut self,
        mut drag: GroupDrag,
        pointer: Pos2,
        container_size: Vec2,
    ) -> GroupDrag {
        let Some(rect) = self.live.get(&drag.group_id).copied() else {
            return drag;
        };

        let delta = pointer - drag.anchor;
        let boundary = boundary_positions(container_size, rect.size());
        let min = boundary.clamp_pos(rect.min + delta);
        self.live
            .insert(drag.group_id.clone(), Rect::from_min_size(min, rect.size()));

        // Anchor at the grab point, not the pointer.
        drag.anchor = min + drag.grab_offset;

        let snap = edge_snap_indicator(container_size, pointer, self.options.edge_snap_band);
        self.set_group_indicator(snap);
        drag
    }
}
