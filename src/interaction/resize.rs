use egui::{Pos2, Rect, Vec2};

use super::BoardInteraction;
use super::types::{ResizeDirection, ResizeDrag};

impl BoardInteraction {
    pub(super) fn move_resize(
        &mut self,
        mut drag: ResizeDrag,
        pointer: Pos2,
        container_size: Vec2,
    ) -> ResizeDrag {
        let Some(rect) = self.live.get_mut(&drag.group_id) else {
            return drag;
        };
        let step = resize_step(
            *rect,
            drag.direction,
            drag.anchor,
            pointer,
            container_size,
            self.options.group_min_size,
        );
        *rect = step.rect();
        drag.anchor = step.anchor;
        drag
    }
}

/// Live geometry of a group being resized, container-local.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ResizeStep {
    pub(crate) top: f32,
    pub(crate) left: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    /// Where the next pointer delta is measured from.
    pub(crate) anchor: Pos2,
}

impl ResizeStep {
    pub(crate) fn rect(&self) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.left, self.top),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Apply one pointer move to a resize.
///
/// The delta is taken against `anchor`, and the returned anchor is re-pinned to whatever edge
/// actually moved, so a pointer that overshoots a limit has to come back before the edge follows
/// again.
pub(crate) fn resize_step(
    rect: Rect,
    direction: ResizeDirection,
    anchor: Pos2,
    pointer: Pos2,
    container_size: Vec2,
    min_size: Vec2,
) -> ResizeStep {
    let delta = pointer - anchor;

    // Read once: every direction works off the geometry from before this move.
    let (top, left, width, height) = (rect.top(), rect.left(), rect.width(), rect.height());
    let mut step = ResizeStep {
        top,
        left,
        width,
        height,
        anchor,
    };

    if direction.moves_top() {
        if height - delta.y < min_size.y {
            step.top = top + (height - min_size.y);
            step.height = min_size.y;
            step.anchor.y = top + height - min_size.y;
        } else if top + delta.y <= 0.0 {
            step.top = 0.0;
            step.height = height + top;
            step.anchor.y = 0.0;
        } else {
            step.top = top + delta.y;
            step.height = height - delta.y;
            step.anchor.y = pointer.y;
        }
    } else if direction.moves_bottom() {
        if height + delta.y < min_size.y {
            step.height = min_size.y;
            step.anchor.y = top + min_size.y;
        } else if height + delta.y >= container_size.y - top {
            step.height = container_size.y - top;
            step.anchor.y = container_size.y;
        } else {
            step.height = height + delta.y;
            step.anchor.y = pointer.y;
        }
    }

    if direction.moves_left() {
        if width - delta.x < min_size.x {
            step.left = left + (width - min_size.x);
            step.width = min_size.x;
            step.anchor.x = left + width - min_size.x;
        } else if left + delta.x <= 0.0 {
            step.left = 0.0;
            step.width = width + left;
            step.anchor.x = 0.0;
        } else {
            step.left = left + delta.x;
            step.width = width - delta.x;
            step.anchor.x = pointer.x;
        }
    } else if direction.moves_right() {
        if width + delta.x < min_size.x {
            step.width = min_size.x;
            step.anchor.x = left + min_size.x;
        } else if width + delta.x >= container_size.x - left {
            step.width = container_size.x - left;
            step.anchor.x = container_size.x;
        } else {
            step.width = width + delta.x;
            step.anchor.x = pointer.x;
        }
    }

    step
}
