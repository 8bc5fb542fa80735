use egui::{Pos2, Rect, Vec2};

use crate::indicator::GroupIndicator;

use super::types::ResizeDirection;

/// Legal range for an element's top-left corner so that it stays inside the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryPositions {
    pub min_top: f32,
    pub max_top: f32,
    pub min_left: f32,
    pub max_left: f32,
}

impl BoundaryPositions {
    /// Clamp a top-left corner into the boundary box.
    pub fn clamp_pos(&self, pos: Pos2) -> Pos2 {
        Pos2::new(
            clamp(pos.x, self.min_left, self.max_left),
            clamp(pos.y, self.min_top, self.max_top),
        )
    }
}

/// Recompute on every pointer move: the element size may itself be changing.
pub fn boundary_positions(container_size: Vec2, element_size: Vec2) -> BoundaryPositions {
    BoundaryPositions {
        min_top: 0.0,
        max_top: container_size.y - element_size.y,
        min_left: 0.0,
        max_left: container_size.x - element_size.x,
    }
}

/// Clamp with explicit comparisons. Unlike [`f32::clamp`] this never panics: if `max < min`
/// (an element larger than its container) the result is `max`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    let mut value = value;
    if value <= min {
        value = min;
    }
    if value >= max {
        value = max;
    }
    value
}

/// Are `a` and `b` within `dist` of each other along one axis?
///
/// `*_start` is the near edge, `*_len` the extent.
fn adjacent_on_axis(a_start: f32, a_len: f32, b_start: f32, b_len: f32, dist: f32) -> bool {
    (b_start >= a_start && b_start - (a_start + a_len) <= dist)
        || (b_start <= a_start && a_start - (b_start + b_len) <= dist)
}

/// `element` counts as over `target` when the gap between them is at most `dist` on both axes.
pub fn is_adjacent(element: Rect, target: Rect, dist: f32) -> bool {
    adjacent_on_axis(
        element.left(),
        element.width(),
        target.left(),
        target.width(),
        dist,
    ) && adjacent_on_axis(
        element.top(),
        element.height(),
        target.top(),
        target.height(),
        dist,
    )
}

/// Half-container drop zone for a pointer at or beyond a container edge (within `band`).
///
/// `pointer` is container-local. Top and bottom take priority over left and right.
pub fn edge_snap_indicator(container_size: Vec2, pointer: Pos2, band: f32) -> Option<GroupIndicator> {
    let Vec2 { x: w, y: h } = container_size;
    let band = band.max(0.0);

    let (position, size) = if pointer.y <= band {
        (Pos2::new(0.0, 0.0), Vec2::new(w, h / 2.0))
    } else if pointer.y >= h - band {
        (Pos2::new(0.0, h / 2.0), Vec2::new(w, h / 2.0))
    } else if pointer.x <= band {
        (Pos2::new(0.0, 0.0), Vec2::new(w / 2.0, h))
    } else if pointer.x >= w - band {
        (Pos2::new(w / 2.0, 0.0), Vec2::new(w / 2.0, h))
    } else {
        return None;
    };

    Some(GroupIndicator { position, size })
}

/// Drop preview for a tab pulled free of every header: an edge zone if the pointer is on an edge,
/// otherwise a rect the size of the group it came from, at the pointer, kept inside the container.
pub fn divided_indicator(
    container_size: Vec2,
    pointer: Pos2,
    origin_size: Vec2,
    band: f32,
) -> GroupIndicator {
    if let Some(edge) = edge_snap_indicator(container_size, pointer, band) {
        return edge;
    }

    let boundary = boundary_positions(container_size, origin_size);
    GroupIndicator {
        position: boundary.clamp_pos(pointer),
        size: origin_size,
    }
}

/// The header strip along the top of a group.
pub fn header_rect(group_rect: Rect, tab_height: f32) -> Rect {
    Rect::from_min_size(
        group_rect.min,
        Vec2::new(group_rect.width(), tab_height.min(group_rect.height())),
    )
}

/// Undisplaced rect of the tab in slot `slot` of a header.
pub fn tab_slot_rect(header: Rect, slot: usize, tab_size: Vec2) -> Rect {
    Rect::from_min_size(
        header.min + Vec2::new(slot as f32 * tab_size.x, 0.0),
        tab_size,
    )
}

/// Slot under the center of a tab whose left edge is `left_in_strip` (relative to the strip start).
///
/// Negative positions yield slot 0; the caller clamps the upper end.
pub fn slot_under(left_in_strip: f32, tab_width: f32) -> usize {
    let slot = ((left_in_strip + tab_width / 2.0) / tab_width).floor();
    if slot <= 0.0 { 0 } else { slot as usize }
}

/// Rect of one resize handle. Edge handles leave the corners to the corner handles.
pub fn resize_handle_rect(group_rect: Rect, direction: ResizeDirection, thickness: f32) -> Rect {
    let t = thickness.max(0.0);
    let Rect { min, max } = group_rect;
    let (x0, x1, y0, y1) = match direction {
        ResizeDirection::Top => (min.x + t, max.x - t, min.y, min.y + t),
        ResizeDirection::Bottom => (min.x + t, max.x - t, max.y - t, max.y),
        ResizeDirection::Left => (min.x, min.x + t, min.y + t, max.y - t),
        ResizeDirection::Right => (max.x - t, max.x, min.y + t, max.y - t),
        ResizeDirection::TopLeft => (min.x, min.x + t, min.y, min.y + t),
        ResizeDirection::TopRight => (max.x - t, max.x, min.y, min.y + t),
        ResizeDirection::BottomLeft => (min.x, min.x + t, max.y - t, max.y),
        ResizeDirection::BottomRight => (max.x - t, max.x, max.y - t, max.y),
    };
    Rect::from_min_max(Pos2::new(x0, y0), Pos2::new(x1, y1))
}

/// The handle under `pointer`, corners first.
pub fn resize_handle_at(group_rect: Rect, pointer: Pos2, thickness: f32) -> Option<ResizeDirection> {
    const CORNERS_FIRST: [ResizeDirection; 8] = [
        ResizeDirection::TopLeft,
        ResizeDirection::TopRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::BottomRight,
        ResizeDirection::Top,
        ResizeDirection::Bottom,
        ResizeDirection::Left,
        ResizeDirection::Right,
    ];

    if thickness <= 0.0 {
        return None;
    }
    CORNERS_FIRST
        .into_iter()
        .find(|&dir| resize_handle_rect(group_rect, dir, thickness).contains(pointer))
}

#[cfg(test)]
mod tests {
    use egui::{pos2, vec2};

    use super::*;

    #[test]
    fn boundary_is_container_minus_element() {
        let b = boundary_positions(vec2(1000.0, 800.0), vec2(300.0, 200.0));
        assert_eq!(
            b,
            BoundaryPositions {
                min_top: 0.0,
                max_top: 600.0,
                min_left: 0.0,
                max_left: 700.0,
            }
        );
        assert_eq!(b.clamp_pos(pos2(-5.0, 900.0)), pos2(0.0, 600.0));
    }

    #[test]
    fn clamp_prefers_max_when_bounds_cross() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 0.0, -20.0), -20.0);
    }

    #[test]
    fn adjacency_threshold_is_inclusive() {
        let header = Rect::from_min_size(pos2(100.0, 100.0), vec2(300.0, 30.0));

        // Tab left of the header with a 10pt gap.
        let tab = Rect::from_min_size(pos2(10.0, 100.0), vec2(80.0, 30.0));
        assert!(is_adjacent(tab, header, 10.0));

        // 11pt gap.
        let tab = Rect::from_min_size(pos2(9.0, 100.0), vec2(80.0, 30.0));
        assert!(!is_adjacent(tab, header, 10.0));

        // Below the header: gap measured from the header's bottom edge.
        let tab = Rect::from_min_size(pos2(150.0, 140.0), vec2(80.0, 30.0));
        assert!(is_adjacent(tab, header, 10.0));
        let tab = Rect::from_min_size(pos2(150.0, 141.0), vec2(80.0, 30.0));
        assert!(!is_adjacent(tab, header, 10.0));
    }

    #[test]
    fn edge_zones_snap_to_half_container() {
        let size = vec2(1000.0, 800.0);
        let top = edge_snap_indicator(size, pos2(500.0, -3.0), 0.0).expect("top");
        assert_eq!((top.position, top.size), (pos2(0.0, 0.0), vec2(1000.0, 400.0)));

        let bottom = edge_snap_indicator(size, pos2(500.0, 800.0), 0.0).expect("bottom");
        assert_eq!(bottom.position, pos2(0.0, 400.0));

        let left = edge_snap_indicator(size, pos2(0.0, 300.0), 0.0).expect("left");
        assert_eq!(left.size, vec2(500.0, 800.0));

        let right = edge_snap_indicator(size, pos2(1200.0, 300.0), 0.0).expect("right");
        assert_eq!(right.position, pos2(500.0, 0.0));

        assert!(edge_snap_indicator(size, pos2(500.0, 300.0), 0.0).is_none());
        assert!(edge_snap_indicator(size, pos2(20.0, 300.0), 32.0).is_some());
    }

    #[test]
    fn divided_preview_keeps_origin_size_inside_container() {
        let ind = divided_indicator(vec2(1000.0, 800.0), pos2(900.0, 700.0), vec2(300.0, 300.0), 0.0);
        assert_eq!(ind.position, pos2(700.0, 500.0));
        assert_eq!(ind.size, vec2(300.0, 300.0));
    }

    #[test]
    fn slot_under_rounds_at_tab_center() {
        assert_eq!(slot_under(-200.0, 80.0), 0);
        assert_eq!(slot_under(39.0, 80.0), 0);
        assert_eq!(slot_under(40.0, 80.0), 1);
        assert_eq!(slot_under(170.0, 80.0), 2);
    }

    #[test]
    fn corner_handles_win_over_edges() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 300.0));
        assert_eq!(resize_handle_at(rect, pos2(2.0, 2.0), 10.0), Some(ResizeDirection::TopLeft));
        assert_eq!(resize_handle_at(rect, pos2(150.0, 2.0), 10.0), Some(ResizeDirection::Top));
        assert_eq!(resize_handle_at(rect, pos2(298.0, 150.0), 10.0), Some(ResizeDirection::Right));
        assert_eq!(resize_handle_at(rect, pos2(150.0, 150.0), 10.0), None);
    }

    #[test]
    fn every_handle_is_found_at_its_own_center() {
        let rect = Rect::from_min_size(pos2(100.0, 50.0), vec2(300.0, 200.0));
        for dir in ResizeDirection::ALL {
            let handle = resize_handle_rect(rect, dir, 8.0);
            assert!(rect.contains_rect(handle), "{dir:?} handle leaves the group");
            assert_eq!(resize_handle_at(rect, handle.center(), 8.0), Some(dir));
        }
    }
}
