use egui::Vec2;

/// Size of one tab in a group header strip.
pub const TAB_SIZE: Vec2 = Vec2::new(80.0, 30.0);

/// Smallest size a group can be resized to.
pub const GROUP_MIN_SIZE: Vec2 = Vec2::new(300.0, 300.0);

/// Gap (in points) under which a dragged tab still counts as being over a group header.
pub const ADJACENCY_THRESHOLD: f32 = 10.0;

/// Options for [`super::BoardInteraction`].
#[derive(Clone, Debug)]
pub struct BoardOptions {
    /// Size of every tab. Also the height of a group header.
    pub tab_size: Vec2,

    /// Resizing never shrinks a group below this.
    pub group_min_size: Vec2,

    /// Maximum gap between a dragged tab and a group header (on both axes) for the tab to count as
    /// hovering that header.
    ///
    /// A gap of exactly this many points still counts.
    pub adjacency_threshold: f32,

    /// Thickness of the resize handles along the group edges, and the size of the corner handles.
    pub resize_handle_thickness: f32,

    /// Width of the band along the container edges that snaps a drop to half the container.
    ///
    /// With `0.0` the pointer has to reach (or leave through) the container edge.
    pub edge_snap_band: f32,

    /// If true, record gesture and commit events in a small ring buffer
    /// (see [`super::BoardInteraction::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, check board integrity after every commit and log any issue.
    pub debug_integrity: bool,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            tab_size: TAB_SIZE,
            group_min_size: GROUP_MIN_SIZE,
            adjacency_threshold: ADJACENCY_THRESHOLD,
            resize_handle_thickness: 10.0,
            edge_snap_band: 0.0,
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: false,
        }
    }
}

impl BoardOptions {
    /// Tab width, guarded against a zero or negative configuration.
    pub(crate) fn tab_width(&self) -> f32 {
        self.tab_size.x.max(1.0)
    }
}
