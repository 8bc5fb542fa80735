//! Free-floating tab groups on a bounded board, driven by pointer gestures.
//!
//! A [`Board`] is a set of rectangular [`Group`]s, each holding an ordered strip of [`Tab`]s.
//! [`BoardInteraction`] turns raw pointer events into:
//! - resizing a group from any edge or corner,
//! - moving a group by its header (with half-screen snapping at the container edges),
//! - reordering tabs, merging a tab into another group, or pulling it free into a new group,
//! - toggling a group full-screen.
//!
//! The board only ever changes through [`BoardAction`]s applied by [`reduce_board`], at most one
//! per gesture. In-flight feedback (live rects, tab reflow, the drop [`Indicator`]) lives in the
//! engine and is discarded on release.
//!
//! The crate does not paint anything: the host renders from [`BoardInteraction::groups_back_to_front`],
//! [`BoardInteraction::group_rect`], [`BoardInteraction::tab_rect`] and
//! [`BoardInteraction::indicator`], and feeds pointer events back in.
//!
//! ```
//! use egui::{Rect, pos2, vec2};
//! use egui_board::{BoardBuilder, BoardInteraction, GroupId};
//!
//! let board = BoardBuilder::new()
//!     .group(
//!         "left",
//!         Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 400.0)),
//!         [("notes", "Notes"), ("todo", "Todo")],
//!     )
//!     .build();
//!
//! let container = Rect::from_min_size(pos2(0.0, 0.0), vec2(1200.0, 800.0));
//! let mut engine = BoardInteraction::new(board);
//!
//! // Drag the group by its header.
//! let target = engine.hit_test(container, pos2(300.0, 20.0)).expect("header");
//! engine.on_pointer_down(container, pos2(300.0, 20.0), target);
//! engine.on_pointer_move(container, pos2(500.0, 120.0));
//! engine.on_pointer_release(container);
//!
//! let left = engine.board().group(&GroupId::from("left")).expect("left");
//! assert_eq!(left.position, pos2(200.0, 100.0));
//! ```

#![forbid(unsafe_code)]

mod board;
mod board_builder;
mod indicator;
mod integrity;
mod interaction;
mod reducer;

#[cfg(feature = "persistence")]
mod snapshot;

pub use board::{Board, Group, GroupId, Tab, TabId};
pub use board_builder::BoardBuilder;
pub use indicator::{GroupIndicator, Indicator, IndicatorAction, TabIndicator, reduce_indicator};
pub use integrity::{board_integrity_issues, bounds_issues};
pub use interaction::{
    ADJACENCY_THRESHOLD, BoardInteraction, BoardOptions, BoundaryPositions, GROUP_MIN_SIZE,
    HitTarget, ResizeDirection, TAB_SIZE, TabMoveClass, TabMoveStatus, TranslateStatus,
    boundary_positions, clamp, classify_tab_move, divided_indicator, edge_snap_indicator,
    header_rect, is_adjacent, resize_handle_at, resize_handle_rect, slot_under, tab_slot_rect,
};
pub use reducer::{BoardAction, reduce_board};

#[cfg(feature = "persistence")]
pub use snapshot::{BOARD_SNAPSHOT_VERSION, BoardSnapshot, SnapshotError};
