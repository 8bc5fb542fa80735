use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use egui::{Pos2, Rect, Vec2};

use crate::board::{Board, Group, GroupId, TabId};
use crate::indicator::{
    GroupIndicator, Indicator, IndicatorAction, TabIndicator, reduce_indicator,
};
use crate::reducer::{BoardAction, reduce_board};

mod classify;
mod debug;
mod geometry;
mod group_move;
mod options;
mod release;
mod resize;
mod session;
mod strip;
mod tab_move;
mod types;


pub use classify::{TabMoveClass, classify_tab_move};
pub use geometry::{
    BoundaryPositions, boundary_positions, clamp, divided_indicator, edge_snap_indicator,
    header_rect, is_adjacent, resize_handle_at, resize_handle_rect, slot_under, tab_slot_rect,
};
pub use options::{ADJACENCY_THRESHOLD, BoardOptions, GROUP_MIN_SIZE, TAB_SIZE};
pub use types::{HitTarget, ResizeDirection, TabMoveStatus, TranslateStatus};

use session::GestureSession;
use strip::TabStrip;
use types::{ActiveGesture, GroupDrag, ResizeDrag, TabDrag};

type BoardListener = Box<dyn FnMut(&BoardAction)>;
type IndicatorListener = Box<dyn FnMut(&IndicatorAction)>;

/// The interaction engine: turns a stream of pointer events into live geometry, drop indicators,
/// and (on release) at most one [`BoardAction`] per gesture.
///
/// All geometry handed out and stored is container-local. Every entry point takes the container
/// rect (in the same coordinate space as the pointer), queried fresh by the host each time, so the
/// container may be resized or moved between events.
///
/// Typical host loop:
/// - pointer pressed: [`Self::hit_test`] (or your own hit testing), then [`Self::on_pointer_down`]
/// - pointer moved: [`Self::on_pointer_move`]
/// - pointer released: [`Self::on_pointer_release`]
/// - header double-clicked: [`Self::on_header_double_click`]
/// - render from [`Self::groups_back_to_front`], [`Self::group_rect`], [`Self::tab_rect`] and
///   [`Self::indicator`].
pub struct BoardInteraction {
    pub options: BoardOptions,

    board: Board,
    indicator: Indicator,

    /// Live rect of every group. Equal to the board's geometry except for the group a resize or
    /// move gesture is working on.
    live: BTreeMap<GroupId, Rect>,

    /// Back to front.
    z_order: Vec<GroupId>,

    gesture: Option<ActiveGesture>,
    session: GestureSession,

    board_listeners: Vec<BoardListener>,
    indicator_listeners: Vec<IndicatorListener>,

    debug_log: VecDeque<String>,
}

impl fmt::Debug for BoardInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardInteraction")
            .field("options", &self.options)
            .field("board", &self.board)
            .field("indicator", &self.indicator)
            .field("z_order", &self.z_order)
            .field("gesture", &self.gesture.as_ref().map(ActiveGesture::kind))
            .finish_non_exhaustive()
    }
}

impl BoardInteraction {
    pub fn new(board: Board) -> Self {
        Self::new_with_options(board, BoardOptions::default())
    }

    pub fn new_with_options(board: Board, options: BoardOptions) -> Self {
        let mut this = Self {
            options,
            board,
            indicator: Indicator::default(),
            live: BTreeMap::new(),
            z_order: Vec::new(),
            gesture: None,
            session: GestureSession::default(),
            board_listeners: Vec::new(),
            indicator_listeners: Vec::new(),
            debug_log: VecDeque::new(),
        };
        this.sync_live_from_board();
        this
    }

    /// The committed layout.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current drag highlight. Empty whenever no gesture is in flight.
    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    /// Called with every board action that changed the board, after it was applied.
    pub fn subscribe_board(&mut self, listener: impl FnMut(&BoardAction) + 'static) {
        self.board_listeners.push(Box::new(listener));
    }

    /// Called with every indicator action that changed the indicator, after it was applied.
    pub fn subscribe_indicator(&mut self, listener: impl FnMut(&IndicatorAction) + 'static) {
        self.indicator_listeners.push(Box::new(listener));
    }

    /// Apply a host-originated board action. Returns whether the board changed.
    pub fn dispatch(&mut self, action: BoardAction) -> bool {
        self.commit(action, None).is_some()
    }

    /// Is a gesture (resize, tab move or group move) in flight?
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Sub-state of an in-flight tab drag.
    pub fn tab_move_status(&self) -> Option<TabMoveStatus> {
        match &self.gesture {
            Some(ActiveGesture::TabMove(drag)) => Some(drag.status),
            _ => None,
        }
    }

    /// The tab being dragged and its free-floating rect.
    pub fn dragged_tab(&self) -> Option<(&TabId, Rect)> {
        match &self.gesture {
            Some(ActiveGesture::TabMove(drag)) => Some((&drag.tab_id, drag.rect)),
            _ => None,
        }
    }

    /// Groups in paint order (back to front).
    pub fn groups_back_to_front(&self) -> impl Iterator<Item = &Group> + '_ {
        self.z_order.iter().filter_map(|id| self.board.group(id))
    }

    /// Live rect of a group (may differ from the board while it is resized or moved).
    pub fn group_rect(&self, group_id: &GroupId) -> Option<Rect> {
        self.live.get(group_id).copied()
    }

    pub fn header_rect(&self, group_id: &GroupId) -> Option<Rect> {
        let rect = self.group_rect(group_id)?;
        Some(geometry::header_rect(rect, self.options.tab_size.y))
    }

    /// Live rect of a tab in `group_id`'s header, including the reflow displacement of an
    /// in-flight tab drag. The dragged tab itself reports its free-floating rect.
    pub fn tab_rect(&self, group_id: &GroupId, tab_id: &TabId) -> Option<Rect> {
        let header = self.header_rect(group_id)?;
        let tab_size = self.options.tab_size;

        if let Some(ActiveGesture::TabMove(drag)) = &self.gesture {
            if &drag.tab_id == tab_id && &drag.origin == group_id {
                return Some(drag.rect);
            }
            if let Some(slot) = drag.strips.get(group_id).and_then(|s| s.slot(tab_id)) {
                return Some(TabStrip::slot_rect(slot, header, tab_size));
            }
        }

        let base = self.board.group(group_id)?.tab_index(tab_id)?;
        Some(geometry::tab_slot_rect(header, base, tab_size))
    }

    /// What is under `pointer`: topmost group first, then resize corners, resize edges, tabs,
    /// header, body.
    pub fn hit_test(&self, container: Rect, pointer: Pos2) -> Option<HitTarget> {
        let local = to_local(container, pointer);

        for group_id in self.z_order.iter().rev() {
            let Some(rect) = self.live.get(group_id).copied() else {
                continue;
            };
            if !rect.contains(local) {
                continue;
            }

            if let Some(direction) =
                geometry::resize_handle_at(rect, local, self.options.resize_handle_thickness)
            {
                return Some(HitTarget::ResizeHandle {
                    group_id: group_id.clone(),
                    direction,
                });
            }

            let header = geometry::header_rect(rect, self.options.tab_size.y);
            if !header.contains(local) {
                return Some(HitTarget::GroupBody {
                    group_id: group_id.clone(),
                });
            }

            let tab_hit = self.board.group(group_id).and_then(|group| {
                group.tab_ids.iter().find(|tab_id| {
                    self.tab_rect(group_id, tab_id)
                        .is_some_and(|r| r.contains(local))
                })
            });
            return Some(match tab_hit {
                Some(tab_id) => HitTarget::Tab {
                    group_id: group_id.clone(),
                    tab_id: tab_id.clone(),
                },
                None => HitTarget::GroupHeader {
                    group_id: group_id.clone(),
                },
            });
        }

        None
    }

    /// Arm a gesture for whatever was pressed. Ignored while another gesture is in flight.
    ///
    /// Pressing a tab also selects it; pressing anywhere on a group brings it to front.
    pub fn on_pointer_down(&mut self, container: Rect, pointer: Pos2, target: HitTarget) {
        if let Some(active) = &self.gesture {
            log::trace!(
                "pointer down on {target:?} ignored: {} gesture in flight",
                active.kind()
            );
            return;
        }

        let Some(group_rect) = self.live.get(target.group_id()).copied() else {
            log::debug!("pointer down on missing group {}", target.group_id());
            return;
        };
        let local = to_local(container, pointer);
        self.bring_to_front(target.group_id());

        let (gesture, label) = match target {
            HitTarget::ResizeHandle {
                group_id,
                direction,
            } => {
                let label = format!("{group_id}/{direction:?}");
                let drag = ResizeDrag {
                    group_id,
                    direction,
                    anchor: local,
                };
                (ActiveGesture::Resize(drag), label)
            }

            HitTarget::Tab { group_id, tab_id } => {
                let Some(group) = self.board.group(&group_id) else {
                    return;
                };
                let Some(base) = group.tab_index(&tab_id) else {
                    log::debug!("pointer down on tab {tab_id} which {group_id} does not hold");
                    return;
                };

                let tab_size = self.options.tab_size;
                let header = geometry::header_rect(group_rect, tab_size.y);
                let mut strips = BTreeMap::new();
                strips.insert(group_id.clone(), TabStrip::new(&group.tab_ids, &tab_id));

                self.commit(
                    BoardAction::SelectTab {
                        group_id: group_id.clone(),
                        tab_id: tab_id.clone(),
                    },
                    Some(container.size()),
                );

                let label = format!("{group_id}/{tab_id}");
                let drag = TabDrag {
                    tab_id,
                    origin: group_id,
                    rect: geometry::tab_slot_rect(header, base, tab_size),
                    last_pointer: local,
                    status: TabMoveStatus::Default,
                    idx: base,
                    is_divided: false,
                    is_combine: false,
                    combine_group: None,
                    prev_combine_group: None,
                    strips,
                };
                (ActiveGesture::TabMove(drag), label)
            }

            HitTarget::GroupHeader { group_id } => {
                let label = group_id.to_string();
                let drag = GroupDrag {
                    group_id,
                    grab_offset: local - group_rect.min,
                    anchor: local,
                };
                (ActiveGesture::GroupMove(drag), label)
            }

            HitTarget::GroupBody { .. } => return,
        };

        let line = self.session.start(gesture.kind(), &label);
        self.debug_log_event(line);
        self.gesture = Some(gesture);
    }

    /// Feed one pointer move to the gesture in flight (if any).
    ///
    /// Only live geometry and the indicator change; nothing is committed to the board.
    pub fn on_pointer_move(&mut self, container: Rect, pointer: Pos2) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        self.session.observe_move();

        let local = to_local(container, pointer);
        let container_size = container.size();
        let gesture = match gesture {
            ActiveGesture::Resize(drag) => {
                ActiveGesture::Resize(self.move_resize(drag, local, container_size))
            }
            ActiveGesture::TabMove(drag) => {
                ActiveGesture::TabMove(self.move_tab(drag, local, container_size))
            }
            ActiveGesture::GroupMove(drag) => {
                ActiveGesture::GroupMove(self.move_group(drag, local, container_size))
            }
        };
        self.gesture = Some(gesture);
    }

    /// Toggle full-screen for a group. A gesture in flight is cancelled first.
    pub fn on_header_double_click(
        &mut self,
        container: Rect,
        group_id: &GroupId,
    ) -> Option<BoardAction> {
        self.cancel_gesture();
        self.commit(
            BoardAction::UpdateGroupFullScreen {
                group_id: group_id.clone(),
                container_size: container.size(),
            },
            Some(container.size()),
        )
    }

    /// Abandon the gesture in flight without committing: live geometry snaps back to the board
    /// and the indicator is cleared. Returns `false` if nothing was in flight.
    pub fn cancel_gesture(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        self.dispatch_indicator(IndicatorAction::Reset);
        self.sync_live_from_board();
        let line = self.session.finish("CANCEL", gesture.kind());
        self.debug_log_event(line);
        true
    }

    /// Apply `action` to the board, and broadcast it if it changed anything.
    fn commit(&mut self, action: BoardAction, container_size: Option<Vec2>) -> Option<BoardAction> {
        let next = reduce_board(self.board.clone(), &action);
        if next == self.board {
            log::trace!("commit skipped, no change: {action:?}");
            return None;
        }

        self.board = next;
        self.sync_live_from_board();
        for listener in &mut self.board_listeners {
            listener(&action);
        }
        self.debug_log_event(format!("commit {action:?}"));
        self.debug_check_integrity(container_size);
        Some(action)
    }

    fn dispatch_indicator(&mut self, action: IndicatorAction) {
        let next = reduce_indicator(self.indicator.clone(), &action);
        if next == self.indicator {
            return;
        }
        self.indicator = next;
        for listener in &mut self.indicator_listeners {
            listener(&action);
        }
    }

    fn set_tab_indicator(&mut self, tab: Option<TabIndicator>) {
        self.dispatch_indicator(IndicatorAction::SetTabIndicator(tab));
    }

    fn set_group_indicator(&mut self, group: Option<GroupIndicator>) {
        self.dispatch_indicator(IndicatorAction::SetGroupIndicator(group));
    }

    /// Rebuild live rects and z-order from the board. The group an in-flight resize/move works on
    /// keeps its live rect.
    fn sync_live_from_board(&mut self) {
        let held = match &self.gesture {
            Some(ActiveGesture::Resize(drag)) => Some(&drag.group_id),
            Some(ActiveGesture::GroupMove(drag)) => Some(&drag.group_id),
            Some(ActiveGesture::TabMove(_)) | None => None,
        };

        let live: BTreeMap<GroupId, Rect> = self
            .board
            .groups()
            .map(|group| {
                let rect = held
                    .filter(|id| **id == group.id)
                    .and_then(|id| self.live.get(id).copied())
                    .unwrap_or_else(|| group.rect());
                (group.id.clone(), rect)
            })
            .collect();
        self.live = live;

        self.z_order.retain(|id| self.live.contains_key(id));
        for id in self.live.keys() {
            if !self.z_order.contains(id) {
                self.z_order.push(id.clone());
            }
        }
    }

    fn bring_to_front(&mut self, group_id: &GroupId) {
        if !self.live.contains_key(group_id) {
            return;
        }
        self.z_order.retain(|id| id != group_id);
        self.z_order.push(group_id.clone());
    }
}

fn to_local(container: Rect, pointer: Pos2) -> Pos2 {
    pointer - container.min.to_vec2()
}
