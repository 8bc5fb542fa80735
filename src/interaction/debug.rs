use itertools::Itertools as _;

use crate::board::Board;
use crate::integrity;

use super::BoardInteraction;

/// One line per group, in id order: `id @ (x, y) w×h [tabs] selected=...`.
pub(super) fn debug_board_summary(board: &Board) -> String {
    board
        .groups()
        .map(|group| {
            format!(
                "{} @ ({:.0}, {:.0}) {:.0}x{:.0} [{}] selected={}{}",
                group.id,
                group.position.x,
                group.position.y,
                group.size.x,
                group.size.y,
                group.tab_ids.iter().join(", "),
                group.selected_tab_id,
                if group.is_full_screen { " fullscreen" } else { "" }
            )
        })
        .join("\n")
}

impl BoardInteraction {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        self.push_debug_log_line(message);
    }

    fn push_debug_log_line(&mut self, message: String) {
        if !self.options.debug_event_log {
            return;
        }
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(message);
    }

    /// The recorded debug events, oldest first (empty unless `debug_event_log` is enabled).
    pub fn debug_log_text(&self) -> String {
        self.debug_log.iter().join("\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// Human-readable dump of the committed board.
    pub fn debug_board_text(&self) -> String {
        debug_board_summary(&self.board)
    }

    pub(super) fn debug_check_integrity(&mut self, container_size: Option<egui::Vec2>) {
        if !self.options.debug_integrity {
            return;
        }
        let mut issues = integrity::board_integrity_issues(&self.board);
        if let Some(size) = container_size {
            issues.extend(integrity::bounds_issues(&self.board, size));
        }
        for issue in issues {
            log::warn!("{issue}");
            self.push_debug_log_line(issue);
        }
    }
}
