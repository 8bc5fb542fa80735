/// Numbers gestures and produces the log lines for their lifecycle.
#[derive(Debug, Default)]
pub(super) struct GestureSession {
    next_id: u64,
    active: Option<ActiveSession>,
}

#[derive(Debug)]
struct ActiveSession {
    id: u64,
    kind: &'static str,
    moves: u64,
}

impl GestureSession {
    pub(super) fn start(&mut self, kind: &'static str, target: &str) -> String {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        self.active = Some(ActiveSession { id, kind, moves: 0 });
        format!("gesture START id={id} kind={kind} target={target}")
    }

    pub(super) fn observe_move(&mut self) {
        if let Some(active) = &mut self.active {
            active.moves = active.moves.saturating_add(1);
        }
    }

    /// `outcome` is the committed action (or "no-op").
    pub(super) fn finish(&mut self, verb: &'static str, outcome: &str) -> String {
        match self.active.take() {
            Some(ended) => format!(
                "gesture {verb} id={} kind={} moves={} outcome={outcome}",
                ended.id, ended.kind, ended.moves
            ),
            None => format!("gesture {verb} (no active session) outcome={outcome}"),
        }
    }
}
