use crate::engine::Snapshot;

/// Which buttons are disabled for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub start_disabled: bool,
    pub pause_disabled: bool,
    pub lap_disabled: bool,
    pub export_disabled: bool,
}

impl ControlState {
    pub fn derive(snapshot: Snapshot, ledger_empty: bool) -> Self {
        Self {
            start_disabled: snapshot.running,
            pause_disabled: !snapshot.running,
            lap_disabled: !snapshot.running && snapshot.elapsed == 0.0,
            export_disabled: ledger_empty,
        }
    }
}
