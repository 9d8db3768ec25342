//! Hold slot with a once-per-spawn lock

use tetris_duel_types::PieceKind;

/// Result of a hold request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Hold was already used for this spawn; nothing changed
    Rejected,
    /// The piece was stored; carries the previously held kind, if any
    Accepted(Option<PieceKind>),
}

#[derive(Debug, Clone, Default)]
pub struct HoldManager {
    held: Option<PieceKind>,
    used_this_spawn: bool,
}

impl HoldManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `current` and hand back what was held before
    ///
    /// `Accepted(None)` means the caller must spawn a fresh piece;
    /// `Accepted(Some(kind))` means `kind` comes back into play.
    pub fn hold(&mut self, current: PieceKind) -> HoldOutcome {
        if self.used_this_spawn {
            return HoldOutcome::Rejected;
        }
        self.used_this_spawn = true;
        HoldOutcome::Accepted(self.held.replace(current))
    }

    /// Re-enable holding; called on every generator spawn
    pub fn reset_lock(&mut self) {
        self.used_this_spawn = false;
    }

    pub fn can_hold(&self) -> bool {
        !self.used_this_spawn
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    /// Empty slot and open lock, for a new game
    pub fn reset(&mut self) {
        self.held = None;
        self.used_this_spawn = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_hold_stores_and_returns_nothing() {
        let mut hold = HoldManager::new();
        assert_eq!(hold.hold(PieceKind::T), HoldOutcome::Accepted(None));
        assert_eq!(hold.held(), Some(PieceKind::T));
        assert!(!hold.can_hold());
    }

    #[test]
    fn second_hold_before_reset_is_rejected() {
        let mut hold = HoldManager::new();
        hold.hold(PieceKind::T);
        assert_eq!(hold.hold(PieceKind::I), HoldOutcome::Rejected);
        assert_eq!(hold.held(), Some(PieceKind::T));
    }

    #[test]
    fn hold_after_reset_swaps() {
        let mut hold = HoldManager::new();
        hold.hold(PieceKind::T);
        hold.reset_lock();
        assert_eq!(
            hold.hold(PieceKind::I),
            HoldOutcome::Accepted(Some(PieceKind::T))
        );
        assert_eq!(hold.held(), Some(PieceKind::I));
    }

    #[test]
    fn reset_clears_everything() {
        let mut hold = HoldManager::new();
        hold.hold(PieceKind::O);
        hold.reset();
        assert_eq!(hold.held(), None);
        assert!(hold.can_hold());
    }
}
