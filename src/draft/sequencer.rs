use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Ban,
    Pick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Blue => write!(f, "blue"),
            Side::Red => write!(f, "red"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftStep {
    pub kind: StepKind,
    pub side: Side,
    pub slot: usize,
}

const fn step(kind: StepKind, side: Side, slot: usize) -> DraftStep {
    DraftStep { kind, side, slot }
}

/// Competitive draft order: two ban phases interleaved with two pick phases.
/// Constructed once, never reordered at runtime.
pub const DRAFT_ORDER: [DraftStep; 20] = [
    // Ban phase 1
    step(StepKind::Ban, Side::Blue, 0),
    step(StepKind::Ban, Side::Red, 0),
    step(StepKind::Ban, Side::Blue, 1),
    step(StepKind::Ban, Side::Red, 1),
    step(StepKind::Ban, Side::Blue, 2),
    step(StepKind::Ban, Side::Red, 2),
    // Pick phase 1: B1, R1-R2, B2-B3, R3
    step(StepKind::Pick, Side::Blue, 0),
    step(StepKind::Pick, Side::Red, 0),
    step(StepKind::Pick, Side::Red, 1),
    step(StepKind::Pick, Side::Blue, 1),
    step(StepKind::Pick, Side::Blue, 2),
    step(StepKind::Pick, Side::Red, 2),
    // Ban phase 2
    step(StepKind::Ban, Side::Red, 3),
    step(StepKind::Ban, Side::Blue, 3),
    step(StepKind::Ban, Side::Red, 4),
    step(StepKind::Ban, Side::Blue, 4),
    // Pick phase 2: R4, B4-B5, R5
    step(StepKind::Pick, Side::Red, 3),
    step(StepKind::Pick, Side::Blue, 3),
    step(StepKind::Pick, Side::Blue, 4),
    step(StepKind::Pick, Side::Red, 4),
];

/// The slot a champion-pool selection will be committed into. Either the
/// scripted slot at the cursor, or a slot the user clicked directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub kind: StepKind,
    pub side: Side,
    pub slot: usize,
}

impl From<DraftStep> for Target {
    fn from(step: DraftStep) -> Self {
        Target {
            kind: step.kind,
            side: step.side,
            slot: step.slot,
        }
    }
}

/// Integer cursor over [`DRAFT_ORDER`]: 20 active positions plus a terminal
/// one. The only transitions are +1 on a scripted commit and back to 0 on
/// reset.
pub struct Sequencer {
    cursor: usize,
    manual_target: Option<Target>,
}

impl Sequencer {
    pub fn new() -> Self {
        Sequencer {
            cursor: 0,
            manual_target: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The scripted step at the cursor, or None once the sequence is exhausted.
    pub fn current_step(&self) -> Option<DraftStep> {
        DRAFT_ORDER.get(self.cursor).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= DRAFT_ORDER.len()
    }

    /// Where the next champion-pool selection goes: the manual target if the
    /// user clicked a slot, otherwise the scripted step.
    pub fn target(&self) -> Option<Target> {
        self.manual_target
            .or_else(|| self.current_step().map(Target::from))
    }

    /// Advance past the current scripted step. No-op at terminal.
    pub fn advance(&mut self) {
        if self.cursor < DRAFT_ORDER.len() {
            self.cursor += 1;
        }
    }

    /// Point subsequent selections at an arbitrary slot without moving the
    /// cursor. Usability relaxation: the scripted order still drives
    /// auto-advance and the phase indicator.
    pub fn jump_to(&mut self, kind: StepKind, side: Side, slot: usize) {
        if slot < 5 {
            self.manual_target = Some(Target { kind, side, slot });
        }
    }

    pub fn clear_manual_target(&mut self) {
        self.manual_target = None;
    }

    pub fn has_manual_target(&self) -> bool {
        self.manual_target.is_some()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.manual_target = None;
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_has_five_bans_and_picks_per_side() {
        for side in [Side::Blue, Side::Red] {
            for kind in [StepKind::Ban, StepKind::Pick] {
                let count = DRAFT_ORDER
                    .iter()
                    .filter(|s| s.side == side && s.kind == kind)
                    .count();
                assert_eq!(count, 5, "{side} {kind:?}");
            }
        }
    }

    #[test]
    fn order_covers_every_slot_exactly_once() {
        for side in [Side::Blue, Side::Red] {
            for kind in [StepKind::Ban, StepKind::Pick] {
                let mut slots: Vec<usize> = DRAFT_ORDER
                    .iter()
                    .filter(|s| s.side == side && s.kind == kind)
                    .map(|s| s.slot)
                    .collect();
                slots.sort_unstable();
                assert_eq!(slots, vec![0, 1, 2, 3, 4]);
            }
        }
    }

    #[test]
    fn first_ban_is_blue_then_red() {
        assert_eq!(DRAFT_ORDER[0], step(StepKind::Ban, Side::Blue, 0));

        let mut seq = Sequencer::new();
        seq.advance();
        assert_eq!(seq.current_step(), Some(step(StepKind::Ban, Side::Red, 0)));
    }

    #[test]
    fn advance_past_terminal_is_a_noop() {
        let mut seq = Sequencer::new();
        for _ in 0..DRAFT_ORDER.len() {
            seq.advance();
        }
        assert!(seq.is_complete());
        assert_eq!(seq.current_step(), None);

        seq.advance();
        assert!(seq.is_complete());
        assert_eq!(seq.cursor(), DRAFT_ORDER.len());
    }

    #[test]
    fn jump_to_changes_target_without_moving_cursor() {
        let mut seq = Sequencer::new();
        seq.advance();
        let cursor_before = seq.cursor();

        seq.jump_to(StepKind::Pick, Side::Red, 3);
        assert_eq!(seq.cursor(), cursor_before);
        assert_eq!(
            seq.target(),
            Some(Target {
                kind: StepKind::Pick,
                side: Side::Red,
                slot: 3
            })
        );

        seq.clear_manual_target();
        assert_eq!(seq.target().map(|t| t.slot), Some(0));
    }

    #[test]
    fn jump_to_rejects_out_of_range_slot() {
        let mut seq = Sequencer::new();
        seq.jump_to(StepKind::Ban, Side::Blue, 5);
        assert!(!seq.has_manual_target());
    }

    #[test]
    fn reset_returns_to_step_zero() {
        let mut seq = Sequencer::new();
        seq.advance();
        seq.advance();
        seq.jump_to(StepKind::Ban, Side::Red, 2);

        seq.reset();
        assert_eq!(seq.cursor(), 0);
        assert!(!seq.has_manual_target());

        // Resetting twice yields the same state as once.
        seq.reset();
        assert_eq!(seq.cursor(), 0);
        assert!(!seq.has_manual_target());
    }
}
