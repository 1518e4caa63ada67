use crate::api::models::{MasteryDto, RecommendationDto};
use crate::catalogue::{Champion, ChampionId};
use crate::draft::sequencer::{Side, StepKind, Target};
use std::collections::HashSet;

pub const TEAM_SIZE: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct RosterSlot {
    pub champion: Option<Champion>,
    pub player_handle: String,
    pub masteries: Vec<MasteryDto>,
    pub recommendations: Vec<RecommendationDto>,
    /// Bumped whenever the slot is reassigned or cleared. Async lookup
    /// responses carry the epoch they were dispatched under and are discarded
    /// on mismatch.
    epoch: u64,
}

#[derive(Debug, Clone, Default)]
pub struct BanSlot {
    pub champion: Option<Champion>,
}

#[derive(Debug, Clone, Default)]
struct TeamState {
    roster: [RosterSlot; TEAM_SIZE],
    bans: [BanSlot; TEAM_SIZE],
}

/// Both sides' roster and ban slots, plus a set-valued index over every
/// occupied champion id. The index is rebuilt on each slot mutation so that
/// availability checks never rescan all 20 slots.
#[derive(Debug, Clone, Default)]
pub struct DraftBoard {
    blue: TeamState,
    red: TeamState,
    occupied: HashSet<ChampionId>,
}

impl DraftBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn team(&self, side: Side) -> &TeamState {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut TeamState {
        match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
        }
    }

    /// A champion anywhere on the board (either side, ban or pick) cannot be
    /// selected again.
    pub fn is_available(&self, id: ChampionId) -> bool {
        !self.occupied.contains(&id)
    }

    /// Commit a champion into the target slot. Returns false (silent no-op)
    /// when the champion is already picked or banned anywhere in the draft.
    pub fn commit(&mut self, target: Target, champion: &Champion) -> bool {
        if !self.is_available(champion.id) {
            return false;
        }
        match target.kind {
            StepKind::Ban => {
                self.team_mut(target.side).bans[target.slot].champion = Some(champion.clone());
            }
            StepKind::Pick => {
                let slot = &mut self.team_mut(target.side).roster[target.slot];
                slot.champion = Some(champion.clone());
                slot.epoch += 1;
            }
        }
        self.rebuild_occupied();
        true
    }

    /// Empty the target slot (user removed a pick or ban).
    pub fn clear(&mut self, target: Target) {
        match target.kind {
            StepKind::Ban => {
                self.team_mut(target.side).bans[target.slot].champion = None;
            }
            StepKind::Pick => {
                let slot = &mut self.team_mut(target.side).roster[target.slot];
                slot.champion = None;
                slot.masteries.clear();
                slot.recommendations.clear();
                slot.epoch += 1;
            }
        }
        self.rebuild_occupied();
    }

    /// Clear every slot on both sides. Idempotent.
    pub fn reset(&mut self) {
        for side in [Side::Blue, Side::Red] {
            let team = self.team_mut(side);
            for slot in &mut team.roster {
                slot.champion = None;
                slot.player_handle.clear();
                slot.masteries.clear();
                slot.recommendations.clear();
                slot.epoch += 1;
            }
            for ban in &mut team.bans {
                ban.champion = None;
            }
        }
        self.rebuild_occupied();
    }

    fn rebuild_occupied(&mut self) {
        self.occupied.clear();
        for team in [&self.blue, &self.red] {
            for slot in &team.roster {
                if let Some(champion) = &slot.champion {
                    self.occupied.insert(champion.id);
                }
            }
            for ban in &team.bans {
                if let Some(champion) = &ban.champion {
                    self.occupied.insert(champion.id);
                }
            }
        }
    }

    pub fn roster_slot(&self, side: Side, index: usize) -> &RosterSlot {
        &self.team(side).roster[index]
    }

    pub fn ban_slot(&self, side: Side, index: usize) -> &BanSlot {
        &self.team(side).bans[index]
    }

    pub fn set_player_handle(&mut self, side: Side, index: usize, handle: &str) {
        let slot = &mut self.team_mut(side).roster[index];
        if slot.player_handle != handle {
            slot.player_handle = handle.to_string();
            slot.masteries.clear();
            slot.recommendations.clear();
        }
        // Every assignment gets a fresh epoch, even for an unchanged handle:
        // a retried lookup must not share a token with the earlier dispatch.
        slot.epoch += 1;
    }

    pub fn slot_epoch(&self, side: Side, index: usize) -> u64 {
        self.team(side).roster[index].epoch
    }

    /// Replace the slot's mastery list wholesale, but only if the slot has not
    /// been reassigned since the lookup was dispatched.
    pub fn apply_masteries(
        &mut self,
        side: Side,
        index: usize,
        epoch: u64,
        masteries: Vec<MasteryDto>,
    ) -> bool {
        let slot = &mut self.team_mut(side).roster[index];
        if slot.epoch != epoch {
            return false;
        }
        slot.masteries = masteries;
        true
    }

    pub fn apply_recommendations(
        &mut self,
        side: Side,
        index: usize,
        epoch: u64,
        recommendations: Vec<RecommendationDto>,
    ) -> bool {
        let slot = &mut self.team_mut(side).roster[index];
        if slot.epoch != epoch {
            return false;
        }
        slot.recommendations = recommendations;
        true
    }

    /// The side's picks in slot order, empty slots included.
    pub fn roster(&self, side: Side) -> Vec<Option<&Champion>> {
        self.team(side)
            .roster
            .iter()
            .map(|slot| slot.champion.as_ref())
            .collect()
    }

    pub fn bans(&self, side: Side) -> Vec<Option<&Champion>> {
        self.team(side)
            .bans
            .iter()
            .map(|ban| ban.champion.as_ref())
            .collect()
    }

    pub fn pick_count(&self, side: Side) -> usize {
        self.team(side)
            .roster
            .iter()
            .filter(|slot| slot.champion.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Role;

    fn champ(id: ChampionId, name: &str, tier: u8) -> Champion {
        Champion {
            id,
            name: name.to_string(),
            role: Role::Mid,
            image_ref: String::new(),
            tier,
            base_win_rate: 50.0,
        }
    }

    fn pick(side: Side, slot: usize) -> Target {
        Target {
            kind: StepKind::Pick,
            side,
            slot,
        }
    }

    fn ban(side: Side, slot: usize) -> Target {
        Target {
            kind: StepKind::Ban,
            side,
            slot,
        }
    }

    #[test]
    fn committed_champion_is_globally_unavailable() {
        let mut board = DraftBoard::new();
        let ahri = champ(103, "Ahri", 2);

        assert!(board.commit(ban(Side::Blue, 0), &ahri));
        assert!(!board.is_available(ahri.id));

        // Same champion cannot be picked by either side.
        assert!(!board.commit(pick(Side::Blue, 0), &ahri));
        assert!(!board.commit(pick(Side::Red, 0), &ahri));
        assert!(board.roster_slot(Side::Red, 0).champion.is_none());
    }

    #[test]
    fn uniqueness_holds_across_a_pick_ban_sequence() {
        let mut board = DraftBoard::new();
        let champions: Vec<Champion> = (1..=8).map(|i| champ(i, &format!("C{i}"), 2)).collect();

        board.commit(ban(Side::Blue, 0), &champions[0]);
        board.commit(ban(Side::Red, 0), &champions[1]);
        board.commit(pick(Side::Blue, 0), &champions[2]);
        board.commit(pick(Side::Red, 0), &champions[3]);
        board.commit(pick(Side::Red, 1), &champions[4]);
        // Duplicates are silently rejected.
        board.commit(pick(Side::Blue, 1), &champions[3]);
        board.commit(ban(Side::Red, 1), &champions[0]);

        let mut seen = HashSet::new();
        for side in [Side::Blue, Side::Red] {
            for entry in board.roster(side).into_iter().chain(board.bans(side)) {
                if let Some(c) = entry {
                    assert!(seen.insert(c.id), "champion {} appears twice", c.name);
                }
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn clear_frees_the_champion() {
        let mut board = DraftBoard::new();
        let zed = champ(238, "Zed", 3);

        board.commit(pick(Side::Blue, 2), &zed);
        assert!(!board.is_available(zed.id));

        board.clear(pick(Side::Blue, 2));
        assert!(board.is_available(zed.id));
        assert!(board.commit(pick(Side::Red, 4), &zed));
    }

    #[test]
    fn reset_clears_everything_and_is_idempotent() {
        let mut board = DraftBoard::new();
        board.commit(ban(Side::Blue, 0), &champ(1, "A", 1));
        board.commit(pick(Side::Red, 3), &champ(2, "B", 2));
        board.set_player_handle(Side::Red, 3, "Player#EUW");

        board.reset();
        let after_once = board.clone();
        board.reset();

        for side in [Side::Blue, Side::Red] {
            assert_eq!(board.pick_count(side), 0);
            assert!(board.bans(side).iter().all(|b| b.is_none()));
        }
        assert!(board.is_available(1));
        assert!(board.is_available(2));
        assert_eq!(
            after_once.pick_count(Side::Red),
            board.pick_count(Side::Red)
        );
        assert!(board.roster_slot(Side::Red, 3).player_handle.is_empty());
    }

    #[test]
    fn stale_epoch_masteries_are_discarded() {
        let mut board = DraftBoard::new();
        board.set_player_handle(Side::Blue, 0, "Old#TAG");
        let dispatched_epoch = board.slot_epoch(Side::Blue, 0);

        // Slot reassigned while the lookup was in flight.
        board.set_player_handle(Side::Blue, 0, "New#TAG");

        let stale = vec![MasteryDto {
            champion_id: 103,
            champion_name: "Ahri".to_string(),
            champion_level: 7,
            champion_points: 250_000,
        }];
        assert!(!board.apply_masteries(Side::Blue, 0, dispatched_epoch, stale));
        assert!(board.roster_slot(Side::Blue, 0).masteries.is_empty());

        // A response dispatched under the current epoch lands.
        let fresh_epoch = board.slot_epoch(Side::Blue, 0);
        assert!(board.apply_masteries(Side::Blue, 0, fresh_epoch, Vec::new()));
    }

    #[test]
    fn reentering_the_same_handle_retires_the_old_token() {
        let mut board = DraftBoard::new();
        board.set_player_handle(Side::Red, 1, "Same#TAG");
        let first_epoch = board.slot_epoch(Side::Red, 1);

        // Retrying the lookup with an unchanged handle must still move the
        // epoch, otherwise a slow first response could overwrite the retry.
        board.set_player_handle(Side::Red, 1, "Same#TAG");
        let second_epoch = board.slot_epoch(Side::Red, 1);
        assert_ne!(first_epoch, second_epoch);

        let slow_first = vec![MasteryDto {
            champion_id: 238,
            champion_name: "Zed".to_string(),
            champion_level: 5,
            champion_points: 90_000,
        }];
        assert!(!board.apply_masteries(Side::Red, 1, first_epoch, slow_first));
        assert!(board.apply_masteries(Side::Red, 1, second_epoch, Vec::new()));
    }
}
