use crate::catalogue::Champion;

/// Output bounds of the heuristic.
const FLOOR: f64 = 30.0;
const CEILING: f64 = 95.0;

/// Per-teammate synergy increment beyond the first pick.
const SYNERGY_STEP: f64 = 1.5;

/// Estimate a side's win rate from both sides' (possibly partial) rosters.
///
/// Pure and total: empty, partial, and full rosters all produce an integer in
/// [30, 95]. An empty side returns the neutral prior of 50. Call once per side
/// with the rosters swapped to rate both teams.
///
/// The counter bonus counts every strict tier advantage pair and is
/// intentionally left unbounded before the final clamp, matching the
/// heuristic's ad hoc origins.
pub fn estimate_win_rate(side: &[Option<&Champion>], opposing: &[Option<&Champion>]) -> u8 {
    let active: Vec<&Champion> = side.iter().filter_map(|slot| *slot).collect();
    if active.is_empty() {
        return 50;
    }

    let base: f64 =
        active.iter().map(|c| c.base_win_rate).sum::<f64>() / active.len() as f64;

    let synergy = (active.len().saturating_sub(1)) as f64 * SYNERGY_STEP;

    let enemies: Vec<&Champion> = opposing.iter().filter_map(|slot| *slot).collect();
    let counter = active
        .iter()
        .flat_map(|a| enemies.iter().map(move |b| (a, b)))
        .filter(|(a, b)| a.tier < b.tier)
        .count() as f64;

    (base + synergy + counter).clamp(FLOOR, CEILING).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{ChampionId, Role};

    fn champ(id: ChampionId, tier: u8, base_win_rate: f64) -> Champion {
        Champion {
            id,
            name: format!("C{id}"),
            role: Role::Mid,
            image_ref: String::new(),
            tier,
            base_win_rate,
        }
    }

    fn roster(champions: &[Champion]) -> Vec<Option<&Champion>> {
        let mut slots: Vec<Option<&Champion>> = champions.iter().map(Some).collect();
        slots.resize(5, None);
        slots
    }

    #[test]
    fn empty_rosters_are_neutral() {
        let empty: Vec<Option<&Champion>> = vec![None; 5];
        assert_eq!(estimate_win_rate(&empty, &empty), 50);
    }

    #[test]
    fn single_pick_vs_empty_is_its_base_rate() {
        let side = [champ(1, 1, 60.0)];
        let empty: Vec<Option<&Champion>> = vec![None; 5];
        assert_eq!(estimate_win_rate(&roster(&side), &empty), 60);
    }

    #[test]
    fn full_roster_synergy_without_counters() {
        // Average base 50, synergy 4 * 1.5 = 6, no strict tier advantage.
        let side: Vec<Champion> = (1..=5).map(|id| champ(id, 2, 50.0)).collect();
        let enemies: Vec<Champion> = (6..=10).map(|id| champ(id, 1, 50.0)).collect();
        assert_eq!(estimate_win_rate(&roster(&side), &roster(&enemies)), 56);
    }

    #[test]
    fn tier_ties_contribute_nothing() {
        let side = [champ(1, 2, 50.0)];
        let enemies = [champ(2, 2, 50.0)];
        assert_eq!(estimate_win_rate(&roster(&side), &roster(&enemies)), 50);
    }

    #[test]
    fn counter_pairs_accumulate_per_pair() {
        // Two tier-1 picks against three tier-3 enemies: 6 counter pairs.
        let side = [champ(1, 1, 50.0), champ(2, 1, 50.0)];
        let enemies = [champ(3, 3, 50.0), champ(4, 3, 50.0), champ(5, 3, 50.0)];
        // base 50 + synergy 1.5 + counter 6 = 57.5, rounds to 58.
        assert_eq!(estimate_win_rate(&roster(&side), &roster(&enemies)), 58);
    }

    #[test]
    fn adding_a_weaker_enemy_never_lowers_the_estimate() {
        let side = [champ(1, 1, 48.0), champ(2, 2, 52.0)];
        let mut enemies = vec![champ(3, 2, 50.0)];
        let mut previous = estimate_win_rate(&roster(&side), &roster(&enemies));

        for id in 4..=7 {
            enemies.push(champ(id, 3, 50.0));
            let current = estimate_win_rate(&roster(&side), &roster(&enemies));
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn output_stays_in_bounds() {
        // Worst case: terrible base rates, outclassed on every pair.
        let side: Vec<Champion> = (1..=5).map(|id| champ(id, 4, 1.0)).collect();
        let enemies: Vec<Champion> = (6..=10).map(|id| champ(id, 1, 99.0)).collect();
        assert_eq!(estimate_win_rate(&roster(&side), &roster(&enemies)), 30);

        // Best case: stellar base rates and 25 counter pairs.
        assert_eq!(estimate_win_rate(&roster(&enemies), &roster(&side)), 95);
    }
}
