use std::cmp::Ordering;

use super::aggregate::TeamRollup;

/// Rank assigned to a team, with a marker when the rank is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankLabel {
    pub number: usize, // 1-based competition rank
    pub tied: bool,
}

impl RankLabel {
    /// Display form: "3", or "T-3" when more than one team shares the rank.
    pub fn display(&self) -> String {
        if self.tied {
            format!("T-{}", self.number)
        } else {
            self.number.to_string()
        }
    }
}

/// Competition ranking ("1, 1, 3, 4") over an already-sorted slice.
///
/// `same_rank` decides whether two adjacent items belong to the same tie
/// group. Each group's rank number is the 1-based position of its first
/// member, so the group after a two-way tie at 1 starts at 3.
pub fn rank_with_ties<T, F>(items: &[T], same_rank: F) -> Vec<(&T, usize, bool)>
where
    F: Fn(&T, &T) -> bool,
{
    let mut ranked = Vec::with_capacity(items.len());
    let mut start = 0;
    while start < items.len() {
        let mut end = start + 1;
        while end < items.len() && same_rank(&items[start], &items[end]) {
            end += 1;
        }
        let tied = end - start > 1;
        for item in &items[start..end] {
            ranked.push((item, start + 1, tied));
        }
        start = end;
    }
    ranked
}

/// Ranking comparator: total descending, then player count ascending
/// (smaller teams rank higher on equal score). Name as a final, purely
/// presentational tiebreak so equal teams list deterministically.
pub fn ranking_order(a: &TeamRollup, b: &TeamRollup) -> Ordering {
    b.total
        .partial_cmp(&a.total)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.team.player_count.cmp(&b.team.player_count))
        .then_with(|| a.team.name.cmp(&b.team.name))
}

/// A rollup in its standings position with its assigned rank.
#[derive(Debug, Clone)]
pub struct RankedRollup {
    pub rollup: TeamRollup,
    pub rank: RankLabel,
}

/// Assign ranks and return rollups in standings order.
///
/// Ranks always follow total desc / player count asc with competition
/// numbering, independent of any display sort. Before any round is published
/// no score data is meaningful, so teams are simply numbered alphabetically
/// with no ties.
pub fn rank_teams(rollups: &[TeamRollup], published_rounds: u32) -> Vec<RankedRollup> {
    let mut sorted: Vec<&TeamRollup> = rollups.iter().collect();

    if published_rounds == 0 {
        sorted.sort_by(|a, b| a.team.name.cmp(&b.team.name));
        return sorted
            .into_iter()
            .enumerate()
            .map(|(idx, rollup)| RankedRollup {
                rollup: rollup.clone(),
                rank: RankLabel {
                    number: idx + 1,
                    tied: false,
                },
            })
            .collect();
    }

    sorted.sort_by(|a, b| ranking_order(a, b));
    rank_with_ties(&sorted, |a, b| {
        a.total == b.total && a.team.player_count == b.team.player_count
    })
    .into_iter()
    .map(|(rollup, number, tied)| RankedRollup {
        rollup: (*rollup).clone(),
        rank: RankLabel { number, tied },
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Team;
    use std::collections::BTreeMap;

    fn rollup(name: &str, player_count: u32, total: f64) -> TeamRollup {
        TeamRollup {
            team: Team {
                id: name.bytes().map(u64::from).sum(),
                name: name.to_string(),
                player_count,
                shots_bonus: false,
            },
            rounds: BTreeMap::new(),
            total,
        }
    }

    #[test]
    fn test_rank_with_ties_competition_numbering() {
        let values = vec![10, 10, 8, 8, 8, 5];
        let ranked = rank_with_ties(&values, |a, b| a == b);

        let numbers: Vec<usize> = ranked.iter().map(|(_, n, _)| *n).collect();
        assert_eq!(numbers, vec![1, 1, 3, 3, 3, 6]);

        let tied: Vec<bool> = ranked.iter().map(|(_, _, t)| *t).collect();
        assert_eq!(tied, vec![true, true, true, true, true, false]);
    }

    #[test]
    fn test_rank_with_ties_no_ties() {
        let values = vec![3, 2, 1];
        let ranked = rank_with_ties(&values, |a, b| a == b);
        assert!(ranked.iter().all(|(_, _, tied)| !tied));
        assert_eq!(ranked[2].1, 3);
    }

    #[test]
    fn test_fewer_players_ranks_higher_on_equal_total() {
        // A(total 10, 2 players), B(total 10, 1 player), C(total 8):
        // order B, A, C with B and A sharing rank 1 and C at rank 3.
        let rollups = vec![
            rollup("A", 2, 10.0),
            rollup("B", 1, 10.0),
            rollup("C", 3, 8.0),
        ];

        let ranked = rank_teams(&rollups, 1);
        assert_eq!(ranked[0].rollup.team.name, "B");
        assert_eq!(ranked[1].rollup.team.name, "A");
        assert_eq!(ranked[2].rollup.team.name, "C");

        // B ranks strictly above A (different player count), no tie marker
        assert_eq!(ranked[0].rank, RankLabel { number: 1, tied: false });
        assert_eq!(ranked[1].rank, RankLabel { number: 2, tied: false });
        assert_eq!(ranked[2].rank, RankLabel { number: 3, tied: false });
    }

    #[test]
    fn test_equal_total_and_players_share_rank() {
        let rollups = vec![
            rollup("A", 2, 10.0),
            rollup("B", 2, 10.0),
            rollup("C", 3, 8.0),
        ];

        let ranked = rank_teams(&rollups, 1);
        assert_eq!(ranked[0].rank, RankLabel { number: 1, tied: true });
        assert_eq!(ranked[0].rank.display(), "T-1");
        assert_eq!(ranked[1].rank, RankLabel { number: 1, tied: true });
        // Next distinct group continues from position + 1
        assert_eq!(ranked[2].rank, RankLabel { number: 3, tied: false });
        assert_eq!(ranked[2].rank.display(), "3");
    }

    #[test]
    fn test_zero_published_rounds_ranks_alphabetically() {
        // Stored scores are irrelevant before publication
        let rollups = vec![
            rollup("Charlie", 1, 20.0),
            rollup("Alpha", 1, 5.0),
            rollup("Bravo", 1, 12.0),
        ];

        let ranked = rank_teams(&rollups, 0);
        let names: Vec<&str> = ranked
            .iter()
            .map(|r| r.rollup.team.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);

        let numbers: Vec<usize> = ranked.iter().map(|r| r.rank.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(ranked.iter().all(|r| !r.rank.tied));
    }
}
