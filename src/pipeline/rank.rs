use crate::model::{RankedTeam, TeamTotal};

/// Orders teams by total, highest first, and numbers them 1..=N.
///
/// The sort is stable, so teams with equal totals keep their input order and still get distinct
/// consecutive ranks. The team at rank `r` gets `N - r + 1` stars.
pub fn rank(team_totals: &[TeamTotal]) -> Vec<RankedTeam> {
    let mut sorted: Vec<&TeamTotal> = team_totals.iter().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));

    let n = sorted.len() as u32;
    sorted
        .into_iter()
        .zip(1..)
        .map(|(t, rank)| RankedTeam {
            team: t.team.clone(),
            total: t.total,
            rank,
            stars: n - rank + 1,
        })
        .collect()
}
