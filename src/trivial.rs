//! Trivial elimination: a team is out of contention if some other team already has more wins
//! than it could possibly finish with.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::standings::Standings;

/// How many witnesses to report when a team is trivially eliminated. Any one witness is
/// sufficient proof.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum TrivialCertificate {
    /// Every team whose current win total exceeds the candidate's best possible total.
    #[default]
    All,

    /// Only the first such team, in standings order.
    First,
}

/// Returns the teams that individually eliminate `team`, or `None` if there are none.
pub fn check(standings: &Standings, team: usize, policy: TrivialCertificate) -> Option<Vec<usize>> {
    let max_possible_wins = standings.team(team).max_possible_wins();
    let mut witnesses = standings
        .opponents(team)
        .filter(|&opponent| standings.team(opponent).wins as u64 > max_possible_wins);

    let witnesses: Vec<_> = match policy {
        TrivialCertificate::All => witnesses.collect(),
        TrivialCertificate::First => witnesses.next().into_iter().collect(),
    };
    if witnesses.is_empty() {
        None
    } else {
        Some(witnesses)
    }
}
