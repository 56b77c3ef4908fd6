//! Decides, for every team in a division, whether it can still finish first (outright or
//! tied), and certifies each elimination with the subset of teams responsible for it.
//!
//! A team is first tested for trivial elimination, where a single rival already has more wins
//! than the team could reach. Failing that, a [FlowNetwork] is built for the team and solved
//! for maximum flow. The team is eliminated if the remaining games among its rivals cannot all
//! be routed through the network; the rivals on the source side of the minimum cut form the
//! certificate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::maxflow;
use crate::maxflow::FlowConsistencyError;
use crate::network::{Capacity, FlowNetwork, Vertex};
use crate::standings::{Standings, Team, UnknownTeam};
use crate::trivial;
use crate::trivial::TrivialCertificate;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub trivial_certificate: TrivialCertificate,
}

/// How a verdict was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cause {
    /// The team has no rivals to be eliminated by.
    NoOpponents,

    /// Some rival already has more wins than the team can reach.
    Trivial,

    /// Decided by the flow network: `max_flow` of the `games` left among the rivals could be
    /// played out without any rival passing the team.
    Flow { max_flow: Capacity, games: Capacity },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Standings indexes of the teams that eliminate this one, in standings order. Present if
    /// and only if the team is eliminated.
    pub certificate: Option<Vec<usize>>,
    pub cause: Cause,
}
impl Verdict {
    pub fn eliminated(certificate: Vec<usize>, cause: Cause) -> Self {
        Self {
            certificate: Some(certificate),
            cause,
        }
    }

    pub fn not_eliminated(cause: Cause) -> Self {
        Self {
            certificate: None,
            cause,
        }
    }

    pub fn is_eliminated(&self) -> bool {
        self.certificate.is_some()
    }
}

/// Analyses a single team. Each call builds and discards its own network, so calls for
/// different teams are fully independent.
pub fn analyse_team(
    standings: &Standings,
    team: usize,
    options: &AnalysisOptions,
) -> Result<Verdict, FlowConsistencyError> {
    let name = &standings.team(team).name;
    if standings.len() == 1 {
        debug!("{name} has no opponents");
        return Ok(Verdict::not_eliminated(Cause::NoOpponents));
    }

    if let Some(witnesses) = trivial::check(standings, team, options.trivial_certificate) {
        debug!("{name} is trivially eliminated by {witnesses:?}");
        return Ok(Verdict::eliminated(witnesses, Cause::Trivial));
    }

    let mut network = FlowNetwork::build(standings, team);
    let max_flow = maxflow::solve(&mut network)?;
    debug_assert_eq!(standings.games_among_others(team), max_flow.source_capacity);
    let cause = Cause::Flow {
        max_flow: max_flow.value,
        games: max_flow.source_capacity,
    };
    debug!(
        "{name}: {} of {} games routed in {} augmentations over {} vertices",
        max_flow.value,
        max_flow.source_capacity,
        max_flow.augmentations,
        network.num_vertices()
    );
    if max_flow.saturated() {
        return Ok(Verdict::not_eliminated(cause));
    }

    let certificate: Vec<_> = standings
        .opponents(team)
        .filter(|&opponent| {
            network
                .id_of(&Vertex::Team(opponent))
                .map(|vertex| max_flow.reachable_from_source(vertex))
                .unwrap_or_default()
        })
        .collect();
    debug!("{name} is eliminated by {certificate:?}");
    Ok(Verdict::eliminated(certificate, cause))
}

/// The verdicts for an entire division, answering queries by team name.
#[derive(Debug, Clone)]
pub struct Analysis {
    standings: Standings,
    verdicts: Vec<Verdict>,
}
impl Analysis {
    pub fn new(standings: Standings, options: &AnalysisOptions) -> Result<Self, FlowConsistencyError> {
        let verdicts = (0..standings.len())
            .map(|team| analyse_team(&standings, team, options))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            standings,
            verdicts,
        })
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn num_teams(&self) -> usize {
        self.standings.len()
    }

    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.standings.team_names()
    }

    pub fn wins(&self, name: &str) -> Result<u32, UnknownTeam> {
        self.standings.wins(name)
    }

    pub fn losses(&self, name: &str) -> Result<u32, UnknownTeam> {
        self.standings.losses(name)
    }

    pub fn remaining(&self, name: &str) -> Result<u32, UnknownTeam> {
        self.standings.remaining(name)
    }

    pub fn against(&self, first: &str, second: &str) -> Result<u32, UnknownTeam> {
        self.standings.against(first, second)
    }

    pub fn verdict(&self, name: &str) -> Result<&Verdict, UnknownTeam> {
        self.standings.index_of(name).map(|index| &self.verdicts[index])
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn is_eliminated(&self, name: &str) -> Result<bool, UnknownTeam> {
        self.verdict(name).map(Verdict::is_eliminated)
    }

    /// The names of the teams that eliminate `name`, or `None` if it is still in contention.
    pub fn certificate(&self, name: &str) -> Result<Option<Vec<&str>>, UnknownTeam> {
        self.verdict(name).map(|verdict| {
            verdict.certificate.as_ref().map(|certificate| {
                certificate
                    .iter()
                    .map(|&index| self.standings.team(index).name.as_str())
                    .collect()
            })
        })
    }

    /// Teams paired with their verdicts, in standings order.
    pub fn iter(&self) -> impl Iterator<Item = (&Team, &Verdict)> {
        self.standings.teams().iter().zip(self.verdicts.iter())
    }

    pub fn eliminated_teams(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, verdict)| verdict.is_eliminated())
            .map(|(team, _)| team.name.as_str())
    }
}
