//! [Standings] of a division: every team's record and the pairwise schedule of games still
//! to be played. Immutable once constructed.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::linear::{Matrix, RaggedRows};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
}
impl Team {
    pub fn new(name: impl Into<String>, wins: u32, losses: u32, remaining: u32) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            remaining,
        }
    }

    /// The win total this team would finish on if it won every remaining game.
    #[inline]
    pub fn max_possible_wins(&self) -> u64 {
        self.wins as u64 + self.remaining as u64
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}-{}, {} to play)", self.name, self.wins, self.losses, self.remaining)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown team '{0}'")]
pub struct UnknownTeam(pub String);

#[derive(Debug, Error)]
pub enum MalformedInput {
    #[error("a division must have at least one team")]
    NoTeams,

    #[error("team at index {index} has a blank name")]
    BlankName { index: usize },

    #[error("duplicate team '{name}' at index {index}, previously at {existing_index}")]
    DuplicateTeam {
        name: String,
        index: usize,
        existing_index: usize,
    },

    #[error("schedule is {rows}x{cols}, expected {teams}x{teams}")]
    ScheduleShape {
        rows: usize,
        cols: usize,
        teams: usize,
    },

    #[error("schedule: {0}")]
    RaggedSchedule(#[from] RaggedRows),

    #[error("team '{name}' is scheduled to play itself {games} times")]
    SelfGames { name: String, games: u32 },

    #[error("'{first}' plays '{second}' {forward} times, but '{second}' plays '{first}' {backward} times")]
    AsymmetricSchedule {
        first: String,
        second: String,
        forward: u32,
        backward: u32,
    },

    #[error("line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Standings {
    teams: Vec<Team>,
    schedule: Matrix<u32>,
    name_to_index: FxHashMap<String, usize>,
}
impl Standings {
    /// Validates and assembles the standings. `schedule[(i, j)]` is the number of games still
    /// to be played between teams `i` and `j`; it must be square, symmetric, and zero along the
    /// diagonal.
    pub fn try_new(teams: Vec<Team>, schedule: Matrix<u32>) -> Result<Self, MalformedInput> {
        if teams.is_empty() {
            return Err(MalformedInput::NoTeams);
        }
        if schedule.rows() != teams.len() || schedule.cols() != teams.len() {
            return Err(MalformedInput::ScheduleShape {
                rows: schedule.rows(),
                cols: schedule.cols(),
                teams: teams.len(),
            });
        }

        let mut name_to_index =
            FxHashMap::with_capacity_and_hasher(teams.len(), Default::default());
        for (index, team) in teams.iter().enumerate() {
            if team.name.trim().is_empty() {
                return Err(MalformedInput::BlankName { index });
            }
            if let Some(existing_index) = name_to_index.insert(team.name.clone(), index) {
                return Err(MalformedInput::DuplicateTeam {
                    name: team.name.clone(),
                    index,
                    existing_index,
                });
            }
        }

        if let Some((index, &games)) = schedule
            .diagonal()
            .enumerate()
            .find(|&(_, &games)| games != 0)
        {
            return Err(MalformedInput::SelfGames {
                name: teams[index].name.clone(),
                games,
            });
        }
        if let Some((row, col)) = schedule.find_asymmetry() {
            return Err(MalformedInput::AsymmetricSchedule {
                first: teams[row].name.clone(),
                second: teams[col].name.clone(),
                forward: schedule[(row, col)],
                backward: schedule[(col, row)],
            });
        }

        Ok(Self {
            teams,
            schedule,
            name_to_index,
        })
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, index: usize) -> &Team {
        &self.teams[index]
    }

    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|team| team.name.as_str())
    }

    pub fn schedule(&self) -> &Matrix<u32> {
        &self.schedule
    }

    pub fn index_of(&self, name: &str) -> Result<usize, UnknownTeam> {
        self.name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| UnknownTeam(name.to_string()))
    }

    pub fn lookup(&self, name: &str) -> Result<&Team, UnknownTeam> {
        self.index_of(name).map(|index| &self.teams[index])
    }

    pub fn wins(&self, name: &str) -> Result<u32, UnknownTeam> {
        self.lookup(name).map(|team| team.wins)
    }

    pub fn losses(&self, name: &str) -> Result<u32, UnknownTeam> {
        self.lookup(name).map(|team| team.losses)
    }

    pub fn remaining(&self, name: &str) -> Result<u32, UnknownTeam> {
        self.lookup(name).map(|team| team.remaining)
    }

    /// Games left to play between two named teams.
    pub fn against(&self, first: &str, second: &str) -> Result<u32, UnknownTeam> {
        let first = self.index_of(first)?;
        let second = self.index_of(second)?;
        Ok(self.games_between(first, second))
    }

    #[inline]
    pub fn games_between(&self, first: usize, second: usize) -> u32 {
        self.schedule[(first, second)]
    }

    /// Indexes of every team other than `team`, in standings order.
    pub fn opponents(&self, team: usize) -> impl Iterator<Item = usize> {
        (0..self.teams.len()).filter(move |&index| index != team)
    }

    /// Total games left among all teams other than `excluded`.
    pub fn games_among_others(&self, excluded: usize) -> u64 {
        let mut games = 0;
        for first in self.opponents(excluded) {
            for second in (first + 1..self.teams.len()).filter(|&second| second != excluded) {
                games += self.games_between(first, second) as u64;
            }
        }
        games
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn queries() {
        let standings = testing::teams4();
        assert_eq!(4, standings.len());
        assert_eq!(
            vec!["Atlanta", "Philadelphia", "New_York", "Montreal"],
            standings.team_names().collect::<Vec<_>>()
        );
        assert_eq!(83, standings.wins("Atlanta").unwrap());
        assert_eq!(79, standings.losses("Philadelphia").unwrap());
        assert_eq!(6, standings.remaining("New_York").unwrap());
        assert_eq!(6, standings.against("Atlanta", "New_York").unwrap());
        assert_eq!(2, standings.index_of("New_York").unwrap());
        assert_eq!(80, standings.team(3).max_possible_wins());
    }

    #[test]
    fn unknown_team() {
        let standings = testing::teams4();
        assert_eq!(UnknownTeam("Boston".into()), standings.wins("Boston").unwrap_err());
        assert_eq!(UnknownTeam("Boston".into()), standings.losses("Boston").unwrap_err());
        assert_eq!(UnknownTeam("Boston".into()), standings.remaining("Boston").unwrap_err());
        assert_eq!(
            UnknownTeam("Boston".into()),
            standings.against("Atlanta", "Boston").unwrap_err()
        );
        assert_eq!(
            UnknownTeam("Boston".into()),
            standings.against("Boston", "Atlanta").unwrap_err()
        );
        assert_eq!("unknown team 'Boston'", standings.wins("Boston").unwrap_err().to_string());
    }

    #[test]
    fn symmetric_against() {
        let standings = testing::teams5();
        for first in standings.team_names() {
            for second in standings.team_names() {
                assert_eq!(
                    standings.against(first, second).unwrap(),
                    standings.against(second, first).unwrap()
                );
            }
        }
    }

    #[test]
    fn games_among_others() {
        let standings = testing::teams4();
        // Atlanta excluded: Philadelphia-Montreal is the only fixture left
        assert_eq!(2, standings.games_among_others(0));
        // Philadelphia excluded: Atlanta-New_York and Atlanta-Montreal
        assert_eq!(7, standings.games_among_others(1));
    }

    #[test]
    fn no_teams() {
        let err = Standings::try_new(vec![], Matrix::allocate(0, 0)).unwrap_err();
        assert!(matches!(err, MalformedInput::NoTeams));
    }

    #[test]
    fn duplicate_team() {
        let err = Standings::try_new(
            vec![Team::new("Boston", 1, 1, 0), Team::new("Boston", 2, 2, 0)],
            Matrix::allocate(2, 2),
        )
        .unwrap_err();
        assert_eq!(
            "duplicate team 'Boston' at index 1, previously at 0",
            err.to_string()
        );
    }

    #[test]
    fn blank_name() {
        let err = Standings::try_new(
            vec![Team::new("Boston", 1, 1, 0), Team::new(" ", 2, 2, 0)],
            Matrix::allocate(2, 2),
        )
        .unwrap_err();
        assert!(matches!(err, MalformedInput::BlankName { index: 1 }));
    }

    #[test]
    fn schedule_shape() {
        let err = Standings::try_new(vec![Team::new("Boston", 1, 1, 0)], Matrix::allocate(2, 2))
            .unwrap_err();
        assert_eq!("schedule is 2x2, expected 1x1", err.to_string());
    }

    #[test]
    fn self_games() {
        let mut schedule = Matrix::allocate(2, 2);
        schedule[(1, 1)] = 3;
        let err = Standings::try_new(
            vec![Team::new("Boston", 1, 1, 0), Team::new("Toronto", 2, 2, 3)],
            schedule,
        )
        .unwrap_err();
        assert_eq!("team 'Toronto' is scheduled to play itself 3 times", err.to_string());
    }

    #[test]
    fn asymmetric_schedule() {
        let mut schedule = Matrix::allocate(2, 2);
        schedule[(0, 1)] = 3;
        schedule[(1, 0)] = 2;
        let err = Standings::try_new(
            vec![Team::new("Boston", 1, 1, 3), Team::new("Toronto", 2, 2, 2)],
            schedule,
        )
        .unwrap_err();
        assert_eq!(
            "'Boston' plays 'Toronto' 3 times, but 'Toronto' plays 'Boston' 2 times",
            err.to_string()
        );
    }

    #[test]
    fn team_display() {
        assert_eq!(
            "Atlanta (83-71, 8 to play)",
            Team::new("Atlanta", 83, 71, 8).to_string()
        );
    }
}
