//! Reading divisions from files.
//!
//! Two formats are understood. The text format is a team count followed by one record per
//! team: `name wins losses remaining g_0 .. g_{n-1}`, where `g_j` is the number of games left
//! against team `j`. Tokens are whitespace-separated and may be laid out across lines freely.
//! The JSON format is a [DivisionDocument].

use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::linear::Matrix;
use crate::standings::{MalformedInput, Standings, Team};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Malformed(#[from] MalformedInput),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
    pub against: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionDocument {
    pub teams: Vec<TeamRecord>,
}

impl TryFrom<DivisionDocument> for Standings {
    type Error = MalformedInput;

    fn try_from(document: DivisionDocument) -> Result<Self, Self::Error> {
        let mut teams = Vec::with_capacity(document.teams.len());
        let mut rows = Vec::with_capacity(document.teams.len());
        for record in document.teams {
            teams.push(Team::new(record.name, record.wins, record.losses, record.remaining));
            rows.push(record.against);
        }
        Standings::try_new(teams, Matrix::try_from(rows)?)
    }
}

impl From<&Standings> for DivisionDocument {
    fn from(standings: &Standings) -> Self {
        let teams = standings
            .teams()
            .iter()
            .enumerate()
            .map(|(index, team)| TeamRecord {
                name: team.name.clone(),
                wins: team.wins,
                losses: team.losses,
                remaining: team.remaining,
                against: standings.schedule().row_slice(index).to_vec(),
            })
            .collect();
        Self { teams }
    }
}

/// Reads a division from `path`, choosing the format by extension: `.json` files are parsed as
/// a [DivisionDocument], anything else as text.
pub fn read_division(path: impl AsRef<Path>) -> Result<Standings, ReadError> {
    let path = path.as_ref();
    if path.extension() == Some(OsStr::new("json")) {
        let document: DivisionDocument =
            serde_json::from_reader(File::open(path)?).map_err(MalformedInput::from)?;
        Ok(Standings::try_from(document)?)
    } else {
        let text = std::fs::read_to_string(path)?;
        Ok(parse_text(&text)?)
    }
}

pub fn parse_json(json: &str) -> Result<Standings, MalformedInput> {
    let document: DivisionDocument = serde_json::from_str(json)?;
    Standings::try_from(document)
}

pub fn parse_text(text: &str) -> Result<Standings, MalformedInput> {
    let mut tokens = Tokens::new(text);
    let num_teams: usize = tokens.parse("team count")?;
    // the count is untrusted, so storage grows with the records actually present
    let mut teams = vec![];
    let mut rows = vec![];
    for _ in 0..num_teams {
        let (_, name) = tokens.next("team name")?;
        let wins = tokens.parse("wins")?;
        let losses = tokens.parse("losses")?;
        let remaining = tokens.parse("remaining games")?;
        let mut against: Vec<u32> = vec![];
        for _ in 0..num_teams {
            against.push(tokens.parse("games against opponent")?);
        }
        teams.push(Team::new(name, wins, losses, remaining));
        rows.push(against);
    }
    if let Some((line, token)) = tokens.iter.next() {
        return Err(MalformedInput::Syntax {
            line,
            reason: format!("unexpected trailing token '{token}'"),
        });
    }
    let schedule = Matrix::try_from(rows)?;
    Standings::try_new(teams, schedule)
}

struct Tokens<'a> {
    iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    last_line: usize,
}
impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let iter = text
            .lines()
            .enumerate()
            .flat_map(|(index, line)| line.split_whitespace().map(move |token| (index + 1, token)));
        Self {
            iter: Box::new(iter),
            last_line: 1,
        }
    }

    fn next(&mut self, expected: &str) -> Result<(usize, &'a str), MalformedInput> {
        match self.iter.next() {
            Some((line, token)) => {
                self.last_line = line;
                Ok((line, token))
            }
            None => Err(MalformedInput::Syntax {
                line: self.last_line,
                reason: format!("expected {expected}, found end of input"),
            }),
        }
    }

    fn parse<T: FromStr>(&mut self, expected: &str) -> Result<T, MalformedInput>
    where
        T::Err: std::fmt::Display,
    {
        let (line, token) = self.next(expected)?;
        token.parse().map_err(|err| MalformedInput::Syntax {
            line,
            reason: format!("invalid {expected} '{token}': {err}"),
        })
    }
}
