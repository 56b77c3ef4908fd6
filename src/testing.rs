//! Testing helpers.

use tinyrand::Rand;

use crate::linear::Matrix;
use crate::standings::{Standings, Team};

pub fn standings(records: &[(&str, u32, u32, u32, &[u32])]) -> Standings {
    let teams = records
        .iter()
        .map(|&(name, wins, losses, remaining, _)| Team::new(name, wins, losses, remaining))
        .collect();
    let schedule = Matrix::try_from(
        records
            .iter()
            .map(|&(_, _, _, _, against)| against.to_vec())
            .collect::<Vec<_>>(),
    )
    .unwrap();
    Standings::try_new(teams, schedule).unwrap()
}

pub fn teams1() -> Standings {
    standings(&[("Turkey", 82, 79, 1, &[0])])
}

pub fn teams4() -> Standings {
    standings(&[
        ("Atlanta", 83, 71, 8, &[0, 1, 6, 1]),
        ("Philadelphia", 80, 79, 3, &[1, 0, 0, 2]),
        ("New_York", 78, 78, 6, &[6, 0, 0, 0]),
        ("Montreal", 77, 82, 3, &[1, 2, 0, 0]),
    ])
}

/// Montreal is not trivially eliminated, but Atlanta and Philadelphia have too many games
/// left against each other for both to stay below its best total.
pub fn teams4a() -> Standings {
    standings(&[
        ("Atlanta", 80, 60, 8, &[0, 4, 4, 0]),
        ("Philadelphia", 79, 61, 8, &[4, 0, 4, 0]),
        ("New_York", 70, 70, 12, &[4, 4, 0, 4]),
        ("Montreal", 77, 65, 4, &[0, 0, 4, 0]),
    ])
}

pub fn teams5() -> Standings {
    standings(&[
        ("New_York", 75, 59, 28, &[0, 3, 8, 7, 3]),
        ("Baltimore", 71, 63, 28, &[3, 0, 2, 7, 7]),
        ("Boston", 69, 66, 27, &[8, 2, 0, 0, 3]),
        ("Toronto", 63, 72, 27, &[7, 7, 0, 0, 3]),
        ("Detroit", 49, 86, 27, &[3, 7, 3, 3, 0]),
    ])
}

/// A division with a consistent schedule and tightly bunched win totals, so that a fair share
/// of teams end up eliminated, some trivially and some only through the flow network.
pub fn random_standings(rand: &mut impl Rand, num_teams: usize) -> Standings {
    let mut schedule = Matrix::allocate(num_teams, num_teams);
    for first in 0..num_teams {
        for second in first + 1..num_teams {
            let games = (rand.next_u64() % 4) as u32;
            schedule[(first, second)] = games;
            schedule[(second, first)] = games;
        }
    }
    let teams = (0..num_teams)
        .map(|index| {
            let wins = 60 + (rand.next_u64() % 10) as u32;
            let scheduled: u32 = schedule.row_slice(index).iter().sum();
            let remaining = scheduled + (rand.next_u64() % 2) as u32;
            Team::new(format!("team{index}"), wins, 150 - wins - remaining, remaining)
        })
        .collect();
    Standings::try_new(teams, schedule).unwrap()
}

/// Decides elimination by trying every outcome of the games left among the other teams, with
/// `team` winning all of its own.
pub fn brute_force_eliminated(standings: &Standings, team: usize) -> bool {
    let fixtures: Vec<_> = standings
        .opponents(team)
        .flat_map(|first| {
            standings
                .opponents(team)
                .filter(move |&second| second > first)
                .map(move |second| (first, second))
        })
        .map(|(first, second)| (first, second, standings.games_between(first, second)))
        .filter(|&(_, _, games)| games > 0)
        .collect();
    let mut wins: Vec<_> = standings.teams().iter().map(|team| team.wins as u64).collect();
    !can_finish_first(standings, team, &fixtures, &mut wins)
}

fn can_finish_first(
    standings: &Standings,
    team: usize,
    fixtures: &[(usize, usize, u32)],
    wins: &mut [u64],
) -> bool {
    match fixtures.split_first() {
        None => {
            let ceiling = standings.team(team).max_possible_wins();
            standings.opponents(team).all(|opponent| wins[opponent] <= ceiling)
        }
        Some((&(first, second, games), rest)) => (0..=games as u64).any(|first_wins| {
            wins[first] += first_wins;
            wins[second] += games as u64 - first_wins;
            let outcome = can_finish_first(standings, team, rest, wins);
            wins[first] -= first_wins;
            wins[second] -= games as u64 - first_wins;
            outcome
        }),
    }
}

/// Asserts that the teams in `certificate` jointly finish with more wins, on average, than
/// `team` can possibly reach.
pub fn assert_certificate_eliminates(standings: &Standings, team: usize, certificate: &[usize]) {
    assert!(!certificate.is_empty(), "empty certificate for {}", standings.team(team).name);
    assert!(!certificate.contains(&team), "certificate for {} contains itself", standings.team(team).name);
    let wins: u64 = certificate.iter().map(|&member| standings.team(member).wins as u64).sum();
    let mut games = 0;
    for (position, &first) in certificate.iter().enumerate() {
        for &second in &certificate[position + 1..] {
            games += standings.games_between(first, second) as u64;
        }
    }
    let bound = certificate.len() as u64 * standings.team(team).max_possible_wins();
    assert!(
        wins + games > bound,
        "certificate {certificate:?} for {} does not hold: {wins} + {games} ≤ {bound}",
        standings.team(team).name
    );
}
