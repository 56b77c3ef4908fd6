use serde::Serialize;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};

use crate::elimination::{Analysis, Cause};

pub fn tabulate(analysis: &Analysis) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12))),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(5))
                    .with(HAlign::Right),
            ),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8))),
            Col::new(Styles::default().with(MinWidth(20))),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Team".into(),
                "W".into(),
                "L".into(),
                "R".into(),
                "Max".into(),
                "Eliminated".into(),
                "Cause".into(),
                "Certificate".into(),
            ],
        ));

    for (team, verdict) in analysis.iter() {
        let certificate = verdict
            .certificate
            .as_ref()
            .map(|certificate| {
                certificate
                    .iter()
                    .map(|&index| analysis.standings().team(index).name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        let cause = match verdict.cause {
            Cause::NoOpponents => "-".to_string(),
            Cause::Trivial => "trivial".to_string(),
            Cause::Flow { max_flow, games } => format!("{max_flow}/{games}"),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team.name.clone().into(),
                format!("{}", team.wins).into(),
                format!("{}", team.losses).into(),
                format!("{}", team.remaining).into(),
                format!("{}", team.max_possible_wins()).into(),
                Cell::new(
                    Styles::default().with(HAlign::Centred),
                    if verdict.is_eliminated() { "yes" } else { "no" }
                        .to_string()
                        .into(),
                ),
                cause.into(),
                certificate.into(),
            ],
        ));
    }

    table
}

/// The JSON view of a team and its verdict.
#[derive(Debug, Serialize)]
pub struct TeamReport<'a> {
    pub team: &'a str,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
    pub eliminated: bool,
    pub certificate: Option<Vec<&'a str>>,
    pub cause: &'a Cause,
}

pub fn report(analysis: &Analysis) -> Vec<TeamReport> {
    analysis
        .iter()
        .map(|(team, verdict)| TeamReport {
            team: &team.name,
            wins: team.wins,
            losses: team.losses,
            remaining: team.remaining,
            eliminated: verdict.is_eliminated(),
            certificate: verdict.certificate.as_ref().map(|certificate| {
                certificate
                    .iter()
                    .map(|&index| analysis.standings().team(index).name.as_str())
                    .collect()
            }),
            cause: &verdict.cause,
        })
        .collect()
}
