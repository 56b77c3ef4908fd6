//! Plain-text rendering of verdicts.

use std::fmt::{Display, Formatter};

use crate::elimination::Analysis;

/// Renders a set of items as `{ a b c }`.
pub struct DisplaySubset<'a, D: Display> {
    items: &'a [D],
}
impl<'a, D: Display> Display for DisplaySubset<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for item in self.items {
            write!(f, "{item} ")?;
        }
        write!(f, "}}")
    }
}

impl<'a, D: Display> From<&'a [D]> for DisplaySubset<'a, D> {
    fn from(items: &'a [D]) -> Self {
        DisplaySubset { items }
    }
}

/// One line per team, in standings order, stating whether it is eliminated and by whom.
pub struct DisplayAnalysis<'a> {
    analysis: &'a Analysis,
}
impl<'a> Display for DisplayAnalysis<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (team, verdict) in self.analysis.iter() {
            match &verdict.certificate {
                None => writeln!(f, "{} is not eliminated", team.name)?,
                Some(certificate) => {
                    let names: Vec<_> = certificate
                        .iter()
                        .map(|&index| self.analysis.standings().team(index).name.as_str())
                        .collect();
                    writeln!(
                        f,
                        "{} is eliminated by the subset R = {}",
                        team.name,
                        DisplaySubset::from(&*names)
                    )?
                }
            }
        }
        Ok(())
    }
}

impl<'a> From<&'a Analysis> for DisplayAnalysis<'a> {
    fn from(analysis: &'a Analysis) -> Self {
        DisplayAnalysis { analysis }
    }
}
