//! Determines which teams in a division can no longer finish first (or tied for first), given
//! each team's record and the schedule of games left between them. Every elimination comes
//! with a certificate: a subset of rival teams that, between them, are guaranteed more wins
//! than the eliminated team can reach.

pub mod display;
pub mod elimination;
pub mod file;
pub mod linear;
pub mod maxflow;
pub mod network;
pub mod print;
pub mod standings;
pub mod trivial;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
