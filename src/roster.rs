//! Roster partitioning: White, Black and Substitutes from arrival order.
//!
//! DESIGN
//! ======
//! The main roster is the first [`MAX_TOTAL`] active registrations. Inside it
//! each team keeps its first [`MAX_PER_TEAM`] tagged players. Everything else
//! is a substitute, ordered as white overflow, black overflow, main rows
//! tagged `sub`, then rows past the main roster. Input order is trusted; the
//! store returns rows sorted by `created_at` ascending.

use crate::registration::{Registration, Team};

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

/// Seats per team.
pub const MAX_PER_TEAM: usize = 6;
/// Size of the main roster.
pub const MAX_TOTAL: usize = 12;

/// A partitioned roster snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    pub white: Vec<Registration>,
    pub black: Vec<Registration>,
    pub subs: Vec<Registration>,
}

/// Seated player counts per team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeamCounts {
    pub white: usize,
    pub black: usize,
    pub total: usize,
}

impl Roster {
    #[must_use]
    pub fn counts(&self) -> TeamCounts {
        TeamCounts {
            white: self.white.len(),
            black: self.black.len(),
            total: self.white.len() + self.black.len(),
        }
    }

    /// Whether `team` still has an open seat. `Team::Sub` never does.
    #[must_use]
    pub fn has_open_seat(&self, team: Team) -> bool {
        match team {
            Team::White => self.white.len() < MAX_PER_TEAM,
            Team::Black => self.black.len() < MAX_PER_TEAM,
            Team::Sub => false,
        }
    }
}

/// Partition `rows` (sorted by arrival) into teams and substitutes.
#[must_use]
pub fn partition(rows: &[Registration]) -> Roster {
    let split = rows.len().min(MAX_TOTAL);
    let (main, rest) = rows.split_at(split);

    let (white, white_overflow) = take_team(main, Team::White);
    let (black, black_overflow) = take_team(main, Team::Black);
    let tagged_sub = main.iter().filter(|r| r.team == Team::Sub).cloned();

    let subs = white_overflow
        .into_iter()
        .chain(black_overflow)
        .chain(tagged_sub)
        .chain(rest.iter().cloned())
        .collect();

    Roster { white, black, subs }
}

fn take_team(main: &[Registration], team: Team) -> (Vec<Registration>, Vec<Registration>) {
    let mut tagged: Vec<Registration> = main.iter().filter(|r| r.team == team).cloned().collect();
    let overflow = tagged.split_off(tagged.len().min(MAX_PER_TEAM));
    (tagged, overflow)
}
