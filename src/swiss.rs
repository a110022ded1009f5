// This file is part of scrabble-pairings.
//
// scrabble-pairings is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// scrabble-pairings is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Swiss pairing: rank the field, then search depth first for a pairing in
//! which nobody meets a previous opponent.
//!
//! The search always tries the highest ranked unpaired player first and
//! gives them the highest ranked opponent they have not played, so when a
//! rematch-free pairing exists the one returned keeps players close to
//! their own standing. When none exists the field is paired by rank and
//! the rematches are reported.

use std::{
    fmt,
    time::{Duration, Instant},
};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    history::History, king_of_the_hill::pair_adjacent, pairing::Pairing,
    participant::Participant, standings, validate,
};

/// How often the search looks at the clock when it has a budget.
const DEADLINE_CHECK_INTERVAL: u64 = 1_024;

/// Who sits out when the field is odd.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ByePolicy {
    /// The lowest ranked player, regardless of earlier byes.
    #[default]
    LowestRanked,
    /// The lowest ranked player among those with the fewest byes so far.
    FewestByes,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SwissOptions {
    #[serde(default)]
    pub bye_policy: ByePolicy,
    /// Give up on the rematch-free search after this many milliseconds and
    /// pair by rank instead.
    #[serde(default)]
    pub search_budget_ms: Option<u64>,
}

/// Why the rematch-free search was abandoned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fallback {
    /// Every branch was tried and each one needed a rematch.
    Exhausted,
    /// The search ran past `search_budget_ms`.
    OutOfTime,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::OutOfTime => write!(f, "out_of_time"),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SwissOutcome {
    pub pairings: Vec<Pairing>,
    /// `None` when the search found a rematch-free pairing.
    pub fallback: Option<Fallback>,
    pub rematches: Vec<Pairing>,
}

/// Pairs a Swiss round. See [`pair_swiss_with`] for the diagnostics.
#[must_use]
pub fn pair_swiss(
    participants: &[Participant],
    history: &History,
    round: u32,
    options: &SwissOptions,
) -> Vec<Pairing> {
    pair_swiss_with(participants, history, round, options).pairings
}

/// Pairs a Swiss round and reports whether the rank fallback was needed.
///
/// The bye, if any, is always the last pairing.
#[must_use]
pub fn pair_swiss_with(
    participants: &[Participant],
    history: &History,
    round: u32,
    options: &SwissOptions,
) -> SwissOutcome {
    let mut ranked = standings::ranked(participants);

    let bye = if ranked.len() % 2 == 1 {
        let index = bye_index(&ranked, history, options.bye_policy);
        Some(ranked.remove(index))
    } else {
        None
    };

    let deadline = options
        .search_budget_ms
        .map(|milliseconds| Instant::now() + Duration::from_millis(milliseconds));

    let (mut pairings, fallback) = match search(&ranked, history, deadline) {
        Search::Complete(pairs) => {
            let pairings: Vec<_> = pairs
                .into_iter()
                .map(|(i, j)| Pairing::game(&ranked[i].user_id, &ranked[j].user_id))
                .collect();

            (pairings, None)
        }
        Search::Exhausted => {
            warn!("swiss round {round}: every pairing repeats a game, pairing by rank");
            (pair_adjacent(&ranked), Some(Fallback::Exhausted))
        }
        Search::OutOfTime => {
            warn!("swiss round {round}: search ran out of time, pairing by rank");
            (pair_adjacent(&ranked), Some(Fallback::OutOfTime))
        }
    };

    let rematches: Vec<_> = validate::rematches(&pairings, history)
        .into_iter()
        .cloned()
        .collect();

    for rematch in &rematches {
        debug!("swiss round {round}: rematch {rematch}");
    }

    if let Some(bye) = bye {
        pairings.push(Pairing::bye(&bye.user_id));
    }

    trace!("swiss round {round}: {pairings:?}");

    SwissOutcome {
        pairings,
        fallback,
        rematches,
    }
}

#[must_use]
fn bye_index(ranked: &[&Participant], history: &History, policy: ByePolicy) -> usize {
    let last = ranked.len().saturating_sub(1);

    match policy {
        ByePolicy::LowestRanked => last,
        // Walking up from the bottom, the first minimum is the lowest ranked.
        ByePolicy::FewestByes => (0..ranked.len())
            .rev()
            .min_by_key(|&i| history.bye_count(&ranked[i].user_id))
            .unwrap_or(last),
    }
}

enum Search {
    Complete(Vec<(usize, usize)>),
    Exhausted,
    OutOfTime,
}

#[must_use]
fn first_unused(used: &[bool], from: usize) -> Option<usize> {
    (from..used.len()).find(|&i| !used[i])
}

/// Depth first search over an explicit stack of `(player, opponent)`
/// indices into `ranked`.
///
/// The anchor is always the first unused player. On a dead end the last
/// pair is popped and its anchor retries from the next opponent.
fn search(ranked: &[&Participant], history: &History, deadline: Option<Instant>) -> Search {
    let len = ranked.len();
    let mut used = vec![false; len];
    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(len / 2);

    let mut anchor = first_unused(&used, 0);
    let mut candidate = anchor.map_or(0, |anchor| anchor + 1);
    let mut steps: u64 = 0;
    let mut backtracks: u64 = 0;

    loop {
        let Some(i) = anchor else {
            debug!("swiss search: {steps} steps, {backtracks} backtracks");
            return Search::Complete(stack);
        };

        steps += 1;
        if let Some(deadline) = deadline
            && steps.is_multiple_of(DEADLINE_CHECK_INTERVAL)
            && Instant::now() >= deadline
        {
            debug!("swiss search: out of time after {steps} steps, {backtracks} backtracks");
            return Search::OutOfTime;
        }

        let opponent = (candidate..len).find(|&j| {
            !used[j] && !history.has_played(&ranked[i].user_id, &ranked[j].user_id)
        });

        if let Some(j) = opponent {
            used[i] = true;
            used[j] = true;
            stack.push((i, j));

            anchor = first_unused(&used, i + 1);
            candidate = anchor.map_or(0, |anchor| anchor + 1);
        } else {
            let Some((i, j)) = stack.pop() else {
                debug!("swiss search: exhausted after {steps} steps, {backtracks} backtracks");
                return Search::Exhausted;
            };

            backtracks += 1;
            used[i] = false;
            used[j] = false;

            anchor = Some(i);
            candidate = j + 1;
        }
    }
}
