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

//! Round robin scheduling with the circle (Berger) method.
//!
//! The first slot stays put and the others rotate one place per round, so
//! rounds `1..n` meet every pair exactly once. No history is needed.

use log::trace;

use crate::{pairing::Pairing, participant::Participant};

/// Number of rounds in one full cycle for `participants` entrants.
#[must_use]
pub fn cycle_length(participants: usize) -> usize {
    let slots = participants + participants % 2;
    slots.saturating_sub(1)
}

/// Pairs `round` (1-based) of the cycle. Rounds past the end of the cycle
/// wrap around and round 0 is treated as round 1.
///
/// With an odd number of participants a `None` slot stands in for the bye;
/// whoever meets it sits out.
#[must_use]
pub fn pair_round_robin(participants: &[Participant], round: u32) -> Vec<Pairing> {
    if participants.is_empty() {
        return Vec::new();
    }

    let mut slots: Vec<Option<&Participant>> = participants.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let len = slots.len();
    let offset = round.saturating_sub(1) as usize % (len - 1);
    slots[1..].rotate_right(offset);

    let pairings: Vec<_> = (0..len / 2)
        .filter_map(|i| match (slots[i], slots[len - 1 - i]) {
            (Some(player1), Some(player2)) => {
                Some(Pairing::game(&player1.user_id, &player2.user_id))
            }
            (Some(player), None) | (None, Some(player)) => Some(Pairing::bye(&player.user_id)),
            (None, None) => None,
        })
        .collect();

    trace!("round robin round {round}: {pairings:?}");
    pairings
}
