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

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{UserId, history::History, pairing::Pairing, participant::Participant};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidPairing {
    #[error("pairing: {0} is paired more than once")]
    Duplicate(UserId),
    #[error("pairing: {0} is not paired")]
    Missing(UserId),
    #[error("pairing: {0} is not in the field")]
    Unknown(UserId),
    #[error("pairing: {0} is paired against themselves")]
    SelfPaired(UserId),
    #[error("pairing: the bye for {0} has a second player or lacks the bye flag")]
    MalformedBye(UserId),
    #[error("pairing: expected {expected} byes but found {found}")]
    ByeCount { expected: usize, found: usize },
}

/// Checks that every participant appears in exactly one pairing and that
/// there is one bye exactly when the field is odd.
///
/// # Errors
///
/// Returns the first broken rule found.
pub fn check_round(
    participants: &[Participant],
    pairings: &[Pairing],
) -> Result<(), InvalidPairing> {
    let field: FxHashSet<&str> = participants
        .iter()
        .map(|participant| participant.user_id.as_str())
        .collect();

    let mut seen = FxHashSet::default();
    let mut byes = 0;

    for pairing in pairings {
        if pairing.is_bye != pairing.player2_id.is_none() {
            return Err(InvalidPairing::MalformedBye(pairing.player1_id.clone()));
        }

        if pairing.is_bye {
            byes += 1;
        }

        if let Some((player1_id, player2_id)) = pairing.players()
            && player1_id == player2_id
        {
            return Err(InvalidPairing::SelfPaired(player1_id.to_string()));
        }

        for user_id in std::iter::once(&pairing.player1_id).chain(pairing.player2_id.as_ref()) {
            if !field.contains(user_id.as_str()) {
                return Err(InvalidPairing::Unknown(user_id.clone()));
            }

            if !seen.insert(user_id.as_str()) {
                return Err(InvalidPairing::Duplicate(user_id.clone()));
            }
        }
    }

    if let Some(missing) = participants
        .iter()
        .find(|participant| !seen.contains(participant.user_id.as_str()))
    {
        return Err(InvalidPairing::Missing(missing.user_id.clone()));
    }

    let expected = participants.len() % 2;
    if byes != expected {
        return Err(InvalidPairing::ByeCount {
            expected,
            found: byes,
        });
    }

    Ok(())
}

/// The games in `pairings` whose players have already met.
#[must_use]
pub fn rematches<'a>(pairings: &'a [Pairing], history: &History) -> Vec<&'a Pairing> {
    pairings
        .iter()
        .filter(|pairing| {
            pairing
                .players()
                .is_some_and(|(player1_id, player2_id)| history.has_played(player1_id, player2_id))
        })
        .collect()
}
