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

use crate::{pairing::Pairing, participant::Participant, standings};

/// Pairs first against second, third against fourth and so on. The lowest
/// ranked player sits out when the count is odd. Rematches are allowed.
#[must_use]
pub fn pair_king_of_the_hill(participants: &[Participant]) -> Vec<Pairing> {
    pair_adjacent(&standings::ranked(participants))
}

/// Pairs an already ordered pool two at a time, a trailing singleton gets
/// the bye.
#[must_use]
pub(crate) fn pair_adjacent(ranked: &[&Participant]) -> Vec<Pairing> {
    ranked
        .chunks(2)
        .map(|chunk| match chunk {
            [player1, player2] => Pairing::game(&player1.user_id, &player2.user_id),
            [player] => Pairing::bye(&player.user_id),
            _ => unreachable!("chunks(2) yields one or two players"),
        })
        .collect()
}
