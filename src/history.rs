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

//! Who has already played whom.
//!
//! The graph is rebuilt from stored matches before every round and handed
//! to the pairing engine, which only reads it.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{UserId, pairing::Pairing};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct History {
    /// Symmetric: if `a` maps to `b` then `b` maps to `a`.
    pub opponents: FxHashMap<UserId, FxHashSet<UserId>>,
    /// Number of byes each player has received.
    #[serde(default)]
    pub byes: FxHashMap<UserId, u32>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from every pairing already played or scheduled.
    #[must_use]
    pub fn from_pairings<'a, I>(pairings: I) -> Self
    where
        I: IntoIterator<Item = &'a Pairing>,
    {
        let mut history = Self::new();

        for pairing in pairings {
            history.record(pairing);
        }

        history
    }

    pub fn record(&mut self, pairing: &Pairing) {
        match pairing.players() {
            Some((player1_id, player2_id)) => self.record_game(player1_id, player2_id),
            None => self.record_bye(&pairing.player1_id),
        }
    }

    pub fn record_game(&mut self, player1_id: &str, player2_id: &str) {
        self.opponents
            .entry(player1_id.to_string())
            .or_default()
            .insert(player2_id.to_string());

        self.opponents
            .entry(player2_id.to_string())
            .or_default()
            .insert(player1_id.to_string());
    }

    pub fn record_bye(&mut self, user_id: &str) {
        *self.byes.entry(user_id.to_string()).or_default() += 1;
    }

    /// A player missing from the graph has played nobody.
    #[must_use]
    pub fn has_played(&self, player1_id: &str, player2_id: &str) -> bool {
        self.opponents
            .get(player1_id)
            .is_some_and(|opponents| opponents.contains(player2_id))
    }

    #[must_use]
    pub fn bye_count(&self, user_id: &str) -> u32 {
        self.byes.get(user_id).copied().unwrap_or_default()
    }

    /// The player's past opponents, sorted.
    #[must_use]
    pub fn opponents_of(&self, user_id: &str) -> Vec<&str> {
        let mut opponents: Vec<_> = self
            .opponents
            .get(user_id)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();

        opponents.sort_unstable();
        opponents
    }
}
