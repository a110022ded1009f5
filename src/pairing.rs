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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    UserId,
    history::History,
    king_of_the_hill::pair_king_of_the_hill,
    participant::Participant,
    round_robin::pair_round_robin,
    swiss::{SwissOptions, pair_swiss},
};

/// A partial match record: who plays whom in one round.
///
/// The caller stamps the id, tournament and status before storing it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Pairing {
    pub player1_id: UserId,
    pub player2_id: Option<UserId>,
    pub is_bye: bool,
}

impl Pairing {
    #[must_use]
    pub fn game(player1_id: &str, player2_id: &str) -> Self {
        Self {
            player1_id: player1_id.to_string(),
            player2_id: Some(player2_id.to_string()),
            is_bye: false,
        }
    }

    #[must_use]
    pub fn bye(player1_id: &str) -> Self {
        Self {
            player1_id: player1_id.to_string(),
            player2_id: None,
            is_bye: true,
        }
    }

    #[must_use]
    pub fn involves(&self, user_id: &str) -> bool {
        self.player1_id == user_id || self.player2_id.as_deref() == Some(user_id)
    }

    /// Both players of a game, `None` for a bye.
    #[must_use]
    pub fn players(&self) -> Option<(&str, &str)> {
        self.player2_id
            .as_deref()
            .map(|player2_id| (self.player1_id.as_str(), player2_id))
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.player2_id {
            Some(player2_id) => write!(f, "{} vs {player2_id}", self.player1_id),
            None => write!(f, "{} bye", self.player1_id),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PairingSystem {
    #[default]
    Swiss,
    RoundRobin,
    KingOfTheHill,
}

impl fmt::Display for PairingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swiss => write!(f, "swiss"),
            Self::RoundRobin => write!(f, "round_robin"),
            Self::KingOfTheHill => write!(f, "king_of_the_hill"),
        }
    }
}

impl FromStr for PairingSystem {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        let string = string.to_lowercase();

        match string.as_str() {
            "swiss" => Ok(Self::Swiss),
            "round_robin" | "round-robin" | "rr" => Ok(Self::RoundRobin),
            "king_of_the_hill" | "king-of-the-hill" | "koth" => Ok(Self::KingOfTheHill),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a PairingSystem!"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PairingOptions {
    #[serde(default)]
    pub swiss: SwissOptions,
}

/// Pairs the next round under `system`.
///
/// `participants` must already be limited to the active entrants. `history`
/// is only read by the Swiss system and `round` is ignored by
/// King-of-the-Hill.
#[must_use]
pub fn pair_round(
    participants: &[Participant],
    history: &History,
    round: u32,
    system: PairingSystem,
    options: &PairingOptions,
) -> Vec<Pairing> {
    match system {
        PairingSystem::Swiss => pair_swiss(participants, history, round, &options.swiss),
        PairingSystem::RoundRobin => pair_round_robin(participants, round),
        PairingSystem::KingOfTheHill => pair_king_of_the_hill(participants),
    }
}
