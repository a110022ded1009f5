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

use crate::UserId;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ParticipantStatus {
    #[default]
    Active,
    Withdrawn,
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Withdrawn => write!(f, "withdrawn"),
        }
    }
}

impl FromStr for ParticipantStatus {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string {
            "active" => Ok(Self::Active),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a ParticipantStatus!"
            ))),
        }
    }
}

/// One tournament entrant.
///
/// `id` names the registration record, `user_id` the player behind it. A
/// player added by hand without an account gets a synthetic `user_id`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Participant {
    pub id: String,
    pub user_id: UserId,
    /// Ties count as half a win.
    #[serde(default)]
    pub wins: f64,
    #[serde(default)]
    pub spread: i64,
    #[serde(default)]
    pub status: ParticipantStatus,
}

impl Participant {
    #[must_use]
    pub fn new(id: &str, user_id: &str) -> Self {
        Self {
            id: id.to_string(),
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_record(mut self, wins: f64, spread: i64) -> Self {
        self.wins = wins;
        self.spread = spread;
        self
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ParticipantStatus::Active
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:+} {}",
            self.user_id, self.wins, self.spread, self.status
        )
    }
}
