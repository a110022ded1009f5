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

//! An in-memory tournament that turns pairings into match records.
//!
//! A tournament moves from `Setup` to `Active` to `Completed`. While active
//! each call to [`Tournament::next_round`] pairs the active participants
//! against the history of every stored match and appends the new round.
//! Results are reported elsewhere; this only tracks match status.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Id, UserId,
    history::History,
    pairing::{Pairing, PairingOptions, PairingSystem, pair_round},
    participant::{Participant, ParticipantStatus},
    validate::{InvalidPairing, check_round},
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum TournamentStatus {
    #[default]
    Setup,
    Active,
    Completed,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum MatchStatus {
    #[default]
    Pending,
    Live,
    Finished,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Live => write!(f, "live"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Match {
    pub id: Id,
    pub round_number: u32,
    pub player1_id: UserId,
    pub player2_id: Option<UserId>,
    pub is_bye: bool,
    #[serde(default)]
    pub status: MatchStatus,
}

impl Match {
    #[must_use]
    pub fn pairing(&self) -> Pairing {
        Pairing {
            player1_id: self.player1_id.clone(),
            player2_id: self.player2_id.clone(),
            is_bye: self.is_bye,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id,
            self.round_number,
            self.pairing(),
            self.status
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TournamentError {
    #[error("tournament: {0} is already registered")]
    AlreadyRegistered(UserId),
    #[error("tournament: the tournament has to be {expected}, but it is {found}")]
    Status {
        expected: TournamentStatus,
        found: TournamentStatus,
    },
    #[error("tournament: there are no active participants")]
    NoActiveParticipants,
    #[error("tournament: round {0} still has unfinished matches")]
    RoundInProgress(u32),
    #[error("tournament: {0} is not registered")]
    UnknownParticipant(UserId),
    #[error("tournament: there is no match {0}")]
    UnknownMatch(Id),
    #[error("tournament: match {id} can't go from {from} to {to}")]
    MatchTransition {
        id: Id,
        from: MatchStatus,
        to: MatchStatus,
    },
    #[error(transparent)]
    InvalidPairing(#[from] InvalidPairing),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Tournament {
    pub name: String,
    #[serde(default)]
    pub system: PairingSystem,
    #[serde(default)]
    pub options: PairingOptions,
    #[serde(default)]
    pub status: TournamentStatus,
    /// Zero until the first round is paired.
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub next_match_id: Id,
}

impl Tournament {
    #[must_use]
    pub fn new(name: &str, system: PairingSystem) -> Self {
        Self {
            name: name.to_string(),
            system,
            ..Default::default()
        }
    }

    /// # Errors
    ///
    /// If the tournament is over or the player is already registered.
    pub fn register(&mut self, participant: Participant) -> Result<(), TournamentError> {
        if self.status == TournamentStatus::Completed {
            return Err(TournamentError::Status {
                expected: TournamentStatus::Active,
                found: self.status,
            });
        }

        if self
            .participants
            .iter()
            .any(|registered| registered.user_id == participant.user_id)
        {
            return Err(TournamentError::AlreadyRegistered(participant.user_id));
        }

        debug!("{}: registered {}", self.name, participant.user_id);
        self.participants.push(participant);
        Ok(())
    }

    /// Withdrawn participants stay on the roster but are no longer paired.
    ///
    /// # Errors
    ///
    /// If the player isn't registered.
    pub fn withdraw(&mut self, user_id: &str) -> Result<(), TournamentError> {
        let Some(participant) = self
            .participants
            .iter_mut()
            .find(|participant| participant.user_id == user_id)
        else {
            return Err(TournamentError::UnknownParticipant(user_id.to_string()));
        };

        participant.status = ParticipantStatus::Withdrawn;
        info!("{}: {user_id} withdrew", self.name);
        Ok(())
    }

    #[must_use]
    pub fn active_participants(&self) -> Vec<Participant> {
        self.participants
            .iter()
            .filter(|participant| participant.is_active())
            .cloned()
            .collect()
    }

    /// The history of every stored match, byes included.
    #[must_use]
    pub fn history(&self) -> History {
        let mut history = History::new();

        for a_match in &self.matches {
            history.record(&a_match.pairing());
        }

        history
    }

    /// Pairs `round` without storing anything or checking the status.
    #[must_use]
    pub fn preview_round(&self, round: u32) -> Vec<Pairing> {
        pair_round(
            &self.active_participants(),
            &self.history(),
            round,
            self.system,
            &self.options,
        )
    }

    pub fn round_matches(&self, round: u32) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |a_match| a_match.round_number == round)
    }

    /// # Errors
    ///
    /// If the tournament isn't in setup or nobody active is registered.
    pub fn start(&mut self) -> Result<(), TournamentError> {
        self.expect_status(TournamentStatus::Setup)?;

        if !self.participants.iter().any(Participant::is_active) {
            return Err(TournamentError::NoActiveParticipants);
        }

        self.status = TournamentStatus::Active;
        info!(
            "{}: started with {} participants, {}",
            self.name,
            self.participants.len(),
            self.system
        );
        Ok(())
    }

    /// Pairs and stores the next round and returns its matches.
    ///
    /// # Errors
    ///
    /// If the tournament isn't active, the current round has unfinished
    /// matches, or the pairing fails its checks.
    pub fn next_round(&mut self) -> Result<&[Match], TournamentError> {
        self.expect_status(TournamentStatus::Active)?;

        if self
            .round_matches(self.current_round)
            .any(|a_match| a_match.status != MatchStatus::Finished)
        {
            return Err(TournamentError::RoundInProgress(self.current_round));
        }

        let round = self.current_round + 1;
        let participants = self.active_participants();
        let pairings = pair_round(
            &participants,
            &self.history(),
            round,
            self.system,
            &self.options,
        );
        check_round(&participants, &pairings)?;

        let first = self.matches.len();
        for pairing in pairings {
            self.matches.push(Match {
                id: self.next_match_id,
                round_number: round,
                player1_id: pairing.player1_id,
                player2_id: pairing.player2_id,
                is_bye: pairing.is_bye,
                status: MatchStatus::Pending,
            });
            self.next_match_id += 1;
        }

        self.current_round = round;
        info!(
            "{}: paired round {round}, {} matches",
            self.name,
            self.matches.len() - first
        );

        Ok(&self.matches[first..])
    }

    /// Moves a match along `Pending`, `Live`, `Finished`. A bye has nobody
    /// to play, so it may go straight from `Pending` to `Finished`.
    ///
    /// # Errors
    ///
    /// If the match doesn't exist or the move isn't allowed.
    pub fn set_match_status(&mut self, id: Id, status: MatchStatus) -> Result<(), TournamentError> {
        let Some(a_match) = self.matches.iter_mut().find(|a_match| a_match.id == id) else {
            return Err(TournamentError::UnknownMatch(id));
        };

        let allowed = matches!(
            (a_match.status, status),
            (MatchStatus::Pending, MatchStatus::Live) | (MatchStatus::Live, MatchStatus::Finished)
        ) || (a_match.is_bye
            && a_match.status == MatchStatus::Pending
            && status == MatchStatus::Finished);

        if !allowed {
            return Err(TournamentError::MatchTransition {
                id,
                from: a_match.status,
                to: status,
            });
        }

        a_match.status = status;
        Ok(())
    }

    /// # Errors
    ///
    /// If the tournament isn't active.
    pub fn complete(&mut self) -> Result<(), TournamentError> {
        self.expect_status(TournamentStatus::Active)?;
        self.status = TournamentStatus::Completed;
        info!("{}: completed after {} rounds", self.name, self.current_round);
        Ok(())
    }

    fn expect_status(&self, expected: TournamentStatus) -> Result<(), TournamentError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TournamentError::Status {
                expected,
                found: self.status,
            })
        }
    }
}
