//! Round pairings for Scrabble tournaments.
//!
//! Given the active participants, the games they have already played and
//! the round number, [`pairing::pair_round`] produces the next round under
//! one of three systems:
//!
//! * Swiss - players with similar records meet, never twice if it can be
//!   helped ([`swiss`])
//! * Round Robin - everyone meets everyone once per cycle ([`round_robin`])
//! * King of the Hill - first plays second, third plays fourth
//!   ([`king_of_the_hill`])
//!
//! An odd field gives one player a bye. The engine does no I/O and keeps no
//! state between calls, the same input always gives the same pairings.
//! [`tournament::Tournament`] wraps it with registration, the round counter
//! and match records for callers that want that kept in memory.

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

#![deny(clippy::panic)]

pub mod history;
pub mod king_of_the_hill;
pub mod pairing;
pub mod participant;
pub mod round_robin;
pub mod standings;
pub mod swiss;
pub mod tournament;
pub mod utils;
pub mod validate;

pub type Id = u128;
pub type UserId = String;

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Scrabble Pairings Developers

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Scrabble Pairings Developers
Licensed under the AGPLv3"
);
