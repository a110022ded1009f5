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

use std::{io::Write as _, path::PathBuf};

use clap::{CommandFactory, Parser};
use scrabble_pairings::{COPYRIGHT, LONG_VERSION, pairing::PairingSystem};

/// Scrabble Tournament Pairings
///
/// Reads a tournament snapshot written in RON and prints the pairings for
/// the next round. The snapshot is never modified.
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Scrabble Tournament Pairings")]
pub(crate) struct Args {
    /// The tournament snapshot to pair
    #[arg(required_unless_present = "man", value_name = "snapshot.ron")]
    pub snapshot: Option<PathBuf>,

    /// Pair with this system instead of the snapshot's:
    /// swiss, round_robin or king_of_the_hill
    #[arg(long)]
    pub system: Option<PairingSystem>,

    /// Pair this round instead of the one after the snapshot's current round
    #[arg(long)]
    pub round: Option<u32>,

    /// Give the Swiss bye to the lowest ranked player with the fewest byes
    #[arg(long)]
    pub fewest_byes: bool,

    /// Stop the Swiss rematch search after this many milliseconds
    #[arg(long, value_name = "milliseconds")]
    pub budget_ms: Option<u64>,

    /// Print the pairings as RON
    #[arg(long)]
    pub ron: bool,

    /// Check the round and list any rematches
    #[arg(long)]
    pub check: bool,

    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    pub systemd: bool,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,
}

impl Args {
    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command()
            .name("scrabble-pairings")
            .long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-15");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("scrabble-pairings.1", buffer)?;
        Ok(())
    }
}
