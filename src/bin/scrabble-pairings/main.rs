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

mod command_line;

use std::{fs, path::Path};

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};
use scrabble_pairings::{
    pairing::{Pairing, PairingSystem},
    swiss::{ByePolicy, pair_swiss_with},
    tournament::Tournament,
    utils,
    validate::{check_round, rematches},
};

use crate::command_line::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.man {
        return Args::generate_man_page();
    }

    utils::init_logger(args.debug, args.systemd);

    let Some(path) = &args.snapshot else {
        return Err(anyhow::Error::msg("a tournament snapshot is required"));
    };

    let mut tournament = load_tournament(path)?;
    apply_overrides(&mut tournament, &args);

    let round = args.round.unwrap_or(tournament.current_round + 1);
    info!(
        "{}: pairing round {round} with {}",
        tournament.name, tournament.system
    );

    let pairings = pair(&tournament, round);

    if args.check {
        check(&tournament, &pairings)?;
    }

    if args.ron {
        let pretty = ron::ser::PrettyConfig::default();
        println!("{}", ron::ser::to_string_pretty(&pairings, pretty)?);
    } else {
        for pairing in &pairings {
            println!("{pairing}");
        }
    }

    Ok(())
}

fn load_tournament(path: &Path) -> anyhow::Result<Tournament> {
    let snapshot =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let tournament: Tournament =
        ron::from_str(&snapshot).with_context(|| format!("parsing {}", path.display()))?;

    debug!(
        "{}: {} participants, {} matches, round {}, {}",
        tournament.name,
        tournament.participants.len(),
        tournament.matches.len(),
        tournament.current_round,
        tournament.status
    );

    Ok(tournament)
}

fn apply_overrides(tournament: &mut Tournament, args: &Args) {
    if let Some(system) = args.system {
        tournament.system = system;
    }

    if args.fewest_byes {
        tournament.options.swiss.bye_policy = ByePolicy::FewestByes;
    }

    if args.budget_ms.is_some() {
        tournament.options.swiss.search_budget_ms = args.budget_ms;
    }
}

fn pair(tournament: &Tournament, round: u32) -> Vec<Pairing> {
    if tournament.system != PairingSystem::Swiss {
        return tournament.preview_round(round);
    }

    let outcome = pair_swiss_with(
        &tournament.active_participants(),
        &tournament.history(),
        round,
        &tournament.options.swiss,
    );

    if let Some(fallback) = outcome.fallback {
        warn!(
            "round {round}: rematch-free search {fallback}, {} rematches",
            outcome.rematches.len()
        );
    }

    outcome.pairings
}

fn check(tournament: &Tournament, pairings: &[Pairing]) -> anyhow::Result<()> {
    check_round(&tournament.active_participants(), pairings)?;

    let history = tournament.history();
    for rematch in rematches(pairings, &history) {
        println!("# rematch: {rematch}");
    }

    Ok(())
}
