use std::cmp::Ordering;

use crate::participant::Participant;

/// Orders by wins, then spread, both descending.
#[must_use]
pub fn compare(a: &Participant, b: &Participant) -> Ordering {
    b.wins
        .total_cmp(&a.wins)
        .then_with(|| b.spread.cmp(&a.spread))
}

/// Ranks the participants best first.
///
/// The sort is stable, so participants tied on both wins and spread keep
/// their input order.
#[must_use]
pub fn ranked(participants: &[Participant]) -> Vec<&Participant> {
    let mut ranked: Vec<_> = participants.iter().collect();
    ranked.sort_by(|a, b| compare(a, b));
    ranked
}
