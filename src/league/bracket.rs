// src/league/bracket.rs
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Symbolic scoreline recorded for a walkover; the margin carries no
/// meaning beyond "the lone participant advanced".
pub const WALKOVER_SCORE: (i32, i32) = (1, 0);

/// Bracket size that gets the fixed bye block instead of sequential
/// pairing: 24 entrants → 8 byes + 8 played ties → a field of 16.
const BYE_BLOCK_FIELD: usize = 24;
const BYE_BLOCK_COUNT: usize = 8;

/// One knockout tie. `away` is `None` for a bye, which is recorded as
/// an already-finished walkover.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketPairing {
    pub home: Uuid,
    pub away: Option<Uuid>,
    /// 1-based knockout round.
    pub round: u32,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub finished: bool,
}

impl BracketPairing {
    fn scheduled(home: Uuid, away: Uuid, round: u32) -> Self {
        Self {
            home,
            away: Some(away),
            round,
            home_score: None,
            away_score: None,
            finished: false,
        }
    }

    fn walkover(home: Uuid, round: u32) -> Self {
        Self {
            home,
            away: None,
            round,
            home_score: Some(WALKOVER_SCORE.0),
            away_score: Some(WALKOVER_SCORE.1),
            finished: true,
        }
    }

    /// The advancing side of a finished tie. Byes advance their lone
    /// participant; an exact tie resolves to the home side (the system
    /// has no shootout modelling).
    pub fn winner(&self) -> Option<Uuid> {
        if !self.finished {
            return None;
        }
        let away = match self.away {
            Some(away) => away,
            None => return Some(self.home),
        };
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) if a > h => Some(away),
            (Some(_), Some(_)) => Some(self.home),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BracketError {
    #[error("at least 2 participants are required, got {0}")]
    InsufficientParticipants(usize),
    #[error("round {0} still has unfinished ties")]
    RoundIncomplete(u32),
    #[error("tournament is complete")]
    TournamentComplete,
}

/// Seed round 1 from a uniformly shuffled participant list.
pub fn seed_round_one(team_ids: &[Uuid]) -> Result<Vec<BracketPairing>, BracketError> {
    seed_round_one_with_rng(team_ids, &mut rand::thread_rng())
}

/// Seeding with an injectable RNG so tests stay deterministic.
pub fn seed_round_one_with_rng<R: Rng>(
    team_ids: &[Uuid],
    rng: &mut R,
) -> Result<Vec<BracketPairing>, BracketError> {
    if team_ids.len() < 2 {
        return Err(BracketError::InsufficientParticipants(team_ids.len()));
    }

    let mut shuffled = team_ids.to_vec();
    shuffled.shuffle(rng);

    let mut pairings = Vec::new();

    if shuffled.len() == BYE_BLOCK_FIELD {
        // The top shuffled entries take the byes; the rest play.
        let (byes, rest) = shuffled.split_at(BYE_BLOCK_COUNT);
        for team in byes {
            pairings.push(BracketPairing::walkover(*team, 1));
        }
        for pair in rest.chunks(2) {
            pairings.push(BracketPairing::scheduled(pair[0], pair[1], 1));
        }
        return Ok(pairings);
    }

    for pair in shuffled.chunks(2) {
        match pair {
            [home, away] => pairings.push(BracketPairing::scheduled(*home, *away, 1)),
            // Odd field: the trailing entrant walks over.
            [home] => pairings.push(BracketPairing::walkover(*home, 1)),
            _ => unreachable!(),
        }
    }

    Ok(pairings)
}

/// Build the next round from a completed one.
///
/// Winners are paired in round order. A single remaining winner is the
/// champion, reported as `TournamentComplete` rather than an empty
/// round; both that and `RoundIncomplete` are expected outcomes for
/// the caller, not faults.
pub fn advance_round(current: &[BracketPairing]) -> Result<Vec<BracketPairing>, BracketError> {
    let round = current.first().map(|p| p.round).unwrap_or(0);

    let mut winners = Vec::with_capacity(current.len());
    for pairing in current {
        match pairing.winner() {
            Some(winner) => winners.push(winner),
            None => return Err(BracketError::RoundIncomplete(round)),
        }
    }

    if winners.len() <= 1 {
        return Err(BracketError::TournamentComplete);
    }

    let mut next = Vec::with_capacity(winners.len() / 2 + 1);
    for pair in winners.chunks(2) {
        match pair {
            [home, away] => next.push(BracketPairing::scheduled(*home, *away, round + 1)),
            [home] => next.push(BracketPairing::walkover(*home, round + 1)),
            _ => unreachable!(),
        }
    }

    Ok(next)
}
