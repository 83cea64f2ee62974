//! Decision adapter: turns aggregated danger into a push/fold shortlist.
//!
//! This layer only draws the safety boundary. Picking the final tile among
//! admissible candidates is the outer hand-value policy's job.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::danger::CandidateDanger;
use crate::profile::{RiskProfile, ShantenBucket};

/// How the decision cycle resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// At least one candidate sits within the border: keep pushing.
    Push,
    /// Every candidate exceeds the border. A legal discard is still owed, so
    /// the shortlist holds the single least-dangerous tile.
    FoldUnavoidable,
}

/// One shortlisted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedDiscard {
    pub tile136: u8,
    pub score: i32,
}

/// Result of one decision cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DiscardDecision {
    pub outcome: DecisionOutcome,
    /// Most-safe first. Under `Push` these are all admissible candidates;
    /// under `FoldUnavoidable` it is the forced fallback alone.
    pub shortlist: Vec<RankedDiscard>,
    /// The border the candidates were compared against.
    pub border: i32,
}

impl DiscardDecision {
    pub fn shortlist_tiles(&self) -> Vec<u8> {
        self.shortlist.iter().map(|r| r.tile136).collect()
    }
}

/// Classify candidates against the profile's border for the current bucket.
///
/// Candidates at the same score keep their input order, so the outer policy
/// receives a deterministic list. An empty candidate list is a caller bug:
/// the agent always has at least one tile to discard.
pub fn choose_discard(
    candidates: &[CandidateDanger],
    profile: &RiskProfile,
    bucket: ShantenBucket,
) -> Result<DiscardDecision> {
    if candidates.is_empty() {
        bail!("no candidate discards supplied");
    }

    let border = profile.border_for(bucket);

    let mut admissible: Vec<RankedDiscard> = candidates
        .iter()
        .filter(|c| c.overall <= border)
        .map(|c| RankedDiscard {
            tile136: c.tile136,
            score: c.overall,
        })
        .collect();
    admissible.sort_by_key(|r| r.score);

    if !admissible.is_empty() {
        return Ok(DiscardDecision {
            outcome: DecisionOutcome::Push,
            shortlist: admissible,
            border,
        });
    }

    // Nothing fits under the border: surrender the least-dangerous tile.
    let fallback = candidates
        .iter()
        .min_by_key(|c| c.overall)
        .map(|c| RankedDiscard {
            tile136: c.tile136,
            score: c.overall,
        })
        .expect("candidates checked non-empty above");

    Ok(DiscardDecision {
        outcome: DecisionOutcome::FoldUnavoidable,
        shortlist: vec![fallback],
        border,
    })
}
