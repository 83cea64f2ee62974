//! Regression-case format: frozen situations with the outcome we expect
//! after the agent's turn.
//!
//! Cases keep old fixed decisions pinned down so tuning work cannot silently
//! regress them. The JSON shape mirrors the reproducer corpus: a case may
//! expect a discard shortlist, a meld/no-meld choice, or just the absence of
//! a crash. Mismatches surface as verdicts, never as panics.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::decision::DiscardDecision;
use crate::tile::{parse_tile_name, tile136_to_type, TileSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseAction {
    Discard,
    Meld,
    Crash,
}

/// One recorded situation and its expected outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionCase {
    pub index: u32,
    #[serde(default)]
    pub description: String,
    /// Command line that reproduces the situation from a recorded log.
    /// Carried for operators; not interpreted here.
    #[serde(default)]
    pub reproducer_command: Option<String>,
    pub action: CaseAction,
    /// Tile names the agent is allowed to discard (discard cases).
    #[serde(default)]
    pub allowed_discards: Vec<String>,
    /// Whether the discard is expected to come with a riichi declaration.
    #[serde(default)]
    pub with_riichi: Option<bool>,
    /// Expected meld for meld cases; `None` means "do not open the hand."
    #[serde(default)]
    pub meld: Option<serde_json::Value>,
    #[serde(default)]
    pub tile_after_meld: Option<String>,
    /// Known-unresolved cases stay in the corpus but are not enforced.
    #[serde(default)]
    pub skip_reason: Option<String>,
}

/// Outcome of replaying one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseVerdict {
    Passed,
    Skipped { reason: String },
    /// The case's action kind is decided outside this engine.
    NotApplicable,
    Failed { message: String },
}

impl CaseVerdict {
    pub fn is_failure(&self) -> bool {
        matches!(self, CaseVerdict::Failed { .. })
    }
}

/// Parse a corpus from JSON.
pub fn load_cases(json: &str) -> Result<Vec<RegressionCase>> {
    serde_json::from_str(json).context("invalid regression corpus")
}

impl RegressionCase {
    /// The allowed-discard list as a kind set.
    pub fn allowed_tiles(&self) -> Result<TileSet> {
        let mut set = TileSet::empty();
        for name in &self.allowed_discards {
            let Some(tile) = parse_tile_name(name) else {
                bail!("case {}: unknown tile name '{name}'", self.index);
            };
            set.insert(tile);
        }
        Ok(set)
    }

    /// Check a replayed discard decision against this case.
    ///
    /// Every shortlisted tile must be on the allowed list; the outer policy
    /// may pick any of them, so an off-list entry is already a regression.
    pub fn check_discard(&self, decision: &DiscardDecision) -> CaseVerdict {
        if let Some(reason) = &self.skip_reason {
            return CaseVerdict::Skipped {
                reason: reason.clone(),
            };
        }
        match self.action {
            CaseAction::Meld => return CaseVerdict::NotApplicable,
            // A crash case passes by producing any decision at all.
            CaseAction::Crash => return CaseVerdict::Passed,
            CaseAction::Discard => {}
        }

        let allowed = match self.allowed_tiles() {
            Ok(set) => set,
            Err(err) => {
                return CaseVerdict::Failed {
                    message: format!("{err:#}"),
                }
            }
        };

        for ranked in &decision.shortlist {
            let tile = tile136_to_type(ranked.tile136);
            if !allowed.contains(tile) {
                return CaseVerdict::Failed {
                    message: format!(
                        "case {}: shortlist contains {tile}, allowed {:?}",
                        self.index, self.allowed_discards
                    ),
                };
            }
        }
        CaseVerdict::Passed
    }
}
