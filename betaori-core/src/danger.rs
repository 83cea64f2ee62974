//! Tile-danger scoring: base statistical danger merged with per-analyzer
//! signals into one explainable score per tile per opponent.

use rayon::prelude::*;
use serde::Serialize;

use crate::analyzer::{AnalyzerSnapshot, ChinitsuAnalyzer, HonitsuAnalyzer, ShapeAnalyzer};
use crate::safety::SafetyGrid;
use crate::table::{OpponentView, TableView};
use crate::tile::{tile136_to_type, TileType};

// ---------------------------------------------------------------------------
// Signal weights
// ---------------------------------------------------------------------------

/// Weight of a middle suited tile (4-6): waitable by the most shapes.
pub const SUITED_MIDDLE: i32 = 4;
/// Weight of a 2/3/7/8 suited tile.
pub const SUITED_NEAR_TERMINAL: i32 = 3;
/// Weight of a terminal (1/9).
pub const SUITED_TERMINAL: i32 = 2;
/// Discount for a suji kind (1-4-7 neighbor of genbutsu).
pub const SUJI_DISCOUNT: i32 = -2;
/// Discount when only one copy of the kind is unseen.
pub const ONE_CHANCE_DISCOUNT: i32 = -1;
/// Discount when all four copies are visible (no tanki/shanpon possible).
pub const WALL_BLOCK_DISCOUNT: i32 = -2;
/// Bonus on a mostly-live honor while a half flush is suspected.
pub const HONITSU_EARLY_HONOR_BONUS: i32 = 1;
/// Bonus on the last unseen copy of an honor: a late single honor in a half
/// flush is very often the wait.
pub const HONITSU_THIRD_HONOR_BONUS: i32 = 3;
/// Default discount when an active analyzer votes a kind safe.
pub const SAFE_VOTE_DISCOUNT: i32 = 2;

// ---------------------------------------------------------------------------
// Danger signals
// ---------------------------------------------------------------------------

/// Why a tile is (or is not) dangerous. Each variant is one reason kind;
/// the numeric contribution travels with the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Opponent themself discarded this kind: provably safe.
    Genbutsu,
    /// No outstanding copies of this kind among the 34.
    DeadTile,
    /// Honor with live copies the opponent could pair or wait on.
    LiveHonor,
    /// Suited-tile wait exposure by position in the suit.
    SuitedShape,
    Suji,
    OneChance,
    WallBlock,
    /// An active analyzer listed the kind in its safe-tile set.
    ShapeSafe,
    HonitsuEarlyHonor,
    HonitsuThirdHonor,
}

/// A tagged reason attached to a tile for a given opponent. Immutable once
/// produced for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DangerSignal {
    pub kind: SignalKind,
    pub value: i32,
    /// Analyzer that produced the signal, if any.
    pub source: Option<&'static str>,
}

impl DangerSignal {
    const fn base(kind: SignalKind, value: i32) -> Self {
        Self {
            kind,
            value,
            source: None,
        }
    }

    pub const fn genbutsu() -> Self {
        Self::base(SignalKind::Genbutsu, 0)
    }

    pub const fn dead_tile() -> Self {
        Self::base(SignalKind::DeadTile, 0)
    }

    pub const fn live_honor(live_copies: u8) -> Self {
        Self::base(SignalKind::LiveHonor, live_copies as i32)
    }

    pub const fn suited_shape(value: i32) -> Self {
        Self::base(SignalKind::SuitedShape, value)
    }

    pub const fn suji() -> Self {
        Self::base(SignalKind::Suji, SUJI_DISCOUNT)
    }

    pub const fn one_chance() -> Self {
        Self::base(SignalKind::OneChance, ONE_CHANCE_DISCOUNT)
    }

    pub const fn wall_block() -> Self {
        Self::base(SignalKind::WallBlock, WALL_BLOCK_DISCOUNT)
    }

    pub const fn shape_safe(source: &'static str, value: i32) -> Self {
        Self {
            kind: SignalKind::ShapeSafe,
            value,
            source: Some(source),
        }
    }

    pub const fn honitsu_early_honor(source: &'static str) -> Self {
        Self {
            kind: SignalKind::HonitsuEarlyHonor,
            value: HONITSU_EARLY_HONOR_BONUS,
            source: Some(source),
        }
    }

    pub const fn honitsu_third_honor(source: &'static str) -> Self {
        Self {
            kind: SignalKind::HonitsuThirdHonor,
            value: HONITSU_THIRD_HONOR_BONUS,
            source: Some(source),
        }
    }
}

/// Merged danger for one (opponent, tile) pair: the score plus every
/// contributing signal in evaluation order, for explainability.
#[derive(Debug, Clone, Serialize)]
pub struct DangerReport {
    pub score: i32,
    pub signals: Vec<DangerSignal>,
}

/// Danger for one candidate tile across the threatening opponents.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateDanger {
    pub tile136: u8,
    /// Worst per-threat score; the number the decision layer compares
    /// against the risk border. Zero when nobody threatens.
    pub overall: i32,
    /// One report per threatening opponent; quiet seats are omitted.
    pub per_opponent: Vec<(usize, DangerReport)>,
}

// ---------------------------------------------------------------------------
// Base statistical danger
// ---------------------------------------------------------------------------

/// Danger of a kind against one opponent from visible information alone,
/// before any hand-shape hypothesis. Genbutsu is handled by the caller.
fn base_danger(grid: &SafetyGrid, opponent_idx: usize, tile: TileType) -> (i32, Vec<DangerSignal>) {
    if tile.is_honor() {
        let live = grid.live_copies(tile);
        if live == 0 {
            return (0, vec![DangerSignal::dead_tile()]);
        }
        let sig = DangerSignal::live_honor(live);
        return (sig.value, vec![sig]);
    }

    let shape = match tile.number() {
        Some(4..=6) => SUITED_MIDDLE,
        Some(n) if n == 1 || n == 9 => SUITED_TERMINAL,
        _ => SUITED_NEAR_TERMINAL,
    };
    let mut score = shape;
    let mut signals = vec![DangerSignal::suited_shape(shape)];

    if grid.opponent(opponent_idx).is_suji(tile) {
        score += SUJI_DISCOUNT;
        signals.push(DangerSignal::suji());
    }
    if grid.is_kabe(tile) {
        score += WALL_BLOCK_DISCOUNT;
        signals.push(DangerSignal::wall_block());
    } else if grid.is_one_chance(tile) {
        score += ONE_CHANCE_DISCOUNT;
        signals.push(DangerSignal::one_chance());
    }

    (score, signals)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// What a safe-tile vote from an active analyzer does to the aggregate.
/// The combination rule is deliberately a tunable policy; both readings are
/// kept under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeVotePolicy {
    /// Each safe vote subtracts a fixed amount.
    Subtract(i32),
    /// The first safe vote removes the base statistical component; analyzer
    /// bonuses from other hypotheses still apply.
    ZeroOutBase,
}

impl Default for SafeVotePolicy {
    fn default() -> Self {
        SafeVotePolicy::Subtract(SAFE_VOTE_DISCOUNT)
    }
}

/// Runs every registered analyzer for an opponent/tile pair and merges the
/// signals into one score. Registration order is the evaluation order, but
/// the total is order-independent (signals combine additively).
pub struct DangerEvaluator {
    analyzers: Vec<Box<dyn ShapeAnalyzer>>,
    safe_vote: SafeVotePolicy,
}

impl DangerEvaluator {
    pub fn new(safe_vote: SafeVotePolicy) -> Self {
        Self {
            analyzers: Vec::new(),
            safe_vote,
        }
    }

    /// The standard analyzer set: half flush and pure flush.
    pub fn standard() -> Self {
        let mut eval = Self::new(SafeVotePolicy::default());
        eval.register(Box::new(HonitsuAnalyzer));
        eval.register(Box::new(ChinitsuAnalyzer));
        eval
    }

    pub fn register(&mut self, analyzer: Box<dyn ShapeAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    /// Merge base danger and analyzer signals for one opponent/tile pair.
    pub fn aggregate(&self, table: &TableView, opponent_idx: usize, tile136: u8) -> DangerReport {
        let tile = tile136_to_type(tile136);
        let grid = table.safety();

        if grid.opponent(opponent_idx).is_genbutsu(tile) {
            return DangerReport {
                score: 0,
                signals: vec![DangerSignal::genbutsu()],
            };
        }

        let (base, mut signals) = base_danger(grid, opponent_idx, tile);
        let mut score = base;
        let mut base_alive = base;
        let view = table.opponent(opponent_idx);
        let revealed = grid.visible_count(tile);

        for analyzer in &self.analyzers {
            let hypothesis = match analyzer.detect(view) {
                Ok(Some(h)) => h,
                Ok(None) => continue,
                Err(err) => {
                    // One faulty detector must not take down the whole
                    // danger evaluation.
                    log::warn!("analyzer {} treated as inactive: {err:#}", analyzer.id());
                    continue;
                }
            };

            if analyzer.safe_tiles(&hypothesis).contains(tile) {
                match self.safe_vote {
                    SafeVotePolicy::Subtract(amount) => {
                        score -= amount;
                        signals.push(DangerSignal::shape_safe(analyzer.id(), -amount));
                    }
                    SafeVotePolicy::ZeroOutBase => {
                        // Only a positive base is worth removing; a base the
                        // discounts already pushed below zero must not turn
                        // the safe vote into added danger.
                        if base_alive > 0 {
                            score -= base_alive;
                            signals.push(DangerSignal::shape_safe(analyzer.id(), -base_alive));
                            base_alive = 0;
                        }
                    }
                }
            }

            for sig in analyzer.bonus_danger(&hypothesis, tile136, revealed) {
                score += sig.value;
                signals.push(sig);
            }
        }

        DangerReport {
            score: score.max(0),
            signals,
        }
    }

    /// Danger for each candidate against one opponent.
    pub fn danger_map(
        &self,
        table: &TableView,
        opponent_idx: usize,
        candidates: &[u8],
    ) -> Vec<(u8, DangerReport)> {
        candidates
            .iter()
            .map(|&t| (t, self.aggregate(table, opponent_idx, t)))
            .collect()
    }

    /// Opponents that currently threaten: riichi declared, an opened hand,
    /// or an active hand-shape hypothesis. Only these enter the overall
    /// danger merge; a quiet seat cannot force a fold.
    pub fn threatening_opponents(&self, table: &TableView) -> Vec<usize> {
        table
            .live_opponents()
            .into_iter()
            .filter(|&idx| {
                let view = table.opponent(idx);
                view.riichi_declared()
                    || !view.melds().is_empty()
                    || self
                        .analyzers
                        .iter()
                        .any(|a| matches!(a.detect(view), Ok(Some(_))))
            })
            .collect()
    }

    /// Danger for each candidate merged across the threatening opponents.
    /// Candidates are evaluated in parallel; every unit reads only the
    /// frozen table snapshot.
    pub fn overall_danger(&self, table: &TableView, candidates: &[u8]) -> Vec<CandidateDanger> {
        let threats = self.threatening_opponents(table);
        candidates
            .par_iter()
            .map(|&tile136| {
                let per_opponent: Vec<(usize, DangerReport)> = threats
                    .iter()
                    .map(|&opp| (opp, self.aggregate(table, opp, tile136)))
                    .collect();
                let overall = per_opponent
                    .iter()
                    .map(|(_, r)| r.score)
                    .max()
                    .unwrap_or(0);
                CandidateDanger {
                    tile136,
                    overall,
                    per_opponent,
                }
            })
            .collect()
    }

    /// {id, hypothesis} records for every registered analyzer against one
    /// opponent, in registration order.
    pub fn snapshots(&self, view: &OpponentView) -> Vec<AnalyzerSnapshot> {
        self.analyzers.iter().map(|a| a.snapshot(view)).collect()
    }
}
