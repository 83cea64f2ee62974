//! Betaori: opponent threat inference and discard-safety engine for
//! Riichi Mahjong.
//!
//! Estimates how dangerous each candidate discard is against each live
//! opponent, infers probable hand shapes from public history, and applies
//! per-personality risk borders to produce a push/fold shortlist for the
//! outer discard policy.

pub mod analyzer;
pub mod danger;
pub mod decision;
pub mod profile;
pub mod regression;
pub mod safety;
pub mod table;
pub mod tile;
pub mod types;
