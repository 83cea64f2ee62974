//! Risk profiles: per-personality danger borders keyed by own-hand progress.
//!
//! A profile is plain data selected by name at agent construction. Missing
//! borders are a configuration error and fail before any decision runs.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Own-hand progress buckets the border table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShantenBucket {
    Tempai,
    OneShanten,
    TwoShanten,
    Other,
}

impl ShantenBucket {
    /// Bucket for a shanten number (0 or less counts as tempai).
    pub fn from_shanten(shanten: i8) -> Self {
        match shanten {
            i8::MIN..=0 => ShantenBucket::Tempai,
            1 => ShantenBucket::OneShanten,
            2 => ShantenBucket::TwoShanten,
            _ => ShantenBucket::Other,
        }
    }
}

/// Danger borders per bucket. All four fields are required; deserialization
/// of a table with a missing bucket fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BorderTable {
    pub tempai: i32,
    pub one_shanten: i32,
    pub two_shanten: i32,
    pub other: i32,
}

/// A named bot personality: its border table and nothing else.
/// Immutable after construction; decisions only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskProfile {
    pub name: String,
    pub borders: BorderTable,
}

/// Baseline borders: push freely at tempai, tighten as the hand falls
/// behind. Personalities below tune these.
const STANDARD_BORDERS: BorderTable = BorderTable {
    tempai: 4,
    one_shanten: 3,
    two_shanten: 2,
    other: 1,
};

impl RiskProfile {
    pub fn new(name: impl Into<String>, borders: BorderTable) -> Self {
        Self {
            name: name.into(),
            borders,
        }
    }

    /// The baseline personality.
    pub fn standard() -> Self {
        Self::new("standard", STANDARD_BORDERS)
    }

    /// Pushes one step harder at tempai than the baseline.
    pub fn miki() -> Self {
        Self::new(
            "miki",
            BorderTable {
                tempai: STANDARD_BORDERS.tempai + 1,
                ..STANDARD_BORDERS
            },
        )
    }

    /// Folds earlier when not yet tempai.
    pub fn xenia() -> Self {
        Self::new(
            "xenia",
            BorderTable {
                one_shanten: STANDARD_BORDERS.one_shanten - 1,
                two_shanten: STANDARD_BORDERS.two_shanten - 1,
                ..STANDARD_BORDERS
            },
        )
    }

    /// Look up a built-in personality.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "standard" => Ok(Self::standard()),
            "miki" => Ok(Self::miki()),
            "xenia" => Ok(Self::xenia()),
            other => bail!("unknown risk profile '{other}'"),
        }
    }

    /// Load a profile from JSON. A table missing any bucket is rejected
    /// here, at construction time, never at decision time.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid risk profile configuration")
    }

    /// Pure lookup of the border for a bucket.
    #[inline]
    pub fn border_for(&self, bucket: ShantenBucket) -> i32 {
        match bucket {
            ShantenBucket::Tempai => self.borders.tempai,
            ShantenBucket::OneShanten => self.borders.one_shanten,
            ShantenBucket::TwoShanten => self.borders.two_shanten,
            ShantenBucket::Other => self.borders.other,
        }
    }
}
