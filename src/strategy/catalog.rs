//! Bet-type catalog.
//!
//! The DFS platform's parlay products and the per-pick win rate each one
//! needs to break even. Thresholds live in a table, not in branches, so a
//! `config.toml` can replace them without a rebuild.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::types::{AnalyzerError, BetCategory, BetType};

// ---------------------------------------------------------------------------
// Built-in table (PrizePicks payouts)
// ---------------------------------------------------------------------------

struct BuiltinBetType {
    name: &'static str,
    payout: f64,
    min_win_pct: f64,
    category: BetCategory,
}

const BUILTIN_BET_TYPES: &[BuiltinBetType] = &[
    BuiltinBetType { name: "2-Pick Power", payout: 3.0, min_win_pct: 57.74, category: BetCategory::Power },
    BuiltinBetType { name: "3-Pick Power", payout: 6.0, min_win_pct: 55.05, category: BetCategory::Power },
    BuiltinBetType { name: "4-Pick Power", payout: 10.0, min_win_pct: 56.23, category: BetCategory::Power },
    BuiltinBetType { name: "5-Pick Power", payout: 20.0, min_win_pct: 54.93, category: BetCategory::Power },
    BuiltinBetType { name: "6-Pick Power", payout: 37.5, min_win_pct: 54.66, category: BetCategory::Power },
    BuiltinBetType { name: "3-Pick Flex", payout: 3.0, min_win_pct: 57.74, category: BetCategory::Flex },
    BuiltinBetType { name: "4-Pick Flex", payout: 6.0, min_win_pct: 55.04, category: BetCategory::Flex },
    BuiltinBetType { name: "5-Pick Flex", payout: 10.0, min_win_pct: 54.26, category: BetCategory::Flex },
    BuiltinBetType { name: "6-Pick Flex", payout: 25.0, min_win_pct: 54.21, category: BetCategory::Flex },
];

static BUILTIN: OnceLock<BetCatalog> = OnceLock::new();

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered, validated list of bet types.
///
/// Order matters: when two bet types give the same edge, the one listed
/// first is treated as the better one.
#[derive(Debug, Clone, PartialEq)]
pub struct BetCatalog {
    entries: Vec<BetType>,
}

impl BetCatalog {
    /// Build a catalog, rejecting empty tables, duplicate names, non-positive
    /// payouts and thresholds outside (0, 100).
    pub fn new(entries: Vec<BetType>) -> Result<Self, AnalyzerError> {
        if entries.is_empty() {
            return Err(AnalyzerError::InvalidCatalog("no bet types defined".into()));
        }

        let mut seen = HashSet::new();
        for bt in &entries {
            if bt.name.trim().is_empty() {
                return Err(AnalyzerError::InvalidCatalog("bet type with empty name".into()));
            }
            if !seen.insert(bt.name.as_str()) {
                return Err(AnalyzerError::InvalidCatalog(format!(
                    "duplicate bet type: {}",
                    bt.name
                )));
            }
            if !(bt.payout.is_finite() && bt.payout > 0.0) {
                return Err(AnalyzerError::InvalidCatalog(format!(
                    "{}: payout must be positive, got {}",
                    bt.name, bt.payout
                )));
            }
            if !(bt.min_win_pct > 0.0 && bt.min_win_pct < 100.0) {
                return Err(AnalyzerError::InvalidCatalog(format!(
                    "{}: min_win_pct must be within (0, 100), got {}",
                    bt.name, bt.min_win_pct
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The built-in PrizePicks table, materialized on first use.
    pub fn builtin() -> &'static BetCatalog {
        BUILTIN.get_or_init(|| Self {
            entries: BUILTIN_BET_TYPES
                .iter()
                .map(|b| BetType {
                    name: b.name.to_string(),
                    payout: b.payout,
                    min_win_pct: b.min_win_pct,
                    category: b.category,
                })
                .collect(),
        })
    }

    pub fn entries(&self) -> &[BetType] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &BetType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&BetType> {
        self.entries.iter().find(|bt| bt.name == name)
    }

    /// Lowest break-even threshold in the table.
    pub fn min_threshold(&self) -> f64 {
        self.entries
            .iter()
            .map(|bt| bt.min_win_pct)
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for BetCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
