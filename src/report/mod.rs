//! Report formatting for dashboards and exports.
//!
//! Turns an [`Analysis`] into the flat, rounded record list a dashboard
//! consumes. Nothing here touches the network or the filesystem; callers
//! decide where the serialized report goes.

pub mod text;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::strategy::edge::{best_selection, ranked};
use crate::strategy::{AggregateStats, Analysis};
use crate::types::{Side, Sport};

/// Round to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One qualifying bet type in a record's ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingBet {
    #[serde(rename = "type")]
    pub bet_type: String,
    pub edge: f64,
    pub payout: f64,
}

/// A single recommendation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub id: u32,
    pub player: String,
    pub sport: Sport,
    pub stat: String,
    pub line: f64,
    pub direction: Side,
    pub odds: i32,
    pub no_vig_win_pct: f64,
    pub edge: f64,
    pub best_bet_type: String,
    pub payout: f64,
    pub all_qualifying_bets: Vec<QualifyingBet>,
}

/// Rounded run statistics as a dashboard shows them.
///
/// `avg_edge` is the mean of the records' already-rounded edges, so it can
/// differ in the last decimal from [`AggregateStats::avg_edge`] rounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_scanned: usize,
    pub plus_ev_found: usize,
    pub conversion_rate: f64,
    pub avg_edge: f64,
    pub best_edge: f64,
}

impl From<AggregateStats> for ReportStats {
    fn from(stats: AggregateStats) -> Self {
        Self {
            total_scanned: stats.total_scanned,
            plus_ev_found: stats.opportunities_found,
            conversion_rate: round2(stats.conversion_rate),
            avg_edge: round2(stats.avg_edge),
            best_edge: round2(stats.max_edge),
        }
    }
}

/// Serializable output of one analysis run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub opportunities: Vec<OpportunityRecord>,
    pub stats: ReportStats,
    /// Left empty by [`build_report`]; set by whoever publishes the report.
    pub timestamp: Option<DateTime<Utc>>,
}

impl AnalysisReport {
    /// Look up a record by its id.
    pub fn opportunity(&self, id: u32) -> Option<&OpportunityRecord> {
        self.opportunities.iter().find(|o| o.id == id)
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Flatten an analysis into numbered records plus rounded stats.
///
/// Ids start at 1 and follow the board's player order, then the order each
/// player's props were quoted.
pub fn build_report(analysis: &Analysis) -> AnalysisReport {
    let opportunities: Vec<OpportunityRecord> = analysis
        .iter()
        .filter_map(|(player, opp)| best_selection(opp).map(|sel| (player, opp, sel)))
        .zip(1u32..)
        .map(|((player, opp, sel), id)| OpportunityRecord {
            id,
            player: player.to_string(),
            sport: opp.quote.sport(),
            stat: opp.quote.stat.clone(),
            line: opp.quote.line,
            direction: sel.side,
            odds: sel.odds,
            no_vig_win_pct: round2(sel.win_pct),
            edge: round2(sel.best.edge),
            best_bet_type: sel.best.bet_type.clone(),
            payout: sel.best.payout,
            all_qualifying_bets: ranked(opp.qualifications(sel.side))
                .into_iter()
                .map(|q| QualifyingBet {
                    bet_type: q.bet_type,
                    edge: round2(q.edge),
                    payout: q.payout,
                })
                .collect(),
        })
        .collect();

    let mut stats = ReportStats::from(analysis.stats());
    if !opportunities.is_empty() {
        let total: f64 = opportunities.iter().map(|o| o.edge).sum();
        stats.avg_edge = round2(total / opportunities.len() as f64);
    }

    AnalysisReport {
        opportunities,
        stats,
        timestamp: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
