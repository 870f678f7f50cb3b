//! +EV detection.
//!
//! Compares vig-free win probabilities to the break-even threshold of every
//! bet type in the catalog and ranks what clears.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::catalog::BetCatalog;
use super::odds::remove_vig;
use crate::types::{AnalyzerError, Opportunity, PropQuote, Qualification, Side};

// ---------------------------------------------------------------------------
// Qualification
// ---------------------------------------------------------------------------

/// Every bet type whose threshold `probability` meets, in catalog order.
///
/// Dominated entries are kept: a pick can sit in a 2-pick and a 6-pick
/// entry at the same time.
pub fn find_qualifications(probability: f64, side: Side, catalog: &BetCatalog) -> Vec<Qualification> {
    catalog
        .iter()
        .filter(|bt| probability >= bt.min_win_pct)
        .map(|bt| Qualification {
            bet_type: bt.name.clone(),
            side,
            edge: probability - bt.min_win_pct,
            payout: bt.payout,
        })
        .collect()
}

/// Highest-edge qualification; the earliest one wins a tie.
pub fn best_qualification(qualifications: &[Qualification]) -> Option<&Qualification> {
    qualifications.iter().fold(None, |best, q| match best {
        Some(b) if b.edge >= q.edge => Some(b),
        _ => Some(q),
    })
}

/// Qualifications sorted by edge, descending. Ties keep their input order.
pub fn ranked(qualifications: &[Qualification]) -> Vec<Qualification> {
    let mut sorted = qualifications.to_vec();
    sorted.sort_by(|a, b| b.edge.partial_cmp(&a.edge).unwrap_or(Ordering::Equal));
    sorted
}

// ---------------------------------------------------------------------------
// Best-side selection
// ---------------------------------------------------------------------------

/// The single recommendation for an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub side: Side,
    /// American odds quoted on the chosen side
    pub odds: i32,
    /// No-vig probability of the chosen side, in percent
    pub win_pct: f64,
    pub best: Qualification,
}

/// Pick the side whose top qualification has the larger edge.
/// Over wins an exact tie; a side with nothing qualifying never wins.
pub fn best_selection(opportunity: &Opportunity) -> Option<Selection> {
    let over = best_qualification(&opportunity.over);
    let under = best_qualification(&opportunity.under);

    let (side, best) = match (over, under) {
        (Some(o), Some(u)) if u.edge > o.edge => (Side::Under, u),
        (Some(o), _) => (Side::Over, o),
        (None, Some(u)) => (Side::Under, u),
        (None, None) => return None,
    };

    Some(Selection {
        side,
        odds: opportunity.quote.odds_for(side),
        win_pct: opportunity.win_pct(side),
        best: best.clone(),
    })
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Evaluates single quotes against a bet catalog.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    catalog: BetCatalog,
}

impl EdgeDetector {
    pub fn new(catalog: BetCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BetCatalog {
        &self.catalog
    }

    /// Qualifications for one side at the given probability.
    pub fn qualify(&self, probability: f64, side: Side) -> Vec<Qualification> {
        find_qualifications(probability, side, &self.catalog)
    }

    /// De-vig a quote and qualify both sides.
    ///
    /// Returns `Ok(None)` when neither side clears any bet type.
    pub fn evaluate(&self, quote: &PropQuote) -> Result<Option<Opportunity>, AnalyzerError> {
        let no_vig = remove_vig(quote.over_odds, quote.under_odds).map_err(|e| match e {
            AnalyzerError::InvalidOdds(odds) => AnalyzerError::InvalidQuote {
                player: quote.player.clone(),
                stat: quote.stat.clone(),
                odds,
            },
            other => other,
        })?;

        let over = self.qualify(no_vig.over, Side::Over);
        let under = self.qualify(no_vig.under, Side::Under);

        if over.is_empty() && under.is_empty() {
            debug!(
                player = %quote.player,
                stat = %quote.stat,
                line = quote.line,
                no_vig_over = format!("{:.2}%", no_vig.over),
                no_vig_under = format!("{:.2}%", no_vig.under),
                "No bet type qualifies"
            );
            return Ok(None);
        }

        debug!(
            player = %quote.player,
            stat = %quote.stat,
            line = quote.line,
            over_qualifies = over.len(),
            under_qualifies = under.len(),
            no_vig_over = format!("{:.2}%", no_vig.over),
            no_vig_under = format!("{:.2}%", no_vig.under),
            "+EV prop"
        );

        Ok(Some(Opportunity {
            quote: quote.clone(),
            no_vig,
            over,
            under,
        }))
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(BetCatalog::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
