//! Strategy engine: odds normalization, bet catalog, and +EV detection.

pub mod catalog;
pub mod edge;
pub mod odds;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::types::{AnalyzerError, Opportunity, PropQuote, QuoteLine};
use catalog::BetCatalog;
use edge::{best_selection, EdgeDetector};

/// Scraped sportsbook lines keyed by player, in the order the scraper
/// delivered them.
pub type QuoteBoard = IndexMap<String, Vec<QuoteLine>>;

/// +EV props keyed by player, in board order. Players with nothing
/// actionable are absent.
pub type OpportunityMap = IndexMap<String, Vec<Opportunity>>;

// ---------------------------------------------------------------------------
// Aggregate statistics
// ---------------------------------------------------------------------------

/// Summary of one analysis run. Edges are unrounded percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AggregateStats {
    /// Every quote handed to the analyzer, qualifying or not
    pub total_scanned: usize,
    pub opportunities_found: usize,
    pub conversion_rate: f64,
    /// Mean edge of the best selection per opportunity
    pub avg_edge: f64,
    /// Largest edge of any best selection
    pub max_edge: f64,
}

impl AggregateStats {
    pub fn compute(opportunities: &OpportunityMap, total_scanned: usize) -> Self {
        let best_edges: Vec<f64> = opportunities
            .values()
            .flatten()
            .filter_map(best_selection)
            .map(|sel| sel.best.edge)
            .collect();

        let found = best_edges.len();
        let conversion_rate = if total_scanned > 0 {
            found as f64 / total_scanned as f64 * 100.0
        } else {
            0.0
        };
        let avg_edge = if found > 0 {
            best_edges.iter().sum::<f64>() / found as f64
        } else {
            0.0
        };
        let max_edge = best_edges.iter().copied().fold(0.0, f64::max);

        Self {
            total_scanned,
            opportunities_found: found,
            conversion_rate,
            avg_edge,
            max_edge,
        }
    }
}

/// Result of analyzing one quote board.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub opportunities: OpportunityMap,
    pub total_scanned: usize,
}

impl Analysis {
    pub fn stats(&self) -> AggregateStats {
        AggregateStats::compute(&self.opportunities, self.total_scanned)
    }

    /// Opportunities in report order: board order of players, then the
    /// order each player's props were quoted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Opportunity)> {
        self.opportunities
            .iter()
            .flat_map(|(player, opps)| opps.iter().map(move |o| (player.as_str(), o)))
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Runs the edge detector over a whole board of quotes.
///
/// Holds only a read-only catalog, so one instance can be shared across
/// threads freely.
#[derive(Debug, Clone, Default)]
pub struct OddsAnalyzer {
    detector: EdgeDetector,
}

impl OddsAnalyzer {
    pub fn new(catalog: BetCatalog) -> Self {
        Self {
            detector: EdgeDetector::new(catalog),
        }
    }

    pub fn catalog(&self) -> &BetCatalog {
        self.detector.catalog()
    }

    /// Evaluate every quote on the board and keep what clears a bet type.
    ///
    /// An empty board (including one from a scraper that failed outright)
    /// gives an empty map. A zero odds value anywhere fails the whole batch.
    pub fn find_opportunities(&self, board: &QuoteBoard) -> Result<OpportunityMap, AnalyzerError> {
        let mut opportunities = OpportunityMap::new();

        for (player, lines) in board {
            let mut player_opps = Vec::new();
            for line in lines {
                let quote = PropQuote::from_line(player, line);
                if let Some(opp) = self.detector.evaluate(&quote)? {
                    player_opps.push(opp);
                }
            }
            if !player_opps.is_empty() {
                opportunities.insert(player.clone(), player_opps);
            }
        }

        Ok(opportunities)
    }

    /// Full pass over a board, keeping the scan count for statistics.
    pub fn analyze(&self, board: &QuoteBoard) -> Result<Analysis, AnalyzerError> {
        let total_scanned = board.values().map(Vec::len).sum();
        let opportunities = self.find_opportunities(board)?;

        let analysis = Analysis {
            opportunities,
            total_scanned,
        };

        let stats = analysis.stats();
        info!(
            players_in = board.len(),
            props_scanned = stats.total_scanned,
            plus_ev = stats.opportunities_found,
            players_out = analysis.opportunities.len(),
            best_edge = format!("{:.2}%", stats.max_edge),
            "Odds analysis complete"
        );

        Ok(analysis)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    
    fn line(stat: &str, line: f64, over_odds: i32, under_odds: i32) -> QuoteLine {
        QuoteLine {
            stat: stat.to_string(),
            line,
            over_odds,
            under_odds,
        }
    }

    fn sample_board() -> QuoteBoard {
        let mut board = QuoteBoard::new();
        board.insert(
            "C.J. Stroud".into(),
            vec![line("Passing Yards", 239.5, -118, -112)],
        );
        board.insert(
            "Giannis Antetokounmpo".into(),
            vec![
                line("Points", 30.5, -180, 150),
                line("Rebounds", 11.5, -110, -110),
            ],
        );
        board.insert(
            "Jayson Tatum".into(),
            vec![line("Assists", 4.5, 115, -145)],
        );
        board
    }

    #[test]
    fn test_worked_example_finds_nothing() {
        let analyzer = OddsAnalyzer::default();
        let mut board = QuoteBoard::new();
        board.insert("C.J. Stroud".into(), vec![line("Passing Yards", 239.5, -118, -112)]);

        let analysis = analyzer.analyze(&board).unwrap();
        assert!(analysis.is_empty());
        assert_eq!(analysis.total_scanned, 1);

        let stats = analysis.stats();
        assert_eq!(stats.opportunities_found, 0);
        assert_eq!(stats.conversion_rate, 0.0);
        assert_eq!(stats.avg_edge, 0.0);
        assert_eq!(stats.max_edge, 0.0);
    }

    #[test]
    fn test_non_qualifying_players_are_absent() {
        let analyzer = OddsAnalyzer::default();
        let opps = analyzer.find_opportunities(&sample_board()).unwrap();
        assert!(!opps.contains_key("C.J. Stroud"));
        assert_eq!(opps.len(), 2);
        // Giannis keeps only his qualifying prop
        assert_eq!(opps["Giannis Antetokounmpo"].len(), 1);
        assert_eq!(opps["Giannis Antetokounmpo"][0].quote.stat, "Points");
        assert_eq!(opps["Jayson Tatum"][0].quote.player, "Jayson Tatum");
    }

    #[test]
    fn test_empty_board() {
        let analyzer = OddsAnalyzer::default();
        let analysis = analyzer.analyze(&QuoteBoard::new()).unwrap();
        assert!(analysis.is_empty());
        let stats = analysis.stats();
        assert_eq!(stats.total_scanned, 0);
        assert_eq!(stats.conversion_rate, 0.0);
        assert!(!stats.conversion_rate.is_nan());
    }

    #[test]
    fn test_player_with_no_lines() {
        let analyzer = OddsAnalyzer::default();
        let mut board = QuoteBoard::new();
        board.insert("Stephen Curry".into(), vec![]);
        let analysis = analyzer.analyze(&board).unwrap();
        assert!(analysis.is_empty());
        assert_eq!(analysis.total_scanned, 0);
    }

    #[test]
    fn test_stats() {
        let analyzer = OddsAnalyzer::default();
        let analysis = analyzer.analyze(&sample_board()).unwrap();
        let stats = analysis.stats();

        assert_eq!(stats.total_scanned, 4);
        assert_eq!(stats.opportunities_found, 2);
        assert!((stats.conversion_rate - 50.0).abs() < 1e-9);

        // Best edges: Giannis over vs 6-Pick Flex, Tatum under vs 6-Pick Flex
        let giannis = 61.643_835_616_438_36 - 54.21;
        let tatum = 55.994_611_584_092_06 - 54.21;
        assert!((stats.max_edge - giannis).abs() < 1e-6);
        assert!((stats.avg_edge - (giannis + tatum) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_iter_in_report_order() {
        let analyzer = OddsAnalyzer::default();
        let analysis = analyzer.analyze(&sample_board()).unwrap();
        let order: Vec<_> = analysis.iter().map(|(p, o)| (p, o.quote.stat.as_str())).collect();
        assert_eq!(
            order,
            vec![("Giannis Antetokounmpo", "Points"), ("Jayson Tatum", "Assists")]
        );
    }

    #[test]
    fn test_idempotent() {
        let analyzer = OddsAnalyzer::default();
        let board = sample_board();
        let first = analyzer.analyze(&board).unwrap();
        let second = analyzer.analyze(&board).unwrap();
        assert_eq!(first, second);
        assert_eq!(analyzer.catalog(), BetCatalog::builtin());
    }

    #[test]
    fn test_zero_odds_fails_batch() {
        let analyzer = OddsAnalyzer::default();
        let mut board = sample_board();
        board.insert("Joel Embiid".into(), vec![line("Rebounds", 11.5, 0, -108)]);
        let err = analyzer.analyze(&board).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidQuote { ref player, odds: 0, .. } if player == "Joel Embiid"));
    }

    #[test]
    fn test_analyzer_is_shareable_across_threads() {
        let analyzer = std::sync::Arc::new(OddsAnalyzer::default());
        let board = std::sync::Arc::new(sample_board());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let analyzer = analyzer.clone();
                let board = board.clone();
                std::thread::spawn(move || analyzer.analyze(&board).unwrap().stats().opportunities_found)
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 2);
        }
    }
}
