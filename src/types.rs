//! Shared types for PropShop.
//!
//! These types form the data model used across the odds, strategy and
//! report modules. Quotes and results are plain values produced per
//! analysis run; nothing here holds mutable shared state.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// One sportsbook line as delivered by a scraper, keyed externally by player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub stat: String,
    pub line: f64,
    pub over_odds: i32,
    pub under_odds: i32,
}

/// A sportsbook quotation for a single player stat line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropQuote {
    pub player: String,
    /// Stat label as shown by the book, e.g. "Passing Yards"
    pub stat: String,
    pub line: f64,
    /// American odds on the over (nonzero)
    pub over_odds: i32,
    /// American odds on the under (nonzero)
    pub under_odds: i32,
}

impl PropQuote {
    pub fn new(
        player: impl Into<String>,
        stat: impl Into<String>,
        line: f64,
        over_odds: i32,
        under_odds: i32,
    ) -> Self {
        Self {
            player: player.into(),
            stat: stat.into(),
            line,
            over_odds,
            under_odds,
        }
    }

    /// Attach a player to a scraped line.
    pub fn from_line(player: &str, line: &QuoteLine) -> Self {
        Self::new(player, line.stat.clone(), line.line, line.over_odds, line.under_odds)
    }

    /// American odds quoted for one side.
    pub fn odds_for(&self, side: Side) -> i32 {
        match side {
            Side::Over => self.over_odds,
            Side::Under => self.under_odds,
        }
    }

    /// Sport inferred from the stat label.
    pub fn sport(&self) -> Sport {
        Sport::from_stat(&self.stat)
    }
}

impl fmt::Display for PropQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (O {:+} | U {:+})",
            self.player, self.stat, self.line, self.over_odds, self.under_odds,
        )
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which side of an over/under line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Over,
    Under,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Over => write!(f, "OVER"),
            Side::Under => write!(f, "UNDER"),
        }
    }
}

/// Parlay product family on the DFS platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetCategory {
    /// Every pick must hit.
    Power,
    /// Reduced payout with one or more misses allowed.
    Flex,
}

impl fmt::Display for BetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetCategory::Power => write!(f, "power"),
            BetCategory::Flex => write!(f, "flex"),
        }
    }
}

/// League a prop belongs to, guessed from its stat label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    #[serde(rename = "NFL")]
    Nfl,
    #[serde(rename = "NBA")]
    Nba,
    #[serde(rename = "NHL")]
    Nhl,
    #[serde(rename = "MLB")]
    Mlb,
    Other,
}

struct SportKeyword {
    keywords: &'static [&'static str],
    sport: Sport,
}

// Checked in order; the first league with a matching keyword wins.
const SPORT_KEYWORDS: &[SportKeyword] = &[
    SportKeyword { keywords: &["passing", "rushing", "receiving", "touchdown"], sport: Sport::Nfl },
    SportKeyword { keywords: &["points", "rebounds", "assists", "3-pointers", "blocks", "steals"], sport: Sport::Nba },
    SportKeyword { keywords: &["goals", "saves", "shots"], sport: Sport::Nhl },
    SportKeyword { keywords: &["strikeouts", "hits", "runs", "home runs"], sport: Sport::Mlb },
];

impl Sport {
    /// Classify a stat label by keyword (case-insensitive).
    pub fn from_stat(stat: &str) -> Self {
        let s = stat.to_lowercase();
        SPORT_KEYWORDS
            .iter()
            .find(|sk| sk.keywords.iter().any(|kw| s.contains(kw)))
            .map(|sk| sk.sport)
            .unwrap_or(Sport::Other)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Nfl => write!(f, "NFL"),
            Sport::Nba => write!(f, "NBA"),
            Sport::Nhl => write!(f, "NHL"),
            Sport::Mlb => write!(f, "MLB"),
            Sport::Other => write!(f, "Other"),
        }
    }
}

// ---------------------------------------------------------------------------
// Bet catalog entry
// ---------------------------------------------------------------------------

/// A fixed-payout parlay product and its break-even win rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetType {
    /// Display id, e.g. "6-Pick Flex"
    pub name: String,
    /// Payout multiplier on the entry fee
    pub payout: f64,
    /// Per-pick win probability (percent) needed to break even
    pub min_win_pct: f64,
    pub category: BetCategory,
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x, needs {:.2}%, {})",
            self.name, self.payout, self.min_win_pct, self.category,
        )
    }
}

// ---------------------------------------------------------------------------
// Analysis results
// ---------------------------------------------------------------------------

/// Implied and vig-free probabilities for a two-sided market, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoVigResult {
    pub implied_over: f64,
    pub implied_under: f64,
    pub over: f64,
    pub under: f64,
}

impl NoVigResult {
    pub fn probability(&self, side: Side) -> f64 {
        match side {
            Side::Over => self.over,
            Side::Under => self.under,
        }
    }

    /// Sum of the raw implied probabilities (above 100 for a real book).
    pub fn total_implied(&self) -> f64 {
        self.implied_over + self.implied_under
    }

    /// House margin in percentage points.
    pub fn overround(&self) -> f64 {
        self.total_implied() - 100.0
    }
}

impl fmt::Display for NoVigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No-Vig Win%: Over {:.2}% | Under {:.2}% (vig {:.2}%)",
            self.over,
            self.under,
            self.overround(),
        )
    }
}

/// A bet type that a given side clears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualification {
    pub bet_type: String,
    pub side: Side,
    /// Percentage points above the bet type's break-even (never negative)
    pub edge: f64,
    pub payout: f64,
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: +{:.2}% edge (pays {}x)", self.bet_type, self.edge, self.payout)
    }
}

/// A prop where at least one side clears at least one bet type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub quote: PropQuote,
    pub no_vig: NoVigResult,
    /// Over-side qualifications in catalog order
    pub over: Vec<Qualification>,
    /// Under-side qualifications in catalog order
    pub under: Vec<Qualification>,
}

impl Opportunity {
    pub fn qualifications(&self, side: Side) -> &[Qualification] {
        match side {
            Side::Over => &self.over,
            Side::Under => &self.under,
        }
    }

    /// No-vig probability of a side, in percent.
    pub fn win_pct(&self, side: Side) -> f64 {
        self.no_vig.probability(side)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the analyzer on malformed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Invalid American odds: {0} (zero is undefined)")]
    InvalidOdds(i32),

    #[error("Invalid quote for {player} {stat}: odds {odds}")]
    InvalidQuote {
        player: String,
        stat: String,
        odds: i32,
    },

    #[error("Invalid bet catalog: {0}")]
    InvalidCatalog(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_display() {
        assert_eq!(format!("{}", Side::Over), "OVER");
        assert_eq!(format!("{}", Side::Under), "UNDER");
    }

    #[test]
    fn test_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Over).unwrap(), "\"over\"");
        let parsed: Side = serde_json::from_str("\"under\"").unwrap();
        assert_eq!(parsed, Side::Under);
    }

    #[test]
    fn test_sport_from_stat() {
        assert_eq!(Sport::from_stat("Passing Yards"), Sport::Nfl);
        assert_eq!(Sport::from_stat("Rush + Rec Yards"), Sport::Other);
        assert_eq!(Sport::from_stat("Points"), Sport::Nba);
        assert_eq!(Sport::from_stat("3-Pointers Made"), Sport::Nba);
        assert_eq!(Sport::from_stat("Shots On Goal"), Sport::Nhl);
        assert_eq!(Sport::from_stat("Pitcher Strikeouts"), Sport::Mlb);
        assert_eq!(Sport::from_stat("Fantasy Score"), Sport::Other);
    }

    #[test]
    fn test_sport_order_prefers_earlier_league() {
        // "Receiving Touchdowns" hits NFL before anything else is checked
        assert_eq!(Sport::from_stat("Receiving Touchdowns"), Sport::Nfl);
        // "Goals" is NHL even though "Points" style labels are NBA
        assert_eq!(Sport::from_stat("Goals"), Sport::Nhl);
    }

    #[test]
    fn test_sport_serializes_league_code() {
        assert_eq!(serde_json::to_string(&Sport::Nba).unwrap(), "\"NBA\"");
        assert_eq!(serde_json::to_string(&Sport::Other).unwrap(), "\"Other\"");
    }

    #[test]
    fn test_prop_quote_from_line() {
        let line = QuoteLine {
            stat: "Passing Yards".into(),
            line: 239.5,
            over_odds: -118,
            under_odds: -112,
        };
        let quote = PropQuote::from_line("C.J. Stroud", &line);
        assert_eq!(quote.player, "C.J. Stroud");
        assert_eq!(quote.odds_for(Side::Over), -118);
        assert_eq!(quote.odds_for(Side::Under), -112);
        assert_eq!(quote.sport(), Sport::Nfl);
    }

    #[test]
    fn test_prop_quote_display() {
        let quote = PropQuote::new("Luka Doncic", "Points", 32.5, -125, 105);
        let display = format!("{quote}");
        assert!(display.contains("Luka Doncic"));
        assert!(display.contains("O -125"));
        assert!(display.contains("U +105"));
    }

    #[test]
    fn test_no_vig_overround() {
        let nv = NoVigResult {
            implied_over: 54.0,
            implied_under: 52.0,
            over: 54.0 / 106.0 * 100.0,
            under: 52.0 / 106.0 * 100.0,
        };
        assert!((nv.total_implied() - 106.0).abs() < 1e-9);
        assert!((nv.overround() - 6.0).abs() < 1e-9);
        assert_eq!(nv.probability(Side::Over), nv.over);
    }

    #[test]
    fn test_qualification_display() {
        let q = Qualification {
            bet_type: "6-Pick Flex".into(),
            side: Side::Over,
            edge: 1.6,
            payout: 25.0,
        };
        assert_eq!(format!("{q}"), "6-Pick Flex: +1.60% edge (pays 25x)");
    }

    #[test]
    fn test_analyzer_error_display() {
        let e = AnalyzerError::InvalidOdds(0);
        assert!(format!("{e}").contains("zero is undefined"));

        let e = AnalyzerError::InvalidQuote {
            player: "Joel Embiid".into(),
            stat: "Rebounds".into(),
            odds: 0,
        };
        assert_eq!(format!("{e}"), "Invalid quote for Joel Embiid Rebounds: odds 0");
    }
}
