//! American odds conversion and vig removal.
//!
//! Turns a sportsbook's two-sided quote into implied probabilities and then
//! normalizes them proportionally so the pair sums to 100%.

use crate::types::{AnalyzerError, NoVigResult};

/// Convert American odds to an implied win probability in percent.
///
/// Positive odds are the profit on a 100 stake (underdog), negative odds are
/// the stake needed to profit 100 (favorite). Zero has no meaning in this
/// notation and is rejected.
pub fn american_to_probability(odds: i32) -> Result<f64, AnalyzerError> {
    // Widen before abs() so i32::MIN stays representable.
    let odds = i64::from(odds);
    let prob = match odds {
        0 => return Err(AnalyzerError::InvalidOdds(0)),
        o if o > 0 => 100.0 / (o as f64 + 100.0),
        o => {
            let abs = o.abs() as f64;
            abs / (abs + 100.0)
        }
    };
    Ok(prob * 100.0)
}

/// Remove the bookmaker's margin from an over/under pair.
///
/// Proportional de-vig: each side's implied probability is divided by the
/// total implied probability. The bet catalog thresholds assume this model.
pub fn remove_vig(over_odds: i32, under_odds: i32) -> Result<NoVigResult, AnalyzerError> {
    let implied_over = american_to_probability(over_odds)?;
    let implied_under = american_to_probability(under_odds)?;
    let total = implied_over + implied_under;

    Ok(NoVigResult {
        implied_over,
        implied_under,
        over: implied_over / total * 100.0,
        under: implied_under / total * 100.0,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_favorite_probability() {
        let p = american_to_probability(-150).unwrap();
        assert!((p - 60.0).abs() < EPS);
    }

    #[test]
    fn test_underdog_probability() {
        let p = american_to_probability(150).unwrap();
        assert!((p - 40.0).abs() < EPS);
    }

    #[test]
    fn test_even_money_both_signs() {
        assert!((american_to_probability(100).unwrap() - 50.0).abs() < EPS);
        assert!((american_to_probability(-100).unwrap() - 50.0).abs() < EPS);
    }

    #[test]
    fn test_favorite_and_dog_at_same_price() {
        let fav = american_to_probability(-150).unwrap();
        let dog = american_to_probability(150).unwrap();
        assert!((fav - 60.0).abs() < EPS);
        assert!((dog - 40.0).abs() < EPS);
        // Mirrored prices carry no margin; the book's vig comes from quoting
        // both sides as favorites.
        assert!((fav + dog - 100.0).abs() < EPS);
        let both = 2.0 * american_to_probability(-110).unwrap();
        assert!((both - 104.761_904_761_904_76).abs() < 1e-6);
    }

    #[test]
    fn test_zero_odds_rejected() {
        assert_eq!(american_to_probability(0), Err(AnalyzerError::InvalidOdds(0)));
    }

    #[test]
    fn test_probability_in_open_interval() {
        for odds in [i32::MIN, -100_000, -10_000, -1001, -110, -1, 1, 110, 999, 10_000, i32::MAX] {
            let p = american_to_probability(odds).unwrap();
            assert!(p > 0.0 && p < 100.0, "odds {odds} gave {p}");
        }
    }

    #[test]
    fn test_remove_vig_worked_example() {
        let nv = remove_vig(-118, -112).unwrap();
        assert!((nv.implied_over - 54.13).abs() < 0.01);
        assert!((nv.implied_under - 52.83).abs() < 0.01);
        assert!((nv.total_implied() - 106.96).abs() < 0.01);
        assert!((nv.over - 50.61).abs() < 0.01);
        assert!((nv.under - 49.39).abs() < 0.01);
    }

    #[test]
    fn test_remove_vig_sums_to_hundred() {
        let pairs = [
            (-118, -112),
            (-180, 150),
            (-110, -110),
            (105, -135),
            (-10_000, 2_500),
            (300, -400),
            (120, 120),
        ];
        for (over, under) in pairs {
            let nv = remove_vig(over, under).unwrap();
            assert!((nv.over + nv.under - 100.0).abs() < EPS, "{over}/{under}");
        }
    }

    #[test]
    fn test_remove_vig_favorite_side() {
        let nv = remove_vig(-180, 150).unwrap();
        assert!((nv.over - 61.64).abs() < 0.01);
        assert!(nv.over > nv.under);
    }

    #[test]
    fn test_remove_vig_symmetric_market() {
        let nv = remove_vig(-115, -115).unwrap();
        assert!((nv.over - 50.0).abs() < EPS);
        assert!((nv.under - 50.0).abs() < EPS);
        assert!(nv.overround() > 0.0);
    }

    #[test]
    fn test_remove_vig_rejects_either_zero() {
        assert_eq!(remove_vig(0, -110), Err(AnalyzerError::InvalidOdds(0)));
        assert_eq!(remove_vig(-110, 0), Err(AnalyzerError::InvalidOdds(0)));
    }
}
