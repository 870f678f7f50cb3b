//! Plain-text rendering for terminal output.

use std::fmt::Write;

use crate::strategy::edge::ranked;
use crate::strategy::OpportunityMap;
use crate::types::{Opportunity, Side};

const RULE_WIDTH: usize = 80;

/// Render opportunities grouped by player, players in name order.
pub fn render_text(opportunities: &OpportunityMap) -> String {
    let mut out = String::new();

    if opportunities.is_empty() {
        out.push_str("No +EV opportunities found at this time.\n");
        return out;
    }

    let total: usize = opportunities.values().map(Vec::len).sum();
    let rule = "=".repeat(RULE_WIDTH);

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "+EV OPPORTUNITIES FOUND");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "\nFound {total} +EV props across {} players",
        opportunities.len()
    );

    let mut players: Vec<_> = opportunities.iter().collect();
    players.sort_by(|a, b| a.0.cmp(b.0));

    for (player, props) in players {
        let _ = writeln!(out, "\n{player}");
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for opp in props {
            render_prop(&mut out, opp);
        }
    }

    out
}

fn render_prop(out: &mut String, opp: &Opportunity) {
    let quote = &opp.quote;
    let _ = writeln!(out, "\n   {} {}", quote.stat, quote.line);
    let _ = writeln!(
        out,
        "   Book Odds: Over {:+} | Under {:+}",
        quote.over_odds, quote.under_odds
    );
    let _ = writeln!(
        out,
        "   No-Vig Win%: Over {:.2}% | Under {:.2}%",
        opp.no_vig.over, opp.no_vig.under
    );

    for side in [Side::Over, Side::Under] {
        let quals = opp.qualifications(side);
        if quals.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n   {side} Recommendations:");
        for q in ranked(quals) {
            let _ = writeln!(out, "      - {q}");
        }
    }
}
