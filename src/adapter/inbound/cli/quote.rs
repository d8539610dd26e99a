//! Handlers for `hedgepool hedge` and `hedgepool anchor`.

use serde_json::json;

use crate::adapter::inbound::cli::command::QuoteArgs;
use crate::adapter::inbound::cli::output;
use crate::application::advisor::{Advisor, BufferedSuggestion};
use crate::domain::arbitrage::Suggestion;
use crate::error::Result;

/// Which leg is being solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Hedge,
    Anchor,
}

impl Leg {
    const fn name(self) -> &'static str {
        match self {
            Self::Hedge => "hedge",
            Self::Anchor => "anchor",
        }
    }
}

/// Execute `hedge` or `anchor`.
pub fn execute(advisor: &Advisor, leg: Leg, args: &QuoteArgs) -> Result<()> {
    if args.presets && leg == Leg::Hedge {
        let list = advisor.hedge_presets(args.odds, args.stake, args.target)?;
        print_presets(&list);
        return Ok(());
    }

    let buffers: Vec<_> = if args.presets {
        advisor.defaults().buffer_presets.clone()
    } else {
        vec![args.buffer.unwrap_or(advisor.defaults().odds_buffer)]
    };
    let list = buffers
        .into_iter()
        .map(|buffer| {
            let suggestion = match leg {
                Leg::Hedge => advisor.hedge(args.odds, args.stake, args.target, Some(buffer)),
                Leg::Anchor => advisor.anchor(args.odds, args.stake, args.target, Some(buffer)),
            }?;
            Ok(BufferedSuggestion { buffer, suggestion })
        })
        .collect::<Result<Vec<_>>>()?;

    if args.presets {
        print_presets(&list);
    } else if let Some(first) = list.first() {
        print_single(leg, first);
    }
    Ok(())
}

fn print_single(leg: Leg, item: &BufferedSuggestion) {
    if output::is_json() {
        output::json_output(json!({
            "command": leg.name(),
            "buffer": item.buffer,
            "suggestion": item.suggestion,
        }));
        return;
    }

    match &item.suggestion {
        Suggestion::Feasible(quote) => {
            output::section(&format!("Suggested {}", leg.name()));
            output::field("Odds", format!("{:.3}", quote.odds));
            output::field("Min odds", output::muted(format!("{:.3}", quote.min_odds)));
            output::field("Stake", format!("{:.2}", quote.stake));
            output::field("Target", format!("{:.2}", quote.target));
            output::section("Profit by outcome");
            output::field("Anchor wins", output::money(quote.profits.anchor_only));
            output::field("Hedge wins", output::money(quote.profits.hedge_only));
            output::field("Both win", output::money(quote.profits.both));
        }
        Suggestion::Infeasible(reason) => {
            output::warning(&format!("No {} meets the target: {reason}", leg.name()));
            output::hint("lower --target or use a leg with better odds");
        }
    }
}

#[derive(tabled::Tabled)]
struct PresetRow {
    #[tabled(rename = "Buffer")]
    buffer: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Worst case")]
    worst: String,
    #[tabled(rename = "Both win")]
    both: String,
}

fn print_presets(list: &[BufferedSuggestion]) {
    if output::is_json() {
        output::json_output(json!({
            "command": "presets",
            "suggestions": list
                .iter()
                .map(|item| json!({ "buffer": item.buffer, "suggestion": item.suggestion }))
                .collect::<Vec<_>>(),
        }));
        return;
    }

    let rows = list.iter().map(|item| match item.suggestion.quote() {
        Some(quote) => PresetRow {
            buffer: item.buffer.to_string(),
            odds: format!("{:.3}", quote.odds),
            stake: format!("{:.2}", quote.stake),
            worst: format!("{:.2}", quote.profits.worst_single()),
            both: format!("{:.2}", quote.profits.both),
        },
        None => PresetRow {
            buffer: item.buffer.to_string(),
            odds: "-".into(),
            stake: "-".into(),
            worst: "-".into(),
            both: "-".into(),
        },
    });
    output::table(rows);
}
