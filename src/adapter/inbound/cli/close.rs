//! Handler for `hedgepool close`.

use chrono::NaiveDate;
use serde_json::json;

use crate::adapter::inbound::cli::context::Context;
use crate::adapter::inbound::cli::output;
use crate::application::settlement::ClosureOutcome;
use crate::error::Result;

/// Execute `close <date>`.
pub fn execute(ctx: &Context, date: NaiveDate, notes: Option<String>) -> Result<()> {
    let outcome = ctx.settlement().close_day_with_notes(date, notes)?;

    if output::is_json() {
        let record = match &outcome {
            ClosureOutcome::Settled(record) => Some(record),
            ClosureOutcome::NothingToSettle => None,
        };
        output::json_output(json!({
            "command": "close",
            "date": date,
            "settled": outcome.is_settled(),
            "record": record,
        }));
        return Ok(());
    }

    match outcome {
        ClosureOutcome::NothingToSettle => {
            output::note(&format!("Nothing to settle for {date}"));
        }
        ClosureOutcome::Settled(record) => {
            output::success(&format!("Closed {date}"));
            output::field("Wagers", record.wager_count);
            output::field("Turnover", format!("{:.2}", record.turnover));
            output::field("Gross profit", output::money(record.gross_profit));
            output::field("Fees", format!("{:.2}", record.fees_collected));
            output::field("Distributed", output::money(record.net_distributed));
            output::field(
                "Bank",
                format!("{:.2} -> {:.2}", record.bank_start, record.bank_end),
            );
            if record.net_distributed.is_zero() && !record.gross_profit.is_zero() {
                output::warning("No eligible investor; profit was not distributed");
            }
        }
    }
    Ok(())
}
