//! Handler for `hedgepool history`.

use chrono::NaiveDate;
use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::context::Context;
use crate::adapter::inbound::cli::output;
use crate::domain::history::{DailyRecord, HistorySummary};
use crate::error::Result;
use crate::port::outbound::HistoryStore;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Wagers")]
    wagers: u32,
    #[tabled(rename = "Turnover")]
    turnover: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Fees")]
    fees: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Bank end")]
    bank_end: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&DailyRecord> for HistoryRow {
    fn from(r: &DailyRecord) -> Self {
        Self {
            date: r.date.to_string(),
            wagers: r.wager_count,
            turnover: format!("{:.2}", r.turnover),
            gross: format!("{:.2}", r.gross_profit),
            fees: format!("{:.2}", r.fees_collected),
            net: format!("{:.2}", r.net_distributed),
            bank_end: format!("{:.2}", r.bank_end),
            notes: r.notes.clone().unwrap_or_default(),
        }
    }
}

/// Execute `history [--from] [--to]`.
pub fn execute(ctx: &Context, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let records: Vec<DailyRecord> = ctx
        .store
        .list_history()?
        .into_iter()
        .filter(|r| from.map_or(true, |f| r.date >= f))
        .filter(|r| to.map_or(true, |t| r.date <= t))
        .collect();
    let summary = HistorySummary::from_records(&records, None, None);

    if output::is_json() {
        output::json_output(json!({
            "command": "history",
            "records": records,
            "summary": summary,
            "win_rate": summary.win_rate(),
            "yield": summary.yield_rate(),
        }));
        return Ok(());
    }

    if records.is_empty() {
        output::note("No closed days in range");
        return Ok(());
    }

    output::table(records.iter().map(HistoryRow::from));
    output::section("Summary");
    output::field("Days", summary.days);
    output::field("Wagers", summary.wagers);
    output::field("Turnover", format!("{:.2}", summary.turnover));
    output::field("Gross profit", output::money(summary.gross_profit));
    output::field("Fees", format!("{:.2}", summary.fees_collected));
    output::field("Distributed", output::money(summary.net_distributed));
    output::field(
        "Win rate",
        summary
            .win_rate()
            .map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}%")),
    );
    output::field(
        "Yield",
        summary
            .yield_rate()
            .map_or_else(|| "N/A".to_string(), output::percent),
    );
    Ok(())
}
