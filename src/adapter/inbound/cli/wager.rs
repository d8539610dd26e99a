//! Handlers for the `wager` command group.

use chrono::{Local, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tabled::Tabled;
use tracing::info;

use crate::adapter::inbound::cli::command::{
    WagerAddArgs, WagerAmendArgs, WagerListArgs, WagerPairArgs, WagerResolveArgs, WagerSuggestArgs,
};
use crate::adapter::inbound::cli::context::Context;
use crate::adapter::inbound::cli::output;
use crate::domain::arbitrage::{MiddleProfits, Suggestion};
use crate::domain::id::GroupId;
use crate::domain::wager::{check_hedges_paired, pair_wagers, Wager, WagerKind, WagerPair};
use crate::error::Result;
use crate::port::outbound::WagerStore;

#[derive(Tabled)]
struct WagerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Settled")]
    settled: &'static str,
}

impl From<&Wager> for WagerRow {
    fn from(w: &Wager) -> Self {
        Self {
            id: w.id.to_string(),
            date: w.date.to_string(),
            kind: w.kind.to_string(),
            odds: w.odds.to_string(),
            stake: format!("{:.2}", w.stake),
            status: w.status.to_string(),
            profit: w.profit.map_or_else(|| "-".to_string(), |p| format!("{p:.2}")),
            settled: if w.settled { "yes" } else { "no" },
        }
    }
}

fn print_wager(command: &str, title: &str, wager: &Wager) {
    if output::is_json() {
        output::json_output(json!({ "command": command, "wager": wager }));
        return;
    }
    output::success(title);
    output::field("ID", &wager.id);
    output::field("Group", &wager.group_id);
    output::field("Kind", wager.kind);
    output::field("Odds", wager.odds);
    output::field("Stake", format!("{:.2}", wager.stake));
    output::field("Date", wager.date);
    output::field("Status", wager.status);
    if let Some(profit) = wager.profit {
        output::field("Profit", output::money(profit));
    }
}

/// Execute `wager add`.
pub fn add(ctx: &Context, args: &WagerAddArgs) -> Result<()> {
    let group = args.group.as_deref().map_or_else(GroupId::new, GroupId::from);
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut wager = Wager::try_new(
        group,
        args.kind,
        args.odds,
        args.stake,
        date,
        args.event_at.unwrap_or_else(Utc::now),
    )?;
    if let Some(notes) = &args.notes {
        wager = wager.with_notes(notes.clone());
    }

    let book = ctx.store.list_wagers()?;
    if wager.kind == WagerKind::Hedge {
        check_hedges_paired(&[&wager], &book)?;
    }
    // One anchor and one hedge per group.
    let mut group_legs: Vec<Wager> = book
        .into_iter()
        .filter(|w| w.group_id == wager.group_id)
        .collect();
    group_legs.push(wager.clone());
    pair_wagers(&group_legs)?;

    ctx.store.save_wager(&wager)?;
    info!(id = %wager.id, kind = %wager.kind, date = %wager.date, "Wager registered");
    print_wager("wager.add", "Wager registered", &wager);
    Ok(())
}

/// Execute `wager resolve`.
pub fn resolve(ctx: &Context, args: &WagerResolveArgs) -> Result<()> {
    let mut wager = ctx.wager(&args.id)?;
    wager.resolve(args.status)?;
    ctx.store.save_wager(&wager)?;
    info!(id = %wager.id, status = %wager.status, "Wager resolved");
    print_wager("wager.resolve", "Wager resolved", &wager);
    Ok(())
}

/// Execute `wager amend`.
pub fn amend(ctx: &Context, args: &WagerAmendArgs) -> Result<()> {
    let mut wager = ctx.wager(&args.id)?;
    wager.amend(args.odds.unwrap_or(wager.odds), args.stake.unwrap_or(wager.stake))?;
    ctx.store.save_wager(&wager)?;
    print_wager("wager.amend", "Wager amended", &wager);
    Ok(())
}

/// Execute `wager list`.
pub fn list(ctx: &Context, args: &WagerListArgs) -> Result<()> {
    let wagers: Vec<Wager> = ctx
        .store
        .list_wagers()?
        .into_iter()
        .filter(|w| args.date.map_or(true, |d| w.date == d))
        .filter(|w| !args.unsettled || !w.settled)
        .collect();

    if output::is_json() {
        output::json_output(json!({ "command": "wager.list", "wagers": wagers }));
        return Ok(());
    }
    if wagers.is_empty() {
        output::note("No wagers");
        return Ok(());
    }
    output::table(wagers.iter().map(WagerRow::from));
    Ok(())
}

#[derive(Tabled)]
struct PairRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Anchor")]
    anchor: String,
    #[tabled(rename = "Hedge")]
    hedge: String,
    #[tabled(rename = "Turnover")]
    turnover: String,
    #[tabled(rename = "Anchor wins")]
    anchor_only: String,
    #[tabled(rename = "Hedge wins")]
    hedge_only: String,
    #[tabled(rename = "Both win")]
    both: String,
}

/// Execute `wager pair`.
pub fn pair(ctx: &Context, args: &WagerPairArgs) -> Result<()> {
    let book: Vec<Wager> = ctx
        .store
        .list_wagers()?
        .into_iter()
        .filter(|w| args.date.map_or(true, |d| w.date == d))
        .collect();
    let pairs = pair_wagers(&book)?;
    let profits = pairs
        .iter()
        .map(WagerPair::middle_profits)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if output::is_json() {
        let items: Vec<_> = pairs
            .iter()
            .zip(&profits)
            .map(|(p, profits)| {
                json!({
                    "group": p.group_id(),
                    "anchor": p.anchor,
                    "hedge": p.hedge,
                    "turnover": p.turnover(),
                    "profits": profits,
                })
            })
            .collect();
        output::json_output(json!({ "command": "wager.pair", "pairs": items }));
        return Ok(());
    }
    if pairs.is_empty() {
        output::note("No anchors in the book");
        return Ok(());
    }

    let leg = |w: &Wager| format!("{:.2} @ {}", w.stake, w.odds);
    let rows = pairs.iter().zip(&profits).map(|(p, profits)| {
        let cell = |f: fn(&MiddleProfits) -> Decimal| {
            profits.as_ref().map_or_else(|| "-".to_string(), |m| format!("{:.2}", f(m)))
        };
        PairRow {
            group: p.group_id().to_string(),
            anchor: leg(&p.anchor),
            hedge: p.hedge.as_ref().map_or_else(|| "-".to_string(), leg),
            turnover: format!("{:.2}", p.turnover()),
            anchor_only: cell(|m| m.anchor_only),
            hedge_only: cell(|m| m.hedge_only),
            both: cell(|m| m.both),
        }
    });
    output::table(rows);
    Ok(())
}

/// Execute `wager suggest`.
pub fn suggest(ctx: &Context, args: &WagerSuggestArgs) -> Result<()> {
    let wager = ctx.wager(&args.id)?;
    let suggestion = ctx.advisor().complement(&wager, args.target)?;
    let missing = match wager.kind {
        WagerKind::Anchor => WagerKind::Hedge,
        WagerKind::Hedge => WagerKind::Anchor,
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "wager.suggest",
            "wager": wager.id,
            "kind": missing,
            "suggestion": suggestion,
        }));
        return Ok(());
    }

    match suggestion {
        Suggestion::Feasible(quote) => {
            output::section(&format!("Suggested {missing} for group {}", wager.group_id));
            output::field("Odds", format!("{:.3}", quote.odds));
            output::field("Stake", format!("{:.2}", quote.stake));
            output::field("Worst case", output::money(quote.profits.worst_single()));
            output::field("Both win", output::money(quote.profits.both));
            output::hint(&format!(
                "hedgepool wager add --kind {} --group {} --odds {:.3} --stake {:.2}",
                missing.as_str().to_ascii_lowercase(),
                wager.group_id,
                quote.odds,
                quote.stake
            ));
        }
        Suggestion::Infeasible(reason) => {
            output::warning(&format!("No {missing} meets the target: {reason}"));
        }
    }
    Ok(())
}
