//! Handlers for the `participant` command group.

use chrono::Local;
use rust_decimal::Decimal;
use serde_json::json;
use tabled::Tabled;
use tracing::info;

use crate::adapter::inbound::cli::command::{ParticipantAddArgs, ParticipantRef, TransferArgs};
use crate::adapter::inbound::cli::context::Context;
use crate::adapter::inbound::cli::output;
use crate::domain::fee::{fee_rate, fee_tier_label};
use crate::domain::ledger::{LedgerEntry, LedgerKind};
use crate::domain::participant::Participant;
use crate::error::Result;
use crate::port::outbound::ParticipantStore;

#[derive(Tabled)]
struct ParticipantRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Total profit")]
    total_profit: String,
    #[tabled(rename = "Cycle net")]
    cycle_net: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Participant> for ParticipantRow {
    fn from(p: &Participant) -> Self {
        Self {
            name: p.name.clone(),
            role: p.role.to_string(),
            active: if p.active { "yes" } else { "no" },
            principal: format!("{:.2}", p.principal),
            total_profit: format!("{:.2}", p.total_profit),
            cycle_net: format!("{:.2}", p.cycle.net),
            id: p.id.to_string(),
        }
    }
}

fn print_participant(command: &str, title: &str, participant: &Participant) {
    if output::is_json() {
        output::json_output(json!({ "command": command, "participant": participant }));
        return;
    }
    output::success(title);
    output::field("ID", &participant.id);
    output::field("Name", &participant.name);
    output::field("Role", participant.role);
    output::field("Principal", format!("{:.2}", participant.principal));
    output::field("Total profit", output::money(participant.total_profit));
}

/// Execute `participant add`.
pub fn add(ctx: &Context, args: &ParticipantAddArgs) -> Result<()> {
    let participant = Participant::new(args.name.clone(), args.role).with_active(!args.inactive);
    ctx.store.save_participant(&participant)?;
    info!(id = %participant.id, role = %participant.role, "Participant registered");

    let participant = match args.principal {
        Some(amount) if amount != Decimal::ZERO => {
            let entry = LedgerEntry::new(
                participant.id.clone(),
                Local::now().date_naive(),
                amount,
                LedgerKind::Deposit,
            );
            ctx.store.record_transfer(&entry)?
        }
        _ => participant,
    };
    print_participant("participant.add", "Participant registered", &participant);
    Ok(())
}

/// Execute `participant list`.
pub fn list(ctx: &Context) -> Result<()> {
    let participants = ctx.store.list_participants()?;
    let active = participants.iter().filter(|p| p.is_active_investor()).count();

    if output::is_json() {
        output::json_output(json!({
            "command": "participant.list",
            "participants": participants,
            "active_investors": active,
            "fee_rate": fee_rate(active),
        }));
        return Ok(());
    }
    if participants.is_empty() {
        output::note("No participants");
        return Ok(());
    }
    output::table(participants.iter().map(ParticipantRow::from));
    output::field("Investors", format!("{active} active ({})", fee_tier_label(active)));
    output::field("Fee rate", output::percent(fee_rate(active)));
    Ok(())
}

fn transfer(ctx: &Context, args: &TransferArgs, kind: LedgerKind) -> Result<()> {
    let participant = ctx.participant(&args.participant)?;
    let amount = match kind {
        LedgerKind::Withdrawal => -args.amount,
        _ => args.amount,
    };
    let entry = LedgerEntry::new(
        participant.id,
        args.date.unwrap_or_else(|| Local::now().date_naive()),
        amount,
        kind,
    );
    let updated = ctx.store.record_transfer(&entry)?;
    info!(id = %updated.id, kind = %kind, amount = %amount, "Transfer recorded");
    let (command, title) = match kind {
        LedgerKind::Withdrawal => ("participant.withdraw", "Withdrawal recorded"),
        _ => ("participant.deposit", "Deposit recorded"),
    };
    print_participant(command, title, &updated);
    Ok(())
}

/// Execute `participant deposit`.
pub fn deposit(ctx: &Context, args: &TransferArgs) -> Result<()> {
    transfer(ctx, args, LedgerKind::Deposit)
}

/// Execute `participant withdraw`.
pub fn withdraw(ctx: &Context, args: &TransferArgs) -> Result<()> {
    transfer(ctx, args, LedgerKind::Withdrawal)
}

/// Execute `participant reset-cycle`.
pub fn reset_cycle(ctx: &Context, args: &ParticipantRef) -> Result<()> {
    let mut participant = ctx.participant(&args.participant)?;
    participant.reset_cycle();
    ctx.store.save_participant(&participant)?;
    print_participant("participant.reset_cycle", "Cycle reset", &participant);
    Ok(())
}

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Execute `participant ledger`.
pub fn ledger(ctx: &Context, args: &ParticipantRef) -> Result<()> {
    let participant = ctx.participant(&args.participant)?;
    let entries = ctx.store.ledger(&participant.id)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "participant.ledger",
            "participant": participant.id,
            "entries": entries,
        }));
        return Ok(());
    }

    output::section(&format!("Ledger of {}", participant.name));
    if entries.is_empty() {
        output::note("No entries");
        return Ok(());
    }
    output::table(entries.iter().map(|e| LedgerRow {
        date: e.date.to_string(),
        kind: e.kind.to_string(),
        amount: format!("{:.2}", e.amount),
    }));
    // Payouts are already net of fees; FEE lines are informational.
    let capital: Decimal = entries
        .iter()
        .filter(|e| e.kind != LedgerKind::Fee)
        .map(|e| e.amount)
        .sum();
    output::field("Capital", format!("{capital:.2}"));
    Ok(())
}
