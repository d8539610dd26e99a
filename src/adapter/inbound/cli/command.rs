//! Command-line interface definitions.
//!
//! Defines the CLI structure for the hedgepool application using `clap`:
//! calculators that need no storage (`fee`, `hedge`, `anchor`) and the book,
//! participant and closure commands backed by the SQLite store.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use super::paths;
use crate::domain::participant::Role;
use crate::domain::wager::{WagerKind, WagerStatus};

/// Pooled wager settlement, fee tiers and hedge advice
#[derive(Parser, Debug)]
#[command(name = "hedgepool")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(long, global = true, default_value = "auto", hide_possible_values = true)]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the hedgepool CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the fee rate for a number of active investors
    Fee(FeeArgs),

    /// Suggest a hedge for a placed anchor
    Hedge(QuoteArgs),

    /// Suggest an anchor for a placed hedge
    Anchor(QuoteArgs),

    /// Manage the wager book
    #[command(subcommand)]
    Wager(WagerCommand),

    /// Manage participants and their capital
    #[command(subcommand)]
    Participant(ParticipantCommand),

    /// Close a day: settle its resolved wagers and distribute the profit
    Close(CloseArgs),

    /// Show daily history and summary
    History(HistoryArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `hedgepool fee`.
#[derive(Parser, Debug)]
pub struct FeeArgs {
    /// Number of active investors
    pub count: usize,
}

/// Arguments for `hedgepool hedge` and `hedgepool anchor`.
#[derive(Parser, Debug)]
pub struct QuoteArgs {
    /// Decimal odds of the placed leg
    #[arg(long)]
    pub odds: Decimal,

    /// Stake of the placed leg
    #[arg(long)]
    pub stake: Decimal,

    /// Target profit in percent of the placed stake [default: from config]
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Odds buffer added to the break-even odds [default: from config]
    #[arg(long, conflicts_with = "presets")]
    pub buffer: Option<Decimal>,

    /// Quote every configured buffer preset
    #[arg(long)]
    pub presets: bool,
}

/// Subcommands for `hedgepool wager`.
#[derive(Subcommand, Debug)]
pub enum WagerCommand {
    /// Register a pending wager
    Add(WagerAddArgs),
    /// Record the outcome of a pending wager
    Resolve(WagerResolveArgs),
    /// Correct odds or stake of a pending wager
    Amend(WagerAmendArgs),
    /// List wagers
    List(WagerListArgs),
    /// Show anchor/hedge pairs with their middle profits
    Pair(WagerPairArgs),
    /// Suggest the missing leg for a wager in the book
    Suggest(WagerSuggestArgs),
}

/// Arguments for `wager add`.
#[derive(Parser, Debug)]
pub struct WagerAddArgs {
    /// Leg kind [anchor, hedge]
    #[arg(long)]
    pub kind: WagerKind,

    /// Decimal odds (> 1)
    #[arg(long)]
    pub odds: Decimal,

    /// Stake (> 0)
    #[arg(long)]
    pub stake: Decimal,

    /// Settlement date (YYYY-MM-DD) [default: today]
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Group shared by an anchor and its hedge [default: new group]
    #[arg(long)]
    pub group: Option<String>,

    /// Event start time (RFC 3339) [default: now]
    #[arg(long)]
    pub event_at: Option<DateTime<Utc>>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `wager resolve`.
#[derive(Parser, Debug)]
pub struct WagerResolveArgs {
    /// Wager ID
    pub id: String,

    /// Outcome [won, half-won, lost, half-lost, void]
    pub status: WagerStatus,
}

/// Arguments for `wager amend`.
#[derive(Parser, Debug)]
pub struct WagerAmendArgs {
    /// Wager ID
    pub id: String,

    /// New decimal odds
    #[arg(long)]
    pub odds: Option<Decimal>,

    /// New stake
    #[arg(long)]
    pub stake: Option<Decimal>,
}

/// Arguments for `wager list`.
#[derive(Parser, Debug)]
pub struct WagerListArgs {
    /// Only wagers for this date
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Only wagers not yet settled
    #[arg(long)]
    pub unsettled: bool,
}

/// Arguments for `wager pair`.
#[derive(Parser, Debug)]
pub struct WagerPairArgs {
    /// Only pairs for this date
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for `wager suggest`.
#[derive(Parser, Debug)]
pub struct WagerSuggestArgs {
    /// Wager ID
    pub id: String,

    /// Target profit in percent [default: from config]
    #[arg(long)]
    pub target: Option<Decimal>,
}

/// Subcommands for `hedgepool participant`.
#[derive(Subcommand, Debug)]
pub enum ParticipantCommand {
    /// Register a participant
    Add(ParticipantAddArgs),
    /// List participants
    List,
    /// Record an approved deposit
    Deposit(TransferArgs),
    /// Record an approved withdrawal
    Withdraw(TransferArgs),
    /// Zero the per-cycle counters
    ResetCycle(ParticipantRef),
    /// Show the ledger of a participant
    Ledger(ParticipantRef),
}

/// Arguments for `participant add`.
#[derive(Parser, Debug)]
pub struct ParticipantAddArgs {
    /// Display name
    pub name: String,

    /// Role [investor, manager]
    #[arg(long, default_value = "investor")]
    pub role: Role,

    /// Initial principal, recorded as a deposit
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Register as inactive
    #[arg(long)]
    pub inactive: bool,
}

/// Participant given by ID or name.
#[derive(Parser, Debug)]
pub struct ParticipantRef {
    /// Participant ID or name
    pub participant: String,
}

/// Arguments for `participant deposit` and `participant withdraw`.
#[derive(Parser, Debug)]
pub struct TransferArgs {
    /// Participant ID or name
    pub participant: String,

    /// Amount (positive)
    pub amount: Decimal,

    /// Entry date [default: today]
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for `hedgepool close`.
#[derive(Parser, Debug)]
pub struct CloseArgs {
    /// Date to close (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Notes stored on the daily record
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `hedgepool history`.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// First date (inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date (inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

/// Subcommands for `hedgepool config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied
    Show,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_name() {
        assert_eq!(Cli::command().get_name(), "hedgepool");
    }

    #[test]
    fn parse_fee() {
        let cli = Cli::try_parse_from(["hedgepool", "fee", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Fee(FeeArgs { count: 3 })));
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["hedgepool", "fee", "3", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_hedge_quote() {
        let cli = Cli::try_parse_from([
            "hedgepool", "hedge", "--odds", "2.10", "--stake", "100", "--target", "10",
        ])
        .unwrap();
        let Commands::Hedge(args) = cli.command else {
            panic!("expected hedge");
        };
        assert_eq!(args.odds, dec!(2.10));
        assert_eq!(args.stake, dec!(100));
        assert_eq!(args.target, Some(dec!(10)));
        assert_eq!(args.buffer, None);
    }

    #[test]
    fn buffer_conflicts_with_presets() {
        let result = Cli::try_parse_from([
            "hedgepool", "hedge", "--odds", "2", "--stake", "1", "--buffer", "0.1", "--presets",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_wager_add() {
        let cli = Cli::try_parse_from([
            "hedgepool", "wager", "add", "--kind", "anchor", "--odds", "1.9", "--stake", "50",
            "--date", "2026-08-09",
        ])
        .unwrap();
        let Commands::Wager(WagerCommand::Add(args)) = cli.command else {
            panic!("expected wager add");
        };
        assert_eq!(args.kind, WagerKind::Anchor);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 8, 9));
    }

    #[test]
    fn parse_wager_resolve_status() {
        let cli = Cli::try_parse_from(["hedgepool", "wager", "resolve", "abc", "half-won"]).unwrap();
        let Commands::Wager(WagerCommand::Resolve(args)) = cli.command else {
            panic!("expected wager resolve");
        };
        assert_eq!(args.status, WagerStatus::HalfWon);
    }

    #[test]
    fn parse_participant_role_defaults_to_investor() {
        let cli = Cli::try_parse_from(["hedgepool", "participant", "add", "alice"]).unwrap();
        let Commands::Participant(ParticipantCommand::Add(args)) = cli.command else {
            panic!("expected participant add");
        };
        assert_eq!(args.role, Role::Investor);
        assert!(!args.inactive);
    }

    #[test]
    fn invalid_close_date_rejected() {
        assert!(Cli::try_parse_from(["hedgepool", "close", "2026-13-01"]).is_err());
    }
}
