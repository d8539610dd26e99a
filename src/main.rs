use clap::Parser;
use tracing::error;

use hedgepool::adapter::inbound::cli::command::{
    Cli, ColorChoice, Commands, ConfigCommand, ParticipantCommand, WagerCommand,
};
use hedgepool::adapter::inbound::cli::context::Context;
use hedgepool::adapter::inbound::cli::output::{self, OutputConfig};
use hedgepool::adapter::inbound::cli::quote::{self, Leg};
use hedgepool::adapter::inbound::cli::{close, config as config_cmd, fee, history, participant, wager};
use hedgepool::application::advisor::Advisor;
use hedgepool::error::Result;
use hedgepool::infrastructure::config::Config;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::header(env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Must work even when the existing file does not parse.
    if let Commands::Config(ConfigCommand::Init(args)) = &cli.command {
        return config_cmd::execute_init(&cli.config, args.force);
    }

    let config = Config::load_or_default(&cli.config)?;
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error".to_string(),
        (false, 0) => config.logging.level.clone(),
        (false, 1) => "debug".to_string(),
        (false, _) => "trace".to_string(),
    };
    config.logging.init_with_level(&level);

    match &cli.command {
        Commands::Fee(args) => fee::execute(args.count),
        Commands::Hedge(args) => quote::execute(&Advisor::new(config.advisor_defaults()), Leg::Hedge, args),
        Commands::Anchor(args) => {
            quote::execute(&Advisor::new(config.advisor_defaults()), Leg::Anchor, args)
        }
        Commands::Config(ConfigCommand::Show) => config_cmd::execute_show(&cli.config, &config),
        Commands::Config(ConfigCommand::Init(args)) => config_cmd::execute_init(&cli.config, args.force),
        Commands::Wager(command) => {
            let ctx = Context::open(config)?;
            match command {
                WagerCommand::Add(args) => wager::add(&ctx, args),
                WagerCommand::Resolve(args) => wager::resolve(&ctx, args),
                WagerCommand::Amend(args) => wager::amend(&ctx, args),
                WagerCommand::List(args) => wager::list(&ctx, args),
                WagerCommand::Pair(args) => wager::pair(&ctx, args),
                WagerCommand::Suggest(args) => wager::suggest(&ctx, args),
            }
        }
        Commands::Participant(command) => {
            let ctx = Context::open(config)?;
            match command {
                ParticipantCommand::Add(args) => participant::add(&ctx, args),
                ParticipantCommand::List => participant::list(&ctx),
                ParticipantCommand::Deposit(args) => participant::deposit(&ctx, args),
                ParticipantCommand::Withdraw(args) => participant::withdraw(&ctx, args),
                ParticipantCommand::ResetCycle(args) => participant::reset_cycle(&ctx, args),
                ParticipantCommand::Ledger(args) => participant::ledger(&ctx, args),
            }
        }
        Commands::Close(args) => {
            let ctx = Context::open(config)?;
            close::execute(&ctx, args.date, args.notes.clone())
        }
        Commands::History(args) => {
            let ctx = Context::open(config)?;
            history::execute(&ctx, args.from, args.to)
        }
    }
}
