mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{LoansArgs, ScheduleArgs, SummaryArgs};
use loan_ledger_core::amortization::RoundingPolicy;
use loan_ledger_core::LoanLedgerError;

/// Loan amortization schedules and balance summaries
#[derive(Parser)]
#[command(
    name = "loanctl",
    version,
    about = "Loan amortization schedules and balance summaries",
    long_about = "Computes level-payment amortization schedules and point-in-time \
                  principal/interest summaries with exact decimal arithmetic. Loans \
                  can be given as flags, as a JSON/YAML request, or looked up by id \
                  in a loan book file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Rounding mode for the payment and every reported figure (default: half-up)
    #[arg(long, value_enum, global = true)]
    rounding: Option<RoundingArg>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the month-by-month payment schedule
    Schedule(ScheduleArgs),
    /// Balance and principal/interest paid after a given month
    Summary(SummaryArgs),
    /// List the loans in a loan book
    Loans(LoansArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoundingArg {
    HalfUp,
    HalfEven,
    HalfDown,
    Truncate,
}

impl From<RoundingArg> for RoundingPolicy {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfUp => RoundingPolicy::HalfUp,
            RoundingArg::HalfEven => RoundingPolicy::HalfEven,
            RoundingArg::HalfDown => RoundingPolicy::HalfDown,
            RoundingArg::Truncate => RoundingPolicy::Truncate,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let rounding = cli.rounding.map(RoundingPolicy::from);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::amortization::run_schedule(args, rounding),
        Commands::Summary(args) => commands::amortization::run_summary(args, rounding),
        Commands::Loans(args) => commands::amortization::run_loans(args),
        Commands::Version => {
            println!("loanctl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            let label = match e.downcast_ref::<LoanLedgerError>() {
                Some(LoanLedgerError::NotFound { .. }) => "not found",
                Some(LoanLedgerError::InvalidInput { .. }) => "invalid input",
                _ => "error",
            };
            eprintln!("{}: {}", label.red().bold(), e);
            process::exit(1);
        }
    }
}
