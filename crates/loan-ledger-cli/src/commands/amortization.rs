use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_ledger_core::amortization::report::{self, ScheduleRequest, SummaryRequest};
use loan_ledger_core::amortization::RoundingPolicy;
use loan_ledger_core::book::LoanRecord;

use crate::input;

/// Where the loan comes from: flags, a request file, a loan book, or stdin.
#[derive(Args)]
pub struct LoanSource {
    /// Path to a JSON/YAML request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON/YAML loan book; use with --loan-id
    #[arg(long, requires = "loan_id")]
    pub book: Option<String>,

    /// Loan id to look up in --book
    #[arg(long)]
    pub loan_id: Option<u64>,

    /// Amount borrowed
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5.5)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<i64>,
}

/// Arguments for listing a loan book
#[derive(Args)]
pub struct LoansArgs {
    /// Path to a JSON/YAML loan book
    #[arg(long)]
    pub book: String,
}

/// Arguments for the payment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub source: LoanSource,
}

/// Arguments for the point-in-time summary
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: LoanSource,

    /// Number of payments made (0 = none yet)
    #[arg(long, allow_hyphen_values = true)]
    pub month: Option<i64>,
}

pub fn run_schedule(
    args: ScheduleArgs,
    rounding: Option<RoundingPolicy>,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.source.book {
        let id = args.source.loan_id.ok_or("--loan-id is required with --book")?;
        let book = input::file::read_book(path)?;
        let result = book.schedule_report_for(id, rounding.unwrap_or_default())?;
        return Ok(serde_json::to_value(result)?);
    }

    let mut request: ScheduleRequest = resolve_request(&args.source)?;
    if let Some(policy) = rounding {
        request.rounding = policy;
    }

    let result = report::build_schedule_report(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(
    args: SummaryArgs,
    rounding: Option<RoundingPolicy>,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.source.book {
        let id = args.source.loan_id.ok_or("--loan-id is required with --book")?;
        let month = args.month.ok_or("--month is required")?;
        let book = input::file::read_book(path)?;
        let result = book.summary_report_for(id, month, rounding.unwrap_or_default())?;
        return Ok(serde_json::to_value(result)?);
    }

    let mut request: SummaryRequest = match resolve_request::<SummaryFields>(&args.source)? {
        SummaryFields::Request(req) => req,
        SummaryFields::Terms(terms) => SummaryRequest {
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            term_months: terms.term_months,
            month_number: args
                .month
                .ok_or("--month is required (or provide --input)")?,
            rounding: terms.rounding,
        },
    };
    if let Some(month) = args.month {
        request.month_number = month;
    }
    if let Some(policy) = rounding {
        request.rounding = policy;
    }

    let result = report::build_summary_report(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_loans(args: LoansArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let book = input::file::read_book(&args.book)?;
    if book.is_empty() {
        tracing::warn!(path = %args.book, "loan book has no loans");
    }
    let loans: Vec<&LoanRecord> = book.records().collect();
    Ok(serde_json::json!({
        "result": {
            "count": book.len(),
            "loans": loans,
        }
    }))
}

/// A summary request either arrives complete (file/stdin) or as bare terms
/// that still need `--month`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SummaryFields {
    Request(SummaryRequest),
    Terms(ScheduleRequest),
}

impl From<ScheduleRequest> for SummaryFields {
    fn from(terms: ScheduleRequest) -> Self {
        SummaryFields::Terms(terms)
    }
}

/// Resolve a non-book loan source into a request. Flags yield bare terms;
/// files and stdin are parsed as `T` directly.
fn resolve_request<T>(source: &LoanSource) -> Result<T, Box<dyn std::error::Error>>
where
    T: serde::de::DeserializeOwned + From<ScheduleRequest>,
{
    if let Some(ref path) = source.input {
        return input::file::read_document(path);
    }

    if source.principal.is_some() || source.rate.is_some() || source.term.is_some() {
        return Ok(T::from(terms_from_flags(source)?));
    }

    if let Some(request) = input::stdin::read_stdin()? {
        return Ok(request);
    }

    Err("provide --principal/--rate/--term, --input <file>, --book <file> --loan-id <id>, or a request on stdin".into())
}

fn terms_from_flags(source: &LoanSource) -> Result<ScheduleRequest, Box<dyn std::error::Error>> {
    Ok(ScheduleRequest {
        principal: source
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: source
            .rate
            .ok_or("--rate is required (or provide --input)")?,
        term_months: source.term.ok_or("--term is required (or provide --input)")?,
        rounding: RoundingPolicy::default(),
    })
}
