//! Level-payment amortization: schedules, point-in-time summaries and the
//! shared rounding policy.

pub mod report;
pub mod rounding;
pub mod schedule;
pub mod summary;
pub mod terms;

pub use rounding::{normalize_stored_rate, RoundingPolicy};
pub use schedule::{compute_schedule, compute_schedule_with, level_payment, LoanSchedule, ScheduleEntry};
pub use summary::{compute_summary, compute_summary_with, summarize_loan, LoanSummary};
pub use terms::{LoanTerms, MAX_TERM_MONTHS};
