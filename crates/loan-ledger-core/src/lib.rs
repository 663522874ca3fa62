//! Level-payment loan amortization with exact decimal arithmetic.
//!
//! The engine turns a principal, an annual percentage rate and a term in
//! months into a month-by-month schedule, and reconstructs the outstanding
//! balance and cumulative principal/interest split as of any month.
//!
//! ```rust
//! use loan_ledger_core::amortization::{compute_schedule, compute_summary};
//! use rust_decimal_macros::dec;
//!
//! let schedule = compute_schedule(dec!(10000), dec!(3), 12).unwrap();
//! assert_eq!(schedule[0].monthly_payment, dec!(846.94));
//!
//! let summary = compute_summary(dec!(10000), 6, &schedule).unwrap();
//! assert_eq!(summary.current_principal_balance, dec!(5037.43));
//! ```

pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "book")]
pub mod book;

pub use error::LoanLedgerError;
pub use types::*;

/// Standard result type for all loan-ledger operations
pub type LoanLedgerResult<T> = Result<T, LoanLedgerError>;
