// OTP delivery ledger keyed by phone number.

pub mod data;
pub mod models;

pub use data::LedgerStore;
pub use models::{HourlyCount, HourlyReport, OtpLedgerEntry, UpsertOutcome};
