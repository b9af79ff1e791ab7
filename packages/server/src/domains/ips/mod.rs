// IP-reputation ledger.

pub mod data;
pub mod models;

pub use data::IpStore;
pub use models::IpEntry;
