pub mod inventory;
pub mod ips;
pub mod ledger;
