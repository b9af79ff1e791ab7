// HTTP routes
pub mod health;
pub mod inventory;
pub mod ips;
pub mod ledger;
pub mod tool;
