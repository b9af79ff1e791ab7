// Phone Inventory & OTP Ledger - API Core
//
// This crate provides the backend API for managing a pool of phone numbers,
// the OTP delivery ledger keyed by phone, and an auxiliary IP ledger.
// The allocation engine in domains/inventory/allocator.rs claims a random
// unclaimed number transactionally; everything else is request/response glue
// over the store.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
