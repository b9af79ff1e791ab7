// Phone-number pool: CRUD, bulk import, and the random allocator.

pub mod allocator;
pub mod data;
pub mod import;
pub mod models;

pub use data::InventoryStore;
pub use models::PhoneRecord;
