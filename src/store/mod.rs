//! Storage for provider schedules, bookings and invoice counters.
//!
//! Only an in-memory store is provided. It is shared by the HTTP layer behind
//! a `tokio::sync::RwLock`.

mod practice_store;

pub use practice_store::{IssuedInvoiceNumber, PracticeStore};
