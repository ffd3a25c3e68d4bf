// Interview log: append-only CSV persistence, browsing and export.

pub mod handlers;
pub mod store;
