// === PUBLIC CONTRACT ===
// Plain models shared across layers.
pub mod contract;

pub use contract::model;

// === INTERNAL LAYERS ===
// Exposed for the server binary and integration tests; the stable surface
// for other consumers is the contract module plus the REST router.
pub mod api;
pub mod domain;
pub mod infra;
