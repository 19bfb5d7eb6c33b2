//! Daily statistics reconciliation.
//!
//! The upstream API reports per-observation intra-period extrema under a
//! number of alternate field spellings, and some response variants omit
//! them entirely. This module normalizes the spellings into per-metric
//! sample sets ([`fields`]), reduces each set to a (min, max) pair with
//! deterministic timestamp attribution ([`reduce`]), and applies a
//! tiered fallback so every output field is either a finite number or a
//! definite `null` ([`fallback`]).

mod fallback;
mod fields;
mod reduce;

pub use fallback::{compute_stats, plain_minmax};
