//! Value coercion rules for table cell text.
//!
//! Every rule is best-effort: text that does not parse yields `None`,
//! never an error.

pub mod numbers;

pub use numbers::{is_placeholder_dash, parse_currency_to_cents, parse_numeric, to_cents};
