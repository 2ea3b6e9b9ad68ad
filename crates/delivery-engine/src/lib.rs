//! # delivery-engine
//!
//! Deterministic delivery date estimation for storefront orders.
//!
//! Given the date an order was placed and the customer's preferred delivery
//! window, the engine computes the date the order is expected to arrive and
//! the labels shown on order summaries and checkout confirmation. Everything
//! here is a pure function over calendar dates: no clock, no locale lookup,
//! no timezone conversion.
//!
//! ## Modules
//!
//! - [`estimator`] — Receiving date computation, display labels, and the combined estimate
//! - [`window`] — Preferred delivery window labels (currently informational only)
//! - [`error`] — Error types

pub mod error;
pub mod estimator;
pub mod window;

pub use error::DeliveryError;
pub use estimator::{
    compute_receiving_date, day_name, estimate_delivery, format_delivery_date, format_long_date,
    parse_purchase_date, receiving_date, weekday_name, DeliveryEstimate, NOT_SPECIFIED,
};
pub use window::DeliveryWindow;
