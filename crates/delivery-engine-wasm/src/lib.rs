//! WASM bindings for the delivery date estimator.
//!
//! Exposes the estimator to the storefront's JavaScript under the same
//! camelCase names the order summary and checkout views call. Absent dates
//! are `undefined`/`null` on the JS side; invalid dates throw an `Error`.

use wasm_bindgen::prelude::*;

/// Receiving date (ISO `YYYY-MM-DD`) for a purchase date, or `undefined` when there is none.
#[wasm_bindgen(js_name = computeReceivingDate)]
pub fn compute_receiving_date(
    purchase_date: Option<String>,
    preferred_delivery_time: Option<String>,
) -> Result<Option<String>, JsError> {
    receiving_date_iso(
        purchase_date.as_deref(),
        preferred_delivery_time.as_deref().unwrap_or_default(),
    )
    .map_err(|e| JsError::new(&e))
}

/// Long-form label (e.g., "Monday, January 8, 2024") or "Not specified".
#[wasm_bindgen(js_name = formatDeliveryDate)]
pub fn format_delivery_date(date: Option<String>) -> Result<String, JsError> {
    delivery_engine::format_delivery_date(date.as_deref())
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Full weekday name, or an empty string when there is no date.
#[wasm_bindgen(js_name = getDayName)]
pub fn get_day_name(date: Option<String>) -> Result<String, JsError> {
    delivery_engine::day_name(date.as_deref()).map_err(|e| JsError::new(&e.to_string()))
}

/// Full delivery estimate as a JSON string.
#[wasm_bindgen(js_name = estimateDelivery)]
pub fn estimate_delivery(
    purchase_date: Option<String>,
    preferred_delivery_time: Option<String>,
) -> Result<String, JsError> {
    estimate_json(
        purchase_date.as_deref(),
        preferred_delivery_time.as_deref().unwrap_or_default(),
    )
    .map_err(|e| JsError::new(&e))
}

// JsError can only be constructed on wasm targets, so the fallible work lives
// in plain functions that native tests can call.

fn receiving_date_iso(purchase: Option<&str>, preferred: &str) -> Result<Option<String>, String> {
    delivery_engine::compute_receiving_date(purchase, preferred)
        .map(|date| date.map(|d| d.to_string()))
        .map_err(|e| e.to_string())
}

fn estimate_json(purchase: Option<&str>, preferred: &str) -> Result<String, String> {
    let estimate =
        delivery_engine::estimate_delivery(purchase, preferred).map_err(|e| e.to_string())?;
    serde_json::to_string(&estimate).map_err(|e| e.to_string())
}
