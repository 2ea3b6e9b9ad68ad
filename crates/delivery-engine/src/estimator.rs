//! Receiving date estimation.
//!
//! Pure functions that turn an order's purchase date into the date the
//! customer should expect the parcel, plus the labels the storefront shows
//! next to it. All arithmetic is on naive calendar dates: a purchase date is
//! taken exactly as written, and no timezone is ever applied to it.
//!
//! # Rules
//!
//! - A purchase placed on a **Sunday** is received the following Monday.
//! - Every other weekday, Saturday included, is received the same day.
//! - The preferred delivery window is carried along but never moves the date.
//!
//! # Absent input
//!
//! A missing (or empty) purchase date is not an error. It flows through as
//! `None`, formats as [`NOT_SPECIFIED`], and has an empty day name. Non-empty
//! text that is not a date is rejected with [`DeliveryError::InvalidDate`].
//!
//! # Functions
//!
//! - [`compute_receiving_date`] — Purchase date text → receiving date
//! - [`format_delivery_date`] — Date text → long-form label
//! - [`day_name`] — Date text → weekday name
//! - [`estimate_delivery`] — All of the above in one serializable bundle

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

use crate::error::DeliveryError;
use crate::window::DeliveryWindow;

/// Label shown when an order carries no date.
pub const NOT_SPECIFIED: &str = "Not specified";

// ── parse_purchase_date ─────────────────────────────────────────────────────

/// Parse a purchase date from the forms the storefront stores on orders.
///
/// Accepted forms, all reduced to the calendar date as written:
///
/// - `YYYY-MM-DD` (e.g., `"2024-01-07"`)
/// - RFC 3339 with offset (e.g., `"2024-01-07T23:30:00-05:00"` → 2024-01-07)
/// - naive ISO datetime (e.g., `"2024-01-07T10:00:00"` or with fractional seconds)
///
/// Surrounding whitespace is ignored. Empty text means "no date" and returns `Ok(None)`.
///
/// # Errors
///
/// Returns [`DeliveryError::InvalidDate`] for any other non-empty text, including
/// well-formed strings that name a day that does not exist (`"2024-02-30"`).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use delivery_engine::parse_purchase_date;
///
/// let date = parse_purchase_date("2024-01-07T23:30:00-05:00").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 7));
/// assert_eq!(parse_purchase_date("  ").unwrap(), None);
/// ```
pub fn parse_purchase_date(text: &str) -> Result<Option<NaiveDate>, DeliveryError> {
    let s = text.trim();
    if s.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = s.parse::<NaiveDate>() {
        return Ok(Some(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        // Local date of the written offset, not the UTC date.
        return Ok(Some(dt.date_naive()));
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Ok(Some(dt.date()));
    }

    Err(DeliveryError::InvalidDate(format!(
        "'{}': expected YYYY-MM-DD or an ISO 8601 datetime",
        s
    )))
}

/// Parse optional date text; `None` and empty text are both absent.
fn parse_optional(text: Option<&str>) -> Result<Option<NaiveDate>, DeliveryError> {
    match text {
        Some(s) => parse_purchase_date(s),
        None => Ok(None),
    }
}

// ── compute_receiving_date ──────────────────────────────────────────────────

/// Compute the receiving date for a purchase date.
///
/// A Sunday moves forward exactly one day to Monday; every other date is
/// returned unchanged. `preferred` is accepted for future window-based rules
/// and currently has no effect on the result.
///
/// # Errors
///
/// Returns [`DeliveryError::OutOfRange`] if `purchase` is a Sunday at the very
/// end of the representable date range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use delivery_engine::{receiving_date, DeliveryWindow};
///
/// let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
/// let result = receiving_date(sunday, &DeliveryWindow::Morning).unwrap();
/// assert_eq!(result, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
/// ```
pub fn receiving_date(
    purchase: NaiveDate,
    _preferred: &DeliveryWindow,
) -> Result<NaiveDate, DeliveryError> {
    if purchase.weekday() != Weekday::Sun {
        return Ok(purchase);
    }
    purchase
        .succ_opt()
        .ok_or_else(|| DeliveryError::OutOfRange(format!("no day after {}", purchase)))
}

/// Compute the receiving date from purchase date text.
///
/// # Arguments
///
/// * `purchase` — The order's purchase date (see [`parse_purchase_date`] for
///   accepted forms); `None` or empty when the order has no date
/// * `preferred` — The customer's preferred delivery window label (e.g., `"morning"`);
///   currently informational only
///
/// # Returns
///
/// `Ok(None)` when there is no purchase date, otherwise the receiving date.
///
/// # Errors
///
/// Returns [`DeliveryError::InvalidDate`] if `purchase` is non-empty and not a date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use delivery_engine::compute_receiving_date;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// assert_eq!(compute_receiving_date(Some("2024-01-07"), "evening").unwrap(), Some(monday));
/// assert_eq!(compute_receiving_date(None, "evening").unwrap(), None);
/// ```
pub fn compute_receiving_date(
    purchase: Option<&str>,
    preferred: &str,
) -> Result<Option<NaiveDate>, DeliveryError> {
    let window = DeliveryWindow::parse(preferred);
    parse_optional(purchase)?
        .map(|date| receiving_date(date, &window))
        .transpose()
}

// ── Display labels ──────────────────────────────────────────────────────────

/// Long-form en-US label, e.g. `"Monday, January 8, 2024"`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Full English weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Format date text for display.
///
/// Returns [`NOT_SPECIFIED`] when there is no date, otherwise the long form
/// from [`format_long_date`].
///
/// # Errors
///
/// Returns [`DeliveryError::InvalidDate`] if `date` is non-empty and not a date.
///
/// # Examples
///
/// ```
/// use delivery_engine::format_delivery_date;
///
/// assert_eq!(format_delivery_date(Some("2024-01-08")).unwrap(), "Monday, January 8, 2024");
/// assert_eq!(format_delivery_date(None).unwrap(), "Not specified");
/// ```
pub fn format_delivery_date(date: Option<&str>) -> Result<String, DeliveryError> {
    Ok(parse_optional(date)?
        .map(format_long_date)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string()))
}

/// Weekday name for date text, or an empty string when there is no date.
///
/// # Errors
///
/// Returns [`DeliveryError::InvalidDate`] if `date` is non-empty and not a date.
pub fn day_name(date: Option<&str>) -> Result<String, DeliveryError> {
    Ok(parse_optional(date)?
        .map(|d| weekday_name(d.weekday()).to_string())
        .unwrap_or_default())
}

// ── estimate_delivery ───────────────────────────────────────────────────────

/// Everything the storefront shows about an order's expected arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryEstimate {
    /// The parsed purchase date (ISO 8601), or null when the order has none.
    pub purchase_date: Option<NaiveDate>,
    /// The estimated receiving date (ISO 8601), or null when there is no purchase date.
    pub receiving_date: Option<NaiveDate>,
    /// Long-form receiving date (e.g., "Monday, January 8, 2024") or "Not specified".
    pub formatted: String,
    /// Receiving weekday name, empty when there is no purchase date.
    pub day_name: String,
    /// The preferred delivery window, echoed back.
    pub preferred_delivery_time: DeliveryWindow,
    /// Whether the purchase date fell on a Sunday and was moved to Monday.
    pub shifted_from_sunday: bool,
}

/// Estimate delivery for an order in one call.
///
/// # Errors
///
/// Returns [`DeliveryError::InvalidDate`] if `purchase` is non-empty and not a date.
///
/// # Examples
///
/// ```
/// use delivery_engine::estimate_delivery;
///
/// let estimate = estimate_delivery(Some("2024-01-07"), "morning").unwrap();
/// assert_eq!(estimate.formatted, "Monday, January 8, 2024");
/// assert!(estimate.shifted_from_sunday);
/// ```
pub fn estimate_delivery(
    purchase: Option<&str>,
    preferred: &str,
) -> Result<DeliveryEstimate, DeliveryError> {
    let window = DeliveryWindow::parse(preferred);
    let purchase_date = parse_optional(purchase)?;
    let receiving = purchase_date
        .map(|date| receiving_date(date, &window))
        .transpose()?;

    Ok(DeliveryEstimate {
        purchase_date,
        receiving_date: receiving,
        formatted: receiving
            .map(format_long_date)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        day_name: receiving
            .map(|d| weekday_name(d.weekday()).to_string())
            .unwrap_or_default(),
        preferred_delivery_time: window,
        shifted_from_sunday: purchase_date != receiving,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── parse_purchase_date tests ───────────────────────────────────────

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_purchase_date("2024-01-07").unwrap(), Some(ymd(2024, 1, 7)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_purchase_date(" 2024-01-07\n").unwrap(), Some(ymd(2024, 1, 7)));
    }

    #[test]
    fn test_parse_empty_is_absent() {
        assert_eq!(parse_purchase_date("").unwrap(), None);
        assert_eq!(parse_purchase_date("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_rfc3339_keeps_written_date() {
        // 23:30 at -05:00 is already Monday in UTC; the written date wins
        let date = parse_purchase_date("2024-01-07T23:30:00-05:00").unwrap();
        assert_eq!(date, Some(ymd(2024, 1, 7)));
    }

    #[test]
    fn test_parse_rfc3339_utc() {
        let date = parse_purchase_date("2024-01-08T00:15:00Z").unwrap();
        assert_eq!(date, Some(ymd(2024, 1, 8)));
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(
            parse_purchase_date("2024-01-07T10:00:00").unwrap(),
            Some(ymd(2024, 1, 7))
        );
        assert_eq!(
            parse_purchase_date("2024-01-07T10:00:00.250").unwrap(),
            Some(ymd(2024, 1, 7))
        );
    }

    #[test]
    fn test_parse_garbage_returns_error() {
        let err = parse_purchase_date("not-a-date").unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidDate(_)));
        assert!(err.to_string().contains("not-a-date"), "got: {err}");
    }

    #[test]
    fn test_parse_nonexistent_day_returns_error() {
        assert!(matches!(
            parse_purchase_date("2024-02-30"),
            Err(DeliveryError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_leap_day() {
        assert_eq!(parse_purchase_date("2024-02-29").unwrap(), Some(ymd(2024, 2, 29)));
        assert!(parse_purchase_date("2023-02-29").is_err());
    }

    // ── receiving date tests ────────────────────────────────────────────

    #[test]
    fn test_sunday_moves_to_monday() {
        let result = compute_receiving_date(Some("2024-01-07"), "").unwrap();
        assert_eq!(result, Some(ymd(2024, 1, 8)));
        assert_eq!(result.unwrap().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_monday_unchanged() {
        let result = compute_receiving_date(Some("2024-01-08"), "").unwrap();
        assert_eq!(result, Some(ymd(2024, 1, 8)));
    }

    #[test]
    fn test_saturday_unchanged() {
        let result = compute_receiving_date(Some("2024-01-06"), "morning").unwrap();
        assert_eq!(result, Some(ymd(2024, 1, 6)));
    }

    #[test]
    fn test_every_weekday_except_sunday_unchanged() {
        // Mon Jan 8 .. Sat Jan 13, 2024
        for day in 8..=13 {
            let date = ymd(2024, 1, day);
            assert_eq!(receiving_date(date, &DeliveryWindow::Unspecified).unwrap(), date);
        }
    }

    #[test]
    fn test_sunday_across_month_boundary() {
        // Sun Mar 31, 2024
        let result = compute_receiving_date(Some("2024-03-31"), "").unwrap();
        assert_eq!(result, Some(ymd(2024, 4, 1)));
    }

    #[test]
    fn test_sunday_across_year_boundary() {
        // Sun Dec 31, 2023
        let result = compute_receiving_date(Some("2023-12-31"), "").unwrap();
        assert_eq!(result, Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_sunday_datetime_input_moves_to_monday() {
        let result = compute_receiving_date(Some("2024-01-07T23:30:00-05:00"), "").unwrap();
        assert_eq!(result, Some(ymd(2024, 1, 8)));
    }

    #[test]
    fn test_absent_purchase_date_is_none() {
        assert_eq!(compute_receiving_date(None, "").unwrap(), None);
        assert_eq!(compute_receiving_date(None, "evening").unwrap(), None);
        assert_eq!(compute_receiving_date(Some(""), "morning").unwrap(), None);
    }

    #[test]
    fn test_invalid_purchase_date_is_error() {
        assert!(compute_receiving_date(Some("yesterday"), "").is_err());
    }

    #[test]
    fn test_window_does_not_affect_date() {
        let labels = ["", "morning", "afternoon", "evening", "whenever"];
        for label in labels {
            assert_eq!(
                compute_receiving_date(Some("2024-01-07"), label).unwrap(),
                Some(ymd(2024, 1, 8))
            );
        }
    }

    #[test]
    fn test_receiving_date_is_idempotent() {
        let once = receiving_date(ymd(2024, 1, 7), &DeliveryWindow::Evening).unwrap();
        let twice = receiving_date(once, &DeliveryWindow::Evening).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sunday_at_max_date_is_out_of_range() {
        // Only NaiveDate::MAX can overflow, and only if it is a Sunday
        let max = NaiveDate::MAX;
        let result = receiving_date(max, &DeliveryWindow::Unspecified);
        if max.weekday() == Weekday::Sun {
            assert!(matches!(result, Err(DeliveryError::OutOfRange(_))));
        } else {
            assert_eq!(result.unwrap(), max);
        }
    }

    // ── Display label tests ─────────────────────────────────────────────

    #[test]
    fn test_format_delivery_date() {
        assert_eq!(
            format_delivery_date(Some("2024-01-08")).unwrap(),
            "Monday, January 8, 2024"
        );
    }

    #[test]
    fn test_format_two_digit_day() {
        assert_eq!(
            format_delivery_date(Some("2025-11-27")).unwrap(),
            "Thursday, November 27, 2025"
        );
    }

    #[test]
    fn test_format_absent_is_not_specified() {
        assert_eq!(format_delivery_date(None).unwrap(), "Not specified");
        assert_eq!(format_delivery_date(Some("")).unwrap(), NOT_SPECIFIED);
    }

    #[test]
    fn test_format_invalid_is_error() {
        assert!(format_delivery_date(Some("08/01/2024")).is_err());
    }

    #[test]
    fn test_day_name() {
        assert_eq!(day_name(Some("2024-01-07")).unwrap(), "Sunday");
        assert_eq!(day_name(Some("2024-01-06")).unwrap(), "Saturday");
    }

    #[test]
    fn test_day_name_absent_is_empty() {
        assert_eq!(day_name(None).unwrap(), "");
        assert_eq!(day_name(Some(" ")).unwrap(), "");
    }

    #[test]
    fn test_weekday_name_matches_chrono_long_form() {
        for day in 1..=7 {
            let date = ymd(2024, 1, day);
            assert_eq!(
                weekday_name(date.weekday()),
                date.format("%A").to_string()
            );
        }
    }

    // ── estimate_delivery tests ─────────────────────────────────────────

    #[test]
    fn test_estimate_sunday_purchase() {
        let estimate = estimate_delivery(Some("2024-01-07"), "Morning").unwrap();
        assert_eq!(estimate.purchase_date, Some(ymd(2024, 1, 7)));
        assert_eq!(estimate.receiving_date, Some(ymd(2024, 1, 8)));
        assert_eq!(estimate.formatted, "Monday, January 8, 2024");
        assert_eq!(estimate.day_name, "Monday");
        assert_eq!(estimate.preferred_delivery_time, DeliveryWindow::Morning);
        assert!(estimate.shifted_from_sunday);
    }

    #[test]
    fn test_estimate_weekday_purchase() {
        let estimate = estimate_delivery(Some("2024-01-10"), "").unwrap();
        assert_eq!(estimate.receiving_date, Some(ymd(2024, 1, 10)));
        assert_eq!(estimate.day_name, "Wednesday");
        assert!(!estimate.shifted_from_sunday);
    }

    #[test]
    fn test_estimate_absent_purchase() {
        let estimate = estimate_delivery(None, "evening").unwrap();
        assert_eq!(estimate.purchase_date, None);
        assert_eq!(estimate.receiving_date, None);
        assert_eq!(estimate.formatted, NOT_SPECIFIED);
        assert_eq!(estimate.day_name, "");
        assert_eq!(estimate.preferred_delivery_time, DeliveryWindow::Evening);
        assert!(!estimate.shifted_from_sunday);
    }

    #[test]
    fn test_estimate_serializes_to_json() {
        let estimate = estimate_delivery(Some("2024-01-07"), "evening").unwrap();
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["purchase_date"], "2024-01-07");
        assert_eq!(json["receiving_date"], "2024-01-08");
        assert_eq!(json["formatted"], "Monday, January 8, 2024");
        assert_eq!(json["preferred_delivery_time"], "evening");
        assert_eq!(json["shifted_from_sunday"], true);
    }

    #[test]
    fn test_estimate_absent_serializes_nulls() {
        let json = serde_json::to_value(estimate_delivery(None, "").unwrap()).unwrap();
        assert!(json["purchase_date"].is_null());
        assert!(json["receiving_date"].is_null());
        assert_eq!(json["preferred_delivery_time"], "");
    }
}
