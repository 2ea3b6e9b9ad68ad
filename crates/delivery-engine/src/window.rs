//! Preferred delivery windows.
//!
//! Customers pick a delivery window at checkout ("morning", "evening", ...).
//! The label travels with the estimate but does not move the receiving date;
//! it is parsed here so that future rules can match on a closed set of
//! windows instead of raw strings.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A customer's preferred delivery window.
///
/// Parsing never fails: unknown labels are kept verbatim in [`DeliveryWindow::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum DeliveryWindow {
    Morning,
    Afternoon,
    Evening,
    /// No preference given (empty label).
    #[default]
    Unspecified,
    /// Any label the storefront sends that is not one of the known windows.
    Other(String),
}

impl DeliveryWindow {
    /// Parse a window label (case-insensitive, surrounding whitespace ignored).
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "" => DeliveryWindow::Unspecified,
            "morning" => DeliveryWindow::Morning,
            "afternoon" => DeliveryWindow::Afternoon,
            "evening" => DeliveryWindow::Evening,
            _ => DeliveryWindow::Other(trimmed.to_string()),
        }
    }

    /// The label as shown to customers. Empty for [`DeliveryWindow::Unspecified`].
    pub fn label(&self) -> &str {
        match self {
            DeliveryWindow::Morning => "morning",
            DeliveryWindow::Afternoon => "afternoon",
            DeliveryWindow::Evening => "evening",
            DeliveryWindow::Unspecified => "",
            DeliveryWindow::Other(label) => label,
        }
    }

    pub fn is_specified(&self) -> bool {
        !matches!(self, DeliveryWindow::Unspecified)
    }
}

impl FromStr for DeliveryWindow {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DeliveryWindow::parse(s))
    }
}

impl fmt::Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<DeliveryWindow> for String {
    fn from(window: DeliveryWindow) -> Self {
        window.label().to_string()
    }
}
