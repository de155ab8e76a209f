// Display helpers shared by every consumer.

use std::sync::LazyLock;

use regex::Regex;

use fleetdesk_api::types::Address;

/// Page size used until the caller or the server picks another.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

static LEADING_NUMBER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?"));

/// Lenient numeric reading: the longest leading number, `0.0` when there
/// is none (`"12kg"` reads as 12).
fn leading_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return n;
        }
    }
    LEADING_NUMBER
        .as_ref()
        .ok()
        .and_then(|re| re.find(trimmed))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Format a weight given in kilograms.
///
/// `format_weight("1250", false)` is `"1250kg"`,
/// `format_weight("1250", true)` is `"1.25t"`.
pub fn format_weight(weight: &str, tonnes: bool) -> String {
    let kg = leading_number(weight);
    if tonnes {
        format!("{:.2}t", kg / 1000.0)
    } else {
        format!("{kg}kg")
    }
}

/// One-line label for an address: `"{line1}, {city}, {state} {postcode}"`.
pub fn address_display_name(address: &Address) -> String {
    format!(
        "{}, {}, {} {}",
        address.address_line1, address.city, address.state, address.postcode
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_in_kilograms_and_tonnes() {
        assert_eq!(format_weight("1250", false), "1250kg");
        assert_eq!(format_weight("12.5", false), "12.5kg");
        assert_eq!(format_weight("1250", true), "1.25t");
        assert_eq!(format_weight("24000", true), "24.00t");
    }

    #[test]
    fn weight_reads_leading_number_or_zero() {
        assert_eq!(format_weight("800kg", false), "800kg");
        assert_eq!(format_weight("heavy", false), "0kg");
        assert_eq!(format_weight("", true), "0.00t");
    }

    #[test]
    fn address_label() {
        let address = Address {
            id: "a1".into(),
            address_line1: "1 Quay St".into(),
            address_line2: None,
            city: "Cork".into(),
            state: "Munster".into(),
            country: "IE".into(),
            postcode: "T12".into(),
        };
        assert_eq!(address_display_name(&address), "1 Quay St, Cork, Munster T12");
    }
}
