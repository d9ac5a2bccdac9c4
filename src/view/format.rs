use chrono::DateTime;

/// RFC 3339 timestamp as an en-GB short date ("05 Mar 2024").
/// Unparsable input is shown as-is.
pub fn pretty_date(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.format("%d %b %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

pub fn euros(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_date_formats_rfc3339() {
        assert_eq!(pretty_date("2024-03-05T10:00:00Z"), "05 Mar 2024");
    }

    #[test]
    fn pretty_date_passes_through_garbage() {
        assert_eq!(pretty_date("yesterday"), "yesterday");
    }

    #[test]
    fn euros_has_two_decimals() {
        assert_eq!(euros(12.5), "12.50");
        assert_eq!(euros(0.0), "0.00");
    }
}
