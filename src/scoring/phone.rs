/// Reduce a phone number to comparable digits.
///
/// Formatting is stripped, a leading `91` country code on a 12-digit number
/// is dropped, and anything longer than 10 digits keeps its last 10.
/// Shorter inputs come back as-is, possibly empty.
pub fn normalize_phone(phone: Option<&str>) -> String {
    let digits: String = phone
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.len() == 12 && digits.starts_with("91") {
        digits[2..].to_string()
    } else if digits.len() > 10 {
        digits[digits.len() - 10..].to_string()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_india_country_code() {
        assert_eq!(normalize_phone(Some("+91 98765 43210")), "9876543210");
        assert_eq!(normalize_phone(Some("+91-98765-43210")), "9876543210");
    }

    #[test]
    fn test_already_ten_digits() {
        assert_eq!(normalize_phone(Some("9876543210")), "9876543210");
    }

    #[test]
    fn test_long_number_keeps_last_ten() {
        assert_eq!(normalize_phone(Some("0091 98765 43210")), "9876543210");
        // 1415555010099 -> last 10
        assert_eq!(normalize_phone(Some("+1 (415) 555-0100 99")), "5555010099");
    }

    #[test]
    fn test_short_and_empty() {
        assert_eq!(normalize_phone(Some("079-2656")), "0792656");
        assert_eq!(normalize_phone(Some("n/a")), "");
        assert_eq!(normalize_phone(None), "");
    }
}
