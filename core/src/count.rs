/// Reads a like counter as displayed, e.g. `"1,234"`.
///
/// Grouping characters are stripped and the leading run of digits is used.
/// Text without any digits reads as zero.
pub fn parse_count(text: &str) -> u64 {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}

/// Formats a counter with `,` thousands grouping.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_groups() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn parses_displayed_text() {
        assert_eq!(parse_count("1,234"), 1234);
        assert_eq!(parse_count(" 42 "), 42);
        assert_eq!(parse_count("12 likes"), 12);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("many"), 0);
    }
}
