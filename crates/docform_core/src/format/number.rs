//! Plain digit rendering.

/// Returns the canonical base-10 form of `value` with no grouping separators.
///
/// Negative values keep their leading `-`.
pub fn format_number(value: impl Into<i128>) -> String {
    value.into().to_string()
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn renders_without_thousands_separators() {
        assert_eq!(format_number(1_234_567_u64), "1234567");
        assert_eq!(format_number(0_u32), "0");
    }

    #[test]
    fn keeps_sign_of_negative_values() {
        assert_eq!(format_number(-42_i64), "-42");
    }
}
