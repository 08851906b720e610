//! Locale-formatted number parsing for transcript columns.
//!
//! Transcripts print decimals with a comma (`3,5`) and use `-` for "no
//! value". Both an absent token and the sentinel map to `Ok(None)`; anything
//! else must read as a finite, non-negative number.

/// Token printed in numeric columns that have no value.
pub const MISSING_NUMBER: &str = "-";

/// A numeric column token that is neither the sentinel nor a valid number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid numeric token '{token}'")]
pub struct InvalidNumber {
    /// The offending token, as printed.
    pub token: String,
}

/// Parses a comma-decimal numeric token.
///
/// # Errors
///
/// Returns [`InvalidNumber`] if the token does not parse as a number after
/// replacing `,` with `.`, or parses to a negative or non-finite value.
pub fn parse_locale_number(token: Option<&str>) -> Result<Option<f64>, InvalidNumber> {
    let Some(token) = token else {
        return Ok(None);
    };
    if token == MISSING_NUMBER {
        return Ok(None);
    }

    let invalid = || InvalidNumber {
        token: token.to_owned(),
    };

    let value = token.replace(',', ".").parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value.is_sign_negative() {
        return Err(invalid());
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(token: &str) -> Option<f64> {
        parse_locale_number(Some(token)).unwrap()
    }

    #[test]
    fn parses_integers() {
        assert_eq!(parsed("3"), Some(3.0));
        assert_eq!(parsed("0"), Some(0.0));
        assert_eq!(parsed("85"), Some(85.0));
    }

    #[test]
    fn parses_comma_decimals() {
        assert_eq!(parsed("3,5"), Some(3.5));
        assert_eq!(parsed("72,25"), Some(72.25));
    }

    #[test]
    fn accepts_dot_decimals() {
        assert_eq!(parsed("2.5"), Some(2.5));
    }

    #[test]
    fn sentinel_and_absent_are_none() {
        assert_eq!(parsed("-"), None);
        assert_eq!(parse_locale_number(None), Ok(None));
    }

    #[test]
    fn rejects_words() {
        let err = parse_locale_number(Some("BA")).unwrap_err();
        assert_eq!(err.token, "BA");
        assert_eq!(err.to_string(), "invalid numeric token 'BA'");
    }

    #[test]
    fn rejects_double_dash() {
        assert!(parse_locale_number(Some("--")).is_err());
    }

    #[test]
    fn rejects_multiple_separators() {
        assert!(parse_locale_number(Some("1,234,5")).is_err());
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(parse_locale_number(Some("-3")).is_err());
        assert!(parse_locale_number(Some("-0")).is_err());
        assert!(parse_locale_number(Some("inf")).is_err());
        assert!(parse_locale_number(Some("NaN")).is_err());
    }
}
