//! Build identification.

/// Version string of this build, e.g. `"0.4.0"`.
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// `major.minor` of [`VERSION_STRING`] as a number.
pub const VERSION_NUMBER: f64 = VERSION_DIGITS as f64 / MINOR_SCALE as f64;

const MINOR_SCALE: u64 = decimal_scale(env!("CARGO_PKG_VERSION_MINOR"));

// major.minor with the point removed, e.g. 0.4 -> 4, 1.12 -> 112.
const VERSION_DIGITS: u64 = parse_decimal(env!("CARGO_PKG_VERSION_MAJOR")) * MINOR_SCALE
    + parse_decimal(env!("CARGO_PKG_VERSION_MINOR"));

const fn parse_decimal(digits: &str) -> u64 {
    let bytes = digits.as_bytes();
    let mut value = 0;
    let mut index = 0;
    while index < bytes.len() {
        value = value * 10 + (bytes[index] - b'0') as u64;
        index += 1;
    }
    value
}

/// `10^len(digits)`, so that minor `4` reads as `.4` and minor `12` as `.12`.
const fn decimal_scale(digits: &str) -> u64 {
    let mut scale = 1;
    let mut index = 0;
    while index < digits.len() {
        scale *= 10;
        index += 1;
    }
    scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_number_tracks_version_string() {
        let mut parts = VERSION_STRING.split('.');
        let major = parts.next().unwrap();
        let minor = parts.next().unwrap();
        let parsed: f64 = format!("{}.{}", major, minor).parse().unwrap();
        assert_eq!(parsed, VERSION_NUMBER);
    }

    #[test]
    fn test_decimal_helpers() {
        assert_eq!(parse_decimal("0"), 0);
        assert_eq!(parse_decimal("112"), 112);
        assert_eq!(decimal_scale("4"), 10);
        assert_eq!(decimal_scale("12"), 100);
    }
}
