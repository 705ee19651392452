//! Textual form of floating point numbers on the wire.
//!
//! Finite values are written in their shortest round-trip decimal form, using exponent
//! notation only at the magnitudes where a JavaScript peer would (`>= 1e21` or
//! `< 1e-6`). Non-finite values use JavaScript's spellings.

use std::f64;

/// Spelling of positive infinity.
pub const INFINITY: &str = "Infinity";
/// Spelling of negative infinity.
pub const NEG_INFINITY: &str = "-Infinity";
/// Spelling of not-a-number.
pub const NAN: &str = "NaN";

const EXP_UPPER: f64 = 1e21;
const EXP_LOWER: f64 = 1e-6;

/// Writes `f` in its wire form.
///
/// # Example
///
/// ```
/// use repy_serial::float::format_float;
///
/// assert_eq!(format_float(3.0), "3");
/// assert_eq!(format_float(-0.5), "-0.5");
/// assert_eq!(format_float(1e21), "1e21");
/// assert_eq!(format_float(f64::NEG_INFINITY), "-Infinity");
/// ```
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        NAN.to_owned()
    } else if f == f64::INFINITY {
        INFINITY.to_owned()
    } else if f == f64::NEG_INFINITY {
        NEG_INFINITY.to_owned()
    } else {
        let mag = f.abs();
        if mag != 0.0 && (mag >= EXP_UPPER || mag < EXP_LOWER) {
            format!("{:e}", f)
        } else {
            format!("{}", f)
        }
    }
}

/// Parses the body of a float. Accepts everything [`format_float`] produces, the
/// standard decimal and exponent forms, and a leading `+` on the exponent.
///
/// Returns `None` for empty input, surrounding whitespace or trailing garbage.
///
/// # Example
///
/// ```
/// use repy_serial::float::parse_float;
///
/// assert_eq!(parse_float("2.5"), Some(2.5));
/// assert_eq!(parse_float("1e+21"), Some(1e21));
/// assert_eq!(parse_float("Infinity"), Some(f64::INFINITY));
/// assert_eq!(parse_float("2.5abc"), None);
/// ```
pub fn parse_float(s: &str) -> Option<f64> {
    match s {
        INFINITY => Some(f64::INFINITY),
        NEG_INFINITY => Some(f64::NEG_INFINITY),
        NAN => Some(f64::NAN),
        _ => {
            // only the shapes a number can take, so `inf`, `nan` and friends stay out
            let numeric = s
                .bytes()
                .all(|b| b.is_ascii_digit() || b == b'.' || b == b'e' || b == b'E' || b == b'-' || b == b'+');
            if !numeric || !s.bytes().any(|b| b.is_ascii_digit()) {
                return None;
            }
            s.parse().ok()
        }
    }
}

/// Numeric equality for the value model: `0.0 == -0.0`, and NaN equals NaN.
pub fn float_eq(a: f64, b: f64) -> bool { a == b || (a.is_nan() && b.is_nan()) }
