//! Numeric payload of a tree node.
//!
//! A [`Number`] keeps the numeral exactly as it appeared in the document and
//! derives an `i64` and an `f64` view from it. The two views are computed
//! independently: a numeral can be a valid integer, a valid double, both, or
//! neither. Failing to derive a view is not an error, it only leaves that view
//! empty.
use alloc::boxed::Box;
use core::fmt;

/// A JSON number together with its integer and floating interpretations.
///
/// # Examples
///
/// ```
/// use jsontree::Number;
///
/// let n = Number::from_numeral("123");
/// assert_eq!(n.as_i64(), Some(123));
/// assert_eq!(n.as_f64(), Some(123.0));
///
/// let big = Number::from_numeral("99999999999999999999");
/// assert_eq!(big.as_i64(), None);
/// assert_eq!(big.as_f64(), Some(1e20));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Number {
    raw: Box<str>,
    int: Option<i64>,
    double: Option<f64>,
}

impl Number {
    /// Stores `raw` verbatim and attempts both interpretations.
    #[must_use]
    pub fn from_numeral(raw: &str) -> Self {
        Self {
            raw: raw.into(),
            int: parse_int(raw),
            double: parse_double(raw),
        }
    }

    /// The numeral text as it appeared in the document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The integer view, if the whole numeral is a base-10 `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.int
    }

    /// The floating view, if the whole numeral converts without a range error.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.double
    }

    #[must_use]
    pub fn is_int_valid(&self) -> bool {
        self.int.is_some()
    }

    #[must_use]
    pub fn is_double_valid(&self) -> bool {
        self.double.is_some()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::from_numeral(&alloc::format!("{v}"))
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

// Overflow to infinity and a non-zero numeral collapsing to zero are both
// range errors.
fn parse_double(raw: &str) -> Option<f64> {
    let v: f64 = raw.parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    if v == 0.0 && has_nonzero_mantissa(raw) {
        return None;
    }
    Some(v)
}

fn has_nonzero_mantissa(raw: &str) -> bool {
    raw.bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}
