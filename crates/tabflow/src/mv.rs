//! `Mv` is the tagged value the DSL runtime operates on. Records hold only
//! strings; `Mv` is how the DSL represents everything it computes over,
//! including the `Absent` case that has no record-field counterpart.
//!
//! This is a deliberately small slice of Miller's full `mlrval` arithmetic
//! library: enough to scan a field value into a number, format seconds
//! since the epoch as an ISO-8601 GMT timestamp, and evaluate the four
//! arithmetic operators the worked DSL examples need (SPEC_FULL.md §4.11).

// dependencies
use chrono::{DateTime, Utc};

/// A tagged value used inside the DSL runtime.
///
/// `Absent` is distinct from both `Empty` (the empty string) and a missing
/// record field: a record field is either present (with a string value,
/// possibly empty) or not present at all, whereas `Absent` is a value that
/// can flow through DSL expressions, e.g. the result of reading an unbound
/// local variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Mv {
    Absent,
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Error(String),
}

impl Mv {
    /// Scan a non-empty string into a numeric `Mv`: `Int` if it parses as
    /// an integer, else `Float` if it parses as a float, else `Error`.
    /// Per SPEC_FULL.md §4.4, callers are responsible for handling the
    /// empty-string case themselves before calling this (it is not treated
    /// as "not numeric" the way an `mv_scan_number_or_die` style contract
    /// usually requires the caller to special-case it).
    pub fn scan_number(s: &str) -> Mv {
        if let Ok(i) = s.parse::<i64>() {
            Mv::Int(i)
        } else if let Ok(f) = s.parse::<f64>() {
            Mv::Float(f)
        } else {
            Mv::Error(format!("could not scan \"{s}\" as a number"))
        }
    }

    /// Scan a non-empty string into a numeric `Mv`, panicking with a
    /// diagnostic on failure. This is the `mv_scan_number_or_die` contract
    /// referenced throughout SPEC_FULL.md: a verb runtime type error is
    /// fatal, not a recoverable `Error` value.
    pub fn scan_number_or_die(s: &str) -> Mv {
        match Self::scan_number(s) {
            Mv::Error(msg) => panic!("{msg}"),
            mv => mv,
        }
    }

    /// Whether this value is numeric (`Int` or `Float`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Mv::Int(_) | Mv::Float(_))
    }

    /// Format this value as seconds-since-epoch in ISO-8601 GMT
    /// (`YYYY-MM-DDTHH:MM:SSZ`). Non-numeric values format as `Error`.
    pub fn format_iso8601_gmt(&self) -> Mv {
        let seconds = match self {
            Mv::Int(i) => *i as f64,
            Mv::Float(f) => *f,
            _ => return Mv::Error("format_iso8601_gmt: value is not numeric".to_string()),
        };
        let whole_secs = seconds.floor() as i64;
        let Some(dt) = DateTime::<Utc>::from_timestamp(whole_secs, 0) else {
            return Mv::Error(format!("format_iso8601_gmt: {seconds} is out of range"));
        };
        Mv::String(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }

    /// Add two tagged values, following int/float promotion: `Int + Int`
    /// stays `Int`; any `Float` operand promotes the result to `Float`;
    /// either operand being `Error` propagates the first `Error`
    /// encountered; `Absent` behaves as the identity element, matching
    /// Miller's "absent-coalescing" arithmetic.
    pub fn add(&self, other: &Mv) -> Mv {
        Self::arith(self, other, "+", |a, b| a + b, |a, b| a + b)
    }

    /// Subtract `other` from `self`; see `add` for promotion rules.
    pub fn sub(&self, other: &Mv) -> Mv {
        Self::arith(self, other, "-", |a, b| a - b, |a, b| a - b)
    }

    /// Multiply two tagged values; see `add` for promotion rules.
    pub fn mul(&self, other: &Mv) -> Mv {
        Self::arith(self, other, "*", |a, b| a * b, |a, b| a * b)
    }

    /// Divide `self` by `other`; always promotes to `Float`, matching
    /// Miller's division semantics (integer division is a distinct
    /// operator, out of scope here).
    pub fn div(&self, other: &Mv) -> Mv {
        match (self.as_absent_coalesced(), other.as_absent_coalesced()) {
            (Some(_), None) | (None, Some(_)) => return self.identity_or(other),
            _ => {}
        }
        match (self.to_f64(), other.to_f64()) {
            (Some(a), Some(b)) => Mv::Float(a / b),
            _ => Mv::Error(format!("non-numeric operand to /: {self:?}, {other:?}")),
        }
    }

    fn arith(
        a: &Mv,
        b: &Mv,
        op: &str,
        int_op: impl Fn(i64, i64) -> i64,
        float_op: impl Fn(f64, f64) -> f64,
    ) -> Mv {
        if let Mv::Error(_) = a {
            return a.clone();
        }
        if let Mv::Error(_) = b {
            return b.clone();
        }
        match (a.as_absent_coalesced(), b.as_absent_coalesced()) {
            (Some(_), None) => return a.identity_or(b),
            (None, Some(_)) => return b.identity_or(a),
            _ => {}
        }
        match (a, b) {
            (Mv::Int(x), Mv::Int(y)) => Mv::Int(int_op(*x, *y)),
            _ => match (a.to_f64(), b.to_f64()) {
                (Some(x), Some(y)) => Mv::Float(float_op(x, y)),
                _ => Mv::Error(format!("non-numeric operand to {op}: {a:?}, {b:?}")),
            },
        }
    }

    // `Absent` and `Empty` both coalesce away in arithmetic: the other
    // operand passes through unchanged. Returns `Some(())` when `self` is
    // one of those coalescing cases.
    fn as_absent_coalesced(&self) -> Option<()> {
        matches!(self, Mv::Absent | Mv::Empty).then_some(())
    }

    fn identity_or(&self, other: &Mv) -> Mv {
        if self.as_absent_coalesced().is_some() {
            other.clone()
        } else {
            self.clone()
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Mv::Int(i) => Some(*i as f64),
            Mv::Float(f) => Some(*f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_number_int() {
        assert_eq!(Mv::scan_number("42"), Mv::Int(42));
    }

    #[test]
    fn scan_number_float() {
        assert_eq!(Mv::scan_number("3.14"), Mv::Float(3.14));
    }

    #[test]
    fn scan_number_error() {
        assert!(matches!(Mv::scan_number("foo"), Mv::Error(_)));
    }

    #[test]
    fn format_iso8601_gmt_known_epoch() {
        let stamp = Mv::Int(1_700_000_000).format_iso8601_gmt();
        assert_eq!(stamp, Mv::String("2023-11-14T22:13:20Z".to_string()));
    }

    #[test]
    fn add_promotes_to_float() {
        assert_eq!(Mv::Int(1).add(&Mv::Float(2.5)), Mv::Float(3.5));
    }

    #[test]
    fn add_ints_stays_int() {
        assert_eq!(Mv::Int(3).add(&Mv::Int(4)), Mv::Int(7));
    }

    #[test]
    fn f_of_x_y_expr_value() {
        // def f(x, y) { return x + y * 2; } with x=3, y=4 -> 3 + 8 = 11
        let result = Mv::Int(3).add(&Mv::Int(4).mul(&Mv::Int(2)));
        assert_eq!(result, Mv::Int(11));
    }
}
