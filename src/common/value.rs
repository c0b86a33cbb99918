use std::cmp::Ordering;
use std::fmt;

/// A scalar cell of a record.
///
/// Integers and floats are both "numbers": they compare numerically with
/// each other. Across kinds the order is total, with every number sorting
/// before every string.
#[derive(Clone, Debug)]
pub enum Value {
    Int64(i64),
    Float64(f64),
    String(String),
}

impl Value {
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int64(_) | Value::Float64(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Int64(_) | Value::Float64(_) => 0,
            Value::String(_) => 1,
        }
    }
}

/// Total order used for every key comparison in the index.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
        (Value::Float64(x), Value::Float64(y)) => compare_floats(*x, *y),
        (Value::Int64(x), Value::Float64(y)) => compare_int_float(*x, *y),
        (Value::Float64(x), Value::Int64(y)) => compare_int_float(*y, *x).reverse(),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

/// `-0.0 == 0.0`; NaN sorts after every number when positive and before
/// every number when negative.
fn compare_floats(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
}

/// Exact comparison without rounding `i` through `f64`.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    // |whole| < 2^63 here, so the cast is exact.
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare_values(self, other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_values(self, other)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        assert!(Value::Int64(9) < Value::Int64(10));
        assert!(Value::Float64(2.5) < Value::Int64(3));
        assert!(Value::Int64(3) > Value::Float64(2.5));
        assert_eq!(Value::Int64(4), Value::Float64(4.0));
    }

    #[test]
    fn large_integers_compare_exactly_with_floats() {
        let two_53 = 1i64 << 53;
        let a = Value::Int64(two_53 + 1);
        let b = Value::Float64(two_53 as f64);
        let c = Value::Int64(two_53);

        assert!(a > b);
        assert_eq!(b, c);
        assert!(c < a);

        assert!(Value::Int64(i64::MAX) < Value::Float64(9_223_372_036_854_775_808.0));
        assert!(Value::Int64(i64::MIN) == Value::Float64(-9_223_372_036_854_775_808.0));
        assert!(Value::Int64(-3) > Value::Float64(-3.5));
        assert!(Value::Int64(-3) < Value::Float64(-2.5));
        assert!(Value::Int64(0) < Value::Float64(f64::INFINITY));
        assert!(Value::Int64(0) > Value::Float64(f64::NEG_INFINITY));
    }

    #[test]
    fn zeros_and_nan_keep_the_order_total() {
        assert_eq!(Value::Float64(-0.0), Value::Float64(0.0));
        assert_eq!(Value::Float64(-0.0), Value::Int64(0));
        assert!(Value::Float64(f64::NAN) > Value::Int64(i64::MAX));
        assert!(Value::Float64(f64::NAN) > Value::Float64(f64::INFINITY));
        assert!(Value::Float64(-f64::NAN) < Value::Int64(i64::MIN));
    }

    #[test]
    fn mixed_numbers_sort_consistently() {
        let two_53 = 1i64 << 53;
        let mut values = vec![
            Value::Int64(two_53 + 1),
            Value::Float64(two_53 as f64),
            Value::Int64(two_53),
            Value::Float64(two_53 as f64 + 2.0),
            Value::Int64(two_53 - 1),
        ];
        values.sort();

        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for (i, x) in values.iter().enumerate() {
            for y in &values[i + 1..] {
                assert_ne!(compare_values(x, y), Ordering::Greater);
            }
        }
    }

    #[test]
    fn strings_compare_by_code_point() {
        assert!(Value::from("Animal Farm") < Value::from("The Pearl"));
        assert!(Value::from("Zebra") < Value::from("apple"));
        assert_ne!(Value::from("a"), Value::from("A"));
    }

    #[test]
    fn numbers_sort_before_strings() {
        assert!(Value::Int64(1000) < Value::from("1"));
        assert!(Value::Float64(f64::MAX) < Value::from(""));
        assert_eq!(
            compare_values(&Value::from("x"), &Value::Int64(0)),
            Ordering::Greater
        );
    }

    #[test]
    fn value_display() {
        assert_eq!(format!("{}", Value::from("hello")), "\"hello\"");
        assert_eq!(format!("{}", Value::Int64(42)), "42");
        assert_eq!(format!("{}", Value::Float64(1.5)), "1.5");
    }
}
