use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl JsNumber {
  /// Evaluates the raw source text of a numeric literal. Returns None if the text is not a valid literal.
  pub fn from_literal(raw: &str) -> Option<JsNumber> {
    if let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
      return fold_radix(digits, 16);
    };
    if is_legacy_octal_literal(raw) {
      return fold_radix(&raw[1..], 8);
    };
    if raw.is_empty() || !raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')) {
      return None;
    };
    raw.parse::<f64>().ok().map(JsNumber)
  }
}

/// Whether `raw` is a legacy octal literal like `017`.
pub fn is_legacy_octal_literal(raw: &str) -> bool {
  raw.len() > 1 && raw.starts_with('0') && raw.bytes().all(|b| matches!(b, b'0'..=b'7'))
}

fn fold_radix(digits: &str, radix: u32) -> Option<JsNumber> {
  if digits.is_empty() {
    return None;
  };
  let mut value = 0f64;
  for c in digits.chars() {
    value = value * radix as f64 + c.to_digit(radix)? as f64;
  }
  Some(JsNumber(value))
}

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let v = self.0;
    if v.is_nan() {
      write!(f, "NaN")
    } else if v.is_infinite() {
      write!(f, "{}", if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if v == 0.0 {
      write!(f, "0")
    } else if v.fract() == 0.0 && v.abs() < 1e21 {
      write!(f, "{:.0}", v)
    } else {
      write!(f, "{}", v)
    }
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::JsNumber;

  fn eval(raw: &str) -> f64 {
    JsNumber::from_literal(raw).unwrap().0
  }

  #[test]
  fn evaluates_literals() {
    assert_eq!(eval("10"), 10.0);
    assert_eq!(eval("1.5"), 1.5);
    assert_eq!(eval(".5"), 0.5);
    assert_eq!(eval("1."), 1.0);
    assert_eq!(eval("1e3"), 1000.0);
    assert_eq!(eval("2.5E-1"), 0.25);
    assert_eq!(eval("0x1F"), 31.0);
    assert_eq!(eval("0XfF"), 255.0);
    assert_eq!(eval("017"), 15.0);
    assert_eq!(eval("019"), 19.0);
    assert_eq!(eval("0"), 0.0);
  }

  #[test]
  fn rejects_malformed_literals() {
    assert!(JsNumber::from_literal("0x").is_none());
    assert!(JsNumber::from_literal("1e").is_none());
    assert!(JsNumber::from_literal("0xg").is_none());
    assert!(JsNumber::from_literal("inf").is_none());
  }

  #[test]
  fn displays_integers_without_fraction() {
    assert_eq!(JsNumber(10.0).to_string(), "10");
    assert_eq!(JsNumber(-0.0).to_string(), "0");
    assert_eq!(JsNumber(1.5).to_string(), "1.5");
    assert_eq!(JsNumber(1e20).to_string(), "100000000000000000000");
    assert_eq!(JsNumber(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(JsNumber(f64::NAN).to_string(), "NaN");
  }

  #[test]
  fn nan_equals_nan() {
    assert_eq!(JsNumber(f64::NAN), JsNumber(f64::NAN));
    assert_ne!(JsNumber(1.0), JsNumber(2.0));
  }
}
