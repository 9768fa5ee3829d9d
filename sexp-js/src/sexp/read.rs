use super::Sexp;
use crate::num::JsNumber;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SexpParseError {
  // Byte offset into the text being read.
  pub offset: usize,
  pub message: &'static str,
}

impl Display for SexpParseError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} at offset {}", self.message, self.offset)
  }
}

impl Error for SexpParseError {}

struct Reader<'a> {
  text: &'a str,
  next: usize,
}

impl<'a> Reader<'a> {
  fn error<T>(&self, message: &'static str) -> Result<T, SexpParseError> {
    Err(SexpParseError {
      offset: self.next,
      message,
    })
  }

  fn rest(&self) -> &'a str {
    &self.text[self.next..]
  }

  fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  fn skip_whitespace(&mut self) {
    let rest = self.rest();
    self.next += rest.len() - rest.trim_start().len();
  }

  fn word(&mut self) -> &'a str {
    let rest = self.rest();
    let len = rest
      .find(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
      .unwrap_or(rest.len());
    self.next += len;
    &rest[..len]
  }

  fn value(&mut self) -> Result<Sexp, SexpParseError> {
    self.skip_whitespace();
    match self.peek() {
      None => self.error("unexpected end of input"),
      Some('[') => self.list(),
      Some(':') => {
        self.next += 1;
        let name = self.word();
        if name.is_empty() {
          return self.error("expected atom name");
        };
        Ok(Sexp::atom(name))
      }
      Some(q @ ('"' | '\'')) => self.quoted(q),
      Some(_) => {
        let start = self.next;
        let word = self.word();
        if word == "nil" {
          return Ok(Sexp::Nil);
        };
        match word {
          "NaN" => Some(f64::NAN),
          "Infinity" => Some(f64::INFINITY),
          "-Infinity" => Some(f64::NEG_INFINITY),
          _ if word.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') => {
            word.parse::<f64>().ok()
          }
          _ => None,
        }
        .map(|v| Sexp::Num(JsNumber(v)))
        .ok_or(SexpParseError {
          offset: start,
          message: "expected value",
        })
      }
    }
  }

  fn list(&mut self) -> Result<Sexp, SexpParseError> {
    self.next += 1;
    let mut items = Vec::new();
    loop {
      self.skip_whitespace();
      if self.peek() == Some(']') {
        self.next += 1;
        break;
      };
      items.push(self.value()?);
      self.skip_whitespace();
      match self.peek() {
        Some(',') => self.next += 1,
        Some(']') => {}
        None => return self.error("unterminated list"),
        Some(_) => return self.error("expected comma or end of list"),
      };
    }
    Ok(Sexp::List(items))
  }

  fn quoted(&mut self, quote: char) -> Result<Sexp, SexpParseError> {
    self.next += 1;
    let mut units = Vec::<u16>::new();
    loop {
      let Some(c) = self.peek() else {
        return self.error("unterminated string");
      };
      self.next += c.len_utf8();
      match c {
        c if c == quote => break,
        '\\' => {
          let Some(e) = self.peek() else {
            return self.error("unterminated string");
          };
          self.next += e.len_utf8();
          match e {
            'n' => units.push(0x0a),
            'r' => units.push(0x0d),
            't' => units.push(0x09),
            'u' => {
              let Some(unit) = self
                .rest()
                .get(..4)
                .and_then(|hex| u16::from_str_radix(hex, 16).ok())
              else {
                return self.error("invalid unicode escape");
              };
              self.next += 4;
              units.push(unit);
            }
            e => {
              let mut buf = [0u16; 2];
              units.extend_from_slice(e.encode_utf16(&mut buf));
            }
          };
        }
        c => {
          let mut buf = [0u16; 2];
          units.extend_from_slice(c.encode_utf16(&mut buf));
        }
      };
    }
    Ok(Sexp::Str(String::from_utf16_lossy(&units)))
  }
}

/// Reads the text rendering produced by `Display` or `Sexp::pretty`. Strings may use single or double quotes, and a trailing comma is allowed before `]`.
impl FromStr for Sexp {
  type Err = SexpParseError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    let mut reader = Reader { text, next: 0 };
    let value = reader.value()?;
    reader.skip_whitespace();
    if reader.next != text.len() {
      return reader.error("trailing characters");
    };
    Ok(value)
  }
}
