use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::{max, min};
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::{Add, AddAssign};

/// A location within the current source text expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// A 1-based line and column. Columns count characters, not bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

impl Display for Position {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

/// Maps byte offsets to line and column positions.
///
/// `\r\n` counts as a single line break; `\n`, `\r`, U+2028 and U+2029 each count as one on their own.
pub struct LineIndex<'a> {
  source: &'a str,
  // Byte offset of the first character of each line.
  line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
  pub fn new(source: &'a str) -> LineIndex<'a> {
    let mut line_starts = vec![0];
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
      match c {
        '\r' => {
          if chars.peek().is_some_and(|&(_, n)| n == '\n') {
            chars.next();
            line_starts.push(i + 2);
          } else {
            line_starts.push(i + 1);
          }
        }
        '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(i + c.len_utf8()),
        _ => {}
      };
    }
    LineIndex {
      source,
      line_starts,
    }
  }

  pub fn line_count(&self) -> usize {
    self.line_starts.len()
  }

  /// Offsets past the end of the source clamp to the end.
  pub fn position(&self, offset: usize) -> Position {
    let mut offset = min(offset, self.source.len());
    while !self.source.is_char_boundary(offset) {
      offset -= 1;
    }
    let line = self.line_starts.partition_point(|&start| start <= offset);
    let line_start = self.line_starts[line - 1];
    let column = self.source[line_start..offset].chars().count() + 1;
    Position { line, column }
  }
}
