use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::loc::Position;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// Whether an error was raised while recognising tokens or while applying the grammar to them.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorKind {
  Lexical,
  Syntax,
}

/// A stable classification of errors produced while lexing and parsing.
///
/// Diagnostic codes (prefix `SX`) are assigned per variant and are stable:
/// - `SX0001`: [`SyntaxErrorType::UnexpectedCharacter`]
/// - `SX0002`: [`SyntaxErrorType::UnterminatedString`]
/// - `SX0003`: [`SyntaxErrorType::LineTerminatorInString`]
/// - `SX0004`: [`SyntaxErrorType::UnterminatedComment`]
/// - `SX0005`: [`SyntaxErrorType::UnterminatedRegex`]
/// - `SX0006`: [`SyntaxErrorType::MalformedLiteralNumber`]
/// - `SX0007`: [`SyntaxErrorType::InvalidCharacterEscape`]
/// - `SX0008`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `SX0009`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `SX0010`: [`SyntaxErrorType::ExpectedStatementEnd`]
/// - `SX0011`: [`SyntaxErrorType::InvalidAssignmentTarget`]
/// - `SX0012`: [`SyntaxErrorType::ReservedWord`]
/// - `SX0013`: [`SyntaxErrorType::TryStatementHasNoCatchOrFinally`]
/// - `SX0014`: [`SyntaxErrorType::UnexpectedEnd`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  // Lexical.
  UnexpectedCharacter,
  UnterminatedString,
  LineTerminatorInString,
  UnterminatedComment,
  UnterminatedRegex,
  MalformedLiteralNumber,
  InvalidCharacterEscape,
  // Grammar.
  ExpectedSyntax(&'static str),
  RequiredTokenNotFound(TT),
  ExpectedStatementEnd,
  InvalidAssignmentTarget,
  ReservedWord,
  TryStatementHasNoCatchOrFinally,
  UnexpectedEnd,
}

impl SyntaxErrorType {
  pub fn kind(&self) -> ErrorKind {
    match self {
      SyntaxErrorType::UnexpectedCharacter
      | SyntaxErrorType::UnterminatedString
      | SyntaxErrorType::LineTerminatorInString
      | SyntaxErrorType::UnterminatedComment
      | SyntaxErrorType::UnterminatedRegex
      | SyntaxErrorType::MalformedLiteralNumber
      | SyntaxErrorType::InvalidCharacterEscape => ErrorKind::Lexical,
      SyntaxErrorType::ExpectedSyntax(_)
      | SyntaxErrorType::RequiredTokenNotFound(_)
      | SyntaxErrorType::ExpectedStatementEnd
      | SyntaxErrorType::InvalidAssignmentTarget
      | SyntaxErrorType::ReservedWord
      | SyntaxErrorType::TryStatementHasNoCatchOrFinally
      | SyntaxErrorType::UnexpectedEnd => ErrorKind::Syntax,
    }
  }

  /// Stable diagnostic code for this error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::UnexpectedCharacter => "SX0001",
      SyntaxErrorType::UnterminatedString => "SX0002",
      SyntaxErrorType::LineTerminatorInString => "SX0003",
      SyntaxErrorType::UnterminatedComment => "SX0004",
      SyntaxErrorType::UnterminatedRegex => "SX0005",
      SyntaxErrorType::MalformedLiteralNumber => "SX0006",
      SyntaxErrorType::InvalidCharacterEscape => "SX0007",
      SyntaxErrorType::ExpectedSyntax(_) => "SX0008",
      SyntaxErrorType::RequiredTokenNotFound(_) => "SX0009",
      SyntaxErrorType::ExpectedStatementEnd => "SX0010",
      SyntaxErrorType::InvalidAssignmentTarget => "SX0011",
      SyntaxErrorType::ReservedWord => "SX0012",
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "SX0013",
      SyntaxErrorType::UnexpectedEnd => "SX0014",
    }
  }

  /// Human-readable message describing this error.
  pub fn message(&self, actual_token: Option<TT>) -> String {
    match self {
      SyntaxErrorType::UnexpectedCharacter => "unexpected character".into(),
      SyntaxErrorType::UnterminatedString => "unterminated string literal".into(),
      SyntaxErrorType::LineTerminatorInString => {
        "line terminator not allowed in string literal".into()
      }
      SyntaxErrorType::UnterminatedComment => "unterminated multiline comment".into(),
      SyntaxErrorType::UnterminatedRegex => "unterminated regular expression literal".into(),
      SyntaxErrorType::MalformedLiteralNumber => "malformed number literal".into(),
      SyntaxErrorType::InvalidCharacterEscape => "invalid character escape".into(),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::RequiredTokenNotFound(token) => format!("expected token {:?}", token),
      SyntaxErrorType::ExpectedStatementEnd => {
        "expected `;`, a line break, `}` or end of input after statement".into()
      }
      SyntaxErrorType::InvalidAssignmentTarget => "invalid assignment target".into(),
      SyntaxErrorType::ReservedWord => actual_token
        .map(|tok| format!("{:?} is a reserved word", tok))
        .unwrap_or_else(|| "reserved word".into()),
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => {
        "try statement requires a catch or finally block".into()
      }
      SyntaxErrorType::UnexpectedEnd => "unexpected end of input".into(),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
  // Filled in by the public entry points, which know the source text.
  pub position: Option<Position>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
      position: None,
    }
  }

  pub fn kind(&self) -> ErrorKind {
    self.typ.kind()
  }

  pub fn with_position(mut self, index: &LineIndex<'_>) -> SyntaxError {
    self.position = Some(index.position(self.loc.0));
    self
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {}",
      self.typ.code(),
      self.typ.message(self.actual_token)
    )?;
    if let Some(position) = self.position {
      write!(f, " at {}", position)?;
    };
    write!(f, " [token={:?}]", self.actual_token)
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
