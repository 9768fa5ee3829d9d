use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_line_terminator;
use crate::char::CharFilter;
use crate::char::DIGIT;
use crate::char::DIGIT_HEX;
use crate::char::ECMASCRIPT_WHITESPACE;
use crate::char::ID_CONTINUE;
use crate::char::ID_CONTINUE_CHARSTR;
use crate::char::ID_START_CHARSTR;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::num::is_legacy_octal_literal;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr2;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

/// Whether a `/` starts a regular expression literal or is the division operator. Only the parser knows.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  SlashIsRegex,
  Standard,
}

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
  next: usize,
}

// Contains the match length.
#[derive(Copy, Clone)]
struct Match(usize);

impl Match {
  pub fn len(&self) -> usize {
    self.0
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

struct PatternMatcher {
  patterns: Vec<TT>,
  matcher: AhoCorasick,
  anchored: bool,
}

impl PatternMatcher {
  pub fn new<D: AsRef<[u8]>>(anchored: bool, patterns: Vec<(TT, D)>) -> Self {
    let (tts, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(if anchored {
        StartKind::Anchored
      } else {
        StartKind::Unanchored
      })
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(syns)
      .unwrap();
    PatternMatcher {
      patterns: tts,
      matcher,
      anchored,
    }
  }

  pub fn find(&self, lexer: &Lexer) -> Option<(TT, Match)> {
    self
      .matcher
      .find(Input::new(&lexer.source[lexer.next..]).anchored(if self.anchored {
        Anchored::Yes
      } else {
        Anchored::No
      }))
      .map(|m| (self.patterns[m.pattern().as_usize()], Match(m.end())))
  }
}

type LexResult<T> = Result<T, SyntaxErrorType>;

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
    }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn next(&self) -> usize {
    self.next
  }

  fn end(&self) -> usize {
    self.source.len()
  }

  fn remaining(&self) -> usize {
    self.end() - self.next
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.end())
  }

  fn eof_range(&self) -> Loc {
    Loc(self.end(), self.end())
  }

  fn at_end(&self) -> bool {
    self.next >= self.end()
  }

  fn peek(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  /// WARNING: Prefer checkpoints instead. Only use this if you know what you're doing.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint { next: self.next }
  }

  pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> Loc {
    Loc(checkpoint.next, self.next)
  }

  fn if_char(&self, c: char) -> Match {
    match self.peek(0) {
      Some(first) if first == c => Match(c.len_utf8()),
      _ => Match(0),
    }
  }

  fn while_not_2_chars(&self, a: char, b: char) -> Match {
    debug_assert!(a.is_ascii() && b.is_ascii());
    Match(
      memchr2(a as u8, b as u8, self.source[self.next..].as_bytes()).unwrap_or(self.remaining()),
    )
  }

  fn while_not_line_terminator(&self) -> Match {
    let rest = &self.source[self.next..];
    let ascii = memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
    Match(
      rest[..ascii]
        .find(|c: char| c == '\u{2028}' || c == '\u{2029}')
        .unwrap_or(ascii),
    )
  }

  fn while_chars(&self, chars: &CharFilter) -> Match {
    let mut len = 0;
    for ch in self.source[self.next..].chars() {
      if chars.has(ch) {
        len += ch.len_utf8();
      } else {
        break;
      }
    }
    Match(len)
  }

  fn consume(&mut self, m: Match) -> Match {
    self.next += m.len();
    m
  }

  fn skip_expect(&mut self, n: usize) {
    debug_assert!(self.next + n <= self.end());
    self.next += n;
  }

  fn drive_fallible(
    &mut self,
    preceded_by_line_terminator: bool,
    f: impl FnOnce(&mut Self) -> LexResult<TT>,
  ) -> Token {
    let cp = self.checkpoint();
    let (typ, lex_error) = match f(self) {
      Ok(typ) => (typ, None),
      Err(err) => (TT::Invalid, Some(err)),
    };
    // An invalid token must still make progress, otherwise the next call would lex the same character forever.
    if self.next == cp.next {
      if let Some(c) = self.peek(0) {
        self.skip_expect(c.len_utf8());
      };
    };
    Token {
      loc: self.since_checkpoint(cp),
      typ,
      preceded_by_line_terminator,
      lex_error,
    }
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

#[rustfmt::skip]
pub static OPERATORS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::Ampersand, "&");
  map.insert(TT::AmpersandAmpersand, "&&");
  map.insert(TT::AmpersandEquals, "&=");
  map.insert(TT::Asterisk, "*");
  map.insert(TT::AsteriskEquals, "*=");
  map.insert(TT::Bar, "|");
  map.insert(TT::BarBar, "||");
  map.insert(TT::BarEquals, "|=");
  map.insert(TT::BraceClose, "}");
  map.insert(TT::BraceOpen, "{");
  map.insert(TT::BracketClose, "]");
  map.insert(TT::BracketOpen, "[");
  map.insert(TT::Caret, "^");
  map.insert(TT::CaretEquals, "^=");
  map.insert(TT::ChevronLeft, "<");
  map.insert(TT::ChevronLeftChevronLeft, "<<");
  map.insert(TT::ChevronLeftChevronLeftEquals, "<<=");
  map.insert(TT::ChevronLeftEquals, "<=");
  map.insert(TT::ChevronRight, ">");
  map.insert(TT::ChevronRightChevronRight, ">>");
  map.insert(TT::ChevronRightChevronRightChevronRight, ">>>");
  map.insert(TT::ChevronRightChevronRightChevronRightEquals, ">>>=");
  map.insert(TT::ChevronRightChevronRightEquals, ">>=");
  map.insert(TT::ChevronRightEquals, ">=");
  map.insert(TT::Colon, ":");
  map.insert(TT::Comma, ",");
  map.insert(TT::Dot, ".");
  map.insert(TT::Equals, "=");
  map.insert(TT::EqualsEquals, "==");
  map.insert(TT::EqualsEqualsEquals, "===");
  map.insert(TT::Exclamation, "!");
  map.insert(TT::ExclamationEquals, "!=");
  map.insert(TT::ExclamationEqualsEquals, "!==");
  map.insert(TT::Hyphen, "-");
  map.insert(TT::HyphenEquals, "-=");
  map.insert(TT::HyphenHyphen, "--");
  map.insert(TT::ParenthesisClose, ")");
  map.insert(TT::ParenthesisOpen, "(");
  map.insert(TT::Percent, "%");
  map.insert(TT::PercentEquals, "%=");
  map.insert(TT::Plus, "+");
  map.insert(TT::PlusEquals, "+=");
  map.insert(TT::PlusPlus, "++");
  map.insert(TT::Question, "?");
  map.insert(TT::Semicolon, ";");
  map.insert(TT::Slash, "/");
  map.insert(TT::SlashEquals, "/=");
  map.insert(TT::Tilde, "~");
  map
});

pub static KEYWORDS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::KeywordBreak, "break");
  map.insert(TT::KeywordCase, "case");
  map.insert(TT::KeywordCatch, "catch");
  map.insert(TT::KeywordClass, "class");
  map.insert(TT::KeywordConst, "const");
  map.insert(TT::KeywordContinue, "continue");
  map.insert(TT::KeywordDebugger, "debugger");
  map.insert(TT::KeywordDefault, "default");
  map.insert(TT::KeywordDelete, "delete");
  map.insert(TT::KeywordDo, "do");
  map.insert(TT::KeywordElse, "else");
  map.insert(TT::KeywordEnum, "enum");
  map.insert(TT::KeywordExport, "export");
  map.insert(TT::KeywordExtends, "extends");
  map.insert(TT::KeywordFinally, "finally");
  map.insert(TT::KeywordFor, "for");
  map.insert(TT::KeywordFunction, "function");
  map.insert(TT::KeywordIf, "if");
  map.insert(TT::KeywordImport, "import");
  map.insert(TT::KeywordIn, "in");
  map.insert(TT::KeywordInstanceof, "instanceof");
  map.insert(TT::KeywordNew, "new");
  map.insert(TT::KeywordReturn, "return");
  map.insert(TT::KeywordSuper, "super");
  map.insert(TT::KeywordSwitch, "switch");
  map.insert(TT::KeywordThis, "this");
  map.insert(TT::KeywordThrow, "throw");
  map.insert(TT::KeywordTry, "try");
  map.insert(TT::KeywordTypeof, "typeof");
  map.insert(TT::KeywordVar, "var");
  map.insert(TT::KeywordVoid, "void");
  map.insert(TT::KeywordWhile, "while");
  map.insert(TT::KeywordWith, "with");
  map.insert(TT::LiteralFalse, "false");
  map.insert(TT::LiteralNull, "null");
  map.insert(TT::LiteralTrue, "true");
  map
});

pub static KEYWORD_STRS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  HashMap::<&'static str, TT>::from_iter(KEYWORDS_MAPPING.iter().map(|(&k, &v)| (v, k)))
});

#[rustfmt::skip]
static SIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns: Vec<(TT, String)> = Vec::new();
  for (&k, &v) in OPERATORS_MAPPING.iter() {
    patterns.push((k, v.into()));
  };
  for (&k, &v) in KEYWORDS_MAPPING.iter() {
    patterns.push((k, v.into()));
    // Avoid accidentally matching an identifier starting with a keyword as a keyword.
    for c in ID_CONTINUE_CHARSTR.chars() {
      let mut v = v.to_string();
      v.push(c);
      if !KEYWORD_STRS.contains_key(v.as_str()) {
        patterns.push((TT::Identifier, v));
      };
    };
  };
  for c in ID_START_CHARSTR.chars() {
    patterns.push((TT::Identifier, c.to_string()));
  };
  // Identifier starting with a Unicode escape.
  patterns.push((TT::Identifier, "\\".into()));
  for c in "0123456789".chars() {
    patterns.push((TT::LiteralNumber, c.to_string()));
  };
  patterns.push((TT::LiteralNumberHex, "0x".into()));
  patterns.push((TT::LiteralNumberHex, "0X".into()));
  // Prevent `.` immediately followed by a digit from being recognised as the `.` operator.
  for digit in '0'..='9' {
    patterns.push((TT::LiteralNumber, format!(".{}", digit)));
  };
  patterns.push((TT::LiteralString, "\"".into()));
  patterns.push((TT::LiteralString, "'".into()));

  PatternMatcher::new(true, patterns)
});

static ML_COMMENT: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new::<&str>(false, vec![
    (TT::CommentMultilineEnd, "*/"),
    (TT::LineTerminator, "\r"),
    (TT::LineTerminator, "\n"),
    (TT::LineTerminator, "\u{2028}"),
    (TT::LineTerminator, "\u{2029}"),
  ])
});

static INSIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns = vec![
    (TT::LineTerminator, "\r".to_string()),
    (TT::LineTerminator, "\n".to_string()),
    (TT::LineTerminator, "\u{2028}".to_string()),
    (TT::LineTerminator, "\u{2029}".to_string()),
    (TT::CommentMultiline, "/*".to_string()),
    (TT::CommentSingle, "//".to_string()),
  ];
  for c in ECMASCRIPT_WHITESPACE {
    patterns.push((TT::Whitespace, c.to_string()));
  }
  PatternMatcher::new(true, patterns)
});

/// Returns whether the comment includes a line terminator.
fn lex_multiline_comment(lexer: &mut Lexer<'_>) -> LexResult<bool> {
  // Consume `/*`.
  lexer.skip_expect(2);
  let mut contains_newline = false;
  loop {
    let Some((tt, mat)) = ML_COMMENT.find(lexer) else {
      lexer.set_next(lexer.end());
      return Err(SyntaxErrorType::UnterminatedComment);
    };
    lexer.consume(mat);
    match tt {
      TT::CommentMultilineEnd => break,
      TT::LineTerminator => contains_newline = true,
      _ => unreachable!(),
    };
  }
  Ok(contains_newline)
}

fn lex_single_comment(lexer: &mut Lexer<'_>) {
  // Consume `//`. The line terminator is left for the caller to see.
  lexer.skip_expect(2);
  lexer.consume(lexer.while_not_line_terminator());
}

/// Consumes a `\uXXXX` escape, returning the code point it denotes.
fn lex_unicode_escape(lexer: &mut Lexer<'_>) -> LexResult<char> {
  // We're at `\`.
  lexer.skip_expect(1);
  if lexer.peek(0) != Some('u') {
    return Err(SyntaxErrorType::InvalidCharacterEscape);
  };
  lexer.skip_expect(1);
  let mut cp = 0u32;
  for _ in 0..4 {
    let digit = lexer
      .peek(0)
      .filter(|&c| DIGIT_HEX.has(c))
      .and_then(|c| c.to_digit(16))
      .ok_or(SyntaxErrorType::InvalidCharacterEscape)?;
    cp = cp * 16 + digit;
    lexer.skip_expect(1);
  }
  char::from_u32(cp).ok_or(SyntaxErrorType::InvalidCharacterEscape)
}

fn lex_identifier(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let starter = lexer.peek(0).ok_or(SyntaxErrorType::UnexpectedEnd)?;
  if starter == '\\' {
    if !is_id_start(lex_unicode_escape(lexer)?) {
      return Err(SyntaxErrorType::InvalidCharacterEscape);
    };
  } else {
    lexer.skip_expect(starter.len_utf8());
  };
  loop {
    lexer.consume(lexer.while_chars(&ID_CONTINUE));
    match lexer.peek(0) {
      Some('\\') => {
        if !is_id_continue(lex_unicode_escape(lexer)?) {
          return Err(SyntaxErrorType::InvalidCharacterEscape);
        };
      }
      Some(c) if !c.is_ascii() && is_id_continue(c) => {
        lexer.skip_expect(c.len_utf8());
      }
      _ => break,
    };
  }
  Ok(TT::Identifier)
}

// A numeric literal must not run straight into an identifier or another digit.
fn lex_number_end(lexer: &Lexer<'_>) -> LexResult<TT> {
  match lexer.peek(0) {
    Some(c) if c == '\\' || DIGIT.has(c) || is_id_start(c) => {
      Err(SyntaxErrorType::MalformedLiteralNumber)
    }
    _ => Ok(TT::LiteralNumber),
  }
}

fn lex_number(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let start = lexer.next();
  lexer.consume(lexer.while_chars(&DIGIT));
  let is_legacy_octal = is_legacy_octal_literal(&lexer[Loc(start, lexer.next())]);
  if is_legacy_octal {
    return lex_number_end(lexer);
  };
  if !lexer.consume(lexer.if_char('.')).is_empty() {
    lexer.consume(lexer.while_chars(&DIGIT));
  };
  if matches!(lexer.peek(0), Some('e' | 'E')) {
    lexer.skip_expect(1);
    if matches!(lexer.peek(0), Some('+' | '-')) {
      lexer.skip_expect(1);
    };
    if lexer.consume(lexer.while_chars(&DIGIT)).is_empty() {
      return Err(SyntaxErrorType::MalformedLiteralNumber);
    };
  };
  lex_number_end(lexer)
}

fn lex_hex_number(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  lexer.skip_expect(2);
  if lexer.consume(lexer.while_chars(&DIGIT_HEX)).is_empty() {
    return Err(SyntaxErrorType::MalformedLiteralNumber);
  };
  lex_number_end(lexer)
}

fn lex_regex(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  // Consume slash.
  lexer.skip_expect(1);
  let mut in_charset = false;
  loop {
    let c = match lexer.peek(0) {
      Some(c) if !is_line_terminator(c) => c,
      _ => return Err(SyntaxErrorType::UnterminatedRegex),
    };
    lexer.skip_expect(c.len_utf8());
    match c {
      '\\' => {
        // Cannot escape line terminator.
        match lexer.peek(0) {
          Some(escaped) if !is_line_terminator(escaped) => lexer.skip_expect(escaped.len_utf8()),
          _ => return Err(SyntaxErrorType::UnterminatedRegex),
        };
      }
      '/' if !in_charset => break,
      '[' => in_charset = true,
      ']' if in_charset => in_charset = false,
      _ => {}
    };
  }
  // Flags.
  lexer.consume(lexer.while_chars(&ID_CONTINUE));
  Ok(TT::LiteralRegex)
}

// Escapes are only skipped over here; the parser decodes and validates them.
fn lex_string(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let quote = lexer.peek(0).ok_or(SyntaxErrorType::UnexpectedEnd)?;
  lexer.skip_expect(1);
  loop {
    let run = lexer.while_not_2_chars('\\', quote);
    let run_text = &lexer.source[lexer.next..lexer.next + run.len()];
    if let Some(pos) = run_text.find(is_line_terminator) {
      lexer.skip_expect(pos);
      return Err(SyntaxErrorType::LineTerminatorInString);
    };
    lexer.consume(run);
    match lexer.peek(0) {
      None => return Err(SyntaxErrorType::UnterminatedString),
      Some('\\') => {
        lexer.skip_expect(1);
        match lexer.peek(0) {
          None => return Err(SyntaxErrorType::UnterminatedString),
          // Line continuation; `\r\n` counts as one.
          Some('\r') => {
            lexer.skip_expect(1);
            lexer.consume(lexer.if_char('\n'));
          }
          Some(c) => lexer.skip_expect(c.len_utf8()),
        };
      }
      Some(_) => {
        lexer.skip_expect(1);
        break;
      }
    };
  }
  Ok(TT::LiteralString)
}

/// Whether the text right after a keyword match continues the word, making it an identifier instead.
fn continues_word(lexer: &Lexer<'_>, mat: Match) -> bool {
  lexer.source[lexer.next + mat.len()..]
    .chars()
    .next()
    .is_some_and(|c| c == '\\' || (!c.is_ascii() && is_id_continue(c)))
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  // Skip whitespace and comments before the next significant token.
  let mut preceded_by_line_terminator = false;
  while let Some((tt, mat)) = INSIG.find(lexer) {
    match tt {
      TT::LineTerminator => {
        lexer.consume(mat);
        preceded_by_line_terminator = true;
      }
      TT::Whitespace => {
        lexer.consume(mat);
      }
      TT::CommentMultiline => {
        let start = lexer.next();
        match lex_multiline_comment(lexer) {
          Ok(has_line_terminator) => preceded_by_line_terminator |= has_line_terminator,
          Err(err) => {
            return Token {
              loc: Loc(start, lexer.next()),
              typ: TT::Invalid,
              preceded_by_line_terminator,
              lex_error: Some(err),
            };
          }
        };
      }
      TT::CommentSingle => lex_single_comment(lexer),
      _ => unreachable!(),
    };
  }

  // EOF is different from Invalid, so we should emit this specifically instead of letting drive_fallible return an Invalid.
  if lexer.at_end() {
    return Token {
      loc: lexer.eof_range(),
      typ: TT::EOF,
      preceded_by_line_terminator,
      lex_error: None,
    };
  };

  lexer.drive_fallible(preceded_by_line_terminator, |lexer| {
    // Non-ASCII identifier starts are not in SIG.
    if lexer.peek(0).is_some_and(|c| !c.is_ascii() && is_id_start(c)) {
      return lex_identifier(lexer);
    };

    let (tt, mat) = SIG
      .find(lexer)
      .ok_or(SyntaxErrorType::UnexpectedCharacter)?;
    match tt {
      TT::Identifier => lex_identifier(lexer),
      TT::LiteralNumber => lex_number(lexer),
      TT::LiteralNumberHex => lex_hex_number(lexer),
      TT::LiteralString => lex_string(lexer),
      TT::Slash | TT::SlashEquals if mode == LexMode::SlashIsRegex => lex_regex(lexer),
      typ if KEYWORDS_MAPPING.contains_key(&typ) && continues_word(lexer, mat) => {
        lex_identifier(lexer)
      }
      typ => {
        lexer.consume(mat);
        Ok(typ)
      }
    }
  })
}

/// Whether a `/` after a token of type `prev` would be a division operator.
fn slash_is_division_after(prev: TT) -> bool {
  matches!(
    prev,
    TT::Identifier
      | TT::KeywordThis
      | TT::LiteralFalse
      | TT::LiteralNull
      | TT::LiteralNumber
      | TT::LiteralRegex
      | TT::LiteralString
      | TT::LiteralTrue
      | TT::ParenthesisClose
      | TT::BracketClose
      | TT::PlusPlus
      | TT::HyphenHyphen
  )
}

/// Splits `source` into tokens, ending with a single `TT::EOF` token.
///
/// Without a parser to consult, the lexing mode for `/` is chosen from the previous significant token. The parser does not use this.
pub fn tokenize(source: &str) -> SyntaxResult<Vec<Token>> {
  let mut lexer = Lexer::new(source);
  let mut tokens = Vec::new();
  let mut mode = LexMode::SlashIsRegex;
  loop {
    let t = lex_next(&mut lexer, mode);
    match t.typ {
      TT::Invalid => {
        return Err(t.error(SyntaxErrorType::UnexpectedCharacter).with_position(&LineIndex::new(source)));
      }
      TT::EOF => {
        tokens.push(t);
        break;
      }
      typ => {
        mode = if slash_is_division_after(typ) {
          LexMode::Standard
        } else {
          LexMode::SlashIsRegex
        };
        tokens.push(t);
      }
    };
  }
  Ok(tokens)
}

