use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::FUTURE_RESERVED_WORDS;
use crate::token::TT;
use crate::Dialect;
use crate::ParseOptions;

pub mod drive;
pub mod expr;
pub mod func;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

// Almost every parse_* function takes these field values as parameters. Instead of having to enumerate them as parameters on every function and ordered unnamed arguments on every call, we simply pass this struct around. Fields are public to allow destructuring, but the value should be immutable; the with_* methods can be used to create an altered copy for passing into other functions. This struct should be received as a value, not a reference (i.e. `ctx: ParseCtx` not `ctx: &ParseCtx`).
#[derive(Clone, Copy, Debug)]
pub struct ParseCtx {
  // False only directly inside a `for` header's first clause, where `in` would start a for-in loop.
  pub in_allowed: bool,
}

impl ParseCtx {
  pub fn new() -> ParseCtx {
    ParseCtx { in_allowed: true }
  }

  pub fn with_in_allowed(&self, in_allowed: bool) -> ParseCtx {
    ParseCtx { in_allowed, ..*self }
  }
}

impl Default for ParseCtx {
  fn default() -> Self {
    ParseCtx::new()
  }
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }

  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    Ok(if self.matched { Some(f()?) } else { None })
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
}

/// To get the lexer's `next` after this token was lexed, use `token.loc.1`.
struct BufferedToken {
  token: Token,
  lex_mode: LexMode,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<BufferedToken>,
  next_tok_i: usize,
  options: ParseOptions,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, for several reasons:
// - Avoid needing to redeclare `<'a>` on every function.
// - More lifetime elision is available for `self` than if it was just another reference parameter.
// - Don't need to import each function.
// - For general consistency; if there's no reason why it should be a free function (e.g. more than one ambiguous base type), it should be a method.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>, options: ParseOptions) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
      options,
    }
  }

  pub fn options(&self) -> ParseOptions {
    self.options
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  /// The source range covered by the tokens consumed since `checkpoint`, excluding surrounding whitespace and comments.
  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let start = self
      .buf
      .get(checkpoint.next_tok_i)
      .map(|t| t.token.loc.0)
      .unwrap_or_else(|| self.lexer.next());
    let end = if self.next_tok_i > checkpoint.next_tok_i {
      self.buf[self.next_tok_i - 1].token.loc.1
    } else {
      start
    };
    Loc(start, end)
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  fn reset_to(&mut self, n: usize) {
    self.next_tok_i = n;
    self.buf.truncate(n);
    match self.buf.last() {
      Some(t) => self.lexer.set_next(t.token.loc.1),
      None => self.lexer.set_next(0),
    };
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, mode: LexMode, keep: K) -> (bool, Token) {
    // Only a token starting with `/` can lex differently in another mode.
    if self.buf.get(self.next_tok_i).is_some_and(|t| {
      t.lex_mode != mode && self.lexer.source()[t.token.loc.0..].starts_with('/')
    }) {
      self.reset_to(self.next_tok_i);
    };
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer, mode);
      self.buf.push(BufferedToken {
        token,
        lex_mode: mode,
      });
    };
    let t = self.buf[self.next_tok_i].token.clone();
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| true).1
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| false).1
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_n<const N: usize>(&mut self) -> [Token; N] {
    let cp = self.checkpoint();
    let tokens = std::array::from_fn(|_| self.forward(LexMode::Standard, |_| true).1);
    self.restore_checkpoint(cp);
    tokens
  }

  pub fn maybe_consume_with_mode(&mut self, typ: TT, mode: LexMode) -> MaybeToken {
    let (matched, t) = self.forward(mode, |t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    self.maybe_consume_with_mode(typ, LexMode::Standard)
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(mode);
    match t.typ {
      t_typ if t_typ == typ => Ok(t),
      TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ))),
    }
  }

  pub fn require_predicate<P: FnOnce(TT) -> bool>(
    &mut self,
    pred: P,
    expected: &'static str,
  ) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(LexMode::Standard);
    if !pred(t.typ) {
      Err(unexpected(&t, expected))
    } else {
      Ok(t)
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  /// Consumes an identifier and returns its name with any `\uXXXX` escapes decoded.
  pub fn require_identifier(&mut self) -> SyntaxResult<String> {
    let t = self.consume();
    match t.typ {
      TT::Identifier => Ok(self.identifier_name(t.loc)),
      typ if KEYWORDS_MAPPING.contains_key(&typ) => Err(t.error(SyntaxErrorType::ReservedWord)),
      _ => Err(unexpected(&t, "identifier")),
    }
  }

  /// The name of an identifier token, or the text of a keyword used as a property name.
  pub fn identifier_name(&self, loc: Loc) -> String {
    let raw = self.str(loc);
    if raw.contains('\\') {
      decode_identifier_escapes(raw)
    } else {
      raw.to_string()
    }
  }

  /// Rejects words that are reserved in the configured dialect.
  pub fn check_reserved(&self, t: &Token) -> SyntaxResult<()> {
    let reserved = FUTURE_RESERVED_WORDS.contains(&t.typ)
      || (t.typ == TT::KeywordConst && self.options.dialect == Dialect::Ecma);
    if reserved {
      Err(t.error(SyntaxErrorType::ReservedWord))
    } else {
      Ok(())
    }
  }

  /// Applies automatic semicolon insertion: a statement ends at an explicit `;`, before a token on a new line, before `}`, or at the end of input.
  pub fn require_stmt_end(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    match t.typ {
      TT::Semicolon => {
        self.consume();
        Ok(())
      }
      TT::BraceClose | TT::EOF => Ok(()),
      _ if t.preceded_by_line_terminator => Ok(()),
      _ => Err(t.error(SyntaxErrorType::ExpectedStatementEnd)),
    }
  }
}

/// An error for finding `t` where `expected` should be.
pub fn unexpected(t: &Token, expected: &'static str) -> SyntaxError {
  match t.typ {
    TT::EOF => t.error(SyntaxErrorType::UnexpectedEnd),
    _ => t.error(SyntaxErrorType::ExpectedSyntax(expected)),
  }
}

// The lexer has already validated every escape.
fn decode_identifier_escapes(raw: &str) -> String {
  let mut name = String::with_capacity(raw.len());
  let mut rest = raw;
  while let Some(pos) = rest.find("\\u") {
    name.push_str(&rest[..pos]);
    let hex = rest.get(pos + 2..pos + 6).unwrap_or("");
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
      Some(c) => name.push(c),
      None => name.push_str(&rest[pos..pos + 2]),
    };
    rest = &rest[(pos + 2 + hex.len())..];
  }
  name.push_str(rest);
  name
}
