use super::super::unexpected;
use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::ObjMember;
use crate::ast::expr::lit::ObjMemberType;
use crate::ast::node::Node;
use crate::char::is_line_terminator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use crate::num::JsNumber;
use crate::token::TT;

// Offset of the offending escape within the literal's raw text.
struct InvalidEscape(usize);

fn hex_value(raw: &str) -> Option<u32> {
  if raw.bytes().all(|b| b.is_ascii_hexdigit()) {
    u32::from_str_radix(raw, 16).ok()
  } else {
    None
  }
}

/// Decodes the escape sequence starting after a backslash. Returns the number of bytes consumed and the code unit(s) produced; line continuations produce nothing.
fn decode_escape_sequence(raw: &str) -> Option<(usize, Vec<u16>)> {
  let first = raw.chars().next()?;
  Some(match first {
    '\r' => {
      let consumed = if raw[1..].starts_with('\n') { 2 } else { 1 };
      (consumed, Vec::new())
    }
    c if is_line_terminator(c) => (c.len_utf8(), Vec::new()),
    'b' => (1, vec![0x08]),
    'f' => (1, vec![0x0c]),
    'n' => (1, vec![0x0a]),
    'r' => (1, vec![0x0d]),
    't' => (1, vec![0x09]),
    'v' => (1, vec![0x0b]),
    // Legacy octal, up to three digits with a maximum of \377.
    '0'..='7' => {
      let digits = raw
        .bytes()
        .take(3)
        .take_while(|b| (b'0'..=b'7').contains(b))
        .count();
      let mut consumed = digits;
      let mut value = u32::from_str_radix(&raw[..consumed], 8).ok()?;
      if value > 0o377 {
        consumed -= 1;
        value = u32::from_str_radix(&raw[..consumed], 8).ok()?;
      };
      (consumed, vec![value as u16])
    }
    'x' => {
      let value = hex_value(raw.get(1..3)?)?;
      (3, vec![value as u16])
    }
    'u' => {
      let value = hex_value(raw.get(1..5)?)?;
      (5, vec![value as u16])
    }
    c => {
      let mut units = [0u16; 2];
      (c.len_utf8(), c.encode_utf16(&mut units).to_vec())
    }
  })
}

/// Decodes the body of a string literal without its quotes. Unpaired surrogates become U+FFFD.
fn decode_literal(raw: &str) -> Result<String, InvalidEscape> {
  let mut units = Vec::<u16>::with_capacity(raw.len());
  let mut i = 0;
  while let Some(pos) = raw[i..].find('\\') {
    units.extend(raw[i..i + pos].encode_utf16());
    let escape_start = i + pos;
    let (consumed, decoded) =
      decode_escape_sequence(&raw[escape_start + 1..]).ok_or(InvalidEscape(escape_start))?;
    units.extend(decoded);
    i = escape_start + 1 + consumed;
  }
  units.extend(raw[i..].encode_utf16());
  Ok(String::from_utf16_lossy(&units))
}

/// Normalises a numeric literal's value; `None` if it is malformed.
pub fn normalise_literal_number(raw: &str) -> Option<JsNumber> {
  JsNumber::from_literal(raw)
}

/// Decodes a string literal's token text, including its quotes.
pub fn normalise_literal_string(raw: &str) -> Option<String> {
  decode_literal(&raw[1..raw.len() - 1]).ok()
}

impl<'a> Parser<'a> {
  fn lit_str_value(&self, loc: Loc) -> SyntaxResult<String> {
    let raw = self.str(loc);
    decode_literal(&raw[1..raw.len() - 1]).map_err(|InvalidEscape(offset)| {
      let start = loc.0 + 1 + offset;
      Loc(start, start + 1).error(SyntaxErrorType::InvalidCharacterEscape, Some(TT::LiteralString))
    })
  }

  fn lit_num_value(&self, loc: Loc) -> SyntaxResult<JsNumber> {
    normalise_literal_number(self.str(loc)).ok_or_else(|| {
      loc.error(SyntaxErrorType::MalformedLiteralNumber, Some(TT::LiteralNumber))
    })
  }

  pub fn lit_arr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitArrExpr>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<LitArrElem>::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(LitArrElem::Empty);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        let value = p.assign_expr(ctx.with_in_allowed(true))?;
        elements.push(LitArrElem::Single(value));
        if p.peek().typ == TT::BracketClose {
          break;
        };
        p.require(TT::Comma)?;
      }
      p.require(TT::BracketClose)?;
      Ok(LitArrExpr { elements })
    })
  }

  pub fn lit_bool(&mut self) -> SyntaxResult<Node<LitBoolExpr>> {
    self.with_loc(|p| {
      let t = p.require_predicate(|t| matches!(t, TT::LiteralTrue | TT::LiteralFalse), "boolean")?;
      Ok(LitBoolExpr {
        value: t.typ == TT::LiteralTrue,
      })
    })
  }

  pub fn lit_null(&mut self) -> SyntaxResult<Node<LitNullExpr>> {
    self.with_loc(|p| {
      p.require(TT::LiteralNull)?;
      Ok(LitNullExpr {})
    })
  }

  pub fn lit_num(&mut self) -> SyntaxResult<Node<LitNumExpr>> {
    self.with_loc(|p| {
      let t = p.require(TT::LiteralNumber)?;
      let value = p.lit_num_value(t.loc)?;
      Ok(LitNumExpr { value })
    })
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<Node<LitRegexExpr>> {
    self.with_loc(|p| {
      let t = p.require_with_mode(TT::LiteralRegex, LexMode::SlashIsRegex)?;
      Ok(LitRegexExpr {
        value: p.string(t.loc),
      })
    })
  }

  pub fn lit_str(&mut self) -> SyntaxResult<Node<LitStrExpr>> {
    self.with_loc(|p| {
      let t = p.require(TT::LiteralString)?;
      let value = p.lit_str_value(t.loc)?;
      Ok(LitStrExpr { value })
    })
  }

  fn obj_member_key(&mut self) -> SyntaxResult<String> {
    let t = self.consume();
    Ok(match t.typ {
      TT::Identifier => self.identifier_name(t.loc),
      TT::LiteralString => self.lit_str_value(t.loc)?,
      TT::LiteralNumber => self.lit_num_value(t.loc)?.to_string(),
      typ if KEYWORDS_MAPPING.contains_key(&typ) => self.string(t.loc),
      _ => return Err(unexpected(&t, "property name")),
    })
  }

  pub fn lit_obj(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitObjExpr>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let members = p.list_with_loc(TT::Comma, TT::BraceClose, |p| {
        let [t0, t1] = p.peek_n();
        let accessor = t0.typ == TT::Identifier
          && is_property_name_start(t1.typ)
          && matches!(p.str(t0.loc), "get" | "set");
        if accessor {
          p.consume();
          let is_getter = p.str(t0.loc) == "get";
          let key = p.obj_member_key()?;
          let function = p.func()?;
          let arity = function.stx.parameters.len();
          if is_getter && arity != 0 {
            return Err(function.error(SyntaxErrorType::ExpectedSyntax("getter without parameters")));
          };
          if !is_getter && arity != 1 {
            return Err(function.error(SyntaxErrorType::ExpectedSyntax("setter with one parameter")));
          };
          let typ = if is_getter {
            ObjMemberType::Getter { function }
          } else {
            ObjMemberType::Setter { function }
          };
          return Ok(ObjMember { key, typ });
        };
        let key = p.obj_member_key()?;
        p.require(TT::Colon)?;
        let value = p.assign_expr(ctx.with_in_allowed(true))?;
        Ok(ObjMember {
          key,
          typ: ObjMemberType::Valued { value },
        })
      })?;
      Ok(LitObjExpr { members })
    })
  }
}

fn is_property_name_start(typ: TT) -> bool {
  matches!(typ, TT::Identifier | TT::LiteralString | TT::LiteralNumber)
    || KEYWORDS_MAPPING.contains_key(&typ)
}

#[cfg(test)]
mod tests {
  use super::normalise_literal_string;

  #[test]
  fn test_decode_string_escapes() {
    assert_eq!(normalise_literal_string(r#""a\tb""#).unwrap(), "a\tb");
    assert_eq!(normalise_literal_string(r#"'\x41B\103'"#).unwrap(), "ABC");
    assert_eq!(normalise_literal_string("'a\\\nb'").unwrap(), "ab");
    assert_eq!(normalise_literal_string("'a\\\r\nb'").unwrap(), "ab");
    assert_eq!(normalise_literal_string(r#"'\q\''"#).unwrap(), "q'");
    assert_eq!(normalise_literal_string(r#"'\0'"#).unwrap(), "\0");
    assert_eq!(normalise_literal_string(r#"'\400'"#).unwrap(), " 0");
  }

  #[test]
  fn test_decode_surrogates() {
    assert_eq!(normalise_literal_string(r"'\uD83D\uDE00'").unwrap(), "😀");
    assert_eq!(normalise_literal_string(r#"'\uD83D'"#).unwrap(), "\u{FFFD}");
  }

  #[test]
  fn test_decode_invalid_escapes() {
    assert!(normalise_literal_string(r#"'\x4'"#).is_none());
    assert!(normalise_literal_string(r#"'\u12G4'"#).is_none());
  }
}
