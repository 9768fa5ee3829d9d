use crate::ast::node::Node;
use crate::num::JsNumber;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

pub mod ast;
pub mod read;

/// The canonical nested-list form of a syntax tree.
///
/// Rendered as text, atoms are written `:name`, text is double-quoted, and lists are bracketed with comma-separated items, e.g. `[:var, [[:var_decl, :foo, nil]]]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sexp {
  Nil,
  // Node tags and declaration names.
  Atom(String),
  // Plain text such as property names, labels and string values.
  Str(String),
  Num(JsNumber),
  List(Vec<Sexp>),
}

impl Sexp {
  pub fn atom(name: impl Into<String>) -> Sexp {
    Sexp::Atom(name.into())
  }

  pub fn str(value: impl Into<String>) -> Sexp {
    Sexp::Str(value.into())
  }

  /// A list headed by the atom `tag`.
  pub fn tagged(tag: &str, items: impl IntoIterator<Item = Sexp>) -> Sexp {
    let mut list = vec![Sexp::atom(tag)];
    list.extend(items);
    Sexp::List(list)
  }

  /// A list holding only the atom `tag`, for nodes without children.
  pub fn leaf(tag: &str) -> Sexp {
    Sexp::List(vec![Sexp::atom(tag)])
  }

  pub fn is_nil(&self) -> bool {
    matches!(self, Sexp::Nil)
  }

  pub fn as_list(&self) -> Option<&[Sexp]> {
    match self {
      Sexp::List(items) => Some(items),
      _ => None,
    }
  }

  /// The leading atom of a tagged list.
  pub fn tag(&self) -> Option<&str> {
    match self.as_list()?.first()? {
      Sexp::Atom(name) => Some(name),
      _ => None,
    }
  }

  fn is_scalar(&self) -> bool {
    match self {
      Sexp::List(items) => items.is_empty(),
      _ => true,
    }
  }

  /// Multi-line rendering with two-space indentation. Lists of scalars stay on one line. The output reads back to the same value.
  pub fn pretty(&self) -> String {
    let mut out = String::new();
    self.write_pretty(&mut out, 0);
    out
  }

  fn write_pretty(&self, out: &mut String, depth: usize) {
    let items = match self {
      Sexp::List(items) if !items.iter().all(Sexp::is_scalar) => items,
      _ => {
        // Writing to a String can't fail.
        let _ = write!(out, "{}", self);
        return;
      }
    };
    out.push_str("[\n");
    for (i, item) in items.iter().enumerate() {
      out.push_str(&"  ".repeat(depth + 1));
      item.write_pretty(out, depth + 1);
      if i + 1 < items.len() {
        out.push(',');
      };
      out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push(']');
  }
}

fn write_quoted(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
  f.write_char('"')?;
  for c in value.chars() {
    match c {
      '"' => f.write_str("\\\"")?,
      '\\' => f.write_str("\\\\")?,
      '\n' => f.write_str("\\n")?,
      '\r' => f.write_str("\\r")?,
      '\t' => f.write_str("\\t")?,
      c if c.is_control() => {
        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
          write!(f, "\\u{:04x}", unit)?;
        }
      }
      c => f.write_char(c)?,
    };
  }
  f.write_char('"')
}

impl Display for Sexp {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Sexp::Nil => f.write_str("nil"),
      Sexp::Atom(name) => write!(f, ":{}", name),
      Sexp::Str(value) => write_quoted(f, value),
      Sexp::Num(value) => write!(f, "{}", value),
      Sexp::List(items) => {
        f.write_char('[')?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          };
          write!(f, "{}", item)?;
        }
        f.write_char(']')
      }
    }
  }
}

/// Conversion into the canonical form. Output depends only on content, so equal trees always produce equal forms.
pub trait ToSexp {
  fn to_sexp(&self) -> Sexp;
}

// Re-serializing a canonical form is the identity.
impl ToSexp for Sexp {
  fn to_sexp(&self) -> Sexp {
    self.clone()
  }
}

impl<S: ToSexp + Drive + DriveMut> ToSexp for Node<S> {
  fn to_sexp(&self) -> Sexp {
    self.stx.to_sexp()
  }
}

impl<T: ToSexp> ToSexp for Vec<T> {
  fn to_sexp(&self) -> Sexp {
    Sexp::List(self.iter().map(ToSexp::to_sexp).collect())
  }
}

impl<T: ToSexp> ToSexp for Option<T> {
  fn to_sexp(&self) -> Sexp {
    match self {
      Some(v) => v.to_sexp(),
      None => Sexp::Nil,
    }
  }
}

pub fn to_sexp<T: ToSexp + ?Sized>(node: &T) -> Sexp {
  node.to_sexp()
}

#[cfg(test)]
mod tests {
  use super::Sexp;
  use crate::num::JsNumber;

  fn sample() -> Sexp {
    Sexp::List(vec![Sexp::tagged("var", [Sexp::List(vec![Sexp::tagged(
      "var_decl",
      [
        Sexp::atom("foo"),
        Sexp::tagged("assign", [Sexp::tagged("lit", [Sexp::Num(JsNumber(10.0))])]),
      ],
    )])])])
  }

  #[test]
  fn test_display() {
    assert_eq!(
      sample().to_string(),
      "[[:var, [[:var_decl, :foo, [:assign, [:lit, 10]]]]]]"
    );
    assert_eq!(
      Sexp::tagged("str", [Sexp::str("a\"b\\\n\u{1}")]).to_string(),
      r#"[:str, "a\"b\\\n\u0001"]"#
    );
    assert_eq!(Sexp::leaf("break").to_string(), "[:break]");
    assert_eq!(Sexp::List(vec![]).to_string(), "[]");
  }

  #[test]
  fn test_pretty() {
    let pretty = Sexp::tagged("return", [Sexp::tagged("lit", [Sexp::Num(JsNumber(1.5))])]).pretty();
    assert_eq!(pretty, "[\n  :return,\n  [:lit, 1.5]\n]");
    assert_eq!(Sexp::leaf("empty").pretty(), "[:empty]");
  }

  #[test]
  fn test_tag() {
    assert_eq!(sample().tag(), None);
    assert_eq!(sample().as_list().unwrap()[0].tag(), Some("var"));
    assert!(Sexp::Nil.is_nil());
  }
}
