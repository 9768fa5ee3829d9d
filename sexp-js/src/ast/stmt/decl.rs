use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// The name a declaration binds. Kept apart from plain text names (parameters, labels, properties) as the two render differently.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub name: String,
  pub function: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ParamDecl {
  #[drive(skip)]
  pub name: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum VarDeclMode {
  Const,
  Var,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

// Source order is initialization order.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  #[drive(skip)]
  pub name: Symbol,
  pub initializer: Option<Node<VarInitializer>>,
}

// Present exactly when the source wrote `= value`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarInitializer {
  pub value: Node<Expr>,
}
