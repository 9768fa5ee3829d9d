use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// Shared by declarations, expressions and object literal accessors.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: Node<FuncBody>,
}

// A function body is different from a block statement, as the scopes are different.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncBody {
  pub body: Vec<Node<Stmt>>,
}
