use derive_visitor::Drive;
use derive_visitor::Visitor;
use sexp_js::ast::expr::IdExpr;
use sexp_js::ast::node::Node;
use sexp_js::ast::stmt::decl::FuncDecl;
use sexp_js::parse;

type IdExprNode = Node<IdExpr>;
type FuncDeclNode = Node<FuncDecl>;

#[derive(Default, Visitor)]
#[visitor(IdExprNode(enter), FuncDeclNode(enter))]
struct Collect {
  names: Vec<String>,
  functions: Vec<String>,
}

impl Collect {
  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.names.push(node.stx.name.clone());
  }

  fn enter_func_decl_node(&mut self, node: &FuncDeclNode) {
    self.functions.push(node.stx.name.clone());
  }
}

#[test]
fn visits_nodes_in_source_order() {
  let program = parse("function f(a) { return a + b } f(c.d, e[g]);").unwrap();
  let mut collect = Collect::default();
  program.drive(&mut collect);
  assert_eq!(collect.functions, vec!["f"]);
  assert_eq!(collect.names, vec!["a", "b", "f", "c", "e", "g"]);
}
