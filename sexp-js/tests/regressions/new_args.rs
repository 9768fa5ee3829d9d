use sexp_js::ast::expr::Expr;
use sexp_js::ast::stmt::Stmt;
use sexp_js::loc::Loc;
use sexp_js::parse;
use sexp_js::to_sexp;
use sexp_js::Sexp;

fn assert_expr(source: &str, expected: &str) {
  let expected: Sexp = format!("[[:expression, {expected}]]").parse().unwrap();
  assert_eq!(to_sexp(&parse(source).unwrap()), expected, "{source}");
}

#[test]
fn new_without_parentheses_has_empty_arguments() {
  assert_expr("new foo", r#"[:new_expr, [:resolve, "foo"], [:args, []]]"#);
  assert_expr("new foo()", r#"[:new_expr, [:resolve, "foo"], [:args, []]]"#);
  assert_expr(
    "new foo(1, 'a')",
    r#"[:new_expr, [:resolve, "foo"], [:args, [[:lit, 1], [:str, "a"]]]]"#,
  );
}

#[test]
fn member_accesses_bind_to_constructor() {
  assert_expr(
    "new a.b[c]()",
    r#"[:new_expr, [:bracket_access, [:dot_access, [:resolve, "a"], "b"], [:resolve, "c"]], [:args, []]]"#,
  );
  assert_expr(
    "new foo().bar",
    r#"[:dot_access, [:new_expr, [:resolve, "foo"], [:args, []]], "bar"]"#,
  );
  assert_expr(
    "new new Foo()()",
    r#"[:new_expr, [:new_expr, [:resolve, "Foo"], [:args, []]], [:args, []]]"#,
  );
}

#[test]
fn new_without_arguments_spans_constructor() {
  let program = parse("new foo;").unwrap();
  let Stmt::Expr(stmt) = program.stx.body[0].stx.as_ref() else {
    panic!("expected expression statement");
  };
  let Expr::New(new) = stmt.stx.expr.stx.as_ref() else {
    panic!("expected new expression");
  };
  assert_eq!(new.loc, Loc(0, 7));
  assert!(new.stx.arguments.stx.args.is_empty());
}
