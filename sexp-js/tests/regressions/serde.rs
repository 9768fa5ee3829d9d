use sexp_js::parse;
use serde_json::Value;

#[test]
fn tree_serializes_with_variant_tags() {
  let program = parse("var foo = bar(1);").unwrap();
  let json = serde_json::to_value(&program).unwrap();
  let decl = &json["body"][0];
  assert_eq!(decl["$t"], Value::from("VarDecl"));
  assert_eq!(decl["mode"], Value::from("Var"));
  assert_eq!(decl["declarators"][0]["name"], Value::from("foo"));
  let value = &decl["declarators"][0]["initializer"]["value"];
  assert_eq!(value["$t"], Value::from("Call"));
  assert_eq!(value["callee"]["$t"], Value::from("Id"));
  assert_eq!(value["callee"]["name"], Value::from("bar"));
}
