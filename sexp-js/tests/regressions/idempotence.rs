use sexp_js::parse;
use sexp_js::to_sexp;
use sexp_js::Sexp;

const SOURCE: &str = r#"
function outer(a, b) {
  var total = 0, i;
  for (i = 0; i < a.length; i++) {
    if (a[i] === b) continue;
    total += a[i] * 2;
  }
  switch (typeof total) {
    case "number": return total;
    default: throw new Error('bad ' + total)
  }
}
var o = { get x() { return this._x }, set x(v) { this._x = v }, 'y': [1, , 3] };
label: while (!done) { try { step() } catch (e) { break label } finally { i-- } }
"#;

#[test]
fn serializing_twice_gives_equal_forms() {
  let first = to_sexp(&parse(SOURCE).unwrap());
  let second = to_sexp(&parse(SOURCE).unwrap());
  assert_eq!(first, second);
  assert_eq!(to_sexp(&first), first);
}

#[test]
fn text_rendering_reads_back() {
  let sexp = to_sexp(&parse(SOURCE).unwrap());
  assert_eq!(sexp.to_string().parse::<Sexp>().unwrap(), sexp);
  assert_eq!(sexp.pretty().parse::<Sexp>().unwrap(), sexp);
}

#[test]
fn form_ignores_layout_and_comments() {
  let compact = to_sexp(&parse("var a=1;if(a){a++}else{a--}").unwrap());
  let spaced = to_sexp(
    &parse("var a = 1 // one\nif (a) {\n  a++\n} /* otherwise */ else {\n  a--\n}\n").unwrap(),
  );
  assert_eq!(compact, spaced);
}

#[test]
fn escapes_do_not_change_the_form() {
  assert_eq!(
    to_sexp(&parse(r#"x = "A\x42C""#).unwrap()),
    to_sexp(&parse("x = 'ABC'").unwrap())
  );
  assert_eq!(
    to_sexp(&parse("x = 0x10").unwrap()),
    to_sexp(&parse("x = 16.0").unwrap())
  );
}
