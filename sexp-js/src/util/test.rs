use crate::sexp::Sexp;
use similar::ChangeTag;
use similar::TextDiff;
use std::env::var;
use std::fs::read_dir;
use std::fs::read_to_string;
use std::fs::write;

/// Runs `tester` on every `{dir_in_src}/{typ}/{name}.js` and compares the result with `{name}.sexp` next to it.
pub fn evaluate_test_input_files<T: Fn(String) -> Sexp>(dir_in_src: &str, tester: T) {
  let base_dir = format!("{}/src/{}", env!("CARGO_MANIFEST_DIR"), dir_in_src);
  for f_typ in read_dir(&base_dir).unwrap() {
    let f_typ = f_typ.unwrap();
    if f_typ.file_type().unwrap().is_dir() {
      let typ = f_typ.file_name().to_str().unwrap().to_string();
      for f_name in read_dir(format!("{}/{}", base_dir, typ)).unwrap() {
        let f_name = f_name.unwrap();
        let name = f_name.file_name().to_str().unwrap().to_string();
        let Some(stem) = name.strip_suffix(".js") else {
          continue;
        };
        let input = read_to_string(format!("{}/{}/{}", base_dir, typ, name)).unwrap();
        println!("Testing {}/{}...", typ, name);
        let actual = tester(input);
        let sexp_out_path = format!("{}/{}/{}.sexp", base_dir, typ, stem);
        let expected: Sexp = read_to_string(&sexp_out_path)
          .unwrap()
          .parse()
          .unwrap_or_else(|err| panic!("invalid expectation in {}: {}", sexp_out_path, err));
        if actual != expected {
          if var("SEXPJS_REGENERATE_TEST_OUTPUTS").is_ok_and(|v| v == "1") {
            write(&sexp_out_path, format!("{}\n", actual.pretty())).unwrap();
          } else {
            let expected_fmt = format!("{}\n", expected.pretty());
            let actual_fmt = format!("{}\n", actual.pretty());
            let mut msg = format!("Failed {}/{}, got:\n", typ, name);
            let diff = TextDiff::from_lines(&expected_fmt, &actual_fmt);
            for change in diff.iter_all_changes() {
              let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
              };
              msg.push_str(sign);
              msg.push_str(change.as_str().unwrap());
            }
            panic!("{}", msg);
          };
        }
      }
    };
  }
}
