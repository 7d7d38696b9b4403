//! Runs the `mathc` executable on equation files.

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

fn file(extension: &str, content: &str) -> NamedTempFile {
    let mut file =
        tempfile::Builder::new().suffix(extension).tempfile().unwrap();

    file.write_all(content.as_bytes()).unwrap();
    file
}

fn mathc(arguments: &[&str]) -> (bool, String, String) {
    let output = Command::cargo_bin("mathc").unwrap().args(arguments).output().unwrap();

    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn evaluates_the_last_equation() {
    let input = file(
        ".ron",
        r#"[
            [Variable((name: "b")), Atom((symbol: "=")), Atom((symbol: "\\pm")),
             Literal((text: "5")), Variable((name: "a"))],
            [Literal((text: "2")), Variable((name: "b")), Variable((name: "y"))],
        ]"#,
    );

    let (success, stdout, _) =
        mathc(&[input.path().to_str().unwrap(), "-a", "3", "-1"]);

    assert!(success);
    assert_eq!(
        stdout,
        "b [variable]: a\n_ [expression]: a, y\n[-30.0, 30.0]\n"
    );
}

#[test]
fn reads_json() {
    let input = file(
        ".json",
        r#"[[{"Atom": {"symbol": "\\pm"}}, {"Literal": {"text": "5"}}]]"#,
    );

    let (success, stdout, _) = mathc(&[input.path().to_str().unwrap()]);

    assert!(success);
    assert_eq!(stdout, "_ [expression]: \n[-5.0, 5.0]\n");
}

#[test]
fn reports_unsupported_operator() {
    let input = file(
        ".ron",
        r#"[[Variable((name: "x")), Atom((symbol: "!"))]]"#,
    );

    let (success, stdout, stderr) = mathc(&[input.path().to_str().unwrap()]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("operator not found: !"));
}

#[test]
fn reports_wrong_argument_count() {
    let input = file(".ron", r#"[[Variable((name: "x"))]]"#);

    let (success, _, stderr) =
        mathc(&[input.path().to_str().unwrap(), "-a", "1", "2"]);

    assert!(!success);
    assert!(stderr.contains("expected 1 argument(s) but 2 were given"));
}

#[test]
fn missing_file_fails() {
    let (success, _, stderr) = mathc(&["does-not-exist.ron"]);

    assert!(!success);
    assert!(stderr.contains("does-not-exist.ron"));
}
