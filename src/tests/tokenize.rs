use crate::tokenize;

use pretty_assertions::assert_eq;
use std::vec::Vec;

fn split<const ARGC: usize>(input: &str) -> Vec<Vec<u8>> {
    let mut line = input.as_bytes().to_vec();
    let args = tokenize::<ARGC>(&mut line);
    args.iter().map(|arg| arg.to_vec()).collect()
}

fn strings(args: &[&str]) -> Vec<Vec<u8>> {
    args.iter().map(|arg| arg.as_bytes().to_vec()).collect()
}

#[test]
fn quoting_and_escapes() {
    let got = split::<16>(r#"this 'is some' "text with" '"quotes"' 'concat'enated \"escape\" "#);
    assert_eq!(
        got,
        strings(&[
            "this",
            "is some",
            "text with",
            r#""quotes""#,
            "concatenated",
            r#""escape""#,
        ])
    );
}

#[test]
fn whitespace_collapses() {
    assert_eq!(split::<16>(" \t a \r\n\n  b\t"), strings(&["a", "b"]));
    assert_eq!(split::<16>(""), strings(&[]));
    assert_eq!(split::<16>("   "), strings(&[]));
}

#[test]
fn quotes_are_literal_inside_each_other() {
    assert_eq!(
        split::<16>(r#"'it"s' "it's" 'a\b'"#),
        strings(&[r#"it"s"#, "it's", r"a\b"])
    );
}

#[test]
fn escapes() {
    assert_eq!(
        split::<16>(r"a\ b c\\d \'e"),
        strings(&["a b", r"c\d", "'e"])
    );
}

#[test]
fn empty_quotes_make_empty_argument() {
    assert_eq!(split::<16>(r#"a '' "" b"#), strings(&["a", "", "", "b"]));
}

#[test]
fn unterminated_input() {
    assert_eq!(split::<16>("say 'hello world"), strings(&["say", "hello world"]));
    assert_eq!(split::<16>(r"trailing\"), strings(&["trailing"]));
}

#[test]
fn rewrites_line_in_place() {
    let mut line = *br#"one "t w o" x"#;
    let argc = tokenize::<16>(&mut line).len();
    assert_eq!(argc, 3);
    assert_eq!(&line[..12], b"one\0t w o\0x\0");
}

#[test]
fn stops_at_nul() {
    assert_eq!(split::<16>("a b\0c d"), strings(&["a", "b"]));
}

#[test]
fn argument_cap() {
    let mut line = *b"a b c d e";
    let args = tokenize::<4>(&mut line);
    assert_eq!(args.len(), 3);
    assert_eq!(args.get_str(2), Some("c"));
    assert_eq!(args.get(3), None);

    assert_eq!(split::<1>("a b"), strings(&[]));
    assert_eq!(split::<0>("a b"), strings(&[]));
}
