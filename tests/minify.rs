//! Minification feeding the parser: comments stripped, semantics unchanged.

#[test]
fn minify_then_parse_accepts_commented_input() {
    let mut text = String::from("/* c */ {\"a\":1} // tail");
    json_dom::minify(&mut text);
    assert_eq!(text, r#"{"a":1}"#);

    let tree = json_dom::from_str(&text).unwrap();
    assert_eq!(tree.get("a").and_then(json_dom::Value::as_f64), Some(1.0));
}

/// For comment-free valid JSON, minification never changes the parse.
#[test]
fn minify_is_parse_neutral() {
    let documents = [
        r#"{ "a" : [ 1 , 2.5 ] , "s" : "kept  intact" }"#,
        "[\n  true,\n  null\n]",
        r#""just a string""#,
        "  42  ",
    ];

    for doc in documents {
        let mut minified = String::from(doc);
        json_dom::minify(&mut minified);

        let before = json_dom::from_str(doc).unwrap();
        let after = json_dom::from_str(&minified).unwrap();
        assert!(before.deep_equals(&after, true), "changed by minify: {doc}");

        let mut twice = minified.clone();
        json_dom::minify(&mut twice);
        assert_eq!(minified, twice);
    }
}

/// The parser itself keeps rejecting comments; only minification removes
/// them.
#[test]
fn parser_still_rejects_comments() {
    assert!(json_dom::from_str("/* c */ 1").is_err());
}
