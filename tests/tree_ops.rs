//! Building, mutating, and comparing trees through the public surface.

use json_dom::{Items, Members, Value};

fn library() -> Value<'static> {
    let mut books = Items::new();
    for (title, year) in [("Dune", 1965), ("Neuromancer", 1984)] {
        let mut book = Members::new();
        book.push("title", Value::string(title));
        book.push("year", Value::Number(f64::from(year)));
        books.push(Value::Object(book));
    }
    let mut root = Members::new();
    root.push("books", Value::Array(books));
    root.push("open", Value::Bool(true));
    Value::Object(root)
}

#[test]
fn build_and_print() {
    assert_eq!(
        json_dom::to_string(&library()),
        r#"{"books":[{"title":"Dune","year":1965},{"title":"Neuromancer","year":1984}],"open":true}"#
    );
}

#[test]
fn mutate_through_lookups() {
    let mut doc = library();

    let books = doc.get_mut("books").and_then(Value::as_array_mut).unwrap();
    let removed = books.remove(0).unwrap();
    assert_eq!(removed.get("title").and_then(Value::as_str), Some("Dune"));
    assert_eq!(books.len(), 1);

    let first = books.get_mut(0).and_then(Value::as_object_mut).unwrap();
    let old = first.replace("year", Value::Number(1985.0)).unwrap();
    assert_eq!(old, Value::Number(1984.0));

    let root = doc.as_object_mut().unwrap();
    assert_eq!(root.remove("open"), Some(Value::Bool(true)));
    assert!(!root.contains_key("open"));
    root.push("closed", Value::Bool(false));

    assert_eq!(
        json_dom::to_string(&doc),
        r#"{"books":[{"title":"Neuromancer","year":1985}],"closed":false}"#
    );
}

#[test]
fn insert_splices_before_index() {
    let mut doc = json_dom::from_str("[0,2]").unwrap().into_owned();
    let items = doc.as_array_mut().unwrap();
    items.insert(1, Value::Number(1.0));
    items.insert(3, Value::Number(3.0)); // == len, appends
    assert_eq!(json_dom::to_string(&doc), "[0,1,2,3]");
}

/// A view spliced into another tree borrows instead of copying; dropping the
/// composite leaves the owner intact, and deep duplication detaches.
#[test]
fn reference_views_across_trees() {
    let owner = library();

    let detached = {
        let mut wrapper = Members::new();
        wrapper.push("shared", owner.to_ref());
        wrapper.push("label", Value::string("composite"));
        let composite = Value::Object(wrapper);

        assert!(composite
            .get("shared")
            .and_then(Value::as_object)
            .unwrap()
            .is_borrowed());
        assert_eq!(
            composite.get("shared").unwrap().get("open"),
            Some(&Value::Bool(true))
        );

        composite.duplicate_deep().unwrap()
    };

    // the composite is gone; the owner and the detached copy both live
    assert_eq!(owner.get("open"), Some(&Value::Bool(true)));
    assert!(!detached
        .get("shared")
        .and_then(Value::as_object)
        .unwrap()
        .is_borrowed());
    assert!(detached.get("shared").unwrap().deep_equals(&owner, true));
}

#[test]
fn parsed_strings_detach_with_into_owned() {
    let detached = {
        let text = String::from(r#"{"borrowed":"from the buffer"}"#);
        let doc = json_dom::from_str(&text).unwrap();
        doc.into_owned()
    };
    assert_eq!(
        detached.get("borrowed").and_then(Value::as_str),
        Some("from the buffer")
    );
}

#[test]
fn compare_follows_structure_not_spelling() {
    let a = json_dom::from_str(r#"{"n":1.0,"arr":[1,2]}"#).unwrap();
    let b = json_dom::from_str(r#"{"arr":[1,2],"n":1}"#).unwrap();
    assert!(a.deep_equals(&b, true));

    // kind mismatch
    let c = json_dom::from_str(r#"{"n":"1","arr":[1,2]}"#).unwrap();
    assert!(!a.deep_equals(&c, true));

    // array length mismatch
    let d = json_dom::from_str(r#"{"n":1,"arr":[1,2,3]}"#).unwrap();
    assert!(!a.deep_equals(&d, true));
}

#[test]
fn from_impls_build_scalars() {
    assert_eq!(Value::from(()), Value::Null);
    assert_eq!(Value::from(3u8), Value::Number(3.0));
    assert_eq!(Value::from(-7i32), Value::Number(-7.0));
    assert_eq!(Value::from(2.5f32), Value::Number(2.5));
    assert_eq!(Value::from("s"), Value::string("s"));
    assert_eq!(
        Value::from(vec![Value::Null]),
        Value::Array(Items::from(vec![Value::Null]))
    );

    let collected: Value = (0..3).map(Value::from).collect();
    assert_eq!(json_dom::to_string(&collected), "[0,1,2]");

    let object: Members = [("a", Value::from(1u8))].into_iter().collect();
    assert_eq!(json_dom::to_string(&Value::Object(object)), r#"{"a":1}"#);
}

#[test]
fn display_prints_compact() {
    let doc = json_dom::from_str(r#"{ "a" : [ 1 , 2 ] }"#).unwrap();
    assert_eq!(format!("{doc}"), r#"{"a":[1,2]}"#);
}

#[test]
fn duplicate_shallow_and_deep() {
    let doc = library();

    let shallow = doc.duplicate_shallow();
    assert!(shallow.is_object());
    assert_eq!(shallow.len(), 0);

    let deep = doc.duplicate_deep().unwrap();
    assert!(deep.deep_equals(&doc, true));
}
