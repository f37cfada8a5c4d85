//! Uses the same reference tables to write cyclic graphs as JSON with `$id`/`$ref` members.

use std::{cell::RefCell, rc::Rc};
use tessera_graph::{Error, ReferenceReader, ReferenceWriter, TrackerConfig};
use tessera_json::{BuilderOptions, Lexer, LexerOptions, TextBuilder, TokenKind};

#[derive(Debug, Default)]
struct Person {
    name: String,
    friend: Option<Rc<RefCell<Person>>>,
}

type PersonRef = Rc<RefCell<Person>>;

fn person(name: &str) -> PersonRef {
    Rc::new(RefCell::new(Person {
        name: name.into(),
        friend: None,
    }))
}

fn write_person(
    builder: &mut TextBuilder,
    refs: &mut ReferenceWriter,
    person: &PersonRef,
) -> Result<(), Error> {
    let (id, is_new) = refs.try_track(person)?;
    builder.begin_object().unwrap();
    if !is_new {
        builder.append_property_name("$ref").unwrap();
        builder.append_u32(id).unwrap();
        builder.end_object().unwrap();
        return Ok(());
    }
    let inner = person.borrow();
    builder.append_property_name("$id").unwrap();
    builder.append_u32(id).unwrap();
    builder.append_value_separator().unwrap();
    builder.append_property_name("name").unwrap();
    builder.append_string(&inner.name).unwrap();
    builder.append_value_separator().unwrap();
    builder.append_property_name("friend").unwrap();
    match &inner.friend {
        Some(friend) => write_person(builder, refs, friend)?,
        None => builder.append_null().unwrap(),
    }
    builder.end_object().unwrap();
    Ok(())
}

fn expect_name(lexer: &mut Lexer<'_>, name: &str) {
    assert!(lexer.read().unwrap());
    assert_eq!(lexer.get_string().unwrap(), name);
    assert!(lexer.read().unwrap());
}

// Expects the lexer on the value's first token.
fn read_person(
    lexer: &mut Lexer<'_>,
    refs: &mut ReferenceReader<PersonRef>,
) -> Result<Option<PersonRef>, Error> {
    if lexer.token_kind() == TokenKind::Null {
        return Ok(None);
    }
    assert_eq!(lexer.token_kind(), TokenKind::StartObject);
    assert!(lexer.read().unwrap());
    let key = lexer.get_string().unwrap().into_owned();
    assert!(lexer.read().unwrap());
    let id = lexer.get_u32().unwrap();
    if key == "$ref" {
        assert!(lexer.read().unwrap());
        return refs.resolve(id).map(|person| Some(Rc::clone(person)));
    }
    assert_eq!(key, "$id");

    let person = PersonRef::default();
    refs.register(id, Rc::clone(&person))?;
    lexer.read().unwrap();
    expect_name(lexer, "name");
    let name = lexer.get_string().unwrap().into_owned();
    lexer.read().unwrap();
    expect_name(lexer, "friend");
    let friend = read_person(lexer, refs)?;
    assert!(lexer.read().unwrap());
    assert_eq!(lexer.token_kind(), TokenKind::EndObject);

    *person.borrow_mut() = Person { name, friend };
    Ok(Some(person))
}

fn to_json(root: &PersonRef) -> String {
    let mut builder = TextBuilder::new(BuilderOptions::default());
    let mut refs = ReferenceWriter::default();
    write_person(&mut builder, &mut refs, root).unwrap();
    builder.finish()
}

fn from_json(text: &str, cfg: TrackerConfig) -> Result<Option<PersonRef>, Error> {
    let mut lexer = Lexer::new(text, LexerOptions::default());
    assert!(lexer.read().unwrap());
    let mut refs = ReferenceReader::new(cfg);
    read_person(&mut lexer, &mut refs)
}

#[test]
fn test_mutual_friends() {
    let alice = person("alice");
    let bob = person("bob");
    alice.borrow_mut().friend = Some(Rc::clone(&bob));
    bob.borrow_mut().friend = Some(Rc::clone(&alice));

    let text = to_json(&alice);
    assert_eq!(
        text,
        r#"{"$id":0,"name":"alice","friend":{"$id":1,"name":"bob","friend":{"$ref":0}}}"#
    );

    let decoded = from_json(&text, TrackerConfig::default()).unwrap().unwrap();
    let decoded_bob = decoded.borrow().friend.clone().unwrap();
    assert_eq!(decoded_bob.borrow().name, "bob");
    let back = decoded_bob.borrow().friend.clone().unwrap();
    assert!(Rc::ptr_eq(&back, &decoded));

    for p in [alice, bob, decoded, decoded_bob, back] {
        p.borrow_mut().friend = None;
    }
}

#[test]
fn test_same_content_written_twice() {
    let first = person("twin");
    let second = person("twin");
    first.borrow_mut().friend = Some(Rc::clone(&second));

    let text = to_json(&first);
    assert!(!text.contains("$ref"));
    let decoded = from_json(&text, TrackerConfig::default()).unwrap().unwrap();
    let friend = decoded.borrow().friend.clone().unwrap();
    assert!(!Rc::ptr_eq(&friend, &decoded));
}

#[test]
fn test_unknown_and_bounded_references() {
    assert_eq!(
        from_json(r#"{"$ref":4}"#, TrackerConfig::default()).unwrap_err(),
        Error::UnknownReference(4)
    );
    assert_eq!(
        from_json(
            r#"{"$id":9,"name":"x","friend":null}"#,
            TrackerConfig { max_references: 4 }
        )
        .unwrap_err(),
        Error::CapacityExceeded { capacity: 4 }
    );
}
