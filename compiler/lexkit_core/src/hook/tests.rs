use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn field_values_render_for_logs() {
    let fields = [
        Field::new("line", 2usize),
        Field::new("type", -1i32),
        Field::new("buf", "ab"),
        Field::new("char", 'x'),
        Field::new("peeked", None::<char>),
    ];
    assert_eq!(
        Fields(&fields).to_string(),
        r#"line=2 type=-1 buf="ab" char='x' peeked=EOF"#
    );
}

#[test]
fn display_field_uses_display() {
    let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    let field = Field::new("err", FieldValue::Display(&err));
    assert_eq!(field.to_string(), "err=boom");
}

#[test]
fn empty_field_list_renders_empty() {
    assert_eq!(Fields(&[]).to_string(), "");
}

#[test]
fn closures_are_hooks() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let hook = move |message: &str, fields: &[Field<'_>]| {
        sink.borrow_mut()
            .push(format!("{message} {}", Fields(fields)));
    };

    hook.debug("Lex", &[Field::new("value", "to")]);
    assert_eq!(*seen.borrow(), vec![r#"Lex value="to""#.to_owned()]);
}

#[test]
fn only_the_noop_hook_is_disabled() {
    let closure = |_: &str, _: &[Field<'_>]| {};
    assert!(closure.enabled());
    assert!(!NoopHook.enabled());
}

#[test]
fn builtin_hooks_accept_any_input() {
    let fields = [Field::new("line", 1usize)];
    NoopHook.debug("Next", &fields);
    // Without a subscriber installed this is a no-op.
    TracingHook.debug("Next", &fields);
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
