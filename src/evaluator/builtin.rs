use crate::object::{Builtin, BuiltinFn, Object};
use crate::runtime_error;

pub const BUILTINS: [(&str, BuiltinFn); 6] = [
    ("len", builtin_len),
    ("first", builtin_first),
    ("last", builtin_last),
    ("rest", builtin_rest),
    ("push", builtin_push),
    ("puts", builtin_puts),
];

#[must_use]
pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS
        .iter()
        .find(|(builtin_name, _)| *builtin_name == name)
        .map(|&(name, func)| Object::Builtin(Builtin { name, func }))
}

fn check_arity(values: &[Object], want: usize) -> Option<Object> {
    if values.len() == want {
        None
    } else {
        Some(runtime_error!(
            "wrong number of arguments. got={}, want={want}",
            values.len()
        ))
    }
}

fn builtin_len(values: Vec<Object>) -> Object {
    if let Some(err) = check_arity(&values, 1) {
        return err;
    }
    match &values[0] {
        Object::Str(s) => Object::Integer(s.chars().count() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => runtime_error!("argument to `len` not supported, got {}", other.type_name()),
    }
}

fn builtin_first(values: Vec<Object>) -> Object {
    if let Some(err) = check_arity(&values, 1) {
        return err;
    }
    match &values[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or_default(),
        other => runtime_error!("argument to `first` must be ARRAY, got {}", other.type_name()),
    }
}

fn builtin_last(values: Vec<Object>) -> Object {
    if let Some(err) = check_arity(&values, 1) {
        return err;
    }
    match &values[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or_default(),
        other => runtime_error!("argument to `last` must be ARRAY, got {}", other.type_name()),
    }
}

/// Everything but the first element; `null` for arrays of length 0 or 1.
fn builtin_rest(values: Vec<Object>) -> Object {
    if let Some(err) = check_arity(&values, 1) {
        return err;
    }
    match &values[0] {
        Object::Array(elements) if elements.len() > 1 => Object::from(elements[1..].to_vec()),
        Object::Array(_) => Object::Null,
        other => runtime_error!("argument to `rest` must be ARRAY, got {}", other.type_name()),
    }
}

// The argument array is never mutated.
fn builtin_push(values: Vec<Object>) -> Object {
    if let Some(err) = check_arity(&values, 2) {
        return err;
    }
    match &values[0] {
        Object::Array(elements) => {
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.extend(elements.iter().cloned());
            extended.push(values[1].clone());
            Object::from(extended)
        }
        other => runtime_error!("argument to `push` must be ARRAY, got {}", other.type_name()),
    }
}

fn builtin_puts(values: Vec<Object>) -> Object {
    for value in &values {
        println!("{value}");
    }
    Object::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Environment;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn validate(steps: Vec<(&str, Object)>) {
        let mut env = Environment::new();
        for (code, out) in steps {
            let program = parse(code).unwrap();
            assert_eq!(env.evaluate(&program), out, "we are testing that {code} gives {out}");
        }
    }

    fn ints(values: &[i64]) -> Object {
        Object::from(values.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>())
    }

    fn error(message: &str) -> Object {
        Object::Error(message.to_string())
    }

    #[test]
    fn test_len() {
        validate(vec![
            (r#"len("")"#, Object::Integer(0)),
            (r#"len("four")"#, Object::Integer(4)),
            (r#"len("hello world")"#, Object::Integer(11)),
            ("len([1, 2, 3])", Object::Integer(3)),
            ("len([])", Object::Integer(0)),
            ("len(1)", error("argument to `len` not supported, got INTEGER")),
            (
                r#"len("one", "two")"#,
                error("wrong number of arguments. got=2, want=1"),
            ),
            ("len()", error("wrong number of arguments. got=0, want=1")),
        ]);
    }

    #[test]
    fn test_array_builtins() {
        validate(vec![
            ("let a = [1, 2, 3];", Object::Null),
            ("first(a)", Object::Integer(1)),
            ("last(a)", Object::Integer(3)),
            ("rest(a)", ints(&[2, 3])),
            ("rest(rest(a))", ints(&[3])),
            ("rest(rest(rest(a)))", Object::Null),
            ("rest([])", Object::Null),
            ("first([])", Object::Null),
            ("last([])", Object::Null),
            ("push([], 1)", ints(&[1])),
            ("first(1)", error("argument to `first` must be ARRAY, got INTEGER")),
            ("last(true)", error("argument to `last` must be ARRAY, got BOOLEAN")),
            (r#"rest("abc")"#, error("argument to `rest` must be ARRAY, got STRING")),
            ("push(1, 1)", error("argument to `push` must be ARRAY, got INTEGER")),
            ("push(a)", error("wrong number of arguments. got=1, want=2")),
        ]);
    }

    #[test]
    fn test_push_does_not_alias() {
        validate(vec![
            ("let a = [1, 2];", Object::Null),
            ("let b = push(a, 3);", Object::Null),
            ("a", ints(&[1, 2])),
            ("b", ints(&[1, 2, 3])),
            ("let c = rest(b);", Object::Null),
            ("b", ints(&[1, 2, 3])),
        ]);
    }

    #[test]
    fn test_puts_returns_null() {
        validate(vec![
            (r#"puts("hello", 1)"#, Object::Null),
            ("puts()", Object::Null),
        ]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("len").map(|b| b.type_name()), Some("BUILTIN"));
        assert_eq!(lookup("print"), None);
        assert_eq!(lookup("len").unwrap().to_string(), "builtin function");
    }
}
