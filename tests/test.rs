use monkey::errors::MonkeyError;
use monkey::evaluator::Environment;
use monkey::run::{run, run_standard};
use pretty_assertions::assert_eq;

#[test]
fn test_language_features() {
    let steps = vec![
        ("13", "13"),
        ("-25", "-25"),
        ("true", "true"),
        ("!true", "false"),
        (r#""hello, world!""#, "hello, world!"),
        ("let a = 42;", "null"),
        ("a", "42"),
        ("a + 8 * 2", "58"),
        ("(a + 8) * 2", "100"),
        ("a / 5", "8"),
        ("a > 40", "true"),
        ("a == 42", "true"),
        ("a != 42", "false"),
        ("if (a > 40) { \"big\" } else { \"small\" }", "big"),
        ("if (a < 40) { \"big\" }", "null"),
        ("let double = fn(x) { x * 2 };", "null"),
        ("double(a)", "84"),
        ("double", "fn(x) {\n(x * 2)\n}"),
        ("let arr = [1, 2 * 2, double(3)];", "null"),
        ("arr", "[1, 4, 6]"),
        ("arr[2]", "6"),
        ("arr[3]", "null"),
        ("len(arr)", "3"),
        ("first(arr)", "1"),
        ("last(arr)", "6"),
        ("rest(arr)", "[4, 6]"),
        ("push(arr, 7)", "[1, 4, 6, 7]"),
        ("arr", "[1, 4, 6]"),
        (r#"let h = {"name": "Monkey", 1: true};"#, "null"),
        (r#"h["name"]"#, "Monkey"),
        ("h[1]", "true"),
        ("h[2]", "null"),
        (r#"{"one": 1}"#, "{one: 1}"),
        ("len", "builtin function"),
        (r#"len("four")"#, "4"),
        (r#""Hello" + " " + "World""#, "Hello World"),
        ("[]", "[]"),
        ("{}", "{}"),
        ("let a = 1;", "null"),
        ("a", "1"),
    ];

    let mut env = Environment::new();
    for (code, exp) in steps {
        let got = format!("{}", run(code, &mut env).unwrap());
        assert_eq!(
            exp, got,
            "we are testing that {} gives {}, but got {}",
            code, exp, got
        );
    }
}

#[test]
fn test_closures_share_session() {
    let mut env = Environment::new();
    run("let newAdder = fn(x) { fn(y) { x + y } };", &mut env).unwrap();
    run("let addTwo = newAdder(2);", &mut env).unwrap();
    assert_eq!(format!("{}", run("addTwo(3)", &mut env).unwrap()), "5");
    run("let x = 100;", &mut env).unwrap();
    assert_eq!(format!("{}", run("addTwo(3)", &mut env).unwrap()), "5");
}

#[test]
fn test_parse_errors_are_reported() {
    let err = run_standard("let x 5; let = 10; let 838383;").unwrap_err();
    assert_eq!(
        err,
        MonkeyError::Parse(vec![
            "expected next token to be =, got INT instead".to_string(),
            "expected next token to be IDENT, got = instead".to_string(),
            "expected next token to be IDENT, got INT instead".to_string(),
        ])
    );
}

#[test]
fn test_parse_errors_skip_evaluation() {
    let mut env = Environment::new();
    let err = run("let a = 1; let b = ;", &mut env).unwrap_err();
    assert!(matches!(err, MonkeyError::Parse(_)));
    let err = run("a", &mut env).unwrap_err();
    assert_eq!(
        err,
        MonkeyError::Runtime("identifier not found: a".to_string())
    );
}

#[test]
fn test_runtime_errors_are_reported() {
    let steps = vec![
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("foobar", "identifier not found: foobar"),
        ("10 / (5 - 5)", "division by zero"),
        ("len(1)", "argument to `len` not supported, got INTEGER"),
        ("push(1, 2)", "argument to `push` must be ARRAY, got INTEGER"),
        (
            "let f = fn(a) { a }; f(1, 2)",
            "wrong number of arguments. got=2, want=1",
        ),
    ];
    for (code, message) in steps {
        assert_eq!(
            run_standard(code).unwrap_err(),
            MonkeyError::Runtime(message.to_string()),
            "evaluating {code}"
        );
    }
    assert_eq!(
        run_standard("5 + true").unwrap_err().to_string(),
        "Error (runtime): type mismatch: INTEGER + BOOLEAN"
    );
}

#[test]
fn test_top_level_return() {
    assert_eq!(
        format!("{}", run_standard("let a = 1; return a + 1; a + 100").unwrap()),
        "2"
    );
}

#[test]
fn test_fibonacci() {
    let code = r#"
        let fibonacci = fn(x) {
            if (x == 0) {
                0
            } else {
                if (x == 1) {
                    return 1;
                } else {
                    fibonacci(x - 1) + fibonacci(x - 2);
                }
            }
        };
        fibonacci(20);
    "#;
    assert_eq!(format!("{}", run_standard(code).unwrap()), "6765");
}

#[test]
fn test_map_reduce() {
    let code = r#"
        let map = fn(arr, f) {
            let iter = fn(i, accumulated) {
                if (i == len(arr)) {
                    accumulated
                } else {
                    iter(i + 1, push(accumulated, f(arr[i])));
                }
            };
            iter(0, []);
        };

        let reduce = fn(arr, initial, f) {
            let iter = fn(i, result) {
                if (i == len(arr)) {
                    result
                } else {
                    iter(i + 1, f(result, arr[i]));
                }
            };
            iter(0, initial);
        };

        let sum = fn(arr) {
            reduce(arr, 0, fn(initial, el) { initial + el });
        };

        let doubled = map([1, 2, 3, 4], fn(x) { x * 2 });
        [doubled, sum(doubled)]
    "#;
    assert_eq!(
        format!("{}", run_standard(code).unwrap()),
        "[[2, 4, 6, 8], 20]"
    );
}

#[test]
fn test_hash_lookup_program() {
    let code = r#"
        let people = [{"name": "Alice", "age": 24}, {"name": "Anna", "age": 28}];
        let getName = fn(person) { person["name"]; };
        getName(people[0]) + " and " + getName(people[1])
    "#;
    assert_eq!(
        format!("{}", run_standard(code).unwrap()),
        "Alice and Anna"
    );
}
