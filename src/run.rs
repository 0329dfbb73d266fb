use crate::errors::MonkeyError;
use crate::evaluator::Environment;
use crate::object::Object;
use crate::parser::parse;

/// Parses and evaluates `code` in `env`. Nothing is evaluated when the
/// source has syntax errors.
pub fn run(code: &str, env: &mut Environment) -> Result<Object, MonkeyError> {
    let program = parse(code)?;
    match env.evaluate(&program) {
        Object::Error(message) => Err(MonkeyError::Runtime(message)),
        value => Ok(value),
    }
}

pub fn run_standard(code: &str) -> Result<Object, MonkeyError> {
    let mut env = Environment::new();
    run(code, &mut env)
}
