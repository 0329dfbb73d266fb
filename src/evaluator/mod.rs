use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::object::{Function, HashPair, Object};
use crate::runtime_error;
use internment::Intern;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::iter::zip;
use std::rc::Rc;

pub mod builtin;

#[derive(Default)]
struct EnvironmentNode {
    data: FxHashMap<Intern<String>, Object>,
    parent: Option<Rc<RefCell<EnvironmentNode>>>,
}

impl EnvironmentNode {
    fn get(&self, key: &Intern<String>) -> Option<Object> {
        match self.data.get(key) {
            Some(value) => Some(value.clone()),
            None => match &self.parent {
                Some(link) => link.borrow().get(key),
                None => None,
            },
        }
    }
}

/// A chain of scopes. Cloning shares the scope; `child` opens a new one.
#[derive(Clone, Default)]
pub struct Environment {
    head: Rc<RefCell<EnvironmentNode>>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.head.borrow();
        let mut names: Vec<&str> = node.data.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .finish_non_exhaustive()
    }
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn child(&self) -> Self {
        let node = EnvironmentNode {
            data: FxHashMap::default(),
            parent: Some(self.head.clone()),
        };
        Self {
            head: Rc::new(RefCell::new(node)),
        }
    }

    /// Binds `key` in this scope only; enclosing scopes are never touched.
    pub fn set(&mut self, key: Intern<String>, value: Object) {
        self.head.borrow_mut().data.insert(key, value);
    }

    #[must_use]
    pub fn get(&self, key: &Intern<String>) -> Option<Object> {
        self.head.borrow().get(key)
    }

    /// Evaluates a whole program. A top-level `return` ends it early with the
    /// unwrapped value; a runtime error comes back as `Object::Error`.
    pub fn evaluate(&mut self, program: &Program) -> Object {
        let mut result = Object::Null;
        for statement in &program.statements {
            result = self.eval_statement(statement);
            match result {
                Object::Return(value) => return *value,
                Object::Error(_) => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_block(&mut self, block: &BlockStatement) -> Object {
        let mut result = Object::Null;
        for statement in &block.statements {
            result = self.eval_statement(statement);
            if result.is_signal() {
                return result;
            }
        }
        result
    }

    pub fn eval_statement(&mut self, statement: &Statement) -> Object {
        match statement {
            Statement::Let { name, value } => {
                let value = self.eval_expression(value);
                if value.is_signal() {
                    return value;
                }
                self.set(name.0, value);
                Object::Null
            }
            Statement::Return(value) => {
                let value = self.eval_expression(value);
                if value.is_signal() {
                    return value;
                }
                Object::Return(Box::new(value))
            }
            Statement::Expression(expr) => self.eval_expression(expr),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(node = %expression))]
    pub fn eval_expression(&mut self, expression: &Expression) -> Object {
        match expression {
            Expression::Integer(value) => Object::Integer(*value),
            Expression::Boolean(value) => Object::Boolean(*value),
            Expression::Str(value) => Object::Str(value.as_str().into()),
            Expression::Identifier(ident) => self.eval_identifier(ident),
            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(right);
                if right.is_signal() {
                    return right;
                }
                eval_prefix(*operator, &right)
            }
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = self.eval_expression(left);
                if left.is_signal() {
                    return left;
                }
                let right = self.eval_expression(right);
                if right.is_signal() {
                    return right;
                }
                eval_infix(*operator, &left, &right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expression(condition);
                if condition.is_signal() {
                    return condition;
                }
                if condition.is_truthy() {
                    self.eval_block(consequence)
                } else if let Some(alt) = alternative {
                    self.eval_block(alt)
                } else {
                    Object::Null
                }
            }
            Expression::Function { parameters, body } => Object::Function(Rc::new(Function {
                parameters: parameters.clone(),
                body: body.clone(),
                env: self.clone(),
            })),
            Expression::Call {
                function,
                arguments,
            } => {
                let function = self.eval_expression(function);
                if function.is_signal() {
                    return function;
                }
                match self.eval_expressions(arguments) {
                    Ok(args) => apply_function(function, args),
                    Err(signal) => signal,
                }
            }
            Expression::Array(elements) => match self.eval_expressions(elements) {
                Ok(values) => Object::from(values),
                Err(signal) => signal,
            },
            Expression::Index { left, index } => {
                let left = self.eval_expression(left);
                if left.is_signal() {
                    return left;
                }
                let index = self.eval_expression(index);
                if index.is_signal() {
                    return index;
                }
                eval_index(&left, &index)
            }
            Expression::Hash(pairs) => self.eval_hash_literal(pairs),
        }
    }

    fn eval_identifier(&self, ident: &Identifier) -> Object {
        if let Some(value) = self.get(&ident.0) {
            return value;
        }
        match builtin::lookup(ident.name()) {
            Some(value) => value,
            None => runtime_error!("identifier not found: {ident}"),
        }
    }

    /// Evaluates left to right, stopping at the first signal.
    fn eval_expressions(&mut self, expressions: &[Expression]) -> Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(expressions.len());
        for expr in expressions {
            let value = self.eval_expression(expr);
            if value.is_signal() {
                return Err(value);
            }
            values.push(value);
        }
        Ok(values)
    }

    fn eval_hash_literal(&mut self, pairs: &[(Expression, Expression)]) -> Object {
        let mut map = FxHashMap::default();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expression(key_expr);
            if key.is_signal() {
                return key;
            }
            let Some(hash_key) = key.hash_key() else {
                return runtime_error!("unusable as hash key: {}", key.type_name());
            };
            let value = self.eval_expression(value_expr);
            if value.is_signal() {
                return value;
            }
            map.insert(hash_key, HashPair { key, value });
        }
        Object::Hash(Rc::new(map))
    }
}

fn eval_prefix(operator: PrefixOperator, right: &Object) -> Object {
    match operator {
        PrefixOperator::Bang => Object::Boolean(!right.is_truthy()),
        PrefixOperator::Minus => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            _ => runtime_error!("unknown operator: -{}", right.type_name()),
        },
    }
}

fn eval_infix(operator: InfixOperator, left: &Object, right: &Object) -> Object {
    match (left, right) {
        (Object::Integer(a), Object::Integer(b)) => eval_integer_infix(operator, *a, *b),
        (Object::Str(a), Object::Str(b)) => match operator {
            InfixOperator::Plus => Object::Str(format!("{a}{b}").into()),
            _ => runtime_error!("unknown operator: STRING {operator} STRING"),
        },
        (Object::Boolean(a), Object::Boolean(b)) => match operator {
            InfixOperator::Eq => Object::Boolean(a == b),
            InfixOperator::NotEq => Object::Boolean(a != b),
            _ => runtime_error!("unknown operator: BOOLEAN {operator} BOOLEAN"),
        },
        _ if left.type_name() != right.type_name() => runtime_error!(
            "type mismatch: {} {operator} {}",
            left.type_name(),
            right.type_name()
        ),
        _ => runtime_error!(
            "unknown operator: {} {operator} {}",
            left.type_name(),
            right.type_name()
        ),
    }
}

fn eval_integer_infix(operator: InfixOperator, a: i64, b: i64) -> Object {
    match operator {
        InfixOperator::Plus => Object::Integer(a.wrapping_add(b)),
        InfixOperator::Minus => Object::Integer(a.wrapping_sub(b)),
        InfixOperator::Asterisk => Object::Integer(a.wrapping_mul(b)),
        InfixOperator::Slash => {
            if b == 0 {
                runtime_error!("division by zero")
            } else {
                Object::Integer(a.wrapping_div(b))
            }
        }
        InfixOperator::Lt => Object::Boolean(a < b),
        InfixOperator::Gt => Object::Boolean(a > b),
        InfixOperator::Eq => Object::Boolean(a == b),
        InfixOperator::NotEq => Object::Boolean(a != b),
    }
}

fn eval_index(left: &Object, index: &Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or_default(),
        (Object::Hash(pairs), _) => match index.hash_key() {
            Some(key) => pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or_default(),
            None => runtime_error!("unusable as hash key: {}", index.type_name()),
        },
        _ => runtime_error!("index operator not supported: {}", left.type_name()),
    }
}

/// Calls a function or builtin. This is the only place a `Return` signal is
/// consumed.
fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            if args.len() != func.parameters.len() {
                return runtime_error!(
                    "wrong number of arguments. got={}, want={}",
                    args.len(),
                    func.parameters.len()
                );
            }
            tracing::debug!(arity = args.len(), "applying function");
            let mut env = func.env.child();
            for (param, arg) in zip(&func.parameters, args) {
                env.set(param.0, arg);
            }
            match env.eval_block(&func.body) {
                Object::Return(value) => *value,
                other => other,
            }
        }
        Object::Builtin(builtin) => {
            tracing::debug!(name = builtin.name, "calling builtin");
            (builtin.func)(args)
        }
        other => runtime_error!("not a function: {}", other.type_name()),
    }
}
