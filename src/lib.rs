//! An interpreter for the Monkey language: a Pratt parser producing a syntax
//! tree and a tree-walking evaluator over lexically scoped environments.

pub mod ast;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod run;
pub mod token;
pub mod utils;

pub use errors::MonkeyError;
pub use evaluator::Environment;
pub use object::Object;
pub use parser::parse;
