use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MonkeyError {
    #[error("Error (I/O): {0}")]
    Io(String),
    #[error("Error (parsing): {}", .0.join("; "))]
    Parse(Vec<String>),
    #[error("Error (runtime): {0}")]
    Runtime(String),
}
