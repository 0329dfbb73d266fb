use crate::errors::MonkeyError;
use std::fs;
use std::path::Path;

pub fn read_code(filename: impl AsRef<Path>) -> Result<String, MonkeyError> {
    let path = filename.as_ref();
    fs::read_to_string(path)
        .map_err(|err| MonkeyError::Io(format!("unable to read {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = read_code("this/file/does/not/exist.monkey").unwrap_err();
        assert!(matches!(err, MonkeyError::Io(_)));
        assert!(err.to_string().starts_with("Error (I/O): unable to read"));
    }
}
