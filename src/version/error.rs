use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Malformed listing line {line_number}: {line:?} (expected `<package> <version> ...`)")]
    MalformedLine { line_number: usize, line: String },
}
