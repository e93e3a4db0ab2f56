//! Domain error types.

/// A parse error with position information for script parsing.
#[derive(Debug, Clone, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let caret = " ".repeat(self.position) + "^";
        format!(
            "{input}\n{caret}\n{err}",
            input = input,
            caret = caret,
            err = self
        )
    }
}

/// A parse error tied to the script line it occurred on.
#[derive(Debug, Clone, thiserror::Error)]
#[error("line {line_number}: {error}")]
pub struct ScriptError {
    pub line_number: usize,
    pub line: String,
    pub error: ParseError,
}

impl ScriptError {
    /// Caret rendering of the failing line, prefixed with its number.
    pub fn display_with_context(&self) -> String {
        format!(
            "line {}:\n{}",
            self.line_number,
            self.error.display_with_context(&self.line)
        )
    }
}

/// Top-level error type for objreg.
#[derive(Debug, thiserror::Error)]
pub enum ObjregError {
    #[error("attempt to retrieve object with unknown instance name '{name}'")]
    NotFound { name: String },

    #[error("invalid name pattern '{pattern}': {reason}")]
    PatternSyntax { pattern: String, reason: String },

    #[error("object with instance name '{name}' is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("unknown object type '{type_name}'")]
    UnknownType { type_name: String },

    #[error("invalid {type_name} specification: {reason}")]
    InvalidSpec { type_name: String, reason: String },

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("fixing dates and values differ in length: {dates} dates, {values} values")]
    FixingSizeMismatch { dates: usize, values: usize },

    #[error("fixing {value} on {date} is not positive")]
    NonPositiveFixing {
        value: f64,
        date: chrono::NaiveDate,
    },

    #[error("fixing for {date} already recorded with a different value")]
    DuplicateFixing { date: chrono::NaiveDate },

    #[error("fixing data error: {reason}")]
    FixingData { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ObjregError> for std::process::ExitCode {
    fn from(err: &ObjregError) -> Self {
        let code: u8 = match err {
            ObjregError::Io(_) => 1,
            ObjregError::ConfigParse { .. } | ObjregError::ConfigInvalid { .. } => 2,
            ObjregError::NotFound { .. }
            | ObjregError::PatternSyntax { .. }
            | ObjregError::TypeMismatch { .. } => 3,
            ObjregError::Script(_)
            | ObjregError::UnknownType { .. }
            | ObjregError::InvalidSpec { .. } => 4,
            ObjregError::FixingSizeMismatch { .. }
            | ObjregError::NonPositiveFixing { .. }
            | ObjregError::DuplicateFixing { .. }
            | ObjregError::FixingData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
