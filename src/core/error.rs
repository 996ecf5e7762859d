// Kind-tagged decode/encode error with a context chain that never rewrites the kind.
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::io;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    UnexpectedEof,
    Malformed,
    LimitExceeded,
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal error",
            ErrorKind::Usage => "usage error",
            ErrorKind::UnexpectedEof => "unexpected eof",
            ErrorKind::Malformed => "malformed data",
            ErrorKind::LimitExceeded => "limit exceeded",
            ErrorKind::Io => "io error",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    // Innermost label first; rendered in reverse.
    context: Vec<Cow<'static, str>>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_unexpected_eof(&self) -> bool {
        self.kind == ErrorKind::UnexpectedEof
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Context labels from the outermost decoder down to the failing primitive.
    pub fn context(&self) -> impl Iterator<Item = &str> {
        self.context.iter().rev().map(|label| label.as_ref())
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Wraps the error with a field or operation label; the kind is preserved.
    pub fn with_context(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.context.push(label.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::UnexpectedEof => ErrorKind::UnexpectedEof,
            _ => ErrorKind::Io,
        };
        Error::new(kind).with_source(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in self.context() {
            write!(f, "{label}: ")?;
        }
        f.write_str(self.kind.as_str())?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Shorthand for the `Result::map_err` wrapping done by every multi-field decoder.
pub trait ResultExt<T> {
    fn context(self, label: &'static str) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, Error> {
    fn context(self, label: &'static str) -> Result<T, Error> {
        self.map_err(|err| err.with_context(label))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::UnexpectedEof => 3,
        ErrorKind::Malformed => 4,
        ErrorKind::LimitExceeded => 5,
        ErrorKind::Io => 6,
    }
}
