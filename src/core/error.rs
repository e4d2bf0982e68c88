use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidMagic,
    InvalidByteOrder,
    InvalidStringPoolMagic,
    InvalidLineIndexMagic,
    InvalidLineOrderMagic,
    InconsistentTotalLines,
    InconsistentMaxColumns,
    InconsistentTotalFields,
    Truncated,
    DanglingAddress,
    Io,
    Path,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<PathBuf>,
    offset: Option<u64>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            offset: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset: {offset})")?;
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

/// Exit codes are part of the CLI contract: scripts match on them.
pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::InvalidMagic => 1,
        ErrorKind::InvalidByteOrder => 2,
        ErrorKind::InvalidStringPoolMagic => 3,
        ErrorKind::InvalidLineIndexMagic => 4,
        ErrorKind::InvalidLineOrderMagic => 5,
        ErrorKind::InconsistentTotalLines => 6,
        ErrorKind::InconsistentMaxColumns => 7,
        ErrorKind::InconsistentTotalFields => 8,
        ErrorKind::Truncated => 9,
        ErrorKind::DanglingAddress => 10,
        ErrorKind::Io => 11,
        ErrorKind::Path => -1,
    }
}
