/// Broad failure category; decides the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Command-line validation failed.
    InvalidArgument,
    /// The target source could not be read or parsed.
    Load,
    /// The target does not define `setup(size)` and `run(size)`.
    MissingEntryPoints,
    /// Target code raised an error, or the worker died without reporting.
    Runtime,
    /// No growth model could be fitted to the samples.
    Fitting,
    /// Filesystem or process plumbing failed.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidArgument => 2,
            ErrorKind::Load => 3,
            ErrorKind::MissingEntryPoints | ErrorKind::Runtime => 4,
            ErrorKind::Fitting => 5,
            ErrorKind::Io => 6,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    /// True for failures that happened while trials were running.
    pub fn is_benchmark_runtime(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingEntryPoints | ErrorKind::Runtime)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
