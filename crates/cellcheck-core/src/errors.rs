use cellcheck_core_types::ComparisonId;
use thiserror::Error;

/// Result type alias using CompareError
pub type Result<T> = std::result::Result<T, CompareError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by cellcheck. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and host-facing reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Comparison
    CircularStructure,
    Dereference,

    // Registry
    DuplicateVariant,
    InvalidInput,

    // Assertions
    AssertionFailed,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::CircularStructure => "ERR_CIRCULAR_STRUCTURE",
            ExErrorKind::Dereference => "ERR_DEREFERENCE",
            ExErrorKind::DuplicateVariant => "ERR_DUPLICATE_VARIANT",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::AssertionFailed => "ERR_ASSERTION_FAILED",
        }
    }
}

/// Canonical structured error type
///
/// Every domain error converts into an `ExError` so that logging can report a
/// stable kind and code regardless of where the failure originated.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    variant: Option<String>,
    path: Option<String>,
    comparison_id: Option<ComparisonId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            variant: None,
            path: None,
            comparison_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add wrapper variant context
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Add diff path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add comparison correlation context
    pub fn with_comparison_id(mut self, comparison_id: ComparisonId) -> Self {
        self.comparison_id = Some(comparison_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the variant context, if any
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Get the diff path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the comparison id, if any
    pub fn comparison_id(&self) -> Option<&ComparisonId> {
        self.comparison_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(variant) = &self.variant {
            write!(f, " (variant: {})", variant)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(id) = &self.comparison_id {
            write!(f, " (comparison: {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Raised when a wrapper cell cannot produce its current value
///
/// The engine never wraps or rewrites this error; it reaches the caller
/// exactly as the cell produced it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot dereference {variant} cell: {message}")]
pub struct DereferenceError {
    pub variant: String,
    pub label: Option<String>,
    pub message: String,
}

impl DereferenceError {
    pub fn new(variant: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            label: None,
            message: message.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Fatal comparison failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// An identity pair was revisited on the active recursion path
    #[error("Cannot compare circular structures")]
    CircularStructure { path: String },

    /// A wrapper cell failed to dereference
    #[error(transparent)]
    Dereference(#[from] DereferenceError),
}

/// Variant registration failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Variant already registered: {tag}")]
    DuplicateVariant { tag: String },

    #[error("Variant tag cannot be empty")]
    EmptyTag,
}

/// Failures raised by the assertion surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertionError {
    /// The assertion ran and did not hold
    #[error("{message}")]
    Failed { message: String },
    /// The comparison itself could not complete
    #[error(transparent)]
    Compare(#[from] CompareError),
}

impl From<DereferenceError> for AssertionError {
    fn from(err: DereferenceError) -> Self {
        AssertionError::Compare(err.into())
    }
}

/// Conversion from CompareError to ExError
impl From<CompareError> for ExError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::CircularStructure { path } => {
                ExError::new(ExErrorKind::CircularStructure)
                    .with_path(path)
                    .with_message("Cannot compare circular structures")
            }
            CompareError::Dereference(inner) => inner.into(),
        }
    }
}

impl From<DereferenceError> for ExError {
    fn from(err: DereferenceError) -> Self {
        let message = err.to_string();
        ExError::new(ExErrorKind::Dereference)
            .with_variant(err.variant)
            .with_message(message)
    }
}

impl From<RegistryError> for ExError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DuplicateVariant { tag } => ExError::new(ExErrorKind::DuplicateVariant)
                .with_op("register_variant")
                .with_variant(tag)
                .with_message("Variant already registered"),
            RegistryError::EmptyTag => ExError::new(ExErrorKind::InvalidInput)
                .with_op("register_variant")
                .with_message("Variant tag cannot be empty"),
        }
    }
}

impl From<AssertionError> for ExError {
    fn from(err: AssertionError) -> Self {
        match err {
            AssertionError::Failed { message } => {
                ExError::new(ExErrorKind::AssertionFailed).with_message(message)
            }
            AssertionError::Compare(inner) => inner.into(),
        }
    }
}
