use thiserror::Error;

/// Result type alias using DeepEqError
pub type Result<T> = std::result::Result<T, DeepEqError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and log assertions. Equality and conversion entry points never surface
/// these as failures; they collapse to `false` / `None` at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Contract violations
    InvalidArgument,
    IndexOutOfBounds,
    ElementTypeMismatch,
    InvalidLeafPath,

    // Comparison/conversion signals
    ShapeMismatch,
    Unconvertible,

    // Configuration
    InvalidConfig,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::IndexOutOfBounds => "ERR_INDEX_OUT_OF_BOUNDS",
            ExErrorKind::ElementTypeMismatch => "ERR_ELEMENT_TYPE_MISMATCH",
            ExErrorKind::InvalidLeafPath => "ERR_INVALID_LEAF_PATH",
            ExErrorKind::ShapeMismatch => "ERR_SHAPE_MISMATCH",
            ExErrorKind::Unconvertible => "ERR_UNCONVERTIBLE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Structured representation with classification fields for programmatic
/// handling and context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    index: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            index: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the type the failing operation was working on
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add element index context
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

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
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for deepeq operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeepEqError {
    /// A required type or argument was absent or out of contract
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Two operands enumerate to different leaf path sequences
    #[error("Shape mismatch: {left_leaves} leaves vs {right_leaves} leaves")]
    ShapeMismatch {
        left_leaves: usize,
        right_leaves: usize,
    },

    /// No conversion exists, or the runtime value does not fit the target
    #[error("Cannot convert {from} to {to}")]
    Unconvertible { from: String, to: String },

    /// Element index beyond the array length
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Element cannot be stored in an array of the given component type
    #[error("Cannot store {found} in array of {expected}")]
    ElementTypeMismatch { expected: String, found: String },

    /// Configuration value could not be parsed
    #[error("Invalid configuration value for {key}: '{value}'")]
    InvalidConfig { key: String, value: String },

    /// Raw leaf path does not follow the index/tag encoding
    #[error("Invalid leaf path: {reason}")]
    InvalidLeafPath { reason: String },
}

/// Conversion from DeepEqError to ExError
impl From<DeepEqError> for ExError {
    fn from(err: DeepEqError) -> Self {
        match err {
            DeepEqError::InvalidArgument { reason } => ExError::new(ExErrorKind::InvalidArgument)
                .with_message(format!("Invalid argument: {}", reason)),

            DeepEqError::ShapeMismatch {
                left_leaves,
                right_leaves,
            } => ExError::new(ExErrorKind::ShapeMismatch)
                .with_op("check_shape")
                .with_message(format!(
                    "left has {} leaves, right has {}",
                    left_leaves, right_leaves
                )),

            DeepEqError::Unconvertible { from, to } => ExError::new(ExErrorKind::Unconvertible)
                .with_op("convert")
                .with_type_name(from.clone())
                .with_message(format!("Cannot convert {} to {}", from, to)),

            DeepEqError::IndexOutOfBounds { index, len } => {
                ExError::new(ExErrorKind::IndexOutOfBounds)
                    .with_index(index)
                    .with_message(format!("length is {}", len))
            }

            DeepEqError::ElementTypeMismatch { expected, found } => {
                ExError::new(ExErrorKind::ElementTypeMismatch)
                    .with_type_name(expected)
                    .with_message(format!("Cannot store {}", found))
            }

            DeepEqError::InvalidConfig { key, value } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(format!("{} = '{}'", key, value)),

            DeepEqError::InvalidLeafPath { reason } => ExError::new(ExErrorKind::InvalidLeafPath)
                .with_message(format!("Invalid leaf path: {}", reason)),
        }
    }
}
