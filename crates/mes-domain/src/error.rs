//! Error handling types
//!
//! Two layers of errors flow through the runtime:
//!
//! - [`Error`] is the working error type returned by ports, registries and
//!   wrappers. Registry and contract violations surface here immediately.
//! - [`DomainError`] is the closed taxonomy presented at a service boundary.
//!   Business code raises it directly; the `guarded` boundary translates every
//!   other [`Error`] into a `DomainError` of kind [`DomainErrorKind::Unhandled`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Code carried by errors normalized at the guarded boundary
pub const UNHANDLED_ERROR_CODE: &str = "UNHANDLED";

/// Default code for business errors raised without an explicit code
pub const DEFAULT_DOMAIN_ERROR_CODE: &str = "MES_ERROR";

/// Main error type for the adapter runtime
#[derive(Error, Debug)]
pub enum Error {
    /// Bad input to a provider, adapter or registry operation
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// A named provider or adapter was never registered
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Runtime wiring is incomplete or inconsistent
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single subscriber failed while a message was being delivered
    #[error("Delivery to '{handler}' on topic '{topic}' failed: {message}")]
    Delivery {
        /// Topic the message was published to
        topic: String,
        /// Identity of the failing handler
        handler: String,
        /// Description of the failure
        message: String,
    },

    /// Transaction manager failure (begin, commit, rollback or close)
    #[error("Transaction error: {message}")]
    Transaction {
        /// Description of the transaction failure
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Business-defined error, passed through wrappers untouched
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a delivery error for one handler
    pub fn delivery<T, H, M>(topic: T, handler: H, message: M) -> Self
    where
        T: Into<String>,
        H: Into<String>,
        M: Into<String>,
    {
        Self::Delivery {
            topic: topic.into(),
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create a transaction error
    pub fn transaction<S: Into<String>>(message: S) -> Self {
        Self::Transaction {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Stable name of the error variant, used as the "type" of unhandled errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::NotFound { .. } => "NotFound",
            Self::Configuration { .. } => "Configuration",
            Self::Delivery { .. } => "Delivery",
            Self::Transaction { .. } => "Transaction",
            Self::Json { .. } => "Json",
            Self::Io { .. } => "Io",
            Self::Domain(_) => "Domain",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Whether this error is a business-defined domain error
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Normalize into the closed boundary taxonomy
    ///
    /// Domain errors are returned as-is; anything else becomes an
    /// [`DomainErrorKind::Unhandled`] error carrying the original message
    /// and variant name.
    pub fn into_domain(self) -> DomainError {
        match self {
            Self::Domain(domain) => domain,
            other => DomainError::unhandled(other.to_string(), other.kind_name()),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::internal(s)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::internal(s)
    }
}

/// Category of a business-facing error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainErrorKind {
    /// Generic business failure
    General,
    /// Inputs failed domain validation rules
    Validation,
    /// Infrastructure dependencies cannot be reached or configured
    Infrastructure,
    /// Persistence layer reported a recoverable error
    Repository,
    /// Caller lacks the required permissions
    AccessDenied,
    /// Any non-domain error normalized at the guarded boundary
    Unhandled,
}

impl std::fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::General => "general",
            Self::Validation => "validation",
            Self::Infrastructure => "infrastructure",
            Self::Repository => "repository",
            Self::AccessDenied => "access_denied",
            Self::Unhandled => "unhandled",
        };
        f.write_str(name)
    }
}

/// Business-facing error with a code and structured payload
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message} ({code})")]
pub struct DomainError {
    /// Error category
    pub kind: DomainErrorKind,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Structured payload
    pub data: Map<String, Value>,
}

impl DomainError {
    /// Create a domain error of the given kind with the default code
    pub fn new<S: Into<String>>(kind: DomainErrorKind, message: S) -> Self {
        Self {
            kind,
            code: DEFAULT_DOMAIN_ERROR_CODE.to_string(),
            message: message.into(),
            data: Map::new(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(DomainErrorKind::Validation, message)
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::new(DomainErrorKind::Infrastructure, message)
    }

    /// Create a repository error
    pub fn repository<S: Into<String>>(message: S) -> Self {
        Self::new(DomainErrorKind::Repository, message)
    }

    /// Create an access denied error
    pub fn access_denied<S: Into<String>>(message: S) -> Self {
        Self::new(DomainErrorKind::AccessDenied, message)
    }

    /// Create the normalized form of a non-domain error
    pub fn unhandled<M: Into<String>, T: Into<String>>(inner: M, error_type: T) -> Self {
        let mut data = Map::new();
        data.insert("inner".to_string(), Value::String(inner.into()));
        data.insert("type".to_string(), Value::String(error_type.into()));
        Self {
            kind: DomainErrorKind::Unhandled,
            code: UNHANDLED_ERROR_CODE.to_string(),
            message: "Unhandled exception".to_string(),
            data,
        }
    }

    /// Replace the error code
    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = code.into();
        self
    }

    /// Attach one structured payload field
    pub fn with_data<K: Into<String>>(mut self, key: K, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Whether this error came out of boundary normalization
    pub fn is_unhandled(&self) -> bool {
        self.kind == DomainErrorKind::Unhandled
    }
}
