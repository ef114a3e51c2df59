//! Unified error handling system
//!
//! Structured error types carrying a context with an id, the originating
//! component and recovery suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type BlissResult<T> = Result<T, BlissError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the Bliss portal
#[derive(Error, Debug)]
pub enum BlissError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },
}

impl BlissError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            BlissError::Config { context, .. } | BlissError::Storage { context, .. } => {
                Some(context)
            }
        }
    }

    /// Storage failures may clear up on retry; configuration errors never do
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BlissError::Storage { .. })
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        let error_id = self.context().map(|c| c.error_id.as_str());
        let operation = self.context().and_then(|c| c.operation.as_deref());
        if self.is_recoverable() {
            warn!(
                error_id = ?error_id,
                operation = ?operation,
                error = %self,
                "Storage error (may be recoverable)"
            );
        } else {
            error!(
                error_id = ?error_id,
                operation = ?operation,
                error = %self,
                "Error occurred"
            );
        }
    }
}

/// Build a [`BlissError::Config`] with context
///
/// `config_error!(msg, component)` attaches the generic suggestions;
/// the longer forms name the operation, one suggestion and an optional
/// source error.
#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::BlissError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'bliss config --init' to create default config"),
        }
    };
    ($msg:expr, $component:expr, $operation:expr, $suggestion:expr) => {
        $crate::BlissError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_operation($operation)
                .with_suggestion($suggestion),
        }
    };
    ($msg:expr, $component:expr, $operation:expr, $suggestion:expr, $source:expr) => {
        $crate::BlissError::Config {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component)
                .with_operation($operation)
                .with_suggestion($suggestion),
        }
    };
}
