//! Error handling for the hashtab library
//!
//! Absence and fullness are ordinary outcomes of table operations and are
//! reported through `Option` and `bool` return values. The error type here
//! covers the typed insertion path, construction parameters, configuration
//! and invariant validation.

use thiserror::Error;

/// Main error type for the hashtab library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HashTableError {
    /// Every slot holds a live key
    #[error("Table full: capacity {capacity}")]
    Full {
        /// Slot count of the table
        capacity: usize,
    },

    /// Key is already stored in the set
    #[error("Duplicate key")]
    Duplicate,

    /// Capacity that cannot back a table
    #[error("Invalid capacity: {capacity}")]
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// A structural invariant does not hold
    #[error("Corrupted table: {message}")]
    Corrupted {
        /// Description of the broken invariant
        message: String,
    },
}

impl HashTableError {
    /// Create a table full error
    pub fn full(capacity: usize) -> Self {
        Self::Full { capacity }
    }

    /// Create an invalid capacity error
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a corruption error
    pub fn corrupted<S: Into<String>>(message: S) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// A full table recovers after a remove or a rehash, and a duplicate is
    /// simply a no-op for the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Full { .. } => true,
            Self::Duplicate => true,
            Self::InvalidCapacity { .. } => false,
            Self::Configuration { .. } => false,
            Self::Corrupted { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Full { .. } => "full",
            Self::Duplicate => "duplicate",
            Self::InvalidCapacity { .. } => "capacity",
            Self::Configuration { .. } => "config",
            Self::Corrupted { .. } => "corrupted",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HashTableError>;

/// Assert that a capacity can back a table
#[inline]
pub fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        Err(HashTableError::invalid_capacity(capacity))
    } else {
        Ok(())
    }
}
