//! The error taxonomy this crate returns. Every fallible operation in the
//! transcoding pipeline returns one of these variants; nothing panics on
//! malformed input.

use alloy_primitives::U256;
use thiserror::Error;

/// The kind of validation that failed, for [`Error::Validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Size,
    GasLimit,
    GasPrice,
    IntrinsicGas,
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationKind::Size => "size",
            ValidationKind::GasLimit => "gas limit",
            ValidationKind::GasPrice => "gas price",
            ValidationKind::IntrinsicGas => "intrinsic gas",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed transaction: {0}")]
    Decode(String),

    #[error("signature error: {0}")]
    Signature(String),

    #[error("validation failed ({subkind}): {context}")]
    Validation {
        subkind: ValidationKind,
        context: String,
    },

    #[error("insufficient balance for {address}: have {available}, need {required}")]
    InsufficientBalance {
        address: String,
        available: U256,
        required: U256,
    },

    #[error("recipient account not found: {address}")]
    RecipientNotFound { address: String },

    #[error("upstream rollup RPC error: {0}")]
    Upstream(#[from] anyhow::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Prepends a breadcrumb to a [`Error::Validation`]'s context without
    /// discarding the original message. A no-op on every other variant.
    pub fn with_context(self, breadcrumb: impl Into<String>) -> Self {
        match self {
            Error::Validation { subkind, context } => Error::Validation {
                subkind,
                context: format!("{}: {}", breadcrumb.into(), context),
            },
            other => other,
        }
    }

    pub fn validation(subkind: ValidationKind, context: impl Into<String>) -> Self {
        Error::Validation {
            subkind,
            context: context.into(),
        }
    }
}
