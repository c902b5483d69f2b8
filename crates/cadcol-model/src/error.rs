// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document operations

use crate::ElementId;
use thiserror::Error;

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors that can occur while mutating or querying a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Element not found
    #[error("Element {0} not found")]
    ElementNotFound(ElementId),

    /// Parameter lookup failed
    #[error("Parameter '{name}' not found on element {element}")]
    ParameterNotFound { element: ElementId, name: String },

    /// Element is not of the kind the operation expects
    #[error("Element {element} is not a {expected}")]
    WrongElementKind {
        element: ElementId,
        expected: &'static str,
    },

    /// A symbol with the requested name already exists in the family
    #[error("A type named '{0}' already exists")]
    NameCollision(String),

    /// A mutating operation ran outside an open transaction
    #[error("No transaction is open")]
    NoActiveTransaction,

    /// A transaction or group was opened while one was already open
    #[error("A {0} is already open")]
    AlreadyStarted(&'static str),

    /// The document rolled the transaction back despite an attempted commit
    #[error("Transaction commit failed: the document rolled the changes back")]
    TransactionCommitFailed,

    /// Generic invalid operation with message
    #[error("{0}")]
    InvalidOperation(String),
}

impl DocumentError {
    /// Create a generic invalid-operation error
    pub fn invalid(msg: impl Into<String>) -> Self {
        DocumentError::InvalidOperation(msg.into())
    }

    /// Create a parameter-not-found error
    pub fn parameter_not_found(element: ElementId, name: impl Into<String>) -> Self {
        DocumentError::ParameterNotFound {
            element,
            name: name.into(),
        }
    }
}
