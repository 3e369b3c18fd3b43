use alloc::string::String;

use thiserror::Error;

use crate::func::Ownership;

/// An error that occurs when taking an argument out of an [`ArgList`].
///
/// [`ArgList`]: crate::func::ArgList
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgError {
    /// The argument is not of the expected type.
    #[error("expected `{expected}` at argument {index}, received `{received}`")]
    UnexpectedType {
        index: usize,
        expected: &'static str,
        received: &'static str,
    },
    /// The argument has the wrong ownership.
    #[error("expected {expected} value at argument {index}, received {received} value")]
    InvalidOwnership {
        index: usize,
        expected: Ownership,
        received: Ownership,
    },
    /// The list ran out of arguments.
    #[error("missing argument at index {index}")]
    Missing { index: usize },
}

/// An error that occurs when calling a [`MethodInfo`].
///
/// [`MethodInfo`]: crate::info::MethodInfo
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CallError {
    /// The number of arguments does not match the parameter list.
    #[error("expected {expected} arguments, received {received}")]
    ArgCount { expected: usize, received: usize },
    /// An argument could not be taken.
    #[error(transparent)]
    Arg(#[from] ArgError),
    /// An instance method was called without a receiver.
    #[error("method `{method}` requires a receiver")]
    MissingReceiver { method: &'static str },
    /// The receiver is not of the declaring type.
    #[error("method `{method}` belongs to `{expected}` but the receiver is `{received}`")]
    MismatchedReceiver {
        method: &'static str,
        expected: &'static str,
        received: &'static str,
    },
    /// The callee reported a failure of its own.
    #[error("method `{method}` failed: {message}")]
    Failed {
        method: &'static str,
        message: String,
    },
}
