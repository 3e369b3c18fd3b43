use thiserror::Error;

/// A enumeration of all error outcomes that might happen
/// when reading or writing a field or property.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    /// The value the member was read from is not of the declaring type.
    #[error("member `{member}` belongs to `{expected}` but the target is `{received}`")]
    MismatchedTarget {
        member: &'static str,
        expected: &'static str,
        received: &'static str,
    },
    /// Tried to write a value of the wrong type.
    #[error("member `{member}` has type `{expected}` but received `{received}`")]
    MismatchedType {
        member: &'static str,
        expected: &'static str,
        received: &'static str,
    },
    /// The property has no setter.
    #[error("property `{member}` is read-only")]
    ReadOnly { member: &'static str },
}
