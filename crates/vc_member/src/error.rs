use alloc::string::String;

use thiserror::Error;
use vc_reflect::func::CallError;
use vc_reflect::info::{AccessError, MemberKind};
use vc_scene::{ObjectId, ObjectKind};

/// Everything that can fail while resolving or using a [`MemberBinding`].
///
/// Errors are returned as soon as they happen and leave the binding's
/// cached state as it was.
///
/// [`MemberBinding`]: crate::MemberBinding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemberError {
    #[error("the binding has no target")]
    UnresolvedTarget,

    #[error("target {0:?} no longer exists")]
    DanglingTarget(ObjectId),

    #[error("cannot bind members of a {kind}, expected a game object, a behavior or an asset")]
    UnsupportedTargetKind { target: ObjectId, kind: ObjectKind },

    #[error("component `{component}` was not found on {game_object:?}")]
    ComponentNotFound {
        game_object: ObjectId,
        component: String,
    },

    #[error("the binding has no member name")]
    Unassigned,

    #[error("type `{0}` is not registered")]
    UnregisteredType(&'static str),

    #[error("no member `{name}` on `{owner}`")]
    MemberNotFound { owner: &'static str, name: String },

    #[error("no method `{signature}` on `{owner}`")]
    MethodNotFound {
        owner: &'static str,
        signature: String,
    },

    #[error("method `{name}` on `{owner}` is ambiguous, candidates: {candidates}")]
    AmbiguousMethod {
        owner: &'static str,
        name: String,
        candidates: String,
    },

    #[error("cannot {operation} `{member}`: it is a {kind}")]
    InvalidAccess {
        member: String,
        kind: MemberKind,
        operation: &'static str,
    },

    #[error("expected {expected} arguments, received {received}")]
    Arity { expected: usize, received: usize },

    #[error("expected a value of type `{expected}`, received `{received}`")]
    Cast {
        expected: &'static str,
        received: &'static str,
    },

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Call(#[from] CallError),
}
