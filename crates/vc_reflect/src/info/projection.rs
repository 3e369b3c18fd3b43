use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypePath};

// -----------------------------------------------------------------------------
// Upcast

/// Access from a value to its embedded base value.
///
/// Rust has no inheritance; a type that "derives" from another embeds it
/// and registers an `Upcast` with [`TypeMeta::with_base`]. Members declared on
/// the base are then reachable from the derived type.
///
/// [`TypeMeta::with_base`]: crate::registry::TypeMeta::with_base
pub trait Upcast: Send + Sync {
    /// The base type this upcast yields.
    fn base(&self) -> Type;

    /// Borrows the base, or `None` if `value` is not of the derived type.
    fn upcast<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Reflect>;

    /// Mutably borrows the base, or `None` if `value` is not of the derived type.
    fn upcast_mut<'a>(&self, value: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect>;
}

pub(crate) struct BaseUpcast<T, B> {
    get: fn(&T) -> &B,
    get_mut: fn(&mut T) -> &mut B,
}

impl<T, B> BaseUpcast<T, B> {
    pub(crate) fn new(get: fn(&T) -> &B, get_mut: fn(&mut T) -> &mut B) -> Self {
        Self { get, get_mut }
    }
}

impl<T: Reflect, B: Reflect + TypePath> Upcast for BaseUpcast<T, B> {
    #[inline]
    fn base(&self) -> Type {
        Type::of::<B>()
    }

    fn upcast<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        let value = value.downcast_ref::<T>()?;
        Some((self.get)(value) as &dyn Reflect)
    }

    fn upcast_mut<'a>(&self, value: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        let value = value.downcast_mut::<T>()?;
        Some((self.get_mut)(value) as &mut dyn Reflect)
    }
}

// -----------------------------------------------------------------------------
// Projection

/// A chain of [`Upcast`]s leading from a derived type to the type that
/// declares a member.
///
/// Members stored in a [`TypeMeta`](crate::registry::TypeMeta) carry the
/// identity projection; the registry attaches a longer one when the member
/// is found on a base while searching a derived type.
#[derive(Clone, Default)]
pub struct Projection {
    steps: Vec<Arc<dyn Upcast>>,
}

impl Projection {
    /// The identity projection.
    #[inline]
    pub const fn identity() -> Self {
        Self { steps: Vec::new() }
    }

    /// Returns `true` if no upcast is applied.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of upcasts in the chain.
    #[inline]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Returns a projection that first applies `self`, then `step`.
    pub fn then(&self, step: Arc<dyn Upcast>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Applies every upcast in order.
    pub fn apply<'a>(&self, mut value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        for step in &self.steps {
            value = step.upcast(value)?;
        }
        Some(value)
    }

    /// Applies every upcast in order, mutably.
    pub fn apply_mut<'a>(&self, mut value: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        for step in &self.steps {
            value = step.upcast_mut(value)?;
        }
        Some(value)
    }
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|step| step.base()))
            .finish()
    }
}
