use alloc::boxed::Box;
use alloc::collections::VecDeque;
use core::fmt;

use crate::Reflect;
use crate::func::ArgError;
use crate::info::TypePath;

// -----------------------------------------------------------------------------
// Ownership

/// How an argument is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    Owned,
    Ref,
    Mut,
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Owned => "owned",
            Self::Ref => "borrowed",
            Self::Mut => "mutably borrowed",
        })
    }
}

// -----------------------------------------------------------------------------
// ArgValue

/// A single argument.
#[derive(Debug)]
pub enum ArgValue<'a> {
    Owned(Box<dyn Reflect>),
    Ref(&'a dyn Reflect),
    Mut(&'a mut dyn Reflect),
}

impl ArgValue<'_> {
    /// Borrows the underlying value regardless of ownership.
    pub fn value(&self) -> &dyn Reflect {
        match self {
            Self::Owned(value) => &**value,
            Self::Ref(value) => *value,
            Self::Mut(value) => &**value,
        }
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        match self {
            Self::Owned(_) => Ownership::Owned,
            Self::Ref(_) => Ownership::Ref,
            Self::Mut(_) => Ownership::Mut,
        }
    }
}

// -----------------------------------------------------------------------------
// ArgList

/// An ordered list of arguments.
///
/// Arguments are taken from the front; each `take_*` call advances the
/// index reported in [`ArgError`]s.
///
/// # Examples
///
/// ```
/// use vc_reflect::func::{ArgError, ArgList};
///
/// let name = String::from("player");
/// let mut args = ArgList::new().with_ref(&name).with_owned(1.5_f32);
///
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.take_ref::<String>().unwrap(), "player");
/// assert!(matches!(
///     args.take_owned::<i32>(),
///     Err(ArgError::UnexpectedType { index: 1, .. })
/// ));
/// ```
#[derive(Debug, Default)]
pub struct ArgList<'a> {
    list: VecDeque<ArgValue<'a>>,
    taken: usize,
}

impl<'a> ArgList<'a> {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            list: VecDeque::new(),
            taken: 0,
        }
    }

    /// Appends an owned value.
    #[inline]
    pub fn with_owned<T: Reflect>(self, value: T) -> Self {
        self.with_boxed(Box::new(value))
    }

    /// Appends an already boxed value.
    #[inline]
    pub fn with_boxed(mut self, value: Box<dyn Reflect>) -> Self {
        self.push_back(ArgValue::Owned(value));
        self
    }

    /// Appends a borrowed value.
    #[inline]
    pub fn with_ref(mut self, value: &'a dyn Reflect) -> Self {
        self.push_back(ArgValue::Ref(value));
        self
    }

    /// Appends a mutably borrowed value.
    #[inline]
    pub fn with_mut(mut self, value: &'a mut dyn Reflect) -> Self {
        self.push_back(ArgValue::Mut(value));
        self
    }

    #[inline]
    pub fn push_front(&mut self, arg: ArgValue<'a>) {
        self.list.push_front(arg);
    }

    #[inline]
    pub fn push_back(&mut self, arg: ArgValue<'a>) {
        self.list.push_back(arg);
    }

    /// Number of arguments not yet taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterates over the remaining arguments.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ArgValue<'a>> {
        self.list.iter()
    }

    /// Takes the next argument whatever its ownership.
    pub fn take_arg(&mut self) -> Result<ArgValue<'a>, ArgError> {
        let index = self.taken;
        let arg = self.list.pop_front().ok_or(ArgError::Missing { index })?;
        self.taken += 1;
        Ok(arg)
    }

    /// Takes the next argument as a boxed value.
    pub fn take_boxed(&mut self) -> Result<Box<dyn Reflect>, ArgError> {
        let index = self.taken;
        match self.take_arg()? {
            ArgValue::Owned(value) => Ok(value),
            other => Err(ArgError::InvalidOwnership {
                index,
                expected: Ownership::Owned,
                received: other.ownership(),
            }),
        }
    }

    /// Takes the next argument as an owned `T`.
    pub fn take_owned<T: Reflect + TypePath>(&mut self) -> Result<T, ArgError> {
        let index = self.taken;
        self.take_boxed()?
            .take::<T>()
            .map_err(|value| ArgError::UnexpectedType {
                index,
                expected: T::type_path(),
                received: value.reflect_type_path(),
            })
    }

    /// Takes the next argument as `&T`. Mutable borrows are accepted too.
    pub fn take_ref<T: Reflect + TypePath>(&mut self) -> Result<&'a T, ArgError> {
        let index = self.taken;
        let value: &'a dyn Reflect = match self.take_arg()? {
            ArgValue::Ref(value) => value,
            ArgValue::Mut(value) => value,
            ArgValue::Owned(_) => {
                return Err(ArgError::InvalidOwnership {
                    index,
                    expected: Ownership::Ref,
                    received: Ownership::Owned,
                });
            }
        };
        let received = value.reflect_type_path();
        value
            .downcast_ref::<T>()
            .ok_or(ArgError::UnexpectedType {
                index,
                expected: T::type_path(),
                received,
            })
    }

    /// Takes the next argument as `&mut T`.
    pub fn take_mut<T: Reflect + TypePath>(&mut self) -> Result<&'a mut T, ArgError> {
        let index = self.taken;
        let value = match self.take_arg()? {
            ArgValue::Mut(value) => value,
            other => {
                return Err(ArgError::InvalidOwnership {
                    index,
                    expected: Ownership::Mut,
                    received: other.ownership(),
                });
            }
        };
        let received = value.reflect_type_path();
        value
            .downcast_mut::<T>()
            .ok_or(ArgError::UnexpectedType {
                index,
                expected: T::type_path(),
                received,
            })
    }
}

impl<'a> FromIterator<ArgValue<'a>> for ArgList<'a> {
    fn from_iter<I: IntoIterator<Item = ArgValue<'a>>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
            taken: 0,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
