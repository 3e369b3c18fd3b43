use alloc::boxed::Box;
use core::any::Any;

use crate::Reflect;

/// The value returned by a dynamic call.
#[derive(Debug)]
pub enum Return {
    /// The method returns `()`.
    Unit,
    /// The method returns a value.
    Owned(Box<dyn Reflect>),
}

impl Return {
    /// Boxes `value`. A `()` value becomes [`Return::Unit`].
    pub fn owned<T: Reflect>(value: T) -> Self {
        let value: Box<dyn Reflect> = Box::new(value);
        if value.is::<()>() {
            Self::Unit
        } else {
            Self::Owned(value)
        }
    }

    #[inline]
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Returns the boxed value, `()` for [`Return::Unit`].
    pub fn into_owned(self) -> Box<dyn Reflect> {
        match self {
            Self::Unit => Box::new(()),
            Self::Owned(value) => value,
        }
    }

    /// Borrows the value, `None` for [`Return::Unit`].
    pub fn as_ref(&self) -> Option<&dyn Reflect> {
        match self {
            Self::Unit => None,
            Self::Owned(value) => Some(&**value),
        }
    }

    /// Takes the value as `T`, returning `self` back if the type differs.
    ///
    /// ```
    /// # use vc_reflect::func::Return;
    /// assert_eq!(Return::owned(2_u8).take::<u8>().unwrap(), 2);
    /// assert!(Return::Unit.take::<()>().is_ok());
    /// assert!(Return::owned(2_u8).take::<i8>().is_err());
    /// ```
    pub fn take<T: Any>(self) -> Result<T, Self> {
        match self {
            Self::Unit => {
                let unit: Box<dyn Reflect> = Box::new(());
                unit.take::<T>().map_err(|_| Self::Unit)
            }
            Self::Owned(value) => value.take::<T>().map_err(Self::Owned),
        }
    }
}
