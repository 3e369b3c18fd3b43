use alloc::sync::Arc;
use core::fmt;

use crate::Reflect;
use crate::func::{ArgError, ArgList, ArgValue, CallError, Return};
use crate::info::{Projection, Signature, Type, TypePath, Visibility};

// -----------------------------------------------------------------------------
// Receiver

/// How a method receives the value it is called on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// `fn(&mut self, ..)`, the declaring type is the receiver.
    Instance,
    /// An associated function without receiver.
    Static,
    /// A static function whose first parameter is the extended type.
    ///
    /// Bound to a target, the target is passed as that first argument.
    Extension,
}

// -----------------------------------------------------------------------------
// MethodCall

trait MethodCall: Send + Sync {
    fn call<'a>(
        &self,
        receiver: Option<&'a mut dyn Reflect>,
        args: ArgList<'a>,
    ) -> Result<Return, CallError>;
}

struct InstanceFn<T, F> {
    name: &'static str,
    func: F,
    _marker: core::marker::PhantomData<fn(&mut T)>,
}

impl<T, F> MethodCall for InstanceFn<T, F>
where
    T: Reflect + TypePath,
    F: Fn(&mut T, &mut ArgList<'_>) -> Result<Return, CallError> + Send + Sync + 'static,
{
    fn call<'a>(
        &self,
        receiver: Option<&'a mut dyn Reflect>,
        mut args: ArgList<'a>,
    ) -> Result<Return, CallError> {
        let receiver = receiver.ok_or(CallError::MissingReceiver { method: self.name })?;
        let received = receiver.reflect_type_path();
        let receiver = receiver
            .downcast_mut::<T>()
            .ok_or(CallError::MismatchedReceiver {
                method: self.name,
                expected: T::type_path(),
                received,
            })?;
        (self.func)(receiver, &mut args)
    }
}

struct StaticFn<F> {
    func: F,
}

impl<F> MethodCall for StaticFn<F>
where
    F: Fn(&mut ArgList<'_>) -> Result<Return, CallError> + Send + Sync + 'static,
{
    fn call<'a>(
        &self,
        _receiver: Option<&'a mut dyn Reflect>,
        mut args: ArgList<'a>,
    ) -> Result<Return, CallError> {
        (self.func)(&mut args)
    }
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A reflected method.
///
/// The callee is a closure that takes its parameters out of an [`ArgList`]
/// in declaration order. The declared parameter list is checked against the
/// arguments before the closure runs, so the closure only fails on its own
/// terms.
///
/// # Examples
///
/// ```
/// use vc_reflect::Reflect;
/// use vc_reflect::func::{ArgList, Return};
/// use vc_reflect::info::{MethodInfo, Type};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Counter(i32);
/// vc_reflect::impl_reflect_value!(Counter, "demo::Counter");
///
/// let add = MethodInfo::instance::<Counter, _>(
///     "add",
///     &[Type::of::<i32>()],
///     Type::of::<i32>(),
///     |counter, args| {
///         counter.0 += args.take_owned::<i32>()?;
///         Ok(Return::owned(counter.0))
///     },
/// );
///
/// let mut counter = Counter(1);
/// let ret = add.invoke(&mut counter, ArgList::new().with_owned(2_i32)).unwrap();
/// assert_eq!(ret.take::<i32>().unwrap(), 3);
/// assert_eq!(add.signature().to_string(), "add(i32)");
/// ```
#[derive(Clone)]
pub struct MethodInfo {
    name: &'static str,
    owner: Type,
    receiver: Receiver,
    params: Arc<[Type]>,
    ret: Type,
    visibility: Visibility,
    call: Arc<dyn MethodCall>,
    projection: Projection,
}

impl MethodInfo {
    /// Creates an instance method of `T`.
    pub fn instance<T, F>(name: &'static str, params: &[Type], ret: Type, func: F) -> Self
    where
        T: Reflect + TypePath,
        F: Fn(&mut T, &mut ArgList<'_>) -> Result<Return, CallError> + Send + Sync + 'static,
    {
        let call = InstanceFn {
            name,
            func,
            _marker: core::marker::PhantomData::<fn(&mut T)>,
        };
        Self::build(Type::of::<T>(), name, Receiver::Instance, params, ret, Arc::new(call))
    }

    /// Creates an associated function of `T`, called without receiver.
    pub fn function<T, F>(name: &'static str, params: &[Type], ret: Type, func: F) -> Self
    where
        T: TypePath,
        F: Fn(&mut ArgList<'_>) -> Result<Return, CallError> + Send + Sync + 'static,
    {
        let call = StaticFn { func };
        Self::build(Type::of::<T>(), name, Receiver::Static, params, ret, Arc::new(call))
    }

    /// Creates an extension method declared on the holder type `T`.
    ///
    /// `params[0]` is the extended type. The method becomes a candidate
    /// on every value of that type (or of a type deriving from it).
    ///
    /// # Panics
    ///
    /// Panics if `params` is empty.
    pub fn extension<T, F>(name: &'static str, params: &[Type], ret: Type, func: F) -> Self
    where
        T: TypePath,
        F: Fn(&mut ArgList<'_>) -> Result<Return, CallError> + Send + Sync + 'static,
    {
        assert!(
            !params.is_empty(),
            "extension method `{name}` needs the extended type as first parameter"
        );
        let call = StaticFn { func };
        Self::build(Type::of::<T>(), name, Receiver::Extension, params, ret, Arc::new(call))
    }

    fn build(
        owner: Type,
        name: &'static str,
        receiver: Receiver,
        params: &[Type],
        ret: Type,
        call: Arc<dyn MethodCall>,
    ) -> Self {
        Self {
            name,
            owner,
            receiver,
            params: Arc::from(params),
            ret,
            visibility: Visibility::Public,
            call,
            projection: Projection::identity(),
        }
    }

    /// Marks the method as [`Visibility::NonPublic`].
    #[inline]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declaring type. For extension methods, the holder type.
    #[inline]
    pub fn owner(&self) -> Type {
        self.owner
    }

    #[inline]
    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.receiver == Receiver::Static
    }

    #[inline]
    pub fn is_extension(&self) -> bool {
        self.receiver == Receiver::Extension
    }

    /// The type an extension method extends.
    #[inline]
    pub fn extended_type(&self) -> Option<Type> {
        match self.receiver {
            Receiver::Extension => self.params.first().copied(),
            _ => None,
        }
    }

    /// The declared parameter list.
    ///
    /// For extension methods this includes the extended type first.
    #[inline]
    pub fn params(&self) -> &[Type] {
        &self.params
    }

    /// The parameters a caller supplies once the method is bound to a target.
    #[inline]
    pub fn bound_params(&self) -> &[Type] {
        match self.receiver {
            Receiver::Extension => &self.params[1..],
            _ => &self.params,
        }
    }

    /// The return type, [`Type::unit`] for methods without value.
    #[inline]
    pub fn ret(&self) -> Type {
        self.ret
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub(crate) fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Returns `true` if the declared parameter list is exactly `types`.
    #[inline]
    pub fn matches(&self, types: &[Type]) -> bool {
        *self.params == *types
    }

    /// Displays as `name(A, B)` using the declared parameter list.
    pub fn signature(&self) -> impl fmt::Display + '_ {
        struct Display<'a>(&'a MethodInfo);

        impl fmt::Display for Display<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", self.0.name, Signature(&self.0.params))
            }
        }

        Display(self)
    }

    /// Prepares the argument list for a call bound to `target`.
    ///
    /// Extension methods receive the target, projected to the extended
    /// type, as their first argument. Other methods receive the list unchanged.
    pub fn bind_receiver<'a>(
        &self,
        target: &'a mut dyn Reflect,
        args: &mut ArgList<'a>,
    ) -> Result<(), CallError> {
        if let Some(extended) = self.extended_type() {
            let received = target.reflect_type_path();
            let target = self.projection.apply_mut(target).ok_or(
                CallError::MismatchedReceiver {
                    method: self.name,
                    expected: extended.path(),
                    received,
                },
            )?;
            args.push_front(ArgValue::Mut(target));
        }
        Ok(())
    }

    /// Checks `args` against the declared parameter list.
    pub fn check_args(&self, args: &ArgList<'_>) -> Result<(), CallError> {
        if args.len() != self.params.len() {
            return Err(CallError::ArgCount {
                expected: self.params.len(),
                received: args.len(),
            });
        }
        for (index, (arg, param)) in args.iter().zip(self.params.iter()).enumerate() {
            let value = arg.value();
            if value.ty_id() != param.id() {
                return Err(ArgError::UnexpectedType {
                    index,
                    expected: param.path(),
                    received: value.reflect_type_path(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Calls the method on `target`.
    ///
    /// Instance methods are called on `target` (projected to the declaring
    /// type), static methods ignore it and extension methods receive it
    /// as their first argument.
    pub fn invoke<'a>(
        &self,
        target: &'a mut dyn Reflect,
        mut args: ArgList<'a>,
    ) -> Result<Return, CallError> {
        match self.receiver {
            Receiver::Instance => {
                self.check_args(&args)?;
                let received = target.reflect_type_path();
                let receiver = self.projection.apply_mut(target).ok_or(
                    CallError::MismatchedReceiver {
                        method: self.name,
                        expected: self.owner.path(),
                        received,
                    },
                )?;
                self.call.call(Some(receiver), args)
            }
            Receiver::Static => self.call_static(args),
            Receiver::Extension => {
                self.bind_receiver(target, &mut args)?;
                self.call_static(args)
            }
        }
    }

    /// Calls the method without a bound target.
    ///
    /// Extension methods expect the extended value as first argument here.
    pub fn call_static(&self, args: ArgList<'_>) -> Result<Return, CallError> {
        if self.receiver == Receiver::Instance {
            return Err(CallError::MissingReceiver { method: self.name });
        }
        self.check_args(&args)?;
        self.call.call(None, args)
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("receiver", &self.receiver)
            .field("params", &self.params)
            .field("ret", &self.ret)
            .field("visibility", &self.visibility)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::MethodInfo;
    use crate::func::{ArgError, ArgList, CallError, Return};
    use crate::info::Type;

    #[derive(Clone, PartialEq, Debug)]
    struct Meter(f32);
    crate::impl_reflect_value!(Meter, "test::Meter");

    struct MeterExt;
    crate::impl_type_path!(MeterExt, "test::MeterExt");

    fn doubled() -> MethodInfo {
        MethodInfo::extension::<MeterExt, _>(
            "doubled",
            &[Type::of::<Meter>()],
            Type::of::<f32>(),
            |args| Ok(Return::owned(args.take_ref::<Meter>()?.0 * 2.0)),
        )
    }

    #[test]
    fn extension_receives_target_first() {
        let method = doubled();
        assert!(method.is_extension());
        assert_eq!(method.extended_type(), Some(Type::of::<Meter>()));
        assert!(method.bound_params().is_empty());

        let mut meter = Meter(1.5);
        let ret = method.invoke(&mut meter, ArgList::new()).unwrap();
        assert_eq!(ret.take::<f32>().unwrap(), 3.0);
    }

    #[test]
    fn arguments_are_checked_before_the_call() {
        let method = MethodInfo::instance::<Meter, _>(
            "scale",
            &[Type::of::<f32>()],
            Type::unit(),
            |meter, args| {
                meter.0 *= args.take_owned::<f32>()?;
                Ok(Return::Unit)
            },
        );

        let mut meter = Meter(2.0);
        assert_eq!(
            method.invoke(&mut meter, ArgList::new()).unwrap_err(),
            CallError::ArgCount { expected: 1, received: 0 }
        );
        assert!(matches!(
            method.invoke(&mut meter, ArgList::new().with_owned(2_i32)),
            Err(CallError::Arg(ArgError::UnexpectedType { index: 0, .. }))
        ));
        assert!(method.invoke(&mut meter, ArgList::new().with_owned(2.0_f32)).unwrap().is_unit());
        assert_eq!(meter, Meter(4.0));
        assert_eq!(method.signature().to_string(), "scale(f32)");
    }

    #[test]
    fn instance_method_rejects_other_receivers() {
        let method = MethodInfo::instance::<Meter, _>("noop", &[], Type::unit(), |_, _| {
            Ok(Return::Unit)
        });
        let mut other = 1_u8;
        assert!(matches!(
            method.invoke(&mut other, ArgList::new()),
            Err(CallError::MismatchedReceiver { .. })
        ));
        assert_eq!(
            method.call_static(ArgList::new()).unwrap_err(),
            CallError::MissingReceiver { method: "noop" }
        );
    }
}
