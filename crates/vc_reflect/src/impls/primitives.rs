use alloc::string::String;

use crate::impl_reflect_value;
use crate::info::PropertyInfo;
use crate::registry::{GetTypeMeta, TypeMeta};

impl_reflect_value!((), "()");
impl_reflect_value!(bool, "bool");
impl_reflect_value!(char, "char");

impl_reflect_value!(u8, "u8");
impl_reflect_value!(u16, "u16");
impl_reflect_value!(u32, "u32");
impl_reflect_value!(u64, "u64");
impl_reflect_value!(u128, "u128");
impl_reflect_value!(usize, "usize");

impl_reflect_value!(i8, "i8");
impl_reflect_value!(i16, "i16");
impl_reflect_value!(i32, "i32");
impl_reflect_value!(i64, "i64");
impl_reflect_value!(i128, "i128");
impl_reflect_value!(isize, "isize");

impl_reflect_value!(f32, "f32");
impl_reflect_value!(f64, "f64");

impl_reflect_value!(String, "alloc::string::String");

macro_rules! impl_get_type_meta {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GetTypeMeta for $ty {
                #[inline]
                fn get_type_meta() -> TypeMeta {
                    TypeMeta::of::<Self>()
                }
            }
        )*
    };
}

impl_get_type_meta!(
    (), bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
);

impl GetTypeMeta for String {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
            .with_property(PropertyInfo::read_only::<Self, usize>("len", String::len))
            .with_property(PropertyInfo::read_only::<Self, bool>("is_empty", String::is_empty))
    }

    fn register_dependencies(registry: &mut crate::registry::TypeRegistry) {
        registry.register::<usize>();
        registry.register::<bool>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{DynamicTypePath, TypePath};
    use crate::registry::TypeRegistry;

    #[test]
    fn primitive_paths() {
        assert_eq!(<i32 as TypePath>::type_path(), "i32");
        assert_eq!(<i32 as TypePath>::module_path(), None);
        assert_eq!(<String as TypePath>::type_name(), "String");
        assert_eq!(<String as TypePath>::module_path(), Some("alloc::string"));
        assert_eq!(<() as TypePath>::type_path(), "()");
    }

    #[test]
    fn dynamic_type_of_boxed_value() {
        let value = 1.5_f64.into_boxed_reflect();
        assert_eq!(value.reflect_type_path(), "f64");
        assert!(value.reflect_type().is::<f64>());
    }

    #[test]
    fn string_length_property() {
        let registry = TypeRegistry::new();
        let meta = registry.get_with_type_name("String").unwrap();
        let len = meta.properties().find(|p| p.name() == "len").unwrap();
        assert!(!len.is_writable());

        let value = String::from("four");
        assert_eq!(len.get(&value).unwrap().take::<usize>().unwrap(), 4);
    }
}
