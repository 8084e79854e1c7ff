//! Macros for declaring validated records and referring to their fields.

/// Declare a struct and implement [`Record`](crate::core::Record) for it.
///
/// Every field must convert into a [`Value`](crate::core::Value) and be
/// `Clone`.
///
/// # Example
///
/// ```
/// use fieldcheck::core::{PropertySource, Record};
/// use fieldcheck::record;
///
/// record! {
///     #[derive(Clone, Debug)]
///     pub struct Customer {
///         pub name: String,
///         pub age: i64,
///     }
/// }
///
/// let customer = Customer { name: "Ada".to_string(), age: 36 };
/// assert_eq!(Customer::TYPE.name(), "Customer");
/// assert_eq!(customer.values().len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty
            ),*
        }

        impl $crate::core::Record for $name {
            const TYPE: &'static $crate::core::TypeInfo =
                &$crate::core::TypeInfo::new(stringify!($name), &[$(stringify!($field)),*]);
        }

        impl $crate::core::PropertySource for $name {
            fn type_info(&self) -> &'static $crate::core::TypeInfo {
                <Self as $crate::core::Record>::TYPE
            }

            fn values(&self) -> $crate::core::FieldValueMap {
                let mut values = $crate::core::FieldValueMap::new();
                $(
                    values.insert(
                        $crate::core::FieldRef::new(stringify!($name), stringify!($field)),
                        $crate::core::Value::from(::std::clone::Clone::clone(&self.$field)),
                    );
                )*
                values
            }
        }
    };
}

/// Compile-time checked reference to a field of a record type.
///
/// Expands to a [`Field`](crate::core::Field) whose value type is the
/// field's declared type. Misspelled fields fail to compile.
///
/// # Example
///
/// ```
/// use fieldcheck::{field, record};
///
/// record! {
///     pub struct Customer {
///         pub name: String,
///     }
/// }
///
/// let name = field!(Customer, name);
/// assert_eq!(name.name(), "name");
/// assert_eq!(name.field_ref().declaring_type(), "Customer");
/// ```
#[macro_export]
macro_rules! field {
    ($ty:ty, $field:ident) => {
        $crate::core::Field::<$ty, _>::new(stringify!($field), |record: &$ty| &record.$field)
    };
}

/// Compile-time checked list of fields of one record type, whatever
/// their value types.
///
/// Expands to an array of [`AnyField`](crate::core::AnyField)s.
///
/// # Example
///
/// ```
/// use fieldcheck::{fields, record, RecordValidator};
///
/// record! {
///     pub struct Customer {
///         pub name: String,
///         pub age: i64,
///     }
/// }
///
/// let validator = RecordValidator::<Customer>::builder()
///     .required_and_not_null(fields!(Customer, name, age))
///     .build();
///
/// assert_eq!(validator.as_validator().required().fields().len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($ty:ty, $($field:ident),+ $(,)?) => {
        [$($crate::core::AnyField::<$ty>::from($crate::field!($ty, $field))),+]
    };
}
