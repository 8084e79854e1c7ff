//! Field identity for validated types.
//!
//! A [`FieldRef`] names one declared field of one type. Equality is
//! structural (declaring type + field name), so two refs built separately
//! for the same field compare and hash equal.

use super::record::Record;
use crate::builder::BuildError;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Static description of a validated type: its name, the fields it
/// declares, and the types it extends.
///
/// # Example
///
/// ```rust
/// use fieldcheck::core::TypeInfo;
///
/// static ENTITY: TypeInfo = TypeInfo::new("Entity", &["id"]);
/// static CUSTOMER: TypeInfo =
///     TypeInfo::new("Customer", &["name"]).extending(&[&ENTITY]);
///
/// assert!(CUSTOMER.is(&ENTITY));
/// assert!(!ENTITY.is(&CUSTOMER));
/// assert_eq!(CUSTOMER.field("id").unwrap().declaring_type(), "Entity");
/// ```
#[derive(Debug)]
pub struct TypeInfo {
    name: &'static str,
    fields: &'static [&'static str],
    supertypes: &'static [&'static TypeInfo],
}

impl TypeInfo {
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            fields,
            supertypes: &[],
        }
    }

    /// Declare the types this one extends.
    pub const fn extending(self, supertypes: &'static [&'static TypeInfo]) -> Self {
        Self {
            name: self.name,
            fields: self.fields,
            supertypes,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn supertypes(&self) -> &'static [&'static TypeInfo] {
        self.supertypes
    }

    /// Check whether this type is `other` or extends it, directly or
    /// transitively.
    pub fn is(&self, other: &TypeInfo) -> bool {
        self.name == other.name || self.supertypes.iter().any(|s| s.is(other))
    }

    /// Check whether `type_name` is this type or one of its supertypes.
    pub fn lineage_contains(&self, type_name: &str) -> bool {
        self.name == type_name || self.supertypes.iter().any(|s| s.lineage_contains(type_name))
    }

    /// Look up a field declared on this type or inherited from a supertype.
    ///
    /// The returned ref carries the type that actually declares the field.
    pub fn field(&self, name: &str) -> Option<FieldRef> {
        self.fields
            .iter()
            .find(|f| **f == name)
            .map(|f| FieldRef::new(self.name, f))
            .or_else(|| self.supertypes.iter().find_map(|s| s.field(name)))
    }

    /// Every field visible on this type, own fields first.
    pub fn all_fields(&self) -> Vec<FieldRef> {
        let mut fields: Vec<FieldRef> = self
            .fields
            .iter()
            .map(|f| FieldRef::new(self.name, f))
            .collect();
        for supertype in self.supertypes {
            for inherited in supertype.all_fields() {
                if !fields.iter().any(|f| f.name == inherited.name) {
                    fields.push(inherited);
                }
            }
        }
        fields
    }

    /// Resolve a field from its textual name.
    ///
    /// The text must be a bare identifier; member chains, calls or any
    /// other expression are rejected before lookup.
    pub fn resolve(&self, text: &str) -> Result<FieldRef, BuildError> {
        let name = text.trim();
        if !is_identifier(name) {
            return Err(BuildError::InvalidFieldExpression {
                expression: text.to_string(),
            });
        }
        self.field(name).ok_or_else(|| BuildError::UnknownField {
            type_name: self.name,
            name: name.to_string(),
        })
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeInfo {}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Stable identifier of a declared field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldRef {
    declaring_type: &'static str,
    name: &'static str,
}

impl FieldRef {
    pub const fn new(declaring_type: &'static str, name: &'static str) -> Self {
        Self {
            declaring_type,
            name,
        }
    }

    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Compile-time checked reference to field of `T` holding a `V`.
///
/// Built with the [`field!`](crate::field) macro, which only compiles when
/// `T` really has that field.
pub struct Field<T, V> {
    name: &'static str,
    _marker: PhantomData<fn(&T) -> &V>,
}

impl<T, V> Field<T, V> {
    #[doc(hidden)]
    pub fn new(name: &'static str, _accessor: fn(&T) -> &V) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Record, V> Field<T, V> {
    /// The [`FieldRef`] this accessor denotes on `T`.
    pub fn field_ref(&self) -> FieldRef {
        self.erase().field_ref()
    }
}

impl<T, V> Clone for Field<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Field<T, V> {}

impl<T, V> PartialEq for Field<T, V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T, V> Hash for Field<T, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T, V> fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

impl<T, V> Field<T, V> {
    /// Forget the value type, so fields of different types fit one list.
    pub fn erase(self) -> AnyField<T> {
        AnyField::from(self)
    }
}

/// A [`Field`] of `T` whose value type has been erased.
///
/// Built with the [`fields!`](crate::fields) macro or [`Field::erase`].
pub struct AnyField<T> {
    name: &'static str,
    _marker: PhantomData<fn(&T)>,
}

impl<T> AnyField<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Record> AnyField<T> {
    pub fn field_ref(&self) -> FieldRef {
        T::TYPE
            .field(self.name)
            .unwrap_or_else(|| FieldRef::new(T::TYPE.name(), self.name))
    }
}

impl<T, V> From<Field<T, V>> for AnyField<T> {
    fn from(field: Field<T, V>) -> Self {
        Self {
            name: field.name,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for AnyField<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AnyField<T> {}

impl<T> PartialEq for AnyField<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> fmt::Debug for AnyField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyField").field("name", &self.name).finish()
    }
}

/// A single field can be passed wherever a list of fields is expected.
impl<T, V> IntoIterator for Field<T, V> {
    type Item = Self;
    type IntoIter = std::iter::Once<Self>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}
