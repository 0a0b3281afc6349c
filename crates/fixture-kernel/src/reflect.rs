//! Runtime member reflection
//!
//! Types that take part in member population describe their fields and
//! properties through [`Reflect`]. A descriptor carries everything the
//! population routine needs to decide whether a member can be written:
//! kind, declared type, visibility, writability and whether it is static.

use crate::error::AssignmentError;
use std::any::{Any, TypeId};
use std::fmt;

/// Identity and display name of a runtime type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Describe `T`
    #[inline]
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Type identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with every module path stripped
    ///
    /// Paths inside generic arguments, tuples and arrays are stripped too:
    /// `app::Proxy<app::Widget>` becomes `Proxy<Widget>` and
    /// `(a::B, [c::D; 2])` becomes `(B, [D; 2])`.
    #[must_use]
    pub fn short_name(&self) -> String {
        let is_path = |c: char| c.is_alphanumeric() || c == '_' || c == ':';
        let mut out = String::with_capacity(self.name.len());
        let mut rest = self.name;

        while !rest.is_empty() {
            let path_end = rest.find(|c: char| !is_path(c)).unwrap_or(rest.len());
            let (path, tail) = rest.split_at(path_end);
            out.push_str(path.rsplit("::").next().unwrap_or(path));

            let delim_end = tail.find(is_path).unwrap_or(tail.len());
            out.push_str(&tail[..delim_end]);
            rest = &tail[delim_end..];
        }
        out
    }

    /// Check whether this describes `T`
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Kind of a reflected member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Raw storage slot
    Field,

    /// Accessor pair, possibly with a validating setter
    Property,

    /// Callable member
    Method,

    /// Event or notification hook
    Event,
}

impl MemberKind {
    /// Fields and properties hold data; everything else is behaviour
    #[inline]
    #[must_use]
    pub fn holds_data(&self) -> bool {
        matches!(self, Self::Field | Self::Property)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Field => "field",
            Self::Property => "property",
            Self::Method => "method",
            Self::Event => "event",
        };
        f.write_str(s)
    }
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Reachable from outside the declaring type
    #[default]
    Public,

    /// Private, protected or crate-internal
    NonPublic,
}

/// Metadata for a single member of a reflected type
///
/// Descriptors are plain values: they are produced by [`Reflect::members`],
/// never mutated by the population routine, and dropped after the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    name: &'static str,
    kind: MemberKind,
    declared_type: TypeDescriptor,
    declaring_type: TypeDescriptor,
    visibility: Visibility,
    writable: bool,
    is_static: bool,
    is_indexer: bool,
}

impl MemberDescriptor {
    fn new(
        name: &'static str,
        kind: MemberKind,
        declared_type: TypeDescriptor,
        declaring_type: TypeDescriptor,
    ) -> Self {
        Self {
            name,
            kind,
            declared_type,
            declaring_type,
            visibility: Visibility::Public,
            writable: kind.holds_data(),
            is_static: false,
            is_indexer: false,
        }
    }

    /// Public writable instance field of type `T` declared on `D`
    #[inline]
    #[must_use]
    pub fn field<D: Any, T: Any>(name: &'static str) -> Self {
        Self::new(
            name,
            MemberKind::Field,
            TypeDescriptor::of::<T>(),
            TypeDescriptor::of::<D>(),
        )
    }

    /// Public writable instance property of type `T` declared on `D`
    #[inline]
    #[must_use]
    pub fn property<D: Any, T: Any>(name: &'static str) -> Self {
        Self::new(
            name,
            MemberKind::Property,
            TypeDescriptor::of::<T>(),
            TypeDescriptor::of::<D>(),
        )
    }

    /// Method returning `R` declared on `D`
    #[inline]
    #[must_use]
    pub fn method<D: Any, R: Any>(name: &'static str) -> Self {
        Self::new(
            name,
            MemberKind::Method,
            TypeDescriptor::of::<R>(),
            TypeDescriptor::of::<D>(),
        )
    }

    /// Event with handler type `H` declared on `D`
    #[inline]
    #[must_use]
    pub fn event<D: Any, H: Any>(name: &'static str) -> Self {
        Self::new(
            name,
            MemberKind::Event,
            TypeDescriptor::of::<H>(),
            TypeDescriptor::of::<D>(),
        )
    }

    /// Mark as not publicly visible
    #[inline]
    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Mark as having no setter (read-only field or get-only property)
    #[inline]
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Mark as a type-level member
    #[inline]
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as an indexed property
    #[inline]
    #[must_use]
    pub fn indexer(mut self) -> Self {
        self.is_indexer = true;
        self
    }

    /// Member name, compared case-sensitively
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Member kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Declared type of the member's value
    #[inline]
    #[must_use]
    pub fn declared_type(&self) -> TypeDescriptor {
        self.declared_type
    }

    /// Type that declares the member (differs from the runtime type for inherited members)
    #[inline]
    #[must_use]
    pub fn declaring_type(&self) -> TypeDescriptor {
        self.declaring_type
    }

    /// Visibility
    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether a value can be written
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Whether the member belongs to the type rather than an instance
    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Whether the member is an indexed property
    #[inline]
    #[must_use]
    pub fn is_indexer(&self) -> bool {
        self.is_indexer
    }

    /// Public, writable, instance-level, non-indexed field or property
    #[inline]
    #[must_use]
    pub fn is_populatable(&self) -> bool {
        self.kind.holds_data()
            && self.visibility == Visibility::Public
            && self.writable
            && !self.is_static
            && !self.is_indexer
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}::{}: {}",
            self.kind,
            self.declaring_type.short_name(),
            self.name,
            self.declared_type.short_name()
        )
    }
}

/// Structural introspection of a runtime type
///
/// Implement this for every type whose members should be populated.
///
/// # Contract
/// - `members()` lists every member of the runtime type, inherited ones
///   included, regardless of visibility or writability. Filtering is the
///   caller's job.
/// - `set_member()` writes `value` into the member described by `member`.
///   Implementations report a wrongly typed value with
///   [`AssignmentError::TypeMismatch`] and a validating setter refusing the
///   value with [`AssignmentError::Rejected`].
///
/// # Example
/// ```rust
/// use fixture_kernel::{downcast_value, AssignmentError, MemberDescriptor, Reflect, TypeDescriptor};
/// use std::any::Any;
///
/// #[derive(Debug, Default)]
/// struct Point {
///     x: i64,
/// }
///
/// impl Reflect for Point {
///     fn type_descriptor(&self) -> TypeDescriptor {
///         TypeDescriptor::of::<Self>()
///     }
///
///     fn members(&self) -> Vec<MemberDescriptor> {
///         vec![MemberDescriptor::field::<Self, i64>("x")]
///     }
///
///     fn set_member(
///         &mut self,
///         member: &MemberDescriptor,
///         value: Box<dyn Any>,
///     ) -> Result<(), AssignmentError> {
///         match member.name() {
///             "x" => self.x = downcast_value(member, value)?,
///             _ => return Err(AssignmentError::unknown_member(member)),
///         }
///         Ok(())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
///
/// let mut p = Point::default();
/// let x = p.members()[0];
/// p.set_member(&x, Box::new(7_i64)).unwrap();
/// assert_eq!(p.x, 7);
/// ```
pub trait Reflect: Any + fmt::Debug {
    /// Runtime type of this value
    fn type_descriptor(&self) -> TypeDescriptor;

    /// All members of the runtime type, inherited ones included
    fn members(&self) -> Vec<MemberDescriptor>;

    /// Write `value` into `member`
    ///
    /// # Errors
    /// Returns [`AssignmentError`] if the member is unknown, not writable,
    /// the value has the wrong type, or the setter rejects it.
    fn set_member(
        &mut self,
        member: &MemberDescriptor,
        value: Box<dyn Any>,
    ) -> Result<(), AssignmentError>;

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Unbox a generated value as the member's declared type
///
/// # Errors
/// Returns [`AssignmentError::TypeMismatch`] if `value` is not a `T`.
pub fn downcast_value<T: Any>(
    member: &MemberDescriptor,
    value: Box<dyn Any>,
) -> Result<T, AssignmentError> {
    value
        .downcast::<T>()
        .map(|v| *v)
        .map_err(|_| AssignmentError::TypeMismatch {
            member: member.name(),
            expected: member.declared_type().name(),
        })
}
