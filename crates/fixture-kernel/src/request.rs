//! Specimen requests and the context that resolves them

use crate::reflect::{MemberDescriptor, TypeDescriptor};
use std::any::Any;

/// Request for an anonymous value of a given type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecimenRequest {
    requested: TypeDescriptor,
    hint: Option<&'static str>,
}

impl SpecimenRequest {
    /// Request a value of the described type
    #[inline]
    #[must_use]
    pub fn new(requested: TypeDescriptor) -> Self {
        Self {
            requested,
            hint: None,
        }
    }

    /// Request a value of type `T`
    #[inline]
    #[must_use]
    pub fn of_type<T: Any>() -> Self {
        Self::new(TypeDescriptor::of::<T>())
    }

    /// Request a value for `member`, hinted with the member name
    #[inline]
    #[must_use]
    pub fn for_member(member: &MemberDescriptor) -> Self {
        Self::new(member.declared_type()).with_hint(member.name())
    }

    /// Attach a hint
    #[inline]
    #[must_use]
    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Requested type
    #[inline]
    #[must_use]
    pub fn requested(&self) -> TypeDescriptor {
        self.requested
    }

    /// Hint, usually the name of the member being populated
    #[inline]
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    /// Check whether the requested type is `T`
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.requested.is::<T>()
    }
}

/// Outcome of resolving a [`SpecimenRequest`]
#[derive(Debug)]
pub enum Resolution {
    /// A value was produced
    Specimen(Box<dyn Any>),

    /// The context cannot produce a value for this request
    NoSpecimen,

    /// The context deliberately declines to produce a value
    Omit,
}

impl Resolution {
    /// Wrap a produced value
    #[inline]
    #[must_use]
    pub fn specimen<T: Any>(value: T) -> Self {
        Self::Specimen(Box::new(value))
    }

    /// Check if a value was produced
    #[inline]
    #[must_use]
    pub fn is_specimen(&self) -> bool {
        matches!(self, Self::Specimen(_))
    }

    /// Take the produced value, if any
    #[inline]
    #[must_use]
    pub fn into_specimen(self) -> Option<Box<dyn Any>> {
        match self {
            Self::Specimen(value) => Some(value),
            Self::NoSpecimen | Self::Omit => None,
        }
    }
}

/// Capability that produces anonymous values on request
///
/// Implementations must be safe to call repeatedly for arbitrary types and
/// may return a different value on every call. Callers never cache results.
pub trait SpecimenContext {
    /// Resolve a request into a value, a miss, or an omission
    fn resolve(&self, request: &SpecimenRequest) -> Resolution;
}

impl<F> SpecimenContext for F
where
    F: Fn(&SpecimenRequest) -> Resolution,
{
    fn resolve(&self, request: &SpecimenRequest) -> Resolution {
        self(request)
    }
}
