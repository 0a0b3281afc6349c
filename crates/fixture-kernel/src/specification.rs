//! Member specifications
//!
//! A [`MemberSpecification`] is a pure predicate over [`MemberDescriptor`]s.
//! [`AutoPropertiesCommand`](crate::AutoPropertiesCommand) only writes members
//! its specification accepts. Specifications compose with [`And`], [`Or`] and
//! [`Not`]; any `Fn(&MemberDescriptor) -> bool` is one too.

use crate::reflect::MemberDescriptor;

/// Predicate deciding whether a member may be populated
///
/// # Contract
/// Implementations must be total and side-effect free: they terminate for
/// every descriptor and never panic.
pub trait MemberSpecification {
    /// Check whether `member` satisfies this specification
    fn is_satisfied_by(&self, member: &MemberDescriptor) -> bool;
}

impl<F> MemberSpecification for F
where
    F: Fn(&MemberDescriptor) -> bool,
{
    fn is_satisfied_by(&self, member: &MemberDescriptor) -> bool {
        self(member)
    }
}

/// Accepts every member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyMember;

impl MemberSpecification for AnyMember {
    fn is_satisfied_by(&self, _member: &MemberDescriptor) -> bool {
        true
    }
}

/// Inverts a specification
#[derive(Debug, Clone, Copy, Default)]
pub struct Not<S>(pub S);

impl<S: MemberSpecification> MemberSpecification for Not<S> {
    fn is_satisfied_by(&self, member: &MemberDescriptor) -> bool {
        !self.0.is_satisfied_by(member)
    }
}

/// Accepts members both specifications accept
#[derive(Debug, Clone, Copy, Default)]
pub struct And<A, B>(pub A, pub B);

impl<A: MemberSpecification, B: MemberSpecification> MemberSpecification for And<A, B> {
    fn is_satisfied_by(&self, member: &MemberDescriptor) -> bool {
        self.0.is_satisfied_by(member) && self.1.is_satisfied_by(member)
    }
}

/// Accepts members either specification accepts
#[derive(Debug, Clone, Copy, Default)]
pub struct Or<A, B>(pub A, pub B);

impl<A: MemberSpecification, B: MemberSpecification> MemberSpecification for Or<A, B> {
    fn is_satisfied_by(&self, member: &MemberDescriptor) -> bool {
        self.0.is_satisfied_by(member) || self.1.is_satisfied_by(member)
    }
}

/// Builder methods for composing specifications
pub trait MemberSpecificationExt: MemberSpecification + Sized {
    /// Require both `self` and `other`
    #[inline]
    #[must_use]
    fn and<O: MemberSpecification>(self, other: O) -> And<Self, O> {
        And(self, other)
    }

    /// Require either `self` or `other`
    #[inline]
    #[must_use]
    fn or<O: MemberSpecification>(self, other: O) -> Or<Self, O> {
        Or(self, other)
    }

    /// Invert `self`
    #[inline]
    #[must_use]
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<S: MemberSpecification> MemberSpecificationExt for S {}
