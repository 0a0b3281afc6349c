//! Proxy object shape
//!
//! A mocking proxy behaves like a subclass of the mocked type generated at
//! run time: it inherits every member of the mocked type and adds two public
//! bookkeeping fields of its own, [`INTERCEPTORS_FIELD`] and [`TARGET_FIELD`].
//! [`Proxy<T>`] reproduces that member layout for any reflected `T`.

use fixture_kernel::{downcast_value, AssignmentError, MemberDescriptor, Reflect, TypeDescriptor};
use std::any::Any;
use uuid::Uuid;

/// Name of the synthetic field holding the proxy's interception state
pub const INTERCEPTORS_FIELD: &str = "__interceptors";

/// Name of the synthetic field holding the proxy's forwarding target
pub const TARGET_FIELD: &str = "__target";

/// Interceptors attached to a proxy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterceptorState {
    interceptors: Vec<String>,
    invocations: u64,
}

impl InterceptorState {
    /// Create state with the given interceptor names
    #[must_use]
    pub fn new<I, S>(interceptors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interceptors: interceptors.into_iter().map(Into::into).collect(),
            invocations: 0,
        }
    }

    /// Attached interceptor names, outermost first
    #[inline]
    #[must_use]
    pub fn interceptors(&self) -> &[String] {
        &self.interceptors
    }

    /// Number of intercepted calls so far
    #[inline]
    #[must_use]
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Record one intercepted call
    #[inline]
    pub fn record_invocation(&mut self) {
        self.invocations += 1;
    }
}

/// Identity of the object a proxy forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyTarget {
    id: Uuid,
}

impl ProxyTarget {
    /// Create a fresh target identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Target identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for ProxyTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Generated proxy around a mocked `T`
#[derive(Debug)]
pub struct Proxy<T> {
    interceptors: InterceptorState,
    target: ProxyTarget,
    inner: T,
}

impl<T: Reflect> Proxy<T> {
    /// Name of the interceptor every proxy starts with
    pub const DEFAULT_INTERCEPTOR: &'static str = "mock";

    /// Wrap `inner` with the default interceptor
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self::with_interceptors(inner, InterceptorState::new([Self::DEFAULT_INTERCEPTOR]))
    }

    /// Wrap `inner` with explicit interception state
    #[must_use]
    pub fn with_interceptors(inner: T, interceptors: InterceptorState) -> Self {
        Self {
            interceptors,
            target: ProxyTarget::new(),
            inner,
        }
    }

    /// Mocked object
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Mocked object, mutably
    #[inline]
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Interception state
    #[inline]
    #[must_use]
    pub fn interceptors(&self) -> &InterceptorState {
        &self.interceptors
    }

    /// Forwarding target
    #[inline]
    #[must_use]
    pub fn target(&self) -> ProxyTarget {
        self.target
    }

    fn own_members() -> [MemberDescriptor; 2] {
        [
            MemberDescriptor::field::<Self, InterceptorState>(INTERCEPTORS_FIELD),
            MemberDescriptor::field::<Self, ProxyTarget>(TARGET_FIELD),
        ]
    }
}

impl<T: Reflect> Reflect for Proxy<T> {
    fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
    }

    fn members(&self) -> Vec<MemberDescriptor> {
        let mut members = Self::own_members().to_vec();
        members.extend(self.inner.members());
        members
    }

    fn set_member(
        &mut self,
        member: &MemberDescriptor,
        value: Box<dyn Any>,
    ) -> Result<(), AssignmentError> {
        if !member.declaring_type().is::<Self>() {
            return self.inner.set_member(member, value);
        }

        match member.name() {
            INTERCEPTORS_FIELD => self.interceptors = downcast_value(member, value)?,
            TARGET_FIELD => self.target = downcast_value(member, value)?,
            _ => return Err(AssignmentError::unknown_member(member)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
