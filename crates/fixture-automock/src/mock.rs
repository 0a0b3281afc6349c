//! Mock stand-in
//!
//! A [`Mock`] wraps the proxied object a mocking framework hands out. It is
//! deliberately non-generic so a pipeline holding an arbitrary specimen can
//! recognise it with a single `downcast_mut::<Mock>()`.

use crate::proxy::Proxy;
use fixture_kernel::{Reflect, TypeDescriptor};

/// Stand-in wrapping a proxied object
#[derive(Debug)]
pub struct Mock {
    object: Box<dyn Reflect>,
}

impl Mock {
    /// Wrap an already proxied object
    #[inline]
    #[must_use]
    pub fn new<P: Reflect>(object: P) -> Self {
        Self {
            object: Box::new(object),
        }
    }

    /// Mock `target` behind a fresh [`Proxy`]
    #[inline]
    #[must_use]
    pub fn wrapping<T: Reflect>(target: T) -> Self {
        Self::new(Proxy::new(target))
    }

    /// Mock a default-constructed `T`
    #[inline]
    #[must_use]
    pub fn of<T: Reflect + Default>() -> Self {
        Self::wrapping(T::default())
    }

    /// Proxied object, mutably
    #[inline]
    pub fn object_mut(&mut self) -> &mut dyn Reflect {
        self.object.as_mut()
    }

    /// Runtime type of the proxied object
    #[inline]
    #[must_use]
    pub fn object_type(&self) -> TypeDescriptor {
        self.object.type_descriptor()
    }

    /// Proxy, if the object is a `Proxy<T>`
    #[inline]
    #[must_use]
    pub fn proxy<T: Reflect>(&self) -> Option<&Proxy<T>> {
        self.object.as_any().downcast_ref::<Proxy<T>>()
    }

    /// Mocked `T`, whether proxied or wrapped directly
    #[must_use]
    pub fn target<T: Reflect>(&self) -> Option<&T> {
        match self.proxy::<T>() {
            Some(proxy) => Some(proxy.inner()),
            None => self.object.as_any().downcast_ref::<T>(),
        }
    }

    /// Proxy, mutably, if the object is a `Proxy<T>`
    #[inline]
    pub fn proxy_mut<T: Reflect>(&mut self) -> Option<&mut Proxy<T>> {
        self.object.as_any_mut().downcast_mut::<Proxy<T>>()
    }

    /// Mocked `T`, mutably, whether proxied or wrapped directly
    ///
    /// Used to arrange state on the mocked object before population.
    pub fn target_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        if self.proxy::<T>().is_some() {
            return self.proxy_mut::<T>().map(Proxy::inner_mut);
        }
        self.object.as_any_mut().downcast_mut::<T>()
    }
}
