//! Fixture AutoMock
//!
//! Populates mocks handed out by a proxy-based mocking framework.
//!
//! # Core Concepts
//!
//! - [`Mock`]: Stand-in wrapping a proxied object
//! - [`Proxy<T>`]: Proxy layout, `T`'s members plus injected bookkeeping fields
//! - [`IgnoreProxyMembersSpecification`]: Rejects the injected fields
//! - [`AutoMockPropertiesCommand`]: Fills a mock's public writable members
//!
//! # Example
//!
//! ```rust,ignore
//! use fixture_automock::{AutoMockPropertiesCommand, Mock};
//! use fixture_kernel::SpecimenCommand;
//!
//! let mut mock = Mock::of::<Widget>();
//! AutoMockPropertiesCommand::new().execute(Some(&mut mock), Some(&context))?;
//!
//! let widget = mock.target::<Widget>().unwrap();
//! assert!(!widget.name().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod command;
mod mock;
mod proxy;
mod specification;

// Re-exports
pub use command::AutoMockPropertiesCommand;
pub use mock::Mock;
pub use proxy::{InterceptorState, Proxy, ProxyTarget, INTERCEPTORS_FIELD, TARGET_FIELD};
pub use specification::{IgnoreProxyMembersSpecification, PROXY_ARTIFACT_FIELDS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
