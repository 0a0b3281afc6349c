//! Fixture Kernel
//!
//! Reflection-driven member population for generated specimens.
//!
//! # Core Concepts
//!
//! - [`Reflect`]: Structural introspection of a runtime type
//! - [`MemberDescriptor`]: Name, kind, declared type and access flags of a member
//! - [`SpecimenContext`]: Produces anonymous values for [`SpecimenRequest`]s
//! - [`MemberSpecification`]: Predicate selecting which members to populate
//! - [`AutoPropertiesCommand`]: Fills public writable fields and properties
//! - [`SpecimenCommand`]: Post-construction step run by a specimen pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use fixture_kernel::{AnyMember, AutoPropertiesCommand};
//!
//! let command = AutoPropertiesCommand::new(AnyMember);
//! let report = command.populate(&mut widget, &context)?;
//! assert!(report.was_assigned("name"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod command;
mod error;
mod reflect;
mod request;
mod specification;

// Re-exports
pub use command::{AutoPropertiesCommand, PopulationReport, SpecimenCommand};
pub use error::{AssignmentError, CommandError};
pub use reflect::{
    downcast_value, MemberDescriptor, MemberKind, Reflect, TypeDescriptor, Visibility,
};
pub use request::{Resolution, SpecimenContext, SpecimenRequest};
pub use specification::{And, AnyMember, MemberSpecification, MemberSpecificationExt, Not, Or};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
