//! Error types for specimen commands
//!
//! Only two things can go wrong while populating a specimen:
//! - the caller did not supply a context (a precondition fault)
//! - writing a generated value into a member failed

use crate::reflect::MemberDescriptor;

/// Failure of a specimen command
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// No specimen context was supplied
    #[error("a specimen context is required")]
    MissingContext,

    /// Writing a generated value failed
    #[error("assignment failed: {0}")]
    Assignment(#[from] AssignmentError),
}

impl CommandError {
    /// Check if the error is a violated precondition rather than a runtime fault
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingContext)
    }
}

/// Failure to write a value into a reflected member
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// Value does not have the member's declared type
    #[error("member '{member}' expects a value of type {expected}")]
    TypeMismatch {
        /// Member name
        member: &'static str,
        /// Declared type name
        expected: &'static str,
    },

    /// Runtime type has no such member
    #[error("type {type_name} has no member '{member}'")]
    UnknownMember {
        /// Member name
        member: &'static str,
        /// Declaring type name
        type_name: &'static str,
    },

    /// Member has no setter
    #[error("member '{member}' is not writable")]
    NotWritable {
        /// Member name
        member: &'static str,
    },

    /// Setter refused the value
    #[error("setter for '{member}' rejected the value: {reason}")]
    Rejected {
        /// Member name
        member: &'static str,
        /// Reason reported by the setter
        reason: String,
    },
}

impl AssignmentError {
    /// Create unknown member error
    #[inline]
    #[must_use]
    pub fn unknown_member(member: &MemberDescriptor) -> Self {
        Self::UnknownMember {
            member: member.name(),
            type_name: member.declaring_type().name(),
        }
    }

    /// Create not writable error
    #[inline]
    #[must_use]
    pub fn not_writable(member: &MemberDescriptor) -> Self {
        Self::NotWritable {
            member: member.name(),
        }
    }

    /// Create rejected value error
    #[inline]
    #[must_use]
    pub fn rejected(member: &MemberDescriptor, reason: impl Into<String>) -> Self {
        Self::Rejected {
            member: member.name(),
            reason: reason.into(),
        }
    }

    /// Name of the member the assignment targeted
    #[must_use]
    pub fn member(&self) -> &'static str {
        match self {
            Self::TypeMismatch { member, .. }
            | Self::UnknownMember { member, .. }
            | Self::NotWritable { member }
            | Self::Rejected { member, .. } => member,
        }
    }
}
