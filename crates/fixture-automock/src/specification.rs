//! Proxy member exclusion

use crate::proxy::{INTERCEPTORS_FIELD, TARGET_FIELD};
use fixture_kernel::{MemberDescriptor, MemberKind, MemberSpecification};

/// Field names a proxy generator injects into every generated proxy type
///
/// These are the internal names used by Castle DynamicProxy. Matching is
/// exact and case-sensitive. A proxy library with different internals needs
/// this list re-derived from its generated types.
pub const PROXY_ARTIFACT_FIELDS: [&str; 2] = [INTERCEPTORS_FIELD, TARGET_FIELD];

/// Accepts fields and properties, except fields injected by the proxy generator
///
/// - Field: accepted unless its name is in [`PROXY_ARTIFACT_FIELDS`]
/// - Property: always accepted; proxies keep their bookkeeping in raw fields
/// - Method, event: never accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreProxyMembersSpecification;

impl IgnoreProxyMembersSpecification {
    /// Check whether `member` is proxy bookkeeping rather than domain state
    #[inline]
    #[must_use]
    pub fn is_proxy_member(member: &MemberDescriptor) -> bool {
        member.kind() == MemberKind::Field && PROXY_ARTIFACT_FIELDS.contains(&member.name())
    }
}

impl MemberSpecification for IgnoreProxyMembersSpecification {
    fn is_satisfied_by(&self, member: &MemberDescriptor) -> bool {
        match member.kind() {
            MemberKind::Field => !Self::is_proxy_member(member),
            MemberKind::Property => true,
            MemberKind::Method | MemberKind::Event => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct Sample;

    #[test]
    fn rejects_reserved_fields() {
        let spec = IgnoreProxyMembersSpecification;

        assert!(!spec.is_satisfied_by(&MemberDescriptor::field::<Sample, u8>("__interceptors")));
        assert!(!spec.is_satisfied_by(&MemberDescriptor::field::<Sample, u8>("__target")));
    }

    #[test]
    fn accepts_ordinary_fields() {
        let spec = IgnoreProxyMembersSpecification;
        assert!(spec.is_satisfied_by(&MemberDescriptor::field::<Sample, i64>("count")));
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let spec = IgnoreProxyMembersSpecification;

        for name in [
            "__Target",
            "__INTERCEPTORS",
            "_target",
            "__target_",
            "target",
            "__interceptor",
        ] {
            assert!(
                spec.is_satisfied_by(&MemberDescriptor::field::<Sample, u8>(name)),
                "{name} should be accepted"
            );
        }
    }

    #[test]
    fn properties_with_reserved_names_are_accepted() {
        let spec = IgnoreProxyMembersSpecification;

        assert!(spec.is_satisfied_by(&MemberDescriptor::property::<Sample, u8>("__target")));
        assert!(spec.is_satisfied_by(&MemberDescriptor::property::<Sample, u8>("__interceptors")));
    }

    #[test]
    fn methods_and_events_are_rejected() {
        let spec = IgnoreProxyMembersSpecification;

        assert!(!spec.is_satisfied_by(&MemberDescriptor::method::<Sample, ()>("refresh")));
        assert!(!spec.is_satisfied_by(&MemberDescriptor::event::<Sample, fn()>("changed")));
    }

    #[test]
    fn access_flags_do_not_matter() {
        let spec = IgnoreProxyMembersSpecification;
        let field = MemberDescriptor::field::<Sample, u8>("level");

        assert!(spec.is_satisfied_by(&field.non_public()));
        assert!(spec.is_satisfied_by(&field.read_only().static_member()));
        assert!(!spec.is_satisfied_by(
            &MemberDescriptor::field::<Sample, u8>("__target").non_public()
        ));
    }

    proptest! {
        #[test]
        fn prop_fields_rejected_only_for_reserved_names(
            name in prop_oneof![
                Just("__interceptors".to_string()),
                Just("__target".to_string()),
                "[_a-zA-Z]{0,16}",
            ]
        ) {
            let leaked: &'static str = Box::leak(name.into_boxed_str());
            let field = MemberDescriptor::field::<Sample, u8>(leaked);
            let property = MemberDescriptor::property::<Sample, u8>(leaked);
            let spec = IgnoreProxyMembersSpecification;

            let reserved = leaked == "__interceptors" || leaked == "__target";
            prop_assert_eq!(spec.is_satisfied_by(&field), !reserved);
            prop_assert!(spec.is_satisfied_by(&property));
        }
    }
}
