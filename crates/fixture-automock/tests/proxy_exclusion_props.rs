use fixture_automock::{AutoMockPropertiesCommand, Mock, PROXY_ARTIFACT_FIELDS};
use fixture_kernel::{MemberDescriptor, SpecimenCommand};
use fixture_test_utils::{DynamicRecord, SequentialContext};
use proptest::prelude::*;

const NAMES: [&str; 8] = [
    "__interceptors",
    "__target",
    "__Target",
    "_target",
    "interceptors",
    "total",
    "label",
    "weight",
];

#[derive(Debug, Clone, Copy)]
enum Shape {
    Field,
    Property,
    ReadOnlyField,
    NonPublicProperty,
    StaticField,
}

fn member_strategy() -> impl Strategy<Value = MemberDescriptor> {
    let shape = prop_oneof![
        Just(Shape::Field),
        Just(Shape::Property),
        Just(Shape::ReadOnlyField),
        Just(Shape::NonPublicProperty),
        Just(Shape::StaticField),
    ];
    (0..NAMES.len(), shape).prop_map(|(i, shape)| match shape {
        Shape::Field => DynamicRecord::field(NAMES[i]),
        Shape::Property => DynamicRecord::property(NAMES[i]),
        Shape::ReadOnlyField => DynamicRecord::field(NAMES[i]).read_only(),
        Shape::NonPublicProperty => DynamicRecord::property(NAMES[i]).non_public(),
        Shape::StaticField => DynamicRecord::field(NAMES[i]).static_member(),
    })
}

fn is_reserved_field(m: &MemberDescriptor) -> bool {
    m.kind() == fixture_kernel::MemberKind::Field && PROXY_ARTIFACT_FIELDS.contains(&m.name())
}

proptest! {
    #[test]
    fn prop_reserved_fields_never_written(
        members in proptest::collection::vec(member_strategy(), 0..12),
        proxied in any::<bool>(),
    ) {
        let record = DynamicRecord::new(members.clone());
        let mut mock = if proxied { Mock::wrapping(record) } else { Mock::new(record) };

        AutoMockPropertiesCommand::new()
            .execute(Some(&mut mock), Some(&SequentialContext::new()))
            .unwrap();

        let record = mock.target::<DynamicRecord>().unwrap();
        let populatable: Vec<_> = members.iter().filter(|m| m.is_populatable()).collect();
        let reserved = populatable.iter().filter(|m| is_reserved_field(m)).count();

        // At most N + (M - k) writes
        prop_assert!(record.writes().len() <= populatable.len() - reserved);

        // Reserved fields are skipped; same-named properties are not
        for m in &populatable {
            let written = record.writes().contains(&m.name());
            if !is_reserved_field(m) {
                prop_assert!(written, "{} should have been written", m);
            }
        }
        let reserved_only = PROXY_ARTIFACT_FIELDS
            .iter()
            .filter(|name| {
                !populatable
                    .iter()
                    .any(|m| m.name() == **name && !is_reserved_field(m))
            });
        for name in reserved_only {
            prop_assert!(!record.writes().contains(name));
        }
    }

    #[test]
    fn prop_non_mock_specimens_are_untouched(value in any::<i64>(), text in ".{0,24}") {
        let command = AutoMockPropertiesCommand::new();
        let ctx = SequentialContext::new();
        let mut n = value;
        let mut s = text.clone();

        command.execute(Some(&mut n), Some(&ctx)).unwrap();
        command.execute(Some(&mut s), Some(&ctx)).unwrap();

        prop_assert_eq!(n, value);
        prop_assert_eq!(s, text);
    }
}
