//! Reflected fixture types

use fixture_kernel::{downcast_value, AssignmentError, MemberDescriptor, Reflect, TypeDescriptor};
use std::any::Any;
use std::collections::BTreeMap;
use uuid::Uuid;

macro_rules! reflect_any {
    () => {
        fn type_descriptor(&self) -> TypeDescriptor {
            TypeDescriptor::of::<Self>()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    };
}

/// Plain domain type with one member of each shape
///
/// Populatable: property `name`, field `count`.
/// Not populatable: read-only `id`, non-public `revision`, static `instances`,
/// method `refresh`, event `changed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Widget {
    name: String,
    pub count: i64,
    id: u64,
    revision: u32,
}

impl Widget {
    /// Create widget with an id
    #[must_use]
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

impl Reflect for Widget {
    reflect_any!();

    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::property::<Self, String>("name"),
            MemberDescriptor::field::<Self, i64>("count"),
            MemberDescriptor::property::<Self, u64>("id").read_only(),
            MemberDescriptor::field::<Self, u32>("revision").non_public(),
            MemberDescriptor::field::<Self, u32>("instances").static_member(),
            MemberDescriptor::method::<Self, ()>("refresh"),
            MemberDescriptor::event::<Self, fn()>("changed"),
        ]
    }

    fn set_member(
        &mut self,
        member: &MemberDescriptor,
        value: Box<dyn Any>,
    ) -> Result<(), AssignmentError> {
        match member.name() {
            "name" => self.set_name(downcast_value::<String>(member, value)?),
            "count" => self.count = downcast_value(member, value)?,
            "revision" => self.revision = downcast_value(member, value)?,
            "id" => return Err(AssignmentError::not_writable(member)),
            _ => return Err(AssignmentError::unknown_member(member)),
        }
        Ok(())
    }
}

/// Value no context knows how to build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    pub path: String,
}

/// Type with a member of an unresolvable type
///
/// Populatable: property `label`, field `attachment`, property `serial`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gadget {
    pub label: String,
    pub attachment: Attachment,
    pub serial: Uuid,
}

impl Reflect for Gadget {
    reflect_any!();

    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::property::<Self, String>("label"),
            MemberDescriptor::field::<Self, Attachment>("attachment"),
            MemberDescriptor::property::<Self, Uuid>("serial"),
            MemberDescriptor::property::<Self, String>("item").indexer(),
        ]
    }

    fn set_member(
        &mut self,
        member: &MemberDescriptor,
        value: Box<dyn Any>,
    ) -> Result<(), AssignmentError> {
        match member.name() {
            "label" => self.label = downcast_value(member, value)?,
            "attachment" => self.attachment = downcast_value(member, value)?,
            "serial" => self.serial = downcast_value(member, value)?,
            _ => return Err(AssignmentError::unknown_member(member)),
        }
        Ok(())
    }
}

/// Type with a validating setter
///
/// `celsius` rejects values outside [`Thermostat::MIN`]..=[`Thermostat::MAX`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thermostat {
    pub zone: String,
    celsius: i64,
}

impl Thermostat {
    pub const MIN: i64 = -50;
    pub const MAX: i64 = 50;

    #[must_use]
    pub fn celsius(&self) -> i64 {
        self.celsius
    }

    /// Set the target temperature
    ///
    /// # Errors
    /// Returns the rejected value if it is out of range.
    pub fn set_celsius(&mut self, celsius: i64) -> Result<(), i64> {
        if !(Self::MIN..=Self::MAX).contains(&celsius) {
            return Err(celsius);
        }
        self.celsius = celsius;
        Ok(())
    }
}

impl Reflect for Thermostat {
    reflect_any!();

    fn members(&self) -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::field::<Self, String>("zone"),
            MemberDescriptor::property::<Self, i64>("celsius"),
        ]
    }

    fn set_member(
        &mut self,
        member: &MemberDescriptor,
        value: Box<dyn Any>,
    ) -> Result<(), AssignmentError> {
        match member.name() {
            "zone" => self.zone = downcast_value(member, value)?,
            "celsius" => self
                .set_celsius(downcast_value(member, value)?)
                .map_err(|v| AssignmentError::rejected(member, format!("{v} is out of range")))?,
            _ => return Err(AssignmentError::unknown_member(member)),
        }
        Ok(())
    }
}

/// Type whose members are chosen at run time, all of type `i64`
///
/// Records every write so tests can check exactly which members were touched.
#[derive(Debug, Clone, Default)]
pub struct DynamicRecord {
    members: Vec<MemberDescriptor>,
    values: BTreeMap<&'static str, i64>,
    writes: Vec<&'static str>,
}

impl DynamicRecord {
    #[must_use]
    pub fn new(members: Vec<MemberDescriptor>) -> Self {
        Self {
            members,
            values: BTreeMap::new(),
            writes: Vec::new(),
        }
    }

    /// Public writable `i64` field declared on the record
    #[must_use]
    pub fn field(name: &'static str) -> MemberDescriptor {
        MemberDescriptor::field::<Self, i64>(name)
    }

    /// Public writable `i64` property declared on the record
    #[must_use]
    pub fn property(name: &'static str) -> MemberDescriptor {
        MemberDescriptor::property::<Self, i64>(name)
    }

    /// Names written, in write order
    #[must_use]
    pub fn writes(&self) -> &[&'static str] {
        &self.writes
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }
}

impl Reflect for DynamicRecord {
    reflect_any!();

    fn members(&self) -> Vec<MemberDescriptor> {
        self.members.clone()
    }

    fn set_member(
        &mut self,
        member: &MemberDescriptor,
        value: Box<dyn Any>,
    ) -> Result<(), AssignmentError> {
        if !self.members.contains(member) {
            return Err(AssignmentError::unknown_member(member));
        }
        if !member.is_writable() {
            return Err(AssignmentError::not_writable(member));
        }
        self.values.insert(member.name(), downcast_value(member, value)?);
        self.writes.push(member.name());
        Ok(())
    }
}
