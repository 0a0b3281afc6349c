//! Specimen commands
//!
//! A [`SpecimenCommand`] is one post-construction step applied to a specimen.
//! [`AutoPropertiesCommand`] is the generic step that fills every public
//! writable field and property of a reflected target with values produced by
//! a [`SpecimenContext`].

use crate::error::CommandError;
use crate::reflect::{MemberDescriptor, Reflect};
use crate::request::{Resolution, SpecimenContext, SpecimenRequest};
use crate::specification::{AnyMember, MemberSpecification};
use std::any::Any;

/// Post-construction step applied to a specimen
///
/// Pipelines run commands unconditionally over heterogeneous specimens, so a
/// command that does not recognise the specimen must return `Ok(())` without
/// touching it. `None` stands for an absent specimen or context.
pub trait SpecimenCommand {
    /// Apply the command
    ///
    /// # Errors
    /// Returns [`CommandError::MissingContext`] if `context` is `None`, and
    /// whatever fault the command's own work propagates.
    fn execute(
        &self,
        specimen: Option<&mut dyn Any>,
        context: Option<&dyn SpecimenContext>,
    ) -> Result<(), CommandError>;
}

/// Outcome of one population pass, in member declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationReport {
    /// Members that received a value
    pub assigned: Vec<&'static str>,

    /// Members the context had no value for
    pub unresolved: Vec<&'static str>,

    /// Members the context chose to omit
    pub omitted: Vec<&'static str>,

    /// Populatable members rejected by the specification
    pub excluded: Vec<&'static str>,
}

impl PopulationReport {
    /// Number of members written
    #[inline]
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Check whether `name` was written
    #[inline]
    #[must_use]
    pub fn was_assigned(&self, name: &str) -> bool {
        self.assigned.iter().any(|m| *m == name)
    }

    /// Number of eligible members considered
    #[inline]
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.assigned.len() + self.unresolved.len() + self.omitted.len()
    }
}

/// Populates public writable fields and properties with anonymous values
///
/// # Algorithm
/// 1. Enumerate the target's members (inherited included)
/// 2. Keep public, writable, instance-level, non-indexed fields and properties
/// 3. Keep members the specification accepts
/// 4. Resolve each member's declared type, hinted with the member name
/// 5. Assign produced values; skip misses and omissions
///
/// A miss for one member never stops the others. An assignment fault stops
/// the pass and is returned as is; members written before it keep their
/// new values.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPropertiesCommand<S = AnyMember> {
    specification: S,
}

impl<S: MemberSpecification> AutoPropertiesCommand<S> {
    /// Create command filtering members through `specification`
    #[inline]
    #[must_use]
    pub fn new(specification: S) -> Self {
        Self { specification }
    }

    /// Members of `target` this command would try to populate
    #[must_use]
    pub fn eligible_members(&self, target: &dyn Reflect) -> Vec<MemberDescriptor> {
        target
            .members()
            .into_iter()
            .filter(MemberDescriptor::is_populatable)
            .filter(|m| self.specification.is_satisfied_by(m))
            .collect()
    }

    /// Populate `target` using `context`
    ///
    /// # Errors
    /// Returns [`CommandError::Assignment`] if writing a produced value fails.
    pub fn populate(
        &self,
        target: &mut dyn Reflect,
        context: &dyn SpecimenContext,
    ) -> Result<PopulationReport, CommandError> {
        let type_name = target.type_descriptor().short_name();
        let mut report = PopulationReport::default();

        for member in target
            .members()
            .into_iter()
            .filter(MemberDescriptor::is_populatable)
        {
            if !self.specification.is_satisfied_by(&member) {
                tracing::trace!("Excluded {}", member);
                report.excluded.push(member.name());
                continue;
            }

            match context.resolve(&SpecimenRequest::for_member(&member)) {
                Resolution::Specimen(value) => {
                    if let Err(e) = target.set_member(&member, value) {
                        tracing::warn!("Failed to assign {}: {}", member, e);
                        return Err(e.into());
                    }
                    report.assigned.push(member.name());
                }
                Resolution::NoSpecimen => {
                    tracing::trace!("No specimen for {}", member);
                    report.unresolved.push(member.name());
                }
                Resolution::Omit => {
                    tracing::trace!("Omitted {}", member);
                    report.omitted.push(member.name());
                }
            }
        }

        tracing::debug!(
            "Populated {}: {} assigned, {} unresolved, {} omitted, {} excluded",
            type_name,
            report.assigned.len(),
            report.unresolved.len(),
            report.omitted.len(),
            report.excluded.len()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssignmentError;
    use crate::reflect::{downcast_value, TypeDescriptor};
    use crate::specification::MemberSpecificationExt;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Debug, Default)]
    struct Account {
        owner: String,
        balance: i64,
        limit: i64,
        id: u64,
        secret: u8,
    }

    impl Account {
        const MAX_LIMIT: i64 = 1_000;
    }

    impl Reflect for Account {
        fn type_descriptor(&self) -> TypeDescriptor {
            TypeDescriptor::of::<Self>()
        }

        fn members(&self) -> Vec<MemberDescriptor> {
            vec![
                MemberDescriptor::property::<Self, String>("owner"),
                MemberDescriptor::field::<Self, i64>("balance"),
                MemberDescriptor::property::<Self, i64>("limit"),
                MemberDescriptor::property::<Self, u64>("id").read_only(),
                MemberDescriptor::field::<Self, u8>("secret").non_public(),
                MemberDescriptor::field::<Self, u32>("instances").static_member(),
                MemberDescriptor::method::<Self, ()>("close"),
            ]
        }

        fn set_member(
            &mut self,
            member: &MemberDescriptor,
            value: Box<dyn Any>,
        ) -> Result<(), AssignmentError> {
            match member.name() {
                "owner" => self.owner = downcast_value(member, value)?,
                "balance" => self.balance = downcast_value(member, value)?,
                "limit" => {
                    let limit: i64 = downcast_value(member, value)?;
                    if limit > Self::MAX_LIMIT {
                        return Err(AssignmentError::rejected(member, "limit too high"));
                    }
                    self.limit = limit;
                }
                "id" => return Err(AssignmentError::not_writable(member)),
                "secret" => self.secret = downcast_value(member, value)?,
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

    fn context(req: &SpecimenRequest) -> Resolution {
        if req.is::<String>() {
            Resolution::specimen(format!("{}-value", req.hint().unwrap_or("anon")))
        } else if req.is::<i64>() {
            Resolution::specimen(7_i64)
        } else if req.is::<u8>() {
            Resolution::specimen(9_u8)
        } else {
            Resolution::NoSpecimen
        }
    }

    #[test]
    fn populates_public_writable_members() {
        let mut account = Account::default();
        let report = AutoPropertiesCommand::new(AnyMember)
            .populate(&mut account, &context)
            .unwrap();

        assert_eq!(report.assigned, vec!["owner", "balance", "limit"]);
        assert_eq!(account.owner, "owner-value");
        assert_eq!(account.balance, 7);
        assert_eq!(account.limit, 7);
        assert_eq!(account.id, 0);
        assert_eq!(account.secret, 0);
    }

    #[test]
    fn eligible_members_apply_specification() {
        let account = Account::default();
        let command = AutoPropertiesCommand::new(|m: &MemberDescriptor| m.name() != "balance");

        let names: Vec<_> = command
            .eligible_members(&account)
            .iter()
            .map(MemberDescriptor::name)
            .collect();
        assert_eq!(names, vec!["owner", "limit"]);
    }

    #[test]
    fn excluded_members_are_left_alone() {
        let mut account = Account::default();
        let spec = (|m: &MemberDescriptor| m.name() == "balance").not();
        let report = AutoPropertiesCommand::new(spec)
            .populate(&mut account, &context)
            .unwrap();

        assert_eq!(report.excluded, vec!["balance"]);
        assert_eq!(account.balance, 0);
        assert_eq!(account.owner, "owner-value");
    }

    #[test]
    fn misses_do_not_stop_population() {
        let only_i64 = |req: &SpecimenRequest| {
            if req.is::<i64>() {
                Resolution::specimen(3_i64)
            } else {
                Resolution::NoSpecimen
            }
        };
        let mut account = Account::default();
        let report = AutoPropertiesCommand::new(AnyMember)
            .populate(&mut account, &only_i64)
            .unwrap();

        assert_eq!(report.unresolved, vec!["owner"]);
        assert_eq!(report.assigned, vec!["balance", "limit"]);
        assert_eq!(account.owner, "");
        assert_eq!(account.balance, 3);
    }

    #[test]
    fn omitted_members_keep_prior_values() {
        let omit_strings = |req: &SpecimenRequest| {
            if req.is::<String>() {
                Resolution::Omit
            } else {
                context(req)
            }
        };
        let mut account = Account {
            owner: "original".to_string(),
            ..Account::default()
        };
        let report = AutoPropertiesCommand::new(AnyMember)
            .populate(&mut account, &omit_strings)
            .unwrap();

        assert_eq!(report.omitted, vec!["owner"]);
        assert_eq!(report.eligible_count(), 3);
        assert_eq!(account.owner, "original");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn every_skipped_member_is_traced() {
        let only_i64 = |req: &SpecimenRequest| {
            if req.is::<String>() {
                Resolution::Omit
            } else if req.is::<i64>() {
                Resolution::specimen(3_i64)
            } else {
                Resolution::NoSpecimen
            }
        };
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let spec = (|m: &MemberDescriptor| m.name() == "limit").not();
        let mut account = Account::default();

        tracing::subscriber::with_default(subscriber, || {
            AutoPropertiesCommand::new(spec)
                .populate(&mut account, &only_i64)
                .unwrap();
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Omitted property Account::owner: String"));
        assert!(output.contains("Excluded property Account::limit: i64"));
        assert!(output.contains("1 assigned, 0 unresolved, 1 omitted, 1 excluded"));
    }

    #[test]
    fn rejected_assignment_propagates() {
        let huge = |req: &SpecimenRequest| {
            if req.is::<i64>() {
                Resolution::specimen(Account::MAX_LIMIT + 1)
            } else {
                context(req)
            }
        };
        let mut account = Account::default();
        let err = AutoPropertiesCommand::new(AnyMember)
            .populate(&mut account, &huge)
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Assignment(AssignmentError::Rejected { member: "limit", .. })
        ));
        // Members before the failing one were already written
        assert_eq!(account.balance, Account::MAX_LIMIT + 1);
    }

    #[test]
    fn wrongly_typed_value_propagates() {
        let wrong = |_: &SpecimenRequest| Resolution::specimen(1.5_f64);
        let mut account = Account::default();
        let err = AutoPropertiesCommand::new(AnyMember)
            .populate(&mut account, &wrong)
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Assignment(AssignmentError::TypeMismatch { member: "owner", .. })
        ));
    }

    #[test]
    fn report_helpers() {
        let report = PopulationReport {
            assigned: vec!["a", "b"],
            unresolved: vec!["c"],
            omitted: vec![],
            excluded: vec!["d"],
        };

        assert_eq!(report.assigned_count(), 2);
        assert!(report.was_assigned("a"));
        assert!(!report.was_assigned("d"));
        assert_eq!(report.eligible_count(), 3);
    }
}
