//! Auto-populating mock members

use crate::mock::Mock;
use crate::specification::IgnoreProxyMembersSpecification;
use fixture_kernel::{
    AutoPropertiesCommand, CommandError, PopulationReport, SpecimenCommand, SpecimenContext,
};
use std::any::Any;

/// Populates the public writable members of a mock's proxied object
///
/// Specimens that are not a [`Mock`] are ignored, so the command can run
/// unconditionally as one step of a specimen pipeline. The proxy's own
/// bookkeeping fields are never written; see [`IgnoreProxyMembersSpecification`].
///
/// # Example
/// ```rust,ignore
/// use fixture_automock::{AutoMockPropertiesCommand, Mock};
/// use fixture_kernel::SpecimenCommand;
///
/// let mut mock = Mock::of::<Widget>();
/// AutoMockPropertiesCommand::new().execute(Some(&mut mock), Some(&context))?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoMockPropertiesCommand {
    auto_properties: AutoPropertiesCommand<IgnoreProxyMembersSpecification>,
}

impl AutoMockPropertiesCommand {
    /// Create command
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            auto_properties: AutoPropertiesCommand::new(IgnoreProxyMembersSpecification),
        }
    }

    /// Populate the proxied object of `mock`
    ///
    /// # Errors
    /// Returns [`CommandError::Assignment`] if a member rejects its generated value.
    pub fn populate(
        &self,
        mock: &mut Mock,
        context: &dyn SpecimenContext,
    ) -> Result<PopulationReport, CommandError> {
        self.auto_properties.populate(mock.object_mut(), context)
    }
}

impl SpecimenCommand for AutoMockPropertiesCommand {
    fn execute(
        &self,
        specimen: Option<&mut dyn Any>,
        context: Option<&dyn SpecimenContext>,
    ) -> Result<(), CommandError> {
        let context = context.ok_or(CommandError::MissingContext)?;

        let Some(mock) = specimen.and_then(|s| s.downcast_mut::<Mock>()) else {
            tracing::trace!("Specimen is not a mock, skipping");
            return Ok(());
        };

        let report = self.populate(mock, context)?;
        tracing::debug!(
            "Populated mock of {} ({} members)",
            mock.object_type().short_name(),
            report.assigned_count()
        );
        Ok(())
    }
}
