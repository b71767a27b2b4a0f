//! Seeding service
//!
//! Runs relative collection, marriage grouping and coalescing in sequence
//! and returns the single tree rooted at the target's topmost ancestor.

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{
    DisplayConfig, FamilyTree, MarriageGrouper, Member, MemberId, RelativeCollector, SeedResult,
    TreeCoalescer,
};

/// Service for seeding a family tree around one target.
///
/// Holds no per-call state; one service can seed any number of targets
/// against any number of datasets.
#[derive(Debug, Clone, Default)]
pub struct SeedService {
    settings: Settings,
    display: DisplayConfig,
}

impl SeedService {
    /// Create a seed service from validated settings.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            display: DisplayConfig::default(),
        })
    }

    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Seed the tree of `target_id` from `data`.
    ///
    /// The first failing stage aborts the pipeline; no partial tree is returned.
    #[instrument(level = "debug", skip(self, data), fields(records = data.len()))]
    pub fn seed(&self, data: &[Member], target_id: MemberId) -> ApplicationResult<FamilyTree> {
        Ok(self.run(data, target_id)?)
    }

    fn run(&self, data: &[Member], target_id: MemberId) -> SeedResult<FamilyTree> {
        let relatives = RelativeCollector::new(data)
            .with_depth_offset_start(self.settings.depth_offset_start)
            .collect(target_id)?;
        let forest = MarriageGrouper::new(&self.display).group(&relatives)?;
        let tree = TreeCoalescer::new()
            .with_max_rounds(self.settings.coalesce.max_rounds)
            .coalesce(forest)?;
        debug!(
            "seeded {}: root {}, {} nodes",
            target_id,
            tree.root_node().id,
            tree.node_count()
        );
        Ok(tree)
    }
}

/// Seed the tree of `target_id` with default settings and optional display hooks.
pub fn seed(
    data: &[Member],
    target_id: MemberId,
    display: Option<&DisplayConfig>,
) -> SeedResult<FamilyTree> {
    let service = SeedService {
        settings: Settings::default(),
        display: display.cloned().unwrap_or_default(),
    };
    service.run(data, target_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::SeedError;

    #[test]
    fn given_zero_round_cap_when_creating_service_then_config_error() {
        let mut settings = Settings::default();
        settings.coalesce.max_rounds = 0;

        assert!(matches!(
            SeedService::new(settings),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_missing_target_when_seeding_then_domain_error_is_wrapped() {
        let service = SeedService::new(Settings::default()).unwrap();
        let data = vec![Member::new(1, "alone")];

        let err = service.seed(&data, 42).unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(SeedError::MemberNotFound(42))
        ));
    }
}
