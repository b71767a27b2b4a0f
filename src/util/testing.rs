//! Test setup and mock datasets shared by unit and integration tests

use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Member, MemberId};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

fn member(id: MemberId, name: &str, parent1: Option<MemberId>, parent2: Option<MemberId>) -> Member {
    Member::new(id, name).with_parents(parent1, parent2)
}

pub mod ids {
    use crate::domain::MemberId;

    pub const RICKARD: MemberId = 0;
    pub const LYARRA: MemberId = 1;
    pub const EDDARD: MemberId = 2;
    pub const BENJEN: MemberId = 3;
    pub const BRANDON: MemberId = 4;
    pub const LYANNA: MemberId = 5;
    pub const PARENT1: MemberId = 6;
    pub const PARENT2: MemberId = 7;
    pub const ONLY_HAS_PARENT1: MemberId = 8;
    pub const ONLY_HAS_PARENT2: MemberId = 9;
    pub const CHILD: MemberId = 10;
    pub const SIBLING_SAME: MemberId = 11;
    pub const SIBLING_REVERSE: MemberId = 12;
    pub const HOSTER: MemberId = 13;
    pub const MINISA: MemberId = 14;
    pub const CATELYN: MemberId = 15;
    pub const ROBB: MemberId = 16;
    pub const SANSA: MemberId = 17;
    pub const ARYA: MemberId = 18;
    pub const BRAN: MemberId = 19;
    pub const RICKON: MemberId = 20;
    pub const PARENT1_NOT_IN_DATA: MemberId = 21;
    pub const PARENT2_NOT_IN_DATA: MemberId = 22;
    pub const GEN1_PARENT1: MemberId = 23;
    pub const GEN1_PARENT2: MemberId = 24;
    pub const GEN2_PARENT1: MemberId = 25;
    pub const GEN1_CHILD_GEN2_PARENT2: MemberId = 26;
    pub const GEN3_PARENT1: MemberId = 27;
    pub const GEN2_CHILD_GEN3_PARENT2: MemberId = 28;
    pub const GEN3_CHILD_GEN4_PARENT1: MemberId = 29;
    pub const GEN4_PARENT2: MemberId = 30;
    pub const GEN4_CHILD_GEN5_PARENT1: MemberId = 31;
    pub const GEN5_PARENT2: MemberId = 32;
    pub const GEN5_CHILD: MemberId = 33;
    /// Referenced as a parent but absent from every dataset
    pub const MISSING: MemberId = 999;
}

/// Mixed dataset: the Stark family, single-parent and swapped-slot
/// siblings, missing parents and a five-generation chain.
pub fn mock_members() -> Vec<Member> {
    use ids::*;
    vec![
        member(RICKARD, "Rickard Stark", None, None),
        member(LYARRA, "Lyarra Stark", None, None),
        member(EDDARD, "Eddard Stark", Some(LYARRA), Some(RICKARD)),
        member(BENJEN, "Benjen Stark", Some(RICKARD), Some(LYARRA)),
        member(BRANDON, "Brandon Stark", Some(RICKARD), Some(LYARRA)),
        member(LYANNA, "Lyanna Stark", Some(RICKARD), Some(LYARRA)),
        member(PARENT1, "Parent1", None, None),
        member(PARENT2, "Parent2", None, None),
        member(ONLY_HAS_PARENT1, "OnlyHasParent1", Some(PARENT1), None),
        member(ONLY_HAS_PARENT2, "OnlyHasParent2", None, Some(PARENT2)),
        member(CHILD, "Child", Some(PARENT1), Some(PARENT2)),
        member(SIBLING_SAME, "SiblingSame", Some(PARENT1), Some(PARENT2)),
        member(SIBLING_REVERSE, "SiblingReverse", Some(PARENT2), Some(PARENT1)),
        member(HOSTER, "Hoster Tully", None, None),
        member(MINISA, "Minisa Whent", None, None),
        member(CATELYN, "Catelyn Stark", None, None),
        member(ROBB, "Robb Stark", Some(CATELYN), Some(EDDARD)),
        member(SANSA, "Sansa Stark", Some(CATELYN), Some(EDDARD)),
        member(ARYA, "Arya Stark", Some(CATELYN), Some(EDDARD)),
        member(BRAN, "Bran Stark", Some(CATELYN), Some(EDDARD)),
        member(RICKON, "Rickon Stark", Some(CATELYN), Some(EDDARD)),
        member(PARENT1_NOT_IN_DATA, "Parent1IsNotInData", Some(MISSING), Some(PARENT2)),
        member(PARENT2_NOT_IN_DATA, "Parent2IsNotInData", Some(PARENT1), Some(MISSING)),
        member(GEN1_PARENT1, "Gen1Parent1", None, None),
        member(GEN1_PARENT2, "Gen1Parent2", None, None),
        member(GEN2_PARENT1, "Gen2Parent1", None, None),
        member(GEN1_CHILD_GEN2_PARENT2, "Gen1ChildGen2Parent2", Some(GEN1_PARENT1), Some(GEN1_PARENT2)),
        member(GEN3_PARENT1, "Gen3Parent1", None, None),
        member(GEN2_CHILD_GEN3_PARENT2, "Gen2ChildGen3Parent2", Some(GEN2_PARENT1), Some(GEN1_CHILD_GEN2_PARENT2)),
        member(GEN3_CHILD_GEN4_PARENT1, "Gen3ChildGen4Parent1", Some(GEN3_PARENT1), Some(GEN2_CHILD_GEN3_PARENT2)),
        member(GEN4_PARENT2, "Gen4Parent2", None, None),
        member(GEN4_CHILD_GEN5_PARENT1, "Gen4ChildGen5Parent1", Some(GEN3_CHILD_GEN4_PARENT1), Some(GEN4_PARENT2)),
        member(GEN5_PARENT2, "Gen5Parent2", None, None),
        member(GEN5_CHILD, "Gen5Child", Some(GEN4_CHILD_GEN5_PARENT1), Some(GEN5_PARENT2)),
    ]
}

/// Two parents and one child (ids 1, 2, 3).
pub fn nuclear_family() -> Vec<Member> {
    vec![
        member(1, "P1", None, None),
        member(2, "P2", None, None),
        member(3, "Child", Some(1), Some(2)),
    ]
}

/// Grandparents 1 and 2, their child 3 married to 4, and grandchild 5.
pub fn three_generations() -> Vec<Member> {
    vec![
        member(1, "G1", None, None),
        member(2, "G2", None, None),
        member(3, "Bridge", Some(1), Some(2)),
        member(4, "Other", None, None),
        member(5, "Target", Some(3), Some(4)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn given_mock_members_when_listing_ids_then_ids_are_unique() {
        let members = mock_members();
        let unique: HashSet<MemberId> = members.iter().map(|m| m.id).collect();
        assert_eq!(unique.len(), members.len());
    }
}
