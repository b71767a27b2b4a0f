//! Tests for MarriageGrouper

use serde_json::json;

use kinseed::domain::{
    collect_relatives, group_into_marriages, DisplayConfig, Forest, Member, MemberId,
    MarriageGrouper, SeedError,
};
use kinseed::util::testing::ids::*;
use kinseed::util::testing::{init_test_setup, mock_members};

/// (anchor, [(spouse, children)]) per stub, in root order.
fn stubs(forest: &Forest) -> Vec<(MemberId, Vec<(Option<MemberId>, Vec<MemberId>)>)> {
    let arena = forest.arena();
    let id = |idx| arena.get(idx).map(|n| n.id).unwrap();
    forest
        .root_nodes()
        .map(|root| {
            let marriages = root
                .marriages
                .iter()
                .map(|m| (m.spouse.map(id), m.children.iter().map(|&c| id(c)).collect::<Vec<_>>()))
                .collect::<Vec<_>>();
            (root.id, marriages)
        })
        .collect()
}

#[test]
fn given_empty_members_when_grouping_then_no_rootable_ancestor() {
    init_test_setup();
    assert_eq!(
        group_into_marriages(&[], None).unwrap_err(),
        SeedError::NoRootableAncestor
    );
}

#[test]
fn given_only_parentless_members_when_grouping_then_no_rootable_ancestor() {
    let members = vec![Member::new(1, "a"), Member::new(2, "b")];

    assert_eq!(
        group_into_marriages(&members, None).unwrap_err(),
        SeedError::NoRootableAncestor
    );
}

#[test]
fn given_single_member_when_grouping_then_single_root_without_marriages() {
    let members = vec![Member::new(7, "alone").at_depth(1)];

    let forest = group_into_marriages(&members, None).unwrap();

    assert_eq!(stubs(&forest), vec![(7, vec![])]);
}

#[test]
fn given_eddard_relatives_when_grouping_then_one_stub_per_anchor() {
    init_test_setup();
    let relatives = collect_relatives(&mock_members(), EDDARD).unwrap();

    let forest = group_into_marriages(&relatives, None).unwrap();

    assert_eq!(
        stubs(&forest),
        vec![
            (
                RICKARD,
                vec![(Some(LYARRA), vec![BENJEN, BRANDON, LYANNA, EDDARD])]
            ),
            (
                EDDARD,
                vec![(Some(CATELYN), vec![ROBB, SANSA, ARYA, BRAN, RICKON])]
            ),
        ]
    );
}

#[test]
fn given_swapped_parent_slots_when_grouping_then_children_share_one_marriage() {
    let relatives = collect_relatives(&mock_members(), CHILD).unwrap();

    let forest = group_into_marriages(&relatives, None).unwrap();

    assert_eq!(
        stubs(&forest),
        vec![(
            PARENT1,
            vec![(Some(PARENT2), vec![SIBLING_SAME, SIBLING_REVERSE, CHILD])]
        )]
    );
}

#[test]
fn given_single_parent_child_when_grouping_then_marriage_has_no_spouse() {
    let relatives = collect_relatives(&mock_members(), ONLY_HAS_PARENT1).unwrap();

    let forest = group_into_marriages(&relatives, None).unwrap();

    assert_eq!(
        stubs(&forest),
        vec![(PARENT1, vec![(None, vec![ONLY_HAS_PARENT1])])]
    );
}

#[test]
fn given_single_parent_and_couple_children_when_grouping_then_kept_in_separate_marriages() {
    let members = vec![
        Member::new(1, "parent"),
        Member::new(2, "partner"),
        Member::new(3, "couple child").with_parents(Some(1), Some(2)),
        Member::new(4, "single child").with_parents(Some(1), None),
    ];

    let forest = group_into_marriages(&members, None).unwrap();

    assert_eq!(
        stubs(&forest),
        vec![(1, vec![(Some(2), vec![3]), (None, vec![4])])]
    );
}

#[test]
fn given_parent_without_record_when_grouping_then_member_not_found() {
    let members = vec![
        Member::new(1, "known"),
        Member::new(3, "child").with_parents(Some(1), Some(2)),
    ];

    assert_eq!(
        group_into_marriages(&members, None).unwrap_err(),
        SeedError::MemberNotFound(2)
    );
}

#[test]
fn given_display_hooks_when_grouping_then_every_node_is_annotated() {
    let relatives = collect_relatives(&mock_members(), CHILD).unwrap();
    let display = DisplayConfig::new()
        .with_class(|m| format!("gen-{}", m.depth_offset.unwrap_or(0)))
        .with_text_class(|_| "label".to_string())
        .with_extra(|m| json!({ "initial": m.name.chars().next() }));

    let forest = MarriageGrouper::new(&display).group(&relatives).unwrap();

    let root = forest.root_nodes().next().unwrap();
    assert_eq!(root.class, "gen-1");
    assert_eq!(root.text_class, "label");
    assert_eq!(root.extra, json!({ "initial": "P" }));
    let child = forest
        .arena()
        .get(root.marriages[0].children[0])
        .unwrap();
    assert_eq!(child.class, "gen-2");
}
