use std::collections::HashSet;

use proptest::prelude::*;
use teamdir_core::{Member, MemberId, Roster};

proptest! {
    #[test]
    fn derived_ids_are_url_safe(name in "\\PC{0,32}") {
        let id = MemberId::from_name(&name);
        prop_assert!(!id.is_empty());
        prop_assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn roster_ids_are_unique(names in prop::collection::vec("(Sam|Ann|Lee)( Lee)?", 0..32)) {
        let roster: Roster = names.into_iter().map(Member::new).collect();
        let ids: HashSet<&str> = roster.iter().map(|m| m.id.as_str()).collect();
        prop_assert_eq!(ids.len(), roster.len());
    }
}

#[test]
fn duplicate_names_keep_first_id_intact() {
    let roster = Roster::from_members(vec![Member::new("Favour"), Member::new("Favour")]);
    assert_eq!(roster.members()[0].id.as_str(), "favour");
    assert_eq!(roster.members()[1].id.as_str(), "favour-2");
    assert_eq!(roster.get(&MemberId::from("favour")).unwrap().name, "Favour");
}
