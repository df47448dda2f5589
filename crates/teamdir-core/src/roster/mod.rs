//! The normalised member roster.
//!
//! A `Roster` is built once at startup and never mutated afterwards. Building
//! one guarantees that every member id is unique: a colliding id gets the
//! first free `-N` suffix (starting at `-2`).

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LoadError, LoadResult};
use crate::member::{Member, MemberId, RawMember};

const EMBEDDED_ROSTER: &str = include_str!("../../data/members.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn from_members(members: Vec<Member>) -> Self {
        Self {
            members: disambiguate_ids(members),
        }
    }

    /// Parse a roster document: a JSON array of member objects.
    pub fn from_json_str(document: &str) -> LoadResult<Self> {
        let value: Value = serde_json::from_str(document)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> LoadResult<Self> {
        let Value::Array(records) = value else {
            return Err(LoadError::NotAnArray);
        };

        let mut members = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if !record.is_object() {
                return Err(LoadError::InvalidRecord { index });
            }
            let raw: RawMember = serde_json::from_value(record)?;
            members.push(Member::from(raw));
        }

        debug!(count = members.len(), "Parsed roster document");
        Ok(Self::from_members(members))
    }

    /// The press team roster compiled into the binary.
    pub fn embedded() -> LoadResult<Self> {
        Self::from_json_str(EMBEDDED_ROSTER)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl FromIterator<Member> for Roster {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self::from_members(iter.into_iter().collect())
    }
}

fn disambiguate_ids(members: Vec<Member>) -> Vec<Member> {
    let mut seen: HashSet<String> = HashSet::with_capacity(members.len());
    members
        .into_iter()
        .map(|mut member| {
            if seen.insert(member.id.as_str().to_string()) {
                return member;
            }
            let base = member.id.clone();
            let mut suffix = 2;
            let unique = loop {
                let candidate = format!("{base}-{suffix}");
                if seen.insert(candidate.clone()) {
                    break candidate;
                }
                suffix += 1;
            };
            warn!(original = %base, renamed = %unique, name = %member.name, "Duplicate member id");
            member.id = MemberId::new(unique);
            member
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_roster_loads_whole_team() {
        let roster = Roster::embedded().unwrap();
        assert_eq!(roster.len(), 22);
        assert_eq!(roster.members()[0].name, "Philippa");
        let advisor = roster.get(&MemberId::from("mr-bomah")).unwrap();
        assert_eq!(advisor.news_type, "Faculty Advisor");
        assert_eq!(advisor.extra["pronouns"], "he/him");
    }

    #[test]
    fn rejects_non_array_document() {
        let err = Roster::from_json_str(r#"{"members": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray));
    }

    #[test]
    fn rejects_unparsable_document() {
        let err = Roster::from_json_str("[{").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn rejects_non_object_record() {
        let err = Roster::from_json_value(json!([{ "name": "Fanta" }, 42])).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { index: 1 }));
    }

    #[test]
    fn empty_array_is_an_empty_roster() {
        let roster = Roster::from_json_str("[]").unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn duplicate_names_get_suffixed_ids() {
        let roster = Roster::from_json_value(json!([
            { "name": "Sam Lee" },
            { "name": "Sam Lee" },
            { "name": "sam  lee" },
        ]))
        .unwrap();

        let ids: Vec<&str> = roster.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["sam-lee", "sam-lee-2", "sam-lee-3"]);
    }

    #[test]
    fn suffixing_skips_ids_already_taken() {
        let roster = Roster::from_members(vec![
            Member::new("A").with_id("a"),
            Member::new("A2").with_id("a-2"),
            Member::new("A again").with_id("a"),
        ]);

        let ids: Vec<&str> = roster.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "a-2", "a-3"]);
    }

    #[test]
    fn preserves_document_order() {
        let roster: Roster = ["Zed", "Amy", "Kim"].into_iter().map(Member::new).collect();
        let names: Vec<&str> = roster.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Zed", "Amy", "Kim"]);
    }
}
