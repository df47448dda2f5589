//! Filter engine.
//!
//! A stable linear scan: the output keeps roster order and the engine never
//! fails. Empty member fields simply do not match a non-empty needle.

use teamdir_core::Member;

use crate::criteria::FilterCriteria;

/// Criteria with their needles lowercased once per run.
#[derive(Debug, Clone)]
pub struct Matcher {
    search: Option<String>,
    stream: Option<String>,
    news_type: Option<String>,
}

impl Matcher {
    pub fn new(criteria: &FilterCriteria) -> Self {
        let needle = |s: &str| (!s.is_empty()).then(|| s.to_lowercase());
        Self {
            search: needle(&criteria.search),
            stream: needle(&criteria.stream),
            news_type: needle(&criteria.news_type),
        }
    }

    pub fn matches(&self, member: &Member) -> bool {
        self.search_matches(member) && self.stream_matches(member) && self.role_matches(member)
    }

    fn search_matches(&self, member: &Member) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        [
            &member.name,
            &member.news_type,
            &member.stream,
            &member.news_about,
        ]
        .into_iter()
        .any(|field| contains_folded(field, needle))
    }

    fn stream_matches(&self, member: &Member) -> bool {
        self.stream
            .as_ref()
            .map_or(true, |needle| member.stream.to_lowercase() == *needle)
    }

    fn role_matches(&self, member: &Member) -> bool {
        self.news_type
            .as_ref()
            .map_or(true, |needle| contains_folded(&member.news_type, needle))
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(folded_needle)
}

/// Members of `roster` matching `criteria`, in roster order.
pub fn apply_filters<'a>(roster: &'a [Member], criteria: &FilterCriteria) -> Vec<&'a Member> {
    let matcher = Matcher::new(criteria);
    roster.iter().filter(|m| matcher.matches(m)).collect()
}

/// Positions in `roster` of the members matching `criteria`, ascending.
pub fn matching_indices(roster: &[Member], criteria: &FilterCriteria) -> Vec<usize> {
    let matcher = Matcher::new(criteria);
    roster
        .iter()
        .enumerate()
        .filter_map(|(i, m)| matcher.matches(m).then_some(i))
        .collect()
}

/// Distinct non-empty streams, in first-seen order.
pub fn streams(roster: &[Member]) -> Vec<&str> {
    distinct(roster.iter().map(|m| m.stream.as_str()))
}

/// Distinct non-empty roles, in first-seen order.
pub fn roles(roster: &[Member]) -> Vec<&str> {
    distinct(roster.iter().map(|m| m.news_type.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
