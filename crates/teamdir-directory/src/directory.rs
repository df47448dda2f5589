//! The directory context: roster, criteria, filtered view, and open modal.
//!
//! A `Directory` is created once the roster has loaded and is driven through
//! `&mut self` by a single owner. The filtered view is recomputed in full when
//! the criteria change; the open modal member is tracked by id, so navigation
//! always resolves against the current view.

use std::time::Instant;

use rand::Rng;
use teamdir_core::{Member, MemberId, Roster};
use tracing::debug;

use crate::criteria::FilterCriteria;
use crate::error::RenderResult;
use crate::filter::{matching_indices, roles, streams};
use crate::navigation::{resolve_position, step, Direction, Position};
use crate::random::pick_random;
use crate::render::{render_cards, render_page, CardRenderer, PageContext, RenderedCard, ViewMode};
use crate::summary::Summary;

#[derive(Debug)]
pub struct Directory {
    roster: Roster,
    criteria: FilterCriteria,
    applied: Option<FilterCriteria>,
    view: Vec<usize>,
    open: Option<MemberId>,
    mode: ViewMode,
}

impl Directory {
    pub fn new(roster: Roster) -> Self {
        let mut directory = Self {
            roster,
            criteria: FilterCriteria::default(),
            applied: None,
            view: Vec::new(),
            open: None,
            mode: ViewMode::default(),
        };
        directory.apply_filters();
        directory
    }

    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Roster size, as shown in the page header
    pub fn header_count(&self) -> usize {
        self.roster.len()
    }

    /// The members currently matching the criteria, in roster order
    pub fn filtered(&self) -> Vec<&Member> {
        let members = self.roster.members();
        self.view.iter().map(|&i| &members[i]).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary::new(self.view.len(), self.roster.len(), self.criteria.is_active())
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Summary {
        self.criteria = criteria;
        self.apply_filters()
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> Summary {
        self.criteria.search = search.into();
        self.apply_filters()
    }

    pub fn clear_search(&mut self) -> Summary {
        self.set_search(String::new())
    }

    pub fn set_stream(&mut self, stream: impl Into<String>) -> Summary {
        self.criteria.stream = stream.into();
        self.apply_filters()
    }

    pub fn set_news_type(&mut self, news_type: impl Into<String>) -> Summary {
        self.criteria.news_type = news_type.into();
        self.apply_filters()
    }

    pub fn reset_filters(&mut self) -> Summary {
        self.set_criteria(FilterCriteria::default())
    }

    fn apply_filters(&mut self) -> Summary {
        if self.applied.as_ref() != Some(&self.criteria) {
            let started = Instant::now();
            self.view = matching_indices(self.roster.members(), &self.criteria);
            self.applied = Some(self.criteria.clone());
            debug!(
                shown = self.view.len(),
                total = self.roster.len(),
                elapsed = ?started.elapsed(),
                "Filtering complete"
            );
        }
        self.summary()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn position_of(&self, id: &MemberId) -> Option<Position> {
        resolve_position(&self.filtered(), id)
    }

    /// Open the detail modal on a roster member.
    pub fn open(&mut self, id: &MemberId) -> Option<&Member> {
        let member = self.roster.get(id)?;
        self.open = Some(member.id.clone());
        Some(member)
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn current(&self) -> Option<&Member> {
        self.open.as_ref().and_then(|id| self.roster.get(id))
    }

    /// Move the open modal one place through the filtered view.
    ///
    /// If the open member has been filtered out since it was opened, nothing
    /// moves and the same member is returned.
    pub fn navigate(&mut self, direction: Direction) -> Option<&Member> {
        let current_id = self.open.clone()?;
        let next_id = {
            let current = self.roster.get(&current_id)?;
            let view = self.filtered();
            step(&view, current, direction).id.clone()
        };
        if next_id == current_id {
            debug!(id = %current_id, "Navigation did not move");
        }
        self.open = Some(next_id);
        self.current()
    }

    /// Open the modal on a uniformly chosen member of the filtered view.
    pub fn open_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Member> {
        let id = pick_random(&self.filtered(), rng)?.id.clone();
        self.open = Some(id);
        self.current()
    }

    pub fn render_cards<R: CardRenderer + ?Sized>(&self, renderer: &R) -> Vec<RenderedCard> {
        render_cards(renderer, &self.filtered(), self.mode)
    }

    /// Detail markup for the open member, with its position in the view.
    pub fn render_detail<R: CardRenderer + ?Sized>(&self, renderer: &R) -> Option<RenderResult<String>> {
        let member = self.current()?;
        Some(renderer.render_detail(member, self.position_of(&member.id)))
    }

    /// The whole static page for the current state.
    pub fn render_page<R: CardRenderer + ?Sized>(&self, renderer: &R, title: &str) -> String {
        let members = self.roster.members();
        let stream_options = streams(members);
        let role_options = roles(members);
        let ctx = PageContext {
            title,
            summary: self.summary(),
            mode: self.mode,
            streams: &stream_options,
            roles: &role_options,
        };
        render_page(&ctx, &self.render_cards(renderer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HtmlRenderer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn press_team() -> Directory {
        Directory::new(Roster::embedded().unwrap())
    }

    fn abc() -> Directory {
        Directory::new(Roster::from_members(vec![
            Member::new("A").with_stream("Arts"),
            Member::new("B").with_stream("Science"),
            Member::new("C").with_stream("Arts"),
        ]))
    }

    #[test]
    fn starts_unfiltered() {
        let directory = press_team();
        assert_eq!(directory.filtered().len(), 22);
        assert_eq!(directory.header_count(), 22);
        assert_eq!(directory.summary().to_string(), "Showing all 22 team members");
    }

    #[test]
    fn filter_actions_update_summary() {
        let mut directory = press_team();
        let summary = directory.set_stream("Commercial");
        assert_eq!(summary.to_string(), "Showing 1 of 22 team members");

        let summary = directory.set_search("zzz");
        assert_eq!(summary.to_string(), "No team members found matching your criteria");

        let summary = directory.reset_filters();
        assert_eq!(summary.to_string(), "Showing all 22 team members");
    }

    #[test]
    fn clear_search_keeps_other_filters() {
        let mut directory = press_team();
        directory.set_stream("Science");
        directory.set_search("sports");
        assert_eq!(directory.filtered().len(), 2);

        directory.clear_search();
        assert_eq!(directory.criteria().stream, "Science");
        assert!(directory.filtered().iter().all(|m| m.stream == "Science"));
    }

    #[test]
    fn role_filter_matches_vice_president() {
        let mut directory = press_team();
        directory.set_news_type("Vice President");
        let names: Vec<&str> = directory.filtered().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Veronica"]);
    }

    #[test]
    fn navigation_wraps_within_filtered_view() {
        let mut directory = abc();
        directory.set_stream("Arts");
        directory.open(&MemberId::from("a"));

        assert_eq!(directory.navigate(Direction::Prev).unwrap().name, "C");
        assert_eq!(directory.navigate(Direction::Next).unwrap().name, "A");
        assert_eq!(directory.position_of(&MemberId::from("c")).unwrap().to_string(), "2 of 2");
    }

    #[test]
    fn navigation_fails_closed_when_member_filtered_out() {
        let mut directory = abc();
        directory.open(&MemberId::from("b"));
        directory.set_stream("Arts");

        assert_eq!(directory.navigate(Direction::Next).unwrap().name, "B");
        assert_eq!(directory.navigate(Direction::Prev).unwrap().name, "B");
    }

    #[test]
    fn navigate_without_open_modal_does_nothing() {
        let mut directory = abc();
        assert!(directory.navigate(Direction::Next).is_none());
        directory.open(&MemberId::from("a"));
        directory.close();
        assert!(directory.current().is_none());
    }

    #[test]
    fn open_unknown_member_is_none() {
        let mut directory = abc();
        assert!(directory.open(&MemberId::from("zz")).is_none());
        assert!(directory.current().is_none());
    }

    #[test]
    fn random_pick_respects_filters() {
        let mut directory = abc();
        directory.set_stream("Science");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(directory.open_random(&mut rng).unwrap().name, "B");

        directory.set_search("nobody");
        directory.close();
        assert!(directory.open_random(&mut rng).is_none());
    }

    #[test]
    fn detail_reports_position() {
        let mut directory = press_team();
        directory.open(&MemberId::from("veronica"));
        let detail = directory.render_detail(&HtmlRenderer::default()).unwrap().unwrap();
        assert!(detail.contains("2 of 22"));
    }

    #[test]
    fn page_lists_filtered_cards_in_view_mode() {
        let mut directory = press_team().with_view_mode(ViewMode::List);
        directory.set_stream("Commercial");
        let page = directory.render_page(&HtmlRenderer::default(), "Press Team");
        assert!(page.contains(r#"data-view="list""#));
        assert!(page.contains(r#"data-id="daniella""#));
        assert!(!page.contains(r#"data-id="philippa""#));
        assert!(page.contains("Showing 1 of 22 team members"));
        assert!(page.contains(r#"<option value="Commercial">Commercial</option>"#));
    }
}
