//! Pagination state machine behind the gallery.
//!
//! The session never performs I/O. Each event returns a [`Transition`]: an
//! optional [`FetchRequest`] for the caller to execute and a list of
//! [`Effect`]s for the view to apply. Fetch results are fed back through
//! [`SearchSession::complete`].

use tracing::{debug, error, info};

use crate::model::{has_more, ImageResult, ResultPage};
use crate::notifications::Notification;
use crate::pixabay::SearchError;

pub const DEFAULT_PAGE_SIZE: u32 = 15;

const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query!";
const NO_MATCHES_MESSAGE: &str =
    "Sorry, there are no images matching your search query. Please try again!";
const SEARCH_FAILED_MESSAGE: &str = "Something went wrong. Please try again later.";
const LOAD_MORE_FAILED_MESSAGE: &str = "Failed to load more images. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    /// 1-based index of the last page successfully fetched, or being fetched.
    pub page: u32,
    pub total_hits: u64,
    pub page_size: u32,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            page: 1,
            total_hits: 0,
            page_size,
        }
    }

    pub fn has_more(&self) -> bool {
        has_more(self.page, self.page_size, self.total_hits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Search,
    LoadMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Identifies the request; results carrying an older generation are dropped.
    pub generation: u64,
    pub kind: FetchKind,
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    ClearInput,
    /// The set of viewable images changed.
    RefreshViewer,
    /// Scroll down past the freshly appended cards.
    ScrollToNewCards,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub request: Option<FetchRequest>,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn effects(effects: Vec<Effect>) -> Self {
        Self {
            request: None,
            effects,
        }
    }

    fn fetch(request: FetchRequest) -> Self {
        Self {
            request: Some(request),
            effects: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct SearchSession {
    state: SearchState,
    images: Vec<ImageResult>,
    loading: bool,
    load_more_visible: bool,
    generation: u64,
}

impl SearchSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: SearchState::new(page_size),
            images: Vec::new(),
            loading: false,
            load_more_visible: false,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn images(&self) -> &[ImageResult] {
        &self.images
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    /// Start a new search. Blank input is rejected without touching state.
    ///
    /// A search issued while another request is outstanding supersedes it.
    pub fn submit(&mut self, input: &str) -> Transition {
        let query = input.trim();
        if query.is_empty() {
            return Transition::effects(vec![Effect::Notify(Notification::error(
                EMPTY_QUERY_MESSAGE,
            ))]);
        }

        self.state = SearchState {
            query: query.to_string(),
            page: 1,
            total_hits: 0,
            page_size: self.state.page_size,
        };
        self.images.clear();
        self.load_more_visible = false;

        info!("Searching images for '{}'", query);
        Transition {
            request: Some(self.issue(FetchKind::Search)),
            effects: vec![Effect::RefreshViewer],
        }
    }

    /// Request the next page. Ignored unless more pages are known to exist
    /// and nothing is in flight.
    pub fn load_more(&mut self) -> Transition {
        if !self.load_more_visible || self.loading {
            debug!(
                "Ignoring load more (visible: {}, loading: {})",
                self.load_more_visible, self.loading
            );
            return Transition::default();
        }

        self.state.page += 1;
        Transition::fetch(self.issue(FetchKind::LoadMore))
    }

    /// Apply the outcome of `request`.
    pub fn complete(
        &mut self,
        request: &FetchRequest,
        result: Result<ResultPage, SearchError>,
    ) -> Transition {
        if !self.loading || request.generation != self.generation {
            debug!(
                "Discarding stale result for '{}' page {}",
                request.query, request.page
            );
            return Transition::default();
        }
        self.loading = false;

        match (request.kind, result) {
            (FetchKind::Search, Ok(page)) => self.search_succeeded(page),
            (FetchKind::Search, Err(err)) => Self::search_failed(&request.query, err),
            (FetchKind::LoadMore, Ok(page)) => self.load_more_succeeded(page),
            (FetchKind::LoadMore, Err(err)) => self.load_more_failed(err),
        }
    }

    fn issue(&mut self, kind: FetchKind) -> FetchRequest {
        self.generation += 1;
        self.loading = true;
        FetchRequest {
            generation: self.generation,
            kind,
            query: self.state.query.clone(),
            page: self.state.page,
            page_size: self.state.page_size,
        }
    }

    fn search_succeeded(&mut self, page: ResultPage) -> Transition {
        self.state.total_hits = page.total_hits;
        self.images.extend(page.hits);
        self.load_more_visible = self.state.has_more();

        info!(
            "Found {} images for '{}'",
            self.state.total_hits, self.state.query
        );
        Transition::effects(vec![
            Effect::RefreshViewer,
            Effect::Notify(Notification::success(format!(
                "Found {} images!",
                self.state.total_hits
            ))),
            Effect::ClearInput,
        ])
    }

    fn search_failed(query: &str, err: SearchError) -> Transition {
        let message = match err {
            SearchError::EmptyResult => {
                info!("No images found for '{}'", query);
                NO_MATCHES_MESSAGE
            }
            SearchError::Transport(cause) => {
                error!("Search error for '{}': {}", query, cause);
                SEARCH_FAILED_MESSAGE
            }
        };
        Transition::effects(vec![Effect::Notify(Notification::error(message))])
    }

    fn load_more_succeeded(&mut self, page: ResultPage) -> Transition {
        self.images.extend(page.hits);

        let mut effects = vec![Effect::RefreshViewer, Effect::ScrollToNewCards];
        if !self.state.has_more() {
            self.load_more_visible = false;
            info!("Reached the end of results for '{}'", self.state.query);
            effects.push(Effect::Notify(Notification::end_of_results()));
        }
        Transition::effects(effects)
    }

    fn load_more_failed(&mut self, err: SearchError) -> Transition {
        error!(
            "Load more error for '{}' page {}: {}",
            self.state.query, self.state.page, err
        );
        // Retry must ask for the same page again.
        self.state.page = self.state.page.saturating_sub(1).max(1);
        Transition::effects(vec![Effect::Notify(Notification::error(
            LOAD_MORE_FAILED_MESSAGE,
        ))])
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_image;
    use crate::notifications::Severity;

    fn page(first_id: u64, count: u64, total_hits: u64) -> ResultPage {
        ResultPage {
            hits: (first_id..first_id + count).map(sample_image).collect(),
            total_hits,
        }
    }

    fn notifications(transition: &Transition) -> Vec<&Notification> {
        transition
            .effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn ids(session: &SearchSession) -> Vec<u64> {
        session.images().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_blank_submit_is_rejected_without_mutation() {
        let mut session = SearchSession::default();
        let first = session.submit("dogs");
        session.complete(&first.request.unwrap(), Ok(page(0, 15, 42)));
        let before = session.state().clone();

        for input in ["", "   ", "\t\n"] {
            let transition = session.submit(input);
            assert!(transition.request.is_none());
            let notes = notifications(&transition);
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].message, EMPTY_QUERY_MESSAGE);
        }

        assert_eq!(session.state(), &before);
        assert_eq!(session.images().len(), 15);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_submit_resets_state_and_requests_first_page() {
        let mut session = SearchSession::default();
        let first = session.submit("dogs").request.unwrap();
        session.complete(&first, Ok(page(0, 15, 42)));
        let more = session.load_more().request.unwrap();
        session.complete(&more, Ok(page(15, 15, 42)));
        assert_eq!(session.state().page, 2);

        let request = session.submit("  cats  ").request.unwrap();
        assert_eq!(request.kind, FetchKind::Search);
        assert_eq!(request.query, "cats");
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);

        assert_eq!(session.state().total_hits, 0);
        assert!(session.images().is_empty());
        assert!(!session.load_more_visible());
        assert!(session.is_loading());
    }

    #[test]
    fn test_paging_through_cats_until_end_of_results() {
        let mut session = SearchSession::new(15);

        // Page 1: 15 of 42
        let request = session.submit("cats").request.unwrap();
        let transition = session.complete(&request, Ok(page(0, 15, 42)));
        assert_eq!(session.images().len(), 15);
        assert!(session.load_more_visible());
        assert!(!session.is_loading());
        assert!(transition.effects.contains(&Effect::ClearInput));
        let notes = notifications(&transition);
        assert_eq!(notes[0].severity, Severity::Success);
        assert_eq!(notes[0].message, "Found 42 images!");

        // Page 2: 30 of 42
        let request = session.load_more().request.unwrap();
        assert_eq!(request.kind, FetchKind::LoadMore);
        assert_eq!(request.page, 2);
        assert!(session.is_loading());
        let transition = session.complete(&request, Ok(page(15, 15, 42)));
        assert_eq!(session.state().page, 2);
        assert_eq!(session.images().len(), 30);
        assert!(session.load_more_visible());
        assert!(transition.effects.contains(&Effect::ScrollToNewCards));
        assert!(notifications(&transition).is_empty());

        // Page 3: 42 of 42
        let request = session.load_more().request.unwrap();
        assert_eq!(request.page, 3);
        let transition = session.complete(&request, Ok(page(30, 12, 42)));
        assert_eq!(session.state().page, 3);
        assert_eq!(session.images().len(), 42);
        assert!(!session.load_more_visible());
        assert_eq!(notifications(&transition), vec![&Notification::end_of_results()]);

        // Appends are in order with no duplicates or gaps.
        assert_eq!(ids(&session), (0..42).collect::<Vec<_>>());

        // Nothing left to load.
        assert_eq!(session.load_more(), Transition::default());
    }

    #[test]
    fn test_single_page_result_hides_load_more() {
        let mut session = SearchSession::new(15);
        let request = session.submit("rare").request.unwrap();
        session.complete(&request, Ok(page(0, 15, 15)));
        assert!(!session.load_more_visible());
        assert_eq!(session.load_more().request, None);
    }

    #[test]
    fn test_empty_result_shows_no_matches() {
        let mut session = SearchSession::default();
        let request = session.submit("zzzxyznoresult").request.unwrap();
        let transition = session.complete(&request, Err(SearchError::EmptyResult));

        assert!(session.images().is_empty());
        assert!(!session.is_loading());
        assert!(!session.load_more_visible());
        assert_eq!(session.state().page, 1);
        let notes = notifications(&transition);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].message, NO_MATCHES_MESSAGE);
        assert!(!transition.effects.contains(&Effect::ClearInput));
    }

    #[test]
    fn test_transport_failure_on_search_shows_generic_message() {
        let mut session = SearchSession::default();
        let request = session.submit("cats").request.unwrap();
        let transition = session.complete(
            &request,
            Err(SearchError::Transport("http status: 500".to_string())),
        );

        assert_eq!(notifications(&transition)[0].message, SEARCH_FAILED_MESSAGE);
        assert_eq!(session.state().page, 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_load_more_failure_rolls_back_page() {
        let mut session = SearchSession::new(15);
        let request = session.submit("cats").request.unwrap();
        session.complete(&request, Ok(page(0, 15, 42)));
        let page_before = session.state().page;

        let request = session.load_more().request.unwrap();
        assert_eq!(request.page, 2);
        let transition = session.complete(
            &request,
            Err(SearchError::Transport("timed out".to_string())),
        );

        assert_eq!(session.state().page, page_before);
        assert_eq!(session.images().len(), 15);
        assert!(session.load_more_visible());
        assert!(!session.is_loading());
        assert_eq!(
            notifications(&transition)[0].message,
            LOAD_MORE_FAILED_MESSAGE
        );

        // Retry asks for the same page.
        let retry = session.load_more().request.unwrap();
        assert_eq!(retry.page, 2);
        session.complete(&retry, Ok(page(15, 15, 42)));
        assert_eq!(ids(&session), (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_load_more_ignored_while_loading() {
        let mut session = SearchSession::new(15);
        let request = session.submit("cats").request.unwrap();
        session.complete(&request, Ok(page(0, 15, 42)));

        let first = session.load_more().request.unwrap();
        assert_eq!(session.load_more(), Transition::default());
        assert_eq!(session.state().page, 2);

        session.complete(&first, Ok(page(15, 15, 42)));
        assert_eq!(session.images().len(), 30);
    }

    #[test]
    fn test_new_search_discards_in_flight_load_more() {
        let mut session = SearchSession::new(15);
        let request = session.submit("cats").request.unwrap();
        session.complete(&request, Ok(page(0, 15, 42)));
        let stale = session.load_more().request.unwrap();

        let fresh = session.submit("dogs").request.unwrap();
        assert_eq!(session.complete(&stale, Ok(page(15, 15, 42))), Transition::default());
        assert!(session.images().is_empty());
        assert!(session.is_loading());

        session.complete(&fresh, Ok(page(100, 15, 20)));
        assert_eq!(session.state().query, "dogs");
        assert_eq!(ids(&session), (100..115).collect::<Vec<_>>());
    }

    #[test]
    fn test_stale_failure_does_not_roll_back() {
        let mut session = SearchSession::new(15);
        let request = session.submit("cats").request.unwrap();
        session.complete(&request, Ok(page(0, 15, 42)));
        let stale = session.load_more().request.unwrap();
        let fresh = session.submit("dogs").request.unwrap();

        let transition = session.complete(&stale, Err(SearchError::Transport("reset".into())));
        assert!(transition.effects.is_empty());
        assert_eq!(session.state().page, 1);
        assert!(session.is_loading());

        // Delivering the same result twice has no further effect.
        session.complete(&fresh, Ok(page(0, 15, 42)));
        assert_eq!(session.complete(&fresh, Ok(page(0, 15, 42))), Transition::default());
        assert_eq!(session.images().len(), 15);
    }
}
