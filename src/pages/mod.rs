//! Page controllers: one fetch → filter → render pipeline shared by every route.
//!
//! A [`PageController`] owns the state of one page view. It issues a single
//! fetch per load, applies the type's ordering, and derives filtered views on
//! demand. Results from a superseded fetch, or that arrive after the view is
//! gone, are dropped.

mod characters;
mod contact;
mod faqs;
mod home;
mod maps;
mod patch_notes;
mod rankings;
mod tournaments;

pub use characters::*;
pub use contact::*;
pub use faqs::*;
pub use home::*;
pub use maps::*;
pub use patch_notes::*;
pub use rankings::*;
pub use tournaments::*;

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use maud::Markup;

use crate::content::{fetch_all, ContentClient, ContentError, ObjectQuery};
use crate::models::{ContentType, CosmicObject, SelectKey};
use crate::views::components;

/// A content type that has a list page.
pub trait Listing: ContentType {
    /// Plural noun used in messages ("Failed to load characters").
    const NOUN: &'static str;

    fn query() -> ObjectQuery {
        Self::list_query()
    }

    /// Order the fetched list. Backend order by default.
    fn arrange(_items: &mut [CosmicObject<Self>]) {}
}

/// A listing with an enum-keyed filter.
pub trait Filterable: Listing {
    type Key: SelectKey;

    /// Query-string parameter carrying the filter.
    const PARAM: &'static str;

    fn key_of(metadata: &Self) -> Option<Self::Key>;
}

/// Active filter. Anything unrecognised means `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<K> {
    All,
    Only(K),
}

impl<K: SelectKey> Filter<K> {
    pub fn parse(raw: Option<&str>, parse_key: impl Fn(&str) -> Option<K>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Filter::All,
            Some(raw) => parse_key(raw).map(Filter::Only).unwrap_or(Filter::All),
        }
    }

    pub fn from_params<T>(params: &HashMap<String, String>) -> Self
    where
        T: Filterable<Key = K>,
    {
        Self::parse(params.get(T::PARAM).map(String::as_str), K::parse)
    }

    /// Bucket key of the selection, `None` for `All`.
    pub fn active_key(&self) -> Option<&'static str> {
        match self {
            Filter::All => None,
            Filter::Only(key) => Some(key.as_str()),
        }
    }
}

/// Render state of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(Vec<T>),
    Error(String),
}

/// Identifies one fetch issued by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Owns the state of one list page.
#[derive(Debug)]
pub struct PageController<T: Listing> {
    state: PageState<CosmicObject<T>>,
    latest: u64,
    mounted: bool,
}

impl<T: Listing> Default for PageController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Listing> PageController<T> {
    pub fn new() -> Self {
        Self {
            state: PageState::Loading,
            latest: 0,
            mounted: true,
        }
    }

    pub fn state(&self) -> &PageState<CosmicObject<T>> {
        &self.state
    }

    pub fn into_state(self) -> PageState<CosmicObject<T>> {
        self.state
    }

    /// Start a fetch. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest += 1;
        self.state = PageState::Loading;
        FetchTicket(self.latest)
    }

    /// The view owning this controller is gone; later completions are ignored.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Apply a fetch result. Returns whether it was applied.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<CosmicObject<T>>, ContentError>,
    ) -> bool {
        if !self.mounted || ticket.0 != self.latest {
            tracing::debug!(
                "Discarding stale {} fetch (ticket {}, latest {})",
                T::NOUN,
                ticket.0,
                self.latest
            );
            return false;
        }

        self.state = match result {
            Ok(mut items) => {
                T::arrange(&mut items);
                PageState::Ready(items)
            }
            Err(ContentError::NotFound) => PageState::Ready(Vec::new()),
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", T::NOUN, e);
                PageState::Error(format!("Failed to load {}", T::NOUN))
            }
        };
        true
    }

    /// Run one fetch through the controller.
    pub async fn load(&mut self, client: &dyn ContentClient) -> &PageState<CosmicObject<T>> {
        let ticket = self.begin_fetch();
        let result = fetch_all::<T>(client, &T::query()).await;
        self.complete(ticket, result);
        &self.state
    }

    /// Items when ready, empty otherwise.
    pub fn items(&self) -> &[CosmicObject<T>] {
        match &self.state {
            PageState::Ready(items) => items,
            _ => &[],
        }
    }
}

impl<T: Filterable> PageController<T> {
    /// Items matching `filter`, recomputed on every call.
    pub fn view(&self, filter: Filter<T::Key>) -> Vec<&CosmicObject<T>> {
        apply_filter(self.items(), filter)
    }
}

/// Filter a list. `All` passes everything through unchanged; `Only` keeps
/// objects whose metadata carries the selected key and skips the rest.
pub fn apply_filter<T: Filterable>(
    items: &[CosmicObject<T>],
    filter: Filter<T::Key>,
) -> Vec<&CosmicObject<T>> {
    match filter {
        Filter::All => items.iter().collect(),
        Filter::Only(key) => items
            .iter()
            .filter(|item| {
                item.metadata
                    .as_ref()
                    .and_then(T::key_of)
                    .is_some_and(|k| k == key)
            })
            .collect(),
    }
}

/// Render a controller's state. `items` is the derived view of a ready list.
pub(crate) fn render_state<T: Listing>(
    state: &PageState<CosmicObject<T>>,
    items: &[&CosmicObject<T>],
    empty_message: &str,
    render: impl FnOnce(&[&CosmicObject<T>]) -> Markup,
) -> Markup {
    match state {
        PageState::Loading => components::loading(T::NOUN),
        PageState::Error(message) => components::error_message(message),
        PageState::Ready(_) if items.is_empty() => components::empty_state(empty_message),
        PageState::Ready(_) => render(items),
    }
}

/// Filter links for every key of `T`.
pub(crate) fn filter_bar<T: Filterable>(filter: Filter<T::Key>) -> Markup {
    components::filter_bar(
        T::PARAM,
        T::Key::ALL.iter().map(|key| (key.as_str(), key.label())),
        filter.active_key(),
    )
}

/// Newest first; missing or unparsable dates sink to the end. Stable.
pub fn sort_newest_first<T>(items: &mut [T], date: impl Fn(&T) -> Option<DateTime<Utc>>) {
    items.sort_by_key(|item| Reverse(date(item)));
}

/// Lowest position first; unranked entries sink to the end. Stable.
pub fn sort_by_position<T>(items: &mut [T], position: impl Fn(&T) -> Option<u32>) {
    items.sort_by_key(|item| {
        let position = position(item);
        (position.is_none(), position)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CharacterMetadata, CharacterRole, NewsMetadata, Select};

    fn character(id: &str, role: Option<CharacterRole>) -> CosmicObject<CharacterMetadata> {
        CosmicObject {
            id: id.to_string(),
            slug: id.to_string(),
            title: id.to_string(),
            content: None,
            metadata: Some(CharacterMetadata {
                role: role.map(|r| Select {
                    key: Some(r),
                    value: Some(r.label().to_string()),
                }),
                ..Default::default()
            }),
            object_type: None,
            created_at: None,
            modified_at: None,
        }
    }

    fn news(id: &str, date: Option<&str>) -> CosmicObject<NewsMetadata> {
        CosmicObject {
            id: id.to_string(),
            slug: id.to_string(),
            title: id.to_string(),
            content: None,
            metadata: Some(NewsMetadata {
                publication_date: date.map(str::to_string),
                ..Default::default()
            }),
            object_type: None,
            created_at: None,
            modified_at: None,
        }
    }

    #[test]
    fn test_filter_parse() {
        let parse = |raw: Option<&str>| Filter::parse(raw, CharacterRole::parse);
        assert_eq!(parse(None), Filter::All);
        assert_eq!(parse(Some("all")), Filter::All);
        assert_eq!(parse(Some("")), Filter::All);
        assert_eq!(parse(Some("wizard")), Filter::All);
        assert_eq!(parse(Some("hunter")), Filter::Only(CharacterRole::Hunter));
    }

    #[test]
    fn test_filter_all_is_identity() {
        let mut items = vec![
            character("a", Some(CharacterRole::Assassin)),
            character("b", None),
        ];
        items[1].metadata = None;

        let filtered = apply_filter(&items, Filter::All);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "a");
        assert_eq!(filtered[1].id, "b");
    }

    #[test]
    fn test_filter_only_skips_missing_metadata() {
        let mut items = vec![
            character("a", Some(CharacterRole::Assassin)),
            character("b", Some(CharacterRole::Survivor)),
            character("c", None),
            character("d", Some(CharacterRole::Assassin)),
        ];
        items[2].metadata = None;

        let filtered = apply_filter(&items, Filter::Only(CharacterRole::Assassin));
        let ids: Vec<_> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_sort_newest_first_puts_undated_last() {
        let mut items = vec![
            news("old", Some("2023-01-01")),
            news("bad", Some("soon")),
            news("new", Some("2024-06-01T12:00:00Z")),
            news("none", None),
            news("mid", Some("2023-09-15")),
        ];
        sort_newest_first(&mut items, |n| n.metadata.as_ref().and_then(|m| m.published()));

        let ids: Vec<_> = items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old", "bad", "none"]);
    }

    #[test]
    fn test_sort_by_position_puts_unranked_last() {
        let mut positions = vec![Some(3), None, Some(1), Some(2), None];
        sort_by_position(&mut positions, |p| *p);
        assert_eq!(positions, vec![Some(1), Some(2), Some(3), None, None]);
    }

    #[test]
    fn test_controller_not_found_is_empty_ready() {
        let mut controller = PageController::<CharacterMetadata>::new();
        let ticket = controller.begin_fetch();
        assert!(controller.complete(ticket, Err(ContentError::NotFound)));
        assert_eq!(controller.state(), &PageState::Ready(Vec::new()));
    }

    #[test]
    fn test_controller_backend_failure_is_error_state() {
        let mut controller = PageController::<CharacterMetadata>::new();
        let ticket = controller.begin_fetch();
        controller.complete(ticket, Err(ContentError::Transport("refused".to_string())));
        assert_eq!(
            controller.state(),
            &PageState::Error("Failed to load characters".to_string())
        );
    }

    #[test]
    fn test_controller_discards_stale_completion() {
        let mut controller = PageController::<CharacterMetadata>::new();
        let first = controller.begin_fetch();
        let second = controller.begin_fetch();

        assert!(controller.complete(second, Ok(vec![character("fresh", None)])));
        assert!(!controller.complete(first, Ok(vec![character("stale", None)])));

        assert_eq!(controller.items().len(), 1);
        assert_eq!(controller.items()[0].id, "fresh");
    }

    #[test]
    fn test_controller_ignores_completion_after_unmount() {
        let mut controller = PageController::<CharacterMetadata>::new();
        let ticket = controller.begin_fetch();
        controller.unmount();

        assert!(!controller.complete(ticket, Ok(vec![character("late", None)])));
        assert_eq!(controller.state(), &PageState::Loading);
    }

    #[test]
    fn test_controller_view_filters_on_each_call() {
        let mut controller = PageController::<CharacterMetadata>::new();
        let ticket = controller.begin_fetch();
        controller.complete(
            ticket,
            Ok(vec![
                character("a", Some(CharacterRole::Hunter)),
                character("b", Some(CharacterRole::Survivor)),
            ]),
        );

        assert_eq!(controller.view(Filter::All).len(), 2);
        assert_eq!(controller.view(Filter::Only(CharacterRole::Survivor)).len(), 1);
        assert!(controller.view(Filter::Only(CharacterRole::Assassin)).is_empty());
    }
}
