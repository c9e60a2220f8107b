//! State for the suite's setting editors: searchable CRUD over a record
//! store, with cancellable in-flight requests.
//!
//! The editor owns no rendering; applications compose a search input and a
//! table over [`SettingsEditor::records`] and feed [`Event`]s through
//! [`SettingsEditor::update`]. The store trait hides the suite's
//! JSON-over-HTTP layer behind boxed futures.
use std::sync::Arc;

use futures::future::BoxFuture;
use iced::task::Handle;
use iced::Task;

pub type StoreResult<T> = Result<T, StoreError>;

/// Why a store operation failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("record not found")]
    NotFound,
}

/// The fetch status of an editor.
///
/// There is no retry policy: a failed fetch stays [`LoadState::Error`]
/// until the user triggers a new search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error,
}

/// The record store behind a [`SettingsEditor`].
pub trait SettingStore<T>: Send + Sync {
    /// A fresh record with default values, for the "add" affordance.
    fn new_setting(&self) -> T;
    /// All records matching the given search text.
    fn search(&self, text: String) -> BoxFuture<'static, StoreResult<Vec<T>>>;
    fn add(&self, record: T) -> BoxFuture<'static, StoreResult<()>>;
    fn update(&self, record: T) -> BoxFuture<'static, StoreResult<()>>;
    fn delete(&self, record: T) -> BoxFuture<'static, StoreResult<()>>;
}

/// An interaction with a [`SettingsEditor`].
#[derive(Debug, Clone)]
pub enum Event<T: Clone> {
    /// The search text changed.
    QueryChanged(String),
    /// Run the search.
    Search,
    /// A search finished.
    Fetched(StoreResult<Vec<T>>),
    /// Create and store a fresh record.
    Add,
    /// Store the given edited record.
    Save(T),
    /// Remove the given record.
    Delete(T),
    /// A mutating operation finished.
    Committed(StoreResult<()>),
}

/// Editor state for a searchable record CRUD view.
pub struct SettingsEditor<T> {
    store: Arc<dyn SettingStore<T>>,
    query: String,
    records: Vec<T>,
    state: LoadState,
    // Abort handle of the in-flight search, if any
    pending: Option<Handle>,
}

impl<T> SettingsEditor<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(store: Arc<dyn SettingStore<T>>) -> Self {
        Self {
            store,
            query: String::new(),
            records: Vec::new(),
            state: LoadState::Idle,
            pending: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The records fetched by the last successful search. A failed fetch
    /// keeps the previous (possibly stale) records.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn update(&mut self, event: Event<T>) -> Task<Event<T>> {
        match event {
            Event::QueryChanged(query) => {
                self.query = query;
                Task::none()
            }
            Event::Search => self.begin_search(),
            Event::Fetched(Ok(records)) => {
                self.pending = None;
                self.records = records;
                self.state = LoadState::Idle;
                Task::none()
            }
            Event::Fetched(Err(error)) => {
                log::warn!("setting search failed: {error}");
                self.pending = None;
                self.state = LoadState::Error;
                Task::none()
            }
            Event::Add => {
                let record = self.store.new_setting();
                self.commit(self.store.add(record))
            }
            Event::Save(record) => self.commit(self.store.update(record)),
            Event::Delete(record) => self.commit(self.store.delete(record)),
            Event::Committed(Ok(())) => self.begin_search(),
            Event::Committed(Err(error)) => {
                log::warn!("setting change failed: {error}");
                self.state = LoadState::Error;
                Task::none()
            }
        }
    }

    /// Aborts any in-flight search. Also runs on drop; call it explicitly
    /// when tearing the editor down before the value goes away.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn begin_search(&mut self) -> Task<Event<T>> {
        // a new search supersedes the in-flight one
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        self.state = LoadState::Loading;

        let (task, handle) =
            Task::perform(self.store.search(self.query.clone()), Event::Fetched).abortable();
        self.pending = Some(handle);

        task
    }

    fn commit(&mut self, operation: BoxFuture<'static, StoreResult<()>>) -> Task<Event<T>> {
        self.state = LoadState::Loading;
        Task::perform(operation, Event::Committed)
    }
}

impl<T> Drop for SettingsEditor<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future;
    use futures::FutureExt;

    #[derive(Debug, Clone, PartialEq)]
    struct Flag {
        name: String,
    }

    struct StubStore {
        fail: bool,
    }

    impl SettingStore<Flag> for StubStore {
        fn new_setting(&self) -> Flag {
            Flag {
                name: "new".into(),
            }
        }

        fn search(&self, text: String) -> BoxFuture<'static, StoreResult<Vec<Flag>>> {
            if self.fail {
                future::ready(Err(StoreError::Request("boom".into()))).boxed()
            } else {
                future::ready(Ok(vec![Flag { name: text }])).boxed()
            }
        }

        fn add(&self, _record: Flag) -> BoxFuture<'static, StoreResult<()>> {
            future::ready(Ok(())).boxed()
        }

        fn update(&self, _record: Flag) -> BoxFuture<'static, StoreResult<()>> {
            future::ready(Ok(())).boxed()
        }

        fn delete(&self, _record: Flag) -> BoxFuture<'static, StoreResult<()>> {
            future::ready(Ok(())).boxed()
        }
    }

    fn editor() -> SettingsEditor<Flag> {
        SettingsEditor::new(Arc::new(StubStore { fail: false }))
    }

    #[test]
    fn search_enters_loading_and_retains_an_abort_handle() {
        let mut editor = editor();

        let _task = editor.update(Event::QueryChanged("volt".into()));
        let _task = editor.update(Event::Search);

        assert_eq!(editor.state(), LoadState::Loading);
        assert_eq!(editor.query(), "volt");
        assert!(editor.pending.is_some());
    }

    #[test]
    fn successful_fetch_replaces_records_and_goes_idle() {
        let mut editor = editor();
        let _task = editor.update(Event::Search);

        let records = vec![Flag { name: "a".into() }, Flag { name: "b".into() }];
        let _task = editor.update(Event::Fetched(Ok(records.clone())));

        assert_eq!(editor.state(), LoadState::Idle);
        assert_eq!(editor.records(), records);
        assert!(editor.pending.is_none());
    }

    #[test]
    fn failed_fetch_keeps_stale_records_and_reports_error() {
        let mut editor = editor();
        let _task = editor.update(Event::Fetched(Ok(vec![Flag { name: "old".into() }])));

        let _task = editor.update(Event::Fetched(Err(StoreError::Request("down".into()))));

        assert_eq!(editor.state(), LoadState::Error);
        assert_eq!(editor.records().len(), 1, "stale records stay visible");
    }

    #[test]
    fn a_new_search_supersedes_the_pending_one() {
        let mut editor = editor();

        let _task = editor.update(Event::Search);
        let _task = editor.update(Event::Search);

        assert!(editor.pending.is_some());
        assert_eq!(editor.state(), LoadState::Loading);
    }

    #[test]
    fn committed_changes_trigger_a_refresh() {
        let mut editor = editor();

        let _task = editor.update(Event::Committed(Ok(())));

        assert_eq!(editor.state(), LoadState::Loading, "refresh search started");
        assert!(editor.pending.is_some());
    }

    #[test]
    fn shutdown_clears_the_pending_handle() {
        let mut editor = editor();
        let _task = editor.update(Event::Search);

        editor.shutdown();

        assert!(editor.pending.is_none());
    }
}
