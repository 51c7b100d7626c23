use crate::core::courses::CourseQueryEngine;
use crate::core::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::core::directory::load_instructors;
use crate::core::projection::{project, DisplayLimits, HomepageView};
use crate::core::query::CourseQuery;
use crate::domain::model::{Course, FilterState, Instructor};
use crate::domain::ports::{ConfigProvider, CourseApi};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomepageSettings {
    pub debounce: Duration,
    pub limits: DisplayLimits,
}

impl HomepageSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            debounce: config.debounce_delay(),
            limits: DisplayLimits {
                max_courses: config.max_courses(),
                max_instructors: config.max_instructors(),
            },
        }
    }
}

impl Default for HomepageSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            limits: DisplayLimits::default(),
        }
    }
}

#[derive(Debug, Default)]
struct HomepageState {
    loading: bool,
    courses: Vec<Course>,
    instructors: Vec<Instructor>,
    filter: FilterState,
    // sequence number of the newest course fetch; older responses are dropped
    latest_fetch: u64,
    in_flight: usize,
    // set when a timer is armed, cleared only by the fetch of the newest timer
    awaiting_refresh: bool,
    armed_refreshes: u64,
}

struct Inner {
    api: Arc<dyn CourseApi>,
    engine: CourseQueryEngine,
    state: Mutex<HomepageState>,
    debouncer: Debouncer,
    lifecycle: CancellationToken,
    limits: DisplayLimits,
    revision: watch::Sender<u64>,
}

/// Homepage aggregator: instructor directory, filtered course list and the
/// debounced trigger that ties filter edits to course fetches.
///
/// Cloning yields another handle to the same component. After [`teardown`]
/// nothing is fetched or applied any more.
///
/// [`teardown`]: Homepage::teardown
#[derive(Clone)]
pub struct Homepage {
    inner: Arc<Inner>,
}

impl Homepage {
    pub fn new(api: Arc<dyn CourseApi>, settings: HomepageSettings) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                engine: CourseQueryEngine::new(Arc::clone(&api)),
                api,
                state: Mutex::new(HomepageState::default()),
                debouncer: Debouncer::new(settings.debounce),
                lifecycle: CancellationToken::new(),
                limits: settings.limits,
                revision,
            }),
        }
    }

    /// Loads instructors and the unfiltered course list concurrently. Each
    /// half falls back to an empty list on its own, so one failure never
    /// discards the other result.
    pub async fn mount(&self) {
        if self.is_torn_down() {
            tracing::warn!("Ignoring mount of a torn down homepage");
            return;
        }

        self.state().loading = true;
        self.notify();
        tracing::info!("Loading homepage");

        // instructors and unfiltered courses in parallel
        let unfiltered = CourseQuery::default();
        let (instructors, ()) = tokio::join!(
            self.guarded(load_instructors(self.inner.api.as_ref())),
            self.run_course_fetch(&unfiltered),
        );

        // late results after teardown are dropped
        if self.is_torn_down() {
            tracing::debug!("Homepage torn down during mount; discarding results");
            return;
        }

        {
            let mut state = self.state();
            if let Some(instructors) = instructors {
                state.instructors = instructors;
            }
            state.loading = false;
        }
        self.notify();
    }

    pub fn set_query_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.update_filter(|filter| {
            if filter.query_text == text {
                return false;
            }
            filter.query_text = text;
            true
        });
    }

    pub fn select_instructor(&self, instructor_id: Option<i64>) {
        self.update_filter(|filter| {
            if filter.selected_instructor_id == instructor_id {
                return false;
            }
            filter.selected_instructor_id = instructor_id;
            true
        });
    }

    /// Runs the course query immediately and applies the result.
    pub async fn fetch_courses(&self, query: &str, instructor_id: Option<i64>) {
        self.run_course_fetch(&CourseQuery::new(query, instructor_id))
            .await;
    }

    /// Cancels the pending debounce timer and abandons in-flight requests.
    /// Safe to call more than once.
    pub fn teardown(&self) {
        if self.inner.lifecycle.is_cancelled() {
            return;
        }
        {
            let mut state = self.state();
            if self.inner.debouncer.cancel() {
                tracing::debug!("Cancelled pending course refresh on teardown");
            }
            state.awaiting_refresh = false;
        }
        self.inner.lifecycle.cancel();
        self.notify();
        tracing::debug!("Homepage torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.lifecycle.is_cancelled()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn is_refresh_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    pub fn filter(&self) -> FilterState {
        self.state().filter.clone()
    }

    pub fn courses(&self) -> Vec<Course> {
        self.state().courses.clone()
    }

    pub fn instructors(&self) -> Vec<Instructor> {
        self.state().instructors.clone()
    }

    pub fn view(&self) -> HomepageView {
        let state = self.state();
        let (courses, instructors, instructor_label) = project(
            &state.courses,
            &state.instructors,
            state.filter.selected_instructor_id,
            self.inner.limits,
        );
        HomepageView {
            loading: state.loading,
            courses,
            instructors,
            query_text: state.filter.query_text.clone(),
            selected_instructor_id: state.filter.selected_instructor_id,
            instructor_label,
        }
    }

    /// Revision counter bumped on every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// True when no load, timer or course fetch is outstanding.
    pub fn is_settled(&self) -> bool {
        if self.is_torn_down() {
            return true;
        }
        let state = self.state();
        !state.loading && !state.awaiting_refresh && state.in_flight == 0
    }

    /// Waits until [`is_settled`](Self::is_settled) holds.
    pub async fn settled(&self) {
        let mut revisions = self.subscribe();
        while !self.is_settled() {
            if revisions.changed().await.is_err() {
                return;
            }
        }
    }

    fn update_filter<F>(&self, edit: F)
    where
        F: FnOnce(&mut FilterState) -> bool,
    {
        if self.is_torn_down() {
            return;
        }
        {
            let mut state = self.state();
            if !edit(&mut state.filter) {
                return;
            }
            tracing::debug!("Filter changed: {:?}", state.filter);
            state.awaiting_refresh = true;
            state.armed_refreshes += 1;
            let armed = state.armed_refreshes;
            let page = self.clone();
            self.inner
                .debouncer
                .schedule(move || async move { page.refresh_from_filter(armed).await });
        }
        self.notify();
    }

    // Debounce expiry: the filter is read now, not when the timer was armed.
    async fn refresh_from_filter(&self, armed: u64) {
        let (query, seq) = {
            let mut state = self.state();
            let query = CourseQuery::from_filter(&state.filter);
            (query, Self::begin_fetch(&mut state))
        };
        self.complete_fetch(&query, seq, Some(armed)).await;
    }

    async fn run_course_fetch(&self, query: &CourseQuery) {
        let seq = Self::begin_fetch(&mut self.state());
        self.complete_fetch(query, seq, None).await;
    }

    fn begin_fetch(state: &mut HomepageState) -> u64 {
        state.latest_fetch += 1;
        state.in_flight += 1;
        state.latest_fetch
    }

    // `armed` is set for fetches started by the debounce timer.
    async fn complete_fetch(&self, query: &CourseQuery, seq: u64, armed: Option<u64>) {
        let courses = self.guarded(self.inner.engine.fetch(query)).await;

        {
            let mut state = self.state();
            state.in_flight = state.in_flight.saturating_sub(1);
            // a newer timer keeps the refresh outstanding
            if armed == Some(state.armed_refreshes) {
                state.awaiting_refresh = false;
            }

            if self.is_torn_down() {
                return;
            }
            // replace wholesale, unless a newer fetch has been issued since
            match courses {
                Some(courses) if seq == state.latest_fetch => state.courses = courses,
                Some(_) => tracing::debug!("Discarding superseded course response #{}", seq),
                None => {}
            }
        }
        self.notify();
    }

    // Resolves to None once the homepage is torn down.
    async fn guarded<T, F>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.inner.lifecycle.cancelled() => None,
            value = fut => Some(value),
        }
    }

    fn notify(&self) {
        self.inner.revision.send_modify(|revision| *revision += 1);
    }

    fn state(&self) -> MutexGuard<'_, HomepageState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
