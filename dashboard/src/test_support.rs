//! In-memory port doubles and sample records for tests.
//!
//! Enabled for unit tests and, through the `test-support` feature, for the
//! integration and behaviour suites.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    ConfirmationGate, DashboardPorts, LocalRecords, LocalSnapshot, LocalStore, LocalStoreError,
    NoticeKind, Notifier, RemoteSnapshot, RemoteSource, RemoteSourceError, Renderer,
};
use crate::domain::{
    Comment, CommentId, Dashboard, Favorites, MergePolicy, Post, PostCard, PostId, Summary, Theme,
    User, UserId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build a user with derived username and email.
#[must_use]
pub fn user(id: u64, name: &str) -> User {
    let handle = name.to_lowercase().replace(' ', ".");
    User {
        id: UserId::new(id),
        name: name.to_owned(),
        username: handle.clone(),
        email: format!("{handle}@example.com"),
        phone: String::new(),
        website: String::new(),
    }
}

/// Build a post.
#[must_use]
pub fn post(id: u64, user_id: u64, title: &str, body: &str) -> Post {
    Post {
        id: PostId::new(id),
        user_id: UserId::new(user_id),
        title: title.to_owned(),
        body: body.to_owned(),
    }
}

/// Build a comment.
#[must_use]
pub fn comment(id: u64, post_id: u64, body: &str) -> Comment {
    Comment {
        id: CommentId::new(id),
        post_id: PostId::new(post_id),
        name: format!("commenter {id}"),
        email: format!("c{id}@example.com"),
        body: body.to_owned(),
    }
}

/// Two users, three posts (one by an unknown author), and three comments.
#[must_use]
pub fn sample_remote() -> RemoteSnapshot {
    RemoteSnapshot {
        users: vec![user(1, "Leanne Graham"), user(2, "Ervin Howell")],
        posts: vec![
            post(1, 1, "Morning walk", "Sunny and calm"),
            post(2, 2, "Evening", "A walk by the river"),
            post(3, 99, "Orphan", "Nobody wrote this"),
        ],
        comments: vec![
            comment(1, 1, "Lovely"),
            comment(2, 1, "Agreed"),
            comment(3, 2, "Nice river"),
        ],
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    /// Freeze the clock at `millis` since the Unix epoch.
    #[must_use]
    pub fn at_millis(millis: i64) -> Self {
        let instant = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default();
        Self(Mutex::new(instant))
    }

    /// Move the clock forward.
    pub fn advance_millis(&self, millis: i64) {
        *lock(&self.0) += TimeDelta::milliseconds(millis);
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    records: LocalRecords,
    theme: Theme,
    reset_slots: Vec<String>,
    saves: usize,
    fail_writes: bool,
}

/// Local store kept in memory, with switchable write failures.
#[derive(Debug, Default)]
pub struct InMemoryLocalStore(Mutex<StoreState>);

impl InMemoryLocalStore {
    /// Store pre-populated with `records`.
    #[must_use]
    pub fn with_records(records: LocalRecords) -> Self {
        Self(Mutex::new(StoreState {
            records,
            ..StoreState::default()
        }))
    }

    /// Report `slots` as reset on the next load.
    pub fn set_reset_slots(&self, slots: &[&str]) {
        lock(&self.0).reset_slots = slots.iter().map(|slot| (*slot).to_owned()).collect();
    }

    /// Make every subsequent write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        lock(&self.0).fail_writes = fail;
    }

    /// Last persisted collections.
    #[must_use]
    pub fn saved(&self) -> LocalRecords {
        lock(&self.0).records.clone()
    }

    /// Last persisted theme.
    #[must_use]
    pub fn saved_theme(&self) -> Theme {
        lock(&self.0).theme
    }

    /// Number of successful collection writes.
    #[must_use]
    pub fn save_count(&self) -> usize {
        lock(&self.0).saves
    }
}

impl LocalStore for InMemoryLocalStore {
    fn load(&self) -> LocalSnapshot {
        let state = lock(&self.0);
        LocalSnapshot {
            records: state.records.clone(),
            theme: state.theme,
            reset_slots: state.reset_slots.clone(),
        }
    }

    fn save(&self, records: &LocalRecords) -> Result<(), LocalStoreError> {
        let mut state = lock(&self.0);
        if state.fail_writes {
            return Err(LocalStoreError::write("favorites", "quota exceeded"));
        }
        state.records = records.clone();
        state.saves += 1;
        Ok(())
    }

    fn save_theme(&self, theme: Theme) -> Result<(), LocalStoreError> {
        let mut state = lock(&self.0);
        if state.fail_writes {
            return Err(LocalStoreError::write("theme", "quota exceeded"));
        }
        state.theme = theme;
        Ok(())
    }
}

/// Notifier that keeps every notice.
#[derive(Debug, Default)]
pub struct RecordingNotifier(Mutex<Vec<(NoticeKind, String)>>);

impl RecordingNotifier {
    /// Notices in emission order.
    #[must_use]
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        lock(&self.0).clone()
    }

    /// Most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<(NoticeKind, String)> {
        lock(&self.0).last().cloned()
    }

    /// Forget recorded notices.
    pub fn clear(&self) {
        lock(&self.0).clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        lock(&self.0).push((kind, message.to_owned()));
    }
}

/// Latest frame of each view seen by a [`RecordingRenderer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFrames {
    /// Users and favourites from the last users render.
    pub users: Option<(Vec<User>, Favorites)>,
    /// Cards from the last posts render.
    pub posts: Option<Vec<PostCard>>,
    /// Post id and comments from the last comments render.
    pub comments: Option<(PostId, Vec<Comment>)>,
    /// Last summary.
    pub summary: Option<Summary>,
}

/// Renderer that records the latest frame of each view.
#[derive(Debug, Default)]
pub struct RecordingRenderer(Mutex<RenderedFrames>);

impl RecordingRenderer {
    /// Latest frames.
    #[must_use]
    pub fn frames(&self) -> RenderedFrames {
        lock(&self.0).clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render_users(&self, users: &[User], favorites: &Favorites) {
        lock(&self.0).users = Some((users.to_vec(), favorites.clone()));
    }

    fn render_posts(&self, posts: &[PostCard]) {
        lock(&self.0).posts = Some(posts.to_vec());
    }

    fn render_comments(&self, post_id: PostId, comments: &[Comment]) {
        lock(&self.0).comments = Some((post_id, comments.to_vec()));
    }

    fn render_summary(&self, summary: &Summary) {
        lock(&self.0).summary = Some(*summary);
    }
}

/// Remote endpoint selector for [`StubRemoteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/users`.
    Users,
    /// `/posts`.
    Posts,
    /// `/comments`.
    Comments,
}

#[derive(Debug, Default)]
struct RemoteState {
    snapshot: RemoteSnapshot,
    failing: Option<Endpoint>,
}

/// Remote source serving a fixed snapshot, optionally failing one endpoint.
#[derive(Debug, Default)]
pub struct StubRemoteSource(Mutex<RemoteState>);

impl StubRemoteSource {
    /// Serve `snapshot`.
    #[must_use]
    pub const fn serving(snapshot: RemoteSnapshot) -> Self {
        Self(Mutex::new(RemoteState {
            snapshot,
            failing: None,
        }))
    }

    /// Replace the served snapshot.
    pub fn set_snapshot(&self, snapshot: RemoteSnapshot) {
        lock(&self.0).snapshot = snapshot;
    }

    /// Fail `endpoint`, or nothing when `None`.
    pub fn set_failing(&self, endpoint: Option<Endpoint>) {
        lock(&self.0).failing = endpoint;
    }

    fn check(&self, endpoint: Endpoint) -> Result<(), RemoteSourceError> {
        if lock(&self.0).failing == Some(endpoint) {
            return Err(RemoteSourceError::status(503_u16, "service unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteSource for StubRemoteSource {
    async fn fetch_users(&self) -> Result<Vec<User>, RemoteSourceError> {
        self.check(Endpoint::Users)?;
        Ok(lock(&self.0).snapshot.users.clone())
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, RemoteSourceError> {
        self.check(Endpoint::Posts)?;
        Ok(lock(&self.0).snapshot.posts.clone())
    }

    async fn fetch_comments(&self) -> Result<Vec<Comment>, RemoteSourceError> {
        self.check(Endpoint::Comments)?;
        Ok(lock(&self.0).snapshot.comments.clone())
    }
}

#[derive(Debug)]
struct GateState {
    answers: VecDeque<bool>,
    fallback: bool,
    prompts: Vec<String>,
}

/// Confirmation gate answering from a script, then with a fallback.
#[derive(Debug)]
pub struct ScriptedGate(Mutex<GateState>);

impl Default for ScriptedGate {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl ScriptedGate {
    /// Gate that always answers `answer`.
    #[must_use]
    pub const fn answering(answer: bool) -> Self {
        Self(Mutex::new(GateState {
            answers: VecDeque::new(),
            fallback: answer,
            prompts: Vec::new(),
        }))
    }

    /// Queue one answer ahead of the fallback.
    pub fn push_answer(&self, answer: bool) {
        lock(&self.0).answers.push_back(answer);
    }

    /// Change the fallback answer.
    pub fn set_fallback(&self, answer: bool) {
        lock(&self.0).fallback = answer;
    }

    /// Prompts asked so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.0).prompts.clone()
    }
}

impl ConfirmationGate for ScriptedGate {
    fn confirm(&self, prompt: &str) -> bool {
        let mut state = lock(&self.0);
        state.prompts.push(prompt.to_owned());
        let fallback = state.fallback;
        state.answers.pop_front().unwrap_or(fallback)
    }
}

/// Concrete doubles wired into a [`DashboardPorts`] bundle.
#[derive(Debug, Clone)]
pub struct Harness {
    /// Remote double.
    pub remote: Arc<StubRemoteSource>,
    /// Store double.
    pub store: Arc<InMemoryLocalStore>,
    /// Notifier double.
    pub notifier: Arc<RecordingNotifier>,
    /// Renderer double.
    pub renderer: Arc<RecordingRenderer>,
    /// Confirmation double.
    pub gate: Arc<ScriptedGate>,
    /// Clock shared with the id allocator.
    pub clock: Arc<FixedClock>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(sample_remote(), LocalRecords::default())
    }
}

impl Harness {
    /// Clock start used by every harness.
    pub const START_MILLIS: i64 = 1_700_000_000_000;

    /// Harness serving `remote` with `local` already persisted.
    #[must_use]
    pub fn new(remote: RemoteSnapshot, local: LocalRecords) -> Self {
        Self {
            remote: Arc::new(StubRemoteSource::serving(remote)),
            store: Arc::new(InMemoryLocalStore::with_records(local)),
            notifier: Arc::new(RecordingNotifier::default()),
            renderer: Arc::new(RecordingRenderer::default()),
            gate: Arc::new(ScriptedGate::default()),
            clock: Arc::new(FixedClock::at_millis(Self::START_MILLIS)),
        }
    }

    /// Port bundle backed by the doubles.
    #[must_use]
    pub fn ports(&self) -> DashboardPorts {
        DashboardPorts {
            remote: Arc::clone(&self.remote) as Arc<dyn RemoteSource>,
            store: Arc::clone(&self.store) as Arc<dyn LocalStore>,
            notifier: Arc::clone(&self.notifier) as Arc<dyn Notifier>,
            renderer: Arc::clone(&self.renderer) as Arc<dyn Renderer>,
            gate: Arc::clone(&self.gate) as Arc<dyn ConfirmationGate>,
        }
    }

    /// Open an unloaded dashboard over the doubles.
    #[must_use]
    pub fn open(&self, policy: MergePolicy) -> Dashboard {
        Dashboard::open(self.ports(), Arc::clone(&self.clock) as Arc<dyn Clock>, policy)
    }

    /// Open a dashboard and run one load on a current-thread runtime.
    ///
    /// # Panics
    ///
    /// Panics when the runtime cannot be built.
    #[must_use]
    pub fn loaded(&self, policy: MergePolicy) -> Dashboard {
        let mut dashboard = self.open(policy);
        block_on(dashboard.load());
        dashboard
    }
}

/// Drive `future` to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics when the runtime cannot be built.
pub fn block_on<F: Future>(future: F) -> F::Output {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => panic!("failed to build test runtime: {err}"),
    }
}
