//! In-memory timer, page, and API doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, ApiMode, AuthInfo, CsrfToken, SessionApi, VersionInfo};
use crate::clock::Timer;
use crate::page::PageBinding;

// =============================================================
// ManualTimer
// =============================================================

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct ManualTimerState {
    next_id: u64,
    pending: BTreeMap<u64, (Duration, Callback)>,
    stopped: usize,
}

/// Timer whose callbacks run only when the test fires them.
#[derive(Clone, Default)]
pub struct ManualTimer {
    state: Rc<RefCell<ManualTimerState>>,
}

impl ManualTimer {
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn pending_delays(&self) -> Vec<Duration> {
        self.state.borrow().pending.values().map(|(delay, _)| *delay).collect()
    }

    pub fn stopped(&self) -> usize {
        self.state.borrow().stopped
    }

    /// Run every pending callback; returns how many ran.
    pub fn fire_all(&self) -> usize {
        let due = std::mem::take(&mut self.state.borrow_mut().pending);
        let count = due.len();
        for (_, (_, callback)) in due {
            callback();
        }
        count
    }
}

impl Timer for ManualTimer {
    type Handle = u64;

    fn start(&mut self, delay: Duration, on_fire: Box<dyn FnOnce()>) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.pending.insert(id, (delay, on_fire));
        id
    }

    fn stop(&mut self, handle: u64) {
        let mut state = self.state.borrow_mut();
        if state.pending.remove(&handle).is_some() {
            state.stopped += 1;
        }
    }
}

// =============================================================
// RecordingPage
// =============================================================

#[derive(Debug, Default)]
pub struct PageLog {
    pub welcome: Option<String>,
    pub version: Option<String>,
    pub csrf_token: Option<String>,
    pub notices: Vec<String>,
    pub navigations: Vec<String>,
}

/// Page binding that records every mutation for later assertions.
#[derive(Clone, Default)]
pub struct RecordingPage {
    log: Rc<RefCell<PageLog>>,
}

impl RecordingPage {
    pub fn welcome(&self) -> Option<String> {
        self.log.borrow().welcome.clone()
    }

    pub fn version(&self) -> Option<String> {
        self.log.borrow().version.clone()
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.log.borrow().csrf_token.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.log.borrow().notices.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.log.borrow().navigations.clone()
    }
}

impl PageBinding for RecordingPage {
    fn show_welcome(&mut self, text: &str) {
        self.log.borrow_mut().welcome = Some(text.to_owned());
    }

    fn show_version(&mut self, version: &str) {
        self.log.borrow_mut().version = Some(version.to_owned());
    }

    fn csrf_ready(&mut self, token: &CsrfToken) {
        self.log.borrow_mut().csrf_token = Some(token.as_str().to_owned());
    }

    fn notify(&mut self, message: &str) {
        self.log.borrow_mut().notices.push(message.to_owned());
    }

    fn navigate(&mut self, path: &str) {
        self.log.borrow_mut().navigations.push(path.to_owned());
    }
}

// =============================================================
// ScriptedApi
// =============================================================

#[derive(Default)]
struct Script {
    versions: VecDeque<Result<VersionInfo, ApiError>>,
    tokens: VecDeque<Result<CsrfToken, ApiError>>,
    auth_infos: VecDeque<Result<AuthInfo, ApiError>>,
    logouts: VecDeque<Result<(), ApiError>>,
    calls: Vec<(ApiMode, Option<String>)>,
}

/// API double answering from per-operation queues.
///
/// An exhausted queue answers with a network error.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    script: Rc<RefCell<Script>>,
}

impl ScriptedApi {
    pub fn version(self, result: Result<&str, ApiError>) -> Self {
        let result = result.map(|v| VersionInfo { version: v.to_owned() });
        self.script.borrow_mut().versions.push_back(result);
        self
    }

    pub fn token(self, result: Result<&str, ApiError>) -> Self {
        let result = result.and_then(CsrfToken::parse);
        self.script.borrow_mut().tokens.push_back(result);
        self
    }

    pub fn auth_info(self, result: Result<(&str, u64), ApiError>) -> Self {
        let result = result.map(|(user, max_age)| AuthInfo { user: user.to_owned(), max_age });
        self.script.borrow_mut().auth_infos.push_back(result);
        self
    }

    pub fn logout_result(self, result: Result<(), ApiError>) -> Self {
        self.script.borrow_mut().logouts.push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<(ApiMode, Option<String>)> {
        self.script.borrow().calls.clone()
    }

    fn record(&self, mode: ApiMode, token: Option<&CsrfToken>) {
        let token = token.map(|t| t.as_str().to_owned());
        self.script.borrow_mut().calls.push((mode, token));
    }
}

fn exhausted() -> ApiError {
    ApiError::Network("script exhausted".to_owned())
}

#[async_trait(?Send)]
impl SessionApi for ScriptedApi {
    async fn fetch_version(&self) -> Result<VersionInfo, ApiError> {
        self.record(ApiMode::Version, None);
        self.script.borrow_mut().versions.pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn fetch_csrf_token(&self) -> Result<CsrfToken, ApiError> {
        self.record(ApiMode::CsrfToken, None);
        self.script.borrow_mut().tokens.pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn fetch_auth_info(&self, token: &CsrfToken) -> Result<AuthInfo, ApiError> {
        self.record(ApiMode::AuthInfo, Some(token));
        self.script.borrow_mut().auth_infos.pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn logout(&self, token: &CsrfToken) -> Result<(), ApiError> {
        self.record(ApiMode::Logout, Some(token));
        self.script.borrow_mut().logouts.pop_front().unwrap_or_else(|| Err(exhausted()))
    }
}

/// Count calls per mode, for ordering-insensitive assertions.
pub fn call_counts(calls: &[(ApiMode, Option<String>)]) -> HashMap<ApiMode, usize> {
    let mut counts = HashMap::new();
    for (mode, _) in calls {
        *counts.entry(*mode).or_insert(0) += 1;
    }
    counts
}
