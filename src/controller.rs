//! Auth session controller: bootstrap, liveness rechecks, and logout.
//!
//! States move `Bootstrapping -> Authenticated -> { Authenticated, LoggedOut }`.
//! `LoggedOut` is terminal for the page instance.
//!
//! DESIGN
//! ======
//! `Controller::handle` is the single transition function. It consumes one
//! completed [`Event`], updates the page and the session clock, and returns
//! the network [`Request`]s to issue next. It never awaits; the driver in
//! `agent` runs the requests and feeds their results back as events, so
//! every transition happens on one logical event loop.
//!
//! The CSRF token and the clock are owned here and touched only inside
//! `handle`. A recheck is only issued when the one-shot clock fires, and the
//! clock is only re-armed once that recheck's response has been processed,
//! so at most one recheck is ever in flight.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use futures::channel::mpsc::UnboundedSender;

use crate::api::{ApiError, AuthInfo, CsrfToken, SessionApi, VersionInfo};
use crate::clock::{SessionClock, Timer, recheck_delay};
use crate::config::SessionConfig;
use crate::page::{PageBinding, welcome_text};

/// Externally visible session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bootstrapping,
    Authenticated,
    LoggedOut,
}

/// Which auth-info exchange a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// The bootstrap fetch right after the CSRF token arrived.
    Initial,
    /// A liveness recheck triggered by the session clock.
    Renewal,
}

/// Inputs to the transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Version(Result<VersionInfo, ApiError>),
    CsrfToken(Result<CsrfToken, ApiError>),
    AuthInfo { check: Check, result: Result<AuthInfo, ApiError> },
    /// The session clock's one-shot timer elapsed.
    ClockFired,
    /// The user asked to log out.
    LogoutRequested,
    /// The remote logout call finished, successfully or not.
    LogoutDone(Result<(), ApiError>),
}

/// Network work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Version,
    CsrfToken,
    AuthInfo { token: CsrfToken, check: Check },
    Logout { token: CsrfToken },
}

impl Request {
    /// Perform the request and wrap its outcome as the matching event.
    pub async fn execute<A: SessionApi + ?Sized>(self, api: &A) -> Event {
        match self {
            Self::Version => Event::Version(api.fetch_version().await),
            Self::CsrfToken => Event::CsrfToken(api.fetch_csrf_token().await),
            Self::AuthInfo { token, check } => Event::AuthInfo { check, result: api.fetch_auth_info(&token).await },
            Self::Logout { token } => Event::LogoutDone(api.logout(&token).await),
        }
    }
}

enum State {
    Bootstrapping { token: Option<CsrfToken> },
    Authenticated { token: CsrfToken, user: String },
    /// Remote logout in flight; navigation follows its completion.
    LoggingOut,
    /// Navigated away.
    LoggedOut,
}

pub struct Controller<P: PageBinding, T: Timer> {
    config: SessionConfig,
    page: P,
    clock: SessionClock<T>,
    events: UnboundedSender<Event>,
    state: State,
}

impl<P: PageBinding, T: Timer> Controller<P, T> {
    /// `events` is the sender half of the loop's event channel; clock ticks
    /// are posted through it.
    pub fn new(config: SessionConfig, page: P, timer: T, events: UnboundedSender<Event>) -> Self {
        Self {
            config,
            page,
            clock: SessionClock::new(timer),
            events,
            state: State::Bootstrapping { token: None },
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Bootstrapping { .. } => Phase::Bootstrapping,
            State::Authenticated { .. } => Phase::Authenticated,
            State::LoggingOut | State::LoggedOut => Phase::LoggedOut,
        }
    }

    /// `true` once the page has navigated to the logged-out entry point.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::LoggedOut)
    }

    #[must_use]
    pub fn token(&self) -> Option<&CsrfToken> {
        match &self.state {
            State::Bootstrapping { token } => token.as_ref(),
            State::Authenticated { token, .. } => Some(token),
            State::LoggingOut | State::LoggedOut => None,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&str> {
        match &self.state {
            State::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn clock(&self) -> &SessionClock<T> {
        &self.clock
    }

    pub(crate) fn event_sender(&self) -> UnboundedSender<Event> {
        self.events.clone()
    }

    /// Begin bootstrap. Version and CSRF token are fetched independently.
    pub fn start(&mut self) -> Vec<Request> {
        self.page.show_welcome(&self.config.loading_text);
        log::info!("bootstrapping session");
        vec![Request::Version, Request::CsrfToken]
    }

    /// Apply one event and return the requests it produces.
    pub fn handle(&mut self, event: Event) -> Vec<Request> {
        match event {
            Event::Version(result) => {
                self.on_version(result);
                Vec::new()
            }
            Event::CsrfToken(result) => self.on_csrf_token(result),
            Event::AuthInfo { check: Check::Initial, result } => self.on_initial_auth_info(result),
            Event::AuthInfo { check: Check::Renewal, result } => self.on_renewal(result),
            Event::ClockFired => self.on_clock_fired(),
            Event::LogoutRequested => self.logout(),
            Event::LogoutDone(result) => {
                self.on_logout_done(result);
                Vec::new()
            }
        }
    }

    fn on_version(&mut self, result: Result<VersionInfo, ApiError>) {
        if self.phase() == Phase::LoggedOut {
            return;
        }
        match result {
            Ok(info) => self.page.show_version(&info.version),
            Err(e) => log::debug!("version unavailable: {e}"),
        }
    }

    fn on_csrf_token(&mut self, result: Result<CsrfToken, ApiError>) -> Vec<Request> {
        if !matches!(self.state, State::Bootstrapping { token: None }) {
            log::debug!("ignoring CSRF token outside bootstrap");
            return Vec::new();
        }
        match result {
            Ok(token) => {
                self.page.csrf_ready(&token);
                self.state = State::Bootstrapping { token: Some(token.clone()) };
                vec![Request::AuthInfo { token, check: Check::Initial }]
            }
            Err(e) => {
                log::warn!("CSRF token unavailable: {e}");
                self.logout()
            }
        }
    }

    fn on_initial_auth_info(&mut self, result: Result<AuthInfo, ApiError>) -> Vec<Request> {
        let State::Bootstrapping { token: Some(token) } = &self.state else {
            log::debug!("ignoring initial auth info outside bootstrap");
            return Vec::new();
        };
        match result {
            Ok(info) => {
                let token = token.clone();
                self.page.show_welcome(&welcome_text(&info.user));
                self.arm(info.max_age);
                log::info!("authenticated as {}", info.user);
                self.state = State::Authenticated { token, user: info.user };
                Vec::new()
            }
            Err(e) => {
                log::warn!("auth info unavailable during bootstrap: {e}");
                self.logout()
            }
        }
    }

    fn on_clock_fired(&mut self) -> Vec<Request> {
        match &self.state {
            State::Authenticated { token, .. } => {
                vec![Request::AuthInfo { token: token.clone(), check: Check::Renewal }]
            }
            _ => {
                log::debug!("ignoring clock tick outside an authenticated session");
                Vec::new()
            }
        }
    }

    fn on_renewal(&mut self, result: Result<AuthInfo, ApiError>) -> Vec<Request> {
        if self.phase() != Phase::Authenticated {
            log::debug!("ignoring recheck result after session ended");
            return Vec::new();
        }
        match result {
            Ok(info) => {
                self.page.show_welcome(&welcome_text(&info.user));
                self.arm(info.max_age);
                log::info!("session renewed: {} sec's left", info.max_age);
                if let State::Authenticated { user, .. } = &mut self.state {
                    *user = info.user;
                }
                Vec::new()
            }
            Err(e) if e.is_session_gone() => {
                self.clock.cancel();
                log::info!("session expired");
                self.page.notify(&self.config.expiry_notice);
                self.logout()
            }
            // The clock was consumed by the tick that issued this recheck, so
            // a sustained transient failure ends rechecking until the next
            // explicit action.
            Err(e) => {
                log::warn!("session recheck failed: {e}");
                Vec::new()
            }
        }
    }

    /// Cancel the clock and log out remotely, then navigate.
    ///
    /// Without a token there is nothing to invalidate, so navigation is
    /// immediate. Repeated calls after the first are ignored.
    fn logout(&mut self) -> Vec<Request> {
        let token = match std::mem::replace(&mut self.state, State::LoggingOut) {
            State::Bootstrapping { token } => token,
            State::Authenticated { token, .. } => Some(token),
            previous @ (State::LoggingOut | State::LoggedOut) => {
                self.state = previous;
                return Vec::new();
            }
        };
        self.clock.cancel();
        match token {
            Some(token) => vec![Request::Logout { token }],
            None => {
                self.finish();
                Vec::new()
            }
        }
    }

    fn on_logout_done(&mut self, result: Result<(), ApiError>) {
        if !matches!(self.state, State::LoggingOut) {
            return;
        }
        if let Err(e) = result {
            log::warn!("remote logout failed, session no longer usable: {e}");
        }
        self.finish();
    }

    fn finish(&mut self) {
        self.state = State::LoggedOut;
        log::info!("navigating to {}", self.config.logged_out_path);
        self.page.navigate(&self.config.logged_out_path);
    }

    fn arm(&mut self, max_age: u64) {
        let delay = recheck_delay(max_age);
        log::info!("next session check in {} sec's", delay.as_secs());
        let events = self.events.clone();
        self.clock.schedule(delay, move || {
            if events.unbounded_send(Event::ClockFired).is_err() {
                log::debug!("session loop closed; dropping clock tick");
            }
        });
    }
}
