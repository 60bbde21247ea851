#![cfg(any(test, feature = "test-helpers"))]
//! Test-only helpers for shared test utilities.
//!
//! [`FakeBrowser`] is an in-memory [`UiDriver`]: tests render elements under
//! CSS selectors, optionally with a delay, and inspect the values typed and
//! the clicks performed by page objects.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::driver::{BrowserSession, DriverError, DriverResult, Locator, UiDriver};

#[derive(Clone, Debug, Default)]
struct FakeElement {
    text: String,
    value: String,
}

#[derive(Debug, Default)]
struct State {
    elements: HashMap<String, Vec<FakeElement>>,
    pending: Vec<(Instant, String, Vec<FakeElement>)>,
    clicks: Vec<(String, usize)>,
    visited: Vec<String>,
    quits: usize,
    calls: usize,
    broken: Option<String>,
}

impl State {
    fn promote_due(&mut self) {
        let now = Instant::now();
        let (due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|(at, ..)| *at <= now);
        self.pending = waiting;
        for (_, selector, elements) in due {
            self.elements.insert(selector, elements);
        }
    }

    fn check_session(&mut self) -> DriverResult<()> {
        self.calls += 1;
        self.promote_due();
        match &self.broken {
            Some(message) => Err(DriverError::Session(message.clone())),
            None => Ok(()),
        }
    }

    fn matching(&self, locator: &Locator) -> &[FakeElement] {
        self.elements
            .get(locator.selector())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Cloneable in-memory browser; clones share one page.
#[derive(Clone, Debug, Default)]
pub struct FakeBrowser {
    state: Arc<Mutex<State>>,
}

fn elements<I, S>(texts: I) -> Vec<FakeElement>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .map(|text| FakeElement {
            text: text.into(),
            value: String::new(),
        })
        .collect()
}

impl FakeBrowser {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Render one element per entry of `texts` under `selector`, replacing
    /// whatever was there.
    pub fn render<I, S>(&self, selector: &str, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock()
            .elements
            .insert(selector.to_owned(), elements(texts));
    }

    /// Render elements under `selector` once `delay` has elapsed on the tokio
    /// clock.
    pub fn render_after<I, S>(&self, selector: &str, texts: I, delay: Duration)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let at = Instant::now() + delay;
        self.lock()
            .pending
            .push((at, selector.to_owned(), elements(texts)));
    }

    /// Remove every element under `selector`.
    pub fn remove(&self, selector: &str) { self.lock().elements.remove(selector); }

    /// Make every subsequent driver call fail with a session error.
    pub fn break_session(&self, message: &str) { self.lock().broken = Some(message.to_owned()); }

    /// Value of the first element under `selector`.
    #[must_use]
    pub fn value(&self, selector: &str) -> Option<String> {
        self.lock()
            .elements
            .get(selector)
            .and_then(|found| found.first())
            .map(|element| element.value.clone())
    }

    /// Clicks performed so far as `(selector, index)` pairs.
    #[must_use]
    pub fn clicks(&self) -> Vec<(String, usize)> { self.lock().clicks.clone() }

    /// URLs opened through [`BrowserSession::goto`].
    #[must_use]
    pub fn visited(&self) -> Vec<String> { self.lock().visited.clone() }

    /// How many times the session was closed.
    #[must_use]
    pub fn quits(&self) -> usize { self.lock().quits }

    /// Number of driver calls received.
    #[must_use]
    pub fn calls(&self) -> usize { self.lock().calls }
}

#[async_trait]
impl UiDriver for FakeBrowser {
    async fn is_present(&self, locator: &Locator) -> DriverResult<bool> {
        let mut state = self.lock();
        state.check_session()?;
        Ok(!state.matching(locator).is_empty())
    }

    async fn set_text(&self, locator: &Locator, text: &str) -> DriverResult<()> {
        let mut state = self.lock();
        state.check_session()?;
        let element = state
            .elements
            .get_mut(locator.selector())
            .and_then(|found| found.first_mut())
            .ok_or_else(|| DriverError::ElementNotFound(locator.clone()))?;
        text.clone_into(&mut element.value);
        Ok(())
    }

    async fn click(&self, locator: &Locator, index: usize) -> DriverResult<()> {
        let mut state = self.lock();
        state.check_session()?;
        if index >= state.matching(locator).len() {
            return Err(DriverError::ElementNotFound(locator.clone()));
        }
        state.clicks.push((locator.selector().to_owned(), index));
        Ok(())
    }

    async fn texts(&self, locator: &Locator) -> DriverResult<Vec<String>> {
        let mut state = self.lock();
        state.check_session()?;
        Ok(state
            .matching(locator)
            .iter()
            .map(|element| element.text.clone())
            .collect())
    }
}

#[async_trait]
impl BrowserSession for FakeBrowser {
    async fn goto(&self, url: &str) -> DriverResult<()> {
        let mut state = self.lock();
        state.check_session()?;
        state.visited.push(url.to_owned());
        Ok(())
    }

    async fn quit(&self) -> DriverResult<()> {
        let mut state = self.lock();
        state.quits += 1;
        state.broken = Some("session closed".to_owned());
        Ok(())
    }
}
