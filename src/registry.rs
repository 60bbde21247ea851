//! Ordered table of step definitions.
//!
//! `StepRegistry` stores `(pattern, handler)` pairs in registration order and
//! resolves a line of step text to exactly one of them. Methods return
//! [`Result<Self>`] so registrations can be chained ergonomically.

use std::{future::Future, sync::Arc};

use futures::future::BoxFuture;
use tracing::Instrument;

use crate::{
    completion::{Completion, completion},
    error::{Result, StepError},
    feature::Keyword,
    pattern::{Captures, StepPattern},
};

/// Alias for boxed asynchronous step handlers.
///
/// A handler receives the shared world and the captured arguments and
/// resolves to the step outcome.
pub type Handler<W> = Arc<dyn Fn(Arc<W>, Captures) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// One registered step.
pub struct StepDefinition<W> {
    keyword: Keyword,
    pattern: StepPattern,
    handler: Handler<W>,
}

impl<W> StepDefinition<W> {
    /// Keyword the step was registered under.
    #[must_use]
    pub fn keyword(&self) -> Keyword { self.keyword }

    /// The step's pattern.
    #[must_use]
    pub fn pattern(&self) -> &StepPattern { &self.pattern }

    /// Invoke the handler with `world` and `captures`.
    pub fn call(&self, world: Arc<W>, captures: Captures) -> BoxFuture<'static, Result<()>> {
        (self.handler)(world, captures)
    }
}

impl<W> std::fmt::Debug for StepDefinition<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("keyword", &self.keyword)
            .field("pattern", &self.pattern.source())
            .finish_non_exhaustive()
    }
}

/// Registry of step definitions for world type `W`.
pub struct StepRegistry<W> {
    definitions: Vec<StepDefinition<W>>,
}

impl<W> Default for StepRegistry<W> {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }
}

impl<W> std::fmt::Debug for StepRegistry<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.definitions).finish()
    }
}

impl<W> StepRegistry<W>
where
    W: Send + Sync + 'static,
{
    /// Construct an empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Register `handler` for text matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::DuplicatePattern`] if the same pattern source is
    /// already registered, or [`StepError::InvalidPattern`] if it does not
    /// compile.
    pub fn step<F, Fut>(mut self, keyword: Keyword, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Arc<W>, Captures) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        if self
            .definitions
            .iter()
            .any(|def| def.pattern.source() == pattern)
        {
            return Err(StepError::DuplicatePattern(pattern.to_owned()));
        }
        let pattern = StepPattern::new(pattern)?;
        let boxed: Handler<W> = Arc::new(move |world: Arc<W>, captures: Captures| {
            Box::pin(handler(world, captures)) as BoxFuture<'static, Result<()>>
        });
        self.definitions.push(StepDefinition {
            keyword,
            pattern,
            handler: boxed,
        });
        Ok(self)
    }

    /// Register a `Given` step.
    ///
    /// # Errors
    ///
    /// See [`StepRegistry::step`].
    pub fn given<F, Fut>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Arc<W>, Captures) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.step(Keyword::Given, pattern, handler)
    }

    /// Register a `When` step.
    ///
    /// # Errors
    ///
    /// See [`StepRegistry::step`].
    pub fn when<F, Fut>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Arc<W>, Captures) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.step(Keyword::When, pattern, handler)
    }

    /// Register a `Then` step.
    ///
    /// # Errors
    ///
    /// See [`StepRegistry::step`].
    pub fn then<F, Fut>(self, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Arc<W>, Captures) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.step(Keyword::Then, pattern, handler)
    }

    /// Registered definitions in registration order.
    #[must_use]
    pub fn definitions(&self) -> &[StepDefinition<W>] { &self.definitions }

    /// Resolve `text` to its single matching definition.
    ///
    /// Keywords do not take part in matching.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Undefined`] when nothing matches and
    /// [`StepError::Ambiguous`] when more than one definition matches.
    pub fn find(&self, text: &str) -> Result<(&StepDefinition<W>, Captures)> {
        let mut matches = self
            .definitions
            .iter()
            .filter_map(|def| def.pattern.captures(text).map(|caps| (def, caps)));
        let Some(first) = matches.next() else {
            return Err(StepError::Undefined(text.to_owned()));
        };
        let rest: Vec<_> = matches.collect();
        if rest.is_empty() {
            return Ok(first);
        }
        Err(StepError::Ambiguous {
            text: text.to_owned(),
            patterns: std::iter::once(&first)
                .chain(rest.iter())
                .map(|(def, _)| def.pattern.source().to_owned())
                .collect(),
        })
    }

    /// Run the step matching `text` against `world`.
    ///
    /// The handler runs on its own task inside the current span; the returned
    /// [`Completion`] resolves exactly once with its outcome. Matching
    /// failures resolve the completion immediately without spawning.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, world: Arc<W>, text: &str) -> Completion {
        let (definition, captures) = match self.find(text) {
            Ok(found) => found,
            Err(error) => return Completion::ready(Err(error)),
        };
        let fut = definition.call(world, captures);
        let (signal, done) = completion();
        tokio::spawn(
            async move {
                signal.resolve(fut.await);
            }
            .instrument(tracing::Span::current()),
        );
        done
    }
}
