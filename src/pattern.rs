//! Full-line step patterns and their captured arguments.
//!
//! Every [`StepPattern`] matches the whole step text. Authors may write a
//! pattern with or without the `^`/`$` anchors; both forms compile to the same
//! anchored expression.

use regex::Regex;

use crate::error::{Result, StepError};

/// Immutable, anchored regular expression bound to one step handler.
#[derive(Clone, Debug)]
pub struct StepPattern {
    source: String,
    regex: Regex,
}

impl StepPattern {
    /// Compile `source` as a full-line pattern.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidPattern`] if the expression does not
    /// compile.
    pub fn new(source: &str) -> Result<Self> {
        let anchored = format!("^(?:{})$", strip_anchors(source));
        let regex = Regex::new(&anchored).map_err(|source_err| StepError::InvalidPattern {
            pattern: source.to_owned(),
            source: source_err,
        })?;
        Ok(Self {
            source: source.to_owned(),
            regex,
        })
    }

    /// Pattern text as written by the step author.
    #[must_use]
    pub fn source(&self) -> &str { &self.source }

    /// Anchored expression used for matching.
    #[must_use]
    pub fn as_str(&self) -> &str { self.regex.as_str() }

    /// Return true if the pattern matches the whole of `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool { self.regex.is_match(text) }

    /// Match `text` and collect its capture groups.
    ///
    /// Groups that did not participate in the match are captured as empty
    /// strings so positional indices stay stable.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Captures> {
        let caps = self.regex.captures(text)?;
        let values = caps
            .iter()
            .skip(1)
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect();
        Some(Captures {
            pattern: self.source.clone(),
            values,
        })
    }
}

/// Normalise the original `^...$` authoring style to a bare body.
fn strip_anchors(source: &str) -> &str {
    let body = source.strip_prefix('^').unwrap_or(source);
    match body.strip_suffix('$') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => body,
    }
}

/// Arguments captured from a step sentence, in group order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captures {
    pattern: String,
    values: Vec<String>,
}

impl Captures {
    /// Number of capture groups.
    #[must_use]
    pub fn len(&self) -> usize { self.values.len() }

    /// Whether the pattern captured nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Borrow the capture at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::MissingCapture`] if the pattern has no such group.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| StepError::MissingCapture {
                pattern: self.pattern.clone(),
                index,
            })
    }

    /// Take ownership of the capture at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::MissingCapture`] if the pattern has no such group.
    pub fn take(&mut self, index: usize) -> Result<String> {
        match self.values.get_mut(index) {
            Some(value) => Ok(std::mem::take(value)),
            None => Err(StepError::MissingCapture {
                pattern: self.pattern.clone(),
                index,
            }),
        }
    }

    /// Iterate over captured values.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.values.iter().map(String::as_str) }
}
