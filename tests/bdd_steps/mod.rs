//! Step definitions for the Cucumber step-binding suite.

mod editor_steps;
