//! Feature files flattened into runnable scenarios.
//!
//! Parsing is delegated to [`gherkin`]. The result is flattened for the
//! runner: feature and rule backgrounds are prepended to every scenario, rules
//! contribute their scenarios in file order, and every `Examples:` row of a
//! scenario outline becomes a scenario of its own with `<placeholders>`
//! substituted.

use std::fmt;

use gherkin::{GherkinEnv, StepType};
use thiserror::Error;

/// Leading keyword of a step line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `Given`
    Given,
    /// `When`
    When,
    /// `Then`
    Then,
    /// `And`
    And,
    /// `But`
    But,
    /// `*` bullet
    Star,
}

impl Keyword {
    /// Keyword as written in feature files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Star => "*",
        }
    }

    fn of(step: &gherkin::Step) -> Self {
        match step.keyword.trim() {
            "And" => Self::And,
            "But" => Self::But,
            "*" => Self::Star,
            _ => match step.ty {
                StepType::Given => Self::Given,
                StepType::When => Self::When,
                StepType::Then => Self::Then,
            },
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One step line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Keyword as written.
    pub keyword: Keyword,
    /// Text after the keyword, with outline placeholders filled in.
    pub text: String,
    /// One-based source line.
    pub line: usize,
}

impl From<&gherkin::Step> for Step {
    fn from(step: &gherkin::Step) -> Self {
        Self {
            keyword: Keyword::of(step),
            text: step.value.clone(),
            line: step.position.line,
        }
    }
}

/// A named, ordered list of steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scenario {
    /// Scenario title, with outline placeholders filled in.
    pub name: String,
    /// One-based line of the scenario header.
    pub line: usize,
    /// Steps, background first.
    pub steps: Vec<Step>,
}

/// A parsed feature file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feature {
    /// Feature title.
    pub name: String,
    /// Scenarios in file order, each already prefixed with background steps.
    pub scenarios: Vec<Scenario>,
}

/// Failure to read a feature.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The text is not valid Gherkin.
    #[error("invalid feature: {0}")]
    Syntax(#[from] gherkin::ParseError),
    /// The file parsed but yields nothing to run.
    #[error("feature declares no scenarios")]
    NoScenarios,
}

impl Feature {
    /// Parse feature text.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::Syntax`] for malformed Gherkin and
    /// [`FeatureError::NoScenarios`] when nothing would run.
    pub fn parse(source: &str) -> Result<Self, FeatureError> {
        let parsed = gherkin::Feature::parse(source, GherkinEnv::default())?;
        let background = background_steps(parsed.background.as_ref());

        let mut scenarios = Vec::new();
        for scenario in &parsed.scenarios {
            expand(scenario, &background, &mut scenarios);
        }
        for rule in &parsed.rules {
            let mut rule_background = background.clone();
            rule_background.extend(background_steps(rule.background.as_ref()));
            for scenario in &rule.scenarios {
                expand(scenario, &rule_background, &mut scenarios);
            }
        }

        if scenarios.is_empty() {
            return Err(FeatureError::NoScenarios);
        }
        Ok(Self {
            name: parsed.name,
            scenarios,
        })
    }
}

fn background_steps(background: Option<&gherkin::Background>) -> Vec<Step> {
    background
        .into_iter()
        .flat_map(|background| &background.steps)
        .map(Step::from)
        .collect()
}

/// Push `scenario` onto `out`, once per examples row for outlines.
fn expand(scenario: &gherkin::Scenario, background: &[Step], out: &mut Vec<Scenario>) {
    let own: Vec<Step> = scenario.steps.iter().map(Step::from).collect();
    let line = scenario.position.line;

    if scenario.examples.is_empty() {
        out.push(Scenario {
            name: scenario.name.clone(),
            line,
            steps: background.iter().cloned().chain(own).collect(),
        });
        return;
    }

    let tables = scenario.examples.iter().filter_map(|e| e.table.as_ref());
    for table in tables {
        let Some((header, rows)) = table.rows.split_first() else {
            continue;
        };
        for row in rows {
            let steps = own.iter().map(|step| Step {
                text: substitute(&step.text, header, row),
                ..step.clone()
            });
            out.push(Scenario {
                name: substitute(&scenario.name, header, row),
                line,
                steps: background.iter().cloned().chain(steps).collect(),
            });
        }
    }
}

fn substitute(text: &str, header: &[String], row: &[String]) -> String {
    header
        .iter()
        .zip(row)
        .fold(text.to_owned(), |acc, (name, value)| {
            acc.replace(&format!("<{name}>"), value)
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn texts(scenario: &Scenario) -> Vec<&str> {
        scenario.steps.iter().map(|s| s.text.as_str()).collect()
    }

    const FEATURE: &str = r#"@integrations
Feature: Integration editor
  Users build integrations from connections.

  Background:
    Given she is presented with a visual integration editor

  # naming
  Scenario: Name an integration
    When she defines integration name "Twitter Sync"
    And she selects "Post a tweet" integration action
    Then Integration "Twitter Sync" is present in integrations list

  Scenario: Editor only
    Then she is presented with a visual integration editor
"#;

    #[rstest]
    fn parses_scenarios_with_background() {
        let feature = Feature::parse(FEATURE).expect("feature parses");
        assert_eq!(feature.name, "Integration editor");
        assert_eq!(feature.scenarios.len(), 2);

        let first = &feature.scenarios[0];
        assert_eq!(first.name, "Name an integration");
        assert_eq!(
            texts(first),
            vec![
                "she is presented with a visual integration editor",
                r#"she defines integration name "Twitter Sync""#,
                r#"she selects "Post a tweet" integration action"#,
                r#"Integration "Twitter Sync" is present in integrations list"#,
            ]
        );
        assert_eq!(first.steps[0].line, 6);
        assert_eq!(first.steps[0].keyword, Keyword::Given);
        assert_eq!(first.steps[2].keyword, Keyword::And);
        assert_eq!(feature.scenarios[1].steps.len(), 2);
    }

    #[rstest]
    fn bullets_examples_and_outlines_each_become_scenarios() {
        let feature = Feature::parse(
            r#"Feature: Mixed blocks
  Scenario: one
    Given she is presented with a visual integration editor
    * she selects "Post" integration action

  Example: two
    Then she is presented with a visual integration editor

  Scenario Outline: three <n>
    When she defines integration name "<n>"

    Examples:
      | n |
      | a |
      | b |
"#,
        )
        .expect("feature parses");

        let names: Vec<_> = feature.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three a", "three b"]);

        let one = &feature.scenarios[0];
        assert_eq!(
            texts(one),
            vec![
                "she is presented with a visual integration editor",
                r#"she selects "Post" integration action"#,
            ]
        );
        assert_eq!(one.steps[1].keyword, Keyword::Star);
        assert_eq!(texts(&feature.scenarios[1]).len(), 1);
        assert_eq!(
            texts(&feature.scenarios[2]),
            vec![r#"she defines integration name "a""#]
        );
        assert_eq!(
            texts(&feature.scenarios[3]),
            vec![r#"she defines integration name "b""#]
        );
        assert_eq!(feature.scenarios[2].steps[0].line, 10);
    }

    #[rstest]
    fn rule_backgrounds_follow_the_feature_background() {
        let feature = Feature::parse(
            "Feature: Rules
  Background:
    Given first

  Rule: editing
    Background:
      Given second

    Scenario: inside
      Then third
",
        )
        .expect("feature parses");
        assert_eq!(feature.scenarios.len(), 1);
        assert_eq!(texts(&feature.scenarios[0]), vec!["first", "second", "third"]);
    }

    #[rstest]
    #[case("Feature: empty\n")]
    #[case("Feature: no rows\n  Scenario Outline: o <n>\n    Given <n>\n\n    Examples:\n      | n |\n")]
    fn nothing_to_run_is_an_error(#[case] source: &str) {
        assert!(matches!(Feature::parse(source), Err(FeatureError::NoScenarios)));
    }

    #[rstest]
    fn malformed_gherkin_is_a_syntax_error() {
        let err = Feature::parse("Given a step without a feature\n").expect_err("invalid");
        assert!(matches!(err, FeatureError::Syntax(_)));
    }
}
