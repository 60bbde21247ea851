//! Test world state for Cucumber step-binding tests.
//!
//! Wraps a [`StepHarness`] so behavioural scenarios can render a fake page,
//! dispatch bundled steps, and inspect each step's completion.

use cucumber::World;
use integration_steps::{
    StepError,
    page::{
        edit::{ACTION_TITLES, EDIT_PAGE_ROOT, NAME_INPUT},
        list::INTEGRATION_NAMES,
    },
};
use integration_steps_testing::StepHarness;

#[derive(Default, World)]
pub struct EditorWorld {
    harness: StepHarness,
    actions: Vec<String>,
    outcomes: Vec<Result<(), StepError>>,
}

impl std::fmt::Debug for EditorWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorWorld")
            .field("actions", &self.actions)
            .field("outcomes", &self.outcomes)
            .finish_non_exhaustive()
    }
}

impl EditorWorld {
    /// Render the editor root and its name input.
    pub fn render_editor(&mut self) {
        let browser = self.harness.browser();
        browser.render(EDIT_PAGE_ROOT, [""]);
        browser.render(NAME_INPUT, [""]);
    }

    /// Render the editor root once `millis` have elapsed.
    pub fn render_editor_after(&mut self, millis: u64) {
        self.harness.browser().render_after(
            EDIT_PAGE_ROOT,
            [""],
            std::time::Duration::from_millis(millis),
        );
    }

    /// Append an action to the action picker.
    pub fn list_action(&mut self, title: &str) {
        self.actions.push(title.to_owned());
        self.harness.browser().render(ACTION_TITLES, self.actions.clone());
    }

    /// Position of `title` in the action picker.
    ///
    /// # Panics
    /// Panics if `title` was never listed.
    pub fn action_index(&self, title: &str) -> usize {
        self.actions
            .iter()
            .position(|listed| listed == title)
            .unwrap_or_else(|| panic!("action {title:?} was never listed"))
    }

    /// List an integration on the integrations page.
    pub fn list_integration(&mut self, name: &str) {
        self.harness.browser().render(INTEGRATION_NAMES, [name]);
    }

    /// Dispatch `text` through the bundled registry and record its outcome.
    pub async fn run_step(&mut self, text: &str) {
        let outcome = self.harness.run(text).await;
        self.outcomes.push(outcome);
    }

    /// Assert every recorded step passed.
    ///
    /// # Panics
    /// Panics if no step ran or any step failed.
    pub fn assert_all_passed(&self) {
        assert!(!self.outcomes.is_empty(), "no step ran");
        for outcome in &self.outcomes {
            if let Err(error) = outcome {
                panic!("step failed: {error}");
            }
        }
    }

    /// The error of the most recent step.
    ///
    /// # Panics
    /// Panics if the most recent step passed or no step ran.
    pub fn last_error(&self) -> &StepError {
        match self.outcomes.last() {
            Some(Err(error)) => error,
            Some(Ok(())) => panic!("last step passed"),
            None => panic!("no step ran"),
        }
    }

    /// Current value of the integration name input.
    pub fn name_value(&self) -> Option<String> { self.harness.browser().value(NAME_INPUT) }

    /// Clicks performed on the action list.
    pub fn action_clicks(&self) -> Vec<usize> {
        self.harness
            .browser()
            .clicks()
            .into_iter()
            .filter(|(selector, _)| selector == ACTION_TITLES)
            .map(|(_, index)| index)
            .collect()
    }
}
