//! Steps covering the integration editor and the integrations list.

use std::sync::Arc;

use crate::{
    error::{Result, StepError},
    pattern::Captures,
    registry::StepRegistry,
    world::StepWorld,
};

/// Pattern for naming the integration being edited.
pub const DEFINE_NAME: &str = r#"(?:she )?defines integration name "([^"]*)""#;
/// Pattern asserting the editor is on screen.
pub const EDITOR_PRESENTED: &str = "she is presented with a visual integration editor";
/// Pattern choosing an action from the action list.
pub const SELECT_ACTION: &str = r#"she selects "([^"]*)" integration action"#;
/// Pattern asserting an integration is listed.
pub const INTEGRATION_PRESENT: &str = r#"Integration "([^"]*)" is present in integrations list"#;

/// Failure message when the editor never appears.
pub const EDITOR_MISSING: &str = "there must be edit page root element";

/// Register the integration steps on `registry`.
///
/// # Errors
///
/// Returns an error if any of these patterns is already registered.
pub fn register(registry: StepRegistry<StepWorld>) -> Result<StepRegistry<StepWorld>> {
    registry
        .when(DEFINE_NAME, define_integration_name)?
        .then(EDITOR_PRESENTED, editor_opened)?
        .when(SELECT_ACTION, select_integration_action)?
        .then(INTEGRATION_PRESENT, expect_integration_present)
}

async fn define_integration_name(world: Arc<StepWorld>, mut captures: Captures) -> Result<()> {
    let name = captures.take(0)?;
    if name.is_empty() {
        return Err(StepError::InvalidArgument {
            name: "integration name",
            reason: "must not be empty",
        });
    }
    world
        .integration_edit_page()
        .basics_component()
        .set_name(&name)
        .await?;
    Ok(())
}

async fn editor_opened(world: Arc<StepWorld>, _captures: Captures) -> Result<()> {
    let page = world.integration_edit_page();
    let root = page.root_element();
    world
        .eventually()
        .assert_true(|| root.is_present(), EDITOR_MISSING)
        .await
}

async fn select_integration_action(world: Arc<StepWorld>, captures: Captures) -> Result<()> {
    let action = captures.get(0)?;
    world.list_actions().select_action(action).await?;
    Ok(())
}

async fn expect_integration_present(world: Arc<StepWorld>, captures: Captures) -> Result<()> {
    let name = captures.get(0)?;
    tracing::info!("Verifying integration {name} is present");
    let list = world.integrations_list_page().list_component();
    world
        .eventually()
        .assert_true(
            || list.is_integration_present(name),
            format!("Integration {name} must be present"),
        )
        .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::{fixture, rstest};
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        driver::DriverError,
        eventually::Eventually,
        page::edit::{ACTION_TITLES, EDIT_PAGE_ROOT, NAME_INPUT},
        page::list::INTEGRATION_NAMES,
        test_helpers::FakeBrowser,
    };

    struct Harness {
        browser: FakeBrowser,
        world: Arc<StepWorld>,
        registry: StepRegistry<StepWorld>,
    }

    impl Harness {
        async fn run(&self, text: &str) -> Result<()> {
            self.registry.dispatch(self.world.clone(), text).await
        }
    }

    #[fixture]
    fn harness() -> Harness {
        let browser = FakeBrowser::new();
        browser.render(NAME_INPUT, [""]);
        let world = StepWorld::new(Arc::new(browser.clone())).with_eventually(
            Eventually::default()
                .with_timeout(Duration::from_secs(2))
                .with_interval(Duration::from_millis(50)),
        );
        let registry = register(StepRegistry::new()).expect("steps register");
        Harness {
            browser,
            world: Arc::new(world),
            registry,
        }
    }

    #[rstest]
    #[case(r#"defines integration name "Twitter Sync""#)]
    #[case(r#"she defines integration name "Twitter Sync""#)]
    #[tokio::test]
    async fn defines_integration_name(harness: Harness, #[case] text: &str) {
        harness.run(text).await.expect("step passes");
        assert_eq!(harness.browser.value(NAME_INPUT).as_deref(), Some("Twitter Sync"));
    }

    #[rstest]
    #[tokio::test]
    async fn last_name_wins(harness: Harness) {
        harness.run(r#"defines integration name "X""#).await.expect("first");
        harness.run(r#"defines integration name "X""#).await.expect("second");
        assert_eq!(harness.browser.value(NAME_INPUT).as_deref(), Some("X"));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_name_is_rejected(harness: Harness) {
        let err = harness
            .run(r#"defines integration name """#)
            .await
            .expect_err("empty name");
        assert!(matches!(err, StepError::InvalidArgument { .. }));
        assert_eq!(harness.browser.calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_name_field_is_propagated(harness: Harness) {
        harness.browser.remove(NAME_INPUT);
        let err = harness
            .run(r#"defines integration name "Twitter Sync""#)
            .await
            .expect_err("field missing");
        assert!(matches!(err, StepError::Driver(DriverError::ElementNotFound(_))));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn editor_presented_waits_for_root(harness: Harness) {
        harness
            .browser
            .render_after(EDIT_PAGE_ROOT, [""], Duration::from_millis(700));
        harness
            .run(EDITOR_PRESENTED)
            .await
            .expect("editor appears in time");
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn editor_missing_fails_with_message(harness: Harness) {
        let err = harness.run(EDITOR_PRESENTED).await.expect_err("no editor");
        assert_eq!(err.to_string(), EDITOR_MISSING);
    }

    #[rstest]
    #[tokio::test]
    async fn selects_listed_action(harness: Harness) {
        harness
            .browser
            .render(ACTION_TITLES, ["Search tweets", "Post a tweet"]);
        harness
            .run(r#"she selects "Post a tweet" integration action"#)
            .await
            .expect("action selected");
        assert_eq!(harness.browser.clicks(), vec![(ACTION_TITLES.to_owned(), 1)]);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_action_is_not_success(harness: Harness) {
        harness.browser.render(ACTION_TITLES, ["Search tweets"]);
        let err = harness
            .run(r#"she selects "Post a tweet" integration action"#)
            .await
            .expect_err("action missing");
        assert!(matches!(err, StepError::Driver(DriverError::ElementNotFound(_))));
    }

    #[rstest]
    #[traced_test]
    #[tokio::test(start_paused = true)]
    async fn integration_present_logs_and_passes(harness: Harness) {
        harness.browser.render(INTEGRATION_NAMES, ["Twitter Sync"]);
        harness
            .run(r#"Integration "Twitter Sync" is present in integrations list"#)
            .await
            .expect("integration listed");
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("Verifying integration Twitter Sync is present"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one verification line, found {n}")),
            }
        });
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn integration_absent_fails_with_name(harness: Harness) {
        harness.browser.render(INTEGRATION_NAMES, ["Salesforce Upsert"]);
        let err = harness
            .run(r#"Integration "Twitter Sync" is present in integrations list"#)
            .await
            .expect_err("integration missing");
        assert_eq!(err.to_string(), "Integration Twitter Sync must be present");
    }

    #[rstest]
    #[tokio::test]
    async fn session_failure_reaches_completion(harness: Harness) {
        harness.browser.break_session("browser crashed");
        let err = harness
            .run(r#"she selects "Post a tweet" integration action"#)
            .await
            .expect_err("session broken");
        assert!(matches!(err, StepError::Driver(DriverError::Session(_))));
    }
}
