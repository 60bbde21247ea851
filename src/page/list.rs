//! Integrations list page.

use crate::driver::{DriverResult, Locator, UiDriver};

/// Names rendered by the integrations list.
pub const INTEGRATION_NAMES: &str = "syndesis-integrations-list .list-group-item-heading";

/// Page listing every integration.
#[derive(Clone, Copy)]
pub struct IntegrationsListPage<'a> {
    driver: &'a dyn UiDriver,
}

impl<'a> IntegrationsListPage<'a> {
    /// View the list page through `driver`.
    #[must_use]
    pub fn new(driver: &'a dyn UiDriver) -> Self { Self { driver } }

    /// The list of integrations.
    #[must_use]
    pub fn list_component(&self) -> IntegrationsListComponent<'a> {
        IntegrationsListComponent {
            driver: self.driver,
        }
    }
}

/// The rendered list of integrations.
#[derive(Clone, Copy)]
pub struct IntegrationsListComponent<'a> {
    driver: &'a dyn UiDriver,
}

impl IntegrationsListComponent<'_> {
    /// Whether an integration named `name` is listed.
    ///
    /// # Errors
    ///
    /// Propagates driver failures.
    pub async fn is_integration_present(&self, name: &str) -> DriverResult<bool> {
        let names = self.driver.texts(&Locator::css(INTEGRATION_NAMES)).await?;
        Ok(names.iter().any(|listed| listed.trim() == name))
    }
}

impl_page_debug!(IntegrationsListPage, IntegrationsListComponent);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_helpers::FakeBrowser;

    #[rstest]
    #[case(&["Twitter Sync", "Salesforce Upsert"], "Twitter Sync", true)]
    #[case(&["  Twitter Sync\n"], "Twitter Sync", true)]
    #[case(&["Twitter Sync 2"], "Twitter Sync", false)]
    #[case(&[], "Twitter Sync", false)]
    #[tokio::test]
    async fn presence_matches_whole_names(
        #[case] listed: &[&str],
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        let browser = FakeBrowser::new();
        browser.render(INTEGRATION_NAMES, listed.iter().copied());
        let present = IntegrationsListPage::new(&browser)
            .list_component()
            .is_integration_present(name)
            .await
            .expect("probe");
        assert_eq!(present, expected);
    }

    #[rstest]
    fn views_debug_without_driver_state() {
        let browser = FakeBrowser::new();
        let page = IntegrationsListPage::new(&browser);
        assert_eq!(format!("{page:?}"), "IntegrationsListPage { .. }");
        assert_eq!(
            format!("{:?}", page.list_component()),
            "IntegrationsListComponent { .. }"
        );
    }
}
