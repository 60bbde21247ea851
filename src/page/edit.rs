//! Integration editor page and its components.

use super::PageElement;
use crate::driver::{DriverError, DriverResult, Locator, UiDriver};

/// Root element of the integration editor.
pub const EDIT_PAGE_ROOT: &str = "syndesis-integrations-edit-page";
/// Name input of the basics form.
pub const NAME_INPUT: &str = "syndesis-integrations-integration-basics input[name='nameInput']";
/// Titles of the actions offered by the list-actions component.
pub const ACTION_TITLES: &str = "syndesis-list-actions .list-group-item-heading";

/// The integration editor page.
#[derive(Clone, Copy)]
pub struct IntegrationEditPage<'a> {
    driver: &'a dyn UiDriver,
}

impl<'a> IntegrationEditPage<'a> {
    /// View the editor through `driver`.
    #[must_use]
    pub fn new(driver: &'a dyn UiDriver) -> Self { Self { driver } }

    /// The editor's root element.
    #[must_use]
    pub fn root_element(&self) -> PageElement<'a> { PageElement::new(self.driver, EDIT_PAGE_ROOT) }

    /// The basics form holding the integration name.
    #[must_use]
    pub fn basics_component(&self) -> BasicsComponent<'a> {
        BasicsComponent {
            driver: self.driver,
        }
    }
}

/// Basics form of the integration editor.
#[derive(Clone, Copy)]
pub struct BasicsComponent<'a> {
    driver: &'a dyn UiDriver,
}

impl BasicsComponent<'_> {
    /// Replace the integration name with `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ElementNotFound`] when the name input is not
    /// rendered, or any other driver failure.
    pub async fn set_name(&self, name: &str) -> DriverResult<()> {
        self.driver.set_text(&Locator::css(NAME_INPUT), name).await
    }
}

/// Component listing the actions available for a connection.
#[derive(Clone, Copy)]
pub struct ListActionsComponent<'a> {
    driver: &'a dyn UiDriver,
}

impl<'a> ListActionsComponent<'a> {
    /// View the action list through `driver`.
    #[must_use]
    pub fn new(driver: &'a dyn UiDriver) -> Self { Self { driver } }

    /// Click the first action whose title equals `action`.
    ///
    /// Titles are compared after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ElementNotFound`] when no rendered action has
    /// that title.
    pub async fn select_action(&self, action: &str) -> DriverResult<()> {
        let locator = Locator::css(ACTION_TITLES);
        let titles = self.driver.texts(&locator).await?;
        let index = titles
            .iter()
            .position(|title| title.trim() == action)
            .ok_or_else(|| DriverError::ElementNotFound(locator.clone()))?;
        tracing::debug!(action, index, "selecting integration action");
        self.driver.click(&locator, index).await
    }
}

impl_page_debug!(IntegrationEditPage, BasicsComponent, ListActionsComponent);
