//! Context shared by every step of a run.
//!
//! `StepWorld` holds the browser handle and the bounded-wait timing. It is
//! immutable once built; page objects are produced fresh for each step by the
//! factory methods below and borrow the driver only for that step.

use std::sync::Arc;

use crate::{
    driver::UiDriver,
    eventually::Eventually,
    page::{IntegrationEditPage, IntegrationsListPage, ListActionsComponent},
};

/// Per-run context handed to step handlers.
#[derive(Clone)]
pub struct StepWorld {
    driver: Arc<dyn UiDriver>,
    eventually: Eventually,
}

impl StepWorld {
    /// Build a world over `driver` with default assertion timing.
    #[must_use]
    pub fn new(driver: Arc<dyn UiDriver>) -> Self {
        Self {
            driver,
            eventually: Eventually::default(),
        }
    }

    /// Replace the bounded-wait timing used by assertion steps.
    #[must_use]
    pub fn with_eventually(mut self, eventually: Eventually) -> Self {
        self.eventually = eventually.normalized();
        self
    }

    /// Timing applied by assertion steps.
    #[must_use]
    pub fn eventually(&self) -> &Eventually { &self.eventually }

    /// Borrow the underlying driver.
    #[must_use]
    pub fn driver(&self) -> &dyn UiDriver { self.driver.as_ref() }

    /// A fresh view of the integration editor.
    #[must_use]
    pub fn integration_edit_page(&self) -> IntegrationEditPage<'_> {
        IntegrationEditPage::new(self.driver())
    }

    /// A fresh view of the action list.
    #[must_use]
    pub fn list_actions(&self) -> ListActionsComponent<'_> { ListActionsComponent::new(self.driver()) }

    /// A fresh view of the integrations list page.
    #[must_use]
    pub fn integrations_list_page(&self) -> IntegrationsListPage<'_> {
        IntegrationsListPage::new(self.driver())
    }
}

impl std::fmt::Debug for StepWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepWorld")
            .field("eventually", &self.eventually)
            .finish_non_exhaustive()
    }
}
