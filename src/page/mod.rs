//! Page objects for the integration editor UI.
//!
//! Page objects are cheap views over a borrowed [`UiDriver`]. They are built
//! fresh for every step through [`crate::world::StepWorld`] and never outlive
//! it.

/// `Debug` for driver-backed views, which have no state worth printing.
macro_rules! impl_page_debug {
    ($($ty:ident),+) => {
        $(impl std::fmt::Debug for $ty<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($ty)).finish_non_exhaustive()
            }
        })+
    };
}

pub mod edit;
pub mod list;

pub use edit::{BasicsComponent, IntegrationEditPage, ListActionsComponent};
pub use list::{IntegrationsListComponent, IntegrationsListPage};

use crate::driver::{DriverResult, Locator, UiDriver};

/// A single located element whose presence can be queried.
#[derive(Clone, Copy)]
pub struct PageElement<'a> {
    driver: &'a dyn UiDriver,
    selector: &'static str,
}

impl<'a> PageElement<'a> {
    pub(crate) fn new(driver: &'a dyn UiDriver, selector: &'static str) -> Self {
        Self { driver, selector }
    }

    /// Locator of the element.
    #[must_use]
    pub fn locator(&self) -> Locator { Locator::css(self.selector) }

    /// Whether the element is currently rendered.
    ///
    /// # Errors
    ///
    /// Propagates driver failures.
    pub async fn is_present(&self) -> DriverResult<bool> {
        self.driver.is_present(&self.locator()).await
    }
}

impl std::fmt::Debug for PageElement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageElement")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}
