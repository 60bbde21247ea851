//! [`UiDriver`] backed by a WebDriver session.
//!
//! Available with the `webdriver` feature. The session is opened against a
//! running WebDriver server (chromedriver, geckodriver or a Selenium grid).

use async_trait::async_trait;
use thirtyfour::prelude::*;

use crate::driver::{BrowserSession, DriverError, DriverResult, Locator, UiDriver};

fn session_error(error: impl std::fmt::Display) -> DriverError { DriverError::Session(error.to_string()) }

/// A live browser session.
#[derive(Clone, Debug)]
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Open a headless Chrome session on the WebDriver server at `server_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Session`] if the server refuses the session.
    pub async fn connect(server_url: &str) -> DriverResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless().map_err(session_error)?;
        let driver = WebDriver::new(server_url, caps)
            .await
            .map_err(session_error)?;
        tracing::info!(server_url, "webdriver session opened");
        Ok(Self { driver })
    }

    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<WebElement>> {
        match locator {
            Locator::Css(selector) => self
                .driver
                .find_all(By::Css(selector.as_str()))
                .await
                .map_err(session_error),
        }
    }

    async fn nth(&self, locator: &Locator, index: usize) -> DriverResult<WebElement> {
        self.find_all(locator)
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| DriverError::ElementNotFound(locator.clone()))
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn goto(&self, url: &str) -> DriverResult<()> {
        self.driver.goto(url).await.map_err(session_error)
    }

    async fn quit(&self) -> DriverResult<()> {
        self.driver.clone().quit().await.map_err(session_error)
    }
}

#[async_trait]
impl UiDriver for WebDriverSession {
    async fn is_present(&self, locator: &Locator) -> DriverResult<bool> {
        Ok(!self.find_all(locator).await?.is_empty())
    }

    async fn set_text(&self, locator: &Locator, text: &str) -> DriverResult<()> {
        let element = self.nth(locator, 0).await?;
        element.clear().await.map_err(session_error)?;
        element.send_keys(text).await.map_err(session_error)
    }

    async fn click(&self, locator: &Locator, index: usize) -> DriverResult<()> {
        self.nth(locator, index)
            .await?
            .click()
            .await
            .map_err(session_error)
    }

    async fn texts(&self, locator: &Locator) -> DriverResult<Vec<String>> {
        let mut texts = Vec::new();
        for element in self.find_all(locator).await? {
            texts.push(element.text().await.map_err(session_error)?);
        }
        Ok(texts)
    }
}
