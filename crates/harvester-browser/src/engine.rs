use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use crate::session::{Session, SessionProvider};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use harvester_core::config::BrowserConfig as SessionSettings;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Interval between DOM polls while waiting for a selector
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// One Chrome process driving a single page.
///
/// Each session owns a private profile directory, removed again on close.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    profile_dir: Option<PathBuf>,
}

impl ChromeSession {
    /// Launch a new browser process with the given fingerprint
    pub async fn launch(settings: &SessionSettings, fingerprint: &FingerprintConfig) -> Result<Self> {
        let profile_dir =
            std::env::temp_dir().join(format!("harvester-session-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&profile_dir)
            .map_err(|e| BrowserError::LaunchError(format!("profile dir: {e}")))?;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .viewport(None)
            .user_data_dir(&profile_dir)
            .args(fingerprint.launch_args());
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &settings.chrome_executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(BrowserError::LaunchError)?;

        let (mut browser, mut handler) = match Browser::launch(config).await {
            Ok(launched) => launched,
            Err(e) => {
                remove_profile_dir(&profile_dir);
                return Err(BrowserError::LaunchError(e.to_string()));
            }
        };

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                // Handle events if needed
                let _ = event;
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler.abort();
                remove_profile_dir(&profile_dir);
                return Err(BrowserError::ChromiumError(e.to_string()));
            }
        };

        tracing::debug!("Launched browser session in {}", profile_dir.display());

        Ok(Self {
            browser,
            page,
            handler,
            profile_dir: Some(profile_dir),
        })
    }
}

#[async_trait::async_trait]
impl Session for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                tracing::trace!("{} appeared after {:?}", selector, start.elapsed());
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(BrowserError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        self.page
            .find_elements(selector)
            .await
            .map(|elements| elements.len())
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn close(mut self: Box<Self>) -> Result<()> {
        let closed = self.browser.close().await;
        // Reap the child before deleting its profile
        let _ = self.browser.wait().await;
        self.handler.abort();
        if let Some(dir) = self.profile_dir.take() {
            remove_profile_dir(&dir);
        }
        closed
            .map(|_| ())
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Browser::drop kills the Chrome process
        self.handler.abort();
        if let Some(dir) = self.profile_dir.take() {
            tracing::warn!("Browser session dropped without close, removing {}", dir.display());
            remove_profile_dir(&dir);
        }
    }
}

fn remove_profile_dir(dir: &Path) {
    if let Err(e) = std::fs::remove_dir_all(dir) {
        tracing::warn!("Failed to remove session profile {}: {}", dir.display(), e);
    }
}

/// Launches one fresh [`ChromeSession`] per acquisition.
#[derive(Debug, Clone)]
pub struct ChromeSessionProvider {
    settings: SessionSettings,
}

impl ChromeSessionProvider {
    pub fn new(settings: SessionSettings) -> Self {
        Self { settings }
    }

    fn fingerprint(&self) -> FingerprintConfig {
        if self.settings.randomize_fingerprint {
            FingerprintConfig::randomized()
        } else {
            FingerprintConfig::fixed(self.settings.window_width, self.settings.window_height)
        }
    }
}

#[async_trait::async_trait]
impl SessionProvider for ChromeSessionProvider {
    async fn acquire(&self) -> Result<Box<dyn Session>> {
        let session = ChromeSession::launch(&self.settings, &self.fingerprint()).await?;
        Ok(Box::new(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_fingerprint_follows_settings() {
        let settings = SessionSettings {
            randomize_fingerprint: false,
            window_width: 1280,
            window_height: 720,
            ..SessionSettings::default()
        };
        let provider = ChromeSessionProvider::new(settings);
        let fingerprint = provider.fingerprint();
        assert_eq!(fingerprint.viewport_width, 1280);
        assert_eq!(fingerprint.viewport_height, 720);
    }

    #[test]
    fn test_poll_interval_is_short() {
        const _: () = assert!(POLL_INTERVAL.as_millis() <= 500);
    }
}
