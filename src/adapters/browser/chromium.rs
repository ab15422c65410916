//! Headless Chromium adapter. Implements PageFetcher over CDP (chromiumoxide).
//!
//! One browser process per fetch. The whole fetch (launch, navigation, polling) runs
//! against a deadline set when the fetch starts and ending `CLOSE_ALLOWANCE` before the
//! caller's bound, so the browser is closed before the caller gives up.

use crate::domain::DomainError;
use crate::ports::PageFetcher;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Reserved at the end of the caller's bound for closing the browser.
pub const CLOSE_ALLOWANCE: Duration = Duration::from_secs(3);

/// Where the workout lives on the gym site and how to get there.
#[derive(Debug, Clone)]
pub struct WodPageScript {
    /// Visible text of the navigation link leading to the daily-workout listing.
    pub nav_link_text: String,
    /// First match is followed from the listing to today's post.
    pub post_link_selector: String,
    /// Region whose visible text is the workout.
    pub content_selector: String,
}

impl Default for WodPageScript {
    fn default() -> Self {
        Self {
            nav_link_text: "האימון היומי".to_string(),
            post_link_selector: "main a".to_string(),
            content_selector: "article".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    pub executable: Option<PathBuf>,
    /// Time allowed from the start of a fetch until the content region must be read.
    pub budget: Duration,
}

impl BrowserOptions {
    /// Options whose budget fits inside `page_timeout` with room left to close the browser.
    pub fn within(page_timeout: Duration, headless: bool, executable: Option<PathBuf>) -> Self {
        Self {
            headless,
            executable,
            budget: page_timeout.saturating_sub(CLOSE_ALLOWANCE),
        }
    }
}

/// The few page operations the WOD script needs.
#[async_trait]
pub trait ScriptedPage: Send + Sync {
    /// Href of the `nav a` whose visible text equals `text`.
    async fn nav_link_href(&self, text: &str) -> Result<Option<String>, DomainError>;

    /// Href of the first element matching `selector`.
    async fn first_link_href(&self, selector: &str) -> Result<Option<String>, DomainError>;

    async fn goto(&self, url: &str) -> Result<(), DomainError>;

    /// Visible text of the first `selector` match; `None` while it is not rendered.
    async fn region_text(&self, selector: &str) -> Result<Option<String>, DomainError>;
}

/// Nav link -> first post -> content region. Fails with `Extraction` once `deadline` passes.
pub async fn run_script(
    page: &dyn ScriptedPage,
    script: &WodPageScript,
    url: &str,
    deadline: Instant,
) -> Result<String, DomainError> {
    let listing = page
        .nav_link_href(&script.nav_link_text)
        .await?
        .ok_or_else(|| {
            DomainError::Extraction(format!(
                "navigation link {:?} not found on {}",
                script.nav_link_text, url
            ))
        })?;
    page.goto(&listing).await?;

    let post = page
        .first_link_href(&script.post_link_selector)
        .await?
        .ok_or_else(|| {
            DomainError::Extraction(format!(
                "no post link matching {:?} on {}",
                script.post_link_selector, listing
            ))
        })?;
    page.goto(&post).await?;

    wait_for_content(page, &script.content_selector, &post, deadline).await
}

/// Poll for the content region until it has text or `deadline` passes.
async fn wait_for_content(
    page: &dyn ScriptedPage,
    selector: &str,
    url: &str,
    deadline: Instant,
) -> Result<String, DomainError> {
    loop {
        match page.region_text(selector).await? {
            Some(text) if !text.trim().is_empty() => return Ok(text),
            Some(_) => debug!(selector = %selector, "content region present but empty"),
            None => debug!(selector = %selector, "content region not rendered yet"),
        }

        if Instant::now() >= deadline {
            return Err(DomainError::Extraction(format!(
                "content region {:?} not present on {}",
                selector, url
            )));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

pub struct ChromiumPageFetcher {
    options: BrowserOptions,
    script: WodPageScript,
}

impl ChromiumPageFetcher {
    pub fn new(options: BrowserOptions) -> Self {
        Self::with_script(options, WodPageScript::default())
    }

    pub fn with_script(options: BrowserOptions, script: WodPageScript) -> Self {
        Self { options, script }
    }

    async fn read_workout(
        &self,
        browser: &Browser,
        url: &str,
        deadline: Instant,
    ) -> Result<String, DomainError> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| DomainError::Extraction(format!("failed to load {}: {}", url, e)))?;
        run_script(&CdpPage(page), &self.script, url, deadline).await
    }
}

#[async_trait]
impl PageFetcher for ChromiumPageFetcher {
    async fn fetch_page_text(&self, url: &str) -> Result<String, DomainError> {
        let deadline = Instant::now() + self.options.budget;
        let not_ready = || {
            DomainError::Extraction(format!(
                "workout page {} not ready within {}s",
                url,
                self.options.budget.as_secs()
            ))
        };

        let mut session = tokio::time::timeout_at(deadline, BrowserSession::launch(&self.options))
            .await
            .map_err(|_| not_ready())??;
        let result =
            tokio::time::timeout_at(deadline, self.read_workout(&session.browser, url, deadline))
                .await
                .unwrap_or_else(|_| Err(not_ready()));
        if tokio::time::timeout(CLOSE_ALLOWANCE, session.close()).await.is_err() {
            warn!("browser close timed out; process is killed on drop");
        }
        result
    }
}

/// chromiumoxide page behind the ScriptedPage seam.
struct CdpPage(Page);

#[async_trait]
impl ScriptedPage for CdpPage {
    async fn nav_link_href(&self, text: &str) -> Result<Option<String>, DomainError> {
        link_href(&self.0, nav_link_js(text)).await
    }

    async fn first_link_href(&self, selector: &str) -> Result<Option<String>, DomainError> {
        link_href(&self.0, first_link_js(selector)).await
    }

    async fn goto(&self, url: &str) -> Result<(), DomainError> {
        debug!(url = %url, "navigating");
        self.0
            .goto(url)
            .await
            .map_err(|e| DomainError::Extraction(format!("failed to load {}: {}", url, e)))?;
        Ok(())
    }

    async fn region_text(&self, selector: &str) -> Result<Option<String>, DomainError> {
        let element = match self.0.find_element(selector).await {
            Ok(element) => element,
            Err(e) => {
                debug!(selector = %selector, error = %e, "lookup failed");
                return Ok(None);
            }
        };
        let text = element
            .inner_text()
            .await
            .map_err(|e| DomainError::Extraction(format!("reading {}: {}", selector, e)))?;
        Ok(Some(text.unwrap_or_default()))
    }
}

/// Launched browser plus its CDP event loop.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(options: &BrowserOptions) -> Result<Self, DomainError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(1440, 900);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &options.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| DomainError::Extraction(format!("browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DomainError::Extraction(format!("failed to launch browser: {}", e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(headless = options.headless, "browser launched");
        Ok(Self { browser, handler })
    }

    async fn close(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "waiting for browser exit failed");
        }
        debug!("browser closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Evaluate a snippet returning an href ("" when absent).
async fn link_href(page: &Page, js: String) -> Result<Option<String>, DomainError> {
    let href: String = page
        .evaluate(js)
        .await
        .map_err(|e| DomainError::Extraction(format!("page script failed: {}", e)))?
        .into_value()
        .map_err(|e| DomainError::Extraction(format!("unexpected script result: {}", e)))?;
    Ok(Some(href).filter(|h| !h.trim().is_empty()))
}

fn nav_link_js(text: &str) -> String {
    format!(
        r#"(() => {{
  const want = {};
  const link = Array.from(document.querySelectorAll('nav a'))
    .find(a => (a.innerText || a.textContent || '').trim() === want);
  return link ? link.href : '';
}})()"#,
        js_string(text)
    )
}

fn first_link_js(selector: &str) -> String {
    format!(
        r#"(() => {{
  const link = document.querySelector({});
  return link ? link.href : '';
}})()"#,
        js_string(selector)
    )
}

/// JSON string literals are valid JS string literals.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
