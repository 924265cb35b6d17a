use crate::models::SubcategoryLink;
use crate::{CrawlError, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::ffi::{OsStr, OsString};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub trait PageRenderer {
    /// Loads `url` and returns the markup as it stands after client-side rendering.
    fn render(&mut self, url: &str) -> Result<String>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub user_agent: String,
    pub headless: bool,
    /// Flat wait after navigation; no readiness signal is polled.
    pub settle_delay: Duration,
}

/// One headless Chrome process with a single tab, reused for every page it renders.
pub struct ChromeRenderer {
    _browser: Browser,
    tab: Arc<Tab>,
    settle_delay: Duration,
}

impl ChromeRenderer {
    pub fn launch(options: &RenderOptions) -> Result<Self> {
        let browser = Self::create_browser(options)?;
        let tab = browser
            .new_tab()
            .map_err(|e| CrawlError::Session(e.to_string()))?;

        Ok(Self {
            _browser: browser,
            tab,
            settle_delay: options.settle_delay,
        })
    }

    fn create_browser(options: &RenderOptions) -> Result<Browser> {
        let user_agent = OsString::from(format!("--user-agent={}", options.user_agent));

        Browser::new(LaunchOptions {
            headless: options.headless,
            args: vec![
                user_agent.as_os_str(),
                OsStr::new("--disable-blink-features=AutomationControlled"),
            ],
            // the browser sits idle while category pages are fetched over plain HTTP
            idle_browser_timeout: Duration::from_secs(300),
            ..Default::default()
        })
        .map_err(|e| CrawlError::Session(e.to_string()))
    }
}

impl PageRenderer for ChromeRenderer {
    fn render(&mut self, url: &str) -> Result<String> {
        let render_error = |e: &dyn std::fmt::Display| CrawlError::Render {
            url: url.to_string(),
            message: e.to_string(),
        };

        self.tab.navigate_to(url).map_err(|e| render_error(&e))?;
        std::thread::sleep(self.settle_delay);
        self.tab.get_content().map_err(|e| render_error(&e))
    }

    fn close(&mut self) -> Result<()> {
        self.tab
            .close(true)
            .map(|_| ())
            .map_err(|e| CrawlError::Session(e.to_string()))
    }
}

/// Render sessions owned for the length of a crawl, one per worker thread.
///
/// With a single session branches render sequentially in document order. With
/// more, a rayon pool of the same size renders them concurrently and each
/// worker only ever touches the session at its own thread index.
pub struct SessionPool<R> {
    sessions: Vec<Mutex<R>>,
    pool: ThreadPool,
}

impl<R> SessionPool<R>
where
    R: PageRenderer + Send,
{
    pub fn new(sessions: Vec<R>) -> Result<Self> {
        if sessions.is_empty() {
            return Err(CrawlError::Session(
                "session pool needs at least one session".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(sessions.len())
            .build()?;

        Ok(Self {
            sessions: sessions.into_iter().map(Mutex::new).collect(),
            pool,
        })
    }

    pub fn single(session: R) -> Result<Self> {
        Self::new(vec![session])
    }

    pub fn launch_with<F>(count: usize, mut launch: F) -> Result<Self>
    where
        F: FnMut() -> Result<R>,
    {
        let sessions = (0..count.max(1))
            .map(|_| launch())
            .collect::<Result<Vec<_>>>()?;
        Self::new(sessions)
    }

    /// Runs `work` once per branch; results come back in branch order.
    pub fn map_branches<T, F>(&self, branches: &[SubcategoryLink], work: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&mut R, &SubcategoryLink) -> T + Sync,
    {
        let sessions = &self.sessions;

        self.pool.install(|| {
            branches
                .par_iter()
                .map(|branch| {
                    let thread_idx = rayon::current_thread_index().unwrap_or(0) % sessions.len();
                    let mut session = sessions[thread_idx]
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    work(&mut session, branch)
                })
                .collect()
        })
    }

    /// Closes every session. Dropping the pool without calling this still
    /// tears the browsers down.
    pub fn release(self) {
        for (idx, session) in self.sessions.into_iter().enumerate() {
            let mut session = session.into_inner().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = session.close() {
                tracing::warn!("❌ failed to close render session {}: {}", idx, e);
            }
        }
        tracing::info!("render sessions released");
    }
}
