//! Screen configuration.

use tasklist_runtime::StoreConfig;

/// Policy the add input applies to a title before submitting it
///
/// # Example
///
/// ```
/// use tasklist::config::TitlePolicy;
///
/// let policy = TitlePolicy::default().with_max_chars(None);
/// assert!(policy.trim);
/// assert!(policy.reject_empty);
/// assert_eq!(policy.max_chars, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitlePolicy {
    /// Strip leading and trailing whitespace
    pub trim: bool,
    /// Refuse titles that are empty (after trimming, if enabled)
    pub reject_empty: bool,
    /// Refuse titles longer than this many characters
    pub max_chars: Option<usize>,
}

impl TitlePolicy {
    /// Submit every title exactly as typed
    #[must_use]
    pub const fn accept_all() -> Self {
        Self {
            trim: false,
            reject_empty: false,
            max_chars: None,
        }
    }

    /// Set whether titles are trimmed
    #[must_use]
    pub const fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether empty titles are refused
    #[must_use]
    pub const fn with_reject_empty(mut self, reject_empty: bool) -> Self {
        self.reject_empty = reject_empty;
        self
    }

    /// Set the maximum title length in characters
    #[must_use]
    pub const fn with_max_chars(mut self, max_chars: Option<usize>) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl Default for TitlePolicy {
    fn default() -> Self {
        Self {
            trim: true,
            reject_empty: true,
            max_chars: Some(500),
        }
    }
}

/// Configuration for a mounted [`Screen`](crate::view::Screen)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Policy applied by the add input
    pub title_policy: TitlePolicy,
    /// Configuration of the underlying store
    pub store: StoreConfig,
}

impl ScreenConfig {
    /// Set the title policy
    #[must_use]
    pub const fn with_title_policy(mut self, policy: TitlePolicy) -> Self {
        self.title_policy = policy;
        self
    }

    /// Set the store configuration
    #[must_use]
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            title_policy: TitlePolicy::default(),
            store: StoreConfig::default().with_name("tasks"),
        }
    }
}
