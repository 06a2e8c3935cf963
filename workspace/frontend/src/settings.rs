use log::Level;
use wasm_bindgen::JsValue;
use web_sys::window;

/// User id the demo store is seeded with.
pub const DEMO_USER_ID: &str = "demo-counselor";

const KEY_STORE_URL: &str = "counsel_store_url";
const KEY_STORE_KEY: &str = "counsel_store_key";
const KEY_ACCESS_TOKEN: &str = "counsel_access_token";
const KEY_USER_ID: &str = "counsel_user_id";
const KEY_LOG_LEVEL: &str = "counsel_log_level";
const KEY_ADMIN_USER_IDS: &str = "counsel_admin_user_ids";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Base URL of the table store (e.g. "https://xyz.example.co"). Empty means demo mode.
    pub store_url: String,

    /// Public API key sent with every store request
    pub store_key: String,

    /// Session token of the signed-in user
    pub access_token: String,

    /// Id of the signed-in user
    pub user_id: String,

    /// Users allowed on the admin dashboard
    pub admin_user_ids: Vec<String>,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            store_key: String::new(),
            access_token: String::new(),
            user_id: String::new(),
            admin_user_ids: Vec::new(),
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

impl AppSettings {
    /// Create settings from window location and localStorage
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(url)) = storage.get_item(KEY_STORE_URL) {
                    settings.store_url = url.trim().to_string();
                }
                if let Ok(Some(key)) = storage.get_item(KEY_STORE_KEY) {
                    settings.store_key = key;
                }
                if let Ok(Some(token)) = storage.get_item(KEY_ACCESS_TOKEN) {
                    settings.access_token = token;
                }
                if let Ok(Some(user_id)) = storage.get_item(KEY_USER_ID) {
                    settings.user_id = user_id.trim().to_string();
                }
                if let Ok(Some(ids)) = storage.get_item(KEY_ADMIN_USER_IDS) {
                    settings.admin_user_ids = parse_id_list(&ids);
                }
                if let Ok(Some(log_level)) = storage.get_item(KEY_LOG_LEVEL) {
                    settings.log_level = parse_level(&log_level).unwrap_or(settings.log_level);
                }
            }
        }

        settings
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item(KEY_STORE_URL, &self.store_url)?;
                storage.set_item(KEY_STORE_KEY, &self.store_key)?;
                storage.set_item(KEY_ACCESS_TOKEN, &self.access_token)?;
                storage.set_item(KEY_USER_ID, &self.user_id)?;
                storage.set_item(KEY_ADMIN_USER_IDS, &self.admin_user_ids.join(","))?;
                storage.set_item(KEY_LOG_LEVEL, &self.log_level.as_str().to_lowercase())?;
            }
        }
        Ok(())
    }

    /// No store configured: the app runs against seeded in-memory data.
    pub fn is_demo(&self) -> bool {
        self.store_url.is_empty()
    }

    /// The signed-in user, if any. Demo mode signs in as the demo counselor.
    pub fn session_user_id(&self) -> Option<String> {
        if !self.user_id.is_empty() {
            Some(self.user_id.clone())
        } else if self.is_demo() {
            Some(DEMO_USER_ID.to_string())
        } else {
            None
        }
    }

    /// Whether the signed-in user may open the admin dashboard. Nobody is an
    /// admin until listed, demo mode included.
    pub fn is_admin(&self) -> bool {
        match self.session_user_id() {
            Some(user_id) => self.admin_user_ids.iter().any(|id| *id == user_id),
            None => false,
        }
    }

    /// Token for the `Authorization` header, falling back to the API key.
    pub fn bearer_token(&self) -> &str {
        if self.access_token.is_empty() {
            &self.store_key
        } else {
            &self.access_token
        }
    }
}

/// Comma-separated ids, blanks dropped.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_level(raw: &str) -> Option<Level> {
    match raw.trim().to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_mode_session() {
        let settings = AppSettings::default();
        assert!(settings.is_demo());
        assert_eq!(settings.session_user_id().as_deref(), Some(DEMO_USER_ID));
    }

    #[test]
    fn test_configured_store_requires_user() {
        let mut settings = AppSettings {
            store_url: "https://db.example.com".to_string(),
            store_key: "anon".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.session_user_id(), None);
        assert_eq!(settings.bearer_token(), "anon");

        settings.user_id = "u-42".to_string();
        settings.access_token = "jwt".to_string();
        assert_eq!(settings.session_user_id().as_deref(), Some("u-42"));
        assert_eq!(settings.bearer_token(), "jwt");
    }

    #[test]
    fn test_admin_requires_listed_session_user() {
        let mut settings = AppSettings {
            store_url: "https://db.example.com".to_string(),
            admin_user_ids: parse_id_list(" u-admin, ,u-ops "),
            ..AppSettings::default()
        };
        assert_eq!(settings.admin_user_ids, vec!["u-admin".to_string(), "u-ops".to_string()]);
        // listed id but nobody signed in
        assert!(!settings.is_admin());

        settings.user_id = "u-42".to_string();
        assert!(!settings.is_admin());

        settings.user_id = "u-ops".to_string();
        assert!(settings.is_admin());
    }

    #[test]
    fn test_demo_user_is_not_admin_by_default() {
        let settings = AppSettings::default();
        assert!(!settings.is_admin());

        let settings = AppSettings {
            admin_user_ids: vec![DEMO_USER_ID.to_string()],
            ..AppSettings::default()
        };
        assert!(settings.is_admin());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(" Debug "), Some(Level::Debug));
        assert_eq!(parse_level("verbose"), None);
    }
}
