//! Storage bridge and lifecycle routes.
//!
//! Page-load sequence driven by the JS bridge:
//! 0. `GET /api/storage/keys` for the `localStorage` keys to read
//! 1. `POST /api/storage/restore` with every relevant `localStorage` entry
//! 2. `POST /api/app/init` (optional `WheelConfig` JSON) to load the stores
//! 3. after each mutating request, `GET /api/storage/persist` and run the
//!    returned script on the main thread

use crate::app;
use crate::config::WheelConfig;
use crate::routes::util::error_fragment;
use crate::store::{HISTORY_KEY, LANGUAGE_KEY, LEGACY_PROFILES_KEY, PROFILES_KEY};

/// Keys the bridge should read from `localStorage` before restore.
pub const RESTORE_KEYS: [&str; 4] = [PROFILES_KEY, LEGACY_PROFILES_KEY, HISTORY_KEY, LANGUAGE_KEY];

// ── GET /api/storage/keys ──────────────────────────────────────────

/// Handle GET /api/storage/keys
/// Returns [`RESTORE_KEYS`] as a JSON array. Works before init.
pub fn handle_keys_get(_query: &str) -> String {
    serde_json::to_string(&RESTORE_KEYS).unwrap_or_else(|_| "[]".to_string())
}

// ── POST /api/storage/restore ──────────────────────────────────────

/// Handle POST /api/storage/restore
/// Body: JSON object of raw `localStorage` strings, e.g.
/// `{"APP_LANGUAGE":"EN","WHEEL_HISTORY":"[...]"}`.
pub fn handle_restore_post(body: &str) -> String {
    match app::storage().restore_json(body) {
        Ok(count) => {
            log::info!("restored {} storage keys", count);
            "ok".to_string()
        }
        Err(e) => {
            log::warn!("{}", e);
            format!("error: {}", e)
        }
    }
}

// ── POST /api/app/init ─────────────────────────────────────────────

/// Handle POST /api/app/init
/// Body: optional `WheelConfig` JSON. Loads every store from the mirror.
pub fn handle_init_post(body: &str) -> String {
    match WheelConfig::from_json(body) {
        Ok(config) => {
            app::init(config);
            "ok".to_string()
        }
        Err(e) => error_fragment(&e.to_string()),
    }
}

// ── GET /api/storage/persist ───────────────────────────────────────

/// Handle GET /api/storage/persist
/// Returns a `<script>` writing every dirty key back to `localStorage`, or
/// an empty string when nothing changed since the last flush.
pub fn handle_persist_get(_query: &str) -> String {
    let dirty = app::storage().take_dirty();
    if dirty.is_empty() {
        return String::new();
    }

    let mut script = String::with_capacity(256);
    script.push_str("<script>\n(function() {\n");
    for (key, value) in &dirty {
        script.push_str(&format!(
            "  localStorage.setItem({}, {});\n",
            js_string(key),
            js_string(value)
        ));
    }
    script.push_str("})();\n</script>");
    script
}

/// JSON-quoted string that is also safe inside a `<script>` element.
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

// ── GET /api/state ─────────────────────────────────────────────────

/// Handle GET /api/state
/// Returns the whole App state as JSON for export and debugging.
pub fn handle_state_get(_query: &str) -> String {
    app::with_app(|app| serde_json::to_string(&app.snapshot()))
        .map(|result| result.unwrap_or_else(|_| "{}".to_string()))
        .unwrap_or_else(|| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;

    #[test]
    fn restore_then_init_uses_restored_data() {
        app::reset();
        let body = serde_json::json!({ LANGUAGE_KEY: "en" }).to_string();
        assert_eq!(handle_restore_post(&body), "ok");
        assert_eq!(handle_init_post(""), "ok");
        let lang = app::with_app(|a| a.language()).unwrap();
        assert_eq!(lang.code(), "EN");
        app::reset();
    }

    #[test]
    fn keys_route_lists_every_store_key() {
        app::reset();
        let keys: Vec<String> = serde_json::from_str(&handle_keys_get("")).unwrap();
        assert_eq!(
            keys,
            [PROFILES_KEY, LEGACY_PROFILES_KEY, HISTORY_KEY, LANGUAGE_KEY]
        );
    }

    #[test]
    fn restore_rejects_garbage() {
        app::reset();
        assert!(handle_restore_post("[1,2]").starts_with("error:"));
        app::reset();
    }

    #[test]
    fn init_rejects_bad_config() {
        app::reset();
        let html = handle_init_post(r#"{"extra_revolutions":0}"#);
        assert!(html.contains("extra_revolutions"));
        assert!(!app::is_ready());
        app::reset();
    }

    #[test]
    fn first_init_persists_default_profiles() {
        app::reset();
        handle_init_post("");
        let script = handle_persist_get("");
        assert!(script.contains("localStorage.setItem"));
        assert!(script.contains(PROFILES_KEY));
        assert!(script.contains("Lukas"));
        // Journal drained.
        assert_eq!(handle_persist_get(""), "");
        app::reset();
    }

    #[test]
    fn persist_escapes_script_end_tags() {
        app::reset();
        app::storage().set("k", "</script><b>").unwrap();
        let script = handle_persist_get("");
        assert!(script.contains(r#"<\/script><b>"#));
        assert_eq!(script.matches("</script>").count(), 1);
        app::reset();
    }

    #[test]
    fn state_export_before_init_is_empty_object() {
        app::reset();
        assert_eq!(handle_state_get(""), "{}");
        handle_init_post("");
        assert!(handle_state_get("").contains("\"profiles\""));
        app::reset();
    }
}
