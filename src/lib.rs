//! Glücksrad in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Uses `matchit` for URL routing — the same router
//! engine that powers Axum.
//!
//! All state (profiles, win history, language, theme, the wheel itself)
//! lives in the worker; `localStorage` is mirrored in through
//! `/api/storage/restore` and written back with the script returned by
//! `/api/storage/persist`.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod routes;
pub mod stats;
pub mod storage;
pub mod store;
pub mod wheel;

/// Install the console logger and panic hook. Call once before the first
/// request. `level` is a `log` level name ("info", "debug", ...); unknown
/// names fall back to `info`.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let level = level.parse::<log::Level>().unwrap_or(log::Level::Info);
        if console_log::init_with_level(level).is_err() {
            log::debug!("logger already installed");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
}

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/wheel")
/// * `query`  — Query string (e.g., "?profile=Standard")
/// * `body`   — Request body (e.g., POST form data). Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM. The
/// storage bridge routes return plain text, JSON or a `<script>` instead.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    // Build the router. matchit compiles route patterns into a radix tree.
    let mut router = matchit::Router::new();

    // Lifecycle and storage bridge
    router.insert("/api/storage/keys", "storage_keys").ok();
    router.insert("/api/storage/restore", "storage_restore").ok();
    router.insert("/api/storage/persist", "storage_persist").ok();
    router.insert("/api/app/init", "app_init").ok();
    router.insert("/api/state", "state").ok();

    // Wheel
    router.insert("/api/wheel", "wheel").ok();
    router.insert("/api/wheel/spin", "wheel_spin").ok();
    router.insert("/api/wheel/complete", "wheel_complete").ok();

    // Profiles, items, history
    router.insert("/api/profiles", "profiles").ok();
    router.insert("/api/items", "items").ok();
    router.insert("/api/history", "history").ok();

    // Settings
    router.insert("/api/settings/language", "language").ok();
    router.insert("/api/settings/theme", "theme").ok();

    let response = match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("storage_keys", "GET") => routes::storage::handle_keys_get(query),
            ("storage_restore", "POST") => routes::storage::handle_restore_post(body),
            ("storage_persist", "GET") => routes::storage::handle_persist_get(query),
            ("app_init", "POST") => routes::storage::handle_init_post(body),
            ("state", "GET") => routes::storage::handle_state_get(query),

            ("wheel", "GET") => routes::wheel::handle_wheel_get(query),
            ("wheel_spin", "POST") => routes::wheel::handle_spin_post(body),
            ("wheel_complete", "POST") => routes::wheel::handle_complete_post(body),

            ("profiles", "GET") => routes::profiles::handle_profiles_get(query),
            ("profiles", "POST") => routes::profiles::handle_profiles_post(body),
            ("items", "POST") => routes::profiles::handle_items_post(body),

            ("history", "GET") => routes::history::handle_history_get(query),
            ("history", "POST") => routes::history::handle_history_post(body),

            ("language", "GET") => routes::settings::handle_language_get(query),
            ("language", "POST") => routes::settings::handle_language_post(body),
            ("theme", "GET") => routes::settings::handle_theme_get(query),
            ("theme", "POST") => routes::settings::handle_theme_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    };
    log::trace!("{} {} -> {} bytes", method, path, response.len());
    response
}

fn not_found() -> String {
    r#"<span class="text-error">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-error">405 — method not allowed</span>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;

    #[test]
    fn routes_storage_keys() {
        let json = handle_request("GET", "/api/storage/keys", "", "");
        assert!(json.starts_with('['));
        assert!(json.contains("WHEEL_HISTORY"));
    }

    fn boot() {
        app::reset();
        assert_eq!(handle_request("POST", "/api/app/init", "", ""), "ok");
    }

    #[test]
    fn returns_404_for_unknown_route() {
        let html = handle_request("GET", "/api/nonexistent", "", "");
        assert!(html.contains("404"));
    }

    #[test]
    fn returns_405_for_wrong_method() {
        let html = handle_request("POST", "/api/state", "", "");
        assert!(html.contains("405"));
        let html = handle_request("GET", "/api/wheel/spin", "", "");
        assert!(html.contains("405"));
    }

    #[test]
    fn feature_routes_wait_for_init() {
        app::reset();
        let html = handle_request("GET", "/api/wheel", "", "");
        assert!(html.contains("503"));
        let html = handle_request("GET", "/api/profiles", "", "");
        assert!(html.contains("503"));
    }

    #[test]
    fn routes_wheel() {
        boot();
        let html = handle_request("GET", "/api/wheel", "", "");
        assert!(html.contains("wheel-panel"));
        app::reset();
    }

    #[test]
    fn routes_profiles_and_items() {
        boot();
        let html = handle_request("POST", "/api/profiles", "", "action=create&name=Team");
        assert!(html.contains(r#"<option value="Team" selected>"#));
        let html = handle_request("POST", "/api/items", "", "action=add&label=Kim");
        assert!(html.contains("Kim"));
        app::reset();
    }

    #[test]
    fn routes_history_and_settings() {
        boot();
        assert!(handle_request("GET", "/api/history", "", "").contains("history-panel"));
        assert!(handle_request("GET", "/api/settings/language", "", "").contains("language-switcher"));
        assert!(handle_request("GET", "/api/settings/theme", "", "").contains("theme-toggle"));
        app::reset();
    }

    #[test]
    fn full_session_round_trip() {
        // First visit: nothing stored yet.
        boot();
        handle_request("POST", "/api/items", "", "action=add&label=Zoe");
        handle_request("POST", "/api/settings/language", "", "lang=EN");
        handle_request("POST", "/api/wheel/spin", "", "");
        let id = app::with_app(|a| a.wheel().in_flight().map(|p| p.spin_id))
            .flatten()
            .unwrap();
        let overlay = handle_request("POST", "/api/wheel/complete", "", &format!("spin={}", id));
        assert!(overlay.contains("WINNER"));

        // Everything that changed is flushed in one script.
        let script = handle_request("GET", "/api/storage/persist", "", "");
        assert!(script.contains("GLUECKSRAD_PROFILES_V2"));
        assert!(script.contains("WHEEL_HISTORY"));
        assert!(script.contains("APP_LANGUAGE"));

        // Reload: the page hands the flushed values back.
        let profiles = app::storage().get("GLUECKSRAD_PROFILES_V2").unwrap().unwrap();
        let history = app::storage().get("WHEEL_HISTORY").unwrap().unwrap();
        app::reset();
        let restore = serde_json::json!({
            "GLUECKSRAD_PROFILES_V2": profiles,
            "WHEEL_HISTORY": history,
            "APP_LANGUAGE": "EN",
        })
        .to_string();
        assert_eq!(handle_request("POST", "/api/storage/restore", "", &restore), "ok");
        assert_eq!(handle_request("POST", "/api/app/init", "", ""), "ok");

        let settings = handle_request("GET", "/api/profiles", "", "");
        assert!(settings.contains("Zoe"));
        assert!(settings.contains("Participants (4)"));
        let stats = handle_request("GET", "/api/history", "", "");
        assert!(stats.contains("1 wins (100.0%)"));
        // Restored values are not journaled again.
        assert_eq!(handle_request("GET", "/api/storage/persist", "", ""), "");
        app::reset();
    }
}
