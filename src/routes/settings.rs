//! `/api/settings/*` routes — UI language and theme.
//!
//! Both POST handlers return the re-rendered control plus a small script
//! that tells the page about the change; other panels listen for the
//! `settings-changed` event on `body` and re-fetch themselves.

use crate::app::{self, App};
use crate::routes::util::{error_fragment, escape_html, get_param, not_ready, parse_form_body};
use crate::store::language::Language;

// ── GET/POST /api/settings/language ────────────────────────────────

/// Handle GET /api/settings/language
/// Returns the language switcher.
pub fn handle_language_get(_query: &str) -> String {
    app::with_app(render_language_switcher).unwrap_or_else(not_ready)
}

/// Handle POST /api/settings/language
/// Body: lang={DE|EN|TH}
pub fn handle_language_post(body: &str) -> String {
    let params = parse_form_body(body);
    let code = get_param(&params, "lang").unwrap_or("");

    app::with_app_mut(|app| match Language::parse(code) {
        Some(language) => {
            app.set_language(language);
            log::info!("language set to {}", language);
            let mut html = render_language_switcher(app);
            html.push_str(&changed_script(&format!(
                "document.documentElement.lang = {};",
                js_str(&language.code().to_lowercase())
            )));
            html
        }
        None => {
            let mut html = error_fragment(&format!("Unsupported language: {}", code));
            html.push_str(&render_language_switcher(app));
            html
        }
    })
    .unwrap_or_else(not_ready)
}

// ── GET/POST /api/settings/theme ───────────────────────────────────

/// Handle GET /api/settings/theme
/// Returns the theme toggle button.
pub fn handle_theme_get(_query: &str) -> String {
    app::with_app(render_theme_toggle).unwrap_or_else(not_ready)
}

/// Handle POST /api/settings/theme
/// Body: action=toggle
pub fn handle_theme_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");

    app::with_app_mut(|app| {
        if action != "toggle" {
            let mut html = error_fragment(&format!("Unknown action: {}", action));
            html.push_str(&render_theme_toggle(app));
            return html;
        }
        app.toggle_theme();
        let theme = app.theme();
        let mut html = render_theme_toggle(app);
        html.push_str(&changed_script(&format!(
            "document.documentElement.classList.remove('theme-dark', 'theme-light'); document.documentElement.classList.add({});",
            js_str(theme.class())
        )));
        html
    })
    .unwrap_or_else(not_ready)
}

// ── Rendering ──────────────────────────────────────────────────────

fn render_language_switcher(app: &App) -> String {
    let current = app.language();
    let mut html = String::with_capacity(1024);
    html.push_str(r#"<div id="language-switcher" class="language-switcher">"#);
    for language in Language::ALL {
        let active = if language == current { " active" } else { "" };
        html.push_str(&format!(
            r##"<button class="lang-button{}" hx-post="/api/settings/language" hx-vals='{{"lang":"{}"}}' hx-target="#language-switcher" hx-swap="outerHTML">{} {}</button>"##,
            active,
            language.code(),
            language.flag(),
            language.code()
        ));
    }
    html.push_str("</div>");
    html
}

fn render_theme_toggle(app: &App) -> String {
    let theme = app.theme();
    let icon = if theme.is_dark() { "☀️" } else { "🌙" };
    format!(
        r##"<button id="theme-toggle" class="theme-toggle" data-theme="{}" hx-post="/api/settings/theme" hx-vals='{{"action":"toggle"}}' hx-target="#theme-toggle" hx-swap="outerHTML">{}</button>"##,
        escape_html(theme.class()),
        icon
    )
}

/// Script running `body_js` and then announcing the change to other panels.
fn changed_script(body_js: &str) -> String {
    format!(
        "<script>\n{}\ndocument.body.dispatchEvent(new Event('settings-changed'));\n</script>",
        body_js
    )
}

fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelConfig;
    use crate::store::LANGUAGE_KEY;
    use crate::store::theme::Theme;

    fn setup() {
        app::reset();
        app::init(WheelConfig::default());
    }

    #[test]
    fn switcher_marks_current_language() {
        setup();
        let html = handle_language_get("");
        assert_eq!(html.matches("lang-button").count(), 3);
        assert!(html.contains(r#"lang-button active" hx-post="/api/settings/language" hx-vals='{"lang":"DE"}'"#));
        app::reset();
    }

    #[test]
    fn set_language_persists_code() {
        setup();
        let html = handle_language_post("lang=th");
        assert!(html.contains(r#"document.documentElement.lang = "th";"#));
        assert!(html.contains("settings-changed"));
        assert_eq!(app::with_app(|a| a.language()), Some(Language::Th));
        let dirty = app::storage().take_dirty();
        assert!(dirty.contains(&(LANGUAGE_KEY.to_string(), "TH".to_string())));
        app::reset();
    }

    #[test]
    fn unsupported_language_rejected() {
        setup();
        let html = handle_language_post("lang=FR");
        assert!(html.contains("Unsupported language: FR"));
        assert_eq!(app::with_app(|a| a.language()), Some(Language::De));
        app::reset();
    }

    #[test]
    fn theme_toggles_in_memory() {
        setup();
        app::storage().take_dirty();
        assert!(handle_theme_get("").contains(r#"data-theme="theme-dark""#));
        let html = handle_theme_post("action=toggle");
        assert!(html.contains(r#"data-theme="theme-light""#));
        assert!(html.contains(r#"classList.add("theme-light")"#));
        assert_eq!(app::with_app(|a| a.theme()), Some(Theme::Light));

        handle_theme_post("action=toggle");
        assert_eq!(app::with_app(|a| a.theme()), Some(Theme::Dark));
        assert!(!app::storage().has_dirty());
        app::reset();
    }

    #[test]
    fn theme_requires_toggle_action() {
        setup();
        let html = handle_theme_post("");
        assert!(html.contains("Unknown action"));
        assert_eq!(app::with_app(|a| a.theme()), Some(Theme::Dark));
        app::reset();
    }
}
