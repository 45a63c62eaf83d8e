//! `/api/history` routes — per-profile statistics and the win log.

use crate::app::{self, App};
use crate::i18n;
use crate::routes::util::{error_fragment, escape_html, get_param, not_ready, parse_form_body, parse_query};
use crate::stats::{ProfileStats, format_percent};

// ── GET /api/history ───────────────────────────────────────────────

/// Handle GET /api/history?profile={name}
/// Returns the statistics panel, for the current profile when none is given.
pub fn handle_history_get(query: &str) -> String {
    let params = parse_query(query);
    let profile = get_param(&params, "profile").filter(|p| !p.is_empty());
    app::with_app(|app| {
        let profile = profile.unwrap_or_else(|| app.profiles().current());
        render_history_panel(app, profile, None)
    })
    .unwrap_or_else(not_ready)
}

// ── POST /api/history ──────────────────────────────────────────────

/// Handle POST /api/history
/// Body: action=clear
/// Wipes the log for every profile and returns the emptied panel.
pub fn handle_history_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");

    app::with_app_mut(|app| {
        let error = match action {
            "clear" => {
                app.history_mut().clear_history();
                None
            }
            _ => Some(format!("Unknown action: {}", action)),
        };
        let profile = app.profiles().current().to_string();
        render_history_panel(app, &profile, error.as_deref())
    })
    .unwrap_or_else(not_ready)
}

// ── Panel rendering ────────────────────────────────────────────────

fn render_history_panel(app: &App, profile: &str, error: Option<&str>) -> String {
    let strings = i18n::strings(app.language());
    let stats = ProfileStats::compute(app.history().entries(), profile);
    let mut html = String::with_capacity(2048 + stats.total() * 160);

    html.push_str(&format!(
        r#"<div id="history-panel" class="history-panel {}">"#,
        app.theme().class()
    ));
    html.push_str(&format!(
        r#"<h2 class="panel-title">{}: {}</h2>"#,
        strings.statistics,
        escape_html(profile)
    ));
    if let Some(msg) = error {
        html.push_str(&format!(r#"<div class="panel-error">{}</div>"#, error_fragment(msg)));
    }

    if stats.is_empty() {
        html.push_str(&format!(r#"<p class="history-empty">{}</p>"#, strings.no_history));
    } else {
        html.push_str(r#"<ul class="win-counts">"#);
        for count in &stats.counts {
            html.push_str(&format!(
                r#"<li><span class="win-name">{}</span> <span class="win-count">{} {} ({}%)</span></li>"#,
                escape_html(&count.winner),
                count.count,
                strings.wins,
                format_percent(count.percent)
            ));
        }
        html.push_str("</ul>");

        html.push_str(&format!("<h3>{}</h3>", strings.history));
        html.push_str(r#"<ol class="history-list">"#);
        for entry in &stats.entries {
            html.push_str(&format!(
                r#"<li><time datetime="{}">{}</time> <span class="win-name">{}</span></li>"#,
                entry.timestamp.to_rfc3339(),
                entry.timestamp.format("%d.%m.%Y %H:%M"),
                escape_html(&entry.winner)
            ));
        }
        html.push_str("</ol>");

        html.push_str(&format!(
            r##"<button class="history-clear" hx-post="/api/history" hx-vals='{{"action":"clear"}}' hx-target="#history-panel" hx-swap="outerHTML">{}</button>"##,
            strings.clear_history
        ));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelConfig;

    fn setup() {
        app::reset();
        app::init(WheelConfig::default());
    }

    fn record(profile: &str, winner: &str) {
        app::with_app_mut(|a| {
            a.history_mut().record_win(profile, winner);
        });
    }

    #[test]
    fn empty_history_panel() {
        setup();
        let html = handle_history_get("");
        assert!(html.contains("Statistik: Standard"));
        assert!(html.contains("Noch keine Gewinner"));
        assert!(!html.contains("history-clear"));
        app::reset();
    }

    #[test]
    fn tallies_current_profile_only() {
        setup();
        record("Standard", "Anna");
        record("Team B", "Kim");
        record("Standard", "Anna");
        record("Standard", "Max");

        let html = handle_history_get("");
        assert!(html.contains("2 Siege (66.7%)"));
        assert!(html.contains("1 Siege (33.3%)"));
        assert!(!html.contains("Kim"));
        assert_eq!(html.matches("<time ").count(), 3);
        assert!(html.contains("history-clear"));

        let html = handle_history_get("profile=Team+B");
        assert!(html.contains("Statistik: Team B"));
        assert!(html.contains("1 Siege (100.0%)"));
        app::reset();
    }

    #[test]
    fn clear_button_needs_entries_for_shown_profile() {
        setup();
        record("Team B", "Kim");
        let html = handle_history_get("");
        assert!(html.contains("Noch keine Gewinner"));
        assert!(!html.contains("history-clear"));
        assert!(handle_history_get("profile=Team+B").contains("history-clear"));
        app::reset();
    }

    #[test]
    fn clear_wipes_every_profile() {
        setup();
        record("Standard", "Anna");
        record("Team B", "Kim");
        let html = handle_history_post("action=clear");
        assert!(html.contains("Noch keine Gewinner"));
        assert_eq!(app::with_app(|a| a.history().len()), Some(0));
        app::reset();
    }

    #[test]
    fn unknown_action_keeps_history() {
        setup();
        record("Standard", "Anna");
        let html = handle_history_post("action=drop");
        assert!(html.contains("Unknown action: drop"));
        assert_eq!(app::with_app(|a| a.history().len()), Some(1));
        app::reset();
    }

    #[test]
    fn panel_follows_language() {
        setup();
        app::with_app_mut(|a| a.set_language(crate::store::language::Language::En));
        record("Standard", "Anna");
        let html = handle_history_get("");
        assert!(html.contains("Statistics: Standard"));
        assert!(html.contains("1 wins (100.0%)"));
        app::reset();
    }
}
