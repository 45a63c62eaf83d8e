//! `/api/profiles` and `/api/items` routes — the settings panel.
//!
//! Profiles are named item lists; exactly one is current. Item edits always
//! apply to the current profile and re-render the whole panel.

use crate::app::{self, App};
use crate::i18n;
use crate::routes::util::{error_fragment, escape_html, get_param, not_ready, parse_form_body};
use crate::wheel::item::{PALETTE, chance_percent};

// ── GET /api/profiles ──────────────────────────────────────────────

/// Handle GET /api/profiles
/// Returns the settings panel: profile switcher plus the item editor.
pub fn handle_profiles_get(_query: &str) -> String {
    app::with_app(|app| render_settings_panel(app, None)).unwrap_or_else(not_ready)
}

// ── POST /api/profiles ─────────────────────────────────────────────

/// Handle POST /api/profiles
/// Body: action={select|create|reset}&name={profile}
pub fn handle_profiles_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let name = get_param(&params, "name").unwrap_or("");

    app::with_app_mut(|app| {
        let profiles = app.profiles_mut();
        let error = match action {
            "select" => (!profiles.set_current_profile(name)).then(|| format!("Unknown profile: {}", name)),
            "create" => {
                if name.trim().is_empty() {
                    Some("Profile name required".to_string())
                } else {
                    profiles.create_profile(name);
                    None
                }
            }
            "reset" => {
                profiles.reset_to_default();
                None
            }
            _ => Some(format!("Unknown action: {}", action)),
        };
        render_settings_panel(app, error.as_deref())
    })
    .unwrap_or_else(not_ready)
}

// ── POST /api/items ────────────────────────────────────────────────

/// Handle POST /api/items
/// Body: action={add|weight|color|delete} plus
/// `label` (add), `id` + `delta` (weight), `id` + `color` (color), `id` (delete).
pub fn handle_items_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let id = get_param(&params, "id").unwrap_or("");

    app::with_app_mut(|app| {
        let profiles = app.profiles_mut();
        let error = match action {
            "add" => {
                let label = get_param(&params, "label").unwrap_or("");
                profiles
                    .add_item(label)
                    .is_none()
                    .then(|| "Name required".to_string())
            }
            "weight" => match get_param(&params, "delta").and_then(|d| d.trim().parse::<f64>().ok()) {
                Some(delta) if delta.is_finite() => {
                    (!profiles.adjust_weight(id, delta)).then(|| format!("Unknown item: {}", id))
                }
                _ => Some("Invalid weight step".to_string()),
            },
            "color" => {
                let color = get_param(&params, "color").unwrap_or("");
                (!profiles.set_color(id, color)).then(|| format!("Cannot set color {} on item {}", color, id))
            }
            "delete" => (!profiles.remove_item(id)).then(|| format!("Unknown item: {}", id)),
            _ => Some(format!("Unknown action: {}", action)),
        };
        render_settings_panel(app, error.as_deref())
    })
    .unwrap_or_else(not_ready)
}

// ── Panel rendering ────────────────────────────────────────────────

fn render_settings_panel(app: &App, error: Option<&str>) -> String {
    let strings = i18n::strings(app.language());
    let mut html = String::with_capacity(8192);

    html.push_str(&format!(
        r#"<div id="settings-panel" class="settings-panel {}">"#,
        app.theme().class()
    ));
    html.push_str(&format!(r#"<h2 class="panel-title">{}</h2>"#, strings.settings));
    if let Some(msg) = error {
        html.push_str(&format!(r#"<div class="panel-error">{}</div>"#, error_fragment(msg)));
    }
    html.push_str(&render_profile_section(app));
    html.push_str(&render_item_section(app));
    html.push_str("</div>");
    html
}

fn render_profile_section(app: &App) -> String {
    let strings = i18n::strings(app.language());
    let profiles = app.profiles();
    let mut html = String::with_capacity(2048);

    html.push_str(r#"<section class="profile-section">"#);
    html.push_str(&format!("<h3>{}</h3>", strings.profiles));

    html.push_str(
        r##"<select name="name" hx-post="/api/profiles" hx-vals='{"action":"select"}' hx-trigger="change" hx-target="#settings-panel" hx-swap="outerHTML">"##,
    );
    for name in profiles.names() {
        let selected = if name == profiles.current() { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape_html(name),
            selected
        ));
    }
    html.push_str("</select>");

    html.push_str(r##"<form class="profile-create" hx-post="/api/profiles" hx-target="#settings-panel" hx-swap="outerHTML">"##);
    html.push_str(r#"<input type="hidden" name="action" value="create">"#);
    html.push_str(&format!(
        r#"<input type="text" name="name" placeholder="{}" autocomplete="off">"#,
        strings.new_profile
    ));
    html.push_str(r#"<button type="submit">+</button></form>"#);

    html.push_str(&format!(
        r##"<button class="profile-reset" hx-post="/api/profiles" hx-vals='{{"action":"reset"}}' hx-target="#settings-panel" hx-swap="outerHTML">{}</button>"##,
        strings.reset
    ));
    html.push_str("</section>");
    html
}

fn render_item_section(app: &App) -> String {
    let strings = i18n::strings(app.language());
    let items = app.profiles().current_items();
    let mut html = String::with_capacity(1024 + items.len() * 1536);

    html.push_str(r#"<section class="item-section">"#);
    html.push_str(&format!("<h3>{} ({})</h3>", strings.participants, items.len()));

    html.push_str(r##"<form class="item-add" hx-post="/api/items" hx-target="#settings-panel" hx-swap="outerHTML">"##);
    html.push_str(r#"<input type="hidden" name="action" value="add">"#);
    html.push_str(&format!(
        r#"<input type="text" name="label" placeholder="{}" autocomplete="off">"#,
        strings.enter_name
    ));
    html.push_str(&format!(r#"<button type="submit">{}</button></form>"#, strings.add));

    if items.is_empty() {
        html.push_str(&format!(r#"<p class="item-empty">{}</p>"#, strings.no_entries));
    }

    html.push_str(r#"<ul class="item-list">"#);
    for item in items {
        let id = escape_html(&item.id);
        html.push_str(&format!(r#"<li class="item-row" data-id="{}">"#, id));
        html.push_str(&format!(
            r#"<span class="swatch" style="background: {}"></span><span class="item-label">{}</span>"#,
            escape_html(&item.color),
            escape_html(&item.label)
        ));

        // Weight stepper
        html.push_str(r#"<span class="weight-stepper">"#);
        html.push_str(&item_button(&item.id, "weight", &[("delta", "-1")], "−"));
        html.push_str(&format!(r#"<span class="weight">{}</span>"#, format_weight(item.weight)));
        html.push_str(&item_button(&item.id, "weight", &[("delta", "1")], "+"));
        html.push_str("</span>");
        html.push_str(&format!(
            r#"<span class="chance">{}: {:.1}%</span>"#,
            strings.chance,
            chance_percent(item, items)
        ));

        // Palette
        html.push_str(r#"<span class="palette">"#);
        for color in PALETTE {
            let active = if item.color.eq_ignore_ascii_case(color) { " active" } else { "" };
            html.push_str(&format!(
                r##"<button class="palette-swatch{}" style="background: {}" hx-post="/api/items" hx-vals="{}" hx-target="#settings-panel" hx-swap="outerHTML"></button>"##,
                active,
                color,
                hx_vals(&item.id, "color", &[("color", color)])
            ));
        }
        html.push_str("</span>");

        html.push_str(&item_button(&item.id, "delete", &[], "✕"));
        html.push_str("</li>");
    }
    html.push_str("</ul></section>");
    html
}

/// Button posting `action` for one item to `/api/items`.
fn item_button(id: &str, action: &str, extra: &[(&str, &str)], label: &str) -> String {
    format!(
        r##"<button class="item-{}" hx-post="/api/items" hx-vals="{}" hx-target="#settings-panel" hx-swap="outerHTML">{}</button>"##,
        action,
        hx_vals(id, action, extra),
        label
    )
}

/// `hx-vals` JSON, escaped for a double-quoted attribute.
fn hx_vals(id: &str, action: &str, extra: &[(&str, &str)]) -> String {
    let mut vals = serde_json::Map::new();
    vals.insert("action".into(), action.into());
    vals.insert("id".into(), id.into());
    for (k, v) in extra {
        vals.insert((*k).to_string(), (*v).into());
    }
    escape_html(&serde_json::Value::Object(vals).to_string())
}

/// Whole weights print without decimals.
fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{}", weight)
    }
}
