//! `/api/wheel` routes — the wheel panel, spin requests and spin completion.
//!
//! The spin button posts with `hx-swap="none"`; everything a spin changes
//! comes back out of band. A started spin swaps `#wheel-stage` (the disc
//! keeps its id, so HTMX settles the new `transform` and the CSS transition
//! animates the rotation), drops a one-shot completion trigger into
//! `#spin-timer` and disables the button until the completion re-enables
//! it. A busy request returns nothing, so the running animation is never
//! touched.

use crate::app::{self, App};
use crate::i18n;
use crate::routes::util::{error_fragment, escape_html, get_param, not_ready, parse_form_body};
use crate::wheel::engine;
use crate::wheel::render::{render_disc, render_pointer};
use crate::wheel::spin::SpinRequest;

// ── GET /api/wheel ─────────────────────────────────────────────────

/// Handle GET /api/wheel
/// Returns the full wheel panel for the current profile.
pub fn handle_wheel_get(_query: &str) -> String {
    app::with_app(render_wheel_panel).unwrap_or_else(not_ready)
}

// ── POST /api/wheel/spin ───────────────────────────────────────────

/// Handle POST /api/wheel/spin
/// Starts a spin. While one is in flight the request is dropped and the
/// response is empty.
pub fn handle_spin_post(_body: &str) -> String {
    app::with_app_mut(|app| {
        let duration = app.config().spin_duration_ms;
        match app.spin() {
            Ok(SpinRequest::Started(plan)) => {
                let mut html = render_stage(app, Some(duration), true);
                html.push_str(&render_timer(plan.spin_id, plan.duration_ms, true));
                html.push_str(&render_spin_button(app, true));
                html
            }
            Ok(SpinRequest::Busy(_)) => String::new(),
            Err(e) => {
                // Nothing to draw from: show the wheel as is and lock the button.
                log::warn!("spin rejected: {}", e);
                let mut html = render_stage(app, None, true);
                html.push_str(&render_spin_button(app, true));
                html
            }
        }
    })
    .unwrap_or_else(not_ready)
}

// ── POST /api/wheel/complete ───────────────────────────────────────

/// Handle POST /api/wheel/complete
/// Body: spin={id}
/// Records the winner of the in-flight spin and returns the winner overlay.
/// Stale or repeated ids return an empty fragment.
pub fn handle_complete_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(spin_id) = get_param(&params, "spin").and_then(|s| s.trim().parse::<u64>().ok()) else {
        return error_fragment("Missing or invalid spin id");
    };

    app::with_app_mut(|app| match app.complete_spin(spin_id) {
        Some(entry) => {
            let mut html = render_winner(app, &entry.winner);
            html.push_str(&render_spin_button(app, true));
            html
        }
        None => String::new(),
    })
    .unwrap_or_else(not_ready)
}

// ── Rendering ──────────────────────────────────────────────────────

fn render_wheel_panel(app: &App) -> String {
    let strings = i18n::strings(app.language());
    let profiles = app.profiles();
    let mut html = String::with_capacity(4096);

    html.push_str(&format!(
        r#"<div id="wheel-panel" class="wheel-panel {}">"#,
        app.theme().class()
    ));
    html.push_str(&format!(r#"<h1 class="panel-title">{}</h1>"#, strings.wheel));
    html.push_str(&format!(
        r#"<p class="profile-badge">{}: <strong>{}</strong></p>"#,
        strings.profiles,
        escape_html(profiles.current())
    ));
    html.push_str(&render_stage(app, None, false));

    // A re-render mid-spin replaces the old timer, so settle right away.
    match app.wheel().in_flight() {
        Some(plan) => html.push_str(&render_timer(plan.spin_id, 0, false)),
        None => html.push_str(r#"<div id="spin-timer"></div>"#),
    }

    html.push_str(&render_spin_button(app, false));
    html.push_str(r#"<div id="wheel-result"></div>"#);
    html.push_str("</div>");
    html
}

/// Spin button, disabled while a spin is in flight or the current profile
/// has nothing to draw.
fn render_spin_button(app: &App, out_of_band: bool) -> String {
    let strings = i18n::strings(app.language());
    let locked = app.wheel().is_spinning() || engine::validate(app.profiles().current_items()).is_err();
    let disabled = if locked { " disabled" } else { "" };
    let oob = if out_of_band { r#" hx-swap-oob="true""# } else { "" };
    format!(
        r#"<button id="spin-button" class="spin-button" hx-post="/api/wheel/spin" hx-swap="none"{}{}>{}</button>"#,
        oob, disabled, strings.spin
    )
}

/// Pointer plus disc at the wheel's current rotation.
fn render_stage(app: &App, transition_ms: Option<u32>, out_of_band: bool) -> String {
    let strings = i18n::strings(app.language());
    let oob = if out_of_band { r#" hx-swap-oob="true""# } else { "" };
    let mut html = String::with_capacity(2048);
    html.push_str(&format!(r#"<div id="wheel-stage" class="wheel-stage"{}>"#, oob));
    html.push_str(&render_pointer());
    html.push_str(&render_disc(
        app.profiles().current_items(),
        app.wheel().rotation(),
        transition_ms,
        strings.no_entries,
    ));
    html.push_str("</div>");
    html
}

/// Completion trigger firing once, `delay_ms` after it is swapped in.
fn render_timer(spin_id: u64, delay_ms: u32, out_of_band: bool) -> String {
    let oob = if out_of_band { r#" hx-swap-oob="true""# } else { "" };
    let trigger = if delay_ms > 0 {
        format!("load delay:{}ms", delay_ms)
    } else {
        "load".to_string()
    };
    format!(
        r##"<div id="spin-timer"{}><div hx-post="/api/wheel/complete" hx-vals='{{"spin":"{}"}}' hx-trigger="{}" hx-target="#wheel-result" hx-swap="innerHTML"></div></div>"##,
        oob, spin_id, trigger
    )
}

fn render_winner(app: &App, winner: &str) -> String {
    let strings = i18n::strings(app.language());
    format!(
        r#"<div class="winner-overlay" onclick="this.remove()"><div class="winner-card"><p class="winner-title">🎉 {}</p><p class="winner-name">{}</p></div></div>"#,
        strings.winner,
        escape_html(winner)
    )
}
