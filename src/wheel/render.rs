//! SVG rendering of the wheel disc.
//!
//! The disc is drawn unrotated; the wrapper element carries the absolute
//! rotation as a CSS transform. HTMX keeps the wrapper's `id` stable across
//! swaps, so settling the new `style` attribute lets the browser animate
//! from the old rotation to the new one.

use std::f64::consts::PI;

use crate::routes::util::escape_html;
use crate::wheel::item::Item;

/// Side length of the square SVG viewBox.
const SIZE: f64 = 300.0;
const RADIUS: f64 = SIZE / 2.0;
/// Labels sit at 70% of the radius.
const LABEL_RADIUS: f64 = RADIUS * 0.7;

/// CSS timing function equivalent to a quadratic ease-out.
const EASE_OUT_QUAD: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// Point on the circle of `radius` at `angle_deg`, SVG coordinates.
fn polar(radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = PI * angle_deg / 180.0;
    (RADIUS + radius * rad.cos(), RADIUS + radius * rad.sin())
}

/// Render the disc wrapper at `rotation` degrees. With `transition_ms` set
/// the rotation is animated over that many milliseconds.
pub fn render_disc(items: &[Item], rotation: f64, transition_ms: Option<u32>, empty_label: &str) -> String {
    let mut html = String::with_capacity(512 + items.len() * 384);

    let transition = match transition_ms {
        Some(ms) => format!("transform {}ms {}", ms, EASE_OUT_QUAD),
        None => "none".to_string(),
    };
    html.push_str(&format!(
        r#"<div id="wheel-disc" class="wheel-disc" data-rotation="{:.3}" style="transform: rotate({:.3}deg); transition: {};">"#,
        rotation, rotation, transition
    ));
    html.push_str(&format!(
        r#"<svg viewBox="0 0 {size} {size}" width="{size}" height="{size}" role="img">"#,
        size = SIZE
    ));

    if items.is_empty() {
        html.push_str(&format!(
            r##"<circle cx="{r}" cy="{r}" r="{r}" fill="#1c1c24" stroke="#444" stroke-width="4"/>"##,
            r = RADIUS
        ));
        html.push_str(&format!(
            r##"<text x="{r}" y="{r}" fill="#888" font-size="18" font-weight="bold" text-anchor="middle" dominant-baseline="middle">{}</text>"##,
            escape_html(empty_label),
            r = RADIUS
        ));
    } else {
        let segment = 360.0 / items.len() as f64;
        for (index, item) in items.iter().enumerate() {
            let start = index as f64 * segment;
            let end = start + segment;
            let color = if item.color.is_empty() { "#333" } else { item.color.as_str() };

            html.push_str(&format!(r#"<g class="wedge" data-index="{}">"#, index));
            if items.len() == 1 {
                // A single 360° arc has identical end points and would not draw.
                html.push_str(&format!(
                    r##"<circle cx="{r}" cy="{r}" r="{r}" fill="{}" stroke="#ffffff" stroke-width="1"/>"##,
                    escape_html(color),
                    r = RADIUS
                ));
            } else {
                let (x1, y1) = polar(RADIUS, start);
                let (x2, y2) = polar(RADIUS, end);
                html.push_str(&format!(
                    r##"<path d="M {r} {r} L {:.3} {:.3} A {r} {r} 0 0 1 {:.3} {:.3} Z" fill="{}" stroke="#ffffff" stroke-width="1"/>"##,
                    x1,
                    y1,
                    x2,
                    y2,
                    escape_html(color),
                    r = RADIUS
                ));
            }

            let text_angle = start + segment / 2.0;
            let (tx, ty) = polar(LABEL_RADIUS, text_angle);
            html.push_str(&format!(
                r##"<text x="{:.3}" y="{:.3}" fill="#ffffff" font-size="12" font-weight="bold" text-anchor="middle" dominant-baseline="middle" transform="rotate({:.3}, {:.3}, {:.3})">{}</text>"##,
                tx,
                ty,
                text_angle,
                tx,
                ty,
                escape_html(&item.label)
            ));
            html.push_str("</g>");
        }
    }

    html.push_str("</svg></div>");
    html
}

/// The fixed pointer above the disc.
pub fn render_pointer() -> String {
    r#"<div class="wheel-pointer" aria-hidden="true"></div>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::item::default_items;

    #[test]
    fn empty_wheel_shows_placeholder() {
        let html = render_disc(&[], 0.0, None, "Keine Einträge");
        assert!(html.contains("Keine Einträge"));
        assert!(html.contains("<circle"));
        assert!(!html.contains("class=\"wedge\""));
    }

    #[test]
    fn one_wedge_per_item() {
        let html = render_disc(&default_items(), 0.0, None, "");
        assert_eq!(html.matches("class=\"wedge\"").count(), 3);
        assert_eq!(html.matches("<path").count(), 3);
        assert!(html.contains("Anna"));
        assert!(html.contains("#43e97b"));
    }

    #[test]
    fn single_item_draws_full_circle() {
        let items = vec![default_items().remove(0)];
        let html = render_disc(&items, 0.0, None, "");
        assert!(!html.contains("<path"));
        assert!(html.contains(r##"fill="#4facfe""##));
    }

    #[test]
    fn rotation_and_transition_in_style() {
        let html = render_disc(&default_items(), 2010.0, Some(4000), "");
        assert!(html.contains("rotate(2010.000deg)"));
        assert!(html.contains("transform 4000ms"));

        let idle = render_disc(&default_items(), 2010.0, None, "");
        assert!(idle.contains("transition: none"));
    }

    #[test]
    fn labels_are_escaped() {
        let mut items = default_items();
        items[0].label = "<b>Max</b>".to_string();
        let html = render_disc(&items, 0.0, None, "");
        assert!(html.contains("&lt;b&gt;Max&lt;/b&gt;"));
        assert!(!html.contains("<b>Max"));
    }
}
