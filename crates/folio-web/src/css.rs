#![forbid(unsafe_code)]

//! Media queries and CSS text shared by the DOM bindings.

use folio_core::Point;
use web_time::Duration;

/// Platform dark-appearance preference.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Platform request to minimise animation.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Class toggled on the document root while dark mode is active.
pub const DARK_CLASS: &str = "dark";

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Inline `(property, value)` pairs for the backdrop elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackdropStyles {
    pub container: &'static [(&'static str, &'static str)],
    pub canvas: &'static [(&'static str, &'static str)],
}

/// Under reduced motion the container is dimmed to a faint still image and
/// the particle canvas is hidden.
#[must_use]
pub fn backdrop_styles(reduced_motion: bool) -> BackdropStyles {
    if reduced_motion {
        BackdropStyles {
            container: &[("opacity", "0.06")],
            canvas: &[("display", "none")],
        }
    } else {
        BackdropStyles {
            container: &[],
            canvas: &[("display", "block")],
        }
    }
}

/// Properties that animate during a theme switch.
const TRANSITION_PROPERTIES: [&str; 4] = ["background-color", "color", "border-color", "box-shadow"];

/// Global stylesheet that makes every element ease its colors over
/// `duration`.
#[must_use]
pub fn transition_rule(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    let list = TRANSITION_PROPERTIES
        .iter()
        .map(|prop| format!("{prop} {secs}s ease"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("* {{ transition: {list} !important; }}")
}

/// `12px`, `12.5px`.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// CSS `transform` for a container offset.
#[must_use]
pub fn translate(offset: Point) -> String {
    format!("translate({}px, {}px)", offset.x, offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transition_rule_lists_color_properties() {
        assert_eq!(
            transition_rule(Duration::from_millis(300)),
            "* { transition: background-color 0.3s ease, color 0.3s ease, \
             border-color 0.3s ease, box-shadow 0.3s ease !important; }"
        );
    }

    #[test]
    fn reduced_motion_dims_container_and_hides_canvas() {
        let quiet = backdrop_styles(true);
        assert_eq!(quiet.container, &[("opacity", "0.06")]);
        assert_eq!(quiet.canvas, &[("display", "none")]);

        let normal = backdrop_styles(false);
        assert!(normal.container.is_empty());
        assert_eq!(normal.canvas, &[("display", "block")]);
    }

    #[test]
    fn lengths() {
        assert_eq!(px(1280.0), "1280px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(translate(Point::new(3.0, -0.9)), "translate(3px, -0.9px)");
    }
}
