//! Dark/light theme toggle. Lives in memory only, so every restart is dark.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&mut self) {
        *self = match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// CSS class put on every rendered panel.
    pub fn class(self) -> &'static str {
        match self {
            Theme::Dark => "theme-dark",
            Theme::Light => "theme-light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dark_and_toggles() {
        let mut theme = Theme::default();
        assert!(theme.is_dark());
        theme.toggle();
        assert_eq!(theme, Theme::Light);
        assert_eq!(theme.class(), "theme-light");
        theme.toggle();
        assert_eq!(theme, Theme::Dark);
    }
}
