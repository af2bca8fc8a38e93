use crate::domain::theme::ThemeMode;

/// Colors for one theme mode, written onto the document root as CSS
/// custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    // Backgrounds
    pub bg_window: &'static str,
    pub bg_card: &'static str,
    pub bg_card_hover: &'static str,
    pub bg_input: &'static str,

    // Accents
    pub accent_primary: &'static str,
    pub accent_secondary: &'static str,

    // Status
    pub success: &'static str,
    pub danger: &'static str,
    pub warning: &'static str,

    // Text
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,

    // Borders
    pub border_subtle: &'static str,
    pub border_focus: &'static str,
}

/// Premium dark terminal palette.
pub const DARK: ThemePalette = ThemePalette {
    bg_window: "#0A0C10",
    bg_card: "#161B22",
    bg_card_hover: "#1C2128",
    bg_input: "#0F1218",
    accent_primary: "#2979FF",
    accent_secondary: "#42A5F5",
    success: "#00E676",
    danger: "#FF1744",
    warning: "#FF9100",
    text_primary: "#F0F6FC",
    text_secondary: "#A0A0A0",
    text_muted: "#646464",
    border_subtle: "#30363D",
    border_focus: "#388BFD",
};

pub const LIGHT: ThemePalette = ThemePalette {
    bg_window: "#F6F8FA",
    bg_card: "#FFFFFF",
    bg_card_hover: "#F0F3F6",
    bg_input: "#FFFFFF",
    accent_primary: "#1565C0",
    accent_secondary: "#1E88E5",
    success: "#00875A",
    danger: "#D50032",
    warning: "#E65100",
    text_primary: "#1F2328",
    text_secondary: "#59636E",
    text_muted: "#8C959F",
    border_subtle: "#D0D7DE",
    border_focus: "#0969DA",
};

impl ThemePalette {
    pub fn for_mode(mode: ThemeMode) -> &'static ThemePalette {
        match mode {
            ThemeMode::Dark => &DARK,
            ThemeMode::Light => &LIGHT,
        }
    }

    pub fn css_variables(&self) -> [(&'static str, &'static str); 14] {
        [
            ("--bg-window", self.bg_window),
            ("--bg-card", self.bg_card),
            ("--bg-card-hover", self.bg_card_hover),
            ("--bg-input", self.bg_input),
            ("--accent-primary", self.accent_primary),
            ("--accent-secondary", self.accent_secondary),
            ("--color-success", self.success),
            ("--color-danger", self.danger),
            ("--color-warning", self.warning),
            ("--text-primary", self.text_primary),
            ("--text-secondary", self.text_secondary),
            ("--text-muted", self.text_muted),
            ("--border-subtle", self.border_subtle),
            ("--border-focus", self.border_focus),
        ]
    }
}
