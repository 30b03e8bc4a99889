//! Color theme preference and terminal palette.
//!
//! The preference is stored as a bare `"light"`/`"dark"` token under
//! [`THEME_KEY`] and follows the same rules as the cart: persist the
//! change first, then apply it, and accept rewrites from other
//! instances via storage events. Anything unrecognized in storage
//! falls back to dark.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ratatui::style::Color;

use crate::storage::{SharedStorage, StorageError, StorageEvent};

/// Storage key the theme token lives under.
pub const THEME_KEY: &str = "theme";

/// The two supported color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Label for the toggle control, naming the scheme a press would
    /// switch to.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "🌙 Dark Mode",
            Self::Dark => "☀️ Light Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("invalid theme: {s}")),
        }
    }
}

/// The persisted theme preference.
pub struct ThemePreference {
    storage: Arc<dyn SharedStorage>,
    theme: Theme,
}

impl ThemePreference {
    /// Load the preference stored under [`THEME_KEY`], defaulting to
    /// dark when nothing usable is stored.
    #[must_use]
    pub fn open(storage: Arc<dyn SharedStorage>) -> Self {
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!("{err}, falling back to dark");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                tracing::warn!("theme storage is unreadable, falling back to dark: {err}");
                Theme::default()
            }
        };
        Self { storage, theme }
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Persist `theme` and make it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be stored; the
    /// current theme is kept in that case.
    pub fn set(&mut self, theme: Theme) -> Result<(), StorageError> {
        if theme == self.theme {
            return Ok(());
        }
        self.storage.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(())
    }

    /// Switch between light and dark, returning the new scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be stored.
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Apply a theme change another instance wrote to storage.
    /// Returns whether the scheme changed.
    pub fn apply_storage_event(&mut self, event: &StorageEvent) -> bool {
        if event.key != THEME_KEY {
            return false;
        }
        let next = event
            .new_value
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();
        let changed = next != self.theme;
        self.theme = next;
        changed
    }
}

/// Concrete colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Palette {
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    #[must_use]
    pub const fn dark() -> Self {
        Self {
            bg: Color::Rgb(15, 17, 21),
            panel: Color::Rgb(23, 26, 33),
            border: Color::Rgb(42, 47, 58),
            text: Color::Rgb(232, 230, 227),
            muted: Color::Rgb(154, 160, 171),
            accent: Color::Rgb(212, 163, 115),
            success: Color::Rgb(127, 176, 105),
            warning: Color::Rgb(233, 196, 106),
            error: Color::Rgb(231, 111, 81),
            selection_bg: Color::Rgb(42, 47, 58),
            selection_fg: Color::Rgb(244, 237, 228),
        }
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 247, 242),
            panel: Color::Rgb(255, 255, 255),
            border: Color::Rgb(216, 210, 200),
            text: Color::Rgb(43, 39, 34),
            muted: Color::Rgb(107, 100, 89),
            accent: Color::Rgb(176, 113, 60),
            success: Color::Rgb(76, 135, 62),
            warning: Color::Rgb(176, 137, 38),
            error: Color::Rgb(186, 59, 33),
            selection_bg: Color::Rgb(236, 228, 215),
            selection_fg: Color::Rgb(43, 39, 34),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn preference() -> (Arc<MemoryStorage>, ThemePreference) {
        let storage = Arc::new(MemoryStorage::new());
        let pref = ThemePreference::open(Arc::clone(&storage) as Arc<dyn SharedStorage>);
        (storage, pref)
    }

    #[test]
    fn test_default_is_dark() {
        let (_, pref) = preference();
        assert_eq!(pref.theme(), Theme::Dark);
    }

    #[test]
    fn test_open_reads_stored_preference() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(THEME_KEY, "light").unwrap();
        let pref = ThemePreference::open(storage);
        assert_eq!(pref.theme(), Theme::Light);
    }

    #[test]
    fn test_unrecognized_stored_value_falls_back_to_dark() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(THEME_KEY, "solarized").unwrap();
        let pref = ThemePreference::open(storage);
        assert_eq!(pref.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists_the_token() {
        let (storage, mut pref) = preference();
        assert_eq!(pref.toggle().unwrap(), Theme::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap(), Some("light".to_string()));
        assert_eq!(pref.toggle().unwrap(), Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_storage_event_applies_foreign_change() {
        let (_, mut pref) = preference();
        let changed = pref.apply_storage_event(&StorageEvent {
            key: THEME_KEY.to_string(),
            old_value: None,
            new_value: Some("light".to_string()),
        });
        assert!(changed);
        assert_eq!(pref.theme(), Theme::Light);
    }

    #[test]
    fn test_storage_event_with_junk_value_means_dark() {
        let (_, mut pref) = preference();
        pref.set(Theme::Light).unwrap();
        let changed = pref.apply_storage_event(&StorageEvent {
            key: THEME_KEY.to_string(),
            old_value: Some("light".to_string()),
            new_value: Some("mauve".to_string()),
        });
        assert!(changed);
        assert_eq!(pref.theme(), Theme::Dark);
    }

    #[test]
    fn test_storage_event_for_other_keys_is_ignored() {
        let (_, mut pref) = preference();
        let changed = pref.apply_storage_event(&StorageEvent {
            key: "elegant_cart_v1".to_string(),
            old_value: None,
            new_value: Some("{}".to_string()),
        });
        assert!(!changed);
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
        assert!("LIGHT".parse::<Theme>().is_err());
    }

    #[test]
    fn test_toggle_label_names_the_other_scheme() {
        assert_eq!(Theme::Dark.toggle_label(), "☀️ Light Mode");
        assert_eq!(Theme::Light.toggle_label(), "🌙 Dark Mode");
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Palette::dark(), Palette::light());
        assert_eq!(Palette::for_theme(Theme::Dark), Palette::dark());
    }
}
