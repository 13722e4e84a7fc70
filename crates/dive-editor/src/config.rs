//! Built-in editor settings.
//!
//! There is no configuration file and no command line. Everything the
//! editor needs to know about itself is fixed at compile time here.

use dive_term::input::KeyEvent;

/// Name shown in the welcome banner.
pub const PRODUCT_NAME: &str = "DIVE EDITOR";

/// Version shown in the welcome banner, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor identity and key bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub product_name: String,
    pub version: String,
    /// Chord that clears the screen and exits.
    pub quit_key: KeyEvent,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            product_name: PRODUCT_NAME.to_owned(),
            version: VERSION.to_owned(),
            quit_key: KeyEvent::ctrl('q'),
        }
    }
}

impl EditorConfig {
    /// The welcome line, e.g. `DIVE EDITOR -- VERSION 0.0.1`.
    #[must_use]
    pub fn banner(&self) -> String {
        format!("{} -- VERSION {}", self.product_name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dive_term::input::ctrl_key;

    #[test]
    fn default_banner() {
        assert_eq!(
            EditorConfig::default().banner(),
            "DIVE EDITOR -- VERSION 0.0.1"
        );
    }

    #[test]
    fn default_quit_is_ctrl_q() {
        let config = EditorConfig::default();
        assert_eq!(config.quit_key, KeyEvent::from_byte(ctrl_key(b'q')));
    }

    #[test]
    fn custom_banner() {
        let config = EditorConfig {
            product_name: "X".into(),
            version: "9".into(),
            ..EditorConfig::default()
        };
        assert_eq!(config.banner(), "X -- VERSION 9");
    }
}
