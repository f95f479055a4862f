//! Frontend settings and preferences
//!
//! Read once at startup from the `ELLIOT_DASH_SETTINGS` environment variable
//! (a JSON object). Missing fields take their defaults. Gameplay tuning is
//! not configurable here; it lives in `consts`.

use serde::{Deserialize, Serialize};

/// Character set used to draw the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Block and box-drawing characters
    #[default]
    Unicode,
    /// Plain ASCII for terminals without good font coverage
    Ascii,
}

impl GlyphSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlyphSet::Unicode => "Unicode",
            GlyphSet::Ascii => "ASCII",
        }
    }

    /// Solid fill for obstacles
    pub fn block(&self) -> char {
        match self {
            GlyphSet::Unicode => '█',
            GlyphSet::Ascii => '#',
        }
    }

    /// Ground line
    pub fn ground(&self) -> char {
        match self {
            GlyphSet::Unicode => '▔',
            GlyphSet::Ascii => '=',
        }
    }

    /// Player body
    pub fn player(&self) -> char {
        match self {
            GlyphSet::Unicode => '▓',
            GlyphSet::Ascii => '@',
        }
    }

    /// Portal ring, from just opened to fully open
    pub fn portal_stages(&self) -> [char; 4] {
        match self {
            GlyphSet::Unicode => ['·', '∘', '○', '◎'],
            GlyphSet::Ascii => ['.', 'o', 'O', '0'],
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame pacing target
    pub target_fps: u32,
    /// Show an FPS counter next to the score
    pub show_fps: bool,
    /// Characters used for drawing
    pub glyphs: GlyphSet,
    /// Fixed spawner seed (random per launch when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            show_fps: false,
            glyphs: GlyphSet::Unicode,
            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable holding the JSON settings object
    pub const ENV_VAR: &'static str = "ELLIOT_DASH_SETTINGS";

    /// Parse settings from JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring invalid settings ({e}); using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from the environment
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(json) => {
                let settings = Self::from_json(&json);
                log::info!(
                    "Loaded settings from {} ({} glyphs, {} fps)",
                    Self::ENV_VAR,
                    settings.glyphs.as_str(),
                    settings.target_fps
                );
                settings
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or spin the frame loop
    fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(10, 240);
        self
    }

    /// Spawner seed: the configured one, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5EED)
        })
    }
}
