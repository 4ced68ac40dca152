//! Engine configuration.
//!
//! Defaults carry the production constants for the target player UI. Hosts
//! can deserialize these from their settings file; the engine itself never
//! reads configuration from disk.

use std::time::Duration;

use serde::Deserialize;

/// Symbolic element names the engine asks the driver to resolve.
/// The mapping from name to concrete locator lives in the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElementNames {
    /// One rendered lyric line.
    pub lyric_line: String,
    /// Container row holding an optional anchor sub-line plus a text sub-line.
    pub lyric_group: String,
    /// The currently-singing line marker.
    pub current_anchor: String,
    /// Explicit end-of-content marker below the last lyric line.
    pub end_marker: String,
    /// Scrollable container for the identity-based collector.
    pub lyric_container: String,
    /// Region showing live lyrics when only OCR access is possible.
    pub live_region: String,
    /// Entry that opens the full-lyrics overlay during playback.
    pub overlay_entry: String,
}

impl Default for ElementNames {
    fn default() -> Self {
        Self {
            lyric_line: "lyric_line".into(),
            lyric_group: "lyric_group".into(),
            current_anchor: "current_lyric".into(),
            end_marker: "lyrics_end".into(),
            lyric_container: "lyric_container".into(),
            live_region: "live_lyrics".into(),
            overlay_entry: "lyrics_poster".into(),
        }
    }
}

/// Settings for the scroll-based collectors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Character budget for overlap-merged collection.
    pub scroll_budget: usize,
    /// Character budget for the identity-based variant.
    pub identity_budget: usize,
    /// Scroll start, as a fraction of viewport height.
    pub scroll_from: f32,
    /// Scroll end, as a fraction of viewport height.
    pub scroll_to: f32,
    /// Gesture duration.
    pub scroll_duration: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            scroll_budget: 400,
            identity_budget: 500,
            scroll_from: 0.70,
            scroll_to: 0.30,
            scroll_duration: Duration::from_millis(400),
        }
    }
}

/// Settings for the anchor-based live tracker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Anchor y-position below which the song start is considered in view.
    pub near_top_px: i32,
    /// Scroll start, as a fraction of screen height.
    pub scroll_from: f32,
    /// Scroll end, as a fraction of screen height.
    pub scroll_to: f32,
    /// Gesture duration.
    pub scroll_duration: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            near_top_px: 1000,
            scroll_from: 0.60,
            scroll_to: 0.35,
            scroll_duration: Duration::from_millis(400),
        }
    }
}

/// Settings for the OCR change-poller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Hard cap on polling iterations; guarantees termination.
    pub max_iterations: usize,
    /// Sleep between iterations.
    pub interval: Duration,
    /// Passed through to the recognition backend.
    pub language_hint: String,
    /// Drop recognized text the meaningfulness classifier rejects.
    pub filter_noise: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 9,
            interval: Duration::from_secs(1),
            language_hint: "chi_sim+eng".into(),
            filter_noise: true,
        }
    }
}

/// Thresholds for the meaningfulness classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Strings shorter than this are never meaningful.
    pub min_chars: usize,
    /// CJK: reject when the fraction of single-character tokens exceeds this.
    pub max_single_char_ratio: f64,
    /// Non-CJK: reject when the average word length falls outside this range.
    pub min_avg_word_len: f64,
    pub max_avg_word_len: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_chars: 2,
            max_single_char_ratio: 0.8,
            min_avg_word_len: 2.0,
            max_avg_word_len: 15.0,
        }
    }
}
