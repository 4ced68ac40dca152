//! Anchor-based delta tracker for live (KTV) lyric synchronization.
//!
//! While a song plays, the player highlights the currently-singing line (the
//! anchor). Each poll locates the anchor in the visible window and extracts
//! the lines after it — the upcoming lyrics — deduplicating against the last
//! confirmed text so interludes are reported instead of repeats.
//!
//! When the anchor is not found in a pass, the tracker degrades to emitting
//! every line in the window unfiltered. That degraded output can include
//! lines already sung and is indistinguishable from genuine new content; a
//! known accuracy limitation, kept deliberately.

use tracing::{debug, info, warn};

use crate::config::{ElementNames, TrackerConfig};
use crate::driver::{UiDriver, UiNode};
use crate::error::EngineError;

/// Tracker state across polls of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Anchor found, mid-song.
    Tracking,
    /// The anchor sits near the top of the window — the song start is in
    /// view. The whole window is reused as output; no further scrolling.
    Finished,
    /// Anchor not located after a scroll. Recoverable: the next successful
    /// anchor read returns to `Tracking`.
    Lost,
}

/// One poll result. Errors are reported separately via [`EngineError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Newly confirmed lyric text.
    Text(String),
    /// The window matches the last confirmed text — the song is between
    /// verses.
    Interlude,
    /// The lyrics overlay is unavailable for the current song; the caller
    /// should skip it.
    Skip(String),
}

/// Stateful live-lyrics session. Construct one per continuous playback
/// session and discard it when the session ends or the song changes.
pub struct AnchorTracker {
    names: ElementNames,
    cfg: TrackerConfig,
    mode: AnchorMode,
    last_confirmed: String,
    disabled: bool,
}

impl AnchorTracker {
    pub fn new(names: ElementNames, cfg: TrackerConfig) -> Self {
        Self {
            names,
            cfg,
            mode: AnchorMode::Tracking,
            last_confirmed: String::new(),
            disabled: false,
        }
    }

    pub fn mode(&self) -> AnchorMode {
        self.mode
    }

    /// Run one tracking step: open the overlay, locate the anchor, scroll if
    /// the song is still mid-view, and extract the lines after the anchor.
    pub fn poll<D: UiDriver>(&mut self, driver: &mut D) -> Result<PollOutcome, EngineError> {
        if self.disabled {
            return Err(EngineError::SessionDisabled("overlay click went stale"));
        }

        let Some(overlay) = driver.find_one(&self.names.overlay_entry) else {
            info!("tracker: lyrics overlay unavailable, signalling skip");
            return Ok(PollOutcome::Skip(
                "no lyrics overlay for current song".into(),
            ));
        };
        if let Err(e) = driver.click(&overlay) {
            warn!("tracker: overlay click failed ({e}), disabling session");
            self.disabled = true;
            return Err(EngineError::SessionDisabled("overlay click went stale"));
        }

        // A near-top anchor means the song start is in view; reuse the whole
        // window and stop scrolling for the rest of the session.
        let mut finished = self.mode == AnchorMode::Finished;
        let mut anchor_seen = false;
        if let Some(anchor) = driver.find_one(&self.names.current_anchor) {
            anchor_seen = true;
            let (_, y) = anchor.position().map_err(|e| {
                warn!("tracker: anchor went stale while reading position");
                self.disabled = true;
                e
            })?;
            if y < self.cfg.near_top_px {
                debug!("tracker: anchor at y={y}, song start in view");
                finished = true;
            }
        }

        if !finished {
            self.scroll_toward_anchor(driver);
        }

        let mut groups = driver.find_all(&self.names.lyric_group);
        if groups.len() <= 1 {
            warn!("tracker: window has no advanceable content, session failed");
            self.disabled = true;
            return Err(EngineError::NoAdvanceableContent);
        }
        // The trailing group is a decorative element, never a lyric row.
        groups.pop();

        let mut found = false;
        let mut text = String::new();
        if !finished {
            for group in &groups {
                if found {
                    append_group_line(driver, group, &self.names.lyric_line, &mut text);
                } else if driver
                    .find_child(group, &self.names.current_anchor)
                    .is_some()
                {
                    found = true;
                }
            }
        }
        if !found || finished {
            // Degraded mode: anchor not in any group (or song start in
            // view) — emit every group's text line unfiltered.
            for group in &groups {
                append_group_line(driver, group, &self.names.lyric_line, &mut text);
            }
        }

        if text.is_empty() {
            warn!("tracker: no lyric text in window, session failed");
            self.disabled = true;
            return Err(EngineError::NoAdvanceableContent);
        }

        // An unchanged window is an interlude: report it and leave the
        // tracker exactly as the last confirming poll left it.
        if text == self.last_confirmed {
            debug!("tracker: window unchanged, interlude");
            return Ok(PollOutcome::Interlude);
        }

        let previous = self.mode;
        self.mode = if finished {
            AnchorMode::Finished
        } else if found || anchor_seen {
            AnchorMode::Tracking
        } else {
            AnchorMode::Lost
        };
        if previous != self.mode {
            info!("tracker: {previous:?} -> {:?}", self.mode);
        }

        self.last_confirmed = text.clone();
        Ok(PollOutcome::Text(text))
    }

    fn scroll_toward_anchor<D: UiDriver>(&mut self, driver: &mut D) {
        let (w, h) = driver.screen_size();
        let x = (w / 2) as i32;
        let from = (h as f32 * self.cfg.scroll_from) as i32;
        let to = (h as f32 * self.cfg.scroll_to) as i32;
        driver.swipe(x, from, x, to, self.cfg.scroll_duration);
    }
}

/// Append a group's text sub-line (newline-terminated) if it is readable.
fn append_group_line<D: UiDriver>(
    driver: &mut D,
    group: &D::Node,
    line_name: &str,
    out: &mut String,
) {
    if let Some(line) = driver.find_child(group, line_name) {
        if let Ok(t) = line.text() {
            out.push_str(&t);
            out.push('\n');
        }
    }
}
