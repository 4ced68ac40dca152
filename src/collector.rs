//! Scroll-based text collectors.
//!
//! Both collectors reconstruct a complete text blob from a view that only
//! renders a small window of the document. [`ScrollCollector`] dedups by
//! text overlap between consecutive reads; [`IdentityCollector`] dedups by
//! element identity when the view exposes stable ids across reads. Every
//! loop has a monotonic stopping condition: budget exhaustion, an explicit
//! end marker, an empty or failed read.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::{CollectorConfig, ElementNames};
use crate::driver::{NodeId, UiDriver, UiNode};
use crate::error::EngineError;
use crate::merge;

/// One rendered line as read from the screen.
#[derive(Debug, Clone)]
pub struct VisibleLine {
    pub text: String,
    pub identity: Option<NodeId>,
    pub y: Option<i32>,
}

/// One read of the visible window, top to bottom. Ephemeral: the collectors
/// retain at most the previous snapshot, never a history.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub window: Vec<VisibleLine>,
    pub at: DateTime<Utc>,
}

/// Read a node list into a snapshot. Stale or blank lines are dropped — a
/// single bad element never aborts the read.
fn snapshot_nodes<N: UiNode>(nodes: &[N]) -> Snapshot {
    let window = nodes
        .iter()
        .filter_map(|n| {
            let text = n.text().ok()?.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(VisibleLine {
                text,
                identity: n.identity(),
                y: n.position().ok().map(|(_, y)| y),
            })
        })
        .collect();
    Snapshot {
        window,
        at: Utc::now(),
    }
}

/// Append-only line accumulator with a hard character budget.
///
/// Once a push would exceed the budget, accumulation stops permanently for
/// the session; the partial result is still valid output.
#[derive(Debug)]
pub struct TextBudget {
    lines: Vec<String>,
    chars: usize,
    limit: usize,
    exhausted: bool,
}

impl TextBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: Vec::new(),
            chars: 0,
            limit,
            exhausted: false,
        }
    }

    /// Append a line unless it would push the running count past the limit.
    /// Returns `false` (and refuses all further pushes) once exhausted.
    pub fn push(&mut self, line: &str) -> bool {
        if self.exhausted {
            return false;
        }
        let len = line.chars().count();
        if self.chars + len > self.limit {
            self.exhausted = true;
            return false;
        }
        self.chars += len;
        self.lines.push(line.to_string());
        true
    }

    pub fn chars(&self) -> usize {
        self.chars
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Newline-joined result, or `None` when nothing was ever collected.
    pub fn into_text(self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        }
    }
}

/// Collects the full document by repeated read → merge → scroll rounds.
///
/// One session per call: construct, run [`collect`](Self::collect), discard.
pub struct ScrollCollector<'a, D: UiDriver> {
    driver: &'a mut D,
    names: &'a ElementNames,
    cfg: &'a CollectorConfig,
}

impl<'a, D: UiDriver> ScrollCollector<'a, D> {
    pub fn new(driver: &'a mut D, names: &'a ElementNames, cfg: &'a CollectorConfig) -> Self {
        Self { driver, names, cfg }
    }

    /// Run the collection loop until a stop condition fires. Never fatal:
    /// a bad read ends the loop and whatever accumulated is returned.
    /// `None` means no content was ever visible.
    pub fn collect(mut self) -> Option<String> {
        let mut budget = TextBudget::new(self.cfg.scroll_budget);
        let mut previous: Vec<String> = Vec::new();

        loop {
            let nodes = self.driver.find_all(&self.names.lyric_line);
            if nodes.is_empty() {
                debug!("scroll collector: no lyric lines visible, stopping");
                break;
            }

            let snapshot = snapshot_nodes(&nodes);
            let current: Vec<String> =
                snapshot.window.into_iter().map(|l| l.text).collect();
            if current.is_empty() {
                debug!("scroll collector: window read produced no usable text");
                break;
            }

            let fresh = merge::new_lines(&previous, &current);
            let mut over_budget = false;
            for line in fresh {
                if !budget.push(line) {
                    info!(
                        "scroll collector: budget reached at {} chars, stopping",
                        budget.chars()
                    );
                    over_budget = true;
                    break;
                }
            }
            if over_budget {
                break;
            }

            if self.driver.find_one(&self.names.end_marker).is_some() {
                debug!("scroll collector: end marker reached");
                break;
            }

            previous = current;
            self.scroll_viewport();
        }

        info!(
            "scroll collector: collected {} lines ({} chars)",
            budget.line_count(),
            budget.chars()
        );
        budget.into_text()
    }

    /// Fixed-ratio scroll gesture over the viewport.
    fn scroll_viewport(&mut self) {
        let (w, h) = self.driver.screen_size();
        let x = (w / 2) as i32;
        let from = (h as f32 * self.cfg.scroll_from) as i32;
        let to = (h as f32 * self.cfg.scroll_to) as i32;
        self.driver.swipe(x, from, x, to, self.cfg.scroll_duration);
    }
}

/// Collects a long combined view by element identity instead of text overlap.
///
/// Reads the container once, remembers every identity and the identity of the
/// last line, scrolls once toward the end, then appends only lines past the
/// remembered last identity whose ids were never seen. Cannot detect
/// reordering — only use when the view keeps ids stable across reads.
pub struct IdentityCollector<'a, D: UiDriver> {
    driver: &'a mut D,
    names: &'a ElementNames,
    cfg: &'a CollectorConfig,
}

impl<'a, D: UiDriver> IdentityCollector<'a, D> {
    pub fn new(driver: &'a mut D, names: &'a ElementNames, cfg: &'a CollectorConfig) -> Self {
        Self { driver, names, cfg }
    }

    pub fn collect(mut self) -> Result<String, EngineError> {
        let container = self
            .driver
            .find_one(&self.names.lyric_container)
            .ok_or(EngineError::NotFound("lyric container"))?;

        let nodes = self.driver.find_children(&container, &self.names.lyric_line);
        if nodes.is_empty() {
            return Err(EngineError::NotFound("lyric lines"));
        }

        let mut budget = TextBudget::new(self.cfg.identity_budget);
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut last_id: Option<NodeId> = None;

        for line in snapshot_nodes(&nodes).window {
            if !budget.push(&line.text) {
                break;
            }
            if let Some(id) = line.identity {
                seen.insert(id.clone());
                last_id = Some(id);
            }
        }
        debug!(
            "identity collector: {} lines before scroll, last id {:?}",
            budget.line_count(),
            last_id
        );

        self.scroll_container(&container);

        // The scroll re-renders the list, so the pre-scroll handle no longer
        // reflects what is on screen. Re-resolve it; a vanished container
        // ends the read with what was already collected.
        let Some(container) = self.driver.find_one(&self.names.lyric_container) else {
            warn!("identity collector: container gone after scroll, keeping first window");
            return budget
                .into_text()
                .ok_or(EngineError::NotFound("lyric lines"));
        };

        let nodes = self.driver.find_children(&container, &self.names.lyric_line);
        // Skip forward past everything up to and including the remembered
        // last line; those are already collected. With no remembered id the
        // whole second read is candidate content.
        let mut past_last = last_id.is_none();
        for node in &nodes {
            let id = node.identity();
            if !past_last {
                if id.is_some() && id == last_id {
                    past_last = true;
                }
                continue;
            }
            if let Some(id) = &id {
                if seen.contains(id) {
                    continue;
                }
            }
            let Ok(text) = node.text() else {
                warn!("identity collector: stale line after scroll, skipping");
                continue;
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if !budget.push(text) {
                info!(
                    "identity collector: budget reached at {} chars",
                    budget.chars()
                );
                break;
            }
            if let Some(id) = id {
                seen.insert(id);
            }
        }

        info!(
            "identity collector: collected {} lines ({} chars)",
            budget.line_count(),
            budget.chars()
        );
        budget
            .into_text()
            .ok_or(EngineError::NotFound("lyric lines"))
    }

    /// One scroll toward the end of the container, scaled to its bounds.
    fn scroll_container(&mut self, container: &D::Node) {
        let (Ok((cx, cy)), Ok((cw, ch))) = (container.position(), container.size()) else {
            warn!("identity collector: container went stale before scroll");
            return;
        };
        let x = cx + (cw / 2) as i32;
        let from = cy + (ch as f32 * self.cfg.scroll_from) as i32;
        let to = cy + (ch as f32 * self.cfg.scroll_to) as i32;
        self.driver.swipe(x, from, x, to, self.cfg.scroll_duration);
    }
}
