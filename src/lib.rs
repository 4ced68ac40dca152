//! lyricflow — incremental text synchronization engine.
//!
//! Reconstructs complete, duplicate-free text (song lyrics) from a screen
//! that only ever shows a small window of a much longer document. The host
//! automation process supplies screen access through the [`UiDriver`] trait;
//! this crate supplies the algorithms: overlap-merging scroll collection,
//! identity-based collection, anchor-based live tracking (KTV mode),
//! OCR change polling, and balanced pagination of the final text.

pub mod classify;
pub mod collector;
pub mod config;
pub mod driver;
pub mod error;
pub mod merge;
pub mod paginate;
pub mod poller;
pub mod tracker;

pub use classify::{is_meaningful, LanguageService, WhatlangJieba};
pub use collector::{IdentityCollector, ScrollCollector, Snapshot, TextBudget, VisibleLine};
pub use config::{ClassifierConfig, CollectorConfig, ElementNames, PollerConfig, TrackerConfig};
pub use driver::{NodeId, UiDriver, UiNode};
pub use error::EngineError;
pub use paginate::paginate;
pub use poller::OcrChangePoller;
pub use tracker::{AnchorMode, AnchorTracker, PollOutcome};
