//! UI/OCR collaborator contract.
//!
//! The engine never talks to a concrete automation stack; the host process
//! implements [`UiDriver`] on top of whatever it drives the target app with
//! (Appium, uiautomator, a test double). Everything here is blocking — one
//! engine step runs one read/gesture at a time, and the driver's own per-call
//! timeout is the only timeout in play.

use std::time::Duration;

use image::DynamicImage;

use crate::error::EngineError;

/// Opaque identity of a rendered UI element. Stable only while the host UI
/// has not recreated the element; treat a changed or absent id as unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A handle to one visible text element.
///
/// Every accessor can fail with [`EngineError::StaleReference`]: the handle
/// may outlive the node it was read from, exactly like a WebElement that the
/// list view has since recycled.
pub trait UiNode {
    /// The element's rendered text.
    fn text(&self) -> Result<String, EngineError>;

    /// Top-left corner in screen coordinates.
    fn position(&self) -> Result<(i32, i32), EngineError>;

    /// Width and height in pixels.
    fn size(&self) -> Result<(u32, u32), EngineError>;

    /// Stable identity, if the element exposes one.
    fn identity(&self) -> Option<NodeId>;
}

/// Screen access the engine consumes. Symbolic names are resolved to real
/// locators by the implementation (the engine's [`ElementNames`] config only
/// carries the names, never locator syntax).
///
/// [`ElementNames`]: crate::config::ElementNames
pub trait UiDriver {
    type Node: UiNode;

    /// All currently visible elements matching `name`, in document order.
    /// Empty when none are visible — not an error.
    fn find_all(&mut self, name: &str) -> Vec<Self::Node>;

    /// First visible element matching `name`, if any.
    fn find_one(&mut self, name: &str) -> Option<Self::Node>;

    /// First matching descendant of `parent`, if any.
    fn find_child(&mut self, parent: &Self::Node, name: &str) -> Option<Self::Node>;

    /// All matching descendants of `parent`, in document order.
    fn find_children(&mut self, parent: &Self::Node, name: &str) -> Vec<Self::Node>;

    /// Click an element. Fails with `StaleReference` when the handle no
    /// longer corresponds to a live node.
    fn click(&mut self, node: &Self::Node) -> Result<(), EngineError>;

    /// Fire-and-forget touch gesture from (x1, y1) to (x2, y2).
    fn swipe(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, duration: Duration);

    /// Full screen dimensions in pixels.
    fn screen_size(&mut self) -> (u32, u32);

    /// Capture the region covered by `node`.
    fn screenshot(&mut self, node: &Self::Node) -> Result<DynamicImage, EngineError>;

    /// Run OCR over a captured region. `language_hint` is passed through to
    /// the recognition backend (e.g. `"chi_sim+eng"`).
    fn recognize_text(
        &mut self,
        image: &DynamicImage,
        language_hint: &str,
    ) -> Result<String, EngineError>;
}
