//! Scripted in-memory driver for exercising the collection loops.
//!
//! A `FakeDriver` holds a sequence of screens; every swipe gesture advances
//! to the next screen, which is how the tests model scrolling. OCR output is
//! scripted as a queue consumed by `recognize_text`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use image::DynamicImage;
use lyricflow::{EngineError, NodeId, UiDriver, UiNode};

/// Route engine logs into the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub name: String,
    pub text: Option<String>,
    pub id: Option<String>,
    pub pos: (i32, i32),
    pub dims: (u32, u32),
    pub children: Vec<FakeNode>,
    pub stale_click: bool,
}

/// A node with no text — reading it behaves like a recycled element.
pub fn node(name: &str) -> FakeNode {
    FakeNode {
        name: name.into(),
        dims: (1080, 80),
        ..Default::default()
    }
}

impl FakeNode {
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn at_y(mut self, y: i32) -> Self {
        self.pos.1 = y;
        self
    }

    pub fn sized(mut self, w: u32, h: u32) -> Self {
        self.dims = (w, h);
        self
    }

    pub fn with_child(mut self, child: FakeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn stale_on_click(mut self) -> Self {
        self.stale_click = true;
        self
    }
}

impl UiNode for FakeNode {
    fn text(&self) -> Result<String, EngineError> {
        self.text
            .clone()
            .ok_or(EngineError::StaleReference("fake node"))
    }

    fn position(&self) -> Result<(i32, i32), EngineError> {
        Ok(self.pos)
    }

    fn size(&self) -> Result<(u32, u32), EngineError> {
        Ok(self.dims)
    }

    fn identity(&self) -> Option<NodeId> {
        self.id.as_deref().map(NodeId::new)
    }
}

pub struct FakeDriver {
    pub screens: Vec<Vec<FakeNode>>,
    pub idx: usize,
    pub swipes: Vec<(i32, i32, i32, i32)>,
    pub size: (u32, u32),
    /// Scripted OCR output, popped per recognition call; empty = failure.
    pub ocr: VecDeque<String>,
    /// Remaining successful lookups of the live region; `None` = unlimited.
    pub region_reads: Option<usize>,
}

impl FakeDriver {
    pub fn new(screens: Vec<Vec<FakeNode>>) -> Self {
        Self {
            screens,
            idx: 0,
            swipes: Vec::new(),
            size: (1080, 2340),
            ocr: VecDeque::new(),
            region_reads: None,
        }
    }

    pub fn with_ocr(mut self, readings: &[&str]) -> Self {
        self.ocr = readings.iter().map(|s| s.to_string()).collect();
        self
    }

    fn current(&self) -> &[FakeNode] {
        self.screens.get(self.idx).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl UiDriver for FakeDriver {
    type Node = FakeNode;

    fn find_all(&mut self, name: &str) -> Vec<FakeNode> {
        self.current()
            .iter()
            .filter(|n| n.name == name)
            .cloned()
            .collect()
    }

    fn find_one(&mut self, name: &str) -> Option<FakeNode> {
        if name == "live_lyrics" {
            if let Some(reads) = &mut self.region_reads {
                if *reads == 0 {
                    return None;
                }
                *reads -= 1;
            }
        }
        self.current().iter().find(|n| n.name == name).cloned()
    }

    fn find_child(&mut self, parent: &FakeNode, name: &str) -> Option<FakeNode> {
        parent.children.iter().find(|n| n.name == name).cloned()
    }

    fn find_children(&mut self, parent: &FakeNode, name: &str) -> Vec<FakeNode> {
        parent
            .children
            .iter()
            .filter(|n| n.name == name)
            .cloned()
            .collect()
    }

    fn click(&mut self, node: &FakeNode) -> Result<(), EngineError> {
        if node.stale_click {
            Err(EngineError::StaleReference("fake click"))
        } else {
            Ok(())
        }
    }

    fn swipe(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, _duration: Duration) {
        self.swipes.push((x1, y1, x2, y2));
        self.idx += 1;
    }

    fn screen_size(&mut self) -> (u32, u32) {
        self.size
    }

    fn screenshot(&mut self, _node: &FakeNode) -> Result<DynamicImage, EngineError> {
        Ok(DynamicImage::new_rgba8(4, 4))
    }

    fn recognize_text(
        &mut self,
        _image: &DynamicImage,
        _language_hint: &str,
    ) -> Result<String, EngineError> {
        self.ocr.pop_front().ok_or(EngineError::Recognition)
    }
}

/// One lyric line node as the player renders it.
pub fn line(text: &str) -> FakeNode {
    node("lyric_line").with_text(text)
}

/// A lyric line with a stable element identity.
pub fn line_id(text: &str, id: &str) -> FakeNode {
    line(text).with_id(id)
}

/// A lyric row group containing a text sub-line.
pub fn group(text: &str) -> FakeNode {
    node("lyric_group").with_child(line(text))
}

/// The group that holds the currently-singing line.
pub fn anchor_group(text: &str) -> FakeNode {
    group(text).with_child(node("current_lyric").with_text(text))
}
