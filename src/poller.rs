//! OCR change polling for views with no structured text access.
//!
//! Some player surfaces render lyrics as pixels only. The poller screenshots
//! the live region on a fixed cadence, runs recognition, and reports a result
//! only when it differs from the previous reading. It is a finite, lazy,
//! non-restartable sequence: iterate it once per live session; a fresh
//! session requires a fresh region lookup.

use std::thread;

use tracing::{debug, warn};

use crate::classify::{is_meaningful, LanguageService};
use crate::config::{ClassifierConfig, ElementNames, PollerConfig};
use crate::driver::UiDriver;
use crate::error::EngineError;

/// Pull-driven OCR poller. The caller drives iteration; cancellation is
/// simply ceasing to pull, and the iteration cap guarantees termination.
pub struct OcrChangePoller<'a, D: UiDriver> {
    driver: &'a mut D,
    svc: &'a dyn LanguageService,
    region: String,
    cfg: PollerConfig,
    classifier: ClassifierConfig,
    last: String,
    remaining: usize,
    started: bool,
    done: bool,
}

impl<'a, D: UiDriver> OcrChangePoller<'a, D> {
    /// Start a polling session. Fails with `NotFound` when the live region
    /// is not currently visible.
    pub fn new(
        driver: &'a mut D,
        names: &ElementNames,
        cfg: PollerConfig,
        classifier: ClassifierConfig,
        svc: &'a dyn LanguageService,
    ) -> Result<Self, EngineError> {
        if driver.find_one(&names.live_region).is_none() {
            return Err(EngineError::NotFound("live lyrics region"));
        }
        let remaining = cfg.max_iterations;
        Ok(Self {
            driver,
            svc,
            region: names.live_region.clone(),
            cfg,
            classifier,
            last: String::new(),
            remaining,
            started: false,
            done: false,
        })
    }

    /// One screenshot + recognition pass. `None` when nothing usable came
    /// back — recognition failures are silently skipped, never propagated.
    fn recognize_once(&mut self, region: &D::Node) -> Option<String> {
        let image = match self.driver.screenshot(region) {
            Ok(image) => image,
            Err(e) => {
                warn!("ocr poller: screenshot failed: {e}");
                return None;
            }
        };
        match self
            .driver
            .recognize_text(&image, &self.cfg.language_hint)
        {
            Ok(text) => {
                let text = text.trim().to_string();
                (!text.is_empty()).then_some(text)
            }
            Err(e) => {
                warn!("ocr poller: recognition failed: {e}");
                None
            }
        }
    }
}

impl<D: UiDriver> Iterator for OcrChangePoller<'_, D> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        while self.remaining > 0 {
            // The cadence wait sits between passes, not between recognition
            // and delivery: a changed reading comes back immediately.
            if self.started {
                thread::sleep(self.cfg.interval);
            }
            self.started = true;

            let Some(region) = self.driver.find_one(&self.region) else {
                debug!("ocr poller: live region gone, ending session");
                self.done = true;
                return None;
            };

            let recognized = self.recognize_once(&region);
            self.remaining -= 1;

            if let Some(text) = recognized {
                if text == self.last {
                    continue;
                }
                if self.cfg.filter_noise && !is_meaningful(&text, &self.classifier, self.svc) {
                    debug!("ocr poller: dropping unmeaningful reading");
                    continue;
                }
                self.last = text.clone();
                return Some(text);
            }
        }
        self.done = true;
        None
    }
}
