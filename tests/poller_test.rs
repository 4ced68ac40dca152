//! Integration tests for the OCR change-poller.

mod common;

use std::time::{Duration, Instant};

use common::{node, FakeDriver};
use lyricflow::{
    ClassifierConfig, ElementNames, EngineError, OcrChangePoller, PollerConfig, WhatlangJieba,
};

fn live_region() -> common::FakeNode {
    node("live_lyrics").with_text("live")
}

fn cfg(max_iterations: usize, filter_noise: bool) -> PollerConfig {
    PollerConfig {
        max_iterations,
        interval: Duration::ZERO,
        filter_noise,
        ..PollerConfig::default()
    }
}

#[test]
fn test_yields_only_when_recognized_text_changes() {
    let mut driver = FakeDriver::new(vec![vec![live_region()]])
        .with_ocr(&["verse one", "verse one", "verse two"]);
    let names = ElementNames::default();
    let svc = WhatlangJieba;

    let poller = OcrChangePoller::new(
        &mut driver,
        &names,
        cfg(5, false),
        ClassifierConfig::default(),
        &svc,
    )
    .unwrap();
    let readings: Vec<String> = poller.collect();
    // The repeat on the second pass produces nothing.
    assert_eq!(readings, vec!["verse one", "verse two"]);
}

#[test]
fn test_iteration_cap_bounds_the_session() {
    let mut driver = FakeDriver::new(vec![vec![live_region()]])
        .with_ocr(&["same text", "same text", "same text", "same text"]);
    let names = ElementNames::default();
    let svc = WhatlangJieba;

    {
        let mut poller = OcrChangePoller::new(
            &mut driver,
            &names,
            cfg(2, false),
            ClassifierConfig::default(),
            &svc,
        )
        .unwrap();
        assert_eq!(poller.next().unwrap(), "same text");
        assert!(poller.next().is_none());
        // Fused: once done, pulls stay empty.
        assert!(poller.next().is_none());
    }
    // Only two recognition passes ran.
    assert_eq!(driver.ocr.len(), 2);
}

#[test]
fn test_changed_reading_is_delivered_before_the_cadence_wait() {
    let mut driver = FakeDriver::new(vec![vec![live_region()]]).with_ocr(&["fresh line"]);
    let names = ElementNames::default();
    let svc = WhatlangJieba;

    let mut poller = OcrChangePoller::new(
        &mut driver,
        &names,
        PollerConfig {
            max_iterations: 3,
            interval: Duration::from_millis(250),
            filter_noise: false,
            ..PollerConfig::default()
        },
        ClassifierConfig::default(),
        &svc,
    )
    .unwrap();

    // The wait runs between passes, so the first changed reading comes
    // back without serving a full interval.
    let start = Instant::now();
    assert_eq!(poller.next().unwrap(), "fresh line");
    assert!(start.elapsed() < Duration::from_millis(200));
}

#[test]
fn test_region_disappearance_ends_early() {
    let mut driver =
        FakeDriver::new(vec![vec![live_region()]]).with_ocr(&["first", "second", "third"]);
    // One lookup for the constructor, one for the first pass; then gone.
    driver.region_reads = Some(2);
    let names = ElementNames::default();
    let svc = WhatlangJieba;

    let poller = OcrChangePoller::new(
        &mut driver,
        &names,
        cfg(9, false),
        ClassifierConfig::default(),
        &svc,
    )
    .unwrap();
    let readings: Vec<String> = poller.collect();
    assert_eq!(readings, vec!["first"]);
}

#[test]
fn test_missing_region_is_not_found() {
    let mut driver = FakeDriver::new(vec![vec![]]);
    let names = ElementNames::default();
    let svc = WhatlangJieba;

    let Err(err) = OcrChangePoller::new(
        &mut driver,
        &names,
        cfg(9, false),
        ClassifierConfig::default(),
        &svc,
    ) else {
        panic!("poller started without a live region");
    };
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[test]
fn test_noise_filter_drops_implausible_readings() {
    let mut driver = FakeDriver::new(vec![vec![live_region()]]).with_ocr(&[
        // A single "word" is rejected by the classifier no matter what
        // language the detector guesses.
        "jkqzxvwblorp",
        "the quick brown fox jumps over the lazy sleeping dog tonight",
    ]);
    let names = ElementNames::default();
    let svc = WhatlangJieba;

    let poller = OcrChangePoller::new(
        &mut driver,
        &names,
        cfg(3, true),
        ClassifierConfig::default(),
        &svc,
    )
    .unwrap();
    let readings: Vec<String> = poller.collect();
    assert_eq!(
        readings,
        vec!["the quick brown fox jumps over the lazy sleeping dog tonight"]
    );
}

#[test]
fn test_recognition_failures_are_skipped_silently() {
    // The OCR queue empties after one reading; later passes fail and the
    // poller just runs out its iterations.
    let mut driver = FakeDriver::new(vec![vec![live_region()]]).with_ocr(&["only reading"]);
    let names = ElementNames::default();
    let svc = WhatlangJieba;

    let poller = OcrChangePoller::new(
        &mut driver,
        &names,
        cfg(4, false),
        ClassifierConfig::default(),
        &svc,
    )
    .unwrap();
    let readings: Vec<String> = poller.collect();
    assert_eq!(readings, vec!["only reading"]);
}
