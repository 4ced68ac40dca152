//! Meaningfulness classifier for recognized text.
//!
//! OCR over an animated lyric overlay produces plenty of garbage — fragments
//! of album art, progress timestamps, half-rendered glyphs. This module
//! judges whether a string is linguistically plausible lyric content before
//! it is surfaced. Any internal failure is "not meaningful", never an error.

use tracing::debug;
use whatlang::Lang;

use crate::config::ClassifierConfig;

/// Language identification + segmentation seam.
///
/// The production backend is [`WhatlangJieba`]; tests substitute scripted
/// candidates. `language_id` returns ranked candidates, empty on failure.
pub trait LanguageService {
    fn language_id(&self, text: &str) -> Vec<(Lang, f64)>;

    /// Segment `text` into tokens for the given language. Only consulted for
    /// CJK candidates.
    fn tokenize(&self, text: &str, lang: Lang) -> Vec<String>;
}

/// Production language backend: whatlang detection, jieba segmentation.
pub struct WhatlangJieba;

static JIEBA: once_cell::sync::Lazy<jieba_rs::Jieba> =
    once_cell::sync::Lazy::new(jieba_rs::Jieba::new);

impl LanguageService for WhatlangJieba {
    fn language_id(&self, text: &str) -> Vec<(Lang, f64)> {
        match whatlang::detect(text) {
            Some(info) => vec![(info.lang(), info.confidence())],
            None => Vec::new(),
        }
    }

    fn tokenize(&self, text: &str, _lang: Lang) -> Vec<String> {
        JIEBA
            .cut(text, false)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

/// Whether the language belongs to the CJK family.
pub fn is_cjk(lang: Lang) -> bool {
    matches!(lang, Lang::Cmn | Lang::Jpn | Lang::Kor)
}

/// Judge whether `text` is plausible lyric content.
///
/// CJK text is segmented and rejected when it is too fragmented (mostly
/// single-character tokens) or when segmentation produced more tokens than
/// characters. Other scripts are judged on word count and average word
/// length.
pub fn is_meaningful(text: &str, cfg: &ClassifierConfig, svc: &dyn LanguageService) -> bool {
    let char_count = text.chars().count();
    if char_count < cfg.min_chars {
        return false;
    }

    let candidates = svc.language_id(text);
    let Some((lang, _confidence)) = candidates.first() else {
        debug!("classifier: language id failed, rejecting");
        return false;
    };

    if is_cjk(*lang) {
        let tokens = svc.tokenize(text, *lang);
        if tokens.len() < 2 || tokens.len() > char_count {
            return false;
        }
        let single = tokens.iter().filter(|t| t.chars().count() == 1).count();
        let ratio = single as f64 / tokens.len() as f64;
        if ratio > cfg.max_single_char_ratio {
            debug!("classifier: cjk text too fragmented ({ratio:.2})");
            return false;
        }
        true
    } else {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() < 2 {
            return false;
        }
        let total: usize = words.iter().map(|w| w.chars().count()).sum();
        let avg = total as f64 / words.len() as f64;
        if avg < cfg.min_avg_word_len || avg > cfg.max_avg_word_len {
            debug!("classifier: average word length {avg:.1} out of range");
            return false;
        }
        true
    }
}
