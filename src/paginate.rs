//! Balanced pagination of a completed text blob for staged display.
//!
//! Chat surfaces cap message size, so a full lyric sheet is delivered as a
//! handful of roughly equal pages. Two passes: first greedily combine
//! adjacent short lines up to a width cap, then cut the combined lines into
//! groups whose lengths track `total / num_groups` as closely as possible.

/// Partition `text` into newline-joined groups.
///
/// `max_width` caps one combined display line; `force_groups` fixes the
/// group count (0 picks `ceil(len / 500)`). All lengths are in characters.
/// Empty input yields an empty vector. HTML entities are decoded first —
/// lyric text scraped from the player frequently carries `&amp;` and
/// friends.
pub fn paginate(text: &str, max_width: usize, force_groups: usize) -> Vec<String> {
    let text = html_escape::decode_html_entities(text);
    let total = text.chars().count();

    let num_groups = if force_groups > 0 {
        force_groups
    } else {
        total.div_ceil(500)
    };

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l: &&str| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Vec::new();
    }
    let target = total as f64 / num_groups.max(1) as f64;

    // Pass 1: greedily join adjacent lines (space-separated) within the
    // width cap.
    let mut combined: Vec<String> = Vec::new();
    let mut current = lines[0].to_string();
    for next in &lines[1..] {
        if current.chars().count() + 1 + next.chars().count() <= max_width {
            current.push(' ');
            current.push_str(next);
        } else {
            combined.push(current);
            current = next.to_string();
        }
    }
    combined.push(current);

    // Pass 2: cut into groups, closing a group whenever appending the next
    // line would land farther from the target than stopping here — but never
    // close more than `num_groups - 1` times; the last group absorbs the
    // remainder.
    let mut groups: Vec<String> = Vec::new();
    let mut group: Vec<String> = Vec::new();
    let mut length: usize = 0;
    for line in combined {
        let line_len = line.chars().count();
        let new_length = length + line_len + 1; // +1 for the joining newline
        let closes_left = groups.len() < num_groups.saturating_sub(1);
        if length > 0
            && (new_length as f64 - target).abs() > (length as f64 - target).abs()
            && closes_left
        {
            groups.push(group.join("\n"));
            group = vec![line];
            length = line_len;
        } else {
            group.push(line);
            length = new_length;
        }
    }
    if !group.is_empty() {
        groups.push(group.join("\n"));
    }
    groups
}
