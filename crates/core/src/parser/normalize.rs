//! Text cleanup applied before segmentation.

/// Canonicalize generated text.
///
/// Line endings become `\n`, every line is trimmed, and each run of blank
/// lines collapses to a single blank separator. Leading and trailing blank
/// lines are dropped.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    let mut pending_blank = false;
    for line in unified.split('\n').map(str::trim) {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        out.push_str(line);
        pending_blank = false;
    }
    out
}

/// Split normalized text into blocks of consecutive non-blank lines.
#[must_use]
pub fn split_blocks(normalized: &str) -> Vec<Vec<&str>> {
    normalized
        .split("\n\n")
        .map(|block| {
            block
                .lines()
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|lines| !lines.is_empty())
        .collect()
}
