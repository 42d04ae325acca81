/// Body of one `delta`-tagged fenced block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaBlock {
    /// 1-based position among the message's delta blocks
    pub ordinal: usize,
    /// 1-based line of the opening fence
    pub line: usize,
    pub body: String,
}

struct Fence {
    marker: char,
    len: usize,
    info: String,
}

fn opening_fence(line: &str) -> Option<Fence> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len * marker.len_utf8()..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some(Fence {
        marker,
        len,
        info: info.to_string(),
    })
}

fn closes(line: &str, fence: &Fence) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= fence.len && trimmed.chars().all(|c| c == fence.marker)
}

/// Extract every `delta`-tagged fenced block from a message body
///
/// Other fenced blocks are skipped whole, so a fence nested inside a
/// ` ```json ` block is never mistaken for a delta. An unterminated fence
/// turns the rest of the body into prose.
pub fn extract_delta_blocks(text: &str) -> Vec<DeltaBlock> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(fence) = opening_fence(lines[i]) else {
            i += 1;
            continue;
        };
        let Some(close) = (i + 1..lines.len()).find(|&j| closes(lines[j], &fence)) else {
            break;
        };
        if fence.info.eq_ignore_ascii_case("delta") {
            blocks.push(DeltaBlock {
                ordinal: blocks.len() + 1,
                line: i + 1,
                body: lines[i + 1..close].join("\n"),
            });
        }
        i = close + 1;
    }

    blocks
}
