//! Parser module for processing AI responses.
//!
//! Models do not always follow the "bare command only" instruction, so the
//! raw completion is reduced to a single command line here. Only the first
//! usable line is taken; multi-line suggestions are not supported.

use tracing::debug;

/// Any payload containing this marker is treated as a refusal.
pub const ERROR_MARKER: &str = "ERROR:";

/// Lines starting with these (case-insensitive) are commentary, not commands.
const SKIP_PREFIXES: &[&str] = &["here is", "the command is", "#"];

/// Language tags allowed right after an opening code fence.
const LANGUAGE_TAGS: &[&str] = &["bash", "sh", "shell", "zsh"];

const FENCE: &str = "```";

/// Extract a single command from a raw model response.
///
/// Returns `None` when no line qualifies or when the payload contains the
/// error sentinel. The raw payload is echoed to stderr in that case.
pub fn normalize(raw: &str) -> Option<String> {
    let command = parse_command(raw);
    match &command {
        Some(cmd) => debug!(command = %cmd, "normalized model response"),
        None => {
            eprintln!("Error: The model failed to generate a valid command.");
            eprintln!("Raw model response: {}", raw.trim());
        }
    }
    command
}

/// Side-effect free core of [`normalize`].
pub fn parse_command(raw: &str) -> Option<String> {
    if raw.contains(ERROR_MARKER) {
        return None;
    }
    raw.lines().find_map(candidate_from_line)
}

fn candidate_from_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || has_skip_prefix(line) {
        return None;
    }

    // Backtick-led lines are either a complete wrap or a bare fence marker.
    let candidate = if line.starts_with('`') {
        unwrap_backticks(line)?
    } else {
        line
    };

    let candidate = candidate.trim();
    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}

fn has_skip_prefix(line: &str) -> bool {
    let lowered = line.to_lowercase();
    SKIP_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix))
}

/// Strip a single-line ```` ```bash cmd``` ```` or `` `cmd` `` wrap.
fn unwrap_backticks(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix(FENCE) {
        let inner = rest.strip_suffix(FENCE)?;
        return Some(strip_language_tag(inner.trim()));
    }
    line.strip_prefix('`')?.strip_suffix('`')
}

fn strip_language_tag(inner: &str) -> &str {
    for tag in LANGUAGE_TAGS {
        let Some(head) = inner.get(..tag.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(tag) {
            continue;
        }
        let rest = &inner[tag.len()..];
        if rest.is_empty() {
            return rest;
        }
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    inner
}
