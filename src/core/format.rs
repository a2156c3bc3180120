//! Format - Render entries and split them into transport-sized chunks
//!
//! Lengths are counted in characters. The default limit of 4000 leaves
//! headroom under the 4096 hard ceiling of common chat transports.

use super::entry::{Entry, Kind};

/// Separator between rendered entries
pub const SEPARATOR: &str = "\n\n---\n\n";

/// Default chunk size limit
pub const DEFAULT_CHUNK_LIMIT: usize = 4000;

/// Render a single entry, kind-aware
pub fn render(entry: &Entry) -> String {
    match &entry.kind {
        Kind::Issue => format!(
            "[{}] {}\n❗ Issue: {}\n📌 Cause: {}\n✅ Solution: {}\n🆔 ID: {}",
            entry.version, entry.module, entry.name, entry.description, entry.solution, entry.id
        ),
        Kind::Note => format!(
            "📝 {}:\n{}\n🆔 ID: {}",
            entry.module, entry.description, entry.id
        ),
        Kind::Logic => {
            let mut out = format!("⚙️ {}:\n", entry.module);
            for point in entry.description.split(';') {
                out.push_str(&format!(" - {}\n", point.trim()));
            }
            out.push_str(&format!("🆔 ID: {}", entry.id));
            out
        }
        Kind::Other(_) => entry.canonical(),
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Pack rendered parts into chunks.
///
/// Everything goes into one chunk when it fits. Otherwise parts are packed
/// greedily; a part is never split, so a single oversized part becomes its
/// own (oversized) chunk.
pub fn paginate(parts: &[String], limit: usize) -> Vec<String> {
    pack(parts, SEPARATOR, limit)
}

/// Split free-form reply text at blank lines so each chunk fits the limit.
/// Text that already fits comes back unchanged.
pub fn split_text(text: &str, limit: usize) -> Vec<String> {
    if char_len(text) <= limit {
        return vec![text.to_string()];
    }
    let paragraphs: Vec<String> = text.split(PARAGRAPH).map(String::from).collect();
    pack(&paragraphs, PARAGRAPH, limit)
}

const PARAGRAPH: &str = "\n\n";

fn pack(parts: &[String], separator: &str, limit: usize) -> Vec<String> {
    if parts.is_empty() {
        return Vec::new();
    }

    let full = parts.join(separator);
    if char_len(&full) <= limit {
        return vec![full];
    }

    let sep_len = char_len(separator);
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_len = 0;

    for part in parts {
        let part_len = char_len(part);

        if buffer.is_empty() {
            buffer.push_str(part);
            buffer_len = part_len;
        } else if buffer_len + part_len + sep_len < limit {
            buffer.push_str(separator);
            buffer.push_str(part);
            buffer_len += sep_len + part_len;
        } else {
            chunks.push(std::mem::take(&mut buffer));
            buffer.push_str(part);
            buffer_len = part_len;
        }
    }

    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

/// Render entries and paginate them
pub fn format_entries(entries: &[Entry], limit: usize) -> Vec<String> {
    let parts: Vec<String> = entries.iter().map(render).collect();
    paginate(&parts, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_id(mut entry: Entry, id: u64) -> Entry {
        entry.id = id;
        entry
    }

    #[test]
    fn test_render_issue() {
        let entry = with_id(
            Entry::issue("3.0", "Timeout", "Gateway", "Slow upstream", "Raise limit"),
            5,
        );
        let text = render(&entry);
        assert!(text.starts_with("[3.0] Gateway\n"));
        assert!(text.contains("Issue: Timeout"));
        assert!(text.contains("Cause: Slow upstream"));
        assert!(text.contains("Solution: Raise limit"));
        assert!(text.ends_with("ID: 5"));
    }

    #[test]
    fn test_render_logic_bullets() {
        let entry = with_id(Entry::new(Kind::Logic, "Sync", "pull;  merge ;push"), 2);
        let text = render(&entry);
        assert!(text.contains(" - pull\n - merge\n - push\n"));
    }

    #[test]
    fn test_render_other_kind_uses_canonical_form() {
        let entry = with_id(Entry::new(Kind::Other("Howto".into()), "M", "D"), 9);
        assert_eq!(render(&entry), entry.canonical());
    }

    #[test]
    fn test_single_chunk_when_it_fits() {
        let parts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(paginate(&parts, 4000), vec!["a\n\n---\n\nb".to_string()]);
        assert!(paginate(&[], 4000).is_empty());
    }

    #[test]
    fn test_pagination_boundary() {
        // Three parts of 1500 chars: 4500 plus separators, over the limit
        let parts: Vec<String> = ["a", "b", "c"].iter().map(|c| c.repeat(1500)).collect();
        let chunks = paginate(&parts, 4000);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 4000);
        }

        let rebuilt: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.split(SEPARATOR).map(String::from))
            .collect();
        assert_eq!(rebuilt, parts);
    }

    #[test]
    fn test_oversized_part_is_not_split() {
        let parts = vec!["x".repeat(50), "y".repeat(120), "z".repeat(10)];
        let chunks = paginate(&parts, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], "y".repeat(120));
    }

    #[test]
    fn test_limit_counts_characters() {
        // 60 multi-byte chars are 60 units, not 120+ bytes
        let parts = vec!["đ".repeat(60), "ă".repeat(30)];
        assert_eq!(paginate(&parts, 100).len(), 1);
    }

    #[test]
    fn test_split_text_at_blank_lines() {
        assert_eq!(split_text("short\n\nreply", 100), vec!["short\n\nreply".to_string()]);

        let text = format!("{}\n\n{}", "e".repeat(90), "Which field?");
        let chunks = split_text(&text, 100);
        assert_eq!(chunks, vec!["e".repeat(90), "Which field?".to_string()]);
    }
}
