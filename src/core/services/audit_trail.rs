use crate::core::models::log_entry::{LogContext, LogEntry, NewLogEntry};

/// Category of every system-authored audit entry.
pub const SYSTEM_CATEGORY: &str = "システム";

/// Tag marking an edit audit entry.
pub const EDIT_TAG: &str = "編集履歴";

/// Tag marking a deletion audit entry.
pub const DELETE_TAG: &str = "削除履歴";

/// Tag shared by all automatically generated entries.
pub const AUTO_TAG: &str = "auto";

/// Default number of characters kept in content previews.
pub const DEFAULT_PREVIEW_CHARS: usize = 50;

/// Build the audit entry describing an edit from `before` to `after`.
///
/// Category, tag and context changes get their own line; content
/// previews of both versions are always included.
pub fn edit_record(before: &LogEntry, after: &LogEntry, preview_chars: usize) -> NewLogEntry {
    let mut lines = vec![format!("ログ #{} を編集しました。", before.id)];

    if before.category != after.category {
        lines.push(format!("カテゴリ: {} → {}", before.category, after.category));
    }
    if before.tags != after.tags {
        lines.push(format!(
            "タグ: [{}] → [{}]",
            before.tags.join(", "),
            after.tags.join(", ")
        ));
    }
    if before.context != after.context {
        lines.push("コンテキスト情報を変更しました。".to_string());
    }

    lines.push(format!("変更前: {}", preview(&before.content, preview_chars)));
    lines.push(format!("変更後: {}", preview(&after.content, preview_chars)));

    system_entry(lines.join("\n"), EDIT_TAG)
}

/// Build the audit entry describing the removal of `removed`.
pub fn delete_record(removed: &LogEntry, preview_chars: usize) -> NewLogEntry {
    let content = format!(
        "ログ #{} を削除しました。\nカテゴリ: {}\n内容: {}",
        removed.id,
        removed.category,
        preview(&removed.content, preview_chars)
    );
    system_entry(content, DELETE_TAG)
}

fn system_entry(content: String, kind_tag: &str) -> NewLogEntry {
    NewLogEntry {
        category: SYSTEM_CATEGORY.to_string(),
        content,
        tags: vec![kind_tag.to_string(), AUTO_TAG.to_string()],
        context: LogContext::default(),
    }
}

/// First `max_chars` characters of `text`, with `...` when truncated.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
