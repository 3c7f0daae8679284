//! Column tables for table output.
//!
//! Each entity maps the column names accepted by `--fields` to a display
//! label, a width, and an accessor. Selection is a table lookup; adding a
//! column means adding an entry.

use chrono::DateTime;

use crate::error::{JoplError, Result};
use crate::model::{Note, Notebook, Resource, SearchItem, Tag};

pub struct Column<T> {
    pub name: &'static str,
    pub label: &'static str,
    pub width: usize,
    pub get: fn(&T) -> String,
}

/// Picks the columns named in a comma-separated `fields` selection, in the
/// order given. Unknown names are an error rather than an empty column.
pub fn select<'a, T>(table: &'a [Column<T>], fields: &str) -> Result<Vec<&'a Column<T>>> {
    fields
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            table
                .iter()
                .find(|column| column.name == name)
                .ok_or_else(|| JoplError::UnknownColumn(name.to_owned()))
        })
        .collect()
}

fn fmt_time(ms: i64) -> String {
    if ms == 0 {
        return String::new();
    }
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

pub static TAG_COLUMNS: &[Column<Tag>] = &[
    Column { name: "id", label: "ID", width: 32, get: |t| t.id.clone() },
    Column { name: "parent_id", label: "Parent ID", width: 32, get: |t| t.parent_id.clone() },
    Column { name: "title", label: "Title", width: 40, get: |t| t.title.clone() },
    Column { name: "created_time", label: "Created", width: 19, get: |t| fmt_time(t.created_time) },
    Column { name: "updated_time", label: "Updated", width: 19, get: |t| fmt_time(t.updated_time) },
    Column { name: "user_created_time", label: "User Created", width: 19, get: |t| fmt_time(t.user_created_time) },
    Column { name: "user_updated_time", label: "User Updated", width: 19, get: |t| fmt_time(t.user_updated_time) },
    Column { name: "encryption_applied", label: "Encrypted", width: 9, get: |t| t.encryption_applied.to_string() },
    Column { name: "is_shared", label: "Shared", width: 6, get: |t| t.is_shared.to_string() },
];

pub static NOTE_COLUMNS: &[Column<Note>] = &[
    Column { name: "id", label: "ID", width: 32, get: |n| n.id.clone() },
    Column { name: "parent_id", label: "Parent ID", width: 32, get: |n| n.parent_id.clone() },
    Column { name: "title", label: "Title", width: 40, get: |n| n.title.clone() },
    Column { name: "body", label: "Body", width: 60, get: |n| n.body.clone() },
    Column { name: "created_time", label: "Created", width: 19, get: |n| fmt_time(n.created_time) },
    Column { name: "updated_time", label: "Updated", width: 19, get: |n| fmt_time(n.updated_time) },
    Column { name: "is_conflict", label: "Conflict", width: 8, get: |n| n.is_conflict.to_string() },
    Column { name: "latitude", label: "Latitude", width: 12, get: |n| format!("{:.4}", n.latitude) },
    Column { name: "longitude", label: "Longitude", width: 12, get: |n| format!("{:.4}", n.longitude) },
    Column { name: "altitude", label: "Altitude", width: 12, get: |n| format!("{:.4}", n.altitude) },
    Column { name: "author", label: "Author", width: 24, get: |n| n.author.clone() },
    Column { name: "source_url", label: "Source URL", width: 32, get: |n| n.source_url.clone() },
    Column { name: "is_todo", label: "Todo", width: 4, get: |n| n.is_todo.to_string() },
    Column { name: "todo_due", label: "Todo Due", width: 19, get: |n| fmt_time(n.todo_due) },
    Column { name: "todo_completed", label: "Todo Done", width: 19, get: |n| fmt_time(n.todo_completed) },
    Column { name: "source", label: "Source", width: 16, get: |n| n.source.clone() },
    Column { name: "source_application", label: "Source App", width: 24, get: |n| n.source_application.clone() },
    Column { name: "order", label: "Order", width: 16, get: |n| format!("{}", n.order) },
    Column { name: "user_created_time", label: "User Created", width: 19, get: |n| fmt_time(n.user_created_time) },
    Column { name: "user_updated_time", label: "User Updated", width: 19, get: |n| fmt_time(n.user_updated_time) },
    Column { name: "encryption_applied", label: "Encrypted", width: 9, get: |n| n.encryption_applied.to_string() },
    Column { name: "markup_language", label: "Markup", width: 6, get: |n| n.markup_language.to_string() },
    Column { name: "is_shared", label: "Shared", width: 6, get: |n| n.is_shared.to_string() },
    Column { name: "share_id", label: "Share ID", width: 32, get: |n| n.share_id.clone() },
    Column { name: "conflict_original_id", label: "Conflict Original", width: 32, get: |n| n.conflict_original_id.clone() },
    Column { name: "master_key_id", label: "Master Key", width: 32, get: |n| n.master_key_id.clone() },
];

pub static NOTEBOOK_COLUMNS: &[Column<Notebook>] = &[
    Column { name: "id", label: "ID", width: 32, get: |f| f.id.clone() },
    Column { name: "parent_id", label: "Parent ID", width: 32, get: |f| f.parent_id.clone() },
    Column { name: "title", label: "Title", width: 40, get: |f| f.title.clone() },
    Column { name: "created_time", label: "Created", width: 19, get: |f| fmt_time(f.created_time) },
    Column { name: "updated_time", label: "Updated", width: 19, get: |f| fmt_time(f.updated_time) },
    Column { name: "user_created_time", label: "User Created", width: 19, get: |f| fmt_time(f.user_created_time) },
    Column { name: "user_updated_time", label: "User Updated", width: 19, get: |f| fmt_time(f.user_updated_time) },
    Column { name: "encryption_applied", label: "Encrypted", width: 9, get: |f| f.encryption_applied.to_string() },
    Column { name: "is_shared", label: "Shared", width: 6, get: |f| f.is_shared.to_string() },
    Column { name: "share_id", label: "Share ID", width: 32, get: |f| f.share_id.clone() },
    Column { name: "master_key_id", label: "Master Key", width: 32, get: |f| f.master_key_id.clone() },
    Column { name: "icon", label: "Icon", width: 16, get: |f| f.icon.clone() },
];

pub static RESOURCE_COLUMNS: &[Column<Resource>] = &[
    Column { name: "id", label: "ID", width: 32, get: |r| r.id.clone() },
    Column { name: "title", label: "Title", width: 40, get: |r| r.title.clone() },
    Column { name: "mime", label: "Mime", width: 24, get: |r| r.mime.clone() },
    Column { name: "filename", label: "Filename", width: 32, get: |r| r.filename.clone() },
    Column { name: "created_time", label: "Created", width: 19, get: |r| fmt_time(r.created_time) },
    Column { name: "updated_time", label: "Updated", width: 19, get: |r| fmt_time(r.updated_time) },
    Column { name: "user_created_time", label: "User Created", width: 19, get: |r| fmt_time(r.user_created_time) },
    Column { name: "user_updated_time", label: "User Updated", width: 19, get: |r| fmt_time(r.user_updated_time) },
    Column { name: "file_extension", label: "Extension", width: 9, get: |r| r.file_extension.clone() },
    Column { name: "encryption_applied", label: "Encrypted", width: 9, get: |r| r.encryption_applied.to_string() },
    Column { name: "size", label: "Size", width: 12, get: |r| r.size.to_string() },
    Column { name: "is_shared", label: "Shared", width: 6, get: |r| r.is_shared.to_string() },
    Column { name: "share_id", label: "Share ID", width: 32, get: |r| r.share_id.clone() },
    Column { name: "master_key_id", label: "Master Key", width: 32, get: |r| r.master_key_id.clone() },
];

pub static SEARCH_COLUMNS: &[Column<SearchItem>] = &[
    Column { name: "id", label: "ID", width: 32, get: |s| s.id.clone() },
    Column { name: "parent_id", label: "Parent ID", width: 32, get: |s| s.parent_id.clone() },
    Column { name: "title", label: "Title", width: 40, get: |s| s.title.clone() },
];
