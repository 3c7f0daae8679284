use serde::{Deserialize, Serialize};
use std::fmt;

/// One page of a list endpoint's response. Every list call returns this
/// shape: the page's items plus a continuation flag.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

// The API returns only the fields selected by the `fields` query parameter,
// so every field defaults to its zero value on decode.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub created_time: i64,
    pub updated_time: i64,
    pub user_created_time: i64,
    pub user_updated_time: i64,
    pub encryption_cipher_text: String,
    pub encryption_applied: i64,
    pub is_shared: i64,
    pub type_: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub body: String,
    pub created_time: i64,
    pub updated_time: i64,
    pub is_conflict: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub author: String,
    pub source_url: String,
    pub is_todo: i64,
    pub todo_due: i64,
    pub todo_completed: i64,
    pub source: String,
    pub source_application: String,
    pub application_data: String,
    pub order: f64,
    pub user_created_time: i64,
    pub user_updated_time: i64,
    pub encryption_cipher_text: String,
    pub encryption_applied: i64,
    pub markup_language: i64,
    pub is_shared: i64,
    pub share_id: String,
    pub conflict_original_id: String,
    pub master_key_id: String,
    pub body_html: String,
    pub base_url: String,
    pub image_data_url: String,
    pub crop_rect: String,
    pub type_: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notebook {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub created_time: i64,
    pub updated_time: i64,
    pub user_created_time: i64,
    pub user_updated_time: i64,
    pub encryption_cipher_text: String,
    pub encryption_applied: i64,
    pub encryption_blob_encrypted: i64,
    pub is_shared: i64,
    pub share_id: String,
    pub master_key_id: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub mime: String,
    pub filename: String,
    pub created_time: i64,
    pub updated_time: i64,
    pub user_created_time: i64,
    pub user_updated_time: i64,
    pub file_extension: String,
    pub encryption_cipher_text: String,
    pub encryption_applied: i64,
    pub encryption_blob_encrypted: i64,
    pub size: i64,
    pub is_shared: i64,
    pub share_id: String,
    pub master_key_id: String,
}

/// Slim result row returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub id: String,
    pub parent_id: String,
    pub title: String,
}

/// Body format for a new note. The two formats store the body under
/// different fields and are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteFormat {
    Markdown,
    Html,
}

impl fmt::Display for NoteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteFormat::Markdown => write!(f, "Markdown"),
            NoteFormat::Html => write!(f, "HTML"),
        }
    }
}

/// Item type names accepted by the search endpoint's `type` filter.
pub mod item_type {
    pub const NAME: &str = "name";
    pub const FOLDER: &str = "folder";
    pub const SETTING: &str = "setting";
    pub const RESOURCE: &str = "resource";
    pub const TAG: &str = "tag";
    pub const NOTE_TAG: &str = "note_tag";
    pub const SEARCH: &str = "search";
    pub const ALARM: &str = "alarm";
    pub const MASTER_KEY: &str = "master_key";
    pub const ITEM_CHANGE: &str = "item_change";
    pub const NOTE_RESOURCE: &str = "note_resource";
    pub const RESOURCE_LOCAL_STATE: &str = "resource_local_state";
    pub const REVISION: &str = "revision";
    pub const MIGRATION: &str = "migration";
    pub const SMART_FILTER: &str = "smart_filter";
    pub const COMMAND: &str = "command";
}

pub const ITEM_TYPES: &[&str] = &[
    item_type::NAME,
    item_type::FOLDER,
    item_type::SETTING,
    item_type::RESOURCE,
    item_type::TAG,
    item_type::NOTE_TAG,
    item_type::SEARCH,
    item_type::ALARM,
    item_type::MASTER_KEY,
    item_type::ITEM_CHANGE,
    item_type::NOTE_RESOURCE,
    item_type::RESOURCE_LOCAL_STATE,
    item_type::REVISION,
    item_type::MIGRATION,
    item_type::SMART_FILTER,
    item_type::COMMAND,
];
