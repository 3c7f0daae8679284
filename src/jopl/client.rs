//! The session object and the typed resource operations.
//!
//! A [`Client`] is constructed once at startup: discovery resolves the port,
//! and pairing mints a token when the caller has none. After construction the
//! session is read-only; operations borrow it. Persisting the token is the
//! caller's job — see [`Client::api_token`].

use serde_json::json;

use crate::discover;
use crate::error::{JoplError, Result};
use crate::fetch::{fetch_all, ListQuery, Order};
use crate::model::{item_type, Note, Notebook, NoteFormat, Resource, SearchItem, Tag};
use crate::transport::{http_client, Transport};

/// Field selection used by listings unless the caller asks for more.
pub const DEFAULT_LIST_FIELDS: &str = "id,parent_id,title";

/// Resources have no meaningful parent to show by default.
pub const DEFAULT_RESOURCE_FIELDS: &str = "id,title";

pub struct Client {
    transport: Transport,
}

impl Client {
    /// Discovers the live port and establishes a session.
    ///
    /// With no token (or an empty one), runs the pairing handshake, which
    /// blocks until the user approves or rejects the request inside Joplin.
    pub fn connect(api_token: Option<&str>) -> Result<Self> {
        let http = http_client()?;
        let port = discover::find_port(&http)?;

        let token = match api_token {
            Some(token) if !token.is_empty() => token.to_owned(),
            _ => discover::pair(&http, port)?,
        };

        tracing::debug!(port, "session established");
        Ok(Self {
            transport: Transport::new(http, port, token),
        })
    }

    /// Binds to a known port and token, skipping discovery and pairing.
    pub fn attach(port: u16, api_token: impl Into<String>) -> Result<Self> {
        let http = http_client()?;
        Ok(Self {
            transport: Transport::new(http, port, api_token.into()),
        })
    }

    /// The access token in effect, for the caller to persist after pairing.
    pub fn api_token(&self) -> &str {
        self.transport.token()
    }

    pub fn port(&self) -> u16 {
        self.transport.port()
    }

    // ── Tags ────────────────────────────────────────────────────────

    pub fn tag(&self, id: &str, fields: &str) -> Result<Tag> {
        self.transport
            .get_json(&format!("tags/{id}"), &[("fields", fields.to_owned())])
            .map_err(|e| not_found(e, "tag", id))
    }

    pub fn tags(&self, fields: &str, order: Order<'_>) -> Result<Vec<Tag>> {
        fetch_all(
            &self.transport,
            &ListQuery::new("tags").fields(fields).order(order),
        )
    }

    pub fn notes_by_tag(&self, tag_id: &str, fields: &str, order: Order<'_>) -> Result<Vec<Note>> {
        fetch_all(
            &self.transport,
            &ListQuery::new(format!("tags/{tag_id}/notes"))
                .fields(fields)
                .order(order),
        )
        .map_err(|e| not_found(e, "tag", tag_id))
    }

    pub fn delete_tag(&self, id: &str) -> Result<()> {
        self.transport
            .delete(&format!("tags/{id}"))
            .map_err(|e| not_found(e, "tag", id))
    }

    /// Detaches a tag from a note; both stay alive.
    pub fn detach_tag(&self, tag_id: &str, note_id: &str) -> Result<()> {
        self.transport
            .delete(&format!("tags/{tag_id}/notes/{note_id}"))
            .map_err(|e| not_found(e, "tag/note pair", &format!("{tag_id}/{note_id}")))
    }

    pub fn attach_tag(&self, tag_id: &str, note_id: &str) -> Result<()> {
        self.transport
            .post_ok(&format!("tags/{tag_id}/notes"), &json!({ "id": note_id }))
            .map_err(|e| not_found(e, "tag", tag_id))
    }

    // ── Notes ───────────────────────────────────────────────────────

    pub fn note(&self, id: &str, fields: &str) -> Result<Note> {
        self.transport
            .get_json(&format!("notes/{id}"), &[("fields", fields.to_owned())])
            .map_err(|e| not_found(e, "note", id))
    }

    pub fn notes(&self, fields: &str, order: Order<'_>) -> Result<Vec<Note>> {
        fetch_all(
            &self.transport,
            &ListQuery::new("notes").fields(fields).order(order),
        )
    }

    pub fn notes_in_notebook(
        &self,
        notebook_id: &str,
        fields: &str,
        order: Order<'_>,
    ) -> Result<Vec<Note>> {
        fetch_all(
            &self.transport,
            &ListQuery::new(format!("folders/{notebook_id}/notes"))
                .fields(fields)
                .order(order),
        )
        .map_err(|e| not_found(e, "notebook", notebook_id))
    }

    /// Moves a note into a notebook by rewriting its parent reference.
    pub fn move_note(&self, note_id: &str, notebook_id: &str) -> Result<()> {
        self.transport
            .put_ok(
                &format!("notes/{note_id}"),
                &json!({ "parent_id": notebook_id }),
            )
            .map_err(|e| not_found(e, "note", note_id))
    }

    // ── Notebooks ───────────────────────────────────────────────────

    pub fn notebook(&self, id: &str, fields: &str) -> Result<Notebook> {
        self.transport
            .get_json(&format!("folders/{id}"), &[("fields", fields.to_owned())])
            .map_err(|e| not_found(e, "notebook", id))
    }

    pub fn notebooks(&self, fields: &str, order: Order<'_>) -> Result<Vec<Notebook>> {
        fetch_all(
            &self.transport,
            &ListQuery::new("folders").fields(fields).order(order),
        )
    }

    // ── Resources ───────────────────────────────────────────────────

    pub fn resource(&self, id: &str, fields: &str) -> Result<Resource> {
        self.transport
            .get_json(&format!("resources/{id}"), &[("fields", fields.to_owned())])
            .map_err(|e| not_found(e, "resource", id))
    }

    pub fn resources(&self, fields: &str, order: Order<'_>) -> Result<Vec<Resource>> {
        fetch_all(
            &self.transport,
            &ListQuery::new("resources").fields(fields).order(order),
        )
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Full-text search, optionally restricted to one item type. Also the
    /// name-to-ID resolver used by note creation.
    pub fn search(
        &self,
        query: &str,
        item_type: Option<&str>,
        fields: Option<&str>,
    ) -> Result<Vec<SearchItem>> {
        let mut list = ListQuery::new("search").param("query", query);
        if let Some(kind) = item_type {
            list = list.param("type", kind);
        }
        if let Some(fields) = fields {
            list = list.fields(fields);
        }
        fetch_all(&self.transport, &list)
    }

    // ── Note creation ───────────────────────────────────────────────

    /// Creates a note in the named notebook and attaches the named tags.
    ///
    /// The notebook name is resolved before anything is created; a zero or
    /// multiple match fails the whole call up front. Tag resolution happens
    /// after creation, so a failing tag leaves the already-created note in
    /// place, untagged and unmoved.
    pub fn create_note(
        &self,
        title: &str,
        format: NoteFormat,
        body: &str,
        notebook: &str,
        tags: &[String],
    ) -> Result<Note> {
        let folder = self.resolve_one(notebook, item_type::FOLDER, "notebook")?;

        let payload = match format {
            NoteFormat::Markdown => json!({ "title": title, "body": body }),
            NoteFormat::Html => json!({ "title": title, "body_html": body }),
        };
        let note: Note = self.transport.post_json("notes", &payload)?;
        tracing::debug!(id = %note.id, "note created");

        for tag in tags {
            let resolved = self.resolve_one(tag, item_type::TAG, "tag")?;
            self.attach_tag(&resolved.id, &note.id)?;
        }

        self.move_note(&note.id, &folder.id)?;
        Ok(note)
    }

    fn resolve_one(&self, name: &str, kind: &str, label: &'static str) -> Result<SearchItem> {
        let mut matches = self.search(name, Some(kind), None)?;
        if matches.len() != 1 {
            return Err(JoplError::Resolve {
                kind: label,
                name: name.to_owned(),
                matches: matches.len(),
            });
        }
        Ok(matches.remove(0))
    }
}

/// Renames a bare transport-level not-found to name the resource the caller
/// actually asked for. Other errors pass through untouched.
fn not_found(err: JoplError, kind: &str, id: &str) -> JoplError {
    match err {
        JoplError::NotFound(_) => JoplError::NotFound(format!("{kind} '{id}'")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubServer;

    fn client_for(server: &StubServer) -> Client {
        Client::attach(server.port, "secret").unwrap()
    }

    fn empty_page() -> (u16, String) {
        (200, r#"{"items":[],"has_more":false}"#.to_string())
    }

    #[test]
    fn get_by_id_renames_not_found() {
        let server = StubServer::start(|_req| (404, "{}".to_string()));
        let client = client_for(&server);

        let err = client.tag("deadbeef", DEFAULT_LIST_FIELDS).unwrap_err();
        match err {
            JoplError::NotFound(what) => assert_eq!(what, "tag 'deadbeef'"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn search_sends_type_filter() {
        let server = StubServer::start(|_req| empty_page());
        let client = client_for(&server);

        client.search("groceries", Some("folder"), None).unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].path, "/search");
        assert_eq!(requests[0].query.get("query").map(String::as_str), Some("groceries"));
        assert_eq!(requests[0].query.get("type").map(String::as_str), Some("folder"));
    }

    #[test]
    fn create_note_fails_before_creation_on_ambiguous_notebook() {
        let server = StubServer::start(|req| {
            assert_eq!(req.path, "/search");
            (
                200,
                r#"{"items":[{"id":"f1","title":"Inbox"},{"id":"f2","title":"Inbox"}],"has_more":false}"#
                    .to_string(),
            )
        });
        let client = client_for(&server);

        let err = client
            .create_note("Title", NoteFormat::Markdown, "body", "Inbox", &[])
            .unwrap_err();

        match err {
            JoplError::Resolve { kind, matches, .. } => {
                assert_eq!(kind, "notebook");
                assert_eq!(matches, 2);
            }
            other => panic!("expected Resolve, got {other:?}"),
        }
        // No note was created.
        assert!(server.requests().iter().all(|r| r.method != "POST"));
    }

    #[test]
    fn create_note_fails_before_creation_on_unknown_notebook() {
        let server = StubServer::start(|_req| empty_page());
        let client = client_for(&server);

        let err = client
            .create_note("Title", NoteFormat::Markdown, "body", "Nowhere", &[])
            .unwrap_err();

        assert!(matches!(err, JoplError::Resolve { matches: 0, .. }));
        assert!(server.requests().iter().all(|r| r.method != "POST"));
    }

    #[test]
    fn create_note_markdown_uses_body_field() {
        let server = StubServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
            ("GET", "/search") => (
                200,
                r#"{"items":[{"id":"f1","title":"Inbox"}],"has_more":false}"#.to_string(),
            ),
            ("POST", "/notes") => (200, r#"{"id":"n1","title":"Title"}"#.to_string()),
            ("PUT", "/notes/n1") => (200, "{}".to_string()),
            other => panic!("unexpected request {other:?}"),
        });
        let client = client_for(&server);

        client
            .create_note("Title", NoteFormat::Markdown, "hello", "Inbox", &[])
            .unwrap();

        let requests = server.requests();
        let create = requests
            .iter()
            .find(|r| r.method == "POST" && r.path == "/notes")
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&create.body).unwrap();
        assert_eq!(body["body"], "hello");
        assert!(body.get("body_html").is_none());
    }

    #[test]
    fn create_note_html_uses_body_html_field() {
        let server = StubServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
            ("GET", "/search") => (
                200,
                r#"{"items":[{"id":"f1","title":"Inbox"}],"has_more":false}"#.to_string(),
            ),
            ("POST", "/notes") => (200, r#"{"id":"n1","title":"Title"}"#.to_string()),
            ("PUT", "/notes/n1") => (200, "{}".to_string()),
            other => panic!("unexpected request {other:?}"),
        });
        let client = client_for(&server);

        client
            .create_note("Title", NoteFormat::Html, "<p>hi</p>", "Inbox", &[])
            .unwrap();

        let requests = server.requests();
        let create = requests
            .iter()
            .find(|r| r.method == "POST" && r.path == "/notes")
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&create.body).unwrap();
        assert_eq!(body["body_html"], "<p>hi</p>");
        assert!(body.get("body").is_none());
    }

    #[test]
    fn create_note_attaches_tags_and_moves_into_notebook() {
        let server = StubServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
            ("GET", "/search") => {
                let reply = match req.query.get("type").map(String::as_str) {
                    Some("folder") => r#"{"items":[{"id":"f1","title":"Inbox"}],"has_more":false}"#,
                    Some("tag") => r#"{"items":[{"id":"t1","title":"work"}],"has_more":false}"#,
                    other => panic!("unexpected search type {other:?}"),
                };
                (200, reply.to_string())
            }
            ("POST", "/notes") => (200, r#"{"id":"n1","title":"Title"}"#.to_string()),
            ("POST", "/tags/t1/notes") => (200, "{}".to_string()),
            ("PUT", "/notes/n1") => (200, "{}".to_string()),
            other => panic!("unexpected request {other:?}"),
        });
        let client = client_for(&server);

        client
            .create_note(
                "Title",
                NoteFormat::Markdown,
                "body",
                "Inbox",
                &["work".to_string()],
            )
            .unwrap();

        let requests = server.requests();
        let attach = requests
            .iter()
            .find(|r| r.method == "POST" && r.path == "/tags/t1/notes")
            .expect("tag should be attached");
        let attach_body: serde_json::Value = serde_json::from_str(&attach.body).unwrap();
        assert_eq!(attach_body["id"], "n1");

        let put = requests
            .iter()
            .find(|r| r.method == "PUT" && r.path == "/notes/n1")
            .expect("note should be moved");
        let put_body: serde_json::Value = serde_json::from_str(&put.body).unwrap();
        assert_eq!(put_body["parent_id"], "f1");
    }

    #[test]
    fn ambiguous_tag_aborts_after_note_creation() {
        let server = StubServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
            ("GET", "/search") => {
                let reply = match req.query.get("type").map(String::as_str) {
                    Some("folder") => r#"{"items":[{"id":"f1","title":"Inbox"}],"has_more":false}"#,
                    Some("tag") => r#"{"items":[],"has_more":false}"#,
                    other => panic!("unexpected search type {other:?}"),
                };
                (200, reply.to_string())
            }
            ("POST", "/notes") => (200, r#"{"id":"n1","title":"Title"}"#.to_string()),
            other => panic!("unexpected request {other:?}"),
        });
        let client = client_for(&server);

        let err = client
            .create_note(
                "Title",
                NoteFormat::Markdown,
                "body",
                "Inbox",
                &["missing".to_string()],
            )
            .unwrap_err();

        assert!(matches!(
            err,
            JoplError::Resolve {
                kind: "tag",
                matches: 0,
                ..
            }
        ));
        // The note exists and was never moved: the known no-rollback gap.
        let requests = server.requests();
        assert!(requests.iter().any(|r| r.method == "POST" && r.path == "/notes"));
        assert!(requests.iter().all(|r| r.method != "PUT"));
    }

    #[test]
    fn delete_tag_renames_not_found() {
        let server = StubServer::start(|_req| (404, "{}".to_string()));
        let client = client_for(&server);

        let err = client.delete_tag("t9").unwrap_err();
        assert!(matches!(err, JoplError::NotFound(what) if what == "tag 't9'"));
    }
}
