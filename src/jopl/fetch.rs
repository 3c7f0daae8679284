//! The generic paginator behind every list-style operation.
//!
//! List endpoints return [`Page`](crate::model::Page)s: a batch of items and
//! a continuation flag. `fetch_all` walks the pages starting at 1, appending
//! each batch in server order, and stops when `has_more` turns false. One
//! routine serves every entity; call sites pick the endpoint and the field
//! selection.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::model::Page;
use crate::transport::Transport;

/// Ordering requested for a listing. Absent parts are omitted from the
/// request, leaving the server's default order in effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Order<'a> {
    pub by: Option<&'a str>,
    pub dir: Option<&'a str>,
}

/// A list-style query: endpoint path plus the optional selection, ordering
/// and extra parameters shared by all list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    path: String,
    fields: Option<String>,
    order_by: Option<String>,
    order_dir: Option<String>,
    extra: Vec<(&'static str, String)>,
}

impl ListQuery {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn fields(mut self, fields: &str) -> Self {
        self.fields = Some(fields.to_owned());
        self
    }

    pub fn order(mut self, order: Order<'_>) -> Self {
        self.order_by = order.by.map(str::to_owned);
        self.order_dir = order.dir.map(str::to_owned);
        self
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.extra.push((key, value.into()));
        self
    }

    fn params_for_page(&self, page: u32) -> Vec<(&str, String)> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(fields) = non_empty(&self.fields) {
            params.push(("fields", fields.to_owned()));
        }
        if let Some(by) = non_empty(&self.order_by) {
            params.push(("order_by", by.to_owned()));
        }
        if let Some(dir) = non_empty(&self.order_dir) {
            params.push(("order_dir", dir.to_uppercase()));
        }
        for (key, value) in &self.extra {
            params.push((key, value.clone()));
        }
        params.push(("page", page.to_string()));
        params
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Fetches every page of `query`, concatenating the items in server order.
///
/// Any transport or API error aborts the walk; a single empty page with no
/// continuation is a valid empty result.
pub fn fetch_all<T: DeserializeOwned>(transport: &Transport, query: &ListQuery) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut page: u32 = 1;

    loop {
        let batch: Page<T> = transport.get_json(&query.path, &query.params_for_page(page))?;
        items.extend(batch.items);
        if !batch.has_more {
            tracing::debug!(path = %query.path, pages = page, total = items.len(), "listing complete");
            return Ok(items);
        }
        page += 1;
    }
}
