//! Walking cursor-paginated listings of the content API.
//!
//! A listing answers with `{ items, hasMore, nextPage?, lastOrderValue? }`.
//! The walker follows `nextPage` until `hasMore` goes false.
//!
//! Safety valve: a page that claims `hasMore` but carries no usable
//! `lastOrderValue` (missing, `null`, `false`, `0` or `""`), or no
//! `nextPage`, ends the walk with what has been collected so far, without
//! error. Whether the API should ever send that combination is an
//! open question for its owners; until it is answered the walker stops
//! instead of following inconsistent metadata.

use crate::api::types::Page;
use crate::api::{get_json, ApiRequest, ContentSource};
use crate::error::FetchError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fetch every page of a listing, in arrival order. Any failing page fails
/// the whole walk; pages already fetched are dropped.
pub async fn fetch_all_pages<T: DeserializeOwned>(
    api: &dyn ContentSource,
    initial: ApiRequest,
) -> Result<Vec<T>, FetchError> {
    let mut results = Vec::new();
    let mut request = initial;
    let mut pages = 0usize;

    loop {
        let page: Page<T> = get_json(api, &request).await?;
        pages += 1;
        results.extend(page.items);

        if !page.has_more {
            break;
        }
        let next = match (&page.last_order_value, page.next_page) {
            (Some(cursor), Some(next)) if is_cursor(cursor) => next,
            _ => {
                tracing::warn!(
                    request = %request,
                    pages,
                    items = results.len(),
                    "listing reports more results without a cursor, stopping"
                );
                break;
            }
        };
        request = ApiRequest::locator(&next);
    }

    tracing::debug!(pages, items = results.len(), "listing walked");
    Ok(results)
}

/// Whether `lastOrderValue` carries an ordering position. Empty values
/// (`null`, `false`, `0`, `""`) do not.
fn is_cursor(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fetch only the first page of a listing.
pub async fn fetch_first_page<T: DeserializeOwned>(
    api: &dyn ContentSource,
    request: &ApiRequest,
) -> Result<Vec<T>, FetchError> {
    let page: Page<T> = get_json(api, request).await?;
    Ok(page.items)
}
