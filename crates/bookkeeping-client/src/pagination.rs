//! Offset pagination over list endpoints.
//!
//! List endpoints take `page[offset]` and `page[limit]` and answer with a
//! `{"data": [...], "meta": {"page": {"totalCount": n}}}` envelope. A stream
//! fetches the next page only when the previous one has been consumed.

use crate::client::BookkeepingClient;
use bookkeeping_core::envelope::ListEnvelope;
use bookkeeping_core::{BookkeepingError, Result};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;

pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// One fetched page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: u64,
    pub limit: u32,
    /// Total number of items across all pages, when the service reports it
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// Offset of the page after this one, or `None` when this is the last.
    pub fn next_offset(&self) -> Option<u64> {
        let fetched = self.items.len() as u64;
        let next = self.offset + fetched;

        if fetched == 0 || fetched < u64::from(self.limit) {
            return None;
        }
        match self.total_count {
            Some(total) if next >= total => None,
            _ => Some(next),
        }
    }
}

/// Fetches a single page.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    client: &BookkeepingClient,
    path: &str,
    offset: u64,
    limit: u32,
) -> Result<Page<T>> {
    if limit == 0 {
        return Err(BookkeepingError::invalid_argument(
            "page size must be greater than zero",
        ));
    }

    let query = [("page[offset]", offset.to_string()), ("page[limit]", limit.to_string())];

    let envelope: ListEnvelope<T> = client.get_query(path, &query).await?;
    let total_count = envelope.total_count();
    tracing::debug!(
        path,
        offset,
        fetched = envelope.data.len(),
        total_count = ?total_count,
        "Fetched page"
    );

    Ok(Page {
        items: envelope.data,
        offset,
        limit,
        total_count,
    })
}

/// Lazily walks every page of `path`, yielding items one by one.
///
/// A failed page yields its error and ends the stream.
pub(crate) fn paginate<T>(
    client: BookkeepingClient,
    path: &'static str,
    page_size: u32,
) -> BoxStream<'static, Result<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    stream::try_unfold(Some(0u64), move |cursor| {
        let client = client.clone();
        async move {
            let Some(offset) = cursor else {
                return Ok(None);
            };
            let page: Page<T> = fetch_page(&client, path, offset, page_size).await?;
            let next = page.next_offset();
            let items = stream::iter(page.items.into_iter().map(Ok::<T, BookkeepingError>));
            Ok::<_, BookkeepingError>(Some((items, next)))
        }
    })
    .try_flatten()
    .boxed()
}
