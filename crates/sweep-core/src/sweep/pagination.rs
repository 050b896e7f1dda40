use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::errors::BoxError;
use crate::sweep::errors::SweepError;
use crate::sweep::traits::ResourceKind;
use crate::sweep::types::Page;

/// Why pagination stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationEnd {
    /// The last page was delivered.
    Exhausted,
    /// The page handler asked to stop.
    Stopped,
    /// The cancellation token fired before the listing finished.
    Cancelled,
}

/// Drive `kind`'s listing call page by page.
///
/// `handler(page, is_last_page)` sees every page as it arrives and returns
/// whether to keep going. A fetch error ends pagination and is returned;
/// pages already handed to `handler` stay with the caller.
pub async fn paginate<K, F>(
    kind: &K,
    client: &K::Client,
    cancel: &CancellationToken,
    mut handler: F,
) -> Result<PaginationEnd, BoxError>
where
    K: ResourceKind,
    F: FnMut(&Page, bool) -> bool + Send,
{
    let mut next_token: Option<String> = None;
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut pages = 0usize;

    loop {
        if cancel.is_cancelled() {
            warn!(
                event = "core.sweep.list_cancelled",
                kind = kind.name(),
                pages = pages
            );
            return Ok(PaginationEnd::Cancelled);
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            page = kind.list_page(client, next_token.clone()) => Some(page),
        };
        let Some(page) = fetched else {
            warn!(
                event = "core.sweep.list_cancelled",
                kind = kind.name(),
                pages = pages
            );
            return Ok(PaginationEnd::Cancelled);
        };
        let page = page?;
        pages += 1;

        let is_last = page.is_last();
        debug!(
            event = "core.sweep.list_page_received",
            kind = kind.name(),
            page = pages,
            entries = page.items.len(),
            last_page = is_last
        );

        if !handler(&page, is_last) {
            return Ok(PaginationEnd::Stopped);
        }
        if is_last {
            return Ok(PaginationEnd::Exhausted);
        }
        if let Some(token) = &page.next_token
            && !seen_tokens.insert(token.clone())
        {
            return Err(Box::new(SweepError::RepeatedPageToken {
                token: token.clone(),
            }));
        }
        next_token = page.next_token;
    }
}
