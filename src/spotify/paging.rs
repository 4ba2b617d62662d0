use serde::de::DeserializeOwned;

use crate::{
    Result,
    spotify::transport::{ApiRequest, Transport},
    types::Page,
};

/// Walks a cursor-paginated listing to its end.
///
/// Pages are fetched one after another and their items concatenated in
/// response order. The first failing request or undecodable page aborts the
/// whole listing; nothing partial is returned.
pub struct PagedFetcher<'a, T: Transport + ?Sized> {
    transport: &'a T,
    context: &'a str,
}

impl<'a, T: Transport + ?Sized> PagedFetcher<'a, T> {
    /// `context` names the listing in error messages.
    pub fn new(transport: &'a T, context: &'a str) -> Self {
        Self { transport, context }
    }

    /// Fetches every item, starting at `url`.
    pub async fn all<I: DeserializeOwned>(&self, url: &str) -> Result<Vec<I>> {
        let first = self.page(url).await?;
        self.drain(first).await
    }

    /// Continues from an already fetched page until `next` is null.
    pub async fn drain<I: DeserializeOwned>(&self, first: Page<I>) -> Result<Vec<I>> {
        let mut items = first.items;
        let mut next = first.next;
        let mut pages = 1;

        while let Some(url) = next {
            let page: Page<I> = self.page(&url).await?;
            items.extend(page.items);
            next = page.next;
            pages += 1;
        }

        log::debug!("{}: {} items over {} pages", self.context, items.len(), pages);
        Ok(items)
    }

    async fn page<I: DeserializeOwned>(&self, url: &str) -> Result<Page<I>> {
        self.transport
            .send(ApiRequest::get(url))
            .await?
            .json(self.context)
    }
}
