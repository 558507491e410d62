use crate::{json::Extras, query::Query, Client, Result};

/// The envelope every list endpoint responds with
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListResponse<T> {
    #[serde(flatten)]
    pub extras: Extras,

    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One fetched slice of a server-paginated collection.
///
/// A page is never mutated: [`Page::fetch_next`] performs a new request and
/// hands back a new page. The continuation cursor is opaque and is only ever
/// passed back to the server as-is.
#[derive(Debug, Clone)]
pub struct Page<T> {
    items: Vec<T>,
    next_cursor: Option<String>,
    path: String,
    query: Query,
    client: Client,
}

impl<T> PartialEq for Page<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
            && self.next_cursor == other.next_cursor
            && self.path == other.path
            && self.query == other.query
    }
}

impl<T> Page<T> {
    pub fn from_response(
        client: Client,
        path: impl Into<String>,
        query: Query,
        resp: ListResponse<T>,
    ) -> Self {
        Self {
            items: resp.data,
            next_cursor: resp.next_cursor.filter(|s| !s.is_empty()),
            path: path.into(),
            query,
            client,
        }
    }

    /// The item this page points at, `None` if the page is empty
    pub fn current(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// The query this page was fetched with
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Page<T>
where
    T: serde::de::DeserializeOwned,
{
    /// Fetches the page after this one.
    ///
    /// Returns `Ok(None)` without touching the network when this is the last page.
    pub fn fetch_next(&self) -> Result<Option<Self>> {
        let cursor = match &self.next_cursor {
            Some(cursor) => cursor,
            None => {
                log::trace!("{}: no more pages", self.path);
                return Ok(None);
            }
        };

        let query = crate::query::with_cursor(&self.query, cursor);
        self.client.fetch_page(&self.path, query).map(Some)
    }

    /// Walks every item of this page and all of the pages after it
    pub fn auto_paging(self) -> AutoPager<T> {
        AutoPager::new(self)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Yields every item across pages, fetching the next page once the current one runs out.
///
/// Stops after the first error.
#[derive(Debug)]
pub struct AutoPager<T> {
    page: Option<Page<T>>,
    index: usize,
}

impl<T> AutoPager<T>
where
    T: serde::de::DeserializeOwned,
{
    pub fn new(page: Page<T>) -> Self {
        Self {
            page: Some(page),
            index: 0,
        }
    }

    /// The item most recently yielded
    pub fn current(&self) -> Option<&T> {
        let page = self.page.as_ref()?;
        self.index.checked_sub(1).and_then(|i| page.items.get(i))
    }
}

impl<T> Iterator for AutoPager<T>
where
    T: serde::de::DeserializeOwned + Clone,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let page = self.page.as_ref()?;
            if let Some(item) = page.items.get(self.index) {
                self.index += 1;
                return Some(Ok(item.clone()));
            }

            match page.fetch_next() {
                Ok(next) => {
                    self.page = next;
                    self.index = 0;
                }
                Err(err) => {
                    self.page = None;
                    return Some(Err(err));
                }
            }
        }
    }
}
