use std::sync::Arc;

use crate::{
    http::{HttpAgent, Method, Request, Transport},
    pagination::{ListResponse, Page},
    query::Query,
    resources::{
        AccountStatements, AccountTransfers, Accounts, EventSubscriptions, Simulations,
        Transactions,
    },
    ApiError, ClientOptions, Result,
};

/// A cheaply clonable handle to the API.
///
/// Every clone shares the same transport, so pages and services can hold their own copy.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(options: ClientOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_transport(HttpAgent::new(options)))
    }

    pub fn from_env() -> Result<Self> {
        ClientOptions::from_env().and_then(Self::new)
    }

    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    pub fn account_statements(&self) -> AccountStatements<'_> {
        AccountStatements::new(self)
    }

    pub fn account_transfers(&self) -> AccountTransfers<'_> {
        AccountTransfers::new(self)
    }

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(self)
    }

    pub fn event_subscriptions(&self) -> EventSubscriptions<'_> {
        EventSubscriptions::new(self)
    }

    pub fn simulations(&self) -> Simulations<'_> {
        Simulations::new(self)
    }

    pub fn get<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute(Request::new(Method::Get, path))
    }

    pub fn get_query<T, Q>(&self, path: &str, params: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        self.execute(Request::new(Method::Get, path).query(crate::query::encode(params)?))
    }

    /// Every call gets a fresh idempotency key, shared by all of its retries
    pub fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let req = Request::new(Method::Post, path).body(crate::json::encode(body)?);
        self.execute(req.idempotency_key(new_idempotency_key()))
    }

    /// A `POST` without a body, for action endpoints like `/close` or `/approve`
    pub fn post_empty<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute(Request::new(Method::Post, path).idempotency_key(new_idempotency_key()))
    }

    pub fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        self.execute(Request::new(Method::Patch, path).body(crate::json::encode(body)?))
    }

    /// Issues the first list request for `path`, producing the first page
    pub fn get_page<T, Q>(&self, path: &str, params: &Q) -> Result<Page<T>>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let query = crate::query::encode(params)?;
        self.fetch_page(path, query)
    }

    pub(crate) fn fetch_page<T>(&self, path: &str, query: Query) -> Result<Page<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let resp: ListResponse<T> =
            self.execute(Request::new(Method::Get, path).query(query.clone()))?;
        log::trace!(
            "{path}: got {} items, next cursor: {:?}",
            resp.data.len(),
            resp.next_cursor
        );
        Ok(Page::from_response(self.clone(), path, query, resp))
    }

    pub fn execute<T>(&self, req: Request) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let resp = self.transport.send(&req)?;
        if !resp.is_success() {
            log::debug!("{} {} failed with {}", req.method, req.path, resp.status);
            return Err(ApiError::from_response(resp.status, &resp.body).into());
        }
        crate::json::decode(&resp.body)
    }
}

fn new_idempotency_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
