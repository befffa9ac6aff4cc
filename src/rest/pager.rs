//! Strategy-driven paginator over a JSON endpoint

use super::types::{NextPage, Strategy};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{Page, Pages, Paginator};
use crate::response::Response;
use crate::types::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Walks a paginated JSON endpoint with a [`Strategy`]
///
/// Every page's payload is its decoded JSON body.
pub struct RestPager<S> {
    client: Arc<HttpClient>,
    url: String,
    base: RequestConfig,
    strategy: Arc<S>,
}

impl<S: Strategy + 'static> RestPager<S> {
    /// Create a pager for `url`
    pub fn new(client: Arc<HttpClient>, url: impl Into<String>, strategy: S) -> Self {
        Self {
            client,
            url: url.into(),
            base: RequestConfig::default(),
            strategy: Arc::new(strategy),
        }
    }

    /// Query parameters and headers sent with every request
    ///
    /// Base query parameters are not re-applied when a strategy hands back a
    /// full next URL.
    #[must_use]
    pub fn with_request(mut self, config: RequestConfig) -> Self {
        self.base = config;
        self
    }

    /// The strategy in use
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Paginator whose subsequent requests and has-next come from the strategy
    pub fn paginator(&self) -> Paginator<Value> {
        let client = Arc::clone(&self.client);
        let url = self.url.clone();
        let base = self.base.clone();
        let strategy = Arc::clone(&self.strategy);

        let has_next_strategy = Arc::clone(&self.strategy);

        Paginator::new()
            .with_subsequent_request(move |prev| {
                let prev = prev
                    .ok_or_else(|| Error::config("subsequent request without a previous page"))?;

                let (target, config) = match strategy.next_page(prev) {
                    NextPage::Continue {
                        query_params,
                        url: Some(next_url),
                    } => {
                        let config = RequestConfig {
                            query: query_params,
                            ..base.clone()
                        };
                        (next_url, config)
                    }
                    NextPage::Continue {
                        query_params,
                        url: None,
                    } => (url.clone(), base.clone().queries(query_params)),
                    NextPage::Done => {
                        return Err(Error::config("strategy reported no next page"));
                    }
                };

                debug!(url = %target, "Fetching next page");
                fetch(&client, &target, config, prev.create_response())
            })
            .with_has_next(move |resp| has_next_strategy.next_page(resp).is_continue())
    }

    /// Start a chain at the configured URL
    pub fn first_page(&self) -> Arc<Page<Value>> {
        let client = Arc::clone(&self.client);
        let url = self.url.clone();
        let config = self.base.clone().queries(self.strategy.initial_params());

        self.paginator().first_page(move |_| {
            debug!(url = %url, "Fetching first page");
            fetch(&client, &url, config.clone(), Response::new())
        })
    }

    /// Iterate over every page
    pub fn pages(&self) -> Pages<Value> {
        self.first_page().iter()
    }

    /// Visit every page's JSON body in order
    pub fn iterate<V>(&self, mut visit: V) -> Result<()>
    where
        V: FnMut(&Value) -> Result<()>,
    {
        for page in self.pages() {
            let page = page?;
            if let Some(body) = page.response()?.payload() {
                visit(body)?;
            }
        }
        Ok(())
    }
}

/// Fetch one page into `carrier`, decoding the body as its payload
fn fetch(
    client: &HttpClient,
    url: &str,
    config: RequestConfig,
    carrier: Response<Value>,
) -> Result<Response<Value>> {
    let (request, raw) = client.send(Method::GET, url, config)?;
    let body: Value = if raw.body.trim().is_empty() {
        Value::Null
    } else {
        raw.json()?
    };

    let mut resp = carrier.with_request(request).with_raw(raw);
    resp.set_payload(body)?;
    Ok(resp)
}

impl<S: std::fmt::Debug> std::fmt::Debug for RestPager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestPager")
            .field("url", &self.url)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
