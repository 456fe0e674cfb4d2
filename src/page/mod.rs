//! Route-scoped server logic: a loader producing page data and a registry of
//! named form actions.
//!
//! A route is described by a [`PageRoute`]. The HTTP layer in
//! [`crate::controller`] builds a [`LoadEvent`] for every page view and a
//! [`RequestEvent`] for every form submission, then hands them over.

mod form;

use std::{collections::BTreeMap, fmt, future::Future, sync::Arc};

use axum::{
    extract::Request,
    http::{request::Parts, HeaderMap, Method, Uri},
};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;

pub use form::{FormData, FormFile, FormValue};

use crate::{errors::Error, Result};

/// Name used when a submission does not pick an action with `?/name`.
pub const DEFAULT_ACTION: &str = "default";

/// Request context available to a loader.
#[derive(Debug, Clone)]
pub struct LoadEvent {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl LoadEvent {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        }
    }
}

/// A form submission handed to an action.
///
/// The body has not been read yet; [`RequestEvent::form_data`] consumes it.
#[derive(Debug)]
pub struct RequestEvent {
    request: Request,
    body_limit: usize,
}

impl RequestEvent {
    pub fn new(request: Request, body_limit: usize) -> Self {
        Self {
            request,
            body_limit,
        }
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    pub async fn form_data(self) -> Result<FormData> {
        FormData::from_request(self.request, self.body_limit).await
    }
}

type BoxedLoad = Arc<dyn Fn(LoadEvent) -> BoxFuture<'static, Result<Value>> + Send + Sync>;
type BoxedAction = Arc<dyn Fn(RequestEvent) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Named form actions of a route.
#[derive(Clone, Default)]
pub struct Actions {
    handlers: BTreeMap<String, BoxedAction>,
}

impl Actions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under `name`, replacing any previous handler.
    #[must_use]
    pub fn add<F, Fut, T>(mut self, name: &str, action: F) -> Self
    where
        F: Fn(RequestEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Serialize,
    {
        let handler: BoxedAction = Arc::new(move |event| {
            let fut = action(event);
            async move {
                let data = fut.await?;
                Ok::<Value, Error>(serde_json::to_value(data)?)
            }
            .boxed()
        });
        self.handlers.insert(name.to_string(), handler);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub async fn dispatch(&self, name: &str, event: RequestEvent) -> Result<Value> {
        match self.handlers.get(name) {
            Some(handler) => handler(event).await,
            None if self.handlers.is_empty() => Err(Error::NoActions),
            None if name == DEFAULT_ACTION => Err(Error::DefaultActionWithNamed),
            None => Err(Error::ActionNotFound(name.to_string())),
        }
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// The server half of a page: how its data is loaded and which form actions
/// it accepts.
pub struct PageRoute {
    template: String,
    load: BoxedLoad,
    actions: Option<Actions>,
}

impl PageRoute {
    pub fn new<F, Fut, T>(template: &str, load: F) -> Self
    where
        F: Fn(LoadEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Serialize,
    {
        let load: BoxedLoad = Arc::new(move |event| {
            let fut = load(event);
            async move {
                let data = fut.await?;
                Ok::<Value, Error>(serde_json::to_value(data)?)
            }
            .boxed()
        });
        Self {
            template: template.to_string(),
            load,
            actions: None,
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: Actions) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn actions(&self) -> Option<&Actions> {
        self.actions.as_ref()
    }

    pub async fn load(&self, event: LoadEvent) -> Result<Value> {
        (self.load)(event).await
    }

    /// Run the action selected by `query` against `event`.
    pub async fn dispatch(&self, query: Option<&str>, event: RequestEvent) -> Result<Value> {
        let Some(actions) = &self.actions else {
            return Err(Error::NoActions);
        };
        let name = action_name(query);
        tracing::info!(action = %name, "dispatching form action");
        actions.dispatch(&name, event).await
    }
}

impl fmt::Debug for PageRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRoute")
            .field("template", &self.template)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

/// Resolve the action named by a query string.
///
/// The first key starting with `/` names the action, so `?/formAction`
/// selects `formAction`. Anything else selects [`DEFAULT_ACTION`].
pub fn action_name(query: Option<&str>) -> String {
    query
        .and_then(|query| serde_urlencoded::from_str::<Vec<(String, String)>>(query).ok())
        .into_iter()
        .flatten()
        .find_map(|(key, _)| key.strip_prefix('/').map(str::to_string))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ACTION.to_string())
}

/// Envelope returned to submissions that ask for JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionResult {
    Success { status: u16, data: Value },
}
