use axum::{
    debug_handler,
    extract::{Request, State},
    response::Response,
};
use hyper::{header, HeaderMap};
use serde::Serialize;
use serde_json::Value;

use crate::{
    page::{ActionResult, LoadEvent, RequestEvent},
    startup::AppState,
    Result,
};

use super::format;

#[derive(Serialize)]
struct PageContext<'a> {
    data: &'a Value,
    form: Option<&'a Value>,
}

#[debug_handler]
pub async fn page_view(State(state): State<AppState>, request: Request) -> Result<Response> {
    let (parts, _) = request.into_parts();
    let data = state.page.load(LoadEvent::from_parts(&parts)).await?;
    format::render().view(
        &state.tera_engine,
        state.page.template(),
        PageContext {
            data: &data,
            form: None,
        },
    )
}

#[debug_handler]
pub async fn page_data(State(state): State<AppState>, request: Request) -> Result<Response> {
    let (parts, _) = request.into_parts();
    let data = state.page.load(LoadEvent::from_parts(&parts)).await?;
    format::json(data)
}

/// Handle a form submission.
///
/// Enhanced submissions (`Accept: application/json`) get an [`ActionResult`].
/// Plain browser posts get the page re-rendered with the action's record
/// exposed as `form`.
#[debug_handler]
pub async fn page_action(State(state): State<AppState>, request: Request) -> Result<Response> {
    let wants_json = accepts_json(request.headers());
    let query = request.uri().query().map(str::to_string);
    let load_event = LoadEvent {
        method: request.method().clone(),
        uri: request.uri().clone(),
        headers: request.headers().clone(),
    };

    let form = state
        .page
        .dispatch(
            query.as_deref(),
            RequestEvent::new(request, state.body_limit),
        )
        .await?;

    if wants_json {
        return format::json(ActionResult::Success {
            status: 200,
            data: form,
        });
    }

    let data = state.page.load(load_event).await?;
    format::render().view(
        &state.tera_engine,
        state.page.template(),
        PageContext {
            data: &data,
            form: Some(&form),
        },
    )
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .map(|accept| {
            accept
                .split(',')
                .filter_map(|media| media.trim().parse::<mime::Mime>().ok())
                .any(|media| media.type_() == mime::APPLICATION && media.subtype() == mime::JSON)
        })
        .unwrap_or(false)
}
