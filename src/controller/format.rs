use crate::{view_engine::TeraView, Result};
use axum::{
    body::Body,
    http::{response::Builder, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use hyper::header;
use serde::Serialize;

pub fn json<T: Serialize>(t: T) -> Result<Response> {
    Ok(Json(t).into_response())
}

pub fn empty() -> Result<Response> {
    Ok(().into_response())
}

#[must_use]
pub fn render() -> RenderBuilder {
    RenderBuilder::new()
}

#[derive(Debug, Default)]
pub struct RenderBuilder {
    response: Builder,
}

impl RenderBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            response: Builder::default(),
        }
    }

    pub fn view<S>(self, v: &TeraView, key: &str, data: S) -> Result<Response>
    where
        S: Serialize,
    {
        let content = v.render(key, data)?;
        self.html(&content)
    }

    pub fn html(self, content: &str) -> Result<Response> {
        Ok(self
            .response
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            )
            .body(Body::from(content.to_string()))?)
    }
}
