use axum::{
    body::Body,
    http::{self, Request},
    Router,
};
use http_body_util::BodyExt;
use once_cell::sync::Lazy;
use page_route::{
    configuration::get_configuration,
    startup::{app, AppState},
    telemetry::init,
};
use tower::ServiceExt;

static TRACING: Lazy<()> = Lazy::new(|| {
    let configuration = get_configuration().expect("Failed to read configuration.");
    let _ = init(&configuration.logger);
});

pub struct TestApp {
    pub app_state: AppState,
}

impl TestApp {
    pub fn app(&self) -> Router {
        let app_state = self.app_state.clone();
        app(app_state)
    }

    pub async fn get_page(&self) -> http::Response<Body> {
        self.app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .expect("Failed to execute request page.")
    }

    pub async fn get_page_data(&self) -> http::Response<Body> {
        self.app()
            .oneshot(
                Request::builder()
                    .uri("/__data.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("Failed to execute request page data.")
    }

    /// Submit an url-encoded form to `uri`, asking for a JSON action result.
    pub async fn post_form(&self, uri: &str, body: &str) -> http::Response<Body> {
        self.post(uri, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(), body, true)
            .await
    }

    pub async fn post(
        &self,
        uri: &str,
        content_type: &str,
        body: &str,
        json: bool,
    ) -> http::Response<Body> {
        let mut builder = Request::builder()
            .method(http::Method::POST)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, content_type);
        if json {
            builder = builder.header(http::header::ACCEPT, mime::APPLICATION_JSON.as_ref());
        }
        self.app()
            .oneshot(builder.body(Body::new(body.to_string())).unwrap())
            .await
            .expect("Failed to execute request form action.")
    }
}

pub fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let app_state = AppState::build(&configuration).expect("Failed to build application state.");
    TestApp { app_state }
}

pub async fn body_text(response: http::Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body.")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Response body is not utf-8.")
}

pub async fn body_json(response: http::Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("Response body is not json.")
}
