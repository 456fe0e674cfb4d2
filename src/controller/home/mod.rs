use serde::Serialize;

use crate::{
    page::{Actions, FormValue, LoadEvent, PageRoute, RequestEvent},
    Result,
};

pub const HOME_TEMPLATE: &str = "home.html";
pub const FORM_ACTION: &str = "formAction";

/// Data the home page is rendered with. Currently empty.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PageData {}

/// Result of `formAction`: the submitted `id`, echoed back untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormActionData {
    pub id: Option<FormValue>,
}

#[tracing::instrument(name = "Load home page", skip_all)]
pub async fn load(_event: LoadEvent) -> Result<PageData> {
    Ok(PageData {})
}

#[tracing::instrument(name = "Run form action", skip_all)]
pub async fn form_action(event: RequestEvent) -> Result<FormActionData> {
    let form = event.form_data().await?;
    let id = form.get("id").cloned();

    Ok(FormActionData { id })
}

pub fn actions() -> Actions {
    Actions::new().add(FORM_ACTION, form_action)
}

pub fn route() -> PageRoute {
    PageRoute::new(HOME_TEMPLATE, load).with_actions(actions())
}
