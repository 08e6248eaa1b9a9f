//! HTTP surface: axum handlers and request/response models for the two
//! replace-flow routes, documented with OpenAPI annotations via `utoipa`.

pub mod handlers;
pub mod models;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "refile",
        description = "In-place file replacement dialogs over an AJAX command protocol"
    ),
    paths(handlers::replace::replace_modal, handlers::replace::submit_replace),
    components(schemas(
        crate::ajax::AjaxCommand,
        crate::ajax::AjaxResponse,
        crate::ajax::DialogOptions,
        crate::messages::Message,
        crate::messages::MessageKind,
        crate::messages::MessageList,
        models::replace::ReplaceSubmission,
    ))
)]
pub struct ApiDoc;
