use crate::ajax::AjaxResponse;
use crate::api::models::replace::{ModalQuery, ReplaceSubmission};
use crate::errors::{Error, Result};
use crate::form_adapter::{self, ReplaceFormAdapter};
use crate::modal::ModalLauncher;
use crate::render::form::{BuildInfo, ReplaceForm, REPLACE_FORM_ID};
use crate::types::FileId;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/file/{file_id}/replace-modal",
    tag = "replace",
    summary = "Open the replace dialog",
    description = "Returns an AJAX envelope with one open-modal command wrapping the ajax-ified replace form for the file.",
    responses(
        (status = 200, description = "Open-modal command", body = AjaxResponse),
        (status = 400, description = "Malformed context token"),
        (status = 404, description = "File not found"),
        (status = 406, description = "Missing _ajax_context query parameter")
    ),
    params(
        ("file_id" = String, Path, description = "The ID of the file to replace"),
        ModalQuery
    )
)]
pub async fn replace_modal(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    Query(query): Query<ModalQuery>,
) -> Result<AjaxResponse> {
    let launcher = ModalLauncher::new(state.files.clone(), state.public_url.clone())?;
    launcher
        .handle_modal_request(&FileId::from(file_id), query.ajax_context.as_deref())
        .await
}

#[utoipa::path(
    post,
    path = "/file/{file_id}/replace-modal",
    tag = "replace",
    summary = "Submit the replace form",
    description = "AJAX callback of the replace form. Returns an envelope with one replace-node command targeting the form's own selector.",
    request_body = ReplaceSubmission,
    responses(
        (status = 200, description = "Replace-node command", body = AjaxResponse),
        (status = 404, description = "File or owner entity not found"),
        (status = 500, description = "Build arguments missing (integration defect)")
    ),
    params(
        ("file_id" = String, Path, description = "The ID of the file being replaced")
    )
)]
pub async fn submit_replace(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    Json(submission): Json<ReplaceSubmission>,
) -> Result<AjaxResponse> {
    let file_id = FileId::from(file_id);
    let file = state.files.load(&file_id).await?.ok_or_else(|| Error::NotFound {
        resource: "File".to_string(),
        id: file_id.to_string(),
    })?;

    // Rebuild the form the way the host form pipeline would, with the build
    // arguments echoed back from the rendered form.
    let build_info = BuildInfo {
        form_id: REPLACE_FORM_ID.to_string(),
        args: submission.build_args,
    };
    let mut form = ReplaceForm::new(file, build_info);
    form_adapter::ajaxify(&mut form);

    let launcher = ModalLauncher::new(state.files.clone(), state.public_url.clone())?;
    let adapter = ReplaceFormAdapter::new(state.entities.clone(), launcher);
    adapter.on_submit(form, submission.messages).await
}
