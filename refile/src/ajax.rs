//! AJAX command protocol: the response-side instructions the client-side
//! dialog behavior understands. Only the two commands this subsystem emits
//! are modeled.

use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// DOM node the open-dialog command renders the modal into.
pub const MODAL_SELECTOR: &str = "#refile-modal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DialogOptions {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// One client-side instruction, serialized with a `command` discriminator
/// the way the dialog behavior expects it on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AjaxCommand {
    /// Open a modal dialog containing `data`.
    OpenDialog {
        selector: String,
        data: String,
        dialog_options: DialogOptions,
    },
    /// Replace the DOM node matching `selector` with `data`.
    Replace { selector: String, data: String },
}

impl AjaxCommand {
    pub fn open_modal(title: impl Into<String>, data: impl Into<String>) -> Self {
        Self::OpenDialog {
            selector: MODAL_SELECTOR.to_string(),
            data: data.into(),
            dialog_options: DialogOptions {
                title: title.into(),
                width: None,
            },
        }
    }

    pub fn replace(selector: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Replace {
            selector: selector.into(),
            data: data.into(),
        }
    }
}

/// Response envelope: an ordered list of commands, serialized as a JSON
/// array. Each response of this subsystem carries exactly one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Vec<AjaxCommand>)]
pub struct AjaxResponse(Vec<AjaxCommand>);

impl AjaxResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(mut self, command: AjaxCommand) -> Self {
        self.0.push(command);
        self
    }

    pub fn commands(&self) -> &[AjaxCommand] {
        &self.0
    }
}

impl IntoResponse for AjaxResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn open_dialog_wire_format() {
        let response = AjaxResponse::new().add_command(AjaxCommand::open_modal("Replace file", "<form></form>"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "command": "openDialog",
                "selector": "#refile-modal",
                "data": "<form></form>",
                "dialogOptions": { "title": "Replace file" }
            }])
        );
    }

    #[test]
    fn replace_wire_format() {
        let command = AjaxCommand::replace("[data-form-selector=\"file-replace-form\"]", "<form></form>");
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["command"], "replace");
        assert_eq!(json["selector"], "[data-form-selector=\"file-replace-form\"]");
    }
}
