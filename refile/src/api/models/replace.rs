use crate::messages::MessageList;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the modal-open route
#[derive(Debug, Deserialize, IntoParams)]
pub struct ModalQuery {
    /// Owner identity as `<entity_type>.<id>`. Required; its absence is
    /// rejected before any form is built.
    #[serde(rename = "_ajax_context")]
    #[param(example = "node.7")]
    pub ajax_context: Option<String>,
}

/// Body of an asynchronous replace-form submission.
///
/// `build_args` echoes the positional build arguments the rendered form was
/// constructed with; `messages` is the diagnostic channel accumulated by the
/// host form pipeline during validation and save, passed explicitly rather
/// than read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReplaceSubmission {
    pub build_args: Vec<String>,
    #[serde(default)]
    pub messages: MessageList,
}
