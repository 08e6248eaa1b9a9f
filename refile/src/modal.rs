//! Modal launcher: builds the replace-modal URL, injects the "Replace"
//! control into file-upload widgets, and serves the modal-open request.

use crate::ajax::{AjaxCommand, AjaxResponse};
use crate::errors::{Error, Result};
use crate::form_adapter;
use crate::render::form::{BuildInfo, ReplaceForm};
use crate::render::widget::{FileWidget, ReplaceControl, WidgetContext, DIALOG_LIBRARY, MODAL_CONTENT_TYPE};
use crate::storage::{FileRecord, FileStorage};
use crate::types::{ContextToken, EntityRef, FileId};
use std::sync::Arc;
use url::Url;

/// Title of the replace dialog.
pub const DIALOG_TITLE: &str = "Replace file";

#[derive(Clone)]
pub struct ModalLauncher {
    files: Arc<dyn FileStorage>,
    base_url: Url,
}

impl ModalLauncher {
    /// `base_url` must be an http(s) URL; anything that cannot serve as a
    /// base is rejected here so URL construction is infallible afterwards.
    pub fn new(files: Arc<dyn FileStorage>, base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::Integration {
                message: format!("public URL '{base_url}' cannot be used as a base"),
            });
        }
        Ok(Self { files, base_url })
    }

    /// Deterministic URL of the modal-open route for `file`, carrying the
    /// owner identity as the `_ajax_context` query parameter.
    pub fn build_replace_url(&self, file: &FileRecord, owner: &EntityRef) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL validated at construction")
            .pop_if_empty()
            .extend(["file", file.id.as_str(), "replace-modal"]);
        url.query_pairs_mut()
            .append_pair("_ajax_context", &ContextToken::from(owner).to_string());
        url
    }

    /// Add the replace control to a rendered file-upload widget.
    ///
    /// Returns the widget unchanged when it has no attached file or when the
    /// attached file no longer resolves in storage.
    pub async fn inject_replace_control(&self, mut widget: FileWidget, context: &WidgetContext) -> Result<FileWidget> {
        let Some(file_id) = widget.attached.clone() else {
            return Ok(widget);
        };
        let Some(file) = self.files.load(&file_id).await? else {
            return Ok(widget);
        };

        let href = self.build_replace_url(&file, &context.owner.entity_ref());
        let label = if widget.multiple { "Replace selected" } else { "Replace" };

        widget.replace_control = Some(ReplaceControl {
            name: format!("{}_replace_button", widget.parents_prefix()),
            label: label.to_string(),
            href,
            accepts: MODAL_CONTENT_TYPE.to_string(),
            classes: vec!["use-ajax".to_string()],
            libraries: vec![DIALOG_LIBRARY.to_string()],
        });
        Ok(widget)
    }

    /// Serve the modal-open request: resolve the file, parse the context
    /// token, build the ajax-ified replace form, and wrap it in an
    /// open-modal command. No mutation happens here.
    pub async fn handle_modal_request(&self, file_id: &FileId, context: Option<&str>) -> Result<AjaxResponse> {
        // The file is resolved first, the way the routing layer would
        // resolve a path parameter before the handler's own checks run.
        let file = self.files.load(file_id).await?.ok_or_else(|| Error::NotFound {
            resource: "File".to_string(),
            id: file_id.to_string(),
        })?;

        let context = context.ok_or(Error::MissingContext)?;
        let token: ContextToken = context.parse()?;

        tracing::debug!(file_id = %file.id, context = %token, "opening replace modal");

        let mut form = ReplaceForm::new(file, BuildInfo::ajax(token.entity_ref()));
        form_adapter::ajaxify(&mut form);

        Ok(AjaxResponse::new().add_command(AjaxCommand::open_modal(DIALOG_TITLE, form.render())))
    }
}
