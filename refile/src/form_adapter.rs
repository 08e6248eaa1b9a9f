//! Replace form adapter: turns the standard replace form into an
//! asynchronously submitted one and assembles the DOM-patch response after
//! submission.

use crate::ajax::{AjaxCommand, AjaxResponse};
use crate::errors::{Error, Result};
use crate::messages::MessageList;
use crate::modal::ModalLauncher;
use crate::render::form::{owner_saved_message, RenderMode, ReplaceForm};
use crate::render::html_id;
use crate::render::widget::{FileWidget, WidgetContext};
use crate::storage::EntityStorage;
use std::sync::Arc;

/// Weight of the injected status-messages region. Low enough to render
/// ahead of everything else once the form is re-sorted.
const STATUS_MESSAGES_WEIGHT: i32 = -1000;

/// Alter the replace form so submission happens via an asynchronous request
/// instead of a full page reload. Assigns the stable DOM id derived from the
/// form-type identifier so the response can target the right node.
pub fn ajaxify(form: &mut ReplaceForm) {
    form.dom_id = Some(html_id(&form.build_info.form_id));
    form.mode = RenderMode::Ajax;
    form.actions.ajax = true;
}

#[derive(Clone)]
pub struct ReplaceFormAdapter {
    entities: Arc<dyn EntityStorage>,
    launcher: ModalLauncher,
}

impl ReplaceFormAdapter {
    pub fn new(entities: Arc<dyn EntityStorage>, launcher: ModalLauncher) -> Self {
        Self { entities, launcher }
    }

    /// Assemble the response for an asynchronous form submission.
    ///
    /// Success is derived from the accumulated message list, not from
    /// field-level validation state, because the parent save pathway only
    /// reports failures through the shared message channel. A message from
    /// any component during the request therefore keeps the form visible.
    pub async fn on_submit(&self, mut form: ReplaceForm, mut messages: MessageList) -> Result<AjaxResponse> {
        let owner = form.build_info.owner()?;

        if !messages.has_errors() {
            let entity = self.entities.load(&owner).await?.ok_or_else(|| Error::NotFound {
                resource: owner.entity_type.clone(),
                id: owner.id.clone(),
            })?;

            tracing::info!(
                entity_type = %owner.entity_type,
                entity_id = %owner.id,
                "file replaced, owner entity saved"
            );

            messages.push(owner_saved_message(&entity.label));
            form.hide_inputs();
        }

        form.set_status_messages(messages, STATUS_MESSAGES_WEIGHT);

        let selector = format!("[data-form-selector=\"{}\"]", form.selector);
        Ok(AjaxResponse::new().add_command(AjaxCommand::replace(selector, form.render())))
    }

    /// Widget render hook entry point, invoked once per file-upload widget
    /// instance. Delegates to the modal launcher.
    pub async fn widget_alter(&self, element: FileWidget, context: &WidgetContext) -> Result<FileWidget> {
        self.launcher.inject_replace_control(element, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;
    use crate::render::form::{BuildInfo, REPLACE_FORM_ID};
    use crate::storage::{Entity, FileRecord, MemoryStorage};
    use crate::types::{EntityRef, FileId};
    use pretty_assertions::assert_eq;
    use url::Url;

    fn seeded_storage() -> Arc<MemoryStorage> {
        let storage = MemoryStorage::new();
        storage.insert_file(FileRecord {
            id: FileId::from("42"),
            filename: "report.pdf".to_string(),
            uri: "public://report.pdf".to_string(),
        });
        storage.insert_entity(Entity {
            entity_type: "node".to_string(),
            id: "7".to_string(),
            label: "Annual report".to_string(),
        });
        Arc::new(storage)
    }

    fn adapter(storage: Arc<MemoryStorage>) -> ReplaceFormAdapter {
        let launcher = ModalLauncher::new(storage.clone(), Url::parse("http://localhost:8080/").unwrap()).unwrap();
        ReplaceFormAdapter::new(storage, launcher)
    }

    fn ajaxified_form() -> ReplaceForm {
        let file = FileRecord {
            id: FileId::from("42"),
            filename: "report.pdf".to_string(),
            uri: "public://report.pdf".to_string(),
        };
        let mut form = ReplaceForm::new(file, BuildInfo::ajax(&EntityRef::new("node", "7")));
        ajaxify(&mut form);
        form
    }

    #[test]
    fn ajaxify_assigns_dom_id_and_async_submit() {
        let form = ajaxified_form();
        assert_eq!(form.dom_id.as_deref(), Some("file-replace-form"));
        assert_eq!(form.mode, RenderMode::Ajax);
        assert!(form.actions.ajax);
    }

    #[tokio::test]
    async fn successful_submission_hides_inputs_and_reports_the_owner() {
        let response = adapter(seeded_storage())
            .on_submit(ajaxified_form(), MessageList::new())
            .await
            .unwrap();

        let [AjaxCommand::Replace { selector, data }] = response.commands() else {
            panic!("expected a single replace command");
        };
        assert_eq!(selector, "[data-form-selector=\"file-replace-form\"]");
        assert!(data.contains("Annual report has also been saved with this change."));
        assert!(!data.contains("type=\"file\""));
        assert!(!data.contains("<button"));
    }

    #[tokio::test]
    async fn failed_submission_keeps_inputs_visible() {
        let mut messages = MessageList::new();
        messages.push(Message::error("The replacement upload is not valid."));

        let response = adapter(seeded_storage()).on_submit(ajaxified_form(), messages).await.unwrap();

        let [AjaxCommand::Replace { data, .. }] = response.commands() else {
            panic!("expected a single replace command");
        };
        assert!(data.contains("The replacement upload is not valid."));
        assert!(!data.contains("has also been saved"));
        assert!(data.contains("type=\"file\""));
        assert!(data.contains("<button"));
    }

    #[tokio::test]
    async fn missing_owner_entity_is_not_found() {
        let storage = seeded_storage();
        storage.remove_entity(&EntityRef::new("node", "7"));

        let err = adapter(storage).on_submit(ajaxified_form(), MessageList::new()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn truncated_build_args_are_an_integration_error() {
        let mut form = ajaxified_form();
        form.build_info = BuildInfo {
            form_id: REPLACE_FORM_ID.to_string(),
            args: vec!["use_ajax".to_string()],
        };

        let err = adapter(seeded_storage()).on_submit(form, MessageList::new()).await.unwrap_err();
        assert!(matches!(err, Error::Integration { .. }));
    }

    #[tokio::test]
    async fn resubmission_with_identical_inputs_is_idempotent() {
        let adapter = adapter(seeded_storage());
        let first = adapter.on_submit(ajaxified_form(), MessageList::new()).await.unwrap();
        let second = adapter.on_submit(ajaxified_form(), MessageList::new()).await.unwrap();
        assert_eq!(first, second);
    }
}
