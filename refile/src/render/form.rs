//! Typed description of the single-file replace form.

use crate::errors::{Error, Result};
use crate::messages::{Message, MessageKind, MessageList};
use crate::render::{escape, html_id};
use crate::storage::FileRecord;
use crate::types::EntityRef;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Form-type identifier of the standard single-file replace form.
pub const REPLACE_FORM_ID: &str = "file_replace_form";

/// Rendering mode requested when the form was built. The modal launcher
/// always builds in [`RenderMode::Ajax`]; `Page` is the host's default
/// full-page rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Page,
    Ajax,
}

impl RenderMode {
    pub fn as_build_arg(self) -> &'static str {
        match self {
            RenderMode::Page => "use_page",
            RenderMode::Ajax => "use_ajax",
        }
    }
}

/// Positional build arguments the form was constructed with.
///
/// Position 0 is the rendering mode; positions 1 and 2 are the owner entity
/// type and id encoded by the modal launcher. The submission handler relies
/// on this layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BuildInfo {
    pub form_id: String,
    pub args: Vec<String>,
}

impl BuildInfo {
    /// Build arguments for an ajax-rendered form bound to `owner`.
    pub fn ajax(owner: &EntityRef) -> Self {
        Self {
            form_id: REPLACE_FORM_ID.to_string(),
            args: vec![
                RenderMode::Ajax.as_build_arg().to_string(),
                owner.entity_type.clone(),
                owner.id.clone(),
            ],
        }
    }

    /// Recover the owner entity reference from the positional arguments.
    ///
    /// Absence is a contract violation between the modal launcher and the
    /// form adapter, not a user error.
    pub fn owner(&self) -> Result<EntityRef> {
        match (self.args.get(1), self.args.get(2)) {
            (Some(entity_type), Some(id)) => Ok(EntityRef::new(entity_type.clone(), id.clone())),
            _ => Err(Error::Integration {
                message: format!(
                    "form '{}' built without owner context args (got {} args, expected 3)",
                    self.form_id,
                    self.args.len()
                ),
            }),
        }
    }
}

/// The "original" region: shows the currently attached file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OriginalField {
    pub file: FileRecord,
    pub access: bool,
    pub weight: i32,
}

/// The "replacement" region: the upload input for the new file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReplacementField {
    pub name: String,
    pub access: bool,
    pub weight: i32,
}

/// The actions region holding the submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Actions {
    pub submit_label: String,
    /// When set, the submit control triggers an asynchronous submission
    /// instead of a full-page post-back.
    pub ajax: bool,
    pub access: bool,
    pub weight: i32,
}

/// The status-messages region injected by the submission handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessagesRegion {
    pub messages: MessageList,
    pub weight: i32,
}

/// Strongly-typed description of the replace form.
///
/// `selector` is the stable `data-form-selector` attribute value the
/// rendering layer assigns to every form so responses can target the right
/// DOM node. `dom_id` is only assigned once the form has been ajax-ified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReplaceForm {
    pub build_info: BuildInfo,
    pub mode: RenderMode,
    pub action: String,
    pub selector: String,
    pub dom_id: Option<String>,
    pub original: OriginalField,
    pub replacement: ReplacementField,
    pub actions: Actions,
    pub status_messages: Option<MessagesRegion>,
    /// When false, declared weights are authoritative and regions are
    /// re-sorted at render time. Cleared after a region is inserted out of
    /// band.
    pub sorted: bool,
}

impl ReplaceForm {
    pub fn new(file: FileRecord, build_info: BuildInfo) -> Self {
        let action = format!("/file/{}/replace-modal", file.id);
        Self {
            selector: html_id(&build_info.form_id),
            build_info,
            mode: RenderMode::Page,
            action,
            dom_id: None,
            original: OriginalField {
                file,
                access: true,
                weight: 0,
            },
            replacement: ReplacementField {
                name: "replacement".to_string(),
                access: true,
                weight: 10,
            },
            actions: Actions {
                submit_label: "Replace".to_string(),
                ajax: false,
                access: true,
                weight: 20,
            },
            status_messages: None,
            sorted: true,
        }
    }

    /// Append a status-messages region at the given weight. The form is
    /// marked unsorted so the region's weight decides its position.
    pub fn set_status_messages(&mut self, messages: MessageList, weight: i32) {
        self.status_messages = Some(MessagesRegion { messages, weight });
        self.sorted = false;
    }

    /// Hide the input and action regions. Content remains in the structure
    /// but is not rendered.
    pub fn hide_inputs(&mut self) {
        self.original.access = false;
        self.replacement.access = false;
        self.actions.access = false;
    }

    /// Render the form to markup for an AJAX command payload.
    pub fn render(&self) -> String {
        let mut regions: Vec<(i32, usize, String)> = Vec::new();
        let mut declared = 0usize;

        if let Some(messages) = &self.status_messages {
            regions.push((messages.weight, declared, render_messages(&messages.messages)));
        }
        declared += 1;
        if self.original.access {
            regions.push((self.original.weight, declared, render_original(&self.original)));
        }
        declared += 1;
        if self.replacement.access {
            regions.push((self.replacement.weight, declared, render_replacement(&self.replacement)));
        }
        declared += 1;
        if self.actions.access {
            regions.push((self.actions.weight, declared, render_actions(&self.actions)));
        }

        if !self.sorted {
            regions.sort_by_key(|(weight, declared, _)| (*weight, *declared));
        }

        let mut form = String::from("<form");
        if let Some(dom_id) = &self.dom_id {
            form.push_str(&format!(" id=\"{}\"", escape(dom_id)));
        }
        form.push_str(&format!(
            " data-form-selector=\"{}\" action=\"{}\" method=\"post\" enctype=\"multipart/form-data\">",
            escape(&self.selector),
            escape(&self.action)
        ));
        for (_, _, markup) in regions {
            form.push_str(&markup);
        }
        form.push_str("</form>");
        form
    }
}

fn render_messages(messages: &MessageList) -> String {
    let mut markup = String::from("<div class=\"status-messages\">");
    for message in messages.iter() {
        let class = match message.kind {
            MessageKind::Status => "messages messages--status",
            MessageKind::Warning => "messages messages--warning",
            MessageKind::Error => "messages messages--error",
        };
        markup.push_str(&format!("<div class=\"{}\">{}</div>", class, escape(&message.text)));
    }
    markup.push_str("</div>");
    markup
}

fn render_original(original: &OriginalField) -> String {
    format!(
        "<div class=\"form-item form-item--original\" data-file-id=\"{}\">\
         <label>Current file</label><span class=\"file-name\">{}</span></div>",
        escape(original.file.id.as_str()),
        escape(&original.file.filename)
    )
}

fn render_replacement(replacement: &ReplacementField) -> String {
    format!(
        "<div class=\"form-item form-item--replacement\">\
         <label for=\"{name}\">Replacement file</label>\
         <input type=\"file\" id=\"{name}\" name=\"{name}\"></div>",
        name = escape(&replacement.name)
    )
}

fn render_actions(actions: &Actions) -> String {
    let class = if actions.ajax { "use-ajax-submit" } else { "form-submit" };
    format!(
        "<div class=\"form-actions\"><button type=\"submit\" class=\"{}\">{}</button></div>",
        class,
        escape(&actions.submit_label)
    )
}

/// Convenience used by tests and handlers: a status message noting the owner
/// was saved along with the replacement.
pub fn owner_saved_message(owner_label: &str) -> Message {
    Message::status(format!("{owner_label} has also been saved with this change."))
}
