//! File-upload widget elements as seen by the widget render hook.

use crate::storage::Entity;
use crate::types::FileId;
use serde::{Deserialize, Serialize};
use url::Url;

/// Client library attached to elements that open AJAX dialogs.
pub const DIALOG_LIBRARY: &str = "dialog.ajax";

/// Content type the replace control declares for the dialog response.
pub const MODAL_CONTENT_TYPE: &str = "application/vnd.refile-modal";

/// A rendered file-upload widget instance, one per field delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWidget {
    pub field_name: String,
    /// Element parents within the surrounding form, when known.
    pub parents: Vec<String>,
    pub delta: usize,
    /// True for multi-value fields.
    pub multiple: bool,
    /// The currently attached file, if any.
    pub attached: Option<FileId>,
    /// The injected replace control. None until the widget hook runs, and
    /// still None afterwards when there is nothing to replace.
    pub replace_control: Option<ReplaceControl>,
}

impl FileWidget {
    /// Prefix for control names, from the element parents or the field
    /// name and delta when parents are not set.
    pub fn parents_prefix(&self) -> String {
        if self.parents.is_empty() {
            format!("{}_{}", self.field_name, self.delta)
        } else {
            self.parents.join("_")
        }
    }
}

/// The interactive "Replace" control injected into a widget.
///
/// The control is tagged with the `use-ajax` capability class so the
/// client-side dialog behavior takes over the rendered element; it never
/// actually submits the surrounding form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceControl {
    pub name: String,
    pub label: String,
    pub href: Url,
    pub accepts: String,
    pub classes: Vec<String>,
    pub libraries: Vec<String>,
}

/// Context supplied by the host's widget rendering pipeline: the entity the
/// field items hang off of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetContext {
    pub owner: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_prefix_falls_back_to_field_name_and_delta() {
        let widget = FileWidget {
            field_name: "field_attachment".to_string(),
            parents: vec![],
            delta: 2,
            multiple: true,
            attached: None,
            replace_control: None,
        };
        assert_eq!(widget.parents_prefix(), "field_attachment_2");

        let widget = FileWidget {
            parents: vec!["field_attachment".to_string(), "0".to_string()],
            ..widget
        };
        assert_eq!(widget.parents_prefix(), "field_attachment_0");
    }
}
