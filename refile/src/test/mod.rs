pub mod utils;

use axum::http::StatusCode;
use serde_json::{json, Value};
use utils::{test_config, test_server, test_server_with_config};

/// End-to-end: modal-open returns one open-modal command whose embedded form
/// is bound to the requested file.
#[test_log::test(tokio::test)]
async fn modal_open_round_trips_the_file_id() {
    let server = test_server();

    let response = server
        .get("/file/42/replace-modal")
        .add_query_param("_ajax_context", "node.7")
        .await;
    response.assert_status_ok();

    let commands: Value = response.json();
    let commands = commands.as_array().expect("response is a command array");
    assert_eq!(commands.len(), 1);

    let command = &commands[0];
    assert_eq!(command["command"], "openDialog");
    assert_eq!(command["selector"], "#refile-modal");
    assert_eq!(command["dialogOptions"]["title"], "Replace file");

    let markup = command["data"].as_str().unwrap();
    assert!(markup.contains("data-file-id=\"42\""), "form is bound to file 42");
    assert!(markup.contains("id=\"file-replace-form\""), "form was ajax-ified");
    assert!(markup.contains("data-form-selector=\"file-replace-form\""));
    assert!(markup.contains("use-ajax-submit"), "submit control is asynchronous");
}

#[test_log::test(tokio::test)]
async fn modal_open_without_context_is_rejected_before_any_form_is_built() {
    let server = test_server();

    let response = server.get("/file/42/replace-modal").await;
    response.assert_status(StatusCode::NOT_ACCEPTABLE);
    response.assert_text("Missing ?_ajax_context={entity_type_id}.{id}");
}

#[test_log::test(tokio::test)]
async fn modal_open_with_malformed_context_is_a_bad_request() {
    let server = test_server();

    for context in ["node", "node.7.9", "."] {
        let response = server
            .get("/file/42/replace-modal")
            .add_query_param("_ajax_context", context)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("missing or malformed context");
    }
}

#[test_log::test(tokio::test)]
async fn modal_open_for_unknown_file_is_not_found() {
    let server = test_server();

    let response = server
        .get("/file/99/replace-modal")
        .add_query_param("_ajax_context", "node.7")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // File resolution takes precedence over the context check.
    let response = server.get("/file/99/replace-modal").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// End-to-end: file id 42, context token "node.7", no validation errors.
#[test_log::test(tokio::test)]
async fn successful_submission_patches_the_form_node() {
    let server = test_server();

    let response = server
        .post("/file/42/replace-modal")
        .json(&json!({
            "build_args": ["use_ajax", "node", "7"],
            "messages": []
        }))
        .await;
    response.assert_status_ok();

    let commands: Value = response.json();
    let command = &commands.as_array().unwrap()[0];
    assert_eq!(command["command"], "replace");
    assert_eq!(command["selector"], "[data-form-selector=\"file-replace-form\"]");

    let markup = command["data"].as_str().unwrap();
    assert!(markup.contains("Annual report has also been saved with this change."));
    // Inputs and actions are hidden once the step is complete.
    assert!(!markup.contains("type=\"file\""));
    assert!(!markup.contains("<button"));
    assert!(markup.contains("status-messages"));
}

#[test_log::test(tokio::test)]
async fn failed_submission_keeps_the_form_correctable() {
    let server = test_server();

    let response = server
        .post("/file/42/replace-modal")
        .json(&json!({
            "build_args": ["use_ajax", "node", "7"],
            "messages": [{"kind": "error", "text": "The replacement upload is not valid."}]
        }))
        .await;
    response.assert_status_ok();

    let commands: Value = response.json();
    let markup = commands[0]["data"].as_str().unwrap();
    assert!(markup.contains("The replacement upload is not valid."));
    assert!(!markup.contains("has also been saved"));
    assert!(markup.contains("type=\"file\""));
    assert!(markup.contains("<button"));
}

#[test_log::test(tokio::test)]
async fn submission_for_a_deleted_owner_is_not_found() {
    let mut config = test_config();
    config.fixtures.entities.clear();
    let server = test_server_with_config(config);

    let response = server
        .post("/file/42/replace-modal")
        .json(&json!({
            "build_args": ["use_ajax", "node", "7"],
            "messages": []
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn submission_without_owner_args_is_an_integration_defect() {
    let server = test_server();

    let response = server
        .post("/file/42/replace-modal")
        .json(&json!({
            "build_args": ["use_ajax"],
            "messages": []
        }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_text("Internal server error");
}

#[test_log::test(tokio::test)]
async fn resubmission_with_identical_inputs_is_idempotent() {
    let server = test_server();
    let body = json!({
        "build_args": ["use_ajax", "node", "7"],
        "messages": []
    });

    let first = server.post("/file/42/replace-modal").json(&body).await;
    let second = server.post("/file/42/replace-modal").json(&body).await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(first.text(), second.text());
}

#[test_log::test(tokio::test)]
async fn healthz_responds() {
    let server = test_server();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
