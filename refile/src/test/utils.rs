//! Test utilities for integration testing

use crate::config::{Config, Fixtures};
use crate::storage::{Entity, FileRecord};
use crate::types::FileId;
use crate::Application;
use axum_test::TestServer;
use url::Url;

/// Config with one file (`42`) attached to one owner entity (`node.7`).
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_url: Some(Url::parse("http://localhost:8080/").unwrap()),
        fixtures: Fixtures {
            files: vec![FileRecord {
                id: FileId::from("42"),
                filename: "report.pdf".to_string(),
                uri: "public://report.pdf".to_string(),
            }],
            entities: vec![Entity {
                entity_type: "node".to_string(),
                id: "7".to_string(),
                label: "Annual report".to_string(),
            }],
        },
    }
}

pub fn test_server() -> TestServer {
    test_server_with_config(test_config())
}

pub fn test_server_with_config(config: Config) -> TestServer {
    Application::new(config).expect("Failed to create application").into_test_server()
}
