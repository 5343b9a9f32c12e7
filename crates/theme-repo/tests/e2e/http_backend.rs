//! E2E tests through the real HTTP client against a local mock backend

use crate::common::harness::GalleryTestHarness;
use crate::common::mock_server::{MockResponse, MockServer};
use crossterm::event::KeyCode;
use ratatui::style::Color;
use std::sync::Arc;
use std::time::Duration;
use theme_repo::services::backend::{Backend, HttpBackend};
use theme_repo_core::theme::sample_theme;
use theme_repo_core::{FetchError, TemplateId};
use url::Url;

const DRACULA_JSON: &str = r##"{"name":"dracula","background":"#282a36","foreground":"#f8f8f2"}"##;
const DRACULA_XRESOURCES: &str = "! dracula\n*.background: #282a36\n*.foreground: #f8f8f2\n";

fn dracula_server() -> MockServer {
    MockServer::start(vec![
        ("/themes", MockResponse::themes(&[sample_theme("dracula")])),
        ("/templates", MockResponse::json(r#"["json","xresources"]"#)),
        ("/themes/dracula?template=json", MockResponse::json(DRACULA_JSON)),
        (
            "/themes/dracula?template=xresources",
            MockResponse::text(DRACULA_XRESOURCES),
        ),
    ])
}

#[test]
fn test_dracula_end_to_end() -> anyhow::Result<()> {
    let server = dracula_server();
    let mut harness = GalleryTestHarness::new(100, 30, Arc::new(server.backend()))?;
    harness.start()?;

    // One card, labeled and colored
    assert_eq!(harness.app().themes().len(), 1);
    let (x, y) = harness.find_text("dracula").expect("card label");
    assert_eq!(harness.cell(x, y).unwrap().bg, Color::Rgb(0x28, 0x2a, 0x36));

    // Activate: templates + json render
    harness.press(KeyCode::Enter)?;
    harness.wait_until_idle()?;
    let expected_json = "{\n    \"name\": \"dracula\",\n    \"background\": \"#282a36\",\n    \"foreground\": \"#f8f8f2\"\n}";
    assert_eq!(harness.app().detail().displayed_text(), Some(expected_json));
    harness.assert_screen_contains("\"background\": \"#282a36\",");

    // Switch to xresources through the selector
    harness.type_char('t')?;
    harness.press(KeyCode::Down)?;
    harness.press(KeyCode::Enter)?;
    harness.wait_until_idle()?;
    assert_eq!(
        harness.app().detail().displayed_text(),
        Some(DRACULA_XRESOURCES)
    );
    harness.assert_screen_contains("*.background: #282a36");

    assert_eq!(server.request_count("/themes"), 1);
    assert_eq!(server.request_count("/templates"), 1);
    assert_eq!(server.request_count("/themes/dracula?template=json"), 1);
    assert_eq!(server.request_count("/themes/dracula?template=xresources"), 1);
    assert!(harness.app().notification().is_none());
    Ok(())
}

#[test]
fn test_server_error_becomes_http_error() {
    let server = MockServer::start(vec![(
        "/themes",
        MockResponse::status(500, "Internal Server Error: database offline\nstack trace"),
    )]);
    let err = server.backend().list_themes().unwrap_err();

    assert_eq!(err.name(), "HTTPError");
    assert_eq!(err.code(), "500");
    assert_eq!(
        err.to_string(),
        "HTTPError: /themes returned status 500: Internal Server Error: database offline (code: 500)"
    );
}

#[test]
fn test_unknown_theme_is_404() {
    let server = dracula_server();
    let err = server
        .backend()
        .render_theme("missing", &TemplateId::json())
        .unwrap_err();
    assert_eq!(err.code(), "404");
    assert_eq!(
        server.requests(),
        vec!["/themes/missing?template=json".to_string()]
    );
}

#[test]
fn test_malformed_list_is_parse_error() {
    let server = MockServer::start(vec![
        ("/themes", MockResponse::json(r#"[{"name": "half a theme"}]"#)),
        ("/templates", MockResponse::json("not json at all")),
    ]);
    let backend = server.backend();

    let err = backend.list_themes().unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }));
    assert_eq!(err.code(), "ERR_BAD_RESPONSE");

    let err = backend.list_templates().unwrap_err();
    assert_eq!(err.name(), "ParseError");
}

#[test]
fn test_malformed_json_render_notifies_parse_error() -> anyhow::Result<()> {
    let server = MockServer::start(vec![
        ("/themes", MockResponse::themes(&[sample_theme("dracula")])),
        ("/templates", MockResponse::json(r#"["json"]"#)),
        ("/themes/dracula?template=json", MockResponse::json("{ truncated")),
    ]);
    let mut harness = GalleryTestHarness::new(100, 30, Arc::new(server.backend()))?;
    harness.start()?;
    harness.press(KeyCode::Enter)?;
    harness.wait_until_idle()?;

    assert!(harness.app().detail().displayed_text().is_none());
    let message = &harness.app().notification().unwrap().message;
    assert!(message.starts_with("ParseError: "), "{message}");
    assert!(message.ends_with("(code: ERR_BAD_RESPONSE)"), "{message}");
    Ok(())
}

#[test]
fn test_oversized_render_body_is_parse_error() {
    // Larger than ureq's into_string cap of 10 MiB
    let huge = "x".repeat(11 * 1024 * 1024);
    let server = MockServer::start(vec![(
        "/themes/dracula?template=json",
        MockResponse::text(huge),
    )]);
    let err = server
        .backend()
        .render_theme("dracula", &TemplateId::json())
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse { .. }), "{err}");
    assert_eq!(err.code(), "ERR_BAD_RESPONSE");
}

#[test]
fn test_names_are_encoded_on_the_wire() {
    let server = MockServer::start(vec![(
        "/themes/one%20half%2Fdark?template=json",
        MockResponse::json("{}"),
    )]);
    let response = server
        .backend()
        .render_theme("one half/dark", &TemplateId::json())
        .unwrap();
    assert_eq!(response.body, "{}");
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
}

#[test]
fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start(vec![("/api/templates", MockResponse::json(r#"["json"]"#))]);
    let base = Url::parse(&format!("{}/api/", server.url())).unwrap();
    let backend = HttpBackend::new(base, Duration::from_secs(5));

    let templates = backend.list_templates().unwrap();
    assert_eq!(templates, vec![TemplateId::json()]);
}

#[test]
fn test_unreachable_backend_shows_network_error() -> anyhow::Result<()> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let base = Url::parse(&format!("http://127.0.0.1:{port}"))?;
    let backend = HttpBackend::new(base, Duration::from_secs(2));
    let mut harness = GalleryTestHarness::new(100, 20, Arc::new(backend))?;
    harness.start()?;

    assert!(harness.app().themes().is_empty());
    let message = &harness.app().notification().unwrap().message;
    assert!(message.starts_with("NetworkError: "), "{message}");
    assert!(message.ends_with("(code: ERR_NETWORK)"), "{message}");
    Ok(())
}
