//! E2E tests for last-request-wins rendering.
//!
//! Renders are gated in the scripted backend so responses arrive in a
//! chosen order.

use crate::common::harness::GalleryTestHarness;
use crate::common::scripted::ScriptedBackend;
use crossterm::event::KeyCode;
use std::sync::Arc;
use theme_repo_core::theme::sample_theme;
use theme_repo_core::{FetchError, TemplateId};

fn backend() -> Arc<ScriptedBackend> {
    let backend = Arc::new(ScriptedBackend::new(
        vec![sample_theme("dracula"), sample_theme("nord")],
        &["json", "xresources", "kitty"],
    ));
    backend.set_render_text("dracula", "json", "dracula as json");
    backend.set_render_text("dracula", "xresources", "dracula as xresources");
    backend.set_render_text("dracula", "kitty", "dracula as kitty");
    backend.set_render_text("nord", "json", "nord as json");
    backend
}

#[test]
fn test_late_response_for_old_template_is_ignored() -> anyhow::Result<()> {
    let backend = backend();
    let release_json = backend.gate_render("dracula", "json");
    let mut harness = GalleryTestHarness::new(100, 30, backend.clone())?;
    harness.start()?;

    harness.press(KeyCode::Enter)?;
    harness
        .app_mut()
        .select_template(TemplateId::from("xresources"));
    harness.wait_until(|h| h.app().detail().displayed_text().is_some())?;
    assert_eq!(
        harness.app().detail().displayed_text(),
        Some("dracula as xresources")
    );

    release_json.send(()).unwrap();
    harness.wait_until_idle()?;

    assert_eq!(
        harness.app().detail().displayed_text(),
        Some("dracula as xresources")
    );
    harness.assert_screen_contains("dracula as xresources");
    assert_eq!(backend.render_calls().len(), 2);
    Ok(())
}

#[test]
fn test_in_order_responses_end_on_latest() -> anyhow::Result<()> {
    let backend = backend();
    let release_json = backend.gate_render("dracula", "json");
    let release_xres = backend.gate_render("dracula", "xresources");
    let mut harness = GalleryTestHarness::new(100, 30, backend)?;
    harness.start()?;

    harness.press(KeyCode::Enter)?;
    harness
        .app_mut()
        .select_template(TemplateId::from("xresources"));
    harness.app_mut().select_template(TemplateId::from("kitty"));
    harness.wait_until(|h| h.app().detail().displayed_text().is_some())?;
    assert_eq!(harness.app().detail().displayed_text(), Some("dracula as kitty"));

    release_json.send(()).unwrap();
    release_xres.send(()).unwrap();
    harness.wait_until_idle()?;
    assert_eq!(harness.app().detail().displayed_text(), Some("dracula as kitty"));
    assert!(!harness.app().detail().is_pending());
    Ok(())
}

#[test]
fn test_stale_error_is_dropped_silently() -> anyhow::Result<()> {
    let backend = backend();
    backend.set_render(
        "dracula",
        "json",
        Err(FetchError::http(500, "/themes/dracula", "boom")),
    );
    let release_json = backend.gate_render("dracula", "json");
    let mut harness = GalleryTestHarness::new(100, 30, backend)?;
    harness.start()?;

    harness.press(KeyCode::Enter)?;
    harness
        .app_mut()
        .select_template(TemplateId::from("xresources"));
    harness.wait_until(|h| h.app().detail().displayed_text().is_some())?;

    release_json.send(()).unwrap();
    harness.wait_until_idle()?;

    assert_eq!(harness.app().notifications().pushed_count(), 0);
    assert_eq!(
        harness.app().detail().displayed_text(),
        Some("dracula as xresources")
    );
    Ok(())
}

#[test]
fn test_result_after_close_is_dropped() -> anyhow::Result<()> {
    let backend = backend();
    let release_json = backend.gate_render("dracula", "json");
    let mut harness = GalleryTestHarness::new(100, 30, backend)?;
    harness.start()?;

    harness.press(KeyCode::Enter)?;
    harness.press(KeyCode::Esc)?;
    release_json.send(()).unwrap();
    harness.wait_until_idle()?;

    assert!(!harness.app().detail().is_open());
    assert!(harness.app().detail().rendered().is_none());
    harness.assert_screen_not_contains("dracula as json");
    Ok(())
}

#[test]
fn test_switching_theme_discards_previous_theme_result() -> anyhow::Result<()> {
    let backend = backend();
    let release_dracula = backend.gate_render("dracula", "json");
    let mut harness = GalleryTestHarness::new(100, 30, backend)?;
    harness.start()?;

    harness.press(KeyCode::Enter)?;
    harness.press(KeyCode::Esc)?;
    assert!(harness.app_mut().open_theme_by_name("nord"));
    harness.wait_until(|h| h.app().detail().displayed_text().is_some())?;

    release_dracula.send(()).unwrap();
    harness.wait_until_idle()?;
    assert_eq!(harness.app().detail().theme().unwrap().name, "nord");
    assert_eq!(harness.app().detail().displayed_text(), Some("nord as json"));
    Ok(())
}
