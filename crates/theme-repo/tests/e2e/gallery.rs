//! E2E tests for the theme summary list and cards

use crate::common::harness::GalleryTestHarness;
use crate::common::scripted::ScriptedBackend;
use crossterm::event::KeyCode;
use proptest::prelude::*;
use ratatui::style::Color;
use std::sync::Arc;
use theme_repo::view::color::parse_color;
use theme_repo_core::gallery::ListStatus;
use theme_repo_core::theme::sample_theme;
use theme_repo_core::{FetchError, Severity, ThemeSummary};

fn harness_with(backend: Arc<ScriptedBackend>) -> GalleryTestHarness {
    GalleryTestHarness::new(120, 40, backend).unwrap()
}

#[test]
fn test_dracula_card_is_drawn_in_theme_colors() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::new(vec![sample_theme("dracula")], &["json"]));
    let mut harness = harness_with(backend.clone());
    harness.start()?;

    harness.assert_screen_contains("Themes (1)");
    let (x, y) = harness
        .find_text("dracula")
        .expect("card label should be on screen");
    let cell = harness.cell(x, y).unwrap();
    assert_eq!(cell.bg, Color::Rgb(0x28, 0x2a, 0x36));
    assert_eq!(cell.fg, Color::Rgb(0xf8, 0xf8, 0xf2));

    assert_eq!(harness.app().gallery_layout().cards.len(), 1);
    assert_eq!(backend.call_count("themes"), 1);
    Ok(())
}

#[test]
fn test_failed_theme_list_shows_one_error_and_no_cards() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::new(vec![], &["json"]));
    backend.set_themes(Err(FetchError::http(
        500,
        "/themes",
        "Internal Server Error: database offline",
    )));
    let mut harness = harness_with(backend);
    harness.start()?;

    assert_eq!(harness.app().themes().status(), ListStatus::Failed);
    assert!(harness.app().themes().is_empty());
    assert!(harness.app().gallery_layout().cards.is_empty());
    assert_eq!(harness.app().notifications().pushed_count(), 1);

    let notification = harness.app().notification().unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert!(notification.message.starts_with("HTTPError: "));
    assert!(notification.message.ends_with("(code: 500)"));

    harness.assert_screen_contains("Could not load themes. Press r to retry.");
    assert!(harness.status_line().contains("ERROR"));
    Ok(())
}

#[test]
fn test_empty_list_shows_placeholder() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::new(vec![], &["json"]));
    let mut harness = harness_with(backend);
    harness.start()?;

    harness.assert_screen_contains("No themes available.");
    assert!(harness.app().notification().is_none());
    Ok(())
}

#[test]
fn test_cards_are_sorted_by_name() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::new(
        vec![sample_theme("nord"), sample_theme("Dracula"), sample_theme("gruvbox")],
        &["json"],
    ));
    let mut harness = harness_with(backend);
    harness.start()?;

    let names: Vec<&str> = harness
        .app()
        .themes()
        .themes()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["Dracula", "gruvbox", "nord"]);

    let (dracula_x, row) = harness.find_text("Dracula").unwrap();
    let (gruvbox_x, gruvbox_row) = harness.find_text("gruvbox").unwrap();
    assert_eq!(row, gruvbox_row);
    assert!(dracula_x < gruvbox_x);
    Ok(())
}

#[test]
fn test_arrow_keys_move_selection_and_enter_opens() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::new(
        vec![sample_theme("alpha"), sample_theme("beta"), sample_theme("gamma")],
        &["json"],
    ));
    backend.set_render_text("beta", "json", "{}");
    let mut harness = harness_with(backend.clone());
    harness.start()?;

    assert_eq!(harness.app().themes().selected_index(), 0);
    harness.press(KeyCode::Right)?;
    assert_eq!(harness.app().themes().selected_index(), 1);
    harness.type_char('l')?;
    harness.type_char('l')?;
    // Clamped at the last card
    assert_eq!(harness.app().themes().selected_index(), 2);
    harness.type_char('h')?;

    harness.press(KeyCode::Enter)?;
    harness.wait_until_idle()?;
    assert!(harness.app().detail().is_open());
    assert_eq!(harness.app().detail().theme().unwrap().name, "beta");
    assert_eq!(backend.render_calls(), vec!["render beta json"]);
    Ok(())
}

#[test]
fn test_down_moves_one_grid_row() -> anyhow::Result<()> {
    let themes: Vec<ThemeSummary> = (0..10).map(|i| sample_theme(&format!("t{i:02}"))).collect();
    let backend = Arc::new(ScriptedBackend::new(themes, &["json"]));
    let mut harness = harness_with(backend);
    harness.start()?;

    let columns = harness.app().gallery_layout().columns;
    assert!(columns > 1);
    harness.press(KeyCode::Down)?;
    assert_eq!(harness.app().themes().selected_index(), columns);
    harness.press(KeyCode::Up)?;
    assert_eq!(harness.app().themes().selected_index(), 0);
    Ok(())
}

#[test]
fn test_reload_fetches_the_list_again() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::new(vec![], &["json"]));
    backend.set_themes(Err(FetchError::network("connection refused")));
    let mut harness = harness_with(backend.clone());
    harness.start()?;
    assert_eq!(harness.app().themes().status(), ListStatus::Failed);

    backend.set_themes(Ok(vec![sample_theme("dracula")]));
    harness.type_char('r')?;
    harness.wait_until_idle()?;

    assert_eq!(backend.call_count("themes"), 2);
    assert_eq!(harness.app().themes().len(), 1);
    harness.assert_screen_contains("dracula");
    Ok(())
}

#[test]
fn test_q_quits_from_gallery() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::new(vec![], &["json"]));
    let mut harness = harness_with(backend);
    harness.start()?;
    harness.type_char('q')?;
    assert!(harness.app().should_quit());
    Ok(())
}

fn arb_color() -> impl Strategy<Value = String> {
    (0u32..=0xff_ffff).prop_map(|rgb| format!("#{rgb:06x}"))
}

fn arb_themes() -> impl Strategy<Value = Vec<ThemeSummary>> {
    prop::collection::vec(prop::collection::vec(arb_color(), 16), 0..12).prop_map(|palettes| {
        palettes
            .into_iter()
            .enumerate()
            .map(|(i, colors)| {
                let mut theme = sample_theme(&format!("theme-{i:02}"));
                for (slot, color) in theme.palette.iter_mut().zip(colors) {
                    *slot = color;
                }
                theme
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// One card per listed theme, each showing palette entries 0..16 in order.
    #[test]
    fn prop_one_card_per_theme_with_palette_in_order(themes in arb_themes()) {
        let backend = Arc::new(ScriptedBackend::new(themes.clone(), &["json"]));
        let mut harness = harness_with(backend);
        harness.start().unwrap();

        let layout = harness.app().gallery_layout().clone();
        prop_assert_eq!(layout.cards.len(), themes.len());

        for (index, card) in &layout.cards {
            let theme = &themes[*index];
            prop_assert_eq!(card.swatches.len(), 16);
            for (slot, swatch) in card.swatches.iter().enumerate() {
                let expected = parse_color(&theme.palette[slot]).unwrap();
                let cell = harness.cell(swatch.x, swatch.y).unwrap();
                prop_assert_eq!(cell.bg, expected, "theme {} swatch {}", index, slot);
            }
        }
    }
}
