//! Integration tests for the switcher commands over real settings and state files.

mod common;

use common::{Notice, StaticFontSource, Step, TestEnv, pick, pick_many, snapshot_value};
use family_switcher::{Command, SwitcherOptions};
use family_switcher_config::{CurationMode, FontPosition, FontTarget};
use serde_json::json;
use std::fs;

const FONTS: &[&str] = &["Fira Code", "Hack", "Iosevka", "JetBrains Mono"];

fn options(mode: CurationMode) -> SwitcherOptions {
    SwitcherOptions {
        mode,
        ..SwitcherOptions::default()
    }
}

fn switch(target: FontTarget, position: Option<FontPosition>) -> Command {
    Command::Switch { target, position }
}

// ── Font family picker ─────────────────────────────────────────────────────

#[test]
fn test_cancel_restores_exact_original_string() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo,,  Monaco", "editor.fontSize": 13 }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&["Hack", "Fira Code"], None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary))));

    let prompts = env.prompts.borrow();
    let snapshots = &prompts.snapshots;
    assert_eq!(
        snapshot_value(&snapshots[0], "editor.fontFamily").as_deref(),
        Some("Hack, Monaco")
    );
    assert_eq!(
        snapshot_value(&snapshots[1], "editor.fontFamily").as_deref(),
        Some("Fira Code, Monaco")
    );
    assert_eq!(env.setting("editor.fontFamily"), Some(json!("Menlo,,  Monaco")));
    assert_eq!(env.setting("editor.fontSize"), Some(json!(13)));
    assert!(env.notices().is_empty());
}

#[test]
fn test_cancel_removes_previewed_key_that_was_unset() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "workbench.colorTheme": "Default Dark+" }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&["Iosevka"], None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Terminal, Some(FontPosition::Primary))));

    assert_eq!(
        snapshot_value(&env.prompts.borrow().snapshots[0], "terminal.integrated.fontFamily")
            .as_deref(),
        Some("Iosevka")
    );
    assert_eq!(env.setting("terminal.integrated.fontFamily"), None);
    assert_eq!(env.setting("workbench.colorTheme"), Some(json!("Default Dark+")));
}

#[test]
fn test_confirm_sets_chosen_position() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo" }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![
            pick(&[], Some("Secondary Font")),
            pick(&["Iosevka", "Hack"], Some("Hack")),
        ],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Editor, None)));

    assert_eq!(env.setting("editor.fontFamily"), Some(json!("Menlo, Hack")));
    assert_eq!(env.infos(), ["Font position 2 set to: Hack"]);
    let prompts = env.prompts.borrow();
    assert_eq!(prompts.placeholders[0], "Select font position to set");
    assert_eq!(prompts.items[0].len(), 5);
    assert_eq!(prompts.items[0][1].description.as_deref(), Some("First fallback font"));
    assert_eq!(prompts.placeholders[1], "Search or select a font to use");
}

#[test]
fn test_terminal_switch_leaves_editor_font_alone() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo", "terminal.integrated.fontFamily": "Menlo" }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&[], Some("JetBrains Mono"))],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Terminal, Some(FontPosition::Primary))));

    assert_eq!(
        env.setting("terminal.integrated.fontFamily"),
        Some(json!("JetBrains Mono"))
    );
    assert_eq!(env.setting("editor.fontFamily"), Some(json!("Menlo")));
    assert_eq!(env.infos(), ["Terminal font position 1 set to: JetBrains Mono"]);
}

#[test]
fn test_position_beyond_length_is_padded_then_dropped() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo" }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&[], Some("Hack"))],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Quinary))));

    assert_eq!(env.setting("editor.fontFamily"), Some(json!("Menlo, Hack")));
    assert_eq!(env.infos(), ["Font position 5 set to: Hack"]);
}

#[test]
fn test_without_live_preview_highlight_writes_nothing() {
    let env = TestEnv::new();
    let original = r#"{ "editor.fontFamily": "Menlo" }"#;
    env.write_settings(original);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&["Hack", "Iosevka"], None)],
        StaticFontSource::fonts(&[]),
        SwitcherOptions {
            live_preview: false,
            ..options(CurationMode::None)
        },
    );
    assert!(switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary))));

    for snapshot in &env.prompts.borrow().snapshots {
        assert_eq!(snapshot.as_deref(), Some(original));
    }
    assert_eq!(fs::read_to_string(&env.settings_path).unwrap(), original);
}

#[test]
fn test_dismissing_position_picker_changes_nothing() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo" }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&[], None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Editor, None)));

    assert_eq!(env.prompts.borrow().items.len(), 1);
    assert_eq!(env.setting("editor.fontFamily"), Some(json!("Menlo")));
    assert!(env.notices().is_empty());
}

// ── Curation policy in the picker ──────────────────────────────────────────

#[test]
fn test_allow_list_limits_picker_and_annotates() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "fontFamilySwitcher.allowList": ["JetBrains Mono", "Hack"] }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&[], None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::Allow),
    );
    switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary)));

    assert_eq!(env.picker_labels(0), ["Hack", "JetBrains Mono"]);
    let prompts = env.prompts.borrow();
    assert!(
        prompts.items[0]
            .iter()
            .all(|item| item.description.as_deref() == Some("Allowed"))
    );
}

#[test]
fn test_empty_allow_list_offers_everything() {
    let env = TestEnv::new();
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&[], None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::Allow),
    );
    switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary)));

    assert_eq!(env.picker_labels(0), FONTS);
}

#[test]
fn test_deny_list_hides_fonts() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "fontFamilySwitcher.denyList": ["Hack", "Iosevka"] }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&[], None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::Deny),
    );
    switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary)));

    assert_eq!(env.picker_labels(0), ["Fira Code", "JetBrains Mono"]);
}

#[test]
fn test_favorites_are_listed_first() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "fontFamilySwitcher.favorites": ["JetBrains Mono"] }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick(&[], None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::Favorite),
    );
    switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary)));

    assert_eq!(
        env.picker_labels(0),
        ["JetBrains Mono", "Fira Code", "Hack", "Iosevka"]
    );
    let prompts = env.prompts.borrow();
    assert_eq!(prompts.items[0][0].description.as_deref(), Some("Favorited"));
    assert_eq!(prompts.items[0][1].description, None);
}

// ── Font cache guard and loading ───────────────────────────────────────────

#[test]
fn test_declining_load_fonts_aborts_quietly() {
    let env = TestEnv::new();
    let mut switcher = env.switcher(
        vec![Step::Confirm(false)],
        StaticFontSource::fonts(FONTS),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Editor, None)));

    let prompts = env.prompts.borrow();
    assert_eq!(
        prompts.confirmations,
        [(
            "Font cache not found. You need to load fonts first.".to_string(),
            "Load Fonts".to_string()
        )]
    );
    assert!(prompts.items.is_empty());
    assert!(env.notices().is_empty());
    assert!(env.cached_fonts().is_empty());
}

#[test]
fn test_accepting_load_fonts_continues_command() {
    let env = TestEnv::new();
    let mut switcher = env.switcher(
        vec![Step::Confirm(true), pick(&[], Some("Hack"))],
        StaticFontSource::fonts(&[".LastResort", "Fira Code", "Hack"]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary))));

    assert_eq!(env.cached_fonts(), ["Fira Code", "Hack"]);
    assert_eq!(
        env.infos(),
        [
            "Loading fonts...",
            "Successfully loaded and cached 2 fonts.",
            "Font position 1 set to: Hack"
        ]
    );
    assert_eq!(env.setting("editor.fontFamily"), Some(json!("Hack")));
}

#[test]
fn test_load_fonts_keeps_dot_names_when_not_hidden() {
    let env = TestEnv::new();
    let mut switcher = env.switcher(
        Vec::new(),
        StaticFontSource::fonts(&[".LastResort", "Hack"]),
        SwitcherOptions {
            hide_dot_fonts: false,
            ..options(CurationMode::None)
        },
    );
    assert!(switcher.run(&Command::LoadFonts));
    assert_eq!(env.cached_fonts(), [".LastResort", "Hack"]);
}

#[test]
fn test_failing_enumeration_caches_nothing() {
    let env = TestEnv::new();
    env.seed_cache(FONTS);
    let mut switcher = env.switcher(
        Vec::new(),
        StaticFontSource::failing("font service unavailable"),
        options(CurationMode::None),
    );
    assert!(switcher.run(&Command::LoadFonts));

    assert!(env.cached_fonts().is_empty());
    assert_eq!(
        env.infos(),
        ["Loading fonts...", "Successfully loaded and cached 0 fonts."]
    );
}

// ── Curation management ────────────────────────────────────────────────────

#[test]
fn test_manage_overwrites_whole_list() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "fontFamilySwitcher.allowList": ["Y", "Z"] }"#);
    env.seed_cache(&["X", "Y", "Z"]);

    let mut switcher = env.switcher(
        vec![pick_many(&["X", "Y"])],
        StaticFontSource::fonts(&[]),
        options(CurationMode::Allow),
    );
    assert!(switcher.run(&Command::Manage));

    assert_eq!(env.setting("fontFamilySwitcher.allowList"), Some(json!(["X", "Y"])));
    assert_eq!(env.infos(), ["Updated allow-list: 2 fonts"]);

    let prompts = env.prompts.borrow();
    let picked: Vec<bool> = prompts.items[0].iter().map(|item| item.picked).collect();
    assert_eq!(picked, [false, true, true]);
    assert_eq!(prompts.items[0][1].description.as_deref(), Some("Allowed"));
}

#[test]
fn test_manage_cancel_leaves_list_untouched() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "fontFamilySwitcher.favorites": ["Hack"] }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![Step::Many(None)],
        StaticFontSource::fonts(&[]),
        options(CurationMode::Favorite),
    );
    assert!(switcher.run(&Command::Manage));

    assert_eq!(env.setting("fontFamilySwitcher.favorites"), Some(json!(["Hack"])));
    assert!(env.notices().is_empty());
}

#[test]
fn test_manage_writes_only_active_mode_list() {
    let env = TestEnv::new();
    env.write_settings(
        r#"{ "fontFamilySwitcher.allowList": ["Hack"], "fontFamilySwitcher.denyList": ["Iosevka"] }"#,
    );
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![pick_many(&[])],
        StaticFontSource::fonts(&[]),
        options(CurationMode::Deny),
    );
    assert!(switcher.run(&Command::Manage));

    assert_eq!(env.setting("fontFamilySwitcher.denyList"), Some(json!([])));
    assert_eq!(env.setting("fontFamilySwitcher.allowList"), Some(json!(["Hack"])));
    assert_eq!(env.infos(), ["Updated deny-list: 0 fonts"]);
}

#[test]
fn test_curation_commands_report_disabled_mode() {
    let env = TestEnv::new();
    env.seed_cache(FONTS);
    let mut switcher = env.switcher(
        Vec::new(),
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&Command::Manage));
    assert!(switcher.run(&Command::Add {
        font: "Hack".to_string()
    }));

    assert_eq!(env.infos().len(), 2);
    assert!(env.infos().iter().all(|m| m.starts_with("Curation is disabled")));
    assert!(!env.settings_path.exists());
}

#[test]
fn test_add_and_remove_single_font() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "fontFamilySwitcher.favorites": ["Hack"] }"#);
    let mut switcher = env.switcher(
        Vec::new(),
        StaticFontSource::fonts(&[]),
        options(CurationMode::Favorite),
    );

    assert!(switcher.run(&Command::Add {
        font: "Iosevka".to_string()
    }));
    assert!(switcher.run(&Command::Add {
        font: "Hack".to_string()
    }));
    assert_eq!(
        env.setting("fontFamilySwitcher.favorites"),
        Some(json!(["Hack", "Iosevka"]))
    );

    assert!(switcher.run(&Command::Remove {
        font: "Hack".to_string()
    }));
    assert_eq!(env.setting("fontFamilySwitcher.favorites"), Some(json!(["Iosevka"])));
    assert_eq!(
        env.infos(),
        [
            "Added Iosevka to favorites",
            "Hack is already in favorites",
            "Removed Hack from favorites"
        ]
    );
}

// ── Single-font actions ────────────────────────────────────────────────────

#[test]
fn test_preview_replaces_primary_editor_font() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo, Monaco, monospace" }"#);
    let mut switcher = env.switcher(
        Vec::new(),
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&Command::Preview {
        font: "Fira Code".to_string()
    }));

    assert_eq!(
        env.setting("editor.fontFamily"),
        Some(json!("Fira Code, Monaco, monospace"))
    );
    assert_eq!(env.infos(), ["Previewing font: Fira Code"]);
}

#[test]
fn test_apply_asks_for_position() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "terminal.integrated.fontFamily": "Menlo, Monaco" }"#);
    let mut switcher = env.switcher(
        vec![pick(&[], Some("Tertiary Font"))],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(switcher.run(&Command::Apply {
        font: "Hack".to_string(),
        target: FontTarget::Terminal,
        position: None,
    }));

    assert_eq!(
        env.setting("terminal.integrated.fontFamily"),
        Some(json!("Menlo, Monaco, Hack"))
    );
    assert_eq!(env.infos(), ["Set Hack as tertiary font for terminal"]);
}

// ── Failure reporting ──────────────────────────────────────────────────────

#[test]
fn test_write_failure_is_reported_not_raised() {
    let env = TestEnv::new();
    // A regular file where the settings directory should be makes every write fail
    fs::write(env.dir.path().join("User"), "not a directory").unwrap();

    let mut switcher = env.switcher(
        Vec::new(),
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(!switcher.run(&Command::Preview {
        font: "Hack".to_string()
    }));

    let notices = env.notices();
    assert_eq!(notices.len(), 1);
    match &notices[0] {
        Notice::Error(message) => assert!(message.starts_with("Failed to preview font: ")),
        other => panic!("expected an error notice, got {other:?}"),
    }
}

#[test]
fn test_prompt_failure_restores_then_reports() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo" }"#);
    env.seed_cache(FONTS);

    // Picking a label the picker never offered makes the prompt fail after a preview
    let mut switcher = env.switcher(
        vec![pick(&["Hack"], Some("No Such Font"))],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(!switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary))));

    assert_eq!(
        snapshot_value(&env.prompts.borrow().snapshots[0], "editor.fontFamily").as_deref(),
        Some("Hack")
    );
    assert_eq!(env.setting("editor.fontFamily"), Some(json!("Menlo")));
    match env.notices().last() {
        Some(Notice::Error(message)) => assert!(message.starts_with("Failed to switch font: ")),
        other => panic!("expected an error notice, got {other:?}"),
    }
}

#[test]
fn test_failed_restore_keeps_prompt_error() {
    let env = TestEnv::new();
    env.write_settings(r#"{ "editor.fontFamily": "Menlo" }"#);
    env.seed_cache(FONTS);

    let mut switcher = env.switcher(
        vec![Step::Crash {
            highlight: vec!["Hack".to_string()],
        }],
        StaticFontSource::fonts(&[]),
        options(CurationMode::None),
    );
    assert!(!switcher.run(&switch(FontTarget::Editor, Some(FontPosition::Primary))));

    match env.notices().last() {
        Some(Notice::Error(message)) => {
            assert!(message.starts_with("Failed to switch font: picker crashed"));
            assert!(message.contains("restoring the original font also failed"));
        }
        other => panic!("expected an error notice, got {other:?}"),
    }
}
