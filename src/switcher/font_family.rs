//! Font family commands: the position picker, the live-preview font picker
//! and the single-font preview/apply actions.

use super::Switcher;
use crate::picker::{PickItem, PickRequest};
use anyhow::{Context, Result};
use family_switcher_config::{FontFamily, FontPosition, FontTarget, SettingsBackend};

impl<B: SettingsBackend> Switcher<B> {
    /// Ask for a position. `None` when dismissed.
    pub fn select_font_position(&mut self) -> Result<Option<FontPosition>> {
        let items: Vec<PickItem> = FontPosition::all()
            .iter()
            .map(|p| PickItem::new(p.label()).with_description(Some(p.description())))
            .collect();
        let request = PickRequest {
            placeholder: "Select font position to set",
            items: &items,
        };
        let picked = self.prompt.pick_one(request, &mut |_: &PickItem| {})?;
        Ok(picked.and_then(FontPosition::from_index))
    }

    /// Pick a font for one position of `target`'s font family.
    ///
    /// With live preview on, every highlighted font is written into the setting
    /// as it is highlighted. Dismissing the picker puts back the exact string
    /// read before the picker opened.
    pub fn switch_font_family(
        &mut self,
        target: FontTarget,
        position: Option<FontPosition>,
    ) -> Result<()> {
        if !self.ensure_font_cache()? {
            return Ok(());
        }
        let cache = self.store.font_cache()?;

        let position = match position {
            Some(position) => position,
            None => match self.select_font_position()? {
                Some(position) => position,
                None => return Ok(()),
            },
        };

        let original = self.store.font_family_raw(target)?;
        let family = FontFamily::parse(original.as_deref().unwrap_or_default());

        let policy = self.store.curation_policy(self.options.mode)?;
        let items: Vec<PickItem> = policy
            .candidates(&cache)
            .into_iter()
            .map(|c| {
                let annotation = if c.curated { policy.mode.annotation() } else { None };
                PickItem::new(c.name).with_description(annotation)
            })
            .collect();
        if items.is_empty() {
            self.notifier
                .info("No fonts to choose from with the current curation list.");
            return Ok(());
        }

        let live_preview = self.options.live_preview;
        let mut previewed = false;
        let picked = {
            let Self { store, prompt, .. } = &mut *self;
            let mut on_highlight = |item: &PickItem| {
                if !live_preview {
                    return;
                }
                let preview = family.with(position.index(), item.label.as_str());
                log::debug!("Previewing {} for {:?}", item.label, target);
                match store.set_font_family(target, &preview) {
                    Ok(()) => previewed = true,
                    Err(e) => log::warn!("Live preview failed: {}", e),
                }
            };
            let request = PickRequest {
                placeholder: "Search or select a font to use",
                items: &items,
            };
            prompt.pick_one(request, &mut on_highlight)
        };

        let index = match picked {
            Ok(Some(index)) => index,
            Ok(None) => {
                if previewed {
                    log::info!("Font picker dismissed, restoring {:?}", original);
                    self.store
                        .restore_font_family(target, original.as_deref())?;
                }
                return Ok(());
            }
            Err(e) => {
                if previewed {
                    log::error!("Font picker failed, restoring {:?}: {:#}", original, e);
                    self.store
                        .restore_font_family(target, original.as_deref())
                        .with_context(|| {
                            format!("{e:#}; restoring the original font also failed")
                        })?;
                }
                return Err(e);
            }
        };

        let name = &items[index].label;
        self.store
            .set_font_family(target, &family.with(position.index(), name.as_str()))?;
        self.notifier.info(&format!(
            "{} position {} set to: {}",
            target.message_prefix(),
            position.index() + 1,
            name
        ));
        Ok(())
    }

    /// Put `font` at the primary position of the editor font family.
    pub fn preview_font(&mut self, font: &str) -> Result<()> {
        let family = self.store.editor_font_family()?;
        self.store
            .set_editor_font_family(&family.with(0, font))?;
        self.notifier.info(&format!("Previewing font: {}", font));
        Ok(())
    }

    /// Put `font` at `position` (asked for when `None`) of `target`'s font family.
    pub fn apply_font(
        &mut self,
        font: &str,
        target: FontTarget,
        position: Option<FontPosition>,
    ) -> Result<()> {
        let position = match position {
            Some(position) => position,
            None => match self.select_font_position()? {
                Some(position) => position,
                None => return Ok(()),
            },
        };
        let family = self.store.font_family(target)?;
        self.store
            .set_font_family(target, &family.with(position.index(), font))?;
        self.notifier.info(&format!(
            "Set {} as {} for {}",
            font,
            position.label().to_lowercase(),
            target.display_name()
        ));
        Ok(())
    }
}
