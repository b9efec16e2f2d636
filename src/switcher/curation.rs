//! Curation commands: full-overwrite management and single-font add/remove.

use super::Switcher;
use crate::picker::{PickItem, PickRequest};
use anyhow::Result;
use family_switcher_config::{CurationList, SettingsBackend};

impl<B: SettingsBackend> Switcher<B> {
    /// Tell the user curation is off. Returns true when it was.
    fn curation_disabled(&mut self) -> bool {
        if self.options.mode.is_enabled() {
            return false;
        }
        self.notifier
            .info("Curation is disabled (mode: none). Pass --mode or set curation_mode.");
        true
    }

    /// Multi-select over every cached font, pre-checked with the current list.
    /// Confirming replaces the whole list with the selection.
    pub fn manage_curation(&mut self) -> Result<()> {
        if self.curation_disabled() || !self.ensure_font_cache()? {
            return Ok(());
        }
        let mode = self.options.mode;
        let cache = self.store.font_cache()?;
        let current = self.store.curation_list(mode)?;

        let items: Vec<PickItem> = cache
            .iter()
            .map(|name| {
                let listed = current.contains(name);
                PickItem::new(name.as_str())
                    .with_picked(listed)
                    .with_description(if listed { mode.annotation() } else { None })
            })
            .collect();
        let placeholder = format!(
            "Select fonts for the {} (press Enter to confirm)",
            mode.list_name()
        );
        let request = PickRequest {
            placeholder: &placeholder,
            items: &items,
        };
        let Some(selected) = self.prompt.pick_many(request)? else {
            log::debug!("Curation picker dismissed, {} unchanged", mode.list_name());
            return Ok(());
        };

        let mut list = CurationList::new();
        list.replace(selected.iter().filter_map(|&i| cache.get(i).cloned()));
        let dropped = current.missing_from(&cache);
        if !dropped.is_empty() {
            log::info!(
                "Dropping {} entries not in the font cache: {:?}",
                dropped.len(),
                dropped
            );
        }
        self.store.set_curation_list(mode, &list)?;
        self.notifier.info(&format!(
            "Updated {}: {} fonts",
            mode.list_name(),
            list.len()
        ));
        Ok(())
    }

    /// Append `font` to the active curation list.
    pub fn add_to_curation(&mut self, font: &str) -> Result<()> {
        if self.curation_disabled() {
            return Ok(());
        }
        let mode = self.options.mode;
        let mut list = self.store.curation_list(mode)?;
        if !list.add(font) {
            self.notifier
                .info(&format!("{} is already in {}", font, mode.list_name()));
            return Ok(());
        }
        self.store.set_curation_list(mode, &list)?;
        self.notifier
            .info(&format!("Added {} to {}", font, mode.list_name()));
        Ok(())
    }

    /// Drop `font` from the active curation list.
    pub fn remove_from_curation(&mut self, font: &str) -> Result<()> {
        if self.curation_disabled() {
            return Ok(());
        }
        let mode = self.options.mode;
        let mut list = self.store.curation_list(mode)?;
        if !list.remove(font) {
            log::debug!("{} was not in {}", font, mode.list_name());
        }
        self.store.set_curation_list(mode, &list)?;
        self.notifier
            .info(&format!("Removed {} from {}", font, mode.list_name()));
        Ok(())
    }
}
