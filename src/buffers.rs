//! Per-region triple buffering.
//!
//! Every named region owns three slots:
//!
//! - `pending`: the next content, staged by the application,
//! - `current`: what the last render pass drew,
//! - `prior`: what the pass before that drew.
//!
//! [`Buffers::swap`] promotes pending to current (and current to prior)
//! without rendering; the render entry points recompose every current region
//! so overlap and visibility always resolve against the full set, not just
//! the region that changed.

use std::collections::BTreeMap;

use crate::compose::{compose, Composition, Region};
use crate::error::{Error, Result};
use crate::screen::VirtualTerminal;
use crate::terminal::{Extent, HIDE_CURSOR, SHOW_CURSOR};

#[derive(Debug, Clone, Default)]
struct Triple {
    pending: Option<Region>,
    current: Option<Region>,
    prior: Option<Region>,
}

/// The repository of all region buffers, keyed by region name. Iteration
/// order is the sorted name order, so recomposition is deterministic and
/// z-index ties break the same way every pass.
#[derive(Debug, Default)]
pub struct Buffers {
    entries: BTreeMap<String, Triple>,
}

impl Buffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage new content for the region named by `region.name`. Staging twice
    /// before a swap simply replaces the pending slot.
    pub fn set_pending(&mut self, region: Region) {
        let entry = self.entries.entry(region.name.clone()).or_default();
        entry.pending = Some(region);
    }

    pub fn pending(&self, name: &str) -> Option<&Region> {
        self.entries.get(name)?.pending.as_ref()
    }

    pub fn current(&self, name: &str) -> Option<&Region> {
        self.entries.get(name)?.current.as_ref()
    }

    pub fn prior(&self, name: &str) -> Option<&Region> {
        self.entries.get(name)?.prior.as_ref()
    }

    /// All region names ever staged, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Promote pending to current and current to prior. With nothing pending
    /// the slots are left untouched, so a redundant swap is harmless.
    pub fn swap(&mut self, name: &str) -> Result<()> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| Error::UnknownRegion(name.to_string()))?;
        if let Some(pending) = entry.pending.take() {
            entry.prior = entry.current.take();
            entry.current = Some(pending);
        }
        Ok(())
    }

    /// Swap one region, then recompose and render everything. Other regions'
    /// pending slots are left staged.
    pub fn swap_and_render(
        &mut self,
        name: &str,
        terminal: &mut VirtualTerminal,
        extent: Extent,
    ) -> Result<String> {
        self.swap(name)?;
        Ok(self.compose_and_render(terminal, extent))
    }

    /// The refresh cascade: swap every region with pending content, then
    /// recompose and render once.
    pub fn render_all(&mut self, terminal: &mut VirtualTerminal, extent: Extent) -> String {
        for entry in self.entries.values_mut() {
            if let Some(pending) = entry.pending.take() {
                entry.prior = entry.current.take();
                entry.current = Some(pending);
            }
        }
        self.compose_and_render(terminal, extent)
    }

    /// Recompose every current region and diff against the virtual terminal.
    fn compose_and_render(&self, terminal: &mut VirtualTerminal, extent: Extent) -> String {
        let mut composition = Composition::new();
        for entry in self.entries.values() {
            if let Some(region) = &entry.current {
                composition.push(region.clone());
            }
        }
        tracing::trace!(regions = composition.regions().len(), "recompose");
        terminal.render(&compose(&composition, extent))
    }

    /// Hide a region and re-render. Its cells revert to whatever lies
    /// underneath, via the diff.
    pub fn hide(
        &mut self,
        name: &str,
        terminal: &mut VirtualTerminal,
        extent: Extent,
    ) -> Result<String> {
        self.set_visible(name, false, terminal, extent)
    }

    /// Make a hidden region paint again and re-render.
    pub fn show(
        &mut self,
        name: &str,
        terminal: &mut VirtualTerminal,
        extent: Extent,
    ) -> Result<String> {
        self.set_visible(name, true, terminal, extent)
    }

    /// Flip a region's visibility and re-render.
    pub fn toggle(
        &mut self,
        name: &str,
        terminal: &mut VirtualTerminal,
        extent: Extent,
    ) -> Result<String> {
        let current = self.current_mut(name)?;
        let flipped = !current.visible;
        self.set_visible(name, flipped, terminal, extent)
    }

    fn set_visible(
        &mut self,
        name: &str,
        visible: bool,
        terminal: &mut VirtualTerminal,
        extent: Extent,
    ) -> Result<String> {
        self.current_mut(name)?.visible = visible;
        Ok(self.compose_and_render(terminal, extent))
    }

    /// Hide every current region in a named group. Returns how many regions
    /// changed.
    pub fn hide_group(&mut self, group: &str) -> usize {
        self.set_group_visible(group, false)
    }

    /// Show every current region in a named group. Returns how many regions
    /// changed.
    pub fn show_group(&mut self, group: &str) -> usize {
        self.set_group_visible(group, true)
    }

    fn set_group_visible(&mut self, group: &str, visible: bool) -> usize {
        let mut changed = 0;
        for entry in self.entries.values_mut() {
            let Some(region) = entry.current.as_mut() else {
                continue;
            };
            if region.group.as_deref() == Some(group) && region.visible != visible {
                region.visible = visible;
                changed += 1;
            }
        }
        changed
    }

    /// The cursor escape matching the current state: shown when any visible
    /// region asked for it, hidden otherwise. Callers append this to the
    /// render output they hand to the sink.
    pub fn cursor_escape(&self) -> &'static str {
        let shown = self.entries.values().any(|entry| {
            entry
                .current
                .as_ref()
                .is_some_and(|region| region.visible && region.cursor_visible)
        });
        if shown { SHOW_CURSOR } else { HIDE_CURSOR }
    }

    fn current_mut(&mut self, name: &str) -> Result<&mut Region> {
        self.entries
            .get_mut(name)
            .and_then(|entry| entry.current.as_mut())
            .ok_or_else(|| Error::UnknownRegion(name.to_string()))
    }
}
