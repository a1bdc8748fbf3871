//! ratatui bridge: style targets backed by a shared `Style`

use std::{cell::Cell, rc::Rc};

use ratatui::style::Style;

use crate::{
    applier::{StyleTarget, TargetCapabilities},
    types::Rgba,
};

/// Which side of a `Style` a target writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSlot {
    Foreground,
    Background,
}

/// Shared `Style` read by a widget and written by its applier
#[derive(Debug, Clone, Default)]
pub struct StyleCell(Rc<Cell<Style>>);

impl StyleCell {
    pub fn new(style: Style) -> Self {
        Self(Rc::new(Cell::new(style)))
    }

    pub fn get(&self) -> Style {
        self.0.get()
    }

    pub fn set(&self, style: Style) {
        self.0.set(style);
    }
}

/// Color-only style target for terminal widgets
#[derive(Debug, Clone)]
pub struct TuiStyleTarget {
    label: String,
    slot: StyleSlot,
    cell: StyleCell,
}

impl TuiStyleTarget {
    pub fn new(label: impl Into<String>, slot: StyleSlot) -> Self {
        Self::with_cell(label, slot, StyleCell::default())
    }

    /// Write into an existing cell, e.g. one shared by fg and bg targets
    pub fn with_cell(label: impl Into<String>, slot: StyleSlot, cell: StyleCell) -> Self {
        Self {
            label: label.into(),
            slot,
            cell,
        }
    }

    pub fn cell(&self) -> StyleCell {
        self.cell.clone()
    }
}

impl StyleTarget for TuiStyleTarget {
    fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities::COLOR
    }

    fn set_color(&mut self, color: Rgba) {
        let style = self.cell.get();
        let style = match self.slot {
            StyleSlot::Foreground => style.fg(color.into()),
            StyleSlot::Background => style.bg(color.into()),
        };
        self.cell.set(style);
    }

    fn label(&self) -> &str {
        &self.label
    }
}
