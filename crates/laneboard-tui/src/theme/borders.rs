//! Border sets for Unicode and ASCII fallback.

use ratatui::symbols::border;

use super::icons::IconMode;

/// Border set based on icon mode (supports `NO_COLOR`/ASCII fallback).
#[derive(Debug, Clone, Default)]
pub struct BorderSet {
    mode: IconMode,
}

impl BorderSet {
    /// Create a new border set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Normal (unfocused) borders - rounded for Unicode, plain for ASCII.
    pub fn normal(&self) -> border::Set {
        match self.mode {
            IconMode::Unicode => border::ROUNDED,
            IconMode::Ascii => border::PLAIN,
        }
    }

    /// Focused borders - thick for Unicode, double for ASCII.
    pub fn focused(&self) -> border::Set {
        match self.mode {
            IconMode::Unicode => border::THICK,
            IconMode::Ascii => border::DOUBLE,
        }
    }
}
