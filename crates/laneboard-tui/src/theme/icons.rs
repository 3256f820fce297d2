//! Icon sets for Unicode and ASCII fallback.

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Standard Unicode symbols (default).
    #[default]
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Pick a mode from the environment: ASCII when `NO_COLOR` is set.
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::Ascii
        } else {
            Self::Unicode
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Collapsed group indicator.
    pub fn collapsed(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25b8}", // ▸
            IconMode::Ascii => ">",
        }
    }

    /// Expanded group indicator.
    pub fn expanded(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25be}", // ▾
            IconMode::Ascii => "v",
        }
    }

    /// Selection marker.
    pub fn selection(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25b8}", // ▸
            IconMode::Ascii => "*",
        }
    }

    /// Overflow ("more options") glyph.
    pub fn overflow(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{22ee}", // ⋮
            IconMode::Ascii => ":",
        }
    }

    /// Item bullet.
    pub fn bullet(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2022}", // •
            IconMode::Ascii => "-",
        }
    }
}
