//! Text cleanup pipeline for plain-text output.
//!
//! Editor content often carries non-breaking spaces, zero-width characters
//! and runs of blank lines. The pipeline normalizes these so plain-text
//! output is suitable for search indexing and embedding.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC + invisible characters + whitespace
    #[default]
    Standard,
    /// Aggressive cleanup: single-spaced, no blank lines
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove zero-width spaces, joiners and byte-order marks
    pub remove_zero_width: bool,

    /// Replace non-breaking spaces with regular spaces
    pub replace_nbsp: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Strip trailing whitespace from every line
    pub trim_lines: bool,

    /// Collapse runs of spaces and tabs into one space
    pub normalize_whitespace: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_zero_width: false,
            replace_nbsp: false,
            remove_replacement_char: false,
            trim_lines: false,
            normalize_whitespace: false,
            max_consecutive_newlines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_zero_width: true,
            replace_nbsp: true,
            remove_replacement_char: true,
            trim_lines: true,
            normalize_whitespace: true,
            max_consecutive_newlines: 2,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            max_consecutive_newlines: 1,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    whitespace_regex: Regex,
    trailing_regex: Regex,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            whitespace_regex: Regex::new(r"[ \t]{2,}").expect("valid pattern"),
            trailing_regex: Regex::new(r"(?m)[ \t]+$").expect("valid pattern"),
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.remove_zero_width {
            result.retain(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'));
        }

        if self.options.replace_nbsp {
            result = result.replace(['\u{00A0}', '\u{202F}'], " ");
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.normalize_whitespace {
            result = self.whitespace_regex.replace_all(&result, " ").to_string();
        }

        if self.options.trim_lines {
            result = self.trailing_regex.replace_all(&result, "").to_string();
        }

        if self.options.max_consecutive_newlines > 0 {
            result = self.limit_newlines(&result);
        }

        result.trim().to_string()
    }

    fn limit_newlines(&self, text: &str) -> String {
        let max = self.options.max_consecutive_newlines as usize;
        let mut out = String::with_capacity(text.len());
        let mut run = 0;
        for c in text.chars() {
            if c == '\n' {
                run += 1;
                if run > max {
                    continue;
                }
            } else {
                run = 0;
            }
            out.push(c);
        }
        out
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}
