//! Text direction policy.

/// Language codes rendered right-to-left.
pub const RTL_LANGUAGES: &[&str] = &["ar", "he"];

/// Document text direction, written to the root `dir` attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Direction for a language code. Region qualifiers are ignored:
    /// `ar-EG` is still rtl.
    pub fn for_language(code: &str) -> Self {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase();

        if RTL_LANGUAGES.contains(&primary.as_str()) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl core::fmt::Display for TextDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
