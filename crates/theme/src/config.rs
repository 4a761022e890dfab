//! Backend-owned theme configuration snapshots.

use serde::{Deserialize, Serialize};

/// Named set of brand color roles, as served by the configuration service.
///
/// Color values are passed through verbatim; the shell does no parsing or
/// normalization of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub name: String,
    pub primary: String,
    pub primary_hover: String,
    pub secondary: String,
    pub secondary_hover: String,
    pub accent_1: String,
    pub accent_2: String,
    pub accent_3: String,
}

impl PaletteConfig {
    /// CSS custom properties for this palette, overwrite-by-key.
    pub fn css_properties(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("--color-primary", self.primary.as_str()),
            ("--color-primary-hover", self.primary_hover.as_str()),
            ("--color-secondary", self.secondary.as_str()),
            ("--color-secondary-hover", self.secondary_hover.as_str()),
            ("--color-accent-1", self.accent_1.as_str()),
            ("--color-accent-2", self.accent_2.as_str()),
            ("--color-accent-3", self.accent_3.as_str()),
        ]
    }
}

/// Font-family selections and the base/heading size scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyConfig {
    pub font_body: String,
    pub font_heading: String,
    pub size_base: String,
    pub size_h1: String,
    pub size_h2: String,
    pub size_h3: String,
    pub size_h4: String,
    pub size_h5: String,
    pub size_h6: String,
}

impl TypographyConfig {
    /// CSS custom properties for this typography config, overwrite-by-key.
    pub fn css_properties(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("--font-body", self.font_body.as_str()),
            ("--font-heading", self.font_heading.as_str()),
            ("--font-size-base", self.size_base.as_str()),
            ("--font-size-h1", self.size_h1.as_str()),
            ("--font-size-h2", self.size_h2.as_str()),
            ("--font-size-h3", self.size_h3.as_str()),
            ("--font-size-h4", self.size_h4.as_str()),
            ("--font-size-h5", self.size_h5.as_str()),
            ("--font-size-h6", self.size_h6.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_palette() -> PaletteConfig {
        PaletteConfig {
            name: "midnight".to_string(),
            primary: "#102a43".to_string(),
            primary_hover: "#243b53".to_string(),
            secondary: "#d9e2ec".to_string(),
            secondary_hover: "#bcccdc".to_string(),
            accent_1: "#f0b429".to_string(),
            accent_2: "#de911d".to_string(),
            accent_3: "#cb6e17".to_string(),
        }
    }

    #[test]
    fn palette_maps_every_color_role() {
        let palette = sample_palette();
        let properties = palette.css_properties();

        assert_eq!(properties.len(), 7);
        assert!(properties.contains(&("--color-primary", "#102a43")));
        assert!(properties.contains(&("--color-accent-3", "#cb6e17")));
    }

    #[test]
    fn typography_maps_fonts_and_the_full_size_scale() {
        let config = TypographyConfig {
            font_body: "Inter, sans-serif".to_string(),
            font_heading: "Sora, sans-serif".to_string(),
            size_base: "1rem".to_string(),
            size_h1: "2.5rem".to_string(),
            size_h2: "2rem".to_string(),
            size_h3: "1.75rem".to_string(),
            size_h4: "1.5rem".to_string(),
            size_h5: "1.25rem".to_string(),
            size_h6: "1.125rem".to_string(),
        };

        let properties = config.css_properties();
        assert_eq!(properties.len(), 9);
        assert!(properties.contains(&("--font-body", "Inter, sans-serif")));
        assert!(properties.contains(&("--font-size-h6", "1.125rem")));
    }
}
