//! Subtitle style templates and the fixed template catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the template used when a render request does not specify one.
pub const DEFAULT_TEMPLATE: &str = "classic";

/// Outline width applied to every template, in pixels.
pub const OUTLINE_WIDTH: u32 = 2;

/// Vertical anchor for rendered subtitle text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    /// 50 px from the top edge, horizontally centered.
    Top,
    /// Fully centered.
    Center,
    /// 150 px above the bottom edge, horizontally centered.
    Bottom,
}

impl fmt::Display for VerticalAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerticalAnchor::Top => "top",
            VerticalAnchor::Center => "center",
            VerticalAnchor::Bottom => "bottom",
        };
        write!(f, "{}", s)
    }
}

/// An immutable bundle of text-rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTemplate {
    /// Font size in points.
    pub font_size: u32,
    /// Fill color (FFmpeg color name).
    pub color: String,
    /// Outline color (FFmpeg color name).
    pub outline_color: String,
    /// Outline width in pixels.
    pub outline_width: u32,
    /// Vertical text anchor.
    pub anchor: VerticalAnchor,
}

impl StyleTemplate {
    fn new(font_size: u32, color: &str, outline_color: &str, anchor: VerticalAnchor) -> Self {
        Self {
            font_size,
            color: color.to_string(),
            outline_color: outline_color.to_string(),
            outline_width: OUTLINE_WIDTH,
            anchor,
        }
    }
}

/// Fixed, read-only mapping from template name to [`StyleTemplate`].
///
/// Built once at process start and passed by reference to the renderer;
/// not user-extensible.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<(String, StyleTemplate)>,
}

impl TemplateCatalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        use VerticalAnchor::{Bottom, Center, Top};

        let templates = vec![
            ("classic", StyleTemplate::new(70, "white", "black", Bottom)),
            ("highlight", StyleTemplate::new(90, "yellow", "black", Center)),
            ("bold_red", StyleTemplate::new(80, "red", "white", Bottom)),
            ("shadow", StyleTemplate::new(70, "white", "black", Bottom)),
            ("upper_box", StyleTemplate::new(60, "white", "black", Top)),
            ("big_center", StyleTemplate::new(100, "cyan", "black", Center)),
        ];

        Self {
            templates: templates
                .into_iter()
                .map(|(name, t)| (name.to_string(), t))
                .collect(),
        }
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&StyleTemplate> {
        self.templates
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    /// Whether a template with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All template names, in catalog order.
    pub fn names(&self) -> Vec<String> {
        self.templates.iter().map(|(n, _)| n.clone()).collect()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
