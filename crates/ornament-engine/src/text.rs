// Imports
use ornament_compose::validation::{self, ValidationError};
use ornament_compose::Color;
use piet::{TextLayout, TextLayoutBuilder};
use serde::{Deserialize, Serialize};

/// The style of a text decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "text_style")]
pub struct TextStyle {
    #[serde(rename = "font_family")]
    pub font_family: String,
    #[serde(rename = "font_size")]
    pub font_size: f64,
    #[serde(rename = "font_weight")]
    pub font_weight: u16,
    #[serde(rename = "color")]
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::from(Self::FONT_FAMILY_DEFAULT),
            font_size: Self::FONT_SIZE_DEFAULT,
            font_weight: Self::FONT_WEIGHT_DEFAULT,
            color: Self::FONT_COLOR_DEFAULT,
        }
    }
}

impl TextStyle {
    pub const FONT_FAMILY_DEFAULT: &'static str = "sans-serif";
    pub const FONT_SIZE_DEFAULT: f64 = 15.0;
    pub const FONT_WEIGHT_DEFAULT: u16 = 400;
    pub const FONT_COLOR_DEFAULT: Color = Color::BLACK;

    pub fn new(font_family: impl Into<String>, font_size: f64, color: Color) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::ensure_positive("font size", self.font_size)
    }

    pub fn build_text_layout<T>(
        &self,
        piet_text: &mut T,
        text: String,
    ) -> anyhow::Result<T::TextLayout>
    where
        T: piet::Text,
    {
        let font_family = piet_text
            .font_family(&self.font_family)
            .unwrap_or(piet::FontFamily::SANS_SERIF);

        piet_text
            .new_text_layout(text)
            .font(font_family, self.font_size)
            .default_attribute(piet::TextAttribute::Weight(piet::FontWeight::new(
                self.font_weight,
            )))
            .text_color(self.color.into())
            .build()
            .map_err(|e| anyhow::anyhow!("{e:?}"))
    }

    /// The size of the laid out text.
    pub fn layout_size<T>(&self, piet_text: &mut T, text: String) -> Option<na::Vector2<f64>>
    where
        T: piet::Text,
    {
        let text_layout = self.build_text_layout(piet_text, text).ok()?;

        let size = text_layout.size();
        Some(na::vector![size.width, size.height])
    }
}
