//! Render-style serialization of interpolated property values.
//!
//! [`create_transform_string`] turns a [`PropertyMap`] into three CSS-ready
//! channels: a `transform` function list, a `filter` function list and an
//! `opacity` value. Custom keys are not renderable and are skipped.

use serde::{Deserialize, Serialize};

use crate::property::{PropertyMap, StyleChannel, StyleProperty};

/// Units appended to rendered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleUnits {
    /// `translateX` / `translateY`
    pub translate: String,
    /// `rotate*`
    pub rotate: String,
    /// `skewX` / `skewY`
    pub skew: String,
    pub blur: String,
    pub hue_rotate: String,
    /// `grayscale`, `invert` and `sepia`
    pub percentage: String,
}

impl Default for StyleUnits {
    fn default() -> Self {
        Self {
            translate: "px".to_string(),
            rotate: "deg".to_string(),
            skew: "deg".to_string(),
            blur: "px".to_string(),
            hue_rotate: "deg".to_string(),
            percentage: "%".to_string(),
        }
    }
}

impl StyleUnits {
    /// Unit for a property; empty for unitless ones.
    pub fn unit(&self, property: StyleProperty) -> &str {
        use StyleProperty::*;
        match property {
            TranslateX | TranslateY => self.translate.as_str(),
            Rotate | RotateX | RotateY | RotateZ => self.rotate.as_str(),
            SkewX | SkewY => self.skew.as_str(),
            Blur => self.blur.as_str(),
            HueRotate => self.hue_rotate.as_str(),
            Grayscale | Invert | Sepia => self.percentage.as_str(),
            Scale | ScaleX | ScaleY | Brightness | Contrast | Saturate | Opacity => "",
        }
    }
}

/// Serialized render channels for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Space-separated transform functions, possibly empty.
    pub transform: String,
    /// Space-separated filter functions, possibly empty.
    pub filter: String,
    /// Opacity value; `"1"` when not animated.
    pub opacity: String,
}

impl RenderStyle {
    /// Render as CSS declarations, omitting empty channels.
    ///
    /// ```
    /// use cadence_motion::style::RenderStyle;
    ///
    /// let style = RenderStyle {
    ///     transform: "rotate(45deg)".into(),
    ///     filter: String::new(),
    ///     opacity: "0.5".into(),
    /// };
    /// assert_eq!(style.to_css_declarations(), "transform: rotate(45deg); opacity: 0.5;");
    /// ```
    pub fn to_css_declarations(&self) -> String {
        let mut declarations = Vec::with_capacity(3);
        if !self.transform.is_empty() {
            declarations.push(format!("transform: {};", self.transform));
        }
        if !self.filter.is_empty() {
            declarations.push(format!("filter: {};", self.filter));
        }
        if !self.opacity.is_empty() {
            declarations.push(format!("opacity: {};", self.opacity));
        }
        declarations.join(" ")
    }
}

/// Serialize property values into render channels.
///
/// Functions are emitted in [`StyleProperty`] declaration order, regardless of
/// map order.
pub fn create_transform_string(properties: &PropertyMap, units: &StyleUnits) -> RenderStyle {
    let mut transform = Vec::new();
    let mut filter = Vec::new();
    let mut opacity = None;

    let style_values = properties
        .iter()
        .filter_map(|(key, value)| key.as_style().map(|property| (property, *value)));

    for (property, value) in style_values {
        match property.channel() {
            StyleChannel::Transform => transform.push(css_function(property, value, units)),
            StyleChannel::Filter => filter.push(css_function(property, value, units)),
            StyleChannel::Opacity => opacity = Some(format_number(value)),
        }
    }

    RenderStyle {
        transform: transform.join(" "),
        filter: filter.join(" "),
        opacity: opacity.unwrap_or_else(|| "1".to_string()),
    }
}

fn css_function(property: StyleProperty, value: f64, units: &StyleUnits) -> String {
    format!(
        "{}({}{})",
        property.css_function(),
        format_number(value),
        units.unit(property)
    )
}

/// Format a value for CSS: at most four decimals, no trailing zeros, no `-0`.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
