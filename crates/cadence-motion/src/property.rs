//! Animatable property keys.
//!
//! Property names are resolved once, when a definition is authored, into a
//! closed set of render properties ([`StyleProperty`]) or a free-form custom
//! key. Per-frame code matches on the enum instead of comparing strings.
//!
//! - `StyleProperty`: properties the transform serializer knows how to render
//! - `PropertyKey`: a style property or a caller-defined numeric property
//! - `PropertyMap`: resolved property values for one frame
//! - `AnimationProperty`: authoring metadata (not used during playback)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Property values for one frame, in a stable key order.
pub type PropertyMap = BTreeMap<PropertyKey, f64>;

/// Which render channel a style property feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleChannel {
    Transform,
    Filter,
    Opacity,
}

/// Recognized render properties.
///
/// Declaration order is the order in which properties are emitted by the
/// serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    // Transform functions
    TranslateX,
    TranslateY,
    Scale,
    ScaleX,
    ScaleY,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    SkewX,
    SkewY,

    // Filter functions
    Blur,
    Brightness,
    Contrast,
    Grayscale,
    Invert,
    Saturate,
    Sepia,
    HueRotate,

    Opacity,
}

impl StyleProperty {
    /// Every recognized property, in emission order.
    pub const ALL: [StyleProperty; 20] = [
        StyleProperty::TranslateX,
        StyleProperty::TranslateY,
        StyleProperty::Scale,
        StyleProperty::ScaleX,
        StyleProperty::ScaleY,
        StyleProperty::Rotate,
        StyleProperty::RotateX,
        StyleProperty::RotateY,
        StyleProperty::RotateZ,
        StyleProperty::SkewX,
        StyleProperty::SkewY,
        StyleProperty::Blur,
        StyleProperty::Brightness,
        StyleProperty::Contrast,
        StyleProperty::Grayscale,
        StyleProperty::Invert,
        StyleProperty::Saturate,
        StyleProperty::Sepia,
        StyleProperty::HueRotate,
        StyleProperty::Opacity,
    ];

    /// Property name as written in definitions.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Rotate => "rotate",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Grayscale => "grayscale",
            Self::Invert => "invert",
            Self::Saturate => "saturate",
            Self::Sepia => "sepia",
            Self::HueRotate => "hueRotate",
            Self::Opacity => "opacity",
        }
    }

    /// CSS function name used when rendering this property.
    pub fn css_function(&self) -> &'static str {
        match self {
            Self::HueRotate => "hue-rotate",
            other => other.name(),
        }
    }

    /// Render channel this property belongs to.
    pub fn channel(&self) -> StyleChannel {
        match self {
            Self::TranslateX
            | Self::TranslateY
            | Self::Scale
            | Self::ScaleX
            | Self::ScaleY
            | Self::Rotate
            | Self::RotateX
            | Self::RotateY
            | Self::RotateZ
            | Self::SkewX
            | Self::SkewY => StyleChannel::Transform,

            Self::Blur
            | Self::Brightness
            | Self::Contrast
            | Self::Grayscale
            | Self::Invert
            | Self::Saturate
            | Self::Sepia
            | Self::HueRotate => StyleChannel::Filter,

            Self::Opacity => StyleChannel::Opacity,
        }
    }

    /// Resolve a property name, accepting the CSS spelling of `hue-rotate`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "hue-rotate" {
            return Some(Self::HueRotate);
        }
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of an animated property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyKey {
    /// A property the serializer can render.
    Style(StyleProperty),
    /// Any other numeric property; interpolated but never rendered.
    Custom(String),
}

impl PropertyKey {
    /// Create a caller-defined key.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Key name as written in definitions.
    pub fn name(&self) -> &str {
        match self {
            Self::Style(property) => property.name(),
            Self::Custom(name) => name,
        }
    }

    /// The style property, if this key is one.
    pub fn as_style(&self) -> Option<StyleProperty> {
        match self {
            Self::Style(property) => Some(*property),
            Self::Custom(_) => None,
        }
    }
}

impl From<StyleProperty> for PropertyKey {
    fn from(property: StyleProperty) -> Self {
        Self::Style(property)
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        match StyleProperty::from_name(name) {
            Some(property) => Self::Style(property),
            None => Self::Custom(name.to_string()),
        }
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        match StyleProperty::from_name(&name) {
            Some(property) => Self::Style(property),
            None => Self::Custom(name),
        }
    }
}

impl From<PropertyKey> for String {
    fn from(key: PropertyKey) -> Self {
        match key {
            PropertyKey::Style(property) => property.name().to_string(),
            PropertyKey::Custom(name) => name,
        }
    }
}

impl FromStr for PropertyKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptive metadata for authoring tools.
///
/// Not consulted during interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationProperty {
    pub name: PropertyKey,
    pub start_value: f64,
    pub end_value: f64,
    pub unit: String,
}

impl AnimationProperty {
    pub fn new(name: impl Into<PropertyKey>, start_value: f64, end_value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_value,
            end_value,
            unit: unit.into(),
        }
    }
}
