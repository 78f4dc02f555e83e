//! Layout templates and slot positions
//!
//! A layout template fixes how many component slots a frame has and which
//! positions those slots occupy. The catalog is static: every template maps
//! to an ordered tuple of positions.

use serde::{Deserialize, Serialize};

/// Named arrangement of a page's frames
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LayoutTemplate {
    /// One centered slot
    #[default]
    Single,

    /// Two slots side by side
    LeftRight,

    /// Two slots stacked vertically
    TopBottom,
}

/// Where a component sits inside its frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

const SINGLE_SLOTS: [Position; 1] = [Position::Center];
const LEFT_RIGHT_SLOTS: [Position; 2] = [Position::Left, Position::Right];
const TOP_BOTTOM_SLOTS: [Position; 2] = [Position::Top, Position::Bottom];

/// All templates, in the order the editor offers them
pub const LAYOUT_TEMPLATES: [LayoutTemplate; 3] = [
    LayoutTemplate::LeftRight,
    LayoutTemplate::TopBottom,
    LayoutTemplate::Single,
];

/// Ordered slot positions permitted by a template
pub fn slots_for(template: LayoutTemplate) -> &'static [Position] {
    match template {
        LayoutTemplate::Single => &SINGLE_SLOTS,
        LayoutTemplate::LeftRight => &LEFT_RIGHT_SLOTS,
        LayoutTemplate::TopBottom => &TOP_BOTTOM_SLOTS,
    }
}

/// Display order of `position` within `template`, if the template allows it
pub fn slot_order(template: LayoutTemplate, position: Position) -> Option<usize> {
    slots_for(template).iter().position(|p| *p == position)
}

impl LayoutTemplate {
    /// Parse a template name. Unknown names fall back to `single`.
    pub fn parse(name: &str) -> Self {
        match name {
            "left-right" => LayoutTemplate::LeftRight,
            "top-bottom" => LayoutTemplate::TopBottom,
            "single" => LayoutTemplate::Single,
            other => {
                log::warn!("Unknown layout template '{}', using single", other);
                LayoutTemplate::Single
            }
        }
    }

    /// Wire name of the template
    pub fn name(&self) -> &'static str {
        match self {
            LayoutTemplate::Single => "single",
            LayoutTemplate::LeftRight => "left-right",
            LayoutTemplate::TopBottom => "top-bottom",
        }
    }

    /// Number of component slots per frame
    pub fn slot_count(&self) -> usize {
        slots_for(*self).len()
    }

    /// First valid slot, used when snapping an out-of-range position
    pub fn first_slot(&self) -> Position {
        slots_for(*self)[0]
    }

    /// Check whether `position` is a slot of this template
    pub fn allows(&self, position: Position) -> bool {
        slot_order(*self, position).is_some()
    }
}

impl Position {
    /// Capitalized label used in option lists ("Left", "Top", ...)
    pub fn label(&self) -> &'static str {
        match self {
            Position::Center => "Center",
            Position::Left => "Left",
            Position::Right => "Right",
            Position::Top => "Top",
            Position::Bottom => "Bottom",
        }
    }
}

// Serialized as the bare template name
impl Serialize for LayoutTemplate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

// Any string is accepted; unknown names become `single`
impl<'de> Deserialize<'de> for LayoutTemplate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct LayoutTemplateVisitor;

        impl<'de> serde::de::Visitor<'de> for LayoutTemplateVisitor {
            type Value = LayoutTemplate;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a layout template name")
            }

            fn visit_str<E>(self, value: &str) -> Result<LayoutTemplate, E>
            where
                E: serde::de::Error,
            {
                Ok(LayoutTemplate::parse(value))
            }

            fn visit_unit<E>(self) -> Result<LayoutTemplate, E>
            where
                E: serde::de::Error,
            {
                Ok(LayoutTemplate::Single)
            }
        }

        deserializer.deserialize_any(LayoutTemplateVisitor)
    }
}

/// Page layout settings
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Layout {
    #[serde(default)]
    pub template: LayoutTemplate,
}

impl Layout {
    pub fn new(template: LayoutTemplate) -> Self {
        Self { template }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_catalog() {
        assert_eq!(slots_for(LayoutTemplate::Single), &[Position::Center]);
        assert_eq!(slots_for(LayoutTemplate::LeftRight), &[Position::Left, Position::Right]);
        assert_eq!(slots_for(LayoutTemplate::TopBottom), &[Position::Top, Position::Bottom]);
    }

    #[test]
    fn test_unknown_template_is_single() {
        assert_eq!(LayoutTemplate::parse("three-columns"), LayoutTemplate::Single);

        let layout: Layout = serde_json::from_str(r#"{"template":"diagonal"}"#).unwrap();
        assert_eq!(layout.template, LayoutTemplate::Single);
    }

    #[test]
    fn test_template_round_trips_by_name() {
        for template in LAYOUT_TEMPLATES {
            let json = serde_json::to_string(&template).unwrap();
            assert_eq!(json, format!("\"{}\"", template.name()));
            let back: LayoutTemplate = serde_json::from_str(&json).unwrap();
            assert_eq!(back, template);
        }
    }

    #[test]
    fn test_slot_order() {
        assert_eq!(slot_order(LayoutTemplate::TopBottom, Position::Bottom), Some(1));
        assert_eq!(slot_order(LayoutTemplate::TopBottom, Position::Left), None);
        assert!(LayoutTemplate::LeftRight.allows(Position::Right));
        assert!(!LayoutTemplate::Single.allows(Position::Left));
        assert_eq!(LayoutTemplate::LeftRight.first_slot(), Position::Left);
    }
}
