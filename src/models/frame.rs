//! Frames: one scroll step of a page
//!
//! A frame holds exactly one component per slot of the owning page's
//! layout template. The frame does not know its template; callers pass it
//! in, since the template lives on the page.

use serde::{Deserialize, Serialize};

use super::component::Component;
use super::layout::{slot_order, slots_for, LayoutTemplate, Position};
use super::serde_helpers::deserialize_null_default;

/// Ordered components visible at one scroll step
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Index within the owning page, as a string
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub components: Vec<Component>,

    /// Owning page index, recomputed by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_index: Option<usize>,
}

/// Fresh frame for `template`: one content-less component per slot, in slot order
pub fn create_frame(template: LayoutTemplate) -> Frame {
    let components = slots_for(template)
        .iter()
        .enumerate()
        .map(|(index, position)| {
            let mut component = Component::new(*position);
            component.id = index.to_string();
            component
        })
        .collect();

    Frame {
        id: "0".to_string(),
        components,
        page_index: None,
    }
}

impl Frame {
    /// Move component `index` to `position`. The sibling that held the
    /// position takes the vacated slot, so the frame's position set never
    /// changes. Returns false when the request was ignored.
    pub fn set_component_position(
        &mut self,
        index: usize,
        position: Position,
        template: LayoutTemplate,
    ) -> bool {
        let Some(current) = self.components.get(index).map(|c| c.position) else {
            log::warn!("Component {} out of bounds (len {}), ignoring", index, self.components.len());
            return false;
        };

        if !template.allows(position) {
            log::warn!("Position {:?} is not a slot of {}, ignoring", position, template.name());
            return false;
        }

        if let Some(sibling) = self
            .components
            .iter()
            .enumerate()
            .position(|(i, c)| i != index && c.position == position)
        {
            self.components[sibling].position = current;
        }
        self.components[index].position = position;
        self.components[index].snap_position(template);
        true
    }

    /// Restore the slot invariant for `template`: exactly one component per
    /// slot, positions a permutation of the template's slots. Extra
    /// components are dropped, missing ones are filled with empty defaults,
    /// duplicate or foreign positions are moved to the free slots in order.
    pub fn normalize(&mut self, template: LayoutTemplate) {
        let slots = slots_for(template);

        if self.components.len() > slots.len() {
            log::debug!(
                "Frame has {} components for {} slots, dropping extras",
                self.components.len(),
                slots.len()
            );
            self.components.truncate(slots.len());
        }

        let mut taken = vec![false; slots.len()];
        let mut unplaced = Vec::new();
        for (index, component) in self.components.iter().enumerate() {
            match slot_order(template, component.position) {
                Some(slot) if !taken[slot] => taken[slot] = true,
                _ => unplaced.push(index),
            }
        }

        let free_slots: Vec<usize> = (0..slots.len()).filter(|slot| !taken[*slot]).collect();
        let mut free = free_slots.into_iter();
        for index in unplaced {
            if let Some(slot) = free.next() {
                self.components[index].position = slots[slot];
                taken[slot] = true;
            }
        }

        for (slot, position) in slots.iter().enumerate() {
            if !taken[slot] {
                self.components.push(Component::new(*position));
            }
        }
    }

    /// Components sorted by their slot order in `template`
    pub fn ordered_components(&self, template: LayoutTemplate) -> Vec<&Component> {
        let mut components: Vec<&Component> = self.components.iter().collect();
        components.sort_by_key(|c| slot_order(template, c.position).unwrap_or(usize::MAX));
        components
    }

    /// Positions currently occupied, in component order
    pub fn positions(&self) -> Vec<Position> {
        self.components.iter().map(|c| c.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_frame_follows_slots() {
        let frame = create_frame(LayoutTemplate::LeftRight);
        assert_eq!(frame.positions(), vec![Position::Left, Position::Right]);
        assert_eq!(frame.components[1].id, "1");

        let frame = create_frame(LayoutTemplate::Single);
        assert_eq!(frame.positions(), vec![Position::Center]);
    }

    #[test]
    fn test_set_component_position_swaps() {
        let mut frame = create_frame(LayoutTemplate::TopBottom);

        assert!(frame.set_component_position(0, Position::Bottom, LayoutTemplate::TopBottom));
        assert_eq!(frame.positions(), vec![Position::Bottom, Position::Top]);

        assert!(!frame.set_component_position(0, Position::Left, LayoutTemplate::TopBottom));
        assert!(!frame.set_component_position(5, Position::Top, LayoutTemplate::TopBottom));
        assert_eq!(frame.positions(), vec![Position::Bottom, Position::Top]);
    }

    #[test]
    fn test_normalize_repairs_slots() {
        let mut frame = Frame::default();
        frame.components = vec![
            Component::new(Position::Bottom),
            Component::new(Position::Bottom),
            Component::new(Position::Left),
        ];

        frame.normalize(LayoutTemplate::TopBottom);
        assert_eq!(frame.positions(), vec![Position::Bottom, Position::Top]);

        let mut empty = Frame::default();
        empty.normalize(LayoutTemplate::LeftRight);
        assert_eq!(empty.positions(), vec![Position::Left, Position::Right]);
    }

    #[test]
    fn test_ordered_components() {
        let mut frame = create_frame(LayoutTemplate::LeftRight);
        frame.components.reverse();

        let ordered: Vec<Position> = frame
            .ordered_components(LayoutTemplate::LeftRight)
            .iter()
            .map(|c| c.position)
            .collect();
        assert_eq!(ordered, vec![Position::Left, Position::Right]);
    }

    #[test]
    fn test_null_components_decode_empty() {
        let frame: Frame = serde_json::from_str(r#"{"id":"0","components":null}"#).unwrap();
        assert!(frame.components.is_empty());
    }
}
