use crate::constants::*;
use crate::controller::ControllerId;
use glam::{Mat4, Quat, Vec3, Vec4};

/// Handedness as reported by the XR runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
    None,
}

impl Handedness {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "left" => Handedness::Left,
            "right" => Handedness::Right,
            _ => Handedness::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
            Handedness::None => "none",
        }
    }

    /// Only `Left` routes to the left hand; `Right` and `None` both route right.
    #[inline]
    pub fn side(self) -> HandSide {
        match self {
            Handedness::Left => HandSide::Left,
            _ => HandSide::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn as_str(self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const BLACK: Color3 = Color3 {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn set_channel(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub position: Vec3,
    pub scaling: Vec3,
}

impl Marker {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            scaling: Vec3::ONE,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scaling, Quat::IDENTITY, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerMaterial {
    pub alpha: f32,
}

impl Default for MarkerMaterial {
    fn default() -> Self {
        Self {
            alpha: ALPHA_DEFAULT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub side: HandSide,
    pub controller: Option<ControllerId>,
    pub marker: Marker,
    pub material: MarkerMaterial,
    pub color: Color3,
}

impl Hand {
    pub fn new(side: HandSide) -> Self {
        let offset = match side {
            HandSide::Left => left_marker_offset(),
            HandSide::Right => right_marker_offset(),
        };
        Self {
            side,
            controller: None,
            marker: Marker::at(offset),
            material: MarkerMaterial::default(),
            color: Color3::BLACK,
        }
    }

    /// Straight-alpha RGBA used by the renderers.
    pub fn rgba(&self) -> Vec4 {
        Vec4::new(self.color.r, self.color.g, self.color.b, self.material.alpha)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HandPair {
    pub left: Hand,
    pub right: Hand,
}

impl Default for HandPair {
    fn default() -> Self {
        Self {
            left: Hand::new(HandSide::Left),
            right: Hand::new(HandSide::Right),
        }
    }
}

impl HandPair {
    pub fn get(&self, side: HandSide) -> &Hand {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: HandSide) -> &mut Hand {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hand> {
        [&self.left, &self.right].into_iter()
    }

    pub fn both_tracked(&self) -> bool {
        self.left.controller.is_some() && self.right.controller.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_left_tag_routes_left() {
        assert_eq!(Handedness::from_tag("left").side(), HandSide::Left);
        assert_eq!(Handedness::from_tag("right").side(), HandSide::Right);
        assert_eq!(Handedness::from_tag("none").side(), HandSide::Right);
        assert_eq!(Handedness::from_tag("").side(), HandSide::Right);
        assert_eq!(Handedness::from_tag("LEFT").side(), HandSide::Right);
    }

    #[test]
    fn hands_start_untracked_black_and_translucent() {
        let hands = HandPair::default();
        for hand in hands.iter() {
            assert!(hand.controller.is_none());
            assert_eq!(hand.color, Color3::BLACK);
            assert_eq!(hand.material.alpha, 0.5);
            assert_eq!(hand.marker.scaling, Vec3::ONE);
        }
        assert_eq!(hands.left.marker.position, Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(hands.right.marker.position, Vec3::new(0.5, 0.0, 0.0));
        assert!(!hands.both_tracked());
    }

    #[test]
    fn model_matrix_applies_scale_then_translation() {
        let mut marker = Marker::at(Vec3::new(1.0, 2.0, 3.0));
        marker.scaling = Vec3::new(2.0, 1.0, 2.0);
        let p = marker.model_matrix().transform_point3(Vec3::new(0.5, 0.5, 0.5));
        assert!((p - Vec3::new(2.0, 2.5, 4.0)).length() < 1e-6);
    }
}
