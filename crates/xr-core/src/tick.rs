use crate::controller::ControllerId;
use crate::hand::HandPair;
use glam::Vec3;

/// Nothing moves until both hands have a controller. Returns whether the
/// copy was attempted.
pub fn sync_markers(hands: &mut HandPair, pointer_of: impl Fn(ControllerId) -> Option<Vec3>) -> bool {
    let (Some(left), Some(right)) = (hands.left.controller, hands.right.controller) else {
        return false;
    };
    if let Some(p) = pointer_of(left) {
        hands.left.marker.position = p;
    }
    if let Some(p) = pointer_of(right) {
        hands.right.marker.position = p;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(id: ControllerId) -> Option<Vec3> {
        Some(Vec3::new(id.0 as f32, 1.0, 0.0))
    }

    #[test]
    fn no_copy_until_both_hands_tracked() {
        let mut hands = HandPair::default();
        hands.left.controller = Some(ControllerId(4));
        assert!(!sync_markers(&mut hands, pose));
        assert_eq!(hands.left.marker.position, Vec3::new(-0.5, 0.0, 0.0));

        hands.right.controller = Some(ControllerId(7));
        assert!(sync_markers(&mut hands, pose));
        assert_eq!(hands.left.marker.position, Vec3::new(4.0, 1.0, 0.0));
        assert_eq!(hands.right.marker.position, Vec3::new(7.0, 1.0, 0.0));
    }

    #[test]
    fn missing_pose_keeps_last_position() {
        let mut hands = HandPair::default();
        hands.left.controller = Some(ControllerId(0));
        hands.right.controller = Some(ControllerId(1));
        sync_markers(&mut hands, pose);
        sync_markers(&mut hands, |id| (id.0 == 1).then(|| Vec3::new(9.0, 9.0, 9.0)));
        assert_eq!(hands.left.marker.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(hands.right.marker.position, Vec3::splat(9.0));
    }
}
