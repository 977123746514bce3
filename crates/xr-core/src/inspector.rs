use crate::hand::{Hand, HandPair};
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Desktop camera only; the XR check has not finished yet.
    Desktop,
    /// No WebXR, or the requested mode is not supported.
    XrUnsupported,
    /// Supported and waiting for the user to enter.
    XrAvailable,
    Immersive,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Desktop => "desktop",
            SessionStatus::XrUnsupported => "xr-unsupported",
            SessionStatus::XrAvailable => "xr-available",
            SessionStatus::Immersive => "immersive",
        }
    }
}

fn hand_line(out: &mut String, hand: &Hand) {
    let controller = match hand.controller {
        Some(id) => id.to_string(),
        None => "-".to_string(),
    };
    let p = hand.marker.position;
    let s = hand.marker.scaling;
    let c = hand.color;
    _ = writeln!(
        out,
        "{:<5} ctrl={} pos=({:.2},{:.2},{:.2}) scale=({:.0},{:.0},{:.0}) rgb=({:.1},{:.1},{:.1}) a={:.1}",
        hand.side.as_str(),
        controller,
        p.x,
        p.y,
        p.z,
        s.x,
        s.y,
        s.z,
        c.r,
        c.g,
        c.b,
        hand.material.alpha
    );
}

pub fn report(hands: &HandPair, status: SessionStatus) -> String {
    let mut out = String::with_capacity(256);
    _ = writeln!(out, "session: {}", status.as_str());
    for hand in hands.iter() {
        hand_line(&mut out, hand);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerId;

    #[test]
    fn report_lists_session_and_both_hands() {
        let mut hands = HandPair::default();
        hands.left.controller = Some(ControllerId(3));
        hands.left.color.g = 1.0;
        let text = report(&hands, SessionStatus::Immersive);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "session: immersive");
        assert!(lines[1].starts_with("left  ctrl=#3"));
        assert!(lines[1].contains("rgb=(0.0,1.0,0.0)"));
        assert!(lines[2].starts_with("right ctrl=-"));
        assert!(lines[2].contains("pos=(0.50,0.00,0.00)"));
        assert!(lines[2].ends_with("a=0.5"));
    }
}
