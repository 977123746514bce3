use crate::constants::*;

/// Pressed/touched/value snapshot of one controller component.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ButtonState {
    pub pressed: bool,
    pub touched: bool,
    pub value: f32,
}

impl ButtonState {
    pub const RELEASED: ButtonState = ButtonState {
        pressed: false,
        touched: false,
        value: 0.0,
    };

    pub fn new(pressed: bool, touched: bool, value: f32) -> Self {
        Self {
            pressed,
            touched,
            value,
        }
    }

    pub fn press() -> Self {
        Self::new(true, true, 1.0)
    }

    pub fn touch() -> Self {
        Self::new(false, true, 0.0)
    }

    pub fn level(&self) -> ButtonLevel {
        ButtonLevel::from_state(self)
    }
}

/// Three-level reading of a button: `Released -> Touched -> Pressed`.
///
/// A press outranks a touch, so a runtime reporting `pressed` without
/// `touched` (common for triggers) still reads as `Pressed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ButtonLevel {
    Released,
    Touched,
    Pressed,
}

impl ButtonLevel {
    #[inline]
    pub fn from_state(state: &ButtonState) -> Self {
        if state.pressed {
            ButtonLevel::Pressed
        } else if state.touched {
            ButtonLevel::Touched
        } else {
            ButtonLevel::Released
        }
    }

    /// Value written into a color channel for this level.
    #[inline]
    pub fn channel_value(self) -> f32 {
        match self {
            ButtonLevel::Released => LEVEL_RELEASED,
            ButtonLevel::Touched => LEVEL_TOUCHED,
            ButtonLevel::Pressed => LEVEL_PRESSED,
        }
    }
}

#[inline]
pub fn scale_for(state: &ButtonState) -> f32 {
    if state.pressed {
        SCALE_PRESSED
    } else {
        SCALE_RELEASED
    }
}

#[inline]
pub fn alpha_for(state: &ButtonState) -> f32 {
    if state.touched {
        ALPHA_THUMBREST
    } else {
        ALPHA_DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_pressed_then_touched() {
        assert_eq!(ButtonState::RELEASED.level(), ButtonLevel::Released);
        assert_eq!(ButtonState::touch().level(), ButtonLevel::Touched);
        assert_eq!(ButtonState::press().level(), ButtonLevel::Pressed);
        // pressed without touched still counts as pressed
        assert_eq!(
            ButtonState::new(true, false, 1.0).level(),
            ButtonLevel::Pressed
        );
    }

    #[test]
    fn channel_values_are_the_three_fixed_levels() {
        assert_eq!(ButtonLevel::Released.channel_value(), 0.0);
        assert_eq!(ButtonLevel::Touched.channel_value(), 0.5);
        assert_eq!(ButtonLevel::Pressed.channel_value(), 1.0);
    }

    #[test]
    fn scale_and_alpha_are_binary() {
        assert_eq!(scale_for(&ButtonState::press()), 2.0);
        assert_eq!(scale_for(&ButtonState::touch()), 1.0);
        assert_eq!(alpha_for(&ButtonState::touch()), 1.0);
        assert_eq!(alpha_for(&ButtonState::RELEASED), 0.5);
        // a press reported without touch leaves the thumbrest translucent
        assert_eq!(alpha_for(&ButtonState::new(true, false, 1.0)), 0.5);
    }
}
