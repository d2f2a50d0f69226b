// Keyboard bindings for the sliders

use winit::keyboard::KeyCode;

use crate::scene::{Param, Scene};

/// Steps applied per PageUp/PageDown press.
const COARSE_STEPS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Select(Param),
    SelectNext,
    SelectPrev,
    Nudge(f32),
    Reset,
    Quit,
}

/// Digits 1-9 pick a slider in x, y, z, angleX, angleY, angleZ, scaleX,
/// scaleY, scaleZ order; arrows move it one step, PageUp/PageDown ten.
pub fn action_for(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Digit1 => Action::Select(Param::X),
        KeyCode::Digit2 => Action::Select(Param::Y),
        KeyCode::Digit3 => Action::Select(Param::Z),
        KeyCode::Digit4 => Action::Select(Param::AngleX),
        KeyCode::Digit5 => Action::Select(Param::AngleY),
        KeyCode::Digit6 => Action::Select(Param::AngleZ),
        KeyCode::Digit7 => Action::Select(Param::ScaleX),
        KeyCode::Digit8 => Action::Select(Param::ScaleY),
        KeyCode::Digit9 => Action::Select(Param::ScaleZ),
        KeyCode::Tab => Action::SelectNext,
        KeyCode::Backquote => Action::SelectPrev,
        KeyCode::ArrowUp | KeyCode::ArrowRight => Action::Nudge(1.0),
        KeyCode::ArrowDown | KeyCode::ArrowLeft => Action::Nudge(-1.0),
        KeyCode::PageUp => Action::Nudge(COARSE_STEPS),
        KeyCode::PageDown => Action::Nudge(-COARSE_STEPS),
        KeyCode::KeyR => Action::Reset,
        KeyCode::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Applies `action` to the scene. Returns true when a redraw is needed.
pub fn apply(scene: &mut Scene, action: Action) -> bool {
    match action {
        Action::Select(param) => scene.select(param),
        Action::SelectNext => scene.select_next(),
        Action::SelectPrev => scene.select_prev(),
        Action::Nudge(steps) => {
            scene.nudge(steps);
            return true;
        }
        Action::Reset => {
            scene.reset();
            return true;
        }
        Action::Quit => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use approx::assert_relative_eq;

    #[test]
    fn digits_select_sliders_in_order() {
        let digits = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
        ];
        for (code, param) in digits.into_iter().zip(Param::ALL) {
            assert_eq!(action_for(code), Some(Action::Select(param)));
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(action_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn only_value_changes_request_redraw() {
        let mut scene = Scene::new(&Config::default());
        assert!(!apply(&mut scene, Action::Select(Param::AngleZ)));
        assert!(apply(&mut scene, Action::Nudge(COARSE_STEPS)));
        assert_relative_eq!(scene.value(Param::AngleZ), 335.0, max_relative = 1e-5);
        assert!(apply(&mut scene, Action::Reset));
        assert!(!apply(&mut scene, Action::Quit));
    }
}
