use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

use crate::controllers::interactive::commands::UserAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Viewer(UserAction),
    ToggleHelp,
    ToggleDebug,
    ToggleInterface,
}

/// The viewer keymap.
///
/// `+`/`-` zoom, arrows or WASD pan, `Z`/`X` cycle fractals, `I`/`O` raise or
/// lower iterations, `Q`/`E` raise or lower workers, `R` refresh, `Space`
/// screenshot, `F11` fullscreen, `H` help, `G` debug values, left `Ctrl` the
/// whole interface.
#[must_use]
pub fn binding_for_key(key: KeyCode) -> Option<KeyBinding> {
    use UserAction::*;

    let action = match key {
        KeyCode::Equal | KeyCode::NumpadAdd => Zoom(1),
        KeyCode::Minus | KeyCode::NumpadSubtract => Zoom(-1),
        KeyCode::ArrowLeft | KeyCode::KeyA => Pan { dx: -1, dy: 0 },
        KeyCode::ArrowRight | KeyCode::KeyD => Pan { dx: 1, dy: 0 },
        KeyCode::ArrowUp | KeyCode::KeyW => Pan { dx: 0, dy: 1 },
        KeyCode::ArrowDown | KeyCode::KeyS => Pan { dx: 0, dy: -1 },
        KeyCode::KeyZ => SwitchFractal(1),
        KeyCode::KeyX => SwitchFractal(-1),
        KeyCode::KeyI => AdjustIterations(1),
        KeyCode::KeyO => AdjustIterations(-1),
        KeyCode::KeyQ => AdjustWorkers(1),
        KeyCode::KeyE => AdjustWorkers(-1),
        KeyCode::KeyR => Refresh,
        KeyCode::Space => Screenshot,
        KeyCode::F11 => ToggleFullscreen,
        KeyCode::KeyH => return Some(KeyBinding::ToggleHelp),
        KeyCode::KeyG => return Some(KeyBinding::ToggleDebug),
        KeyCode::ControlLeft => return Some(KeyBinding::ToggleInterface),
        _ => return None,
    };

    Some(KeyBinding::Viewer(action))
}

/// Scrolling up zooms in.
#[must_use]
pub fn zoom_for_scroll(delta: MouseScrollDelta) -> Option<UserAction> {
    let vertical = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y,
    };

    if vertical > 0.0 {
        Some(UserAction::Zoom(1))
    } else if vertical < 0.0 {
        Some(UserAction::Zoom(-1))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn arrows_and_wasd_pan_the_same_way() {
        for (arrow, letter) in [
            (KeyCode::ArrowLeft, KeyCode::KeyA),
            (KeyCode::ArrowRight, KeyCode::KeyD),
            (KeyCode::ArrowUp, KeyCode::KeyW),
            (KeyCode::ArrowDown, KeyCode::KeyS),
        ] {
            assert_eq!(binding_for_key(arrow), binding_for_key(letter));
        }
        assert_eq!(
            binding_for_key(KeyCode::ArrowUp),
            Some(KeyBinding::Viewer(UserAction::Pan { dx: 0, dy: 1 }))
        );
    }

    #[test]
    fn adjustment_keys_come_in_pairs() {
        assert_eq!(
            binding_for_key(KeyCode::KeyQ),
            Some(KeyBinding::Viewer(UserAction::AdjustWorkers(1)))
        );
        assert_eq!(
            binding_for_key(KeyCode::KeyE),
            Some(KeyBinding::Viewer(UserAction::AdjustWorkers(-1)))
        );
        assert_eq!(
            binding_for_key(KeyCode::KeyO),
            Some(KeyBinding::Viewer(UserAction::AdjustIterations(-1)))
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(binding_for_key(KeyCode::KeyP), None);
        assert_eq!(binding_for_key(KeyCode::ControlRight), None);
    }

    #[test]
    fn interface_keys_toggle_overlay_parts() {
        assert_eq!(binding_for_key(KeyCode::KeyH), Some(KeyBinding::ToggleHelp));
        assert_eq!(binding_for_key(KeyCode::KeyG), Some(KeyBinding::ToggleDebug));
        assert_eq!(binding_for_key(KeyCode::ControlLeft), Some(KeyBinding::ToggleInterface));
    }

    #[test]
    fn scroll_direction_picks_zoom() {
        assert_eq!(
            zoom_for_scroll(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(UserAction::Zoom(1))
        );
        assert_eq!(
            zoom_for_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -3.0))),
            Some(UserAction::Zoom(-1))
        );
        assert_eq!(zoom_for_scroll(MouseScrollDelta::LineDelta(2.0, 0.0)), None);
    }
}
