//! Keyboard state with per-tick edge detection

const KEY_COUNT: usize = 7;

/// Logical controls the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Thrust,
    Fire,
    Start,
    Restart,
    Menu,
}

impl Key {
    const ALL: [Key; KEY_COUNT] = [
        Key::Left,
        Key::Right,
        Key::Thrust,
        Key::Fire,
        Key::Start,
        Key::Restart,
        Key::Menu,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Map a DOM `KeyboardEvent.key` value to a control
pub fn key_from_code(code: &str) -> Option<Key> {
    match code {
        "ArrowLeft" | "a" | "A" => Some(Key::Left),
        "ArrowRight" | "d" | "D" => Some(Key::Right),
        "ArrowUp" | "w" | "W" => Some(Key::Thrust),
        " " | "Space" => Some(Key::Fire),
        "Enter" => Some(Key::Start),
        "r" | "R" => Some(Key::Restart),
        "Escape" | "m" | "M" => Some(Key::Menu),
        _ => None,
    }
}

/// Held keys plus press/release edges since the last fixed tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    down: [bool; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
    released: [bool; KEY_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down; auto-repeat does not re-trigger `pressed`
    pub fn key_down(&mut self, key: Key) {
        let i = key.index();
        if !self.down[i] {
            self.pressed[i] = true;
        }
        self.down[i] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        let i = key.index();
        if self.down[i] {
            self.released[i] = true;
        }
        self.down[i] = false;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    /// True only during the tick in which the key went down
    pub fn pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn released(&self, key: Key) -> bool {
        self.released[key.index()]
    }

    /// Forget edges; call once per fixed tick
    pub fn clear_edges(&mut self) {
        self.pressed = [false; KEY_COUNT];
        self.released = [false; KEY_COUNT];
    }

    /// Release everything (focus loss)
    pub fn release_all(&mut self) {
        for key in Key::ALL {
            self.key_up(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_lasts_one_tick() {
        let mut input = InputState::new();
        input.key_down(Key::Fire);
        assert!(input.pressed(Key::Fire));
        assert!(input.is_down(Key::Fire));

        input.clear_edges();
        assert!(!input.pressed(Key::Fire));
        assert!(input.is_down(Key::Fire));
    }

    #[test]
    fn test_repeat_does_not_repress() {
        let mut input = InputState::new();
        input.key_down(Key::Start);
        input.clear_edges();
        input.key_down(Key::Start);
        assert!(!input.pressed(Key::Start));
    }

    #[test]
    fn test_release_edge() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.clear_edges();
        input.key_up(Key::Left);
        assert!(input.released(Key::Left));
        assert!(!input.is_down(Key::Left));
    }

    #[test]
    fn test_release_all_clears_held() {
        let mut input = InputState::new();
        input.key_down(Key::Thrust);
        input.key_down(Key::Right);
        input.release_all();
        assert!(!input.is_down(Key::Thrust));
        assert!(input.released(Key::Right));
        assert!(!input.released(Key::Fire));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_code("ArrowLeft"), Some(Key::Left));
        assert_eq!(key_from_code(" "), Some(Key::Fire));
        assert_eq!(key_from_code("Escape"), Some(Key::Menu));
        assert_eq!(key_from_code("F5"), None);
    }
}
