#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Hidden,
    Started,
    KeyPressed,
}

impl VisibilityState {
    pub fn for_password_len(len: usize) -> Self {
        if len == 0 {
            Self::Hidden
        } else {
            Self::KeyPressed
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

pub fn can_transition(from: VisibilityState, to: VisibilityState) -> bool {
    matches!(
        (from, to),
        (VisibilityState::Started, VisibilityState::Hidden)
            | (VisibilityState::Started, VisibilityState::KeyPressed)
            | (VisibilityState::Hidden, VisibilityState::KeyPressed)
            | (VisibilityState::KeyPressed, VisibilityState::Hidden)
    ) || from == to
}

#[cfg(test)]
mod tests {
    use super::{can_transition, VisibilityState};

    #[test]
    fn password_length_drives_visibility() {
        assert_eq!(VisibilityState::for_password_len(0), VisibilityState::Hidden);
        assert_eq!(
            VisibilityState::for_password_len(1),
            VisibilityState::KeyPressed
        );
        assert_eq!(
            VisibilityState::for_password_len(64),
            VisibilityState::KeyPressed
        );
    }

    #[test]
    fn nothing_returns_to_started() {
        assert!(!can_transition(
            VisibilityState::Hidden,
            VisibilityState::Started
        ));
        assert!(!can_transition(
            VisibilityState::KeyPressed,
            VisibilityState::Started
        ));
        assert!(can_transition(
            VisibilityState::Started,
            VisibilityState::Started
        ));
    }

    #[test]
    fn derived_states_are_always_reachable() {
        let all = [
            VisibilityState::Hidden,
            VisibilityState::Started,
            VisibilityState::KeyPressed,
        ];
        for from in all {
            for len in [0, 1, 5] {
                assert!(can_transition(from, VisibilityState::for_password_len(len)));
            }
        }
    }
}
