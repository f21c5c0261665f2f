use crate::indicator::geometry::DEFAULT_DOT_RADIUS;
use crate::indicator::state::VisibilityState;
use serde::{Deserialize, Serialize};

/// Authentication phase reported by the PAM side of the locker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    Verifying,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub caps_lock: bool,
}

/// Input-side state owned by the lock application. The renderer only reads
/// it, except for `visibility` which
/// [`FrameScheduler::clear_indicator_if_empty`](crate::indicator::scheduler::FrameScheduler::clear_indicator_if_empty)
/// recomputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockState {
    pub auth: AuthState,
    pub password_len: usize,
    pub modifiers: Modifiers,
    pub visibility: VisibilityState,
}

impl Default for LockState {
    fn default() -> Self {
        Self {
            auth: AuthState::Idle,
            password_len: 0,
            modifiers: Modifiers::default(),
            visibility: VisibilityState::Started,
        }
    }
}

impl LockState {
    pub fn refresh_visibility(&mut self) -> VisibilityState {
        let next = VisibilityState::for_password_len(self.password_len);
        if !crate::indicator::state::can_transition(self.visibility, next) {
            tracing::warn!(from = ?self.visibility, to = ?next, "unexpected visibility transition");
        }
        self.visibility = next;
        next
    }
}

/// Optional parts of the indicator. One painter serves every variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStyle {
    #[serde(default)]
    pub background_polygon: bool,
    #[serde(default = "default_outline_ring")]
    pub outline_ring: bool,
    /// Radius, in logical units, of the circle the progress dots sit on.
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f64,
}

fn default_outline_ring() -> bool {
    true
}

fn default_dot_radius() -> f64 {
    DEFAULT_DOT_RADIUS
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self::classic()
    }
}

impl IndicatorStyle {
    pub fn classic() -> Self {
        Self {
            background_polygon: false,
            outline_ring: true,
            dot_radius: DEFAULT_DOT_RADIUS,
        }
    }

    pub fn octagon() -> Self {
        Self {
            background_polygon: true,
            ..Self::classic()
        }
    }

    pub fn minimal() -> Self {
        Self {
            outline_ring: false,
            ..Self::classic()
        }
    }
}
