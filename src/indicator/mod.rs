//! Unlock indicator: paints the lock icon and password progress, places one
//! copy per monitor over the backdrop and hands the frame to the display.

pub mod backdrop;
pub mod color;
pub mod composite;
pub mod display;
pub mod geometry;
pub mod model;
pub mod monitor;
pub mod painter;
pub mod render;
pub mod scale;
pub mod scheduler;
pub mod state;

pub use backdrop::{Backdrop, BackdropSpec};
pub use color::{Palette, PaletteConfig, Rgb};
pub use composite::{compose, Rgba, RgbaBuffer};
pub use display::{ChannelOrder, DisplayConnection, MemoryDisplay, Surface, VisualFormat};
pub use model::{AuthState, IndicatorStyle, LockState, Modifiers};
pub use monitor::{MonitorLayout, MonitorRect};
pub use painter::IndicatorPainter;
pub use scale::{scale_factor, ScreenMetrics};
pub use scheduler::{FrameOutcome, FrameScheduler, RenderContext};
pub use state::VisibilityState;
