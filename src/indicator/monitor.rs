#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl MonitorRect {
    pub fn full_screen(resolution: (u32, u32)) -> Self {
        Self {
            x: 0,
            y: 0,
            width: resolution.0 as i32,
            height: resolution.1 as i32,
        }
    }

    /// Top-left corner that centers a `diameter` square in this rect.
    /// Integer halving matches how the X server rounds window placement.
    pub fn centered_origin(self, diameter: u32) -> (i32, i32) {
        let half = diameter as i32 / 2;
        (
            self.x + (self.width / 2 - half),
            self.y + (self.height / 2 - half),
        )
    }
}

/// Source of the physical monitor layout, read once per frame.
pub trait MonitorLayout {
    fn monitors(&self) -> Vec<MonitorRect>;
}

impl MonitorLayout for [MonitorRect] {
    fn monitors(&self) -> Vec<MonitorRect> {
        self.to_vec()
    }
}

impl MonitorLayout for Vec<MonitorRect> {
    fn monitors(&self) -> Vec<MonitorRect> {
        self.clone()
    }
}

/// One origin per monitor, or a single origin centered on the whole screen
/// when the layout is unknown.
pub fn indicator_origins(
    resolution: (u32, u32),
    monitors: &[MonitorRect],
    diameter: u32,
) -> Vec<(i32, i32)> {
    if monitors.is_empty() {
        return vec![MonitorRect::full_screen(resolution).centered_origin(diameter)];
    }
    monitors
        .iter()
        .map(|rect| rect.centered_origin(diameter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{indicator_origins, MonitorLayout, MonitorRect};

    #[test]
    fn side_by_side_monitors_each_get_a_centered_origin() {
        let monitors = [
            MonitorRect {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
            },
            MonitorRect {
                x: 1920,
                y: 0,
                width: 1920,
                height: 1080,
            },
        ];
        assert_eq!(
            indicator_origins((3840, 1080), &monitors, 64),
            vec![(928, 508), (2848, 508)]
        );
    }

    #[test]
    fn unknown_layout_centers_on_root_window() {
        assert_eq!(indicator_origins((1366, 768), &[], 65), vec![(651, 352)]);
    }

    #[test]
    fn negative_offsets_are_preserved() {
        let monitors = [MonitorRect {
            x: -1920,
            y: -200,
            width: 1920,
            height: 1200,
        }];
        assert_eq!(
            indicator_origins((3840, 1200), &monitors, 100),
            vec![(-1920 + 910, -200 + 550)]
        );
    }

    #[test]
    fn layouts_snapshot_their_rects() {
        let layout = vec![MonitorRect::full_screen((800, 600))];
        assert_eq!(layout.monitors(), layout);
        assert_eq!(layout[..].monitors().len(), 1);
    }
}
