/// How much of the tab strip fits the container. Frame-local derived state;
/// recomputed on resize, item-count change, or label change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutFit {
    /// Measurement has not happened yet (container width still 0 during
    /// initial mount). Renders optimistically as tabs.
    Pending,
    /// Not even the first item fits alongside the fixed controls.
    Collapsed,
    /// Items `[0..=last_index]` fit alongside the fixed controls.
    Visible { last_index: usize },
}

impl LayoutFit {
    pub fn is_collapsed(self) -> bool {
        matches!(self, LayoutFit::Collapsed)
    }
}

/// Highest index `i` such that items `[0..=i]` plus both fixed controls fit
/// `container_width`. Pure function of the widths involved.
pub fn compute_fit(container_width: u16, item_widths: &[u16], fixed_width: u16) -> LayoutFit {
    if container_width == 0 {
        return LayoutFit::Pending;
    }
    let budget = container_width.saturating_sub(fixed_width) as u32;
    let mut used: u32 = 0;
    let mut last_fit = None;
    for (i, &w) in item_widths.iter().enumerate() {
        used += w as u32;
        if used <= budget {
            last_fit = Some(i);
        } else {
            break;
        }
    }
    match last_fit {
        Some(last_index) => LayoutFit::Visible { last_index },
        None => LayoutFit::Collapsed,
    }
}

/// Debounces the resize event stream against the tick clock so layout is
/// recomputed once per visually-stable size instead of per intermediate
/// resize tick. Avoids thrash between tab and dropdown modes mid-drag.
#[derive(Debug)]
pub struct ResizeSettler {
    pending: Option<(u16, u16)>,
    quiet_ticks: u8,
    settle_after: u8,
}

impl ResizeSettler {
    pub fn new(settle_after: u8) -> Self {
        Self {
            pending: None,
            quiet_ticks: 0,
            settle_after,
        }
    }

    pub fn observe_resize(&mut self, width: u16, height: u16) {
        self.pending = Some((width, height));
        self.quiet_ticks = 0;
    }

    /// Call once per tick. Returns the settled size when the stream has been
    /// quiet long enough; at most once per resize burst.
    pub fn on_tick(&mut self) -> Option<(u16, u16)> {
        if self.pending.is_some() {
            self.quiet_ticks += 1;
            if self.quiet_ticks >= self.settle_after {
                self.quiet_ticks = 0;
                return self.pending.take();
            }
        }
        None
    }
}

impl Default for ResizeSettler {
    fn default() -> Self {
        // Two 100ms ticks of quiet before committing a size.
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_pending_not_collapsed() {
        assert_eq!(compute_fit(0, &[4, 4], 10), LayoutFit::Pending);
    }

    #[test]
    fn partial_fit_reports_last_visible_index() {
        // Fixed controls take 10; items are 4 wide; width 24 fits 3 items
        // (10 + 12 = 22 <= 24) but not 4 (10 + 16 = 26).
        assert_eq!(
            compute_fit(24, &[4, 4, 4, 4], 10),
            LayoutFit::Visible { last_index: 2 }
        );
    }

    #[test]
    fn exact_fit_boundary() {
        assert_eq!(
            compute_fit(26, &[4, 4, 4, 4], 10),
            LayoutFit::Visible { last_index: 3 }
        );
    }

    #[test]
    fn width_for_fixed_controls_only_collapses() {
        // Room for Previous/Next but zero items.
        assert_eq!(compute_fit(10, &[4, 4], 10), LayoutFit::Collapsed);
        assert_eq!(compute_fit(3, &[4, 4], 10), LayoutFit::Collapsed);
    }

    #[test]
    fn settler_commits_once_per_quiet_period() {
        let mut settler = ResizeSettler::new(2);
        settler.observe_resize(100, 30);
        assert_eq!(settler.on_tick(), None);
        settler.observe_resize(90, 30); // still dragging; restarts the clock
        assert_eq!(settler.on_tick(), None);
        assert_eq!(settler.on_tick(), Some((90, 30)));
        // Quiet afterwards: nothing more to commit.
        assert_eq!(settler.on_tick(), None);
        assert_eq!(settler.on_tick(), None);
    }
}
