use crate::nav::controller::{NavPlan, RenderMode};

/// A focusable interactive element of the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Previous,
    Tab(usize),
    DropdownToggle,
    DropdownItem(usize),
    Next,
    TrayToggle,
    TrayClose,
}

impl FocusTarget {
    /// Strip elements participate in arrow-key traversal; tray controls do
    /// not.
    fn in_strip(self) -> bool {
        !matches!(self, FocusTarget::TrayToggle | FocusTarget::TrayClose)
    }
}

/// Ordered ring of the enabled, focusable elements for the current frame.
/// Rebuilt whenever the render mode or tray state changes; the previously
/// focused element is kept when it still exists.
#[derive(Debug, Default)]
pub struct FocusRing {
    targets: Vec<FocusTarget>,
    current: Option<FocusTarget>,
}

impl FocusRing {
    /// Build the ring from the navigation plan. Disabled Previous/Next are
    /// excluded; tabs are always interactive. The dropdown's summary toggle
    /// looks disabled but opens the list, so it participates.
    pub fn rebuild(&mut self, plan: &NavPlan, dropdown_open: bool, tray_open: bool) {
        let mut targets = Vec::new();
        if plan.previous.enabled {
            targets.push(FocusTarget::Previous);
        }
        match &plan.mode {
            RenderMode::Tabs(items) => {
                for idx in 0..items.len() {
                    targets.push(FocusTarget::Tab(idx));
                }
            }
            RenderMode::Dropdown { items, .. } => {
                targets.push(FocusTarget::DropdownToggle);
                if dropdown_open {
                    for idx in 0..items.len() {
                        targets.push(FocusTarget::DropdownItem(idx));
                    }
                }
            }
            RenderMode::Locked | RenderMode::Empty => {}
        }
        if plan.next.enabled {
            targets.push(FocusTarget::Next);
        }
        targets.push(FocusTarget::TrayToggle);
        if tray_open {
            targets.push(FocusTarget::TrayClose);
        }

        // Land on the active tab (the one tab stop) when there is one.
        let preferred = match &plan.mode {
            RenderMode::Tabs(items) => {
                items.iter().position(|t| t.is_active).map(FocusTarget::Tab)
            }
            RenderMode::Dropdown { .. } => Some(FocusTarget::DropdownToggle),
            _ => None,
        };

        let keep = self.current.filter(|c| targets.contains(c));
        self.targets = targets;
        self.current = keep
            .or(preferred)
            .or_else(|| self.targets.first().copied());
    }

    pub fn current(&self) -> Option<FocusTarget> {
        self.current
    }

    pub fn contains(&self, target: FocusTarget) -> bool {
        self.targets.contains(&target)
    }

    pub fn focus(&mut self, target: FocusTarget) {
        if self.contains(target) {
            self.current = Some(target);
        }
    }

    pub fn is_focused(&self, target: FocusTarget) -> bool {
        self.current == Some(target)
    }

    /// Left/Right arrow traversal, confined to the strip. Wraps at the ends.
    /// Up/Down deliberately do nothing (the caller never routes them here).
    pub fn arrow(&mut self, forward: bool) {
        let strip: Vec<FocusTarget> = self
            .targets
            .iter()
            .copied()
            .filter(|t| t.in_strip())
            .collect();
        if strip.is_empty() {
            return;
        }
        let current = match self.current.filter(|c| c.in_strip()) {
            Some(c) => c,
            // Focus outside the strip: arrows pull it back in.
            None => {
                self.current = Some(strip[0]);
                return;
            }
        };
        let idx = strip.iter().position(|t| *t == current).unwrap_or(0);
        let next = if forward {
            strip[(idx + 1) % strip.len()]
        } else if idx == 0 {
            strip[strip.len() - 1]
        } else {
            strip[idx - 1]
        };
        self.current = Some(next);
    }

    /// Tab/Shift+Tab. With the tray open this is a focus trap: the cycle is
    /// bounded to the tray's close control and its external trigger. With
    /// the tray closed it cycles the whole ring.
    pub fn tab(&mut self, forward: bool, tray_open: bool) {
        if tray_open {
            // The close control is the tray's only focusable descendant;
            // both directions wrap between it and the trigger.
            self.current = Some(match self.current {
                Some(FocusTarget::TrayClose) => FocusTarget::TrayToggle,
                Some(FocusTarget::TrayToggle) => FocusTarget::TrayClose,
                _ => FocusTarget::TrayClose,
            });
            return;
        }
        if self.targets.is_empty() {
            return;
        }
        let idx = self
            .current
            .and_then(|c| self.targets.iter().position(|t| *t == c))
            .unwrap_or(0);
        let next = if forward {
            self.targets[(idx + 1) % self.targets.len()]
        } else if idx == 0 {
            self.targets[self.targets.len() - 1]
        } else {
            self.targets[idx - 1]
        };
        self.current = Some(next);
    }
}
