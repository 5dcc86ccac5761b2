use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const DEFAULT_BREAKPOINT: u16 = 80;

/// Binary responsive mode. Compact drops the Previous/Next text labels
/// (glyph only) and renders the notification tray fullscreen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Wide,
    Compact,
}

impl ViewMode {
    pub fn from_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            ViewMode::Compact
        } else {
            ViewMode::Wide
        }
    }

    pub fn is_compact(self) -> bool {
        self == ViewMode::Compact
    }
}

pub struct ScreenLayout {
    pub header: Rect,
    pub banner: Option<Rect>,
    pub strip: Rect,
    pub content: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub view: ViewMode,
}

impl ScreenLayout {
    pub fn new(area: Rect, breakpoint: u16, has_banner: bool, show_sidebar: bool) -> Self {
        let view = ViewMode::from_width(area.width, breakpoint);

        let mut constraints = vec![Constraint::Length(1)];
        if has_banner {
            constraints.push(Constraint::Length(2));
        }
        constraints.push(Constraint::Length(3)); // navigation strip
        constraints.push(Constraint::Min(5));
        constraints.push(Constraint::Length(1));

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        let header = vertical[idx];
        idx += 1;
        let banner = if has_banner {
            let r = vertical[idx];
            idx += 1;
            Some(r)
        } else {
            None
        };
        let strip = vertical[idx];
        let body = vertical[idx + 1];
        let footer = vertical[idx + 2];

        // Discussion sidebar only gets its own column in Wide mode; Compact
        // overlays the tray fullscreen instead.
        let (content, sidebar) = if show_sidebar && view == ViewMode::Wide {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(body);
            (horizontal[0], Some(horizontal[1]))
        } else {
            (body, None)
        };

        Self {
            header,
            banner,
            strip,
            content,
            sidebar,
            footer,
            view,
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 30;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
