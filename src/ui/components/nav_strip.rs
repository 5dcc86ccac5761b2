use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::focus::traversal::{FocusRing, FocusTarget};
use crate::model::course::ContentType;
use crate::nav::controller::{ButtonSpec, NavPlan, RenderMode, TabItem};
use crate::ui::theme::Theme;

pub const COMPLETE_MARK: char = '✓';
pub const BOOKMARK_MARK: char = '⚑';

/// Total mapping from content type to a display glyph. Unknown manifest
/// types have already collapsed to `Other` at deserialization.
pub fn content_type_glyph(content_type: ContentType) -> char {
    match content_type {
        ContentType::Video => '▶',
        ContentType::Problem => '✎',
        ContentType::Vertical => '≡',
        ContentType::Lock => '⊘',
        ContentType::Other => '▤',
    }
}

/// Rendered cell width of one tab: glyph plus one-cell padding each side,
/// plus the optional completion and bookmark marks.
pub fn tab_width(item: &TabItem) -> u16 {
    let mut width = 3;
    if item.show_completion && item.complete {
        width += 1;
    }
    if item.bookmarked {
        width += 1;
    }
    width
}

pub fn tab_widths(items: &[TabItem]) -> Vec<u16> {
    items.iter().map(tab_width).collect()
}

fn button_width(spec: &ButtonSpec) -> u16 {
    // " ❮ Previous " or just " ❮ " in compact mode.
    let label = if spec.show_label {
        spec.label.chars().count() as u16 + 1
    } else {
        0
    };
    3 + label
}

/// Combined width of the two fixed controls flanking the tabs.
pub fn fixed_width(plan: &NavPlan) -> u16 {
    button_width(&plan.previous) + button_width(&plan.next)
}

pub struct NavStrip<'a> {
    plan: &'a NavPlan,
    focus: &'a FocusRing,
    theme: &'a Theme,
}

impl<'a> NavStrip<'a> {
    pub fn new(plan: &'a NavPlan, focus: &'a FocusRing, theme: &'a Theme) -> Self {
        Self { plan, focus, theme }
    }

    fn button_spans(&self, spec: &ButtonSpec, target: FocusTarget, leading: bool) -> Vec<Span<'a>> {
        let colors = &self.theme.colors;
        let focused = self.focus.is_focused(target);
        let mut style = Style::default().fg(if spec.enabled {
            colors.accent()
        } else {
            colors.muted()
        });
        if focused {
            style = style
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors.border_focused());
        }

        let text = match (spec.show_label, leading) {
            (true, true) => format!(" {} {} ", spec.glyph, spec.label),
            (true, false) => format!(" {} {} ", spec.label, spec.glyph),
            (false, _) => format!(" {} ", spec.glyph),
        };
        vec![Span::styled(text, style)]
    }

    fn tab_spans(&self, items: &[TabItem]) -> Vec<Span<'a>> {
        let colors = &self.theme.colors;
        let mut spans = Vec::new();
        for (idx, item) in items.iter().enumerate() {
            let focused = self.focus.is_focused(FocusTarget::Tab(idx));
            let mut style = if item.is_active {
                Style::default()
                    .fg(colors.tab_active_fg())
                    .bg(colors.tab_active_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            if focused {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            let mut cell = format!(" {}", content_type_glyph(item.content_type));
            if item.show_completion && item.complete {
                cell.push(COMPLETE_MARK);
            }
            if item.bookmarked {
                cell.push(BOOKMARK_MARK);
            }
            cell.push(' ');
            spans.push(Span::styled(cell, style));
        }
        spans
    }

    fn middle_spans(&self, width: u16) -> Vec<Span<'a>> {
        let colors = &self.theme.colors;
        match &self.plan.mode {
            RenderMode::Locked => {
                // Single disabled placeholder tab.
                vec![Span::styled(
                    format!(" {} ", content_type_glyph(ContentType::Lock)),
                    Style::default().fg(colors.locked()),
                )]
            }
            RenderMode::Empty => {
                let fixed = fixed_width(self.plan);
                let fill = width.saturating_sub(fixed).max(1) as usize;
                vec![Span::styled(
                    "─".repeat(fill),
                    Style::default().fg(colors.border()),
                )]
            }
            RenderMode::Tabs(items) => self.tab_spans(items),
            RenderMode::Dropdown { summary, .. } => {
                let focused = self.focus.is_focused(FocusTarget::DropdownToggle);
                // Disabled-looking toggle; the summary is its accessible name.
                let mut style = Style::default().fg(colors.muted());
                if focused {
                    style = style
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                        .fg(colors.border_focused());
                }
                vec![Span::styled(format!(" {summary} ▾ "), style)]
            }
        }
    }
}

impl Widget for NavStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered().border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = self.button_spans(&self.plan.previous, FocusTarget::Previous, true);
        spans.extend(self.middle_spans(inner.width));
        spans.extend(self.button_spans(&self.plan.next, FocusTarget::Next, false));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
