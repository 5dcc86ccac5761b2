use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::focus::traversal::{FocusRing, FocusTarget};
use crate::nav::controller::TabItem;
use crate::ui::components::nav_strip::{BOOKMARK_MARK, COMPLETE_MARK, content_type_glyph};
use crate::ui::theme::Theme;

/// The list opened by the collapsed strip's toggle: one row per unit,
/// mirroring the tab items.
pub struct DropdownList<'a> {
    items: &'a [TabItem],
    focus: &'a FocusRing,
    theme: &'a Theme,
}

impl<'a> DropdownList<'a> {
    pub fn new(items: &'a [TabItem], focus: &'a FocusRing, theme: &'a Theme) -> Self {
        Self {
            items,
            focus,
            theme,
        }
    }
}

impl Widget for DropdownList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Units ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .take(inner.height as usize)
            .map(|(idx, item)| {
                let focused = self.focus.is_focused(FocusTarget::DropdownItem(idx));
                let marker = if item.is_active { "●" } else { " " };
                let mut text = format!(
                    " {marker} {} {}",
                    content_type_glyph(item.content_type),
                    item.title
                );
                if item.show_completion && item.complete {
                    text.push(' ');
                    text.push(COMPLETE_MARK);
                }
                if item.bookmarked {
                    text.push(' ');
                    text.push(BOOKMARK_MARK);
                }

                let mut style = if item.is_active {
                    Style::default()
                        .fg(colors.tab_active_fg())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                if focused {
                    style = style
                        .fg(colors.border_focused())
                        .add_modifier(Modifier::UNDERLINED);
                }
                Line::from(Span::styled(text, style))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
