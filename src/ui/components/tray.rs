use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::focus::traversal::{FocusRing, FocusTarget};
use crate::ui::theme::Theme;

/// Notification tray panel. The close control in the title row is the
/// tray's only focusable descendant.
pub struct TrayPanel<'a> {
    course_title: &'a str,
    focus: &'a FocusRing,
    theme: &'a Theme,
    fullscreen: bool,
}

impl<'a> TrayPanel<'a> {
    pub fn new(
        course_title: &'a str,
        focus: &'a FocusRing,
        theme: &'a Theme,
        fullscreen: bool,
    ) -> Self {
        Self {
            course_title,
            focus,
            theme,
            fullscreen,
        }
    }
}

impl Widget for TrayPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let close_focused = self.focus.is_focused(FocusTarget::TrayClose);

        let border = if close_focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let close_style = if close_focused {
            Style::default()
                .fg(colors.border_focused())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(colors.muted())
        };
        let close_label = if self.fullscreen { "❮ Back" } else { "✕" };

        let block = Block::bordered()
            .title(" Notifications ")
            .title_top(Line::from(Span::styled(format!(" {close_label} "), close_style)).right_aligned())
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" {} ", self.course_title),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " No new notifications.",
                Style::default().fg(colors.muted()),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
