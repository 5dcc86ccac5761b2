use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::model::course::{Sequence, Unit};
use crate::ui::components::nav_strip::content_type_glyph;
use crate::ui::theme::Theme;

/// Main content pane: the current unit, or the gated/empty placeholder.
pub struct ContentPane<'a> {
    sequence: Option<&'a Sequence>,
    unit: Option<&'a Unit>,
    theme: &'a Theme,
}

impl<'a> ContentPane<'a> {
    pub fn new(sequence: Option<&'a Sequence>, unit: Option<&'a Unit>, theme: &'a Theme) -> Self {
        Self {
            sequence,
            unit,
            theme,
        }
    }
}

impl Widget for ContentPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let title = self
            .sequence
            .map(|s| format!(" {} ", s.title))
            .unwrap_or_else(|| " Content ".to_string());
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match (self.sequence, self.unit) {
            (Some(seq), _) if seq.gated_content.gated => {
                let reason = seq
                    .gated_content
                    .reason
                    .as_deref()
                    .unwrap_or("This content is locked.");
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        " ⊘ Locked content",
                        Style::default()
                            .fg(colors.locked())
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!(" {reason}"),
                        Style::default().fg(colors.fg()),
                    )),
                ]
            }
            (_, Some(unit)) => {
                let mut lines = vec![
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(
                            format!(" {} ", content_type_glyph(unit.content_type)),
                            Style::default().fg(colors.accent()),
                        ),
                        Span::styled(
                            unit.title.clone(),
                            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(""),
                ];
                if unit.complete {
                    lines.push(Line::from(Span::styled(
                        " ✓ Completed",
                        Style::default().fg(colors.complete()),
                    )));
                }
                if unit.bookmarked {
                    lines.push(Line::from(Span::styled(
                        " ⚑ Bookmarked",
                        Style::default().fg(colors.bookmark()),
                    )));
                }
                lines
            }
            _ => vec![
                Line::from(""),
                Line::from(Span::styled(
                    " No unit selected.",
                    Style::default().fg(colors.muted()),
                )),
            ],
        };

        Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
    }
}
