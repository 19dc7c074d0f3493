use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::quiz::round::Round;
use crate::ui::theme::Theme;

/// Game-over card: final stats plus the list of missed words, each with
/// the answer the player picked.
pub struct Summary<'a> {
    round: &'a Round,
    theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(round: &'a Round, theme: &'a Theme) -> Self {
        Self { round, theme }
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Round Over ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Results",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let score_text = format!("{}", self.round.score);
        Paragraph::new(Line::from(vec![
            Span::styled("  Score:    ", Style::default().fg(colors.fg())),
            Span::styled(
                score_text,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[1], buf);

        let correct_text = format!("{}", self.round.correct_count);
        Paragraph::new(Line::from(vec![
            Span::styled("  Correct:  ", Style::default().fg(colors.fg())),
            Span::styled(correct_text, Style::default().fg(colors.success())),
        ]))
        .render(layout[2], buf);

        let combo_text = format!("x{}", self.round.max_combo);
        Paragraph::new(Line::from(vec![
            Span::styled("  Best combo: ", Style::default().fg(colors.fg())),
            Span::styled(combo_text, Style::default().fg(colors.warning())),
        ]))
        .render(layout[3], buf);

        let list_area = layout[5];
        if self.round.wrong_log.is_empty() {
            let perfect = Paragraph::new(Line::from(Span::styled(
                "Perfect round! Not a single miss.",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            perfect.render(list_area, buf);
        } else {
            let mut lines = vec![Line::from(Span::styled(
                "  Missed words:",
                Style::default().fg(colors.dim()),
            ))];
            for entry in &self.round.wrong_log {
                let mut spans = vec![
                    Span::styled(
                        format!("  {} ", entry.hanzi),
                        Style::default()
                            .fg(colors.fg())
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{} ", entry.pinyin),
                        Style::default().fg(colors.dim()),
                    ),
                    Span::styled("\u{2192} ", Style::default().fg(colors.dim())),
                    Span::styled(
                        entry.correct_korean.clone(),
                        Style::default().fg(colors.success()),
                    ),
                ];
                if entry.chosen != entry.correct_korean {
                    spans.push(Span::styled(
                        format!("  (picked {})", entry.chosen),
                        Style::default().fg(colors.error()),
                    ));
                }
                lines.push(Line::from(spans));
            }
            // Show what fits; the tail of a long miss list is cut rather
            // than scrolled.
            lines.truncate(list_area.height as usize);
            Paragraph::new(lines).render(list_area, buf);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r] Play again  ", Style::default().fg(colors.accent())),
            Span::styled("[Esc] Title  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[6], buf);
    }
}
