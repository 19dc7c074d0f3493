use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::quiz::round::{Outcome, Phase, Round};
use crate::ui::theme::Theme;

/// The question card: hanzi, pinyin, and the four numbered options.
/// During feedback the correct option is highlighted, a wrong pick is
/// struck, and a toast line shows the points and time delta.
pub struct QuestionCard<'a> {
    round: &'a Round,
    outcome: Option<&'a Outcome>,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(round: &'a Round, outcome: Option<&'a Outcome>, theme: &'a Theme) -> Self {
        Self {
            round,
            outcome,
            theme,
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let question = &self.round.question;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // hanzi
                Constraint::Length(2), // pinyin
                Constraint::Length(question.options.len() as u16 * 2),
                Constraint::Min(0),
                Constraint::Length(1), // toast
            ])
            .split(inner);

        let hanzi = Paragraph::new(Line::from(Span::styled(
            &*question.correct.hanzi,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        hanzi.render(layout[0], buf);

        let pinyin = Paragraph::new(Line::from(Span::styled(
            &*question.correct.pinyin,
            Style::default().fg(colors.dim()),
        )))
        .alignment(Alignment::Center);
        pinyin.render(layout[1], buf);

        let in_feedback = matches!(self.round.phase, Phase::Feedback { .. });
        let correct_idx = question.correct_idx();

        let option_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                question
                    .options
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, option) in question.options.iter().enumerate() {
            let style = if in_feedback {
                if i == correct_idx {
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD)
                } else if Some(i) == self.round.chosen {
                    Style::default()
                        .fg(colors.error())
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(colors.dim())
                }
            } else {
                Style::default().fg(colors.fg())
            };

            let text = format!("  {}. {option}", i + 1);
            Paragraph::new(Line::from(Span::styled(text, style)))
                .alignment(Alignment::Center)
                .render(option_layout[i], buf);
        }

        if let (Phase::Feedback { correct }, Some(outcome)) = (self.round.phase, self.outcome) {
            let (text, color) = if correct {
                (
                    format!("Correct! +{} pts, +{}s", outcome.gained, outcome.time_delta),
                    colors.success(),
                )
            } else {
                (format!("Wrong! {}s", outcome.time_delta), colors.error())
            };
            let toast = Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            toast.render(layout[4], buf);
        }
    }
}
