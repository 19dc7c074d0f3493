use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct Intro<'a> {
    pub word_count: usize,
    pub initial_secs: u32,
    pub theme: &'a Theme,
}

impl<'a> Intro<'a> {
    pub fn new(word_count: usize, initial_secs: u32, theme: &'a Theme) -> Self {
        Self {
            word_count,
            initial_secs,
            theme,
        }
    }
}

impl Widget for Intro<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "hanvoca",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Chinese-Korean Vocabulary Blitz",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let info_lines = vec![
            Line::from(Span::styled(
                format!("{} words loaded, {} seconds on the clock", self.word_count, self.initial_secs),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Pick the Korean translation of the shown word with keys 1-4.",
                Style::default().fg(colors.dim()),
            )),
            Line::from(Span::styled(
                "Correct answers add time and build a combo, wrong ones cost time.",
                Style::default().fg(colors.dim()),
            )),
        ];
        Paragraph::new(info_lines)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        let footer = Paragraph::new(Line::from(Span::styled(
            "[Enter] Start  [q] Quit",
            Style::default().fg(colors.accent()),
        )))
        .alignment(Alignment::Center);
        footer.render(layout[2], buf);
    }
}
