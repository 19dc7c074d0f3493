use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::quiz::round::Round;
use crate::ui::theme::Theme;

/// Top strip during play: time bar scaled to the configured round length,
/// remaining seconds, score, combo, and the live correct count.
pub struct Hud<'a> {
    round: &'a Round,
    muted: bool,
    theme: &'a Theme,
}

impl<'a> Hud<'a> {
    pub fn new(round: &'a Round, muted: bool, theme: &'a Theme) -> Self {
        Self {
            round,
            muted,
            theme,
        }
    }
}

impl Widget for Hud<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if area.height < 2 || area.width < 10 {
            return;
        }

        // Row 0: title strip
        let mute_icon = if self.muted { "[muted]" } else { "" };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                " hanvoca ",
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" Score {}  Combo x{}  Correct {}  {mute_icon}",
                    self.round.score, self.round.combo, self.round.correct_count),
                Style::default().fg(colors.dim()).bg(colors.header_bg()),
            ),
        ]))
        .style(Style::default().bg(colors.header_bg()));
        header.render(Rect::new(area.x, area.y, area.width, 1), buf);

        // Row 1: time bar with the remaining seconds centered over it
        let bar_y = area.y + 1;
        let ratio = self.round.time_ratio();
        let filled_width = (ratio * area.width as f64) as u16;
        let bar_color = if ratio > 0.5 {
            colors.bar_filled()
        } else if ratio > 0.2 {
            colors.warning()
        } else {
            colors.error()
        };

        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled_width {
                Style::default().fg(colors.bg()).bg(bar_color)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, bar_y)].set_style(style);
        }

        let label = format!(" {}s ", self.round.remaining_secs);
        let label_x = area.x + (area.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(
            label_x,
            bar_y,
            &label,
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        );
    }
}
