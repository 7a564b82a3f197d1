use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{ActiveEffect, GRID_SIZE, GameStatus, Millis, Position, PowerUpKind, Snapshot};
use crate::leaderboard::Leaderboard;

/// Extra screen shown over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay<'a> {
    None,
    /// Name entry after a game over, with the text typed so far
    NameEntry(&'a str),
    /// The score was saved at this rank (or missed the board)
    Saved(Option<usize>),
}

const RAINBOW: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Whole seconds left on an effect, rounded up
pub fn seconds_left(effect: &ActiveEffect, now: Millis) -> u64 {
    effect.remaining_ms(now).div_ceil(1000)
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::SpeedBoost => Color::LightGreen,
        PowerUpKind::DoublePoints => Color::LightMagenta,
        PowerUpKind::Invincibility => Color::LightYellow,
        PowerUpKind::Shrink => Color::LightRed,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        now: Millis,
        leaderboard: &Leaderboard,
        overlay: Overlay<'_>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board and side panel
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(GRID_SIZE as u16 * 2 + 2),
                Constraint::Min(24),
            ])
            .split(chunks[1]);

        let board_area = body[0];
        frame.render_widget(self.render_grid(snapshot, now), board_area);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(PowerUpKind::ALL.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(body[1]);
        frame.render_widget(self.render_effects(snapshot, now), side[0]);
        frame.render_widget(self.render_leaderboard(leaderboard), side[1]);

        if snapshot.status == GameStatus::Over {
            let area = centered(board_area, 34, 9);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_game_over(snapshot, overlay), area);
        }

        frame.render_widget(self.render_controls(snapshot.status), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot, now: Millis) -> Paragraph<'_> {
        let invincible = snapshot.has_effect(PowerUpKind::Invincibility);
        let mut lines = Vec::with_capacity(GRID_SIZE as usize);

        for y in 0..GRID_SIZE {
            let mut spans = Vec::with_capacity(GRID_SIZE as usize);

            for x in 0..GRID_SIZE {
                let pos = Position::new(x, y);
                let segment = snapshot.snake.iter().position(|&p| p == pos);

                let cell = match segment {
                    Some(index) if invincible => {
                        let shade = (now / 100) as usize + index;
                        Span::styled("■ ", Style::default().fg(RAINBOW[shade % RAINBOW.len()]))
                    }
                    Some(0) => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(_) => Span::styled("□ ", Style::default().fg(Color::Green)),
                    None if pos == snapshot.food => Span::styled(
                        "● ",
                        Style::default()
                            .fg(Color::Rgb(243, 156, 18))
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => match snapshot.power_up.filter(|p| p.position == pos) {
                        Some(power_up) => Span::styled(
                            format!("{} ", power_up.kind.spec().symbol),
                            Style::default()
                                .fg(power_up_color(power_up.kind))
                                .add_modifier(Modifier::BOLD),
                        ),
                        None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    },
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(if invincible {
                    Color::LightYellow
                } else {
                    Color::White
                }))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let prompt = match snapshot.status {
            GameStatus::NotStarted => Span::styled(
                "Press any key to start",
                Style::default().fg(Color::Green),
            ),
            GameStatus::Running => Span::raw(""),
            GameStatus::Paused => Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            GameStatus::Over => Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.snake.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            prompt,
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_effects(&self, snapshot: &Snapshot, now: Millis) -> Paragraph<'_> {
        let lines: Vec<Line> = if snapshot.active_effects.is_empty() {
            vec![Line::from(Span::styled(
                "none",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            snapshot
                .active_effects
                .iter()
                .map(|effect| {
                    let spec = effect.kind.spec();
                    Line::from(vec![
                        Span::styled(
                            format!("{} ", spec.symbol),
                            Style::default().fg(power_up_color(effect.kind)),
                        ),
                        Span::raw(spec.label),
                        Span::styled(
                            format!(" {}s", seconds_left(effect, now)),
                            Style::default().fg(Color::Gray),
                        ),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Active Effects "),
        )
    }

    fn render_leaderboard(&self, leaderboard: &Leaderboard) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(leaderboard.len() + 1);

        if leaderboard.is_empty() {
            lines.push(Line::from(Span::styled(
                "No scores yet!",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for (index, entry) in leaderboard.entries().iter().enumerate() {
            let style = match index {
                0 => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                1 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                2 => Style::default().fg(Color::LightRed),
                _ => Style::default().fg(Color::Gray),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("#{:<3}", index + 1), style),
                Span::styled(format!("{:<20} ", entry.name), style),
                Span::styled(format!("{:>6} ", entry.score), style),
                Span::styled(entry.date.clone(), Style::default().fg(Color::DarkGray)),
            ]));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Leaderboard "),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot, overlay: Overlay<'_>) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        match overlay {
            Overlay::NameEntry(name) => {
                text.push(Line::from(Span::styled(
                    "Enter your name:",
                    Style::default().fg(Color::Gray),
                )));
                text.push(Line::from(Span::styled(
                    format!("{name}_"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            Overlay::Saved(rank) => {
                let message = match rank {
                    Some(rank) => format!("Saved at #{rank}"),
                    None => "Not in the top 10".to_string(),
                };
                text.push(Line::from(Span::styled(message, Style::default().fg(Color::Gray))));
                text.push(Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "R",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" for a new game", Style::default().fg(Color::Gray)),
                ]));
            }
            Overlay::None => {}
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'_> {
        let text = if status == GameStatus::Over {
            vec![Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" save name | "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" skip | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" new game | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        };

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
