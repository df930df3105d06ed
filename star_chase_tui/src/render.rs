use std::io::{self, Stdout};

use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{layout::Size, prelude::*, widgets::*};
use star_chase_core::{Rect as WorldRect, game::FrameSnapshot, game_loop::Renderer};

/// Number of background stars per 10 000 terminal cells.
const STAR_DENSITY: f64 = 120.0;

/// Background stars, stored as fractions of the field so they survive resizes.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<(f64, f64)>,
}

impl Starfield {
    pub fn new(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect();
        Starfield { stars }
    }

    /// A starfield sized for a terminal of the given cell count.
    pub fn for_area(seed: u64, area: Size) -> Self {
        let cells = f64::from(area.width) * f64::from(area.height);
        Self::new(seed, (cells * STAR_DENSITY / 10_000.0) as usize)
    }
}

/// Maps world rectangles onto a `cols` x `rows` cell canvas.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    field: WorldRect,
    cols: u16,
    rows: u16,
}

impl Viewport {
    /// Inclusive-exclusive column and row ranges covered by `rect`, at least one cell each.
    fn cells(&self, rect: &WorldRect) -> (std::ops::Range<u16>, std::ops::Range<u16>) {
        let scale = |value: i32, world: i32, cells: u16| -> u16 {
            let scaled = i64::from(value.max(0)) * i64::from(cells) / i64::from(world.max(1));
            scaled.min(i64::from(cells)) as u16
        };
        let col_start = scale(rect.x, self.field.width, self.cols).min(self.cols.saturating_sub(1));
        let row_start = scale(rect.y, self.field.height, self.rows).min(self.rows.saturating_sub(1));
        let col_end = scale(rect.right(), self.field.width, self.cols).max(col_start + 1);
        let row_end = scale(rect.bottom(), self.field.height, self.rows).max(row_start + 1);
        (col_start..col_end.min(self.cols), row_start..row_end.min(self.rows))
    }
}

/// Paints the playfield into styled lines, one per terminal row.
pub fn paint_field(
    frame: &FrameSnapshot<'_>,
    stars: &Starfield,
    cols: u16,
    rows: u16,
) -> Vec<Line<'static>> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }
    let mut canvas = vec![vec![(' ', Style::default()); cols as usize]; rows as usize];

    for &(fx, fy) in &stars.stars {
        let col = ((fx * f64::from(cols)) as usize).min(cols as usize - 1);
        let row = ((fy * f64::from(rows)) as usize).min(rows as usize - 1);
        canvas[row][col] = ('.', Style::default().fg(Color::DarkGray));
    }

    let view = Viewport {
        field: frame.field,
        cols,
        rows,
    };
    let mut fill = |rect: &WorldRect, glyph: char, style: Style| {
        let (col_range, row_range) = view.cells(rect);
        for row in row_range {
            for col in col_range.clone() {
                canvas[row as usize][col as usize] = (glyph, style);
            }
        }
    };

    for projectile in frame.projectiles {
        fill(&projectile.rect, '-', Style::default().fg(Color::Yellow));
    }
    fill(frame.chaser, '#', Style::default().fg(Color::Red).bold());
    fill(frame.player, '@', Style::default().fg(Color::Yellow).bold());

    canvas
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(glyph, style)| Span::styled(glyph.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Draws frames onto a crossterm-backed terminal.
pub struct TuiRenderer<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
    stars: Starfield,
}

impl<'a> TuiRenderer<'a> {
    pub fn new(
        terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
        seed: u64,
    ) -> io::Result<Self> {
        let stars = Starfield::for_area(seed, terminal.size()?);
        Ok(TuiRenderer { terminal, stars })
    }
}

impl Renderer for TuiRenderer<'_> {
    type Error = io::Error;

    fn draw_frame(&mut self, snapshot: &FrameSnapshot<'_>) -> Result<(), Self::Error> {
        let stars = &self.stars;
        self.terminal.draw(|f| ui(f, snapshot, stars))?;
        Ok(())
    }

    fn draw_end_message(&mut self, text: &str) -> Result<(), Self::Error> {
        self.terminal.draw(|f| {
            let area = f.area();
            let message = Paragraph::new(Line::from(text.to_string()).bold())
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Star Chase"));
            let [_, middle, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(3),
                Constraint::Fill(1),
            ])
            .areas(area);
            f.render_widget(Clear, area);
            f.render_widget(message, middle);
        })?;
        Ok(())
    }
}

/// Renders the playfield with the HUD in its title and key help below.
fn ui(frame: &mut Frame, snapshot: &FrameSnapshot<'_>, stars: &Starfield) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(frame.area());

    let block = Block::default()
        .title("Star Chase")
        .title(Line::from(format!("AI Health: {}", snapshot.chaser_health)).right_aligned())
        .borders(Borders::ALL);
    let inner = block.inner(main_layout[0]);
    let lines = paint_field(snapshot, stars, inner.width, inner.height);
    frame.render_widget(Paragraph::new(lines).block(block), main_layout[0]);

    let help_text = Paragraph::new(format!(
        "WASD/arrows: move  Space/F: fire  q/Esc: quit   shots {}  hits {}",
        snapshot.stats.shots_fired, snapshot.stats.hits
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help_text, main_layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_chase_core::{config::GameConfig, game::Game};

    fn row_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn ships_are_painted_at_scaled_positions() {
        let game = Game::new(&GameConfig::default());
        let lines = paint_field(&game.snapshot(), &Starfield::new(1, 0), 90, 50);
        assert_eq!(lines.len(), 50);
        // Player at (100, 300) -> column 10, row 30; chaser at (700, 300) -> column 70.
        let row = row_text(&lines[30]);
        assert_eq!(row.chars().nth(10), Some('@'));
        assert_eq!(row.chars().nth(70), Some('#'));
        assert_eq!(row.chars().nth(50), Some(' '));
    }

    #[test]
    fn tiny_canvas_still_shows_ships() {
        let game = Game::new(&GameConfig::default());
        let lines = paint_field(&game.snapshot(), &Starfield::new(1, 0), 9, 5);
        let text: String = lines.iter().map(row_text).collect();
        assert!(text.contains('@'));
        assert!(text.contains('#'));
    }

    #[test]
    fn starfield_is_reproducible() {
        let a = Starfield::new(7, 32);
        let b = Starfield::new(7, 32);
        assert_eq!(a.stars, b.stars);
        assert_eq!(a.stars.len(), 32);
    }
}
