pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::App;
use hiragana_quiz::backdrop::Backdrop;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(backdrop) = &self.backdrop {
            render_backdrop(backdrop, area, buf);
        }

        let snapshot = self.quiz.snapshot();
        let screen = screen::current_screen(snapshot.status);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(1), // score bar
                Constraint::Length(1), // padding
                Constraint::Min(1),    // screen body
                Constraint::Length(1), // legend
            ])
            .split(area);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "ひらがな Quiz",
                bold_style.fg(Color::White),
            )),
            Line::from(Span::styled(
                "Test your hiragana knowledge!",
                Style::default().fg(Color::Magenta),
            )),
        ])
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let mut bar = vec![
            Span::styled("Score: ", bold_style),
            Span::styled(snapshot.score.to_string(), Style::default().fg(Color::Yellow)),
            Span::raw("   "),
            Span::styled("Streak: ", bold_style),
            Span::styled(
                snapshot.streak.to_string(),
                Style::default().fg(Color::LightRed),
            ),
        ];
        if snapshot.status != hiragana_quiz::Status::NotStarted {
            bar.extend([
                Span::raw("   "),
                Span::styled("Progress: ", bold_style),
                Span::styled(
                    format!("{}/{}", snapshot.presented_count, snapshot.total),
                    Style::default().fg(Color::Cyan),
                ),
            ]);
        }
        Paragraph::new(Line::from(bar))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        screen.render(self, &snapshot, chunks[3], buf);

        Paragraph::new(Span::styled(
            screen.legend(),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }
}

/// Draws the drifting kana behind everything else.
fn render_backdrop(backdrop: &Backdrop, area: Rect, buf: &mut Buffer) {
    let style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::DIM);

    for particle in &backdrop.particles {
        let (col, row) = particle.cell(area.width, area.height);
        // wide glyphs must not spill past the right edge
        if col as usize + particle.symbol.width() > area.width as usize {
            continue;
        }
        buf.set_string(area.x + col, area.y + row, &particle.symbol, style);
    }
}

/// Rendered buffer as plain text, one string per row.
#[cfg(test)]
pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(area.x + x, area.y + y)].symbol())
                .collect::<String>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{App, Cli};
    use clap::Parser;
    use hiragana_quiz::runtime::Timed;
    use hiragana_quiz::{Feedback, SubmitReason};
    use std::time::Duration;

    fn app(extra: &[&str]) -> App {
        let mut args = vec![
            "hiragana-quiz",
            "--config",
            "/nonexistent/hiragana-quiz/config.json",
            "--seed",
            "9",
        ];
        args.extend_from_slice(extra);
        App::new(&Cli::parse_from(args)).unwrap()
    }

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer_lines(&buffer).join("\n")
    }

    #[test]
    fn test_welcome_screen() {
        let app = app(&["--no-backdrop"]);
        let rendered = render(&app);

        assert!(rendered.contains("Welcome to Hiragana Practice!"));
        assert!(rendered.contains("10 seconds"));
        assert!(rendered.contains("Score:"));
        assert!(!rendered.contains("Progress:"));
    }

    #[test]
    fn test_quiz_screen_shows_prompt_and_timer() {
        let mut app = app(&["--no-backdrop"]);
        app.quiz.start();
        let symbol = app.quiz.state().current.clone().unwrap().symbol;

        let rendered = render(&app);
        assert!(rendered.contains(&symbol));
        assert!(rendered.contains("10s"));
        assert!(rendered.contains("Progress: 1/46"));
    }

    #[test]
    fn test_feedback_rendering() {
        let mut app = app(&["--no-backdrop"]);
        app.quiz.start();
        app.quiz.update_input("definitely wrong");
        app.quiz.submit(SubmitReason::UserInitiated);
        let Feedback::Incorrect(expected) = app.quiz.state().last_feedback.clone() else {
            panic!("expected an incorrect verdict");
        };

        let rendered = render(&app);
        assert!(rendered.contains(&format!("The answer was \"{expected}\"")));
    }

    #[test]
    fn test_keyboard_hint_in_reverse_mode() {
        let mut app = app(&["--no-backdrop", "-m", "romanized-to-symbol"]);
        app.quiz.start();
        app.quiz.update_input("ka");

        let rendered = render(&app);
        assert!(rendered.contains("Japanese input"));
    }

    #[test]
    fn test_summary_screen() {
        let mut app = app(&["--no-backdrop", "-t", "5"]);
        app.quiz.start();
        while app.quiz.status() != hiragana_quiz::Status::Completed {
            app.advance(Duration::from_secs(1));
        }

        let rendered = render(&app);
        assert!(rendered.contains("Quiz complete!"));
        assert!(rendered.contains("Accuracy: 0%"));
        assert!(rendered.contains("Nice try! Practice makes perfect!"));
    }

    #[test]
    fn test_backdrop_renders_without_panicking() {
        let app = app(&[]);
        for (w, h) in [(80, 24), (10, 5), (1, 1)] {
            let area = Rect::new(0, 0, w, h);
            let mut buffer = Buffer::empty(area);
            app.render(area, &mut buffer);
        }
    }
}
