use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};

use crate::App;
use hiragana_quiz::{Dataset, Feedback, Mode, SessionSnapshot, Status, Verdict};

/// A UI Screen boundary: one per quiz status
pub trait Screen {
    fn render(&self, app: &App, snapshot: &SessionSnapshot, area: Rect, buf: &mut Buffer);
    fn legend(&self) -> &'static str;
}

fn card(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title(title)
        .title_alignment(Alignment::Center)
}

/// Clears `area` so the backdrop does not bleed through, then draws the card.
fn open_card(title: &str, area: Rect, buf: &mut Buffer) -> Rect {
    Clear.render(area, buf);
    let block = card(title);
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

pub struct WelcomeScreen;

impl Screen for WelcomeScreen {
    fn render(&self, app: &App, snapshot: &SessionSnapshot, area: Rect, buf: &mut Buffer) {
        let inner = open_card("Welcome", area, buf);
        let dataset = app.quiz.dataset();
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let preview: Vec<Span> = dataset
            .preview(8)
            .iter()
            .flat_map(|entry| {
                [
                    Span::styled(entry.symbol.clone(), bold),
                    Span::styled(
                        format!(" {}   ", entry.romanized),
                        Style::default().fg(Color::Magenta),
                    ),
                ]
            })
            .collect();

        let text = vec![
            Line::from(Span::styled(
                "Welcome to Hiragana Practice!",
                bold.fg(Color::White),
            )),
            Line::default(),
            Line::from(format!(
                "Test your knowledge of all {} hiragana characters. Each character will appear exactly once!",
                dataset.size()
            )),
            Line::default(),
            Line::from(preview),
            Line::default(),
            Line::from(vec![
                Span::styled("Time limit: ", bold),
                Span::raw(snapshot.config.time_limit.to_string()),
                Span::raw("    "),
                Span::styled("Mode: ", bold),
                Span::raw(snapshot.config.mode.to_string()),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Type the answer before time runs out. Complete every character to finish!",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn legend(&self) -> &'static str {
        "(enter) start / (←/→) time limit / (tab) mode / (esc)ape"
    }
}

pub struct QuizScreen;

impl QuizScreen {
    fn feedback_line(snapshot: &SessionSnapshot, dataset: &Dataset) -> Line<'static> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match &snapshot.last_feedback {
            Feedback::None => Line::default(),
            Feedback::Correct => Line::from(Span::styled("Correct!", bold.fg(Color::Green))),
            Feedback::Incorrect(answer) => {
                let mut spans = vec![Span::styled(
                    format!("Incorrect. The answer was \"{answer}\""),
                    bold.fg(Color::Red),
                )];
                // a wrong kana is still a kana: say what it reads as
                let typed = snapshot.user_input.trim();
                if snapshot.config.mode == Mode::RomanizedToSymbol {
                    if let Some(reading) = dataset.romanized_for(typed) {
                        spans.push(Span::styled(
                            format!(" ({typed} is {reading})"),
                            Style::default().fg(Color::Gray),
                        ));
                    }
                }
                Line::from(spans)
            }
            Feedback::TimedOut(answer) => Line::from(Span::styled(
                format!("Time's up! The answer was \"{answer}\""),
                bold.fg(Color::Yellow),
            )),
        }
    }

    fn hint_line(snapshot: &SessionSnapshot) -> Line<'static> {
        let wrong_script = snapshot.config.mode == Mode::RomanizedToSymbol
            && !snapshot.user_input.is_empty()
            && !snapshot.input_is_japanese;
        if wrong_script {
            Line::from(Span::styled(
                "Switch your keyboard to Japanese input to type kana",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::default()
        }
    }
}

impl Screen for QuizScreen {
    fn render(&self, app: &App, snapshot: &SessionSnapshot, area: Rect, buf: &mut Buffer) {
        let title = if snapshot.status == Status::Cooldown {
            "Next character..."
        } else {
            "Quiz"
        };
        let inner = open_card(title, area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .constraints([
                Constraint::Length(1), // timer
                Constraint::Length(1), // gauge
                Constraint::Length(1), // padding
                Constraint::Length(1), // prompt
                Constraint::Length(1), // padding
                Constraint::Length(1), // input
                Constraint::Length(1), // keyboard hint
                Constraint::Length(1), // feedback
                Constraint::Min(0),
            ])
            .split(inner);

        let bold = Style::default().add_modifier(Modifier::BOLD);

        Paragraph::new(Span::styled(format!("⏱ {}s", snapshot.time_left), bold))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
            .ratio(snapshot.time_ratio())
            .label("")
            .render(chunks[1], buf);

        let prompt = snapshot.prompt.clone().unwrap_or_default();
        Paragraph::new(Span::styled(
            prompt,
            bold.fg(Color::White).add_modifier(Modifier::UNDERLINED),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        let placeholder = match snapshot.config.mode {
            Mode::SymbolToRomanized => "enter romaji...",
            Mode::RomanizedToSymbol => "enter kana...",
        };
        let input = if snapshot.user_input.is_empty() {
            Span::styled(placeholder, Style::default().add_modifier(Modifier::DIM))
        } else {
            Span::styled(snapshot.user_input.clone(), bold)
        };
        let input_style = if snapshot.accepts_input {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Paragraph::new(Line::from(vec![Span::raw("> "), input, Span::raw("▏")]))
            .style(input_style)
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Paragraph::new(Self::hint_line(snapshot))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        Paragraph::new(Self::feedback_line(snapshot, app.quiz.dataset()))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }

    fn legend(&self) -> &'static str {
        "(enter) submit / (backspace) edit / (esc) stop"
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, _snapshot: &SessionSnapshot, area: Rect, buf: &mut Buffer) {
        let inner = open_card("Results", area, buf);
        let Some(summary) = app.quiz.summary() else {
            return;
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let verdict_color = match summary.verdict {
            Verdict::Perfect => Color::Green,
            Verdict::Excellent => Color::Blue,
            Verdict::Good => Color::Yellow,
            Verdict::KeepPracticing => Color::Magenta,
        };

        let text = vec![
            Line::from(Span::styled("Quiz complete!", bold.fg(Color::White))),
            Line::default(),
            Line::from(format!(
                "You've practiced all {} hiragana characters!",
                summary.total
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    format!("Correct answers: {}", summary.score),
                    bold.fg(Color::Yellow),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("Accuracy: {}%", summary.accuracy),
                    bold.fg(Color::Green),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("Best streak: {}", summary.best_streak),
                    bold.fg(Color::LightRed),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled(
                summary.verdict.to_string(),
                bold.fg(verdict_color),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn legend(&self) -> &'static str {
        "(enter) play again / (esc) menu / (q)uit"
    }
}

/// Helper to construct the appropriate screen for the current status
pub fn current_screen(status: Status) -> Box<dyn Screen> {
    match status {
        Status::NotStarted => Box::new(WelcomeScreen),
        Status::AwaitingAnswer | Status::Cooldown => Box::new(QuizScreen),
        Status::Completed => Box::new(SummaryScreen),
    }
}
