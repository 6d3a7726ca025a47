// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Full-screen layout of the quiz.
//!
//! [`ScreenLayout`] is shared by drawing and mouse hit-testing so a click
//! always lands on the row that was drawn at that position.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::candidates::{row_area, CandidatesWidget};
use super::clip_panel::ClipPanelWidget;
use super::ViewState;
use crate::player::Playback;
use crate::quiz::{Phase, Quiz, DEFAULT_ROUND_SIZE};

/// Heading shown at the top of the screen
pub const HEADING: &str = " Musikquiz ";

const LOADING_TEXT: &str = "Laddar låtar...";
const NO_SONGS_TEXT: &str = "Inga låtar hittades.";
const PLAY_AGAIN_TEXT: &str = "▶ Spela igen [Enter]";

/// Screen regions for a terminal area
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub clip: Rect,
    pub candidates: Rect,
    pub rows: Vec<Rect>,
    pub feedback: Rect,
    pub play_again: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    /// Lay out the screen for `candidate_count` rows
    pub fn new(area: Rect, candidate_count: usize) -> Self {
        let list_height = u16::try_from(candidate_count).unwrap_or(u16::MAX).saturating_add(2);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),           // Heading + score
                Constraint::Length(4),           // Clip
                Constraint::Length(list_height), // Candidates
                Constraint::Length(4),           // Feedback
                Constraint::Min(0),              // Padding
                Constraint::Length(1),           // Status bar
            ])
            .split(area);

        let list_inner = bordered().inner(chunks[2]);
        let rows = (0..candidate_count)
            .map_while(|i| row_area(list_inner, i))
            .collect();

        let feedback_inner = bordered().inner(chunks[3]);
        let play_again = if feedback_inner.height >= 2 {
            Rect::new(feedback_inner.x, feedback_inner.y + 1, feedback_inner.width, 1)
        } else {
            Rect::default()
        };

        Self {
            header: chunks[0],
            clip: chunks[1],
            candidates: chunks[2],
            rows,
            feedback: chunks[3],
            play_again,
            status: chunks[5],
        }
    }

    /// Layout for the current state of `quiz`
    pub fn for_quiz(area: Rect, quiz: &Quiz) -> Self {
        let count = quiz.round().map_or(0, |round| round.candidates().len());
        Self::new(area, count)
    }

    /// Index of the candidate row under a terminal cell
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        self.rows.iter().position(|area| contains(*area, column, row))
    }

    /// Whether a terminal cell is on the "play again" line
    pub fn is_play_again(&self, column: u16, row: u16) -> bool {
        contains(self.play_again, column, row)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

fn bordered<'a>() -> Block<'a> {
    Block::default().borders(Borders::ALL)
}

/// The whole quiz screen
pub struct QuizScreen<'a> {
    quiz: &'a Quiz,
    view: &'a ViewState,
    playback: Option<&'a Playback>,
}

impl<'a> QuizScreen<'a> {
    /// Create the screen for a quiz state
    pub fn new(quiz: &'a Quiz, view: &'a ViewState, playback: Option<&'a Playback>) -> Self {
        Self {
            quiz,
            view,
            playback,
        }
    }
}

impl Widget for QuizScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = ScreenLayout::for_quiz(area, self.quiz);

        render_header(layout.header, buf, self.quiz);

        match self.quiz.phase() {
            Phase::Loading => render_notice(layout.clip, buf, LOADING_TEXT),
            Phase::NoSongs => render_notice(layout.clip, buf, NO_SONGS_TEXT),
            Phase::Ready { .. } | Phase::Revealed { .. } => {
                ClipPanelWidget::new(self.playback)
                    .block(bordered().title(" Spelar nu "))
                    .render(layout.clip, buf);
                CandidatesWidget::new(self.quiz)
                    .block(bordered().title(" Svarsalternativ "))
                    .render(layout.candidates, buf);
                render_feedback(layout.feedback, buf, self.quiz);
            }
        }

        render_status_bar(layout.status, buf, self.view, layout.rows.len());

        if self.view.show_song_list {
            render_song_list_overlay(area, buf, self.quiz);
        }
        if self.view.show_help {
            render_help_overlay(area, buf);
        }
    }
}

/// Render heading and score
fn render_header(area: Rect, buf: &mut Buffer, quiz: &Quiz) {
    let block = bordered().title(Span::styled(
        HEADING,
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    block.render(area, buf);

    let score = Line::from(vec![
        Span::styled("Poäng: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} / {}", quiz.score(), quiz.rounds_played()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]);
    Paragraph::new(score).render(inner, buf);
}

/// Render a single-line notice in a bordered box
fn render_notice(area: Rect, buf: &mut Buffer, text: &str) {
    let block = bordered();
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .render(inner, buf);
}

/// Render feedback and the "play again" action
fn render_feedback(area: Rect, buf: &mut Buffer, quiz: &Quiz) {
    let block = bordered().title(" Resultat ");
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = match quiz.feedback() {
        Some(feedback) => {
            let style = match quiz.phase() {
                Phase::Revealed { correct: true, .. } => {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                }
                _ => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            };
            vec![
                Line::from(Span::styled(feedback.text(), style)),
                Line::from(Span::styled(
                    PLAY_AGAIN_TEXT,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
                )),
            ]
        }
        None => {
            let count = quiz.round().map_or(0, |round| round.candidates().len());
            let prompt = format!(
                "Vilken låt spelas? Tryck {} eller klicka på en rad.",
                guess_keys(count)
            );
            vec![Line::from(Span::styled(prompt, Style::default().fg(Color::DarkGray)))]
        }
    };

    Paragraph::new(lines).render(inner, buf);
}

/// Keys that guess a row, e.g. `1-4`
fn guess_keys(count: usize) -> String {
    match count {
        0 | 1 => "1".to_string(),
        n => format!("1-{}", n.min(9)),
    }
}

/// Render status bar
fn render_status_bar(area: Rect, buf: &mut Buffer, view: &ViewState, rows: usize) {
    let text = if let Some(ref msg) = view.status_message {
        Span::styled(msg.clone(), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!(
                " {}: Gissa | Enter: Spela igen | l: Låtlista | h: Hjälp | q: Avsluta",
                guess_keys(if rows == 0 { DEFAULT_ROUND_SIZE } else { rows })
            ),
            Style::default().fg(Color::DarkGray),
        )
    };

    Paragraph::new(text).render(area, buf);
}

/// Centered area of at most `width` × `height`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Render every fetched song
fn render_song_list_overlay(area: Rect, buf: &mut Buffer, quiz: &Quiz) {
    let songs = quiz.songs();
    let wanted = u16::try_from(songs.len()).unwrap_or(u16::MAX).saturating_add(2);
    let list_area = centered(area, 60, wanted.max(3));

    Clear.render(list_area, buf);
    let block = bordered()
        .title(" Låtlista ")
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(list_area);
    block.render(list_area, buf);

    let lines: Vec<Line> = if songs.is_empty() {
        vec![Line::from(Span::styled(
            NO_SONGS_TEXT,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        songs.iter().map(|song| Line::from(song.label())).collect()
    };

    Paragraph::new(lines).render(inner, buf);
}

/// Render help overlay
fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let help_area = centered(area, 44, 11);

    Clear.render(help_area, buf);
    let block = bordered()
        .title(" Hjälp ")
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(help_area);
    block.render(help_area, buf);

    let help_text = vec![
        Line::from(Span::styled("Quiz", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  1-9 / klick   Gissa på en rad"),
        Line::from("  Enter / n     Spela igen"),
        Line::from(""),
        Line::from(Span::styled("Övrigt", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  l             Visa låtlista"),
        Line::from("  h/?           Visa hjälp"),
        Line::from("  q/Ctrl+c      Avsluta"),
    ];

    Paragraph::new(help_text).render(inner, buf);
}
