// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Candidate list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::quiz::{Quiz, RowMark};

/// Style of a candidate row for its mark
pub fn row_style(mark: RowMark) -> Style {
    match mark {
        RowMark::Neutral => Style::default().fg(Color::White),
        RowMark::Correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        RowMark::Incorrect => Style::default().fg(Color::White).bg(Color::Red),
    }
}

/// Area of row `index` inside the list's inner area
pub fn row_area(inner: Rect, index: usize) -> Option<Rect> {
    let offset = u16::try_from(index).ok()?;
    if offset >= inner.height {
        return None;
    }
    Some(Rect::new(inner.x, inner.y + offset, inner.width, 1))
}

/// Widget listing the candidates of the current round
pub struct CandidatesWidget<'a> {
    quiz: &'a Quiz,
    block: Option<Block<'a>>,
}

impl<'a> CandidatesWidget<'a> {
    /// Create a new candidates widget
    pub fn new(quiz: &'a Quiz) -> Self {
        Self { quiz, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for CandidatesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let Some(round) = self.quiz.round() else {
            return;
        };

        for (i, song) in round.candidates().iter().enumerate() {
            let Some(row) = row_area(area, i) else {
                break;
            };

            let mark = self.quiz.row_mark(song);
            let indicator = match mark {
                RowMark::Neutral => "  ",
                RowMark::Correct => "✔ ",
                RowMark::Incorrect => "✘ ",
            };

            let line = Line::from(vec![
                Span::raw(indicator),
                Span::styled(format!("{}. ", i + 1), Style::default().add_modifier(Modifier::DIM)),
                Span::raw(song.label()),
            ]);
            Paragraph::new(line).style(row_style(mark)).render(row, buf);
        }
    }
}
