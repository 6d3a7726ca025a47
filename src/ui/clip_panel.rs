// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Now-playing panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::player::Playback;

/// Widget showing the clip handed to the embedded player
pub struct ClipPanelWidget<'a> {
    playback: Option<&'a Playback>,
    block: Option<Block<'a>>,
}

impl<'a> ClipPanelWidget<'a> {
    /// Create a new clip panel
    pub fn new(playback: Option<&'a Playback>) -> Self {
        Self {
            playback,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ClipPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let lines = match self.playback {
            Some(playback) => {
                let (indicator, style) = if playback.autoplay {
                    ("▶ Spelar", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                } else {
                    ("■ Pausad", Style::default().fg(Color::Yellow))
                };
                let width = if playback.full_width { "full bredd" } else { "fast bredd" };

                vec![
                    Line::from(vec![
                        Span::styled(indicator, style),
                        Span::styled(
                            format!("  {} px × {}", playback.height, width),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::from(Span::styled(
                        playback.embed_url(),
                        Style::default().fg(Color::Cyan),
                    )),
                ]
            }
            None => vec![Line::from(Span::styled(
                "Klippet kan inte spelas upp",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
