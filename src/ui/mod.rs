// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the quiz.
//!
//! Provides a ratatui-based terminal interface with the now-playing clip,
//! the candidate list, answer feedback and a running score.

mod candidates;
mod clip_panel;
mod screen;
mod session;

pub use candidates::{row_style, CandidatesWidget};
pub use clip_panel::ClipPanelWidget;
pub use screen::{QuizScreen, ScreenLayout, HEADING};
pub use session::Session;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

/// View-only state that is not part of the quiz itself
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Help text visible
    pub show_help: bool,
    /// Full song list visible
    pub show_song_list: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl ViewState {
    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }
}

/// Key event result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Guess the candidate on the given row (0-indexed)
    Guess(usize),
    /// Start a new round
    PlayAgain,
    /// Toggle the song list
    ToggleSongList,
    /// Toggle help
    ToggleHelp,
}

/// Map a key press to an action
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match (code, modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        // Guess by row number
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            KeyAction::Guess((c as usize) - ('1' as usize))
        }

        // Next round
        (KeyCode::Enter, _) | (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::PlayAgain,

        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::ToggleSongList,
        (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            KeyAction::ToggleHelp
        }

        _ => KeyAction::None,
    }
}

/// Map a mouse event to an action using the drawn layout
pub fn map_mouse(mouse: MouseEvent, layout: &ScreenLayout) -> KeyAction {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return KeyAction::None;
    }

    if let Some(index) = layout.row_at(mouse.column, mouse.row) {
        KeyAction::Guess(index)
    } else if layout.is_play_again(mouse.column, mouse.row) {
        KeyAction::PlayAgain
    } else {
        KeyAction::None
    }
}

/// Terminal UI application
pub struct App {
    /// Quiz behind the screen
    session: Session,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    /// Area of the last drawn frame
    last_area: Rect,
}

impl App {
    /// Take over the terminal for `session`
    pub fn new(session: Session) -> io::Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            session,
            terminal,
            frame_rate: 30,
            last_area: Rect::default(),
        })
    }

    /// Set frame rate
    pub fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps.clamp(1, 120);
    }

    /// Session behind the screen
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        while self.session.is_running() {
            self.session.poll_loader();
            self.session.view_mut().clear_expired_status();
            self.draw()?;

            if let Some(event) = self.poll_event()? {
                self.handle_event(event);
            }
        }
        Ok(())
    }

    /// Turn a terminal event into a session action
    pub fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key.code, key.modifiers),
            Event::Mouse(mouse) => {
                let layout = ScreenLayout::for_quiz(self.last_area, self.session.quiz());
                map_mouse(mouse, &layout)
            }
            _ => KeyAction::None,
        };

        if action != KeyAction::None {
            tracing::debug!(?action, "Input");
        }
        self.session.dispatch(action);
    }

    /// Poll for events with timeout
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        let session = &self.session;
        let mut area = Rect::default();

        self.terminal.draw(|frame| {
            area = frame.area();
            frame.render_widget(
                QuizScreen::new(session.quiz(), session.view(), session.playback()),
                area,
            );
        })?;

        self.last_area = area;
        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
