//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer for the card. Drawing is a
//! pure function of [`ViewState`] so it can be exercised against ratatui's `TestBackend`.

use crate::book::Direction;
use crate::error::Result;
use crate::render::state::{contains, CardLayout, FlipFrame, ViewState};
use crate::render::theme::{rgb, ColorTheme};
use crate::render::UIRenderer;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const ORNAMENT: &str = "❄  ✦  ❄";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }
}

/// Draw one frame of the card.
pub fn draw_card(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
    let layout = CardLayout::compute(frame.size());

    let background = Block::default().style(Style::default().bg(rgb(theme.background)));
    frame.render_widget(background, layout.screen);

    render_lights(frame, &layout, view_state, theme);
    render_book(frame, layout.book, view_state, theme);
    if let Some(flip) = view_state.flip {
        render_fold(frame, layout.book, flip, theme);
    }
    render_controls(frame, &layout, view_state, theme);
    render_status(frame, layout.status, view_state, theme);
}

fn render_lights(frame: &mut Frame, layout: &CardLayout, view_state: &ViewState, theme: &ColorTheme) {
    let area = layout.screen;
    let buffer = frame.buffer_mut();
    for sprite in &view_state.lights {
        if sprite.column >= area.right()
            || sprite.row >= area.bottom()
            || contains(layout.book, sprite.column, sprite.row)
        {
            continue;
        }
        let intensity = sprite.intensity * view_state.intro;
        let glyph = if intensity > 0.85 {
            '✦'
        } else if intensity > 0.55 {
            '•'
        } else {
            '·'
        };
        buffer
            .get_mut(sprite.column, sprite.row)
            .set_char(glyph)
            .set_fg(theme.light(sprite.color, intensity));
    }
}

fn page_lines<'a>(view_state: &'a ViewState, theme: &ColorTheme) -> Vec<Line<'a>> {
    let page = &view_state.page;
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            page.title.as_str(),
            theme.faded_title(view_state.intro),
        )),
        Line::from(Span::styled(ORNAMENT, theme.faded_text(view_state.intro))),
        Line::default(),
    ];

    for (idx, paragraph) in page.paragraphs.iter().enumerate() {
        let opacity = view_state
            .paragraph_opacity
            .get(idx)
            .copied()
            .unwrap_or(0.0);
        lines.push(Line::from(Span::styled(
            paragraph.as_str(),
            theme.faded_text(opacity),
        )));
    }

    if let Some(signature) = &page.signature {
        let opacity = view_state
            .paragraph_opacity
            .last()
            .copied()
            .unwrap_or(view_state.intro);
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("— {}", signature),
            theme.faded_title(opacity),
        )));
    }

    lines
}

fn render_book(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.ornament))
        .style(Style::default().bg(rgb(theme.page_bg)));

    let paragraph = Paragraph::new(page_lines(view_state, theme))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Vertical fold line sweeping across the page while a turn animates.
fn render_fold(frame: &mut Frame, book: Rect, flip: FlipFrame, theme: &ColorTheme) {
    let inner = Rect::new(
        book.x.saturating_add(1),
        book.y.saturating_add(1),
        book.width.saturating_sub(2),
        book.height.saturating_sub(2),
    );
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let travel = ((inner.width - 1) as f32 * flip.progress.clamp(0.0, 1.0)) as u16;
    let column = match flip.direction {
        Direction::Next => inner.right() - 1 - travel,
        Direction::Previous => inner.x + travel,
    };

    let buffer = frame.buffer_mut();
    for row in inner.y..inner.bottom() {
        buffer
            .get_mut(column, row)
            .set_char('▌')
            .set_fg(theme.ornament);
    }
}

fn render_controls(
    frame: &mut Frame,
    layout: &CardLayout,
    view_state: &ViewState,
    theme: &ColorTheme,
) {
    let control_style = |disabled: bool| {
        let style = if disabled {
            theme.control_disabled
        } else {
            theme.control
        };
        style.bg(rgb(theme.background))
    };

    frame.render_widget(
        Paragraph::new("◀ Prev").style(control_style(view_state.prev_disabled)),
        layout.prev,
    );
    frame.render_widget(
        Paragraph::new(view_state.indicator.as_str())
            .alignment(Alignment::Center)
            .style(theme.control.bg(rgb(theme.background))),
        layout.indicator,
    );
    frame.render_widget(
        Paragraph::new("Next ▶")
            .alignment(Alignment::Right)
            .style(control_style(view_state.next_disabled)),
        layout.next,
    );

    let (label, style) = if view_state.music.playing {
        let bar = if view_state.music.level > 0.05 {
            '▆'
        } else if view_state.music.level > 0.02 {
            '▃'
        } else {
            '▁'
        };
        (format!("♪ {} ", bar), theme.music_on)
    } else {
        ("♪ off".to_string(), theme.control_disabled)
    };
    frame.render_widget(
        Paragraph::new(label).style(style.bg(rgb(theme.background))),
        layout.music,
    );
}

fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
    let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
    let status = Paragraph::new(view_state.status_text()).style(status_style);
    frame.render_widget(status, area);
}

fn enter_card_screen() -> Result<CrosstermTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

/// Runs `restore` when setup after raw mode failed, then passes the result through.
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if let Err(err) = &result {
        log::warn!("terminal setup failed, restoring terminal: {}", err);
        restore();
    }
    result
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal.draw(move |frame| draw_card(frame, view_state, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let terminal = restore_on_error(enter_card_screen(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            let _ = disable_raw_mode();
        })?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            terminal.show_cursor()?;
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
