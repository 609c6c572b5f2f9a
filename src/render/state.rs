//! View state and screen layout.
//!
//! `ViewState` is everything the renderer needs for one frame. `CardLayout` is shared by the
//! renderer (where to draw) and the application (what a pointer event hit).

use crate::audio::BackendKind;
use crate::book::{Direction, NavigationState, PageContent};
use crate::input::{Control, HitRegion};
use ratatui::layout::Rect;
use ratatui::style::Color;

const BOOK_MAX_WIDTH: u16 = 64;
const BOOK_MAX_HEIGHT: u16 = 18;
const NAV_CONTROL_WIDTH: u16 = 8;
const MUSIC_CONTROL_WIDTH: u16 = 6;

const HELP_TEXT: &str = "←/→ turn · drag or swipe · m music · q quit";

/// Screen regions of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub screen: Rect,
    pub book: Rect,
    pub prev: Rect,
    pub indicator: Rect,
    pub next: Rect,
    pub music: Rect,
    pub status: Rect,
}

pub(crate) fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

impl CardLayout {
    /// Book centred above a control row and a status line.
    pub fn compute(area: Rect) -> Self {
        let row_height = |needed: u16| u16::from(area.height >= needed);

        let status_height = row_height(1);
        let status = Rect::new(
            area.x,
            area.bottom().saturating_sub(status_height),
            area.width,
            status_height,
        );

        let controls_height = row_height(2);
        let controls_y = status.y.saturating_sub(controls_height);

        let top_height = area.height.saturating_sub(2);
        let book_width = area.width.saturating_sub(4).min(BOOK_MAX_WIDTH);
        let book_height = top_height.saturating_sub(2).min(BOOK_MAX_HEIGHT);
        let book = Rect::new(
            area.x + (area.width - book_width) / 2,
            area.y + (top_height - book_height) / 2,
            book_width,
            book_height,
        );

        let nav_width = NAV_CONTROL_WIDTH.min(book_width / 2);
        let prev = Rect::new(book.x, controls_y, nav_width, controls_height);
        let next = Rect::new(
            book.right().saturating_sub(nav_width),
            controls_y,
            nav_width,
            controls_height,
        );
        let indicator = Rect::new(
            prev.right(),
            controls_y,
            next.x.saturating_sub(prev.right()),
            controls_height,
        );

        let music_width = MUSIC_CONTROL_WIDTH.min(area.width);
        let music = Rect::new(
            area.right().saturating_sub(music_width),
            controls_y,
            music_width,
            controls_height,
        );

        Self {
            screen: area,
            book,
            prev,
            indicator,
            next,
            music,
            status,
        }
    }

    /// What lies under a terminal cell.
    pub fn hit_test(&self, column: u16, row: u16) -> HitRegion {
        if contains(self.prev, column, row) {
            HitRegion::Control(Control::Previous)
        } else if contains(self.next, column, row) {
            HitRegion::Control(Control::Next)
        } else if contains(self.music, column, row) {
            HitRegion::Control(Control::Music)
        } else if contains(self.book, column, row) {
            HitRegion::Book
        } else {
            HitRegion::Outside
        }
    }
}

/// Page turn in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipFrame {
    pub progress: f32,
    pub direction: Direction,
}

/// One light as drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSprite {
    pub column: u16,
    pub row: u16,
    pub color: Color,
    pub intensity: f32,
}

/// Music indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MusicView {
    pub playing: bool,
    pub backend: Option<BackendKind>,
    pub note: Option<&'static str>,
    /// Current chord envelope, `0.0..=0.1`
    pub level: f32,
}

/// Everything drawn in one frame.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub page: PageContent,
    pub current_page: usize,
    pub total_pages: usize,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub indicator: String,

    /// Whole-card fade applied to titles and decorations
    pub intro: f32,
    pub paragraph_opacity: Vec<f32>,
    pub flip: Option<FlipFrame>,
    pub lights: Vec<LightSprite>,
    pub music: MusicView,
    pub status_message: Option<String>,

    pub width: u16,
    pub height: u16,
}

impl ViewState {
    pub fn new(page: &PageContent, nav: &NavigationState, width: u16, height: u16) -> Self {
        let mut state = Self {
            page: page.clone(),
            current_page: 0,
            total_pages: 0,
            prev_disabled: true,
            next_disabled: true,
            indicator: String::new(),
            intro: 0.0,
            paragraph_opacity: Vec::new(),
            flip: None,
            lights: Vec::new(),
            music: MusicView::default(),
            status_message: None,
            width,
            height,
        };
        state.show_page(page, nav);
        state
    }

    /// Swap in a new page: content, control availability and the page indicator.
    /// Paragraphs start hidden until the reveal schedule fades them in.
    pub fn show_page(&mut self, page: &PageContent, nav: &NavigationState) {
        self.page = page.clone();
        self.current_page = nav.current_page();
        self.total_pages = nav.total_pages();
        self.prev_disabled = nav.is_first_page();
        self.next_disabled = nav.is_last_page();
        self.indicator = nav.indicator();
        self.paragraph_opacity = vec![0.0; page.paragraphs.len()];
    }

    pub fn layout(&self) -> CardLayout {
        CardLayout::compute(Rect::new(0, 0, self.width, self.height))
    }

    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        changed
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.status_message = None;
    }

    pub fn status_text(&self) -> String {
        let mut text = HELP_TEXT.to_string();
        if let Some(note) = self.music.note {
            text.push_str(&format!(" | ♪ {}", note));
        }
        if let Some(message) = &self.status_message {
            text.push_str(&format!(" | {}", message));
        }
        text
    }
}
