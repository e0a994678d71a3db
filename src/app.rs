use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::time;

use crate::{
    source::EventReceiver,
    themes::{Theme, ThemeName},
    tracker::ActivityTracker,
    ui::ui,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Running,
    Quitting,
}

pub struct App {
    pub state: AppState,
    pub update_interval: Duration,
    pub debug: bool,
    pub tracker: ActivityTracker,
    pub last_update: Instant,
    pub selected_index: usize,
    pub channel_scroll_offset: usize,
    pub visible_height: usize,
    pub show_help: bool,
    pub theme: Theme,
    pub paused: bool,
    pub force_redraw: bool,
    pub last_ingest_count: usize,
}

impl App {
    pub fn new(
        update_interval: Duration,
        debug: bool,
        theme_name: ThemeName,
        receiver: EventReceiver,
        max_history: usize,
    ) -> Result<Self> {
        let mut tracker = ActivityTracker::new(receiver);
        tracker.set_max_history(max_history);
        let theme = Theme::new(theme_name);

        Ok(Self {
            state: AppState::Running,
            update_interval,
            debug,
            tracker,
            last_update: Instant::now(),
            selected_index: 0,
            channel_scroll_offset: 0,
            visible_height: 20,
            show_help: false,
            theme,
            paused: false,
            force_redraw: false,
            last_ingest_count: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main application loop
        let result = self.run_app(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            // Handle forced redraw (like Ctrl+L)
            if self.force_redraw {
                let size = terminal.size()?;
                terminal.resize(Rect::new(0, 0, size.width, size.height))?;
                terminal.clear()?;
                self.force_redraw = false;
            }

            // Draw the UI
            terminal.draw(|f| ui(f, self))?;

            // Handle timeout for updates
            let timeout = self.update_interval.saturating_sub(last_tick.elapsed());

            // Check for events
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        self.handle_key_event(key.code, key.modifiers);
                    }
                    Event::Resize(_, _) => {
                        // Terminal resize automatically triggers full redraw
                        let size = terminal.size()?;
                        terminal.resize(Rect::new(0, 0, size.width, size.height))?;
                    }
                    _ => {}
                }
            }

            // Update data if enough time has passed
            if last_tick.elapsed() >= self.update_interval {
                self.update_data();
                last_tick = Instant::now();
            }

            // Check if we should quit
            if self.state == AppState::Quitting {
                break;
            }

            // Small delay to prevent busy waiting
            time::sleep(Duration::from_millis(10)).await;
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_code: KeyCode, modifiers: KeyModifiers) {
        // Any key closes the help overlay first
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key_code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.state = AppState::Quitting;
            }
            KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.force_redraw = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
            }
            KeyCode::Char('c') => {
                if let Some(channel) = self.selected_channel() {
                    self.tracker.clear_channel_history(&channel);
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.grow_history();
            }
            KeyCode::Char('-') => {
                self.shrink_history();
            }
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    pub fn update_data(&mut self) {
        if !self.paused {
            self.last_ingest_count = self.tracker.update();
        }
        self.last_update = Instant::now();
        self.clamp_selection();
    }

    pub fn selected_channel(&self) -> Option<String> {
        self.tracker
            .channels()
            .get(self.selected_index)
            .map(|(name, _)| (*name).clone())
    }

    fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
        self.adjust_scroll();
    }

    fn move_selection_down(&mut self) {
        let count = self.tracker.channel_count();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
        self.adjust_scroll();
    }

    fn clamp_selection(&mut self) {
        let count = self.tracker.channel_count();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        if self.selected_index < self.channel_scroll_offset {
            self.channel_scroll_offset = self.selected_index;
        } else if self.visible_height > 0
            && self.selected_index >= self.channel_scroll_offset + self.visible_height
        {
            self.channel_scroll_offset = self.selected_index + 1 - self.visible_height;
        }
    }

    // Doubling keeps repeated presses useful across the whole range;
    // growing out of 0 restarts at 1.
    fn grow_history(&mut self) {
        let current = self.tracker.max_history();
        let next = if current == 0 {
            1
        } else {
            current.saturating_mul(2)
        };
        self.tracker.set_max_history(next);
    }

    fn shrink_history(&mut self) {
        let current = self.tracker.max_history();
        self.tracker.set_max_history(current / 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::BotEvent;

    fn event(channel: &str) -> BotEvent {
        serde_json::from_str(&format!(
            r#"{{"channel":"{}","kind":"chat","actor":"someone"}}"#,
            channel
        ))
        .unwrap()
    }

    fn app_with(events: Vec<BotEvent>) -> App {
        App::new(
            Duration::from_millis(250),
            false,
            ThemeName::Default,
            EventReceiver::from_events(events, 0),
            100,
        )
        .unwrap()
    }

    #[test]
    fn selection_stays_within_channel_list() {
        let mut app = app_with(vec![event("#a"), event("#b")]);
        app.update_data();
        app.move_selection_down();
        assert_eq!(app.selected_channel(), Some("#b".to_string()));
        app.move_selection_down();
        assert_eq!(app.selected_channel(), Some("#b".to_string()));
        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_channel(), Some("#a".to_string()));
    }

    #[test]
    fn selection_clamps_when_empty() {
        let mut app = app_with(Vec::new());
        app.update_data();
        assert_eq!(app.selected_channel(), None);
        app.move_selection_down();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn paused_app_does_not_ingest() {
        let mut app = app_with(vec![event("#a")]);
        app.paused = true;
        app.update_data();
        assert_eq!(app.tracker.channel_count(), 0);
        app.paused = false;
        app.update_data();
        assert_eq!(app.tracker.channel_count(), 1);
    }

    #[test]
    fn history_bound_keys_double_and_halve() {
        let mut app = app_with(Vec::new());
        app.tracker.set_max_history(100);
        app.grow_history();
        assert_eq!(app.tracker.max_history(), 200);
        app.shrink_history();
        app.shrink_history();
        assert_eq!(app.tracker.max_history(), 50);
        app.tracker.set_max_history(0);
        app.grow_history();
        assert_eq!(app.tracker.max_history(), 1);
    }
}
