//! TUI for the zone grid demo.
//!
//! Renders the zone layout with live claim state plus a status bar. The
//! simulator advances one frame per UI tick; keyboard input pauses the
//! simulation, cycles scales, and toggles which fingers may play.

mod status;
mod zones;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use airfret::config::Config;
use airfret::engine::InteractionEngine;
use airfret::io::queue::QueuedSink;
use airfret::layout::ZoneLayout;
use airfret::tracking::Finger;

use super::sim::SimHands;
use status::render_status;
use zones::render_zones;

/// UI refresh interval (~60fps)
const TICK: Duration = Duration::from_millis(16);

pub struct UiApp {
    layout: ZoneLayout,
    engine: InteractionEngine,
    sim: SimHands,
    sink: QueuedSink,
    /// `None` means chromatic; the rest are preset names from the config.
    scale_choices: Vec<Option<String>>,
    scale_index: usize,
    paused: bool,
    frame: u64,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        config: Config,
        layout: ZoneLayout,
        engine: InteractionEngine,
        sim: SimHands,
        sink: QueuedSink,
    ) -> Self {
        let mut scale_choices: Vec<Option<String>> = vec![None];
        scale_choices.extend(config.preset_scales.iter().map(|p| Some(p.name.clone())));
        let scale_index = scale_choices
            .iter()
            .position(|choice| *choice == config.active_scale)
            .unwrap_or(0);

        Self {
            layout,
            engine,
            sim,
            sink,
            scale_choices,
            scale_index,
            paused: false,
            frame: 0,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            if !self.paused {
                self.step();
            }

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        // Leave no note hanging after the terminal is restored.
        self.engine.release_all(self.layout.zones_mut(), &mut self.sink);
        Ok(())
    }

    fn step(&mut self) {
        let hands = self.sim.next_frame();
        self.engine
            .process_frame(&hands, self.layout.zones_mut(), &mut self.sink);
        self.frame += 1;
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.cycle_scale();
            }
            KeyCode::Char(c @ '1'..='5') => {
                self.toggle_finger(c as usize - '1' as usize);
            }
            _ => {}
        }
    }

    /// Swap to the next scale. Bindings index into the zone list, so
    /// everything sounding is released before the rebuild.
    fn cycle_scale(&mut self) {
        self.engine.release_all(self.layout.zones_mut(), &mut self.sink);
        self.scale_index = (self.scale_index + 1) % self.scale_choices.len();
        self.layout
            .set_scale(self.scale_choices[self.scale_index].clone());
    }

    fn toggle_finger(&mut self, slot: usize) {
        let finger = Finger::ALL[slot];
        let mut targets = self.engine.targets().to_vec();
        match targets.iter().position(|&f| f == finger) {
            Some(pos) => {
                targets.remove(pos);
            }
            None => targets.push(finger),
        }
        self.engine.set_targets(targets);
    }

    fn scale_name(&self) -> &str {
        match &self.scale_choices[self.scale_index] {
            Some(name) => name,
            None => "Chromatic",
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Zone grid
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_status(frame, chunks[0], self);
        render_zones(frame, chunks[1], self.layout.zones());

        let help = Paragraph::new(" [Q] Quit  [Space] Pause  [S] Cycle scale  [1-5] Toggle fingers")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
