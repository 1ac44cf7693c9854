//! airfret - application builder and runner

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use log::info;

use airfret::config::Config;
use airfret::engine::InteractionEngine;
use airfret::io::queue::{command_queue, drain_into};
use airfret::io::{NoteSink, NullSink};
use airfret::layout::ZoneLayout;

use super::sim::SimHands;
use super::ui::UiApp;

/// Main application builder
pub struct Airfret {
    config_path: PathBuf,
    queue_capacity: usize,
}

impl Airfret {
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from("airfret.toml"),
            queue_capacity: 256,
        }
    }

    /// Where to look for the optional TOML config file
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// How many note commands may sit between the frame loop and the
    /// output backend before new ones get dropped
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Run the application (takes over the terminal)
    pub fn run(self) -> EyreResult<()> {
        let config = Config::load_or_default(&self.config_path);
        config.validate();

        let layout = ZoneLayout::new(config.layout_settings());
        let engine = InteractionEngine::new()
            .with_channel_range(config.mpe_channel_range())
            .with_targets(config.target_fingers());
        let sim = SimHands::new(config.resolution[0] as f32, config.resolution[1] as f32);

        // The frame loop pushes commands into a ring buffer; a separate
        // thread replays them into the backend so a slow MIDI driver
        // cannot stall frames.
        let (sink, mut rx) = command_queue(self.queue_capacity);
        let mut backend = open_backend(&config);
        let drain = thread::spawn(move || loop {
            // Check abandonment first: everything pushed before the
            // producer dropped is still buffered, so one more drain
            // after a true reading flushes the final note-offs.
            let abandoned = rx.is_abandoned();
            drain_into(&mut rx, backend.as_mut());
            if abandoned {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        });

        let mut terminal = ratatui::init();
        let mut app = UiApp::new(config, layout, engine, sim, sink);
        let result = app.run(&mut terminal);
        drop(app);
        ratatui::restore();

        let _ = drain.join();
        result
    }
}

impl Default for Airfret {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "midi")]
fn open_backend(config: &Config) -> Box<dyn NoteSink + Send> {
    use airfret::io::midi::{IntensityMode, MidiBackend};

    let intensity = if config.midi.intensity == "cc" {
        IntensityMode::ControlChange(config.midi.intensity_cc)
    } else {
        IntensityMode::ChannelPressure
    };
    match MidiBackend::open(
        config.midi.port.as_deref(),
        config.mpe_channel_range(),
        intensity,
    ) {
        Some(backend) => Box::new(backend),
        None => {
            info!("no MIDI output available, note events go nowhere");
            Box::new(NullSink)
        }
    }
}

#[cfg(not(feature = "midi"))]
fn open_backend(_config: &Config) -> Box<dyn NoteSink + Send> {
    info!("built without the midi feature, note events go nowhere");
    Box::new(NullSink)
}
