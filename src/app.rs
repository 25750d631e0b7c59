use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;
use crate::config::ThresholdsConfig;
use crate::event::Event;
use crate::system::network::NetworkBaseline;
use crate::system::sampler::Sampler;
use crate::system::snapshot::Sample;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Loop controller: owns the sampler, the latest sample and the network
/// baseline carried between ticks.
pub struct App {
    pub state: LoopState,
    pub sample: Option<Sample>,
    pub last_error: Option<String>,
    pub thresholds: ThresholdsConfig,
    pub theme: Theme,
    pub ticks: u64,
    sampler: Sampler,
    baseline: NetworkBaseline,
}

impl App {
    pub fn new(mut sampler: Sampler, thresholds: ThresholdsConfig) -> Self {
        let baseline = sampler.baseline();
        App {
            state: LoopState::Running,
            sample: None,
            last_error: None,
            thresholds,
            theme: Theme::default(),
            ticks: 0,
            sampler,
            baseline,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// One sampling step. A failed tick is logged and kept for the footer;
    /// the previous sample stays on screen and the loop carries on.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        self.ticks += 1;
        let _span = tracing::debug_span!("app.tick", tick = self.ticks).entered();

        match self.sampler.sample(&self.baseline) {
            Ok((sample, baseline)) => {
                self.sample = Some(sample);
                self.baseline = baseline;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, tick = self.ticks, "tick skipped");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn interrupt(&mut self) {
        if self.state == LoopState::Running {
            tracing::info!(ticks = self.ticks, "interrupted, stopping");
        }
        self.state = LoopState::Stopped;
    }

    /// Applies one loop event. A failed input stream stops the loop and is
    /// returned as an error so the program does not exit as if asked to.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.map_key(key);
                self.dispatch(action);
            }
            Event::Key(_) | Event::Resize => {}
            Event::Tick => self.tick(),
            Event::Interrupt => self.interrupt(),
            Event::Error(reason) => {
                tracing::error!(%reason, "terminal input failed");
                self.state = LoopState::Stopped;
                return Err(eyre!("terminal input failed: {reason}"));
            }
        }
        Ok(())
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.interrupt(),
            Action::Refresh => self.tick(),
            Action::None => {}
        }
    }
}
