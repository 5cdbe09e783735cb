//! Single-consumer event loop.
//!
//! Key presses and timer ticks are multiplexed onto one channel. The driver
//! folds each signal through the reducer in arrival order and hands every new
//! state to the renderer.

use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;

use crate::game::{GameState, Input};
use crate::journal::{Journal, TransitionRecord};
use crate::rng::RngStream;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    Input(Input),
    Tick,
    Quit,
}

/// Side-effecting consumer of game states.
pub trait Renderer {
    fn render(&mut self, state: &GameState) -> Result<()>;
}

pub struct Driver<R: Renderer> {
    state: GameState,
    rng: RngStream,
    latest_random: Option<f64>,
    renderer: R,
    journal: Option<Journal>,
    steps: u64,
}

impl<R: Renderer> Driver<R> {
    pub fn new(seed: u32, renderer: R) -> Self {
        Self {
            state: GameState::new(),
            rng: RngStream::new(seed),
            latest_random: None,
            renderer,
            journal: None,
            steps: 0,
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn latest_random(&self) -> Option<f64> {
        self.latest_random
    }

    /// Folds one signal. A tick advances the generator and then applies
    /// gravity; inputs use whatever value the generator produced last and are
    /// dropped until the first tick has produced one.
    pub fn handle(&mut self, signal: Signal) -> Result<ControlFlow<()>> {
        let input = match signal {
            Signal::Quit => return Ok(ControlFlow::Break(())),
            Signal::Tick => {
                self.latest_random = Some(self.rng.pull());
                Input::Down
            }
            Signal::Input(input) => input,
        };

        let Some(random) = self.latest_random else {
            return Ok(ControlFlow::Continue(()));
        };

        let (next, event) = self.state.step_with_event(input, random);
        self.state = next;
        self.steps += 1;

        if let Some(journal) = self.journal.as_mut() {
            journal.record(&TransitionRecord::new(self.steps, input, event, random, &self.state))?;
        }
        self.renderer.render(&self.state)?;
        Ok(ControlFlow::Continue(()))
    }

    /// Renders the initial state, then consumes signals until `Quit` or until
    /// every sender is gone.
    pub fn run(&mut self, signals: &Receiver<Signal>) -> Result<()> {
        self.renderer.render(&self.state)?;
        while let Ok(signal) = signals.recv() {
            if self.handle(signal)?.is_break() {
                break;
            }
        }
        Ok(())
    }
}

/// Sends `Signal::Tick` every `period` until the receiver hangs up.
pub fn spawn_ticker(tx: Sender<Signal>, period: Duration) -> JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(period);
        if tx.send(Signal::Tick).is_err() {
            break;
        }
    })
}
