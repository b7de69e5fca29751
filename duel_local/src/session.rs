//! Local play session: runs rounds of the duel from an input source

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use duel_core::{Config, Match, Params, Side};
use tracing::{debug, info, warn};

use crate::fsm::{FsmState, SessionAction, SessionFsm};
use crate::input::InputSource;
use crate::sink::LogSink;

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub rounds: u32,
    pub max_frames: u64,
    pub realtime: bool,
}

/// Outcome of one round; `winner` is `None` when the frame limit ran out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    pub winner: Option<Side>,
    pub frames: u64,
    pub shots: [usize; 2],
    pub hits: [usize; 2],
}

pub struct Session<I> {
    game: Match,
    input: I,
    sink: LogSink,
    fsm: SessionFsm,
    options: SessionOptions,
}

impl<I: InputSource> Session<I> {
    pub fn new(config: Config, input: I, options: SessionOptions) -> Result<Self> {
        let mut sink = LogSink::new();
        let game = Match::new(config, &mut sink)?;
        Ok(Self {
            game,
            input,
            sink,
            fsm: SessionFsm::new(),
            options,
        })
    }

    pub fn run(&mut self) -> Vec<RoundSummary> {
        let mut summaries = Vec::new();
        for round in 1..=self.options.rounds {
            self.begin_round(round);
            let summary = self.play_round(round);
            self.end_round(&summary);
            summaries.push(summary);
        }

        if self.fsm.can_transition(SessionAction::Quit) {
            self.fsm.transition(SessionAction::Quit);
        }
        summaries
    }

    pub fn fsm_state(&self) -> FsmState {
        self.fsm.state()
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    fn begin_round(&mut self, round: u32) {
        if round > 1 {
            self.game.restart(&mut self.sink);
        }
        let action = if self.fsm.is_game_over() {
            SessionAction::PlayAgain
        } else {
            SessionAction::Start
        };
        let result = self.fsm.transition(action);
        if result.success {
            debug!(action = ?result.action, to = ?result.to_state, "session transition");
        } else {
            warn!(?action, from = ?result.from_state, "session transition rejected");
        }
        info!(round, "round started");
    }

    fn play_round(&mut self, round: u32) -> RoundSummary {
        let frame_time = Duration::from_secs_f64(1.0 / Params::FPS as f64);
        let mut shots = [0; 2];
        let mut hits = [0; 2];

        while self.game.frame() < self.options.max_frames {
            let started = Instant::now();
            let input = self.input.next_frame();
            let state = self.game.step(&input, &mut self.sink);

            for side in Side::ALL {
                shots[side.index()] += self.game.events().shots_by(side);
                hits[side.index()] += self.game.events().hits_by(side);
            }
            if state.is_over() {
                break;
            }

            if self.options.realtime {
                thread::sleep(frame_time.saturating_sub(started.elapsed()));
            }
        }

        RoundSummary {
            round,
            winner: self.game.state().winner(),
            frames: self.game.frame(),
            shots,
            hits,
        }
    }

    fn end_round(&mut self, summary: &RoundSummary) {
        match summary.winner {
            Some(winner) => {
                self.fsm.transition(SessionAction::GameOver);
                info!(banner = winner.win_banner(), "game over");
            }
            None => {
                self.fsm.transition(SessionAction::Quit);
                info!(frames = summary.frames, "frame limit reached, round undecided");
            }
        }

        info!(
            round = summary.round,
            winner = ?summary.winner,
            frames = summary.frames,
            yellow_shots = summary.shots[Side::Yellow.index()],
            red_shots = summary.shots[Side::Red.index()],
            yellow_hits = summary.hits[Side::Yellow.index()],
            red_hits = summary.hits[Side::Red.index()],
            "round summary"
        );
    }
}
