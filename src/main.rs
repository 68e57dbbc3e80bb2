//! Slide Merge headless driver
//!
//! Plays scripted swipes against the kinematic physics stand-in until the
//! board locks up, then reports the run.
//!
//! Usage: `slide-merge [settings.json] [max-swipes]`

use std::path::Path;

use glam::Vec2;

use slide_merge::consts::FRAME_DT;
use slide_merge::platform::{Audio, Collaborators, KinematicWorld, ScoreSink, Visuals};
use slide_merge::sim::{CellIndex, Direction, Gesture, TileId};
use slide_merge::{GameState, Settings, TickInput, tick};

const DEFAULT_MAX_SWIPES: u32 = 500;
/// Swipe order; Back and Forward alternate with the horizontal pushes
const SCRIPT: [Direction; 4] = [
    Direction::Left,
    Direction::Back,
    Direction::Right,
    Direction::Forward,
];
/// Hard stop in case a cycle never settles
const MAX_FRAMES: u64 = 1_000_000;

/// Running score
#[derive(Debug, Default)]
struct Tally {
    score: u64,
}

impl ScoreSink for Tally {
    fn add_score(&mut self, delta: u32) {
        self.score += delta as u64;
    }
}

/// Logs what a renderer would be told
#[derive(Debug, Default)]
struct TileLog {
    game_over: bool,
}

impl Visuals for TileLog {
    fn on_spawn(&mut self, id: TileId, cell: CellIndex, value: u8) {
        log::debug!("tile {} spawned on cell {} (value {})", id, cell, value);
    }

    fn on_value_changed(&mut self, id: TileId, value: u8) {
        log::debug!("tile {} is now {}", id, 1u64 << value);
    }

    fn on_lost(&mut self, id: TileId) {
        log::debug!("tile {} lost", id);
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
    }
}

/// Counts audio cues
#[derive(Debug, Default)]
struct Cues {
    merges: u32,
    collisions: u32,
}

impl Audio for Cues {
    fn on_collision(&mut self, pitch: f32) {
        self.collisions += 1;
        log::trace!("collision cue (pitch {:.2})", pitch);
    }

    fn on_merge(&mut self, pitch: f32) {
        self.merges += 1;
        log::trace!("merge cue (pitch {:.2})", pitch);
    }
}

fn gesture_for(direction: Direction) -> Gesture {
    Gesture::new(Vec2::ZERO, direction.unit() * 200.0)
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Slide Merge (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let max_swipes = match args.next().map(|s| s.parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad swipe count ({}), using {}", e, DEFAULT_MAX_SWIPES);
            DEFAULT_MAX_SWIPES
        }
        None => DEFAULT_MAX_SWIPES,
    };

    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!(
        "Game initialized with seed: {} ({:.1}s per settle cycle)",
        seed,
        settings.cycle_duration()
    );

    let mut state = GameState::new(seed, settings);
    let mut world = KinematicWorld::new();
    let mut tally = Tally::default();
    let mut tiles = TileLog::default();
    let mut cues = Cues::default();
    let mut swipes = 0u32;

    for _ in 0..MAX_FRAMES {
        world.step(FRAME_DT);

        let mut input = TickInput::default();
        if state.accepts_input() && swipes < max_swipes {
            input.gesture = Some(gesture_for(SCRIPT[swipes as usize % SCRIPT.len()]));
            swipes += 1;
        }

        let mut out = Collaborators {
            physics: &mut world,
            score: &mut tally,
            visuals: &mut tiles,
            audio: &mut cues,
        };
        tick(&mut state, &input, FRAME_DT, &mut out);

        if tiles.game_over || (swipes >= max_swipes && state.accepts_input()) {
            break;
        }
    }

    let best = state.board.tiles().map(|t| t.magnitude()).max().unwrap_or(0);
    log::info!(
        "Run over after {} swipe(s), {} cycle(s): score {}, best tile {}, {} merge(s), {} collision(s){}",
        swipes,
        state.cycles,
        tally.score,
        best,
        cues.merges,
        cues.collisions,
        if tiles.game_over { ", game over" } else { "" }
    );
}
