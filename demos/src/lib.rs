//! Headless walking session shared by the demo binaries.
//!
//! A [`Session`] owns one floor for the lifetime of a loaded level: the
//! graph is built when the level loads, queried for every walk, and
//! dropped with the session.

use isowalk_core::Vec3;
use isowalk_floor::{FloorGraph, Level, LevelCell, StepEvent, Trail, WalkConfig};
use isowalk_paths::NodeId;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The level walked when none is given on the command line.
pub const DEMO_LEVEL: &str = include_str!("../levels/stairs.txt");

/// Simulation step, in seconds.
pub const STEP_DT: f32 = 1.0 / 60.0;

const MAX_STEPS: usize = 100_000;

/// Outcome of one [`Session::walk_to`].
#[derive(Debug, Clone, PartialEq)]
pub struct WalkReport {
    /// Tiles visited, start and destination included.
    pub path: Vec<LevelCell>,
    /// Simulation steps taken.
    pub steps: usize,
    /// Whether the walk ended on a winning tile.
    pub won: bool,
}

/// A loaded level and the player walking on it.
pub struct Session {
    level: Level,
    floor: FloorGraph<LevelCell>,
    player: Vec3,
    config: WalkConfig,
}

impl Session {
    /// Load `level`, registering its tiles in an order drawn from `seed`.
    pub fn new(level: Level, seed: u64, config: WalkConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let floor = level.build(&mut rng);
        let player = level.start().pos;
        Self {
            level,
            floor,
            player,
            config,
        }
    }

    pub fn floor(&self) -> &FloorGraph<LevelCell> {
        &self.floor
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Current player position.
    pub fn player(&self) -> Vec3 {
        self.player
    }

    /// The tile the player stands on, judged on screen.
    pub fn player_tile(&self) -> Option<NodeId> {
        self.floor.find_nearest_node(self.player)
    }

    /// Node ID of the tile drawn at `cell`.
    pub fn tile_at(&self, cell: LevelCell) -> Option<NodeId> {
        self.floor
            .tiles()
            .iter()
            .find(|t| *t.identity() == cell)
            .map(|t| t.id())
    }

    /// Node ID of the first winning tile.
    pub fn winning_tile(&self) -> Option<NodeId> {
        self.floor
            .tiles()
            .iter()
            .find(|t| t.is_winner())
            .map(|t| t.id())
    }

    /// Walk the player to tile `to`, stepping the simulation until it
    /// arrives. `None` when there is no path, leaving the player in place.
    pub fn walk_to(&mut self, to: NodeId) -> Option<WalkReport> {
        let tiles = self.floor.path_to_tile(self.player, to);
        let path: Vec<LevelCell> = tiles.iter().map(|t| *t.identity()).collect();
        let mut trail = Trail::new(self.player, &tiles, self.config)?;

        let mut won = false;
        let mut steps = 0;
        while steps < MAX_STEPS {
            steps += 1;
            match trail.step(STEP_DT) {
                StepEvent::Moving | StepEvent::Reached(_) => {}
                StepEvent::Finished { winner, .. } => {
                    won = winner;
                    break;
                }
            }
        }
        if !trail.is_finished() {
            log::warn!("walk to tile {to} cut short after {MAX_STEPS} steps");
        }
        self.player = trail.pos();
        Some(WalkReport { path, steps, won })
    }

    /// Put the player back on the start tile.
    pub fn restart(&mut self) {
        self.player = self.level.start().pos;
    }
}

/// Draw the level with `path` marked as `*` and the player as `@`.
pub fn render(level: &Level, path: &[LevelCell], player: Option<LevelCell>) -> String {
    let width = level.tiles().iter().map(|t| t.cell.column + 1).max().unwrap_or(0);
    let height = level.tiles().iter().map(|t| t.cell.row + 1).max().unwrap_or(0);
    let mut rows = vec![vec!['.'; width]; height];

    for t in level.tiles() {
        let ch = if t.winner {
            'W'
        } else if t.crouchy {
            'C'
        } else {
            'o'
        };
        rows[t.cell.row][t.cell.column] = ch;
    }
    for cell in path {
        rows[cell.row][cell.column] = '*';
    }
    if let Some(cell) = player {
        rows[cell.row][cell.column] = '@';
    }

    let mut out = String::new();
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Parse a level from a file's contents: JSON when `json` is set,
/// otherwise the text layout.
pub fn load_level(contents: &str, json: bool) -> Result<Level, Box<dyn std::error::Error>> {
    if json {
        Ok(serde_json::from_str(contents)?)
    } else {
        Ok(Level::parse(contents)?)
    }
}
