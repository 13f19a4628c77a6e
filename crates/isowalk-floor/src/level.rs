//! Floor layouts written as text.
//!
//! A level is drawn the way it looks on screen. Each line is a row of iso
//! Y, each character a column of iso X:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` or space | no tile |
//! | `0`..=`9` | tile raised by that many units |
//! | `S` | player start, height 0 |
//! | `W` | winning tile, height 0 |
//! | `C` | tile the player crouches on, height 0 |
//!
//! A tile of height `h` drawn at column `c`, row `r` sits at world position
//! `(c + h, h, r + h)`, which projects straight back to iso `(c, r)`. Tiles
//! at very different heights can therefore still be neighbours on screen.

use std::fmt;

use isowalk_core::Vec3;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::graph::FloorGraph;
use crate::tile::FloorTile;

/// Where a tile was drawn in the level text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelCell {
    pub column: usize,
    pub row: usize,
}

/// One tile of a level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSpec {
    pub cell: LevelCell,
    pub pos: Vec3,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crouchy: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub winner: bool,
}

impl TileSpec {
    fn to_tile(&self) -> FloorTile<LevelCell> {
        FloorTile::new(self.pos, self.cell)
            .with_crouchy(self.crouchy)
            .with_winner(self.winner)
    }
}

/// A parsed floor layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLevel"))]
pub struct Level {
    tiles: Vec<TileSpec>,
    /// Index into `tiles` of the start tile.
    start: usize,
}

/// Serialized form of a [`Level`], checked on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLevel {
    tiles: Vec<TileSpec>,
    start: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLevel> for Level {
    type Error = LevelError;

    fn try_from(raw: RawLevel) -> Result<Self, Self::Error> {
        if raw.tiles.is_empty() {
            return Err(LevelError::Empty);
        }
        if raw.start >= raw.tiles.len() {
            return Err(LevelError::MissingStart);
        }
        Ok(Self {
            tiles: raw.tiles,
            start: raw.start,
        })
    }
}

impl Level {
    /// Parse a level from its text layout. See the module docs for the
    /// format. Blank lines before and after the layout are ignored.
    pub fn parse(s: &str) -> Result<Self, LevelError> {
        let s = s.trim_matches(|c: char| c == '\n' || c == '\r');
        let mut tiles = Vec::new();
        let mut start = None;

        for (row, line) in s.lines().enumerate() {
            for (column, ch) in line.chars().enumerate() {
                let cell = LevelCell { column, row };
                let (height, crouchy, winner) = match ch {
                    '.' | ' ' => continue,
                    '0'..='9' => (ch as u32 - '0' as u32, false, false),
                    'S' => {
                        if start.is_some() {
                            return Err(LevelError::MultipleStarts(cell));
                        }
                        start = Some(tiles.len());
                        (0, false, false)
                    }
                    'W' => (0, false, true),
                    'C' => (0, true, false),
                    _ => return Err(LevelError::InvalidRune { ch, cell }),
                };
                let h = height as f32;
                tiles.push(TileSpec {
                    cell,
                    pos: Vec3::new(column as f32 + h, h, row as f32 + h),
                    crouchy,
                    winner,
                });
            }
        }

        if tiles.is_empty() {
            return Err(LevelError::Empty);
        }
        let start = start.ok_or(LevelError::MissingStart)?;
        Ok(Self { tiles, start })
    }

    pub fn tiles(&self) -> &[TileSpec] {
        &self.tiles
    }

    /// The tile the player starts on.
    pub fn start(&self) -> &TileSpec {
        &self.tiles[self.start]
    }

    /// The first winning tile, if the level has one.
    pub fn winner(&self) -> Option<&TileSpec> {
        self.tiles.iter().find(|t| t.winner)
    }

    /// Build the floor graph, inserting tiles in shuffled order the way a
    /// scene registers its tiles in no particular order.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> FloorGraph<LevelCell> {
        let mut order: Vec<usize> = (0..self.tiles.len()).collect();
        order.shuffle(rng);
        self.build_in_order(order)
    }

    /// Build the floor graph inserting tiles in layout order.
    pub fn build_ordered(&self) -> FloorGraph<LevelCell> {
        self.build_in_order(0..self.tiles.len())
    }

    fn build_in_order(&self, order: impl IntoIterator<Item = usize>) -> FloorGraph<LevelCell> {
        let mut graph = FloorGraph::new();
        for i in order {
            graph.insert_tile(self.tiles[i].to_tile());
        }
        log::debug!(
            "built level: {} tiles, {} connections",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}

/// Errors that can occur when parsing a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// A character outside the level alphabet.
    InvalidRune { ch: char, cell: LevelCell },
    /// More than one `S`.
    MultipleStarts(LevelCell),
    /// No `S`.
    MissingStart,
    /// No tiles at all.
    Empty,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRune { ch, cell } => write!(
                f,
                "level contains invalid rune \u{201c}{ch}\u{201d} at column {}, row {}",
                cell.column, cell.row
            ),
            Self::MultipleStarts(cell) => write!(
                f,
                "level has a second start tile at column {}, row {}",
                cell.column, cell.row
            ),
            Self::MissingStart => write!(f, "level has no start tile"),
            Self::Empty => write!(f, "level has no tiles"),
        }
    }
}

impl std::error::Error for LevelError {}

#[cfg(test)]
mod tests {
    use super::*;
    use isowalk_core::IsoPoint;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const STAIRS: &str = "
S0..
.1..
.2.C
.345W
";

    #[test]
    fn parse_positions_and_flags() {
        let level = Level::parse(STAIRS).unwrap();
        assert_eq!(level.tiles().len(), 9);

        let start = level.start();
        assert_eq!(start.cell, LevelCell { column: 0, row: 0 });
        assert_eq!(start.pos, Vec3::ZERO);

        let raised = level
            .tiles()
            .iter()
            .find(|t| t.cell == LevelCell { column: 3, row: 3 })
            .unwrap();
        assert_eq!(raised.pos, Vec3::new(8.0, 5.0, 8.0));
        // Drawn position is the iso position.
        assert_eq!(raised.pos.to_iso(), IsoPoint::new(3.0, 3.0));

        let winner = level.winner().unwrap();
        assert_eq!(winner.cell, LevelCell { column: 4, row: 3 });
        assert!(level.tiles().iter().any(|t| t.crouchy));
    }

    #[test]
    fn invalid_rune() {
        let err = Level::parse("S0\n0x").unwrap_err();
        assert_eq!(
            err,
            LevelError::InvalidRune {
                ch: 'x',
                cell: LevelCell { column: 1, row: 1 }
            }
        );
        assert!(err.to_string().contains("column 1, row 1"));
    }

    #[test]
    fn start_required_and_unique() {
        assert_eq!(Level::parse("000"), Err(LevelError::MissingStart));
        assert_eq!(
            Level::parse("S0S"),
            Err(LevelError::MultipleStarts(LevelCell { column: 2, row: 0 }))
        );
        assert_eq!(Level::parse("\n...\n"), Err(LevelError::Empty));
    }

    #[test]
    fn crlf_layout() {
        let level = Level::parse("\r\nS0\r\n.W\r\n").unwrap();
        assert_eq!(level.start().cell, LevelCell { column: 0, row: 0 });
        assert_eq!(level.winner().unwrap().cell, LevelCell { column: 1, row: 1 });
        assert_eq!(level.tiles().len(), 3);
    }

    #[test]
    fn build_connects_screen_neighbours() {
        let level = Level::parse(STAIRS).unwrap();
        let graph = level.build_ordered();
        assert_eq!(graph.node_count(), 9);

        let start = graph.find_nearest_node(level.start().pos).unwrap();
        let goal = graph
            .tiles()
            .iter()
            .find(|t| t.is_winner())
            .map(|t| t.id())
            .unwrap();
        let path = graph.find_path(start, goal);
        let cells: Vec<_> = path.iter().map(|t| *t.identity()).collect();
        let expect = [(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (2, 3), (3, 3), (4, 3)];
        let expect: Vec<_> = expect
            .iter()
            .map(|&(column, row)| LevelCell { column, row })
            .collect();
        assert_eq!(cells, expect);
    }

    #[test]
    fn shuffled_build_has_same_edges() {
        let level = Level::parse(STAIRS).unwrap();
        let ordered = level.build_ordered();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = level.build(&mut rng);
        assert_eq!(ordered.edge_count(), shuffled.edge_count());

        let cell_edges = |g: &FloorGraph<LevelCell>| {
            let mut edges = Vec::new();
            for a in g.tiles() {
                for &b in g.connections().neighbors(a.id()) {
                    let b = g.tile(b).unwrap();
                    edges.push((*a.identity(), *b.identity()));
                }
            }
            edges.sort();
            edges
        };
        assert_eq!(cell_edges(&ordered), cell_edges(&shuffled));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn level_round_trip() {
        let level = Level::parse("S1W").unwrap();
        let json = serde_json::to_string(&level).unwrap();
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(level, back);
    }

    #[test]
    fn rejects_empty_level() {
        let err = serde_json::from_str::<Level>(r#"{"tiles":[],"start":0}"#).unwrap_err();
        assert!(err.to_string().contains("no tiles"), "{err}");
    }

    #[test]
    fn rejects_start_out_of_range() {
        let json = r#"{"tiles":[{"cell":{"column":0,"row":0},"pos":{"x":0.0,"y":0.0,"z":0.0}}],"start":1}"#;
        let err = serde_json::from_str::<Level>(json).unwrap_err();
        assert!(err.to_string().contains("no start tile"), "{err}");
    }
}
