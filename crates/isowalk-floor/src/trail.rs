//! Following a found path one waypoint at a time.
//!
//! A [`Trail`] only tracks where the walker is and which tile it heads for.
//! Bouncing, crouch scaling and rotation easing belong to whatever draws
//! the walker; the trail reports the state they are driven from.

use isowalk_core::{IsoPoint, Vec3, desired_yaw_degrees};
use isowalk_paths::NodeId;

use crate::tile::FloorTile;

/// Tuning for [`Trail`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WalkConfig {
    /// Screen-space speed, in tiles per second.
    pub speed: f32,
    /// A waypoint counts as reached once the walker is this close to it in
    /// iso space, on both axes.
    pub arrive_epsilon: f32,
    /// Squared 3D distance below which the walker is already on the
    /// waypoint and does not turn towards it.
    pub min_move_sq: f32,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            arrive_epsilon: 0.1,
            min_move_sq: 0.01,
        }
    }
}

/// What happened during one [`Trail::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Still on the way to the current waypoint.
    Moving,
    /// Arrived at a waypoint and turned towards the next one.
    Reached(NodeId),
    /// Arrived at the last waypoint. Returned again by every later step.
    Finished { tile: NodeId, winner: bool },
}

#[derive(Debug, Clone, Copy)]
struct Waypoint {
    id: NodeId,
    pos: Vec3,
    iso: IsoPoint,
    crouchy: bool,
    winner: bool,
}

impl<T> From<&FloorTile<T>> for Waypoint {
    fn from(tile: &FloorTile<T>) -> Self {
        Self {
            id: tile.id(),
            pos: tile.pos(),
            iso: tile.iso(),
            crouchy: tile.is_crouchy(),
            winner: tile.is_winner(),
        }
    }
}

/// A walker moving along a path of floor tiles.
///
/// Movement is a straight line in 3D between waypoints, scaled so that each
/// hop takes the same time however far apart the two tiles are in 3D:
/// neighbours on screen can be distant in the world. Arrival is judged in
/// iso space, and overshooting a waypoint counts as reaching it.
#[derive(Debug, Clone)]
pub struct Trail {
    waypoints: Vec<Waypoint>,
    /// Index of the waypoint after the current target.
    next: usize,
    pos: Vec3,
    direction: Vec3,
    speed_compensation: f32,
    prev_sq_dist: f32,
    yaw: f32,
    finished: Option<StepEvent>,
    config: WalkConfig,
}

impl Trail {
    /// Start walking from `start` along `path`. `None` for an empty path.
    pub fn new<T>(start: Vec3, path: &[&FloorTile<T>], config: WalkConfig) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        let mut trail = Self {
            waypoints: path.iter().map(|&t| Waypoint::from(t)).collect(),
            next: 0,
            pos: start,
            direction: Vec3::ZERO,
            speed_compensation: 1.0,
            prev_sq_dist: 0.0,
            yaw: 0.0,
            finished: None,
            config,
        };
        trail.advance();
        Some(trail)
    }

    /// Current world position.
    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// Heading the walker should turn to, in degrees about the Y axis.
    #[inline]
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw
    }

    /// Tile currently walked towards, `None` once finished.
    pub fn target(&self) -> Option<NodeId> {
        if self.finished.is_some() {
            return None;
        }
        self.current().map(|w| w.id)
    }

    /// Whether the tile being walked to asks for a crouch.
    pub fn is_crouching(&self) -> bool {
        self.finished.is_none() && self.current().is_some_and(|w| w.crouchy)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Waypoints not yet reached, the current target included.
    pub fn remaining(&self) -> usize {
        if self.finished.is_some() {
            0
        } else {
            self.waypoints.len() + 1 - self.next
        }
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepEvent {
        if let Some(done) = self.finished {
            return done;
        }
        let Some(target) = self.current() else {
            return StepEvent::Moving;
        };

        self.pos = self.pos + self.direction * (self.config.speed * self.speed_compensation * dt);

        let iso_current = self.pos.to_iso();
        let sq_dist = iso_current.distance_squared(target.iso);
        if iso_current.very_close(target.iso, self.config.arrive_epsilon)
            || sq_dist > self.prev_sq_dist
        {
            self.pos = target.pos;
            self.direction = Vec3::ZERO;
            if self.advance() {
                log::trace!("trail reached tile {}", target.id);
                StepEvent::Reached(target.id)
            } else {
                let done = StepEvent::Finished {
                    tile: target.id,
                    winner: target.winner,
                };
                log::debug!("trail finished on tile {} (winner: {})", target.id, target.winner);
                self.finished = Some(done);
                done
            }
        } else {
            self.prev_sq_dist = sq_dist;
            StepEvent::Moving
        }
    }

    fn current(&self) -> Option<Waypoint> {
        self.next.checked_sub(1).and_then(|i| self.waypoints.get(i).copied())
    }

    /// Head for the next waypoint. `false` when there is none left.
    fn advance(&mut self) -> bool {
        let Some(&wp) = self.waypoints.get(self.next) else {
            return false;
        };
        self.next += 1;

        self.direction = wp.pos - self.pos;
        self.prev_sq_dist = self.pos.to_iso().distance_squared(wp.iso);
        if self.direction.length_squared() > self.config.min_move_sq {
            self.speed_compensation = self.direction.length();
            self.direction = self.direction.normalized();
        }

        // Face along the screen-space segment leaving this waypoint.
        if let Some(after) = self.waypoints.get(self.next) {
            let dir = after.iso - wp.iso;
            self.yaw = desired_yaw_degrees(Vec3::new(dir.x, 0.0, dir.y));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FloorGraph;
    use isowalk_core::{DEFAULT_EPSILON, very_close};

    const MAX_STEPS: usize = 1000;

    /// Step until finished, returning every non-`Moving` event.
    fn walk(trail: &mut Trail, dt: f32) -> Vec<StepEvent> {
        let mut events = Vec::new();
        for _ in 0..MAX_STEPS {
            match trail.step(dt) {
                StepEvent::Moving => {}
                e @ StepEvent::Reached(_) => events.push(e),
                e @ StepEvent::Finished { .. } => {
                    events.push(e);
                    return events;
                }
            }
        }
        panic!("trail did not finish in {MAX_STEPS} steps");
    }

    fn line() -> FloorGraph<()> {
        let mut g = FloorGraph::new();
        g.insert_node(Vec3::new(0.0, 0.0, 0.0), ());
        g.insert_node(Vec3::new(1.0, 0.0, 0.0), ());
        g.insert_tile(FloorTile::new(Vec3::new(2.0, 0.0, 0.0), ()).with_winner(true));
        g
    }

    #[test]
    fn empty_path_has_no_trail() {
        let path: Vec<&FloorTile<()>> = Vec::new();
        assert!(Trail::new(Vec3::ZERO, &path, WalkConfig::default()).is_none());
    }

    #[test]
    fn walks_every_waypoint_in_order() {
        let g = line();
        let path = g.find_path(0, 2);
        let mut trail = Trail::new(Vec3::ZERO, &path, WalkConfig::default()).unwrap();
        assert_eq!(trail.target(), Some(0));
        assert_eq!(trail.remaining(), 3);

        let events = walk(&mut trail, 0.05);
        assert_eq!(
            events,
            vec![
                StepEvent::Reached(0),
                StepEvent::Reached(1),
                StepEvent::Finished {
                    tile: 2,
                    winner: true
                },
            ]
        );
        assert_eq!(trail.pos(), Vec3::new(2.0, 0.0, 0.0));
        assert!(trail.is_finished());
        assert_eq!(trail.target(), None);
        assert_eq!(trail.remaining(), 0);
        // Finished is sticky.
        assert_eq!(
            trail.step(0.05),
            StepEvent::Finished {
                tile: 2,
                winner: true
            }
        );
    }

    #[test]
    fn overshoot_counts_as_arrival() {
        let g = line();
        let path = g.find_path(1, 2);
        let mut trail = Trail::new(Vec3::new(1.0, 0.0, 0.0), &path, WalkConfig::default()).unwrap();
        assert_eq!(trail.step(1.0), StepEvent::Reached(1));
        // One second at 3 tiles/s jumps far past the next tile.
        assert_eq!(
            trail.step(1.0),
            StepEvent::Finished {
                tile: 2,
                winner: true
            }
        );
        assert_eq!(trail.pos(), Vec3::new(2.0, 0.0, 0.0));
    }

    fn steps_for_hop(to: Vec3) -> usize {
        let mut g = FloorGraph::new();
        g.insert_node(Vec3::ZERO, ());
        g.insert_node(to, ());
        assert!(g.are_connected(0, 1));
        let path = g.find_path(0, 1);
        let mut trail = Trail::new(Vec3::ZERO, &path, WalkConfig::default()).unwrap();
        assert_eq!(trail.step(0.01), StepEvent::Reached(0));
        for n in 1..MAX_STEPS {
            if let StepEvent::Finished { .. } = trail.step(0.01) {
                return n;
            }
        }
        panic!("hop to {to} never finished");
    }

    #[test]
    fn hop_time_independent_of_world_distance() {
        // Both project to iso (1, 0); the second is much further in 3D.
        let near = steps_for_hop(Vec3::new(1.0, 0.0, 0.0));
        let far = steps_for_hop(Vec3::new(6.0, 5.0, 5.0));
        assert!(near.abs_diff(far) <= 1, "near {near}, far {far}");
    }

    #[test]
    fn heading_follows_screen_direction() {
        let mut g = FloorGraph::new();
        g.insert_node(Vec3::new(0.0, 0.0, 0.0), ());
        g.insert_node(Vec3::new(1.0, 0.0, 0.0), ());
        g.insert_node(Vec3::new(1.0, 0.0, 1.0), ());
        let path = g.find_path(0, 2);
        let mut trail = Trail::new(Vec3::ZERO, &path, WalkConfig::default()).unwrap();
        // Heading out of tile 0 is +X.
        assert!(very_close(trail.yaw_degrees(), 90.0, DEFAULT_EPSILON));
        assert_eq!(trail.step(0.01), StepEvent::Reached(0));
        // Heading out of tile 1 is +Z.
        assert!(very_close(trail.yaw_degrees(), 0.0, DEFAULT_EPSILON));
    }

    #[test]
    fn crouch_follows_target_tile() {
        let mut g = FloorGraph::new();
        g.insert_node(Vec3::ZERO, ());
        g.insert_tile(FloorTile::new(Vec3::new(0.0, 0.0, 1.0), ()).with_crouchy(true));
        let path = g.find_path(0, 1);
        let mut trail = Trail::new(Vec3::ZERO, &path, WalkConfig::default()).unwrap();
        assert!(!trail.is_crouching());
        assert_eq!(trail.step(0.01), StepEvent::Reached(0));
        assert!(trail.is_crouching());
        walk(&mut trail, 0.01);
        assert!(!trail.is_crouching());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: WalkConfig = serde_json::from_str(r#"{"speed": 5.0}"#).unwrap();
        assert_eq!(cfg.speed, 5.0);
        assert_eq!(cfg.arrive_epsilon, WalkConfig::default().arrive_epsilon);
    }
}
