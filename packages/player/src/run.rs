//! Play-state for one attempt at a parcour

use crate::PlayerModel;
use glam::Vec3;

/// How close to the end marker counts as finishing
const GOAL_RADIUS: f32 = 0.75;

/// One attempt: spawn at the start, finish by reaching the end marker.
///
/// Movement itself is simulated by the host; the run only tracks the
/// authoritative position it is fed and answers the goal check.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    start: Vec3,
    goal: Option<Vec3>,
    position: Vec3,
}

impl Run {
    pub fn new(model: &PlayerModel) -> Self {
        Self {
            start: model.start,
            goal: model.end,
            position: model.start,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Host feeds the simulated position each tick
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Back to the start marker (fell off, or restart requested)
    pub fn respawn(&mut self) {
        self.position = self.start;
    }

    /// True once the player is within reach of the end marker. A parcour
    /// without an end marker can never be finished.
    pub fn reached_goal(&self) -> bool {
        match self.goal {
            Some(goal) => self.position.distance(goal) <= GOAL_RADIUS,
            None => false,
        }
    }
}
