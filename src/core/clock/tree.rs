//=========================================================================
// Clock Tree
//=========================================================================
//
// Arena of clocks addressed by ClockId. The root exists for the tree's
// whole lifetime; ids are never reused.
//
// Frame lifecycle: tick() once → query any clock
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::node::Clock;
use super::{ClockConfig, ClockError};

//=== ClockId =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockId(usize);

//=== ClockTree ===========================================================

pub struct ClockTree {
    nodes: Vec<Option<Clock>>,
    config: ClockConfig,
    last_tick: Instant,
}

impl ClockTree {
    const ROOT: ClockId = ClockId(0);

    pub fn new(config: ClockConfig) -> Self {
        assert!(
            config.nominal_frame_seconds > 0.0,
            "Nominal frame time must be positive"
        );
        assert!(
            config.max_delta_seconds > 0.0,
            "Max delta must be positive"
        );

        Self {
            nodes: vec![Some(Clock::new(None))],
            config,
            last_tick: Instant::now(),
        }
    }

    pub fn root(&self) -> ClockId {
        Self::ROOT
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    //--- Structure --------------------------------------------------------

    /// Creates a running clock with scale 1 under `parent`.
    pub fn create_child(&mut self, parent: ClockId) -> Result<ClockId, ClockError> {
        if !self.contains(parent) {
            return Err(ClockError::UnknownClock(parent));
        }

        let id = ClockId(self.nodes.len());
        self.nodes.push(Some(Clock::new(Some(parent))));
        if let Some(parent_clock) = self.node_mut(parent) {
            parent_clock.children.push(id);
        }

        debug!(target: "clock", "Created {:?} under {:?}", id, parent);
        Ok(id)
    }

    /// Removes `id`; its children are re-attached to its parent.
    pub fn remove(&mut self, id: ClockId) -> Result<(), ClockError> {
        if id == Self::ROOT {
            return Err(ClockError::RemoveRoot);
        }

        let removed = self
            .nodes
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(ClockError::UnknownClock(id))?;

        // Non-root clocks always have a parent.
        let parent = removed.parent.unwrap_or(Self::ROOT);

        for &child in &removed.children {
            if let Some(child_clock) = self.node_mut(child) {
                child_clock.parent = Some(parent);
            }
        }

        if let Some(parent_clock) = self.node_mut(parent) {
            parent_clock.children.retain(|&c| c != id);
            parent_clock.children.extend_from_slice(&removed.children);
        }

        debug!(target: "clock", "Removed {:?}", id);
        Ok(())
    }

    pub fn contains(&self, id: ClockId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    /// Number of live clocks, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //--- Access -----------------------------------------------------------

    pub fn clock(&self, id: ClockId) -> Option<&Clock> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn clock_mut(&mut self, id: ClockId) -> Option<&mut Clock> {
        self.node_mut(id)
    }

    fn node_mut(&mut self, id: ClockId) -> Option<&mut Clock> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    //--- Ticking ----------------------------------------------------------

    /// Feeds the real time elapsed since the previous tick (or the fixed
    /// delta, if configured) to the root.
    ///
    /// Call once per frame. Returns the root's delta.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let real = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        self.advance(self.config.fixed_delta_seconds.unwrap_or(real))
    }

    /// Feeds `real_delta` (clamped to `[0, max_delta_seconds]`) to the root
    /// and propagates scaled deltas to every descendant.
    pub fn advance(&mut self, real_delta: f64) -> f64 {
        let clamped = real_delta.clamp(0.0, self.config.max_delta_seconds);
        let nominal = self.config.nominal_frame_seconds;

        let root_delta = match self.node_mut(Self::ROOT) {
            Some(root) => root.advance(clamped, nominal),
            None => return 0.0,
        };

        let mut pending: Vec<(ClockId, f64)> = self
            .children_of(Self::ROOT)
            .into_iter()
            .map(|child| (child, root_delta))
            .collect();

        while let Some((id, parent_delta)) = pending.pop() {
            let Some(clock) = self.node_mut(id) else {
                continue;
            };
            let delta = clock.advance(parent_delta, nominal);
            pending.extend(self.children_of(id).into_iter().map(|c| (c, delta)));
        }

        trace!(target: "clock", "Root advanced {:.6}s", root_delta);
        root_delta
    }

    fn children_of(&self, id: ClockId) -> Vec<ClockId> {
        self.clock(id).map(|c| c.children.clone()).unwrap_or_default()
    }
}

impl Default for ClockTree {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

//=========================================================================
// Tests
//=========================================================================
