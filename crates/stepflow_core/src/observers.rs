use crate::container::StateContainer;
use crate::traits::Observer;
use std::convert::Infallible;

/// Records every observed `(t, x)` pair in memory.
#[derive(Debug, Clone)]
pub struct Trajectory<C: StateContainer> {
    pub times: Vec<C::Value>,
    pub states: Vec<C>,
}

impl<C: StateContainer> Trajectory<C> {
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            states: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The last observation, if any.
    pub fn last(&self) -> Option<(C::Value, &C)> {
        self.times.last().copied().zip(self.states.last())
    }

    pub fn iter(&self) -> impl Iterator<Item = (C::Value, &C)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }
}

impl<C: StateContainer> Default for Trajectory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StateContainer + Clone> Observer<C> for Trajectory<C> {
    type Error = Infallible;

    fn observe(&mut self, x: &C, t: C::Value) -> Result<(), Infallible> {
        self.times.push(t);
        self.states.push(x.clone());
        Ok(())
    }
}

/// Discards every observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl<C: StateContainer> Observer<C> for NullObserver {
    type Error = Infallible;

    fn observe(&mut self, _x: &C, _t: C::Value) -> Result<(), Infallible> {
        Ok(())
    }
}
