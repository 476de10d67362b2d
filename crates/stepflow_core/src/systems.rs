use crate::container::StateContainer;
use crate::traits::{cast, DynamicalSystem};
use serde::{Deserialize, Serialize};

/// Number of state components of the Lorenz system.
pub const LORENZ_DIMENSION: usize = 3;

/// The Lorenz system, https://en.wikipedia.org/wiki/Lorenz_system
///
/// dx/dt = sigma (y - x)
/// dy/dt = x (rho - z) - y
/// dz/dt = x y - beta z
///
/// The state must have exactly three components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl<C: StateContainer> DynamicalSystem<C> for Lorenz {
    fn apply(&self, x: &C, out: &mut C, _t: C::Value) {
        let sigma: C::Value = cast(self.sigma);
        let rho: C::Value = cast(self.rho);
        let beta: C::Value = cast(self.beta);
        let x = x.values();
        let out = out.values_mut();
        debug_assert_eq!(x.len(), LORENZ_DIMENSION);

        out[0] = sigma * (x[1] - x[0]);
        out[1] = (x[0] * (rho - x[2])) - x[1];
        out[2] = x[0] * x[1] - beta * x[2];
    }
}

#[cfg(test)]
mod tests {
    use super::Lorenz;
    use crate::traits::DynamicalSystem;

    #[test]
    fn lorenz_vector_field_at_initial_condition() {
        let lorenz = Lorenz::default();
        let mut out = vec![0.0_f64; 3];
        lorenz.apply(&vec![1.0, 0.0, 0.0], &mut out, 0.0);
        assert_eq!(out, vec![-10.0, 28.0, 0.0]);
    }

    #[test]
    fn lorenz_origin_is_an_equilibrium() {
        let lorenz = Lorenz {
            sigma: 3.0,
            rho: 5.0,
            beta: 1.0,
        };
        let mut out = [1.0_f64; 3];
        lorenz.apply(&[0.0; 3], &mut out, 0.0);
        assert_eq!(out, [0.0; 3]);
    }

    #[test]
    fn lorenz_works_in_single_precision() {
        let lorenz = Lorenz::default();
        let mut out = vec![0.0_f32; 3];
        lorenz.apply(&vec![1.0_f32, 1.0, 1.0], &mut out, 0.0);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 26.0);
        assert!((out[2] - (1.0 - 8.0 / 3.0)).abs() < 1e-6);
    }
}
