//! Uniform access to the containers a state can live in.
//!
//! Steppers and the driver only ever see a state through [`StateContainer`],
//! so the same solver code runs on `Vec<T>`, `[T; N]` and `nalgebra::DVector<T>`.

use crate::traits::Scalar;
use nalgebra::DVector;

/// An ordered, resizable sequence of scalars.
///
/// Element order is the container's natural order, and it is the same for a
/// state and its derivative: component `i` of dx/dt belongs to component `i`
/// of x.
pub trait StateContainer {
    type Value: Scalar;

    fn values(&self) -> &[Self::Value];

    fn values_mut(&mut self) -> &mut [Self::Value];

    /// Changes the length to `len`. Contents of new elements are unspecified
    /// and must be written before they are read.
    fn resize_to(&mut self, len: usize);

    /// A zero-filled container with the same length as `self`.
    fn zeros_like(&self) -> Self
    where
        Self: Sized;

    fn len(&self) -> usize {
        self.values().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Value> {
        self.values().iter()
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, Self::Value> {
        self.values_mut().iter_mut()
    }

    /// Length equality only; values are not compared.
    fn same_size(&self, other: &Self) -> bool {
        self.len() == other.len()
    }

    /// Resizes `self` to the length of `reference` if they differ.
    fn adjust_size(&mut self, reference: &Self) {
        if !self.same_size(reference) {
            self.resize_to(reference.len());
        }
    }
}

impl<T: Scalar> StateContainer for Vec<T> {
    type Value = T;

    fn values(&self) -> &[T] {
        self
    }

    fn values_mut(&mut self) -> &mut [T] {
        self
    }

    fn resize_to(&mut self, len: usize) {
        self.resize(len, T::zero());
    }

    fn zeros_like(&self) -> Self {
        vec![T::zero(); self.len()]
    }
}

impl<T: Scalar, const N: usize> StateContainer for [T; N] {
    type Value = T;

    fn values(&self) -> &[T] {
        self
    }

    fn values_mut(&mut self) -> &mut [T] {
        self
    }

    // Two arrays of the same type always have the same length.
    fn resize_to(&mut self, len: usize) {
        debug_assert_eq!(len, N, "fixed-size state cannot be resized");
    }

    fn zeros_like(&self) -> Self {
        [T::zero(); N]
    }
}

impl<T: Scalar> StateContainer for DVector<T> {
    type Value = T;

    fn values(&self) -> &[T] {
        self.as_slice()
    }

    fn values_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }

    fn resize_to(&mut self, len: usize) {
        *self = DVector::from_element(len, T::zero());
    }

    fn zeros_like(&self) -> Self {
        DVector::from_element(self.nrows(), T::zero())
    }
}

/// x[i] += alpha * dxdt[i] for every component.
///
/// `x` and `dxdt` must have the same length (checked in debug builds only).
/// In release builds the shorter of the two bounds the update.
pub fn increment<C: StateContainer>(x: &mut C, dxdt: &C, alpha: C::Value) {
    debug_assert!(
        x.same_size(dxdt),
        "state has {} components but derivative has {}",
        x.len(),
        dxdt.len()
    );
    for (xi, &di) in x.iter_mut().zip(dxdt.iter()) {
        *xi = *xi + alpha * di;
    }
}

/// out[i] = x[i] + alpha * dxdt[i] for every component.
///
/// Same length precondition as [`increment`]; in release builds the shortest
/// input bounds the update.
pub fn offset_into<C: StateContainer>(out: &mut C, x: &C, dxdt: &C, alpha: C::Value) {
    debug_assert!(
        x.same_size(dxdt),
        "state has {} components but derivative has {}",
        x.len(),
        dxdt.len()
    );
    debug_assert!(out.same_size(x), "output buffer is not sized like the state");
    for ((oi, &xi), &di) in out.iter_mut().zip(x.iter()).zip(dxdt.iter()) {
        *oi = xi + alpha * di;
    }
}

#[cfg(test)]
mod tests {
    use super::{increment, offset_into, StateContainer};
    use nalgebra::DVector;

    #[test]
    fn adjust_size_grows_and_shrinks_vec() {
        let reference = vec![1.0, 2.0, 3.0];
        let mut buffer: Vec<f64> = Vec::new();
        buffer.adjust_size(&reference);
        assert_eq!(buffer.len(), 3);

        let shorter = vec![1.0];
        buffer.adjust_size(&shorter);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn adjust_size_is_idempotent() {
        let reference = vec![0.5; 4];
        let mut buffer: Vec<f64> = Vec::new();
        buffer.adjust_size(&reference);
        buffer.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let ptr = buffer.as_ptr();
        let capacity = buffer.capacity();

        buffer.adjust_size(&reference);

        assert_eq!(buffer, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buffer.as_ptr(), ptr);
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn same_size_ignores_values() {
        assert!(vec![1.0_f64, 2.0].same_size(&vec![-7.0, 9.0]));
        assert!(!vec![1.0_f64, 2.0].same_size(&vec![1.0]));
    }

    #[test]
    fn iteration_visits_every_element_in_order() {
        let x = vec![1.0_f64, 2.0, 3.0];
        let seen: Vec<f64> = StateContainer::iter(&x).copied().collect();
        assert_eq!(seen, x);

        let arr = [4.0_f64, 5.0];
        assert_eq!(StateContainer::iter(&arr).count(), 2);

        let v = DVector::from_vec(vec![6.0_f64, 7.0, 8.0]);
        let seen: Vec<f64> = StateContainer::iter(&v).copied().collect();
        assert_eq!(seen, vec![6.0, 7.0, 8.0]);
    }

    #[test]
    fn dvector_resizes_to_reference() {
        let reference = DVector::from_vec(vec![1.0_f64, 2.0, 3.0]);
        let mut buffer = DVector::<f64>::from_element(1, 0.0);
        buffer.adjust_size(&reference);
        assert_eq!(StateContainer::len(&buffer), 3);
    }

    #[test]
    fn array_adjust_size_is_a_no_op() {
        let reference = [1.0_f64, 2.0, 3.0];
        let mut buffer = [9.0_f64; 3];
        buffer.adjust_size(&reference);
        assert_eq!(buffer, [9.0; 3]);
    }

    #[test]
    fn increment_is_plain_multiply_add() {
        let mut x = vec![1.0_f64, -2.0, 0.25];
        let d = vec![3.0, 0.5, -8.0];
        let dt = 0.01;
        increment(&mut x, &d, dt);
        assert_eq!(x[0], 1.0 + dt * 3.0);
        assert_eq!(x[1], -2.0 + dt * 0.5);
        assert_eq!(x[2], 0.25 + dt * -8.0);
    }

    #[test]
    fn offset_into_leaves_source_untouched() {
        let x = [1.0_f64, 2.0];
        let d = [10.0_f64, -10.0];
        let mut out = [0.0_f64; 2];
        offset_into(&mut out, &x, &d, 0.5);
        assert_eq!(out, [6.0, -3.0]);
        assert_eq!(x, [1.0, 2.0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "derivative has")]
    fn increment_rejects_mismatched_lengths_in_debug() {
        let mut x = vec![1.0_f64, 2.0];
        let d = vec![1.0];
        increment(&mut x, &d, 0.1);
    }
}
