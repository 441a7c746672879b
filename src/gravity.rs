use glam::DVec2;

use crate::body::Body;

/// Represents a pair of objects between which an interaction is computed.
///
/// The first object is the one being affected by the second object.
#[derive(Clone, Copy, Debug)]
pub struct Between<S1, S2>(pub S1, pub S2);

/// Trait to compute an interaction between bodies contained in a storage.
///
/// Implementing [`Interaction<Between<&Body, &Body>>`] for a type allows it to be used with
/// [`BruteForce`] to compute the net interaction on every body of a system.
///
/// # Example
///
/// ```
/// use orrery::prelude::*;
/// use glam::DVec2;
///
/// // Pulls every body toward the other with a constant force.
/// #[derive(Clone, Copy)]
/// struct Spring(f64);
///
/// impl Interaction<Between<&Body, &Body>> for Spring {
///     type Output = DVec2;
///
///     fn compute(&mut self, Between(affected, affecting): Between<&Body, &Body>) -> DVec2 {
///         (affecting.position() - affected.position()).normalize_or_zero() * self.0
///     }
/// }
///
/// let bodies = [
///     Body::new("a", DVec2::ZERO, 1.0, 1.0, Color::WHITE)?,
///     Body::new("b", DVec2::X, 1.0, 1.0, Color::WHITE)?,
/// ];
///
/// let forces = BruteForce(Spring(2.0)).compute(bodies.as_slice());
/// assert_eq!(forces, vec![DVec2::new(2.0, 0.0), DVec2::new(-2.0, 0.0)]);
/// # Ok::<(), orrery::Error>(())
/// ```
pub trait Interaction<Storage> {
    /// The computed interaction.
    type Output;

    /// Returns the interaction between the bodies in the storage.
    fn compute(&mut self, storage: Storage) -> Self::Output;
}

/// [`Interaction`] representing the gravitational force between two bodies using Newton's law
/// of universal gravitation.
///
/// If the positions of the affected and affecting bodies are guaranteed to be different, use
/// [`NewtonianForce::unchecked`]. The checked variant returns no force for coincident bodies
/// instead of an infinite one.
#[derive(Clone, Copy, Debug)]
pub struct NewtonianForce<const CHECKED: bool> {
    /// Gravitational constant.
    pub g: f64,
}

impl NewtonianForce<true> {
    /// Creates a new [`NewtonianForce`] that checks if bodies share their positions.
    #[inline]
    pub const fn checked(g: f64) -> Self {
        Self { g }
    }
}

impl NewtonianForce<false> {
    /// Creates a new [`NewtonianForce`] that does not check if bodies share their positions.
    #[inline]
    pub const fn unchecked(g: f64) -> Self {
        Self { g }
    }
}

impl<const CHECKED: bool> Interaction<Between<&Body, &Body>> for NewtonianForce<CHECKED> {
    type Output = DVec2;

    #[inline]
    fn compute(&mut self, Between(affected, affecting): Between<&Body, &Body>) -> DVec2 {
        if CHECKED && affected.position() == affecting.position() {
            return DVec2::ZERO;
        }

        affected.force_from(affecting, self.g)
    }
}

/// Brute-force algorithm summing an interaction over every pair of distinct bodies.
///
/// Bodies are identified by their index in the slice: the body at index `i` never interacts
/// with itself, whatever its value.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce<T>(pub T);

impl<T> Interaction<Between<usize, &[Body]>> for BruteForce<T>
where
    T: for<'a> Interaction<Between<&'a Body, &'a Body>, Output = DVec2>,
{
    type Output = DVec2;

    /// Net interaction on the body at index `i` from every other body of the slice.
    #[inline]
    fn compute(&mut self, Between(i, bodies): Between<usize, &[Body]>) -> DVec2 {
        let affected = &bodies[i];

        bodies
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .fold(DVec2::ZERO, |net, (_, affecting)| {
                net + self.0.compute(Between(affected, affecting))
            })
    }
}

impl<T> Interaction<&[Body]> for BruteForce<T>
where
    T: for<'a> Interaction<Between<&'a Body, &'a Body>, Output = DVec2>,
{
    type Output = Vec<DVec2>;

    /// Net interaction on every body of the slice, in order.
    #[inline]
    fn compute(&mut self, bodies: &[Body]) -> Vec<DVec2> {
        (0..bodies.len())
            .map(|i| self.compute(Between(i, bodies)))
            .collect()
    }
}

/// Iterates over the indices `(i, j)`, `i < j`, of every pair of bodies sharing the same
/// position.
pub fn coincident_pairs(bodies: &[Body]) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..bodies.len()).flat_map(move |i| {
        ((i + 1)..bodies.len())
            .filter(move |&j| bodies[i].position() == bodies[j].position())
            .map(move |j| (i, j))
    })
}
