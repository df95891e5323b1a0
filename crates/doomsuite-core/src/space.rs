//! Observation and action space descriptors.
//!
//! [`FrameSpace`] describes the fixed-shape byte grid returned by
//! `reset`/`step`; [`Discrete`] describes the index range accepted by
//! `step`.

use rand::Rng;

use crate::frame::Frame;

/// Byte grid of fixed `(height, width)` with values in `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSpace {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl FrameSpace {
    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Whether `frame` has this space's shape.
    pub fn contains(&self, frame: &Frame) -> bool {
        frame.shape() == self.shape()
    }

    /// A zero-filled frame of this shape.
    pub fn zeros(&self) -> Frame {
        Frame::zeros(self.height, self.width)
    }
}

/// Discrete action space `{0, 1, ..., n - 1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discrete {
    /// Number of actions.
    pub n: usize,
}

impl Discrete {
    /// Whether `action` is a valid index.
    pub fn contains(&self, action: usize) -> bool {
        action < self.n
    }

    /// Draw a uniformly random action.
    ///
    /// Returns `None` for an empty space.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        (self.n > 0).then(|| rng.random_range(0..self.n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn discrete_contains() {
        let space = Discrete { n: 6 };
        assert!(space.contains(0));
        assert!(space.contains(5));
        assert!(!space.contains(6));
    }

    #[test]
    fn sample_stays_in_range_and_is_deterministic() {
        let space = Discrete { n: 12 };
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let x = space.sample(&mut a).unwrap();
            assert!(space.contains(x));
            assert_eq!(Some(x), space.sample(&mut b));
        }
    }

    #[test]
    fn sample_empty_space_is_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(Discrete { n: 0 }.sample(&mut rng), None);
    }

    #[test]
    fn frame_space_contains_matching_shape() {
        let space = FrameSpace {
            height: 4,
            width: 3,
        };
        assert!(space.contains(&space.zeros()));
        assert!(!space.contains(&Frame::zeros(3, 4)));
    }
}
