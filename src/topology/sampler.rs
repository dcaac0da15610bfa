//! Uniform node id sampling.
//!
//! Every draw covers the non-origin ids `[1, N-1]`. The generator is passed
//! in by the caller so a seeded run replays the same draws in the same
//! order.

use rand::Rng;

use super::types::NodeId;

/// Draws node ids uniformly from `[1, network_size - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSampler {
    network_size: usize,
}

impl NodeSampler {
    /// Returns `None` when the network has no non-origin node to draw from
    pub fn new(network_size: usize) -> Option<Self> {
        (network_size >= 2).then_some(Self { network_size })
    }

    /// Number of ids a draw can return
    pub fn range_len(&self) -> usize {
        self.network_size - 1
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> NodeId {
        rng.gen_range(1..self.network_size)
    }

    /// Draw an id other than `exclude`, redrawing on every hit.
    ///
    /// Returns `None` if `exclude` is the only id in range.
    pub fn draw_excluding<R: Rng + ?Sized>(&self, rng: &mut R, exclude: NodeId) -> Option<NodeId> {
        if self.range_len() == 1 && exclude == 1 {
            return None;
        }
        loop {
            let id = self.draw(rng);
            if id != exclude {
                return Some(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draws_stay_in_range() {
        let sampler = NodeSampler::new(10).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            let id = sampler.draw(&mut rng);
            assert!((1..10).contains(&id));
            seen[id] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s), "every id should be drawn eventually");
    }

    #[test]
    fn test_draw_excluding() {
        let sampler = NodeSampler::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(sampler.draw_excluding(&mut rng, 1), Some(2));
        }
    }

    #[test]
    fn test_single_candidate_excluded() {
        let sampler = NodeSampler::new(2).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sampler.draw_excluding(&mut rng, 1), None);
        assert_eq!(sampler.draw(&mut rng), 1);
    }

    #[test]
    fn test_too_small_network() {
        assert!(NodeSampler::new(0).is_none());
        assert!(NodeSampler::new(1).is_none());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let sampler = NodeSampler::new(1000).unwrap();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let first: Vec<_> = (0..50).map(|_| sampler.draw(&mut a)).collect();
        let second: Vec<_> = (0..50).map(|_| sampler.draw(&mut b)).collect();
        assert_eq!(first, second);
    }
}
