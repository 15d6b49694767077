use gw_core::{ChunkMap, GridPos};
use rand::Rng;

/// One axis of a step: the sign of `diff`, or a random pick from
/// {-1, 0, 1} when the axis is already aligned.
pub fn axis_step<R: Rng + ?Sized>(diff: i32, rng: &mut R) -> i32 {
    if diff == 0 {
        rng.random_range(-1..=1)
    } else {
        diff.signum()
    }
}

/// One step closer to `target`.
pub fn step_toward<R: Rng + ?Sized>(from: GridPos, target: GridPos, rng: &mut R) -> GridPos {
    let dx = axis_step(target.x - from.x, rng);
    let dy = axis_step(target.y - from.y, rng);
    from.offset(dx, dy)
}

/// One step away from `threat`.
pub fn step_away<R: Rng + ?Sized>(from: GridPos, threat: GridPos, rng: &mut R) -> GridPos {
    let dx = axis_step(from.x - threat.x, rng);
    let dy = axis_step(from.y - threat.y, rng);
    from.offset(dx, dy)
}

/// A uniformly chosen neighbor.
pub fn random_step<R: Rng + ?Sized>(from: GridPos, rng: &mut R) -> GridPos {
    let neighbors = from.neighbors();
    neighbors[rng.random_range(0..neighbors.len())]
}

/// The destination if it is a real move into an existing chunk cheaper
/// than `blocked_cost`.
pub fn accept_move(
    from: GridPos,
    to: GridPos,
    chunks: &ChunkMap,
    blocked_cost: f64,
) -> Option<GridPos> {
    if to == from {
        return None;
    }
    chunks
        .get(to)
        .filter(|chunk| chunk.travel_cost < blocked_cost)
        .map(|_| to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_core::{Chunk, TerrainType};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn toward_and_away_follow_axis_signs() {
        let mut rng = StdRng::seed_from_u64(0);
        let from = GridPos::new(5, 5);
        assert_eq!(step_toward(from, GridPos::new(9, 1), &mut rng), GridPos::new(6, 4));
        assert_eq!(step_away(from, GridPos::new(9, 1), &mut rng), GridPos::new(4, 6));
    }

    #[test]
    fn aligned_axis_is_randomized() {
        let mut rng = StdRng::seed_from_u64(11);
        let from = GridPos::new(0, 0);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            let step = step_toward(from, GridPos::new(4, 0), &mut rng);
            assert_eq!(step.x, 1);
            seen.insert(step.y);
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![-1, 0, 1]);
    }

    #[test]
    fn blocked_and_missing_chunks_are_refused() {
        let mut chunks = ChunkMap::filled(3, 1, TerrainType::Grassland);
        chunks.insert(Chunk::new(GridPos::new(1, 0), TerrainType::Grassland).with_travel_cost(100.0));
        let from = GridPos::new(0, 0);
        assert_eq!(accept_move(from, GridPos::new(1, 0), &chunks, 100.0), None);
        assert_eq!(accept_move(from, GridPos::new(0, 1), &chunks, 100.0), None);
        assert_eq!(accept_move(from, from, &chunks, 100.0), None);
        assert_eq!(
            accept_move(GridPos::new(1, 0), GridPos::new(2, 0), &chunks, 100.0),
            Some(GridPos::new(2, 0))
        );
    }

    proptest! {
        #[test]
        fn random_step_is_adjacent(seed in any::<u64>(), x in -50i32..50, y in -50i32..50) {
            let mut rng = StdRng::seed_from_u64(seed);
            let from = GridPos::new(x, y);
            prop_assert_eq!(from.chebyshev(random_step(from, &mut rng)), 1);
        }

        #[test]
        fn never_accepts_blocked(cost in 100.0f64..1000.0) {
            let mut chunks = ChunkMap::filled(2, 1, TerrainType::Grassland);
            chunks.insert(Chunk::new(GridPos::new(1, 0), TerrainType::Grassland).with_travel_cost(cost));
            prop_assert_eq!(accept_move(GridPos::new(0, 0), GridPos::new(1, 0), &chunks, 100.0), None);
        }
    }
}
