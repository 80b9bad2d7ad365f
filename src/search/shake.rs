//! Shaking (randomized perturbation).

use rand::Rng;

use crate::instance::Instance;
use crate::neighborhood::Neighborhood;
use crate::solution::Assignment;

/// Applies `k` consecutive random moves from the family matching strength
/// `k` (see [`Neighborhood::for_strength`]) to a copy of `assignment`.
///
/// Each move is drawn against the already perturbed copy, so the result
/// is always feasible. A draw that finds no feasible move within
/// `attempts` tries is skipped; if every draw is skipped the copy equals
/// the input. All randomness comes from `rng`.
pub fn shake<R: Rng>(
    instance: &Instance,
    assignment: &Assignment,
    k: usize,
    rng: &mut R,
    attempts: usize,
) -> Assignment {
    let neighborhood = Neighborhood::for_strength(k);
    let mut next = assignment.clone();

    for _ in 0..k.max(1) {
        let Some(mv) = neighborhood.sample(instance, &next, rng, attempts) else {
            continue;
        };
        if let Err(reason) = next.apply_move(instance, mv) {
            tracing::trace!(%reason, mv = %mv, "shake move rejected");
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::INFEASIBLE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance() -> Instance {
        Instance::new(
            vec![
                vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0],
                vec![2.0, 6.0, INFEASIBLE, 3.0, 5.0, 8.0],
                vec![9.0, 7.0, 9.0, 3.0, 2.0, 3.0],
            ],
            vec![(0, 2), (1, 2), (2, 4), (3, 5)],
        )
        .unwrap()
    }

    #[test]
    fn test_shake_keeps_feasibility() {
        let inst = instance();
        let start =
            Assignment::from_parts(&inst, vec![0, 0, 0, 1, 2, 2], vec![0, 1, 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let mut current = start;
        for round in 0..200 {
            let k = round % 4 + 1;
            current = shake(&inst, &current, k, &mut rng, 10);
            assert!(current.validate(&inst).is_ok(), "round {round}");
        }
    }

    #[test]
    fn test_shake_is_reproducible() {
        let inst = instance();
        let start =
            Assignment::from_parts(&inst, vec![0, 0, 0, 1, 2, 2], vec![0, 1, 2]).unwrap();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (1..=3)
                .map(|k| shake(&inst, &start, k, &mut rng, 10))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn test_shake_without_moves_returns_copy() {
        let inst = Instance::new(vec![vec![1.0, 2.0]], vec![(0, 1)]).unwrap();
        let start = Assignment::from_parts(&inst, vec![0, 0], vec![0]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for k in 1..=3 {
            assert_eq!(shake(&inst, &start, k, &mut rng, 10), start);
        }
    }
}
