//! Cross-checks of the search against exhaustive breadth-first search.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use slidetile::config::{SearchConfig, ShuffleConfig};
use slidetile::heuristic::Manhattan;
use slidetile::moves::{is_solvable, move_between};
use slidetile::path::is_contiguous;
use slidetile::search::Solver;
use slidetile::shuffle::Shuffler;
use slidetile::{configure, neighbors, solve, PuzzleError, PuzzleState};

/// Every state reachable from the goal, in BFS order, with its distance.
struct StateGraph {
    order: Vec<PuzzleState>,
    distance: FxHashMap<PuzzleState, u32>,
}

fn explore(size: usize) -> StateGraph {
    let goal = configure(size).unwrap();
    let mut order = vec![goal.clone()];
    let mut distance = FxHashMap::default();
    distance.insert(goal.clone(), 0);

    let mut queue = VecDeque::from([goal]);
    while let Some(state) = queue.pop_front() {
        let next_distance = distance[&state] + 1;
        for next in neighbors(&state) {
            if !distance.contains_key(&next) {
                distance.insert(next.clone(), next_distance);
                order.push(next.clone());
                queue.push_back(next);
            }
        }
    }

    StateGraph { order, distance }
}

fn assert_optimal(start: &PuzzleState, goal: &PuzzleState, expected: u32) {
    let solution = solve(start, goal).unwrap();
    assert_eq!(solution.moves() as u32, expected, "start {:?}", start.cells());
    assert_eq!(solution.path.first(), Some(start));
    assert_eq!(solution.path.last(), Some(goal));
    assert!(is_contiguous(&solution.path));
}

#[test]
fn test_reachable_state_counts() {
    // half of all (N*N)! arrangements are reachable
    let small = explore(2);
    assert_eq!(small.order.len(), 12);
    assert_eq!(small.distance.values().max(), Some(&6));

    let graph = explore(3);
    assert_eq!(graph.order.len(), 181_440);
    assert_eq!(graph.distance.values().max(), Some(&31));
    assert_eq!(graph.distance.values().filter(|&&d| d == 31).count(), 2);
}

#[test]
fn test_every_2x2_state_solves_optimally() {
    let goal = configure(2).unwrap();
    let graph = explore(2);
    for state in &graph.order {
        assert_optimal(state, &goal, graph.distance[state]);
    }
}

#[test]
fn test_heuristic_is_admissible_on_every_3x3_state() {
    let goal = configure(3).unwrap();
    let heuristic = Manhattan::new(&goal);
    let graph = explore(3);
    for (state, &distance) in &graph.distance {
        assert!(
            heuristic.estimate(state) <= distance,
            "{:?}: h = {} exceeds true distance {}",
            state.cells(),
            heuristic.estimate(state),
            distance
        );
    }
}

#[test]
fn test_heuristic_is_consistent_on_sampled_3x3_edges() {
    let goal = configure(3).unwrap();
    let heuristic = Manhattan::new(&goal);
    for state in explore(3).order.iter().step_by(7) {
        let h = heuristic.estimate(state);
        for next in neighbors(state) {
            assert!(h <= 1 + heuristic.estimate(&next));
        }
    }
}

#[test]
fn test_3x3_solutions_match_bfs_distance() {
    let goal = configure(3).unwrap();
    let graph = explore(3);

    for state in graph.order.iter().step_by(4_999) {
        assert_optimal(state, &goal, graph.distance[state]);
    }

    // both antipodes of the 3x3 graph
    for state in graph.distance.iter().filter(|&(_, &d)| d == 31).map(|(s, _)| s) {
        assert_optimal(state, &goal, 31);
    }
}

#[test]
fn test_solution_steps_are_single_slides() {
    let goal = configure(3).unwrap();
    let start: PuzzleState = "8 6 7 2 5 4 3 _ 1".parse().unwrap();
    let solution = solve(&start, &goal).unwrap();
    for pair in solution.path.windows(2) {
        assert!(neighbors(&pair[0]).contains(&pair[1]));
        assert!(move_between(&pair[0], &pair[1]).is_some());
    }
    assert_eq!(solution.directions().len(), solution.moves());
}

#[test]
fn test_shuffled_states_always_solve() {
    for size in [2, 3] {
        let goal = configure(size).unwrap();
        let mut shuffler = Shuffler::new(ShuffleConfig {
            seed: Some(size as u64 * 31),
            ..ShuffleConfig::default()
        })
        .unwrap();
        for _ in 0..25 {
            let shuffled = shuffler.shuffle(&goal);
            let solution = solve(&shuffled.state, &goal).unwrap();
            assert!(!solution.path.is_empty());
            assert!(solution.moves() <= shuffled.moves as usize);
        }
    }
}

#[test]
fn test_short_scrambles_on_larger_grids() {
    for size in [4, 5] {
        let goal = configure(size).unwrap();
        let mut shuffler = Shuffler::new(ShuffleConfig {
            min_moves: 10,
            max_moves: 20,
            seed: Some(size as u64),
        })
        .unwrap();
        for _ in 0..5 {
            let shuffled = shuffler.shuffle(&goal);
            assert!(is_solvable(&shuffled.state, &goal).unwrap());
            let solution = solve(&shuffled.state, &goal).unwrap();
            assert!(solution.moves() <= shuffled.moves as usize);
            assert!(is_contiguous(&solution.path));
        }
    }
}

#[test]
fn test_unreachable_3x3_exhausts_without_parity_check() {
    let goal = configure(3).unwrap();
    let swapped: PuzzleState = "2 1 3 4 5 6 7 8 _".parse().unwrap();
    let solver = Solver::new(SearchConfig {
        parity_check: false,
        ..SearchConfig::default()
    });
    assert_eq!(solver.solve(&swapped, &goal), Err(PuzzleError::NoSolutionFound));
    // the parity shortcut reaches the same verdict immediately
    assert_eq!(solve(&swapped, &goal), Err(PuzzleError::NoSolutionFound));
}
