//! Predecessor bookkeeping and path reconstruction.

use rustc_hash::FxHashMap;

use crate::moves::move_between;
use crate::state::PuzzleState;

/// Dense handle for a discovered state.
pub type NodeId = usize;

/// Predecessor links for every state a search has discovered.
///
/// States are interned once and referred to by [`NodeId`], so score tables
/// can be plain vectors indexed by the same id.
#[derive(Debug, Default)]
pub struct CameFrom {
    states: Vec<PuzzleState>,
    parents: Vec<Option<NodeId>>,
    index: FxHashMap<PuzzleState, NodeId>,
}

impl CameFrom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `state`, returning its id and whether it was newly added.
    ///
    /// New states start without a predecessor.
    pub fn intern(&mut self, state: PuzzleState) -> (NodeId, bool) {
        if let Some(&id) = self.index.get(&state) {
            return (id, false);
        }
        let id = self.states.len();
        self.states.push(state.clone());
        self.parents.push(None);
        self.index.insert(state, id);
        (id, true)
    }

    pub fn id_of(&self, state: &PuzzleState) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    #[inline]
    pub fn state(&self, id: NodeId) -> &PuzzleState {
        &self.states[id]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id]
    }

    /// Records that the best known way to reach `id` is from `parent`.
    #[inline]
    pub fn link(&mut self, id: NodeId, parent: NodeId) {
        self.parents[id] = Some(parent);
    }

    /// Number of discovered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Follows predecessor links back from `goal` to the linkless start.
///
/// Returns the path in start-to-goal order, or an empty path if `goal`
/// was never discovered.
pub fn reconstruct(came_from: &CameFrom, goal: &PuzzleState) -> Vec<PuzzleState> {
    let Some(mut current) = came_from.id_of(goal) else {
        return Vec::new();
    };

    let mut path = vec![came_from.state(current).clone()];
    while let Some(parent) = came_from.parent(current) {
        // links always point to strictly cheaper states, so this terminates;
        // the bound only guards against a corrupted table
        if path.len() > came_from.len() {
            break;
        }
        path.push(came_from.state(parent).clone());
        current = parent;
    }

    path.reverse();
    path
}

/// Returns `true` if every consecutive pair of states is one legal slide
/// apart.
pub fn is_contiguous(path: &[PuzzleState]) -> bool {
    path.windows(2)
        .all(|pair| move_between(&pair[0], &pair[1]).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::neighbors;

    #[test]
    fn test_intern_is_idempotent() {
        let goal = PuzzleState::goal(3).unwrap();
        let mut came_from = CameFrom::new();
        assert_eq!(came_from.intern(goal.clone()), (0, true));
        assert_eq!(came_from.intern(goal.clone()), (0, false));
        assert_eq!(came_from.len(), 1);
        assert_eq!(came_from.parent(0), None);
    }

    #[test]
    fn test_reconstruct_follows_links() {
        let start = PuzzleState::goal(3).unwrap();
        let middle = neighbors(&start)[0].clone();
        let end = neighbors(&middle)
            .into_iter()
            .find(|s| *s != start)
            .unwrap();

        let mut came_from = CameFrom::new();
        let (a, _) = came_from.intern(start.clone());
        let (b, _) = came_from.intern(middle.clone());
        let (c, _) = came_from.intern(end.clone());
        came_from.link(b, a);
        came_from.link(c, b);

        let path = reconstruct(&came_from, &end);
        assert_eq!(path, vec![start.clone(), middle, end]);
        assert!(is_contiguous(&path));

        // the start has no predecessor
        assert_eq!(reconstruct(&came_from, &start), vec![start]);
    }

    #[test]
    fn test_reconstruct_unknown_goal_is_empty() {
        let came_from = CameFrom::new();
        assert!(reconstruct(&came_from, &PuzzleState::goal(2).unwrap()).is_empty());
    }

    #[test]
    fn test_is_contiguous_rejects_gaps() {
        let goal = PuzzleState::goal(3).unwrap();
        let one = neighbors(&goal)[0].clone();
        let two = neighbors(&one)
            .into_iter()
            .find(|s| *s != goal)
            .unwrap();
        assert!(is_contiguous(&[goal.clone(), one.clone(), two.clone()]));
        assert!(!is_contiguous(&[goal.clone(), two]));
        assert!(!is_contiguous(&[goal.clone(), goal.clone()]));
        assert!(is_contiguous(&[goal]));
    }
}
