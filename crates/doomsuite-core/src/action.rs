//! Discrete action tables.
//!
//! Agents choose an index; the adapter translates it into a
//! [`ControlVector`] (one value per engine button) through the
//! scenario's [`ActionTable`].

use smallvec::SmallVec;
use std::ops::Index;

/// One value per engine button, in the order the scenario config
/// declares its buttons.
pub type ControlVector = SmallVec<[f64; 4]>;

/// Fixed, ordered list of control vectors available to the agent.
///
/// Every entry has the same arity, which must match the engine's button
/// count; the adapter checks this at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionTable {
    actions: Vec<ControlVector>,
}

impl ActionTable {
    /// Build the cartesian product of button groups.
    ///
    /// Each group lists the mutually exclusive settings of a few adjacent
    /// buttons. The first group varies slowest, so the product of
    /// `[[0,0],[0,1],[1,0]]` and `[[0],[1]]` yields
    /// `[0,0,0], [0,0,1], [0,1,0], [0,1,1], [1,0,0], [1,0,1]`.
    pub fn product(groups: &[&[&[f64]]]) -> Self {
        let mut actions: Vec<ControlVector> = vec![ControlVector::new()];
        for group in groups {
            let mut next = Vec::with_capacity(actions.len() * group.len());
            for prefix in &actions {
                for setting in group.iter() {
                    let mut combined = prefix.clone();
                    combined.extend_from_slice(setting);
                    next.push(combined);
                }
            }
            actions = next;
        }
        Self { actions }
    }

    /// Build a table from explicit control vectors.
    pub fn from_actions(actions: Vec<ControlVector>) -> Self {
        Self { actions }
    }

    /// Control vector for `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&ControlVector> {
        self.actions.get(index)
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the table has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Common arity of every entry, or `None` if the table is empty or
    /// entries disagree.
    pub fn arity(&self) -> Option<usize> {
        let first = self.actions.first()?.len();
        self.actions
            .iter()
            .all(|a| a.len() == first)
            .then_some(first)
    }

    /// Iterate over the control vectors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &ControlVector> {
        self.actions.iter()
    }
}

impl Index<usize> for ActionTable {
    type Output = ControlVector;

    fn index(&self, index: usize) -> &ControlVector {
        &self.actions[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn product_orders_first_group_slowest() {
        let turn: &[&[f64]] = &[&[0.0, 0.0], &[0.0, 1.0], &[1.0, 0.0]];
        let attack: &[&[f64]] = &[&[0.0], &[1.0]];
        let table = ActionTable::product(&[turn, attack]);

        assert_eq!(table.len(), 6);
        assert_eq!(table.arity(), Some(3));
        let expected: ControlVector = smallvec![0.0, 0.0, 0.0];
        assert_eq!(table[0], expected);
        let expected: ControlVector = smallvec![0.0, 0.0, 1.0];
        assert_eq!(table[1], expected);
        let expected: ControlVector = smallvec![1.0, 0.0, 1.0];
        assert_eq!(table[5], expected);
    }

    #[test]
    fn arity_detects_mismatch() {
        let table = ActionTable::from_actions(vec![smallvec![0.0, 1.0], smallvec![1.0]]);
        assert_eq!(table.arity(), None);
        assert_eq!(ActionTable::from_actions(vec![]).arity(), None);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let table = ActionTable::product(&[&[&[0.0], &[1.0]]]);
        assert!(table.get(1).is_some());
        assert!(table.get(2).is_none());
    }
}
