//! The [`RewardTerm`] trait and the ordered [`RewardPipeline`].
//!
//! A scenario's reward is the sum of its pipeline's terms, evaluated in
//! order over a [`RewardWindow`] of the variable history. Refined
//! scenarios extend their parent's pipeline with extra terms instead of
//! overriding it, so the full formula for any scenario can be read off
//! [`RewardPipeline::term_names`].

use doomsuite_core::{VariableHistory, VariableLayout, VariableSnapshot};

/// Read-only view over the history used for one reward evaluation.
///
/// Only constructible when at least two snapshots exist.
#[derive(Clone, Copy, Debug)]
pub struct RewardWindow<'h> {
    history: &'h VariableHistory,
    layout: VariableLayout,
    previous: &'h VariableSnapshot,
    current: &'h VariableSnapshot,
}

impl<'h> RewardWindow<'h> {
    /// Build a window over `history`, or `None` if it holds fewer than
    /// two snapshots.
    pub fn new(history: &'h VariableHistory, layout: VariableLayout) -> Option<Self> {
        let (previous, current) = history.last_two()?;
        Some(Self {
            history,
            layout,
            previous,
            current,
        })
    }

    /// Second-newest snapshot.
    pub fn previous(&self) -> &'h VariableSnapshot {
        self.previous
    }

    /// Newest snapshot.
    pub fn current(&self) -> &'h VariableSnapshot {
        self.current
    }

    /// Oldest retained snapshot.
    pub fn oldest(&self) -> &'h VariableSnapshot {
        // A window always holds at least two snapshots.
        self.history.oldest().unwrap_or(self.previous)
    }

    /// Layout used to interpret the snapshots.
    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    /// Kill-count delta between the two newest snapshots.
    pub fn kills_delta(&self) -> f64 {
        self.layout.kills(self.current) - self.layout.kills(self.previous)
    }

    /// Health delta between the two newest snapshots.
    pub fn health_delta(&self) -> f64 {
        self.layout.health(self.current) - self.layout.health(self.previous)
    }

    /// Ammunition delta between the two newest snapshots.
    pub fn ammo_delta(&self) -> f64 {
        self.layout.ammo(self.current) - self.layout.ammo(self.previous)
    }

    /// Straight-line distance between the oldest and newest positions.
    ///
    /// Zero when the layout has no position variables.
    pub fn distance_traversed(&self) -> f64 {
        let (Some((x0, y0)), Some((x1, y1))) = (
            self.layout.position(self.oldest()),
            self.layout.position(self.current),
        ) else {
            return 0.0;
        };
        (x1 - x0).hypot(y1 - y0)
    }
}

/// One additive component of a scenario's reward.
///
/// # Contract
///
/// - `evaluate()` is pure: the same window yields the same value.
/// - Terms are stateless; per-episode counters live in the scenario.
///
/// # Examples
///
/// ```
/// use doomsuite_scenarios::reward::{RewardTerm, RewardWindow};
///
/// struct Survival;
///
/// impl RewardTerm for Survival {
///     fn name(&self) -> &str { "survival" }
///     fn evaluate(&self, _window: &RewardWindow<'_>) -> f64 { 0.01 }
/// }
///
/// assert_eq!(Survival.name(), "survival");
/// ```
pub trait RewardTerm: Send + 'static {
    /// Human-readable name, used in reward breakdowns.
    fn name(&self) -> &str;

    /// Contribution of this term for the window.
    fn evaluate(&self, window: &RewardWindow<'_>) -> f64;
}

/// Ordered list of reward terms: a base term followed by adjustments.
pub struct RewardPipeline {
    terms: Vec<Box<dyn RewardTerm>>,
}

impl RewardPipeline {
    /// Start a pipeline from its base term.
    pub fn new(base: impl RewardTerm) -> Self {
        Self {
            terms: vec![Box::new(base)],
        }
    }

    /// Append an adjustment applied after every existing term.
    pub fn then(mut self, term: impl RewardTerm) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Sum of every term over the history.
    ///
    /// Returns `0.0` when the history holds fewer than two snapshots.
    pub fn evaluate(&self, history: &VariableHistory, layout: VariableLayout) -> f64 {
        match RewardWindow::new(history, layout) {
            Some(window) => self.evaluate_window(&window),
            None => 0.0,
        }
    }

    /// Sum of every term over an existing window.
    pub fn evaluate_window(&self, window: &RewardWindow<'_>) -> f64 {
        self.terms.iter().map(|t| t.evaluate(window)).sum()
    }

    /// Per-term contributions, in pipeline order.
    pub fn breakdown(&self, window: &RewardWindow<'_>) -> Vec<(&str, f64)> {
        self.terms
            .iter()
            .map(|t| (t.name(), t.evaluate(window)))
            .collect()
    }

    /// Names of the terms, in pipeline order.
    pub fn term_names(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.name()).collect()
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the pipeline has no terms. Never true for a pipeline built
    /// with [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl std::fmt::Debug for RewardPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.term_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doomsuite_test_utils::history_of;

    struct Constant(f64);

    impl RewardTerm for Constant {
        fn name(&self) -> &str {
            "constant"
        }
        fn evaluate(&self, _window: &RewardWindow<'_>) -> f64 {
            self.0
        }
    }

    const LAYOUT: VariableLayout = VariableLayout {
        kills: 0,
        health: 1,
        ammo: 2,
        position: Some((3, 4)),
    };

    #[test]
    fn window_requires_two_snapshots() {
        let one = history_of(5, &[&[0.0, 100.0, 50.0, 0.0, 0.0]]);
        assert!(RewardWindow::new(&one, LAYOUT).is_none());

        let two = history_of(
            5,
            &[&[0.0, 100.0, 50.0, 0.0, 0.0], &[1.0, 90.0, 49.0, 0.0, 0.0]],
        );
        let window = RewardWindow::new(&two, LAYOUT).unwrap();
        assert_eq!(window.kills_delta(), 1.0);
        assert_eq!(window.health_delta(), -10.0);
        assert_eq!(window.ammo_delta(), -1.0);
    }

    #[test]
    fn distance_uses_oldest_and_newest() {
        let h = history_of(
            5,
            &[
                &[0.0, 100.0, 50.0, 0.0, 0.0],
                &[0.0, 100.0, 50.0, 100.0, 100.0],
                &[0.0, 100.0, 50.0, 3.0, 4.0],
            ],
        );
        let window = RewardWindow::new(&h, LAYOUT).unwrap();
        assert!((window.distance_traversed() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_without_position_is_zero() {
        let layout = VariableLayout {
            position: None,
            ..LAYOUT
        };
        let h = history_of(5, &[&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]]);
        let window = RewardWindow::new(&h, layout).unwrap();
        assert_eq!(window.distance_traversed(), 0.0);
    }

    #[test]
    fn pipeline_sums_terms_in_order() {
        let pipeline = RewardPipeline::new(Constant(1.0)).then(Constant(-0.25));
        let h = history_of(5, &[&[0.0; 5], &[0.0; 5]]);
        assert_eq!(pipeline.evaluate(&h, LAYOUT), 0.75);
        assert_eq!(pipeline.len(), 2);

        let window = RewardWindow::new(&h, LAYOUT).unwrap();
        let parts = pipeline.breakdown(&window);
        assert_eq!(parts, vec![("constant", 1.0), ("constant", -0.25)]);
    }

    #[test]
    fn pipeline_on_short_history_is_zero() {
        let pipeline = RewardPipeline::new(Constant(1.0));
        let h = history_of(5, &[&[0.0; 5]]);
        assert_eq!(pipeline.evaluate(&h, LAYOUT), 0.0);
    }
}
