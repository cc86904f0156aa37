use crate::core::step::{Step, StepStatus};
use crate::error::FlowError;

/// Fixed, ordered step sequence. The cursor only ever moves to an adjacent
/// step, so it always names a member of the sequence.
#[derive(Debug)]
pub struct Flow {
    steps: Vec<Step>,
    current: usize,
    statuses: Vec<StepStatus>,
}

impl Flow {
    pub fn new(steps: Vec<Step>) -> Result<Self, FlowError> {
        if steps.is_empty() {
            return Err(FlowError::Empty);
        }
        if let Some(dup) = first_duplicate_id(&steps) {
            return Err(FlowError::DuplicateStep(dup));
        }

        let mut statuses = vec![StepStatus::Pending; steps.len()];
        statuses[0] = StepStatus::Active;
        Ok(Self {
            steps,
            current: 0,
            statuses,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.id.as_str())
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        self.statuses
            .get(index)
            .copied()
            .unwrap_or(StepStatus::Pending)
    }

    pub fn current_status(&self) -> StepStatus {
        self.status_at(self.current)
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.steps.len()
    }

    pub fn complete_current(&mut self) {
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Done;
        }
    }

    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.complete_current();
        self.current += 1;
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Active;
        }
        true
    }

    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Pending;
        }
        self.current -= 1;
        if let Some(status) = self.statuses.get_mut(self.current) {
            *status = StepStatus::Active;
        }
        true
    }

    pub fn reset(&mut self) {
        self.current = 0;
        for (idx, status) in self.statuses.iter_mut().enumerate() {
            *status = if idx == 0 {
                StepStatus::Active
            } else {
                StepStatus::Pending
            };
        }
    }
}

fn first_duplicate_id(steps: &[Step]) -> Option<String> {
    steps.iter().enumerate().find_map(|(idx, step)| {
        steps[..idx]
            .iter()
            .any(|earlier| earlier.id == step.id)
            .then(|| step.id.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::Flow;
    use crate::core::step::{Step, StepStatus};
    use crate::error::FlowError;

    fn flow(ids: &[&str]) -> Flow {
        Flow::new(ids.iter().map(|id| Step::builder(*id, *id).build()).collect())
            .expect("non-empty flow")
    }

    #[test]
    fn empty_flow_is_rejected() {
        assert!(matches!(Flow::new(Vec::new()), Err(FlowError::Empty)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let steps = vec![Step::builder("a", "A").build(), Step::builder("a", "A").build()];
        assert!(matches!(Flow::new(steps), Err(FlowError::DuplicateStep(id)) if id == "a"));
    }

    #[test]
    fn advance_and_retreat_update_statuses() {
        let mut flow = flow(&["basic", "contact", "hours"]);
        assert!(flow.advance());
        assert_eq!(flow.status_at(0), StepStatus::Done);
        assert_eq!(flow.current_status(), StepStatus::Active);

        assert!(flow.retreat());
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.status_at(1), StepStatus::Pending);
        assert_eq!(flow.current_status(), StepStatus::Active);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut flow = flow(&["only", "last"]);
        assert!(!flow.retreat());
        assert!(flow.advance());
        assert!(flow.is_last());
        assert!(!flow.advance());
        assert_eq!(flow.current_step().id, "last");
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut flow = flow(&["a", "b", "c"]);
        flow.advance();
        flow.advance();
        flow.reset();
        assert_eq!(flow.current_index(), 0);
        assert_eq!(flow.status_at(2), StepStatus::Pending);
    }
}
