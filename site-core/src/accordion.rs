//! FAQ accordion: at most one panel open.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    expanded: Vec<bool>,
}

impl Accordion {
    /// Start from the `aria-expanded` state found in the markup.
    pub fn new(expanded: Vec<bool>) -> Self {
        Self { expanded }
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    pub fn states(&self) -> &[bool] {
        &self.expanded
    }

    /// Toggle panel `index` and collapse every other one.
    pub fn toggle(&mut self, index: usize) {
        let Some(was_expanded) = self.expanded.get(index).copied() else {
            return;
        };
        for (i, state) in self.expanded.iter_mut().enumerate() {
            *state = i == index && !was_expanded;
        }
    }
}
