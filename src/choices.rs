//! Single-select choice button groups.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceGroup {
    len: usize,
    selected: Option<usize>,
}

impl ChoiceGroup {
    pub fn new(len: usize) -> Self {
        Self { len, selected: None }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select `index`, clearing any previous selection. Out-of-range indices
    /// are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.selected = Some(index);
        }
    }

    /// `(index, selected)` for every button, in order.
    pub fn flags(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.len).map(move |i| (i, self.selected == Some(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_exclusive() {
        let mut g = ChoiceGroup::new(3);
        g.select(0);
        g.select(2);
        let flags: Vec<_> = g.flags().collect();
        assert_eq!(flags, vec![(0, false), (1, false), (2, true)]);
    }

    #[test]
    fn reselecting_keeps_selection() {
        let mut g = ChoiceGroup::new(2);
        g.select(1);
        g.select(1);
        assert_eq!(g.selected(), Some(1));
        g.select(5);
        assert_eq!(g.selected(), Some(1));
    }
}
