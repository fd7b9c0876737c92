use std::fmt;

/// Points at one bubble in the panel. Bubbles are never removed, so the
/// position stays valid for the whole session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleHandle(usize);

impl BubbleHandle {
    pub fn new(index: usize) -> BubbleHandle {
        return BubbleHandle(index);
    }

    pub fn index(&self) -> usize {
        return self.0;
    }
}

impl fmt::Display for BubbleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "#{}", self.0);
    }
}
