/// Monotonic state revision.
///
/// Every observable mutation of client state advances the revision by one, so a
/// consumer that remembers the last revision it rendered can tell whether the
/// projection needs recomputing without diffing anything.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(pub u64);

impl Revision {
    pub const INITIAL: Revision = Revision(0);

    pub fn next(self) -> Self {
        Revision(self.0 + 1)
    }

    pub fn advance(&mut self) -> Self {
        *self = self.next();
        *self
    }

    pub fn is_newer_than(self, seen: Revision) -> bool {
        self > seen
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}
