use std::rc::Rc;

use yew::Reducible;

/// Bumped after every successful mutation so list effects fetch again.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Revision(pub u32);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, (): ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests every bump yields a new revision
    #[test]
    fn test_revision_bumps() {
        let revision = Rc::new(Revision::default()).reduce(()).reduce(());
        assert_eq!(*revision, Revision(2));
    }
}
