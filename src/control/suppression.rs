/// Nestable gate that drops events while any `disable` is outstanding.
///
/// Every `disable` must be paired with exactly one `enable`. Unbalanced
/// calls are a caller bug; debug builds assert on an `enable` without a
/// matching `disable`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Suppression {
    depth: u32,
}

impl Suppression {
    pub fn disable(&mut self) {
        self.depth += 1;
    }

    pub fn enable(&mut self) {
        debug_assert!(self.depth > 0, "enable() called without a matching disable()");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn is_enabled(&self) -> bool {
        self.depth == 0
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}
