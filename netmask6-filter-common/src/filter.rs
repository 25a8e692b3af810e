//! Generic node of a filter expression tree

use crate::source::SourceAddress;

/// A predicate that can be plugged into a filter node
pub trait FilterExpr {
    /// Returns the raw (not negated) result of the predicate for an event received from `source`
    fn matches(&self, source: &SourceAddress) -> bool;
}

/// Filter node owning a predicate and the negate flag of the expression it was configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterNode<E> {
    expr: E,
    negate: bool,
}

impl<E: FilterExpr> FilterNode<E> {
    pub fn new(expr: E, negate: bool) -> Self {
        FilterNode { expr, negate }
    }

    pub fn expr(&self) -> &E {
        &self.expr
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    /// Evaluates the node for an event
    ///
    /// # Arguments
    /// * `source` - source address of the event
    ///
    /// Returns the result of the predicate, inverted if the node is negated
    pub fn eval(&self, source: &SourceAddress) -> bool {
        self.expr.matches(source) ^ self.negate
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterExpr, FilterNode};
    use crate::source::SourceAddress;

    struct LocalOnly;

    impl FilterExpr for LocalOnly {
        fn matches(&self, source: &SourceAddress) -> bool {
            *source == SourceAddress::Local
        }
    }

    #[test]
    fn test_eval_passes_raw_result() {
        let node = FilterNode::new(LocalOnly, false);
        assert!(node.eval(&SourceAddress::Local));
        assert_eq!(false, node.eval(&SourceAddress::Other));
    }

    #[test]
    fn test_eval_negated() {
        let node = FilterNode::new(LocalOnly, true);
        assert_eq!(false, node.eval(&SourceAddress::Local));
        assert!(node.eval(&SourceAddress::Other));
        assert!(node.negate());
    }
}
