//! Validation rule for the forward-time invariant.

use crate::graph::edge::EdgeKey;
use crate::graph::error::GraphError;
use crate::graph::node::Frame;

/// "The Arrow of Time Rule": an edge links a detection to a strictly later frame.
///
/// Same-frame edges are rejected as well as backward ones, since a tracked
/// object cannot be linked to another detection in its own frame.
pub(crate) fn check_edge(edge: EdgeKey, source_frame: Frame, target_frame: Frame) -> Result<(), GraphError> {
    if source_frame < target_frame {
        Ok(())
    } else {
        Err(GraphError::TimeDirectionViolation { edge, source_frame, target_frame })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1, true)]
    #[case(0, 5, true)]
    #[case(3, 3, false)]
    #[case(4, 2, false)]
    fn test_edge_direction(#[case] from: Frame, #[case] to: Frame, #[case] valid: bool) {
        let edge = EdgeKey::new(1, 2);
        let result = check_edge(edge, from, to);
        assert_eq!(result.is_ok(), valid);
        if let Err(e) = result {
            assert_eq!(e, GraphError::TimeDirectionViolation { edge, source_frame: from, target_frame: to });
        }
    }
}
