//! Builds the reference edges of a node.

use nodesetc_dsl::node::{ReferenceDirection, ReferenceEdge};
use nodesetc_sources::xml::Reference;

/// Returns one edge per reference in declaration order. A reference
/// without `IsForward` is a forward reference.
pub fn build_edges(references: &[Reference]) -> Vec<ReferenceEdge> {
    references
        .iter()
        .map(|reference| ReferenceEdge {
            target: reference.target.clone(),
            reference_type: reference.reference_type.clone(),
            direction: match reference.is_forward {
                Some(false) => ReferenceDirection::Inverse,
                Some(true) | None => ReferenceDirection::Forward,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodesetc_dsl::core::SourceSpan;
    use rstest::rstest;

    fn reference(reference_type: &str, is_forward: Option<bool>, target: &str) -> Reference {
        Reference {
            reference_type: reference_type.to_string(),
            is_forward,
            target: target.to_string(),
            span: SourceSpan::default(),
        }
    }

    #[rstest]
    #[case(None, ReferenceDirection::Forward)]
    #[case(Some(true), ReferenceDirection::Forward)]
    #[case(Some(false), ReferenceDirection::Inverse)]
    fn build_edges_direction(#[case] is_forward: Option<bool>, #[case] expected: ReferenceDirection) {
        let edges = build_edges(&[reference("HasSubtype", is_forward, "i=61")]);
        assert_eq!(edges[0].direction, expected);
    }

    #[test]
    fn build_edges_when_duplicates_then_kept_in_order() {
        let edges = build_edges(&[
            reference("HasComponent", None, "ns=1;i=2"),
            reference("HasTypeDefinition", None, "i=58"),
            reference("HasComponent", None, "ns=1;i=2"),
        ]);

        assert_eq!(
            edges,
            vec![
                ReferenceEdge {
                    target: "ns=1;i=2".to_string(),
                    reference_type: "HasComponent".to_string(),
                    direction: ReferenceDirection::Forward,
                },
                ReferenceEdge {
                    target: "i=58".to_string(),
                    reference_type: "HasTypeDefinition".to_string(),
                    direction: ReferenceDirection::Forward,
                },
                ReferenceEdge {
                    target: "ns=1;i=2".to_string(),
                    reference_type: "HasComponent".to_string(),
                    direction: ReferenceDirection::Forward,
                },
            ]
        );
    }

    #[test]
    fn build_edges_when_no_references_then_empty() {
        assert!(build_edges(&[]).is_empty());
    }
}
