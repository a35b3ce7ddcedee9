//! Groups ranked concepts into main topics with co-occurring sub-topics

use crate::analysis::text::clauses;

use super::models::{ConceptCandidate, HierarchyNode};

pub struct HierarchicalClusterer {
    main_topics: usize,
    children_per_topic: usize,
    independent_nodes: usize,
}

impl HierarchicalClusterer {
    pub fn new(main_topics: usize, children_per_topic: usize, independent_nodes: usize) -> Self {
        Self {
            main_topics,
            children_per_topic,
            independent_nodes,
        }
    }

    /// The leading concepts become main topics, each collecting the other
    /// concepts it shares a clause with. Concepts left unused follow as
    /// childless topics. The returned order drives layout angles.
    pub fn cluster(&self, concepts: &[ConceptCandidate], content: &str) -> Vec<HierarchyNode> {
        let lower_clauses: Vec<String> = clauses(content).map(str::to_lowercase).collect();
        let topic_count = self.main_topics.min(concepts.len());

        let mut hierarchy: Vec<HierarchyNode> = concepts[..topic_count]
            .iter()
            .map(|topic| {
                let children = concepts
                    .iter()
                    .filter(|c| *c != topic && co_occur(&topic.text, &c.text, &lower_clauses))
                    .take(self.children_per_topic)
                    .cloned()
                    .collect();
                HierarchyNode::topic(topic.clone(), children)
            })
            .collect();

        let independents: Vec<HierarchyNode> = concepts
            .iter()
            .filter(|c| !is_used(&hierarchy, c))
            .take(self.independent_nodes)
            .map(|c| HierarchyNode::topic(c.clone(), Vec::new()))
            .collect();
        hierarchy.extend(independents);

        hierarchy
    }
}

fn is_used(hierarchy: &[HierarchyNode], concept: &ConceptCandidate) -> bool {
    hierarchy.iter().any(|node| {
        node.concept == *concept || node.children.iter().any(|child| child.concept == *concept)
    })
}

/// Both terms appear, case-insensitively, in at least one clause.
fn co_occur(a: &str, b: &str, lower_clauses: &[String]) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    lower_clauses
        .iter()
        .any(|clause| clause.contains(&a) && clause.contains(&b))
}
