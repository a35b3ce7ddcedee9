//! Deterministic circular layout for a topic hierarchy

use std::f64::consts::PI;

use crate::config::MapConfig;

use super::models::{HierarchyNode, MapNode};

pub struct GraphLayoutEngine {
    topic_radius: f32,
    leaf_radius: f32,
    child_radius: f32,
    child_spread: f32,
    child_importance_factor: f32,
}

impl GraphLayoutEngine {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            topic_radius: config.topic_radius,
            leaf_radius: config.leaf_radius,
            child_radius: config.child_radius,
            child_spread: config.child_spread,
            child_importance_factor: config.child_importance_factor,
        }
    }

    /// Place top-level entries evenly around the origin and each child
    /// around its parent. Ids are `node_<n>` in insertion order.
    pub fn layout(&self, hierarchy: &[HierarchyNode]) -> Vec<MapNode> {
        let mut nodes = Vec::with_capacity(hierarchy.iter().map(HierarchyNode::expanded_len).sum());
        let topic_count = hierarchy.len() as f64;

        for (index, entry) in hierarchy.iter().enumerate() {
            let angle = 2.0 * PI * index as f64 / topic_count;
            let radius = f64::from(if entry.children.is_empty() {
                self.leaf_radius
            } else {
                self.topic_radius
            });
            let x = angle.cos() * radius;
            let y = angle.sin() * radius;

            nodes.push(MapNode {
                id: format!("node_{}", nodes.len()),
                text: entry.concept.text.clone(),
                x: x as f32,
                y: y as f32,
                importance: entry.concept.importance.clamp(0.0, 1.0),
                category: entry.concept.category.to_string(),
            });

            let child_count = entry.children.len() as f64;
            for (child_index, child) in entry.children.iter().enumerate() {
                let child_angle =
                    angle + (child_index as f64 - child_count / 2.0) * self.child_spread as f64;
                let child_radius = self.child_radius as f64;

                nodes.push(MapNode {
                    id: format!("node_{}", nodes.len()),
                    text: child.concept.text.clone(),
                    x: (x + child_angle.cos() * child_radius) as f32,
                    y: (y + child_angle.sin() * child_radius) as f32,
                    importance: (child.concept.importance * self.child_importance_factor)
                        .clamp(0.0, 1.0),
                    category: child.concept.category.to_string(),
                });
            }
        }

        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognitive_map::models::{ConceptCandidate, ConceptCategory};

    fn concept(text: &str, importance: f32) -> ConceptCandidate {
        ConceptCandidate::new(text, importance, ConceptCategory::Entity, 1.0)
    }

    fn engine() -> GraphLayoutEngine {
        GraphLayoutEngine::new(&MapConfig::default())
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_leaf_topics_on_outer_circle() {
        let hierarchy = vec![
            HierarchyNode::topic(concept("A", 0.5), Vec::new()),
            HierarchyNode::topic(concept("B", 0.5), Vec::new()),
        ];
        let nodes = engine().layout(&hierarchy);

        assert!(close(nodes[0].x, 200.0) && close(nodes[0].y, 0.0));
        assert!(close(nodes[1].x, -200.0) && close(nodes[1].y, 0.0));
        assert_eq!(nodes[0].category, "entity");
    }

    #[test]
    fn test_children_placed_around_parent() {
        let hierarchy = vec![HierarchyNode::topic(
            concept("Parent", 0.9),
            vec![concept("Left", 0.5), concept("Right", 1.0)],
        )];
        let nodes = engine().layout(&hierarchy);

        assert_eq!(nodes.len(), 3);
        assert!(close(nodes[0].x, 150.0) && close(nodes[0].y, 0.0));

        // child 0: angle (0 - 1) * 0.5 = -0.5 rad, 80 from the parent
        let expected_x = 150.0 + (-0.5f32).cos() * 80.0;
        let expected_y = (-0.5f32).sin() * 80.0;
        assert!(close(nodes[1].x, expected_x));
        assert!(close(nodes[1].y, expected_y));

        // child 1 sits at angle 0, straight out from the parent
        assert!(close(nodes[2].x, 230.0) && close(nodes[2].y, 0.0));

        assert!(close(nodes[1].importance, 0.4));
        assert!(close(nodes[2].importance, 0.8));
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let hierarchy = vec![
            HierarchyNode::topic(concept("A", 0.5), vec![concept("B", 0.5)]),
            HierarchyNode::topic(concept("C", 0.5), Vec::new()),
        ];
        let ids: Vec<String> = engine().layout(&hierarchy).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["node_0", "node_1", "node_2"]);
    }

    #[test]
    fn test_empty_hierarchy() {
        assert!(engine().layout(&[]).is_empty());
    }
}
