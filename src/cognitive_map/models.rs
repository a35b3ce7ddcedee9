//! Data models for cognitive maps

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::EntityKind;

#[derive(Error, Debug, PartialEq)]
pub enum MapError {
    #[error("Edge {edge_id} references unknown node {node_id}")]
    DanglingEdge { edge_id: String, node_id: String },

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("{field} out of range: {value}")]
    ValueOutOfRange { field: String, value: f32 },
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Category of a concept, carried onto the map node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConceptCategory {
    Concept,
    Entity,
    Data,
    Other,
}

impl ConceptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Entity => "entity",
            Self::Data => "data",
            Self::Other => "other",
        }
    }
}

impl From<EntityKind> for ConceptCategory {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::NamedOrPlace => Self::Entity,
            EntityKind::Concept => Self::Concept,
            EntityKind::Number => Self::Data,
            EntityKind::Other => Self::Other,
        }
    }
}

impl fmt::Display for ConceptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deduplicated, scored phrase or entity eligible to become a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptCandidate {
    pub text: String,
    pub importance: f32,
    pub category: ConceptCategory,
    /// Whole-word occurrences / 10, capped at 1
    pub frequency: f32,
}

impl ConceptCandidate {
    pub fn new(text: impl Into<String>, importance: f32, category: ConceptCategory, frequency: f32) -> Self {
        Self {
            text: text.into(),
            importance: importance.clamp(0.0, 1.0),
            category,
            frequency: frequency.clamp(0.0, 1.0),
        }
    }

    /// Ranking key
    pub fn score(&self) -> f32 {
        self.importance * self.frequency
    }
}

/// A concept placed in the topic hierarchy. Only main topics (level 0)
/// carry children.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub concept: ConceptCandidate,
    pub level: u8,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn topic(concept: ConceptCandidate, children: Vec<ConceptCandidate>) -> Self {
        Self {
            concept,
            level: 0,
            children: children.into_iter().map(Self::child).collect(),
        }
    }

    pub fn child(concept: ConceptCandidate) -> Self {
        Self {
            concept,
            level: 1,
            children: Vec::new(),
        }
    }

    /// Number of map nodes this entry expands to
    pub fn expanded_len(&self) -> usize {
        1 + self.children.len()
    }
}

/// Relationship label assigned to an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    #[serde(rename = "is-a")]
    IsA,
    #[serde(rename = "has-a")]
    HasA,
    #[serde(rename = "causes")]
    Causes,
    #[serde(rename = "part-of")]
    PartOf,
    #[serde(rename = "similar")]
    Similar,
    #[serde(rename = "opposite")]
    Opposite,
    #[serde(rename = "related")]
    Related,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsA => "is-a",
            Self::HasA => "has-a",
            Self::Causes => "causes",
            Self::PartOf => "part-of",
            Self::Similar => "similar",
            Self::Opposite => "opposite",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned concept in a map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapNode {
    pub id: String,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub importance: f32,
    pub category: String,
}

/// A weighted, labeled relation between two nodes of the same map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub weight: f32,
    pub label: String,
}

/// The node/edge graph summarizing one document.
///
/// Built once per generation; regenerating produces a new map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveMap {
    pub document_id: i64,
    pub title: String,
    nodes: Vec<MapNode>,
    edges: Vec<MapEdge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CognitiveMap {
    /// Assemble a map, rejecting duplicate node ids, dangling edge endpoints
    /// and weights or importances outside [0, 1].
    pub fn new(
        document_id: i64,
        title: String,
        nodes: Vec<MapNode>,
        edges: Vec<MapEdge>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let mut ids = HashSet::new();
        for node in &nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(MapError::DuplicateNodeId(node.id.clone()));
            }
            check_unit(&format!("node {} importance", node.id), node.importance)?;
        }

        for edge in &edges {
            for endpoint in [&edge.source_id, &edge.target_id] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(MapError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
            check_unit(&format!("edge {} weight", edge.id), edge.weight)?;
        }

        Ok(Self {
            document_id,
            title,
            nodes,
            edges,
            created_at: now,
            updated_at: now,
        })
    }

    /// A map with no nodes or edges, the valid result for degenerate input
    pub fn empty(document_id: i64, title: String, now: DateTime<Utc>) -> Self {
        Self {
            document_id,
            title,
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[MapEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges touching `id`, in map order
    pub fn edges_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a MapEdge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source_id == id || e.target_id == id)
    }

    /// Nodes connected to `id` by an edge
    pub fn neighbors(&self, id: &str) -> Vec<&MapNode> {
        self.edges_for(id)
            .filter_map(|e| {
                let other = if e.source_id == id { &e.target_id } else { &e.source_id };
                self.node(other)
            })
            .collect()
    }
}

fn check_unit(field: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MapError::ValueOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> MapNode {
        MapNode {
            id: id.to_string(),
            text: id.to_uppercase(),
            x: 0.0,
            y: 0.0,
            importance: 0.5,
            category: "concept".to_string(),
        }
    }

    fn edge(source: &str, target: &str, weight: f32) -> MapEdge {
        MapEdge {
            id: format!("edge_{}_{}", source, target),
            source_id: source.to_string(),
            target_id: target.to_string(),
            weight,
            label: "related".to_string(),
        }
    }

    #[test]
    fn test_rejects_dangling_edge() {
        let result = CognitiveMap::new(
            1,
            "t".to_string(),
            vec![node("node_0")],
            vec![edge("node_0", "node_7", 0.5)],
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            MapError::DanglingEdge {
                edge_id: "edge_node_0_node_7".to_string(),
                node_id: "node_7".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_node_id() {
        let result = CognitiveMap::new(
            1,
            "t".to_string(),
            vec![node("node_0"), node("node_0")],
            Vec::new(),
            Utc::now(),
        );
        assert!(matches!(result, Err(MapError::DuplicateNodeId(_))));
    }

    #[test]
    fn test_rejects_weight_out_of_range() {
        let result = CognitiveMap::new(
            1,
            "t".to_string(),
            vec![node("a"), node("b")],
            vec![edge("a", "b", 1.5)],
            Utc::now(),
        );
        assert!(matches!(result, Err(MapError::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_neighbors() {
        let map = CognitiveMap::new(
            1,
            "t".to_string(),
            vec![node("a"), node("b"), node("c")],
            vec![edge("a", "b", 0.5), edge("c", "a", 0.3)],
            Utc::now(),
        )
        .unwrap();

        let ids: Vec<&str> = map.neighbors("a").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(map.neighbors("missing").is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let map = CognitiveMap::new(
            42,
            "Doc".to_string(),
            vec![node("node_0"), node("node_1")],
            vec![edge("node_0", "node_1", 0.4)],
            Utc::now(),
        )
        .unwrap();

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["documentId"], 42);
        assert_eq!(json["edges"][0]["sourceId"], "node_0");
        assert_eq!(json["edges"][0]["targetId"], "node_1");

        let back: CognitiveMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_relationship_labels() {
        assert_eq!(Relationship::IsA.to_string(), "is-a");
        assert_eq!(
            serde_json::to_string(&Relationship::PartOf).unwrap(),
            "\"part-of\""
        );
        assert_eq!(ConceptCategory::from(EntityKind::Number), ConceptCategory::Data);
    }
}
