//! Builds a cognitive map from document text

use chrono::{DateTime, Utc};

use crate::analysis::{TextAnalysis, TextAnalyzer};
use crate::config::EngineConfig;

use super::cluster::HierarchicalClusterer;
use super::edges::EdgeScorer;
use super::layout::GraphLayoutEngine;
use super::models::{CognitiveMap, Result};
use super::ranker::ConceptRanker;

/// Runs analysis, ranking, clustering, layout and edge scoring in order.
///
/// Holds only configuration and compiled patterns, so one builder can be
/// reused for any number of documents.
pub struct CognitiveMapBuilder {
    analyzer: TextAnalyzer,
    ranker: ConceptRanker,
    clusterer: HierarchicalClusterer,
    layout: GraphLayoutEngine,
    scorer: EdgeScorer,
}

impl Default for CognitiveMapBuilder {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl CognitiveMapBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        let map = &config.map;
        Self {
            analyzer: TextAnalyzer::new(config.analysis.clone()),
            ranker: ConceptRanker::new(map.max_concepts),
            clusterer: HierarchicalClusterer::new(
                map.main_topics,
                map.children_per_topic,
                map.independent_nodes,
            ),
            layout: GraphLayoutEngine::new(map),
            scorer: EdgeScorer::new(map),
        }
    }

    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    pub fn build(&self, document_id: i64, title: &str, text: &str) -> Result<CognitiveMap> {
        self.build_at(document_id, title, text, Utc::now())
    }

    /// Build with an explicit creation time
    pub fn build_at(
        &self,
        document_id: i64,
        title: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<CognitiveMap> {
        let analysis = self.analyzer.analyze(text);
        self.build_from_analysis(document_id, title, text, &analysis, now)
    }

    /// Build from an analysis already computed for `text`
    pub fn build_from_analysis(
        &self,
        document_id: i64,
        title: &str,
        text: &str,
        analysis: &TextAnalysis,
        now: DateTime<Utc>,
    ) -> Result<CognitiveMap> {
        if text.trim().is_empty() {
            log::debug!("Document {} has no content, returning empty map", document_id);
            return Ok(CognitiveMap::empty(document_id, title.to_string(), now));
        }

        let concepts = self
            .ranker
            .rank(&analysis.key_phrases, &analysis.entities, text);
        let hierarchy = self.clusterer.cluster(&concepts, text);
        let nodes = self.layout.layout(&hierarchy);
        let edges = self.scorer.score_edges(&nodes, &analysis.sentences, text);

        log::debug!(
            "Document {}: {} phrases, {} entities, {} concepts, {} nodes, {} edges",
            document_id,
            analysis.key_phrases.len(),
            analysis.entities.len(),
            concepts.len(),
            nodes.len(),
            edges.len()
        );

        CognitiveMap::new(document_id, title.to_string(), nodes, edges, now)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const PHOTOSYNTHESIS: &str =
        "Photosynthesis is a process. Plants use photosynthesis to convert light. Light is energy.";

    const ARTICLE: &str = "The Amazon Rainforest covers much of South America. \
        The Amazon River flows through Brazil and Peru. Deforestation threatens the \
        Amazon Rainforest, and deforestation leads to habitat loss. Scientists estimate \
        that 17 percent of the forest has been lost in 50 years. Conservation efforts \
        include \"protected areas\" and sustainable farming. Indigenous communities \
        have managed the forest for thousands of years. Climate regulation is a key \
        function of the rainforest, which stores carbon and produces oxygen. \
        The Amazon Rainforest is similar to other tropical forests like the Congo Basin.";

    fn assert_map_invariants(map: &CognitiveMap) {
        let ids: HashSet<&str> = map.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), map.nodes().len(), "node ids must be unique");
        assert!(map.nodes().len() <= 30);
        assert!(map.edges().len() <= 30);

        for node in map.nodes() {
            assert!((0.0..=1.0).contains(&node.importance));
        }
        for edge in map.edges() {
            assert!(ids.contains(edge.source_id.as_str()));
            assert!(ids.contains(edge.target_id.as_str()));
            assert!(edge.weight > 0.15 && edge.weight <= 1.0);
        }
    }

    #[test]
    fn test_empty_content_gives_empty_map() {
        let map = CognitiveMapBuilder::default().build(7, "Empty", "").unwrap();
        assert!(map.is_empty());
        assert!(map.edges().is_empty());
        assert_eq!(map.document_id, 7);
        assert_eq!(map.title, "Empty");
    }

    #[test]
    fn test_too_short_content_is_not_an_error() {
        let map = CognitiveMapBuilder::default().build(1, "Short", "Hi.").unwrap();
        assert!(map.edges().is_empty());
    }

    #[test]
    fn test_photosynthesis_scenario() {
        let map = CognitiveMapBuilder::default()
            .build(1, "Biology", PHOTOSYNTHESIS)
            .unwrap();

        assert_map_invariants(&map);
        assert_eq!(map.nodes()[0].text, "Photosynthesis");
        assert_eq!(map.nodes()[0].id, "node_0");
        assert!(map.nodes().iter().any(|n| n.text == "Light"));
        assert!(!map.edges().is_empty());
    }

    #[test]
    fn test_article_respects_invariants() {
        let map = CognitiveMapBuilder::default()
            .build(2, "Amazon", ARTICLE)
            .unwrap();

        assert_map_invariants(&map);
        assert!(!map.nodes().is_empty());
        for pair in map.edges().windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = CognitiveMapBuilder::default();
        let now = Utc::now();
        let a = builder.build_at(3, "Amazon", ARTICLE, now).unwrap();
        let b = builder.build_at(3, "Amazon", ARTICLE, now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_node_ids_are_sequential() {
        let map = CognitiveMapBuilder::default()
            .build(4, "Amazon", ARTICLE)
            .unwrap();
        for (i, node) in map.nodes().iter().enumerate() {
            assert_eq!(node.id, format!("node_{}", i));
        }
    }

    #[test]
    fn test_map_round_trips_through_json() {
        let map = CognitiveMapBuilder::default()
            .build(5, "Amazon", ARTICLE)
            .unwrap();
        let json = serde_json::to_string(&map).unwrap();
        let back: CognitiveMap = serde_json::from_str(&json).unwrap();

        let ids = |m: &CognitiveMap| {
            m.edges()
                .iter()
                .map(|e| (e.id.clone(), e.source_id.clone(), e.target_id.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&back), ids(&map));
        assert_eq!(back.nodes().len(), map.nodes().len());
    }
}
