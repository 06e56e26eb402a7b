//! Serialized graph documents.
//!
//! The on-disk form is a node-link document: a `nodes` list of
//! id / labels / canonicalSense records and a `links` list of id pairs.
//! Ids are only meaningful within one document; rebuilding a graph
//! re-validates every record against the lexicon and assigns fresh ids,
//! so a round trip reproduces an isomorphic graph rather than an
//! id-identical one.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::lexicon::Lexicon;

use super::graph::ConceptGraph;
use super::types::{Concept, ConceptId, Relation};

/// One concept in a serialized graph document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Document-scoped id, referenced by link records.
    pub id: usize,
    /// Labels in insertion order.
    pub labels: Vec<String>,
    /// Canonical sense name.
    #[serde(rename = "canonicalSense")]
    pub canonical_sense: String,
}

/// One relation in a serialized graph document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Document-scoped id of the generalizing endpoint.
    pub source: usize,
    /// Document-scoped id of the specialized endpoint.
    pub target: usize,
    /// Optional classification tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Serialized form of a concept graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Concept records.
    pub nodes: Vec<NodeRecord>,
    /// Relation records. Documents written by other producers may call
    /// this list `edges`; both spellings deserialize.
    #[serde(alias = "edges")]
    pub links: Vec<LinkRecord>,
}

impl GraphDocument {
    /// Capture the current state of a graph.
    pub fn from_graph(graph: &ConceptGraph) -> Self {
        let nodes = graph
            .concepts()
            .map(|(id, concept)| NodeRecord {
                id: id.index(),
                labels: concept.labels().to_vec(),
                canonical_sense: concept.canonical_sense().as_str().to_string(),
            })
            .collect();

        let links = graph
            .relations()
            .iter()
            .map(|relation| LinkRecord {
                source: relation.source.index(),
                target: relation.target.index(),
                label: relation.label.clone(),
            })
            .collect();

        Self { nodes, links }
    }

    /// Rebuild a graph from this document, re-validating every record
    /// against `lexicon`.
    ///
    /// Records replay through the validating mutators in topological order
    /// of the document's links, attaching each concept's incoming links as
    /// soon as it is admitted so the single-root recount holds throughout
    /// the rebuild. Documents with unknown link endpoints or cyclic links
    /// fail with `InvalidDocument`.
    pub fn into_graph(self, lexicon: Arc<dyn Lexicon>) -> Result<ConceptGraph> {
        let mut records: BTreeMap<usize, NodeRecord> = BTreeMap::new();
        for record in self.nodes {
            if records.insert(record.id, record).is_some() {
                return Err(
                    GraphError::InvalidDocument("duplicate node id".to_string()).into(),
                );
            }
        }

        let mut indegree: BTreeMap<usize, usize> =
            records.keys().map(|id| (*id, 0)).collect();
        let mut outgoing: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut links_by_target: BTreeMap<usize, Vec<LinkRecord>> = BTreeMap::new();
        for link in self.links {
            if !records.contains_key(&link.source) || !records.contains_key(&link.target) {
                return Err(GraphError::InvalidDocument(format!(
                    "link {} -> {} references an unknown node id",
                    link.source, link.target
                ))
                .into());
            }
            if let Some(degree) = indegree.get_mut(&link.target) {
                *degree += 1;
            }
            outgoing.entry(link.source).or_default().push(link.target);
            links_by_target.entry(link.target).or_default().push(link);
        }

        let mut frontier: VecDeque<usize> = indegree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();

        let mut graph = ConceptGraph::new(lexicon);
        let mut remap: BTreeMap<usize, ConceptId> = BTreeMap::new();

        while let Some(doc_id) = frontier.pop_front() {
            let record = match records.remove(&doc_id) {
                Some(record) => record,
                None => continue,
            };

            let concept =
                Concept::create(record.labels, &record.canonical_sense, graph.lexicon())?;
            let id = graph.add_node(concept)?;
            remap.insert(doc_id, id);

            for link in links_by_target.remove(&doc_id).unwrap_or_default() {
                let source = remap.get(&link.source).copied().ok_or_else(|| {
                    GraphError::InvalidDocument(format!(
                        "link {} -> {} arrived before its source",
                        link.source, link.target
                    ))
                })?;
                let relation = match link.label {
                    Some(label) => Relation::with_label(source, id, label),
                    None => Relation::new(source, id),
                };
                graph.add_edge(relation)?;
            }

            for successor in outgoing.remove(&doc_id).unwrap_or_default() {
                if let Some(degree) = indegree.get_mut(&successor) {
                    *degree -= 1;
                    if *degree == 0 {
                        frontier.push_back(successor);
                    }
                }
            }
        }

        if !records.is_empty() {
            return Err(
                GraphError::InvalidDocument("links form a cycle".to_string()).into(),
            );
        }

        Ok(graph)
    }

    /// Read a document from a JSON file.
    pub fn read_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let document: GraphDocument = serde_json::from_str(&content)?;

        tracing::info!(
            nodes = document.nodes.len(),
            links = document.links.len(),
            path = %path.display(),
            "loaded graph document"
        );

        Ok(document)
    }

    /// Write the document as pretty-printed JSON.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;

        // Write to temp file first, then rename for atomicity.
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, path)?;

        Ok(())
    }
}
