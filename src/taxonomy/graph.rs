//! Invariant-preserving concept graph.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::error::{GraphError, Result};
use crate::lexicon::Lexicon;

use super::types::{Concept, ConceptId, Relation};

/// A single-rooted, transitively-reduced DAG of concepts.
///
/// The graph owns every concept and relation admitted to it and enforces
/// four invariants on every mutation: the backing structure stays acyclic,
/// has at most one root once edges exist, remains its own transitive
/// reduction, and no two concepts share a label or a canonical sense. A
/// rejected mutation leaves the graph untouched.
///
/// Concepts are stored in an arena in admission order; their [`ConceptId`]
/// is the arena index and doubles as the vertex weight in the backing
/// adjacency structure, so identity handles stay out of value equality.
pub struct ConceptGraph {
    lexicon: Arc<dyn Lexicon>,
    /// Admitted concepts; a concept's id is its index here.
    nodes: Vec<Concept>,
    /// Admitted relations.
    edges: Vec<Relation>,
    /// Backing adjacency structure over concept ids.
    dag: DiGraph<ConceptId, ()>,
    /// Concept id -> vertex in the backing structure.
    node_index: HashMap<ConceptId, NodeIndex>,
}

impl std::fmt::Debug for ConceptGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptGraph")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("dag", &self.dag)
            .field("node_index", &self.node_index)
            .finish_non_exhaustive()
    }
}

impl ConceptGraph {
    /// Create an empty graph validating against `lexicon`.
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self {
            lexicon,
            nodes: Vec::new(),
            edges: Vec::new(),
            dag: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// The lexicon this graph validates against.
    pub fn lexicon(&self) -> &dyn Lexicon {
        &*self.lexicon
    }

    /// Number of admitted concepts.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of admitted relations.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when no concept has been admitted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The concept behind an id, if the id was issued by this graph.
    pub fn concept(&self, id: ConceptId) -> Option<&Concept> {
        self.nodes.get(id.0)
    }

    /// All admitted concepts with their ids, in admission order.
    pub fn concepts(&self) -> impl Iterator<Item = (ConceptId, &Concept)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, concept)| (ConceptId(index), concept))
    }

    /// All admitted relations, in admission order.
    pub fn relations(&self) -> &[Relation] {
        &self.edges
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Admit a concept.
    ///
    /// Fails with `DuplicateLabel` or `DuplicateSense` when any of the
    /// concept's labels, or its canonical sense, already belongs to an
    /// admitted concept. On success the concept enters the arena and the
    /// backing structure together.
    pub fn add_node(&mut self, concept: Concept) -> Result<ConceptId> {
        for label in concept.labels() {
            if self.nodes.iter().any(|c| c.has_label(label)) {
                return Err(GraphError::DuplicateLabel(label.clone()).into());
            }
        }
        if self
            .nodes
            .iter()
            .any(|c| c.canonical_sense() == concept.canonical_sense())
        {
            return Err(GraphError::DuplicateSense(concept.canonical_sense().clone()).into());
        }

        let id = ConceptId(self.nodes.len());
        let vertex = self.dag.add_node(id);
        self.node_index.insert(id, vertex);
        self.nodes.push(concept);
        Ok(id)
    }

    /// Admit a relation.
    ///
    /// Validation short-circuits on the first failure and commits nothing:
    /// both endpoints must be admitted (`NodeNotFound`), the source sense
    /// must sit on the lexicon's hypernym path of the target sense
    /// (`NotAHypernym`), neither endpoint may already reach the other
    /// (`RedundantEdge` / `CycleDetected`), and the edge must not leave
    /// the backing structure with more than one root (`MultipleRoots`,
    /// checked against a provisional insert that is rolled back on
    /// failure).
    pub fn add_edge(&mut self, relation: Relation) -> Result<()> {
        let source = self.vertex(relation.source)?;
        let target = self.vertex(relation.target)?;

        let source_sense = self.nodes[relation.source.0].canonical_sense().clone();
        let target_sense = self.nodes[relation.target.0].canonical_sense().clone();

        let hypernyms = self.lexicon.hypernym_path(&target_sense)?;
        if !hypernyms.contains(&source_sense) {
            return Err(GraphError::NotAHypernym {
                source_sense,
                target_sense,
            }
            .into());
        }

        // One reachability query per direction covers transitive reduction
        // and acyclicity at once.
        if has_path_connecting(&self.dag, source, target, None) {
            return Err(GraphError::RedundantEdge {
                source_sense,
                target_sense,
            }
            .into());
        }
        if has_path_connecting(&self.dag, target, source, None) {
            return Err(GraphError::CycleDetected {
                source_sense,
                target_sense,
            }
            .into());
        }

        let edge = self.dag.add_edge(source, target, ());
        let roots = self.dag.externals(Direction::Incoming).count();
        if roots > 1 {
            self.dag.remove_edge(edge);
            return Err(GraphError::MultipleRoots(roots).into());
        }

        self.edges.push(relation);
        Ok(())
    }

    /// Resolve `label` to a new concept and attach it under `parent`.
    ///
    /// Resolution failures (`UnknownLabel`, `AmbiguousLabel`) and
    /// admission failures propagate; when the edge admission fails after
    /// the node was admitted, the node is retracted first so no orphan is
    /// left behind.
    pub fn add_descriptor_as_new_node(
        &mut self,
        label: &str,
        parent: ConceptId,
    ) -> Result<ConceptId> {
        self.vertex(parent)?;

        let concept = Concept::from_label(label, &*self.lexicon)?;
        let id = self.add_node(concept)?;

        if let Err(err) = self.add_edge(Relation::new(parent, id)) {
            tracing::warn!(label, %err, "retracting concept after failed edge admission");
            self.retract_node(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Append a synonym to an admitted concept.
    ///
    /// Fails with `NodeNotFound` when `target` was not issued by this
    /// graph, and propagates `NotSynonymous` from the concept itself. The
    /// backing structure stores only ids, so the arena copy is the single
    /// authority for the label set.
    pub fn add_descriptor_to_node(&mut self, label: &str, target: ConceptId) -> Result<()> {
        self.vertex(target)?;
        if self.nodes.iter().any(|c| c.has_label(label)) {
            // Either a no-op re-add on `target` or a collision with
            // another concept; only the former is allowed.
            if self.nodes[target.0].has_label(label) {
                return Ok(());
            }
            return Err(GraphError::DuplicateLabel(label.to_string()).into());
        }

        let lexicon = Arc::clone(&self.lexicon);
        self.nodes[target.0].add_label(label, &*lexicon)
    }

    /// Unwind the most recently admitted, still unlinked concept. Only
    /// used to keep composite admissions atomic; the public API stays
    /// append-only.
    fn retract_node(&mut self, id: ConceptId) {
        debug_assert_eq!(id.0, self.nodes.len() - 1);
        if let Some(vertex) = self.node_index.remove(&id) {
            self.dag.remove_node(vertex);
        }
        self.nodes.pop();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// True when any admitted concept carries `term` as a label, or as its
    /// canonical sense when `term` follows sense-name syntax.
    pub fn contains_term(&self, term: &str) -> bool {
        self.nodes.iter().any(|c| c.contains(term))
    }

    /// Value-equality membership, cross-checked against the backing
    /// structure so drift between the two collections cannot go unnoticed.
    pub fn contains_node(&self, concept: &Concept) -> bool {
        self.concepts()
            .any(|(id, c)| c == concept && self.node_index.contains_key(&id))
    }

    /// Full-equality membership for relations, cross-checked against the
    /// backing structure.
    pub fn contains_edge(&self, relation: &Relation) -> bool {
        if !self.edges.contains(relation) {
            return false;
        }
        match (
            self.node_index.get(&relation.source),
            self.node_index.get(&relation.target),
        ) {
            (Some(&source), Some(&target)) => self.dag.find_edge(source, target).is_some(),
            _ => false,
        }
    }

    /// Id of the admitted concept equal to `concept`, if any.
    pub fn find_node(&self, concept: &Concept) -> Option<ConceptId> {
        self.concepts()
            .find(|(_, c)| *c == concept)
            .map(|(id, _)| id)
    }

    /// Ids with zero incoming edges, in id order. At most one once the
    /// graph has edges; isolated concepts count until they are linked.
    pub fn roots(&self) -> Vec<ConceptId> {
        let mut roots: Vec<ConceptId> = self
            .dag
            .externals(Direction::Incoming)
            .map(|vertex| self.dag[vertex])
            .collect();
        roots.sort_unstable();
        roots
    }

    /// True when a directed path from `from` to `to` exists in the backing
    /// structure, including the trivial zero-length path.
    pub fn reaches(&self, from: ConceptId, to: ConceptId) -> Result<bool> {
        let from = self.vertex(from)?;
        let to = self.vertex(to)?;
        Ok(has_path_connecting(&self.dag, from, to, None))
    }

    /// Topological generations of the backing structure.
    ///
    /// Generation 0 holds the roots; generation k holds concepts whose
    /// longest path from a root has length k. Pure query for layout and
    /// export collaborators, which pair each depth with the concept's
    /// canonical sense as a display label.
    pub fn layered_depths(&self) -> HashMap<ConceptId, usize> {
        let mut indegree: HashMap<NodeIndex, usize> = self
            .dag
            .node_indices()
            .map(|vertex| {
                (
                    vertex,
                    self.dag
                        .neighbors_directed(vertex, Direction::Incoming)
                        .count(),
                )
            })
            .collect();

        let mut frontier: Vec<NodeIndex> = indegree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(vertex, _)| *vertex)
            .collect();

        let mut depths = HashMap::with_capacity(self.nodes.len());
        let mut depth = 0;
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for vertex in frontier {
                depths.insert(self.dag[vertex], depth);
                for successor in self.dag.neighbors_directed(vertex, Direction::Outgoing) {
                    if let Some(degree) = indegree.get_mut(&successor) {
                        *degree -= 1;
                        if *degree == 0 {
                            next.push(successor);
                        }
                    }
                }
            }
            frontier = next;
            depth += 1;
        }
        depths
    }

    fn vertex(&self, id: ConceptId) -> Result<NodeIndex> {
        self.node_index
            .get(&id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()).into())
    }
}
