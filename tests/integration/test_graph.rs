//! Tests for building and validating concept taxonomies.

use std::sync::Arc;

use lexigraph::{
    Concept, ConceptGraph, GraphError, LexiconError, LexigraphError, MemoryLexicon, Relation,
};

/// A small WordNet-like fixture: a noun hierarchy rooted at `entity`,
/// plus an ambiguous label ("bank") with two senses.
fn fixture_lexicon() -> Arc<MemoryLexicon> {
    Arc::new(
        MemoryLexicon::new()
            .with_noun("entity.n.01", ["entity"], ["entity.n.01"])
            .with_noun(
                "animal.n.01",
                ["animal", "creature", "fauna"],
                ["entity.n.01", "animal.n.01"],
            )
            .with_noun(
                "dog.n.01",
                ["dog", "domestic_dog", "canis_familiaris"],
                ["entity.n.01", "animal.n.01", "dog.n.01"],
            )
            .with_noun(
                "cat.n.01",
                ["cat", "true_cat"],
                ["entity.n.01", "animal.n.01", "cat.n.01"],
            )
            .with_noun(
                "bank.n.01",
                ["bank", "riverbank"],
                ["entity.n.01", "bank.n.01"],
            )
            .with_noun(
                "bank.n.02",
                ["bank", "depository_financial_institution"],
                ["entity.n.01", "bank.n.02"],
            ),
    )
}

#[test]
fn test_generalization_chain() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    let entity = graph
        .add_node(Concept::create(["entity"], "entity.n.01", &*lexicon).unwrap())
        .unwrap();
    let animal = graph
        .add_node(Concept::create(["animal", "creature"], "animal.n.01", &*lexicon).unwrap())
        .unwrap();

    graph.add_edge(Relation::new(entity, animal)).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.roots(), vec![entity], "entity should be the only root");

    // Extend the chain one level down.
    let dog = graph
        .add_node(Concept::create(["dog"], "dog.n.01", &*lexicon).unwrap())
        .unwrap();
    graph.add_edge(Relation::new(animal, dog)).unwrap();

    assert!(graph.reaches(entity, dog).unwrap());
    assert_eq!(graph.roots(), vec![entity]);
}

#[test]
fn test_shortcut_edge_is_redundant() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    let entity = graph
        .add_node(Concept::create(["entity"], "entity.n.01", &*lexicon).unwrap())
        .unwrap();
    let animal = graph
        .add_node(Concept::create(["animal"], "animal.n.01", &*lexicon).unwrap())
        .unwrap();
    graph.add_edge(Relation::new(entity, animal)).unwrap();
    let dog = graph
        .add_node(Concept::create(["dog"], "dog.n.01", &*lexicon).unwrap())
        .unwrap();
    graph.add_edge(Relation::new(animal, dog)).unwrap();

    // entity -> dog is implied by entity -> animal -> dog.
    let relations_before = graph.relations().to_vec();
    let err = graph.add_edge(Relation::new(entity, dog)).unwrap_err();

    assert!(matches!(
        err,
        LexigraphError::Graph(GraphError::RedundantEdge { .. })
    ));
    assert_eq!(
        graph.relations(),
        relations_before.as_slice(),
        "a rejected edge must leave the committed relations unchanged"
    );

    // The reverse direction closes a cycle.
    let err = graph.add_edge(Relation::new(dog, entity)).unwrap_err();
    assert!(matches!(
        err,
        LexigraphError::Graph(GraphError::CycleDetected { .. })
    ));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_edge_requires_lexical_hypernymy() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    let dog = graph
        .add_node(Concept::create(["dog"], "dog.n.01", &*lexicon).unwrap())
        .unwrap();
    let cat = graph
        .add_node(Concept::create(["cat"], "cat.n.01", &*lexicon).unwrap())
        .unwrap();

    // Siblings in the lexicon: neither generalizes the other.
    let err = graph.add_edge(Relation::new(dog, cat)).unwrap_err();
    assert!(matches!(
        err,
        LexigraphError::Graph(GraphError::NotAHypernym { .. })
    ));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_ambiguous_label_enumerates_candidates() {
    let err = Concept::from_label("bank", &*fixture_lexicon()).unwrap_err();

    match err {
        LexigraphError::Lexicon(LexiconError::AmbiguousLabel { label, candidates }) => {
            assert_eq!(label, "bank");
            assert_eq!(candidates.len(), 2);
            for candidate in &candidates {
                assert!(
                    candidate.synonyms.contains(&"bank".to_string()),
                    "every candidate sense should list the queried label"
                );
            }
        }
        other => panic!("expected AmbiguousLabel, got {other}"),
    }
}

#[test]
fn test_duplicate_label_rejected_across_nodes() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    graph
        .add_node(Concept::create(["bank", "riverbank"], "bank.n.01", &*lexicon).unwrap())
        .unwrap();

    // A lexically valid concept for the other bank sense still collides
    // on the shared label.
    let other_bank = Concept::create(
        ["bank", "depository_financial_institution"],
        "bank.n.02",
        &*lexicon,
    )
    .unwrap();
    let err = graph.add_node(other_bank).unwrap_err();
    assert!(matches!(
        err,
        LexigraphError::Graph(GraphError::DuplicateLabel(label)) if label == "bank"
    ));
    assert_eq!(graph.node_count(), 1);

    // Without the shared label the sense-uniqueness check still holds.
    let twin_sense =
        Concept::create(["riverbank"], "bank.n.01", &*lexicon).unwrap();
    let err = graph.add_node(twin_sense).unwrap_err();
    assert!(matches!(
        err,
        LexigraphError::Graph(GraphError::DuplicateLabel(_))
    ));
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_descriptor_driven_growth() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    let entity = graph
        .add_node(Concept::create(["entity"], "entity.n.01", &*lexicon).unwrap())
        .unwrap();
    let animal = graph.add_descriptor_as_new_node("animal", entity).unwrap();
    let dog = graph
        .add_descriptor_as_new_node("domestic_dog", animal)
        .unwrap();
    let cat = graph.add_descriptor_as_new_node("cat", animal).unwrap();

    // Synonyms accumulate on existing nodes without touching the topology.
    graph.add_descriptor_to_node("dog", dog).unwrap();
    graph.add_descriptor_to_node("true_cat", cat).unwrap();

    assert!(graph.contains_term("dog"));
    assert!(graph.contains_term("true_cat"));
    assert!(graph.contains_term("cat.n.01"));
    assert!(!graph.contains_term("fauna"));

    let depths = graph.layered_depths();
    assert_eq!(depths[&entity], 0);
    assert_eq!(depths[&animal], 1);
    assert_eq!(depths[&dog], 2);
    assert_eq!(depths[&cat], 2);

    assert_eq!(graph.roots(), vec![entity]);
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_failed_descriptor_growth_leaves_no_orphan() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    let entity = graph
        .add_node(Concept::create(["entity"], "entity.n.01", &*lexicon).unwrap())
        .unwrap();
    let animal = graph.add_descriptor_as_new_node("animal", entity).unwrap();
    let dog = graph
        .add_descriptor_as_new_node("domestic_dog", animal)
        .unwrap();

    // "cat" resolves to a unique sense, but dog is not among its
    // hypernyms; the provisionally admitted node must be retracted.
    let err = graph.add_descriptor_as_new_node("cat", dog).unwrap_err();
    assert!(matches!(
        err,
        LexigraphError::Graph(GraphError::NotAHypernym { .. })
    ));
    assert_eq!(graph.node_count(), 3);
    assert!(!graph.contains_term("cat"));

    // An ambiguous descriptor fails before any admission.
    let err = graph.add_descriptor_as_new_node("bank", entity).unwrap_err();
    assert!(matches!(
        err,
        LexigraphError::Lexicon(LexiconError::AmbiguousLabel { .. })
    ));
    assert_eq!(graph.node_count(), 3);
}

#[test]
fn test_second_root_rejected_and_rolled_back() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    let entity = graph
        .add_node(Concept::create(["entity"], "entity.n.01", &*lexicon).unwrap())
        .unwrap();
    let animal = graph.add_descriptor_as_new_node("animal", entity).unwrap();

    // Two concepts admitted but never linked.
    graph
        .add_node(Concept::create(["riverbank"], "bank.n.01", &*lexicon).unwrap())
        .unwrap();
    let dog = graph
        .add_node(Concept::create(["dog"], "dog.n.01", &*lexicon).unwrap())
        .unwrap();

    // Linking dog still leaves riverbank rootless on its own, so the
    // insert is rolled back.
    let err = graph.add_edge(Relation::new(animal, dog)).unwrap_err();
    assert!(matches!(
        err,
        LexigraphError::Graph(GraphError::MultipleRoots(2))
    ));
    assert_eq!(graph.edge_count(), 1);
    assert!(!graph.reaches(animal, dog).unwrap());
}

#[test]
fn test_membership_is_value_based() {
    let lexicon = fixture_lexicon();
    let mut graph = ConceptGraph::new(lexicon.clone());

    let entity = graph
        .add_node(Concept::create(["entity"], "entity.n.01", &*lexicon).unwrap())
        .unwrap();
    let animal = graph
        .add_node(Concept::create(["animal", "creature"], "animal.n.01", &*lexicon).unwrap())
        .unwrap();
    graph.add_edge(Relation::new(entity, animal)).unwrap();

    // A structurally equal concept built elsewhere counts as a member,
    // whatever order its labels were given in.
    let twin = Concept::create(["creature", "animal"], "animal.n.01", &*lexicon).unwrap();
    assert!(graph.contains_node(&twin));
    assert_eq!(graph.find_node(&twin), Some(animal));

    let labeled = Relation::with_label(entity, animal, "is-a");
    assert!(graph.contains_edge(&Relation::new(entity, animal)));
    assert!(
        !graph.contains_edge(&labeled),
        "a labeled relation is not equal to its unlabeled counterpart"
    );
}
