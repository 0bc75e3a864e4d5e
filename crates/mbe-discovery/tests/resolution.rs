//! End-to-end selector resolution tests
//!
//! Exercises the orchestrator against an in-memory class universe: the
//! sample container `com.acme.Bench` declares a plain `run()` method and a
//! parametrized `scan(com.acme.Bench$State)` method with fixtures `[n=1]`
//! and `[n=2]`.

use mbe_discovery::{
    select_class, select_method, select_package, select_unique_id, DescriptorTree,
    DiscoveryOrchestrator, DiscoveryRequest, DiscoverySelector, NodeKind, UniqueId,
};
use mbe_model::ClassNameFilter;
use mbe_test_utils::sample_universe;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn engine_tree() -> DescriptorTree {
    DescriptorTree::new("microbenchmark-engine", "Microbenchmark Engine")
}

fn orchestrator() -> DiscoveryOrchestrator {
    DiscoveryOrchestrator::new(sample_universe())
}

fn discover(selectors: Vec<DiscoverySelector>) -> DescriptorTree {
    let tree = engine_tree();
    orchestrator().resolve(&DiscoveryRequest::new(selectors), &tree);
    tree
}

fn bench_class_id() -> UniqueId {
    UniqueId::for_engine("microbenchmark-engine").append("class", "com.acme.Bench")
}

#[test]
fn class_selector_discovers_the_full_subtree() {
    let tree = discover(vec![select_class("com.acme.Bench")]);

    let class = tree.find_by_unique_id(&bench_class_id()).unwrap();
    assert_eq!(class.kind(), NodeKind::Container);
    assert_eq!(class.display_name(), "com.acme.Bench");

    let children = class.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].kind(), NodeKind::Method);
    assert_eq!(children[0].display_name(), "run()");
    assert_eq!(children[1].kind(), NodeKind::Parametrized);

    let fixtures = children[1].children();
    assert_eq!(fixtures.len(), 2);
    let names: Vec<_> = fixtures.iter().map(|f| f.display_name()).collect();
    assert_eq!(names, vec!["[n=1]", "[n=2]"]);
    assert!(fixtures.iter().all(|f| f.kind() == NodeKind::Fixture));
    assert!(fixtures.iter().all(|f| f.children().is_empty()));
}

#[test]
fn expansion_completeness_counts_methods_and_fixtures() {
    // k = 2 qualifying methods, one parametrized with 2 fixtures
    let tree = discover(vec![select_class("com.acme.Bench")]);

    // engine root + container + 2 methods + 2 fixtures
    assert_eq!(tree.len(), 6);
}

#[test]
fn package_selector_discovers_every_qualifying_class() {
    let tree = discover(vec![select_package("com.acme")]);

    let class_names: Vec<_> = tree
        .root()
        .children()
        .iter()
        .map(|child| child.display_name())
        .collect();

    // Helpers has no benchmark methods and stays silent
    assert_eq!(
        class_names,
        vec!["com.acme.Bench", "com.acme.PlainBench", "com.acme.OverloadedBench"]
    );
}

#[test]
fn package_selector_honors_the_class_name_filter() {
    let tree = engine_tree();
    let request = DiscoveryRequest::new(vec![select_package("com.acme")])
        .with_class_name_filter(
            ClassNameFilter::include_patterns([r"^com\.acme\.Bench$"]).unwrap(),
        );
    orchestrator().resolve(&request, &tree);

    assert_eq!(tree.root().children().len(), 1);
    assert_eq!(tree.root().children()[0].display_name(), "com.acme.Bench");
}

#[test]
fn class_selector_honors_the_class_name_filter() {
    let tree = engine_tree();
    let request = DiscoveryRequest::new(vec![select_class("com.acme.Bench")])
        .with_class_name_filter(ClassNameFilter::include_patterns(["^org\\."]).unwrap());
    orchestrator().resolve(&request, &tree);

    assert!(tree.root().children().is_empty());
}

#[test]
fn method_selector_discovers_only_that_method() {
    let tree = discover(vec![select_method(
        "com.acme.Bench",
        "scan(com.acme.Bench$State)",
    )]);

    let class = tree.find_by_unique_id(&bench_class_id()).unwrap();
    let children = class.children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].kind(), NodeKind::Parametrized);

    // fixtures of a queue-processed parametrized match are expanded
    assert_eq!(children[0].children().len(), 2);
}

#[test]
fn unique_id_selector_resolves_a_class_with_its_children() {
    let tree = discover(vec![select_unique_id(bench_class_id())]);

    let class = tree.find_by_unique_id(&bench_class_id()).unwrap();
    assert_eq!(class.children().len(), 2);
    assert_eq!(tree.len(), 6);
}

#[test]
fn fixture_unique_id_resolves_without_materializing_siblings() {
    let fixture_id = bench_class_id()
        .append("method", "scan(com.acme.Bench$State)")
        .append("fixture", "[n=2]");
    let tree = discover(vec![select_unique_id(fixture_id.clone())]);

    let fixture = tree.find_by_unique_id(&fixture_id).unwrap();
    assert_eq!(fixture.display_name(), "[n=2]");

    // the parent chain exists, but no sibling fixture and no sibling method
    // was discovered
    let parametrized = fixture.parent().unwrap();
    assert_eq!(parametrized.children().len(), 1);
    let class = parametrized.parent().unwrap();
    assert_eq!(class.children().len(), 1);
    assert_eq!(tree.len(), 4);
}

#[test]
fn fixture_unique_id_round_trips_through_the_string_encoding() {
    let encoded = "[engine:microbenchmark-engine]/[class:com.acme.Bench]\
                   /[method:scan(com.acme.Bench$State)]/[fixture:%5Bn=2%5D]";
    let fixture_id: UniqueId = encoded.parse().unwrap();
    let tree = discover(vec![select_unique_id(fixture_id.clone())]);

    let fixture = tree.find_by_unique_id(&fixture_id).unwrap();
    assert_eq!(fixture.unique_id().to_string(), encoded);
}

#[test]
fn every_resolved_node_round_trips_by_unique_id() {
    let tree = discover(vec![select_class("com.acme.Bench")]);

    fn walk(node: &Arc<mbe_discovery::BenchmarkNode>, ids: &mut Vec<UniqueId>) {
        ids.push(node.unique_id().clone());
        for child in node.children() {
            walk(&child, ids);
        }
    }
    let mut ids = Vec::new();
    walk(tree.root(), &mut ids);
    assert_eq!(ids.len(), 6);

    for id in ids {
        // the string encoding decodes to the same id
        let decoded: UniqueId = id.to_string().parse().unwrap();
        assert_eq!(decoded, id);

        if decoded.depth() == 1 {
            continue;
        }
        // a fresh pass scoped to the decoded id resolves a structurally
        // equal node
        let scoped = discover(vec![select_unique_id(decoded.clone())]);
        let node = scoped.find_by_unique_id(&decoded).unwrap();
        assert_eq!(node.unique_id(), &decoded);
    }
}

#[test]
fn class_and_unique_id_routes_converge_on_one_node() {
    let fixture_id = bench_class_id()
        .append("method", "scan(com.acme.Bench$State)")
        .append("fixture", "[n=2]");

    // unique-id first, class selector second
    let tree_a = discover(vec![
        select_unique_id(fixture_id.clone()),
        select_class("com.acme.Bench"),
    ]);
    // class selector first, unique-id second
    let tree_b = discover(vec![
        select_class("com.acme.Bench"),
        select_unique_id(fixture_id),
    ]);

    for tree in [&tree_a, &tree_b] {
        assert_eq!(tree.root().children().len(), 1, "exactly one container");
        let class = tree.find_by_unique_id(&bench_class_id()).unwrap();
        assert_eq!(class.children().len(), 2);
        assert_eq!(tree.len(), 6);
    }
}

#[test]
fn non_qualifying_class_is_silently_unresolved() {
    let tree = discover(vec![select_class("com.acme.Helpers")]);
    assert!(tree.root().children().is_empty());
}

#[test]
fn unknown_class_is_silently_unresolved() {
    let tree = discover(vec![select_class("com.acme.DoesNotExist")]);
    assert!(tree.root().children().is_empty());
}

#[test]
fn malformed_segment_kind_is_silently_unresolved() {
    // a unique id whose last segment type no resolver owns
    let odd = UniqueId::for_engine("microbenchmark-engine").append("suite", "nightly");
    let tree = discover(vec![select_unique_id(odd)]);
    assert!(tree.root().children().is_empty());
}

#[test]
fn fixture_with_unresolvable_parent_creates_no_partial_nodes() {
    let orphan = bench_class_id()
        .append("method", "missing()")
        .append("fixture", "[n=1]");
    let tree = discover(vec![select_unique_id(orphan)]);

    // the class resolves as a parent attempt, but neither the method nor
    // the fixture materializes
    assert_eq!(tree.len(), 2);
    let class = tree.find_by_unique_id(&bench_class_id()).unwrap();
    assert!(class.children().is_empty());
}

#[test]
fn overloaded_methods_are_disambiguated_by_signature() {
    let class_id =
        UniqueId::for_engine("microbenchmark-engine").append("class", "com.acme.OverloadedBench");
    let tree = discover(vec![select_unique_id(class_id.append("method", "load(int)"))]);

    let class = tree.find_by_unique_id(&class_id).unwrap();
    let children = class.children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].display_name(), "load(int)");
}

#[test]
fn repeated_selectors_do_not_duplicate_children() {
    let tree = discover(vec![
        select_class("com.acme.Bench"),
        select_class("com.acme.Bench"),
        select_method("com.acme.Bench", "run()"),
    ]);

    let class = tree.find_by_unique_id(&bench_class_id()).unwrap();
    assert_eq!(class.children().len(), 2);
    assert_eq!(tree.len(), 6);
}
