//! Behaviour of `#[derive(Mergeable)]` records inside the merge engine.

use anyhow::{Result, ensure};
use patchmerge::structural::{Kind, Structural};
use patchmerge::{
    MergeConfig, MergeStrategy, Mergeable, Shared, equivalent, merge, merge_with_stats,
    named_set::extract_name,
};
use rstest::rstest;

#[derive(Clone, Debug, Default, PartialEq, Mergeable)]
struct Item {
    name: String,
    v: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Mergeable)]
struct Rule {
    #[merge(name)]
    full_path: String,
    name: String,
    r#type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Mergeable)]
struct Secret {
    #[merge(skip)]
    value: String,
}

mod aliased {
    use patchmerge as pm;

    #[derive(Clone, Debug, Default, PartialEq, pm::Mergeable)]
    #[merge(crate = "pm")]
    pub(super) struct Labels {
        pub(super) values: Vec<String>,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Mergeable)]
struct Wrapper<T> {
    name: String,
    inner: Option<T>,
}

#[derive(Clone, Debug, Default, Mergeable)]
struct Vertex {
    name: String,
    weight: u32,
    next: Option<Shared<Vertex>>,
}

fn item(name: &str, v: u32) -> Item {
    Item {
        name: name.to_owned(),
        v,
    }
}

#[rstest]
#[case::first_seen(MergeStrategy::UniqueFirstSeen, 1)]
#[case::last_seen(MergeStrategy::UniqueLastSeen, 99)]
fn unique_strategies_pick_the_winner(
    #[case] strategy: MergeStrategy,
    #[case] expected_x: u32,
) -> Result<()> {
    let mut dst = vec![item("x", 1), item("y", 2)];
    let src = vec![item("x", 99), item("z", 3)];
    merge(&mut dst, &src, &MergeConfig::new().with_strategy(strategy))?;
    ensure!(dst == vec![item("x", expected_x), item("y", 2), item("z", 3)]);
    Ok(())
}

#[rstest]
fn overwrite_yields_exactly_the_source() -> Result<()> {
    let mut dst = vec![item("x", 1), item("y", 2)];
    let src = vec![item("x", 99)];
    merge(&mut dst, &src, &MergeConfig::new())?;
    ensure!(dst == src);
    Ok(())
}

#[rstest]
fn explicit_name_field_keys_the_record() {
    let rule = Rule {
        full_path: "/Common/redirect".into(),
        name: "redirect".into(),
        r#type: "http".into(),
    };
    assert_eq!(extract_name(&rule), Some("/Common/redirect"));
    let names: Vec<&str> = rule.fields().iter().map(|field| field.name()).collect();
    assert_eq!(names, ["full_path", "name", "type"]);
}

#[rstest]
fn opaque_records_merge_as_a_whole() -> Result<()> {
    let mut dst = Secret::default();
    let src = Secret {
        value: "s3cr3t".into(),
    };
    merge(&mut dst, &src, &MergeConfig::new())?;
    ensure!(dst == src);
    ensure!(dst.kind() == Kind::Record);
    ensure!(!dst.is_empty_value());
    ensure!(equivalent(&dst, &src));
    ensure!(!equivalent(&dst, &Secret::default()));
    Ok(())
}

#[rstest]
fn renamed_crate_paths_work() -> Result<()> {
    let mut dst = aliased::Labels {
        values: vec!["a".into()],
    };
    let src = aliased::Labels {
        values: vec!["b".into()],
    };
    merge(&mut dst, &src, &MergeConfig::new().with_strategy(MergeStrategy::AppendAdditive))?;
    ensure!(dst.values == ["a", "b"]);
    Ok(())
}

#[rstest]
fn generic_records_merge_their_parameters() -> Result<()> {
    let mut dst = Wrapper {
        name: "outer".into(),
        inner: Some(item("x", 0)),
    };
    let src = Wrapper {
        name: String::new(),
        inner: Some(item("x", 4)),
    };
    merge(&mut dst, &src, &MergeConfig::new())?;
    ensure!(dst.inner == Some(item("x", 4)));
    ensure!(dst.name == "outer");
    Ok(())
}

fn ring(first: Vertex, second: Vertex) -> (Shared<Vertex>, Shared<Vertex>) {
    let head = Shared::new(first);
    let tail = Shared::new(second);
    head.write().next = Some(tail.clone());
    tail.write().next = Some(head.clone());
    (head, tail)
}

fn vertex(name: &str, weight: u32) -> Vertex {
    Vertex {
        name: name.to_owned(),
        weight,
        next: None,
    }
}

#[rstest]
fn graph_merged_with_itself_is_untouched() -> Result<()> {
    let (head, _tail) = ring(vertex("root", 1), vertex("leaf", 5));
    let mut dst = head.clone();
    let stats = merge_with_stats(&mut dst, &head, &MergeConfig::new().with_override())?;
    ensure!(dst.ptr_eq(&head));
    ensure!(head.read().name == "root");
    ensure!(stats.cycles_cut == 0);
    Ok(())
}

#[rstest]
fn cyclic_graphs_merge_each_node_once() -> Result<()> {
    let (src, _) = ring(vertex("root", 1), vertex("leaf", 5));
    let (mut dst, dst_tail) = ring(Vertex::default(), Vertex::default());
    let stats = merge_with_stats(&mut dst, &src, &MergeConfig::new())?;
    ensure!(dst.read().name == "root");
    ensure!(dst.read().weight == 1);
    ensure!(dst_tail.read().name == "leaf");
    ensure!(dst_tail.read().weight == 5);
    ensure!(stats.cycles_cut == 1);
    Ok(())
}
