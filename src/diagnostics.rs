//! Graphviz export of a tree's shape.
//!
//! Internal nodes are drawn as ellipses labelled with their value and subtree
//! size; runs are drawn as record nodes with one field per element. The export
//! only reads the tree.
//!
//! # Examples
//!
//! ```rust
//! use weftree::diagnostics::to_dot;
//! use weftree::{NaturalOrder, Tree};
//!
//! let tree = Tree::from_iter_with(0..20, &NaturalOrder);
//! let dot = to_dot(&tree);
//!
//! assert!(dot.starts_with("digraph tree {"));
//! assert!(dot.contains("->"));
//! ```

use crate::Tree;
use std::fmt;

/// Renders `tree` as a Graphviz `digraph`.
#[must_use]
pub fn to_dot<E: fmt::Display>(tree: &Tree<E>) -> String {
    Dot(tree).to_string()
}

/// Display adapter producing the dot text of a tree.
pub struct Dot<'a, E>(pub &'a Tree<E>);

impl<E: fmt::Display> fmt::Display for Dot<'_, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "digraph tree {{")?;
        let mut next_id = 0;
        write_subtree(self.0, formatter, &mut next_id)?;
        writeln!(formatter, "}}")
    }
}

/// Writes `tree` and its edges; returns the id of its root, if any.
fn write_subtree<E: fmt::Display>(
    tree: &Tree<E>,
    formatter: &mut fmt::Formatter<'_>,
    next_id: &mut usize,
) -> Result<Option<usize>, fmt::Error> {
    let id = *next_id;
    match tree {
        Tree::Empty => Ok(None),
        Tree::Run(run) => {
            *next_id += 1;
            let fields: Vec<String> = run
                .as_slice()
                .iter()
                .map(|element| escape_record(&element.to_string()))
                .collect();
            writeln!(
                formatter,
                "    n{id} [shape=record, label=\"{}\"];",
                fields.join("|")
            )?;
            Ok(Some(id))
        }
        Tree::Node(node) => {
            *next_id += 1;
            writeln!(
                formatter,
                "    n{id} [shape=ellipse, label=\"{}\\n{}\"];",
                escape_label(&node.value().to_string()),
                node.size()
            )?;
            for child in [node.left(), node.right()] {
                if let Some(child_id) = write_subtree(child, formatter, next_id)? {
                    writeln!(formatter, "    n{id} -> n{child_id};")?;
                }
            }
            Ok(Some(id))
        }
    }
}

fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        if matches!(character, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        if matches!(character, '"' | '\\' | '{' | '}' | '|' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaturalOrder;
    use rstest::rstest;

    #[rstest]
    fn test_empty_tree_has_no_nodes() {
        assert_eq!(to_dot(&Tree::<i32>::new()), "digraph tree {\n}\n");
    }

    #[rstest]
    fn test_run_is_single_record() {
        let tree = Tree::from_sorted_vec(vec![1, 2, 3]);
        assert_eq!(
            to_dot(&tree),
            "digraph tree {\n    n0 [shape=record, label=\"1|2|3\"];\n}\n"
        );
    }

    #[rstest]
    fn test_node_links_both_runs() {
        let tree = Tree::from_sorted_vec((0..9).collect::<Vec<i32>>());
        let dot = to_dot(&tree);
        assert!(dot.contains("n0 [shape=ellipse, label=\"4\\n9\"];"));
        assert!(dot.contains("n0 -> n1;"));
        assert!(dot.contains("n0 -> n2;"));
        assert!(dot.contains("label=\"0|1|2|3\""));
    }

    #[rstest]
    fn test_labels_are_escaped() {
        let tree = Tree::from_iter_with(["a|b".to_string(), "\"q\"".to_string()], &NaturalOrder);
        let dot = to_dot(&tree);
        assert!(dot.contains(r#"label="\"q\"|a\|b""#));
    }
}
