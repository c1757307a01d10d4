//! Depth-first tree rendering.
//!
//! [`TreePrinter`] turns a [`Tree`] into an ordered sequence of display
//! lines: the root name first, then one connector-prefixed line per node in
//! pre-order. Children are already sorted by the tree at insertion time, so
//! rendering is a pure function of tree structure.

use colored::Colorize;

use crate::error::TreeError;
use crate::node::NodeKey;
use crate::tree::Tree;

/// Connector drawn before every entry name.
const CONNECTOR: &str = "+-- ";
/// Continuation glyph carried once per ancestor level.
const PIPE: &str = "|";
/// Padding that brings the continuation glyph up to the connector width.
const PAD: &str = "   ";

/// Presentation options for [`TreePrinter`].
///
/// Styling colors the continuation glyph only; line content, ordering, and
/// widths are identical whether or not color is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStyle {
    /// Colorize the continuation glyph.
    pub color: bool,
}

impl RenderStyle {
    /// Plain text, no escape sequences.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Colorized continuation glyphs.
    pub fn colored() -> Self {
        Self { color: true }
    }

    /// The indentation unit repeated once per ancestor level.
    fn unit(&self) -> String {
        if self.color {
            format!("{}{PAD}", PIPE.bright_red())
        } else {
            format!("{PIPE}{PAD}")
        }
    }
}

/// Renders a [`Tree`] into display lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreePrinter {
    style: RenderStyle,
}

impl TreePrinter {
    /// Create a printer with plain styling.
    pub fn new() -> Self {
        Self {
            style: RenderStyle::plain(),
        }
    }

    /// Create a printer with the given style.
    pub fn with_style(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Render the tree as ordered display lines, root name first.
    ///
    /// Directories get a trailing `/`. Empty directories render their own
    /// line and nothing else; no bare continuation line is emitted before
    /// the next sibling.
    ///
    /// # Errors
    ///
    /// [`TreeError::Inconsistent`] when a child key does not resolve in the
    /// registry. That indicates a builder bug, so rendering aborts rather
    /// than dropping the subtree.
    pub fn render(&self, tree: &Tree) -> Result<Vec<String>, TreeError> {
        let root = tree.root()?;
        let unit = self.style.unit();

        let mut lines = Vec::with_capacity(tree.node_count());
        lines.push(root.name.to_string());

        // Depth travels with each key on an explicit stack; the walk never
        // re-derives it from parent links and never recurses, so tree depth
        // is bounded by memory, not the program stack.
        let mut stack: Vec<(NodeKey, usize)> = Vec::new();
        for child in root.children.iter().rev() {
            stack.push((child.clone(), 0));
        }

        while let Some((key, depth)) = stack.pop() {
            let node = tree
                .get(&key)
                .ok_or_else(|| TreeError::Inconsistent { key: key.clone() })?;

            let mut line = unit.repeat(depth);
            line.push_str(CONNECTOR);
            line.push_str(&node.name);
            if node.is_dir() {
                line.push('/');
            }
            lines.push(line);

            for child in node.children.iter().rev() {
                stack.push((child.clone(), depth + 1));
            }
        }

        Ok(lines)
    }

    /// Render and join with newlines.
    pub fn render_to_string(&self, tree: &Tree) -> Result<String, TreeError> {
        Ok(self.render(tree)?.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeKey};

    fn sample_tree() -> Tree {
        let mut tree = Tree::new("proj");
        tree.insert_child(
            &NodeKey::root(),
            Node::new_directory(NodeKey::from("a"), "a", Some(NodeKey::root())),
        )
        .unwrap();
        tree.insert_child(
            &NodeKey::from("a"),
            Node::new_file(NodeKey::from("a/b.txt"), "b.txt", NodeKey::from("a")),
        )
        .unwrap();
        tree.insert_child(
            &NodeKey::from("a"),
            Node::new_directory(NodeKey::from("a/c"), "c", Some(NodeKey::from("a"))),
        )
        .unwrap();
        tree
    }

    #[test]
    fn test_render_nested_tree() {
        let tree = sample_tree();
        let lines = TreePrinter::new().render(&tree).unwrap();
        assert_eq!(lines, vec!["proj", "+-- a/", "|   +-- c/", "|   +-- b.txt"]);
    }

    #[test]
    fn test_render_empty_tree_is_single_line() {
        let tree = Tree::new("empty");
        let lines = TreePrinter::new().render(&tree).unwrap();
        assert_eq!(lines, vec!["empty"]);
    }

    #[test]
    fn test_empty_directory_emits_no_continuation_line() {
        let mut tree = Tree::new("proj");
        for name in ["one", "two"] {
            tree.insert_child(
                &NodeKey::root(),
                Node::new_directory(NodeKey::from(name), name, Some(NodeKey::root())),
            )
            .unwrap();
        }
        let lines = TreePrinter::new().render(&tree).unwrap();
        // Two empty sibling directories, nothing in between.
        assert_eq!(lines, vec!["proj", "+-- one/", "+-- two/"]);
    }

    #[test]
    fn test_render_to_string_joins_lines() {
        let tree = sample_tree();
        let text = TreePrinter::new().render_to_string(&tree).unwrap();
        assert_eq!(text, "proj\n+-- a/\n|   +-- c/\n|   +-- b.txt");
    }

    // Single test for both styling cases: colored's override switch is
    // process-global, so splitting these would race under parallel testing.
    #[test]
    fn test_styling_preserves_line_structure() {
        let tree = sample_tree();
        let plain = TreePrinter::new().render(&tree).unwrap();

        // With color forced off, the styled renderer is byte-identical to
        // the plain one.
        colored::control::set_override(false);
        let styled = TreePrinter::with_style(RenderStyle::colored())
            .render(&tree)
            .unwrap();
        assert_eq!(plain, styled);

        // With color forced on, lines differ only by escape sequences.
        colored::control::set_override(true);
        let styled = TreePrinter::with_style(RenderStyle::colored())
            .render(&tree)
            .unwrap();
        colored::control::unset_override();

        assert_eq!(plain.len(), styled.len());
        for (plain_line, styled_line) in plain.iter().zip(&styled) {
            assert_eq!(plain_line, &strip_escapes(styled_line));
        }
    }

    fn strip_escapes(line: &str) -> String {
        let mut out = String::new();
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for esc in chars.by_ref() {
                    if esc == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
