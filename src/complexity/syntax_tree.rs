//! Grammar-driven structural walk over tree-sitter syntax trees.
//!
//! A [`TreeGrammar`] names the node kinds that open a function, declare a
//! class, or add a decision point. [`measure_tree`] walks the tree once and
//! attributes every decision to the innermost enclosing function; decisions
//! outside any function accumulate in a module-level bucket.

use super::languages::StructuralMetrics;
use crate::core::{Error, Result, SourceFile};
use tree_sitter::{Language, Node, Parser, Tree};

/// Node kinds that drive the structural walk for one grammar.
pub struct TreeGrammar {
    pub function_kinds: &'static [&'static str],
    pub class_kinds: &'static [&'static str],
    pub decision_kinds: &'static [&'static str],
    /// Binary-expression kind whose operator field decides whether it is a
    /// short-circuit decision (`&&`, `||`, `??`)
    pub logical_expression: Option<(&'static str, &'static [&'static str])>,
}

impl TreeGrammar {
    fn is_decision(&self, node: Node<'_>) -> bool {
        let kind = node.kind();
        if self.decision_kinds.contains(&kind) {
            return true;
        }
        match self.logical_expression {
            Some((expr_kind, operators)) if expr_kind == kind => node
                .child_by_field_name("operator")
                .map(|op| operators.contains(&op.kind()))
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// Parse `file` with `language`, rejecting trees that contain error nodes.
pub fn parse(file: &SourceFile, language: &Language, label: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| Error::parse(&file.path, format!("failed to load {label} grammar: {e}")))?;

    let tree = parser
        .parse(&file.content, None)
        .ok_or_else(|| Error::parse(&file.path, format!("{label} parser returned no tree")))?;

    if tree.root_node().has_error() {
        return Err(Error::parse(
            &file.path,
            format!("{label} syntax errors in source"),
        ));
    }
    Ok(tree)
}

/// Walk the tree and summarize its structure.
pub fn measure_tree(tree: &Tree, grammar: &TreeGrammar) -> StructuralMetrics {
    let mut function_complexities: Vec<u32> = Vec::new();
    let mut module_complexity: u32 = 1;
    let mut class_count = 0usize;

    let mut stack: Vec<(Node<'_>, Option<usize>)> = vec![(tree.root_node(), None)];
    while let Some((node, owner)) = stack.pop() {
        let kind = node.kind();
        let mut current = owner;

        // Keyword tokens share names with the nodes they introduce
        // (`function`, `class`, `lambda`).
        if !node.is_named() {
            continue;
        }

        if grammar.function_kinds.contains(&kind) {
            function_complexities.push(1);
            current = Some(function_complexities.len() - 1);
        } else if grammar.class_kinds.contains(&kind) {
            class_count += 1;
        } else if grammar.is_decision(node) {
            match owner {
                Some(idx) => function_complexities[idx] += 1,
                None => module_complexity += 1,
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push((child, current));
        }
    }

    StructuralMetrics::from_functions(&function_complexities, module_complexity, class_count, false)
}
