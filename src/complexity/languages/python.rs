use super::{LanguageAnalyzer, StructuralMetrics};
use crate::complexity::syntax_tree::{measure_tree, parse, TreeGrammar};
use crate::core::{Result, SourceFile};

static PYTHON_GRAMMAR: TreeGrammar = TreeGrammar {
    function_kinds: &["function_definition", "lambda"],
    class_kinds: &["class_definition"],
    decision_kinds: &[
        "if_statement",
        "elif_clause",
        "for_statement",
        "while_statement",
        "except_clause",
        "case_clause",
        "conditional_expression",
        "boolean_operator",
        "for_in_clause",
        "if_clause",
    ],
    logical_expression: None,
};

/// Python structure from a tree-sitter-python syntax tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct PythonAnalyzer;

impl LanguageAnalyzer for PythonAnalyzer {
    fn name(&self) -> &'static str {
        "python"
    }

    fn analyze_structure(&self, file: &SourceFile) -> Result<StructuralMetrics> {
        let tree = parse(file, &tree_sitter_python::LANGUAGE.into(), "Python")?;
        Ok(measure_tree(&tree, &PYTHON_GRAMMAR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn analyze(code: &str) -> StructuralMetrics {
        PythonAnalyzer
            .analyze_structure(&SourceFile::new("mod.py", code))
            .unwrap()
    }

    #[test]
    fn test_simple_function() {
        let s = analyze("def f():\n    return 1\n");
        assert_eq!(s.function_count, 1);
        assert_eq!(s.max_function_complexity, 1);
        assert!(!s.heuristic);
    }

    #[test]
    fn test_decisions_per_function() {
        let s = analyze(indoc! {"
            def classify(x):
                if x > 10:
                    return 'big'
                elif x > 5 and x < 8:
                    return 'mid'
                for i in range(x):
                    while i:
                        i -= 1
                try:
                    pass
                except ValueError:
                    pass
                return 'small'
        "});
        // 1 + if + elif + and + for + while + except
        assert_eq!(s.max_function_complexity, 7);
    }

    #[test]
    fn test_nested_function_is_counted_separately() {
        let s = analyze(indoc! {"
            def outer(items):
                def inner(x):
                    if x:
                        return x
                return [inner(i) for i in items]
        "});
        assert_eq!(s.function_count, 2);
        // outer: 1 + comprehension for; inner: 1 + if
        assert_eq!(s.cyclomatic, 2.0);
    }

    #[test]
    fn test_classes_counted() {
        let s = analyze(indoc! {"
            class A:
                pass

            class B(A):
                def m(self):
                    return 1
        "});
        assert_eq!(s.class_count, 2);
        assert_eq!(s.function_count, 1);
    }

    #[test]
    fn test_module_level_script() {
        let s = analyze("import sys\nif len(sys.argv) > 1:\n    print(sys.argv[1])\n");
        assert_eq!(s.function_count, 0);
        assert_eq!(s.cyclomatic, 2.0);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = PythonAnalyzer.analyze_structure(&SourceFile::new("bad.py", "def (:\n"));
        assert!(result.is_err());
    }
}
