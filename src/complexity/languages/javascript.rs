use super::{LanguageAnalyzer, StructuralMetrics};
use crate::complexity::syntax_tree::{measure_tree, parse, TreeGrammar};
use crate::core::{Result, SourceFile};

static JS_GRAMMAR: TreeGrammar = TreeGrammar {
    function_kinds: &[
        "function_declaration",
        "function_expression",
        "function",
        "generator_function_declaration",
        "generator_function",
        "arrow_function",
        "method_definition",
    ],
    class_kinds: &["class_declaration", "class", "abstract_class_declaration"],
    decision_kinds: &[
        "if_statement",
        "for_statement",
        "for_in_statement",
        "while_statement",
        "do_statement",
        "catch_clause",
        "switch_case",
        "ternary_expression",
    ],
    logical_expression: Some(("binary_expression", &["&&", "||", "??"])),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dialect {
    JavaScript,
    TypeScript,
}

/// JavaScript and TypeScript structure from tree-sitter syntax trees.
#[derive(Clone, Copy, Debug)]
pub struct JavaScriptAnalyzer {
    dialect: Dialect,
}

impl JavaScriptAnalyzer {
    pub const fn javascript() -> Self {
        Self {
            dialect: Dialect::JavaScript,
        }
    }

    pub const fn typescript() -> Self {
        Self {
            dialect: Dialect::TypeScript,
        }
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn name(&self) -> &'static str {
        match self.dialect {
            Dialect::JavaScript => "javascript",
            Dialect::TypeScript => "typescript",
        }
    }

    fn analyze_structure(&self, file: &SourceFile) -> Result<StructuralMetrics> {
        let is_tsx = file
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsx"));

        let tree = match self.dialect {
            Dialect::JavaScript => parse(file, &tree_sitter_javascript::LANGUAGE.into(), "JavaScript")?,
            Dialect::TypeScript if is_tsx => {
                parse(file, &tree_sitter_typescript::LANGUAGE_TSX.into(), "TSX")?
            }
            Dialect::TypeScript => parse(
                file,
                &tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                "TypeScript",
            )?,
        };
        Ok(measure_tree(&tree, &JS_GRAMMAR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn analyze_js(code: &str) -> StructuralMetrics {
        JavaScriptAnalyzer::javascript()
            .analyze_structure(&SourceFile::new("app.js", code))
            .unwrap()
    }

    #[test]
    fn test_logical_operators_count() {
        let s = analyze_js("function f(a, b) { if (a && b || c) { return 1; } return a ?? b; }\n");
        // 1 + if + && + || + ??
        assert_eq!(s.max_function_complexity, 5);
        assert_eq!(s.function_count, 1);
    }

    #[test]
    fn test_arithmetic_is_not_a_decision() {
        let s = analyze_js("function add(a, b) { return a + b * 2; }\n");
        assert_eq!(s.max_function_complexity, 1);
    }

    #[test]
    fn test_class_with_methods_and_arrows() {
        let s = analyze_js(indoc! {"
            class Store {
              constructor() { this.items = []; }
              add(item) {
                if (!item) { throw new Error('empty'); }
                this.items.push(item);
              }
            }
            const total = (xs) => xs.length > 0 ? xs.length : 0;
        "});
        assert_eq!(s.class_count, 1);
        assert_eq!(s.function_count, 3);
        assert_eq!(s.max_function_complexity, 2);
    }

    #[test]
    fn test_switch_cases_and_loops() {
        let s = analyze_js(indoc! {"
            function route(kind) {
              switch (kind) {
                case 'a': return 1;
                case 'b': return 2;
                default: return 0;
              }
              for (const x of []) {}
              do {} while (false);
              try {} catch (e) {}
            }
        "});
        // 1 + 2 cases + for-of + do + catch
        assert_eq!(s.max_function_complexity, 6);
    }

    #[test]
    fn test_typescript_annotations_parse() {
        let s = JavaScriptAnalyzer::typescript()
            .analyze_structure(&SourceFile::new(
                "svc.ts",
                "export function id<T>(x: T): T { if (x) { return x; } return x; }\n",
            ))
            .unwrap();
        assert_eq!(s.function_count, 1);
        assert_eq!(s.max_function_complexity, 2);
    }

    #[test]
    fn test_tsx_uses_tsx_grammar() {
        let s = JavaScriptAnalyzer::typescript()
            .analyze_structure(&SourceFile::new(
                "view.tsx",
                "export const View = (p: { ok: boolean }) => p.ok ? <div /> : null;\n",
            ))
            .unwrap();
        assert_eq!(s.function_count, 1);
        assert_eq!(s.max_function_complexity, 2);
    }

    #[test]
    fn test_invalid_js_is_error() {
        let result = JavaScriptAnalyzer::javascript()
            .analyze_structure(&SourceFile::new("bad.js", "function ( {\n"));
        assert!(result.is_err());
    }
}
