use super::{LanguageAnalyzer, StructuralMetrics};
use crate::complexity::cyclomatic::calculate_cyclomatic;
use crate::core::{Error, Result, SourceFile};
use syn::visit::Visit;
use syn::{ImplItemFn, ItemEnum, ItemFn, ItemStruct, ItemTrait, TraitItemFn};

/// Rust structure from a `syn` syntax tree.
///
/// Free functions, methods and trait methods with a default body count as
/// functions; structs, enums and traits count as classes.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustAnalyzer;

impl LanguageAnalyzer for RustAnalyzer {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn analyze_structure(&self, file: &SourceFile) -> Result<StructuralMetrics> {
        let ast = syn::parse_file(&file.content)
            .map_err(|e| Error::parse(&file.path, format!("Rust syntax error: {e}")))?;

        let mut visitor = StructureVisitor::default();
        visitor.visit_file(&ast);

        Ok(StructuralMetrics::from_functions(
            &visitor.functions,
            1,
            visitor.types,
            false,
        ))
    }
}

#[derive(Default)]
struct StructureVisitor {
    functions: Vec<u32>,
    types: usize,
}

impl<'ast> Visit<'ast> for StructureVisitor {
    fn visit_item_fn(&mut self, item: &'ast ItemFn) {
        self.functions.push(calculate_cyclomatic(&item.block));
        syn::visit::visit_item_fn(self, item);
    }

    fn visit_impl_item_fn(&mut self, item: &'ast ImplItemFn) {
        self.functions.push(calculate_cyclomatic(&item.block));
        syn::visit::visit_impl_item_fn(self, item);
    }

    fn visit_trait_item_fn(&mut self, item: &'ast TraitItemFn) {
        if let Some(block) = &item.default {
            self.functions.push(calculate_cyclomatic(block));
        }
        syn::visit::visit_trait_item_fn(self, item);
    }

    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        self.types += 1;
        syn::visit::visit_item_struct(self, item);
    }

    fn visit_item_enum(&mut self, item: &'ast ItemEnum) {
        self.types += 1;
        syn::visit::visit_item_enum(self, item);
    }

    fn visit_item_trait(&mut self, item: &'ast ItemTrait) {
        self.types += 1;
        syn::visit::visit_item_trait(self, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn analyze(code: &str) -> StructuralMetrics {
        RustAnalyzer
            .analyze_structure(&SourceFile::new("lib.rs", code))
            .unwrap()
    }

    #[test]
    fn test_functions_methods_and_types() {
        let s = analyze(indoc! {"
            pub struct Counter { n: u32 }

            pub enum Step { Up, Down }

            pub trait Reset {
                fn reset(&mut self);
                fn describe(&self) -> &str { \"reset\" }
            }

            impl Counter {
                pub fn apply(&mut self, step: Step) {
                    match step {
                        Step::Up => self.n += 1,
                        Step::Down if self.n > 0 => self.n -= 1,
                        Step::Down => {}
                    }
                }
            }

            fn helper() -> u32 { 1 }
        "});
        assert_eq!(s.class_count, 3);
        // describe, apply, helper
        assert_eq!(s.function_count, 3);
        assert_eq!(s.max_function_complexity, 3);
        assert!(!s.heuristic);
    }

    #[test]
    fn test_nested_fn_measured_separately() {
        let s = analyze(indoc! {"
            fn outer(x: bool) -> u8 {
                fn inner(y: bool) -> u8 { if y { 1 } else { 0 } }
                inner(x)
            }
        "});
        assert_eq!(s.function_count, 2);
        assert_eq!(s.cyclomatic, 1.5);
        assert_eq!(s.max_function_complexity, 2);
    }

    #[test]
    fn test_invalid_rust_is_error() {
        let result = RustAnalyzer.analyze_structure(&SourceFile::new("bad.rs", "fn broken( {"));
        assert!(result.is_err());
    }
}
