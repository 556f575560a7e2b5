//! Per-file lowering state.
//!
//! Created fresh for every source file. Records which runtime helpers the
//! file's JSX used (grouped by the module they come from, in first-use
//! order) and whether dev-mode calls referenced `_jsxFileName`. Helper
//! locals never reuse a name already written in the file: `_jsx` becomes
//! `_jsx_1` when the source mentions `_jsx`. Once the statements are lowered, [`JsxFileState::finish`] turns the records into
//! the import/require statements and the file-name declaration.

use crate::transforms::ir::{DeclarationKeyword, IRNode, ImportSpecifier};
use indexmap::IndexMap;
use jsxi_common::{ModuleKind, ScriptTarget};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Preferred local name of the dev-mode file-name constant.
pub const JSX_FILE_NAME: &str = "_jsxFileName";

#[derive(Debug, Default)]
pub struct JsxFileState {
    /// Set once a dev-mode call needs `_jsxFileName`: (local name, file name).
    filename_declaration: Option<(String, String)>,
    /// Identifiers of the source plus every local handed out so far.
    taken_names: FxHashSet<String>,
    /// import source -> (helper name -> specifier)
    utilized_implicit_runtime_imports: IndexMap<String, IndexMap<String, ImportSpecifier>>,
}

impl JsxFileState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a file whose identifiers are read from `source_text`.
    pub fn for_source_text(source_text: &str) -> Self {
        let taken_names = source_text
            .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();
        JsxFileState {
            taken_names,
            ..Self::default()
        }
    }

    /// `base`, or `base_1`, `base_2`, ... when that is already taken.
    fn unique_name(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut suffix = 1;
        while self.taken_names.contains(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.taken_names.insert(name.clone());
        name
    }

    /// Local name for `helper` imported from `import_source`, recording the
    /// import the first time it is asked for.
    pub fn get_implicit_import(&mut self, import_source: &str, helper: &str) -> String {
        if let Some(existing) = self
            .utilized_implicit_runtime_imports
            .get(import_source)
            .and_then(|specifiers| specifiers.get(helper))
        {
            return existing.local.clone();
        }
        let local = self.unique_name(&format!("_{helper}"));
        debug!(import_source, helper, local = %local, "implicit runtime import");
        self.utilized_implicit_runtime_imports
            .entry(import_source.to_string())
            .or_default()
            .insert(helper.to_string(), ImportSpecifier::new(helper, local.clone()));
        local
    }

    /// Name of the file-name constant, declaring it on first use.
    pub fn get_filename_declaration(&mut self, file_name: &str) -> String {
        if let Some((local, _)) = &self.filename_declaration {
            return local.clone();
        }
        let local = self.unique_name(JSX_FILE_NAME);
        self.filename_declaration = Some((local.clone(), file_name.to_string()));
        local
    }

    /// Statements to place after the prologue: imports (or requires) first,
    /// then the file-name constant.
    pub fn finish(self, module: ModuleKind, target: ScriptTarget) -> Vec<IRNode> {
        let mut statements = Vec::new();
        for (module_spec, specifiers) in self.utilized_implicit_runtime_imports {
            let specifiers: Vec<ImportSpecifier> = specifiers.into_values().collect();
            if !module.uses_require() {
                statements.push(IRNode::NamedImports {
                    specifiers,
                    module_spec,
                });
            } else if target >= ScriptTarget::ES2015 {
                statements.push(IRNode::RequireDestructuring {
                    keyword: DeclarationKeyword::Const,
                    specifiers,
                    module_spec,
                });
            } else {
                for spec in specifiers {
                    statements.push(IRNode::RequireMember {
                        var_name: spec.local,
                        module_spec: module_spec.clone(),
                        import_name: spec.imported,
                    });
                }
            }
        }
        if let Some((name, file_name)) = self.filename_declaration {
            let keyword = if target >= ScriptTarget::ES2015 {
                DeclarationKeyword::Const
            } else {
                DeclarationKeyword::Var
            };
            statements.push(IRNode::VarDecl {
                keyword,
                name,
                initializer: Some(Box::new(IRNode::string(file_name))),
            });
        }
        statements
    }
}
