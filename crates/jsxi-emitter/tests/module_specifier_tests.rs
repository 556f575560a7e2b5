//! Tests for module specifier synthesis.

use indexmap::IndexMap;
use jsxi_emitter::module_specifiers::{
    ImportModuleSpecifierPreference, ModuleResolutionKind, ModuleSpecifierHost, ModuleSpecifierOptions,
    NoFileSystem, get_local_module_specifiers, get_module_specifier, get_relative_path_from_directory,
    normalize_path, relative_import_source,
};
use rustc_hash::FxHashMap;

/// In-memory file system for package.json / index probing.
struct MemoryHost {
    files: FxHashMap<String, String>,
}

impl MemoryHost {
    fn new(files: &[(&str, &str)]) -> Self {
        MemoryHost {
            files: files
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
        }
    }
}

impl ModuleSpecifierHost for MemoryHost {
    fn file_exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read_file(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }
}

fn specifier(options: &ModuleSpecifierOptions, from: &str, to: &str) -> String {
    get_module_specifier(options, from, to, &NoFileSystem, ImportModuleSpecifierPreference::Auto)
}

#[test]
fn path_helpers_normalize_and_relate() {
    assert_eq!(normalize_path("/a/./b/../c"), "/a/c");
    assert_eq!(normalize_path("C:\\proj\\src\\..\\lib"), "C:/proj/lib");
    assert_eq!(normalize_path("../x/./y"), "../x/y");
    assert_eq!(get_relative_path_from_directory("/a/b", "/a/c/d.ts"), "../c/d.ts");
    assert_eq!(get_relative_path_from_directory("/a", "/a/b.ts"), "b.ts");
}

#[test]
fn sibling_file_gets_a_dot_slash_path_without_extension() {
    let options = ModuleSpecifierOptions::default();
    assert_eq!(specifier(&options, "/proj/src/app.tsx", "/proj/src/button.tsx"), "./button");
    assert_eq!(specifier(&options, "/proj/src/app.tsx", "/proj/lib/util.d.ts"), "../lib/util");
}

#[test]
fn index_is_dropped_only_under_node_resolution() {
    let node = ModuleSpecifierOptions::default();
    assert_eq!(specifier(&node, "/proj/app.ts", "/proj/widgets/index.ts"), "./widgets");

    let classic = ModuleSpecifierOptions {
        module_resolution: ModuleResolutionKind::Classic,
        ..ModuleSpecifierOptions::default()
    };
    assert_eq!(specifier(&classic, "/proj/app.ts", "/proj/widgets/index.ts"), "./widgets/index");
}

#[test]
fn js_extension_is_kept_when_the_file_uses_it() {
    let options = ModuleSpecifierOptions {
        add_js_extension: true,
        ..ModuleSpecifierOptions::default()
    };
    assert_eq!(specifier(&options, "/proj/app.ts", "/proj/widgets/index.ts"), "./widgets/index.js");
}

#[test]
fn base_url_path_is_preferred_when_relative_climbs_as_far() {
    let options = ModuleSpecifierOptions {
        base_url: Some("/base".to_string()),
        ..ModuleSpecifierOptions::default()
    };
    let specifiers = get_local_module_specifiers(
        &options,
        "/base/foo/bar.ts",
        "/base/a/b",
        ImportModuleSpecifierPreference::Auto,
    );
    assert_eq!(specifiers, vec!["foo/bar".to_string(), "../../foo/bar".to_string()]);

    let nearby = get_local_module_specifiers(
        &options,
        "/base/foo/a.ts",
        "/base/foo/b",
        ImportModuleSpecifierPreference::Auto,
    );
    assert_eq!(nearby, vec!["../a".to_string(), "foo/a".to_string()]);
}

#[test]
fn relative_preference_ignores_base_url() {
    let options = ModuleSpecifierOptions {
        base_url: Some("/base".to_string()),
        ..ModuleSpecifierOptions::default()
    };
    let specifiers = get_local_module_specifiers(
        &options,
        "/base/foo/bar.ts",
        "/base/a/b",
        ImportModuleSpecifierPreference::Relative,
    );
    assert_eq!(specifiers, vec!["../../foo/bar".to_string()]);
}

#[test]
fn paths_pattern_maps_back_to_its_key() {
    let mut paths = IndexMap::new();
    paths.insert("@app/*".to_string(), vec!["src/app/*".to_string()]);
    paths.insert("config".to_string(), vec!["src/config/index.ts".to_string()]);
    let options = ModuleSpecifierOptions {
        base_url: Some("/proj".to_string()),
        paths,
        ..ModuleSpecifierOptions::default()
    };
    assert_eq!(
        specifier(&options, "/proj/src/main.ts", "/proj/src/app/widgets/list.tsx"),
        "@app/widgets/list"
    );
    assert_eq!(specifier(&options, "/proj/src/main.ts", "/proj/src/config/index.ts"), "config");
}

#[test]
fn root_dirs_merge_into_one_virtual_directory() {
    let options = ModuleSpecifierOptions {
        root_dirs: vec!["/proj/src".to_string(), "/proj/generated".to_string()],
        ..ModuleSpecifierOptions::default()
    };
    assert_eq!(
        specifier(&options, "/proj/src/views/page.tsx", "/proj/generated/views/strings.ts"),
        "./strings"
    );
}

#[test]
fn node_modules_package_uses_the_package_name() {
    let options = ModuleSpecifierOptions::default();
    assert_eq!(
        specifier(&options, "/proj/src/app.tsx", "/proj/node_modules/preact/index.d.ts"),
        "preact"
    );
    assert_eq!(
        specifier(&options, "/proj/src/app.tsx", "/proj/node_modules/@types/react/jsx-runtime.d.ts"),
        "react/jsx-runtime"
    );
    assert_eq!(
        specifier(&options, "/proj/src/app.tsx", "/proj/node_modules/@types/emotion__react/index.d.ts"),
        "@emotion/react"
    );
}

#[test]
fn package_main_entry_is_imported_by_package_name() {
    let host = MemoryHost::new(&[
        ("/proj/node_modules/lib/package.json", r#"{ "types": "dist/main.d.ts" }"#),
        ("/proj/node_modules/lib/dist/main.d.ts", ""),
    ]);
    let options = ModuleSpecifierOptions::default();
    let spec = get_module_specifier(
        &options,
        "/proj/app.ts",
        "/proj/node_modules/lib/dist/main.d.ts",
        &host,
        ImportModuleSpecifierPreference::Auto,
    );
    assert_eq!(spec, "lib");
}

#[test]
fn index_shadowed_by_a_file_keeps_index() {
    let host = MemoryHost::new(&[("/proj/node_modules/lib/ui.d.ts", "")]);
    let options = ModuleSpecifierOptions::default();
    let spec = get_module_specifier(
        &options,
        "/proj/app.ts",
        "/proj/node_modules/lib/ui/index.d.ts",
        &host,
        ImportModuleSpecifierPreference::Auto,
    );
    assert_eq!(spec, "lib/ui/index");
}

#[test]
fn relative_import_source_is_rebased_onto_the_importing_file() {
    assert_eq!(
        relative_import_source("/proj/src/pages/home.tsx", "/proj", "./runtime"),
        "../../runtime"
    );
    assert_eq!(relative_import_source("/proj/app.tsx", "/proj", "./runtime"), "./runtime");
}
