//! Module specifier synthesis.
//!
//! Given the file that needs an import and the file being imported, produce
//! the specifier strings an `import` could use: a `node_modules` package
//! path, a type-root name, a `rootDirs` path, a `baseUrl`/`paths` mapping, or
//! a plain relative path. The lowering uses it to rebase a relative
//! `jsxImportSource` onto the file that receives the runtime import.
//!
//! Paths are handled as `/`-separated strings; backslashes are normalized
//! on the way in.

use indexmap::IndexMap;
use tracing::trace;

/// Module resolution strategy the specifiers must be resolvable under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModuleResolutionKind {
    Classic,
    #[default]
    NodeJs,
}

/// Caller preference between relative and `baseUrl`-relative specifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportModuleSpecifierPreference {
    #[default]
    Auto,
    Relative,
    NonRelative,
}

/// Compiler options that shape module specifiers.
#[derive(Clone, Debug, Default)]
pub struct ModuleSpecifierOptions {
    pub module_resolution: ModuleResolutionKind,
    pub base_url: Option<String>,
    /// `paths` patterns in declaration order.
    pub paths: IndexMap<String, Vec<String>>,
    pub root_dirs: Vec<String>,
    pub type_roots: Vec<String>,
    /// The importing file already writes `.js` on its relative imports.
    pub add_js_extension: bool,
}

/// File-system queries needed for package entry points and `/index` detection.
pub trait ModuleSpecifierHost {
    fn file_exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Option<String>;
}

/// A host that sees no files.
pub struct NoFileSystem;

impl ModuleSpecifierHost for NoFileSystem {
    fn file_exists(&self, _path: &str) -> bool {
        false
    }

    fn read_file(&self, _path: &str) -> Option<String> {
        None
    }
}

const EXTENSIONS_TO_REMOVE: [&str; 6] = [".d.ts", ".ts", ".js", ".tsx", ".jsx", ".json"];
const PROBE_EXTENSIONS: [&str; 7] = [".ts", ".tsx", ".d.ts", ".js", ".jsx", ".node", ".json"];

// =============================================================================
// Entry points
// =============================================================================

/// The preferred specifier for importing `to_file` from `from_file`.
pub fn get_module_specifier(
    options: &ModuleSpecifierOptions,
    from_file: &str,
    to_file: &str,
    host: &dyn ModuleSpecifierHost,
    preference: ImportModuleSpecifierPreference,
) -> String {
    let source_directory = get_directory_path(&normalize_path(from_file));
    let to_file = normalize_path(to_file);
    let specifier = get_global_module_specifier(options, &to_file, &source_directory, host)
        .or_else(|| {
            get_local_module_specifiers(options, &to_file, &source_directory, preference)
                .into_iter()
                .next()
        })
        .unwrap_or_default();
    trace!(from = from_file, to = %to_file, specifier = %specifier, "module specifier");
    specifier
}

/// Specifiers that do not depend on where the importing file lives:
/// type roots, `node_modules` packages and `rootDirs`.
pub fn get_global_module_specifier(
    options: &ModuleSpecifierOptions,
    module_file_name: &str,
    source_directory: &str,
    host: &dyn ModuleSpecifierHost,
) -> Option<String> {
    try_get_module_name_from_type_roots(options, module_file_name)
        .or_else(|| try_get_module_name_as_node_module(options, module_file_name, host, source_directory))
        .or_else(|| {
            if options.root_dirs.is_empty() {
                None
            } else {
                try_get_module_name_from_root_dirs(&options.root_dirs, module_file_name, source_directory)
            }
        })
}

/// Relative and `baseUrl`-relative candidates, best first.
pub fn get_local_module_specifiers(
    options: &ModuleSpecifierOptions,
    module_file_name: &str,
    source_directory: &str,
    preference: ImportModuleSpecifierPreference,
) -> Vec<String> {
    let relative_path = remove_extension_and_index_postfix(
        &ensure_path_is_non_module_name(&get_relative_path_from_directory(source_directory, module_file_name)),
        options.module_resolution,
        options.add_js_extension,
    );
    let base_url = match &options.base_url {
        Some(base_url) if preference != ImportModuleSpecifierPreference::Relative => normalize_path(base_url),
        _ => return vec![relative_path],
    };

    let Some(relative_to_base_url) = get_relative_path_if_in_directory(module_file_name, &base_url) else {
        return vec![relative_path];
    };

    let import_relative_to_base_url = remove_extension_and_index_postfix(
        &relative_to_base_url,
        options.module_resolution,
        options.add_js_extension,
    );
    if !options.paths.is_empty() {
        if let Some(from_paths) = try_get_module_name_from_paths(
            &remove_file_extension(&relative_to_base_url),
            &import_relative_to_base_url,
            &options.paths,
        ) {
            return vec![from_paths];
        }
    }

    if preference == ImportModuleSpecifierPreference::NonRelative {
        return vec![import_relative_to_base_url];
    }

    if is_path_relative_to_parent(&relative_to_base_url) {
        return vec![relative_path];
    }

    // A relative path wins when it climbs fewer directories than the way up to baseUrl.
    let path_from_source_to_base_url =
        ensure_path_is_non_module_name(&get_relative_path_from_directory(source_directory, &base_url));
    if get_relative_path_n_parents(&relative_path) < get_relative_path_n_parents(&path_from_source_to_base_url) {
        vec![relative_path, import_relative_to_base_url]
    } else {
        vec![import_relative_to_base_url, relative_path]
    }
}

/// Rebase a relative `jsxImportSource` declared in `base_directory` (the
/// directory of the config that set it) onto `importing_file`.
pub fn relative_import_source(importing_file: &str, base_directory: &str, import_source: &str) -> String {
    let target = normalize_path(&combine_paths(&normalize_path(base_directory), import_source));
    let source_directory = get_directory_path(&normalize_path(importing_file));
    ensure_path_is_non_module_name(&get_relative_path_from_directory(&source_directory, &target))
}

// =============================================================================
// Strategies
// =============================================================================

fn try_get_module_name_from_type_roots(options: &ModuleSpecifierOptions, module_file_name: &str) -> Option<String> {
    options.type_roots.iter().find_map(|root| {
        let root = normalize_path(root);
        let rest = module_file_name.strip_prefix(root.as_str())?.strip_prefix('/')?;
        // `/index` can always be dropped inside a type root.
        Some(remove_extension_and_index_postfix(
            rest,
            ModuleResolutionKind::NodeJs,
            options.add_js_extension,
        ))
    })
}

fn try_get_module_name_from_paths(
    relative_to_base_url_with_index: &str,
    relative_to_base_url: &str,
    paths: &IndexMap<String, Vec<String>>,
) -> Option<String> {
    for (key, patterns) in paths {
        for pattern_text in patterns {
            let pattern = remove_file_extension(&normalize_path(pattern_text));
            match pattern.find('*') {
                Some(0) if pattern.len() == 1 => continue,
                Some(star) => {
                    let prefix = &pattern[..star];
                    let suffix = &pattern[star + 1..];
                    if relative_to_base_url.len() >= prefix.len() + suffix.len()
                        && relative_to_base_url.starts_with(prefix)
                        && relative_to_base_url.ends_with(suffix)
                    {
                        let matched = &relative_to_base_url[prefix.len()..relative_to_base_url.len() - suffix.len()];
                        return Some(key.replacen('*', matched, 1));
                    }
                }
                None => {
                    if pattern == relative_to_base_url || pattern == relative_to_base_url_with_index {
                        return Some(key.clone());
                    }
                }
            }
        }
    }
    None
}

fn try_get_module_name_from_root_dirs(
    root_dirs: &[String],
    module_file_name: &str,
    source_directory: &str,
) -> Option<String> {
    let normalized_target = get_path_relative_to_root_dirs(module_file_name, root_dirs)?;
    let relative_path = match get_path_relative_to_root_dirs(source_directory, root_dirs) {
        Some(normalized_source) => ensure_path_is_non_module_name(&get_relative_path_from_directory(
            &normalized_source,
            &normalized_target,
        )),
        None => normalized_target,
    };
    Some(remove_file_extension(&relative_path))
}

fn get_path_relative_to_root_dirs(path: &str, root_dirs: &[String]) -> Option<String> {
    root_dirs.iter().find_map(|root| {
        let relative = get_relative_path_if_in_directory(path, &normalize_path(root))?;
        (!is_path_relative_to_parent(&relative)).then_some(relative)
    })
}

/// Indices into a path below `node_modules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeModulePathParts {
    top_level_node_modules_index: usize,
    top_level_package_name_index: usize,
    package_root_index: usize,
    file_name_index: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PathState {
    BeforeNodeModules,
    NodeModules,
    Scope,
    PackageContent,
}

/// `/base/node_modules/[@scope/]package/[sub/]file.js`, or `None` when the
/// path is not a file inside a package.
fn get_node_module_path_parts(full_path: &str) -> Option<NodeModulePathParts> {
    let bytes = full_path.as_bytes();
    let find_slash = |from: usize| -> Option<usize> {
        full_path.get(from..).and_then(|rest| rest.find('/')).map(|i| i + from)
    };

    let mut top_level_node_modules_index = 0;
    let mut top_level_package_name_index = full_path.len();
    let mut package_root_index = full_path.len();
    let mut state = PathState::BeforeNodeModules;
    let mut part_start;
    let mut part_end = Some(0usize);

    loop {
        let Some(start) = part_end else { break };
        part_start = start;
        part_end = find_slash(part_start + 1);
        let at_node_modules = full_path
            .get(part_start..)
            .is_some_and(|rest| rest.starts_with("/node_modules/"));
        match state {
            PathState::BeforeNodeModules => {
                if at_node_modules {
                    top_level_node_modules_index = part_start;
                    top_level_package_name_index = part_end.unwrap_or(full_path.len());
                    state = PathState::NodeModules;
                }
            }
            PathState::NodeModules | PathState::Scope => {
                if state == PathState::NodeModules && bytes.get(part_start + 1) == Some(&b'@') {
                    state = PathState::Scope;
                } else {
                    package_root_index = part_end.unwrap_or(full_path.len());
                    state = PathState::PackageContent;
                }
            }
            PathState::PackageContent => {
                if at_node_modules {
                    state = PathState::NodeModules;
                }
            }
        }
        if part_end.is_none() {
            return (state > PathState::NodeModules).then_some(NodeModulePathParts {
                top_level_node_modules_index,
                top_level_package_name_index,
                package_root_index,
                file_name_index: part_start,
            });
        }
    }
    None
}

fn try_get_module_name_as_node_module(
    options: &ModuleSpecifierOptions,
    module_file_name: &str,
    host: &dyn ModuleSpecifierHost,
    source_directory: &str,
) -> Option<String> {
    if options.module_resolution != ModuleResolutionKind::NodeJs {
        return None;
    }
    let parts = get_node_module_path_parts(module_file_name)?;

    let module_specifier = get_directory_or_extensionless_file_name(module_file_name, parts, host);

    let base_path = module_file_name.get(..parts.top_level_node_modules_index)?;
    let resolvable = if source_directory.starts_with(base_path) {
        // node_modules is in this directory or one of its parents.
        module_specifier
            .get(parts.top_level_package_name_index + 1..)?
            .to_string()
    } else {
        ensure_path_is_non_module_name(&get_relative_path_from_directory(source_directory, &module_specifier))
    };
    Some(get_package_name_from_at_types_directory(&resolvable))
}

fn get_directory_or_extensionless_file_name(
    path: &str,
    parts: NodeModulePathParts,
    host: &dyn ModuleSpecifierHost,
) -> String {
    let package_root_path = path.get(..parts.package_root_index).unwrap_or(path);
    let package_json_path = combine_paths(package_root_path, "package.json");
    if host.file_exists(&package_json_path) {
        let main = host
            .read_file(&package_json_path)
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|json| {
                ["typings", "types", "main"]
                    .iter()
                    .find_map(|field| json.get(*field).and_then(|v| v.as_str()).map(str::to_string))
            });
        if let Some(main) = main {
            let main_export_file = normalize_path(&combine_paths(package_root_path, &main));
            if main_export_file == path {
                return package_root_path.to_string();
            }
        }
    }

    let without_extension = remove_file_extension(path);
    let file_part = without_extension.get(parts.file_name_index..).unwrap_or("");
    let directory = without_extension.get(..parts.file_name_index).unwrap_or("");
    // `/index` can be imported by its directory unless a file shadows the directory.
    if file_part == "/index" && !PROBE_EXTENSIONS.iter().any(|ext| host.file_exists(&format!("{directory}{ext}"))) {
        return directory.to_string();
    }
    without_extension
}

/// `@types/foo` -> `foo`, `@types/scope__pkg` -> `@scope/pkg`.
fn get_package_name_from_at_types_directory(mangled_name: &str) -> String {
    match mangled_name.strip_prefix("@types/") {
        Some(name) if name.contains("__") => format!("@{}", name.replacen("__", "/", 1)),
        Some(name) => name.to_string(),
        None => mangled_name.to_string(),
    }
}

// =============================================================================
// Path helpers
// =============================================================================

/// Normalize separators and resolve `.`/`..` segments.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let (root, rest) = split_root(&path);
    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if root.is_empty() {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if root.is_empty() && path.starts_with("./") && !joined.starts_with("..") {
        format!("./{joined}")
    } else {
        format!("{root}{joined}")
    }
}

/// Split `/x/y` into (`/`, `x/y`) and `C:/x` into (`C:/`, `x`).
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with('/') {
        return (&path[..1], &path[1..]);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return (&path[..3], &path[3..]);
    }
    ("", path)
}

pub fn is_rooted_disk_path(path: &str) -> bool {
    !split_root(path).0.is_empty()
}

/// Directory part of a path (`/a/b.ts` -> `/a`, `/a.ts` -> `/`).
pub fn get_directory_path(path: &str) -> String {
    let (root, rest) = split_root(path);
    match rest.rfind('/') {
        Some(i) => format!("{root}{}", &rest[..i]),
        None => root.to_string(),
    }
}

pub fn combine_paths(base: &str, relative: &str) -> String {
    if base.is_empty() || is_rooted_disk_path(relative) {
        return relative.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{relative}")
    } else {
        format!("{base}/{relative}")
    }
}

/// Relative path from a directory to a file or directory. When the two
/// have no common root the target comes back unchanged.
pub fn get_relative_path_from_directory(from_directory: &str, to: &str) -> String {
    let from = normalize_path(from_directory);
    let to = normalize_path(to);
    let (from_root, from_rest) = split_root(&from);
    let (to_root, to_rest) = split_root(&to);
    if from_root != to_root {
        return to;
    }
    let from_parts: Vec<&str> = from_rest.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    let to_parts: Vec<&str> = to_rest.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();
    let mut relative: Vec<&str> = vec![".."; from_parts.len() - common];
    relative.extend(&to_parts[common..]);
    relative.join("/")
}

fn get_relative_path_if_in_directory(path: &str, directory: &str) -> Option<String> {
    let relative = get_relative_path_from_directory(directory, path);
    (!is_rooted_disk_path(&relative)).then_some(relative)
}

/// Prefix bare paths with `./` so they are not read as package names.
pub fn ensure_path_is_non_module_name(path: &str) -> String {
    if is_rooted_disk_path(path) || path.starts_with("./") || path.starts_with("../") || path == ".." {
        path.to_string()
    } else {
        format!("./{path}")
    }
}

pub fn remove_file_extension(path: &str) -> String {
    EXTENSIONS_TO_REMOVE
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
        .to_string()
}

fn remove_extension_and_index_postfix(
    file_name: &str,
    module_resolution: ModuleResolutionKind,
    add_js_extension: bool,
) -> String {
    let no_extension = remove_file_extension(file_name);
    if add_js_extension {
        format!("{no_extension}.js")
    } else if module_resolution == ModuleResolutionKind::NodeJs {
        no_extension
            .strip_suffix("/index")
            .map(str::to_string)
            .unwrap_or(no_extension)
    } else {
        no_extension
    }
}

fn is_path_relative_to_parent(path: &str) -> bool {
    path.starts_with("..")
}

/// Number of leading `..` segments of a relative path.
fn get_relative_path_n_parents(relative_path: &str) -> usize {
    if is_rooted_disk_path(relative_path) {
        return 0;
    }
    relative_path
        .split('/')
        .filter(|s| !s.is_empty())
        .take_while(|s| *s == "..")
        .count()
}
