//! Shared enums used across the jsxi crates.
//!
//! These live here so that the checker, the emitter and the configuration
//! layer agree on one definition without depending on each other.

use serde::{Deserialize, Serialize};

/// How JSX syntax is emitted (`--jsx`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsxEmit {
    /// JSX is not enabled; using it is a configuration error.
    #[default]
    None,
    /// Keep JSX in the output (`.jsx`).
    Preserve,
    /// Classic factory calls (`React.createElement`).
    React,
    /// Optimized runtime calls (`_jsx`/`_jsxs`) imported from `jsx-runtime`.
    ReactJsx,
    /// Development runtime calls (`_jsxDEV`) imported from `jsx-dev-runtime`.
    ReactJsxDev,
    /// Like preserve, but the output file keeps a `.js` extension.
    ReactNative,
}

impl JsxEmit {
    /// Parse a tsconfig `jsx` value.
    pub fn from_config_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "preserve" => Some(Self::Preserve),
            "react" => Some(Self::React),
            "react-jsx" => Some(Self::ReactJsx),
            "react-jsxdev" => Some(Self::ReactJsxDev),
            "react-native" => Some(Self::ReactNative),
            _ => None,
        }
    }

    /// Whether JSX survives lowering untouched.
    pub const fn preserves_jsx(self) -> bool {
        matches!(self, Self::Preserve | Self::ReactNative)
    }

    /// Whether elements use the implicit `jsx`/`jsxs`/`jsxDEV` runtime.
    pub const fn uses_automatic_runtime(self) -> bool {
        matches!(self, Self::ReactJsx | Self::ReactJsxDev)
    }
}

/// Which JSX world a file is checked against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsxMode {
    /// Conventional `React`-style namespace with `JSX.*` well-known types.
    #[default]
    Namespace,
    /// Everything derived from one `@jsx-intrinsic-factory` function.
    GenericFactory,
}

impl JsxMode {
    /// Parse a `jsxMode` option or `@jsx-mode` pragma value.
    pub fn from_config_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "react" | "namespace" => Some(Self::Namespace),
            "generic" => Some(Self::GenericFactory),
            _ => None,
        }
    }
}

/// How a JSX tag name resolves.
///
/// Computed once per opening element and memoized in the checker's node links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsxReferenceKind {
    /// A string tag such as `div`.
    Intrinsic,
    /// A value with construct signatures (class component).
    Component,
    /// A value with call signatures (function component).
    Function,
    /// Ambiguous or unresolved (`any`, error, or no signatures).
    Mixed,
}

/// ECMAScript target level. Only the distinctions the lowering needs are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScriptTarget {
    ES3,
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    #[default]
    ESNext,
}

impl ScriptTarget {
    pub fn from_config_str(value: &str) -> Option<Self> {
        let target = match value.to_ascii_lowercase().as_str() {
            "es3" => Self::ES3,
            "es5" => Self::ES5,
            "es6" | "es2015" => Self::ES2015,
            "es2016" => Self::ES2016,
            "es2017" => Self::ES2017,
            "es2018" => Self::ES2018,
            "es2019" => Self::ES2019,
            "es2020" => Self::ES2020,
            "es2021" => Self::ES2021,
            "es2022" => Self::ES2022,
            "esnext" => Self::ESNext,
            _ => return None,
        };
        Some(target)
    }

    /// Object spread (`{ ...a }`) is native syntax from ES2018 on.
    pub fn supports_object_spread(self) -> bool {
        self >= Self::ES2018
    }
}

/// Module system for generated helper imports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    None,
    CommonJS,
    #[default]
    ESNext,
}

impl ModuleKind {
    pub fn from_config_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "commonjs" | "node16" | "nodenext" => Some(Self::CommonJS),
            "es6" | "es2015" | "es2020" | "es2022" | "esnext" | "preserve" => Some(Self::ESNext),
            _ => None,
        }
    }

    pub const fn uses_require(self) -> bool {
        matches!(self, Self::CommonJS | Self::None)
    }
}
