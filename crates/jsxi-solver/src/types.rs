//! Type representation.
//!
//! Types are interned: a [`TypeId`] is an index into the [`TypeInterner`]
//! and two structurally identical types always share an id, so equality is
//! an integer comparison.
//!
//! [`TypeInterner`]: crate::TypeInterner

use jsxi_binder::SymbolId;
use jsxi_common::interner::Atom;

/// Handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Sentinel produced when checking failed; relates like `any` so one
    /// error does not cascade.
    pub const ERROR: TypeId = TypeId(0);
    pub const ANY: TypeId = TypeId(1);
    pub const UNKNOWN: TypeId = TypeId(2);
    pub const NEVER: TypeId = TypeId(3);
    pub const VOID: TypeId = TypeId(4);
    pub const UNDEFINED: TypeId = TypeId(5);
    pub const NULL: TypeId = TypeId(6);
    pub const BOOLEAN: TypeId = TypeId(7);
    pub const NUMBER: TypeId = TypeId(8);
    pub const STRING: TypeId = TypeId(9);
    pub const BIGINT: TypeId = TypeId(10);
    pub const SYMBOL: TypeId = TypeId(11);
    /// The non-primitive `object` type.
    pub const OBJECT: TypeId = TypeId(12);
    pub const BOOLEAN_TRUE: TypeId = TypeId(13);
    pub const BOOLEAN_FALSE: TypeId = TypeId(14);
    /// `{}`
    pub const EMPTY_OBJECT: TypeId = TypeId(15);

    /// First id handed out for non-builtin types.
    pub const FIRST_USER: u32 = 16;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    /// `any` or the error sentinel.
    #[inline]
    pub const fn is_any_like(self) -> bool {
        self.0 == Self::ANY.0 || self.0 == Self::ERROR.0
    }

    #[inline]
    pub const fn is_nullish(self) -> bool {
        self.0 == Self::NULL.0 || self.0 == Self::UNDEFINED.0 || self.0 == Self::VOID.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Error,
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Bigint,
    Symbol,
    Object,
}

impl IntrinsicKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IntrinsicKind::Error => "error",
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Number => "number",
            IntrinsicKind::String => "string",
            IntrinsicKind::Bigint => "bigint",
            IntrinsicKind::Symbol => "symbol",
            IntrinsicKind::Object => "object",
        }
    }
}

/// Literal values. Numbers are stored as their bit pattern so the key stays
/// `Eq + Hash`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(Atom),
    Number(u64),
    Boolean(bool),
}

impl LiteralValue {
    pub fn number(value: f64) -> Self {
        LiteralValue::Number(value.to_bits())
    }

    pub fn as_number(self) -> Option<f64> {
        match self {
            LiteralValue::Number(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
    /// Declaring symbol, when the property came from a declaration or a
    /// synthesized attribute symbol.
    pub symbol: Option<SymbolId>,
}

impl PropertyInfo {
    pub fn new(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            name,
            type_id,
            optional: false,
            readonly: false,
            symbol: None,
        }
    }

    pub fn optional(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            optional: true,
            ..PropertyInfo::new(name, type_id)
        }
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }
}

/// Object type: named properties in declaration order plus an optional
/// string index signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    pub properties: Vec<PropertyInfo>,
    pub string_index: Option<TypeId>,
    /// Interface/class symbol the shape was declared by, used for display.
    pub symbol: Option<SymbolId>,
}

impl ObjectShape {
    pub fn new(properties: Vec<PropertyInfo>) -> Self {
        ObjectShape {
            properties,
            string_index: None,
            symbol: None,
        }
    }

    pub fn find_property(&self, name: Atom) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

impl ParamInfo {
    pub fn new(name: Atom, type_id: TypeId) -> Self {
        ParamInfo {
            name,
            type_id,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(name: Atom, type_id: TypeId) -> Self {
        ParamInfo {
            optional: true,
            ..ParamInfo::new(name, type_id)
        }
    }

    pub fn rest(name: Atom, type_id: TypeId) -> Self {
        ParamInfo {
            rest: true,
            ..ParamInfo::new(name, type_id)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamInfo {
    pub name: Atom,
    pub constraint: Option<TypeId>,
    pub default: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSignature {
    /// Type ids of the signature's own `TypeParameter`s.
    pub type_params: Vec<TypeId>,
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    /// Opaque host handle of the declaring node (`u32::MAX` when synthetic).
    pub declaration: u32,
}

impl CallSignature {
    pub fn new(params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        CallSignature {
            type_params: Vec::new(),
            params,
            return_type,
            declaration: u32::MAX,
        }
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeId>) -> Self {
        self.type_params = type_params;
        self
    }

    /// Minimum number of arguments the signature needs.
    pub fn min_argument_count(&self) -> usize {
        self.params
            .iter()
            .take_while(|p| !p.optional && !p.rest)
            .count()
    }
}

/// Function, class constructor or any object with call/construct signatures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CallableShape {
    pub call_signatures: Vec<CallSignature>,
    pub construct_signatures: Vec<CallSignature>,
    /// Static side properties (`Foo.defaultProps`, namespace-like members).
    pub properties: Vec<PropertyInfo>,
    pub symbol: Option<SymbolId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    Object(ObjectShape),
    Array(TypeId),
    Tuple(Vec<TypeId>),
    Callable(CallableShape),
    TypeParameter(TypeParamInfo),
}

/// Builtin keys in `TypeId` order.
pub(crate) const INTRINSIC_KEYS: [(TypeId, IntrinsicKind); 13] = [
    (TypeId::ERROR, IntrinsicKind::Error),
    (TypeId::ANY, IntrinsicKind::Any),
    (TypeId::UNKNOWN, IntrinsicKind::Unknown),
    (TypeId::NEVER, IntrinsicKind::Never),
    (TypeId::VOID, IntrinsicKind::Void),
    (TypeId::UNDEFINED, IntrinsicKind::Undefined),
    (TypeId::NULL, IntrinsicKind::Null),
    (TypeId::BOOLEAN, IntrinsicKind::Boolean),
    (TypeId::NUMBER, IntrinsicKind::Number),
    (TypeId::STRING, IntrinsicKind::String),
    (TypeId::BIGINT, IntrinsicKind::Bigint),
    (TypeId::SYMBOL, IntrinsicKind::Symbol),
    (TypeId::OBJECT, IntrinsicKind::Object),
];
