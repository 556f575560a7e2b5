//! Type display for diagnostic messages.

use crate::TypeInterner;
use crate::types::*;
use jsxi_binder::SymbolId;

/// Names for declared symbols, supplied by whoever owns the symbol arenas.
pub trait SymbolNames {
    fn symbol_name(&self, symbol: SymbolId) -> Option<String>;
}

impl SymbolNames for jsxi_binder::BinderState {
    fn symbol_name(&self, symbol: SymbolId) -> Option<String> {
        self.get_symbol(symbol)
            .map(|s| jsxi_common::names::unescape_leading_underscores(&s.escaped_name).to_string())
    }
}

pub struct TypeFormatter<'a> {
    db: &'a TypeInterner,
    names: Option<&'a dyn SymbolNames>,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a TypeInterner) -> Self {
        TypeFormatter { db, names: None }
    }

    pub fn with_symbols(db: &'a TypeInterner, names: &'a dyn SymbolNames) -> Self {
        TypeFormatter {
            db,
            names: Some(names),
        }
    }

    pub fn format(&self, type_id: TypeId) -> String {
        let Some(key) = self.db.lookup(type_id) else {
            return "error".to_string();
        };
        match key {
            TypeKey::Intrinsic(kind) => match kind {
                IntrinsicKind::Error => "any".to_string(),
                _ => kind.as_str().to_string(),
            },
            TypeKey::Literal(LiteralValue::String(atom)) => {
                format!("\"{}\"", self.db.resolve_atom(atom))
            }
            TypeKey::Literal(lit @ LiteralValue::Number(_)) => {
                format_number(lit.as_number().unwrap_or(f64::NAN))
            }
            TypeKey::Literal(LiteralValue::Boolean(value)) => value.to_string(),
            TypeKey::Union(members) => self.join(&members, " | "),
            TypeKey::Intersection(members) => self.join(&members, " & "),
            TypeKey::Array(element) => format!("{}[]", self.format_operand(element)),
            TypeKey::Tuple(elements) => {
                let parts: Vec<String> = elements.iter().map(|e| self.format(*e)).collect();
                format!("[{}]", parts.join(", "))
            }
            TypeKey::TypeParameter(info) => self.db.resolve_atom(info.name),
            TypeKey::Object(shape) => {
                if let Some(name) = self.named(shape.symbol) {
                    return name;
                }
                self.format_members(&shape.properties, shape.string_index, &[], &[])
            }
            TypeKey::Callable(shape) => {
                if let Some(name) = self.named(shape.symbol) {
                    return format!("typeof {name}");
                }
                match (
                    shape.call_signatures.as_slice(),
                    shape.construct_signatures.as_slice(),
                    shape.properties.is_empty(),
                ) {
                    ([sig], [], true) => self.format_signature(sig, " =>"),
                    ([], [sig], true) => format!("new {}", self.format_signature(sig, " =>")),
                    (calls, constructs, _) => {
                        self.format_members(&shape.properties, None, calls, constructs)
                    }
                }
            }
        }
    }

    fn named(&self, symbol: Option<SymbolId>) -> Option<String> {
        self.names?.symbol_name(symbol?)
    }

    fn join(&self, members: &[TypeId], separator: &str) -> String {
        members
            .iter()
            .map(|m| self.format_operand(*m))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Format with parentheses when the type would bind looser than its context.
    fn format_operand(&self, type_id: TypeId) -> String {
        let text = self.format(type_id);
        match self.db.lookup(type_id) {
            Some(TypeKey::Union(_) | TypeKey::Intersection(_)) => format!("({text})"),
            Some(TypeKey::Callable(shape))
                if shape.symbol.is_none() && text.contains("=>") =>
            {
                format!("({text})")
            }
            _ => text,
        }
    }

    fn format_signature(&self, sig: &CallSignature, arrow: &str) -> String {
        let params: Vec<String> = sig
            .params
            .iter()
            .map(|p| {
                let name = self.db.resolve_atom(p.name);
                let rest = if p.rest { "..." } else { "" };
                let optional = if p.optional { "?" } else { "" };
                format!("{rest}{name}{optional}: {}", self.format(p.type_id))
            })
            .collect();
        let type_params = if sig.type_params.is_empty() {
            String::new()
        } else {
            let names: Vec<String> = sig.type_params.iter().map(|t| self.format(*t)).collect();
            format!("<{}>", names.join(", "))
        };
        format!(
            "{type_params}({}){arrow} {}",
            params.join(", "),
            self.format(sig.return_type)
        )
    }

    fn format_members(
        &self,
        properties: &[PropertyInfo],
        string_index: Option<TypeId>,
        calls: &[CallSignature],
        constructs: &[CallSignature],
    ) -> String {
        let mut members = Vec::new();
        for sig in calls {
            members.push(format!("{};", self.format_signature(sig, ":")));
        }
        for sig in constructs {
            members.push(format!("new {};", self.format_signature(sig, ":")));
        }
        if let Some(index) = string_index {
            members.push(format!("[x: string]: {};", self.format(index)));
        }
        for prop in properties {
            let readonly = if prop.readonly { "readonly " } else { "" };
            let optional = if prop.optional { "?" } else { "" };
            members.push(format!(
                "{readonly}{}{optional}: {};",
                self.db.resolve_atom(prop.name),
                self.format(prop.type_id)
            ));
        }
        if members.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", members.join(" "))
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
