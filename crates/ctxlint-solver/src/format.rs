//! Go-syntax type display.

use std::fmt::Write;

use crate::intern::TypeInterner;
use crate::types::{ChanDir, TypeId, TypeKey};

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeFormatter { interner }
    }

    pub fn format(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId) {
        let Some(key) = self.interner.lookup(id) else {
            out.push_str("invalid type");
            return;
        };
        match key {
            TypeKey::Invalid => out.push_str("invalid type"),
            TypeKey::Basic(kind) => out.push_str(kind.name()),
            TypeKey::Named(_) => {
                if let Some(info) = self.interner.named_info(id) {
                    if let Some(package) = &info.package {
                        out.push_str(package);
                        out.push('.');
                    }
                    out.push_str(&info.name);
                }
            }
            TypeKey::Pointer(elem) => {
                out.push('*');
                self.write_type(out, *elem);
            }
            TypeKey::Slice(elem) => {
                out.push_str("[]");
                self.write_type(out, *elem);
            }
            TypeKey::Array(len, elem) => {
                match len {
                    Some(n) => {
                        let _ = write!(out, "[{n}]");
                    }
                    None => out.push_str("[?]"),
                }
                self.write_type(out, *elem);
            }
            TypeKey::Map(key, value) => {
                out.push_str("map[");
                self.write_type(out, *key);
                out.push(']');
                self.write_type(out, *value);
            }
            TypeKey::Chan(dir, elem) => {
                out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::SendOnly => "chan<- ",
                    ChanDir::RecvOnly => "<-chan ",
                });
                // `chan (<-chan T)` needs the parentheses.
                let nested_recv = *dir == ChanDir::Both
                    && matches!(self.interner.lookup(*elem), Some(TypeKey::Chan(ChanDir::RecvOnly, _)));
                if nested_recv {
                    out.push('(');
                    self.write_type(out, *elem);
                    out.push(')');
                } else {
                    self.write_type(out, *elem);
                }
            }
            TypeKey::Struct(fields) => {
                out.push_str("struct{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded {
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    self.write_type(out, field.type_id);
                }
                out.push('}');
            }
            TypeKey::Interface(methods) => {
                out.push_str("interface{");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.name);
                    self.write_signature(out, method.type_id);
                }
                out.push('}');
            }
            TypeKey::Function(_) => {
                out.push_str("func");
                self.write_signature(out, id);
            }
            TypeKey::Tuple(elems) => self.write_tuple(out, elems, false),
        }
    }

    fn write_signature(&self, out: &mut String, id: TypeId) {
        let Some(TypeKey::Function(shape)) = self.interner.lookup(id) else {
            out.push_str("()");
            return;
        };
        self.write_tuple(out, &shape.params, shape.variadic);
        match shape.results.len() {
            0 => {}
            1 => {
                out.push(' ');
                self.write_type(out, shape.results[0]);
            }
            _ => {
                out.push(' ');
                self.write_tuple(out, &shape.results, false);
            }
        }
    }

    fn write_tuple(&self, out: &mut String, elems: &[TypeId], variadic: bool) {
        out.push('(');
        for (i, &elem) in elems.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if variadic && i + 1 == elems.len() {
                out.push_str("...");
                match self.interner.lookup(elem) {
                    Some(TypeKey::Slice(inner)) => self.write_type(out, *inner),
                    _ => self.write_type(out, elem),
                }
            } else {
                self.write_type(out, elem);
            }
        }
        out.push(')');
    }
}
