use syn::{Attribute, Ident, LitStr, Path, Type, meta::ParseNestedMeta, spanned::Spanned};

use crate::SERIAL_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Accessor

/// A getter/setter pair declared with
/// `#[serial(accessor(name = "...", get = getter, set = setter, ty = Type))]`.
pub(crate) struct Accessor {
    pub name: LitStr,
    pub getter: Ident,
    pub setter: Ident,
    pub ty: Type,
}

impl Accessor {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name = None;
        let mut getter = None;
        let mut setter = None;
        let mut ty = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(inner.value()?.parse::<LitStr>()?);
            } else if inner.path.is_ident("get") {
                getter = Some(inner.value()?.parse::<Ident>()?);
            } else if inner.path.is_ident("set") {
                setter = Some(inner.value()?.parse::<Ident>()?);
            } else if inner.path.is_ident("ty") {
                ty = Some(inner.value()?.parse::<Type>()?);
            } else {
                return Err(inner.error("expected `name`, `get`, `set` or `ty`"));
            }
            Ok(())
        })?;

        let missing = |key: &str| meta.error(format!("accessor is missing `{key}`"));
        Ok(Self {
            name: name.ok_or_else(|| missing("name"))?,
            getter: getter.ok_or_else(|| missing("get"))?,
            setter: setter.ok_or_else(|| missing("set"))?,
            ty: ty.ok_or_else(|| missing("ty"))?,
        })
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level `#[serial(...)]` attributes.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `dynamic`: the type can live behind pointer-like slots.
    pub dynamic: Option<proc_macro2::Span>,
    /// `class_name = "..."`, defaults to the type identifier.
    pub class_name: Option<LitStr>,
    /// `bases(TraitA, TraitB)`: the traits the class can be viewed as.
    pub bases: Vec<Path>,
    /// Accessor pairs in declaration order.
    pub accessors: Vec<Accessor>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(SERIAL_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("dynamic") {
                    result.dynamic = Some(meta.path.span());
                } else if meta.path.is_ident("class_name") {
                    result.class_name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("bases") {
                    meta.parse_nested_meta(|base| {
                        result.bases.push(base.path);
                        Ok(())
                    })?;
                } else if meta.path.is_ident("accessor") {
                    result.accessors.push(Accessor::parse(&meta)?);
                } else if meta.path.is_ident("skip") {
                    return Err(meta.error("`skip` can only be applied to fields"));
                } else {
                    return Err(meta.error(
                        "expected `dynamic`, `class_name`, `bases` or `accessor`",
                    ));
                }
                Ok(())
            })?;
        }

        if result.dynamic.is_none() {
            if let Some(class_name) = &result.class_name {
                return Err(syn::Error::new(
                    class_name.span(),
                    "`class_name` requires `dynamic`",
                ));
            }
            if let Some(base) = result.bases.first() {
                return Err(syn::Error::new(base.span(), "`bases` requires `dynamic`"));
            }
        }

        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level `#[serial(...)]` attributes.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `skip`: the field is not part of the shape and keeps its value when
    /// decoding.
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(SERIAL_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`"))
                }
            })?;
        }

        Ok(result)
    }
}
