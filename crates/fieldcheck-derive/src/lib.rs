//! Derive macro for `fieldcheck::Validatable`.
//!
//! Generates the member registry the validation engine consumes: one
//! `fieldcheck::Member` per field, carrying the rule descriptors declared in
//! `#[check(...)]` attributes and the recursive-capability flag for
//! `#[check(nested)]` members.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, Path, PathArguments,
    Type, token,
};

/// Derive `fieldcheck::Validatable` with field-level checks.
///
/// Supported field attributes:
///
/// - `#[check(required)]` / `#[check(required(allow_empty_strings))]`
/// - `#[check(one_or_more_digits)]`, `#[check(one_or_more_upper_case)]`,
///   `#[check(one_or_more_non_alpha)]`
/// - `#[check(email_list)]`, `#[check(phone_list)]`
/// - `#[check(required_when(other = "sibling", invert, allow_empty_strings))]`
/// - `#[check(custom = "path::to::descriptor_fn")]`
/// - `#[check(nested)]` — descend into the member during validation
#[proc_macro_derive(Validatable, attributes(check))]
pub fn derive_validatable(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_validatable(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_validatable(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Validatable can only be derived for structs",
        ));
    };

    let fields = match &struct_data.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &struct_data.fields,
                "Validatable requires named fields",
            ));
        },
    };

    let mut members = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let spec = parse_field_spec(&field.attrs)?;
        if let Some(member) = expand_member(ident, &field.ty, &spec)? {
            members.push(member);
        }
    }

    let name = &input.ident;
    let name_str = LitStr::new(&name.to_string(), name.span());
    Ok(quote! {
        impl fieldcheck::Validatable for #name {
            fn type_name(&self) -> &'static str {
                #name_str
            }

            fn members(&self) -> ::std::vec::Vec<fieldcheck::Member<'_>> {
                ::std::vec![#(#members),*]
            }
        }
    })
}

#[derive(Default)]
struct FieldSpec {
    rules: Vec<RuleSpec>,
    nested: bool,
}

enum RuleSpec {
    Required { allow_empty_strings: bool },
    OneOrMoreDigits,
    OneOrMoreUpperCase,
    OneOrMoreNonAlpha,
    EmailList,
    PhoneList,
    RequiredWhen {
        other: LitStr,
        invert: bool,
        allow_empty_strings: bool,
    },
    Custom(Path),
}

fn parse_field_spec(attrs: &[Attribute]) -> Result<FieldSpec, syn::Error> {
    let mut spec = FieldSpec::default();
    for attr in attrs {
        if !attr.path().is_ident("check") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("nested") {
                if spec.nested {
                    return Err(meta.error("duplicate check(nested)"));
                }
                spec.nested = true;
                return Ok(());
            }
            if meta.path.is_ident("required") {
                let mut allow_empty_strings = false;
                if meta.input.peek(token::Paren) {
                    meta.parse_nested_meta(|nested| {
                        if nested.path.is_ident("allow_empty_strings") {
                            allow_empty_strings = true;
                            return Ok(());
                        }
                        Err(nested.error("unsupported required option"))
                    })?;
                }
                spec.rules.push(RuleSpec::Required {
                    allow_empty_strings,
                });
                return Ok(());
            }
            if meta.path.is_ident("one_or_more_digits") {
                spec.rules.push(RuleSpec::OneOrMoreDigits);
                return Ok(());
            }
            if meta.path.is_ident("one_or_more_upper_case") {
                spec.rules.push(RuleSpec::OneOrMoreUpperCase);
                return Ok(());
            }
            if meta.path.is_ident("one_or_more_non_alpha") {
                spec.rules.push(RuleSpec::OneOrMoreNonAlpha);
                return Ok(());
            }
            if meta.path.is_ident("email_list") {
                spec.rules.push(RuleSpec::EmailList);
                return Ok(());
            }
            if meta.path.is_ident("phone_list") {
                spec.rules.push(RuleSpec::PhoneList);
                return Ok(());
            }
            if meta.path.is_ident("required_when") {
                let mut other: Option<LitStr> = None;
                let mut invert = false;
                let mut allow_empty_strings = false;
                meta.parse_nested_meta(|nested| {
                    if nested.path.is_ident("other") {
                        let value: LitStr = nested.value()?.parse()?;
                        if other.is_some() {
                            return Err(nested.error("duplicate required_when(other = ...)"));
                        }
                        other = Some(value);
                        return Ok(());
                    }
                    if nested.path.is_ident("invert") {
                        invert = true;
                        return Ok(());
                    }
                    if nested.path.is_ident("allow_empty_strings") {
                        allow_empty_strings = true;
                        return Ok(());
                    }
                    Err(nested.error("unsupported required_when option"))
                })?;
                let Some(other) = other else {
                    return Err(meta.error("required_when requires other = \"member\""));
                };
                spec.rules.push(RuleSpec::RequiredWhen {
                    other,
                    invert,
                    allow_empty_strings,
                });
                return Ok(());
            }
            if meta.path.is_ident("custom") {
                let value: LitStr = meta.value()?.parse()?;
                let path: Path = value.parse()?;
                spec.rules.push(RuleSpec::Custom(path));
                return Ok(());
            }
            Err(meta.error("unsupported check attribute on field"))
        })?;
    }
    Ok(spec)
}

fn expand_member(
    ident: &Ident,
    ty: &Type,
    spec: &FieldSpec,
) -> Result<Option<proc_macro2::TokenStream>, syn::Error> {
    let name = LitStr::new(&ident.to_string(), ident.span());
    let (is_option, inner_ty) = unwrap_option(ty);

    let value_expr = if spec.nested {
        expand_nested_value(ident, inner_ty, is_option)?
    } else {
        match classify_leaf(inner_ty) {
            Some(shape) => expand_leaf_value(ident, shape, is_option),
            None => {
                if spec.rules.is_empty() {
                    // Nothing checkable and nothing to enumerate for
                    // sibling lookups; leave the field out of the registry.
                    return Ok(None);
                }
                return Err(syn::Error::new_spanned(
                    ty,
                    "field type is not supported by built-in checks; \
                     implement Validatable by hand for this shape",
                ));
            },
        }
    };

    let rules: Vec<_> = spec.rules.iter().map(expand_rule).collect();
    let mut member = quote! {
        fieldcheck::Member::new(#name, #value_expr)
    };
    if !rules.is_empty() {
        member = quote! {
            #member.with_rules(::std::vec![#(#rules),*])
        };
    }
    if spec.nested {
        member = quote! { #member.recursive() };
    }
    Ok(Some(member))
}

fn expand_rule(rule: &RuleSpec) -> proc_macro2::TokenStream {
    match rule {
        RuleSpec::Required {
            allow_empty_strings: false,
        } => quote! { fieldcheck::rules::required() },
        RuleSpec::Required {
            allow_empty_strings: true,
        } => quote! { fieldcheck::rules::required_allow_empty() },
        RuleSpec::OneOrMoreDigits => quote! { fieldcheck::rules::one_or_more_digits() },
        RuleSpec::OneOrMoreUpperCase => {
            quote! { fieldcheck::rules::one_or_more_upper_case() }
        },
        RuleSpec::OneOrMoreNonAlpha => quote! { fieldcheck::rules::one_or_more_non_alpha() },
        RuleSpec::EmailList => quote! { fieldcheck::rules::email_list() },
        RuleSpec::PhoneList => quote! { fieldcheck::rules::phone_list() },
        RuleSpec::RequiredWhen {
            other,
            invert,
            allow_empty_strings,
        } => {
            let mut builder = quote! { fieldcheck::RequiredWhen::new(#other) };
            if *invert {
                builder = quote! { #builder.invert() };
            }
            if *allow_empty_strings {
                builder = quote! { #builder.allow_empty_strings() };
            }
            quote! { #builder.into_rule() }
        },
        RuleSpec::Custom(path) => quote! { #path() },
    }
}

#[derive(Copy, Clone)]
enum LeafShape {
    Text,
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
    TextList,
}

fn expand_leaf_value(
    ident: &Ident,
    shape: LeafShape,
    is_option: bool,
) -> proc_macro2::TokenStream {
    match (shape, is_option) {
        (LeafShape::Text, false) => quote! { fieldcheck::Value::Text(&*self.#ident) },
        (LeafShape::Text, true) => {
            quote! { fieldcheck::Value::opt_text(self.#ident.as_deref()) }
        },
        (LeafShape::Bool, false) => quote! { fieldcheck::Value::Bool(self.#ident) },
        (LeafShape::Bool, true) => quote! { fieldcheck::Value::opt_bool(self.#ident) },
        (LeafShape::SignedInt, false) => {
            quote! { fieldcheck::Value::Int(i64::from(self.#ident)) }
        },
        (LeafShape::SignedInt, true) => quote! {
            match self.#ident {
                ::std::option::Option::Some(value) => fieldcheck::Value::Int(i64::from(value)),
                ::std::option::Option::None => fieldcheck::Value::Absent,
            }
        },
        (LeafShape::UnsignedInt, false) => {
            quote! { fieldcheck::Value::Uint(u64::from(self.#ident)) }
        },
        (LeafShape::UnsignedInt, true) => quote! {
            match self.#ident {
                ::std::option::Option::Some(value) => fieldcheck::Value::Uint(u64::from(value)),
                ::std::option::Option::None => fieldcheck::Value::Absent,
            }
        },
        (LeafShape::Float, false) => {
            quote! { fieldcheck::Value::Float(f64::from(self.#ident)) }
        },
        (LeafShape::Float, true) => quote! {
            match self.#ident {
                ::std::option::Option::Some(value) => fieldcheck::Value::Float(f64::from(value)),
                ::std::option::Option::None => fieldcheck::Value::Absent,
            }
        },
        (LeafShape::TextList, false) => {
            quote! { fieldcheck::Value::TextList(self.#ident.as_slice()) }
        },
        (LeafShape::TextList, true) => quote! {
            match self.#ident.as_ref() {
                ::std::option::Option::Some(list) => {
                    fieldcheck::Value::TextList(list.as_slice())
                },
                ::std::option::Option::None => fieldcheck::Value::Absent,
            }
        },
    }
}

fn expand_nested_value(
    ident: &Ident,
    ty: &Type,
    is_option: bool,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    if let Some(name) = last_segment_name(ty) {
        if is_well_known_leaf(&name) {
            return Err(syn::Error::new_spanned(
                ty,
                "check(nested) cannot descend into a well-known value type",
            ));
        }
        if name == "Vec" {
            return Err(syn::Error::new_spanned(
                ty,
                "collection members are not validated element-wise; \
                 this is a known engine limitation",
            ));
        }
    }
    if matches!(ty, Type::Array(_) | Type::Slice(_)) {
        return Err(syn::Error::new_spanned(
            ty,
            "collection members are not validated element-wise; \
             this is a known engine limitation",
        ));
    }

    let is_wrapper = last_segment_name(ty)
        .is_some_and(|name| matches!(name.as_str(), "Box" | "Rc" | "Arc"));
    let expr = match (is_option, is_wrapper) {
        (false, false) => quote! { fieldcheck::Value::Nested(&self.#ident) },
        (false, true) => quote! { fieldcheck::Value::Nested(&*self.#ident) },
        (true, false) => quote! {
            fieldcheck::Value::opt_nested(
                self.#ident
                    .as_ref()
                    .map(|value| value as &dyn fieldcheck::Validatable),
            )
        },
        (true, true) => quote! {
            fieldcheck::Value::opt_nested(
                self.#ident
                    .as_deref()
                    .map(|value| value as &dyn fieldcheck::Validatable),
            )
        },
    };
    Ok(expr)
}

fn classify_leaf(ty: &Type) -> Option<LeafShape> {
    if is_string_like(ty) {
        return Some(LeafShape::Text);
    }
    if is_text_list(ty) {
        return Some(LeafShape::TextList);
    }
    let name = last_segment_name(ty)?;
    match name.as_str() {
        "bool" => Some(LeafShape::Bool),
        "i8" | "i16" | "i32" | "i64" => Some(LeafShape::SignedInt),
        "u8" | "u16" | "u32" | "u64" => Some(LeafShape::UnsignedInt),
        "f32" | "f64" => Some(LeafShape::Float),
        _ => None,
    }
}

/// Mirrors `fieldcheck::member::LEAF_TYPES`; keep the two lists in sync.
fn is_well_known_leaf(name: &str) -> bool {
    matches!(
        name,
        "String"
            | "str"
            | "bool"
            | "char"
            | "u8"
            | "u16"
            | "u32"
            | "u64"
            | "u128"
            | "usize"
            | "i8"
            | "i16"
            | "i32"
            | "i64"
            | "i128"
            | "isize"
            | "f32"
            | "f64"
            | "Duration"
            | "Instant"
            | "SystemTime"
            | "DateTime"
            | "NaiveDate"
            | "NaiveDateTime"
            | "NaiveTime"
            | "Uuid"
            | "Url"
            | "Decimal"
            | "PathBuf"
            | "Path"
            | "IpAddr"
            | "Ipv4Addr"
            | "Ipv6Addr"
            | "SocketAddr"
    )
}

fn unwrap_option(ty: &Type) -> (bool, &Type) {
    generic_inner(ty, "Option").map_or((false, ty), |inner| (true, inner))
}

fn is_text_list(ty: &Type) -> bool {
    generic_inner(ty, "Vec").is_some_and(|inner| {
        last_segment_name(inner).is_some_and(|name| name == "String")
    })
}

fn generic_inner<'t>(ty: &'t Type, wrapper: &str) -> Option<&'t Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn last_segment_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => last_segment_name(&reference.elem),
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

fn is_string_like(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => is_string_like(&reference.elem),
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return false;
            };
            if segment.ident == "String" || segment.ident == "str" {
                return true;
            }
            if segment.ident == "Box" {
                let PathArguments::AngleBracketed(args) = &segment.arguments else {
                    return false;
                };
                return args.args.iter().any(|arg| {
                    matches!(
                        arg,
                        GenericArgument::Type(inner)
                            if last_segment_name(inner).is_some_and(|name| name == "str")
                    )
                });
            }
            false
        },
        _ => false,
    }
}
