use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro that generates a companion `*Timeseries` struct holding one
/// `Vec<f64>` column per field of a per-step flux struct. All fields in the
/// source struct must be `f64`.
///
/// The generated struct provides `with_capacity`, `push`, `len`, `is_empty`,
/// row access through `get`, and `columns` (name/slice pairs in field order,
/// used for tabular output). A `field_names()` associated function is also
/// added to the source struct.
///
/// Use `#[fluxes(timeseries_name = "CustomName")]` to override the default
/// timeseries struct name (`{StructName}Timeseries`).
#[proc_macro_derive(Fluxes, attributes(fluxes))]
pub fn derive_fluxes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let ts_name = extract_timeseries_name(&input)
        .unwrap_or_else(|| format_ident!("{}Timeseries", name));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Fluxes can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Fluxes can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "Fluxes struct must have at least one field")
            .to_compile_error()
            .into();
    }

    let mut field_idents = Vec::with_capacity(fields.len());
    for field in fields {
        if !is_f64_type(&field.ty) {
            return syn::Error::new_spanned(&field.ty, "Fluxes derive: all fields must be f64")
                .to_compile_error()
                .into();
        }
        match field.ident.as_ref() {
            Some(ident) => field_idents.push(ident),
            None => {
                return syn::Error::new_spanned(field, "Fluxes derive: unnamed field")
                    .to_compile_error()
                    .into();
            }
        }
    }

    let first_field = field_idents[0];
    let field_name_strs: Vec<String> = field_idents.iter().map(|f| f.to_string()).collect();

    let ts_fields = field_idents.iter().map(|f| quote! { pub #f: Vec<f64> });
    let with_cap_fields = field_idents.iter().map(|f| quote! { #f: Vec::with_capacity(n) });
    let push_fields = field_idents.iter().map(|f| quote! { self.#f.push(f.#f); });
    let get_fields = field_idents.iter().map(|f| quote! { #f: self.#f[i] });
    let column_entries = field_idents
        .iter()
        .zip(&field_name_strs)
        .map(|(f, s)| quote! { (#s, self.#f.as_slice()) });

    let expanded = quote! {
        /// Column-wise timeseries of per-step fluxes.
        #[derive(Debug, Clone, PartialEq)]
        pub struct #ts_name {
            #(#ts_fields,)*
        }

        impl #ts_name {
            /// Pre-allocate all columns for `n` timesteps.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap_fields,)*
                }
            }

            /// Append a single timestep's fluxes.
            pub fn push(&mut self, f: &#name) {
                #(#push_fields)*
            }

            /// Number of timesteps stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no timesteps have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }

            /// Fluxes of timestep `i`, or `None` if out of range.
            pub fn get(&self, i: usize) -> Option<#name> {
                if i >= self.len() {
                    return None;
                }
                Some(#name {
                    #(#get_fields,)*
                })
            }

            /// Column names paired with their values, in field order.
            pub fn columns(&self) -> Vec<(&'static str, &[f64])> {
                vec![#(#column_entries),*]
            }
        }

        impl #name {
            /// Returns the field names of this flux struct.
            pub fn field_names() -> &'static [&'static str] {
                &[#(#field_name_strs),*]
            }
        }
    };

    expanded.into()
}

fn extract_timeseries_name(input: &DeriveInput) -> Option<proc_macro2::Ident> {
    for attr in &input.attrs {
        if !attr.path().is_ident("fluxes") {
            continue;
        }
        let nested = attr
            .parse_args_with(
                syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
            )
            .ok()?;
        for meta in nested {
            let Meta::NameValue(nv) = meta else {
                continue;
            };
            if !nv.path.is_ident("timeseries_name") {
                continue;
            }
            if let syn::Expr::Lit(expr_lit) = &nv.value {
                if let Lit::Str(lit_str) = &expr_lit.lit {
                    return Some(format_ident!("{}", lit_str.value()));
                }
            }
        }
    }
    None
}

fn is_f64_type(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(type_path) if type_path.qself.is_none() && type_path.path.is_ident("f64"))
}
