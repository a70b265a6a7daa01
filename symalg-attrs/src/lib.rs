mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The report produced by the error can be customized using the `error` attribute:
/// ```
/// use ariadne::Fmt;
/// use symalg_attrs::ErrorKind;
/// use symalg_error::{ErrorKind, EXPR};
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "missing argument",
///     labels = [format!("this {} needs an argument", "keyword".fg(EXPR))],
///     help = format!("write it as `{}(...)`", name),
/// )]
/// pub struct MissingArgument {
///     name: String,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array with one label per span of the error. Empty labels are not printed. |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. For structs with named fields, the expression is evaluated with
/// the fields of the struct in scope (tuple structs are not supported).
///
/// [`ErrorKind`]: https://docs.rs/symalg-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    quote! {
        impl #impl_generics ErrorKind for #name #ty_generics #where_clause {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
