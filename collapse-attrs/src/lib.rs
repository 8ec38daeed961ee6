mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use collapse_attrs::ErrorKind;
/// use collapse_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | Required. The message displayed at the top of the error.                     |
/// | `labels`    | An array of label texts, one per span of the error, in span order. An empty  |
/// |             | label highlights the span without any text. Without this tag, every span is  |
/// |             | highlighted without text.                                                    |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression that should evaluate to something implementing
/// [`ToString`] (for `labels`, an array of such values). For structs with named fields, the
/// expression is evaluated with the members of the struct in scope, so they can be used in the
/// expression. Tuple structs and enums are rejected.
///
/// [`ErrorKind`]: https://docs.rs/collapse-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl collapse_error::ErrorKind for #name {
            #target
        }
    }.into()
}
