use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Data,
    DeriveInput,
    Error,
    Expr,
    Fields,
    Ident,
    Result,
    Token,
};

/// One `name = expression` pair inside the `error` attribute.
enum Tag {
    Message(Expr),
    Labels(Expr),
    Help(Expr),
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;

        match name.to_string().as_str() {
            "message" => Ok(Tag::Message(value)),
            "labels" => Ok(Tag::Labels(value)),
            "help" => Ok(Tag::Help(value)),
            other => Err(Error::new_spanned(&name, format!("unknown tag `{}`", other))),
        }
    }
}

/// The pieces of the report, gathered from the tags of the `error` attribute.
#[derive(Debug)]
pub struct ReportParts {
    message: Expr,

    /// Highlights every span without text if missing.
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ReportParts {
    /// Collects the tags of the `error` attribute of `input`, which must be present and must
    /// contain a `message`. Each tag can be given once.
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("error")) else {
            return Err(Error::new_spanned(&input.ident, "missing `#[error(...)]` attribute"));
        };
        let tags = attr.parse_args_with(Punctuated::<Tag, Token![,]>::parse_terminated)?;

        let (mut message, mut labels, mut help) = (None, None, None);
        for tag in tags {
            let (slot, value, name) = match tag {
                Tag::Message(value) => (&mut message, value, "message"),
                Tag::Labels(value) => (&mut labels, value, "labels"),
                Tag::Help(value) => (&mut help, value, "help"),
            };
            if slot.is_some() {
                return Err(Error::new_spanned(value, format!("`{}` is given more than once", name)));
            }
            *slot = Some(value);
        }

        let message = message.ok_or_else(|| Error::new_spanned(attr, "missing `message` tag"))?;
        Ok(Self { message, labels, help })
    }
}

/// A struct that `ErrorKind` is derived for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,

    /// The names of the struct's fields, which are bound by name while the report is built. Unit
    /// structs have none.
    fields: Vec<Ident>,
    parts: ReportParts,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let input: DeriveInput = input.parse()?;
        let Data::Struct(data) = &input.data else {
            return Err(Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
        };

        let fields = match &data.fields {
            Fields::Named(named) => named.named.iter().filter_map(|field| field.ident.clone()).collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(unnamed) => {
                return Err(Error::new_spanned(unnamed, "`ErrorKind` cannot be derived for tuple structs"));
            },
        };

        Ok(ErrorKindTarget {
            parts: ReportParts::from_input(&input)?,
            name: input.ident,
            fields,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let ErrorKindTarget { name, fields, parts } = self;
        let ReportParts { message, labels, help } = parts;

        let bind_fields = (!fields.is_empty()).then(|| quote! {
            #[allow(unused_variables)]
            let #name { #(#fields),* } = self;
        });
        let label_texts = match labels {
            Some(labels) => quote! { #labels.into_iter().map(|text| text.to_string()) },
            None => quote! { std::iter::repeat(String::new()) },
        };
        let set_help = help.as_ref().map(|help| quote! { report.set_help(#help); });

        tokens.extend(quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bind_fields

                let labels = #label_texts
                    .zip(spans)
                    .map(|(text, span)| {
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(collapse_error::EXPR);
                        if text.is_empty() {
                            label
                        } else {
                            label.with_message(text)
                        }
                    });

                #[allow(unused_mut)]
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, spans[0].start)
                    .with_message(#message)
                    .with_labels(labels);
                #set_help
                report.finish()
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse(input: TokenStream2) -> Result<ErrorKindTarget> {
        syn::parse2(input)
    }

    fn error_message(input: TokenStream2) -> String {
        parse(input).unwrap_err().to_string()
    }

    #[test]
    fn named_fields_are_bound() {
        let target = parse(quote! {
            #[derive(ErrorKind)]
            #[error(message = format!("bad {}", name), labels = [""], help = "fix it")]
            struct Bad { name: String, count: usize }
        }).unwrap();

        assert_eq!(target.name, "Bad");
        assert_eq!(target.fields, ["name", "count"]);
        assert!(target.parts.labels.is_some());
        assert!(target.parts.help.is_some());
    }

    #[test]
    fn unit_struct_has_no_fields() {
        let target = parse(quote! {
            #[error(message = "unexpected end of input")]
            struct UnexpectedEof;
        }).unwrap();

        assert!(target.fields.is_empty());
        assert!(target.parts.labels.is_none());
        assert!(!target.to_token_stream().to_string().contains("let UnexpectedEof"));
    }

    #[test]
    fn rejected_targets() {
        assert!(error_message(quote! {
            #[error(message = "no")]
            struct Tuple(usize);
        }).contains("tuple structs"));
        assert!(error_message(quote! {
            #[error(message = "no")]
            enum Either { A, B }
        }).contains("only be derived for structs"));
    }

    #[test]
    fn malformed_tags() {
        assert!(error_message(quote! {
            struct Quiet;
        }).contains("missing `#[error(...)]`"));
        assert!(error_message(quote! {
            #[error(labels = [""])]
            struct Quiet;
        }).contains("missing `message`"));
        assert!(error_message(quote! {
            #[error(message = "a", message = "b")]
            struct Quiet;
        }).contains("more than once"));
        assert!(error_message(quote! {
            #[error(message = "a", note = "b")]
            struct Quiet;
        }).contains("unknown tag `note`"));
    }
}
