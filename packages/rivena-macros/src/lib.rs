use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    braced,
    ext::IdentExt,
    parenthesized,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    token::{Brace, Comma, Paren},
    Expr, Ident, LitStr, Path, Result, Token,
};

enum ParsedElementChild {
    Element(ParsedElement),
    Text(LitStr),
    Expr(Expr),
}

struct ParsedProp {
    key: String,
    value: Expr,
}

impl Parse for ParsedProp {
    /// Parses `key: value`. Keys may be identifiers, including keywords such as `type` or `for`,
    /// or string literals for keys which aren't identifiers, like `"data-state"`.
    fn parse(input: ParseStream) -> Result<Self> {
        let key = if input.peek(LitStr) {
            input.parse::<LitStr>()?.value()
        } else {
            Ident::parse_any(input)?.unraw().to_string()
        };
        input.parse::<Token![:]>()?;
        let value = input.parse()?;
        Ok(Self { key, value })
    }
}

struct ParsedElement {
    ty: Path,
    props: Punctuated<ParsedProp, Comma>,
    children: Vec<ParsedElementChild>,
}

impl ParsedElement {
    /// Lowercase, single-segment names are host tags. Everything else is a component.
    fn host_tag(&self) -> Option<String> {
        let ident = self.ty.get_ident()?.to_string();
        ident
            .starts_with(|c: char| c.is_ascii_lowercase())
            .then_some(ident)
    }
}

impl Parse for ParsedElement {
    /// Parses a single element of the form:
    ///
    /// MyComponent(my_prop: "foo") {
    ///     // children
    /// }
    fn parse(input: ParseStream) -> Result<Self> {
        let ty: Path = input.call(Path::parse_mod_style)?;

        let props = if input.peek(Paren) {
            let props_input;
            parenthesized!(props_input in input);
            Punctuated::parse_terminated(&props_input)?
        } else {
            Punctuated::new()
        };

        let mut children = Vec::new();
        if input.peek(Brace) {
            let children_input;
            braced!(children_input in input);
            while !children_input.is_empty() {
                if children_input.peek(Token![#]) {
                    children_input.parse::<Token![#]>()?;
                    let child_input;
                    parenthesized!(child_input in children_input);
                    children.push(ParsedElementChild::Expr(child_input.parse()?));
                } else if children_input.peek(LitStr) {
                    children.push(ParsedElementChild::Text(children_input.parse()?));
                } else {
                    children.push(ParsedElementChild::Element(children_input.parse()?));
                }
            }
        }

        Ok(Self {
            ty,
            props,
            children,
        })
    }
}

fn is_handler_key(key: &str) -> bool {
    key.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

impl ToTokens for ParsedElement {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let props = self.props.iter().map(|ParsedProp { key, value }| {
            if is_handler_key(key) {
                quote!(_rivena_props.set(#key, ::rivena::Handler::from(#value));)
            } else {
                quote!(_rivena_props.set(#key, #value);)
            }
        });

        let set_children = if !self.children.is_empty() {
            let children = self.children.iter().map(|child| match child {
                ParsedElementChild::Element(child) => quote!(#child),
                ParsedElementChild::Text(text) => quote!(::rivena::Node::text(#text)),
                ParsedElementChild::Expr(expr) => quote!(#expr),
            });
            Some(quote! {
                let mut _rivena_children: ::std::vec::Vec<::rivena::Node> = ::std::vec::Vec::new();
                #(::rivena::extend_with_nodes(&mut _rivena_children, #children);)*
                _rivena_props.set_children(_rivena_children);
            })
        } else {
            None
        };

        let node = match self.host_tag() {
            Some(tag) => quote!(::rivena::Node::from(::rivena::Element::new(#tag, _rivena_props))),
            None => {
                let ty = &self.ty;
                quote!(::rivena::Renderable::into_node(#ty, _rivena_props))
            }
        };

        tokens.extend(quote! {
            {
                #[allow(unused_mut)]
                let mut _rivena_props = ::rivena::Props::new();
                #(#props)*
                #set_children
                #node
            }
        });
    }
}

/// Builds a [`Node`](../rivena/enum.Node.html) from a declarative description.
///
/// - Lowercase names such as `div` or `button` are host elements. Other names are components,
///   which must implement `Component`, or the `Slottable` marker.
/// - Props are written as `key: value` in parentheses. Keywords like `type` work as keys, and
///   string literal keys allow names like `"data-state"`. Keys of the form `onX` take event
///   handlers: either a `Handler` or a closure taking `&Event`.
/// - Children go in braces. A string literal is a text node, another element nests, and
///   `#(expr)` splices in anything which converts into nodes: a node, an element, an `Option`
///   or an iterator.
///
/// ```ignore
/// element! {
///     form(id: "login", onSubmit: on_submit) {
///         Label(for: "email") { "Email" }
///         Input(id: "email", type: "email", value: email)
///         #(error.map(|e| element!(div(class: "text-red-500") { #(Node::text(e)) })))
///     }
/// }
/// ```
#[proc_macro]
pub fn element(input: TokenStream) -> TokenStream {
    let element = parse_macro_input!(input as ParsedElement);
    quote!(#element).into()
}
