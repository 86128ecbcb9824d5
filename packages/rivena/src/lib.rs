//! # rivena
//!
//! `rivena` builds user interfaces as declarative element trees and renders them to the
//! terminal.
//!
//! Trees are made of host elements such as `div` or `button`, text, and components, which are
//! plain functions of their props and the contexts provided above them. The [`Slot`] component
//! and its [`Slottable`] marker let a component forward its props onto an element its caller
//! supplies.
//!
//! ```
//! use rivena::prelude::*;
//!
//! let tree = render(
//!     element! {
//!         div(class: "border px-1") {
//!             Slot(class: "font-bold") {
//!                 span { "Hello" }
//!             }
//!         }
//!     },
//!     &Scope::root(),
//!     Some(9),
//! )
//! .unwrap();
//! assert_eq!(tree.to_string(), "┌───────┐\n│ Hello │\n└───────┘\n");
//! ```

#![warn(missing_docs)]

// # Organization
//
// Code is organized into modules primarily for the benefit of the maintainers. Types will be
// re-exported in the root so that users of the library have a flat namespace to work with.
//
// The exception is components, which remain in their module for the public API.

mod canvas;
mod component;
mod context;
mod element;
mod error;
mod handler;
mod merge;
mod props;
mod render;
pub mod style;
mod theme;

mod flattened_exports {
    pub use crate::canvas::*;
    pub use crate::component::*;
    pub use crate::context::*;
    pub use crate::element::*;
    pub use crate::error::*;
    pub use crate::handler::*;
    pub use crate::merge::*;
    pub use crate::props::*;
    pub use crate::render::*;
    pub use crate::style::{
        color_name, parse_color, BorderCharacters, BorderStyle, Color, Edges, Palette, Stylesheet,
        Weight,
    };
    pub use crate::theme::*;

    pub use rivena_macros::*;
}

pub use flattened_exports::*;

/// Components for building your UI.
pub mod components;

/// By importing this module, you'll bring all of the crate's commonly used types into scope.
pub mod prelude {
    pub use crate::components::*;
    pub use crate::flattened_exports::*;
    pub use crate::style;
}

// So we can use our own macros.
extern crate self as rivena;
