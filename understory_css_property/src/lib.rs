// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory CSS Property: style attribute tokens and declaration values.
//!
//! This crate provides the leaf vocabulary shared by stylesheet producers and
//! by the resolution engine in `understory_css`:
//!
//! - [`Property`]: an identity-compared token for a style attribute, issued by
//!   a [`PropertyRegistry`].
//! - [`Param`]: one type-erased declaration parameter; a declaration value is
//!   an ordered [`Params`] list.
//! - [`ConvertParams`]: the pluggable conversion used to read function-style
//!   values (several raw parameters describing one typed value).
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_css_property::{Param, Params, PropertyRegistry};
//!
//! let mut registry = PropertyRegistry::new();
//! let stroke = registry.register("stroke");
//!
//! // `stroke: 0xff0000` as produced by a stylesheet parser.
//! let value: Params = [Param::new(0xff0000_u32)].into_iter().collect();
//!
//! assert_eq!(registry.name(stroke), Some("stroke"));
//! assert_eq!(value[0].downcast_ref::<u32>(), Some(&0xff0000));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod convert;
mod id;
mod registry;
mod value;

pub use convert::ConvertParams;
pub use id::{Property, PropertyId};
pub use registry::PropertyRegistry;
pub use value::{Param, Params};
