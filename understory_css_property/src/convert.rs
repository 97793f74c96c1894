// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion of function-style values.

use crate::value::Param;

/// Produces a typed value out of a full parameter list.
///
/// Typed accessors read the first parameter directly when it already has the
/// requested type. Otherwise the value is function-style (for instance a color
/// written as three channel numbers) and the accessor hands every parameter to
/// a `ConvertParams` implementation.
///
/// Any `Fn(&[Param]) -> Option<T>` closure implements this trait.
///
/// ```rust
/// use understory_css_property::{ConvertParams, Param};
///
/// let sum = |params: &[Param]| -> Option<u32> {
///     params.iter().map(|p| p.downcast_ref::<u32>().copied()).sum()
/// };
///
/// let params = [Param::new(1_u32), Param::new(2_u32)];
/// assert_eq!(sum.convert(&params), Some(3));
/// ```
pub trait ConvertParams<T> {
    /// Converts `params`, returning `None` if they do not describe a `T`.
    fn convert(&self, params: &[Param]) -> Option<T>;
}

impl<T, F> ConvertParams<T> for F
where
    F: Fn(&[Param]) -> Option<T>,
{
    #[inline]
    fn convert(&self, params: &[Param]) -> Option<T> {
        self(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    struct Joined;

    impl ConvertParams<String> for Joined {
        fn convert(&self, params: &[Param]) -> Option<String> {
            let mut out = String::new();
            for param in params {
                out.push_str(param.downcast_ref::<&str>()?);
            }
            Some(out)
        }
    }

    #[test]
    fn struct_converter() {
        let params = [Param::new("a"), Param::new("b")];
        assert_eq!(Joined.convert(&params).as_deref(), Some("ab"));
    }

    #[test]
    fn struct_converter_rejects_foreign_params() {
        let params = [Param::new("a"), Param::new(1_i32)];
        assert_eq!(Joined.convert(&params), None);
    }

    #[test]
    fn closure_converter() {
        let count = |params: &[Param]| Some(params.len());
        assert_eq!(count.convert(&[Param::new(())]), Some(1));
    }
}
