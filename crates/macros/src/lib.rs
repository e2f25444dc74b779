// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Timescape project*
//!
//! This crate contains the Timescape procedural macros
//!

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

// TODO: these are copied from timescape-core (so are not synced)
const MIN_YEAR: i64 = -50000;
const MAX_YEAR: i64 = 10000;

/// Split `[-]YYYY[-MM[-DD]]` into its checked parts
fn parse_date_literal(text: &str) -> Result<(i64, i64, i64), String> {
    let (is_bce, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let segments: Vec<&str> = rest.split('-').collect();
    if segments.is_empty() || segments.len() > 3 {
        return Err(format!("`{text}` is not of the form [-]YYYY[-MM[-DD]]"));
    }
    let mut values = [1_i64; 3];
    for (value, segment) in values.iter_mut().zip(&segments) {
        *value = segment
            .parse::<i64>()
            .map_err(|_| format!("`{segment}` is not a number"))?;
    }
    let [year, month, day] = values;
    let year = if is_bce { -year } else { year };

    let checks = [
        ("Year", year, MIN_YEAR, MAX_YEAR),
        ("Month", month, 1, 12),
        ("Day", day, 1, 31),
    ];
    for (type_name, value, min, max) in checks {
        if value < min || value > max {
            return Err(format!("{type_name} must be between {min} and {max}"));
        }
    }
    Ok((year, month, day))
}

/// Create a `CalendarDate`, using `date!("-0044-03-15")`, with compile time
/// checking of the value.  `CalendarDate` must be in scope.
#[proc_macro]
pub fn date(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);

    let (year, month, day) = match parse_date_literal(&lit.value()) {
        Ok(parts) => parts,
        Err(message) => {
            return syn::Error::new_spanned(lit, message)
                .to_compile_error()
                .into();
        }
    };

    quote! {
        CalendarDate::from_ymd(#year, #month, #day).unwrap()
    }
    .into()
}
