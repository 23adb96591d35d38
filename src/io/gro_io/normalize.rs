// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Conversion of gro atom types into element symbols.

use crate::errors::ParseGroError;
use crate::structures::element::ElementTable;

/// Atom types used by common force fields for water and ions
/// that are not element symbols (or are not spelled as such).
/// Keys are matched exactly.
const GRO_SPECIAL_TYPES: [(&str, &str); 8] = [
    ("OW", "O"),
    ("OW1", "O"),
    ("HW1", "H"),
    ("HW2", "H"),
    ("HW3", "H"),
    ("LI", "Li"),
    ("CL", "Cl"),
    ("NA", "Na"),
];

/// Convert a gro atom type into an element symbol using the default element registry.
///
/// ## Returns
/// - Element symbol from the table of special atom types (e.g. `OW` -> `O`), if `token` is listed there.
/// - `token` itself if it matches a known element symbol (case-insensitive).
/// - `ParseGroError::UnknownAtomType` otherwise.
///
/// ## Example
/// ```
/// # use gro_rs::io::gro_io::normalize;
/// #
/// assert_eq!(normalize("HW2").unwrap(), "H");
/// assert_eq!(normalize("CL").unwrap(), "Cl");
/// assert_eq!(normalize("fe").unwrap(), "fe");
/// assert!(normalize("XX99").is_err());
/// ```
pub fn normalize(token: &str) -> Result<String, ParseGroError> {
    normalize_with(token, ElementTable::global())
}

/// Convert a gro atom type into an element symbol using the provided element registry.
/// See [`normalize`] for details.
pub fn normalize_with(token: &str, elements: &ElementTable) -> Result<String, ParseGroError> {
    if let Some((_, symbol)) = GRO_SPECIAL_TYPES.iter().find(|(atom_type, _)| *atom_type == token) {
        return Ok(symbol.to_string());
    }

    if elements.is_known(token) {
        return Ok(token.to_string());
    }

    Err(ParseGroError::UnknownAtomType(token.to_string()))
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! normalize_special {
        ($name:ident, $token:expr, $expected:expr) => {
            paste::item! {
                #[test]
                fn [<normalize_special_ $name>]() {
                    assert_eq!(normalize($token).unwrap(), $expected);
                }
            }
        };
    }

    normalize_special!(ow, "OW", "O");
    normalize_special!(ow1, "OW1", "O");
    normalize_special!(hw1, "HW1", "H");
    normalize_special!(hw2, "HW2", "H");
    normalize_special!(hw3, "HW3", "H");
    normalize_special!(li, "LI", "Li");
    normalize_special!(cl, "CL", "Cl");
    normalize_special!(na, "NA", "Na");

    #[test]
    fn normalize_all_special() {
        for (token, symbol) in GRO_SPECIAL_TYPES {
            assert_eq!(normalize(token).unwrap(), symbol);
        }
    }

    #[test]
    fn normalize_known_symbols() {
        let elements = ElementTable::global();
        assert_eq!(elements.iter().count(), 92);

        for element in elements.iter() {
            let symbol = element.get_symbol();

            // `LI`, `CL` and `NA` are special atom types mapped to the canonical symbol
            let expected_upper = match symbol {
                "Li" | "Cl" | "Na" => symbol.to_string(),
                _ => symbol.to_uppercase(),
            };

            assert_eq!(normalize(symbol).unwrap(), symbol);
            assert_eq!(normalize(&symbol.to_uppercase()).unwrap(), expected_upper);
            assert_eq!(
                normalize(&symbol.to_lowercase()).unwrap(),
                symbol.to_lowercase()
            );
        }
    }

    #[test]
    fn normalize_keeps_raw_token() {
        // `CA` is a carbon alpha in proteins, but it is also the symbol of calcium
        assert_eq!(normalize("CA").unwrap(), "CA");
        assert_eq!(normalize("cl").unwrap(), "cl");
        assert_eq!(normalize("Na").unwrap(), "Na");
    }

    #[test]
    fn normalize_special_case_sensitive() {
        match normalize("ow") {
            Err(ParseGroError::UnknownAtomType(token)) => assert_eq!(token, "ow"),
            Ok(x) => panic!("Normalization should have failed, but returned `{}`.", x),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn normalize_unknown() {
        for token in ["XX99", "SC1", "BB", "HW4", ""] {
            assert_eq!(
                normalize(token),
                Err(ParseGroError::UnknownAtomType(token.to_string()))
            );
        }
    }

    #[test]
    fn normalize_with_custom_elements() {
        let elements =
            ElementTable::from_yaml_str("---\nhydrogen:\n  symbol: H\n").unwrap();

        assert_eq!(normalize_with("h", &elements).unwrap(), "h");
        assert_eq!(normalize_with("OW", &elements).unwrap(), "O");
        assert!(normalize_with("C", &elements).is_err());
    }
}
