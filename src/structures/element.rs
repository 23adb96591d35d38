// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of the registry of chemical elements known to `gro_rs`.

use hashbrown::HashMap;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use crate::errors::ParseElementError;

/// Registry of all elements that can be assigned to atoms.
/// All lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct ElementTable {
    /// Keys are lower-cased element symbols.
    elements: HashMap<String, Element>,
}

/// Information about a single chemical element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    symbol: String,
    mass: Option<f32>,
}

impl Element {
    /// Get the name of the element.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Get the canonical symbol of the element.
    pub fn get_symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the atomic mass of the element in amu (daltons), if known.
    pub fn get_mass(&self) -> Option<f32> {
        self.mass
    }
}

/// Single entry of the elements yaml file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    symbol: String,
    mass: Option<f32>,
}

static GLOBAL_ELEMENTS: OnceLock<ElementTable> = OnceLock::new();

impl ElementTable {
    /// Get the default element registry shared by the whole process.
    ///
    /// ## Notes
    /// - The registry is parsed from `src/config/elements.yaml`, which is included
    ///   in the library at compile time, the first time this function is called.
    ///   All subsequent calls return the same immutable table.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let elements = ElementTable::global();
    /// assert!(elements.is_known("CL"));
    /// assert_eq!(elements.canonical_symbol("cl"), Some("Cl"));
    /// ```
    pub fn global() -> &'static ElementTable {
        GLOBAL_ELEMENTS.get_or_init(|| {
            ElementTable::from_yaml_str(include_str!("../config/elements.yaml"))
                .expect("FATAL GRO_RS ERROR | ElementTable::global | Default `elements.yaml` could not be parsed.")
        })
    }

    /// Construct a new `ElementTable` from the provided yaml file.
    ///
    /// ## Notes
    /// - For the expected format, see `src/config/elements.yaml`.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, ParseElementError> {
        let mut file = File::open(filename.as_ref())
            .map_err(|_| ParseElementError::FileNotFound(Box::from(filename.as_ref())))?;

        let mut yaml = String::new();
        file.read_to_string(&mut yaml)
            .map_err(|_| ParseElementError::FileCouldNotBeRead(Box::from(filename.as_ref())))?;

        ElementTable::from_yaml_str(&yaml)
    }

    /// Parse a yaml string into an `ElementTable`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ParseElementError> {
        let entries: IndexMap<String, ElementEntry> =
            serde_yaml::from_str(yaml).map_err(ParseElementError::CouldNotParseYaml)?;

        let mut elements: HashMap<String, Element> = HashMap::with_capacity(entries.len());
        for (name, entry) in entries.into_iter() {
            let key = entry.symbol.to_lowercase();
            if let Some(previous) = elements.get(&key) {
                return Err(ParseElementError::DuplicateSymbol(
                    entry.symbol,
                    previous.name.clone(),
                    name,
                ));
            }

            elements.insert(
                key,
                Element {
                    name,
                    symbol: entry.symbol,
                    mass: entry.mass,
                },
            );
        }

        Ok(ElementTable { elements })
    }

    /// Get the number of elements in the registry.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the registry contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all elements of the registry in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Get information about the element with the given symbol (case-insensitive).
    pub fn get(&self, symbol: &str) -> Option<&Element> {
        self.elements.get(&symbol.to_lowercase())
    }

    /// Check whether `token` matches any known element symbol (case-insensitive).
    pub fn is_known(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Get the symbol of the element matching `token` with its canonical capitalization.
    pub fn canonical_symbol(&self, token: &str) -> Option<&str> {
        self.get(token).map(|element| element.get_symbol())
    }

    /// Get the atomic mass of the element matching `symbol` (case-insensitive).
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let mass = ElementTable::global().mass("NA").unwrap();
    /// assert_approx_eq!(f32, mass, 22.9897);
    /// ```
    pub fn mass(&self, symbol: &str) -> Option<f32> {
        self.get(symbol).and_then(|element| element.mass)
    }
}

/// Get the atomic mass of the element `symbol` from the default registry.
/// Returns `None` if the element is unknown or has no mass assigned.
pub fn element_mass(symbol: &str) -> Option<f32> {
    ElementTable::global().mass(symbol)
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn global_size() {
        let elements = ElementTable::global();
        assert_eq!(elements.len(), 92);
        assert!(!elements.is_empty());
    }

    #[test]
    fn iter_all() {
        let elements = ElementTable::global();
        assert_eq!(elements.iter().count(), 92);

        for element in elements.iter() {
            let symbol = element.get_symbol();
            assert_eq!(elements.canonical_symbol(symbol), Some(symbol));
        }

        assert!(elements.iter().any(|element| element.get_symbol() == "U"));
        assert!(elements.iter().any(|element| element.get_symbol() == "He"));
    }

    #[test]
    fn global_is_shared() {
        let first = ElementTable::global() as *const ElementTable;
        let second = ElementTable::global() as *const ElementTable;
        assert_eq!(first, second);
    }

    #[test]
    fn lookup_case_insensitive() {
        let elements = ElementTable::global();

        for token in ["CL", "cl", "Cl", "cL"] {
            assert!(elements.is_known(token));
            assert_eq!(elements.canonical_symbol(token), Some("Cl"));
        }

        let chlorine = elements.get("CL").unwrap();
        assert_eq!(chlorine.get_name(), "chlorine");
        assert_eq!(chlorine.get_symbol(), "Cl");
    }

    #[test]
    fn unknown() {
        let elements = ElementTable::global();
        assert!(!elements.is_known("OW"));
        assert!(!elements.is_known("XX99"));
        assert!(!elements.is_known(""));
        assert_eq!(elements.canonical_symbol("HW1"), None);
        assert_eq!(element_mass("XX99"), None);
    }

    #[test]
    fn masses() {
        assert_approx_eq!(f32, element_mass("H").unwrap(), 1.0079);
        assert_approx_eq!(f32, element_mass("o").unwrap(), 15.9994);
        assert_approx_eq!(f32, element_mass("FE").unwrap(), 55.845);
        assert_approx_eq!(f32, element_mass("Tc").unwrap(), 98.0);
        assert_approx_eq!(f32, element_mass("u").unwrap(), 238.0289);
    }

    #[test]
    fn known_without_mass() {
        let elements = ElementTable::global();
        assert!(elements.is_known("Po"));
        assert_eq!(elements.mass("Po"), None);
        assert_eq!(elements.mass("RN"), None);
    }

    #[test]
    fn from_yaml_str() {
        let yaml = "---\ncarbon:\n  symbol: C\n  mass: 12.0\npolonium:\n  symbol: Po\n...\n";
        let elements = ElementTable::from_yaml_str(yaml).unwrap();

        assert_eq!(elements.len(), 2);
        assert_approx_eq!(f32, elements.mass("c").unwrap(), 12.0);
        assert_eq!(elements.mass("po"), None);
        assert!(!elements.is_known("H"));
    }

    #[test]
    fn from_yaml_str_duplicate() {
        let yaml = "---\ncarbon:\n  symbol: C\ncarbonium:\n  symbol: c\n";
        match ElementTable::from_yaml_str(yaml) {
            Err(ParseElementError::DuplicateSymbol(symbol, first, second)) => {
                assert_eq!(symbol, "c");
                assert_eq!(first, "carbon");
                assert_eq!(second, "carbonium");
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn from_yaml_str_unknown_field() {
        let yaml = "---\ncarbon:\n  symbol: C\n  charge: 0.0\n";
        match ElementTable::from_yaml_str(yaml) {
            Err(ParseElementError::CouldNotParseYaml(_)) => (),
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "---\nhydrogen:\n  symbol: H\n  mass: 1.008\n").unwrap();

        let elements = ElementTable::from_file(file.path()).unwrap();
        assert_eq!(elements.len(), 1);
        assert_approx_eq!(f32, elements.mass("h").unwrap(), 1.008);
    }

    #[test]
    fn from_file_nonexistent() {
        match ElementTable::from_file("test_files/nonexistent.yaml") {
            Err(ParseElementError::FileNotFound(path)) => {
                assert_eq!(path, Box::from(Path::new("test_files/nonexistent.yaml")))
            }
            Ok(_) => panic!("Reading should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }
}
