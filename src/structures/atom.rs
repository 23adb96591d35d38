// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of the Atom structure and its methods.

use indexmap::IndexMap;

use crate::structures::{element::ElementTable, vector3d::Vector3D};

/// Key of the atom export metadata holding the gro atom type.
pub const GRO_ATOM_TYPE_KEY: &str = "grotype";

/// Single atom: element symbol, position and optional export metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element symbol of the atom.
    symbol: String,
    /// Position of the atom in nm.
    position: Vector3D,
    /// Auxiliary strings used only when writing the atom into a specific file format.
    export: IndexMap<String, String>,
}

impl Atom {
    /// Create new Atom structure with the given element symbol and position.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let atom = Atom::new("O", [1.0, 2.0, 3.0].into());
    /// assert_eq!(atom.get_symbol(), "O");
    /// assert_eq!(atom.get_position().y, 2.0);
    /// ```
    pub fn new(symbol: &str, position: Vector3D) -> Self {
        Atom {
            symbol: symbol.to_string(),
            position,
            export: IndexMap::new(),
        }
    }

    /// Add export metadata to the atom.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let atom = Atom::new("O", [0.0, 0.0, 0.0].into()).with_export("grotype", "OW");
    /// assert_eq!(atom.get_export("grotype"), Some("OW"));
    /// ```
    pub fn with_export(mut self, key: &str, value: &str) -> Self {
        self.set_export(key, value);
        self
    }

    /// Get the element symbol of the atom.
    pub fn get_symbol(&self) -> &str {
        &self.symbol
    }

    /// Set the element symbol of the atom.
    pub fn set_symbol(&mut self, symbol: &str) {
        self.symbol = symbol.to_string();
    }

    /// Get the position of the atom.
    pub fn get_position(&self) -> &Vector3D {
        &self.position
    }

    /// Set the position of the atom.
    pub fn set_position(&mut self, position: Vector3D) {
        self.position = position;
    }

    /// Translate the atom by the provided vector.
    pub fn translate(&mut self, vector: &Vector3D) {
        self.position.translate(vector);
    }

    /// Get the export metadata value stored under `key`.
    pub fn get_export(&self, key: &str) -> Option<&str> {
        self.export.get(key).map(String::as_str)
    }

    /// Get all export metadata of the atom.
    pub fn get_export_as_ref(&self) -> &IndexMap<String, String> {
        &self.export
    }

    /// Set the export metadata `key` to `value`, replacing any previous value.
    pub fn set_export(&mut self, key: &str, value: &str) {
        self.export.insert(key.to_string(), value.to_string());
    }

    /// Get the atomic mass of the atom based on its element symbol.
    /// Returns `None` if the element is unknown or has no mass.
    pub fn get_mass(&self) -> Option<f32> {
        ElementTable::global().mass(&self.symbol)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn new() {
        let atom = Atom::new("Na", Vector3D::new(0.5, 1.5, 2.5));

        assert_eq!(atom.get_symbol(), "Na");
        assert_eq!(*atom.get_position(), Vector3D::new(0.5, 1.5, 2.5));
        assert!(atom.get_export_as_ref().is_empty());
        assert_eq!(atom.get_export(GRO_ATOM_TYPE_KEY), None);
    }

    #[test]
    fn export() {
        let mut atom = Atom::new("O", Vector3D::default())
            .with_export(GRO_ATOM_TYPE_KEY, "OW")
            .with_export("pdbname", "OH2");

        assert_eq!(atom.get_export(GRO_ATOM_TYPE_KEY), Some("OW"));
        assert_eq!(atom.get_export("pdbname"), Some("OH2"));

        atom.set_export(GRO_ATOM_TYPE_KEY, "OW1");
        assert_eq!(atom.get_export(GRO_ATOM_TYPE_KEY), Some("OW1"));

        let keys: Vec<&String> = atom.get_export_as_ref().keys().collect();
        assert_eq!(keys, ["grotype", "pdbname"]);
    }

    #[test]
    fn translate() {
        let mut atom = Atom::new("H", Vector3D::new(1.5, 2.5, 3.5));
        atom.translate(&Vector3D::splat(-2.0));

        assert_approx_eq!(f32, atom.get_position().x, -0.5);
        assert_approx_eq!(f32, atom.get_position().y, 0.5);
        assert_approx_eq!(f32, atom.get_position().z, 1.5);
    }

    #[test]
    fn setters() {
        let mut atom = Atom::new("C", Vector3D::default());
        atom.set_symbol("Cl");
        atom.set_position([1.0, 1.0, 1.0].into());

        assert_eq!(atom.get_symbol(), "Cl");
        assert_eq!(*atom.get_position(), Vector3D::splat(1.0));
    }

    #[test]
    fn mass() {
        assert_approx_eq!(
            f32,
            Atom::new("CL", Vector3D::default()).get_mass().unwrap(),
            35.453
        );
        assert_eq!(Atom::new("Rn", Vector3D::default()).get_mass(), None);
        assert_eq!(Atom::new("OW", Vector3D::default()).get_mass(), None);
    }
}
