// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of residues, i.e. named groups of consecutive atoms.

use indexmap::IndexMap;
use std::ops::Range;

use crate::structures::atom::Atom;

/// Key of the residue export metadata holding the gro residue name.
pub const GRO_RESIDUE_NAME_KEY: &str = "groname";

/// Residue used to construct a `System`. Owns its atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    atoms: Vec<Atom>,
    export: IndexMap<String, String>,
}

impl Residue {
    /// Create a new residue from the provided atoms.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let water = Residue::new(vec![
    ///     Atom::new("O", [0.0, 0.0, 0.0].into()).with_export("grotype", "OW"),
    ///     Atom::new("H", [0.1, 0.0, 0.0].into()).with_export("grotype", "HW1"),
    ///     Atom::new("H", [0.0, 0.1, 0.0].into()).with_export("grotype", "HW2"),
    /// ])
    /// .with_export("groname", "SOL");
    ///
    /// assert_eq!(water.get_n_atoms(), 3);
    /// ```
    pub fn new(atoms: Vec<Atom>) -> Self {
        Residue {
            atoms,
            export: IndexMap::new(),
        }
    }

    /// Add export metadata to the residue.
    pub fn with_export(mut self, key: &str, value: &str) -> Self {
        self.export.insert(key.to_string(), value.to_string());
        self
    }

    /// Get the number of atoms in the residue.
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Get the export metadata value stored under `key`.
    pub fn get_export(&self, key: &str) -> Option<&str> {
        self.export.get(key).map(String::as_str)
    }

    /// Split the residue into its atoms and its export metadata.
    pub(crate) fn into_parts(self) -> (Vec<Atom>, IndexMap<String, String>) {
        (self.atoms, self.export)
    }
}

/// Residue as stored inside a `System`: export metadata and the range of atoms it covers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResidueSpan {
    pub(crate) atoms: Range<usize>,
    pub(crate) export: IndexMap<String, String>,
}

/// Borrowed view of a residue of a `System`.
#[derive(Debug, Clone, Copy)]
pub struct ResidueRef<'a> {
    atoms: &'a [Atom],
    export: &'a IndexMap<String, String>,
}

impl<'a> ResidueRef<'a> {
    pub(crate) fn new(atoms: &'a [Atom], export: &'a IndexMap<String, String>) -> Self {
        ResidueRef { atoms, export }
    }

    /// Get the atoms of the residue.
    pub fn get_atoms(&self) -> &'a [Atom] {
        self.atoms
    }

    /// Get the number of atoms in the residue.
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Get the export metadata value stored under `key`.
    pub fn get_export(&self, key: &str) -> Option<&'a str> {
        self.export.get(key).map(String::as_str)
    }
}
