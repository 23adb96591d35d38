// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of the System structure and its methods.

use std::error::Error;
use std::path::Path;

use crate::errors::SystemError;
use crate::io::gro_io;
use crate::structures::{
    atom::Atom,
    residue::{Residue, ResidueRef, ResidueSpan},
    vector3d::Vector3D,
};

/// Molecular system: atoms grouped into residues inside a cubic simulation box.
///
/// Coordinates are stored centered, i.e. with the simulation box spanning
/// roughly `[-box_size / 2, box_size / 2)` in every dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    /// Name of the molecular system.
    name: String,
    /// Vector of atoms in the system.
    atoms: Vec<Atom>,
    /// Residues of the system. Cover all atoms, in order, without gaps.
    residues: Vec<ResidueSpan>,
    /// Edge length of the cubic simulation box in nm.
    box_size: f32,
    /// Simulation time in picoseconds, if known.
    simulation_time: Option<f32>,
    /// Simulation step, if known.
    simulation_step: Option<u64>,
}

/// ## Methods for creating `System` structures and accessing their properties.
impl System {
    /// Create new System structure with a given name from the provided atoms and box size.
    /// Every atom is placed into its own residue with no export metadata.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let atoms = vec![
    ///     Atom::new("Na", [0.0, 0.0, 0.0].into()),
    ///     Atom::new("Cl", [0.5, 0.0, 0.0].into()),
    /// ];
    ///
    /// let system = System::new("Salt", atoms, 3.0);
    /// assert_eq!(system.get_n_atoms(), 2);
    /// assert_eq!(system.get_n_residues(), 2);
    /// ```
    pub fn new(name: &str, atoms: Vec<Atom>, box_size: f32) -> Self {
        let residues = (0..atoms.len())
            .map(|i| ResidueSpan {
                atoms: i..i + 1,
                export: Default::default(),
            })
            .collect();

        System {
            name: name.to_string(),
            atoms,
            residues,
            box_size,
            simulation_time: None,
            simulation_step: None,
        }
    }

    /// Create new System structure from residues. Atoms of the system are
    /// the atoms of the residues in the order in which the residues are provided.
    ///
    /// ## Returns
    /// `System` if successful. `SystemError::EmptyResidue` if any of the residues contains no atoms.
    pub fn from_residues(
        name: &str,
        residues: Vec<Residue>,
        box_size: f32,
    ) -> Result<Self, SystemError> {
        let mut atoms = Vec::new();
        let mut spans = Vec::with_capacity(residues.len());

        for (i, residue) in residues.into_iter().enumerate() {
            if residue.get_n_atoms() == 0 {
                return Err(SystemError::EmptyResidue(i));
            }

            let (residue_atoms, export) = residue.into_parts();
            let start = atoms.len();
            atoms.extend(residue_atoms);
            spans.push(ResidueSpan {
                atoms: start..atoms.len(),
                export,
            });
        }

        Ok(System {
            name: name.to_string(),
            atoms,
            residues: spans,
            box_size,
            simulation_time: None,
            simulation_step: None,
        })
    }

    /// Assemble a System from atoms and residues that are already known to cover the atoms.
    pub(crate) fn from_raw_parts(
        name: &str,
        atoms: Vec<Atom>,
        residues: Vec<ResidueSpan>,
        box_size: f32,
    ) -> Self {
        System {
            name: name.to_string(),
            atoms,
            residues,
            box_size,
            simulation_time: None,
            simulation_step: None,
        }
    }

    /// Create a new System by reading a gro file.
    /// If the file contains multiple frames, only the first one is read.
    ///
    /// ## Example
    /// ```no_run
    /// # use gro_rs::prelude::*;
    /// #
    /// let system = match System::from_file("system.gro") {
    ///     Ok(x) => x,
    ///     Err(e) => {
    ///         eprintln!("{}", e);
    ///         return;
    ///     }
    /// };
    /// ```
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(gro_io::read_gro(filename)?)
    }

    /// Create a new System by parsing the content of a gro file.
    /// If the content contains multiple frames, only the first one is parsed.
    pub fn from_gro_str(content: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(gro_io::GroParser::new().parse_str(content)?)
    }

    /// Get the name of the molecular system.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Get the number of atoms in the system.
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Get the number of residues in the system.
    pub fn get_n_residues(&self) -> usize {
        self.residues.len()
    }

    /// Get the edge length of the cubic simulation box.
    pub fn get_box_size(&self) -> f32 {
        self.box_size
    }

    /// Set the edge length of the cubic simulation box.
    pub fn set_box_size(&mut self, box_size: f32) {
        self.box_size = box_size;
    }

    /// Get the simulation time of the frame in ps, if known.
    pub fn get_simulation_time(&self) -> Option<f32> {
        self.simulation_time
    }

    /// Set the simulation time of the frame in ps.
    pub fn set_simulation_time(&mut self, time: f32) {
        self.simulation_time = Some(time);
    }

    /// Get the simulation step of the frame, if known.
    pub fn get_simulation_step(&self) -> Option<u64> {
        self.simulation_step
    }

    /// Set the simulation step of the frame.
    pub fn set_simulation_step(&mut self, step: u64) {
        self.simulation_step = Some(step);
    }

    /// Get immutable reference to the atoms of the system.
    pub fn get_atoms_as_ref(&self) -> &Vec<Atom> {
        &self.atoms
    }

    /// Get immutable reference to the atom with the given (0-based) index.
    pub fn get_atom_as_ref(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Get mutable reference to the atom with the given (0-based) index.
    pub fn get_atom_as_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Iterate over the atoms of the system.
    pub fn atoms_iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Mutably iterate over the atoms of the system.
    pub fn atoms_iter_mut(&mut self) -> std::slice::IterMut<'_, Atom> {
        self.atoms.iter_mut()
    }

    /// Iterate over the residues of the system in order.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let residue = Residue::new(vec![
    ///     Atom::new("Na", [0.0, 0.0, 0.0].into()),
    ///     Atom::new("Cl", [0.3, 0.0, 0.0].into()),
    /// ])
    /// .with_export("groname", "NACL");
    ///
    /// let system = System::from_residues("Ion pair", vec![residue], 2.0).unwrap();
    /// for residue in system.residues_iter() {
    ///     assert_eq!(residue.get_export("groname"), Some("NACL"));
    ///     assert_eq!(residue.get_n_atoms(), 2);
    /// }
    /// ```
    pub fn residues_iter(&self) -> impl Iterator<Item = ResidueRef<'_>> + '_ {
        self.residues
            .iter()
            .map(|span| ResidueRef::new(&self.atoms[span.atoms.clone()], &span.export))
    }

    /// Translate all atoms of the system by the provided vector.
    pub fn translate_all(&mut self, vector: &Vector3D) {
        self.atoms.iter_mut().for_each(|atom| atom.translate(vector));
    }

    /// Calculate the total mass of the system.
    /// Returns `None` if the mass of any atom is unknown.
    pub fn total_mass(&self) -> Option<f32> {
        self.atoms.iter().map(Atom::get_mass).sum()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
