// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of functions for reading and writing single-frame gro files.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::auxiliary::{GRO_BANNER, GRO_MAX_COORDINATE, GRO_MIN_COORDINATE};
use crate::errors::{ExportOwner, ParseGroError, WriteGroError};
use crate::structures::{
    atom::GRO_ATOM_TYPE_KEY, residue::GRO_RESIDUE_NAME_KEY, vector3d::Vector3D,
};
use crate::system::System;

use super::GroParser;

/// Read a gro file and construct a System structure.
/// If the file contains multiple frames, only the first one is read.
///
/// ## Notes
/// - Atom lines are read using fixed columns. Use [`GroParser`] to choose a different strategy.
pub fn read_gro(filename: impl AsRef<Path>) -> Result<System, ParseGroError> {
    GroParser::new().read(filename)
}

/// Read the whole content of a file into a string.
pub(super) fn read_to_string(filename: impl AsRef<Path>) -> Result<String, ParseGroError> {
    let mut file = File::open(filename.as_ref())
        .map_err(|_| ParseGroError::FileNotFound(Box::from(filename.as_ref())))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|_| ParseGroError::CouldNotRead(Box::from(filename.as_ref())))?;

    Ok(content)
}

impl<'a> GroParser<'a> {
    /// Read a gro file and construct a System structure.
    /// If the file contains multiple frames, only the first one is read.
    pub fn read(&self, filename: impl AsRef<Path>) -> Result<System, ParseGroError> {
        self.parse_str(&read_to_string(filename)?)
    }

    /// Parse the content of a gro file and construct a System structure.
    /// If the content contains multiple frames, only the first one is parsed.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let content = "Water\n    3\n    1SOL     OW    1   0.126   1.624   1.679\n    1SOL    HW1    2   0.190   1.661   1.747\n    1SOL    HW2    3   0.177   1.568   1.613\n   1.86206   1.86206   1.86206\n";
    ///
    /// let system = GroParser::new().parse_str(content).unwrap();
    /// assert_eq!(system.get_n_atoms(), 3);
    /// assert_eq!(system.get_n_residues(), 1);
    /// ```
    pub fn parse_str(&self, content: &str) -> Result<System, ParseGroError> {
        let lines: Vec<&str> = content.lines().collect();
        Ok(self.parse_frame(&lines)?.into_system())
    }
}

/// ## Methods for writing gro files.
impl System {
    /// Write the `System` into a gro file with the given name.
    ///
    /// ## Returns
    /// `Ok` if writing has been successful. Otherwise `WriteGroError`.
    ///
    /// ## Example
    /// ```no_run
    /// # use gro_rs::prelude::*;
    /// #
    /// let system = System::from_file("system.gro").unwrap();
    /// if let Err(e) = system.write_gro("system_copy.gro") {
    ///     eprintln!("{}", e);
    ///     return;
    /// }
    /// ```
    ///
    /// ## Notes
    /// - Every residue must have `groname` and every atom must have `grotype` export metadata.
    ///   Systems read from gro files always have them.
    /// - Positions are shifted by `box_size / 2` in every dimension, undoing the centering
    ///   applied when a gro file is read.
    /// - Residue and atom numbers are assigned sequentially starting from 1
    ///   and wrap around after 99999. Names longer than 5 characters are truncated.
    /// - Nothing is written (and the file is not created) if the `System` can not be written.
    pub fn write_gro(&self, filename: impl AsRef<Path>) -> Result<(), WriteGroError> {
        // check everything before the file is even created
        self.check_gro_writable()?;

        let output = File::create(&filename)
            .map_err(|_| WriteGroError::CouldNotCreate(Box::from(filename.as_ref())))?;

        let mut writer = BufWriter::new(output);
        self.write_gro_unchecked(&mut writer)?;
        writer.flush().map_err(|_| WriteGroError::CouldNotWrite)?;

        Ok(())
    }

    /// Write the `System` in gro format into the provided stream.
    /// See [`System::write_gro`] for details.
    pub fn write_gro_to(&self, stream: &mut impl Write) -> Result<(), WriteGroError> {
        self.check_gro_writable()?;
        self.write_gro_unchecked(stream)
    }

    /// Convert the `System` into the content of a gro file.
    /// See [`System::write_gro`] for details.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let residue = Residue::new(vec![
    ///     Atom::new("Na", [0.0, 0.0, 0.0].into()).with_export("grotype", "NA"),
    /// ])
    /// .with_export("groname", "ION");
    ///
    /// let system = System::from_residues("Ion", vec![residue], 3.0).unwrap();
    /// let content = system.to_gro_string().unwrap();
    ///
    /// let expected = "Generated by gro_rs\n    1\n    1  ION   NA    1   1.500   1.500   1.500\n   3.00000   3.00000   3.00000\n";
    /// assert_eq!(content, expected);
    /// ```
    pub fn to_gro_string(&self) -> Result<String, WriteGroError> {
        let mut buffer = Vec::new();
        self.write_gro_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|_| WriteGroError::CouldNotWrite)
    }

    /// Check that all export metadata are present and all coordinates and the box fit the gro format.
    fn check_gro_writable(&self) -> Result<(), WriteGroError> {
        // also rejects NaN
        if !(GRO_MIN_COORDINATE..=GRO_MAX_COORDINATE).contains(&self.get_box_size()) {
            return Err(WriteGroError::CoordinateTooLarge);
        }

        for (i, residue) in self.residues_iter().enumerate() {
            if residue.get_export(GRO_RESIDUE_NAME_KEY).is_none() {
                return Err(WriteGroError::MissingExportMetadata {
                    owner: ExportOwner::Residue(i),
                    key: GRO_RESIDUE_NAME_KEY,
                });
            }
        }

        let shift = self.uncentering_shift();
        for (i, atom) in self.atoms_iter().enumerate() {
            if atom.get_export(GRO_ATOM_TYPE_KEY).is_none() {
                return Err(WriteGroError::MissingExportMetadata {
                    owner: ExportOwner::Atom(i),
                    key: GRO_ATOM_TYPE_KEY,
                });
            }

            let mut position = *atom.get_position();
            position.translate(&shift);
            if !position.is_within(GRO_MIN_COORDINATE, GRO_MAX_COORDINATE) {
                return Err(WriteGroError::CoordinateTooLarge);
            }
        }

        Ok(())
    }

    /// Vector moving the centered coordinates back into the box spanning `[0, box_size)`.
    fn uncentering_shift(&self) -> Vector3D {
        Vector3D::splat(self.get_box_size() * 0.5)
    }

    /// Write the `System` in gro format. Expects `check_gro_writable` to have passed.
    fn write_gro_unchecked(&self, stream: &mut impl Write) -> Result<(), WriteGroError> {
        write_header(stream, self.get_n_atoms())?;

        let shift = self.uncentering_shift();
        let mut atom_number = 0usize;

        for (i, residue) in self.residues_iter().enumerate() {
            let residue_name = residue
                .get_export(GRO_RESIDUE_NAME_KEY)
                .ok_or(WriteGroError::MissingExportMetadata {
                    owner: ExportOwner::Residue(i),
                    key: GRO_RESIDUE_NAME_KEY,
                })?;

            for atom in residue.get_atoms() {
                let atom_type =
                    atom.get_export(GRO_ATOM_TYPE_KEY)
                        .ok_or(WriteGroError::MissingExportMetadata {
                            owner: ExportOwner::Atom(atom_number),
                            key: GRO_ATOM_TYPE_KEY,
                        })?;

                atom_number += 1;

                let mut position = *atom.get_position();
                position.translate(&shift);

                writeln!(
                    stream,
                    "{:>5}{:>5}{:>5}{:>5}{:>8.3}{:>8.3}{:>8.3}",
                    (i + 1) % 100000,
                    truncate_name(residue_name),
                    truncate_name(atom_type),
                    atom_number % 100000,
                    position.x,
                    position.y,
                    position.z,
                )
                .map_err(|_| WriteGroError::CouldNotWrite)?;
            }
        }

        write_box(stream, self.get_box_size())
    }
}

/// Limit the name to the 5 characters available in the gro format.
fn truncate_name(name: &str) -> &str {
    match name.char_indices().nth(5) {
        Some((index, _)) => &name[..index],
        None => name,
    }
}

/// Write gro file header into an open stream.
fn write_header(stream: &mut impl Write, n_atoms: usize) -> Result<(), WriteGroError> {
    writeln!(stream, "{}", GRO_BANNER).map_err(|_| WriteGroError::CouldNotWrite)?;
    writeln!(stream, "{:>5}", n_atoms).map_err(|_| WriteGroError::CouldNotWrite)?;

    Ok(())
}

/// Write the dimensions of the cubic box into an open stream.
fn write_box(stream: &mut impl Write, box_size: f32) -> Result<(), WriteGroError> {
    writeln!(
        stream,
        "{:>10.5}{:>10.5}{:>10.5}",
        box_size, box_size, box_size
    )
    .map_err(|_| WriteGroError::CouldNotWrite)
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests_read {
    use super::*;
    use crate::structures::atom::Atom;
    use float_cmp::assert_approx_eq;

    #[test]
    fn read() {
        let system = read_gro("test_files/example.gro").unwrap();

        assert_eq!(system.get_name(), "Test system");
        assert_eq!(system.get_n_atoms(), 2);
        assert_approx_eq!(f32, system.get_box_size(), 4.0);

        let atoms: Vec<&Atom> = system.atoms_iter().collect();
        assert_eq!(atoms[0].get_symbol(), "O");
        assert_eq!(atoms[1].get_symbol(), "H");

        assert_approx_eq!(f32, atoms[0].get_position().x, -1.0);
        assert_approx_eq!(f32, atoms[0].get_position().y, 0.0);
        assert_approx_eq!(f32, atoms[0].get_position().z, 1.0);

        assert_approx_eq!(f32, atoms[1].get_position().x, -0.5);
        assert_approx_eq!(f32, atoms[1].get_position().y, 0.5);
        assert_approx_eq!(f32, atoms[1].get_position().z, 1.5);
    }

    #[test]
    fn read_water() {
        let system = read_gro("test_files/water.gro").unwrap();

        assert_eq!(system.get_name(), "Water and ions");
        assert_eq!(system.get_n_atoms(), 8);
        assert_eq!(system.get_n_residues(), 4);
        assert_approx_eq!(f32, system.get_box_size(), 3.0);

        let symbols: Vec<&str> = system.atoms_iter().map(|a| a.get_symbol()).collect();
        assert_eq!(symbols, ["O", "H", "H", "O", "H", "H", "Na", "Cl"]);

        let last = system.get_atom_as_ref(7).unwrap();
        assert_approx_eq!(f32, last.get_position().x, 2.875 - 1.5);
        assert_approx_eq!(f32, last.get_position().y, 0.125 - 1.5);
        assert_approx_eq!(f32, last.get_position().z, 1.0 - 1.5);
        assert_eq!(last.get_export(GRO_ATOM_TYPE_KEY), Some("CL"));
    }

    #[test]
    fn read_first_frame_of_trajectory() {
        let system = read_gro("test_files/trajectory.gro").unwrap();
        assert_eq!(system.get_n_atoms(), 2);
        assert_eq!(system.get_simulation_step(), Some(0));
    }

    #[test]
    fn read_nonexistent() {
        match read_gro("test_files/nonexistent.gro") {
            Err(ParseGroError::FileNotFound(path)) => {
                assert_eq!(path, Box::from(Path::new("test_files/nonexistent.gro")))
            }
            Ok(_) => panic!("Nonexistent file seems to exist."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    macro_rules! read_gro_fails {
        ($name:ident, $file:expr, $expected:expr) => {
            #[test]
            fn $name() {
                match read_gro($file) {
                    Err(e) => assert_eq!(e, $expected),
                    Ok(_) => panic!("Parsing should have failed, but it succeeded."),
                }
            }
        };
    }

    read_gro_fails!(
        read_empty_file,
        "test_files/example_empty.gro",
        ParseGroError::MalformedHeader(String::new())
    );

    read_gro_fails!(
        read_unknown_atom_type,
        "test_files/example_unknown_type.gro",
        ParseGroError::UnknownAtomType("XX99".to_string())
    );

    read_gro_fails!(
        read_missing_atom,
        "test_files/example_missing_atom.gro",
        ParseGroError::MalformedAtomRecord {
            line: 4,
            content: "   4.00000   4.00000   4.00000".to_string()
        }
    );

    #[test]
    fn from_file() {
        let system = System::from_file("test_files/example.gro").unwrap();
        assert_eq!(system.get_n_atoms(), 2);
    }

    #[test]
    fn from_file_fails() {
        if System::from_file("test_files/example_unknown_type.gro").is_ok() {
            panic!("Parsing should have failed, but it succeeded.")
        }
    }

    #[test]
    fn from_gro_str() {
        let content = std::fs::read_to_string("test_files/example.gro").unwrap();
        let system = System::from_gro_str(&content).unwrap();
        assert_eq!(system, read_gro("test_files/example.gro").unwrap());
    }
}
