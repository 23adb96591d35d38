// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of functions for reading and writing gro files.
//!
//! A gro frame consists of a title line, a line with the number of atoms,
//! one fixed-width line per atom and a line with the simulation box dimensions.

pub mod normalize;
pub mod structure;
pub mod trajectory;

use indexmap::IndexMap;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

pub use normalize::{normalize, normalize_with};
pub use structure::read_gro;
pub use trajectory::{read_gro_traj, split_frames, FrameChunks, GroTrajectory};

use crate::errors::ParseGroError;
use crate::structures::{
    atom::{Atom, GRO_ATOM_TYPE_KEY},
    element::ElementTable,
    residue::{ResidueSpan, GRO_RESIDUE_NAME_KEY},
    vector3d::Vector3D,
};
use crate::system::System;

/// Number of lines in a gro frame besides the atom lines (title, atom count, box).
const GRO_FRAME_EXTRA_LINES: usize = 3;

/// Strategy used to split atom lines of a gro file into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStrategy {
    /// Fields are read from the fixed columns defined by the gro format.
    #[default]
    Fixed,
    /// Fields are separated by whitespace. Residue number and residue name may be glued together.
    Whitespace,
    /// Fixed columns are tried first. Lines that can not be read this way are split by whitespace.
    Auto,
}

/// Single atom line of a gro frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub residue_number: usize,
    pub residue_name: String,
    /// Atom type exactly as written in the file.
    pub atom_type: String,
    /// Element symbol the atom type was resolved to.
    pub element: String,
    pub atom_number: usize,
    pub position: [f32; 3],
}

/// Parsed gro frame. Converted into a `System` using [`Frame::into_system`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub title: String,
    pub atoms: Vec<AtomRecord>,
    /// Edge length of the cubic simulation box.
    pub box_size: f32,
}

impl Frame {
    /// Get the number of atoms in the frame.
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Convert the frame into a `System`.
    ///
    /// ## Notes
    /// - All positions are shifted by `-box_size / 2` in every dimension
    ///   so that the simulation box is centered at the origin.
    /// - Consecutive atoms sharing residue number and residue name form one residue.
    ///   Residue names are stored as `groname` export metadata of the residues,
    ///   atom types as `grotype` export metadata of the atoms.
    /// - Simulation time and step are read from the title, if present (`t= 10.0 step= 5000`).
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let lines = [
    ///     "Test system",
    ///     "    1",
    ///     "    1RES     O    1   1.000   2.000   3.000",
    ///     "   4.00000   4.00000   4.00000",
    /// ];
    ///
    /// let frame = GroParser::new().parse_frame(&lines).unwrap();
    /// let system = frame.into_system();
    ///
    /// let position = system.get_atom_as_ref(0).unwrap().get_position();
    /// assert_approx_eq!(f32, position.x, -1.0);
    /// assert_approx_eq!(f32, position.y, 0.0);
    /// assert_approx_eq!(f32, position.z, 1.0);
    /// ```
    pub fn into_system(self) -> System {
        let mut atoms = Vec::with_capacity(self.atoms.len());
        let mut residues: Vec<ResidueSpan> = Vec::new();
        let mut current: Option<(usize, String)> = None;

        for (i, record) in self.atoms.into_iter().enumerate() {
            let same_residue = matches!(
                &current,
                Some((number, name)) if *number == record.residue_number && *name == record.residue_name
            );

            if same_residue {
                if let Some(last) = residues.last_mut() {
                    last.atoms.end = i + 1;
                }
            } else {
                let mut export = IndexMap::new();
                export.insert(
                    GRO_RESIDUE_NAME_KEY.to_string(),
                    record.residue_name.clone(),
                );
                residues.push(ResidueSpan {
                    atoms: i..i + 1,
                    export,
                });
                current = Some((record.residue_number, record.residue_name));
            }

            atoms.push(
                Atom::new(&record.element, record.position.into())
                    .with_export(GRO_ATOM_TYPE_KEY, &record.atom_type),
            );
        }

        let mut system = System::from_raw_parts(&self.title, atoms, residues, self.box_size);
        system.translate_all(&Vector3D::splat(-self.box_size * 0.5));

        if let Some((time, step)) = extract_time_step(&self.title) {
            system.set_simulation_time(time);
            system.set_simulation_step(step);
        }

        system
    }
}

impl From<Frame> for System {
    fn from(frame: Frame) -> Self {
        frame.into_system()
    }
}

/// Reader of gro frames. Configured using the `with_*` methods.
///
/// ## Example
/// Reading a loosely formatted gro file using a custom element registry.
/// ```no_run
/// # use gro_rs::prelude::*;
/// #
/// let elements = ElementTable::from_file("my_elements.yaml").unwrap();
/// let system = GroParser::new()
///     .with_strategy(ParseStrategy::Whitespace)
///     .with_elements(&elements)
///     .read("loose.gro")
///     .unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GroParser<'a> {
    strategy: ParseStrategy,
    elements: &'a ElementTable,
}

impl GroParser<'static> {
    /// Create a parser using fixed columns and the default element registry.
    pub fn new() -> Self {
        GroParser {
            strategy: ParseStrategy::default(),
            elements: ElementTable::global(),
        }
    }
}

impl Default for GroParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> GroParser<'a> {
    /// Use the specified strategy for reading atom lines.
    pub fn with_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolve atom types using the provided element registry.
    pub fn with_elements<'b>(self, elements: &'b ElementTable) -> GroParser<'b> {
        GroParser {
            strategy: self.strategy,
            elements,
        }
    }

    /// Get the strategy used for reading atom lines.
    pub fn get_strategy(&self) -> ParseStrategy {
        self.strategy
    }

    /// Parse a single gro frame from the provided lines.
    /// Lines following the box line are ignored.
    ///
    /// ## Returns
    /// `Frame` if successful. `ParseGroError` otherwise.
    pub fn parse_frame<S: AsRef<str>>(&self, lines: &[S]) -> Result<Frame, ParseGroError> {
        self.parse_frame_at(lines, 0)
    }

    /// Parse a single gro frame. `first_line` is the index of `lines[0]` in the whole input
    /// and is only used for error reporting.
    pub(crate) fn parse_frame_at<S: AsRef<str>>(
        &self,
        lines: &[S],
        first_line: usize,
    ) -> Result<Frame, ParseGroError> {
        let title = lines
            .first()
            .ok_or_else(|| ParseGroError::MalformedHeader(String::new()))?
            .as_ref()
            .trim()
            .to_string();

        let n_atoms = line_as_natoms(lines.get(1).map(AsRef::as_ref))?;

        if lines.len() < n_atoms + 2 {
            return Err(ParseGroError::AtomCountMismatch {
                expected: n_atoms,
                found: lines.len() - 2,
            });
        }

        let mut atoms = Vec::with_capacity(n_atoms);
        for (i, line) in lines[2..n_atoms + 2].iter().enumerate() {
            let line = line.as_ref();
            let fields = self.split_atom_line(line).ok_or_else(|| {
                ParseGroError::MalformedAtomRecord {
                    line: first_line + i + 3,
                    content: line.to_string(),
                }
            })?;

            atoms.push(fields.into_record(self.elements)?);
        }

        let box_index = n_atoms + 2;
        let box_size = line_as_box(lines.get(box_index).map(AsRef::as_ref)).ok_or_else(|| {
            ParseGroError::MalformedBoxLine {
                line: first_line + box_index + 1,
                content: lines
                    .get(box_index)
                    .map(|l| l.as_ref().to_string())
                    .unwrap_or_default(),
            }
        })?;

        Ok(Frame {
            title,
            atoms,
            box_size,
        })
    }

    /// Split atom line into fields according to the parsing strategy.
    fn split_atom_line<'l>(&self, line: &'l str) -> Option<AtomFields<'l>> {
        match self.strategy {
            ParseStrategy::Fixed => AtomFields::from_columns(line),
            ParseStrategy::Whitespace => AtomFields::from_tokens(line),
            ParseStrategy::Auto => {
                AtomFields::from_columns(line).or_else(|| AtomFields::from_tokens(line))
            }
        }
    }
}

/// Fields of an atom line before the atom type is resolved.
#[derive(Debug, PartialEq)]
struct AtomFields<'l> {
    residue_number: usize,
    residue_name: &'l str,
    atom_type: &'l str,
    atom_number: usize,
    position: [f32; 3],
}

impl<'l> AtomFields<'l> {
    /// Read fields from the fixed columns of the gro format.
    /// Columns: [0:5) residue number, [5:10) residue name, [10:15) atom type,
    /// [15:20) atom number, [20:28), [28:36), [36:44) position.
    fn from_columns(line: &'l str) -> Option<Self> {
        let residue_number = column(line, 0, 5)?.parse::<usize>().ok()?;

        let residue_name = column(line, 5, 10)?;
        let atom_type = column(line, 10, 15)?;
        if residue_name.is_empty() || atom_type.is_empty() {
            return None;
        }

        let atom_number = column(line, 15, 20)?.parse::<usize>().ok()?;

        let mut position = [0.0f32; 3];
        for (i, item) in position.iter_mut().enumerate() {
            let start = 20 + i * 8;
            *item = column(line, start, start + 8)?.parse::<f32>().ok()?;
        }

        Some(AtomFields {
            residue_number,
            residue_name,
            atom_type,
            atom_number,
            position,
        })
    }

    /// Read whitespace-separated fields. Velocities, if present, are ignored.
    fn from_tokens(line: &'l str) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let (residue_number, residue_name, rest) = match tokens.len() {
            7 | 10 => (tokens[0].parse::<usize>().ok()?, tokens[1], &tokens[2..]),
            6 | 9 => {
                // residue number glued to residue name, e.g. `1SOL`
                let glued: &'l str = tokens[0];
                let split = glued.find(|c: char| !c.is_ascii_digit())?;
                (
                    glued[..split].parse::<usize>().ok()?,
                    &glued[split..],
                    &tokens[1..],
                )
            }
            _ => return None,
        };

        let mut position = [0.0f32; 3];
        for (item, token) in position.iter_mut().zip(&rest[2..5]) {
            *item = token.parse::<f32>().ok()?;
        }

        Some(AtomFields {
            residue_number,
            residue_name,
            atom_type: rest[0],
            atom_number: rest[1].parse::<usize>().ok()?,
            position,
        })
    }

    /// Resolve the atom type and convert the fields into an `AtomRecord`.
    fn into_record(self, elements: &ElementTable) -> Result<AtomRecord, ParseGroError> {
        Ok(AtomRecord {
            element: normalize_with(self.atom_type, elements)?,
            residue_number: self.residue_number,
            residue_name: self.residue_name.to_string(),
            atom_type: self.atom_type.to_string(),
            atom_number: self.atom_number,
            position: self.position,
        })
    }
}

/// Get trimmed content of columns [start, end) of the line.
/// Lines ending inside the column are accepted. Returns `None` if the line ends before `start`.
fn column(line: &str, start: usize, end: usize) -> Option<&str> {
    if start >= line.len() {
        return None;
    }

    line.get(start..end.min(line.len())).map(str::trim)
}

/// Parse line as the number of atoms in the frame.
/// Counts for which the number of lines in the frame would overflow `usize` are rejected.
fn line_as_natoms(line: Option<&str>) -> Result<usize, ParseGroError> {
    let line = line.unwrap_or_default().trim();
    line.parse::<usize>()
        .ok()
        .filter(|n_atoms| n_atoms.checked_add(GRO_FRAME_EXTRA_LINES).is_some())
        .ok_or_else(|| ParseGroError::MalformedHeader(line.to_string()))
}

/// Parse line as the size of the cubic simulation box.
/// Only the first value is used; any further box vectors are ignored.
fn line_as_box(line: Option<&str>) -> Option<f32> {
    line?
        .split_whitespace()
        .next()?
        .parse::<f32>()
        .ok()
        .filter(|size| size.is_finite())
}

/// Extract time and step from the title of a frame. Returns `None` if time and step could not be read.
fn extract_time_step(string: &str) -> Option<(f32, u64)> {
    static TIME_STEP: OnceLock<Regex> = OnceLock::new();
    let re = TIME_STEP.get_or_init(|| {
        Regex::new(r"t=\s*([\d\.\-eE\+]+)\s+step=\s*(\d+)").expect(
            "FATAL GRO_RS ERROR | gro_io::extract_time_step | Could not construct regular expression.",
        )
    });

    let caps = re.captures(string)?;
    let time = f32::from_str(caps.get(1)?.as_str()).ok()?;
    let step = u64::from_str(caps.get(2)?.as_str()).ok()?;

    Some((time, step))
}

/******************************/
/*         UNIT TESTS         */
/******************************/
