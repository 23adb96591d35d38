// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Error types returned by the `gro_rs` library.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when reading and parsing a gro file or a gro trajectory.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseGroError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` could not be read.")]
    CouldNotRead(Box<Path>),
    #[error("Could not parse line `{0}` as the frame title or the number of atoms.")]
    MalformedHeader(String),
    #[error("Could not parse line {line} (`{content}`) as atom.")]
    MalformedAtomRecord { line: usize, content: String },
    #[error("Frame declares {expected} atoms but only {found} atom lines are present.")]
    AtomCountMismatch { expected: usize, found: usize },
    #[error("Atom type `{0}` does not correspond to any known element.")]
    UnknownAtomType(String),
    #[error("Could not parse line {line} (`{content}`) as box dimensions.")]
    MalformedBoxLine { line: usize, content: String },
    #[error("Frame {frame} of the trajectory is truncated: expected {expected} lines, found {found}.")]
    TruncatedTrajectory {
        frame: usize,
        expected: usize,
        found: usize,
    },
}

/// Identifies the residue or atom that is missing export metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOwner {
    /// Residue with the given (0-based) index.
    Residue(usize),
    /// Atom with the given (0-based) index.
    Atom(usize),
}

impl fmt::Display for ExportOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOwner::Residue(i) => write!(f, "residue {}", i),
            ExportOwner::Atom(i) => write!(f, "atom {}", i),
        }
    }
}

/// Errors that can occur when writing a gro file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteGroError {
    #[error("File `{0}` could not be created.")]
    CouldNotCreate(Box<Path>),
    #[error("Could not write line into the output.")]
    CouldNotWrite,
    #[error("The {owner} has no `{key}` export metadata required by the gro format.")]
    MissingExportMetadata { owner: ExportOwner, key: &'static str },
    #[error("A coordinate or the box size is too large to be written in the gro format.")]
    CoordinateTooLarge,
}

/// Errors that can occur when reading the element registry.
#[derive(Error, Debug)]
pub enum ParseElementError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` could not be read.")]
    FileCouldNotBeRead(Box<Path>),
    #[error("Could not parse the yaml input: {0}")]
    CouldNotParseYaml(serde_yaml::Error),
    #[error("Symbol `{0}` is shared by elements `{1}` and `{2}`.")]
    DuplicateSymbol(String, String, String),
}

/// Errors that can occur when constructing a `System`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SystemError {
    #[error("Residue {0} contains no atoms.")]
    EmptyResidue(usize),
}
