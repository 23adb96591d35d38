// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! # gro_rs: Reader and writer for Gromacs gro files
//!
//! Rust library for reading and writing molecular structures and trajectories
//! in the Gromacs gro format.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add gro_rs
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use gro_rs::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Reading and writing a structure file
//!
//! Read a gro file, shift all atoms and write the result into a new gro file.
//!
//! ```no_run
//! use gro_rs::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
//!     // read a gro file
//!     let mut system = System::from_file("system.gro")?;
//!
//!     // positions are centered: the simulation box spans [-box / 2, box / 2)
//!     system.translate_all(&Vector3D::new(0.5, 0.0, 0.0));
//!
//!     // write the system into a gro file
//!     system.write_gro("shifted.gro")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Reading a trajectory
//!
//! Read all frames of a multi-frame gro file at once or one by one.
//!
//! ```no_run
//! use gro_rs::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     // all frames are read into memory
//!     let frames = read_gro_traj("trajectory.gro")?;
//!     println!("Read {} frames.", frames.len());
//!
//!     // only a single frame is held in memory at a time
//!     for frame in GroParser::new()
//!         .traj_iter("trajectory.gro")?
//!         .print_progress(ProgressPrinter::new())
//!     {
//!         let frame = frame?;
//!         println!("{:?}", frame.total_mass());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Parsing loosely formatted files
//!
//! Atom lines are read using the fixed columns of the gro format by default.
//! Files produced by tools that do not respect the columns can be read by splitting the lines by whitespace.
//!
//! ```
//! use gro_rs::prelude::*;
//!
//! let content = "Ions\n2\n1NA NA 1 0.5 0.5 0.5\n2CL CL 2 1.0 1.0 1.0\n2.0\n";
//!
//! let system = GroParser::new()
//!     .with_strategy(ParseStrategy::Whitespace)
//!     .parse_str(content)
//!     .unwrap();
//!
//! let symbols: Vec<&str> = system.atoms_iter().map(|atom| atom.get_symbol()).collect();
//! assert_eq!(symbols, ["Na", "Cl"]);
//! ```

/// Version of the `gro_rs` library.
pub const GRO_RS_VERSION: &str = env!("CARGO_PKG_VERSION");

mod auxiliary;
pub mod errors;
pub mod io {
    pub mod gro_io;
}
pub mod progress;
pub mod structures {
    pub mod atom;
    pub mod element;
    pub mod residue;
    pub mod vector3d;
}
pub mod system;

/// Reexported basic `gro_rs` structures, traits and functions.
pub mod prelude {
    pub use crate::errors::{ParseGroError, WriteGroError};
    pub use crate::io::gro_io::{
        read_gro, read_gro_traj, AtomRecord, Frame, GroParser, GroTrajectory, ParseStrategy,
    };
    pub use crate::progress::{ProgressPrinter, ProgressStatus};
    pub use crate::structures::atom::Atom;
    pub use crate::structures::element::{Element, ElementTable};
    pub use crate::structures::residue::{Residue, ResidueRef};
    pub use crate::structures::vector3d::Vector3D;
    pub use crate::system::System;
}
