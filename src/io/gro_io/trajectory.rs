// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of functions for reading multi-frame gro files.
//!
//! Every frame of a gro trajectory must contain the same number of atoms as the first frame.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::FusedIterator;
use std::path::Path;

use crate::errors::ParseGroError;
use crate::progress::{ProgressPrinter, ProgressStatus};
use crate::system::System;

use super::structure::read_to_string;
use super::{line_as_natoms, GroParser, GRO_FRAME_EXTRA_LINES};

/// Read all frames of a gro trajectory.
///
/// ## Returns
/// Vector of `System` structures, one per frame, in file order.
/// An empty file contains no frames.
pub fn read_gro_traj(filename: impl AsRef<Path>) -> Result<Vec<System>, ParseGroError> {
    GroParser::new().read_traj(filename)
}

/// Split the lines of a gro trajectory into frames.
///
/// The length of every frame is calculated from the atom count on the second line of the input.
/// Blank lines at the end of the input are ignored.
///
/// ## Returns
/// Iterator over the frames, `ParseGroError::MalformedHeader` if the atom count could not be read.
///
/// ## Example
/// ```
/// # use gro_rs::io::gro_io::split_frames;
/// #
/// let lines = [
///     "Frame 1", "    1", "    1RES     O    1   1.000   2.000   3.000", "   4.00000",
///     "Frame 2", "    1", "    1RES     O    1   1.100   2.100   3.100", "   4.00000",
/// ];
///
/// let frames: Vec<&[&str]> = split_frames(&lines)
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[1][0], "Frame 2");
/// ```
pub fn split_frames<S: AsRef<str>>(lines: &[S]) -> Result<FrameChunks<'_, S>, ParseGroError> {
    let lines = trim_trailing_blank(lines);

    let frame_len = if lines.is_empty() {
        0
    } else {
        line_as_natoms(lines.get(1).map(AsRef::as_ref))? + GRO_FRAME_EXTRA_LINES
    };

    Ok(FrameChunks {
        lines,
        frame_len,
        position: 0,
        frame: 0,
        finished: false,
    })
}

/// Remove blank lines from the end of the input.
fn trim_trailing_blank<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let end = lines
        .iter()
        .rposition(|line| !line.as_ref().trim().is_empty())
        .map_or(0, |index| index + 1);

    &lines[..end]
}

/// Iterator over the frames of a gro trajectory. Constructed using [`split_frames`].
///
/// Yields consecutive frame-sized chunks of lines. A trailing chunk shorter than
/// a frame yields `ParseGroError::TruncatedTrajectory` and ends the iteration.
#[derive(Debug, Clone)]
pub struct FrameChunks<'a, S> {
    lines: &'a [S],
    frame_len: usize,
    position: usize,
    frame: usize,
    finished: bool,
}

impl<'a, S> FrameChunks<'a, S> {
    /// Get the number of lines in a single frame (atom count + 3).
    /// Zero if the input is empty.
    pub fn get_frame_len(&self) -> usize {
        self.frame_len
    }
}

impl<'a, S> Iterator for FrameChunks<'a, S> {
    type Item = Result<&'a [S], ParseGroError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.position >= self.lines.len() {
            return None;
        }

        let remaining = self.lines.len() - self.position;
        if remaining < self.frame_len {
            self.finished = true;
            return Some(Err(ParseGroError::TruncatedTrajectory {
                frame: self.frame + 1,
                expected: self.frame_len,
                found: remaining,
            }));
        }

        let chunk = &self.lines[self.position..self.position + self.frame_len];
        self.position += self.frame_len;
        self.frame += 1;

        Some(Ok(chunk))
    }
}

impl<'a, S> FusedIterator for FrameChunks<'a, S> {}

impl<'a> GroParser<'a> {
    /// Read all frames of a gro trajectory.
    /// See [`read_gro_traj`] for details.
    pub fn read_traj(&self, filename: impl AsRef<Path>) -> Result<Vec<System>, ParseGroError> {
        self.parse_traj_str(&read_to_string(filename)?)
    }

    /// Parse all frames of a gro trajectory.
    ///
    /// ## Returns
    /// Vector of `System` structures, one per frame, in order.
    /// The first error encountered is returned and no frames are produced.
    pub fn parse_traj_str(&self, content: &str) -> Result<Vec<System>, ParseGroError> {
        let lines: Vec<&str> = content.lines().collect();
        let chunks = split_frames(&lines)?;
        let frame_len = chunks.get_frame_len();

        chunks
            .enumerate()
            .map(|(i, chunk)| {
                self.parse_traj_frame(chunk?, i * frame_len, frame_len - GRO_FRAME_EXTRA_LINES)
            })
            .collect()
    }

    /// Open a gro trajectory for reading frame by frame.
    /// Only a single frame is held in memory at a time.
    ///
    /// ## Example
    /// ```no_run
    /// # use gro_rs::prelude::*;
    /// #
    /// for frame in GroParser::new().traj_iter("trajectory.gro").unwrap() {
    ///     let system = frame.unwrap();
    ///     println!("{:?} ps: {} atoms", system.get_simulation_time(), system.get_n_atoms());
    /// }
    /// ```
    pub fn traj_iter(&self, filename: impl AsRef<Path>) -> Result<GroTrajectory<'a>, ParseGroError> {
        let file = File::open(filename.as_ref())
            .map_err(|_| ParseGroError::FileNotFound(Box::from(filename.as_ref())))?;

        Ok(GroTrajectory {
            parser: *self,
            lines: BufReader::new(file).lines(),
            lookahead: VecDeque::new(),
            path: Box::from(filename.as_ref()),
            frame_len: None,
            frame: 0,
            finished: false,
            progress_printer: None,
        })
    }

    /// Parse a single frame of a trajectory. All frames must contain `n_atoms` atoms.
    fn parse_traj_frame<S: AsRef<str>>(
        &self,
        chunk: &[S],
        first_line: usize,
        n_atoms: usize,
    ) -> Result<System, ParseGroError> {
        let declared = line_as_natoms(chunk.get(1).map(AsRef::as_ref))?;
        if declared != n_atoms {
            return Err(ParseGroError::AtomCountMismatch {
                expected: n_atoms,
                found: declared,
            });
        }

        Ok(self.parse_frame_at(chunk, first_line)?.into_system())
    }
}

/// Iterator reading a gro trajectory frame by frame. Constructed using [`GroParser::traj_iter`].
///
/// Frame boundaries and errors are the same as for [`split_frames`].
/// The iteration ends after the first error.
pub struct GroTrajectory<'a> {
    parser: GroParser<'a>,
    lines: Lines<BufReader<File>>,
    /// Lines read ahead while looking for the end of the file.
    lookahead: VecDeque<String>,
    path: Box<Path>,
    /// Number of lines in a frame. Known once the header of the first frame is read.
    frame_len: Option<usize>,
    /// Number of frames that have been read.
    frame: usize,
    finished: bool,
    progress_printer: Option<ProgressPrinter>,
}

impl<'a> GroTrajectory<'a> {
    /// Print the progress of the trajectory reading using the provided `ProgressPrinter`.
    pub fn print_progress(mut self, printer: ProgressPrinter) -> Self {
        self.progress_printer = Some(printer);
        self
    }

    /// Read the next line of the file. `Ok(None)` at the end of the file.
    fn read_line(&mut self) -> Result<Option<String>, ParseGroError> {
        if let Some(line) = self.lookahead.pop_front() {
            return Ok(Some(line));
        }

        match self.lines.next() {
            None => Ok(None),
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(_)) => Err(ParseGroError::CouldNotRead(self.path.clone())),
        }
    }

    /// Read up to `n` lines into `buffer`. Stops early at the end of the file.
    fn fill(&mut self, buffer: &mut Vec<String>, n: usize) -> Result<(), ParseGroError> {
        while buffer.len() < n {
            match self.read_line()? {
                Some(line) => buffer.push(line),
                None => break,
            }
        }

        Ok(())
    }

    /// Check whether only blank lines remain in the file.
    /// Lines read while checking are kept for the next frame.
    fn only_blank_remains(&mut self) -> Result<bool, ParseGroError> {
        if self.lookahead.iter().any(|line| !line.trim().is_empty()) {
            return Ok(false);
        }

        loop {
            match self.lines.next() {
                None => return Ok(true),
                Some(Ok(line)) => {
                    let blank = line.trim().is_empty();
                    self.lookahead.push_back(line);
                    if !blank {
                        return Ok(false);
                    }
                }
                Some(Err(_)) => return Err(ParseGroError::CouldNotRead(self.path.clone())),
            }
        }
    }

    /// Read and parse the next frame. `Ok(None)` at the end of the trajectory.
    fn read_frame(&mut self) -> Result<Option<System>, ParseGroError> {
        let mut buffer = Vec::new();

        let frame_len = match self.frame_len {
            Some(len) => len,
            None => {
                self.fill(&mut buffer, 2)?;
                if trim_trailing_blank(&buffer).is_empty() && self.only_blank_remains()? {
                    return Ok(None);
                }

                let len =
                    line_as_natoms(buffer.get(1).map(String::as_str))? + GRO_FRAME_EXTRA_LINES;
                self.frame_len = Some(len);
                len
            }
        };

        self.fill(&mut buffer, frame_len)?;

        // blank lines at the end of the file are not part of any frame
        let content_len = trim_trailing_blank(&buffer).len();
        let at_end = buffer.len() < frame_len
            || (content_len < buffer.len() && self.only_blank_remains()?);

        if at_end {
            if content_len == 0 {
                return Ok(None);
            }

            if content_len < frame_len {
                return Err(ParseGroError::TruncatedTrajectory {
                    frame: self.frame + 1,
                    expected: frame_len,
                    found: content_len,
                });
            }
        }

        let system = self.parser.parse_traj_frame(
            &buffer,
            self.frame * frame_len,
            frame_len - GRO_FRAME_EXTRA_LINES,
        )?;

        self.frame += 1;
        Ok(Some(system))
    }

    /// Update and print the progress of the reading.
    fn report(&mut self, result: &Option<Result<System, ParseGroError>>) {
        if let Some(printer) = self.progress_printer.as_mut() {
            match result {
                None => printer.set_status(ProgressStatus::Completed),
                Some(Err(_)) => printer.set_status(ProgressStatus::Failed),
                Some(Ok(_)) => (),
            }

            let (step, time) = match result {
                Some(Ok(system)) => (system.get_simulation_step(), system.get_simulation_time()),
                _ => (None, None),
            };

            printer.print(self.frame, step, time);
        }
    }
}

impl<'a> Iterator for GroTrajectory<'a> {
    type Item = Result<System, ParseGroError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.read_frame().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }

        self.report(&result);
        result
    }
}

impl<'a> FusedIterator for GroTrajectory<'a> {}

/******************************/
/*         UNIT TESTS         */
/******************************/
