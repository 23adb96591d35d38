// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of ProgressPrinter structure for printing the progress of gro trajectory reading.

use colored::{ColoredString, Colorize};
use std::io::Write;

/// Progress of trajectory reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Trajectory reading is in progress.
    Running,
    /// Trajectory has been read completely.
    Completed,
    /// Trajectory reading failed.
    Failed,
}

/// Status label printed inside square brackets.
#[derive(Debug, Clone, PartialEq)]
struct ProgressMessage {
    msg: ColoredString,
}

impl ProgressMessage {
    /// Create new `ProgressMessage`.
    ///
    /// ## Panics
    /// Panics if the string is longer than 9 characters.
    fn new(string: ColoredString) -> Self {
        if string.chars().count() > 9 {
            panic!("FATAL GRO_RS ERROR | ProgressMessage::new | `ProgressMessage` can not be longer than 9 characters.");
        }

        ProgressMessage { msg: string }
    }

    /// Print formatted `ProgressMessage`.
    fn print(&self, out: &mut dyn Write, colored: bool) {
        if colored {
            write!(out, "[{: ^9}]   ", self.msg)
                .expect("FATAL GRO_RS ERROR | ProgressMessage::print (1) | Could not write to `ProgressPrinter` stream.");
        } else {
            write!(out, "[{: ^9}]   ", self.msg.as_ref() as &str)
                .expect("FATAL GRO_RS ERROR | ProgressMessage::print (2) | Could not write to `ProgressPrinter` stream.");
        }
    }
}

/// Structure handling printing of progress of reading a gro trajectory.
/// Constructed using `ProgressPrinter::new()` and associated with a trajectory
/// iterator using `GroTrajectory::print_progress()`.
pub struct ProgressPrinter {
    /// Stream to write the progress info to.
    output: Box<dyn Write>,
    /// Current status of reading. Default: ProgressStatus::Running.
    status: ProgressStatus,
    /// Print every `print_freq`th frame while running. Zero disables printing while running. Default: 100 frames.
    print_freq: usize,
    /// If true, the output will be colored. Default: true.
    colored: bool,
    /// Default: "Frame".bright_blue().
    frame_msg: ColoredString,
    /// Default: "Step".cyan().
    step_msg: ColoredString,
    /// Default: "Time".bright_purple().
    time_msg: ColoredString,
    /// Default: "RUNNING".yellow().
    running_msg: ProgressMessage,
    /// Default: "COMPLETED".green().
    completed_msg: ProgressMessage,
    /// Default: "FAILED!".red().
    failed_msg: ProgressMessage,
    /// String terminating the progress message. Default: `\r` (carriage return).
    terminating: String,
}

impl ProgressPrinter {
    /// Create an instance of `ProgressPrinter` with default parameters.
    ///
    /// The default values of the `ProgressPrinter` parameters.
    /// - `output`: `std::io::stdout()`
    /// - `status`: `ProgressStatus::Running`
    /// - `print_freq`: `100` (progress info will be printed every 100 frames read)
    /// - `colored`: `true`
    /// - `frame_msg`: `"Frame".bright_blue()`
    /// - `step_msg`: `"Step".cyan()`
    /// - `time_msg`: `"Time".bright_purple()`
    /// - `running_msg`: `"RUNNING".yellow()`
    /// - `completed_msg`: `"COMPLETED".green()`
    /// - `failed_msg`: `"FAILED!".red()`
    /// - `terminating`: `\r` (useful to set to `\n` when printing to a file)
    ///
    /// ## Example
    /// ```no_run
    /// use gro_rs::prelude::*;
    /// use colored::Colorize;
    ///
    /// let printer = ProgressPrinter::new()
    ///     .with_print_freq(10)
    ///     .with_running_msg("READING".yellow())
    ///     .with_completed_msg("DONE".blue());
    ///
    /// for frame in GroParser::new()
    ///     .traj_iter("trajectory.gro")
    ///     .unwrap()
    ///     .print_progress(printer)
    /// {
    ///     let system = frame.unwrap();
    ///     // analyze the frame
    /// }
    /// ```
    pub fn new() -> Self {
        ProgressPrinter {
            output: Box::from(std::io::stdout()),
            status: ProgressStatus::Running,
            print_freq: 100,
            colored: true,
            frame_msg: "Frame".bright_blue(),
            step_msg: "Step".cyan(),
            time_msg: "Time".bright_purple(),
            running_msg: ProgressMessage::new("RUNNING".yellow()),
            completed_msg: ProgressMessage::new("COMPLETED".green()),
            failed_msg: ProgressMessage::new("FAILED!".red()),
            terminating: String::from("\r"),
        }
    }

    /// Create new `ProgressPrinter` with specific `output` stream.
    pub fn with_output(mut self, stream: Box<dyn Write>) -> Self {
        self.output = stream;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `status`.
    pub fn with_status(mut self, status: ProgressStatus) -> Self {
        self.status = status;
        self
    }

    /// Set new status to an already constructed `ProgressPrinter`.
    pub fn set_status(&mut self, status: ProgressStatus) {
        self.status = status;
    }

    /// Get the current status of the `ProgressPrinter`.
    pub fn get_status(&self) -> ProgressStatus {
        self.status
    }

    pub fn with_print_freq(mut self, print_freq: usize) -> Self {
        self.print_freq = print_freq;
        self
    }

    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn with_frame_msg(mut self, frame_msg: ColoredString) -> Self {
        self.frame_msg = frame_msg;
        self
    }

    pub fn with_step_msg(mut self, step_msg: ColoredString) -> Self {
        self.step_msg = step_msg;
        self
    }

    pub fn with_time_msg(mut self, time_msg: ColoredString) -> Self {
        self.time_msg = time_msg;
        self
    }

    /// ## Panics
    /// Panics if the `running_msg` is longer than 9 characters.
    pub fn with_running_msg(mut self, running_msg: ColoredString) -> Self {
        self.running_msg = ProgressMessage::new(running_msg);
        self
    }

    /// ## Panics
    /// Panics if the `completed_msg` is longer than 9 characters.
    pub fn with_completed_msg(mut self, completed_msg: ColoredString) -> Self {
        self.completed_msg = ProgressMessage::new(completed_msg);
        self
    }

    /// ## Panics
    /// Panics if the `failed_msg` is longer than 9 characters.
    pub fn with_failed_msg(mut self, failed_msg: ColoredString) -> Self {
        self.failed_msg = ProgressMessage::new(failed_msg);
        self
    }

    pub fn with_terminating(mut self, string: &str) -> Self {
        self.terminating = string.to_string();
        self
    }

    /// Print progress info about trajectory reading.
    ///
    /// While running, only every `print_freq`th frame is printed.
    /// Completed and failed states are always printed and followed by a newline.
    /// Step and time are only printed if they are known.
    pub fn print(&mut self, frame_number: usize, sim_step: Option<u64>, sim_time: Option<f32>) {
        let print_running = self.print_freq != 0 && frame_number % self.print_freq == 0;
        if self.status == ProgressStatus::Running && !print_running {
            return;
        }

        match self.status {
            ProgressStatus::Running => self.running_msg.print(&mut self.output, self.colored),
            ProgressStatus::Completed => self.completed_msg.print(&mut self.output, self.colored),
            ProgressStatus::Failed => self.failed_msg.print(&mut self.output, self.colored),
        }

        let mut info = if self.colored {
            format!("{} {:8}", self.frame_msg, frame_number)
        } else {
            format!("{} {:8}", self.frame_msg.as_ref() as &str, frame_number)
        };

        if let Some(step) = sim_step {
            if self.colored {
                info.push_str(&format!(" | {} {:12}", self.step_msg, step));
            } else {
                info.push_str(&format!(" | {} {:12}", self.step_msg.as_ref() as &str, step));
            }
        }

        if let Some(time) = sim_time {
            if self.colored {
                info.push_str(&format!(" | {} {:12} ps", self.time_msg, time as u64));
            } else {
                info.push_str(&format!(
                    " | {} {:12} ps",
                    self.time_msg.as_ref() as &str,
                    time as u64
                ));
            }
        }

        write!(self.output, "{}{}", info, self.terminating).expect(
            "FATAL GRO_RS ERROR | ProgressPrinter::print (1) | Could not write to `ProgressPrinter` stream.",
        );

        match self.status {
            ProgressStatus::Running => (),
            ProgressStatus::Completed | ProgressStatus::Failed => writeln!(self.output).expect(
                "FATAL GRO_RS ERROR | ProgressPrinter::print (2) | Could not write to `ProgressPrinter` stream.",
            ),
        }

        self.output.flush().expect(
            "FATAL GRO_RS ERROR | ProgressPrinter::print (3) | Could not flush `ProgressPrinter` stream.",
        );
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
