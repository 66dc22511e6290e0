//! Numbered-menu console over a [`VaccineRegistry`].

use std::io::{self, BufRead, Write};

use crate::registry::{VaccineChanges, VaccineError, VaccineRegistry};

const MENU: &str = "\n=== Vaccine Manager ===\n\
                    1. Add vaccine\n\
                    2. List vaccines\n\
                    3. Update vaccine\n\
                    4. Archive vaccine\n\
                    5. Exit";

/// Interactive loop reading commands from `input` and writing to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
    registry: VaccineRegistry,
}

/// Outcome of one menu round.
enum Flow {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console with an empty registry.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            registry: VaccineRegistry::new(),
        }
    }

    /// The registry being edited.
    pub const fn registry(&self) -> &VaccineRegistry {
        &self.registry
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose an option (1-5): ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.list()?,
                "3" => self.update()?,
                "4" => self.archive()?,
                "5" => {
                    writeln!(self.output, "Exiting...")?;
                    Flow::Exit
                }
                other => {
                    tracing::debug!(choice = other, "Unknown menu option");
                    writeln!(self.output, "Invalid option! Try again.")?;
                    Flow::Continue
                }
            };
            if matches!(flow, Flow::Exit) {
                break;
            }
        }
        self.output.flush()
    }

    fn add(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Vaccine name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(manufacturer) = self.prompt("Manufacturer: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(lot) = self.prompt("Lot (e.g. V001): ")? else {
            return Ok(Flow::Exit);
        };

        match self.registry.add(name, manufacturer, &lot) {
            Ok(vaccine) => writeln!(self.output, "Vaccine '{}' added.", vaccine.name)?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> io::Result<Flow> {
        if self.registry.is_empty() {
            writeln!(self.output, "No vaccines registered!")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n--- Vaccines ---")?;
        for (number, status, vaccine) in self.registry.listing() {
            writeln!(self.output, "{number}. [{status}] {vaccine}")?;
        }
        writeln!(self.output, "----------------")?;
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> io::Result<Flow> {
        let Some(index) = self.select("update")? else {
            return Ok(Flow::Continue);
        };
        let Some(name) = self.prompt("New name (empty to keep): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(manufacturer) = self.prompt("New manufacturer (empty to keep): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(lot) = self.prompt("New lot (empty to keep, e.g. V001): ")? else {
            return Ok(Flow::Exit);
        };

        let changes = VaccineChanges {
            name: non_empty(name),
            manufacturer: non_empty(manufacturer),
            lot: non_empty(lot),
        };
        match self.registry.update(index, changes) {
            Ok(_) => writeln!(self.output, "Vaccine updated.")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn archive(&mut self) -> io::Result<Flow> {
        let Some(index) = self.select("archive")? else {
            return Ok(Flow::Continue);
        };
        match self.registry.archive(index) {
            Ok(vaccine) => writeln!(self.output, "Vaccine '{}' archived.", vaccine.name)?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    /// Show the active listing and read a 1-based number.
    /// `None` when there is nothing to pick, the input is not a number, or input ended.
    fn select(&mut self, action: &str) -> io::Result<Option<usize>> {
        if self.registry.active_len() == 0 {
            self.report(&VaccineError::NoActiveVaccines)?;
            return Ok(None);
        }
        writeln!(self.output, "\n--- Active Vaccines ---")?;
        let active: Vec<String> = self.registry.active().map(ToString::to_string).collect();
        for (i, vaccine) in active.iter().enumerate() {
            writeln!(self.output, "{}. {vaccine}", i + 1)?;
        }
        writeln!(self.output, "-----------------------")?;

        let Some(raw) = self.prompt(&format!("Number of the vaccine to {action}: "))? else {
            return Ok(None);
        };
        match raw.parse::<usize>() {
            Ok(index) => Ok(Some(index)),
            Err(_) => {
                writeln!(self.output, "Invalid input! Enter a number.")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: &VaccineError) -> io::Result<()> {
        tracing::debug!(error = %err, "Vaccine operation rejected");
        writeln!(self.output, "Error: {err}")
    }

    /// Print `text` and read one line without its terminator. `None` on EOF.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).trim().to_string()))
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
