//! Interactive menu shell
//!
//! A blocking read-evaluate-print loop: print the menu, read one line,
//! dispatch, repeat until the user picks Exit or input runs out.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use roster_core::{RollNumber, Student, StudentPatch, StudentStore};

use crate::input::{non_blank, parse_menu_number, parse_roll_number, MenuChoice};

const INVALID_NUMBER: &str = "Invalid input, please enter a number.";

/// Whether the loop keeps going after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu-driven session over a student store
pub struct Shell<'a, R, W> {
    store: &'a mut StudentStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut StudentStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until Exit is chosen or input is exhausted
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let number = match parse_menu_number(&line) {
                Ok(n) => n,
                Err(e) => {
                    debug!("Rejected menu input: {}", e);
                    writeln!(self.output, "{}", INVALID_NUMBER)?;
                    continue;
                }
            };

            let flow = match MenuChoice::from_number(number) {
                Some(MenuChoice::Add) => self.add_student()?,
                Some(MenuChoice::Edit) => self.edit_student()?,
                Some(MenuChoice::Search) => self.search_student()?,
                Some(MenuChoice::List) => self.display_all_students()?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    writeln!(self.output, "Invalid choice, please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "Exiting the application...")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Student Management System")?;
        writeln!(self.output, "1. Add Student")?;
        writeln!(self.output, "2. Edit Student")?;
        writeln!(self.output, "3. Search Student")?;
        writeln!(self.output, "4. Display All Students")?;
        writeln!(self.output, "5. Exit")?;
        self.prompt("Enter your choice: ")
    }

    // ==================== Handlers ====================

    fn add_student(&mut self) -> Result<Flow> {
        let Some(name) = self.ask("Enter name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(roll_number) = self.ask_roll_number("Enter roll number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(grade) = self.ask("Enter grade: ")? else {
            return Ok(Flow::Exit);
        };

        let (Some(name), Some(grade)) = (non_blank(&name), non_blank(&grade)) else {
            writeln!(self.output, "Name and grade cannot be empty.")?;
            return Ok(Flow::Continue);
        };

        self.store.add(Student::new(name, roll_number, grade));
        self.report_save_error()?;
        writeln!(self.output, "Student added successfully.")?;
        Ok(Flow::Continue)
    }

    fn edit_student(&mut self) -> Result<Flow> {
        let Some(roll_number) =
            self.ask_roll_number("Enter roll number of the student to edit: ")?
        else {
            return Ok(Flow::Exit);
        };

        // First match wins when roll numbers repeat
        let Some(handle) = self.store.position(roll_number) else {
            writeln!(self.output, "Student not found.")?;
            return Ok(Flow::Continue);
        };

        let Some(name) = self.ask("Enter new name (leave blank to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(grade) = self.ask("Enter new grade (leave blank to keep current): ")? else {
            return Ok(Flow::Exit);
        };

        let patch = StudentPatch {
            name: non_blank(&name),
            grade: non_blank(&grade),
        };
        // Nothing changed, so the file is left as it is
        if !patch.is_empty() {
            self.store.update(handle, patch);
            self.report_save_error()?;
        }
        writeln!(self.output, "Student updated successfully.")?;
        Ok(Flow::Continue)
    }

    fn search_student(&mut self) -> Result<Flow> {
        let Some(roll_number) = self.ask_roll_number("Enter roll number to search: ")? else {
            return Ok(Flow::Exit);
        };

        match self.store.find(roll_number) {
            Some(student) => writeln!(self.output, "{}", student)?,
            None => writeln!(self.output, "Student not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn display_all_students(&mut self) -> Result<Flow> {
        let students = self.store.list_all();
        if students.is_empty() {
            writeln!(self.output, "No students found.")?;
        } else {
            for student in students {
                writeln!(self.output, "{}", student)?;
            }
        }
        Ok(Flow::Continue)
    }

    // ==================== I/O helpers ====================

    fn report_save_error(&mut self) -> Result<()> {
        if let Some(err) = self.store.take_save_error() {
            writeln!(self.output, "Error saving students: {}", err)?;
            if let Some(hint) = err.recovery_suggestion() {
                writeln!(self.output, "  {}", hint)?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> Result<()> {
        write!(self.output, "{}", prompt)?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    /// Read one line without its line ending; `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompt(prompt)?;
        self.read_line()
    }

    /// Ask until a valid roll number is typed; `None` at end of input
    fn ask_roll_number(&mut self, prompt: &str) -> Result<Option<RollNumber>> {
        loop {
            let Some(line) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse_roll_number(&line) {
                Ok(roll_number) => return Ok(Some(roll_number)),
                Err(e) => {
                    debug!("Rejected roll number input: {}", e);
                    writeln!(self.output, "{}", INVALID_NUMBER)?;
                }
            }
        }
    }
}
