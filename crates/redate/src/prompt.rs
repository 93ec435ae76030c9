// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Operator prompting
//!
//! A fixed capability interface over the interactive widgets: the rest
//! of the binary talks to [`Prompter`] and receives plain structured
//! values, never widget objects. The terminal implementation is backed
//! by dialoguer.

use anyhow::Result;
use dialoguer::{Input, MultiSelect, Select};

use crate::style;

/// One pre-filled entry of a structured field form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Label shown next to the input
    pub name: String,
    /// Pre-filled, editable value
    pub initial: String,
    /// Whether only signed whole numbers are accepted
    pub numeric: bool,
}

impl Field {
    /// A field accepting only signed whole numbers
    #[must_use]
    pub fn numeric(name: &str, initial: String) -> Self {
        Self {
            name: name.to_string(),
            initial,
            numeric: true,
        }
    }

    /// A free-text field
    #[must_use]
    pub fn text(name: &str, initial: String) -> Self {
        Self {
            name: name.to_string(),
            initial,
            numeric: false,
        }
    }
}

/// Capability interface for collecting operator choices
pub trait Prompter {
    /// Choose a non-empty subset of `items`; returns their indices
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal interaction fails.
    fn select_many(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;

    /// Choose exactly one of `items`; returns its index
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal interaction fails.
    fn select_one(&self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Fill a structured form; returns one value per field, in order
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal interaction fails.
    fn collect_fields(&self, prompt: &str, fields: &[Field]) -> Result<Vec<String>>;
}

/// Terminal prompter backed by dialoguer
#[derive(Debug, Default)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn select_many(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        loop {
            let selection = MultiSelect::new()
                .with_prompt(prompt)
                .items(items)
                .interact()?;
            if !selection.is_empty() {
                return Ok(selection);
            }
            eprintln!("{}", style::hint("Please select at least one"));
        }
    }

    fn select_one(&self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn collect_fields(&self, prompt: &str, fields: &[Field]) -> Result<Vec<String>> {
        println!("{prompt}");
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            let mut input = Input::<String>::new()
                .with_prompt(&field.name)
                .with_initial_text(&field.initial)
                .allow_empty(true);
            if field.numeric {
                input = input.validate_with(|value: &String| -> Result<(), &str> {
                    if value.trim().parse::<i64>().is_ok() {
                        Ok(())
                    } else {
                        Err("enter a whole number")
                    }
                });
            }
            values.push(input.interact_text()?);
        }
        Ok(values)
    }
}
