// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Transformation strategies
//!
//! One mode is chosen per run; all of its parameters are collected from
//! the operator here, before any repository mutation begins. The
//! answers are lowered into the deferred action queue the session
//! driver consumes: selected commits get their mode's action, everything
//! else in the visit list becomes a pass-through replay.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, TimeZone, Timelike};
use redate_git::{CommitRecord, DeferredAction, NewMessage, RewritePlan};

use crate::prompt::{Field, Prompter};
use crate::style;

/// The four mutually exclusive transformation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Absolute date per selected commit
    Set,
    /// One signed duration added to every selected commit
    Adjust,
    /// Linear remapping of the selection onto a new interval
    Stretch,
    /// Author identity and message editing
    Info,
}

impl Mode {
    /// Every mode, in menu order
    pub const ALL: [Mode; 4] = [Mode::Set, Mode::Adjust, Mode::Stretch, Mode::Info];

    /// Menu label for this mode
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Set => "Set individually",
            Mode::Adjust => "Adjust all",
            Mode::Stretch => "Stretch across range",
            Mode::Info => "Edit author/message",
        }
    }
}

/// A signed duration, unit by unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeShift {
    /// Seconds to add
    pub seconds: i64,
    /// Minutes to add
    pub minutes: i64,
    /// Hours to add
    pub hours: i64,
    /// Days to add (a day is a fixed 24 hours)
    pub days: i64,
    /// Calendar months to add
    pub months: i32,
    /// Calendar years to add
    pub years: i32,
}

impl TimeShift {
    /// Apply the shift: calendar arithmetic for years and months, fixed
    /// durations for everything smaller
    pub fn apply(&self, date: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>> {
        let months = i64::from(self.years) * 12 + i64::from(self.months);
        let shifted = if months >= 0 {
            date.checked_add_months(Months::new(u32::try_from(months)?))
        } else {
            date.checked_sub_months(Months::new(u32::try_from(-months)?))
        };
        let shifted = shifted.ok_or_else(|| anyhow!("shifted date is out of range"))?;
        Ok(shifted
            + Duration::days(self.days)
            + Duration::hours(self.hours)
            + Duration::minutes(self.minutes)
            + Duration::seconds(self.seconds))
    }
}

/// Linearly remap `old` from the selection's original span onto the
/// requested interval
///
/// The ratio is defined as 0 when the span is a single instant, so a
/// one-commit selection maps exactly onto `from`.
#[must_use]
pub fn stretch_date(
    old: DateTime<FixedOffset>,
    span_start: DateTime<FixedOffset>,
    span_end: DateTime<FixedOffset>,
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    let span = (span_end - span_start).num_seconds();
    let ratio = if span == 0 {
        0.0
    } else {
        (old - span_start).num_seconds() as f64 / span as f64
    };
    let offset = ((to - from).num_seconds() as f64 * ratio).round() as i64;
    from + Duration::seconds(offset)
}

/// Escape body newlines for single-line form editing
#[must_use]
pub fn escape_newlines(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Undo [`escape_newlines`] exactly
#[must_use]
pub fn unescape_newlines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// The six duration units, in prompt order
const UNIT_NAMES: [&str; 6] = ["seconds", "minutes", "hours", "days", "months", "years"];

fn date_fields(date: DateTime<FixedOffset>) -> Vec<Field> {
    vec![
        Field::numeric("seconds", date.second().to_string()),
        Field::numeric("minutes", date.minute().to_string()),
        Field::numeric("hours", date.hour().to_string()),
        Field::numeric("day", date.day().to_string()),
        Field::numeric("month", date.month().to_string()),
        Field::numeric("year", date.year().to_string()),
    ]
}

fn zero_fields() -> Vec<Field> {
    UNIT_NAMES
        .iter()
        .map(|name| Field::numeric(name, "0".to_string()))
        .collect()
}

/// Assemble an absolute date from submitted field values, preserving
/// the given timezone offset
///
/// # Errors
///
/// Fails when the values do not form a real calendar date.
pub fn assemble_date(values: &[String], offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let parsed = parse_units(values)?;
    let [seconds, minutes, hours, day, month, year] = parsed;
    offset
        .with_ymd_and_hms(
            i32::try_from(year)?,
            u32::try_from(month)?,
            u32::try_from(day)?,
            u32::try_from(hours)?,
            u32::try_from(minutes)?,
            u32::try_from(seconds)?,
        )
        .single()
        .ok_or_else(|| {
            anyhow!("{year:04}-{month:02}-{day:02} {hours:02}:{minutes:02}:{seconds:02} is not a valid date")
        })
}

/// Assemble a signed duration from submitted field values
///
/// # Errors
///
/// Fails when a value is not a whole number.
pub fn assemble_shift(values: &[String]) -> Result<TimeShift> {
    let [seconds, minutes, hours, days, months, years] = parse_units(values)?;
    Ok(TimeShift {
        seconds,
        minutes,
        hours,
        days,
        months: i32::try_from(months)?,
        years: i32::try_from(years)?,
    })
}

fn parse_units(values: &[String]) -> Result<[i64; 6]> {
    if values.len() != UNIT_NAMES.len() {
        return Err(anyhow!(
            "expected {} field values, got {}",
            UNIT_NAMES.len(),
            values.len()
        ));
    }
    let mut units = [0i64; 6];
    for (unit, (name, value)) in units.iter_mut().zip(UNIT_NAMES.iter().zip(values)) {
        *unit = value
            .trim()
            .parse()
            .with_context(|| format!("'{value}' is not a whole number of {name}"))?;
    }
    Ok(units)
}

/// Prompt until the operator submits a possible calendar date
fn prompt_date(
    prompter: &dyn Prompter,
    label: &str,
    initial: DateTime<FixedOffset>,
) -> Result<DateTime<FixedOffset>> {
    loop {
        let values = prompter.collect_fields(label, &date_fields(initial))?;
        match assemble_date(&values, *initial.offset()) {
            Ok(date) => return Ok(date),
            Err(err) => eprintln!("{}", style::warning(&err.to_string())),
        }
    }
}

/// Collect every strategy parameter and lower the visit list into the
/// deferred action queue
///
/// Prompting happens in selection order (oldest first), one
/// `(position/total)`-labelled form per commit where the mode needs
/// per-commit input; nothing touches the repository until the returned
/// queue is replayed.
///
/// # Errors
///
/// Fails when a prompt interaction fails or a submitted value cannot be
/// interpreted.
pub fn collect_actions(
    prompter: &dyn Prompter,
    mode: Mode,
    plan: &RewritePlan,
) -> Result<Vec<DeferredAction>> {
    let selected: Vec<&CommitRecord> =
        plan.visit_list.iter().filter(|c| c.selected).collect();

    match mode {
        Mode::Set => {
            let mut dates = HashMap::new();
            for (position, commit) in selected.iter().enumerate() {
                let label = style::sequence_label(commit, position + 1, selected.len());
                let date = prompt_date(prompter, &label, commit.author.date)?;
                dates.insert(commit.full_hash.clone(), date);
            }
            Ok(lower_retime(plan, &dates))
        }
        Mode::Adjust => {
            let values = prompter.collect_fields("Duration to add", &zero_fields())?;
            let shift = assemble_shift(&values)?;
            let mut dates = HashMap::new();
            for commit in &selected {
                dates.insert(commit.full_hash.clone(), shift.apply(commit.author.date)?);
            }
            Ok(lower_retime(plan, &dates))
        }
        Mode::Stretch => {
            let span_start = selected
                .first()
                .map(|c| c.author.date)
                .ok_or_else(|| anyhow!("nothing selected"))?;
            let span_end = selected
                .last()
                .map(|c| c.author.date)
                .ok_or_else(|| anyhow!("nothing selected"))?;
            let from = prompt_date(prompter, "Stretch from", span_start)?;
            let to = prompt_date(prompter, "Stretch to", span_end)?;
            let mut dates = HashMap::new();
            for commit in &selected {
                dates.insert(
                    commit.full_hash.clone(),
                    stretch_date(commit.author.date, span_start, span_end, from, to),
                );
            }
            Ok(lower_retime(plan, &dates))
        }
        Mode::Info => {
            let mut rewords = HashMap::new();
            for (position, commit) in selected.iter().enumerate() {
                let label = style::sequence_label(commit, position + 1, selected.len());
                let fields = vec![
                    Field::text("name", commit.author.name.clone()),
                    Field::text("email", commit.author.email.clone()),
                    Field::text("subject", commit.subject.clone()),
                    Field::text("body", escape_newlines(&commit.body)),
                ];
                let values = prompter.collect_fields(&label, &fields)?;
                let [name, email, subject, body] = <[String; 4]>::try_from(values)
                    .map_err(|_| anyhow!("expected 4 field values"))?;
                let body = unescape_newlines(&body);

                let set_author = name != commit.author.name || email != commit.author.email;
                let message = (subject != commit.subject || body != commit.body)
                    .then_some(NewMessage { subject, body });
                rewords.insert(commit.full_hash.clone(), (name, email, set_author, message));
            }

            Ok(plan
                .visit_list
                .iter()
                .map(|commit| match rewords.get(&commit.full_hash) {
                    Some((name, email, set_author, message)) => DeferredAction::Reword {
                        commit: commit.into(),
                        author_name: name.clone(),
                        author_email: email.clone(),
                        set_author: *set_author,
                        message: message.clone(),
                    },
                    None => DeferredAction::PassThrough {
                        commit: commit.into(),
                    },
                })
                .collect())
        }
    }
}

/// Map the visit list onto retime actions for selected commits and
/// pass-throughs for the rest
fn lower_retime(
    plan: &RewritePlan,
    dates: &HashMap<String, DateTime<FixedOffset>>,
) -> Vec<DeferredAction> {
    plan.visit_list
        .iter()
        .map(|commit| match dates.get(&commit.full_hash) {
            Some(date) => DeferredAction::Retime {
                commit: commit.into(),
                date: *date,
            },
            None => DeferredAction::PassThrough {
                commit: commit.into(),
            },
        })
        .collect()
}
