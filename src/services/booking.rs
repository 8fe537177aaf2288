use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::models::{
    doctors_for, find_doctor, BookingSelection, BookingStep, Confirmation, DateOption, Doctor,
    Specialty, SpecialtyOption, TimeSlot, BOOKING_WINDOW_DAYS,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BookingError {
    #[error("not available during {actual}, expected {expected}")]
    WrongStep {
        expected: BookingStep,
        actual: BookingStep,
    },

    #[error("unknown doctor: {0}")]
    UnknownDoctor(String),

    #[error("{doctor} does not practise {specialty}")]
    DoctorNotOffered {
        doctor: String,
        specialty: &'static str,
    },

    #[error("{0} is outside the booking window")]
    DateOutOfRange(NaiveDate),

    #[error("unknown time slot: {0}")]
    UnknownSlot(usize),

    #[error("the {0} slot is unavailable")]
    SlotUnavailable(&'static str),

    #[error("booking is incomplete: {0} not selected")]
    Incomplete(&'static str),
}

/// Appointment wizard for one session.
///
/// Forward transitions are gated on the selection made at the current step.
/// A rejected call leaves the flow untouched.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    step: BookingStep,
    today: NaiveDate,
    selection: BookingSelection,
    confirmation: Option<Confirmation>,
}

impl BookingFlow {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: BookingStep::SelectSpecialty,
            today,
            selection: BookingSelection::new(today),
            confirmation: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    fn expect_step(&self, expected: BookingStep) -> Result<(), BookingError> {
        if self.step != expected {
            return Err(BookingError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    pub fn select_specialty(&mut self, specialty: Specialty) -> Result<(), BookingError> {
        self.expect_step(BookingStep::SelectSpecialty)?;
        self.selection.specialty = Some(specialty);
        self.step = BookingStep::SelectDoctor;
        Ok(())
    }

    /// Doctors offered at the doctor step. Empty means the only way out is back.
    pub fn available_doctors(&self) -> Vec<&'static Doctor> {
        self.selection
            .specialty
            .map(doctors_for)
            .unwrap_or_default()
    }

    pub fn select_doctor(&mut self, doctor_id: &str) -> Result<(), BookingError> {
        self.expect_step(BookingStep::SelectDoctor)?;
        let specialty = self
            .selection
            .specialty
            .ok_or(BookingError::Incomplete("specialty"))?;
        let doctor =
            find_doctor(doctor_id).ok_or_else(|| BookingError::UnknownDoctor(doctor_id.to_string()))?;
        if doctor.specialty != specialty {
            return Err(BookingError::DoctorNotOffered {
                doctor: doctor.name.to_string(),
                specialty: specialty.name(),
            });
        }
        self.selection.doctor = Some(doctor);
        self.step = BookingStep::SelectDateTime;
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.expect_step(BookingStep::SelectDateTime)?;
        let offset = (date - self.today).num_days();
        if !(0..BOOKING_WINDOW_DAYS).contains(&offset) {
            return Err(BookingError::DateOutOfRange(date));
        }
        self.selection.date = date;
        Ok(())
    }

    pub fn select_time(&mut self, index: usize) -> Result<(), BookingError> {
        self.expect_step(BookingStep::SelectDateTime)?;
        let slot = TimeSlot::get(index).ok_or(BookingError::UnknownSlot(index))?;
        if !slot.available {
            return Err(BookingError::SlotUnavailable(slot.label));
        }
        self.selection.time = Some(index);
        Ok(())
    }

    /// Step back one screen, dropping what was chosen on the screen being left.
    pub fn go_back(&mut self) {
        match self.step {
            BookingStep::SelectSpecialty | BookingStep::Confirmed => {}
            BookingStep::SelectDoctor => {
                self.selection.specialty = None;
                self.step = BookingStep::SelectSpecialty;
            }
            BookingStep::SelectDateTime => {
                self.selection.doctor = None;
                self.selection.time = None;
                self.selection.date = self.today;
                self.step = BookingStep::SelectDoctor;
            }
        }
    }

    pub fn can_confirm(&self) -> bool {
        self.step == BookingStep::SelectDateTime
            && self.selection.specialty.is_some()
            && self.selection.doctor.is_some()
            && self.selection.time.is_some()
    }

    pub fn confirm(&mut self, reference: String) -> Result<Confirmation, BookingError> {
        self.expect_step(BookingStep::SelectDateTime)?;
        let specialty = self
            .selection
            .specialty
            .ok_or(BookingError::Incomplete("specialty"))?;
        let doctor = self.selection.doctor.ok_or(BookingError::Incomplete("doctor"))?;
        let time = self
            .selection
            .time_label()
            .ok_or(BookingError::Incomplete("time"))?;
        let date = self.selection.date;

        let confirmation = Confirmation {
            reference,
            doctor: doctor.name.to_string(),
            specialty: specialty.name().to_string(),
            hospital: doctor.hospital.to_string(),
            date,
            time: time.to_string(),
            scheduled_for: format!("{} at {time}", date.format("%b %-d, %Y")),
            confirmed_at: Utc::now(),
        };

        self.confirmation = Some(confirmation.clone());
        self.step = BookingStep::Confirmed;
        Ok(confirmation)
    }

    /// Starts the bookable window at `today` once the calendar day changes. A
    /// chosen date that fell out of the window moves to the first bookable day.
    pub fn roll_date(&mut self, today: NaiveDate) {
        if today <= self.today {
            return;
        }
        self.today = today;
        if self.step != BookingStep::Confirmed && self.selection.date < today {
            self.selection.date = today;
        }
    }

    /// Back to an empty selection, dated `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn view(&self) -> BookingView {
        let mut view = BookingView {
            step: self.step,
            step_number: self.step.number(),
            title: self.step.title(),
            progress: f32::from(self.step.number()) / 3.0,
            selection: self.selection.clone(),
            specialties: Vec::new(),
            doctors: Vec::new(),
            dates: Vec::new(),
            time_slots: Vec::new(),
            can_go_back: matches!(
                self.step,
                BookingStep::SelectDoctor | BookingStep::SelectDateTime
            ),
            can_confirm: self.can_confirm(),
            confirmation: self.confirmation.clone(),
        };

        match self.step {
            BookingStep::SelectSpecialty => {
                view.specialties = Specialty::ALL.into_iter().map(SpecialtyOption::from).collect();
            }
            BookingStep::SelectDoctor => {
                view.doctors = self.available_doctors();
            }
            BookingStep::SelectDateTime => {
                view.dates = DateOption::window(self.today);
                view.time_slots = TimeSlot::all();
            }
            BookingStep::Confirmed => {}
        }

        view
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub step: BookingStep,
    pub step_number: u8,
    pub title: &'static str,
    pub progress: f32,
    pub selection: BookingSelection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<SpecialtyOption>,
    pub doctors: Vec<&'static Doctor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<DateOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_slots: Vec<TimeSlot>,
    pub can_go_back: bool,
    pub can_confirm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
}
