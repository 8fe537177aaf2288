pub mod booking;
pub mod chat;
pub mod event;
pub mod profile;
pub mod route;
pub mod triage;

pub use booking::{
    doctors_for, find_doctor, slot_available, BookingSelection, BookingStep, Confirmation,
    DateOption, Doctor, Specialty, SpecialtyOption, TimeSlot, BOOKING_WINDOW_DAYS, DOCTORS,
    TIME_SLOTS,
};
pub use chat::{ChatMessage, MessageRole, TriageOption, WELCOME_ID, WELCOME_TEXT};
pub use event::{SessionEvent, SessionEventKind};
pub use profile::PatientProfile;
pub use route::Route;
pub use triage::{AssessmentOutcome, EmergencyDialog, OutcomeSummary, EMERGENCY_NUMBER};
