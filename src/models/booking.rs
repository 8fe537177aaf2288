use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    GeneralMedicine,
    Cardiology,
    Pediatrics,
    Orthopedics,
    Dermatology,
    Neurology,
    Ophthalmology,
    Ent,
}

impl Specialty {
    pub const ALL: [Specialty; 8] = [
        Specialty::GeneralMedicine,
        Specialty::Cardiology,
        Specialty::Pediatrics,
        Specialty::Orthopedics,
        Specialty::Dermatology,
        Specialty::Neurology,
        Specialty::Ophthalmology,
        Specialty::Ent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::GeneralMedicine => "general_medicine",
            Specialty::Cardiology => "cardiology",
            Specialty::Pediatrics => "pediatrics",
            Specialty::Orthopedics => "orthopedics",
            Specialty::Dermatology => "dermatology",
            Specialty::Neurology => "neurology",
            Specialty::Ophthalmology => "ophthalmology",
            Specialty::Ent => "ent",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Specialty::GeneralMedicine => "1",
            Specialty::Cardiology => "2",
            Specialty::Pediatrics => "3",
            Specialty::Orthopedics => "4",
            Specialty::Dermatology => "5",
            Specialty::Neurology => "6",
            Specialty::Ophthalmology => "7",
            Specialty::Ent => "8",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Specialty::GeneralMedicine => "General Medicine",
            Specialty::Cardiology => "Cardiology",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Dermatology => "Dermatology",
            Specialty::Neurology => "Neurology",
            Specialty::Ophthalmology => "Ophthalmology",
            Specialty::Ent => "ENT",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Specialty::GeneralMedicine => "medical",
            Specialty::Cardiology => "heart",
            Specialty::Pediatrics => "happy",
            Specialty::Orthopedics => "fitness",
            Specialty::Dermatology => "body",
            Specialty::Neurology => "pulse",
            Specialty::Ophthalmology => "eye",
            Specialty::Ent => "ear",
        }
    }

    /// Accepts the display name ("Cardiology", "ENT") as well as the
    /// snake_case key used on the wire.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL.into_iter().find(|spec| {
            spec.name().eq_ignore_ascii_case(needle)
                || spec.id() == needle
                || spec.as_str() == needle
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpecialtyOption {
    pub key: Specialty,
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

impl From<Specialty> for SpecialtyOption {
    fn from(spec: Specialty) -> Self {
        Self {
            key: spec,
            id: spec.id(),
            name: spec.name(),
            icon: spec.icon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub id: &'static str,
    pub name: &'static str,
    pub specialty: Specialty,
    pub hospital: &'static str,
    pub rating: f32,
}

pub const DOCTORS: [Doctor; 4] = [
    Doctor {
        id: "1",
        name: "Dr. Tan Wei Ming",
        specialty: Specialty::GeneralMedicine,
        hospital: "Singapore General Hospital",
        rating: 4.8,
    },
    Doctor {
        id: "2",
        name: "Dr. Sarah Wong",
        specialty: Specialty::Cardiology,
        hospital: "National Heart Centre",
        rating: 4.9,
    },
    Doctor {
        id: "3",
        name: "Dr. James Lee",
        specialty: Specialty::Pediatrics,
        hospital: "KK Women's and Children's Hospital",
        rating: 4.7,
    },
    Doctor {
        id: "4",
        name: "Dr. Priya Singh",
        specialty: Specialty::Orthopedics,
        hospital: "Changi General Hospital",
        rating: 4.6,
    },
];

pub fn find_doctor(id: &str) -> Option<&'static Doctor> {
    DOCTORS.iter().find(|d| d.id == id)
}

pub fn doctors_for(specialty: Specialty) -> Vec<&'static Doctor> {
    DOCTORS.iter().filter(|d| d.specialty == specialty).collect()
}

pub const TIME_SLOTS: [&str; 6] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "02:00 PM", "03:00 PM", "04:00 PM",
];

/// Number of consecutive days offered, starting today.
pub const BOOKING_WINDOW_DAYS: i64 = 10;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeSlot {
    pub index: usize,
    pub label: &'static str,
    pub available: bool,
}

impl TimeSlot {
    pub fn get(index: usize) -> Option<Self> {
        TIME_SLOTS.get(index).map(|&label| Self {
            index,
            label,
            available: slot_available(index),
        })
    }

    pub fn all() -> Vec<Self> {
        (0..TIME_SLOTS.len()).filter_map(Self::get).collect()
    }
}

/// Every third slot is shown as taken. Placeholder only, not backed by a schedule.
pub fn slot_available(index: usize) -> bool {
    index % 3 != 0
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateOption {
    pub date: NaiveDate,
    pub weekday: String,
    pub day: u32,
    /// Set on the first of the month so the picker can label it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub is_weekend: bool,
}

impl DateOption {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: date.format("%a").to_string(),
            day: date.day(),
            month: (date.day() == 1).then(|| date.format("%b").to_string()),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    pub fn window(today: NaiveDate) -> Vec<Self> {
        (0..BOOKING_WINDOW_DAYS)
            .map(|offset| Self::new(today + Duration::days(offset)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    SelectSpecialty,
    SelectDoctor,
    SelectDateTime,
    Confirmed,
}

impl BookingStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStep::SelectSpecialty => "select_specialty",
            BookingStep::SelectDoctor => "select_doctor",
            BookingStep::SelectDateTime => "select_date_time",
            BookingStep::Confirmed => "confirmed",
        }
    }

    /// Progress counter shown to the user; the confirmation view stays on 3.
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::SelectSpecialty => 1,
            BookingStep::SelectDoctor => 2,
            BookingStep::SelectDateTime | BookingStep::Confirmed => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookingStep::SelectSpecialty => "Select Specialty",
            BookingStep::SelectDoctor => "Select Doctor",
            BookingStep::SelectDateTime => "Select Date & Time",
            BookingStep::Confirmed => "Book Appointment",
        }
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingSelection {
    pub specialty: Option<Specialty>,
    pub doctor: Option<&'static Doctor>,
    pub date: NaiveDate,
    pub time: Option<usize>,
}

impl BookingSelection {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            specialty: None,
            doctor: None,
            date: today,
            time: None,
        }
    }

    pub fn time_label(&self) -> Option<&'static str> {
        self.time.and_then(|i| TIME_SLOTS.get(i).copied())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Confirmation {
    pub reference: String,
    pub doctor: String,
    pub specialty: String,
    pub hospital: String,
    pub date: NaiveDate,
    pub time: String,
    pub scheduled_for: String,
    pub confirmed_at: DateTime<Utc>,
}
