//! Facility registration (`basic → contact → location → hours`) and the
//! one-step edit of a registered facility's general details.

use crate::backend::Backend;
use crate::config::FacilityDefaults;
use crate::core::field::{FieldKind, FieldSpec};
use crate::core::flow::Flow;
use crate::core::form_record::FormRecord;
use crate::core::step::{Step, StepBuilder};
use crate::core::validation::{REQUIRED_FIELDS_MESSAGE, ValidationResult};
use crate::core::validators;
use crate::domain::facility::{Facility, FacilityDraft, FacilityUpdate};
use crate::domain::ids::FacilityId;
use crate::error::{FlowError, SubmitError};
use crate::flows::{optional_float, required_text, required_time};
use crate::wizard::WizardSession;

pub const NAME: &str = "facilityName";
pub const DESCRIPTION: &str = "description";
pub const CONTACT_PHONE: &str = "contactPhone";
pub const CONTACT_EMAIL: &str = "contactEmail";
pub const ADDRESS: &str = "address";
pub const WARD: &str = "ward";
pub const DISTRICT: &str = "district";
pub const CITY: &str = "city";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const OPENING_TIME: &str = "openingTime";
pub const CLOSING_TIME: &str = "closingTime";

pub const STEPS: [&str; 4] = ["basic", "contact", "location", "hours"];

pub fn defaults(config: &FacilityDefaults) -> FormRecord {
    FormRecord::new()
        .with(NAME, "")
        .with(DESCRIPTION, "")
        .with(CONTACT_PHONE, "")
        .with(CONTACT_EMAIL, "")
        .with(ADDRESS, "")
        .with(WARD, "")
        .with(DISTRICT, "")
        .with(CITY, config.default_city.as_str())
        .with(LATITUDE, "")
        .with(LONGITUDE, "")
        .with(OPENING_TIME, config.opening_time.to_string())
        .with(CLOSING_TIME, config.closing_time.to_string())
}

pub fn flow() -> Result<Flow, FlowError> {
    Flow::new(vec![basic_step(), contact_step(), location_step(), hours_step()])
}

pub fn session(config: &FacilityDefaults) -> Result<WizardSession, FlowError> {
    Ok(WizardSession::new(
        "register-facility",
        flow()?,
        defaults(config),
    ))
}

fn basic_step() -> Step {
    Step::builder(STEPS[0], "Basic Information")
        .field(FieldSpec::text(NAME, "Facility Name").required().placeholder("Enter facility name"))
        .field(
            FieldSpec::new(DESCRIPTION, "Description", FieldKind::Multiline)
                .required()
                .placeholder("Describe your facility..."),
        )
        .require([NAME, DESCRIPTION], REQUIRED_FIELDS_MESSAGE)
        .build()
}

fn contact_step() -> Step {
    Step::builder(STEPS[1], "Contact Details")
        .field(
            FieldSpec::new(CONTACT_PHONE, "Contact Phone", FieldKind::Phone)
                .required()
                .placeholder("Enter phone number"),
        )
        .field(
            FieldSpec::new(CONTACT_EMAIL, "Contact Email", FieldKind::Email)
                .required()
                .placeholder("Enter email address"),
        )
        .require([CONTACT_PHONE, CONTACT_EMAIL], REQUIRED_FIELDS_MESSAGE)
        .rule(CONTACT_PHONE, validators::phone("Please enter a valid phone number"))
        .rule(CONTACT_EMAIL, validators::email("Please enter a valid email address"))
        .build()
}

fn location_step() -> Step {
    Step::builder(STEPS[2], "Location")
        .field(FieldSpec::text(ADDRESS, "Street Address").required())
        .field(FieldSpec::text(WARD, "Ward").required())
        .field(FieldSpec::text(DISTRICT, "District").required())
        .field(FieldSpec::text(CITY, "City").required())
        .field(FieldSpec::new(LATITUDE, "Latitude", FieldKind::Float).placeholder("optional"))
        .field(FieldSpec::new(LONGITUDE, "Longitude", FieldKind::Float).placeholder("optional"))
        .require([ADDRESS, WARD, DISTRICT, CITY], REQUIRED_FIELDS_MESSAGE)
        .validate(|record| coordinate(record, LATITUDE, 90.0, "Latitude"))
        .validate(|record| coordinate(record, LONGITUDE, 180.0, "Longitude"))
        .build()
}

fn hours_step() -> Step {
    hour_fields(Step::builder(STEPS[3], "Operating Hours")).build()
}

fn hour_fields(builder: StepBuilder) -> StepBuilder {
    builder
        .field(FieldSpec::new(OPENING_TIME, "Opening Time", FieldKind::Time).required())
        .field(FieldSpec::new(CLOSING_TIME, "Closing Time", FieldKind::Time).required())
        .require([OPENING_TIME, CLOSING_TIME], REQUIRED_FIELDS_MESSAGE)
        .rule(OPENING_TIME, validators::time_of_day("Opening time must be in HH:MM format"))
        .rule(CLOSING_TIME, validators::time_of_day("Closing time must be in HH:MM format"))
        .validator(validators::time_before(
            OPENING_TIME,
            CLOSING_TIME,
            "Opening time must be earlier than closing time",
        ))
}

fn coordinate(record: &FormRecord, id: &str, bound: f64, label: &str) -> ValidationResult {
    if record.is_empty(id) {
        return ValidationResult::Pass;
    }
    match record.float(id) {
        Some(v) if (-bound..=bound).contains(&v) => ValidationResult::Pass,
        _ => ValidationResult::fail(format!("{label} must be a number between -{bound} and {bound}")),
    }
}

pub fn draft(record: &FormRecord) -> Result<FacilityDraft, SubmitError> {
    Ok(FacilityDraft {
        name: required_text(record, NAME)?,
        description: required_text(record, DESCRIPTION)?,
        contact_phone: required_text(record, CONTACT_PHONE)?,
        contact_email: required_text(record, CONTACT_EMAIL)?,
        opening_time: required_time(record, OPENING_TIME)?,
        closing_time: required_time(record, CLOSING_TIME)?,
        address: required_text(record, ADDRESS)?,
        ward: required_text(record, WARD)?,
        district: required_text(record, DISTRICT)?,
        city: required_text(record, CITY)?,
        latitude: optional_float(record, LATITUDE)?,
        longitude: optional_float(record, LONGITUDE)?,
    })
}

/// Terminal action for [`session`].
pub fn submitter<B: Backend + ?Sized>(
    backend: &mut B,
) -> impl FnMut(&FormRecord) -> Result<Facility, SubmitError> + '_ {
    move |record: &FormRecord| backend.register_facility(draft(record)?)
}

/// The edit form starts from the facility's current values.
pub fn edit_defaults(facility: &Facility) -> FormRecord {
    FormRecord::new()
        .with(DESCRIPTION, facility.description.as_str())
        .with(OPENING_TIME, facility.opening_time.to_string())
        .with(CLOSING_TIME, facility.closing_time.to_string())
}

pub fn edit_flow() -> Result<Flow, FlowError> {
    let step = Step::builder("general", "General Information")
        .field(FieldSpec::new(DESCRIPTION, "Description", FieldKind::Multiline).required());
    let step = hour_fields(step.require([DESCRIPTION], REQUIRED_FIELDS_MESSAGE)).build();
    Flow::new(vec![step])
}

pub fn edit_session(facility: &Facility) -> Result<WizardSession, FlowError> {
    Ok(WizardSession::new(
        "edit-facility",
        edit_flow()?,
        edit_defaults(facility),
    ))
}

pub fn update(record: &FormRecord) -> Result<FacilityUpdate, SubmitError> {
    Ok(FacilityUpdate {
        description: required_text(record, DESCRIPTION)?,
        opening_time: required_time(record, OPENING_TIME)?,
        closing_time: required_time(record, CLOSING_TIME)?,
    })
}

/// Terminal action for [`edit_session`].
pub fn edit_submitter<B: Backend + ?Sized>(
    backend: &mut B,
    id: FacilityId,
) -> impl FnMut(&FormRecord) -> Result<Facility, SubmitError> + '_ {
    move |record: &FormRecord| backend.update_facility(id, update(record)?)
}
