//! Court creation for one facility: `details → pricing`.

use crate::backend::Backend;
use crate::core::field::{FieldKind, FieldSpec, RowsSpec};
use crate::core::flow::Flow;
use crate::core::form_record::FormRecord;
use crate::core::step::Step;
use crate::core::validation::ValidationResult;
use crate::core::validators;
use crate::core::value::Value;
use crate::domain::court::{Court, CourtDraft, CourtStatus, DayType, PriceSlotDraft};
use crate::domain::ids::FacilityId;
use crate::domain::time::{TimeOfDay, is_ordered_range};
use crate::error::{FlowError, SubmitError};
use crate::flows::{required_text, required_time};
use crate::wizard::WizardSession;

pub const NAME: &str = "courtName";
pub const STATUS: &str = "courtStatus";
pub const PRICES: &str = "courtPrices";

pub const SLOT_DAY_TYPE: &str = "dayType";
pub const SLOT_START: &str = "startTime";
pub const SLOT_END: &str = "endTime";
pub const SLOT_PRICE: &str = "price";

pub const STEPS: [&str; 2] = ["details", "pricing"];

pub fn price_slot(day_type: DayType, start: &str, end: &str, price: i64) -> FormRecord {
    FormRecord::new()
        .with(SLOT_DAY_TYPE, Value::choice(day_type.code()))
        .with(SLOT_START, start)
        .with(SLOT_END, end)
        .with(SLOT_PRICE, price)
}

fn first_slot() -> FormRecord {
    price_slot(DayType::Weekday, "06:00", "12:00", 50_000)
}

fn added_slot() -> FormRecord {
    price_slot(DayType::Weekday, "12:00", "18:00", 80_000)
}

pub fn defaults() -> FormRecord {
    FormRecord::new()
        .with(NAME, "")
        .with(STATUS, Value::choice(CourtStatus::Active.code()))
        .with(PRICES, Value::Rows(vec![first_slot()]))
}

pub fn flow() -> Result<Flow, FlowError> {
    Flow::new(vec![details_step(), pricing_step()])
}

pub fn session() -> Result<WizardSession, FlowError> {
    Ok(WizardSession::new("add-court", flow()?, defaults()))
}

fn details_step() -> Step {
    Step::builder(STEPS[0], "Court Details")
        .field(FieldSpec::text(NAME, "Court Name").required().placeholder("e.g. Court A1"))
        .field(FieldSpec::new(
            STATUS,
            "Status",
            FieldKind::Choice(CourtStatus::choice_options()),
        ))
        .rule(NAME, validators::required("Please enter court name"))
        .validate(|record| match record.text(STATUS).map(str::parse::<CourtStatus>) {
            Some(Ok(_)) => ValidationResult::Pass,
            _ => ValidationResult::fail("Please select a court status"),
        })
        .build()
}

fn pricing_step() -> Step {
    let slot_fields = vec![
        FieldSpec::new(
            SLOT_DAY_TYPE,
            "Day Type",
            FieldKind::Choice(DayType::choice_options()),
        ),
        FieldSpec::new(SLOT_START, "Start Time", FieldKind::Time).required(),
        FieldSpec::new(SLOT_END, "End Time", FieldKind::Time).required(),
        FieldSpec::new(SLOT_PRICE, "Price", FieldKind::Integer).required(),
    ];
    Step::builder(STEPS[1], "Pricing")
        .field(
            FieldSpec::new(
                PRICES,
                "Pricing Slots",
                FieldKind::Rows(RowsSpec {
                    fields: slot_fields,
                    template: added_slot(),
                    min_rows: 1,
                }),
            )
            .required(),
        )
        .validate(validate_slots)
        .build()
}

fn validate_slots(record: &FormRecord) -> ValidationResult {
    let slots = record.rows(PRICES);
    if slots.is_empty() {
        return ValidationResult::fail("Please add at least one pricing slot");
    }
    for (idx, slot) in slots.iter().enumerate() {
        let n = idx + 1;
        let start = slot.text_or_empty(SLOT_START);
        let end = slot.text_or_empty(SLOT_END);
        let complete = !start.is_empty()
            && !end.is_empty()
            && slot.integer(SLOT_PRICE).is_some_and(|p| p > 0)
            && slot
                .text(SLOT_DAY_TYPE)
                .is_some_and(|code| code.parse::<DayType>().is_ok());
        if !complete {
            return ValidationResult::fail(format!("Please complete pricing slot {n}"));
        }
        if !is_ordered_range(&start, &end) {
            return ValidationResult::fail(format!("Invalid time range in pricing slot {n}"));
        }
    }
    ValidationResult::Pass
}

pub fn add_price_slot(record: &mut FormRecord) {
    record.rows_mut(PRICES).push(added_slot());
}

/// The last remaining slot stays.
pub fn remove_price_slot(record: &mut FormRecord, index: usize) -> bool {
    let rows = record.rows_mut(PRICES);
    if rows.len() <= 1 || index >= rows.len() {
        return false;
    }
    rows.remove(index);
    true
}

pub fn update_price_slot(
    record: &mut FormRecord,
    index: usize,
    field: &str,
    value: impl Into<Value>,
) -> bool {
    match record.rows_mut(PRICES).get_mut(index) {
        Some(slot) => {
            slot.set(field, value);
            true
        }
        None => false,
    }
}

pub fn draft(facility_id: FacilityId, record: &FormRecord) -> Result<CourtDraft, SubmitError> {
    let status = record
        .text(STATUS)
        .unwrap_or_default()
        .parse::<CourtStatus>()
        .map_err(|err| SubmitError::InvalidForm(err.to_string()))?;

    let prices = record
        .rows(PRICES)
        .iter()
        .map(slot_draft)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CourtDraft {
        facility_id,
        name: required_text(record, NAME)?,
        status,
        prices,
    })
}

fn slot_draft(slot: &FormRecord) -> Result<PriceSlotDraft, SubmitError> {
    let day_type = slot
        .text(SLOT_DAY_TYPE)
        .unwrap_or_default()
        .parse::<DayType>()
        .map_err(|err| SubmitError::InvalidForm(err.to_string()))?;
    let price = slot
        .integer(SLOT_PRICE)
        .and_then(|p| u64::try_from(p).ok())
        .ok_or_else(|| SubmitError::InvalidForm("price must be a positive amount".into()))?;
    let start_time: TimeOfDay = required_time(slot, SLOT_START)?;
    Ok(PriceSlotDraft {
        day_type,
        start_time,
        end_time: required_time(slot, SLOT_END)?,
        price,
    })
}

pub fn submitter<B: Backend + ?Sized>(
    backend: &mut B,
    facility_id: FacilityId,
) -> impl FnMut(&FormRecord) -> Result<Court, SubmitError> + '_ {
    move |record: &FormRecord| backend.create_court(draft(facility_id, record)?)
}
