use chrono::NaiveDate;
use kernel::model::{hoarding::Hoarding, id::HoardingId};

#[derive(sqlx::FromRow)]
pub struct HoardingRow {
    pub hoarding_id: HoardingId,
    pub hoarding_name: String,
    pub location: String,
    pub size_label: String,
    pub monthly_rate: i64,
    pub is_available: bool,
    pub booked_until: Option<NaiveDate>,
}

impl From<HoardingRow> for Hoarding {
    fn from(value: HoardingRow) -> Self {
        let HoardingRow {
            hoarding_id,
            hoarding_name,
            location,
            size_label,
            monthly_rate,
            is_available,
            booked_until,
        } = value;
        Hoarding {
            hoarding_id,
            hoarding_name,
            location,
            size_label,
            monthly_rate,
            is_available,
            booked_until,
        }
    }
}
