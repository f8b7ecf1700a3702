use crate::model::id::HoardingId;

pub struct CreateHoarding {
    pub hoarding_name: String,
    pub location: String,
    pub size_label: String,
    pub monthly_rate: i64,
}

#[derive(Debug)]
pub struct UpdateHoarding {
    pub hoarding_id: HoardingId,
    pub hoarding_name: Option<String>,
    pub location: Option<String>,
    pub size_label: Option<String>,
    pub monthly_rate: Option<i64>,
}

#[derive(Debug)]
pub struct DeleteHoarding {
    pub hoarding_id: HoardingId,
}
