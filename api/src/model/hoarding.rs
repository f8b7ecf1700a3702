use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    hoarding::{
        event::{CreateHoarding, UpdateHoarding},
        Hoarding,
    },
    id::HoardingId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHoardingRequest {
    #[garde(length(min = 1))]
    pub hoarding_name: String,
    #[garde(length(min = 1))]
    pub location: String,
    #[garde(skip)]
    pub size_label: String,
    #[garde(range(min = 0))]
    pub monthly_rate: i64,
}

impl From<CreateHoardingRequest> for CreateHoarding {
    fn from(value: CreateHoardingRequest) -> Self {
        let CreateHoardingRequest {
            hoarding_name,
            location,
            size_label,
            monthly_rate,
        } = value;
        CreateHoarding {
            hoarding_name,
            location,
            size_label,
            monthly_rate,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHoardingRequest {
    #[garde(skip)]
    pub hoarding_name: Option<String>,
    #[garde(skip)]
    pub location: Option<String>,
    #[garde(skip)]
    pub size_label: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub monthly_rate: Option<i64>,
}

#[derive(new)]
pub struct UpdateHoardingRequestWithId(HoardingId, UpdateHoardingRequest);

impl From<UpdateHoardingRequestWithId> for UpdateHoarding {
    fn from(value: UpdateHoardingRequestWithId) -> Self {
        let UpdateHoardingRequestWithId(
            hoarding_id,
            UpdateHoardingRequest {
                hoarding_name,
                location,
                size_label,
                monthly_rate,
            },
        ) = value;
        UpdateHoarding {
            hoarding_id,
            hoarding_name,
            location,
            size_label,
            monthly_rate,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoardingResponse {
    pub hoarding_id: HoardingId,
    pub hoarding_name: String,
    pub location: String,
    pub size_label: String,
    pub monthly_rate: i64,
    pub is_available: bool,
    pub booked_until: Option<NaiveDate>,
}

impl From<Hoarding> for HoardingResponse {
    fn from(value: Hoarding) -> Self {
        let Hoarding {
            hoarding_id,
            hoarding_name,
            location,
            size_label,
            monthly_rate,
            is_available,
            booked_until,
        } = value;
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoardingsResponse {
    pub items: Vec<HoardingResponse>,
}

impl From<Vec<Hoarding>> for HoardingsResponse {
    fn from(value: Vec<Hoarding>) -> Self {
        Self {
            items: value.into_iter().map(HoardingResponse::from).collect(),
        }
    }
}
