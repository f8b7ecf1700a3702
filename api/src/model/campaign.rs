use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    campaign::{
        event::{AddCampaignHoarding, CreateCampaign, ExtendCampaign},
        Campaign, CampaignHoarding,
    },
    id::{CampaignId, HoardingId, ReservationId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[garde(length(min = 1))]
    pub campaign_name: String,
    #[garde(length(min = 1))]
    pub client_name: String,
    #[garde(skip)]
    pub start_date: NaiveDate,
    // 省略した場合は「終了日未定」のキャンペーンになる
    #[garde(skip)]
    pub end_date: Option<NaiveDate>,
    #[garde(length(min = 1))]
    pub hoarding_ids: Vec<HoardingId>,
}

impl From<CreateCampaignRequest> for CreateCampaign {
    fn from(value: CreateCampaignRequest) -> Self {
        let CreateCampaignRequest {
            campaign_name,
            client_name,
            start_date,
            end_date,
            hoarding_ids,
        } = value;
        CreateCampaign {
            campaign_name,
            client_name,
            start_date,
            end_date,
            hoarding_ids,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtendCampaignRequest {
    #[garde(skip)]
    pub end_date: Option<NaiveDate>,
}

#[derive(new)]
pub struct ExtendCampaignRequestWithId(CampaignId, ExtendCampaignRequest);

impl From<ExtendCampaignRequestWithId> for ExtendCampaign {
    fn from(value: ExtendCampaignRequestWithId) -> Self {
        let ExtendCampaignRequestWithId(campaign_id, ExtendCampaignRequest { end_date }) = value;
        ExtendCampaign {
            campaign_id,
            end_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCampaignHoardingRequest {
    #[garde(skip)]
    pub hoarding_id: HoardingId,
}

#[derive(new)]
pub struct AddCampaignHoardingRequestWithId(CampaignId, AddCampaignHoardingRequest);

impl From<AddCampaignHoardingRequestWithId> for AddCampaignHoarding {
    fn from(value: AddCampaignHoardingRequestWithId) -> Self {
        let AddCampaignHoardingRequestWithId(
            campaign_id,
            AddCampaignHoardingRequest { hoarding_id },
        ) = value;
        AddCampaignHoarding {
            campaign_id,
            hoarding_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignsResponse {
    pub items: Vec<CampaignResponse>,
}

impl From<Vec<Campaign>> for CampaignsResponse {
    fn from(value: Vec<Campaign>) -> Self {
        Self {
            items: value.into_iter().map(CampaignResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub campaign_id: CampaignId,
    pub campaign_name: String,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub hoardings: Vec<CampaignHoardingResponse>,
}

impl From<Campaign> for CampaignResponse {
    fn from(value: Campaign) -> Self {
        let Campaign {
            campaign_id,
            campaign_name,
            client_name,
            start_date,
            end_date,
            hoardings,
        } = value;
        Self {
            campaign_id,
            campaign_name,
            client_name,
            start_date,
            end_date,
            hoardings: hoardings
                .into_iter()
                .map(CampaignHoardingResponse::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignHoardingResponse {
    pub reservation_id: ReservationId,
    pub hoarding_id: HoardingId,
    pub hoarding_name: String,
    pub location: String,
}

impl From<CampaignHoarding> for CampaignHoardingResponse {
    fn from(value: CampaignHoarding) -> Self {
        let CampaignHoarding {
            reservation_id,
            hoarding_id,
            hoarding_name,
            location,
        } = value;
        Self {
            reservation_id,
            hoarding_id,
            hoarding_name,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_campaign_request_accepts_camel_case_json() {
        let hoarding_id = uuid::Uuid::new_v4();
        let raw = format!(
            r#"{{
                "campaignName": "夏季プロモーション",
                "clientName": "株式会社サンプル",
                "startDate": "2024-07-01",
                "endDate": "2024-07-31",
                "hoardingIds": ["{hoarding_id}"]
            }}"#
        );

        let req: CreateCampaignRequest = serde_json::from_str(&raw).unwrap();
        assert_eq!(req.campaign_name, "夏季プロモーション");
        assert_eq!(
            req.start_date,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
        assert_eq!(req.end_date, NaiveDate::from_ymd_opt(2024, 7, 31));
        assert_eq!(req.hoarding_ids.len(), 1);
        assert!(req.validate(&()).is_ok());
    }

    #[test]
    fn create_campaign_request_without_end_date_is_open_ended() {
        let hoarding_id = uuid::Uuid::new_v4();
        let raw = format!(
            r#"{{
                "campaignName": "常設看板",
                "clientName": "株式会社サンプル",
                "startDate": "2024-07-01",
                "hoardingIds": ["{hoarding_id}"]
            }}"#
        );

        let req: CreateCampaignRequest = serde_json::from_str(&raw).unwrap();
        assert_eq!(req.end_date, None);
    }

    #[test]
    fn create_campaign_request_requires_hoardings() {
        let raw = r#"{
            "campaignName": "空のキャンペーン",
            "clientName": "株式会社サンプル",
            "startDate": "2024-07-01",
            "hoardingIds": []
        }"#;

        let req: CreateCampaignRequest = serde_json::from_str(raw).unwrap();
        assert!(req.validate(&()).is_err());
    }
}
