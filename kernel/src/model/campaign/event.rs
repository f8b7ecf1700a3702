use crate::model::id::{CampaignId, HoardingId};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateCampaign {
    pub campaign_name: String,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub hoarding_ids: Vec<HoardingId>,
}

#[derive(new)]
pub struct ExtendCampaign {
    pub campaign_id: CampaignId,
    // None へ延長した場合は「終了日未定」の扱いになる
    pub end_date: Option<NaiveDate>,
}

#[derive(new)]
pub struct AddCampaignHoarding {
    pub campaign_id: CampaignId,
    pub hoarding_id: HoardingId,
}
