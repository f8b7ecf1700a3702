use crate::model::id::{CampaignId, HoardingId, ReservationId};
use chrono::NaiveDate;

pub mod event;

#[derive(Debug)]
pub struct Campaign {
    pub campaign_id: CampaignId,
    pub campaign_name: String,
    pub client_name: String,
    pub start_date: NaiveDate,
    // end_date が None のキャンペーンは「終了日未定」で掲出を続ける
    pub end_date: Option<NaiveDate>,
    pub hoardings: Vec<CampaignHoarding>,
}

#[derive(Debug)]
pub struct CampaignHoarding {
    pub reservation_id: ReservationId,
    pub hoarding_id: HoardingId,
    pub hoarding_name: String,
    pub location: String,
}
