use chrono::NaiveDate;
use kernel::model::{
    availability::Reservation,
    campaign::{Campaign, CampaignHoarding},
    id::{CampaignId, HoardingId, ReservationId},
};

#[derive(sqlx::FromRow)]
pub struct CampaignRow {
    pub campaign_id: CampaignId,
    pub campaign_name: String,
    pub client_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

// キャンペーン本体と紐づく看板は別クエリで取得するため、
// From トレイトの実装の代わりに引数をとる into_campaign メソッドを定義する
impl CampaignRow {
    pub fn into_campaign(self, hoardings: Vec<CampaignHoarding>) -> Campaign {
        let CampaignRow {
            campaign_id,
            campaign_name,
            client_name,
            start_date,
            end_date,
        } = self;
        Campaign {
            campaign_id,
            campaign_name,
            client_name,
            start_date,
            end_date,
            hoardings,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct CampaignHoardingRow {
    pub reservation_id: ReservationId,
    pub campaign_id: CampaignId,
    pub hoarding_id: HoardingId,
    pub hoarding_name: String,
    pub location: String,
}

impl From<CampaignHoardingRow> for CampaignHoarding {
    fn from(value: CampaignHoardingRow) -> Self {
        let CampaignHoardingRow {
            reservation_id,
            campaign_id: _,
            hoarding_id,
            hoarding_name,
            location,
        } = value;
        CampaignHoarding {
            reservation_id,
            hoarding_id,
            hoarding_name,
            location,
        }
    }
}

// 空き状況の計算に渡す予約の最小形
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub hoarding_id: HoardingId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        let ReservationRow {
            hoarding_id,
            start_date,
            end_date,
        } = value;
        Reservation {
            hoarding_id,
            start_date,
            end_date,
        }
    }
}
