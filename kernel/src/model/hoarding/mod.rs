use crate::model::id::HoardingId;
use chrono::NaiveDate;

pub mod event;

#[derive(Debug)]
pub struct Hoarding {
    pub hoarding_id: HoardingId,
    pub hoarding_name: String,
    pub location: String,
    pub size_label: String,
    pub monthly_rate: i64,
    // is_available と booked_until は予約状況から導出される値であり、
    // 直接更新せず空き状況の再計算を通じてのみ書き換える
    pub is_available: bool,
    pub booked_until: Option<NaiveDate>,
}
