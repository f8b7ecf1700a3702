use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::id::HoardingId;

// 看板ひとつ分の掲出予約期間。
// end_date が None の予約は「終了日未定」でその日以降ずっと掲出が続く
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub hoarding_id: HoardingId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoardingStatus {
    pub hoarding_id: HoardingId,
    pub is_available: bool,
    pub booked_until: Option<NaiveDate>,
}

impl HoardingStatus {
    fn vacant(hoarding_id: HoardingId) -> Self {
        Self {
            hoarding_id,
            is_available: true,
            booked_until: None,
        }
    }
}

// 開始日・終了日ともに当日を含む（日付単位の比較）
pub fn is_active_on(reservation: &Reservation, today: NaiveDate) -> bool {
    today >= reservation.start_date && reservation.end_date.map_or(true, |end| today <= end)
}

// 全看板の空き状況を予約一覧から計算し直す。
// 戻り値は all_hoarding_ids と過不足なく一対一に対応し、hoarding_id 順に並ぶ
pub fn reconcile(
    reservations: &[Reservation],
    today: NaiveDate,
    all_hoarding_ids: &HashSet<HoardingId>,
) -> Vec<HoardingStatus> {
    let mut statuses: HashMap<HoardingId, HoardingStatus> = all_hoarding_ids
        .iter()
        .map(|id| (*id, HoardingStatus::vacant(*id)))
        .collect();

    for reservation in reservations {
        if !is_active_on(reservation, today) {
            continue;
        }
        // 管理対象外の看板 ID を持つ予約は無視する
        let Some(status) = statuses.get_mut(&reservation.hoarding_id) else {
            continue;
        };
        occupy(status, reservation.end_date);
    }

    let mut statuses: Vec<HoardingStatus> = statuses.into_values().collect();
    statuses.sort_unstable_by_key(|status| status.hoarding_id);
    statuses
}

// 単一看板向けの差分計算。キャンペーンの登録・延長時に夜間バッチを待たず
// 即時で空き状況を反映するために使う。対象外の看板の予約が混ざっていても
// 無視されるため、reconcile の結果とは常に一致する
pub fn status_of(
    hoarding_id: HoardingId,
    reservations: &[Reservation],
    today: NaiveDate,
) -> HoardingStatus {
    let mut status = HoardingStatus::vacant(hoarding_id);
    for reservation in reservations {
        if reservation.hoarding_id != hoarding_id || !is_active_on(reservation, today) {
            continue;
        }
        occupy(&mut status, reservation.end_date);
    }
    status
}

// 同一看板に複数の予約が重なっていても「予約中」であることは変わらない。
// booked_until は看板が実際に空く日を指す必要があるため、
// 終了日未定（None）を最優先に、次に最も遅い終了日を採用する
fn occupy(status: &mut HoardingStatus, end_date: Option<NaiveDate>) {
    if status.is_available {
        status.is_available = false;
        status.booked_until = end_date;
        return;
    }
    status.booked_until = match (status.booked_until, end_date) {
        (None, _) | (_, None) => None,
        (Some(current), Some(new)) => Some(current.max(new)),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rsv(hoarding_id: HoardingId, start: NaiveDate, end: Option<NaiveDate>) -> Reservation {
        Reservation {
            hoarding_id,
            start_date: start,
            end_date: end,
        }
    }

    fn ids(ids: &[HoardingId]) -> HashSet<HoardingId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn hoarding_with_no_reservation_stays_available() {
        let id = HoardingId::new();
        let statuses = reconcile(&[], date(2024, 1, 5), &ids(&[id]));

        assert_eq!(
            statuses,
            vec![HoardingStatus {
                hoarding_id: id,
                is_available: true,
                booked_until: None,
            }]
        );
    }

    #[test]
    fn dated_reservation_occupies_only_within_window() {
        let id = HoardingId::new();
        let all = ids(&[id]);
        let reservations = vec![rsv(id, date(2024, 1, 1), Some(date(2024, 1, 10)))];

        let during = reconcile(&reservations, date(2024, 1, 5), &all);
        assert!(!during[0].is_available);
        assert_eq!(during[0].booked_until, Some(date(2024, 1, 10)));

        let after = reconcile(&reservations, date(2024, 1, 11), &all);
        assert!(after[0].is_available);
        assert_eq!(after[0].booked_until, None);

        let before = reconcile(&reservations, date(2023, 12, 31), &all);
        assert!(before[0].is_available);
        assert_eq!(before[0].booked_until, None);
    }

    #[test]
    fn open_ended_reservation_occupies_without_booked_until() {
        let id = HoardingId::new();
        let reservations = vec![rsv(id, date(2024, 1, 1), None)];

        for today in [date(2024, 1, 1), date(2024, 6, 1), date(2030, 12, 31)] {
            let statuses = reconcile(&reservations, today, &ids(&[id]));
            assert!(!statuses[0].is_available, "today = {today}");
            assert_eq!(statuses[0].booked_until, None);
        }
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let id = HoardingId::new();
        let all = ids(&[id]);
        let reservations = vec![rsv(id, date(2024, 1, 1), Some(date(2024, 1, 10)))];

        let on_start = reconcile(&reservations, date(2024, 1, 1), &all);
        assert!(!on_start[0].is_available);

        let on_end = reconcile(&reservations, date(2024, 1, 10), &all);
        assert!(!on_end[0].is_available);

        let day_after_end = reconcile(&reservations, date(2024, 1, 11), &all);
        assert!(day_after_end[0].is_available);
    }

    #[test]
    fn gap_between_reservations_is_available() {
        let id = HoardingId::new();
        let reservations = vec![
            rsv(id, date(2024, 1, 1), Some(date(2024, 1, 5))),
            rsv(id, date(2024, 2, 1), Some(date(2024, 2, 10))),
        ];

        let statuses = reconcile(&reservations, date(2024, 1, 20), &ids(&[id]));
        assert!(statuses[0].is_available);
        assert_eq!(statuses[0].booked_until, None);
    }

    #[test]
    fn overlapping_reservations_keep_latest_end_date() {
        let id = HoardingId::new();
        let all = ids(&[id]);
        let first = rsv(id, date(2024, 1, 1), Some(date(2024, 1, 31)));
        let second = rsv(id, date(2024, 1, 10), Some(date(2024, 2, 15)));

        // 入力順に依存しないこと
        let forward = reconcile(&[first.clone(), second.clone()], date(2024, 1, 15), &all);
        let backward = reconcile(&[second, first], date(2024, 1, 15), &all);

        assert_eq!(forward, backward);
        assert!(!forward[0].is_available);
        assert_eq!(forward[0].booked_until, Some(date(2024, 2, 15)));
    }

    #[test]
    fn open_ended_reservation_wins_over_dated_overlap() {
        let id = HoardingId::new();
        let all = ids(&[id]);
        let dated = rsv(id, date(2024, 1, 1), Some(date(2024, 1, 31)));
        let open_ended = rsv(id, date(2024, 1, 10), None);

        let forward = reconcile(&[dated.clone(), open_ended.clone()], date(2024, 1, 15), &all);
        let backward = reconcile(&[open_ended, dated], date(2024, 1, 15), &all);

        assert_eq!(forward, backward);
        assert!(!forward[0].is_available);
        assert_eq!(forward[0].booked_until, None);
    }

    #[test]
    fn reservation_for_unknown_hoarding_is_ignored() {
        let known = HoardingId::new();
        let unknown = HoardingId::new();
        let reservations = vec![rsv(unknown, date(2024, 1, 1), None)];

        let statuses = reconcile(&reservations, date(2024, 1, 5), &ids(&[known]));
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].hoarding_id, known);
        assert!(statuses[0].is_available);
    }

    #[test]
    fn output_covers_every_hoarding_exactly_once() {
        let a = HoardingId::new();
        let b = HoardingId::new();
        let c = HoardingId::new();
        let all = ids(&[a, b, c]);
        let reservations = vec![rsv(a, date(2024, 3, 1), Some(date(2024, 3, 31)))];

        let statuses = reconcile(&reservations, date(2024, 3, 15), &all);

        assert_eq!(statuses.len(), 3);
        let result_ids: HashSet<HoardingId> =
            statuses.iter().map(|status| status.hoarding_id).collect();
        assert_eq!(result_ids, all);

        for status in &statuses {
            if status.hoarding_id == a {
                assert!(!status.is_available);
                assert_eq!(status.booked_until, Some(date(2024, 3, 31)));
            } else {
                assert!(status.is_available);
                assert_eq!(status.booked_until, None);
            }
        }
    }

    #[test]
    fn reconcile_is_idempotent() {
        let a = HoardingId::new();
        let b = HoardingId::new();
        let all = ids(&[a, b]);
        let today = date(2024, 5, 20);
        let reservations = vec![
            rsv(a, date(2024, 5, 1), Some(date(2024, 5, 31))),
            rsv(a, date(2024, 5, 15), None),
            rsv(b, date(2024, 6, 1), Some(date(2024, 6, 30))),
        ];

        let first = reconcile(&reservations, today, &all);
        let second = reconcile(&reservations, today, &all);
        assert_eq!(first, second);
    }

    #[test]
    fn status_of_matches_full_reconcile() {
        let a = HoardingId::new();
        let b = HoardingId::new();
        let all = ids(&[a, b]);
        let today = date(2024, 4, 10);
        let reservations = vec![
            rsv(a, date(2024, 4, 1), Some(date(2024, 4, 30))),
            rsv(a, date(2024, 4, 5), Some(date(2024, 5, 10))),
            rsv(b, date(2024, 3, 1), Some(date(2024, 3, 31))),
        ];

        let full = reconcile(&reservations, today, &all);
        for hoarding_id in [a, b] {
            let single = status_of(hoarding_id, &reservations, today);
            let from_full = full
                .iter()
                .find(|status| status.hoarding_id == hoarding_id)
                .unwrap();
            assert_eq!(&single, from_full);
        }
    }
}
