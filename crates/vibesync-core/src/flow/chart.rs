//! Calendar-relative bucketing of flow records.
//!
//! Pure over `(history, now, view)`: `now` is supplied by the caller so
//! charts are deterministic and testable. Buckets are half-open
//! `[start, end)` intervals -- a record exactly on a boundary belongs to
//! the bucket it opens.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use super::{total_score, FlowRecord};

/// Which calendar window to bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    /// Six 4-hour buckets of the current local day.
    Today,
    /// Seven day buckets of the current local week (Sunday start),
    /// rotated so today is the last bar.
    Week,
}

/// One labelled chart bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: i64,
}

/// Bucketed view of the flow history plus the all-time total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowChart {
    pub bars: Vec<Bar>,
    /// Sum over the entire history, not just the charted window.
    pub total_score: i64,
}

impl FlowChart {
    /// True when every bucket is zero. Callers render a distinct
    /// "no activity" state instead of an all-zero chart.
    pub fn is_empty(&self) -> bool {
        self.bars.iter().all(|b| b.value == 0)
    }
}

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Bucket `history` into the chosen calendar window relative to `now`.
pub fn flow_chart(history: &[FlowRecord], now: DateTime<Local>, view: ChartView) -> FlowChart {
    let bars = match view {
        ChartView::Today => today_bars(history, now),
        ChartView::Week => week_bars(history, now),
    };
    FlowChart {
        bars,
        total_score: total_score(history),
    }
}

/// Local midnight of `date`. Falls back to the UTC reading of that
/// midnight if the local zone skips it (DST gap).
fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| midnight.and_utc().with_timezone(&Local))
}

fn today_bars(history: &[FlowRecord], now: DateTime<Local>) -> Vec<Bar> {
    let start_ms = local_midnight(now.date_naive()).timestamp_millis();
    let mut buckets = [0i64; 6];
    for record in history {
        if record.timestamp_ms < start_ms {
            continue;
        }
        let Some(at) = Local.timestamp_millis_opt(record.timestamp_ms).single() else {
            continue;
        };
        // Hour-of-day chunked into [0,4), [4,8), ... [20,24).
        let slot = (at.hour() / 4) as usize;
        if let Some(bucket) = buckets.get_mut(slot) {
            *bucket += record.score;
        }
    }
    buckets
        .iter()
        .enumerate()
        .map(|(i, &value)| Bar {
            label: format!("{}h", i * 4),
            value,
        })
        .collect()
}

fn week_bars(history: &[FlowRecord], now: DateTime<Local>) -> Vec<Bar> {
    let today_index = now.weekday().num_days_from_sunday() as usize;
    let sunday = now
        .date_naive()
        .checked_sub_days(Days::new(today_index as u64))
        .unwrap_or_else(|| now.date_naive());
    let start_ms = local_midnight(sunday).timestamp_millis();

    let mut buckets = [0i64; 7];
    for record in history {
        if record.timestamp_ms < start_ms {
            continue;
        }
        let Some(at) = Local.timestamp_millis_opt(record.timestamp_ms).single() else {
            continue;
        };
        buckets[at.weekday().num_days_from_sunday() as usize] += record.score;
    }

    // Rotate so the sequence starts the day after today and ends on
    // today -- labels and values rotate together.
    (0..7)
        .map(|i| {
            let day = (today_index + 1 + i) % 7;
            Bar {
                label: DAY_LABELS[day].to_string(),
                value: buckets[day],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("unambiguous local time")
    }

    fn record(at: DateTime<Local>, score: i64) -> FlowRecord {
        FlowRecord {
            timestamp_ms: at.timestamp_millis(),
            score,
        }
    }

    #[test]
    fn today_buckets_by_four_hour_chunk() {
        // 2024-06-12 is a Wednesday.
        let now = local(2024, 6, 12, 15, 30);
        let history = [
            record(local(2024, 6, 12, 9, 0), 25),  // [8,12)
            record(local(2024, 6, 12, 14, 0), 25), // [12,16)
        ];
        let chart = flow_chart(&history, now, ChartView::Today);
        let values: Vec<i64> = chart.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![0, 0, 25, 25, 0, 0]);
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["0h", "4h", "8h", "12h", "16h", "20h"]);
        assert_eq!(chart.total_score, 50);
    }

    #[test]
    fn today_excludes_earlier_days() {
        let now = local(2024, 6, 12, 10, 0);
        let history = [
            record(local(2024, 6, 11, 9, 0), 25),
            record(local(2024, 6, 12, 9, 0), 25),
        ];
        let chart = flow_chart(&history, now, ChartView::Today);
        let values: Vec<i64> = chart.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![0, 0, 25, 0, 0, 0]);
        // Total is all-time, independent of the window.
        assert_eq!(chart.total_score, 50);
    }

    #[test]
    fn boundary_record_opens_its_bucket() {
        let now = local(2024, 6, 12, 23, 0);
        let history = [record(local(2024, 6, 12, 8, 0), 25)];
        let chart = flow_chart(&history, now, ChartView::Today);
        assert_eq!(chart.bars[2].value, 25); // 8:00 lands in [8,12), not [4,8)
        assert_eq!(chart.bars[1].value, 0);
    }

    #[test]
    fn week_ends_on_today() {
        // Wednesday: order must be Thu Fri Sat Sun Mon Tue Wed.
        let now = local(2024, 6, 12, 12, 0);
        let chart = flow_chart(&[], now, ChartView::Week);
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"]);
    }

    #[test]
    fn week_buckets_by_day_and_rotates_values_with_labels() {
        let now = local(2024, 6, 12, 12, 0); // Wednesday
        let history = [
            record(local(2024, 6, 9, 10, 0), 25),  // Sunday (this week)
            record(local(2024, 6, 12, 9, 0), 50),  // Wednesday (today)
        ];
        let chart = flow_chart(&history, now, ChartView::Week);
        let sunday = chart.bars.iter().find(|b| b.label == "Sun").unwrap();
        assert_eq!(sunday.value, 25);
        let last = chart.bars.last().unwrap();
        assert_eq!(last.label, "Wed");
        assert_eq!(last.value, 50);
    }

    #[test]
    fn week_excludes_previous_weeks() {
        let now = local(2024, 6, 12, 12, 0); // Wednesday, week starts Sun 9th
        let history = [
            record(local(2024, 6, 8, 10, 0), 25), // Saturday last week
            record(local(2024, 6, 5, 10, 0), 25), // Wednesday last week
        ];
        let chart = flow_chart(&history, now, ChartView::Week);
        assert!(chart.is_empty());
        assert_eq!(chart.total_score, 50);
    }

    #[test]
    fn empty_history_is_detectably_empty() {
        let now = local(2024, 6, 12, 12, 0);
        assert!(flow_chart(&[], now, ChartView::Today).is_empty());
        assert!(flow_chart(&[], now, ChartView::Week).is_empty());

        let history = [record(local(2024, 6, 12, 9, 0), 25)];
        assert!(!flow_chart(&history, now, ChartView::Today).is_empty());
    }

    #[test]
    fn sunday_week_is_not_rotated() {
        // On a Sunday the week view runs Mon..Sun with today (Sun) last.
        let now = local(2024, 6, 9, 12, 0);
        let chart = flow_chart(&[], now, ChartView::Week);
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }
}
