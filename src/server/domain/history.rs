use std::collections::HashMap;
use crate::server::model::order::{CartLine, OrderHistoryRecord, OrderRow};

/// Group order rows into receipts keyed by their exact `created_at` epoch millis.
///
/// Receipts come out in the order their first row was seen, not sorted by time.
/// Rows whose timestamps differ by a single millisecond land in different receipts.
pub(crate) fn group_by_created_at(rows: Vec<OrderRow>) -> Vec<OrderHistoryRecord> {
    let mut records: Vec<OrderHistoryRecord> = Vec::new();
    let mut buckets: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let created_at = row.created_at.timestamp_millis();
        let idx = *buckets.entry(created_at).or_insert_with(|| {
            records.push(OrderHistoryRecord {
                id: created_at.to_string(),
                lines: vec![],
                total: 0,
                created_at,
                note: None,
            });
            records.len() - 1
        });
        let line = CartLine::from(row);
        let record = &mut records[idx];
        record.total = record.total.saturating_add(line.subtotal());
        record.lines.push(line);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use crate::server::model::dish::WireDish;

    fn row(id: i64, created_at: &str, qty: i32, price: i64) -> OrderRow {
        OrderRow {
            id,
            dish: WireDish {
                id: id * 10,
                name_en: None,
                name_zh: None,
                name_ko: None,
                name_ja: Some("品".to_string()),
                description_en: None,
                description_zh: None,
                description_ko: None,
                description_ja: None,
                image_path: None,
                price,
            },
            order_qty: qty,
            created_at: created_at.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    const T1: &str = "2024-05-01T12:00:00Z";
    const T2: &str = "2024-05-01T12:30:00Z";

    #[test]
    fn groups_rows_sharing_a_timestamp() {
        let records = group_by_created_at(vec![
            row(1, T1, 1, 100),
            row(2, T1, 2, 50),
            row(3, T2, 1, 300),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].lines.len(), 2);
        assert_eq!(records[0].total, 200);
        assert_eq!(records[0].created_at, 1_714_564_800_000);
        assert_eq!(records[0].id, "1714564800000");
        assert_eq!(records[1].lines.len(), 1);
        assert_eq!(records[1].total, 300);
    }

    #[test]
    fn keeps_first_seen_order() {
        let records = group_by_created_at(vec![
            row(1, T2, 1, 100),
            row(2, T1, 1, 100),
            row(3, T2, 1, 100),
        ]);
        assert_eq!(records.iter().map(|r| r.lines.len()).collect::<Vec<_>>(), vec![2, 1]);
        assert!(records[0].created_at > records[1].created_at);
    }

    #[test]
    fn splits_on_any_precision_difference() {
        let records = group_by_created_at(vec![
            row(1, "2024-05-01T12:00:00.000Z", 1, 100),
            row(2, "2024-05-01T12:00:00.001Z", 1, 100),
        ]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(group_by_created_at(vec![]).is_empty());
    }
}
