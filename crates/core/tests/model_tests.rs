// ═══════════════════════════════════════════════════════════════════
// Model Tests — GoldEntry, GoldData, PortfolioStats, PriceQuote
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use gold_tracker_core::models::entry::{EntryInput, GoldEntry};
use gold_tracker_core::models::quote::PriceQuote;
use gold_tracker_core::models::snapshot::{
    GoldData, PriceHistoryPoint, DEFAULT_GOLD_PRICE, PRICE_HISTORY_CAP,
};
use gold_tracker_core::models::stats::{PortfolioStats, COIN_GRAMS, TARGET_COINS};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn ts(y: i32, m: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, day, 12, 0, 0).unwrap()
}

fn input(date: NaiveDate, price: f64, extra: f64, grams: f64) -> EntryInput {
    EntryInput {
        date,
        price_per_gram: price,
        extra_charges_per_gram: extra,
        total_grams: grams,
        notes: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  GoldEntry
// ═══════════════════════════════════════════════════════════════════

mod gold_entry {
    use super::*;

    #[test]
    fn derives_effective_price_and_investment() {
        let entry = GoldEntry::from_input(
            Uuid::new_v4(),
            input(d(2024, 1, 1), 6000.0, 200.0, 8.0),
        );
        assert_eq!(entry.effective_price_per_gram, 6200.0);
        assert_eq!(entry.total_investment, 49_600.0);
    }

    #[test]
    fn zero_extra_charges_keep_base_price() {
        let entry = GoldEntry::from_input(
            Uuid::new_v4(),
            input(d(2024, 3, 15), 7000.0, 0.0, 2.5),
        );
        assert_eq!(entry.effective_price_per_gram, 7000.0);
        assert_eq!(entry.total_investment, 17_500.0);
    }

    #[test]
    fn id_is_preserved() {
        let id = Uuid::new_v4();
        let entry = GoldEntry::from_input(id, input(d(2024, 1, 1), 6000.0, 200.0, 8.0));
        assert_eq!(entry.id, id);
    }

    #[test]
    fn notes_carry_through() {
        let mut i = input(d(2024, 1, 1), 6000.0, 200.0, 8.0);
        i.notes = Some("22k coins".to_string());
        let entry = GoldEntry::from_input(Uuid::new_v4(), i);
        assert_eq!(entry.notes.as_deref(), Some("22k coins"));
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let entry = GoldEntry::from_input(Uuid::new_v4(), input(d(2024, 1, 1), 6000.0, 200.0, 8.0));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"pricePerGram\""));
        assert!(json.contains("\"extraChargesPerGram\""));
        assert!(json.contains("\"effectivePricePerGram\""));
        assert!(json.contains("\"totalGrams\""));
        assert!(json.contains("\"totalInvestment\""));
    }

    #[test]
    fn serde_roundtrip() {
        let entry = GoldEntry::from_input(Uuid::new_v4(), input(d(2024, 1, 1), 6000.0, 200.0, 8.0));
        let json = serde_json::to_string(&entry).unwrap();
        let back: GoldEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn deserializes_legacy_shape_without_notes() {
        let json = format!(
            r#"{{"id":"{}","date":"2024-01-01","pricePerGram":6000,"extraChargesPerGram":200,
                "effectivePricePerGram":6200,"totalGrams":8,"totalInvestment":49600}}"#,
            Uuid::new_v4()
        );
        let entry: GoldEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry.notes, None);
        assert_eq!(entry.total_investment, 49_600.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  GoldData
// ═══════════════════════════════════════════════════════════════════

mod gold_data {
    use super::*;

    #[test]
    fn defaults_use_fallback_price() {
        let now = ts(2024, 6, 1);
        let data = GoldData::with_defaults(now);
        assert!(data.entries.is_empty());
        assert_eq!(data.current_gold_price, DEFAULT_GOLD_PRICE);
        assert_eq!(data.last_updated, now);
        assert!(data.price_history.is_empty());
    }

    #[test]
    fn entries_by_date_desc_does_not_reorder_storage() {
        let mut data = GoldData::with_defaults(ts(2024, 6, 1));
        let older = GoldEntry::from_input(Uuid::new_v4(), input(d(2024, 1, 1), 6000.0, 0.0, 1.0));
        let newer = GoldEntry::from_input(Uuid::new_v4(), input(d(2024, 5, 1), 7000.0, 0.0, 1.0));
        data.entries.push(older.clone());
        data.entries.push(newer.clone());

        let sorted = data.entries_by_date_desc();
        assert_eq!(sorted[0].id, newer.id);
        assert_eq!(sorted[1].id, older.id);
        // insertion order untouched
        assert_eq!(data.entries[0].id, older.id);
    }

    #[test]
    fn find_entry_by_id() {
        let mut data = GoldData::with_defaults(ts(2024, 6, 1));
        let entry = GoldEntry::from_input(Uuid::new_v4(), input(d(2024, 1, 1), 6000.0, 0.0, 1.0));
        data.entries.push(entry.clone());
        assert_eq!(data.find_entry(entry.id), Some(&entry));
        assert_eq!(data.find_entry(Uuid::new_v4()), None);
    }

    #[test]
    fn push_history_appends() {
        let mut data = GoldData::with_defaults(ts(2024, 6, 1));
        data.push_history(9000.0, ts(2024, 6, 1));
        data.push_history(9100.0, ts(2024, 6, 2));
        assert_eq!(data.price_history.len(), 2);
        assert_eq!(data.price_history[0].price, 9000.0);
        assert_eq!(data.price_history[1].price, 9100.0);
    }

    #[test]
    fn push_history_replaces_same_day_point() {
        let mut data = GoldData::with_defaults(ts(2024, 6, 1));
        data.push_history(9000.0, ts(2024, 6, 1));
        data.push_history(9050.0, Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap());
        assert_eq!(data.price_history.len(), 1);
        assert_eq!(data.price_history[0].price, 9050.0);
    }

    #[test]
    fn push_history_caps_at_one_year() {
        let mut data = GoldData::with_defaults(ts(2020, 1, 1));
        let start = d(2020, 1, 1);
        for i in 0..(PRICE_HISTORY_CAP as i64 + 10) {
            let day = start + chrono::Duration::days(i);
            let now = Utc
                .with_ymd_and_hms(2020, 1, 1, 12, 0, 0)
                .unwrap()
                + chrono::Duration::days(i);
            assert_eq!(now.date_naive(), day);
            data.push_history(9000.0 + i as f64, now);
        }
        assert_eq!(data.price_history.len(), PRICE_HISTORY_CAP);
        // the oldest points were dropped
        assert_eq!(data.price_history.first().unwrap().date, start + chrono::Duration::days(10));
    }

    #[test]
    fn serde_roundtrip_with_history() {
        let mut data = GoldData::with_defaults(ts(2024, 6, 1));
        data.entries.push(GoldEntry::from_input(
            Uuid::new_v4(),
            input(d(2024, 1, 1), 6000.0, 200.0, 8.0),
        ));
        data.push_history(9065.0, ts(2024, 6, 1));
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"currentGoldPrice\""));
        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"priceHistory\""));
        let back: GoldData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, back);
    }

    #[test]
    fn price_history_defaults_to_empty_when_absent() {
        let json = r#"{"entries":[],"currentGoldPrice":6500.0,"lastUpdated":"2024-06-01T12:00:00Z"}"#;
        let data: GoldData = serde_json::from_str(json).unwrap();
        assert!(data.price_history.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PortfolioStats — coin progress
// ═══════════════════════════════════════════════════════════════════

mod portfolio_stats {
    use super::*;

    fn stats(total_grams: f64) -> PortfolioStats {
        PortfolioStats {
            total_grams,
            total_investment: 0.0,
            current_value: 0.0,
            profit_loss: 0.0,
            profit_loss_percentage: 0.0,
        }
    }

    #[test]
    fn owned_coins_floors_partial_coins() {
        assert_eq!(stats(0.0).owned_coins(), 0);
        assert_eq!(stats(7.9).owned_coins(), 0);
        assert_eq!(stats(8.0).owned_coins(), 1);
        assert_eq!(stats(23.5).owned_coins(), 2);
    }

    #[test]
    fn coins_to_target() {
        assert_eq!(stats(0.0).coins_to_target(), TARGET_COINS);
        assert_eq!(stats(16.0).coins_to_target(), TARGET_COINS - 2);
    }

    #[test]
    fn coins_to_target_saturates_past_target() {
        let total = (TARGET_COINS as f64 + 5.0) * COIN_GRAMS;
        assert_eq!(stats(total).coins_to_target(), 0);
        assert_eq!(stats(total).grams_to_target(), 0.0);
    }

    #[test]
    fn grams_to_target() {
        let s = stats(24.0);
        assert_eq!(s.grams_to_target(), TARGET_COINS as f64 * COIN_GRAMS - 24.0);
    }

    #[test]
    fn amount_needed_at_price() {
        let s = stats(8.0 * 99.0); // one coin to go
        assert_eq!(s.amount_needed(6500.0), 8.0 * 6500.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceQuote / PriceHistoryPoint
// ═══════════════════════════════════════════════════════════════════

mod quote {
    use super::*;

    #[test]
    fn serde_matches_price_endpoint_shape() {
        let quote = PriceQuote {
            price: 9065.0,
            karat: "22K".to_string(),
            currency: "INR".to_string(),
            unit: "gram".to_string(),
            city: "Coimbatore".to_string(),
            timestamp: ts(2024, 6, 1),
            source: "bankbazaar.com".to_string(),
        };
        let json = serde_json::to_string(&quote).unwrap();
        for key in ["price", "karat", "currency", "unit", "city", "timestamp", "source"] {
            assert!(json.contains(&format!("\"{key}\"")), "missing key {key}");
        }
        let back: PriceQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(quote, back);
    }

    #[test]
    fn history_point_roundtrip() {
        let point = PriceHistoryPoint {
            date: d(2024, 6, 1),
            price: 9065.0,
            timestamp: ts(2024, 6, 1),
        };
        let json = serde_json::to_string(&point).unwrap();
        let back: PriceHistoryPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(point, back);
    }
}
