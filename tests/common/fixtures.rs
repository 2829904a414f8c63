//! Static dataset corpora used across harnesses.
//!
//! The corpora mimic the scraped OYO export: upper-case column names, prices
//! with a rupee sign and thousands separators, and amenities either as a
//! list or as Python-style list text. `SAMPLE_ROWS` holds eight listings of
//! which four normalize cleanly:
//!
//! | Listing | Outcome |
//! |---------|---------|
//! | Hotel Sunshine | kept (Bangalore) |
//! | OYO 101 Lake View | kept (Kolkata) |
//! | Capital O Palm Residency | kept (Chennai) |
//! | Hotel Blue Moon | rejected: rating `"NEW"` |
//! | Silver Key Rooms | rejected: no final price |
//! | Townhouse 212 | kept (Bangalore), no category |
//! | *(blank name)* | rejected: name |
//! | Stay Inn | rejected: address has no city |

use std::path::{Path, PathBuf};

pub const SAMPLE_ROWS: &str = r#"[
  {"NAME": "Hotel Sunshine", "RATING": "4.4", "RATED BY": "(1.2k ratings)",
   "BASE_COST": "₹2,499", "FINAL_COST": "₹1,099", "ROOM SIZE": "120 sq ft",
   "ADDRESS": "12 MG Road, Indiranagar, Bangalore",
   "AMENITYS": "['Free Wifi', 'AC', 'TV']", "CATEGORY": "Townhouse"},
  {"NAME": "OYO 101 Lake View", "RATING": "3.9 stars", "RATED BY": "345 ratings",
   "BASE_COST": "₹1,800", "FINAL_COST": "₹900", "ROOM SIZE": "20 sqm",
   "ADDRESS": "Sector 5, Salt Lake, Kolkata",
   "AMENITYS": "WiFi | Geyser", "CATEGORY": "Collection O"},
  {"NAME": "Capital O Palm Residency", "RATING": 4.8, "RATED BY": null,
   "BASE_COST": "₹3,200", "FINAL_COST": "₹2,240",
   "ADDRESS": "Anna Salai, Chennai",
   "AMENITYS": ["WiFi", "Power backup"], "CATEGORY": "Capital O"},
  {"NAME": "Hotel Blue Moon", "RATING": "NEW",
   "BASE_COST": "₹1,400", "FINAL_COST": "₹700",
   "ADDRESS": "Koramangala, Bangalore"},
  {"NAME": "Silver Key Rooms", "RATING": "4.1",
   "BASE_COST": "₹1,000",
   "ADDRESS": "Banjara Hills, Hyderabad"},
  {"NAME": "Townhouse 212", "RATING": "3.5",
   "BASE_COST": "₹1,500", "FINAL_COST": "₹1,200",
   "ADDRESS": "HSR Layout, Bangalore"},
  {"NAME": "  ", "RATING": "4.2",
   "BASE_COST": "₹1,100", "FINAL_COST": "₹950",
   "ADDRESS": "Baner, Pune"},
  {"NAME": "Stay Inn", "RATING": "4.0",
   "BASE_COST": "₹999", "FINAL_COST": "₹799",
   "ADDRESS": "12, 560001"}
]"#;

/// Two listings in the column-oriented layout (`{column: {row: value}}`),
/// with row keys deliberately out of order.
pub const SAMPLE_COLUMNAR: &str = r#"{
  "NAME":       {"1": "OYO 101 Lake View", "0": "Hotel Sunshine"},
  "RATING":     {"1": "3.9", "0": "4.4"},
  "BASE_COST":  {"1": "₹1,800", "0": "₹2,499"},
  "FINAL_COST": {"1": "₹900", "0": "₹1,099"},
  "ADDRESS":    {"1": "Salt Lake, Kolkata", "0": "Indiranagar, Bangalore"}
}"#;

/// Three listings as JSON Lines, one of them missing its rating.
pub const SAMPLE_JSONL: &str = r#"{"NAME": "Hotel Sunshine", "RATING": "4.4", "BASE_COST": "₹2,499", "FINAL_COST": "₹1,099", "ADDRESS": "Indiranagar, Bangalore"}
{"NAME": "OYO 101 Lake View", "BASE_COST": "₹1,800", "FINAL_COST": "₹900", "ADDRESS": "Salt Lake, Kolkata"}

{"NAME": "Townhouse 212", "RATING": "3.5", "BASE_COST": "₹1,500", "FINAL_COST": "₹1,200", "ADDRESS": "HSR Layout, Bangalore"}
"#;

/// Generate `n` synthetic listings as a JSON array for throughput testing.
/// Every fifth listing carries an unparseable rating.
pub fn synthetic_rows(n: usize) -> String {
    const CITIES: [&str; 5] = ["Bangalore", "Chennai", "Kolkata", "Pune", "New Delhi"];
    let rows: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            let rating = if i % 5 == 4 {
                "NEW".to_string()
            } else {
                format!("{}.{} stars", 2 + i % 3, i % 10)
            };
            let base = 1_000 + (i * 37) % 4_000;
            let category = if i % 2 == 0 { "Townhouse" } else { "Collection O" };
            serde_json::json!({
                "NAME": format!("Hotel {i}"),
                "RATING": rating,
                "RATED BY": format!("({} ratings)", i * 3),
                "BASE_COST": format!("₹{},{:03}", base / 1000, base % 1000),
                "FINAL_COST": format!("₹{}", base * 3 / 4),
                "ROOM SIZE": format!("{} sq ft", 100 + i % 80),
                "ADDRESS": format!("Block {}, Main Road, {}", i % 9, CITIES[i % CITIES.len()]),
                "AMENITYS": "WiFi, AC | TV; Geyser",
                "CATEGORY": category,
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_dataset(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write dataset fixture");
    path
}
