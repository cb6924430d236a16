//! Random attribute record sampler
//!
//! Vocabularies and weights for synthetic accident situations.
//! Every categorical value produced here must have a risk table entry.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::logic::risk::AttributeRecord;

// ============================================================================
// VOCABULARIES
// ============================================================================

pub const STATES_CITIES: &[(&str, [&str; 5])] = &[
    ("Maharashtra", ["Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad"]),
    ("Uttar Pradesh", ["Lucknow", "Kanpur", "Varanasi", "Agra", "Noida"]),
    ("Tamil Nadu", ["Chennai", "Coimbatore", "Madurai", "Salem", "Trichy"]),
    ("Karnataka", ["Bangalore", "Mysore", "Hubli", "Mangalore", "Belgaum"]),
    ("Rajasthan", ["Jaipur", "Jodhpur", "Udaipur", "Ajmer", "Kota"]),
    ("Gujarat", ["Ahmedabad", "Surat", "Vadodara", "Rajkot", "Gandhinagar"]),
    ("West Bengal", ["Kolkata", "Howrah", "Durgapur", "Siliguri", "Asansol"]),
    ("Telangana", ["Hyderabad", "Warangal", "Nizamabad", "Karimnagar", "Khammam"]),
    ("Madhya Pradesh", ["Bhopal", "Indore", "Jabalpur", "Gwalior", "Ujjain"]),
    ("Kerala", ["Kochi", "Thiruvananthapuram", "Kozhikode", "Thrissur", "Kollam"]),
    ("Bihar", ["Patna", "Gaya", "Muzaffarpur", "Bhagalpur", "Darbhanga"]),
    ("Andhra Pradesh", ["Visakhapatnam", "Vijayawada", "Tirupati", "Guntur", "Nellore"]),
    ("Punjab", ["Ludhiana", "Amritsar", "Jalandhar", "Patiala", "Bathinda"]),
    ("Haryana", ["Gurugram", "Faridabad", "Ambala", "Hisar", "Karnal"]),
    ("Chhattisgarh", ["Raipur", "Bhilai", "Bilaspur", "Korba", "Durg"]),
    ("Jharkhand", ["Ranchi", "Jamshedpur", "Dhanbad", "Bokaro", "Deoghar"]),
    ("Assam", ["Guwahati", "Silchar", "Dibrugarh", "Jorhat", "Tezpur"]),
    ("Odisha", ["Bhubaneswar", "Cuttack", "Rourkela", "Sambalpur", "Puri"]),
    ("Delhi", ["New Delhi", "Dwarka", "Rohini", "Saket", "Connaught Place"]),
    ("Himachal Pradesh", ["Shimla", "Manali", "Dharamsala", "Kullu", "Solan"]),
    ("Jammu and Kashmir", ["Srinagar", "Jammu", "Anantnag", "Baramulla", "Sopore"]),
    ("Uttarakhand", ["Dehradun", "Haridwar", "Rishikesh", "Nainital", "Haldwani"]),
    ("Goa", ["Panaji", "Margao", "Vasco", "Mapusa", "Ponda"]),
];

pub const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const DAYS: &[&str] = &[
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

pub const VEHICLE_TYPES: &[&str] = &[
    "Car", "Two-Wheeler", "Truck", "Bus", "Auto-Rickshaw", "Cycle", "Pedestrian",
];

pub const ROAD_TYPES: &[&str] = &[
    "National Highway", "State Highway", "Urban Road", "Village Road", "Expressway",
];

pub const TRAFFIC_CONTROL: &[&str] = &["Signs", "Signals", "Police Checkpost", "None"];

pub const GENDERS: &[&str] = &["Male", "Female"];

pub const LOCATION_DETAILS: &[&str] = &[
    "Straight Road", "Curve", "Intersection", "Bridge", "Flyover", "T-Junction",
];

// Weighted vocabularies: (value, weight)

pub const VEHICLE_COUNTS: &[(i64, u32)] = &[(1, 30), (2, 30), (3, 20), (4, 12), (5, 8)];

pub const WEATHER: &[(&str, u32)] = &[
    ("Clear", 30),
    ("Rainy", 18),
    ("Foggy", 16),
    ("Hazy", 16),
    ("Stormy", 12),
    ("Cloudy", 8),
];

pub const ROAD_CONDITIONS: &[(&str, u32)] = &[
    ("Dry", 40),
    ("Wet", 30),
    ("Damaged", 15),
    ("Under Construction", 15),
];

pub const LIGHTING: &[(&str, u32)] = &[("Daylight", 40), ("Dark", 25), ("Dusk", 18), ("Dawn", 17)];

pub const LICENSE_STATUS: &[(&str, u32)] = &[("Valid", 50), ("Expired", 25), ("None", 25)];

pub const ALCOHOL: &[(&str, u32)] = &[("Yes", 30), ("No", 70)];

// Numeric ranges (inclusive)

pub const YEAR_RANGE: (i64, i64) = (2018, 2024);
pub const SPEED_RANGE: (i64, i64) = (20, 130);
pub const AGE_RANGE: (i64, i64) = (18, 70);

// ============================================================================
// SAMPLING
// ============================================================================

/// Draw one random accident situation
pub fn sample_record<R: Rng + ?Sized>(rng: &mut R) -> AttributeRecord {
    let (state, cities) = pick(rng, STATES_CITIES);
    let city = pick(rng, cities);
    let hour: u32 = rng.gen_range(0..=23);
    let minute: u32 = rng.gen_range(0..=59);

    AttributeRecord {
        state_name: state.to_string(),
        city_name: city.to_string(),
        year: rng.gen_range(YEAR_RANGE.0..=YEAR_RANGE.1),
        month: pick(rng, MONTHS).to_string(),
        day_of_week: pick(rng, DAYS).to_string(),
        time_of_day: format!("{}:{:02}", hour, minute),
        num_vehicles: *weighted(rng, VEHICLE_COUNTS),
        vehicle_type: pick(rng, VEHICLE_TYPES).to_string(),
        weather: weighted(rng, WEATHER).to_string(),
        road_type: pick(rng, ROAD_TYPES).to_string(),
        road_condition: weighted(rng, ROAD_CONDITIONS).to_string(),
        lighting: weighted(rng, LIGHTING).to_string(),
        traffic_control: pick(rng, TRAFFIC_CONTROL).to_string(),
        speed_limit: rng.gen_range(SPEED_RANGE.0..=SPEED_RANGE.1),
        driver_age: rng.gen_range(AGE_RANGE.0..=AGE_RANGE.1),
        driver_gender: pick(rng, GENDERS).to_string(),
        license_status: weighted(rng, LICENSE_STATUS).to_string(),
        alcohol: weighted(rng, ALCOHOL).to_string(),
        location_detail: pick(rng, LOCATION_DETAILS).to_string(),
    }
}

/// Uniform choice; vocabularies are non-empty constants
fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    match items.choose(rng) {
        Some(item) => item,
        None => &items[0],
    }
}

/// Weighted choice by cumulative weight
fn weighted<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [(T, u32)]) -> &'a T {
    let total: u32 = items.iter().map(|(_, w)| *w).sum();
    let mut roll = rng.gen_range(0..total);
    for (item, weight) in items {
        if roll < *weight {
            return item;
        }
        roll -= *weight;
    }
    &items[items.len() - 1].0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::RiskTables;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_generated_category_has_risk_entry() {
        let tables = RiskTables::standard();
        for (value, _) in WEATHER {
            assert!(tables.weather.contains(value), "weather {}", value);
        }
        for (value, _) in ROAD_CONDITIONS {
            assert!(tables.road_condition.contains(value), "road condition {}", value);
        }
        for (value, _) in LIGHTING {
            assert!(tables.lighting.contains(value), "lighting {}", value);
        }
        for value in ROAD_TYPES {
            assert!(tables.road_type.contains(value), "road type {}", value);
        }
        for value in VEHICLE_TYPES {
            assert!(tables.vehicle.contains(value), "vehicle {}", value);
        }
        for value in LOCATION_DETAILS {
            assert!(tables.location.contains(value), "location {}", value);
        }
        for (value, _) in LICENSE_STATUS {
            assert!(tables.license.contains(value), "license {}", value);
        }
    }

    #[test]
    fn test_sampled_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let record = sample_record(&mut rng);
            assert!((20..=130).contains(&record.speed_limit));
            assert!((18..=70).contains(&record.driver_age));
            assert!((1..=5).contains(&record.num_vehicles));
            assert!((2018..=2024).contains(&record.year));

            let state = STATES_CITIES
                .iter()
                .find(|(s, _)| *s == record.state_name)
                .expect("state from vocabulary");
            assert!(state.1.contains(&record.city_name.as_str()));
        }
    }

    #[test]
    fn test_time_format_round_trips() {
        use crate::logic::features::TimeOfDay;

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let record = sample_record(&mut rng);
            let (h, m) = record.time_of_day.split_once(':').expect("H:MM");
            assert_eq!(m.len(), 2);
            let parsed = TimeOfDay::parse(&record.time_of_day);
            assert_eq!(parsed.hour, h.parse::<u32>().unwrap());
            assert_eq!(parsed.minute, m.parse::<u32>().unwrap());
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(sample_record(&mut a), sample_record(&mut b));
        }
    }

    #[test]
    fn test_weighted_respects_zero_weight() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = [("never", 0u32), ("always", 5u32)];
        for _ in 0..100 {
            assert_eq!(*weighted(&mut rng, &items), "always");
        }
    }
}
