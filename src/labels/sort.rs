//! Symbol placement precedence.
//!
//! Sort keys only order simultaneously visible symbols for decluttering.
//! They never decide visibility.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;

/// Rank assumed when a feature has none
pub const DEFAULT_SORT_RANK: f64 = 10.0;

/// Priority of classes missing from [`LANDMARK_PRIORITIES`]
pub const DEFAULT_CLASS_PRIORITY: f64 = 5.0;

/// Ceiling for the descending POI rank key
pub const POI_RANK_CEILING: f64 = 200.0;

/// Landmark class priorities, lower is placed first
pub static LANDMARK_PRIORITIES: Lazy<FxHashMap<&'static str, f64>> = Lazy::new(|| {
    let tiers: [(f64, &[&str]); 6] = [
        (1.0, &["airport", "aerodrome"]),
        (2.0, &["ferry_terminal", "bus_station", "hospital"]),
        (3.0, &["clinic", "embassy", "town_hall"]),
        (4.0, &["museum", "stadium", "university", "college"]),
        (
            5.0,
            &[
                "art_gallery",
                "theme_park",
                "attraction",
                "zoo",
                "aquarium",
                "sports_centre",
                "school",
                "library",
            ],
        ),
        (6.0, &["hotel", "resort", "mall", "marketplace"]),
    ];
    tiers
        .iter()
        .flat_map(|(priority, classes)| classes.iter().map(move |class| (*class, *priority)))
        .collect()
});

pub fn class_priority(class: Option<&str>) -> f64 {
    class
        .and_then(|c| LANDMARK_PRIORITIES.get(c).copied())
        .unwrap_or(DEFAULT_CLASS_PRIORITY)
}

/// `rank + class_priority(class)`, lower is placed first
pub fn symbol_sort_key(rank: Option<f64>, class: Option<&str>) -> f64 {
    rank.filter(|r| r.is_finite()).unwrap_or(DEFAULT_SORT_RANK) + class_priority(class)
}

/// Flips an ascending key for renderers that place higher keys first
pub fn descending(value: f64, ceiling: f64) -> f64 {
    ceiling - value
}

/// `200 - rank`, so rank 1 outranks rank 30; unranked POIs sort last
pub fn poi_rank_sort_key(rank: Option<f64>) -> f64 {
    descending(
        rank.filter(|r| r.is_finite()).unwrap_or(POI_RANK_CEILING),
        POI_RANK_CEILING,
    )
}

/// Rivers above canals above streams above everything else
pub fn waterway_sort_key(class: Option<&str>) -> f64 {
    match class {
        Some("river") => 1.0,
        Some("canal") => 2.0,
        Some("stream") => 3.0,
        _ => 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_priorities() {
        assert_eq!(class_priority(Some("airport")), 1.0);
        assert_eq!(class_priority(Some("hospital")), 2.0);
        assert_eq!(class_priority(Some("museum")), 4.0);
        assert_eq!(class_priority(Some("hotel")), 6.0);
        assert_eq!(class_priority(Some("bench")), DEFAULT_CLASS_PRIORITY);
        assert_eq!(class_priority(None), DEFAULT_CLASS_PRIORITY);
    }

    #[test]
    fn test_sort_key_is_deterministic() {
        let a = symbol_sort_key(Some(3.0), Some("stadium"));
        let b = symbol_sort_key(Some(3.0), Some("stadium"));
        assert_eq!(a, b);
        assert_eq!(a, 7.0);
        assert_eq!(symbol_sort_key(None, None), 15.0);
    }

    #[test]
    fn test_sort_key_monotonic_in_rank() {
        let mut previous = f64::NEG_INFINITY;
        for rank in 0..30 {
            let key = symbol_sort_key(Some(rank as f64), Some("zoo"));
            assert!(key > previous);
            previous = key;
        }
    }

    #[test]
    fn test_descending_poi_key() {
        assert_eq!(poi_rank_sort_key(Some(1.0)), 199.0);
        assert_eq!(poi_rank_sort_key(Some(30.0)), 170.0);
        assert_eq!(poi_rank_sort_key(None), 0.0);
        assert!(poi_rank_sort_key(Some(1.0)) > poi_rank_sort_key(Some(2.0)));
    }

    #[test]
    fn test_waterway_keys() {
        assert!(waterway_sort_key(Some("river")) < waterway_sort_key(Some("canal")));
        assert!(waterway_sort_key(Some("canal")) < waterway_sort_key(Some("stream")));
        assert_eq!(waterway_sort_key(Some("ditch")), 4.0);
        assert_eq!(waterway_sort_key(None), 4.0);
    }
}
