//! Clustering policy.
//!
//! The tile and API servers aggregate nearby trees into clusters. The radius
//! they cluster with depends on the zoom level and is a hand-tuned table; the
//! same table drives every request the controller issues.

/// Counts above this render as thousands and use the large marker variant.
pub const LARGE_CLUSTER_THRESHOLD: u64 = 1000;

/// Reference zoom level for the initial summary request.
pub const SUMMARY_ZOOM_LEVEL: u8 = 10;

/// Returns the clustering radius (in degrees) for a zoom level.
///
/// Integer zooms 1 through 16 map to a fixed, decreasing radius. Zooms 17-19
/// render individual trees (radius 0). Anything else, including fractional
/// zooms, also yields 0.
pub fn cluster_radius(zoom: f64) -> f64 {
    if zoom.fract() != 0.0 {
        return 0.0;
    }

    match zoom as i64 {
        1 => 10.0,
        2 => 8.0,
        3 => 6.0,
        4 => 4.0,
        5 => 0.8,
        6 => 0.75,
        7 => 0.3,
        8 => 0.099,
        9 => 0.095,
        10 => 0.05,
        11 => 0.03,
        12 => 0.02,
        13 => 0.008,
        14 => 0.005,
        15 => 0.004,
        16 => 0.003,
        17..=19 => 0.0,
        _ => 0.0,
    }
}

/// Formats a cluster count for the highlight label.
///
/// Counts above 1000 are shown rounded to thousands (`1500` → `"2K"`).
pub fn format_cluster_text(count: u64) -> String {
    if count > LARGE_CLUSTER_THRESHOLD {
        format!("{}K", (count as f64 / 1000.0).round() as u64)
    } else {
        count.to_string()
    }
}

/// Size variant of the highlight marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterSize {
    /// More than 1000 trees
    Large,
    /// Up to 1000 trees
    Small,
}

impl ClusterSize {
    pub fn for_count(count: u64) -> Self {
        if count > LARGE_CLUSTER_THRESHOLD {
            Self::Large
        } else {
            Self::Small
        }
    }

    /// Extra CSS class applied to the marker box.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Large => "",
            Self::Small => "small",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TABLE: [(f64, f64); 16] = [
        (1.0, 10.0),
        (2.0, 8.0),
        (3.0, 6.0),
        (4.0, 4.0),
        (5.0, 0.8),
        (6.0, 0.75),
        (7.0, 0.3),
        (8.0, 0.099),
        (9.0, 0.095),
        (10.0, 0.05),
        (11.0, 0.03),
        (12.0, 0.02),
        (13.0, 0.008),
        (14.0, 0.005),
        (15.0, 0.004),
        (16.0, 0.003),
    ];

    #[test]
    fn test_radius_matches_table() {
        for (zoom, radius) in TABLE {
            assert_eq!(cluster_radius(zoom), radius, "zoom {}", zoom);
        }
    }

    #[test]
    fn test_radius_is_non_increasing() {
        for pair in TABLE.windows(2) {
            assert!(cluster_radius(pair[1].0) <= cluster_radius(pair[0].0));
        }
    }

    #[test]
    fn test_radius_outside_table_is_zero() {
        for zoom in [0.0, 17.0, 18.0, 19.0, 20.0, -1.0, 10.5, f64::NAN] {
            assert_eq!(cluster_radius(zoom), 0.0, "zoom {}", zoom);
        }
    }

    #[test]
    fn test_summary_radius_formats_like_a_query_value() {
        assert_eq!(cluster_radius(SUMMARY_ZOOM_LEVEL as f64).to_string(), "0.05");
        assert_eq!(cluster_radius(1.0).to_string(), "10");
    }

    #[test]
    fn test_format_cluster_text() {
        assert_eq!(format_cluster_text(999), "999");
        assert_eq!(format_cluster_text(1000), "1000");
        assert_eq!(format_cluster_text(1001), "1K");
        assert_eq!(format_cluster_text(1500), "2K");
        assert_eq!(format_cluster_text(2499), "2K");
        assert_eq!(format_cluster_text(2500), "3K");
        assert_eq!(format_cluster_text(123_456), "123K");
    }

    #[test]
    fn test_cluster_size_boundary() {
        assert_eq!(ClusterSize::for_count(1000), ClusterSize::Small);
        assert_eq!(ClusterSize::for_count(1001), ClusterSize::Large);
        assert_eq!(ClusterSize::Small.css_class(), "small");
        assert_eq!(ClusterSize::Large.css_class(), "");
    }

    proptest! {
        /// Property: the radius never grows as the zoom level increases.
        #[test]
        fn prop_radius_monotonic(a in -5i32..25, b in -5i32..25) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            if lo >= 1 {
                prop_assert!(cluster_radius(hi as f64) <= cluster_radius(lo as f64));
            }
        }

        /// Property: small counts render verbatim.
        #[test]
        fn prop_small_counts_verbatim(count in 0u64..=1000) {
            prop_assert_eq!(format_cluster_text(count), count.to_string());
        }
    }
}
