use features::records::{DistrictRecord, FeedbackRecord};
use features::store::MapData;
use foundation::extent::GeoExtent;

use crate::contains::point_in_polygon;

/// Sets `feedback_count` on every district to the number of feedback
/// points inside it (boundary inclusive).
///
/// Counts are reset before counting, so the function is idempotent and
/// safe to re-run on every load completion; with one collection still
/// empty it simply leaves every count at zero. A point on a shared
/// boundary of two districts counts for both.
pub fn count_feedback(districts: &mut [DistrictRecord], feedbacks: &[FeedbackRecord]) {
    for district in districts.iter_mut() {
        district.feedback_count = 0;
    }

    // Per-polygon bounding boxes prefilter the O(n*m) scan.
    let extents: Vec<Vec<Option<GeoExtent>>> = districts
        .iter()
        .map(|d| {
            d.polygons
                .iter()
                .map(|rings| rings.first().and_then(|outer| GeoExtent::of_points(outer)))
                .collect()
        })
        .collect();

    for feedback in feedbacks {
        let Some(point) = feedback.point else {
            continue;
        };
        for (district, district_extents) in districts.iter_mut().zip(&extents) {
            let hit = district
                .polygons
                .iter()
                .zip(district_extents)
                .any(|(rings, extent)| {
                    extent.is_some_and(|e| e.contains(point)) && point_in_polygon(point, rings)
                });
            if hit {
                district.feedback_count += 1;
            }
        }
    }
}

/// Runs the aggregation over the application context.
///
/// Called after each collection's load completes; meaningful once both
/// have loaded, harmless before that.
pub fn aggregate(data: &mut MapData) {
    // Borrow the two collections disjointly.
    let MapData {
        districts,
        feedbacks,
    } = data;
    count_feedback(districts.records_mut(), feedbacks.records());
}
