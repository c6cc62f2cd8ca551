use foundation::geo::LonLat;

/// District boundaries, WFS GetFeature returning GeoJSON.
pub const DISTRICTS_URL: &str = "https://data.wien.gv.at/daten/geo?service=WFS&request=GetFeature&version=1.1.0&typeName=ogdwien:BEZIRKSGRENZEOGD&srsName=EPSG:4326&outputFormat=json";

/// Existing feedback entries as GeoJSON.
pub const FEEDBACK_URL: &str =
    "https://student.ifip.tuwien.ac.at/geoweb/2019/g02/feedbackMap/postgis_geojson.php";

/// Submission form; the clicked coordinate goes into its `pos` query value.
pub const SUBMIT_BASE_URL: &str =
    "https://student.ifip.tuwien.ac.at/geoweb/2019/g02/feedbackMap/feedback.php";

pub const INITIAL_CENTER: LonLat = LonLat::new(16.37, 48.2);
pub const INITIAL_ZOOM: f64 = 13.0;

pub const CANVAS_ID: &str = "map";
pub const POPUP_CONTAINER_ID: &str = "popup-container";
pub const POPUP_CONTENT_ID: &str = "popup-content";

pub const ACCURACY_RING_SEGMENTS: usize = 64;
