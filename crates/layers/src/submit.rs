use foundation::geo::LonLat;

/// Builds the external feedback-submission redirect URL.
///
/// The endpoint expects the clicked coordinate as a single `pos` query
/// value, longitude and latitude separated by a space; the browser
/// percent-encodes the space on navigation.
pub fn submission_url(base: &str, pos: LonLat) -> String {
    format!("{base}?pos={} {}", pos.lon_deg, pos.lat_deg)
}

#[cfg(test)]
mod tests {
    use super::submission_url;
    use foundation::geo::LonLat;

    #[test]
    fn url_carries_lon_lat_space_separated() {
        let url = submission_url(
            "https://example.test/feedback.php",
            LonLat::new(16.37, 48.2),
        );
        assert_eq!(url, "https://example.test/feedback.php?pos=16.37 48.2");
    }

    #[test]
    fn full_precision_coordinates_survive() {
        let url = submission_url("https://example.test/f", LonLat::new(16.372817, 48.208174));
        assert!(url.ends_with("?pos=16.372817 48.208174"));
    }
}
