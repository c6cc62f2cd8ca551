use features::records::FeedbackRecord;
use foundation::geo::LonLat;
use foundation::mercator::project;
use serde_json::Value;

/// Returns every feedback record whose marker covers the clicked
/// coordinate, in record order.
///
/// Distance is measured in projected Mercator meters, which matches what
/// the marker-radius tolerance is derived from at the current view scale.
/// Records without geometry never hit.
pub fn feedback_hits<'a>(
    feedbacks: &'a [FeedbackRecord],
    click: LonLat,
    tolerance_m: f64,
) -> Vec<&'a FeedbackRecord> {
    let (cx, cy) = project(click);
    let tol2 = tolerance_m * tolerance_m;

    feedbacks
        .iter()
        .filter(|f| {
            f.point.is_some_and(|p| {
                let (px, py) = project(p);
                let dx = px - cx;
                let dy = py - cy;
                dx * dx + dy * dy <= tol2
            })
        })
        .collect()
}

/// Formats the hit records' attributes as HTML for the popup overlay:
/// one table per record, each preceded by a horizontal rule, one
/// name/value row per property. Geometry never appears because records
/// carry it outside the property map.
pub fn attribute_table_html(hits: &[&FeedbackRecord]) -> String {
    let mut markup = String::new();
    for record in hits {
        markup.push_str("<hr><table>");
        for (name, value) in &record.properties {
            markup.push_str("<tr><th>");
            markup.push_str(&escape_html(name));
            markup.push_str("</th><td>");
            markup.push_str(&escape_html(&scalar_text(value)));
            markup.push_str("</td></tr>");
        }
        markup.push_str("</table>");
    }
    markup
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{attribute_table_html, feedback_hits};
    use features::records::FeedbackRecord;
    use foundation::geo::LonLat;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};

    fn feedback(id: &str, point: Option<LonLat>, props: Value) -> FeedbackRecord {
        let properties = match props {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        FeedbackRecord {
            id: id.to_string(),
            point,
            properties,
        }
    }

    #[test]
    fn hits_within_tolerance_only() {
        let feedbacks = vec![
            feedback("near", Some(LonLat::new(16.37, 48.2)), json!({})),
            feedback("far", Some(LonLat::new(16.50, 48.2)), json!({})),
            feedback("nowhere", None, json!({})),
        ];
        let hits = feedback_hits(&feedbacks, LonLat::new(16.3701, 48.2), 50.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "near");
    }

    #[test]
    fn overlapping_markers_all_hit_in_record_order() {
        let p = Some(LonLat::new(16.37, 48.2));
        let feedbacks = vec![
            feedback("first", p, json!({})),
            feedback("second", p, json!({})),
        ];
        let hits = feedback_hits(&feedbacks, LonLat::new(16.37, 48.2), 10.0);
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn table_lists_every_non_geometry_property() {
        let record = feedback(
            "7",
            Some(LonLat::new(16.37, 48.2)),
            json!({"comment": "broken bench", "rating": 3}),
        );
        let html = attribute_table_html(&[&record]);
        assert_eq!(
            html,
            "<hr><table><tr><th>comment</th><td>broken bench</td></tr>\
             <tr><th>rating</th><td>3</td></tr></table>"
        );
    }

    #[test]
    fn markup_is_escaped() {
        let record = feedback(
            "7",
            Some(LonLat::new(16.37, 48.2)),
            json!({"comment": "<script>alert(1)</script>"}),
        );
        let html = attribute_table_html(&[&record]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn no_hits_produce_empty_markup() {
        assert_eq!(attribute_table_html(&[]), "");
    }
}
