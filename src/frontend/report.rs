use crate::record::GeoRecord;

const NOT_AVAILABLE: &str = "N/A";
const RULE_WIDTH: usize = 40;

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Aligned `label : value` lines, absent fields shown as N/A.
pub fn details(record: &GeoRecord) -> String {
    let coordinates = record
        .loc
        .as_ref()
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |loc| loc.to_string());
    [
        ("IP Address", or_na(&record.ip)),
        ("City", or_na(&record.city)),
        ("Region", or_na(&record.region)),
        ("Country", or_na(&record.country)),
        ("Org/ISP", or_na(&record.org)),
        ("Timezone", or_na(&record.timezone)),
        ("Coordinates", coordinates.as_str()),
    ]
    .iter()
    .map(|(label, value)| format!("{label:<11}: {value}\n"))
    .collect()
}

pub fn framed(record: &GeoRecord) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("IP GEOLOCATION DETAILS\n{rule}\n{}{rule}\n", details(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Location;

    #[test]
    fn full_record() {
        let record = GeoRecord {
            ip: Some("1.2.3.4".into()),
            city: Some("X".into()),
            region: Some("Y".into()),
            country: Some("Z".into()),
            org: Some("I".into()),
            timezone: Some("T".into()),
            loc: Some(Location::new(10.0, 20.0).unwrap()),
        };
        assert_eq!(
            details(&record),
            "IP Address : 1.2.3.4\n\
             City       : X\n\
             Region     : Y\n\
             Country    : Z\n\
             Org/ISP    : I\n\
             Timezone   : T\n\
             Coordinates: 10.0,20.0\n"
        );
    }

    #[test]
    fn missing_fields_are_na() {
        let text = details(&GeoRecord::default());
        assert_eq!(text.matches("N/A").count(), 7);
    }

    #[test]
    fn framed_has_rules() {
        let text = framed(&GeoRecord::default());
        assert!(text.starts_with("IP GEOLOCATION DETAILS\n===="));
        assert!(text.ends_with(&format!("{}\n", "=".repeat(40))));
    }
}
