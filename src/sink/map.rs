use super::{Sink, SinkError};
use crate::config::MapConfig;
use crate::record::{GeoRecord, Location};

use std::path::{Path, PathBuf};

const LEAFLET_VERSION: &str = "1.9.4";

/// Renders a single-marker Leaflet page.
pub struct MapSink {
    path: PathBuf,
    zoom: u8,
}

impl MapSink {
    pub fn new(path: impl Into<PathBuf>, zoom: u8) -> Self {
        Self {
            path: path.into(),
            zoom,
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(&config.path, config.zoom)
    }
}

impl Sink for MapSink {
    fn path(&self) -> &Path {
        &self.path
    }

    fn try_write(&self, record: &GeoRecord) -> Result<(), SinkError> {
        let location = record.loc.as_ref().ok_or(SinkError::NoLocation)?;
        let html = render_map(location, self.zoom, &record.place_label());
        std::fs::write(&self.path, html)?;
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// JavaScript string literal holding `s` as popup HTML.
fn popup_literal(s: &str) -> String {
    // A JSON string is a valid JS literal, after HTML escaping it cannot close the script tag
    serde_json::Value::String(escape_html(s)).to_string()
}

fn render_map(location: &Location, zoom: u8, label: &str) -> String {
    let lat = location.latitude();
    let lon = location.longitude();
    let title = escape_html(label);
    let popup = popup_literal(label);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<style>html, body, #map {{ width: 100%; height: 100%; margin: 0; padding: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{lat:?}, {lon:?}], {zoom});
L.tileLayer("https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
    maxZoom: 19,
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
}}).addTo(map);
L.marker([{lat:?}, {lon:?}]).addTo(map).bindPopup({popup});
</script>
</body>
</html>
"#
    )
}
