//! Outbound links to third-party navigation apps.

use crate::location::QueryLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationApp {
    GoogleMaps,
    AppleMaps,
    Waze,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationLink {
    pub app: NavigationApp,
    pub url: String,
}

impl NavigationApp {
    pub const ALL: [NavigationApp; 3] = [
        NavigationApp::GoogleMaps,
        NavigationApp::AppleMaps,
        NavigationApp::Waze,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NavigationApp::GoogleMaps => "Google Maps",
            NavigationApp::AppleMaps => "Apple Maps",
            NavigationApp::Waze => "Waze",
        }
    }

    /// Directions URL to `to`.
    #[must_use]
    pub fn directions_url(self, to: QueryLocation) -> String {
        let QueryLocation {
            latitude: lat,
            longitude: lon,
        } = to;
        match self {
            NavigationApp::GoogleMaps => {
                format!("https://www.google.com/maps/dir/?api=1&destination={lat},{lon}")
            }
            NavigationApp::AppleMaps => format!("http://maps.apple.com/?daddr={lat},{lon}"),
            NavigationApp::Waze => format!("https://waze.com/ul?ll={lat},{lon}&navigate=yes"),
        }
    }
}

/// One link per supported navigation app, in display order.
#[must_use]
pub fn navigation_links(to: QueryLocation) -> Vec<NavigationLink> {
    NavigationApp::ALL
        .into_iter()
        .map(|app| NavigationLink {
            app,
            url: app.directions_url(to),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_three_links_for_coordinate() {
        let links = navigation_links(QueryLocation {
            latitude: 51.5,
            longitude: 7.4,
        });
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.google.com/maps/dir/?api=1&destination=51.5,7.4",
                "http://maps.apple.com/?daddr=51.5,7.4",
                "https://waze.com/ul?ll=51.5,7.4&navigate=yes",
            ]
        );
    }
}
