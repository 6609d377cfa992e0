//! Plain-text rendering of routing results

use std::fmt::Write;

use domain::{GeoCoordinate, Route};

/// Render routes as a summary, optionally with every maneuver
pub fn format_routes(routes: &[Route], steps: bool) -> String {
    if routes.is_empty() {
        return "No route found\n".to_string();
    }

    let mut out = String::new();
    for (i, route) in routes.iter().enumerate() {
        let _ = writeln!(out, "Route {}: {route}", i + 1);
        if !steps {
            continue;
        }
        for leg in &route.legs {
            let _ = write!(out, "  Leg {}: {:.1} km", leg.index + 1, leg.distance / 1000.0);
            if leg.summary.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, " via {}", leg.summary);
            }
            for maneuver in &leg.maneuvers {
                let _ = writeln!(out, "    {maneuver}");
            }
        }
    }
    out
}

/// Render a path as one `lat,lon` line per coordinate
pub fn format_path(path: &[GeoCoordinate]) -> String {
    path.iter().fold(String::new(), |mut out, coord| {
        let _ = writeln!(out, "{coord}");
        out
    })
}
