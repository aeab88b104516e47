/// Paths served under the versioned API, in the order they are listed.
pub const API_ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

pub fn routes_listing() -> String {
    let mut listing = String::from("Available Routes:\n");
    for route in API_ROUTES {
        listing.push_str(route);
        listing.push('\n');
    }
    listing
}

/// Plain text list of the available API routes (GET /)
pub async fn index_handler() -> String {
    routes_listing()
}
