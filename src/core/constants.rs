//! Core constants derived from Leaflet defaults and the dashboard map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// WGS84 equatorial radius in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Precision handed to the pole-of-inaccessibility search for polygon labels.
pub const LABEL_PRECISION: f64 = 2.0;

/// Collision margin of a label group, in pixels.
pub const LABEL_MARGIN: f64 = 2.0;

/// Pane that labels are placed in unless the layer overrides it.
pub const DEFAULT_LABEL_PANE: &str = "markerPane";

/// Container class of every dashboard map.
pub const DEFAULT_CLASS_NAME: &str = "leaflet-dhis2";

/// Where default marker icons are served from.
pub const DEFAULT_ICON_IMAGE_PATH: &str = "/images/";

/// Container class toggled while the map is loading data.
pub const LOADER_CLASS_NAME: &str = "leaflet-loader";

/// Container class added while a Google basemap is shown.
pub const GOOGLE_CLASS_NAME: &str = "leaflet-google";

/// Default circle radius around facilities, in meters.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 1000.0;

/// Fill opacity of circles relative to their stroke opacity.
pub const DEFAULT_CIRCLE_OPACITY_FACTOR: f64 = 0.2;

/// Google Maps API version requested unless overridden.
pub const GOOGLE_MAPS_API_VERSION: &str = "3.26";

/// Script endpoint of the Google Maps JavaScript API.
pub const GOOGLE_MAPS_API_URL: &str = "//maps.googleapis.com/maps/api/js";

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);
