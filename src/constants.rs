//! Application constants for the hydrophone export tool
//!
//! Fixed tables used by the header parser and formatter: separator and
//! date cascades, the timezone alias table, filename date patterns and
//! the Ocean Sonics section labels.

// =============================================================================
// Header Scanning
// =============================================================================

/// Maximum number of lines inspected when parsing a header straight from disk
pub const HEADER_SCAN_LIMIT: usize = 50;

/// Minimum run of spaces accepted as a key/value separator
pub const MIN_SPACE_SEPARATOR: usize = 2;

/// Timezone recorded when a header carries none
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Marker prefixing commented header lines
pub const COMMENT_MARKER: char = '#';

// =============================================================================
// Date and Timestamp Formats
// =============================================================================

/// Date and date-time formats accepted for `start_date`, tried in order
pub mod date_formats {
    /// Formats carrying a time of day
    pub const DATETIME: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

    /// Date-only formats, tried after [`DATETIME`]
    pub const DATE: &[&str] = &[
        "%Y-%m-%d",
        "%m/%d/%Y",
        "%d/%m/%Y",
        "%Y/%m/%d",
        "%B %d, %Y",
        "%d %B %Y",
        "%Y%m%d",
        "%d-%m-%Y",
        "%m-%d-%Y",
    ];

    /// Canonical output format
    pub const CANONICAL: &str = "%Y-%m-%d";
}

/// Formats accepted for the first column of a data row, tried in order
pub mod timestamp_formats {
    /// Time of day only (Ocean Sonics default)
    pub const TIME_ONLY: &str = "%H:%M:%S";

    /// Full date-time formats
    pub const DATETIME: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%m/%d/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%Y%m%d_%H%M%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%SZ",
    ];
}

/// Filename date patterns, tried in order when a header has no start date
pub const FILENAME_DATE_PATTERNS: &[&str] = &[
    r"(\d{8})",
    r"(\d{4}-\d{2}-\d{2})",
    r"(\d{4}_\d{2}_\d{2})",
    r"_(\d{8})_",
    r"(\d{2}-\d{2}-\d{4})",
];

// =============================================================================
// Timezones
// =============================================================================

/// Upper-cased aliases and the zone they resolve to
pub const TIMEZONE_ALIASES: &[(&str, &str)] = &[
    ("COORDINATED UNIVERSAL TIME", "UTC"),
    ("UNIVERSAL TIME", "UTC"),
    ("GMT", "UTC"),
    ("GREENWICH MEAN TIME", "UTC"),
    ("EASTERN", "US/Eastern"),
    ("EASTERN STANDARD TIME", "US/Eastern"),
    ("EASTERN DAYLIGHT TIME", "US/Eastern"),
    ("EST", "US/Eastern"),
    ("EDT", "US/Eastern"),
    ("CENTRAL", "US/Central"),
    ("CENTRAL STANDARD TIME", "US/Central"),
    ("CENTRAL DAYLIGHT TIME", "US/Central"),
    ("CST", "US/Central"),
    ("CDT", "US/Central"),
    ("MOUNTAIN", "US/Mountain"),
    ("MOUNTAIN STANDARD TIME", "US/Mountain"),
    ("MOUNTAIN DAYLIGHT TIME", "US/Mountain"),
    ("MST", "US/Mountain"),
    ("MDT", "US/Mountain"),
    ("PACIFIC", "US/Pacific"),
    ("PACIFIC STANDARD TIME", "US/Pacific"),
    ("PACIFIC DAYLIGHT TIME", "US/Pacific"),
    ("PST", "US/Pacific"),
    ("PDT", "US/Pacific"),
];

// =============================================================================
// Ocean Sonics Layout
// =============================================================================

/// Section labels, in output order
pub mod sections {
    pub const FILE_DETAILS: &str = "File Details:";
    pub const DEVICE_DETAILS: &str = "Device Details:";
    pub const SETUP: &str = "Setup:";
    pub const DATA: &str = "Data:";

    pub const ALL: &[&str] = &[FILE_DETAILS, DEVICE_DETAILS, SETUP, DATA];
}

/// Leading token of the data column header line
pub const DATA_COLUMN_HEADER_PREFIX: &str = "Time\t";

/// Marker that identifies the data column header line
pub const DATA_COLUMN_HEADER_MARKER: &str = "Data Points";

// =============================================================================
// Output Naming
// =============================================================================

/// Suffix appended to preserved file stems in individual mode
pub const EDITED_SUFFIX: &str = "_edited";

/// Stem prefix for sequentially named exports
pub const SEQUENTIAL_PREFIX: &str = "exported_";

/// Extensions picked up when an input argument is a directory
pub const INPUT_EXTENSIONS: &[&str] = &["txt"];

/// Application directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "hydro-export";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.json";
