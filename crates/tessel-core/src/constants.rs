/// Vocabulary constants shared across crates
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDF_PREFIX: &str = "rdf";
pub const RDF_TYPE: &str = const_str::concat!(RDF_NS, "type");

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const XSD_PREFIX: &str = "xsd";
pub const XSD_STRING: &str = const_str::concat!(XSD_NS, "string");
pub const XSD_INTEGER: &str = const_str::concat!(XSD_NS, "integer");
pub const XSD_DOUBLE: &str = const_str::concat!(XSD_NS, "double");
pub const XSD_BOOLEAN: &str = const_str::concat!(XSD_NS, "boolean");

/// Prefix used for generated blank node labels when nothing else is configured.
pub const DEFAULT_BLANK_NODE_PREFIX: &str = "genid";

/// Format used when the settings do not name one.
pub const DEFAULT_FORMAT: &str = "turtle";

/// `EnvFilter` directive used when the settings do not name one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
