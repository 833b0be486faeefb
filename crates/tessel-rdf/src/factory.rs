//! Format lookup and writer construction.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use tessel_core::config::Settings;

use crate::error::{WriterError, WriterResult};
use crate::format::{WriterOptions, backend_for};
use crate::labeler::BlankNodeLabeler;
use crate::writer::RdfWriter;

/// The output formats a factory can create writers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    N3,
    Turtle,
    NTriples,
    RdfXml,
    JsonLd,
}

impl RdfFormat {
    pub const ALL: [Self; 5] = [
        Self::N3,
        Self::Turtle,
        Self::NTriples,
        Self::RdfXml,
        Self::JsonLd,
    ];

    /// The canonical format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::N3 => "n3",
            Self::Turtle => "turtle",
            Self::NTriples => "ntriples",
            Self::RdfXml => "rdfxml",
            Self::JsonLd => "jsonld",
        }
    }

    /// Resolves a format name, file extension, MIME type or synonym.
    /// Matching ignores case and surrounding whitespace.
    #[must_use]
    pub fn from_alias(alias: &str) -> Option<Self> {
        let format = match alias.trim().to_ascii_lowercase().as_str() {
            "n3" | "text/n3" | "text/rdf+n3" => Self::N3,
            "turtle" | "ttl" | "text/turtle" | "application/x-turtle" => Self::Turtle,
            "ntriples" | "nt" | "n-triples" | "text/plain" | "text/n-triples"
            | "application/ntriples" | "application/n-triples" => Self::NTriples,
            "rdfxml" | "rdf" | "xml" | "rdf/xml" | "rdf-xml" | "text/xml" | "application/xml"
            | "application/rdf+xml" => Self::RdfXml,
            "jsonld" | "json-ld" | "json" | "application/ld+json" | "application/json" => {
                Self::JsonLd
            }
            _ => return None,
        };
        Some(format)
    }

    /// The MIME types this format is served as, canonical type first.
    #[must_use]
    pub const fn mime_types(self) -> &'static [&'static str] {
        match self {
            Self::N3 => &["text/n3", "text/rdf+n3"],
            Self::Turtle => &["text/turtle", "application/x-turtle"],
            Self::NTriples => &["application/n-triples", "text/n-triples", "text/plain"],
            Self::RdfXml => &["application/rdf+xml", "application/xml", "text/xml"],
            Self::JsonLd => &["application/ld+json", "application/json"],
        }
    }

    #[must_use]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::N3 => "n3",
            Self::Turtle => "ttl",
            Self::NTriples => "nt",
            Self::RdfXml => "rdf",
            Self::JsonLd => "jsonld",
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RdfFormat {
    type Err = WriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| WriterError::UnsupportedFormat(s.to_string()))
    }
}

/// Creates writers by format name.
///
/// ## Usage
///
/// ```rust
/// use tessel_rdf::RdfWriterFactory;
///
/// let factory = RdfWriterFactory::new();
///
/// assert_eq!(factory.canonical_format_name("text/turtle"), Some("turtle"));
/// assert_eq!(factory.file_extension_for("json").unwrap(), "jsonld");
///
/// let writer = factory.new_writer("application/rdf+xml").unwrap();
/// assert_eq!(writer.mime_type(), "application/rdf+xml");
/// ```
#[derive(Debug, Clone)]
pub struct RdfWriterFactory {
    options: WriterOptions,
    default_format: RdfFormat,
}

impl Default for RdfWriterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RdfWriterFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    #[must_use]
    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            options,
            default_format: RdfFormat::Turtle,
        }
    }

    /// ## Summary
    /// Builds a factory from the `output` section of the settings.
    ///
    /// ## Errors
    /// Returns `WriterError::Core` if the output settings are invalid, or
    /// `WriterError::UnsupportedFormat` if the configured format is unknown.
    pub fn from_settings(settings: &Settings) -> WriterResult<Self> {
        settings.output.validate()?;

        let default_format = settings.output.format.parse()?;

        Ok(Self {
            options: WriterOptions::from(&settings.output),
            default_format,
        })
    }

    #[must_use]
    pub fn default_format(&self) -> RdfFormat {
        self.default_format
    }

    /// The canonical names of all supported formats.
    #[must_use]
    pub fn list_formats(&self) -> Vec<&'static str> {
        RdfFormat::ALL.into_iter().map(RdfFormat::name).collect()
    }

    /// ## Errors
    /// Returns `WriterError::UnsupportedFormat` for an unknown format.
    pub fn mime_types_for(&self, format: &str) -> WriterResult<&'static [&'static str]> {
        Ok(format.parse::<RdfFormat>()?.mime_types())
    }

    /// ## Errors
    /// Returns `WriterError::UnsupportedFormat` for an unknown format.
    pub fn file_extension_for(&self, format: &str) -> WriterResult<&'static str> {
        Ok(format.parse::<RdfFormat>()?.file_extension())
    }

    /// Resolves a name, extension, MIME type or synonym to a canonical
    /// format name.
    #[must_use]
    pub fn canonical_format_name(&self, alias: &str) -> Option<&'static str> {
        RdfFormat::from_alias(alias).map(RdfFormat::name)
    }

    /// ## Summary
    /// Creates a document writer for `format` with its own blank node labeler.
    ///
    /// ## Errors
    /// Returns `WriterError::UnsupportedFormat` for an unknown format.
    pub fn new_writer(&self, format: &str) -> WriterResult<RdfWriter> {
        let labeler = Rc::new(BlankNodeLabeler::new(self.options.blank_node_prefix.clone()));
        self.new_writer_with_labeler(format, labeler)
    }

    /// ## Summary
    /// Creates a document writer sharing `labeler`, so that several documents
    /// never reuse a blank node label.
    ///
    /// ## Errors
    /// Returns `WriterError::UnsupportedFormat` for an unknown format.
    pub fn new_writer_with_labeler(
        &self,
        format: &str,
        labeler: Rc<BlankNodeLabeler>,
    ) -> WriterResult<RdfWriter> {
        let format = format.parse::<RdfFormat>().inspect_err(|e| {
            tracing::error!(error = %e, "Writer requested for unsupported format");
        })?;

        Ok(self.writer_for(format, labeler))
    }

    /// Creates a writer for the configured default format.
    #[must_use]
    pub fn new_default_writer(&self) -> RdfWriter {
        let labeler = Rc::new(BlankNodeLabeler::new(self.options.blank_node_prefix.clone()));
        self.writer_for(self.default_format, labeler)
    }

    fn writer_for(&self, format: RdfFormat, labeler: Rc<BlankNodeLabeler>) -> RdfWriter {
        tracing::debug!(%format, "Creating writer");
        RdfWriter::new(backend_for(format, &self.options), labeler)
    }
}
