//! Sequencing and resolution faults are reported the same way by every
//! backend.

use tessel_rdf::writer::State;
use tessel_rdf::{RdfFormat, RdfWriterFactory, WriterError};

use super::helpers::*;

fn formats() -> impl Iterator<Item = &'static str> {
    RdfFormat::ALL.into_iter().map(RdfFormat::name)
}

#[test_log::test]
fn objects_before_say_are_rejected() -> anyhow::Result<()> {
    for format in formats() {
        let mut writer = new_writer(format);
        writer.start()?;
        writer.about(("ex", "A"))?;

        for result in [
            writer.is(("ex", "B")).map(|_| ()),
            writer.text("x", None).map(|_| ()),
            writer.value(1).map(|_| ()),
            writer.typed_value("x", ("xsd", "token")).map(|_| ()),
        ] {
            assert!(
                matches!(
                    result,
                    Err(WriterError::BadTransition {
                        from: State::Subject,
                        to: State::Object
                    })
                ),
                "{format}"
            );
        }
    }
    Ok(())
}

#[test]
fn objects_before_about_are_rejected() -> anyhow::Result<()> {
    for format in formats() {
        let mut writer = new_writer(format);
        writer.start()?;

        assert!(
            matches!(
                writer.is(("ex", "B")),
                Err(WriterError::BadTransition {
                    from: State::Document,
                    to: State::Object
                })
            ),
            "{format}"
        );
    }
    Ok(())
}

#[test]
fn prefixes_after_start_are_rejected() -> anyhow::Result<()> {
    for format in formats() {
        let mut writer = new_writer(format);
        writer.start()?;

        assert!(
            matches!(
                writer.prefix("late", "http://late.test/"),
                Err(WriterError::PrefixesLocked)
            ),
            "{format}"
        );
    }
    Ok(())
}

#[test]
fn unknown_prefixes_are_rejected() -> anyhow::Result<()> {
    for format in formats() {
        let mut writer = new_writer(format);
        writer.start()?;

        assert!(
            matches!(
                writer.about(("nope", "A")),
                Err(WriterError::UnknownPrefix(ref p)) if p == "nope"
            ),
            "{format}"
        );
    }
    Ok(())
}

#[test]
fn unknown_formats_are_rejected() {
    let factory = RdfWriterFactory::new();

    for name in ["yaml", "text/html", "trig", ""] {
        assert!(
            matches!(factory.new_writer(name), Err(WriterError::UnsupportedFormat(_))),
            "{name}"
        );
        assert_eq!(factory.canonical_format_name(name), None);
    }
}
