//! The worked examples: one statement in Turtle and N-Triples.

use super::helpers::*;
use tessel_rdf::RdfWriter;

fn write_alice(writer: &mut RdfWriter) -> anyhow::Result<String> {
    writer.start()?;
    writer
        .about(("ex", "A"))?
        .say(("ex", "name"))?
        .text("Alice", Some("en"))?;
    writer.finish()?;
    Ok(writer.drain()?)
}

#[test_log::test]
fn turtle_example() -> anyhow::Result<()> {
    let doc = write_alice(&mut new_writer("text/turtle"))?;

    assert!(doc.contains("@prefix ex: <http://ex.test/> .\n\n"));
    assert!(doc.ends_with("\nex:A ex:name \"Alice\"@en .\n"));
    Ok(())
}

#[test_log::test]
fn ntriples_example() -> anyhow::Result<()> {
    let doc = write_alice(&mut new_writer("application/n-triples"))?;

    assert_eq!(doc, "<http://ex.test/A> <http://ex.test/name> \"Alice\"@en .\n");
    Ok(())
}

#[test]
fn rdfxml_example() -> anyhow::Result<()> {
    let doc = write_alice(&mut new_writer("rdf"))?;

    assert!(doc.contains(
        "\t<rdf:Description rdf:about=\"http://ex.test/A\">\n\
         \t\t<ex:name xml:lang=\"en\">Alice</ex:name>\n\
         \t</rdf:Description>\n</rdf:RDF>\n"
    ));
    Ok(())
}

#[test]
fn jsonld_example() -> anyhow::Result<()> {
    let doc: serde_json::Value =
        serde_json::from_str(&write_alice(&mut new_writer("jsonld"))?)?;

    assert_eq!(
        doc,
        serde_json::json!({
            "@id": "ex:A",
            "name": { "@language": "en", "@value": "Alice" },
            "@context": {
                "ex": "http://ex.test/",
                "name": { "@id": "ex:name" }
            }
        })
    );
    Ok(())
}
