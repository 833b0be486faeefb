//! The same statements written in every format describe the same triples.

use super::helpers::*;

#[test_log::test]
fn ntriples_matches_dataset() -> anyhow::Result<()> {
    let mut writer = new_writer("ntriples");
    write_people(&mut writer)?;

    let doc = writer.drain()?;
    assert!(doc.is_ascii());
    assert_eq!(ntriples_triples(&doc), people_triples());
    Ok(())
}

#[test_log::test]
fn jsonld_matches_dataset() -> anyhow::Result<()> {
    let mut writer = new_writer("jsonld");
    write_people(&mut writer)?;

    let doc: serde_json::Value = serde_json::from_str(&writer.drain()?)?;
    assert_eq!(jsonld_triples(&doc), people_triples());
    Ok(())
}

#[test]
fn turtle_and_n3_write_the_dataset() -> anyhow::Result<()> {
    let expected = "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
        @prefix ex: <http://ex.test/> .\n\
        \n\
        ex:alice a ex:Person ;\n\
        \tex:name \"Alice\"@en ;\n\
        \tex:age \"42\"^^xsd:integer ;\n\
        \tex:height \"1.75\"^^xsd:double ;\n\
        \tex:active \"true\"^^xsd:boolean ;\n\
        \tex:born \"1990-01-01\"^^xsd:date ;\n\
        \tex:knows ex:bob,\n\
        \t\t_:genid1 .\n\
        \n\
        ex:bob ex:name \"Bob\" .\n\
        \n\
        _:genid1 ex:nick \"Al\" .\n";

    for format in ["turtle", "n3"] {
        let mut writer = new_writer(format);
        write_people(&mut writer)?;
        assert_eq!(writer.drain()?, expected, "{format}");
    }
    Ok(())
}

#[test_log::test]
fn rdfxml_matches_dataset() -> anyhow::Result<()> {
    let mut writer = new_writer("rdfxml");
    write_people(&mut writer)?;

    assert_eq!(rdfxml_triples(&writer.drain()?), people_triples());
    Ok(())
}

#[test]
fn rdfxml_reads_back_escaped_text() -> anyhow::Result<()> {
    let mut writer = new_writer("rdfxml");
    writer.start()?;
    writer
        .about(("ex", "a"))?
        .say(("ex", "note"))?
        .text("1 < 2 & \"3\"", None)?
        .say(("ex", "see"))?
        .is("http://ex.test/?a=1&b=2")?;
    writer.finish()?;

    let triples = rdfxml_triples(&writer.drain()?);
    assert!(triples.contains(&(
        format!("<{EX}a>"),
        format!("<{EX}note>"),
        "\"1 < 2 & \"3\"\"".to_string(),
    )));
    assert!(triples.contains(&(
        format!("<{EX}a>"),
        format!("<{EX}see>"),
        "<http://ex.test/?a=1&b=2>".to_string(),
    )));
    assert_eq!(triples.len(), 2);
    Ok(())
}

#[test]
fn rdfxml_writes_every_statement() -> anyhow::Result<()> {
    let mut writer = new_writer("rdfxml");
    write_people(&mut writer)?;

    let doc = writer.drain()?;

    for element in [
        "<rdf:Description rdf:about=\"http://ex.test/alice\">",
        "<rdf:type rdf:resource=\"http://ex.test/Person\"/>",
        "<ex:name xml:lang=\"en\">Alice</ex:name>",
        "<ex:age rdf:datatype=\"http://www.w3.org/2001/XMLSchema#integer\">42</ex:age>",
        "<ex:height rdf:datatype=\"http://www.w3.org/2001/XMLSchema#double\">1.75</ex:height>",
        "<ex:active rdf:datatype=\"http://www.w3.org/2001/XMLSchema#boolean\">true</ex:active>",
        "<ex:born rdf:datatype=\"http://www.w3.org/2001/XMLSchema#date\">1990-01-01</ex:born>",
        "<ex:knows rdf:resource=\"http://ex.test/bob\"/>",
        "<ex:knows rdf:nodeID=\"genid1\"/>",
        "<rdf:Description rdf:about=\"http://ex.test/bob\">",
        "<ex:name>Bob</ex:name>",
        "<rdf:Description rdf:nodeID=\"genid1\">",
        "<ex:nick>Al</ex:nick>",
    ] {
        assert!(doc.contains(element), "missing {element}");
    }

    assert_eq!(doc.matches("<rdf:Description").count(), 3);
    assert_eq!(doc.matches("</rdf:Description>").count(), 3);
    assert!(doc.ends_with("</rdf:RDF>\n"));
    Ok(())
}

#[test]
fn every_format_emits_the_same_number_of_statements() -> anyhow::Result<()> {
    let expected = people_triples().len();

    let mut nt = new_writer("nt");
    write_people(&mut nt)?;
    assert_eq!(nt.drain()?.lines().count(), expected);

    let mut xml = new_writer("xml");
    write_people(&mut xml)?;
    let xml = xml.drain()?;
    let statements = xml.matches("\n\t\t<").count();
    assert_eq!(statements, expected);
    Ok(())
}
