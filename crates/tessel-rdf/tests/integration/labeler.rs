//! Blank node labels shared across writers.

use std::rc::Rc;

use tessel_rdf::{BlankNodeLabeler, RdfWriterFactory};

#[test_log::test]
fn labels_are_distinct_and_increasing_across_a_writer_tree() -> anyhow::Result<()> {
    let factory = RdfWriterFactory::new();
    let labeler = Rc::new(BlankNodeLabeler::new("n"));

    let mut first = factory.new_writer_with_labeler("turtle", Rc::clone(&labeler))?;
    let mut second = factory.new_writer_with_labeler("jsonld", Rc::clone(&labeler))?;
    first.start()?;
    second.start()?;

    let sub = first.sub();
    let nested = sub.borrow_mut().sub();

    let labels: Vec<u64> = (0..12)
        .map(|i| match i % 4 {
            0 => first.blank(None),
            1 => sub.borrow().blank(None),
            2 => nested.borrow().blank(None),
            _ => second.blank(None),
        })
        .map(|label| label.trim_start_matches('n').parse().unwrap_or(0))
        .collect();

    assert_eq!(labels, (1..=12).collect::<Vec<u64>>());
    assert_eq!(labeler.label(None), "n13");
    Ok(())
}

#[test]
fn caller_labels_do_not_advance_the_counter() -> anyhow::Result<()> {
    let writer = RdfWriterFactory::new().new_writer("nt")?;

    assert_eq!(writer.blank(Some("x")), "x");
    assert_eq!(writer.blank(None), "genid1");
    assert_eq!(writer.blank(Some("y")), "y");
    assert_eq!(writer.blank(None), "genid2");
    Ok(())
}
