#![allow(missing_docs)]

use obds_xml::{Element, parse_element_tree, write_element_tree};

#[test]
fn test_writes_indented_fragment() {
    let tree = Element::new("Tod")
        .with_child(
            Element::new("Sterbedatum")
                .with_attribute("Datumsgenauigkeit", Some("E"))
                .with_text("2024-05-01"),
        )
        .with_leaf("Tod_tumorbedingt", Some("J"))
        .with_child(Element::new("Menge_Todesursachen"))
        .pruned()
        .expect("content");

    let xml = write_element_tree(&tree).expect("written");
    insta::assert_snapshot!(xml, @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <Tod>
      <Sterbedatum Datumsgenauigkeit="E">2024-05-01</Sterbedatum>
      <Tod_tumorbedingt>J</Tod_tumorbedingt>
    </Tod>
    "#);
}

#[test]
fn test_escapes_text_and_attributes() {
    let tree = Element::new("Zusatzitem")
        .with_attribute("Art", Some("A&B"))
        .with_leaf("Wert", Some("<5 %"));
    let xml = write_element_tree(&tree).expect("written");
    assert!(xml.contains(r#"Art="A&amp;B""#));
    assert!(xml.contains("<Wert>&lt;5 %</Wert>"));

    let parsed = parse_element_tree(&xml).expect("parsed");
    assert_eq!(parsed.attribute("Art"), Some("A&B"));
    assert_eq!(parsed.value("Wert").as_deref(), Some("<5 %"));
}
