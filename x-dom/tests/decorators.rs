//! Decorator registry behaviour

mod common;

use std::any::Any;
use std::rc::Rc;

use common::{names, sample, Tag};
use x_dom::{
    CapabilityClass, Decorator, DecoratorRef, DecoratorRegistry, Document, Explorable, Node,
    NodeType, XmlTree,
};

/// Decorator with behavior of its own: labels a node with its name
#[derive(Debug)]
struct Label(&'static str);

impl Label {
    fn label<T: XmlTree>(&self, node: &Node<T>) -> x_dom::Result<String> {
        Ok(format!("{}:{}", self.0, node.name()?))
    }
}

impl Decorator for Label {
    fn name(&self) -> &str {
        "label"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn capability_class_matches() {
    for node_type in [
        NodeType::Document,
        NodeType::Element,
        NodeType::Text,
        NodeType::Comment,
        NodeType::Attribute,
        NodeType::Namespace,
    ] {
        assert!(CapabilityClass::Node.matches(node_type));
    }
    assert!(CapabilityClass::Document.matches(NodeType::Document));
    assert!(!CapabilityClass::Document.matches(NodeType::Element));
    assert!(CapabilityClass::Element.matches(NodeType::Element));
    assert!(!CapabilityClass::Element.matches(NodeType::Text));
    assert!(CapabilityClass::CharacterData.matches(NodeType::Text));
    assert!(CapabilityClass::CharacterData.matches(NodeType::Comment));
    assert!(!CapabilityClass::CharacterData.matches(NodeType::Element));
    assert!(CapabilityClass::Text.matches(NodeType::Text));
    assert!(!CapabilityClass::Text.matches(NodeType::Comment));
    assert!(CapabilityClass::Comment.matches(NodeType::Comment));
    assert!(CapabilityClass::ProcessingInstruction.matches(NodeType::ProcessingInstruction));
    assert!(CapabilityClass::Attribute.matches(NodeType::Attribute));
    assert!(!CapabilityClass::Attribute.matches(NodeType::Namespace));
}

#[test]
fn units_apply_in_registration_order() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    doc.register(CapabilityClass::Element, Rc::new(Tag("u1")));
    doc.register(CapabilityClass::Element, Rc::new(Tag("u2")));

    let first = doc.node(s.first).unwrap();
    assert_eq!(names(&first), vec!["u1", "u2"]);
}

#[test]
fn non_matching_class_never_applies() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    doc.register(CapabilityClass::Text, Rc::new(Tag("text-only")));

    let first = doc.node(s.first).unwrap();
    assert!(first.decorators().is_empty());
    assert_eq!(doc.decorate(&first), 0);
    assert!(first.decorators().is_empty());

    let title = doc.node(s.title).unwrap();
    assert_eq!(names(&title), vec!["text-only"]);
}

#[test]
fn character_data_covers_text_and_comment() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    doc.register(CapabilityClass::CharacterData, Rc::new(Tag("chars")));

    assert!(doc.node(s.title).unwrap().is_extended_with("chars"));
    assert!(doc.node(s.note).unwrap().is_extended_with("chars"));
    assert!(!doc.node(s.root).unwrap().is_extended_with("chars"));
}

#[test]
fn duplicate_registration_applies_twice() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    let unit: DecoratorRef = Rc::new(Tag("twice"));
    doc.register(CapabilityClass::Element, Rc::clone(&unit));
    doc.register(CapabilityClass::Element, unit);

    let first = doc.node(s.first).unwrap();
    assert_eq!(names(&first), vec!["twice", "twice"]);
}

#[test]
fn decorators_list_is_an_equivalent_mutation_path() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    doc.register(CapabilityClass::Element, Rc::new(Tag("registered")));
    {
        let mut list = doc.decorators(CapabilityClass::Element);
        assert_eq!(list.len(), 1);
        list.push(Rc::new(Tag("pushed")));
    }

    let first = doc.node(s.first).unwrap();
    assert_eq!(names(&first), vec!["registered", "pushed"]);
}

#[test]
fn decorators_list_is_created_lazily_and_empty() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();

    assert!(doc.decorators(CapabilityClass::Comment).is_empty());
    assert!(!doc.is_active(CapabilityClass::Comment));
}

#[test]
fn existing_wrappers_need_explicit_decoration() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    let first = doc.node(s.first).unwrap();

    doc.register(CapabilityClass::Element, Rc::new(Tag("late")));
    assert!(first.decorators().is_empty());

    assert_eq!(doc.decorate(&first), 1);
    assert_eq!(names(&first), vec!["late"]);
}

#[test]
fn redecorating_extends_again() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    doc.register(CapabilityClass::Element, Rc::new(Tag("again")));

    let first = doc.node(s.first).unwrap();
    doc.decorate(&first);
    assert_eq!(names(&first), vec!["again", "again"]);
}

#[test]
fn is_active_tracks_classes_matching_the_document() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    assert!(!doc.is_active(CapabilityClass::Node));

    doc.register(CapabilityClass::Element, Rc::new(Tag("elements")));
    assert!(!doc.is_active(CapabilityClass::Element));

    doc.register(CapabilityClass::Document, Rc::new(Tag("root")));
    assert!(doc.is_active(CapabilityClass::Document));

    doc.register(CapabilityClass::Node, Rc::new(Tag("all")));
    assert!(doc.is_active(CapabilityClass::Node));
}

#[test]
fn registry_orders_classes_by_first_registration() {
    let mut registry = DecoratorRegistry::new();
    registry.register(CapabilityClass::Element, Rc::new(Tag("e1")));
    registry.register(CapabilityClass::Node, Rc::new(Tag("n1")));
    registry.register(CapabilityClass::Element, Rc::new(Tag("e2")));

    assert_eq!(unit_names(&registry.units_for(NodeType::Element)), vec!["e1", "e2", "n1"]);
    assert_eq!(unit_names(&registry.units_for(NodeType::Document)), vec!["n1"]);

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.entries().len(), 2);
    assert_eq!(registry.entries()[0].class(), CapabilityClass::Element);
}

#[test]
fn empty_registry() {
    let registry = DecoratorRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.decorators(CapabilityClass::Node).is_empty());
    assert!(registry.units_for(NodeType::Element).is_empty());
}

#[test]
fn applied_unit_behavior_is_reachable_by_type() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    doc.register(CapabilityClass::Element, Rc::new(Label("old")));
    doc.register(CapabilityClass::Element, Rc::new(Tag("plain")));
    doc.register(CapabilityClass::Element, Rc::new(Label("new")));

    let first = doc.node(s.first).unwrap();
    // The most recently applied unit of the type wins
    let label = first.with_capability(|unit: &Label| unit.label(&first));
    assert_eq!(label.unwrap().unwrap(), "new:book");

    let title = doc.node(s.title).unwrap();
    assert!(title.with_capability(|unit: &Label| unit.0).is_none());
    assert!(first.with_capability(|_: &Explorable| ()).is_none());
}

#[test]
fn capability_callback_may_redecorate_the_node() {
    let s = sample();
    let doc = Document::from_tree(s.tree, s.doc).unwrap();
    doc.register(CapabilityClass::Element, Rc::new(Label("x")));
    let first = doc.node(s.first).unwrap();

    let applied = first.with_capability(|_: &Label| doc.decorate(&first));
    assert_eq!(applied, Some(1));
    assert_eq!(names(&first), vec!["label", "label"]);
}

fn unit_names(units: &[DecoratorRef]) -> Vec<String> {
    units.iter().map(|unit| unit.name().to_string()).collect()
}
