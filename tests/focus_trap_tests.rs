use portfolio_content::focus_trap::{Element, ElementTree, FocusTrap, TabOutcome};

#[test]
fn tab_and_shift_tab_wrap_between_two_elements() {
    let mut tree = ElementTree::new();
    let dialog = tree.append(tree.root(), Element::new("div"));
    let a = tree.append(dialog, Element::new("input"));
    let b = tree.append(dialog, Element::new("button"));
    tree.focus(a);
    let trap = FocusTrap::activate(&tree, dialog);

    tree.focus(b);
    assert_eq!(trap.handle_tab(&mut tree, false), TabOutcome::Wrapped);
    assert_eq!(tree.focused(), Some(a));

    assert_eq!(trap.handle_tab(&mut tree, true), TabOutcome::Wrapped);
    assert_eq!(tree.focused(), Some(b));
}

#[test]
fn tab_moves_forward_in_document_order() {
    let mut tree = ElementTree::new();
    let dialog = tree.append(tree.root(), Element::new("div"));
    let first = tree.append(dialog, Element::new("input"));
    let group = tree.append(dialog, Element::new("div"));
    let nested = tree.append(group, Element::new("a").href("/blog/first"));
    let last = tree.append(dialog, Element::new("button"));
    tree.focus(first);
    let trap = FocusTrap::activate(&tree, dialog);

    assert_eq!(trap.handle_tab(&mut tree, false), TabOutcome::Moved);
    assert_eq!(tree.focused(), Some(nested));
    assert_eq!(trap.handle_tab(&mut tree, false), TabOutcome::Moved);
    assert_eq!(tree.focused(), Some(last));
    assert_eq!(trap.handle_tab(&mut tree, true), TabOutcome::Moved);
    assert_eq!(tree.focused(), Some(nested));
}

#[test]
fn unfocusable_elements_are_skipped() {
    let mut tree = ElementTree::new();
    let dialog = tree.append(tree.root(), Element::new("div"));
    tree.append(dialog, Element::new("button").disabled());
    tree.append(dialog, Element::new("input").hidden());
    tree.append(dialog, Element::new("a").href("/x").aria_hidden());
    tree.append(dialog, Element::new("div").tab_index(-1));
    tree.append(dialog, Element::new("a"));
    tree.append(dialog, Element::new("span"));
    let custom = tree.append(dialog, Element::new("div").tab_index(0));
    let select = tree.append(dialog, Element::new("select"));

    assert_eq!(tree.focusable_within(dialog), vec![custom, select]);
}

#[test]
fn focus_outside_the_container_is_pulled_back_in() {
    let mut tree = ElementTree::new();
    let outside = tree.append(tree.root(), Element::new("button"));
    let dialog = tree.append(tree.root(), Element::new("div"));
    let first = tree.append(dialog, Element::new("input"));
    let last = tree.append(dialog, Element::new("textarea"));
    tree.focus(outside);
    let trap = FocusTrap::activate(&tree, dialog);

    trap.handle_tab(&mut tree, false);
    assert_eq!(tree.focused(), Some(first));

    tree.focus(outside);
    trap.handle_tab(&mut tree, true);
    assert_eq!(tree.focused(), Some(last));
}

#[test]
fn empty_container_ignores_tab() {
    let mut tree = ElementTree::new();
    let trigger = tree.append(tree.root(), Element::new("button"));
    let dialog = tree.append(tree.root(), Element::new("div"));
    tree.append(dialog, Element::new("p"));
    tree.focus(trigger);
    let trap = FocusTrap::activate(&tree, dialog);

    assert_eq!(trap.handle_tab(&mut tree, false), TabOutcome::Ignored);
    assert_eq!(tree.focused(), Some(trigger));
}

#[test]
fn deactivation_restores_the_previously_focused_element() {
    let mut tree = ElementTree::new();
    let trigger = tree.append(tree.root(), Element::new("button"));
    let dialog = tree.append(tree.root(), Element::new("div"));
    let input = tree.append(dialog, Element::new("input"));
    tree.focus(trigger);

    let trap = FocusTrap::activate(&tree, dialog);
    tree.focus(input);

    assert!(trap.deactivate(&mut tree));
    assert_eq!(tree.focused(), Some(trigger));
}

#[test]
fn detached_previous_element_is_not_restored() {
    let mut tree = ElementTree::new();
    let wrapper = tree.append(tree.root(), Element::new("div"));
    let trigger = tree.append(wrapper, Element::new("button"));
    let dialog = tree.append(tree.root(), Element::new("div"));
    let input = tree.append(dialog, Element::new("input"));
    tree.focus(trigger);

    let trap = FocusTrap::activate(&tree, dialog);
    tree.focus(input);
    tree.detach(wrapper);

    assert!(!trap.deactivate(&mut tree));
    assert_eq!(tree.focused(), Some(input));
    assert!(!tree.get(trigger).unwrap().is_attached());
}
