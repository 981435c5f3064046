use panelkit_kernel::uri::{escape_path_component, unescape_path_component};

#[test]
fn escaping_keeps_unreserved_characters() {
    assert_eq!(escape_path_component("Key_1.2~x-y"), "Key_1.2~x-y");
}

#[test]
fn escaping_roundtrips_awkward_keys() {
    for key in ["with space", "slash/inside", "query?x=1", "percent%"] {
        let escaped = escape_path_component(key);
        assert!(!escaped.contains('/'), "escaped key must stay one segment: {escaped}");
        assert_eq!(unescape_path_component(&escaped).as_deref(), Some(key));
    }
}
