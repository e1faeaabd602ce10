use serde_json::{Map, Value};

/// Locally cached value below a subscribed path, kept in sync with `put` and
/// `patch` events.
///
/// Follows the store's data model: `null` and empty objects do not exist, so
/// writing either removes the node and prunes parents left empty.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CachedTree {
    root: Option<Value>,
}

impl CachedTree {
    pub fn value(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Replaces the subtree at `path` (relative, `/`-separated).
    pub fn put(&mut self, path: &str, data: Value) {
        let segments = split_path(path);
        let mut root = self.root.take().unwrap_or(Value::Null);
        write_at(&mut root, &segments, data);
        self.root = (!is_absent(&root)).then_some(root);
    }

    /// Writes each child of `data` below `path`; other children are kept.
    pub fn patch(&mut self, path: &str, data: Map<String, Value>) {
        let base = path.trim_matches('/');
        for (key, value) in data {
            let child = if base.is_empty() {
                key
            } else {
                format!("{}/{}", base, key)
            };
            self.put(&child, value);
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn write_at(node: &mut Value, segments: &[&str], data: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = data;
        return;
    };

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let Value::Object(children) = node else {
        return;
    };

    let child = children.entry(head.to_string()).or_insert(Value::Null);
    write_at(child, rest, data);
    if is_absent(child) {
        children.remove(*head);
    }
}
