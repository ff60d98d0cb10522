//! Field paths into workload objects
//!
//! Template parameters address positions in the workload YAML with dot and
//! bracket paths such as `spec.containers[0].image`. Setting a path creates
//! intermediate mappings and extends sequences as needed, so a template can
//! point a parameter at a position its base workload leaves empty.

use serde_yaml::{Mapping, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Key(String),
    Index(usize),
}

/// Set `value` at `path` inside `root`
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<(), String> {
    let steps = parse(path)?;
    let slot = slot_mut(root, &steps, path)?;
    *slot = value;
    Ok(())
}

fn parse(path: &str) -> Result<Vec<Step>, String> {
    if path.is_empty() {
        return Err("empty field path".to_string());
    }

    let mut steps = Vec::new();
    for segment in path.split('.') {
        let (name, rest) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };

        if name.is_empty() {
            return Err(format!("empty segment in field path '{path}'"));
        }
        steps.push(Step::Key(name.to_string()));

        let mut rest = rest;
        while let Some(stripped) = rest.strip_prefix('[') {
            let Some(end) = stripped.find(']') else {
                return Err(format!("unclosed index in field path '{path}'"));
            };
            let index = stripped[..end]
                .parse::<usize>()
                .map_err(|_| format!("invalid index in field path '{path}'"))?;
            steps.push(Step::Index(index));
            rest = &stripped[end + 1..];
        }
        if !rest.is_empty() {
            return Err(format!("unexpected '{rest}' in field path '{path}'"));
        }
    }

    Ok(steps)
}

fn slot_mut<'a>(root: &'a mut Value, steps: &[Step], path: &str) -> Result<&'a mut Value, String> {
    let mut current = root;
    for step in steps {
        current = match step {
            Step::Key(key) => descend_key(current, key, path)?,
            Step::Index(index) => descend_index(current, *index, path)?,
        };
    }
    Ok(current)
}

fn descend_key<'a>(value: &'a mut Value, key: &str, path: &str) -> Result<&'a mut Value, String> {
    if value.is_null() {
        *value = Value::Mapping(Mapping::new());
    }
    let Value::Mapping(map) = value else {
        return Err(format!("'{key}' in '{path}' is not a mapping"));
    };

    let entry = Value::String(key.to_string());
    if !map.contains_key(&entry) {
        map.insert(entry.clone(), Value::Null);
    }
    map.get_mut(&entry)
        .ok_or_else(|| format!("cannot descend into '{key}' in '{path}'"))
}

fn descend_index<'a>(value: &'a mut Value, index: usize, path: &str) -> Result<&'a mut Value, String> {
    if value.is_null() {
        *value = Value::Sequence(Vec::new());
    }
    let Value::Sequence(items) = value else {
        return Err(format!("index [{index}] in '{path}' is not a sequence"));
    };

    while items.len() <= index {
        items.push(Value::Null);
    }
    items
        .get_mut(index)
        .ok_or_else(|| format!("cannot index [{index}] in '{path}'"))
}
